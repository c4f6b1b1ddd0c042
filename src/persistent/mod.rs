//! Persistent (immutable) data structures.
//!
//! - [`PersistentList`]: persistent singly-linked list, and its brand [`ListK`]
//!
//! The list uses structural sharing: prepending creates a new version
//! without copying the existing elements, which keeps consing onto a free
//! monoid of the product combinator O(1).
//!
//! # Examples
//!
//! ```rust
//! use combinars::persistent::PersistentList;
//!
//! let list = PersistentList::new().cons(3).cons(2).cons(1);
//! assert_eq!(list.head(), Some(&1));
//!
//! let extended = list.cons(0);
//! assert_eq!(list.len(), 3);
//! assert_eq!(extended.len(), 4);
//! ```

mod list;

pub use list::{ListK, PersistentList, PersistentListIntoIterator, PersistentListIterator};
