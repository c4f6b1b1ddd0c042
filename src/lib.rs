//! # combinars
//!
//! Binary functor combinators: an algebra for composing effect constructors.
//!
//! ## Overview
//!
//! An effect is modelled as a unary type constructor (a [`Functor`]). A
//! binary combinator takes two such constructors and produces a third one.
//! For every combinator this library derives:
//!
//! - a **free semigroup**: one or more self-applications of the combinator
//! - a **free monoid**: zero or more self-applications of the combinator
//! - an **explicit recursive form** (`Chain1` / `Chain`) isomorphic to them
//!
//! Four combinators are provided:
//!
//! | Combinator | Identity | Free semigroup | Free monoid | Collapse needs |
//! |------------|----------|----------------|-------------|----------------|
//! | `ProductT` | `Proxy`  | `NonEmptyF`    | `ListF`     | `Alt` / `Alternative` |
//! | `SumT`     | `Void`   | `Step`         | `Step`      | nothing |
//! | `DayT`     | `Identity` | `Ap1`        | `Ap`        | `Apply` / `Applicative` |
//! | `CompT`    | `Identity` | `Free1`      | `Free`      | `Bind` / `Monad` |
//!
//! ## Feature Flags
//!
//! - `typeclass`: the higher-kinded emulation and the combinator hierarchy
//! - `control`: `Either` and the existential wrapper
//! - `persistent`: the persistent list backing `ListF` and `NonEmptyF`
//! - `combinator`: the four instantiations and the recursive forms
//! - `serde`: serialization of the list-backed aggregates
//! - `full`: Enable all features
//!
//! ## Example
//!
//! ```rust
//! use combinars::prelude::*;
//!
//! let chain = ProductT::to_mf::<VecK, i32>((vec![1, 2], vec![3]));
//! let collapsed = ProductT::retract_mf::<VecK, i32>(chain);
//! assert_eq!(collapsed, vec![1, 2, 3]);
//! ```
//!
//! [`Functor`]: typeclass::Functor

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
// Note: Disabling redundant_closure_for_method_calls due to clippy 0.1.92 panic bug
#![allow(clippy::redundant_closure_for_method_calls)]

/// Prelude module for convenient imports.
///
/// Re-exports commonly used types and traits.
///
/// # Usage
///
/// ```rust
/// use combinars::prelude::*;
/// ```
pub mod prelude {

    #[cfg(feature = "typeclass")]
    pub use crate::typeclass::*;

    #[cfg(feature = "control")]
    pub use crate::control::*;

    #[cfg(feature = "persistent")]
    pub use crate::persistent::*;

    #[cfg(feature = "combinator")]
    pub use crate::combinator::*;
}

#[cfg(feature = "typeclass")]
pub mod typeclass;

#[cfg(feature = "control")]
pub mod control;

#[cfg(feature = "persistent")]
pub mod persistent;

#[cfg(feature = "combinator")]
pub mod combinator;
