//! Persistent (immutable) singly-linked list.
//!
//! This module provides [`PersistentList`], the sequence type behind the
//! product combinator's aggregates (`NonEmptyF` and `ListF`), and its brand
//! [`ListK`].
//!
//! # Overview
//!
//! - O(1) prepend (`cons`)
//! - O(1) head and tail access
//! - O(n) append and reverse
//!
//! All operations return new lists without modifying the original, and
//! structural sharing keeps prepending cheap: every aggregate produced by
//! consing onto an existing one shares the existing nodes.
//!
//! # Examples
//!
//! ```rust
//! use combinars::persistent::PersistentList;
//!
//! let list = PersistentList::new().cons(3).cons(2).cons(1);
//! assert_eq!(list.head(), Some(&1));
//! assert_eq!(list.len(), 3);
//!
//! // Structural sharing: the original list is preserved
//! let extended = list.cons(0);
//! assert_eq!(list.len(), 3);
//! assert_eq!(extended.len(), 4);
//!
//! let collected: PersistentList<i32> = (1..=5).collect();
//! assert_eq!(collected.iter().sum::<i32>(), 15);
//! ```

use std::fmt;
use std::hash::{Hash, Hasher};
use std::iter::FromIterator;
use std::rc::Rc;

use crate::control::Either;
use crate::typeclass::{Alt, Alternative, Applicative, Apply, Bind, Functor, TypeConstructor, Value};

struct Node<T> {
    element: T,
    next: Option<Rc<Self>>,
}

/// A persistent (immutable) singly-linked list.
///
/// # Time Complexity
///
/// | Operation | Complexity |
/// |-----------|------------|
/// | `new`     | O(1)       |
/// | `cons`    | O(1)       |
/// | `head`    | O(1)       |
/// | `tail`    | O(1)       |
/// | `len`     | O(1)       |
/// | `append`  | O(n)       |
/// | `reverse` | O(n)       |
#[derive(Clone)]
pub struct PersistentList<T> {
    head: Option<Rc<Node<T>>>,
    length: usize,
}

impl<T> PersistentList<T> {
    /// Creates a new empty list.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            head: None,
            length: 0,
        }
    }

    /// Creates a list containing a single element.
    #[inline]
    #[must_use]
    pub fn singleton(element: T) -> Self {
        Self::new().cons(element)
    }

    fn build_from_vec(mut elements: Vec<T>) -> Self {
        let mut list = Self::new();
        while let Some(element) = elements.pop() {
            list = list.cons(element);
        }
        list
    }

    /// Prepends an element, sharing the rest of the list.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use combinars::persistent::PersistentList;
    ///
    /// let list = PersistentList::new().cons(2).cons(1);
    /// assert_eq!(list.iter().copied().collect::<Vec<_>>(), vec![1, 2]);
    /// ```
    #[inline]
    #[must_use]
    pub fn cons(&self, element: T) -> Self {
        Self {
            head: Some(Rc::new(Node {
                element,
                next: self.head.clone(),
            })),
            length: self.length + 1,
        }
    }

    /// Returns a reference to the first element, if any.
    #[inline]
    #[must_use]
    pub fn head(&self) -> Option<&T> {
        self.head.as_ref().map(|node| &node.element)
    }

    /// Returns the list without its first element.
    ///
    /// The tail of an empty list is empty.
    #[inline]
    #[must_use]
    pub fn tail(&self) -> Self {
        self.head.as_ref().map_or_else(Self::new, |node| Self {
            head: node.next.clone(),
            length: self.length.saturating_sub(1),
        })
    }

    /// Decomposes the list into its head and tail.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use combinars::persistent::PersistentList;
    ///
    /// let list = PersistentList::new().cons(2).cons(1);
    /// let (head, tail) = list.uncons().unwrap();
    /// assert_eq!(*head, 1);
    /// assert_eq!(tail.head(), Some(&2));
    /// ```
    #[inline]
    #[must_use]
    pub fn uncons(&self) -> Option<(&T, Self)> {
        self.head.as_ref().map(|node| {
            let tail = Self {
                head: node.next.clone(),
                length: self.length.saturating_sub(1),
            };
            (&node.element, tail)
        })
    }

    /// Returns the number of elements.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.length
    }

    /// Returns `true` if the list has no elements.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Iterates over references to the elements, front to back.
    #[inline]
    #[must_use]
    pub fn iter(&self) -> PersistentListIterator<'_, T> {
        PersistentListIterator {
            current: self.head.as_ref(),
            remaining: self.length,
        }
    }
}

impl<T: Clone> PersistentList<T> {
    /// Returns the elements of `self` followed by the elements of `other`.
    ///
    /// `other` is shared, not copied.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use combinars::persistent::PersistentList;
    ///
    /// let first: PersistentList<i32> = vec![1, 2].into_iter().collect();
    /// let second: PersistentList<i32> = vec![3].into_iter().collect();
    /// let combined = first.append(&second);
    /// assert_eq!(combined.into_iter().collect::<Vec<_>>(), vec![1, 2, 3]);
    /// ```
    #[must_use]
    pub fn append(&self, other: &Self) -> Self {
        if self.is_empty() {
            return other.clone();
        }
        if other.is_empty() {
            return self.clone();
        }
        let mut elements: Vec<T> = self.iter().cloned().collect();
        let mut result = other.clone();
        while let Some(element) = elements.pop() {
            result = result.cons(element);
        }
        result
    }

    /// Returns the elements in reverse order.
    #[must_use]
    pub fn reverse(&self) -> Self {
        let mut result = Self::new();
        for element in self {
            result = result.cons(element.clone());
        }
        result
    }
}

/// Releases nodes iteratively so that long lists do not overflow the stack.
impl<T> Drop for PersistentList<T> {
    fn drop(&mut self) {
        let mut current = self.head.take();
        while let Some(node) = current {
            match Rc::try_unwrap(node) {
                Ok(mut node) => current = node.next.take(),
                Err(_) => break,
            }
        }
    }
}

// =============================================================================
// Iterator Implementation
// =============================================================================

/// An iterator over references to elements of a [`PersistentList`].
pub struct PersistentListIterator<'a, T> {
    current: Option<&'a Rc<Node<T>>>,
    remaining: usize,
}

impl<'a, T> Iterator for PersistentListIterator<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.current.map(|node| {
            self.current = node.next.as_ref();
            self.remaining = self.remaining.saturating_sub(1);
            &node.element
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for PersistentListIterator<'_, T> {}

/// An owning iterator over elements of a [`PersistentList`].
pub struct PersistentListIntoIterator<T> {
    list: PersistentList<T>,
}

impl<T: Clone> Iterator for PersistentListIntoIterator<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        let (element, tail) = self
            .list
            .uncons()
            .map(|(head, tail)| (head.clone(), tail))?;
        self.list = tail;
        Some(element)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.list.length, Some(self.list.length))
    }
}

impl<T: Clone> ExactSizeIterator for PersistentListIntoIterator<T> {}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<T> Default for PersistentList<T> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> FromIterator<T> for PersistentList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::build_from_vec(iter.into_iter().collect())
    }
}

impl<T: Clone> IntoIterator for PersistentList<T> {
    type Item = T;
    type IntoIter = PersistentListIntoIterator<T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        PersistentListIntoIterator { list: self }
    }
}

impl<'a, T> IntoIterator for &'a PersistentList<T> {
    type Item = &'a T;
    type IntoIter = PersistentListIterator<'a, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: PartialEq> PartialEq for PersistentList<T> {
    fn eq(&self, other: &Self) -> bool {
        self.length == other.length && self.iter().zip(other.iter()).all(|(left, right)| left == right)
    }
}

impl<T: Eq> Eq for PersistentList<T> {}

impl<T: Hash> Hash for PersistentList<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.length.hash(state);
        for element in self {
            element.hash(state);
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for PersistentList<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_list().entries(self.iter()).finish()
    }
}

// =============================================================================
// Type Class Implementations
// =============================================================================

/// Brand for [`PersistentList`].
#[derive(Debug)]
pub enum ListK {}

impl TypeConstructor for ListK {
    type Of<A: Value> = PersistentList<A>;
}

impl Functor for ListK {
    fn fmap<A: Value, B: Value, M>(value: PersistentList<A>, function: M) -> PersistentList<B>
    where
        M: Fn(A) -> B + 'static,
    {
        value.into_iter().map(function).collect()
    }
}

impl Apply for ListK {
    fn map2<A: Value, B: Value, C: Value, M>(
        first: PersistentList<A>,
        second: PersistentList<B>,
        function: M,
    ) -> PersistentList<C>
    where
        M: Fn(A, B) -> C + 'static,
    {
        let mut elements = Vec::with_capacity(first.len() * second.len());
        for left in &first {
            for right in &second {
                elements.push(function(left.clone(), right.clone()));
            }
        }
        PersistentList::build_from_vec(elements)
    }
}

impl Applicative for ListK {
    #[inline]
    fn pure<A: Value>(value: A) -> PersistentList<A> {
        PersistentList::singleton(value)
    }
}

impl Bind for ListK {
    fn flat_map<A: Value, B: Value, M>(value: PersistentList<A>, function: M) -> PersistentList<B>
    where
        M: Fn(A) -> PersistentList<B> + 'static,
    {
        value.into_iter().flat_map(function).collect()
    }

    fn tail_rec_m<S: Value, B: Value, M>(initial: S, step: M) -> PersistentList<B>
    where
        M: Fn(S) -> Either<PersistentList<S>, PersistentList<B>> + 'static,
    {
        let mut results = Vec::new();
        let mut frontier = vec![PersistentList::singleton(initial).into_iter()];
        while let Some(states) = frontier.last_mut() {
            match states.next().map(&step) {
                Some(Either::Left(next)) => frontier.push(next.into_iter()),
                Some(Either::Right(done)) => results.extend(done),
                None => {
                    frontier.pop();
                }
            }
        }
        PersistentList::build_from_vec(results)
    }
}

impl Alt for ListK {
    #[inline]
    fn alt<A: Value>(first: PersistentList<A>, second: PersistentList<A>) -> PersistentList<A> {
        first.append(&second)
    }
}

impl Alternative for ListK {
    #[inline]
    fn empty<A: Value>() -> PersistentList<A> {
        PersistentList::new()
    }
}

// =============================================================================
// Serde Support
// =============================================================================

#[cfg(feature = "serde")]
impl<T: serde::Serialize> serde::Serialize for PersistentList<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeSeq;
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for element in self {
            seq.serialize_element(element)?;
        }
        seq.end()
    }
}

#[cfg(feature = "serde")]
struct PersistentListVisitor<T> {
    marker: std::marker::PhantomData<T>,
}

#[cfg(feature = "serde")]
impl<T> PersistentListVisitor<T> {
    const fn new() -> Self {
        Self {
            marker: std::marker::PhantomData,
        }
    }
}

#[cfg(feature = "serde")]
impl<'de, T> serde::de::Visitor<'de> for PersistentListVisitor<T>
where
    T: serde::Deserialize<'de> + Clone,
{
    type Value = PersistentList<T>;

    fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
        formatter.write_str("a sequence")
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: serde::de::SeqAccess<'de>,
    {
        const MAX_PREALLOCATE: usize = 4096;
        let capacity = seq.size_hint().unwrap_or(0).min(MAX_PREALLOCATE);
        let mut elements = Vec::with_capacity(capacity);
        while let Some(element) = seq.next_element()? {
            elements.push(element);
        }
        Ok(PersistentList::build_from_vec(elements))
    }
}

#[cfg(feature = "serde")]
impl<'de, T> serde::Deserialize<'de> for PersistentList<T>
where
    T: serde::Deserialize<'de> + Clone,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_seq(PersistentListVisitor::new())
    }
}

static_assertions::assert_not_impl_any!(PersistentList<i32>: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn list_of(elements: &[i32]) -> PersistentList<i32> {
        elements.iter().copied().collect()
    }

    fn to_vec(list: &PersistentList<i32>) -> Vec<i32> {
        list.iter().copied().collect()
    }

    #[rstest]
    fn test_new_creates_empty() {
        let list: PersistentList<i32> = PersistentList::new();
        assert!(list.is_empty());
        assert_eq!(list.head(), None);
    }

    #[rstest]
    fn test_cons_shares_structure() {
        let base = list_of(&[2, 3]);
        let extended = base.cons(1);
        assert_eq!(to_vec(&base), vec![2, 3]);
        assert_eq!(to_vec(&extended), vec![1, 2, 3]);
    }

    #[rstest]
    fn test_tail_of_empty_is_empty() {
        let list: PersistentList<i32> = PersistentList::new();
        assert!(list.tail().is_empty());
    }

    #[rstest]
    fn test_uncons() {
        let list = list_of(&[1, 2]);
        let (head, tail) = list.uncons().unwrap();
        assert_eq!(*head, 1);
        assert_eq!(to_vec(&tail), vec![2]);
        assert_eq!(PersistentList::<i32>::new().uncons(), None);
    }

    #[rstest]
    #[case(&[], &[], &[])]
    #[case(&[1], &[], &[1])]
    #[case(&[], &[2], &[2])]
    #[case(&[1, 2], &[3, 4], &[1, 2, 3, 4])]
    fn test_append(#[case] first: &[i32], #[case] second: &[i32], #[case] expected: &[i32]) {
        let combined = list_of(first).append(&list_of(second));
        assert_eq!(to_vec(&combined), expected);
        assert_eq!(combined.len(), expected.len());
    }

    #[rstest]
    fn test_reverse() {
        assert_eq!(to_vec(&list_of(&[1, 2, 3]).reverse()), vec![3, 2, 1]);
    }

    #[rstest]
    fn test_iterators_report_exact_size() {
        let list = list_of(&[1, 2, 3]);
        assert_eq!(list.iter().len(), 3);
        assert_eq!(list.clone().into_iter().len(), 3);
    }

    #[rstest]
    fn test_eq_and_debug() {
        assert_eq!(list_of(&[1, 2]), list_of(&[1, 2]));
        assert_ne!(list_of(&[1, 2]), list_of(&[2, 1]));
        assert_eq!(format!("{:?}", list_of(&[1, 2])), "[1, 2]");
    }

    #[rstest]
    fn test_long_list_drops_without_overflow() {
        let list: PersistentList<usize> = (0..200_000).collect();
        assert_eq!(list.len(), 200_000);
        drop(list);
    }

    #[rstest]
    fn test_list_brand_is_alternative() {
        let combined = ListK::alt(list_of(&[1]), list_of(&[2, 3]));
        assert_eq!(to_vec(&combined), vec![1, 2, 3]);
        assert!(ListK::empty::<i32>().is_empty());
    }

    #[rstest]
    fn test_list_brand_map2_is_cartesian() {
        let result = ListK::map2(list_of(&[1, 2]), list_of(&[10, 20]), |x: i32, y: i32| x + y);
        assert_eq!(to_vec(&result), vec![11, 21, 12, 22]);
    }

    #[rstest]
    fn test_list_brand_flat_map() {
        let result = ListK::flat_map(list_of(&[1, 2]), |x: i32| PersistentList::new().cons(x * 10).cons(x));
        assert_eq!(to_vec(&result), vec![1, 10, 2, 20]);
    }

    #[rstest]
    fn tail_rec_m_keeps_branch_order() {
        let expanded = ListK::tail_rec_m::<i32, i32, _>(1, |n| {
            if n >= 8 { Either::Right(PersistentList::singleton(n)) } else { Either::Left(list_of(&[n * 2, n * 2 + 1])) }
        });
        assert_eq!(to_vec(&expanded), vec![8, 9, 10, 11, 12, 13, 14, 15]);
    }

    #[rstest]
    fn tail_rec_m_survives_long_loops() {
        let counted = ListK::tail_rec_m::<u32, u32, _>(0, |n| {
            if n == 150_000 { Either::Right(PersistentList::singleton(n)) } else { Either::Left(PersistentList::singleton(n + 1)) }
        });
        assert_eq!(counted.head(), Some(&150_000));
    }
}
