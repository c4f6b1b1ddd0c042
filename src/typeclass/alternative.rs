//! Alt and Alternative type classes - choosing between effects.
//!
//! [`Alt`] provides an associative choice between two effects of the same
//! constructor, and [`Alternative`] adds the effect that always fails.
//! Together they are what collapses the product combinator: a pair of
//! effects becomes their `alt`, and the empty list becomes `empty`.
//!
//! # Laws
//!
//! ## Associativity
//!
//! ```text
//! alt(alt(a, b), c) == alt(a, alt(b, c))
//! ```
//!
//! ## Identity
//!
//! ```text
//! alt(empty(), a) == a
//! alt(a, empty()) == a
//! ```
//!
//! # Examples
//!
//! ```rust
//! use combinars::typeclass::{Alt, Alternative, OptionK, VecK};
//!
//! assert_eq!(OptionK::alt(None, Some(2)), Some(2));
//! assert_eq!(VecK::alt(vec![1], vec![2, 3]), vec![1, 2, 3]);
//! assert_eq!(VecK::empty::<i32>(), Vec::<i32>::new());
//! ```

use super::functor::Functor;
use super::higher::{OptionK, Value, VecK};

/// A functor with an associative choice.
pub trait Alt: Functor {
    /// Combines two alternatives, preferring or concatenating left first.
    fn alt<A: Value>(first: Self::Of<A>, second: Self::Of<A>) -> Self::Of<A>;
}

/// An `Alt` with an identity element.
pub trait Alternative: Alt {
    /// The alternative that never produces a value.
    fn empty<A: Value>() -> Self::Of<A>;

    /// Combines any number of alternatives from left to right.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use combinars::typeclass::{Alternative, OptionK};
    ///
    /// assert_eq!(OptionK::choice(vec![None, Some(1), Some(2)]), Some(1));
    /// assert_eq!(OptionK::choice(Vec::<Option<i32>>::new()), None);
    /// ```
    fn choice<A: Value, I>(alternatives: I) -> Self::Of<A>
    where
        I: IntoIterator<Item = Self::Of<A>>,
    {
        alternatives
            .into_iter()
            .fold(Self::empty::<A>(), |accumulator, next| Self::alt::<A>(accumulator, next))
    }
}

impl Alt for OptionK {
    #[inline]
    fn alt<A: Value>(first: Option<A>, second: Option<A>) -> Option<A> {
        first.or(second)
    }
}

impl Alternative for OptionK {
    #[inline]
    fn empty<A: Value>() -> Option<A> {
        None
    }
}

impl Alt for VecK {
    #[inline]
    fn alt<A: Value>(mut first: Vec<A>, second: Vec<A>) -> Vec<A> {
        first.extend(second);
        first
    }
}

impl Alternative for VecK {
    #[inline]
    fn empty<A: Value>() -> Vec<A> {
        Vec::new()
    }
}
