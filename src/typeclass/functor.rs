//! Functor type class - mapping over the payload of an effect constructor.
//!
//! This module provides the `Functor` trait, implemented by brands whose
//! applied type can have a function applied to its payload while preserving
//! the surrounding structure.
//!
//! Every building block of the combinator algebra is a functor: the effect
//! constructors supplied by the user, the identity constructors of each
//! tensor, and every aggregate the combinators produce.
//!
//! # Laws
//!
//! All `Functor` implementations must satisfy these laws:
//!
//! ## Identity Law
//!
//! ```text
//! F::fmap(fa, |x| x) == fa
//! ```
//!
//! ## Composition Law
//!
//! ```text
//! F::fmap(F::fmap(fa, f), g) == F::fmap(fa, |x| g(f(x)))
//! ```
//!
//! # Examples
//!
//! ```rust
//! use combinars::typeclass::{Functor, OptionK, VecK};
//!
//! let transformed = OptionK::fmap(Some(5), |n: i32| n.to_string());
//! assert_eq!(transformed, Some("5".to_string()));
//!
//! let doubled = VecK::fmap(vec![1, 2, 3], |n: i32| n * 2);
//! assert_eq!(doubled, vec![2, 4, 6]);
//! ```

use super::higher::{OptionK, TypeConstructor, Value, VecK};

/// A brand whose applied type can have a function mapped over its payload.
///
/// Functions are shared rather than consumed (`Fn` instead of `FnOnce`) so
/// that constructors holding several payloads, or payloads produced later by
/// a stored continuation, can apply the same function more than once.
///
/// # Laws
///
/// ## Identity Law
///
/// ```text
/// F::fmap(fa, |x| x) == fa
/// ```
///
/// ## Composition Law
///
/// ```text
/// F::fmap(F::fmap(fa, f), g) == F::fmap(fa, |x| g(f(x)))
/// ```
///
/// # Examples
///
/// ```rust
/// use combinars::typeclass::{Functor, OptionK};
///
/// let value: Option<i32> = OptionK::fmap(Some(5), |n: i32| n * 2);
/// assert_eq!(value, Some(10));
/// ```
pub trait Functor: TypeConstructor {
    /// Applies a function to every payload inside the constructor.
    fn fmap<A: Value, B: Value, M>(value: Self::Of<A>, function: M) -> Self::Of<B>
    where
        M: Fn(A) -> B + 'static;

    /// Replaces every payload with a constant value.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use combinars::typeclass::{Functor, OptionK};
    ///
    /// assert_eq!(OptionK::replace(Some(5), "replaced"), Some("replaced"));
    /// assert_eq!(OptionK::replace(None::<i32>, "replaced"), None);
    /// ```
    #[inline]
    fn replace<A: Value, B: Value>(value: Self::Of<A>, replacement: B) -> Self::Of<B> {
        Self::fmap::<A, B, _>(value, move |_| replacement.clone())
    }

    /// Discards every payload, keeping only the structure.
    #[inline]
    fn void<A: Value>(value: Self::Of<A>) -> Self::Of<()> {
        Self::replace::<A, ()>(value, ())
    }
}

// =============================================================================
// Standard Library Implementations
// =============================================================================

impl Functor for OptionK {
    #[inline]
    fn fmap<A: Value, B: Value, M>(value: Option<A>, function: M) -> Option<B>
    where
        M: Fn(A) -> B + 'static,
    {
        value.map(function)
    }
}

impl Functor for VecK {
    #[inline]
    fn fmap<A: Value, B: Value, M>(value: Vec<A>, function: M) -> Vec<B>
    where
        M: Fn(A) -> B + 'static,
    {
        value.into_iter().map(function).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Some(1), Some(2))]
    #[case(None, None)]
    fn option_fmap_increments(#[case] input: Option<i32>, #[case] expected: Option<i32>) {
        assert_eq!(OptionK::fmap(input, |n: i32| n + 1), expected);
    }

    #[rstest]
    #[case(vec![], vec![])]
    #[case(vec![1, 2, 3], vec![2, 4, 6])]
    fn vec_fmap_preserves_length(#[case] input: Vec<i32>, #[case] expected: Vec<i32>) {
        assert_eq!(VecK::fmap(input, |n: i32| n * 2), expected);
    }

    #[test]
    fn vec_replace_keeps_shape() {
        assert_eq!(VecK::replace(vec![1, 2, 3], 'x'), vec!['x', 'x', 'x']);
    }

    #[test]
    fn option_void_discards_payload() {
        assert_eq!(OptionK::void(Some("hello")), Some(()));
        assert_eq!(OptionK::void(None::<&str>), None);
    }

    #[test]
    fn fmap_reuses_shared_function() {
        let offset = 10;
        let result = VecK::fmap(vec![1, 2], move |n: i32| n + offset);
        assert_eq!(result, vec![11, 12]);
    }
}
