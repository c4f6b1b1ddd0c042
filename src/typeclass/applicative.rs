//! Apply and Applicative type classes - combining independent effects.
//!
//! This module provides two capabilities:
//!
//! - [`Apply`]: combine two effects and their results (`map2`)
//! - [`Applicative`]: additionally lift a pure value (`pure`)
//!
//! An `Apply` constructor can collapse the Day convolution of itself with
//! itself, and an `Applicative` one can also collapse the empty free
//! applicative. These are the targets of `DayT::retract_sf` and
//! `DayT::retract_mf`.
//!
//! # Laws
//!
//! ## Associativity (Apply)
//!
//! ```text
//! map2(map2(fa, fb, pair), fc, assoc) == map2(fa, map2(fb, fc, pair), |a, (b, c)| ((a, b), c))
//! ```
//!
//! ## Identity (Applicative)
//!
//! ```text
//! map2(pure(()), fa, |_, a| a) == fa
//! map2(fa, pure(()), |a, _| a) == fa
//! ```
//!
//! # Examples
//!
//! ```rust
//! use combinars::typeclass::{Applicative, Apply, OptionK};
//!
//! let sum = OptionK::map2(Some(1), Some(2), |x: i32, y: i32| x + y);
//! assert_eq!(sum, Some(3));
//!
//! let lifted: Option<i32> = OptionK::pure(42);
//! assert_eq!(lifted, Some(42));
//! ```

use super::functor::Functor;
use super::higher::{OptionK, Value, VecK};
use super::identity::{Identity, IdentityK};

/// A functor whose effects can be combined pairwise.
///
/// The left effect always runs before the right one.
pub trait Apply: Functor {
    /// Combines two effects, applying `function` to both results.
    fn map2<A: Value, B: Value, C: Value, M>(first: Self::Of<A>, second: Self::Of<B>, function: M) -> Self::Of<C>
    where
        M: Fn(A, B) -> C + 'static;

    /// Combines two effects into a pair of their results.
    #[inline]
    fn product<A: Value, B: Value>(first: Self::Of<A>, second: Self::Of<B>) -> Self::Of<(A, B)> {
        Self::map2::<A, B, (A, B), _>(first, second, |left, right| (left, right))
    }

    /// Runs both effects and keeps the result of the second.
    #[inline]
    fn product_right<A: Value, B: Value>(first: Self::Of<A>, second: Self::Of<B>) -> Self::Of<B> {
        Self::map2::<A, B, B, _>(first, second, |_, right| right)
    }
}

/// An `Apply` with a way to lift a pure value.
pub trait Applicative: Apply {
    /// Lifts a value without performing any effect.
    fn pure<A: Value>(value: A) -> Self::Of<A>;
}

// =============================================================================
// Option Implementation
// =============================================================================

impl Apply for OptionK {
    #[inline]
    fn map2<A: Value, B: Value, C: Value, M>(first: Option<A>, second: Option<B>, function: M) -> Option<C>
    where
        M: Fn(A, B) -> C + 'static,
    {
        match (first, second) {
            (Some(left), Some(right)) => Some(function(left, right)),
            _ => None,
        }
    }
}

impl Applicative for OptionK {
    #[inline]
    fn pure<A: Value>(value: A) -> Option<A> {
        Some(value)
    }
}

// =============================================================================
// Vec Implementation
// =============================================================================

/// Cartesian product: every left element with every right element.
impl Apply for VecK {
    fn map2<A: Value, B: Value, C: Value, M>(first: Vec<A>, second: Vec<B>, function: M) -> Vec<C>
    where
        M: Fn(A, B) -> C + 'static,
    {
        let mut result = Vec::with_capacity(first.len() * second.len());
        for left in first {
            for right in &second {
                result.push(function(left.clone(), right.clone()));
            }
        }
        result
    }
}

impl Applicative for VecK {
    #[inline]
    fn pure<A: Value>(value: A) -> Vec<A> {
        vec![value]
    }
}

// =============================================================================
// Identity Implementation
// =============================================================================

impl Apply for IdentityK {
    #[inline]
    fn map2<A: Value, B: Value, C: Value, M>(first: Identity<A>, second: Identity<B>, function: M) -> Identity<C>
    where
        M: Fn(A, B) -> C + 'static,
    {
        Identity(function(first.0, second.0))
    }
}

impl Applicative for IdentityK {
    #[inline]
    fn pure<A: Value>(value: A) -> Identity<A> {
        Identity(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Some(1), Some(2), Some(3))]
    #[case(Some(1), None, None)]
    #[case(None, Some(2), None)]
    #[case(None, None, None)]
    fn option_map2_adds(#[case] first: Option<i32>, #[case] second: Option<i32>, #[case] expected: Option<i32>) {
        assert_eq!(OptionK::map2(first, second, |x: i32, y: i32| x + y), expected);
    }

    #[test]
    fn vec_map2_is_cartesian_in_order() {
        let result = VecK::map2(vec![1, 2], vec![10, 20], |x: i32, y: i32| x + y);
        assert_eq!(result, vec![11, 21, 12, 22]);
    }

    #[test]
    fn vec_map2_with_empty_side_is_empty() {
        assert!(VecK::map2(vec![1, 2], Vec::<i32>::new(), |x: i32, y: i32| x + y).is_empty());
    }

    #[test]
    fn product_pairs_results() {
        assert_eq!(OptionK::product(Some(1), Some("a")), Some((1, "a")));
        assert_eq!(IdentityK::product(Identity(1), Identity('x')), Identity((1, 'x')));
    }

    #[test]
    fn product_right_keeps_second() {
        assert_eq!(VecK::product_right(vec![1, 2], vec!['a']), vec!['a', 'a']);
    }

    #[test]
    fn pure_is_left_identity_for_vec() {
        let value = vec![1, 2, 3];
        let result = VecK::map2(VecK::pure(()), value.clone(), |(), x: i32| x);
        assert_eq!(result, value);
    }
}
