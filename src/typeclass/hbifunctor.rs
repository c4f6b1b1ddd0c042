//! HBifunctor type class - binary combinators of effect constructors.
//!
//! An `HBifunctor` takes two type constructors `F` and `G` and produces a
//! third, `T<F, G>`. Where an ordinary bifunctor maps functions over the two
//! payload types of a value, an `HBifunctor` maps *natural transformations*
//! over the two constructors.
//!
//! The combinator brands of this crate (`ProductT`, `SumT`, `DayT`,
//! `CompT`) implement this trait, and the applied form `T<F, G>` is itself
//! a brand, [`Applied`], so results of a combinator can be fed back into it.
//!
//! # Laws
//!
//! ## Identity Law
//!
//! ```text
//! T::hbimap(value, IdentityTransformation, IdentityTransformation) == value
//! ```
//!
//! ## Composition Law
//!
//! ```text
//! T::hbimap(T::hbimap(value, f1, g1), f2, g2) == T::hbimap(value, f2 . f1, g2 . g1)
//! ```
//!
//! ## hleft/hright Consistency Law
//!
//! ```text
//! T::hbimap(value, f, g) == T::hright(T::hleft(value, f), g) == T::hleft(T::hright(value, g), f)
//! ```
//!
//! # Examples
//!
//! ```rust
//! use combinars::prelude::*;
//!
//! struct FirstOnly;
//!
//! impl NaturalTransformation<VecK, OptionK> for FirstOnly {
//!     fn transform<A: Value>(&self, value: Vec<A>) -> Option<A> {
//!         value.into_iter().next()
//!     }
//! }
//!
//! let pair = (vec![1, 2], Some(3));
//! let mapped = ProductT::hleft::<VecK, OptionK, OptionK, i32, _>(pair, FirstOnly);
//! assert_eq!(mapped, (Some(1), Some(3)));
//! ```

use std::marker::PhantomData;

use super::functor::Functor;
use super::higher::{TypeConstructor, Value};
use super::natural::{IdentityTransformation, NaturalTransformation};

/// A binary combinator of type constructors.
///
/// Every method takes its brands explicitly; call sites name them with a
/// turbofish because applied types such as `F::Of<A>` do not determine `F`.
pub trait HBifunctor: Sized + 'static {
    /// The combinator applied to `F` and `G`, at payload `A`.
    type Of<F: TypeConstructor, G: TypeConstructor, A: Value>: Value;

    /// Transforms both sides at once.
    fn hbimap<F, G, J, L, A, N, M>(value: Self::Of<F, G, A>, left: N, right: M) -> Self::Of<J, L, A>
    where
        F: TypeConstructor,
        G: TypeConstructor,
        J: TypeConstructor,
        L: TypeConstructor,
        A: Value,
        N: NaturalTransformation<F, J>,
        M: NaturalTransformation<G, L>;

    /// Transforms the left side only.
    #[inline]
    fn hleft<F, G, J, A, N>(value: Self::Of<F, G, A>, left: N) -> Self::Of<J, G, A>
    where
        F: TypeConstructor,
        G: TypeConstructor,
        J: TypeConstructor,
        A: Value,
        N: NaturalTransformation<F, J>,
    {
        Self::hbimap::<F, G, J, G, A, N, IdentityTransformation>(value, left, IdentityTransformation)
    }

    /// Transforms the right side only.
    #[inline]
    fn hright<F, G, L, A, M>(value: Self::Of<F, G, A>, right: M) -> Self::Of<F, L, A>
    where
        F: TypeConstructor,
        G: TypeConstructor,
        L: TypeConstructor,
        A: Value,
        M: NaturalTransformation<G, L>,
    {
        Self::hbimap::<F, G, F, L, A, IdentityTransformation, M>(value, IdentityTransformation, right)
    }

    /// Maps the payload of a combined value, given both sides are functors.
    fn hfmap<F, G, A, B, M>(value: Self::Of<F, G, A>, function: M) -> Self::Of<F, G, B>
    where
        F: Functor,
        G: Functor,
        A: Value,
        B: Value,
        M: Fn(A) -> B + 'static;
}

/// Brand for a combinator applied to two constructors, `T<F, G>`.
///
/// `Applied<T, F, G>` is a functor whenever `F` and `G` are, which lets the
/// result of a combinator appear as an argument of another one, as in
/// `T<F, T<G, H>>`.
pub struct Applied<T, F, G>(PhantomData<fn() -> (T, F, G)>);

impl<T, F, G> TypeConstructor for Applied<T, F, G>
where
    T: HBifunctor,
    F: TypeConstructor,
    G: TypeConstructor,
{
    type Of<A: Value> = T::Of<F, G, A>;
}

impl<T, F, G> Functor for Applied<T, F, G>
where
    T: HBifunctor,
    F: Functor,
    G: Functor,
{
    #[inline]
    fn fmap<A: Value, B: Value, M>(value: Self::Of<A>, function: M) -> Self::Of<B>
    where
        M: Fn(A) -> B + 'static,
    {
        T::hfmap::<F, G, A, B, M>(value, function)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::typeclass::{OptionK, VecK};

    /// A pair of effects, local to these tests.
    enum PairT {}

    impl HBifunctor for PairT {
        type Of<F: TypeConstructor, G: TypeConstructor, A: Value> = (F::Of<A>, G::Of<A>);

        fn hbimap<F, G, J, L, A, N, M>(value: (F::Of<A>, G::Of<A>), left: N, right: M) -> (J::Of<A>, L::Of<A>)
        where
            F: TypeConstructor,
            G: TypeConstructor,
            J: TypeConstructor,
            L: TypeConstructor,
            A: Value,
            N: NaturalTransformation<F, J>,
            M: NaturalTransformation<G, L>,
        {
            (left.transform::<A>(value.0), right.transform::<A>(value.1))
        }

        fn hfmap<F, G, A, B, M>(value: (F::Of<A>, G::Of<A>), function: M) -> (F::Of<B>, G::Of<B>)
        where
            F: Functor,
            G: Functor,
            A: Value,
            B: Value,
            M: Fn(A) -> B + 'static,
        {
            let function = std::rc::Rc::new(function);
            let shared = std::rc::Rc::clone(&function);
            (
                F::fmap::<A, B, _>(value.0, move |a| shared(a)),
                G::fmap::<A, B, _>(value.1, move |a| function(a)),
            )
        }
    }

    struct Firsts;

    impl NaturalTransformation<VecK, OptionK> for Firsts {
        fn transform<A: Value>(&self, value: Vec<A>) -> Option<A> {
            value.into_iter().next()
        }
    }

    #[test]
    fn hleft_touches_only_left() {
        let result = PairT::hleft::<VecK, VecK, OptionK, i32, _>((vec![1, 2], vec![3, 4]), Firsts);
        assert_eq!(result, (Some(1), vec![3, 4]));
    }

    #[test]
    fn hright_touches_only_right() {
        let result = PairT::hright::<VecK, VecK, OptionK, i32, _>((vec![1, 2], vec![3, 4]), Firsts);
        assert_eq!(result, (vec![1, 2], Some(3)));
    }

    #[test]
    fn hbimap_with_identities_is_identity() {
        let value = (vec![1], Some(2));
        let result = PairT::hbimap::<VecK, OptionK, VecK, OptionK, i32, _, _>(
            value.clone(),
            IdentityTransformation,
            IdentityTransformation,
        );
        assert_eq!(result, value);
    }

    #[test]
    fn applied_brand_is_a_functor() {
        let value: <Applied<PairT, VecK, OptionK> as TypeConstructor>::Of<i32> = (vec![1, 2], Some(3));
        let mapped = <Applied<PairT, VecK, OptionK> as Functor>::fmap(value, |n: i32| n * 10);
        assert_eq!(mapped, (vec![10, 20], Some(30)));
    }
}
