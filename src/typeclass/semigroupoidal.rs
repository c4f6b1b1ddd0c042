//! Semigroupoidal combinators and their free semigroups.
//!
//! Applying an associative combinator `T` to a functor `F` one or more
//! times, `F`, `T<F, F>`, `T<F, T<F, F>>`, ..., produces a family of
//! constructors. A [`Semigroupoidal`] combinator names a single constructor,
//! [`Semigroupoidal::NonEmpty`], that represents the whole family: the
//! *free semigroup* of `F` under `T`.
//!
//! A functor that can collapse one application of `T` to itself is a
//! [`SemigroupIn`] for `T`; it can then collapse an entire free semigroup
//! with [`Semigroupoidal::retract_sf`].
//!
//! # Laws
//!
//! ```text
//! match_sf(inject_sf(x))  == Left(x)
//! retract_sf(inject_sf(x)) == x
//! append_sf(hbimap(x, inject_sf, inject_sf)) == to_sf(x)
//! ```
//!
//! `append_sf` is associative once both sides are regrouped with
//! `associate`.
//!
//! # Examples
//!
//! ```rust
//! use combinars::prelude::*;
//!
//! let aggregate = ProductT::to_sf::<VecK, i32>((vec![1], vec![2, 3]));
//! assert_eq!(aggregate.len(), 2);
//! assert_eq!(ProductT::retract_sf::<VecK, i32>(aggregate), vec![1, 2, 3]);
//! ```

use std::marker::PhantomData;
use std::rc::Rc;

use super::associative::Associative;
use super::functor::Functor;
use super::hbifunctor::{Applied, HBifunctor};
use super::higher::{TypeConstructor, Value};
use super::layered::{collapse, Layers};
use super::natural::{IdentityTransformation, NaturalTransformation};
use crate::control::Either;

/// The free semigroup of `F` under `T`, applied to `A`.
pub type NonEmptyOf<T, F, A> = <<T as Semigroupoidal>::NonEmpty<F> as TypeConstructor>::Of<A>;

/// A functor that can collapse one application of `T` to itself.
///
/// # Laws
///
/// Collapsing is associative: for `x: T<F, T<F, F>>`,
///
/// ```text
/// biretract(hright(x, biretract)) == biretract(hleft(associate(x), biretract))
/// ```
pub trait SemigroupIn<T: HBifunctor>: Functor {
    /// Collapses `T<Self, Self>` into `Self`.
    fn biretract<A: Value>(value: T::Of<Self, Self, A>) -> Self::Of<A>;

    /// Interprets both sides of a `T<G, H>` into `Self`, then collapses.
    #[inline]
    fn binterpret<G, H, A, N, M>(left: N, right: M, value: T::Of<G, H, A>) -> Self::Of<A>
    where
        G: TypeConstructor,
        H: TypeConstructor,
        A: Value,
        N: NaturalTransformation<G, Self>,
        M: NaturalTransformation<H, Self>,
    {
        Self::biretract::<A>(T::hbimap::<G, H, Self, Self, A, N, M>(value, left, right))
    }

    /// Collapses a whole free semigroup of `Self`.
    ///
    /// The default peels one layer at a time with `match_sf` and merges with
    /// [`SemigroupIn::biretract`] on an explicit stack.
    fn retract_non_empty<A: Value>(value: NonEmptyOf<T, Self, A>) -> Self::Of<A>
    where
        T: Semigroupoidal,
    {
        collapse::<RetractLayers<T, Self>, A>(RetractLayers(PhantomData), value)
    }
}

/// An associative combinator with a designated free semigroup.
pub trait Semigroupoidal: Associative {
    /// The free semigroup constructor: one or more `F`s combined with `Self`.
    type NonEmpty<F: TypeConstructor>: TypeConstructor;

    /// Merges two free semigroups, keeping their effects in order.
    fn append_sf<F: Functor, A: Value>(value: Self::Of<Self::NonEmpty<F>, Self::NonEmpty<F>, A>) -> NonEmptyOf<Self, F, A>;

    /// Distinguishes a single `F` from an `F` followed by more.
    fn match_sf<F: Functor, A: Value>(value: NonEmptyOf<Self, F, A>) -> Either<F::Of<A>, Self::Of<F, Self::NonEmpty<F>, A>>;

    /// Builds a free semigroup holding exactly one `F`.
    fn inject_sf<F: Functor, A: Value>(value: F::Of<A>) -> NonEmptyOf<Self, F, A>;

    /// Prepends one `F` to a free semigroup.
    #[inline]
    fn cons_sf<F: Functor, A: Value>(value: Self::Of<F, Self::NonEmpty<F>, A>) -> NonEmptyOf<Self, F, A> {
        let lifted = Self::hleft::<F, Self::NonEmpty<F>, Self::NonEmpty<F>, A, InjectNonEmpty<Self>>(
            value,
            InjectNonEmpty::new(),
        );
        Self::append_sf::<F, A>(lifted)
    }

    /// Builds a free semigroup of length two from one application of `Self`.
    #[inline]
    fn to_sf<F: Functor, A: Value>(value: Self::Of<F, F, A>) -> NonEmptyOf<Self, F, A> {
        let lifted = Self::hbimap::<F, F, Self::NonEmpty<F>, Self::NonEmpty<F>, A, InjectNonEmpty<Self>, InjectNonEmpty<Self>>(
            value,
            InjectNonEmpty::new(),
            InjectNonEmpty::new(),
        );
        Self::append_sf::<F, A>(lifted)
    }

    /// Collapses a free semigroup of `F` into `F`.
    #[inline]
    fn retract_sf<F: SemigroupIn<Self>, A: Value>(value: NonEmptyOf<Self, F, A>) -> F::Of<A> {
        <F as SemigroupIn<Self>>::retract_non_empty::<A>(value)
    }

    /// Interprets every `G` of a free semigroup into `F` and collapses.
    fn interpret_sf<G, F, A, N>(transformation: N, value: NonEmptyOf<Self, G, A>) -> F::Of<A>
    where
        G: Functor,
        F: SemigroupIn<Self>,
        A: Value,
        N: NaturalTransformation<G, F>,
    {
        collapse::<InterpretLayers<Self, G, F, N>, A>(InterpretLayers::new(transformation), value)
    }
}

/// Peels a free semigroup of `F` and merges with `biretract`.
struct RetractLayers<T, F>(PhantomData<fn() -> (T, F)>);

impl<T: Semigroupoidal, F: SemigroupIn<T>> Layers for RetractLayers<T, F> {
    type Combinator = T;
    type Left = F;
    type Source = T::NonEmpty<F>;
    type Target = F;

    #[inline]
    fn split<A: Value>(&self, value: NonEmptyOf<T, F, A>) -> Either<F::Of<A>, T::Of<F, T::NonEmpty<F>, A>> {
        T::match_sf::<F, A>(value)
    }

    #[inline]
    fn join<A: Value>(&self, value: T::Of<F, F, A>) -> F::Of<A> {
        <F as SemigroupIn<T>>::biretract::<A>(value)
    }
}

/// Peels a free semigroup of `G`, converting each `G` into `F` on the way.
struct InterpretLayers<T, G, F, N> {
    transformation: Rc<N>,
    marker: PhantomData<fn() -> (T, G, F)>,
}

impl<T, G, F, N> InterpretLayers<T, G, F, N> {
    fn new(transformation: N) -> Self {
        Self {
            transformation: Rc::new(transformation),
            marker: PhantomData,
        }
    }
}

impl<T, G, F, N> Layers for InterpretLayers<T, G, F, N>
where
    T: Semigroupoidal,
    G: Functor,
    F: SemigroupIn<T>,
    N: NaturalTransformation<G, F>,
{
    type Combinator = T;
    type Left = G;
    type Source = T::NonEmpty<G>;
    type Target = F;

    fn split<A: Value>(&self, value: NonEmptyOf<T, G, A>) -> Either<F::Of<A>, T::Of<G, T::NonEmpty<G>, A>> {
        T::match_sf::<G, A>(value)
            .map_left(|single| <N as NaturalTransformation<G, F>>::transform::<A>(&self.transformation, single))
    }

    fn join<A: Value>(&self, value: T::Of<G, F, A>) -> F::Of<A> {
        <F as SemigroupIn<T>>::binterpret::<G, F, A, Rc<N>, IdentityTransformation>(
            Rc::clone(&self.transformation),
            IdentityTransformation,
            value,
        )
    }
}

// =============================================================================
// Natural Transformations
// =============================================================================

/// `inject_sf` as a natural transformation `F ~> NonEmpty<F>`.
pub struct InjectNonEmpty<T>(PhantomData<fn() -> T>);

impl<T> InjectNonEmpty<T> {
    /// Creates the transformation.
    pub const fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T> Default for InjectNonEmpty<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Semigroupoidal, F: Functor> NaturalTransformation<F, T::NonEmpty<F>> for InjectNonEmpty<T> {
    #[inline]
    fn transform<A: Value>(&self, value: F::Of<A>) -> NonEmptyOf<T, F, A> {
        T::inject_sf::<F, A>(value)
    }
}

/// `retract_sf` as a natural transformation `NonEmpty<F> ~> F`.
pub struct RetractNonEmpty<T>(PhantomData<fn() -> T>);

impl<T> RetractNonEmpty<T> {
    /// Creates the transformation.
    pub const fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T> Default for RetractNonEmpty<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Semigroupoidal, F: SemigroupIn<T>> NaturalTransformation<T::NonEmpty<F>, F> for RetractNonEmpty<T> {
    #[inline]
    fn transform<A: Value>(&self, value: NonEmptyOf<T, F, A>) -> F::Of<A> {
        T::retract_sf::<F, A>(value)
    }
}

/// `biretract` as a natural transformation `T<F, F> ~> F`.
pub struct Biretract<T>(PhantomData<fn() -> T>);

impl<T> Biretract<T> {
    /// Creates the transformation.
    pub const fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T> Default for Biretract<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: HBifunctor, F: SemigroupIn<T>> NaturalTransformation<Applied<T, F, F>, F> for Biretract<T> {
    #[inline]
    fn transform<A: Value>(&self, value: T::Of<F, F, A>) -> F::Of<A> {
        <F as SemigroupIn<T>>::biretract::<A>(value)
    }
}
