//! Monoidal combinators and their free monoids.
//!
//! A [`Monoidal`] combinator is a tensor that also names a constructor for
//! zero or more applications of itself to `F`, the *free monoid*
//! [`Monoidal::Possibly`]. Its empty case is the tensor identity.
//!
//! A functor that can collapse `T<F, F>` and can also lift the tensor
//! identity is a [`MonoidIn`] for `T`, and collapses whole free monoids with
//! [`Monoidal::retract_mf`].
//!
//! # Laws
//!
//! ```text
//! unsplitting_mf(splitting_mf(x)) == x
//! splitting_mf(unsplitting_mf(y)) == y
//! retract_mf(nil_mf(i))           == pure_t(i)
//! retract_mf(inject_mf(x))        == x          (up to the tensor laws of the target)
//! ```
//!
//! # Examples
//!
//! ```rust
//! use combinars::prelude::*;
//!
//! let empty = ProductT::nil_mf::<VecK, i32>(Proxy::new());
//! assert_eq!(ProductT::retract_mf::<VecK, i32>(empty), Vec::<i32>::new());
//!
//! let single = ProductT::inject_mf::<VecK, i32>(vec![7]);
//! assert_eq!(ProductT::retract_mf::<VecK, i32>(single), vec![7]);
//! ```

use std::marker::PhantomData;
use std::rc::Rc;

use super::functor::Functor;
use super::higher::{TypeConstructor, Value};
use super::layered::{collapse, Layers};
use super::natural::{IdentityTransformation, NaturalTransformation};
use super::semigroupoidal::{NonEmptyOf, SemigroupIn, Semigroupoidal};
use super::tensor::Tensor;
use crate::control::Either;

/// The free monoid of `F` under `T`, applied to `A`.
pub type PossiblyOf<T, F, A> = <<T as Monoidal>::Possibly<F> as TypeConstructor>::Of<A>;

/// The identity constructor of `T`, applied to `A`.
pub type IdentityOf<T, A> = <<T as Tensor>::Identity as TypeConstructor>::Of<A>;

/// A functor that is a semigroup in `T` and can also lift `T`'s identity.
pub trait MonoidIn<T: Tensor>: SemigroupIn<T> {
    /// Lifts the tensor identity into `Self`.
    fn pure_t<A: Value>(value: IdentityOf<T, A>) -> Self::Of<A>;

    /// Collapses a whole free monoid of `Self`.
    ///
    /// The default peels one layer at a time with `uncons_mf` and merges with
    /// `biretract` on an explicit stack.
    fn retract_possibly<A: Value>(value: PossiblyOf<T, Self, A>) -> Self::Of<A>
    where
        T: Monoidal,
    {
        collapse::<RetractLayers<T, Self>, A>(RetractLayers(PhantomData), value)
    }
}

/// A tensor with a designated free monoid.
pub trait Monoidal: Tensor + Semigroupoidal {
    /// The free monoid constructor: zero or more `F`s combined with `Self`.
    type Possibly<F: TypeConstructor>: TypeConstructor;

    /// Merges two free monoids, keeping their effects in order.
    fn append_mf<F: Functor, A: Value>(value: Self::Of<Self::Possibly<F>, Self::Possibly<F>, A>) -> PossiblyOf<Self, F, A>;

    /// Splits a free monoid into either the identity or a head and a tail.
    fn splitting_mf<F: Functor, A: Value>(
        value: PossiblyOf<Self, F, A>,
    ) -> Either<IdentityOf<Self, A>, Self::Of<F, Self::Possibly<F>, A>>;

    /// Inverse of [`Monoidal::splitting_mf`].
    fn unsplitting_mf<F: Functor, A: Value>(
        value: Either<IdentityOf<Self, A>, Self::Of<F, Self::Possibly<F>, A>>,
    ) -> PossiblyOf<Self, F, A>;

    /// Splits a non-empty aggregate into its first `F` and a possibly empty rest.
    fn split_sf<F: Functor, A: Value>(value: NonEmptyOf<Self, F, A>) -> Self::Of<F, Self::Possibly<F>, A>;

    /// The empty free monoid.
    #[inline]
    fn nil_mf<F: Functor, A: Value>(value: IdentityOf<Self, A>) -> PossiblyOf<Self, F, A> {
        Self::unsplitting_mf::<F, A>(Either::Left(value))
    }

    /// Prepends one `F` to a free monoid.
    #[inline]
    fn cons_mf<F: Functor, A: Value>(value: Self::Of<F, Self::Possibly<F>, A>) -> PossiblyOf<Self, F, A> {
        Self::unsplitting_mf::<F, A>(Either::Right(value))
    }

    /// Views a free monoid as either empty or a head and a tail.
    #[inline]
    fn uncons_mf<F: Functor, A: Value>(
        value: PossiblyOf<Self, F, A>,
    ) -> Either<IdentityOf<Self, A>, Self::Of<F, Self::Possibly<F>, A>> {
        Self::splitting_mf::<F, A>(value)
    }

    /// Builds a free monoid holding exactly one `F`.
    fn inject_mf<F: Functor, A: Value>(value: F::Of<A>) -> PossiblyOf<Self, F, A> {
        let with_identity = Self::intro1::<F, A>(value);
        let with_nil = Self::hright::<F, Self::Identity, Self::Possibly<F>, A, NilPossibly<Self, F>>(
            with_identity,
            NilPossibly::new(),
        );
        Self::cons_mf::<F, A>(with_nil)
    }

    /// Builds a free monoid of length two from one application of `Self`.
    fn to_mf<F: Functor, A: Value>(value: Self::Of<F, F, A>) -> PossiblyOf<Self, F, A> {
        let with_rest = Self::hright::<F, F, Self::Possibly<F>, A, InjectPossibly<Self>>(value, InjectPossibly::new());
        Self::cons_mf::<F, A>(with_rest)
    }

    /// Forgets that a free semigroup is non-empty.
    #[inline]
    fn from_sf<F: Functor, A: Value>(value: NonEmptyOf<Self, F, A>) -> PossiblyOf<Self, F, A> {
        Self::cons_mf::<F, A>(Self::split_sf::<F, A>(value))
    }

    /// Collapses a free monoid of `F` into `F`.
    #[inline]
    fn retract_mf<F: MonoidIn<Self>, A: Value>(value: PossiblyOf<Self, F, A>) -> F::Of<A> {
        <F as MonoidIn<Self>>::retract_possibly::<A>(value)
    }

    /// Interprets every `G` of a free monoid into `F` and collapses.
    fn interpret_mf<G, F, A, N>(transformation: N, value: PossiblyOf<Self, G, A>) -> F::Of<A>
    where
        G: Functor,
        F: MonoidIn<Self>,
        A: Value,
        N: NaturalTransformation<G, F>,
    {
        collapse::<InterpretLayers<Self, G, F, N>, A>(InterpretLayers::new(transformation), value)
    }
}

/// Peels a free monoid of `F` and merges with `biretract`.
struct RetractLayers<T, F>(PhantomData<fn() -> (T, F)>);

impl<T: Monoidal, F: MonoidIn<T>> Layers for RetractLayers<T, F> {
    type Combinator = T;
    type Left = F;
    type Source = T::Possibly<F>;
    type Target = F;

    #[inline]
    fn split<A: Value>(&self, value: PossiblyOf<T, F, A>) -> Either<F::Of<A>, T::Of<F, T::Possibly<F>, A>> {
        T::uncons_mf::<F, A>(value).map_left(<F as MonoidIn<T>>::pure_t::<A>)
    }

    #[inline]
    fn join<A: Value>(&self, value: T::Of<F, F, A>) -> F::Of<A> {
        <F as SemigroupIn<T>>::biretract::<A>(value)
    }
}

/// Peels a free monoid of `G`, converting each `G` into `F` on the way.
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
    T: Monoidal,
    G: Functor,
    F: MonoidIn<T>,
    N: NaturalTransformation<G, F>,
{
    type Combinator = T;
    type Left = G;
    type Source = T::Possibly<G>;
    type Target = F;

    fn split<A: Value>(&self, value: PossiblyOf<T, G, A>) -> Either<F::Of<A>, T::Of<G, T::Possibly<G>, A>> {
        T::uncons_mf::<G, A>(value).map_left(<F as MonoidIn<T>>::pure_t::<A>)
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

/// `inject_mf` as a natural transformation `F ~> Possibly<F>`.
pub struct InjectPossibly<T>(PhantomData<fn() -> T>);

impl<T> InjectPossibly<T> {
    /// Creates the transformation.
    pub const fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T> Default for InjectPossibly<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Monoidal, F: Functor> NaturalTransformation<F, T::Possibly<F>> for InjectPossibly<T> {
    #[inline]
    fn transform<A: Value>(&self, value: F::Of<A>) -> PossiblyOf<T, F, A> {
        T::inject_mf::<F, A>(value)
    }
}

/// `retract_mf` as a natural transformation `Possibly<F> ~> F`.
pub struct RetractPossibly<T>(PhantomData<fn() -> T>);

impl<T> RetractPossibly<T> {
    /// Creates the transformation.
    pub const fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T> Default for RetractPossibly<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Monoidal, F: MonoidIn<T>> NaturalTransformation<T::Possibly<F>, F> for RetractPossibly<T> {
    #[inline]
    fn transform<A: Value>(&self, value: PossiblyOf<T, F, A>) -> F::Of<A> {
        T::retract_mf::<F, A>(value)
    }
}

/// `pure_t` as a natural transformation `Identity ~> F`.
pub struct PureIdentity<T>(PhantomData<fn() -> T>);

impl<T> PureIdentity<T> {
    /// Creates the transformation.
    pub const fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T> Default for PureIdentity<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Tensor, F: MonoidIn<T>> NaturalTransformation<T::Identity, F> for PureIdentity<T> {
    #[inline]
    fn transform<A: Value>(&self, value: IdentityOf<T, A>) -> F::Of<A> {
        <F as MonoidIn<T>>::pure_t::<A>(value)
    }
}

/// `nil_mf` for a fixed `F`, as a natural transformation `Identity ~> Possibly<F>`.
struct NilPossibly<T, F>(PhantomData<fn() -> (T, F)>);

impl<T, F> NilPossibly<T, F> {
    const fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T: Monoidal, F: Functor> NaturalTransformation<T::Identity, T::Possibly<F>> for NilPossibly<T, F> {
    #[inline]
    fn transform<A: Value>(&self, value: IdentityOf<T, A>) -> PossiblyOf<T, F, A> {
        T::nil_mf::<F, A>(value)
    }
}
