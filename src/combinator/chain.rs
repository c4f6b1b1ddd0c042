//! Explicit recursive forms of the free structures.
//!
//! [`Chain1`] spells out the free semigroup of any combinator as a plain
//! recursive type: either the last `F`, or `T` applied to an `F` and the
//! rest of the chain. [`Chain`] does the same for the free monoid, ending
//! in the tensor identity instead.
//!
//! Both are isomorphic to the combinator's own aggregates:
//!
//! ```text
//! Chain1::reroll(chain.unroll()) == chain
//! Chain1::reroll(x).unroll()     == x
//! ```
//!
//! They are useful when an algorithm wants to recurse over the structure
//! directly, for example with [`Chain1::fold`].
//!
//! # Examples
//!
//! ```rust
//! use combinars::prelude::*;
//!
//! let chain: Chain1<ProductT, VecK, i32> = Chain1::more((vec![1], Chain1::done(vec![2, 3])));
//! assert_eq!(chain.clone().retract(), vec![1, 2, 3]);
//! assert_eq!(chain.unroll().len(), 2);
//! ```

use std::fmt;
use std::marker::PhantomData;
use std::rc::Rc;

use crate::control::Either;
use crate::typeclass::{
    collapse, release, Applied, Functor, HBifunctor, IdentityOf, InjectNonEmpty, Layers, MonoidIn, Monoidal,
    NaturalTransformation, NonEmptyOf, PossiblyOf, SemigroupIn, Semigroupoidal, Tensor, TypeConstructor, Value,
};

// =============================================================================
// Chain1
// =============================================================================

/// One or more applications of `T` to `F`, spelled out recursively.
///
/// A chain is either the last effect or `T` applied to an effect and the
/// rest; [`Chain1::into_either`] exposes which.
pub struct Chain1<T: HBifunctor, F: TypeConstructor, A: Value> {
    layer: Option<Either<F::Of<A>, Box<T::Of<F, Chain1K<T, F>, A>>>>,
}

/// Brand for [`Chain1`].
pub struct Chain1K<T, F>(PhantomData<fn() -> (T, F)>);

impl<T: HBifunctor, F: TypeConstructor> TypeConstructor for Chain1K<T, F> {
    type Of<A: Value> = Chain1<T, F, A>;
}

impl<T: HBifunctor, F: TypeConstructor, A: Value> Chain1<T, F, A> {
    /// A chain of one effect.
    #[inline]
    pub const fn done(effect: F::Of<A>) -> Self {
        Self {
            layer: Some(Either::Left(effect)),
        }
    }

    /// Prepends an effect to a chain.
    #[inline]
    pub fn more(value: T::Of<F, Chain1K<T, F>, A>) -> Self {
        Self {
            layer: Some(Either::Right(Box::new(value))),
        }
    }

    /// Returns `true` for a chain of exactly one effect.
    #[inline]
    pub const fn is_done(&self) -> bool {
        matches!(self.layer, Some(Either::Left(_)))
    }

    /// Exposes the top layer.
    pub fn into_either(mut self) -> Either<F::Of<A>, T::Of<F, Chain1K<T, F>, A>> {
        self.layer
            .take()
            .expect("a chain is only emptied while it is dropped")
            .map_right(|rest| *rest)
    }

    /// Converts into the combinator's free semigroup.
    pub fn unroll(self) -> NonEmptyOf<T, F, A>
    where
        T: Semigroupoidal,
        F: Functor,
    {
        self.fold::<T::NonEmpty<F>, InjectNonEmpty<T>, ConsNonEmpty<T>>(InjectNonEmpty::new(), ConsNonEmpty::new())
    }

    /// Builds a chain from the combinator's free semigroup.
    pub fn reroll(value: NonEmptyOf<T, F, A>) -> Self
    where
        T: Semigroupoidal,
        F: Functor,
    {
        collapse::<RerollLayers1<T, F>, A>(RerollLayers1(PhantomData), value)
    }

    /// Folds the chain from the end.
    ///
    /// `done` converts the last effect; `more` merges an effect with the
    /// already folded rest. Each layer is merged on the heap, so the depth
    /// of the chain does not grow the native stack.
    pub fn fold<G, D, M>(self, done: D, more: M) -> G::Of<A>
    where
        G: TypeConstructor,
        D: NaturalTransformation<F, G>,
        M: NaturalTransformation<Applied<T, F, G>, G>,
    {
        collapse::<FoldLayers1<T, F, G, D, M>, A>(FoldLayers1::new(done, more), self)
    }

    /// Collapses the chain into `F`.
    pub fn retract(self) -> F::Of<A>
    where
        T: Semigroupoidal,
        F: SemigroupIn<T>,
    {
        T::retract_sf::<F, A>(self.unroll())
    }

    /// Collapses the chain into `G`, converting every effect first.
    pub fn interpret<G, N>(self, transformation: N) -> G::Of<A>
    where
        T: Semigroupoidal,
        F: Functor,
        G: SemigroupIn<T>,
        N: NaturalTransformation<F, G>,
    {
        T::interpret_sf::<F, G, A, N>(transformation, self.unroll())
    }

    /// Widens into the possibly-empty form.
    pub fn into_chain(self) -> Chain<T, F, A>
    where
        T: Tensor,
        F: Functor,
    {
        self.fold::<ChainK<T, F>, InjectChain<T>, MoreChain<T>>(InjectChain(PhantomData), MoreChain(PhantomData))
    }

    fn map_shared<B: Value>(self, function: Rc<dyn Fn(A) -> B>) -> Chain1<T, F, B>
    where
        F: Functor,
    {
        match self.into_either() {
            Either::Left(effect) => Chain1::done(F::fmap::<A, B, _>(effect, move |value| function(value))),
            Either::Right(rest) => Chain1::more(T::hfmap::<F, Chain1K<T, F>, A, B, _>(rest, move |value| function(value))),
        }
    }
}

impl<T: HBifunctor, F: TypeConstructor, A: Value> Clone for Chain1<T, F, A> {
    fn clone(&self) -> Self {
        Self {
            layer: self.layer.clone(),
        }
    }
}

impl<T: HBifunctor, F: TypeConstructor, A: Value> Drop for Chain1<T, F, A> {
    fn drop(&mut self) {
        if let Some(Either::Right(rest)) = self.layer.take() {
            release::<T, F, Chain1K<T, F>, A>(*rest);
        }
    }
}

impl<T: HBifunctor, F: TypeConstructor, A: Value> fmt::Debug for Chain1<T, F, A>
where
    F::Of<A>: fmt::Debug,
{
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.layer {
            Some(Either::Left(effect)) => formatter.debug_tuple("Done").field(effect).finish(),
            _ => formatter.write_str("More(..)"),
        }
    }
}

impl<T: HBifunctor, F: Functor> Functor for Chain1K<T, F> {
    #[inline]
    fn fmap<A: Value, B: Value, M>(value: Chain1<T, F, A>, function: M) -> Chain1<T, F, B>
    where
        M: Fn(A) -> B + 'static,
    {
        value.map_shared(Rc::new(function))
    }
}

struct FoldLayers1<T, F, G, D, M> {
    done: D,
    more: M,
    marker: PhantomData<fn() -> (T, F, G)>,
}

impl<T, F, G, D, M> FoldLayers1<T, F, G, D, M> {
    const fn new(done: D, more: M) -> Self {
        Self {
            done,
            more,
            marker: PhantomData,
        }
    }
}

impl<T, F, G, D, M> Layers for FoldLayers1<T, F, G, D, M>
where
    T: HBifunctor,
    F: TypeConstructor,
    G: TypeConstructor,
    D: NaturalTransformation<F, G>,
    M: NaturalTransformation<Applied<T, F, G>, G>,
{
    type Combinator = T;
    type Left = F;
    type Source = Chain1K<T, F>;
    type Target = G;

    fn split<A: Value>(&self, value: Chain1<T, F, A>) -> Either<G::Of<A>, T::Of<F, Chain1K<T, F>, A>> {
        value
            .into_either()
            .map_left(|effect| <D as NaturalTransformation<F, G>>::transform::<A>(&self.done, effect))
    }

    fn join<A: Value>(&self, value: T::Of<F, G, A>) -> G::Of<A> {
        <M as NaturalTransformation<Applied<T, F, G>, G>>::transform::<A>(&self.more, value)
    }
}

struct RerollLayers1<T, F>(PhantomData<fn() -> (T, F)>);

impl<T: Semigroupoidal, F: Functor> Layers for RerollLayers1<T, F> {
    type Combinator = T;
    type Left = F;
    type Source = T::NonEmpty<F>;
    type Target = Chain1K<T, F>;

    #[inline]
    fn split<A: Value>(&self, value: NonEmptyOf<T, F, A>) -> Either<Chain1<T, F, A>, T::Of<F, T::NonEmpty<F>, A>> {
        T::match_sf::<F, A>(value).map_left(Chain1::done)
    }

    #[inline]
    fn join<A: Value>(&self, value: T::Of<F, Chain1K<T, F>, A>) -> Chain1<T, F, A> {
        Chain1::more(value)
    }
}

// =============================================================================
// Chain
// =============================================================================

/// Zero or more applications of `T` to `F`, spelled out recursively.
///
/// A chain is either the tensor identity or `T` applied to an effect and
/// the rest.
pub struct Chain<T: Tensor, F: TypeConstructor, A: Value> {
    layer: Option<Either<IdentityOf<T, A>, Box<T::Of<F, ChainK<T, F>, A>>>>,
}

/// Brand for [`Chain`].
pub struct ChainK<T, F>(PhantomData<fn() -> (T, F)>);

impl<T: Tensor, F: TypeConstructor> TypeConstructor for ChainK<T, F> {
    type Of<A: Value> = Chain<T, F, A>;
}

impl<T: Tensor, F: TypeConstructor, A: Value> Chain<T, F, A> {
    /// The empty chain.
    #[inline]
    pub const fn nil(identity: IdentityOf<T, A>) -> Self {
        Self {
            layer: Some(Either::Left(identity)),
        }
    }

    /// Prepends an effect to a chain.
    #[inline]
    pub fn more(value: T::Of<F, ChainK<T, F>, A>) -> Self {
        Self {
            layer: Some(Either::Right(Box::new(value))),
        }
    }

    /// A chain of one effect followed by the identity.
    pub fn inject(effect: F::Of<A>) -> Self
    where
        F: Functor,
    {
        Self::more(T::hright::<F, T::Identity, ChainK<T, F>, A, NilChain<T, F>>(
            T::intro1::<F, A>(effect),
            NilChain(PhantomData),
        ))
    }

    /// Returns `true` for the empty chain.
    #[inline]
    pub const fn is_done(&self) -> bool {
        matches!(self.layer, Some(Either::Left(_)))
    }

    /// Exposes the top layer.
    pub fn into_either(mut self) -> Either<IdentityOf<T, A>, T::Of<F, ChainK<T, F>, A>> {
        self.layer
            .take()
            .expect("a chain is only emptied while it is dropped")
            .map_right(|rest| *rest)
    }

    /// Converts into the combinator's free monoid.
    pub fn unroll(self) -> PossiblyOf<T, F, A>
    where
        T: Monoidal,
        F: Functor,
    {
        self.fold::<T::Possibly<F>, NilPossibly<T, F>, ConsPossibly<T>>(NilPossibly(PhantomData), ConsPossibly(PhantomData))
    }

    /// Builds a chain from the combinator's free monoid.
    pub fn reroll(value: PossiblyOf<T, F, A>) -> Self
    where
        T: Monoidal,
        F: Functor,
    {
        collapse::<RerollLayers<T, F>, A>(RerollLayers(PhantomData), value)
    }

    /// Folds the chain from the end.
    pub fn fold<G, D, M>(self, done: D, more: M) -> G::Of<A>
    where
        G: TypeConstructor,
        D: NaturalTransformation<T::Identity, G>,
        M: NaturalTransformation<Applied<T, F, G>, G>,
    {
        collapse::<FoldLayers<T, F, G, D, M>, A>(FoldLayers::new(done, more), self)
    }

    /// Collapses the chain into `F`.
    pub fn retract(self) -> F::Of<A>
    where
        T: Monoidal,
        F: MonoidIn<T>,
    {
        T::retract_mf::<F, A>(self.unroll())
    }

    /// Collapses the chain into `G`, converting every effect first.
    pub fn interpret<G, N>(self, transformation: N) -> G::Of<A>
    where
        T: Monoidal,
        F: Functor,
        G: MonoidIn<T>,
        N: NaturalTransformation<F, G>,
    {
        T::interpret_mf::<F, G, A, N>(transformation, self.unroll())
    }

    fn map_shared<B: Value>(self, function: Rc<dyn Fn(A) -> B>) -> Chain<T, F, B>
    where
        F: Functor,
    {
        match self.into_either() {
            Either::Left(identity) => {
                Chain::nil(<T::Identity as Functor>::fmap::<A, B, _>(identity, move |value| function(value)))
            }
            Either::Right(rest) => Chain::more(T::hfmap::<F, ChainK<T, F>, A, B, _>(rest, move |value| function(value))),
        }
    }
}

impl<T: Tensor, F: TypeConstructor, A: Value> Clone for Chain<T, F, A> {
    fn clone(&self) -> Self {
        Self {
            layer: self.layer.clone(),
        }
    }
}

impl<T: Tensor, F: TypeConstructor, A: Value> Drop for Chain<T, F, A> {
    fn drop(&mut self) {
        if let Some(Either::Right(rest)) = self.layer.take() {
            release::<T, F, ChainK<T, F>, A>(*rest);
        }
    }
}

impl<T: Tensor, F: TypeConstructor, A: Value> fmt::Debug for Chain<T, F, A>
where
    IdentityOf<T, A>: fmt::Debug,
{
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.layer {
            Some(Either::Left(identity)) => formatter.debug_tuple("Done").field(identity).finish(),
            _ => formatter.write_str("More(..)"),
        }
    }
}

impl<T: Tensor, F: Functor> Functor for ChainK<T, F> {
    #[inline]
    fn fmap<A: Value, B: Value, M>(value: Chain<T, F, A>, function: M) -> Chain<T, F, B>
    where
        M: Fn(A) -> B + 'static,
    {
        value.map_shared(Rc::new(function))
    }
}

struct FoldLayers<T, F, G, D, M> {
    done: D,
    more: M,
    marker: PhantomData<fn() -> (T, F, G)>,
}

impl<T, F, G, D, M> FoldLayers<T, F, G, D, M> {
    const fn new(done: D, more: M) -> Self {
        Self {
            done,
            more,
            marker: PhantomData,
        }
    }
}

impl<T, F, G, D, M> Layers for FoldLayers<T, F, G, D, M>
where
    T: Tensor,
    F: TypeConstructor,
    G: TypeConstructor,
    D: NaturalTransformation<T::Identity, G>,
    M: NaturalTransformation<Applied<T, F, G>, G>,
{
    type Combinator = T;
    type Left = F;
    type Source = ChainK<T, F>;
    type Target = G;

    fn split<A: Value>(&self, value: Chain<T, F, A>) -> Either<G::Of<A>, T::Of<F, ChainK<T, F>, A>> {
        value
            .into_either()
            .map_left(|identity| <D as NaturalTransformation<T::Identity, G>>::transform::<A>(&self.done, identity))
    }

    fn join<A: Value>(&self, value: T::Of<F, G, A>) -> G::Of<A> {
        <M as NaturalTransformation<Applied<T, F, G>, G>>::transform::<A>(&self.more, value)
    }
}

struct RerollLayers<T, F>(PhantomData<fn() -> (T, F)>);

impl<T: Monoidal, F: Functor> Layers for RerollLayers<T, F> {
    type Combinator = T;
    type Left = F;
    type Source = T::Possibly<F>;
    type Target = ChainK<T, F>;

    #[inline]
    fn split<A: Value>(&self, value: PossiblyOf<T, F, A>) -> Either<Chain<T, F, A>, T::Of<F, T::Possibly<F>, A>> {
        T::uncons_mf::<F, A>(value).map_left(Chain::nil)
    }

    #[inline]
    fn join<A: Value>(&self, value: T::Of<F, ChainK<T, F>, A>) -> Chain<T, F, A> {
        Chain::more(value)
    }
}

// =============================================================================
// Natural Transformations
// =============================================================================

/// [`Chain1::unroll`] as a natural transformation.
pub struct UnrollNonEmpty<T>(PhantomData<fn() -> T>);

impl<T> UnrollNonEmpty<T> {
    /// Creates the transformation.
    pub const fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T> Default for UnrollNonEmpty<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Semigroupoidal, F: Functor> NaturalTransformation<Chain1K<T, F>, T::NonEmpty<F>> for UnrollNonEmpty<T> {
    #[inline]
    fn transform<A: Value>(&self, value: Chain1<T, F, A>) -> NonEmptyOf<T, F, A> {
        value.unroll()
    }
}

/// [`Chain1::reroll`] as a natural transformation.
pub struct RerollNonEmpty<T>(PhantomData<fn() -> T>);

impl<T> RerollNonEmpty<T> {
    /// Creates the transformation.
    pub const fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T> Default for RerollNonEmpty<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Semigroupoidal, F: Functor> NaturalTransformation<T::NonEmpty<F>, Chain1K<T, F>> for RerollNonEmpty<T> {
    #[inline]
    fn transform<A: Value>(&self, value: NonEmptyOf<T, F, A>) -> Chain1<T, F, A> {
        Chain1::reroll(value)
    }
}

/// [`Chain::unroll`] as a natural transformation.
pub struct UnrollPossibly<T>(PhantomData<fn() -> T>);

impl<T> UnrollPossibly<T> {
    /// Creates the transformation.
    pub const fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T> Default for UnrollPossibly<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Monoidal, F: Functor> NaturalTransformation<ChainK<T, F>, T::Possibly<F>> for UnrollPossibly<T> {
    #[inline]
    fn transform<A: Value>(&self, value: Chain<T, F, A>) -> PossiblyOf<T, F, A> {
        value.unroll()
    }
}

/// [`Chain::reroll`] as a natural transformation.
pub struct RerollPossibly<T>(PhantomData<fn() -> T>);

impl<T> RerollPossibly<T> {
    /// Creates the transformation.
    pub const fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T> Default for RerollPossibly<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Monoidal, F: Functor> NaturalTransformation<T::Possibly<F>, ChainK<T, F>> for RerollPossibly<T> {
    #[inline]
    fn transform<A: Value>(&self, value: PossiblyOf<T, F, A>) -> Chain<T, F, A> {
        Chain::reroll(value)
    }
}

struct ConsNonEmpty<T>(PhantomData<fn() -> T>);

impl<T> ConsNonEmpty<T> {
    const fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T: Semigroupoidal, F: Functor> NaturalTransformation<Applied<T, F, T::NonEmpty<F>>, T::NonEmpty<F>>
    for ConsNonEmpty<T>
{
    #[inline]
    fn transform<A: Value>(&self, value: T::Of<F, T::NonEmpty<F>, A>) -> NonEmptyOf<T, F, A> {
        T::cons_sf::<F, A>(value)
    }
}

struct NilPossibly<T, F>(PhantomData<fn() -> (T, F)>);

impl<T: Monoidal, F: Functor> NaturalTransformation<T::Identity, T::Possibly<F>> for NilPossibly<T, F> {
    #[inline]
    fn transform<A: Value>(&self, value: IdentityOf<T, A>) -> PossiblyOf<T, F, A> {
        T::nil_mf::<F, A>(value)
    }
}

struct ConsPossibly<T>(PhantomData<fn() -> T>);

impl<T: Monoidal, F: Functor> NaturalTransformation<Applied<T, F, T::Possibly<F>>, T::Possibly<F>>
    for ConsPossibly<T>
{
    #[inline]
    fn transform<A: Value>(&self, value: T::Of<F, T::Possibly<F>, A>) -> PossiblyOf<T, F, A> {
        T::cons_mf::<F, A>(value)
    }
}

struct NilChain<T, F>(PhantomData<fn() -> (T, F)>);

impl<T: Tensor, F: TypeConstructor> NaturalTransformation<T::Identity, ChainK<T, F>> for NilChain<T, F> {
    #[inline]
    fn transform<A: Value>(&self, value: IdentityOf<T, A>) -> Chain<T, F, A> {
        Chain::nil(value)
    }
}

struct InjectChain<T>(PhantomData<fn() -> T>);

impl<T: Tensor, F: Functor> NaturalTransformation<F, ChainK<T, F>> for InjectChain<T> {
    #[inline]
    fn transform<A: Value>(&self, value: F::Of<A>) -> Chain<T, F, A> {
        Chain::inject(value)
    }
}

struct MoreChain<T>(PhantomData<fn() -> T>);

impl<T: Tensor, F: TypeConstructor> NaturalTransformation<Applied<T, F, ChainK<T, F>>, ChainK<T, F>> for MoreChain<T> {
    #[inline]
    fn transform<A: Value>(&self, value: T::Of<F, ChainK<T, F>, A>) -> Chain<T, F, A> {
        Chain::more(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combinator::{ListF, ProductT, Step, SumT};
    use crate::typeclass::{OptionK, Proxy, VecK};
    use rstest::rstest;

    type Pairs = Chain1<ProductT, VecK, i32>;

    fn pairs() -> Pairs {
        Chain1::more((vec![1], Chain1::more((vec![2], Chain1::done(vec![3])))))
    }

    struct VecToOption;

    impl NaturalTransformation<VecK, OptionK> for VecToOption {
        fn transform<A: Value>(&self, value: Vec<A>) -> Option<A> {
            value.into_iter().next()
        }
    }

    #[rstest]
    fn retract_concatenates_in_order() {
        assert_eq!(pairs().retract(), vec![1, 2, 3]);
    }

    #[rstest]
    fn interpret_converts_each_effect() {
        let chain: Chain1<ProductT, VecK, i32> = Chain1::more((vec![], Chain1::done(vec![7, 8])));
        assert_eq!(chain.interpret::<OptionK, _>(VecToOption), Some(7));
    }

    #[rstest]
    fn unroll_matches_free_semigroup() {
        let expected = ProductT::cons_sf::<VecK, i32>((vec![1], ProductT::to_sf::<VecK, i32>((vec![2], vec![3]))));
        assert_eq!(pairs().unroll(), expected);
    }

    #[rstest]
    fn reroll_then_unroll_is_identity() {
        let aggregate = ProductT::to_sf::<VecK, i32>((vec![5], vec![4]));
        assert_eq!(Pairs::reroll(aggregate.clone()).unroll(), aggregate);
    }

    #[rstest]
    fn fmap_reaches_every_effect() {
        let mapped = Chain1K::<ProductT, VecK>::fmap(pairs(), |n: i32| n * 2);
        assert_eq!(mapped.retract(), vec![2, 4, 6]);
    }

    #[rstest]
    #[case(0)]
    #[case(1)]
    #[case(2)]
    fn sum_chain_depth_becomes_step_index(#[case] depth: usize) {
        let chain = (0..depth).fold(Chain1::<SumT, OptionK, i32>::done(Some(1)), |rest, _| {
            Chain1::more(Either::Right(rest))
        });
        let step = chain.unroll();
        assert_eq!(step, Step::new(depth, Some(1)));
        assert_eq!(Chain1::<SumT, OptionK, i32>::reroll(step).retract(), Some(1));
    }

    #[rstest]
    fn empty_chain_retracts_to_empty() {
        let chain = Chain::<ProductT, VecK, i32>::nil(Proxy::new());
        assert!(chain.is_done());
        assert_eq!(chain.retract(), Vec::<i32>::new());
    }

    #[rstest]
    fn chain_unroll_matches_free_monoid() {
        let chain = Chain::<ProductT, VecK, i32>::more((vec![1], Chain::inject(vec![2])));
        let expected: ListF<VecK, i32> = vec![vec![1], vec![2]].into_iter().collect();
        assert_eq!(chain.clone().unroll(), expected);
        assert_eq!(chain.retract(), vec![1, 2]);
    }

    #[rstest]
    fn widening_keeps_effects() {
        let widened = pairs().into_chain();
        assert_eq!(widened.clone().retract(), vec![1, 2, 3]);
        assert_eq!(Chain::<ProductT, VecK, i32>::reroll(widened.unroll()).retract(), vec![1, 2, 3]);
    }

    #[rstest]
    fn chain_interpret_uses_pure_for_identity() {
        let chain = Chain::<ProductT, VecK, i32>::inject(vec![]);
        assert_eq!(chain.interpret::<OptionK, _>(VecToOption), None);
    }

    #[rstest]
    fn long_chain_unrolls_without_recursion() {
        let chain = (0..100_000).fold(Chain1::<ProductT, OptionK, i32>::done(Some(7)), |rest, _| {
            Chain1::more((None, rest))
        });
        let aggregate = chain.unroll();
        assert_eq!(aggregate.len(), 100_001);
        assert_eq!(ProductT::retract_sf::<OptionK, i32>(aggregate), Some(7));
    }

    #[rstest]
    fn long_chain_rerolls_and_is_released() {
        let aggregate: ListF<OptionK, i32> = (0..100_000).map(Some).collect();
        drop(Chain::<ProductT, OptionK, i32>::reroll(aggregate.clone()));
        let chain = Chain::<ProductT, OptionK, i32>::reroll(aggregate);
        assert!(!chain.is_done());
        assert_eq!(chain.retract(), Some(0));
    }
}
