//! Choice: the sum combinator.
//!
//! `SumT<F, G>` is either an `F` or a `G`. Its identity is [`Void`]: a sum
//! with an alternative that can never be chosen is just the other side.
//!
//! Applying a sum to `F` any number of times still yields exactly one `F`;
//! only the number of times it was wrapped is recorded. Both the free
//! semigroup and the free monoid are therefore [`Step`], an `F` paired with
//! a count.
//!
//! Every functor collapses sums (pick whichever side is present), so no
//! capability is required of the target.
//!
//! # Examples
//!
//! ```rust
//! use combinars::prelude::*;
//!
//! let wrapped = SumT::cons_mf::<VecK, i32>(Either::Right(SumT::inject_mf::<VecK, i32>(vec![1])));
//! assert_eq!(wrapped.index(), 1);
//! assert_eq!(SumT::retract_mf::<VecK, i32>(wrapped), vec![1]);
//! ```

use std::fmt;
use std::marker::PhantomData;

use crate::control::Either;
use crate::typeclass::{
    Applied, Associative, Functor, HBifunctor, Matchable, MonoidIn, Monoidal, NaturalTransformation,
    SemigroupIn, Semigroupoidal, Tensor, TypeConstructor, Value, Void, VoidK,
};

/// The sum combinator: `T<F, G>` is `Either<F<A>, G<A>>`.
#[derive(Debug)]
pub enum SumT {}

// =============================================================================
// Step
// =============================================================================

/// An `F` together with how many times it was wrapped in a sum.
pub struct Step<F: TypeConstructor, A: Value> {
    index: usize,
    value: F::Of<A>,
}

impl<F: TypeConstructor, A: Value> Step<F, A> {
    /// Pairs an effect with its wrapping count.
    #[inline]
    pub const fn new(index: usize, value: F::Of<A>) -> Self {
        Self { index, value }
    }

    /// How many times the effect was wrapped.
    #[inline]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// The effect.
    #[inline]
    pub const fn value(&self) -> &F::Of<A> {
        &self.value
    }

    /// Discards the count.
    #[inline]
    pub fn into_value(self) -> F::Of<A> {
        self.value
    }

    /// Splits into the count and the effect.
    #[inline]
    pub fn into_parts(self) -> (usize, F::Of<A>) {
        (self.index, self.value)
    }

    fn step_up(self) -> Self {
        Self::new(self.index + 1, self.value)
    }

    /// Removes one level of wrapping, or returns the bare effect at level zero.
    fn step_down(self) -> Either<F::Of<A>, Self> {
        match self.index {
            0 => Either::Left(self.value),
            index => Either::Right(Self::new(index - 1, self.value)),
        }
    }
}

impl<F: TypeConstructor, A: Value> Clone for Step<F, A> {
    fn clone(&self) -> Self {
        Self::new(self.index, self.value.clone())
    }
}

impl<F: TypeConstructor, A: Value> PartialEq for Step<F, A>
where
    F::Of<A>: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index && self.value == other.value
    }
}

impl<F: TypeConstructor, A: Value> Eq for Step<F, A> where F::Of<A>: Eq {}

impl<F: TypeConstructor, A: Value> fmt::Debug for Step<F, A>
where
    F::Of<A>: fmt::Debug,
{
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Step")
            .field("index", &self.index)
            .field("value", &self.value)
            .finish()
    }
}

/// Brand for [`Step`].
pub struct StepK<F>(PhantomData<fn() -> F>);

impl<F: TypeConstructor> TypeConstructor for StepK<F> {
    type Of<A: Value> = Step<F, A>;
}

impl<F: Functor> Functor for StepK<F> {
    #[inline]
    fn fmap<A: Value, B: Value, M>(value: Step<F, A>, function: M) -> Step<F, B>
    where
        M: Fn(A) -> B + 'static,
    {
        let (index, effect) = value.into_parts();
        Step::new(index, F::fmap::<A, B, M>(effect, function))
    }
}

// =============================================================================
// Combinator Hierarchy
// =============================================================================

impl HBifunctor for SumT {
    type Of<F: TypeConstructor, G: TypeConstructor, A: Value> = Either<F::Of<A>, G::Of<A>>;

    #[inline]
    fn hbimap<F, G, J, L, A, N, M>(value: Either<F::Of<A>, G::Of<A>>, left: N, right: M) -> Either<J::Of<A>, L::Of<A>>
    where
        F: TypeConstructor,
        G: TypeConstructor,
        J: TypeConstructor,
        L: TypeConstructor,
        A: Value,
        N: NaturalTransformation<F, J>,
        M: NaturalTransformation<G, L>,
    {
        match value {
            Either::Left(effect) => Either::Left(<N as NaturalTransformation<F, J>>::transform::<A>(&left, effect)),
            Either::Right(effect) => Either::Right(<M as NaturalTransformation<G, L>>::transform::<A>(&right, effect)),
        }
    }

    #[inline]
    fn hfmap<F, G, A, B, M>(value: Either<F::Of<A>, G::Of<A>>, function: M) -> Either<F::Of<B>, G::Of<B>>
    where
        F: Functor,
        G: Functor,
        A: Value,
        B: Value,
        M: Fn(A) -> B + 'static,
    {
        match value {
            Either::Left(effect) => Either::Left(F::fmap::<A, B, M>(effect, function)),
            Either::Right(effect) => Either::Right(G::fmap::<A, B, M>(effect, function)),
        }
    }
}

impl Associative for SumT {
    fn associate<F, G, H, A>(
        value: Either<F::Of<A>, Either<G::Of<A>, H::Of<A>>>,
    ) -> Either<Either<F::Of<A>, G::Of<A>>, H::Of<A>>
    where
        F: Functor,
        G: Functor,
        H: Functor,
        A: Value,
    {
        match value {
            Either::Left(first) => Either::Left(Either::Left(first)),
            Either::Right(Either::Left(second)) => Either::Left(Either::Right(second)),
            Either::Right(Either::Right(third)) => Either::Right(third),
        }
    }

    fn disassociate<F, G, H, A>(
        value: Either<Either<F::Of<A>, G::Of<A>>, H::Of<A>>,
    ) -> Either<F::Of<A>, Either<G::Of<A>, H::Of<A>>>
    where
        F: Functor,
        G: Functor,
        H: Functor,
        A: Value,
    {
        match value {
            Either::Left(Either::Left(first)) => Either::Left(first),
            Either::Left(Either::Right(second)) => Either::Right(Either::Left(second)),
            Either::Right(third) => Either::Right(Either::Right(third)),
        }
    }
}

impl Tensor for SumT {
    type Identity = VoidK;

    #[inline]
    fn intro1<F: Functor, A: Value>(value: F::Of<A>) -> Either<F::Of<A>, Void<A>> {
        Either::Left(value)
    }

    #[inline]
    fn intro2<G: Functor, A: Value>(value: G::Of<A>) -> Either<Void<A>, G::Of<A>> {
        Either::Right(value)
    }

    #[inline]
    fn elim1<F: Functor, A: Value>(value: Either<F::Of<A>, Void<A>>) -> F::Of<A> {
        value.fold(|effect| effect, Void::absurd)
    }

    #[inline]
    fn elim2<G: Functor, A: Value>(value: Either<Void<A>, G::Of<A>>) -> G::Of<A> {
        value.fold(Void::absurd, |effect| effect)
    }
}

impl Semigroupoidal for SumT {
    type NonEmpty<F: TypeConstructor> = StepK<F>;

    #[inline]
    fn append_sf<F: Functor, A: Value>(value: Either<Step<F, A>, Step<F, A>>) -> Step<F, A> {
        value.fold(|step| step, Step::step_up)
    }

    #[inline]
    fn match_sf<F: Functor, A: Value>(value: Step<F, A>) -> Either<F::Of<A>, Either<F::Of<A>, Step<F, A>>> {
        value.step_down().map_right(Either::Right)
    }

    #[inline]
    fn inject_sf<F: Functor, A: Value>(value: F::Of<A>) -> Step<F, A> {
        Step::new(0, value)
    }

    /// Every level of a sum holds the same effect, so collapsing skips them.
    #[inline]
    fn retract_sf<F: SemigroupIn<Self>, A: Value>(value: Step<F, A>) -> F::Of<A> {
        value.into_value()
    }

    #[inline]
    fn interpret_sf<G, F, A, N>(transformation: N, value: Step<G, A>) -> F::Of<A>
    where
        G: Functor,
        F: SemigroupIn<Self>,
        A: Value,
        N: NaturalTransformation<G, F>,
    {
        transformation.transform::<A>(value.into_value())
    }
}

impl Monoidal for SumT {
    type Possibly<F: TypeConstructor> = StepK<F>;

    #[inline]
    fn append_mf<F: Functor, A: Value>(value: Either<Step<F, A>, Step<F, A>>) -> Step<F, A> {
        value.fold(|step| step, Step::step_up)
    }

    #[inline]
    fn splitting_mf<F: Functor, A: Value>(value: Step<F, A>) -> Either<Void<A>, Either<F::Of<A>, Step<F, A>>> {
        Either::Right(value.step_down())
    }

    #[inline]
    fn unsplitting_mf<F: Functor, A: Value>(value: Either<Void<A>, Either<F::Of<A>, Step<F, A>>>) -> Step<F, A> {
        match value {
            Either::Left(never) => never.absurd(),
            Either::Right(Either::Left(effect)) => Step::new(0, effect),
            Either::Right(Either::Right(step)) => step.step_up(),
        }
    }

    #[inline]
    fn split_sf<F: Functor, A: Value>(value: Step<F, A>) -> Either<F::Of<A>, Step<F, A>> {
        value.step_down()
    }

    #[inline]
    fn retract_mf<F: MonoidIn<Self>, A: Value>(value: Step<F, A>) -> F::Of<A> {
        value.into_value()
    }

    #[inline]
    fn interpret_mf<G, F, A, N>(transformation: N, value: Step<G, A>) -> F::Of<A>
    where
        G: Functor,
        F: MonoidIn<Self>,
        A: Value,
        N: NaturalTransformation<G, F>,
    {
        transformation.transform::<A>(value.into_value())
    }
}

impl Matchable for SumT {
    #[inline]
    fn unsplit_sf<F: Functor, A: Value>(value: Either<F::Of<A>, Step<F, A>>) -> Step<F, A> {
        Self::unsplitting_mf::<F, A>(Either::Right(value))
    }

    #[inline]
    fn match_mf<F: Functor, A: Value>(value: Step<F, A>) -> Either<Void<A>, Step<F, A>> {
        Either::Right(value)
    }
}

// =============================================================================
// Capabilities
// =============================================================================

/// Every functor collapses a sum of itself by taking the side present.
impl<F: Functor> SemigroupIn<SumT> for F {
    #[inline]
    fn biretract<A: Value>(value: Either<F::Of<A>, F::Of<A>>) -> F::Of<A> {
        value.merge()
    }
}

impl<F: Functor> MonoidIn<SumT> for F {
    #[inline]
    fn pure_t<A: Value>(value: Void<A>) -> F::Of<A> {
        value.absurd()
    }
}

/// The sum of two functors is a functor.
pub type SumOf<F, G> = Applied<SumT, F, G>;

// =============================================================================
// Serialization
// =============================================================================

#[cfg(feature = "serde")]
impl<F: TypeConstructor, A: Value> serde::Serialize for Step<F, A>
where
    F::Of<A>: serde::Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeStruct;
        let mut state = serializer.serialize_struct("Step", 2)?;
        state.serialize_field("index", &self.index)?;
        state.serialize_field("value", &self.value)?;
        state.end()
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
#[serde(rename = "Step")]
struct StepParts<V> {
    index: usize,
    value: V,
}

#[cfg(feature = "serde")]
impl<'de, F: TypeConstructor, A: Value> serde::Deserialize<'de> for Step<F, A>
where
    F::Of<A>: serde::Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let StepParts { index, value } = <StepParts<F::Of<A>> as serde::Deserialize<'de>>::deserialize(deserializer)?;
        Ok(Self::new(index, value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::typeclass::{OptionK, VecK};
    use rstest::rstest;

    fn wrapped(times: usize, value: Vec<i32>) -> Step<VecK, i32> {
        (0..times).fold(SumT::inject_mf::<VecK, i32>(value), |step, _| {
            SumT::cons_mf::<VecK, i32>(Either::Right(step))
        })
    }

    #[rstest]
    #[case(0)]
    #[case(1)]
    #[case(5)]
    fn wrapping_counts_levels(#[case] times: usize) {
        let step = wrapped(times, vec![1]);
        assert_eq!(step.index(), times);
        assert_eq!(SumT::retract_mf::<VecK, i32>(step), vec![1]);
    }

    #[rstest]
    fn match_sf_at_zero_is_single() {
        let step = SumT::inject_sf::<VecK, i32>(vec![1]);
        assert_eq!(SumT::match_sf::<VecK, i32>(step), Either::Left(vec![1]));
    }

    #[rstest]
    #[case(1, 0)]
    #[case(3, 2)]
    fn match_sf_peels_exactly_one_level(#[case] index: usize, #[case] remaining: usize) {
        let step = Step::<VecK, i32>::new(index, vec![1]);
        let expected = Either::Right(Either::Right(Step::new(remaining, vec![1])));
        assert_eq!(SumT::match_sf::<VecK, i32>(step), expected);
    }

    #[rstest]
    #[case(0)]
    #[case(1)]
    #[case(4)]
    fn cons_sf_undoes_match_sf(#[case] index: usize) {
        let step = Step::<VecK, i32>::new(index, vec![index as i32]);
        let rebuilt = match SumT::match_sf::<VecK, i32>(step.clone()) {
            Either::Left(single) => SumT::inject_sf::<VecK, i32>(single),
            Either::Right(layer) => SumT::cons_sf::<VecK, i32>(layer),
        };
        assert_eq!(rebuilt, step);
    }

    #[rstest]
    fn append_right_increments() {
        let step = Step::<OptionK, i32>::new(2, Some(1));
        assert_eq!(SumT::append_sf::<OptionK, i32>(Either::Right(step.clone())).index(), 3);
        assert_eq!(SumT::append_sf::<OptionK, i32>(Either::Left(step)).index(), 2);
    }

    #[rstest]
    fn splitting_is_never_identity() {
        let step = Step::<VecK, i32>::new(0, vec![]);
        assert!(SumT::splitting_mf::<VecK, i32>(step.clone()).is_right());
        assert_eq!(SumT::match_mf::<VecK, i32>(step.clone()), Either::Right(step));
    }

    #[rstest]
    fn split_and_unsplit_are_inverse() {
        let step = Step::<VecK, i32>::new(4, vec![9]);
        let split = SumT::split_sf::<VecK, i32>(step.clone());
        assert_eq!(SumT::unsplit_sf::<VecK, i32>(split), step);
    }

    #[rstest]
    fn associate_moves_middle_choice() {
        let value: Either<Vec<i32>, Either<Option<i32>, Vec<i32>>> = Either::Right(Either::Left(Some(1)));
        let regrouped = SumT::associate::<VecK, OptionK, VecK, i32>(value.clone());
        assert_eq!(regrouped, Either::Left(Either::Right(Some(1))));
        assert_eq!(SumT::disassociate::<VecK, OptionK, VecK, i32>(regrouped), value);
    }

    #[rstest]
    fn step_brand_maps_effect_and_keeps_count() {
        let step = Step::<VecK, i32>::new(2, vec![1, 2]);
        assert_eq!(StepK::<VecK>::fmap(step, |n: i32| n + 1), Step::new(2, vec![2, 3]));
    }

    #[rstest]
    fn sum_of_functors_is_a_functor() {
        let value: Either<Vec<i32>, Option<i32>> = Either::Right(Some(4));
        assert_eq!(SumOf::<VecK, OptionK>::fmap(value, |n: i32| n * 2), Either::Right(Some(8)));
    }
}
