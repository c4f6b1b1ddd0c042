//! Parallel pairing: the product combinator.
//!
//! `ProductT<F, G>` holds an `F` and a `G` side by side, as a tuple. Its
//! identity is [`Proxy`], its free semigroup is [`NonEmptyF`] (one or more
//! `F`s) and its free monoid is [`ListF`] (zero or more `F`s).
//!
//! A target collapses products when it can choose between two of its own
//! effects ([`Alt`]), and collapses empty lists when it also has a failing
//! effect ([`Alternative`]).
//!
//! # Ordering
//!
//! Aggregates keep their effects in the order they were combined:
//! `to_mf((x, y))` is the list `[x, y]`, and appending `[a, b]` to `[c, d]`
//! gives `[a, b, c, d]`.
//!
//! # Examples
//!
//! ```rust
//! use combinars::prelude::*;
//!
//! let first = ProductT::to_mf::<VecK, i32>((vec![1], vec![2]));
//! let second = ProductT::to_mf::<VecK, i32>((vec![3], vec![4]));
//! let all = ProductT::append_mf::<VecK, i32>((first, second));
//!
//! assert_eq!(all.len(), 4);
//! assert_eq!(ProductT::retract_mf::<VecK, i32>(all), vec![1, 2, 3, 4]);
//! ```

use std::fmt;
use std::marker::PhantomData;
use std::rc::Rc;

use crate::control::Either;
use crate::persistent::PersistentList;
use crate::typeclass::{
    Alt, Alternative, Applied, Associative, Functor, HBifunctor, Matchable, MonoidIn, Monoidal,
    NaturalTransformation, Proxy, ProxyK, SemigroupIn, Semigroupoidal, Tensor, TypeConstructor,
    Value,
};

/// The product combinator: `T<F, G>` is `(F<A>, G<A>)`.
#[derive(Debug)]
pub enum ProductT {}

// =============================================================================
// NonEmptyF
// =============================================================================

/// One or more `F`s in sequence: the free semigroup of the product.
pub struct NonEmptyF<F: TypeConstructor, A: Value> {
    head: F::Of<A>,
    tail: PersistentList<F::Of<A>>,
}

impl<F: TypeConstructor, A: Value> NonEmptyF<F, A> {
    /// Creates an aggregate from its first effect and the rest.
    #[inline]
    pub const fn new(head: F::Of<A>, tail: PersistentList<F::Of<A>>) -> Self {
        Self { head, tail }
    }

    /// Creates an aggregate with exactly one effect.
    #[inline]
    pub const fn singleton(head: F::Of<A>) -> Self {
        Self::new(head, PersistentList::new())
    }

    /// Builds an aggregate from a list, failing if the list is empty.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use combinars::prelude::*;
    ///
    /// let list: PersistentList<Vec<i32>> = vec![vec![1], vec![2]].into_iter().collect();
    /// let aggregate = NonEmptyF::<VecK, i32>::from_list(&list).unwrap();
    /// assert_eq!(aggregate.len(), 2);
    ///
    /// assert!(NonEmptyF::<VecK, i32>::from_list(&PersistentList::new()).is_none());
    /// ```
    pub fn from_list(list: &PersistentList<F::Of<A>>) -> Option<Self> {
        list.uncons().map(|(head, tail)| Self::new(head.clone(), tail))
    }

    /// The first effect.
    #[inline]
    pub const fn head(&self) -> &F::Of<A> {
        &self.head
    }

    /// The effects after the first.
    #[inline]
    pub const fn tail(&self) -> &PersistentList<F::Of<A>> {
        &self.tail
    }

    /// The number of effects; at least one.
    #[inline]
    pub const fn len(&self) -> usize {
        self.tail.len() + 1
    }

    /// Always `false`; provided for symmetry with [`ListF::is_empty`].
    #[inline]
    pub const fn is_empty(&self) -> bool {
        false
    }

    /// Iterates over the effects in order.
    pub fn iter(&self) -> impl Iterator<Item = &F::Of<A>> {
        std::iter::once(&self.head).chain(self.tail.iter())
    }

    /// Forgets non-emptiness.
    pub fn into_list(self) -> PersistentList<F::Of<A>> {
        self.tail.cons(self.head)
    }
}

impl<F: TypeConstructor, A: Value> Clone for NonEmptyF<F, A> {
    fn clone(&self) -> Self {
        Self::new(self.head.clone(), self.tail.clone())
    }
}

impl<F: TypeConstructor, A: Value> PartialEq for NonEmptyF<F, A>
where
    F::Of<A>: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.head == other.head && self.tail == other.tail
    }
}

impl<F: TypeConstructor, A: Value> Eq for NonEmptyF<F, A> where F::Of<A>: Eq {}

impl<F: TypeConstructor, A: Value> fmt::Debug for NonEmptyF<F, A>
where
    F::Of<A>: fmt::Debug,
{
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_list().entries(self.iter()).finish()
    }
}

/// Brand for [`NonEmptyF`].
pub struct NonEmptyFK<F>(PhantomData<fn() -> F>);

impl<F: TypeConstructor> TypeConstructor for NonEmptyFK<F> {
    type Of<A: Value> = NonEmptyF<F, A>;
}

impl<F: Functor> Functor for NonEmptyFK<F> {
    fn fmap<A: Value, B: Value, M>(value: NonEmptyF<F, A>, function: M) -> NonEmptyF<F, B>
    where
        M: Fn(A) -> B + 'static,
    {
        let function = Rc::new(function);
        let head = map_shared::<F, A, B, M>(value.head, &function);
        let tail = value
            .tail
            .into_iter()
            .map(|effect| map_shared::<F, A, B, M>(effect, &function))
            .collect();
        NonEmptyF::new(head, tail)
    }
}

// =============================================================================
// ListF
// =============================================================================

/// Zero or more `F`s in sequence: the free monoid of the product.
pub struct ListF<F: TypeConstructor, A: Value>(PersistentList<F::Of<A>>);

impl<F: TypeConstructor, A: Value> ListF<F, A> {
    /// The empty aggregate.
    #[inline]
    pub const fn new() -> Self {
        Self(PersistentList::new())
    }

    /// Wraps an existing list of effects.
    #[inline]
    pub const fn from_list(list: PersistentList<F::Of<A>>) -> Self {
        Self(list)
    }

    /// Prepends one effect.
    #[inline]
    #[must_use]
    pub fn cons(&self, effect: F::Of<A>) -> Self {
        Self(self.0.cons(effect))
    }

    /// The effects, in order.
    #[inline]
    pub const fn as_list(&self) -> &PersistentList<F::Of<A>> {
        &self.0
    }

    /// Unwraps the list of effects.
    #[inline]
    pub fn into_list(self) -> PersistentList<F::Of<A>> {
        self.0
    }

    /// The number of effects.
    #[inline]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if there are no effects.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over the effects in order.
    pub fn iter(&self) -> impl Iterator<Item = &F::Of<A>> {
        self.0.iter()
    }
}

impl<F: TypeConstructor, A: Value> Default for ListF<F, A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: TypeConstructor, A: Value> Clone for ListF<F, A> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<F: TypeConstructor, A: Value> PartialEq for ListF<F, A>
where
    F::Of<A>: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl<F: TypeConstructor, A: Value> Eq for ListF<F, A> where F::Of<A>: Eq {}

impl<F: TypeConstructor, A: Value> fmt::Debug for ListF<F, A>
where
    F::Of<A>: fmt::Debug,
{
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_tuple("ListF").field(&self.0).finish()
    }
}

impl<F: TypeConstructor, A: Value> FromIterator<F::Of<A>> for ListF<F, A> {
    fn from_iter<I: IntoIterator<Item = F::Of<A>>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Brand for [`ListF`].
pub struct ListFK<F>(PhantomData<fn() -> F>);

impl<F: TypeConstructor> TypeConstructor for ListFK<F> {
    type Of<A: Value> = ListF<F, A>;
}

impl<F: Functor> Functor for ListFK<F> {
    fn fmap<A: Value, B: Value, M>(value: ListF<F, A>, function: M) -> ListF<F, B>
    where
        M: Fn(A) -> B + 'static,
    {
        let function = Rc::new(function);
        value
            .into_list()
            .into_iter()
            .map(|effect| map_shared::<F, A, B, M>(effect, &function))
            .collect()
    }
}

fn map_shared<F, A, B, M>(effect: F::Of<A>, function: &Rc<M>) -> F::Of<B>
where
    F: Functor,
    A: Value,
    B: Value,
    M: Fn(A) -> B + 'static,
{
    let function = Rc::clone(function);
    F::fmap::<A, B, _>(effect, move |value| function(value))
}

// =============================================================================
// Combinator Hierarchy
// =============================================================================

impl HBifunctor for ProductT {
    type Of<F: TypeConstructor, G: TypeConstructor, A: Value> = (F::Of<A>, G::Of<A>);

    #[inline]
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
        let (first, second) = value;
        (
            <N as NaturalTransformation<F, J>>::transform::<A>(&left, first),
            <M as NaturalTransformation<G, L>>::transform::<A>(&right, second),
        )
    }

    fn hfmap<F, G, A, B, M>(value: (F::Of<A>, G::Of<A>), function: M) -> (F::Of<B>, G::Of<B>)
    where
        F: Functor,
        G: Functor,
        A: Value,
        B: Value,
        M: Fn(A) -> B + 'static,
    {
        let function = Rc::new(function);
        let (first, second) = value;
        (
            map_shared::<F, A, B, M>(first, &function),
            map_shared::<G, A, B, M>(second, &function),
        )
    }
}

impl Associative for ProductT {
    #[inline]
    fn associate<F, G, H, A>(value: (F::Of<A>, (G::Of<A>, H::Of<A>))) -> ((F::Of<A>, G::Of<A>), H::Of<A>)
    where
        F: Functor,
        G: Functor,
        H: Functor,
        A: Value,
    {
        let (first, (second, third)) = value;
        ((first, second), third)
    }

    #[inline]
    fn disassociate<F, G, H, A>(value: ((F::Of<A>, G::Of<A>), H::Of<A>)) -> (F::Of<A>, (G::Of<A>, H::Of<A>))
    where
        F: Functor,
        G: Functor,
        H: Functor,
        A: Value,
    {
        let ((first, second), third) = value;
        (first, (second, third))
    }
}

impl Tensor for ProductT {
    type Identity = ProxyK;

    #[inline]
    fn intro1<F: Functor, A: Value>(value: F::Of<A>) -> (F::Of<A>, Proxy<A>) {
        (value, Proxy::new())
    }

    #[inline]
    fn intro2<G: Functor, A: Value>(value: G::Of<A>) -> (Proxy<A>, G::Of<A>) {
        (Proxy::new(), value)
    }

    #[inline]
    fn elim1<F: Functor, A: Value>(value: (F::Of<A>, Proxy<A>)) -> F::Of<A> {
        value.0
    }

    #[inline]
    fn elim2<G: Functor, A: Value>(value: (Proxy<A>, G::Of<A>)) -> G::Of<A> {
        value.1
    }
}

impl Semigroupoidal for ProductT {
    type NonEmpty<F: TypeConstructor> = NonEmptyFK<F>;

    fn append_sf<F: Functor, A: Value>(value: (NonEmptyF<F, A>, NonEmptyF<F, A>)) -> NonEmptyF<F, A> {
        let (first, second) = value;
        let NonEmptyF { head, tail } = first;
        NonEmptyF::new(head, tail.append(&second.into_list()))
    }

    fn match_sf<F: Functor, A: Value>(value: NonEmptyF<F, A>) -> Either<F::Of<A>, (F::Of<A>, NonEmptyF<F, A>)> {
        let NonEmptyF { head, tail } = value;
        match NonEmptyF::from_list(&tail) {
            Some(rest) => Either::Right((head, rest)),
            None => Either::Left(head),
        }
    }

    #[inline]
    fn inject_sf<F: Functor, A: Value>(value: F::Of<A>) -> NonEmptyF<F, A> {
        NonEmptyF::singleton(value)
    }

    fn retract_sf<F: SemigroupIn<Self>, A: Value>(value: NonEmptyF<F, A>) -> F::Of<A> {
        let NonEmptyF { head, tail } = value;
        merge_non_empty::<F, A>(head, tail.into_iter().collect())
    }

    fn interpret_sf<G, F, A, N>(transformation: N, value: NonEmptyF<G, A>) -> F::Of<A>
    where
        G: Functor,
        F: SemigroupIn<Self>,
        A: Value,
        N: NaturalTransformation<G, F>,
    {
        let NonEmptyF { head, tail } = value;
        let head = transformation.transform::<A>(head);
        let tail = tail.into_iter().map(|effect| transformation.transform::<A>(effect)).collect();
        merge_non_empty::<F, A>(head, tail)
    }
}

impl Monoidal for ProductT {
    type Possibly<F: TypeConstructor> = ListFK<F>;

    fn append_mf<F: Functor, A: Value>(value: (ListF<F, A>, ListF<F, A>)) -> ListF<F, A> {
        let (first, second) = value;
        ListF(first.0.append(&second.0))
    }

    fn splitting_mf<F: Functor, A: Value>(value: ListF<F, A>) -> Either<Proxy<A>, (F::Of<A>, ListF<F, A>)> {
        match value.0.uncons() {
            Some((head, tail)) => Either::Right((head.clone(), ListF(tail))),
            None => Either::Left(Proxy::new()),
        }
    }

    fn unsplitting_mf<F: Functor, A: Value>(value: Either<Proxy<A>, (F::Of<A>, ListF<F, A>)>) -> ListF<F, A> {
        match value {
            Either::Left(_) => ListF::new(),
            Either::Right((head, tail)) => tail.cons(head),
        }
    }

    #[inline]
    fn split_sf<F: Functor, A: Value>(value: NonEmptyF<F, A>) -> (F::Of<A>, ListF<F, A>) {
        let NonEmptyF { head, tail } = value;
        (head, ListF(tail))
    }

    fn retract_mf<F: MonoidIn<Self>, A: Value>(value: ListF<F, A>) -> F::Of<A> {
        let effects: Vec<F::Of<A>> = value.into_list().into_iter().collect();
        merge_right::<F, A>(effects, <F as MonoidIn<Self>>::pure_t::<A>(Proxy::new()))
    }

    fn interpret_mf<G, F, A, N>(transformation: N, value: ListF<G, A>) -> F::Of<A>
    where
        G: Functor,
        F: MonoidIn<Self>,
        A: Value,
        N: NaturalTransformation<G, F>,
    {
        let effects: Vec<F::Of<A>> = value
            .into_list()
            .into_iter()
            .map(|effect| transformation.transform::<A>(effect))
            .collect();
        merge_right::<F, A>(effects, <F as MonoidIn<Self>>::pure_t::<A>(Proxy::new()))
    }
}

/// Collapses `head` followed by `tail`, the last effect ending the fold.
fn merge_non_empty<F: SemigroupIn<ProductT>, A: Value>(head: F::Of<A>, mut tail: Vec<F::Of<A>>) -> F::Of<A> {
    match tail.pop() {
        None => head,
        Some(last) => {
            let merged = merge_right::<F, A>(tail, last);
            <F as SemigroupIn<ProductT>>::biretract::<A>((head, merged))
        }
    }
}

/// Folds `effects` into `last` from the right: `e1 <|> (e2 <|> (... <|> last))`.
fn merge_right<F: SemigroupIn<ProductT>, A: Value>(effects: Vec<F::Of<A>>, last: F::Of<A>) -> F::Of<A> {
    effects
        .into_iter()
        .rev()
        .fold(last, |merged, effect| <F as SemigroupIn<ProductT>>::biretract::<A>((effect, merged)))
}

impl Matchable for ProductT {
    #[inline]
    fn unsplit_sf<F: Functor, A: Value>(value: (F::Of<A>, ListF<F, A>)) -> NonEmptyF<F, A> {
        let (head, tail) = value;
        NonEmptyF::new(head, tail.0)
    }

    fn match_mf<F: Functor, A: Value>(value: ListF<F, A>) -> Either<Proxy<A>, NonEmptyF<F, A>> {
        NonEmptyF::from_list(&value.0).map_or_else(|| Either::Left(Proxy::new()), Either::Right)
    }
}

// =============================================================================
// Capabilities
// =============================================================================

/// A product collapses by choosing: the left effect, then the right.
impl<F: Alt> SemigroupIn<ProductT> for F {
    #[inline]
    fn biretract<A: Value>(value: (F::Of<A>, F::Of<A>)) -> F::Of<A> {
        let (first, second) = value;
        F::alt::<A>(first, second)
    }
}

impl<F: Alternative> MonoidIn<ProductT> for F {
    #[inline]
    fn pure_t<A: Value>(_value: Proxy<A>) -> F::Of<A> {
        F::empty::<A>()
    }
}

/// The product of two functors is a functor.
pub type ProductOf<F, G> = Applied<ProductT, F, G>;

// =============================================================================
// Serialization
// =============================================================================

#[cfg(feature = "serde")]
impl<F: TypeConstructor, A: Value> serde::Serialize for ListF<F, A>
where
    F::Of<A>: serde::Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serde::Serialize::serialize(&self.0, serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de, F: TypeConstructor, A: Value> serde::Deserialize<'de> for ListF<F, A>
where
    F::Of<A>: serde::Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        <PersistentList<F::Of<A>> as serde::Deserialize<'de>>::deserialize(deserializer).map(Self)
    }
}

/// Serialized as a sequence of its effects, head first.
#[cfg(feature = "serde")]
impl<F: TypeConstructor, A: Value> serde::Serialize for NonEmptyF<F, A>
where
    F::Of<A>: serde::Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeSeq;
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for effect in self.iter() {
            seq.serialize_element(effect)?;
        }
        seq.end()
    }
}

#[cfg(feature = "serde")]
impl<'de, F: TypeConstructor, A: Value> serde::Deserialize<'de> for NonEmptyF<F, A>
where
    F::Of<A>: serde::Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let list = <PersistentList<F::Of<A>> as serde::Deserialize<'de>>::deserialize(deserializer)?;
        Self::from_list(&list).ok_or_else(|| serde::de::Error::invalid_length(0, &"a non-empty sequence"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::typeclass::{OptionK, VecK};
    use rstest::rstest;

    fn list(effects: Vec<Vec<i32>>) -> ListF<VecK, i32> {
        effects.into_iter().collect()
    }

    #[rstest]
    fn associate_regroups_without_reordering() {
        let value = (vec![1], (Some(2), vec![3]));
        let regrouped = ProductT::associate::<VecK, OptionK, VecK, i32>(value.clone());
        assert_eq!(regrouped, ((vec![1], Some(2)), vec![3]));
        assert_eq!(ProductT::disassociate::<VecK, OptionK, VecK, i32>(regrouped), value);
    }

    #[rstest]
    fn intro_and_elim_are_inverse() {
        assert_eq!(ProductT::elim1::<VecK, i32>(ProductT::intro1::<VecK, i32>(vec![5])), vec![5]);
        assert_eq!(ProductT::elim2::<OptionK, i32>(ProductT::intro2::<OptionK, i32>(Some(5))), Some(5));
    }

    #[rstest]
    #[case(vec![vec![1]])]
    #[case(vec![vec![1], vec![2, 3]])]
    #[case(vec![vec![], vec![4], vec![5]])]
    fn match_sf_splits_head(#[case] effects: Vec<Vec<i32>>) {
        let list: PersistentList<Vec<i32>> = effects.iter().cloned().collect();
        let aggregate = NonEmptyF::<VecK, i32>::from_list(&list).unwrap();
        match ProductT::match_sf::<VecK, i32>(aggregate) {
            Either::Left(single) => {
                assert_eq!(effects.len(), 1);
                assert_eq!(single, effects[0]);
            }
            Either::Right((head, rest)) => {
                assert_eq!(head, effects[0]);
                assert_eq!(rest.len(), effects.len() - 1);
            }
        }
    }

    #[rstest]
    fn append_sf_concatenates_in_order() {
        let first = ProductT::to_sf::<VecK, i32>((vec![1], vec![2]));
        let second = ProductT::inject_sf::<VecK, i32>(vec![3]);
        let combined = ProductT::append_sf::<VecK, i32>((first, second));
        assert_eq!(combined.iter().cloned().collect::<Vec<_>>(), vec![vec![1], vec![2], vec![3]]);
    }

    #[rstest]
    fn uncons_of_nil_is_identity() {
        let nil = ProductT::nil_mf::<VecK, i32>(Proxy::new());
        assert_eq!(ProductT::uncons_mf::<VecK, i32>(nil), Either::Left(Proxy::new()));
    }

    #[rstest]
    fn cons_mf_then_uncons_round_trips() {
        let tail = list(vec![vec![2]]);
        let consed = ProductT::cons_mf::<VecK, i32>((vec![1], tail.clone()));
        assert_eq!(ProductT::uncons_mf::<VecK, i32>(consed), Either::Right((vec![1], tail)));
    }

    #[rstest]
    fn match_mf_distinguishes_empty() {
        assert!(ProductT::match_mf::<VecK, i32>(ListF::new()).is_left());
        let single = ProductT::inject_mf::<VecK, i32>(vec![1]);
        let matched = ProductT::match_mf::<VecK, i32>(single);
        assert_eq!(matched, Either::Right(NonEmptyF::singleton(vec![1])));
    }

    #[rstest]
    fn retract_uses_alternative_of_target() {
        let aggregate = list(vec![vec![1, 2], vec![], vec![3]]);
        assert_eq!(ProductT::retract_mf::<VecK, i32>(aggregate), vec![1, 2, 3]);

        let options: ListF<OptionK, i32> = vec![None, Some(2), Some(3)].into_iter().collect();
        assert_eq!(ProductT::retract_mf::<OptionK, i32>(options), Some(2));
    }

    #[rstest]
    fn list_brand_maps_every_effect() {
        let aggregate = list(vec![vec![1], vec![2, 3]]);
        let mapped = ListFK::<VecK>::fmap(aggregate, |n: i32| n * 10);
        assert_eq!(mapped, list(vec![vec![10], vec![20, 30]]));
    }

    #[rstest]
    fn non_empty_brand_maps_head_and_tail() {
        let aggregate = ProductT::to_sf::<OptionK, i32>((Some(1), None));
        let mapped = NonEmptyFK::<OptionK>::fmap(aggregate, |n: i32| n + 1);
        assert_eq!(mapped.iter().cloned().collect::<Vec<_>>(), vec![Some(2), None]);
    }

    #[rstest]
    fn product_of_functors_is_a_functor() {
        let value = (vec![1, 2], Some(3));
        let mapped = ProductOf::<VecK, OptionK>::fmap(value, |n: i32| n * 2);
        assert_eq!(mapped, (vec![2, 4], Some(6)));
    }
}
