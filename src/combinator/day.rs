//! Day convolution: independent effects combined by a function.
//!
//! `Day<F, G, A>` holds an `F<B>`, a `G<C>` and a function `(B, C) -> A`
//! for some hidden `B` and `C`. Neither effect depends on the other's
//! result, which is exactly what [`Apply`] can collapse.
//!
//! The hidden types are erased to [`Existential`]; the combining function
//! is built together with the erased sides and is the only code that
//! downcasts them.
//!
//! Free structures:
//!
//! - [`Ap1`]: one or more effects combined into a result (free semigroup)
//! - [`Ap`]: zero or more effects, the free applicative (free monoid)
//!
//! # Laws
//!
//! ```text
//! elim1(intro1(x)) == x
//! retract_mf(to_mf(day)) == map2(left, right, combine)
//! ```
//!
//! # Examples
//!
//! ```rust
//! use combinars::prelude::*;
//!
//! let day = Day::<OptionK, OptionK, i32>::new::<i32, i32, _>(Some(2), Some(3), |a: i32, b: i32| a * b);
//! assert_eq!(<OptionK as SemigroupIn<DayT>>::biretract::<i32>(day), Some(6));
//! ```

use std::fmt;
use std::marker::PhantomData;
use std::rc::Rc;

use crate::control::{Either, Existential};
use crate::persistent::PersistentList;
use crate::typeclass::{
    Applicative, Applied, Apply, Associative, Functor, HBifunctor, Identity, IdentityK, Matchable, MonoidIn,
    Monoidal, NaturalTransformation, SemigroupIn, Semigroupoidal, Tensor, TypeConstructor, Value,
};

/// The Day convolution combinator.
#[derive(Debug)]
pub enum DayT {}

type Combine<A> = Rc<dyn Fn(Existential, Existential) -> A>;

// =============================================================================
// Day
// =============================================================================

/// Two independent effects and the function that merges their results.
pub struct Day<F: TypeConstructor, G: TypeConstructor, A: Value> {
    left: F::Of<Existential>,
    right: G::Of<Existential>,
    combine: Combine<A>,
}

impl<F: TypeConstructor, G: TypeConstructor, A: Value> Day<F, G, A> {
    /// Pairs two effects with a combining function.
    pub fn new<B, C, M>(left: F::Of<B>, right: G::Of<C>, combine: M) -> Self
    where
        F: Functor,
        G: Functor,
        B: Value,
        C: Value,
        M: Fn(B, C) -> A + 'static,
    {
        Self::from_parts(
            F::fmap::<B, Existential, _>(left, Existential::new::<B>),
            G::fmap::<C, Existential, _>(right, Existential::new::<C>),
            move |first: Existential, second: Existential| combine(first.downcast::<B>(), second.downcast::<C>()),
        )
    }

    pub(crate) fn from_parts<M>(left: F::Of<Existential>, right: G::Of<Existential>, combine: M) -> Self
    where
        M: Fn(Existential, Existential) -> A + 'static,
    {
        Self::from_shared(left, right, Rc::new(combine))
    }

    const fn from_shared(left: F::Of<Existential>, right: G::Of<Existential>, combine: Combine<A>) -> Self {
        Self { left, right, combine }
    }

    /// Post-composes the combining function. Neither effect is touched.
    pub fn map<B: Value, M>(self, function: M) -> Day<F, G, B>
    where
        M: Fn(A) -> B + 'static,
    {
        let combine = self.combine;
        Day::from_parts(self.left, self.right, move |first, second| function(combine(first, second)))
    }
}

impl<F: TypeConstructor, G: TypeConstructor, A: Value> Clone for Day<F, G, A> {
    fn clone(&self) -> Self {
        Self::from_shared(self.left.clone(), self.right.clone(), Rc::clone(&self.combine))
    }
}

impl<F: TypeConstructor, G: TypeConstructor, A: Value> fmt::Debug for Day<F, G, A>
where
    F::Of<Existential>: fmt::Debug,
    G::Of<Existential>: fmt::Debug,
{
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Day")
            .field("left", &self.left)
            .field("right", &self.right)
            .finish_non_exhaustive()
    }
}

// =============================================================================
// Free Structures
// =============================================================================

/// One or more effects combined into a result.
///
/// Internally a tree of effects and combining functions: mapping and
/// zipping add one node, and collapsing walks the tree with an explicit
/// stack.
pub struct Ap1<F: TypeConstructor, A: Value> {
    root: Link<F>,
    marker: PhantomData<fn() -> A>,
}

/// Zero or more effects combined into a result: the free applicative.
pub enum Ap<F: TypeConstructor, A: Value> {
    /// No effects.
    Pure(A),
    /// At least one effect.
    Ap(Ap1<F, A>),
}

/// Brand for [`Ap1`].
pub struct Ap1K<F>(PhantomData<fn() -> F>);

/// Brand for [`Ap`].
pub struct ApK<F>(PhantomData<fn() -> F>);

impl<F: TypeConstructor> TypeConstructor for Ap1K<F> {
    type Of<A: Value> = Ap1<F, A>;
}

impl<F: TypeConstructor> TypeConstructor for ApK<F> {
    type Of<A: Value> = Ap<F, A>;
}

impl<F: TypeConstructor, A: Value> Ap1<F, A> {
    const fn from_link(root: Link<F>) -> Self {
        Self {
            root,
            marker: PhantomData,
        }
    }

    fn from_node(node: Node<F>) -> Self {
        Self::from_link(Link::new(node))
    }

    /// Lifts a single effect.
    pub fn lift(effect: F::Of<A>) -> Self
    where
        F: Functor,
    {
        Self::from_node(Node::Effect(F::fmap::<A, Existential, _>(effect, Existential::new::<A>)))
    }

    /// Wraps a convolution of the first effect with the rest.
    pub fn from_day(day: Day<F, ApK<F>, A>) -> Self {
        let Day { left, right, combine } = day;
        let rest = match right {
            Ap::Pure(value) => Link::new(Node::Pure(Existential::new(value))),
            Ap::Ap(effects) => effects.root,
        };
        Self::from_node(Node::Zip(
            Link::new(Node::Effect(left)),
            rest,
            Rc::new(move |head: Existential, tail: Existential| {
                Existential::new(combine(head, tail.downcast::<Existential>()))
            }),
        ))
    }

    /// Unwraps into the first effect convolved with the rest.
    ///
    /// The rest keeps the remaining effects as a flat list, so unwrapping it
    /// again does not walk the tree.
    pub fn into_day(self) -> Day<F, ApK<F>, A> {
        let (first, rest) = self
            .root
            .effects()
            .uncons()
            .map(|(first, rest)| (first.clone(), rest))
            .expect("a free semigroup holds at least one effect");
        let right = if rest.is_empty() {
            Ap::Pure(Existential::new(PersistentList::<Existential>::new()))
        } else {
            Ap::Ap(Ap1::from_node(Node::Rest(rest)))
        };
        let root = self.root;
        Day::from_parts(first, right, move |head: Existential, tail: Existential| {
            let results = tail.downcast::<PersistentList<Existential>>().cons(head);
            root.evaluate(results).downcast::<A>()
        })
    }

    fn map_shared<B: Value>(self, function: Rc<dyn Fn(A) -> B>) -> Ap1<F, B> {
        Ap1::from_node(Node::Map(
            self.root,
            Rc::new(move |value: Existential| Existential::new(function(value.downcast::<A>()))),
        ))
    }

    /// Runs `self`'s effects, then `other`'s, and merges both results.
    fn zip_with<B: Value, C: Value>(self, other: Ap1<F, B>, function: Rc<dyn Fn(A, B) -> C>) -> Ap1<F, C> {
        Ap1::from_node(Node::Zip(
            self.root,
            other.root,
            Rc::new(move |first: Existential, second: Existential| {
                Existential::new(function(first.downcast::<A>(), second.downcast::<B>()))
            }),
        ))
    }

    /// Collapses into `G`, converting every effect with `lower` first.
    fn collapse<G: SemigroupIn<DayT>>(&self, lower: &dyn Fn(F::Of<Existential>) -> G::Of<Existential>) -> G::Of<A> {
        match self.root.collapse::<G>(lower) {
            Partial::Effect(effect) => G::fmap::<Existential, A, _>(effect, Existential::downcast::<A>),
            Partial::Value(_) => unreachable!("a free semigroup holds at least one effect"),
        }
    }
}

impl<F: TypeConstructor, A: Value> Ap<F, A> {
    /// An aggregate without effects.
    #[inline]
    pub const fn pure(value: A) -> Self {
        Self::Pure(value)
    }

    /// Lifts a single effect.
    #[inline]
    pub fn lift(effect: F::Of<A>) -> Self
    where
        F: Functor,
    {
        Self::Ap(Ap1::lift(effect))
    }

    /// Returns `true` if no effects are present.
    #[inline]
    pub const fn is_pure(&self) -> bool {
        matches!(self, Self::Pure(_))
    }

    fn map_shared<B: Value>(self, function: Rc<dyn Fn(A) -> B>) -> Ap<F, B> {
        match self {
            Self::Pure(value) => Ap::Pure(function(value)),
            Self::Ap(effects) => Ap::Ap(effects.map_shared(function)),
        }
    }

    fn zip_with<B: Value, C: Value>(self, other: Ap<F, B>, function: Rc<dyn Fn(A, B) -> C>) -> Ap<F, C> {
        match (self, other) {
            (Self::Pure(first), Ap::Pure(second)) => Ap::Pure(function(first, second)),
            (Self::Pure(first), Ap::Ap(second)) => {
                Ap::Ap(second.map_shared(Rc::new(move |value: B| function(first.clone(), value))))
            }
            (Self::Ap(first), Ap::Pure(second)) => {
                Ap::Ap(first.map_shared(Rc::new(move |value: A| function(value, second.clone()))))
            }
            (Self::Ap(first), Ap::Ap(second)) => Ap::Ap(first.zip_with(second, function)),
        }
    }

    fn collapse<G: MonoidIn<DayT>>(&self, lower: &dyn Fn(F::Of<Existential>) -> G::Of<Existential>) -> G::Of<A> {
        match self {
            Self::Pure(value) => <G as MonoidIn<DayT>>::pure_t::<A>(Identity(value.clone())),
            Self::Ap(effects) => match effects.root.collapse::<G>(lower) {
                Partial::Effect(effect) => G::fmap::<Existential, A, _>(effect, Existential::downcast::<A>),
                Partial::Value(value) => <G as MonoidIn<DayT>>::pure_t::<A>(Identity(value.downcast::<A>())),
            },
        }
    }
}

// =============================================================================
// Effect Trees
// =============================================================================

type Unary = Rc<dyn Fn(Existential) -> Existential>;
type Binary = Rc<dyn Fn(Existential, Existential) -> Existential>;

/// A node of the tree behind [`Ap1`].
///
/// A node's value is computed from the results of its effects, consumed
/// left to right.
enum Node<F: TypeConstructor> {
    /// A known value.
    Pure(Existential),
    /// One effect; its result is the value.
    Effect(F::Of<Existential>),
    /// Effects whose results are gathered into a `PersistentList`.
    Rest(PersistentList<F::Of<Existential>>),
    /// A function of one subtree.
    Map(Link<F>, Unary),
    /// A function of two subtrees, the left one's effects first.
    Zip(Link<F>, Link<F>, Binary),
}

/// A shared node, released without recursion.
struct Link<F: TypeConstructor>(Option<Rc<Node<F>>>);

enum Task<'a, F: TypeConstructor> {
    Visit(&'a Node<F>),
    Map(&'a Unary),
    Zip(&'a Binary),
}

impl<F: TypeConstructor> Link<F> {
    fn new(node: Node<F>) -> Self {
        Self(Some(Rc::new(node)))
    }

    fn node(&self) -> &Node<F> {
        self.0.as_deref().expect("a link is only emptied while it is dropped")
    }

    /// Post-order fold over the tree, leaves left to right.
    fn fold<R, L, U, B>(&self, mut leaf: L, mut unary: U, mut binary: B) -> R
    where
        L: FnMut(&Node<F>) -> R,
        U: FnMut(&Unary, R) -> R,
        B: FnMut(&Binary, R, R) -> R,
    {
        let mut tasks = vec![Task::Visit(self.node())];
        let mut folded: Vec<R> = Vec::new();
        while let Some(task) = tasks.pop() {
            match task {
                Task::Visit(Node::Map(inner, function)) => {
                    tasks.push(Task::Map(function));
                    tasks.push(Task::Visit(inner.node()));
                }
                Task::Visit(Node::Zip(left, right, function)) => {
                    tasks.push(Task::Zip(function));
                    tasks.push(Task::Visit(right.node()));
                    tasks.push(Task::Visit(left.node()));
                }
                Task::Visit(node) => folded.push(leaf(node)),
                Task::Map(function) => {
                    let inner = pop_operand(&mut folded);
                    folded.push(unary(function, inner));
                }
                Task::Zip(function) => {
                    let second = pop_operand(&mut folded);
                    let first = pop_operand(&mut folded);
                    folded.push(binary(function, first, second));
                }
            }
        }
        pop_operand(&mut folded)
    }

    /// The tree's effects, left to right.
    fn effects(&self) -> PersistentList<F::Of<Existential>> {
        if let Node::Rest(effects) = self.node() {
            return effects.clone();
        }
        let mut collected: Vec<F::Of<Existential>> = Vec::new();
        self.fold(
            |node| match node {
                Node::Effect(effect) => collected.push(effect.clone()),
                Node::Rest(effects) => collected.extend(effects.iter().cloned()),
                Node::Pure(_) | Node::Map(..) | Node::Zip(..) => {}
            },
            |_, ()| (),
            |_, (), ()| (),
        );
        collected.into_iter().collect()
    }

    /// Computes the tree's value from the results of its effects.
    fn evaluate(&self, results: PersistentList<Existential>) -> Existential {
        if let Node::Rest(_) = self.node() {
            return Existential::new(Existential::new(results));
        }
        let mut results = results.into_iter();
        self.fold(
            |node| match node {
                Node::Rest(effects) => {
                    let gathered: PersistentList<Existential> = results.by_ref().take(effects.len()).collect();
                    Existential::new(Existential::new(gathered))
                }
                Node::Effect(_) => results.next().expect("one result per effect"),
                Node::Pure(value) => value.clone(),
                Node::Map(..) | Node::Zip(..) => unreachable!("only leaves are folded directly"),
            },
            |function, value| function(value),
            |function, first, second| function(first, second),
        )
    }

    /// Collapses the tree into `G` with `map` and `biretract`.
    fn collapse<G: SemigroupIn<DayT>>(&self, lower: &dyn Fn(F::Of<Existential>) -> G::Of<Existential>) -> Partial<G> {
        self.fold(
            |node| match node {
                Node::Effect(effect) => Partial::Effect(lower(effect.clone())),
                Node::Rest(effects) => gather::<G>(effects.iter().map(|effect| lower(effect.clone())).collect()),
                Node::Pure(value) => Partial::Value(value.clone()),
                Node::Map(..) | Node::Zip(..) => unreachable!("only leaves are folded directly"),
            },
            |function, inner| inner.map(function),
            |function, first, second| Partial::zip(first, second, function),
        )
    }
}

fn pop_operand<R>(folded: &mut Vec<R>) -> R {
    folded.pop().expect("every operator follows its operands")
}

impl<F: TypeConstructor> Clone for Link<F> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<F: TypeConstructor> Drop for Link<F> {
    fn drop(&mut self) {
        let mut released: Vec<Rc<Node<F>>> = self.0.take().into_iter().collect();
        while let Some(shared) = released.pop() {
            if let Ok(node) = Rc::try_unwrap(shared) {
                match node {
                    Node::Map(mut inner, _) => released.extend(inner.0.take()),
                    Node::Zip(mut left, mut right, _) => {
                        released.extend(left.0.take());
                        released.extend(right.0.take());
                    }
                    Node::Pure(_) | Node::Effect(_) | Node::Rest(_) => {}
                }
            }
        }
    }
}

/// A subtree collapsed into `G`, or a plain value when it has no effects.
enum Partial<G: TypeConstructor> {
    Value(Existential),
    Effect(G::Of<Existential>),
}

impl<G: SemigroupIn<DayT>> Partial<G> {
    fn map(self, function: &Unary) -> Self {
        match self {
            Self::Value(value) => Self::Value(function(value)),
            Self::Effect(effect) => {
                let function = Rc::clone(function);
                Self::Effect(G::fmap::<Existential, Existential, _>(effect, move |value| function(value)))
            }
        }
    }

    fn zip(first: Self, second: Self, function: &Binary) -> Self {
        let function = Rc::clone(function);
        match (first, second) {
            (Self::Value(left), Self::Value(right)) => Self::Value(function(left, right)),
            (Self::Effect(left), Self::Value(right)) => Self::Effect(G::fmap::<Existential, Existential, _>(
                left,
                move |value| function(value, right.clone()),
            )),
            (Self::Value(left), Self::Effect(right)) => Self::Effect(G::fmap::<Existential, Existential, _>(
                right,
                move |value| function(left.clone(), value),
            )),
            (Self::Effect(left), Self::Effect(right)) => {
                Self::Effect(<G as SemigroupIn<DayT>>::biretract::<Existential>(Day::from_shared(left, right, function)))
            }
        }
    }
}

/// Runs `effects` left to right and gathers their results into a list.
fn gather<G: SemigroupIn<DayT>>(effects: Vec<G::Of<Existential>>) -> Partial<G> {
    let prepend: Binary = Rc::new(|head: Existential, tail: Existential| {
        Existential::new(tail.downcast::<PersistentList<Existential>>().cons(head))
    });
    let wrap: Unary = Rc::new(|list: Existential| Existential::new(list));
    effects
        .into_iter()
        .rev()
        .fold(
            Partial::Value(Existential::new(PersistentList::<Existential>::new())),
            |rest, effect| Partial::zip(Partial::Effect(effect), rest, &prepend),
        )
        .map(&wrap)
}

impl<F: TypeConstructor, A: Value> Clone for Ap1<F, A> {
    fn clone(&self) -> Self {
        Self::from_link(self.root.clone())
    }
}

impl<F: TypeConstructor, A: Value> Clone for Ap<F, A> {
    fn clone(&self) -> Self {
        match self {
            Self::Pure(value) => Self::Pure(value.clone()),
            Self::Ap(effects) => Self::Ap(effects.clone()),
        }
    }
}

impl<F: TypeConstructor, A: Value> fmt::Debug for Ap1<F, A> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("Ap1(..)")
    }
}

impl<F: TypeConstructor, A: Value + fmt::Debug> fmt::Debug for Ap<F, A> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pure(value) => formatter.debug_tuple("Pure").field(value).finish(),
            Self::Ap(effects) => formatter.debug_tuple("Ap").field(effects).finish(),
        }
    }
}

impl<F: TypeConstructor> Functor for Ap1K<F> {
    #[inline]
    fn fmap<A: Value, B: Value, M>(value: Ap1<F, A>, function: M) -> Ap1<F, B>
    where
        M: Fn(A) -> B + 'static,
    {
        value.map_shared(Rc::new(function))
    }
}

impl<F: TypeConstructor> Functor for ApK<F> {
    #[inline]
    fn fmap<A: Value, B: Value, M>(value: Ap<F, A>, function: M) -> Ap<F, B>
    where
        M: Fn(A) -> B + 'static,
    {
        value.map_shared(Rc::new(function))
    }
}

impl<F: TypeConstructor> Apply for ApK<F> {
    #[inline]
    fn map2<A: Value, B: Value, C: Value, M>(first: Ap<F, A>, second: Ap<F, B>, function: M) -> Ap<F, C>
    where
        M: Fn(A, B) -> C + 'static,
    {
        first.zip_with(second, Rc::new(function))
    }
}

impl<F: TypeConstructor> Applicative for ApK<F> {
    #[inline]
    fn pure<A: Value>(value: A) -> Ap<F, A> {
        Ap::Pure(value)
    }
}

// =============================================================================
// Combinator Hierarchy
// =============================================================================

impl HBifunctor for DayT {
    type Of<F: TypeConstructor, G: TypeConstructor, A: Value> = Day<F, G, A>;

    fn hbimap<F, G, J, L, A, N, M>(value: Day<F, G, A>, left: N, right: M) -> Day<J, L, A>
    where
        F: TypeConstructor,
        G: TypeConstructor,
        J: TypeConstructor,
        L: TypeConstructor,
        A: Value,
        N: NaturalTransformation<F, J>,
        M: NaturalTransformation<G, L>,
    {
        Day::from_shared(
            <N as NaturalTransformation<F, J>>::transform::<Existential>(&left, value.left),
            <M as NaturalTransformation<G, L>>::transform::<Existential>(&right, value.right),
            value.combine,
        )
    }

    #[inline]
    fn hfmap<F, G, A, B, M>(value: Day<F, G, A>, function: M) -> Day<F, G, B>
    where
        F: Functor,
        G: Functor,
        A: Value,
        B: Value,
        M: Fn(A) -> B + 'static,
    {
        value.map(function)
    }
}

impl Associative for DayT {
    fn associate<F, G, H, A>(value: Day<F, Applied<Self, G, H>, A>) -> Day<Applied<Self, F, G>, H, A>
    where
        F: Functor,
        G: Functor,
        H: Functor,
        A: Value,
    {
        let Day { left, right: inner, combine } = value;
        let Day { left: middle, right: last, combine: inner_combine } = inner;
        let paired = Day::<F, G, Existential>::from_parts(left, middle, |first: Existential, second: Existential| {
            Existential::new((first, second))
        });
        Day::from_parts(paired, last, move |pair: Existential, third: Existential| {
            let (first, second) = pair.downcast::<(Existential, Existential)>();
            combine(first, inner_combine(second, third))
        })
    }

    fn disassociate<F, G, H, A>(value: Day<Applied<Self, F, G>, H, A>) -> Day<F, Applied<Self, G, H>, A>
    where
        F: Functor,
        G: Functor,
        H: Functor,
        A: Value,
    {
        let Day { left: inner, right: last, combine } = value;
        let Day { left: first, right: middle, combine: inner_combine } = inner;
        let paired = Day::<G, H, Existential>::from_parts(middle, last, |second: Existential, third: Existential| {
            Existential::new((second, third))
        });
        Day::from_parts(first, paired, move |head: Existential, pair: Existential| {
            let (second, third) = pair.downcast::<(Existential, Existential)>();
            combine(inner_combine(head, second), third)
        })
    }
}

impl Tensor for DayT {
    type Identity = IdentityK;

    #[inline]
    fn intro1<F: Functor, A: Value>(value: F::Of<A>) -> Day<F, IdentityK, A> {
        Day::new::<A, (), _>(value, Identity(()), |first: A, ()| first)
    }

    #[inline]
    fn intro2<G: Functor, A: Value>(value: G::Of<A>) -> Day<IdentityK, G, A> {
        Day::new::<(), A, _>(Identity(()), value, |(), second: A| second)
    }

    fn elim1<F: Functor, A: Value>(value: Day<F, IdentityK, A>) -> F::Of<A> {
        let Day { left, right: Identity(unit), combine } = value;
        F::fmap::<Existential, A, _>(left, move |first| combine(first, unit.clone()))
    }

    fn elim2<G: Functor, A: Value>(value: Day<IdentityK, G, A>) -> G::Of<A> {
        let Day { left: Identity(unit), right, combine } = value;
        G::fmap::<Existential, A, _>(right, move |second| combine(unit.clone(), second))
    }
}

impl Semigroupoidal for DayT {
    type NonEmpty<F: TypeConstructor> = Ap1K<F>;

    #[inline]
    fn append_sf<F: Functor, A: Value>(value: Day<Ap1K<F>, Ap1K<F>, A>) -> Ap1<F, A> {
        let Day { left, right, combine } = value;
        left.zip_with::<Existential, A>(right, combine)
    }

    fn match_sf<F: Functor, A: Value>(value: Ap1<F, A>) -> Either<F::Of<A>, Day<F, Ap1K<F>, A>> {
        let Day { left, right, combine } = value.into_day();
        match right {
            Ap::Pure(rest) => Either::Left(F::fmap::<Existential, A, _>(left, move |first| combine(first, rest.clone()))),
            Ap::Ap(more) => Either::Right(Day::from_shared(left, more, combine)),
        }
    }

    #[inline]
    fn inject_sf<F: Functor, A: Value>(value: F::Of<A>) -> Ap1<F, A> {
        Ap1::lift(value)
    }

    fn retract_sf<F: SemigroupIn<Self>, A: Value>(value: Ap1<F, A>) -> F::Of<A> {
        value.collapse::<F>(&|effect| effect)
    }

    fn interpret_sf<G, F, A, N>(transformation: N, value: Ap1<G, A>) -> F::Of<A>
    where
        G: Functor,
        F: SemigroupIn<Self>,
        A: Value,
        N: NaturalTransformation<G, F>,
    {
        value.collapse::<F>(&|effect| transformation.transform::<Existential>(effect))
    }
}

impl Monoidal for DayT {
    type Possibly<F: TypeConstructor> = ApK<F>;

    #[inline]
    fn append_mf<F: Functor, A: Value>(value: Day<ApK<F>, ApK<F>, A>) -> Ap<F, A> {
        let Day { left, right, combine } = value;
        left.zip_with::<Existential, A>(right, combine)
    }

    fn splitting_mf<F: Functor, A: Value>(value: Ap<F, A>) -> Either<Identity<A>, Day<F, ApK<F>, A>> {
        match value {
            Ap::Pure(result) => Either::Left(Identity(result)),
            Ap::Ap(effects) => Either::Right(effects.into_day()),
        }
    }

    fn unsplitting_mf<F: Functor, A: Value>(value: Either<Identity<A>, Day<F, ApK<F>, A>>) -> Ap<F, A> {
        value.fold(|Identity(result)| Ap::Pure(result), |day| Ap::Ap(Ap1::from_day(day)))
    }

    #[inline]
    fn split_sf<F: Functor, A: Value>(value: Ap1<F, A>) -> Day<F, ApK<F>, A> {
        value.into_day()
    }

    fn retract_mf<F: MonoidIn<Self>, A: Value>(value: Ap<F, A>) -> F::Of<A> {
        value.collapse::<F>(&|effect| effect)
    }

    fn interpret_mf<G, F, A, N>(transformation: N, value: Ap<G, A>) -> F::Of<A>
    where
        G: Functor,
        F: MonoidIn<Self>,
        A: Value,
        N: NaturalTransformation<G, F>,
    {
        value.collapse::<F>(&|effect| transformation.transform::<Existential>(effect))
    }
}

impl Matchable for DayT {
    #[inline]
    fn unsplit_sf<F: Functor, A: Value>(value: Day<F, ApK<F>, A>) -> Ap1<F, A> {
        Ap1::from_day(value)
    }

    fn match_mf<F: Functor, A: Value>(value: Ap<F, A>) -> Either<Identity<A>, Ap1<F, A>> {
        match value {
            Ap::Pure(result) => Either::Left(Identity(result)),
            Ap::Ap(effects) => Either::Right(effects),
        }
    }
}

// =============================================================================
// Capabilities
// =============================================================================

/// An applicative collapses a convolution by running both sides.
impl<F: Apply> SemigroupIn<DayT> for F {
    fn biretract<A: Value>(value: Day<F, F, A>) -> F::Of<A> {
        let Day { left, right, combine } = value;
        F::map2::<Existential, Existential, A, _>(left, right, move |first, second| combine(first, second))
    }
}

impl<F: Applicative> MonoidIn<DayT> for F {
    #[inline]
    fn pure_t<A: Value>(value: Identity<A>) -> F::Of<A> {
        F::pure::<A>(value.into_inner())
    }
}

/// The convolution of two functors is a functor.
pub type DayOf<F, G> = Applied<DayT, F, G>;

static_assertions::assert_not_impl_any!(Day<crate::typeclass::OptionK, crate::typeclass::OptionK, i32>: Send, Sync);
static_assertions::assert_not_impl_any!(Ap<crate::typeclass::OptionK, i32>: Send, Sync);
