//! Sequential composition: an effect followed by a dependent one.
//!
//! `Comp<F, G, A>` runs an `F<X>` for some hidden `X` and feeds its result
//! into a continuation `X -> G<A>`. The second effect is chosen by the
//! first one's result, which is what [`Bind`] can collapse.
//!
//! Free structures:
//!
//! - [`Free1`]: one or more effects in sequence (free semigroup)
//! - [`Free`]: zero or more effects in sequence, the free monad (free monoid)
//!
//! Both keep their continuations in a queue of type-erased arrows, the way
//! a freer monad does. Binding and appending push one arrow, so neither
//! walks a chain and chains may be infinite. Collapsing resumes the queue
//! in a loop through [`Bind::tail_rec_m`], one effect at a time.
//!
//! Composition is not [`Matchable`](crate::typeclass::Matchable): whether
//! a `Free` holds more effects after its first one is only known once its
//! continuation has been applied.
//!
//! # Examples
//!
//! ```rust
//! use combinars::prelude::*;
//!
//! let program = Free::<VecK, i32>::lift(vec![1, 2]).bind(|n: i32| Free::lift(vec![n, n * 10]));
//! assert_eq!(CompT::retract_mf::<VecK, i32>(program), vec![1, 10, 2, 20]);
//! ```

use std::fmt;
use std::marker::PhantomData;
use std::rc::Rc;

use crate::control::{Either, Existential};
use crate::persistent::PersistentList;
use crate::typeclass::{
    Applicative, Applied, Apply, Associative, Bind, Functor, HBifunctor, Identity, IdentityK, Monad, MonoidIn,
    Monoidal, NaturalTransformation, SemigroupIn, Semigroupoidal, Tensor, TypeConstructor, Value,
};

/// The sequential composition combinator.
#[derive(Debug)]
pub enum CompT {}

type Continuation<G, A> = Rc<dyn Fn(Existential) -> <G as TypeConstructor>::Of<A>>;

// =============================================================================
// Comp
// =============================================================================

/// An effect and the continuation that consumes its result.
pub struct Comp<F: TypeConstructor, G: TypeConstructor, A: Value> {
    effect: F::Of<Existential>,
    continuation: Continuation<G, A>,
}

impl<F: TypeConstructor, G: TypeConstructor, A: Value> Comp<F, G, A> {
    /// Sequences `effect` with a continuation over its result.
    pub fn new<X, M>(effect: F::Of<X>, continuation: M) -> Self
    where
        F: Functor,
        X: Value,
        M: Fn(X) -> G::Of<A> + 'static,
    {
        Self::from_parts(
            F::fmap::<X, Existential, _>(effect, Existential::new::<X>),
            move |erased: Existential| continuation(erased.downcast::<X>()),
        )
    }

    pub(crate) fn from_parts<M>(effect: F::Of<Existential>, continuation: M) -> Self
    where
        M: Fn(Existential) -> G::Of<A> + 'static,
    {
        Self::from_shared(effect, Rc::new(continuation))
    }

    const fn from_shared(effect: F::Of<Existential>, continuation: Continuation<G, A>) -> Self {
        Self { effect, continuation }
    }
}

impl<F: TypeConstructor, G: TypeConstructor, A: Value> Clone for Comp<F, G, A> {
    fn clone(&self) -> Self {
        Self::from_shared(self.effect.clone(), Rc::clone(&self.continuation))
    }
}

impl<F: TypeConstructor, G: TypeConstructor, A: Value> fmt::Debug for Comp<F, G, A>
where
    F::Of<Existential>: fmt::Debug,
{
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Comp")
            .field("effect", &self.effect)
            .finish_non_exhaustive()
    }
}

// =============================================================================
// Free Structures
// =============================================================================

/// One or more effects in sequence.
pub struct Free1<F: TypeConstructor, A: Value> {
    program: Program<F>,
    marker: PhantomData<fn() -> A>,
}

/// Zero or more effects in sequence: the free monad.
pub struct Free<F: TypeConstructor, A: Value> {
    program: Program<F>,
    marker: PhantomData<fn() -> A>,
}

/// Brand for [`Free1`].
pub struct Free1K<F>(PhantomData<fn() -> F>);

/// Brand for [`Free`].
pub struct FreeK<F>(PhantomData<fn() -> F>);

impl<F: TypeConstructor> TypeConstructor for Free1K<F> {
    type Of<A: Value> = Free1<F, A>;
}

impl<F: TypeConstructor> TypeConstructor for FreeK<F> {
    type Of<A: Value> = Free<F, A>;
}

impl<F: TypeConstructor, A: Value> Free1<F, A> {
    const fn from_program(program: Program<F>) -> Self {
        Self {
            program,
            marker: PhantomData,
        }
    }

    /// Lifts a single effect.
    #[inline]
    pub fn lift(effect: F::Of<A>) -> Self
    where
        F: Functor,
    {
        Self::from_program(Program::lift::<A>(effect))
    }

    /// Continues every end of the chain with another chain.
    pub fn bind<B: Value, M>(self, function: M) -> Free1<F, B>
    where
        M: Fn(A) -> Free1<F, B> + 'static,
    {
        Free1::from_program(
            self.program
                .then(Arrow::Bind(Rc::new(move |value: Existential| function(value.downcast::<A>()).program))),
        )
    }
}

impl<F: TypeConstructor, A: Value> Free<F, A> {
    const fn from_program(program: Program<F>) -> Self {
        Self {
            program,
            marker: PhantomData,
        }
    }

    /// A program without effects.
    #[inline]
    pub fn pure(value: A) -> Self {
        Self::from_program(Program::Done(Existential::new(value)))
    }

    /// Lifts a single effect.
    #[inline]
    pub fn lift(effect: F::Of<A>) -> Self
    where
        F: Functor,
    {
        Self::from_program(Program::lift::<A>(effect))
    }

    /// Returns `true` if no effects are present.
    #[inline]
    pub const fn is_pure(&self) -> bool {
        matches!(self.program, Program::Done(_))
    }

    /// Continues the program with a function of its result.
    ///
    /// The function is queued behind the program's effects; nothing runs
    /// until the program is collapsed.
    pub fn bind<B: Value, M>(self, function: M) -> Free<F, B>
    where
        M: Fn(A) -> Free<F, B> + 'static,
    {
        Free::from_program(
            self.program
                .then(Arrow::Bind(Rc::new(move |value: Existential| function(value.downcast::<A>()).program))),
        )
    }
}

impl<F: TypeConstructor, A: Value> Clone for Free1<F, A> {
    fn clone(&self) -> Self {
        Self::from_program(self.program.clone())
    }
}

impl<F: TypeConstructor, A: Value> Clone for Free<F, A> {
    fn clone(&self) -> Self {
        Self::from_program(self.program.clone())
    }
}

impl<F: TypeConstructor, A: Value> fmt::Debug for Free1<F, A> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Free1")
            .field("binds", &self.program.binds())
            .finish_non_exhaustive()
    }
}

impl<F: TypeConstructor, A: Value + fmt::Debug> fmt::Debug for Free<F, A> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.program {
            Program::Done(value) => formatter.debug_tuple("Pure").field(&value.clone().downcast::<A>()).finish(),
            Program::Step(..) => formatter
                .debug_struct("Free")
                .field("binds", &self.program.binds())
                .finish_non_exhaustive(),
        }
    }
}

impl<F: TypeConstructor> Functor for Free1K<F> {
    #[inline]
    fn fmap<A: Value, B: Value, M>(value: Free1<F, A>, function: M) -> Free1<F, B>
    where
        M: Fn(A) -> B + 'static,
    {
        Free1::from_program(value.program.then(Arrow::map::<A, B, M>(function)))
    }
}

impl<F: TypeConstructor> Functor for FreeK<F> {
    #[inline]
    fn fmap<A: Value, B: Value, M>(value: Free<F, A>, function: M) -> Free<F, B>
    where
        M: Fn(A) -> B + 'static,
    {
        Free::from_program(value.program.then(Arrow::map::<A, B, M>(function)))
    }
}

impl<F: TypeConstructor> Apply for FreeK<F> {
    fn map2<A: Value, B: Value, C: Value, M>(first: Free<F, A>, second: Free<F, B>, function: M) -> Free<F, C>
    where
        M: Fn(A, B) -> C + 'static,
    {
        let function = Rc::new(function);
        first.bind(move |left: A| {
            let function = Rc::clone(&function);
            Self::fmap::<B, C, _>(second.clone(), move |right: B| function(left.clone(), right))
        })
    }
}

impl<F: TypeConstructor> Applicative for FreeK<F> {
    #[inline]
    fn pure<A: Value>(value: A) -> Free<F, A> {
        Free::pure(value)
    }
}

impl<F: TypeConstructor> Bind for FreeK<F> {
    #[inline]
    fn flat_map<A: Value, B: Value, M>(value: Free<F, A>, function: M) -> Free<F, B>
    where
        M: Fn(A) -> Free<F, B> + 'static,
    {
        value.bind(function)
    }
}

// =============================================================================
// Programs
// =============================================================================

type Mapping = Rc<dyn Fn(Existential) -> Existential>;
type Binding<F> = Rc<dyn Fn(Existential) -> Program<F>>;
type Lower<F, G> = Rc<dyn Fn(<F as TypeConstructor>::Of<Existential>) -> <G as TypeConstructor>::Of<Existential>>;

/// A type-erased function waiting for the previous result.
enum Arrow<F: TypeConstructor> {
    Map(Mapping),
    Bind(Binding<F>),
}

impl<F: TypeConstructor> Arrow<F> {
    fn map<A: Value, B: Value, M>(function: M) -> Self
    where
        M: Fn(A) -> B + 'static,
    {
        Self::Map(Rc::new(move |value: Existential| Existential::new(function(value.downcast::<A>()))))
    }

    const fn is_bind(&self) -> bool {
        matches!(self, Self::Bind(_))
    }

    fn hoist<G: TypeConstructor>(&self, lower: &Lower<F, G>) -> Arrow<G> {
        match self {
            Self::Map(function) => Arrow::Map(Rc::clone(function)),
            Self::Bind(function) => {
                let function = Rc::clone(function);
                let lower = Rc::clone(lower);
                Arrow::Bind(Rc::new(move |value: Existential| function(value).hoist(&lower)))
            }
        }
    }
}

impl<F: TypeConstructor> Clone for Arrow<F> {
    fn clone(&self) -> Self {
        match self {
            Self::Map(function) => Self::Map(Rc::clone(function)),
            Self::Bind(function) => Self::Bind(Rc::clone(function)),
        }
    }
}

/// The arrows still to run.
///
/// `bind` pushes onto `back`, newest first. Resuming a program ahead of
/// the arrows that follow it stacks its arrows onto `front` as a segment,
/// oldest first. Neither walks the arrows already queued.
struct Arrows<F: TypeConstructor> {
    front: PersistentList<PersistentList<Arrow<F>>>,
    back: PersistentList<Arrow<F>>,
    binds: usize,
}

impl<F: TypeConstructor> Arrows<F> {
    const fn new() -> Self {
        Self {
            front: PersistentList::new(),
            back: PersistentList::new(),
            binds: 0,
        }
    }

    fn push(&self, arrow: Arrow<F>) -> Self {
        Self {
            front: self.front.clone(),
            binds: self.binds + usize::from(arrow.is_bind()),
            back: self.back.cons(arrow),
        }
    }

    /// Runs `self` first, then `later`.
    fn then(self, later: Self) -> Self {
        let mut segments: Vec<PersistentList<Arrow<F>>> = self.front.iter().cloned().collect();
        if !self.back.is_empty() {
            segments.push(self.back.reverse());
        }
        let front = segments
            .into_iter()
            .rev()
            .fold(later.front, |rest, segment| rest.cons(segment));
        Self {
            front,
            back: later.back,
            binds: self.binds + later.binds,
        }
    }

    /// Splits off the oldest arrow.
    fn pop(&self) -> Option<(Arrow<F>, Self)> {
        let (segment, front, back) = match self.front.uncons() {
            Some((segment, rest)) => (segment.clone(), rest, self.back.clone()),
            None => (self.back.reverse(), PersistentList::new(), PersistentList::new()),
        };
        let (arrow, remaining) = segment.uncons().map(|(arrow, remaining)| (arrow.clone(), remaining))?;
        let binds = self.binds - usize::from(arrow.is_bind());
        let front = if remaining.is_empty() { front } else { front.cons(remaining) };
        Some((arrow, Self { front, back, binds }))
    }

    fn hoist<G: TypeConstructor>(&self, lower: &Lower<F, G>) -> Arrows<G> {
        Arrows {
            front: self
                .front
                .iter()
                .map(|segment| segment.iter().map(|arrow| arrow.hoist(lower)).collect())
                .collect(),
            back: self.back.iter().map(|arrow| arrow.hoist(lower)).collect(),
            binds: self.binds,
        }
    }
}

impl<F: TypeConstructor> Clone for Arrows<F> {
    fn clone(&self) -> Self {
        Self {
            front: self.front.clone(),
            back: self.back.clone(),
            binds: self.binds,
        }
    }
}

/// The representation behind [`Free`] and [`Free1`]: a finished value, or
/// an effect and the arrows that consume its result.
///
/// A `Free1` is always a `Step`, and its `Bind` arrows only produce
/// `Step`s.
enum Program<F: TypeConstructor> {
    Done(Existential),
    Step(F::Of<Existential>, Arrows<F>),
}

impl<F: TypeConstructor> Program<F> {
    fn lift<A: Value>(effect: F::Of<A>) -> Self
    where
        F: Functor,
    {
        Self::Step(F::fmap::<A, Existential, _>(effect, Existential::new::<A>), Arrows::new())
    }

    const fn binds(&self) -> usize {
        match self {
            Self::Done(_) => 0,
            Self::Step(_, arrows) => arrows.binds,
        }
    }

    fn then(self, arrow: Arrow<F>) -> Self {
        match (self, arrow) {
            (Self::Done(value), Arrow::Map(function)) => Self::Done(function(value)),
            (Self::Done(value), Arrow::Bind(function)) => function(value),
            (Self::Step(effect, arrows), arrow) => Self::Step(effect, arrows.push(arrow)),
        }
    }

    /// Feeds `value` through `arrows` until an arrow yields an effect.
    fn resume(value: Existential, arrows: Arrows<F>) -> Self {
        let mut value = value;
        let mut arrows = arrows;
        while let Some((arrow, rest)) = arrows.pop() {
            match arrow {
                Arrow::Map(function) => value = function(value),
                Arrow::Bind(function) => match function(value) {
                    Self::Done(next) => value = next,
                    Self::Step(effect, more) => return Self::Step(effect, more.then(rest)),
                },
            }
            arrows = rest;
        }
        Self::Done(value)
    }

    /// Turns the effect after the current one into a continuation.
    fn continuation(arrows: Arrows<F>) -> impl Fn(Existential) -> Self + 'static {
        move |value: Existential| Self::resume(value, arrows.clone())
    }

    fn hoist<G: TypeConstructor>(self, lower: &Lower<F, G>) -> Program<G> {
        match self {
            Self::Done(value) => Program::Done(value),
            Self::Step(effect, arrows) => Program::Step(lower(effect), arrows.hoist(lower)),
        }
    }
}

impl<F: TypeConstructor> Clone for Program<F> {
    fn clone(&self) -> Self {
        match self {
            Self::Done(value) => Self::Done(value.clone()),
            Self::Step(effect, arrows) => Self::Step(effect.clone(), arrows.clone()),
        }
    }
}

/// A suspended program, resumed by `tail_rec_m`.
type Resumable<F> = (Existential, Arrows<F>);

/// Runs a free monad in `M`, one effect per step of [`Bind::tail_rec_m`].
fn run_possibly<M: Monad, A: Value>(program: Program<M>) -> M::Of<A> {
    let step = |(value, arrows): Resumable<M>| match Program::resume(value, arrows) {
        Program::Done(result) => Either::Right(M::pure::<A>(result.downcast::<A>())),
        Program::Step(effect, rest) => {
            Either::Left(M::fmap::<Existential, Resumable<M>, _>(effect, move |next| (next, rest.clone())))
        }
    };
    match program {
        Program::Done(result) => M::pure::<A>(result.downcast::<A>()),
        Program::Step(effect, arrows) => M::flat_map::<Existential, A, _>(effect, move |value| {
            M::tail_rec_m::<Resumable<M>, A, _>((value, arrows.clone()), step)
        }),
    }
}

/// Runs a free semigroup in `M`; the last effect is mapped instead of bound.
fn run_non_empty<M: Bind, A: Value>(program: Program<M>) -> M::Of<A> {
    let step = |(value, arrows): Resumable<M>| match Program::resume(value, arrows) {
        Program::Step(effect, rest) => settle::<M, A>(effect, rest),
        Program::Done(_) => unreachable!("a free semigroup ends in an effect"),
    };
    let Program::Step(effect, arrows) = program else {
        unreachable!("a free semigroup holds at least one effect");
    };
    match settle::<M, A>(effect, arrows) {
        Either::Left(states) => {
            M::flat_map::<Resumable<M>, A, _>(states, move |state| M::tail_rec_m::<Resumable<M>, A, _>(state, step))
        }
        Either::Right(last) => last,
    }
}

fn settle<M: Bind, A: Value>(effect: M::Of<Existential>, arrows: Arrows<M>) -> Either<M::Of<Resumable<M>>, M::Of<A>> {
    if arrows.binds == 0 {
        Either::Right(M::fmap::<Existential, A, _>(effect, move |value| finish::<M, A>(value, arrows.clone())))
    } else {
        Either::Left(M::fmap::<Existential, Resumable<M>, _>(effect, move |value| (value, arrows.clone())))
    }
}

/// Applies the maps left once no bind remains.
fn finish<F: TypeConstructor, A: Value>(value: Existential, arrows: Arrows<F>) -> A {
    match Program::<F>::resume(value, arrows) {
        Program::Done(result) => result.downcast::<A>(),
        Program::Step(..) => unreachable!("only maps remain"),
    }
}

fn lower_with<G: TypeConstructor, F: TypeConstructor, N: NaturalTransformation<G, F>>(transformation: N) -> Lower<G, F> {
    Rc::new(move |effect: G::Of<Existential>| transformation.transform::<Existential>(effect))
}

// =============================================================================
// Combinator Hierarchy
// =============================================================================

impl HBifunctor for CompT {
    type Of<F: TypeConstructor, G: TypeConstructor, A: Value> = Comp<F, G, A>;

    fn hbimap<F, G, J, L, A, N, M>(value: Comp<F, G, A>, left: N, right: M) -> Comp<J, L, A>
    where
        F: TypeConstructor,
        G: TypeConstructor,
        J: TypeConstructor,
        L: TypeConstructor,
        A: Value,
        N: NaturalTransformation<F, J>,
        M: NaturalTransformation<G, L>,
    {
        let Comp { effect, continuation } = value;
        Comp::from_parts(
            <N as NaturalTransformation<F, J>>::transform::<Existential>(&left, effect),
            move |erased| <M as NaturalTransformation<G, L>>::transform::<A>(&right, continuation(erased)),
        )
    }

    fn hfmap<F, G, A, B, M>(value: Comp<F, G, A>, function: M) -> Comp<F, G, B>
    where
        F: Functor,
        G: Functor,
        A: Value,
        B: Value,
        M: Fn(A) -> B + 'static,
    {
        let Comp { effect, continuation } = value;
        let function = Rc::new(function);
        Comp::from_parts(effect, move |erased| {
            let function = Rc::clone(&function);
            G::fmap::<A, B, _>(continuation(erased), move |result| function(result))
        })
    }
}

impl Associative for CompT {
    fn associate<F, G, H, A>(value: Comp<F, Applied<Self, G, H>, A>) -> Comp<Applied<Self, F, G>, H, A>
    where
        F: Functor,
        G: Functor,
        H: Functor,
        A: Value,
    {
        let Comp { effect, continuation } = value;
        let paired = Comp::<F, G, Existential>::from_parts(effect, move |first: Existential| {
            let Comp { effect: middle, continuation: rest } = continuation(first);
            G::fmap::<Existential, Existential, _>(middle, move |second| Existential::new((second, Rc::clone(&rest))))
        });
        Comp::from_parts(paired, |pair: Existential| {
            let (second, rest) = pair.downcast::<(Existential, Continuation<H, A>)>();
            rest(second)
        })
    }

    fn disassociate<F, G, H, A>(value: Comp<Applied<Self, F, G>, H, A>) -> Comp<F, Applied<Self, G, H>, A>
    where
        F: Functor,
        G: Functor,
        H: Functor,
        A: Value,
    {
        let Comp { effect: inner, continuation: last } = value;
        let Comp { effect: first, continuation: middle } = inner;
        Comp::from_parts(first, move |erased| Comp::<G, H, A>::from_shared(middle(erased), Rc::clone(&last)))
    }
}

impl Tensor for CompT {
    type Identity = IdentityK;

    #[inline]
    fn intro1<F: Functor, A: Value>(value: F::Of<A>) -> Comp<F, IdentityK, A> {
        Comp::new::<A, _>(value, Identity)
    }

    #[inline]
    fn intro2<G: Functor, A: Value>(value: G::Of<A>) -> Comp<IdentityK, G, A> {
        Comp::from_parts(Identity(Existential::new(())), move |_| value.clone())
    }

    fn elim1<F: Functor, A: Value>(value: Comp<F, IdentityK, A>) -> F::Of<A> {
        let Comp { effect, continuation } = value;
        F::fmap::<Existential, A, _>(effect, move |erased| continuation(erased).into_inner())
    }

    fn elim2<G: Functor, A: Value>(value: Comp<IdentityK, G, A>) -> G::Of<A> {
        let Comp { effect, continuation } = value;
        continuation(effect.into_inner())
    }
}

impl Semigroupoidal for CompT {
    type NonEmpty<F: TypeConstructor> = Free1K<F>;

    #[inline]
    fn append_sf<F: Functor, A: Value>(value: Comp<Free1K<F>, Free1K<F>, A>) -> Free1<F, A> {
        let Comp { effect, continuation } = value;
        effect.bind(move |erased: Existential| continuation(erased))
    }

    fn match_sf<F: Functor, A: Value>(value: Free1<F, A>) -> Either<F::Of<A>, Comp<F, Free1K<F>, A>> {
        let Program::Step(effect, arrows) = value.program else {
            unreachable!("a free semigroup holds at least one effect");
        };
        if arrows.binds == 0 {
            Either::Left(F::fmap::<Existential, A, _>(effect, move |result| finish::<F, A>(result, arrows.clone())))
        } else {
            let resume = Program::continuation(arrows);
            Either::Right(Comp::from_parts(effect, move |result| Free1::from_program(resume(result))))
        }
    }

    #[inline]
    fn inject_sf<F: Functor, A: Value>(value: F::Of<A>) -> Free1<F, A> {
        Free1::lift(value)
    }

    fn retract_sf<F: SemigroupIn<Self>, A: Value>(value: Free1<F, A>) -> F::Of<A> {
        <F as SemigroupIn<Self>>::retract_non_empty::<A>(value)
    }

    fn interpret_sf<G, F, A, N>(transformation: N, value: Free1<G, A>) -> F::Of<A>
    where
        G: Functor,
        F: SemigroupIn<Self>,
        A: Value,
        N: NaturalTransformation<G, F>,
    {
        let lowered = Free1::from_program(value.program.hoist(&lower_with::<G, F, N>(transformation)));
        <F as SemigroupIn<Self>>::retract_non_empty::<A>(lowered)
    }
}

impl Monoidal for CompT {
    type Possibly<F: TypeConstructor> = FreeK<F>;

    #[inline]
    fn append_mf<F: Functor, A: Value>(value: Comp<FreeK<F>, FreeK<F>, A>) -> Free<F, A> {
        let Comp { effect, continuation } = value;
        effect.bind(move |erased: Existential| continuation(erased))
    }

    fn splitting_mf<F: Functor, A: Value>(value: Free<F, A>) -> Either<Identity<A>, Comp<F, FreeK<F>, A>> {
        match value.program {
            Program::Done(result) => Either::Left(Identity(result.downcast::<A>())),
            Program::Step(effect, arrows) => {
                let resume = Program::continuation(arrows);
                Either::Right(Comp::from_parts(effect, move |result| Free::from_program(resume(result))))
            }
        }
    }

    fn unsplitting_mf<F: Functor, A: Value>(value: Either<Identity<A>, Comp<F, FreeK<F>, A>>) -> Free<F, A> {
        match value {
            Either::Left(Identity(result)) => Free::pure(result),
            Either::Right(Comp { effect, continuation }) => Free::from_program(Program::Step(
                effect,
                Arrows::new().push(Arrow::Bind(Rc::new(move |result: Existential| continuation(result).program))),
            )),
        }
    }

    fn split_sf<F: Functor, A: Value>(value: Free1<F, A>) -> Comp<F, FreeK<F>, A> {
        let Program::Step(effect, arrows) = value.program else {
            unreachable!("a free semigroup holds at least one effect");
        };
        let resume = Program::continuation(arrows);
        Comp::from_parts(effect, move |result| Free::from_program(resume(result)))
    }

    #[inline]
    fn from_sf<F: Functor, A: Value>(value: Free1<F, A>) -> Free<F, A> {
        Free::from_program(value.program)
    }

    fn retract_mf<F: MonoidIn<Self>, A: Value>(value: Free<F, A>) -> F::Of<A> {
        <F as MonoidIn<Self>>::retract_possibly::<A>(value)
    }

    fn interpret_mf<G, F, A, N>(transformation: N, value: Free<G, A>) -> F::Of<A>
    where
        G: Functor,
        F: MonoidIn<Self>,
        A: Value,
        N: NaturalTransformation<G, F>,
    {
        let lowered = Free::from_program(value.program.hoist(&lower_with::<G, F, N>(transformation)));
        <F as MonoidIn<Self>>::retract_possibly::<A>(lowered)
    }
}

// =============================================================================
// Capabilities
// =============================================================================

/// A monad collapses a composition by binding the continuation.
impl<F: Bind> SemigroupIn<CompT> for F {
    fn biretract<A: Value>(value: Comp<F, F, A>) -> F::Of<A> {
        let Comp { effect, continuation } = value;
        F::flat_map::<Existential, A, _>(effect, move |erased| continuation(erased))
    }

    #[inline]
    fn retract_non_empty<A: Value>(value: Free1<F, A>) -> F::Of<A> {
        run_non_empty::<F, A>(value.program)
    }
}

impl<F: Monad> MonoidIn<CompT> for F {
    #[inline]
    fn pure_t<A: Value>(value: Identity<A>) -> F::Of<A> {
        F::pure::<A>(value.into_inner())
    }

    #[inline]
    fn retract_possibly<A: Value>(value: Free<F, A>) -> F::Of<A> {
        run_possibly::<F, A>(value.program)
    }
}

/// The composition of two functors is a functor.
pub type CompOf<F, G> = Applied<CompT, F, G>;

static_assertions::assert_not_impl_any!(Comp<crate::typeclass::OptionK, crate::typeclass::OptionK, i32>: Send, Sync);
static_assertions::assert_not_impl_any!(Free<crate::typeclass::OptionK, i32>: Send, Sync);
