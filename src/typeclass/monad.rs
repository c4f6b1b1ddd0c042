//! Bind and Monad type classes - sequencing dependent effects.
//!
//! A [`Bind`] constructor can run an effect and choose the next effect from
//! its result. This is what collapsing sequential composition needs: the
//! continuation stored inside a `Comp` is exactly the argument of
//! [`Bind::flat_map`].
//!
//! # Laws
//!
//! ## Left Identity
//!
//! ```text
//! flat_map(pure(a), f) == f(a)
//! ```
//!
//! ## Right Identity
//!
//! ```text
//! flat_map(m, pure) == m
//! ```
//!
//! ## Associativity
//!
//! ```text
//! flat_map(flat_map(m, f), g) == flat_map(m, |x| flat_map(f(x), g))
//! ```
//!
//! # Examples
//!
//! ```rust
//! use combinars::typeclass::{Bind, OptionK};
//!
//! let half = |n: i32| if n % 2 == 0 { Some(n / 2) } else { None };
//! assert_eq!(OptionK::flat_map(Some(8), half), Some(4));
//! assert_eq!(OptionK::flat_map(Some(3), half), None);
//! ```
//!
//! # Stack Safety
//!
//! [`Bind::tail_rec_m`] loops over a step function without growing the
//! native stack for every brand in this crate. Collapsing long sequential
//! compositions goes through it.

use std::rc::Rc;

use super::applicative::{Applicative, Apply};
use super::higher::{OptionK, TypeConstructor, Value, VecK};
use super::identity::{Identity, IdentityK};
use crate::control::Either;

/// An `Apply` whose second effect may depend on the first result.
pub trait Bind: Apply {
    /// Runs `value`, then the effect chosen by `function`.
    fn flat_map<A: Value, B: Value, M>(value: Self::Of<A>, function: M) -> Self::Of<B>
    where
        M: Fn(A) -> Self::Of<B> + 'static;

    /// Collapses one level of nesting.
    #[inline]
    fn flatten<A: Value>(value: Self::Of<Self::Of<A>>) -> Self::Of<A> {
        Self::flat_map::<Self::Of<A>, A, _>(value, |inner| inner)
    }

    /// Repeats `step` until it yields a final effect.
    ///
    /// `Left` continues with the states produced by an effect, `Right` ends
    /// that branch. Equivalent to
    ///
    /// ```text
    /// tail_rec_m(s, step) == match step(s) {
    ///     Left(next) => flat_map(next, |s| tail_rec_m(s, step)),
    ///     Right(done) => done,
    /// }
    /// ```
    ///
    /// The default follows this definition literally; brands whose
    /// `flat_map` runs the function eagerly override it with a loop.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use combinars::control::Either;
    /// use combinars::typeclass::{Bind, OptionK};
    ///
    /// let counted = OptionK::tail_rec_m::<u32, u32, _>(0, |n| {
    ///     if n < 100_000 { Either::Left(Some(n + 1)) } else { Either::Right(Some(n)) }
    /// });
    /// assert_eq!(counted, Some(100_000));
    /// ```
    fn tail_rec_m<S: Value, B: Value, M>(initial: S, step: M) -> Self::Of<B>
    where
        M: Fn(S) -> Either<Self::Of<S>, Self::Of<B>> + 'static,
    {
        recurse::<Self, S, B>(initial, Rc::new(step))
    }
}

type Step<F, S, B> = Rc<dyn Fn(S) -> Either<<F as TypeConstructor>::Of<S>, <F as TypeConstructor>::Of<B>>>;

fn recurse<F: Bind, S: Value, B: Value>(state: S, step: Step<F, S, B>) -> F::Of<B> {
    match step(state) {
        Either::Left(next) => F::flat_map::<S, B, _>(next, move |state| recurse::<F, S, B>(state, Rc::clone(&step))),
        Either::Right(done) => done,
    }
}

/// A `Bind` that is also `Applicative`.
///
/// Blanket-implemented; never implement it by hand.
pub trait Monad: Applicative + Bind {}

impl<F: Applicative + Bind> Monad for F {}

impl Bind for OptionK {
    #[inline]
    fn flat_map<A: Value, B: Value, M>(value: Option<A>, function: M) -> Option<B>
    where
        M: Fn(A) -> Option<B> + 'static,
    {
        value.and_then(function)
    }

    fn tail_rec_m<S: Value, B: Value, M>(initial: S, step: M) -> Option<B>
    where
        M: Fn(S) -> Either<Option<S>, Option<B>> + 'static,
    {
        let mut state = initial;
        loop {
            match step(state) {
                Either::Left(next) => state = next?,
                Either::Right(done) => return done,
            }
        }
    }
}

impl Bind for VecK {
    #[inline]
    fn flat_map<A: Value, B: Value, M>(value: Vec<A>, function: M) -> Vec<B>
    where
        M: Fn(A) -> Vec<B> + 'static,
    {
        value.into_iter().flat_map(function).collect()
    }

    fn tail_rec_m<S: Value, B: Value, M>(initial: S, step: M) -> Vec<B>
    where
        M: Fn(S) -> Either<Vec<S>, Vec<B>> + 'static,
    {
        let mut results = Vec::new();
        let mut frontier = vec![vec![initial].into_iter()];
        while let Some(states) = frontier.last_mut() {
            match states.next().map(&step) {
                Some(Either::Left(next)) => frontier.push(next.into_iter()),
                Some(Either::Right(done)) => results.extend(done),
                None => {
                    frontier.pop();
                }
            }
        }
        results
    }
}

impl Bind for IdentityK {
    #[inline]
    fn flat_map<A: Value, B: Value, M>(value: Identity<A>, function: M) -> Identity<B>
    where
        M: Fn(A) -> Identity<B> + 'static,
    {
        function(value.0)
    }

    fn tail_rec_m<S: Value, B: Value, M>(initial: S, step: M) -> Identity<B>
    where
        M: Fn(S) -> Either<Identity<S>, Identity<B>> + 'static,
    {
        let mut state = initial;
        loop {
            match step(state) {
                Either::Left(Identity(next)) => state = next,
                Either::Right(done) => return done,
            }
        }
    }
}
