//! Shared fixtures for the integration tests.
//!
//! [`LoggedK`] is a writer-like effect: every value carries the list of
//! labels of the effects that produced it. Collapsing an aggregate into it
//! reveals the order in which the aggregate runs its effects.

#![allow(dead_code)]

use combinars::control::Either;
use combinars::typeclass::{Applicative, Apply, Bind, Functor, TypeConstructor, Value};

/// A value together with the labels of the effects that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Logged<A> {
    pub log: Vec<&'static str>,
    pub value: A,
}

/// Brand for [`Logged`].
pub enum LoggedK {}

impl TypeConstructor for LoggedK {
    type Of<A: Value> = Logged<A>;
}

impl Functor for LoggedK {
    fn fmap<A: Value, B: Value, M>(value: Logged<A>, function: M) -> Logged<B>
    where
        M: Fn(A) -> B + 'static,
    {
        Logged {
            log: value.log,
            value: function(value.value),
        }
    }
}

impl Apply for LoggedK {
    fn map2<A: Value, B: Value, C: Value, M>(first: Logged<A>, second: Logged<B>, function: M) -> Logged<C>
    where
        M: Fn(A, B) -> C + 'static,
    {
        let mut log = first.log;
        log.extend(second.log);
        Logged {
            log,
            value: function(first.value, second.value),
        }
    }
}

impl Applicative for LoggedK {
    fn pure<A: Value>(value: A) -> Logged<A> {
        Logged { log: Vec::new(), value }
    }
}

impl Bind for LoggedK {
    fn flat_map<A: Value, B: Value, M>(value: Logged<A>, function: M) -> Logged<B>
    where
        M: Fn(A) -> Logged<B> + 'static,
    {
        let next = function(value.value);
        let mut log = value.log;
        log.extend(next.log);
        Logged { log, value: next.value }
    }

    fn tail_rec_m<S: Value, B: Value, M>(initial: S, step: M) -> Logged<B>
    where
        M: Fn(S) -> Either<Logged<S>, Logged<B>> + 'static,
    {
        let mut log = Vec::new();
        let mut state = initial;
        loop {
            match step(state) {
                Either::Left(next) => {
                    log.extend(next.log);
                    state = next.value;
                }
                Either::Right(done) => {
                    log.extend(done.log);
                    return Logged { log, value: done.value };
                }
            }
        }
    }
}

/// An effect labelled `label` producing `value`.
pub fn tell<A>(label: &'static str, value: A) -> Logged<A> {
    Logged {
        log: vec![label],
        value,
    }
}
