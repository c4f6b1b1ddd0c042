//! Associative combinators.
//!
//! An [`Associative`] combinator can regroup a nested application:
//! `T<F, T<G, H>>` and `T<T<F, G>, H>` are isomorphic. This is what makes
//! repeated application of a combinator well defined regardless of how the
//! applications are bracketed.
//!
//! # Laws
//!
//! ```text
//! disassociate(associate(x)) == x
//! associate(disassociate(y)) == y
//! ```
//!
//! The order of effects is preserved in both directions: regrouping never
//! reorders `F`, `G` and `H`.

use super::functor::Functor;
use super::hbifunctor::{Applied, HBifunctor};
use super::higher::Value;

/// An `HBifunctor` whose nested applications can be regrouped.
///
/// Regrouping requires the three constructors to be functors: combinators
/// that hide an intermediate result (Day convolution, composition) have to
/// map over one side to thread it through.
pub trait Associative: HBifunctor {
    /// Regroups `T<F, T<G, H>>` into `T<T<F, G>, H>`.
    fn associate<F, G, H, A>(value: Self::Of<F, Applied<Self, G, H>, A>) -> Self::Of<Applied<Self, F, G>, H, A>
    where
        F: Functor,
        G: Functor,
        H: Functor,
        A: Value;

    /// Regroups `T<T<F, G>, H>` into `T<F, T<G, H>>`.
    fn disassociate<F, G, H, A>(value: Self::Of<Applied<Self, F, G>, H, A>) -> Self::Of<F, Applied<Self, G, H>, A>
    where
        F: Functor,
        G: Functor,
        H: Functor,
        A: Value;
}
