//! Matchable combinators.
//!
//! For a [`Matchable`] combinator the free monoid can be inspected
//! structurally: it is either the tensor identity or a non-empty aggregate,
//! and this split is decided by the shape of the value alone.
//!
//! # Laws
//!
//! ```text
//! split_sf(unsplit_sf(x)) == x
//! unsplit_sf(split_sf(y)) == y
//! match_mf(nil_mf(i))     == Left(i)
//! match_mf(from_sf(s))    == Right(s)
//! ```
//!
//! Sequential composition is not matchable: whether a `Free` continues after
//! its first effect is only known once the continuation runs.

use super::functor::Functor;
use super::higher::Value;
use super::monoidal::{IdentityOf, Monoidal, PossiblyOf};
use super::semigroupoidal::NonEmptyOf;
use crate::control::Either;

/// A monoidal combinator whose free monoid splits into identity or non-empty.
pub trait Matchable: Monoidal {
    /// Inverse of [`Monoidal::split_sf`].
    fn unsplit_sf<F: Functor, A: Value>(value: Self::Of<F, Self::Possibly<F>, A>) -> NonEmptyOf<Self, F, A>;

    /// Decides whether a free monoid is empty.
    fn match_mf<F: Functor, A: Value>(
        value: PossiblyOf<Self, F, A>,
    ) -> Either<IdentityOf<Self, A>, NonEmptyOf<Self, F, A>>;
}
