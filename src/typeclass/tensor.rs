//! Tensors: associative combinators with an identity constructor.
//!
//! A [`Tensor`] has a constructor `I` such that combining any functor with
//! `I`, on either side, adds nothing: `T<F, I>` and `T<I, G>` are
//! isomorphic to `F` and `G`.
//!
//! # Laws
//!
//! ```text
//! elim1(intro1(x)) == x
//! elim2(intro2(y)) == y
//! ```

use super::associative::Associative;
use super::functor::Functor;
use super::higher::Value;

/// An associative combinator with an identity constructor.
pub trait Tensor: Associative {
    /// The identity constructor of this tensor.
    type Identity: Functor;

    /// Pairs an `F` with the identity on the right.
    fn intro1<F: Functor, A: Value>(value: F::Of<A>) -> Self::Of<F, Self::Identity, A>;

    /// Pairs a `G` with the identity on the left.
    fn intro2<G: Functor, A: Value>(value: G::Of<A>) -> Self::Of<Self::Identity, G, A>;

    /// Removes a right identity.
    fn elim1<F: Functor, A: Value>(value: Self::Of<F, Self::Identity, A>) -> F::Of<A>;

    /// Removes a left identity.
    fn elim2<G: Functor, A: Value>(value: Self::Of<Self::Identity, G, A>) -> G::Of<A>;
}
