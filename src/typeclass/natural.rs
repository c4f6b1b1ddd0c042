//! Natural transformations between effect constructors.
//!
//! A natural transformation converts `F<A>` into `G<A>` for every payload
//! type `A` at once, without looking at the payload. It is the argument type
//! of every higher-order operation in this crate: mapping one side of a
//! combinator, interpreting an aggregate into a target effect, folding a
//! recursive chain.
//!
//! Rust closures cannot be polymorphic in a type parameter, so a natural
//! transformation is a value implementing [`NaturalTransformation`].
//!
//! # Laws
//!
//! For every `F`-structure `fa` and every function `f`:
//!
//! ```text
//! G::fmap(n.transform(fa), f) == n.transform(F::fmap(fa, f))
//! ```
//!
//! # Examples
//!
//! ```rust
//! use combinars::typeclass::{NaturalTransformation, OptionK, Value, VecK};
//!
//! struct OptionToVec;
//!
//! impl NaturalTransformation<OptionK, VecK> for OptionToVec {
//!     fn transform<A: Value>(&self, value: Option<A>) -> Vec<A> {
//!         value.into_iter().collect()
//!     }
//! }
//!
//! assert_eq!(OptionToVec.transform(Some(3)), vec![3]);
//! ```

use std::rc::Rc;

use super::higher::{TypeConstructor, Value};

/// A payload-agnostic conversion from `F` to `G`.
pub trait NaturalTransformation<F: TypeConstructor, G: TypeConstructor>: 'static {
    /// Converts one `F`-structure into a `G`-structure with the same payload.
    fn transform<A: Value>(&self, value: F::Of<A>) -> G::Of<A>;
}

/// The transformation that returns its input unchanged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IdentityTransformation;

impl<F: TypeConstructor> NaturalTransformation<F, F> for IdentityTransformation {
    #[inline]
    fn transform<A: Value>(&self, value: F::Of<A>) -> F::Of<A> {
        value
    }
}

impl<F, G, N> NaturalTransformation<F, G> for Rc<N>
where
    F: TypeConstructor,
    G: TypeConstructor,
    N: NaturalTransformation<F, G>,
{
    #[inline]
    fn transform<A: Value>(&self, value: F::Of<A>) -> G::Of<A> {
        <N as NaturalTransformation<F, G>>::transform::<A>(self, value)
    }
}
