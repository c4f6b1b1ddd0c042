//! Type class traits for composing effect constructors.
//!
//! This module provides two layers of traits.
//!
//! ## Unary Capabilities
//!
//! Traits implemented by brands of single effect constructors:
//!
//! - [`TypeConstructor`]: brand-based emulation of higher-kinded types
//! - [`Functor`]: mapping over the payload
//! - [`Apply`] / [`Applicative`]: combining independent effects
//! - [`Bind`] / [`Monad`]: sequencing dependent effects
//! - [`Alt`] / [`Alternative`]: choosing between effects
//! - [`NaturalTransformation`]: payload-agnostic conversion between brands
//!
//! ## Binary Combinators
//!
//! The hierarchy of traits implemented by combinator brands:
//!
//! ```text
//! HBifunctor
//!   └── Associative
//!         ├── Tensor ─────────────┐
//!         └── Semigroupoidal ─────┴── Monoidal ── Matchable
//! ```
//!
//! Plus the capability relation between a functor and a combinator:
//! [`SemigroupIn`] (can collapse `T<F, F>`) and [`MonoidIn`] (can also lift
//! the tensor identity).
//!
//! ## Identity Constructors
//!
//! - [`Identity`]: exactly one value
//! - [`Proxy`]: no payload
//! - [`Void`]: no values at all
//!
//! # Examples
//!
//! ```rust
//! use combinars::typeclass::{Applicative, Apply, Functor, OptionK};
//!
//! let x: Option<i32> = OptionK::pure(42);
//! let y = OptionK::fmap(x, |n: i32| n + 1);
//! assert_eq!(OptionK::map2(y, Some(2), |a: i32, b: i32| a * b), Some(86));
//! ```

mod alternative;
mod applicative;
mod associative;
mod functor;
mod hbifunctor;
mod higher;
mod identity;
mod layered;
mod matchable;
mod monad;
mod monoidal;
mod natural;
mod semigroupoidal;
mod tensor;

pub use alternative::{Alt, Alternative};
pub use applicative::{Applicative, Apply};
pub use associative::Associative;
pub use functor::Functor;
pub use hbifunctor::{Applied, HBifunctor};
pub use higher::{OptionK, TypeConstructor, Value, VecK};
pub use identity::{Identity, IdentityK, Proxy, ProxyK, Void, VoidK};
pub(crate) use layered::{collapse, release, Layers};
pub use matchable::Matchable;
pub use monad::{Bind, Monad};
pub use monoidal::{
    IdentityOf, InjectPossibly, MonoidIn, Monoidal, PossiblyOf, PureIdentity, RetractPossibly,
};
pub use natural::{IdentityTransformation, NaturalTransformation};
pub use semigroupoidal::{
    Biretract, InjectNonEmpty, NonEmptyOf, RetractNonEmpty, SemigroupIn, Semigroupoidal,
};
pub use tensor::Tensor;
