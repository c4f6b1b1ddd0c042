//! Identity constructors of the tensors.
//!
//! Each tensor has a constructor that acts as its unit:
//!
//! - [`Identity`]: wraps exactly one value (unit of `DayT` and `CompT`)
//! - [`Proxy`]: carries no value at all (unit of `ProductT`)
//! - [`Void`]: can never be built (unit of `SumT`)

use std::convert::Infallible;
use std::fmt;
use std::marker::PhantomData;

use super::functor::Functor;
use super::higher::{TypeConstructor, Value};

// =============================================================================
// Identity
// =============================================================================

/// The identity functor - wraps a value without adding any behavior.
///
/// # Examples
///
/// ```rust
/// use combinars::typeclass::Identity;
///
/// let wrapped = Identity::new(42);
/// assert_eq!(wrapped.into_inner(), 42);
///
/// // Using the tuple-struct syntax
/// let wrapped = Identity(42);
/// assert_eq!(wrapped.0, 42);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Identity<A>(pub A);

impl<A> Identity<A> {
    /// Creates a new `Identity` wrapping the given value.
    #[inline]
    pub const fn new(value: A) -> Self {
        Self(value)
    }

    /// Consumes the `Identity` and returns the inner value.
    #[inline]
    pub fn into_inner(self) -> A {
        self.0
    }

    /// Returns a reference to the inner value.
    #[inline]
    pub const fn as_inner(&self) -> &A {
        &self.0
    }
}

impl<A> From<A> for Identity<A> {
    fn from(value: A) -> Self {
        Self::new(value)
    }
}

/// Brand for [`Identity`].
#[derive(Debug)]
pub enum IdentityK {}

impl TypeConstructor for IdentityK {
    type Of<A: Value> = Identity<A>;
}

impl Functor for IdentityK {
    #[inline]
    fn fmap<A: Value, B: Value, M>(value: Identity<A>, function: M) -> Identity<B>
    where
        M: Fn(A) -> B + 'static,
    {
        Identity(function(value.0))
    }
}

// =============================================================================
// Proxy
// =============================================================================

/// A constructor that carries no payload.
///
/// Pairing any effect with a `Proxy` adds nothing, which makes it the unit
/// of the product tensor.
///
/// # Examples
///
/// ```rust
/// use combinars::typeclass::Proxy;
///
/// let proxy: Proxy<i32> = Proxy::new();
/// assert_eq!(proxy, Proxy::new());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Proxy<A>(PhantomData<fn() -> A>);

impl<A> Proxy<A> {
    /// Creates the only value of `Proxy<A>`.
    #[inline]
    pub const fn new() -> Self {
        Self(PhantomData)
    }

    /// Changes the phantom payload type.
    #[inline]
    pub fn retag<B>(self) -> Proxy<B> {
        Proxy(PhantomData)
    }
}

impl<A> Default for Proxy<A> {
    fn default() -> Self {
        Self::new()
    }
}

/// Brand for [`Proxy`].
#[derive(Debug)]
pub enum ProxyK {}

impl TypeConstructor for ProxyK {
    type Of<A: Value> = Proxy<A>;
}

impl Functor for ProxyK {
    #[inline]
    fn fmap<A: Value, B: Value, M>(value: Proxy<A>, _function: M) -> Proxy<B>
    where
        M: Fn(A) -> B + 'static,
    {
        value.retag()
    }
}

// =============================================================================
// Void
// =============================================================================

/// A constructor with no values.
///
/// Since a `Void` can never be built, the alternative it represents in a sum
/// can never be chosen. Any function may consume one through [`Void::absurd`].
pub struct Void<A>(Infallible, PhantomData<fn() -> A>);

impl<A> Void<A> {
    /// Eliminates an impossible value into any type.
    #[inline]
    pub fn absurd<B>(self) -> B {
        match self.0 {}
    }

    /// Changes the phantom payload type.
    #[inline]
    pub fn retag<B>(self) -> Void<B> {
        self.absurd()
    }
}

impl<A> Clone for Void<A> {
    fn clone(&self) -> Self {
        let never = self.0;
        match never {}
    }
}

impl<A> PartialEq for Void<A> {
    fn eq(&self, _other: &Self) -> bool {
        let never = self.0;
        match never {}
    }
}

impl<A> Eq for Void<A> {}

impl<A> fmt::Debug for Void<A> {
    fn fmt(&self, _formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let never = self.0;
        match never {}
    }
}

/// Brand for [`Void`].
#[derive(Debug)]
pub enum VoidK {}

impl TypeConstructor for VoidK {
    type Of<A: Value> = Void<A>;
}

impl Functor for VoidK {
    #[inline]
    fn fmap<A: Value, B: Value, M>(value: Void<A>, _function: M) -> Void<B>
    where
        M: Fn(A) -> B + 'static,
    {
        value.retag()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0)]
    #[case(42)]
    #[case(-7)]
    fn identity_fmap_applies_function(#[case] value: i32) {
        assert_eq!(IdentityK::fmap(Identity(value), |n: i32| n * 3), Identity(value * 3));
    }

    #[test]
    fn identity_into_inner_unwraps() {
        let wrapped = Identity::new(String::from("hello"));
        assert_eq!(wrapped.as_inner(), "hello");
        assert_eq!(wrapped.into_inner(), "hello");
    }

    #[test]
    fn identity_from_value() {
        let wrapped: Identity<i32> = 5.into();
        assert_eq!(wrapped, Identity(5));
    }

    #[test]
    fn proxy_fmap_changes_only_the_type() {
        let proxy: Proxy<i32> = Proxy::new();
        let mapped: Proxy<String> = ProxyK::fmap(proxy, |n: i32| n.to_string());
        assert_eq!(mapped, Proxy::default());
    }

    #[test]
    fn void_option_is_always_none() {
        let nothing: Option<Void<i32>> = None;
        let mapped: Option<Void<String>> = nothing.map(|never| VoidK::fmap(never, |n: i32| n.to_string()));
        assert!(mapped.is_none());
    }

    #[test]
    fn void_eliminates_inside_result() {
        let result: Result<i32, Void<i32>> = Ok(3);
        let value = result.unwrap_or_else(Void::absurd);
        assert_eq!(value, 3);
    }
}
