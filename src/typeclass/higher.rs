//! Higher-Kinded Type emulation through brands and Generic Associated Types.
//!
//! This module provides the foundation for abstracting over effect
//! constructors such as `Option<_>` and `Vec<_>`. Rust has no native
//! Higher-Kinded Types, so every constructor is represented by a *brand*: an
//! uninhabited marker type whose [`TypeConstructor::Of`] associated type
//! applies the constructor to a payload.
//!
//! Brands can be passed as type parameters where a type constructor is
//! expected. A binary combinator is then simply a trait whose associated
//! type takes two brands (see [`HBifunctor`](super::HBifunctor)).
//!
//! # Example
//!
//! ```rust
//! use combinars::typeclass::{OptionK, TypeConstructor, VecK};
//!
//! fn nothing<F: TypeConstructor>(value: F::Of<i32>) -> F::Of<i32> {
//!     value
//! }
//!
//! assert_eq!(nothing::<OptionK>(Some(1)), Some(1));
//! assert_eq!(nothing::<VecK>(vec![1, 2]), vec![1, 2]);
//! ```

/// The payload bound shared by every constructor in this crate.
///
/// Aggregates are persistent values that may be duplicated freely, so every
/// payload must be cloneable and own its data.
pub trait Value: Clone + 'static {}

impl<T: Clone + 'static> Value for T {}

/// A brand standing for a unary type constructor.
///
/// # Laws
///
/// For any brand `F` and payload `A`, `F::Of<A>` is a single concrete type:
/// applying the same brand to the same payload always yields the same type.
///
/// # Example
///
/// ```rust
/// use combinars::typeclass::{OptionK, TypeConstructor};
///
/// let value: <OptionK as TypeConstructor>::Of<i32> = Some(42);
/// assert_eq!(value, Some(42));
/// ```
pub trait TypeConstructor: Sized + 'static {
    /// The constructor applied to the payload `A`.
    type Of<A: Value>: Value;
}

// =============================================================================
// Standard Library Brands
// =============================================================================

/// Brand for [`Option`].
#[derive(Debug)]
pub enum OptionK {}

impl TypeConstructor for OptionK {
    type Of<A: Value> = Option<A>;
}

/// Brand for [`Vec`].
#[derive(Debug)]
pub enum VecK {}

impl TypeConstructor for VecK {
    type Of<A: Value> = Vec<A>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    // =========================================================================
    // Type-level tests (compile-time verification)
    // =========================================================================

    fn assert_value<T: Value>() {}

    #[test]
    fn option_brand_applies_to_option() {
        let value: <OptionK as TypeConstructor>::Of<i32> = Some(1);
        assert_eq!(value, Some(1));
    }

    #[test]
    fn vec_brand_applies_to_vec() {
        let value: <VecK as TypeConstructor>::Of<&str> = vec!["a", "b"];
        assert_eq!(value.len(), 2);
    }

    #[test]
    fn applied_brands_are_values() {
        assert_value::<<OptionK as TypeConstructor>::Of<String>>();
        assert_value::<<VecK as TypeConstructor>::Of<Vec<i32>>>();
    }

    #[rstest]
    #[case(vec![])]
    #[case(vec![1])]
    #[case(vec![1, 2, 3])]
    fn brand_is_transparent(#[case] input: Vec<i32>) {
        fn pass<F: TypeConstructor>(value: F::Of<i32>) -> F::Of<i32> {
            value
        }
        assert_eq!(pass::<VecK>(input.clone()), input);
    }
}
