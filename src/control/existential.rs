//! Type-erased intermediate values.
//!
//! Day convolution and composition both hide a type: `Day<F, G, A>` pairs
//! an `F<B>` with a `G<C>` for *some* `B` and `C`, and `Comp<F, G, A>`
//! stores an `F<X>` for *some* `X`. Rust has no existential types over
//! generic parameters, so the hidden payloads are stored as [`Existential`]
//! values and recovered by the combining function that was built alongside
//! them.
//!
//! Only the function paired with an erased payload ever downcasts it, and
//! it was created from the same concrete type; a failed downcast is
//! therefore a bug in this crate, not a recoverable condition.

use std::any::Any;
use std::fmt;
use std::rc::Rc;

/// A shared, type-erased value.
///
/// Cloning is cheap: the erased value is shared through an `Rc` and only
/// cloned on extraction when other handles still point at it.
#[derive(Clone)]
pub struct Existential(Rc<dyn Any>);

impl Existential {
    /// Erases the type of `value`.
    #[inline]
    pub fn new<T: Clone + 'static>(value: T) -> Self {
        Self(Rc::new(value))
    }

    /// Returns `true` if the erased value has type `T`.
    #[inline]
    pub fn is<T: 'static>(&self) -> bool {
        self.0.is::<T>()
    }

    /// Recovers the erased value.
    ///
    /// # Panics
    ///
    /// Panics if the value was not erased from a `T`.
    pub fn downcast<T: Clone + 'static>(self) -> T {
        let shared = self
            .0
            .downcast::<T>()
            .expect("Type mismatch in existential extraction");
        Rc::try_unwrap(shared).unwrap_or_else(|shared| (*shared).clone())
    }
}

impl fmt::Debug for Existential {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("Existential(..)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0)]
    #[case(42)]
    fn downcast_recovers_value(#[case] value: i32) {
        assert_eq!(Existential::new(value).downcast::<i32>(), value);
    }

    #[test]
    fn shared_value_is_cloned_on_extraction() {
        let erased = Existential::new(vec![1, 2, 3]);
        let other = erased.clone();
        assert_eq!(erased.downcast::<Vec<i32>>(), vec![1, 2, 3]);
        assert_eq!(other.downcast::<Vec<i32>>(), vec![1, 2, 3]);
    }

    #[test]
    fn is_checks_the_erased_type() {
        let erased = Existential::new("text");
        assert!(erased.is::<&str>());
        assert!(!erased.is::<String>());
    }

    #[test]
    fn nested_existentials_unwrap_one_layer_at_a_time() {
        let erased = Existential::new(Existential::new(7_u8));
        assert_eq!(erased.downcast::<Existential>().downcast::<u8>(), 7);
    }

    #[test]
    #[should_panic(expected = "Type mismatch in existential extraction")]
    fn downcast_to_wrong_type_panics() {
        let _ = Existential::new(1_i32).downcast::<String>();
    }

    #[test]
    fn debug_hides_contents() {
        assert_eq!(format!("{:?}", Existential::new(1)), "Existential(..)");
    }
}
