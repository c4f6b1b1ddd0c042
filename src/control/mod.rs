//! Control structures used by the combinators.
//!
//! - [`Either`]: a value that can be one of two types
//! - [`Existential`]: a type-erased payload, used to hide intermediate
//!   result types inside Day convolution and composition
//!
//! # Examples
//!
//! ```rust
//! use combinars::control::{Either, Existential};
//!
//! let choice: Either<i32, &str> = Either::Left(1);
//! assert_eq!(choice.swap(), Either::Right(1));
//!
//! let hidden = Existential::new(String::from("payload"));
//! assert_eq!(hidden.downcast::<String>(), "payload");
//! ```

mod either;
mod existential;

pub use either::Either;
pub use existential::Existential;
