//! Either type - a value that can be one of two types.
//!
//! `Either<L, R>` is the result of every "match" operation in this crate:
//! a free semigroup is either a single effect (`Left`) or an effect followed
//! by more (`Right`), and a free monoid is either the tensor identity
//! (`Left`) or non-empty (`Right`). It is also the value type of the sum
//! combinator.
//!
//! # Examples
//!
//! ```rust
//! use combinars::control::Either;
//!
//! let left: Either<i32, String> = Either::Left(42);
//! let right: Either<i32, String> = Either::Right("hello".to_string());
//!
//! let result = right.fold(|n| format!("Number: {}", n), |s| format!("String: {}", s));
//! assert_eq!(result, "String: hello");
//! assert!(left.is_left());
//! ```

use std::fmt;

/// A value that can be one of two types.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Either<L, R> {
    /// The first alternative.
    Left(L),
    /// The second alternative.
    Right(R),
}

impl<L, R> Either<L, R> {
    /// Returns `true` if this is a `Left` value.
    #[inline]
    pub const fn is_left(&self) -> bool {
        matches!(self, Self::Left(_))
    }

    /// Returns `true` if this is a `Right` value.
    #[inline]
    pub const fn is_right(&self) -> bool {
        matches!(self, Self::Right(_))
    }

    /// Converts into `Option<L>`, discarding a right value.
    #[inline]
    pub fn left(self) -> Option<L> {
        match self {
            Self::Left(value) => Some(value),
            Self::Right(_) => None,
        }
    }

    /// Converts into `Option<R>`, discarding a left value.
    #[inline]
    pub fn right(self) -> Option<R> {
        match self {
            Self::Left(_) => None,
            Self::Right(value) => Some(value),
        }
    }

    /// Borrows both sides.
    #[inline]
    pub const fn as_ref(&self) -> Either<&L, &R> {
        match self {
            Self::Left(value) => Either::Left(value),
            Self::Right(value) => Either::Right(value),
        }
    }

    /// Maps the left value.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use combinars::control::Either;
    ///
    /// let value: Either<i32, &str> = Either::Left(2);
    /// assert_eq!(value.map_left(|n| n * 10), Either::Left(20));
    /// ```
    #[inline]
    pub fn map_left<T, F: FnOnce(L) -> T>(self, function: F) -> Either<T, R> {
        match self {
            Self::Left(value) => Either::Left(function(value)),
            Self::Right(value) => Either::Right(value),
        }
    }

    /// Maps the right value.
    #[inline]
    pub fn map_right<T, F: FnOnce(R) -> T>(self, function: F) -> Either<L, T> {
        match self {
            Self::Left(value) => Either::Left(value),
            Self::Right(value) => Either::Right(function(value)),
        }
    }

    /// Maps both sides.
    #[inline]
    pub fn bimap<T, U, F, G>(self, left_function: F, right_function: G) -> Either<T, U>
    where
        F: FnOnce(L) -> T,
        G: FnOnce(R) -> U,
    {
        match self {
            Self::Left(value) => Either::Left(left_function(value)),
            Self::Right(value) => Either::Right(right_function(value)),
        }
    }

    /// Eliminates both sides into a single type.
    #[inline]
    pub fn fold<T, F, G>(self, left_function: F, right_function: G) -> T
    where
        F: FnOnce(L) -> T,
        G: FnOnce(R) -> T,
    {
        match self {
            Self::Left(value) => left_function(value),
            Self::Right(value) => right_function(value),
        }
    }

    /// Exchanges the two sides.
    #[inline]
    pub fn swap(self) -> Either<R, L> {
        match self {
            Self::Left(value) => Either::Right(value),
            Self::Right(value) => Either::Left(value),
        }
    }
}

impl<A> Either<A, A> {
    /// Extracts the value when both sides share a type.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use combinars::control::Either;
    ///
    /// let value: Either<i32, i32> = Either::Right(3);
    /// assert_eq!(value.merge(), 3);
    /// ```
    #[inline]
    pub fn merge(self) -> A {
        match self {
            Self::Left(value) | Self::Right(value) => value,
        }
    }
}

impl<L: fmt::Debug, R: fmt::Debug> fmt::Debug for Either<L, R> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Left(value) => formatter.debug_tuple("Left").field(value).finish(),
            Self::Right(value) => formatter.debug_tuple("Right").field(value).finish(),
        }
    }
}

impl<L, R> From<Result<R, L>> for Either<L, R> {
    fn from(result: Result<R, L>) -> Self {
        match result {
            Ok(value) => Self::Right(value),
            Err(error) => Self::Left(error),
        }
    }
}
