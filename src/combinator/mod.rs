//! The four binary combinators and the recursive chain forms.
//!
//! | Brand | `Of<F, G, A>` | Identity | Free semigroup | Free monoid |
//! |-------|---------------|----------|----------------|-------------|
//! | [`ProductT`] | `(F<A>, G<A>)` | [`Proxy`] | [`NonEmptyF`] | [`ListF`] |
//! | [`SumT`] | `Either<F<A>, G<A>>` | [`Void`] | [`Step`] | [`Step`] |
//! | [`DayT`] | [`Day<F, G, A>`] | [`Identity`] | [`Ap1`] | [`Ap`] |
//! | [`CompT`] | [`Comp<F, G, A>`] | [`Identity`] | [`Free1`] | [`Free`] |
//!
//! Every combinator implements the whole hierarchy up to
//! [`Monoidal`](crate::typeclass::Monoidal). All except [`CompT`] are also
//! [`Matchable`](crate::typeclass::Matchable).
//!
//! [`Chain1`] and [`Chain`] are the same free structures written as plain
//! recursive types, for any combinator.
//!
//! [`Proxy`]: crate::typeclass::Proxy
//! [`Void`]: crate::typeclass::Void
//! [`Identity`]: crate::typeclass::Identity

mod chain;
mod compose;
mod day;
mod product;
mod sum;

pub use chain::{Chain, Chain1, Chain1K, ChainK, RerollNonEmpty, RerollPossibly, UnrollNonEmpty, UnrollPossibly};
pub use compose::{Comp, CompOf, CompT, Free, Free1, Free1K, FreeK};
pub use day::{Ap, Ap1, Ap1K, ApK, Day, DayOf, DayT};
pub use product::{ListF, ListFK, NonEmptyF, NonEmptyFK, ProductOf, ProductT};
pub use sum::{Step, StepK, SumOf, SumT};
