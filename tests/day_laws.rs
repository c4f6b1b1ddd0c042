//! Property-based tests for Day convolution.
//!
//! Convolutions hide their intermediate types, so they are compared by
//! collapsing into a concrete applicative. `LoggedK` records the order in
//! which effects run.
//!
//! - **Associativity** and **identity** round trips
//! - **Free applicative**: `to_mf` and `append_mf` keep effect order
//! - **Left identity**: `pure_t(())` combined with `(_, b) -> b` is `b`

mod common;

use combinars::prelude::*;
use common::{LoggedK, Logged, tell};
use proptest::prelude::*;
use rstest::rstest;

fn collapse(day: Day<LoggedK, LoggedK, i32>) -> Logged<i32> {
    <LoggedK as SemigroupIn<DayT>>::biretract::<i32>(day)
}

fn flatten(day: Day<VecK, DayOf<OptionK, VecK>, i32>) -> Vec<i32> {
    let inner = DayT::hright::<VecK, DayOf<OptionK, VecK>, VecK, i32, _>(day, CollapseInner);
    <VecK as SemigroupIn<DayT>>::biretract::<i32>(inner)
}

fn labels() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec!["a", "b", "c", "d"])
}

// =============================================================================
// Combinator Laws
// =============================================================================

proptest! {
    #[test]
    fn prop_associate_round_trip(x in any::<i16>(), y in any::<i16>(), z in any::<i16>()) {
        let inner = Day::<OptionK, VecK, i32>::new::<i16, i16, _>(Some(y), vec![z, z], |b: i16, c: i16| {
            i32::from(b) * 3 + i32::from(c)
        });
        let outer = Day::<VecK, DayOf<OptionK, VecK>, i32>::new::<i16, i32, _>(vec![x], inner, |a: i16, bc: i32| {
            i32::from(a) - bc
        });
        let round_trip = DayT::disassociate::<VecK, OptionK, VecK, i32>(DayT::associate::<VecK, OptionK, VecK, i32>(outer.clone()));

        let expected = vec![i32::from(x) - (i32::from(y) * 3 + i32::from(z)); 2];
        prop_assert_eq!(flatten(round_trip), expected.clone());
        prop_assert_eq!(flatten(outer), expected);
    }

    #[test]
    fn prop_identity_round_trip(values in prop::collection::vec(any::<i32>(), 0..5)) {
        prop_assert_eq!(DayT::elim1::<VecK, i32>(DayT::intro1::<VecK, i32>(values.clone())), values.clone());
        prop_assert_eq!(DayT::elim2::<VecK, i32>(DayT::intro2::<VecK, i32>(values.clone())), values);
    }

    #[test]
    fn prop_left_identity(label in labels(), value in any::<i32>()) {
        let unit = <LoggedK as MonoidIn<DayT>>::pure_t::<()>(Identity(()));
        let day = Day::<LoggedK, LoggedK, i32>::new::<(), i32, _>(unit, tell(label, value), |(), second: i32| second);
        prop_assert_eq!(collapse(day), tell(label, value));
    }

    #[test]
    fn prop_to_mf_runs_left_then_right(first in labels(), second in labels(), x in any::<i16>(), y in any::<i16>()) {
        let day = Day::<LoggedK, LoggedK, i32>::new::<i16, i16, _>(tell(first, x), tell(second, y), |a: i16, b: i16| {
            i32::from(a) + i32::from(b)
        });
        let collapsed = DayT::retract_mf::<LoggedK, i32>(DayT::to_mf::<LoggedK, i32>(day));
        prop_assert_eq!(collapsed.log, vec![first, second]);
        prop_assert_eq!(collapsed.value, i32::from(x) + i32::from(y));
    }
}

struct CollapseInner;

impl NaturalTransformation<DayOf<OptionK, VecK>, VecK> for CollapseInner {
    fn transform<A: Value>(&self, value: Day<OptionK, VecK, A>) -> Vec<A> {
        let options = DayT::hleft::<OptionK, VecK, VecK, A, _>(value, OptionToVec);
        <VecK as SemigroupIn<DayT>>::biretract::<A>(options)
    }
}

struct OptionToVec;

impl NaturalTransformation<OptionK, VecK> for OptionToVec {
    fn transform<A: Value>(&self, value: Option<A>) -> Vec<A> {
        value.into_iter().collect()
    }
}

// =============================================================================
// Free Applicative
// =============================================================================

fn pair(first: &'static str, second: &'static str, x: i32, y: i32) -> Ap<LoggedK, i32> {
    DayT::to_mf::<LoggedK, i32>(Day::new::<i32, i32, _>(tell(first, x), tell(second, y), |a: i32, b: i32| a * 10 + b))
}

#[rstest]
fn uncons_of_nil_is_identity() {
    let nil = DayT::nil_mf::<LoggedK, i32>(Identity(4));
    let uncons = DayT::uncons_mf::<LoggedK, i32>(nil);
    assert_eq!(uncons.left(), Some(Identity(4)));
}

#[rstest]
fn uncons_of_cons_exposes_first_effect() {
    let rest = Ap::<LoggedK, i32>::lift(tell("b", 2));
    let consed = DayT::cons_mf::<LoggedK, i32>(Day::new::<i32, i32, _>(tell("a", 1), rest, |a: i32, b: i32| a + b));
    let day = DayT::uncons_mf::<LoggedK, i32>(consed).right().expect("non-empty");
    let collapsed = DayT::hright::<LoggedK, ApK<LoggedK>, LoggedK, i32, _>(day, RetractPossibly::<DayT>::new());
    assert_eq!(<LoggedK as SemigroupIn<DayT>>::biretract::<i32>(collapsed), Logged { log: vec!["a", "b"], value: 3 });
}

#[rstest]
fn to_mf_decomposes_into_two_effects() {
    let collapsed = DayT::retract_mf::<LoggedK, i32>(pair("a", "b", 1, 2));
    assert_eq!(collapsed, Logged { log: vec!["a", "b"], value: 12 });
}

#[rstest]
fn append_keeps_all_four_effects_in_order() {
    let both = DayT::append_mf::<LoggedK, (i32, i32)>(Day::new::<i32, i32, _>(
        pair("a", "b", 1, 2),
        pair("c", "d", 3, 4),
        |left: i32, right: i32| (left, right),
    ));
    let collapsed = DayT::retract_mf::<LoggedK, (i32, i32)>(both);
    assert_eq!(collapsed, Logged { log: vec!["a", "b", "c", "d"], value: (12, 34) });
}

#[rstest]
fn append_with_nil_keeps_effects() {
    let nil = DayT::nil_mf::<LoggedK, i32>(Identity(0));
    let appended = DayT::append_mf::<LoggedK, i32>(Day::new::<i32, i32, _>(nil, pair("a", "b", 1, 2), |_: i32, b: i32| b));
    assert_eq!(DayT::retract_mf::<LoggedK, i32>(appended), Logged { log: vec!["a", "b"], value: 12 });
}

#[rstest]
fn match_from_sf_is_non_empty() {
    let aggregate = DayT::inject_sf::<LoggedK, i32>(tell("a", 1));
    let matched = DayT::match_mf::<LoggedK, i32>(DayT::from_sf::<LoggedK, i32>(aggregate));
    let non_empty = matched.right().expect("from_sf never yields the identity");
    assert_eq!(DayT::retract_sf::<LoggedK, i32>(non_empty), tell("a", 1));
}

#[rstest]
fn interpret_runs_every_effect() {
    let effects = pair("a", "b", 1, 2);
    assert_eq!(
        DayT::interpret_mf::<LoggedK, LoggedK, i32, _>(IdentityTransformation, effects),
        Logged { log: vec!["a", "b"], value: 12 }
    );
}

// =============================================================================
// Deep Aggregates
// =============================================================================

const DEPTH: i64 = 50_000;

#[rstest]
#[case(true)]
#[case(false)]
fn deep_ap_retracts_in_a_loop(#[case] right_nested: bool) {
    let program = (1..=DEPTH).fold(Ap::<OptionK, i64>::pure(0), |total, n| {
        if right_nested {
            ApK::<OptionK>::map2::<i64, i64, i64, _>(Ap::lift(Some(n)), total, |x: i64, sum: i64| x + sum)
        } else {
            ApK::<OptionK>::map2::<i64, i64, i64, _>(total, Ap::lift(Some(n)), |sum: i64, x: i64| sum + x)
        }
    });
    assert_eq!(DayT::retract_mf::<OptionK, i64>(program), Some(DEPTH * (DEPTH + 1) / 2));
}

#[rstest]
fn deep_ap_runs_effects_in_order() {
    let program = (1..=DEPTH).fold(Ap::<LoggedK, i64>::pure(0), |total, n| {
        let label = if n % 2 == 0 { "even" } else { "odd" };
        ApK::<LoggedK>::map2::<i64, i64, i64, _>(total, Ap::lift(tell(label, n)), |sum: i64, x: i64| sum + x)
    });
    let collapsed = DayT::retract_mf::<LoggedK, i64>(program);
    assert_eq!(collapsed.log.len(), 50_000);
    assert_eq!(collapsed.log[..3], ["odd", "even", "odd"]);
    assert_eq!(collapsed.value, DEPTH * (DEPTH + 1) / 2);
}

#[rstest]
fn deep_ap1_interprets_in_a_loop() {
    let program = (1..DEPTH).fold(Ap1::<VecK, i64>::lift(vec![0]), |total, n| {
        DayT::append_sf::<VecK, i64>(Day::new::<i64, i64, _>(total, Ap1::lift(vec![n]), |sum: i64, x: i64| sum + x))
    });
    let collapsed = DayT::interpret_sf::<VecK, OptionK, i64, _>(FirstOf, program);
    assert_eq!(collapsed, Some((DEPTH - 1) * DEPTH / 2));
}

struct FirstOf;

impl NaturalTransformation<VecK, OptionK> for FirstOf {
    fn transform<A: Value>(&self, value: Vec<A>) -> Option<A> {
        value.into_iter().next()
    }
}
