//! Scenario tests for the explicit recursive forms.
//!
//! `Chain1` and `Chain` must agree with every combinator's own free
//! structures: converting in either direction keeps the effects and their
//! order, observed by collapsing into a concrete target.

mod common;

use combinars::prelude::*;
use common::{Logged, LoggedK, tell};
use rstest::rstest;

// =============================================================================
// Product
// =============================================================================

#[rstest]
fn product_chain1_round_trips_through_non_empty() {
    let aggregate = ProductT::to_sf::<VecK, i32>((vec![1], vec![2, 3]));
    let chain = Chain1::<ProductT, VecK, i32>::reroll(aggregate.clone());
    assert!(!chain.is_done());
    assert_eq!(chain.unroll(), aggregate);
}

#[rstest]
fn product_chain_round_trips_through_list() {
    let list = ProductT::to_mf::<VecK, i32>((vec![1], vec![2]));
    let chain = Chain::<ProductT, VecK, i32>::reroll(list.clone());
    assert_eq!(chain.unroll(), list);
}

#[rstest]
fn product_chain_of_nil_is_done() {
    let chain = Chain::<ProductT, VecK, i32>::reroll(ListF::new());
    assert!(chain.is_done());
    assert_eq!(chain.into_either().left(), Some(Proxy::new()));
}

// =============================================================================
// Sum
// =============================================================================

#[rstest]
#[case(0)]
#[case(1)]
#[case(2)]
#[case(5)]
fn sum_chain_keeps_step_index(#[case] index: usize) {
    let chain = Chain1::<SumT, OptionK, i32>::reroll(Step::new(index, Some(9)));
    assert_eq!(chain.is_done(), index == 0);
    assert_eq!(chain.clone().unroll().index(), index);
    assert_eq!(chain.retract(), Some(9));
}

#[rstest]
fn sum_chain_widened_unrolls_to_same_step() {
    let chain = Chain1::<SumT, OptionK, i32>::reroll(Step::new(3, Some(1))).into_chain();
    assert_eq!(chain.unroll(), Step::new(3, Some(1)));
}

// =============================================================================
// Day
// =============================================================================

type DayChain = Chain1<DayT, LoggedK, i32>;
type DayLayer = Day<LoggedK, Chain1K<DayT, LoggedK>, i32>;

fn day_chain() -> DayChain {
    let last = DayChain::done(tell("c", 3));
    let middle = DayChain::more(DayLayer::new::<i32, i32, _>(tell("b", 2), last, |b: i32, c: i32| b * 10 + c));
    DayChain::more(DayLayer::new::<i32, i32, _>(tell("a", 1), middle, |a: i32, bc: i32| a * 100 + bc))
}

#[rstest]
fn day_chain1_retract_runs_in_order() {
    assert_eq!(day_chain().retract(), Logged { log: vec!["a", "b", "c"], value: 123 });
}

#[rstest]
fn day_chain1_unroll_agrees_with_ap1() {
    let unrolled = day_chain().unroll();
    assert_eq!(DayT::retract_sf::<LoggedK, i32>(unrolled), Logged { log: vec!["a", "b", "c"], value: 123 });
}

#[rstest]
fn day_chain1_reroll_of_unroll_keeps_effects() {
    let rerolled = DayChain::reroll(day_chain().unroll());
    assert_eq!(rerolled.retract(), Logged { log: vec!["a", "b", "c"], value: 123 });
}

#[rstest]
fn day_chain_ends_in_pure() {
    let chain = day_chain().into_chain();
    assert_eq!(chain.clone().retract(), Logged { log: vec!["a", "b", "c"], value: 123 });
    let free = chain.unroll();
    assert_eq!(DayT::retract_mf::<LoggedK, i32>(free), Logged { log: vec!["a", "b", "c"], value: 123 });
}

#[rstest]
fn day_chain_fmap_maps_result() {
    let mapped = Chain1K::<DayT, LoggedK>::fmap::<i32, i32, _>(day_chain(), |n: i32| n + 1);
    assert_eq!(mapped.retract().value, 124);
}

// =============================================================================
// Compose
// =============================================================================

type CompChain = Chain1<CompT, LoggedK, i32>;
type CompLayer = Comp<LoggedK, Chain1K<CompT, LoggedK>, i32>;

fn comp_chain() -> CompChain {
    CompChain::more(CompLayer::new::<i32, _>(tell("a", 1), |a: i32| {
        CompChain::more(CompLayer::new::<i32, _>(tell("b", a + 1), |b: i32| {
            CompChain::done(tell("c", b * 2))
        }))
    }))
}

#[rstest]
fn comp_chain1_retract_runs_in_order() {
    assert_eq!(comp_chain().retract(), Logged { log: vec!["a", "b", "c"], value: 4 });
}

#[rstest]
fn comp_chain1_unroll_agrees_with_free1() {
    assert_eq!(
        CompT::retract_sf::<LoggedK, i32>(comp_chain().unroll()),
        Logged { log: vec!["a", "b", "c"], value: 4 }
    );
}

#[rstest]
fn comp_chain_round_trips_through_free() {
    let free = comp_chain().into_chain().unroll();
    let chain = Chain::<CompT, LoggedK, i32>::reroll(free);
    assert_eq!(chain.retract(), Logged { log: vec!["a", "b", "c"], value: 4 });
}

struct Silence;

impl NaturalTransformation<LoggedK, LoggedK> for Silence {
    fn transform<A: Value>(&self, value: Logged<A>) -> Logged<A> {
        Logged { log: Vec::new(), value: value.value }
    }
}

#[rstest]
fn comp_chain_interpret_converts_every_effect() {
    assert_eq!(comp_chain().interpret::<LoggedK, _>(Silence), Logged { log: Vec::new(), value: 4 });
    assert_eq!(
        comp_chain().into_chain().interpret::<LoggedK, _>(Silence),
        Logged { log: Vec::new(), value: 4 }
    );
}
