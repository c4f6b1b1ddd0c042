#![cfg(feature = "serde")]

//! Integration tests for serde support.
//!
//! The free structures serialize as plain data: sequences for the product
//! forms and an index with a value for [`Step`].

use combinars::combinator::{ListF, NonEmptyF, Step};
use combinars::control::Either;
use combinars::persistent::PersistentList;
use combinars::typeclass::{OptionK, VecK};
use rstest::rstest;

// =============================================================================
// Either
// =============================================================================

#[rstest]
#[case(Either::Left("error".to_string()))]
#[case(Either::Right(42))]
fn either_json_roundtrip(#[case] value: Either<String, i32>) {
    let json = serde_json::to_string(&value).unwrap();
    let restored: Either<String, i32> = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, value);
}

#[rstest]
fn either_uses_variant_names() {
    let value: Either<String, i32> = Either::Right(1);
    assert_eq!(serde_json::to_string(&value).unwrap(), r#"{"Right":1}"#);
}

// =============================================================================
// PersistentList
// =============================================================================

#[rstest]
fn list_serializes_as_sequence() {
    let list: PersistentList<i32> = (1..=3).collect();
    assert_eq!(serde_json::to_string(&list).unwrap(), "[1,2,3]");
    let restored: PersistentList<i32> = serde_json::from_str("[1,2,3]").unwrap();
    assert_eq!(restored, list);
}

// =============================================================================
// ListF / NonEmptyF
// =============================================================================

#[rstest]
fn list_f_keeps_order() {
    let list: ListF<VecK, i32> = [vec![1], vec![2, 3]].into_iter().collect();
    let json = serde_json::to_string(&list).unwrap();
    assert_eq!(json, "[[1],[2,3]]");
    let restored: ListF<VecK, i32> = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, list);
}

#[rstest]
fn empty_list_f_is_empty_sequence() {
    let list: ListF<OptionK, i32> = ListF::new();
    assert_eq!(serde_json::to_string(&list).unwrap(), "[]");
    let restored: ListF<OptionK, i32> = serde_json::from_str("[]").unwrap();
    assert!(restored.is_empty());
}

#[rstest]
fn non_empty_f_puts_head_first() {
    let value = NonEmptyF::<OptionK, i32>::new(Some(1), [None, Some(3)].into_iter().collect());
    let json = serde_json::to_string(&value).unwrap();
    assert_eq!(json, "[1,null,3]");
    let restored: NonEmptyF<OptionK, i32> = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, value);
}

#[rstest]
fn non_empty_f_rejects_empty_sequence() {
    let result: Result<NonEmptyF<OptionK, i32>, _> = serde_json::from_str("[]");
    assert!(result.is_err());
}

// =============================================================================
// Step
// =============================================================================

#[rstest]
fn step_records_index_and_value() {
    let step = Step::<VecK, i32>::new(2, vec![7]);
    let json = serde_json::to_string(&step).unwrap();
    assert_eq!(json, r#"{"index":2,"value":[7]}"#);
    let restored: Step<VecK, i32> = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, step);
}

#[rstest]
fn step_without_index_is_rejected() {
    let result: Result<Step<VecK, i32>, _> = serde_json::from_str(r#"{"value":[7]}"#);
    assert!(result.is_err());
}
