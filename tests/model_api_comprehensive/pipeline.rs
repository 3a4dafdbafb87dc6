//! Pipeline behaviour observed through the public API

use crate::*;
use kvmodel::{PipelineError, Resolution};

#[test]
fn test_results_resolve_in_issuance_order() {
    let store = create_store();
    store.hset("h", "a", b"1").unwrap();
    store.rpush("l", b"x").unwrap();

    let mut p = Pipeline::new(&store);
    let a = p.hget("h", "a");
    let missing = p.hget("h", "zzz");
    let items = p.lrange("l", 0, -1);
    let bad = p.smembers("h");
    let after = p.exists("h");

    let err = p.execute().unwrap_err();
    assert!(matches!(err, PipelineError::Command { position: 3, command: "SMEMBERS", .. }));

    assert_eq!(a.value().unwrap(), Some(bytes("1")));
    assert_eq!(missing.resolution().unwrap(), Resolution::Missing);
    assert_eq!(items.value().unwrap(), Some(vec![bytes("x")]));
    assert_eq!(bad.resolution().unwrap(), Resolution::Unresolved);
    assert_eq!(after.resolution().unwrap(), Resolution::Unresolved);
}

#[test]
fn test_plain_pipeline_keeps_earlier_writes_after_error() {
    let store = create_store();
    store.rpush("l", b"x").unwrap();

    let mut p = Pipeline::new(&store);
    p.hset("h", "a", bytes("1"));
    p.hget("l", "f");
    p.hset("h", "b", bytes("2"));
    assert!(p.execute().is_err());

    // No rollback: the store applied every command it could
    assert_eq!(store.hget("h", "a").unwrap(), Some(bytes("1")));
    assert_eq!(store.hget("h", "b").unwrap(), Some(bytes("2")));
}

#[test]
fn test_reading_before_execute_is_unresolved_not_missing() {
    let store = create_store();
    let mut p = Pipeline::new(&store);
    let pending = p.hget("h", "a");
    assert!(matches!(pending.value(), Err(PipelineError::Unresolved)));
    p.execute().unwrap();
    assert_eq!(pending.value().unwrap(), None);
}

#[test]
fn test_empty_pipeline_costs_nothing() {
    let store = create_store();
    assert!(Pipeline::transaction(&store).execute().unwrap().is_empty());
    assert_eq!(store.round_trips(), 0);
}
