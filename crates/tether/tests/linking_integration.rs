#![forbid(unsafe_code)]

//! End-to-end linking behavior through the public surface.

use tether::{SyncContext, SyncObject, Value};

// ============================================================================
// Helper: small objects for the classic two-property scenario
// ============================================================================

fn source_target_pair() -> (SyncObject, SyncObject) {
    let source: SyncObject = [("foo", Value::from("bar")), ("qux", Value::from(1i64))]
        .into_iter()
        .collect();
    let target: SyncObject = [("foo", Value::from("baz")), ("qux", Value::from(2i64))]
        .into_iter()
        .collect();
    (source, target)
}

// ============================================================================
// Default and selective linking
// ============================================================================

#[test]
fn default_link_binds_everything() {
    let ctx = SyncContext::new();
    let (source, target) = source_target_pair();

    ctx.sync_object(&target).unwrap();
    ctx.sync_object(&source).unwrap().link_all().to(&target);

    // The source's own values are overwritten by the target's, immediately.
    assert_eq!(source.get("foo"), Some(Value::from("baz")));
    assert_eq!(source.get("qux"), Some(Value::Num(2.0)));
}

#[test]
fn selective_link_binds_only_named_properties() {
    let ctx = SyncContext::new();
    let (source, target) = source_target_pair();

    ctx.sync_object(&source).unwrap().link(["foo"]).to(&target);

    assert_eq!(source.get("foo"), Some(Value::from("baz")));
    // Unnamed property keeps its original value.
    assert_eq!(source.get("qux"), Some(Value::Num(1.0)));
    assert!(!source.is_linked("qux"));
}

#[test]
fn linking_overwrites_source_value_permanently() {
    let ctx = SyncContext::new();
    let (source, target) = source_target_pair();

    ctx.sync_object(&source).unwrap().link(["foo"]).to(&target);

    // The prior "bar" is gone; there is no unlink to bring it back.
    assert_eq!(source.get("foo"), Some(Value::from("baz")));
    target.set("foo", "later");
    assert_eq!(source.get("foo"), Some(Value::from("later")));
}

// ============================================================================
// Write-through propagation
// ============================================================================

#[test]
fn target_writes_are_visible_on_next_read() {
    let ctx = SyncContext::new();
    let (source, target) = source_target_pair();

    ctx.sync_object(&source).unwrap().link_all().to(&target);

    target.set("foo", "new");
    assert_eq!(source.get("foo"), Some(Value::from("new")));
}

#[test]
fn source_writes_reach_target_and_siblings() {
    let ctx = SyncContext::new();
    let target: SyncObject = [("count", 0i64)].into_iter().collect();
    let first: SyncObject = [("count", 10i64)].into_iter().collect();
    let second: SyncObject = [("count", 20i64)].into_iter().collect();

    ctx.sync_object(&first).unwrap().link(["count"]).to(&target);
    ctx.sync_object(&second).unwrap().link(["count"]).to(&target);

    first.set("count", 7i64);
    assert_eq!(target.get("count"), Some(Value::Num(7.0)));
    // The sibling linked to the same target sees it on its next read.
    assert_eq!(second.get("count"), Some(Value::Num(7.0)));
}

// ============================================================================
// Fault handling: skipped bindings, refused registrations
// ============================================================================

#[test]
fn composite_target_property_is_skipped() {
    let ctx = SyncContext::new();
    let source: SyncObject = [("items", Value::from("original"))].into_iter().collect();
    let target: SyncObject = [("items", Value::List(vec![Value::from(1i64)]))]
        .into_iter()
        .collect();

    ctx.sync_object(&source).unwrap().link(["items"]).to(&target);

    assert_eq!(source.get("items"), Some(Value::from("original")));
    assert!(!source.is_linked("items"));
}

#[test]
fn one_bad_property_does_not_abort_the_rest() {
    let ctx = SyncContext::new();
    let source: SyncObject = [
        ("title", Value::from("old")),
        ("tags", Value::from("none")),
        ("count", Value::from(0i64)),
    ]
    .into_iter()
    .collect();
    let target: SyncObject = [
        ("title", Value::from("fresh")),
        ("tags", Value::List(Vec::new())),
        ("count", Value::from(9i64)),
    ]
    .into_iter()
    .collect();

    ctx.sync_object(&source).unwrap().link_all().to(&target);

    // "tags" was skipped; its siblings on both sides still bound.
    assert_eq!(source.get("title"), Some(Value::from("fresh")));
    assert_eq!(source.get("tags"), Some(Value::from("none")));
    assert_eq!(source.get("count"), Some(Value::Num(9.0)));
}

#[test]
fn missing_target_property_is_skipped() {
    let ctx = SyncContext::new();
    let source: SyncObject = [("foo", Value::from("bar"))].into_iter().collect();
    let target = SyncObject::new();

    ctx.sync_object(&source).unwrap().link(["foo"]).to(&target);

    assert_eq!(source.get("foo"), Some(Value::from("bar")));
    assert!(!source.is_linked("foo"));
}

#[test]
fn non_object_registration_is_refused() {
    let ctx = SyncContext::new();
    assert!(ctx.sync(&Value::Num(42.0)).is_none());
    assert!(ctx.sync(&Value::from("string")).is_none());
    assert_eq!(ctx.registered_len(), 0);
}

// ============================================================================
// Idempotency
// ============================================================================

#[test]
fn relinking_twice_is_observably_identical() {
    let ctx = SyncContext::new();
    let (source, target) = source_target_pair();

    ctx.sync_object(&source).unwrap().link(["foo"]).to(&target);
    ctx.sync_object(&source).unwrap().link(["foo"]).to(&target);

    assert_eq!(source.get("foo"), Some(Value::from("baz")));
    target.set("foo", "once");
    assert_eq!(source.get("foo"), Some(Value::from("once")));
    assert_eq!(ctx.registered_len(), 1);
}

#[test]
fn registering_twice_yields_the_same_token() {
    let ctx = SyncContext::new();
    let object = SyncObject::new();
    ctx.sync_object(&object).unwrap();
    let token = object.identity().unwrap();
    ctx.sync_object(&object).unwrap();
    assert_eq!(object.identity().unwrap(), token);
    assert_eq!(ctx.registered_len(), 1);
}
