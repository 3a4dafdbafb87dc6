//! Create / load / save / delete lifecycle tests

use crate::*;

// =============================================================================
// SCENARIO
// =============================================================================

#[test]
fn test_create_load_update_delete() {
    let store = create_store();

    let mut item = Item::create(&store, [("id", Value::from("x")), ("n", Value::from(5))]).unwrap();
    assert_eq!(store.hget("Item::x", "n").unwrap(), Some(bytes("5")));
    assert_eq!(store.hget("Item::x", "id").unwrap(), Some(bytes("x")));

    let mut loaded = Item::load(&store, "x", &[]).unwrap();
    assert_eq!(loaded.get("n").unwrap(), Value::Int(5));
    assert_eq!(loaded, item);

    item.set("n", 6).unwrap();
    item.save(&store, &[]).unwrap();
    assert_eq!(store.hget("Item::x", "n").unwrap(), Some(bytes("6")));

    item.delete(&store).unwrap();
    assert!(!store.exists("Item::x").unwrap());

    let mut reloaded = Item::load(&store, "x", &[]).unwrap();
    assert_eq!(reloaded.get("n").unwrap(), Value::Null);
    assert_eq!(reloaded.peek("n"), None);
}

#[test]
fn test_one_round_trip_per_operation() {
    let store = create_store();

    let mut profile = Profile::create(
        &store,
        [
            ("id", Value::from(1)),
            ("email", Value::from("a@b.io")),
            ("history", string_list(&["a", "b"])),
            ("roles", string_set(&["admin"])),
        ],
    )
    .unwrap();
    assert_eq!(store.round_trips(), 1);

    Profile::load(&store, 1, &[]).unwrap();
    assert_eq!(store.round_trips(), 2);

    profile.set("active", true).unwrap();
    profile.save(&store, &[]).unwrap();
    assert_eq!(store.round_trips(), 3);

    profile.delete(&store).unwrap();
    assert_eq!(store.round_trips(), 4);
}

// =============================================================================
// ALL TYPES
// =============================================================================

#[test]
fn test_every_type_survives_the_store() {
    use chrono::NaiveDate;
    use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

    let store = create_store();
    let born = NaiveDate::from_ymd_opt(1990, 5, 17).unwrap();
    let seen = born.and_hms_micro_opt(8, 15, 0, 123_456).unwrap();
    let values = [
        ("id", Value::from(7)),
        ("email", Value::from("someone@example.com")),
        ("active", Value::from(false)),
        ("avatar", Value::Bytes(vec![0, 1, 254, 255])),
        ("born", Value::from(born)),
        ("seen", Value::from(seen)),
        ("score", Value::from(9.75)),
        ("balance", Value::from(-12)),
        ("addr", Value::Ip(IpAddr::V6(Ipv6Addr::LOCALHOST))),
        ("v4", Value::from(Ipv4Addr::new(192, 168, 0, 1))),
        ("v6", Value::from(Ipv6Addr::new(0xfe80, 0, 0, 0, 0, 0, 0, 1))),
        ("history", string_list(&["z", "a", "z"])),
        ("roles", string_set(&["admin", "ops"])),
    ];
    let created = Profile::create(&store, values.clone()).unwrap();

    assert_eq!(store.hget("Profile::7", "active").unwrap(), Some(bytes("0")));
    assert_eq!(store.hget("Profile::7", "born").unwrap(), Some(bytes("1990-05-17")));
    assert_eq!(
        store.hget("Profile::7", "seen").unwrap(),
        Some(bytes("1990-05-17T08:15:00.123456"))
    );
    assert_eq!(store.hget("Profile::7", "score").unwrap(), Some(bytes("9.75")));

    let mut loaded = Profile::load(&store, 7, &[]).unwrap();
    for (name, value) in values {
        assert_eq!(loaded.get(name).unwrap(), value, "field {}", name);
    }
    assert_eq!(loaded, created);
}

#[test]
fn test_number_keeps_its_kind() {
    let store = create_store();
    Profile::create(&store, [("id", Value::from(1)), ("balance", Value::from(3.0))]).unwrap();
    Profile::create(&store, [("id", Value::from(2)), ("balance", Value::from(3))]).unwrap();

    assert_eq!(
        Profile::load(&store, 1, &["balance"]).unwrap().peek("balance"),
        Some(&Value::Float(3.0))
    );
    assert_eq!(
        Profile::load(&store, 2, &["balance"]).unwrap().peek("balance"),
        Some(&Value::Int(3))
    );
}

// =============================================================================
// DELETE
// =============================================================================

#[test]
fn test_delete_removes_every_key() {
    let store = create_store();
    let profile = Profile::create(
        &store,
        [
            ("id", Value::from(3)),
            ("history", string_list(&["a"])),
            ("roles", string_set(&["r"])),
        ],
    )
    .unwrap();
    assert_eq!(store.key_count(), 3);

    profile.delete(&store).unwrap();
    assert_eq!(store.key_count(), 0);
}

#[test]
fn test_delete_twice_and_never_saved() {
    let store = create_store();
    let item = Item::create(&store, [("id", "x")]).unwrap();
    item.delete(&store).unwrap();
    item.delete(&store).unwrap();

    let mut unsaved = Item::new_record().unwrap();
    unsaved.set("id", "ghost").unwrap();
    unsaved.delete(&store).unwrap();
    assert!(!Item::exists(&store, "ghost").unwrap());
}

#[test]
fn test_deleted_record_can_be_saved_again() {
    let store = create_store();
    let mut item = Item::create(&store, [("id", Value::from("x")), ("n", Value::from(1))]).unwrap();
    item.delete(&store).unwrap();
    item.save(&store, &[]).unwrap();
    assert!(Item::exists(&store, "x").unwrap());
    assert!(item.exists(&store).unwrap());
}

// =============================================================================
// INHERITANCE AND DEFAULTS
// =============================================================================

#[test]
fn test_inherited_default_is_injected_and_persisted() {
    let store = create_store();
    let note = Note::create(&store, [("id", "n1"), ("body", "hello")]).unwrap();

    let created = note.peek("created").cloned().unwrap();
    assert!(created.as_datetime().is_some());
    assert!(store.hexists("Note::n1", "created").unwrap());

    let loaded = Note::load(&store, "n1", &[]).unwrap();
    assert_eq!(loaded.peek("created"), Some(&created));
}

#[test]
fn test_display() {
    let store = create_store();
    let item = Item::create(&store, [("id", Value::from("x")), ("n", Value::from(5))]).unwrap();
    assert_eq!(item.to_string(), "Item(id=\"x\", n=5)");
    assert_eq!(Item::key("x"), "Item::x");
}
