//! Selective save / load tests

use crate::*;

#[test]
fn test_save_subset_leaves_other_fields_untouched() {
    let store = create_store();
    let mut profile = Profile::create(
        &store,
        [
            ("id", Value::from(1)),
            ("email", Value::from("old@example.com")),
            ("score", Value::from(1.5)),
        ],
    )
    .unwrap();

    profile.set("email", "new@example.com").unwrap();
    profile.set("score", 2.5).unwrap();
    profile.save(&store, &["score"]).unwrap();

    assert_eq!(store.hget("Profile::1", "score").unwrap(), Some(bytes("2.5")));
    assert_eq!(
        store.hget("Profile::1", "email").unwrap(),
        Some(bytes("old@example.com"))
    );
}

#[test]
fn test_save_all_omits_unset_fields() {
    let store = create_store();
    Profile::create(&store, [("id", Value::from(2)), ("active", Value::from(true))]).unwrap();

    assert!(store.hexists("Profile::2", "active").unwrap());
    assert!(store.hexists("Profile::2", "id").unwrap());
    for absent in ["email", "avatar", "born", "seen", "score", "balance", "addr", "v4", "v6"] {
        assert!(!store.hexists("Profile::2", absent).unwrap(), "{} stored", absent);
    }
    assert!(!store.exists("Profile::2::history").unwrap());
    assert!(!store.exists("Profile::2::roles").unwrap());
}

#[test]
fn test_load_subset_reads_only_named_fields() {
    let store = create_store();
    Profile::create(
        &store,
        [
            ("id", Value::from(3)),
            ("email", Value::from("x@y.io")),
            ("roles", string_set(&["a"])),
        ],
    )
    .unwrap();

    let partial = Profile::load(&store, 3, &["roles"]).unwrap();
    assert_eq!(partial.peek("roles"), Some(&string_set(&["a"])));
    assert_eq!(partial.peek("email"), None);
}

#[test]
fn test_load_fields_fills_a_skeleton() {
    let store = create_store();
    Profile::create(
        &store,
        [
            ("id", Value::from(4)),
            ("email", Value::from("x@y.io")),
            ("history", string_list(&["one"])),
        ],
    )
    .unwrap();

    let mut skeleton = Profile::load(&store, 4, &["id"]).unwrap();
    assert_eq!(skeleton.peek("email"), None);

    skeleton.load_fields(&store, &[]).unwrap();
    assert_eq!(skeleton.peek("email"), Some(&Value::from("x@y.io")));
    assert_eq!(skeleton.peek("history"), Some(&string_list(&["one"])));
    assert_eq!(skeleton.peek("score"), None);
}

#[test]
fn test_absent_fields_keep_in_memory_values() {
    let store = create_store();
    Item::create(&store, [("id", "x")]).unwrap();

    let mut item = Item::new_record().unwrap();
    item.set("id", "x").unwrap();
    item.set("n", 9).unwrap();
    item.load_fields(&store, &[]).unwrap();
    assert_eq!(item.peek("n"), Some(&Value::Int(9)));
}

#[test]
fn test_load_of_missing_record_leaves_fields_unset() {
    let store = create_store();
    let missing = Item::load(&store, "nobody", &[]).unwrap();
    assert_eq!(missing.to_string(), "Item(id=\"nobody\", n=None)");
    assert!(!missing.exists(&store).unwrap());
}

#[test]
fn test_fields_resolve_symbolically() {
    let schema = Profile::schema().unwrap();
    let email = schema.field("email").unwrap();
    assert_eq!(email.owner(), "Profile");
    assert_eq!(email.name(), "email");
    assert!(schema.field("history").unwrap().is_container());
    assert_eq!(
        schema.field("history").unwrap().aux_key(&schema.key("1")),
        "Profile::1::history"
    );
}
