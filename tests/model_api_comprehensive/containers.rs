//! List and set field tests

use crate::*;

#[test]
fn test_list_save_fully_replaces() {
    let store = create_store();
    store.rpush("Profile::1::history", b"stale").unwrap();

    let mut profile = Profile::new_record().unwrap();
    profile.set("id", 1).unwrap();
    profile.set("history", string_list(&["a", "b", "c"])).unwrap();
    profile.save(&store, &[]).unwrap();

    assert_eq!(
        store.lrange("Profile::1::history", 0, -1).unwrap(),
        vec![bytes("a"), bytes("b"), bytes("c")]
    );

    let loaded = Profile::load(&store, 1, &["history"]).unwrap();
    assert_eq!(loaded.peek("history"), Some(&string_list(&["a", "b", "c"])));
}

#[test]
fn test_list_save_is_idempotent() {
    let store = create_store();
    let mut profile =
        Profile::create(&store, [("id", Value::from(2)), ("history", string_list(&["x", "y"]))])
            .unwrap();
    profile.save(&store, &[]).unwrap();
    profile.save(&store, &["history"]).unwrap();
    assert_eq!(store.lrange("Profile::2::history", 0, -1).unwrap().len(), 2);
}

#[test]
fn test_set_field_dedups_and_replaces() {
    let store = create_store();
    let mut profile =
        Profile::create(&store, [("id", Value::from(3)), ("roles", string_list(&["a", "a", "b"]))])
            .unwrap();
    assert_eq!(profile.peek("roles"), Some(&string_set(&["a", "b"])));
    assert_eq!(store.smembers("Profile::3::roles").unwrap().len(), 2);

    profile.set("roles", string_set(&["c"])).unwrap();
    profile.save(&store, &["roles"]).unwrap();
    assert_eq!(store.smembers("Profile::3::roles").unwrap(), vec![bytes("c")]);
}

#[test]
fn test_emptied_container_is_removed_from_store_only_on_delete() {
    let store = create_store();
    let mut profile =
        Profile::create(&store, [("id", Value::from(4)), ("history", string_list(&["a"]))])
            .unwrap();

    // Unset containers are skipped by save, so the stored list survives
    profile.unset("history").unwrap();
    profile.save(&store, &[]).unwrap();
    assert!(store.exists("Profile::4::history").unwrap());

    profile.delete(&store).unwrap();
    assert!(!store.exists("Profile::4::history").unwrap());
}

#[test]
fn test_empty_container_reads_as_unset() {
    let mut profile = Profile::new_record().unwrap();
    profile.set("history", Value::List(vec![])).unwrap();
    assert_eq!(profile.get("history").unwrap(), Value::Null);
    assert_eq!(profile.peek("history"), None);
}

#[test]
fn test_nested_container_declaration_fails() {
    struct Nested;

    impl Model for Nested {
        const NAME: &'static str = "Nested";

        fn declare(builder: ModelBuilder) -> Result<ModelBuilder> {
            Ok(builder
                .field(Field::new("id", Text).primary_key())
                .field(Field::new("matrix", List::of(List::of(Integer)?)?)))
        }
    }

    let err = Nested::schema().unwrap_err();
    assert!(err.is_configuration());
}
