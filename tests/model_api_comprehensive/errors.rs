//! Error behaviour: configuration, validation, keys and store failures

use crate::*;
use kvmodel::StoreError;

// =============================================================================
// CONFIGURATION
// =============================================================================

#[test]
fn test_model_without_primary_key() {
    struct Keyless;

    impl Model for Keyless {
        const NAME: &'static str = "Keyless";

        fn declare(builder: ModelBuilder) -> Result<ModelBuilder> {
            Ok(builder.field(Field::new("n", Integer)))
        }
    }

    assert!(Keyless::schema().unwrap_err().is_configuration());
}

#[test]
fn test_model_with_two_primary_keys() {
    struct TwoKeys;

    impl Model for TwoKeys {
        const NAME: &'static str = "TwoKeys";

        fn declare(builder: ModelBuilder) -> Result<ModelBuilder> {
            Ok(builder
                .field(Field::new("a", Text).primary_key())
                .field(Field::new("b", Text).primary_key()))
        }
    }

    assert!(TwoKeys::schema().unwrap_err().is_configuration());
}

#[test]
fn test_abstract_model_refuses_persistence() {
    let store = create_store();
    let schema = Timestamped::schema().unwrap();
    assert!(schema.is_abstract());

    let err = Timestamped::create(&store, [("created", Value::Null)]).unwrap_err();
    assert!(err.is_configuration());
    assert!(Timestamped::load(&store, "x", &[]).unwrap_err().is_configuration());
    assert!(Timestamped::new_record().unwrap().delete(&store).unwrap_err().is_configuration());
    assert_eq!(store.round_trips(), 0);
}

// =============================================================================
// PRIMARY KEY
// =============================================================================

#[test]
fn test_create_without_primary_key() {
    let store = create_store();
    let err = Item::create(&store, [("n", 1)]).unwrap_err();
    assert!(err.is_missing_primary_key());
    assert_eq!(store.round_trips(), 0);
}

#[test]
fn test_unknown_field_in_values() {
    let store = create_store();
    let err = Item::create(&store, [("id", "x"), ("colour", "red")]).unwrap_err();
    assert!(err.is_unknown_field());
    assert_eq!(store.key_count(), 0);
}

// =============================================================================
// VALIDATION
// =============================================================================

#[test]
fn test_validation_failure_leaves_store_untouched() {
    let store = create_store();
    let mut note = Note::create(&store, [("id", "n1"), ("body", "first")]).unwrap();
    let trips = store.round_trips();

    note.set("body", "x".repeat(141)).unwrap();
    let err = note.save(&store, &[]).unwrap_err();
    assert!(err.is_validation());
    assert_eq!(
        err.field_errors().unwrap().get("body").unwrap(),
        &["max length is 140".to_string()]
    );
    assert_eq!(store.round_trips(), trips);
    assert_eq!(store.hget("Note::n1", "body").unwrap(), Some(bytes("first")));
}

#[test]
fn test_missing_required_field() {
    let store = create_store();
    let err = Note::create(&store, [("id", "n2")]).unwrap_err();
    let errors = err.field_errors().unwrap();
    assert_eq!(errors.get("body").unwrap(), &["required field".to_string()]);
    assert!(!store.exists("Note::n2").unwrap());
}

#[test]
fn test_email_regex() {
    let store = create_store();
    let err = Profile::create(&store, [("id", Value::from(1)), ("email", Value::from("nope"))])
        .unwrap_err();
    assert!(err.field_errors().unwrap().contains("email"));
}

#[test]
fn test_validate_reports_without_io() {
    let mut profile = Profile::new_record().unwrap();
    profile.set("id", 1).unwrap();
    profile.set("v4", Value::from(std::net::Ipv6Addr::LOCALHOST)).unwrap();
    let errors: FieldErrors = match profile.validate(&[]) {
        Err(Error::Validation(errors)) => errors,
        other => panic!("expected validation error, got {:?}", other),
    };
    assert_eq!(errors.fields().collect::<Vec<_>>(), vec!["v4"]);
}

// =============================================================================
// STORE FAILURES
// =============================================================================

#[test]
fn test_wrong_type_key_surfaces_as_store_command_error() {
    let store = create_store();
    // Occupy the record's hash key with a list
    store.rpush("Item::x", b"not a hash").unwrap();

    let err = Item::create(&store, [("id", Value::from("x")), ("n", Value::from(1))]).unwrap_err();
    match err {
        Error::StoreCommand {
            position, command, ..
        } => {
            assert_eq!(position, 0);
            assert_eq!(command, "HSET");
        }
        other => panic!("expected store command error, got {:?}", other),
    }
}

#[test]
fn test_load_from_wrong_type_key() {
    let store = create_store();
    store.rpush("Item::x", b"not a hash").unwrap();
    let err = Item::load(&store, "x", &[]).unwrap_err();
    assert!(matches!(err, Error::StoreCommand { position: 0, .. }));
}

#[test]
fn test_corrupt_stored_value() {
    let store = create_store();
    store.hset("Item::x", "n", b"five").unwrap();
    let err = Item::load(&store, "x", &["n"]).unwrap_err();
    assert!(err.is_conversion());
}

#[test]
fn test_store_refusing_transactions() {
    let store = MemoryStore::with_config(StoreConfig::new().transactions(false));
    let err = Item::create(&store, [("id", "x")]).unwrap_err();
    assert!(matches!(err, Error::Store(StoreError::TransactionsDisabled)));
    assert_eq!(store.key_count(), 0);

    // Plain pipelines still work
    assert!(Item::load(&store, "x", &[]).is_ok());
}

#[test]
fn test_batch_limit() {
    let store = MemoryStore::with_config(StoreConfig::new().max_batch_len(3));
    let err = Profile::create(
        &store,
        [("id", Value::from(1)), ("history", string_list(&["a", "b", "c"]))],
    )
    .unwrap_err();
    assert!(matches!(err, Error::Store(StoreError::BatchTooLarge { .. })));
}
