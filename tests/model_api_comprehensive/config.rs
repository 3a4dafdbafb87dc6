//! Store configuration tests

use crate::*;
use std::io::Write;
use std::time::Duration;

#[test]
fn test_store_from_toml_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        "initial_capacity = 64\nmax_batch_len = 100\ntransactions = true\ncommand_timeout_ms = 250"
    )
    .unwrap();

    let config = StoreConfig::from_file(file.path()).unwrap();
    assert_eq!(config.max_batch_len, Some(100));
    assert_eq!(config.timeout(), Some(Duration::from_millis(250)));

    let store = MemoryStore::with_config(config);
    let item = Item::create(&store, [("id", "cfg")]).unwrap();
    assert!(item.exists(&store).unwrap());
}

#[test]
fn test_partial_toml_uses_defaults() {
    let config = StoreConfig::from_toml_str("transactions = false").unwrap();
    assert!(!config.transactions);
    assert_eq!(config.max_batch_len, None);
}
