use std::fs;

use strongbox_core::codec::{self, CostParams};
use strongbox_core::token::{check_token, token_path, TOKEN_FILE_NAME};
use strongbox_core::{PasswordStore, VaultError};
use tempfile::tempdir;

fn fast() -> CostParams {
    CostParams::new(10).expect("valid work factor")
}

// The scrypt stanza in an age header reads `-> scrypt <salt> <work factor>`.
fn recorded_work_factor(path: &std::path::Path) -> u8 {
    let bytes = fs::read(path).expect("read file");
    let header = String::from_utf8_lossy(&bytes);
    let stanza = header
        .lines()
        .find(|line| line.starts_with("-> scrypt "))
        .expect("scrypt stanza");
    stanza
        .split_whitespace()
        .last()
        .and_then(|value| value.parse().ok())
        .expect("work factor")
}

#[test]
fn test_empty_directory_end_to_end() {
    let dir = tempdir().expect("tempdir");
    let store = PasswordStore::new(dir.path()).with_cost(fast());

    let password = store
        .create_password("hunter2", "mail", 16)
        .expect("create should succeed");
    assert_eq!(password.chars().count(), 16);
    assert!(dir.path().join(TOKEN_FILE_NAME).is_file());
    assert!(dir.path().join("mail").is_file());

    let read = store
        .read_password("hunter2", "mail")
        .expect("read should succeed");
    assert_eq!(read, password);

    let result = store.read_password("wrong", "mail");
    assert!(matches!(result, Err(VaultError::AuthenticationFailed)));
}

#[test]
fn test_rotation_round_trip() {
    let dir = tempdir().expect("tempdir");
    let store = PasswordStore::new(dir.path()).with_cost(fast());
    let names = ["bank", "google", "mail"];
    let passwords: Vec<String> = names
        .iter()
        .map(|name| store.create_password("old key", name, 24).expect("create"))
        .collect();

    let report = store
        .rotate_passwords("old key", "new key")
        .expect("rotate should succeed");
    assert!(report.is_complete());
    assert_eq!(report.rotated.len(), names.len());

    for (name, password) in names.iter().zip(&passwords) {
        assert_eq!(&store.read_password("new key", name).expect("read"), password);
        let old = codec::read_file(&dir.path().join(name), "old key");
        assert!(matches!(old, Err(VaultError::Format { .. })));
    }
    assert!(check_token("new key", dir.path(), &fast()).expect("check"));
    assert!(!check_token("old key", dir.path(), &fast()).expect("check"));
}

#[test]
fn test_entries_written_with_different_costs_stay_readable() {
    let dir = tempdir().expect("tempdir");
    let cheap = PasswordStore::new(dir.path()).with_cost(fast());
    let dearer = PasswordStore::new(dir.path()).with_cost(CostParams::new(12).expect("cost"));

    let first = cheap.create_password("key", "first", 12).expect("create");
    let second = dearer.create_password("key", "second", 12).expect("create");

    assert_eq!(cheap.read_password("key", "second").expect("read"), second);
    assert_eq!(dearer.read_password("key", "first").expect("read"), first);
}

#[test]
fn test_tampered_entry_reports_entry_name() {
    let dir = tempdir().expect("tempdir");
    let store = PasswordStore::new(dir.path()).with_cost(fast());
    store.create_password("key", "mail", 16).expect("create");

    let path = dir.path().join("mail");
    let mut bytes = fs::read(&path).expect("read");
    let last = bytes.len() - 1;
    bytes[last] ^= 0x01;
    fs::write(&path, bytes).expect("write");

    match store.read_password("key", "mail") {
        Err(VaultError::Format { name, .. }) => assert_eq!(name, "mail"),
        other => panic!("expected format error, got {:?}", other),
    }
}

#[test]
fn test_token_is_not_listed_and_cannot_be_overwritten() {
    let dir = tempdir().expect("tempdir");
    let store = PasswordStore::new(dir.path()).with_cost(fast());
    store.create_password("key", "mail", 16).expect("create");
    let token_before = fs::read(token_path(dir.path())).expect("token");

    assert!(store.create_password("key", TOKEN_FILE_NAME, 16).is_err());
    assert_eq!(fs::read(token_path(dir.path())).expect("token"), token_before);
    assert_eq!(store.list_passwords().expect("list"), vec!["mail".to_string()]);
}

#[test]
fn test_token_and_rotation_use_store_cost() {
    let dir = tempdir().expect("tempdir");
    let store = PasswordStore::new(dir.path()).with_cost(fast());
    store.create_password("old", "mail", 16).expect("create");

    assert_eq!(recorded_work_factor(&token_path(dir.path())), 10);
    assert_eq!(recorded_work_factor(&dir.path().join("mail")), 10);

    let rotating = PasswordStore::new(dir.path()).with_cost(CostParams::new(11).expect("cost"));
    assert!(rotating.rotate_passwords("old", "new").expect("rotate").is_complete());

    assert_eq!(recorded_work_factor(&token_path(dir.path())), 11);
    assert_eq!(recorded_work_factor(&dir.path().join("mail")), 11);
}
