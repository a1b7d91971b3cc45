// file_store_tests.rs - ファイルストア操作のテスト

use crudpad::{ErrorKind, FileStore};
use std::fs;
use tempfile::tempdir;

#[test]
fn test_create_then_read_roundtrip() {
    let dir = tempdir().unwrap();
    let store = FileStore::new(dir.path());

    store.create("f.txt", "hello").unwrap();
    assert_eq!(store.read("f.txt").unwrap(), "hello");
}

#[test]
fn test_append_sequence_on_absent_file() {
    let dir = tempdir().unwrap();
    let store = FileStore::new(dir.path());

    assert!(!store.exists("f.txt"));
    store.append("f.txt", "a").unwrap();
    assert_eq!(store.read("f.txt").unwrap(), "a");
    store.append("f.txt", "b").unwrap();
    assert_eq!(store.read("f.txt").unwrap(), "a\nb");
}

#[test]
fn test_update_replaces_all_occurrences() {
    let dir = tempdir().unwrap();
    let store = FileStore::new(dir.path());

    store.create("f.txt", "aaa").unwrap();
    store.update("f.txt", "a", "x").unwrap();
    assert_eq!(store.read("f.txt").unwrap(), "xxx");
}

#[test]
fn test_update_multi_character_pattern() {
    let dir = tempdir().unwrap();
    let store = FileStore::new(dir.path());

    store.create("f.txt", "cat dog cat\ncat").unwrap();
    let report = store.update("f.txt", "cat", "owl").unwrap();
    assert_eq!(report.replacements, 3);
    assert_eq!(store.read("f.txt").unwrap(), "owl dog owl\nowl");
}

#[test]
fn test_update_absent_search_text_is_reported() {
    let dir = tempdir().unwrap();
    let store = FileStore::new(dir.path());
    store.create("f.txt", "unchanged").unwrap();
    let before = fs::metadata(dir.path().join("f.txt")).unwrap().modified().unwrap();

    let err = store.update("f.txt", "missing", "x").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::SearchTextAbsent);
    assert_eq!(store.read("f.txt").unwrap(), "unchanged");
    let after = fs::metadata(dir.path().join("f.txt")).unwrap().modified().unwrap();
    assert_eq!(before, after);
}

#[test]
fn test_delete_missing_file_mutates_nothing() {
    let dir = tempdir().unwrap();
    let store = FileStore::new(dir.path());
    store.create("other.txt", "stay").unwrap();

    let err = store.delete("missing.txt").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    assert_eq!(store.read("other.txt").unwrap(), "stay");
}

#[test]
fn test_absolute_path_ignores_base_dir() {
    let base = tempdir().unwrap();
    let elsewhere = tempdir().unwrap();
    let store = FileStore::new(base.path());
    let absolute = elsewhere.path().join("abs.txt");

    store.create(&absolute, "far away").unwrap();
    assert!(absolute.is_file());
    assert!(!base.path().join("abs.txt").exists());
}

#[test]
fn test_direct_writes_mode() {
    let dir = tempdir().unwrap();
    let store = FileStore::new(dir.path()).with_direct_writes();

    store.create("f.txt", "one").unwrap();
    store.update("f.txt", "one", "two").unwrap();
    assert_eq!(store.read("f.txt").unwrap(), "two");
}

#[test]
fn test_utf8_content_preserved() {
    let dir = tempdir().unwrap();
    let store = FileStore::new(dir.path());

    store.create("jp.txt", "こんにちは\n世界").unwrap();
    store.update("jp.txt", "世界", "せかい").unwrap();
    assert_eq!(store.read("jp.txt").unwrap(), "こんにちは\nせかい");
}

#[test]
fn test_read_invalid_utf8_is_io_failure() {
    let dir = tempdir().unwrap();
    let store = FileStore::new(dir.path());
    fs::write(dir.path().join("bin.txt"), [0xff, 0xfe, 0x00]).unwrap();

    let err = store.read("bin.txt").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::IoFailure);
}
