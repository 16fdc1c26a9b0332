//! ファイルセッションストアのテスト

use bid_writer::session_file::FileStore;
use bid_writer_common::session::{keys, SessionContext, SessionStore};
use bid_writer_common::verification::ResendCooldown;
use tempfile::tempdir;

#[test]
fn test_sign_in_persists_across_instances() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("nested").join("session.json");

    let session = SessionContext::new(FileStore::new(&path));
    assert!(!session.is_authenticated());
    session.sign_in("tok-1", "user@example.com").unwrap();

    // 別インスタンスで読み直す
    let reopened = SessionContext::new(FileStore::new(&path));
    let current = reopened.current().expect("session should be stored");
    assert_eq!(current.email, "user@example.com");
    assert_eq!(reopened.bearer().as_deref(), Some("Bearer tok-1"));

    reopened.sign_out().unwrap();
    assert!(!SessionContext::new(FileStore::new(&path)).is_authenticated());
}

#[test]
fn test_missing_file_reads_as_empty() {
    let dir = tempdir().unwrap();
    let store = FileStore::new(dir.path().join("none.json"));
    assert_eq!(store.get(keys::TOKEN), None);
    // 存在しないキーの削除はファイルを作らない
    store.remove(keys::TOKEN).unwrap();
    assert!(!store.path().exists());
}

#[test]
fn test_corrupt_file_is_reported_on_write() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("session.json");
    std::fs::write(&path, "{not json").unwrap();

    let store = FileStore::new(&path);
    assert_eq!(store.get(keys::EMAIL), None);
    assert!(store.set(keys::EMAIL, "a@b.com").is_err());
}

#[test]
fn test_countdown_round_trip_through_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("session.json");
    let session = SessionContext::new(FileStore::new(&path));

    let mut cooldown = ResendCooldown::default();
    for _ in 0..15 {
        cooldown.tick();
    }
    cooldown.persist(&session).unwrap();

    let reopened = SessionContext::new(FileStore::new(&path));
    assert_eq!(ResendCooldown::restore(&reopened).remaining(), 45);
    // 書いた直後なので経過はほぼ0
    let remaining = reopened.store().remaining_countdown().unwrap();
    assert!(remaining <= 45 && remaining >= 43);
}

#[test]
fn test_registration_keys_are_cleared() {
    let dir = tempdir().unwrap();
    let session = SessionContext::new(FileStore::new(dir.path().join("s.json")));
    session.begin_registration("new@b.com", "pw").unwrap();
    assert_eq!(session.pending_registration().unwrap().password, "pw");

    session.finish_registration().unwrap();
    assert!(session.pending_registration().is_none());
    assert_eq!(session.store().get(keys::REG_PASSWORD), None);
}
