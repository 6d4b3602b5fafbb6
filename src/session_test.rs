use super::*;

fn connected_session() -> Session {
    Session {
        email: "user@example.com".into(),
        address: Some("0x1111111111111111111111111111111111111111".into()),
        connected: true,
    }
}

// =============================================================================
// Session
// =============================================================================

#[test]
fn serde_uses_the_cached_wire_shape() {
    let json = serde_json::to_string(&connected_session()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["email"], "user@example.com");
    assert_eq!(value["address"], "0x1111111111111111111111111111111111111111");
    assert_eq!(value["isConnected"], true);
}

#[test]
fn serde_round_trips_pending_address() {
    let session = Session { email: "user@example.com".into(), address: None, connected: true };
    let json = serde_json::to_string(&session).unwrap();
    let restored: Session = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, session);
    assert!(!restored.is_complete());
}

#[test]
fn display_address_uses_placeholder_until_wallet_materializes() {
    let mut session = connected_session();
    assert_eq!(session.display_address(), "0x1111111111111111111111111111111111111111");

    session.address = None;
    assert_eq!(session.display_address(), "connecting wallet...");
}

// =============================================================================
// MemorySessionCache
// =============================================================================

#[test]
fn memory_cache_round_trip() {
    let cache = MemorySessionCache::new();
    assert!(cache.load().is_none());

    cache.store(&connected_session());
    assert_eq!(cache.load(), Some(connected_session()));

    cache.clear();
    assert!(cache.load().is_none());
}

// =============================================================================
// FsSessionCache
// =============================================================================

fn scratch_dir() -> PathBuf {
    std::env::temp_dir().join(format!("guva-session-test-{}", uuid::Uuid::new_v4()))
}

#[test]
fn fs_cache_round_trip() {
    let dir = scratch_dir();
    let cache = FsSessionCache::new(&dir);

    assert!(cache.load().is_none());
    cache.store(&connected_session());
    assert_eq!(cache.load(), Some(connected_session()));

    cache.clear();
    assert!(cache.load().is_none());

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn fs_cache_discards_corrupt_slot() {
    let dir = scratch_dir();
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join(format!("{SESSION_CACHE_KEY}.json")), "not json").unwrap();

    let cache = FsSessionCache::new(&dir);
    assert!(cache.load().is_none());

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn fs_cache_clear_is_idempotent() {
    let dir = scratch_dir();
    let cache = FsSessionCache::new(&dir);
    cache.clear();
    cache.clear();
    let _ = std::fs::remove_dir_all(&dir);
}
