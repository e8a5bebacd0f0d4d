use super::*;

#[test]
fn load_or_default_on_missing_key_is_empty() {
    let store = MemoryStore::new();
    let v: Vec<String> = load_or_default(&store, "nothing");
    assert!(v.is_empty());
}

#[test]
fn load_or_default_on_corrupt_value_is_empty() {
    let mut store = MemoryStore::new();
    store.set(FAVORITES_KEY, "{not json".to_string()).unwrap();
    let v: Vec<String> = load_or_default(&store, FAVORITES_KEY);
    assert!(v.is_empty());
}

#[test]
fn load_or_default_on_wrong_shape_is_empty() {
    let mut store = MemoryStore::new();
    store.set(FAVORITES_KEY, r#"{"a": 1}"#.to_string()).unwrap();
    let v: Vec<String> = load_or_default(&store, FAVORITES_KEY);
    assert!(v.is_empty());
}

#[test]
fn save_then_load_returns_value() {
    let mut store = MemoryStore::new();
    save(&mut store, FAVORITES_KEY, &vec!["1", "2"]).unwrap();
    let v: Vec<String> = load_or_default(&store, FAVORITES_KEY);
    assert_eq!(v, vec!["1".to_string(), "2".to_string()]);
}

#[test]
fn file_store_persists_across_instances() {
    let dir = tempfile::tempdir().unwrap();

    {
        let mut store = FileStore::open(dir.path().join("data")).unwrap();
        store.set(PLAYLIST_KEY, "[]".to_string()).unwrap();
        store.set(PLAYLIST_KEY, r#"["x"]"#.to_string()).unwrap();
    }

    let store = FileStore::open(dir.path().join("data")).unwrap();
    assert_eq!(store.get(PLAYLIST_KEY).as_deref(), Some(r#"["x"]"#));
    assert!(store.dir().join("playlist.json").is_file());
    assert!(!store.dir().join(".playlist.json.tmp").exists());
    assert_eq!(store.get(RECENTLY_PLAYED_KEY), None);
}

#[test]
fn unreadable_file_is_kept_aside_before_the_next_write() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = FileStore::open(dir.path()).unwrap();
    let original: &[u8] = b"[\"a\",\xff\xfe]";
    std::fs::write(dir.path().join("favorites.json"), original).unwrap();

    let ids: Vec<String> = load_or_default(&store, FAVORITES_KEY);
    assert!(ids.is_empty());

    save(&mut store, FAVORITES_KEY, &vec!["b"]).unwrap();

    let backup = store.backup_path_for(FAVORITES_KEY);
    assert_eq!(std::fs::read(&backup).unwrap(), original);
    assert_eq!(store.get(FAVORITES_KEY).as_deref(), Some(r#"["b"]"#));
}
