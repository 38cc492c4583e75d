//! Settings store across reboots on a real filesystem. Run with
//! `cargo test -p stick-firmware --test config_reload`
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use stick_firmware::config_store::{KEY_PASSWORD, KEY_SSID};
use stick_firmware::ConfigStore;
use stick_platform::config::WLAN_PROFILE_PATH;
use stick_platform::storage_local::LocalFileStorage;
use stick_platform::Storage;
use tempfile::TempDir;

fn reload(root: &TempDir) -> ConfigStore<LocalFileStorage> {
    ConfigStore::load(LocalFileStorage::new(root.path()), WLAN_PROFILE_PATH)
}

#[test]
fn test_new_key_lost_existing_key_kept() {
    let root = TempDir::new().unwrap();
    let mut storage = LocalFileStorage::new(root.path());
    storage.create_dir("/data").unwrap();
    storage
        .write(WLAN_PROFILE_PATH, br#"{"ssid":"home"}"#)
        .unwrap();

    let mut store = reload(&root);
    store.set(KEY_SSID, "office").unwrap();
    store.set("theme", "dark").unwrap();
    assert_eq!(store.get("theme"), Some("dark"));

    let store = reload(&root);
    assert_eq!(store.get(KEY_SSID), Some("office"));
    assert_eq!(store.get("theme"), None);
}

#[test]
fn test_new_key_not_saved_by_later_write() {
    let root = TempDir::new().unwrap();
    let mut storage = LocalFileStorage::new(root.path());
    storage.create_dir("/data").unwrap();
    storage.write(WLAN_PROFILE_PATH, br#"{"ssid":"a"}"#).unwrap();

    let mut store = reload(&root);
    store.set("theme", "dark").unwrap();
    store.set(KEY_SSID, "b").unwrap();

    let store = reload(&root);
    assert_eq!(store.get(KEY_SSID), Some("b"));
    assert_eq!(store.get("theme"), None);
}

#[test]
fn test_missing_folder_and_file() {
    let root = TempDir::new().unwrap();
    let store = reload(&root);
    assert!(store.is_empty());
}

#[test]
fn test_seeded_defaults_create_the_file() {
    let root = TempDir::new().unwrap();
    let mut store = ConfigStore::load_with_defaults(
        LocalFileStorage::new(root.path()),
        WLAN_PROFILE_PATH,
        &[(KEY_SSID, ""), (KEY_PASSWORD, "")],
    );
    store.set(KEY_SSID, "home").unwrap();
    store.set(KEY_PASSWORD, "pw").unwrap();

    let store = reload(&root);
    assert_eq!(store.get(KEY_SSID), Some("home"));
    assert_eq!(store.get(KEY_PASSWORD), Some("pw"));
    assert!(root.path().join("data/wlan_profile.json").is_file());
}

#[test]
fn test_corrupt_file_is_empty_record() {
    let root = TempDir::new().unwrap();
    std::fs::create_dir(root.path().join("data")).unwrap();
    std::fs::write(root.path().join("data/wlan_profile.json"), b"{not json").unwrap();
    assert!(reload(&root).is_empty());
}
