use super::load::{default_config_path, default_data_dir, resolve_config_path};
use super::schema::*;
use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

fn env_lock() -> std::sync::MutexGuard<'static, ()> {
    ENV_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|e| e.into_inner())
}

struct EnvGuard {
    key: &'static str,
    old: Option<std::ffi::OsString>,
}

impl EnvGuard {
    fn set(key: &'static str, val: &str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::set_var(key, val);
        }
        Self { key, old }
    }

    fn remove(key: &'static str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::remove_var(key);
        }
        Self { key, old }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        match self.old.take() {
            Some(v) => unsafe {
                std::env::set_var(self.key, v);
            },
            None => unsafe {
                std::env::remove_var(self.key);
            },
        }
    }
}

#[test]
fn resolve_config_path_prefers_melody_config_path() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("MELODY_CONFIG_PATH", "/tmp/melody-test-config.toml");
    assert_eq!(
        resolve_config_path().unwrap(),
        PathBuf::from("/tmp/melody-test-config.toml")
    );
}

#[test]
fn default_config_path_prefers_xdg_config_home() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("XDG_CONFIG_HOME", "/tmp/xdg-config-home");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-should-not-win");

    let p = default_config_path().unwrap();
    assert_eq!(
        p,
        PathBuf::from("/tmp/xdg-config-home")
            .join("melody")
            .join("config.toml")
    );
}

#[test]
fn default_data_dir_falls_back_to_home_local_share() {
    let _lock = env_lock();
    let _g1 = EnvGuard::remove("XDG_DATA_HOME");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-dir");

    let p = default_data_dir().unwrap();
    assert_eq!(
        p,
        PathBuf::from("/tmp/home-dir")
            .join(".local")
            .join("share")
            .join("melody")
    );
}

#[test]
fn defaults_match_player_expectations() {
    let s = Settings::default();
    assert!((s.player.volume - 0.7).abs() < f32::EPSILON);
    assert!(!s.player.shuffle);
    assert!(!s.player.repeat);
    assert_eq!(s.fetch.timeout_secs, 120);
    assert_eq!(s.fetch.downloader, "yt-dlp");
    assert_eq!(s.library.extensions.len(), 6);
    assert!(s.validate().is_ok());
}

#[test]
fn validate_rejects_out_of_range_values() {
    let mut s = Settings::default();
    s.player.volume = 1.5;
    assert!(s.validate().is_err());

    let mut s = Settings::default();
    s.fetch.timeout_secs = 0;
    assert!(s.validate().is_err());

    let mut s = Settings::default();
    s.player.tick_ms = 0;
    assert!(s.validate().is_err());
}

#[test]
fn settings_load_from_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[player]
volume = 0.25
shuffle = true
repeat = true

[storage]
data_dir = "/tmp/melody-data"

[fetch]
downloader = "/opt/bin/yt-dlp"
timeout_secs = 30

[library]
extensions = ["mp3"]
recursive = false

[logging]
filter = "melody=debug"
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("MELODY_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::remove("MELODY__PLAYER__VOLUME");

    let s = Settings::load().unwrap();
    assert!((s.player.volume - 0.25).abs() < f32::EPSILON);
    assert!(s.player.shuffle);
    assert!(s.player.repeat);
    assert_eq!(s.data_dir(), PathBuf::from("/tmp/melody-data"));
    assert_eq!(s.log_dir(), PathBuf::from("/tmp/melody-data/logs"));
    assert_eq!(s.fetch.downloader, "/opt/bin/yt-dlp");
    assert_eq!(s.fetch.timeout_secs, 30);
    assert_eq!(s.library.extensions, vec!["mp3".to_string()]);
    assert!(!s.library.recursive);
    assert_eq!(s.logging.filter, "melody=debug");
}

#[test]
fn settings_env_overrides_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[fetch]
timeout_secs = 60
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("MELODY_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::set("MELODY__FETCH__TIMEOUT_SECS", "5");

    let s = Settings::load().unwrap();
    assert_eq!(s.fetch.timeout_secs, 5);
}
