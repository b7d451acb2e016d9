use layered_env::{define_config, docs, resolve, Load, Resolve};
use std::{env, fs, time::Duration};

define_config! {
    #[derive(Debug, Default)]
    pub struct ProcessConfig {
        #[field(env = "LAYERED_ENV_IT_HOST", doc = "Server host", default = "localhost")]
        pub host: String,

        #[field(env = "LAYERED_ENV_IT_PORT", doc = "Server port", default = "8080")]
        pub port: u16,

        #[field(env = "LAYERED_ENV_IT_INTERVAL", doc = "Poll interval", default = "1m")]
        pub interval: Duration,
    }
}

define_config! {
    #[derive(Debug, Default)]
    pub struct RequiredConfig {
        #[field(env = "LAYERED_ENV_IT_NEVER_SET", doc = "Required value")]
        pub value: String,
    }
}

#[test]
fn test_process_env_beats_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".env");
    fs::write(
        &path,
        "LAYERED_ENV_IT_HOST=file-host\nLAYERED_ENV_IT_PORT=9000\n",
    )
    .unwrap();
    env::set_var("LAYERED_ENV_IT_PORT", "7000");

    let mut config = ProcessConfig::default();
    resolve(&mut config, &path).unwrap();

    assert_eq!(config.host, "file-host");
    assert_eq!(config.port, 7000);
    assert_eq!(config.interval, Duration::from_secs(60));
}

#[test]
fn test_resolve_does_not_touch_process_env() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".env");
    fs::write(&path, "LAYERED_ENV_IT_FILE_ONLY=1\n").unwrap();

    let mut config = RequiredConfig::default();
    assert!(resolve(&mut config, &path).is_err());
    assert!(env::var_os("LAYERED_ENV_IT_FILE_ONLY").is_none());
}

#[test]
fn test_load_or_error_returns_first_error() {
    let dir = tempfile::tempdir().unwrap();

    let err = RequiredConfig::load_or_error(dir.path().join("missing.env")).unwrap_err();
    assert_eq!(
        err.to_string(),
        "missing env var LAYERED_ENV_IT_NEVER_SET (no default provided)"
    );
}

#[test]
#[should_panic(expected = "LAYERED_ENV_IT_NEVER_SET")]
fn test_load_panics_on_error() {
    let dir = tempfile::tempdir().unwrap();
    let _config = RequiredConfig::load(dir.path().join("missing.env"));
}

#[test]
fn test_write_docs_for_config() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("CONFIG.md");

    docs::write_docs(&ProcessConfig::descriptors(), &path).unwrap();

    let md = fs::read_to_string(&path).unwrap();
    assert!(md.contains("| LAYERED_ENV_IT_PORT | No | int | Server port | 8080 |"));
    assert!(md.contains("| LAYERED_ENV_IT_INTERVAL | No | Duration | Poll interval | 1m |"));
}
