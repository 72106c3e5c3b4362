use pump_status::config::Config;
use std::fs;

#[test]
fn save_and_load_yaml_roundtrip() {
    let tmp_dir = tempfile::tempdir().unwrap();
    let path = tmp_dir.path().join("config.yaml");

    let mut cfg = Config::default();
    cfg.thresholds.expiry.critical = 4 * 3_600;
    cfg.simulation.seed = Some(42);

    cfg.save_to_file(&path).unwrap();
    let loaded = Config::from_file(&path).unwrap();

    assert_eq!(loaded, cfg);
}

#[test]
fn load_without_path_uses_defaults() {
    let cfg = Config::load(None).unwrap();
    assert_eq!(cfg, Config::default());
}

#[test]
fn load_rejects_invalid_thresholds() {
    let tmp = tempfile::NamedTempFile::new().unwrap();
    fs::write(
        tmp.path(),
        "thresholds:\n  expiry:\n    critical: -1\n    warning: 86400\n",
    )
    .unwrap();
    let err = Config::load(Some(tmp.path())).unwrap_err();
    assert!(err.to_string().contains("thresholds.expiry.critical"));
}

#[test]
fn from_file_with_invalid_yaml_fails() {
    let tmp = tempfile::NamedTempFile::new().unwrap();
    fs::write(tmp.path(), b"thresholds: [unclosed").unwrap();
    let err = Config::from_file(tmp.path()).unwrap_err();
    let msg = format!("{}", err);
    assert!(msg.contains("Serialization error"));
}

#[test]
fn missing_file_is_io_error() {
    let tmp_dir = tempfile::tempdir().unwrap();
    let err = Config::from_file(tmp_dir.path().join("absent.yaml")).unwrap_err();
    assert!(err.to_string().starts_with("I/O error"));
}
