use super::{load_settings_from, parse_flag, Settings};

use std::{
    collections::HashMap,
    env, fs,
    path::{Path, PathBuf},
    time::{SystemTime, UNIX_EPOCH},
};

fn temp_config(name: &str, contents: &str) -> PathBuf {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let dir = env::temp_dir().join(format!("area_tool_config_{name}_{suffix}"));
    fs::create_dir_all(&dir).expect("temp dir");
    let path = dir.join("area_tool.toml");
    fs::write(&path, contents).expect("write config");
    path
}

fn no_env(_: &str) -> Option<String> {
    None
}

#[test]
fn missing_file_and_env_yield_defaults() {
    let settings = load_settings_from(Path::new("/nonexistent/area_tool.toml"), no_env).settings;
    assert_eq!(settings, Settings::default());
    assert_eq!(settings.log_filter, "info");
    assert!(settings.print_final_state);
}

#[test]
fn file_values_override_defaults() {
    let path = temp_config(
        "file_values",
        "snapshot_path = \"town.json\"\nevents_path = \"events.jsonl\"\nlog_filter = \"debug\"\nprint_final_state = \"false\"\n",
    );

    let loaded = load_settings_from(&path, no_env);
    let settings = loaded.settings;

    assert!(loaded.warnings.is_empty());
    assert_eq!(settings.snapshot_path, Some(PathBuf::from("town.json")));
    assert_eq!(settings.events_path, Some(PathBuf::from("events.jsonl")));
    assert_eq!(settings.log_filter, "debug");
    assert!(!settings.print_final_state);

    fs::remove_dir_all(path.parent().expect("parent")).expect("cleanup");
}

#[test]
fn env_overrides_file() {
    let path = temp_config("env_overrides", "log_filter = \"debug\"\n");
    let vars: HashMap<&str, &str> = HashMap::from([
        ("AREA_TOOL__LOG_FILTER", "area_core=trace"),
        ("AREA_TOOL__SNAPSHOT_PATH", "/tmp/snap.json"),
        ("AREA_TOOL__PRINT_FINAL_STATE", "off"),
    ]);

    let settings = load_settings_from(&path, |key| vars.get(key).map(|v| v.to_string())).settings;

    assert_eq!(settings.log_filter, "area_core=trace");
    assert_eq!(settings.snapshot_path, Some(PathBuf::from("/tmp/snap.json")));
    assert_eq!(settings.events_path, None);
    assert!(!settings.print_final_state);

    fs::remove_dir_all(path.parent().expect("parent")).expect("cleanup");
}

#[test]
fn malformed_file_keeps_defaults_and_reports_a_warning() {
    let path = temp_config("malformed", "this is = = not toml");

    let loaded = load_settings_from(&path, no_env);

    assert_eq!(loaded.settings, Settings::default());
    assert_eq!(loaded.warnings.len(), 1);
    assert!(loaded.warnings[0].starts_with("ignoring unreadable config file"));
    assert!(loaded.warnings[0].contains(&path.display().to_string()));
    fs::remove_dir_all(path.parent().expect("parent")).expect("cleanup");
}

#[test]
fn unparseable_flags_are_reported_and_left_at_default() {
    let path = temp_config("bad_flag", "print_final_state = \"sometimes\"\n");
    let vars: HashMap<&str, &str> = HashMap::from([("AREA_TOOL__PRINT_FINAL_STATE", "perhaps")]);

    let loaded = load_settings_from(&path, |key| vars.get(key).map(|v| v.to_string()));

    assert!(loaded.settings.print_final_state);
    assert_eq!(loaded.warnings.len(), 2);
    assert!(loaded.warnings[0].contains("print_final_state = 'sometimes'"));
    assert!(loaded.warnings[1].contains("AREA_TOOL__PRINT_FINAL_STATE='perhaps'"));
    fs::remove_dir_all(path.parent().expect("parent")).expect("cleanup");
}

#[test]
fn flags_accept_common_spellings() {
    assert_eq!(parse_flag("TRUE"), Some(true));
    assert_eq!(parse_flag(" yes "), Some(true));
    assert_eq!(parse_flag("0"), Some(false));
    assert_eq!(parse_flag("maybe"), None);
}
