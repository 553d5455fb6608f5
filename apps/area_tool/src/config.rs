use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

pub const CONFIG_FILE: &str = "area_tool.toml";

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub snapshot_path: Option<PathBuf>,
    /// `None` reads events from stdin.
    pub events_path: Option<PathBuf>,
    pub log_filter: String,
    pub print_final_state: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            snapshot_path: None,
            events_path: None,
            log_filter: "info".into(),
            print_final_state: true,
        }
    }
}

/// Settings plus the problems found while reading them, reported once logging is up.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LoadedSettings {
    pub settings: Settings,
    pub warnings: Vec<String>,
}

pub fn load_settings() -> LoadedSettings {
    load_settings_from(Path::new(CONFIG_FILE), |key| std::env::var(key).ok())
}

/// Defaults, then the flat keys of `config_path`, then `AREA_TOOL__*` variables.
pub fn load_settings_from<F>(config_path: &Path, env: F) -> LoadedSettings
where
    F: Fn(&str) -> Option<String>,
{
    let mut settings = Settings::default();
    let mut warnings = Vec::new();

    if let Ok(raw) = fs::read_to_string(config_path) {
        match toml::from_str::<HashMap<String, String>>(&raw) {
            Ok(file_cfg) => {
                if let Some(v) = file_cfg.get("snapshot_path") {
                    settings.snapshot_path = Some(PathBuf::from(v));
                }
                if let Some(v) = file_cfg.get("events_path") {
                    settings.events_path = Some(PathBuf::from(v));
                }
                if let Some(v) = file_cfg.get("log_filter") {
                    settings.log_filter = v.clone();
                }
                if let Some(v) = file_cfg.get("print_final_state") {
                    match parse_flag(v) {
                        Some(parsed) => settings.print_final_state = parsed,
                        None => warnings.push(format!(
                            "ignoring print_final_state = '{v}' in '{}': expected a boolean",
                            config_path.display()
                        )),
                    }
                }
            }
            Err(err) => {
                warnings.push(format!(
                    "ignoring unreadable config file '{}': {err}",
                    config_path.display()
                ));
            }
        }
    }

    if let Some(v) = env("AREA_TOOL__SNAPSHOT_PATH") {
        settings.snapshot_path = Some(PathBuf::from(v));
    }
    if let Some(v) = env("AREA_TOOL__EVENTS_PATH") {
        settings.events_path = Some(PathBuf::from(v));
    }
    if let Some(v) = env("AREA_TOOL__LOG_FILTER") {
        settings.log_filter = v;
    }
    if let Some(v) = env("AREA_TOOL__PRINT_FINAL_STATE") {
        match parse_flag(&v) {
            Some(parsed) => settings.print_final_state = parsed,
            None => warnings.push(format!(
                "ignoring AREA_TOOL__PRINT_FINAL_STATE='{v}': expected a boolean"
            )),
        }
    }

    LoadedSettings { settings, warnings }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
