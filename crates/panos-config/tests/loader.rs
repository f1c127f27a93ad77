//! Loading scraper settings and correction rules from TOML.

use std::path::Path;

use panos_config::{
    ConfigError, Settings, load_correction_rules, load_scraper_config, parse_correction_rules,
    parse_scraper_config,
};
use panos_model::{CorrectionAction, CorrectionTarget};
use tempfile::TempDir;

const SCRAPER_TOML: &str = r#"
[settings]
base_delay = 0.5
max_retries = 5
output_dir = "docs"

[[versions]]
name = "11.1+"

[[versions.log_types]]
name = "Traffic_Log"
url = "https://docs.example.com/11-1/traffic-log-fields"

[[versions.log_types]]
name = "Threat_Log"
url = "https://docs.example.com/11-1/threat-log-fields"

[[versions]]
name = "10.2"
"#;

const EXCEPTIONS_TOML: &str = r#"
[global_name_overrides]
"Serial Number" = "serial"

[token_corrections]
FUTURE_USER = "FUTURE_USE"

[[per_log_corrections.Traffic_Log]]
position = 3
new = "session_end_reason"

[[per_log_corrections.Traffic_Log]]
match = "src_dst"
split_into = ["src", "dst"]

[[per_log_corrections.Threat_Log]]
position = 1
"#;

fn origin() -> &'static Path {
    Path::new("test.toml")
}

#[test]
fn settings_defaults_fill_missing_keys() {
    let config = parse_scraper_config(SCRAPER_TOML, origin()).unwrap();
    let settings = &config.settings;
    assert!((settings.base_delay - 0.5).abs() < f64::EPSILON);
    assert!((settings.inter_version_delay - 2.0).abs() < f64::EPSILON);
    assert_eq!(settings.max_retries, 5);
    assert!(!settings.force_rescrape);
    assert!(!settings.dry_run);
    assert!(!settings.strip_leading_future_use);

    assert_eq!(config.versions.len(), 2);
    let names: Vec<&str> = config.versions[0].log_type_names().collect();
    assert_eq!(names, vec!["Traffic_Log", "Threat_Log"]);
    assert!(config.version("10.2").unwrap().log_types.is_empty());
    assert!(config.version("9.0").is_none());
}

#[test]
fn empty_file_is_all_defaults() {
    let config = parse_scraper_config("", origin()).unwrap();
    assert_eq!(config.settings, Settings::default());
    assert!(config.versions.is_empty());
}

#[test]
fn output_dir_resolves_against_config_directory() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("scraper.toml");
    std::fs::write(&path, SCRAPER_TOML).unwrap();
    let config = load_scraper_config(&path).unwrap();
    assert_eq!(config.settings.output_dir, temp.path().join("docs"));
}

#[test]
fn invalid_settings_are_rejected() {
    for contents in [
        "[settings]\nmax_retries = 0\n",
        "[settings]\nbase_delay = -1.0\n",
        "[settings]\ninter_version_delay = nan\n",
    ] {
        let err = parse_scraper_config(contents, origin()).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }), "{contents}: {err}");
    }
}

#[test]
fn duplicate_names_are_rejected() {
    let duplicate_version = "[[versions]]\nname = \"10.2\"\n[[versions]]\nname = \"10.2\"\n";
    assert!(matches!(
        parse_scraper_config(duplicate_version, origin()),
        Err(ConfigError::Invalid { .. })
    ));

    let duplicate_log_type = r#"
[[versions]]
name = "10.2"
[[versions.log_types]]
name = "Traffic_Log"
url = "https://a"
[[versions.log_types]]
name = "Traffic_Log"
url = "https://b"
"#;
    let err = parse_scraper_config(duplicate_log_type, origin()).unwrap_err();
    assert!(err.to_string().contains("duplicate log type 'Traffic_Log'"));
}

#[test]
fn missing_url_is_rejected() {
    let contents = r#"
[[versions]]
name = "10.2"

[[versions.log_types]]
name = "Traffic_Log"
url = " "
"#;
    assert!(matches!(
        parse_scraper_config(contents, origin()),
        Err(ConfigError::Invalid { .. })
    ));
}

#[test]
fn malformed_toml_is_a_parse_error() {
    assert!(matches!(
        parse_scraper_config("[settings\n", origin()),
        Err(ConfigError::Toml { .. })
    ));
}

#[test]
fn correction_rules_parse() {
    let rules = parse_correction_rules(EXCEPTIONS_TOML, origin()).unwrap();
    assert_eq!(rules.name_override("Serial Number"), Some("serial"));
    assert_eq!(rules.correct_token("FUTURE_USER"), "FUTURE_USE");
    assert_eq!(rules.per_log_entry_count(), 3);
    assert!(!rules.strip_leading_future_use);

    let traffic = rules.corrections_for("Traffic_Log");
    let split = traffic[1].edit().unwrap();
    assert_eq!(split.target, CorrectionTarget::Match("src_dst".into()));
    assert_eq!(
        split.action,
        CorrectionAction::Split(vec!["src".into(), "dst".into()])
    );

    // Kept as loaded; skipped when applied.
    assert!(rules.corrections_for("Threat_Log")[0].edit().is_err());
}

#[test]
fn wrongly_typed_entries_are_dropped_without_losing_the_rest() {
    let contents = r#"
[token_corrections]
FUTURE_USER = "FUTURE_USE"

[[per_log_corrections.Traffic_Log]]
position = "3"
new = "session_end_reason"

[[per_log_corrections.Traffic_Log]]
position = 1
new = "receive_time"

[[per_log_corrections.Traffic_Log]]
match = "src_dst"
split_into = "src"

[[per_log_corrections.Threat_Log]]
position = 0
new = 5
"#;
    let rules = parse_correction_rules(contents, origin()).unwrap();
    assert_eq!(rules.correct_token("FUTURE_USER"), "FUTURE_USE");
    assert_eq!(rules.per_log_entry_count(), 1);

    let traffic = rules.corrections_for("Traffic_Log");
    assert_eq!(traffic.len(), 1);
    let edit = traffic[0].edit().unwrap();
    assert_eq!(edit.target, CorrectionTarget::Position(1));
    assert_eq!(edit.action, CorrectionAction::Replace("receive_time".into()));
    assert!(rules.corrections_for("Threat_Log").is_empty());
}

#[test]
fn missing_rules_file_is_an_io_error() {
    let temp = TempDir::new().unwrap();
    let err = load_correction_rules(&temp.path().join("exceptions.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
}

#[test]
fn shipped_configuration_loads() {
    let root = Path::new(env!("CARGO_MANIFEST_DIR")).join("../..");
    let config = load_scraper_config(&root.join("scraper.toml")).unwrap();
    assert!(!config.versions.is_empty());
    assert!(config.settings.output_dir.ends_with("output"));

    let rules = load_correction_rules(&root.join("exceptions.toml")).unwrap();
    for corrections in rules.per_log_corrections.values() {
        for correction in corrections {
            assert!(correction.edit().is_ok(), "{correction:?}");
        }
    }
}
