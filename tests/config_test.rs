use rask_error_consolidator::app::{Config, ConfigError, LogLevel};
use serial_test::serial;
use std::{env, fs, path::PathBuf};
use tempfile::TempDir;

// Helper function to clean all environment variables before and after tests
fn clean_all_env_vars() {
    let env_vars = [
        "INPUT_FILE",
        "OUTPUT_FILE",
        "RANKED_OUTPUT_FILE",
        "MIN_OCCURRENCES_FOR_ISSUE",
        "MAX_ISSUES_PER_RUN",
        "OCCURRENCE_SAMPLE_CAP",
        "MESSAGE_HASH_PREFIX_LENGTH",
        "FINGERPRINT_LENGTH",
        "PARALLEL_CHUNK_SIZE",
        "LOG_LEVEL",
        "CONFIG_FILE",
    ];

    unsafe {
        for var in &env_vars {
            env::remove_var(var);
        }
    }
}

#[test]
#[serial]
fn test_config_defaults_from_empty_args() {
    clean_all_env_vars();

    let config = Config::from_args(["rask-error-consolidator"]).unwrap();

    assert_eq!(config, Config::default());
    assert_eq!(config.input, PathBuf::from("data/errors.json"));
    assert_eq!(config.min_occurrences, 3);
    assert_eq!(config.max_groups, 10);
    assert_eq!(config.log_level, LogLevel::Info);
}

#[test]
#[serial]
fn test_config_from_args() {
    clean_all_env_vars();

    let args = vec![
        "rask-error-consolidator",
        "--input",
        "/var/data/errors.json",
        "--output",
        "/var/data/consolidated_errors.json",
        "--min-occurrences",
        "5",
        "--max-groups",
        "3",
        "--fingerprint-length",
        "16",
        "--parallel-chunk-size",
        "500",
        "--log-level",
        "debug",
    ];

    let config = Config::from_args(args).unwrap();

    assert_eq!(config.input, PathBuf::from("/var/data/errors.json"));
    assert_eq!(
        config.output,
        Some(PathBuf::from("/var/data/consolidated_errors.json"))
    );
    assert_eq!(config.parallel_chunk_size, 500);
    assert_eq!(config.log_level, LogLevel::Debug);

    let consolidation = config.consolidation();
    assert_eq!(consolidation.min_occurrences_for_significance, 5);
    assert_eq!(consolidation.max_groups_to_rank, 3);
    assert_eq!(consolidation.fingerprint_length, 16);
    assert_eq!(consolidation.occurrence_sample_cap, 5);
}

#[test]
#[serial]
fn test_config_from_env() {
    clean_all_env_vars();

    unsafe {
        env::set_var("MIN_OCCURRENCES_FOR_ISSUE", "7");
        env::set_var("MAX_ISSUES_PER_RUN", "2");
        env::set_var("INPUT_FILE", "/tmp/errors.json");
    }

    let config = Config::from_args(["rask-error-consolidator"]).unwrap();
    assert_eq!(config.min_occurrences, 7);
    assert_eq!(config.max_groups, 2);
    assert_eq!(config.input, PathBuf::from("/tmp/errors.json"));

    clean_all_env_vars();
}

#[test]
#[serial]
fn test_invalid_args_are_rejected() {
    clean_all_env_vars();

    let result = Config::from_args(["rask-error-consolidator", "--min-occurrences", "0"]);
    assert!(matches!(result, Err(ConfigError::InvalidConfig(_))));

    let result = Config::from_args(["rask-error-consolidator", "--fingerprint-length", "40"]);
    assert!(matches!(result, Err(ConfigError::InvalidConfig(_))));
}

#[test]
#[serial]
fn test_config_file_replaces_cli_values() {
    clean_all_env_vars();
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("consolidator.toml");

    fs::write(
        &config_path,
        r#"
input = "/data/errors.json"
ranked_output = "/data/ranked.json"
min_occurrences = 4
log_level = "warn"
"#,
    )
    .unwrap();

    let config = Config::load([
        "rask-error-consolidator",
        "--min-occurrences",
        "9",
        "--config-file",
        config_path.to_str().unwrap(),
    ])
    .unwrap();

    assert_eq!(config.input, PathBuf::from("/data/errors.json"));
    assert_eq!(config.ranked_output, Some(PathBuf::from("/data/ranked.json")));
    assert_eq!(config.min_occurrences, 4);
    assert_eq!(config.log_level, LogLevel::Warn);
    // Unset keys keep their defaults
    assert_eq!(config.max_groups, 10);
}

#[test]
#[serial]
fn test_config_file_errors() {
    clean_all_env_vars();
    let temp_dir = TempDir::new().unwrap();

    let missing = Config::from_file(temp_dir.path().join("missing.toml"));
    assert!(matches!(missing, Err(ConfigError::FileError(_))));

    let broken_path = temp_dir.path().join("broken.toml");
    fs::write(&broken_path, "min_occurrences = \"lots\"").unwrap();
    let broken = Config::from_file(&broken_path);
    assert!(matches!(broken, Err(ConfigError::ParseError(_))));

    let invalid_path = temp_dir.path().join("invalid.toml");
    fs::write(&invalid_path, "fingerprint_length = 0").unwrap();
    let invalid = Config::from_file(&invalid_path);
    assert!(matches!(invalid, Err(ConfigError::InvalidConfig(_))));
}
