//! Utility functions for parlab
//!
//! Loads `parlab.env` files into the process environment.

use std::path::PathBuf;

/// Candidate locations of the env file, in lookup order
pub fn env_file_paths() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from("/usr/local/etc/parlab/parlab.env")];
    if let Some(config) = dirs::config_dir() {
        paths.push(config.join("parlab/parlab.env"));
    }
    if let Some(home) = dirs::home_dir() {
        paths.push(home.join(".config/parlab/parlab.env"));
    }
    paths
}

/// Load environment variables from the first parlab env file found.
/// Variables that are already set are left untouched.
pub fn load_env_file() {
    for path in env_file_paths() {
        if path.exists() {
            match std::fs::read_to_string(&path) {
                Ok(contents) => {
                    tracing::debug!("Loading environment from {:?}", path);
                    parse_env_file(&contents);
                }
                Err(e) => tracing::warn!("Could not read {:?}: {}", path, e),
            }
            break;
        }
    }
}

/// Parse env file contents and set environment variables (only if not already set).
/// Supports formats:
/// - `KEY=value`
/// - `export KEY=value`
/// - `KEY="quoted value"`
/// - `KEY='single quoted'`
/// - Comments starting with #
pub fn parse_env_file(contents: &str) {
    for (key, value) in parse_env_pairs(contents) {
        if std::env::var(&key).is_err() {
            std::env::set_var(key, value);
        }
    }
}

/// Parse env file contents into key/value pairs without touching the environment
pub fn parse_env_pairs(contents: &str) -> Vec<(String, String)> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| {
            let line = line.strip_prefix("export ").unwrap_or(line);
            let (key, value) = line.split_once('=')?;
            let value = value.trim().trim_matches('"').trim_matches('\'');
            Some((key.trim().to_string(), value.to_string()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_env_pairs() {
        let contents = r#"
            # This is a comment
            PARLAB_A=value1
            export PARLAB_B="quoted value"
            PARLAB_C='single quoted'
            not a pair
        "#;

        let pairs = parse_env_pairs(contents);
        assert_eq!(
            pairs,
            vec![
                ("PARLAB_A".to_string(), "value1".to_string()),
                ("PARLAB_B".to_string(), "quoted value".to_string()),
                ("PARLAB_C".to_string(), "single quoted".to_string()),
            ]
        );
    }

    #[test]
    fn test_parse_env_file_does_not_override() {
        std::env::remove_var("TEST_PARLAB_VAR1");
        std::env::set_var("TEST_PARLAB_VAR2", "original");

        parse_env_file("TEST_PARLAB_VAR1=loaded\nTEST_PARLAB_VAR2=replaced\n");

        assert_eq!(std::env::var("TEST_PARLAB_VAR1").unwrap(), "loaded");
        assert_eq!(std::env::var("TEST_PARLAB_VAR2").unwrap(), "original");
    }

    #[test]
    fn test_env_file_paths_start_with_system_location() {
        let paths = env_file_paths();
        assert_eq!(paths[0], PathBuf::from("/usr/local/etc/parlab/parlab.env"));
    }
}
