//! # Config Module Unit Tests / Config 模块单元测试
//!
//! This module contains unit tests for `GherkinRunner.toml` parsing:
//! defaults, full files, partial files and the optional-file semantics.
//!
//! 此模块包含 `GherkinRunner.toml` 解析的单元测试：
//! 默认值、完整文件、部分文件以及文件可选的语义。

use gherkin_runner::core::config::{RunnerConfig, load_config, load_or_default};

#[cfg(test)]
mod parsing_tests {
    use super::*;

    #[test]
    fn test_empty_file_yields_defaults() {
        let config: RunnerConfig = toml::from_str("").unwrap();
        assert_eq!(config.language, "en");
        assert_eq!(config.impl_dir, "gherkin-implements");
        assert_eq!(config.timeout_secs, 60);
        assert!(config.shell.is_none());
    }

    #[test]
    fn test_full_file_parses() {
        let config: RunnerConfig = toml::from_str(
            r#"
            language = "zh-CN"
            impl_dir = "steps"
            timeout_secs = 5
            shell = "/usr/bin/env bash"
            "#,
        )
        .unwrap();
        assert_eq!(config.language, "zh-CN");
        assert_eq!(config.impl_dir, "steps");
        assert_eq!(config.timeout_secs, 5);
        assert_eq!(config.shell.as_deref(), Some("/usr/bin/env bash"));
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let config: RunnerConfig = toml::from_str("timeout_secs = 2").unwrap();
        assert_eq!(config.timeout_secs, 2);
        assert_eq!(config.language, "en");
    }

    #[test]
    fn test_round_trips_through_toml() {
        let config = RunnerConfig::default();
        let text = toml::to_string_pretty(&config).unwrap();
        let parsed: RunnerConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed.impl_dir, config.impl_dir);
        assert_eq!(parsed.timeout_secs, config.timeout_secs);
    }
}

#[cfg(test)]
mod loading_tests {
    use super::*;

    #[test]
    fn test_load_config_reads_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("GherkinRunner.toml");
        std::fs::write(&path, "impl_dir = \"impls\"\n").unwrap();
        let config = load_config(&path).unwrap();
        assert_eq!(config.impl_dir, "impls");
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("GherkinRunner.toml");
        std::fs::write(&path, "timeout_secs = \"not a number\"\n").unwrap();
        assert!(load_config(&path).is_err());
    }

    #[test]
    fn test_missing_default_location_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("GherkinRunner.toml");
        let config = load_or_default(&path, false).unwrap();
        assert_eq!(config.timeout_secs, 60);
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.toml");
        assert!(load_or_default(&path, true).is_err());
    }
}
