use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Runner configuration, loaded from an optional `GherkinRunner.toml`.
/// Command-line flags override any value found here; every key has a
/// default so the file can be partial or absent.
/// 运行器配置，从可选的 `GherkinRunner.toml` 加载。
/// 命令行参数会覆盖这里的任何值；每个键都有默认值，
/// 因此文件可以不完整或不存在。
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RunnerConfig {
    /// The language for the runner's output messages (e.g., "en", "zh-CN").
    /// Defaults to "en" if not specified.
    ///
    /// 运行器输出消息的语言（例如 "en", "zh-CN"）。
    /// 如果未指定，则默认为 "en"。
    #[serde(default = "default_language")]
    pub language: String,

    /// Directory scanned for `*.gherkin` implementation files when no
    /// explicit file list is given on the command line.
    /// 当命令行没有给出显式文件列表时，扫描 `*.gherkin` 实现文件的目录。
    #[serde(default = "default_impl_dir")]
    pub impl_dir: String,

    /// Per-step timeout in seconds. A script running longer than this is
    /// terminated and its step marked as a timeout failure.
    /// 每步骤超时时间（秒）。运行超过该时间的脚本会被终止，
    /// 其步骤被标记为超时失败。
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Optional shell-interpreter override, e.g. "/usr/bin/env bash".
    /// When absent the interpreter is discovered on the host.
    /// 可选的 shell 解释器覆盖，例如 "/usr/bin/env bash"。
    /// 缺省时在主机上自动发现解释器。
    #[serde(default)]
    pub shell: Option<String>,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            language: default_language(),
            impl_dir: default_impl_dir(),
            timeout_secs: default_timeout_secs(),
            shell: None,
        }
    }
}

fn default_language() -> String {
    "en".to_string()
}

fn default_impl_dir() -> String {
    "gherkin-implements".to_string()
}

fn default_timeout_secs() -> u64 {
    60
}

/// Parses a configuration file.
pub fn load_config(path: &Path) -> Result<RunnerConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    let config: RunnerConfig = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
    Ok(config)
}

/// Loads the configuration for a run. A missing file at the default
/// location simply yields the defaults; an explicitly requested file must
/// exist.
pub fn load_or_default(path: &Path, explicit: bool) -> Result<RunnerConfig> {
    if path.exists() {
        load_config(path)
    } else if explicit {
        anyhow::bail!("Config file not found: {}", path.display());
    } else {
        Ok(RunnerConfig::default())
    }
}
