//! # Init Command Module / 初始化命令模块
//!
//! Scaffolds a project for the runner: the `GherkinRunner.toml`
//! configuration, a sample feature file, and a sample implementation file
//! demonstrating the `IMPLEMENTS` block grammar, capture variables and the
//! carried-over `PREVIOUS_STEP_STDOUT`.
//!
//! 为运行器搭建项目脚手架：`GherkinRunner.toml` 配置、一个示例 feature
//! 文件，以及一个演示 `IMPLEMENTS` 块语法、捕获变量和传递的
//! `PREVIOUS_STEP_STDOUT` 的示例实现文件。

use anyhow::{Context, Result};
use colored::*;
use dialoguer::{Confirm, Input, theme::ColorfulTheme};
use std::fs;
use std::path::Path;

use crate::core::config::RunnerConfig;
use crate::infra::t;

const SAMPLE_FEATURE: &str = "\
Feature: Widget inventory

  Scenario: Adding widgets
    Given the inventory is empty
    When I add '5' widgets
    Then the inventory reports '5' widgets
";

const SAMPLE_IMPLEMENTS: &str = "\
IMPLEMENTS Given the inventory is empty
echo 0 > \"${WIDGET_STORE:-/tmp/widgets.count}\"

IMPLEMENTS When I add 'NUM' widgets
echo \"$MATCH_1\" > \"${WIDGET_STORE:-/tmp/widgets.count}\"

IMPLEMENTS Then the inventory reports 'NUM' widgets
test \"$(cat \"${WIDGET_STORE:-/tmp/widgets.count}\")\" = \"$MATCH_1\"
";

/// Creates the configuration and sample files, interactively unless
/// `non_interactive` is set.
pub fn run_init_wizard(locale: &str, non_interactive: bool) -> Result<()> {
    println!("{}", t!("init.welcome", locale = locale).cyan().bold());

    let mut config = RunnerConfig::default();
    config.language = locale.to_string();

    if !non_interactive {
        config.impl_dir = Input::<String>::with_theme(&ColorfulTheme::default())
            .with_prompt(t!("init.impl_dir_prompt", locale = locale).to_string())
            .default(config.impl_dir)
            .interact_text()?;

        config.timeout_secs = Input::<u64>::with_theme(&ColorfulTheme::default())
            .with_prompt(t!("init.timeout_prompt", locale = locale).to_string())
            .default(config.timeout_secs)
            .interact_text()?;
    }

    let config_path = Path::new("GherkinRunner.toml");
    if config_path.exists() && !non_interactive {
        let overwrite = Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(t!("init.overwrite_prompt", locale = locale).to_string())
            .default(false)
            .interact()?;
        if !overwrite {
            println!("{}", t!("init.aborted", locale = locale).yellow());
            return Ok(());
        }
    }

    let toml_text = toml::to_string_pretty(&config).context("Failed to serialize config")?;
    fs::write(config_path, toml_text)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;
    println!(
        "{}",
        t!("init.created", locale = locale, path = config_path.display()).green()
    );

    write_sample(Path::new("features"), "example.feature", SAMPLE_FEATURE, locale)?;
    write_sample(
        Path::new(&config.impl_dir),
        "example.gherkin",
        SAMPLE_IMPLEMENTS,
        locale,
    )?;

    println!("{}", t!("init.done", locale = locale).green().bold());
    Ok(())
}

/// Writes one sample file, never clobbering an existing one.
fn write_sample(dir: &Path, name: &str, content: &str, locale: &str) -> Result<()> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create directory {}", dir.display()))?;
    let path = dir.join(name);
    if path.exists() {
        println!(
            "{}",
            t!("init.kept_existing", locale = locale, path = path.display()).yellow()
        );
        return Ok(());
    }
    fs::write(&path, content).with_context(|| format!("Failed to write {}", path.display()))?;
    println!(
        "{}",
        t!("init.created", locale = locale, path = path.display()).green()
    );
    Ok(())
}
