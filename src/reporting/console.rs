//! # Console Reporting Module / 控制台报告模块
//!
//! Live rendering of a run: one colored line per step as it finishes
//! (`✓` passed, `✖` failed, `?` undefined, `-` skipped), error diagnostics
//! on standard error, and the final colored summary block.
//!
//! 运行的实时渲染：每个步骤完成时输出一行彩色结果
//! （`✓` 通过、`✖` 失败、`?` 未定义、`-` 跳过），
//! 错误诊断输出到标准错误，最后是彩色的摘要块。

use colored::*;

use crate::core::document::FeatureDoc;
use crate::core::execution::RunObserver;
use crate::core::library::LoadWarning;
use crate::core::models::{StepResult, StepStatus, Summary};
use crate::infra::t;

/// Renders run progress to the console as it happens.
pub struct ConsoleReporter {
    /// When set, passed steps also show their captured stdout.
    verbose: bool,
}

impl ConsoleReporter {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }
}

impl RunObserver for ConsoleReporter {
    fn feature_started(&self, feature: &FeatureDoc) {
        println!("{}", format!("Feature: {}", feature.name).bold());
    }

    fn scenario_started(&self, name: &str) {
        println!("\n  Scenario: {}", name);
    }

    fn step_finished(&self, result: &StepResult) {
        let line = format!("{} {}", result.keyword, result.text);
        match result.status {
            StepStatus::Passed => {
                println!("    {} {}", "✓".green(), line.green());
                if self.verbose {
                    if let Some(stdout) = &result.stdout {
                        println!("{}", indent_block(stdout, "      ").dimmed());
                    }
                }
            }
            StepStatus::Failed => {
                println!("    {} {}", "✖".red(), line.red());
                if let Some(stderr) = &result.stderr {
                    eprintln!("{}", format!("      Error: {}", stderr.trim_end()).red());
                }
            }
            StepStatus::Undefined => {
                println!("    {} {}", "?".magenta(), line.magenta());
                if let Some(output) = &result.output {
                    eprintln!("{}", format!("      {}", output).magenta());
                }
            }
            StepStatus::Skipped => {
                println!("    {} {}", "-".yellow(), line.yellow());
            }
        }
    }
}

/// Prints loader warnings (missing files, duplicate or invalid patterns).
/// They are non-fatal and go to standard error so machine-readable output
/// stays clean.
pub fn print_load_warnings(warnings: &[LoadWarning], locale: &str) {
    for warning in warnings {
        eprintln!(
            "{}",
            format!("{} {}", t!("run.warning_prefix", locale = locale), warning).yellow()
        );
    }
}

/// Prints the final summary block of a run.
///
/// # Output Format / 输出格式
/// ```text
/// --------------------------------------------------
/// Run Summary:
///   Scenarios: 3 total, 2 passed, 1 failed
///   Steps:     9 total, 6 passed, 1 failed, 1 skipped, 1 undefined
/// --------------------------------------------------
/// ```
pub fn print_summary(summary: &Summary, locale: &str) {
    println!("\n{}", "-".repeat(50));
    println!("{}", t!("summary.banner", locale = locale).bold());

    println!(
        "  {:<10} {} {}, {}, {}",
        t!("summary.scenarios_label", locale = locale),
        summary.scenarios.total,
        t!("summary.total", locale = locale),
        format!(
            "{} {}",
            summary.scenarios.passed,
            t!("summary.passed", locale = locale)
        )
        .green(),
        format!(
            "{} {}",
            summary.scenarios.failed,
            t!("summary.failed", locale = locale)
        )
        .red(),
    );

    println!(
        "  {:<10} {} {}, {}, {}, {}, {}",
        t!("summary.steps_label", locale = locale),
        summary.steps.total,
        t!("summary.total", locale = locale),
        format!(
            "{} {}",
            summary.steps.passed,
            t!("summary.passed", locale = locale)
        )
        .green(),
        format!(
            "{} {}",
            summary.steps.failed,
            t!("summary.failed", locale = locale)
        )
        .red(),
        format!(
            "{} {}",
            summary.steps.skipped,
            t!("summary.skipped", locale = locale)
        )
        .yellow(),
        format!(
            "{} {}",
            summary.steps.undefined,
            t!("summary.undefined", locale = locale)
        )
        .magenta(),
    );

    println!("{}", "-".repeat(50));
}

fn indent_block(text: &str, prefix: &str) -> String {
    text.trim_end()
        .lines()
        .map(|line| format!("{}{}", prefix, line))
        .collect::<Vec<_>>()
        .join("\n")
}
