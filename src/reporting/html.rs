//! # HTML Reporting Module / HTML 报告模块
//!
//! This module handles the generation of HTML run reports.
//! It creates a standalone styled HTML file with summary statistics, a
//! per-scenario step table, and collapsible captured output.
//!
//! 此模块处理 HTML 运行报告的生成。
//! 它创建一个独立的样式化 HTML 文件，包含摘要统计、
//! 每场景的步骤表格以及可折叠的捕获输出。

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::core::models::{FeatureResult, StepResult, StepStatus};
use crate::infra::t;

/// Embedded CSS styles for HTML reports / HTML 报告的嵌入式 CSS 样式
const HTML_STYLE: &str = include_str!("assets/report.css");

/// Embedded JavaScript for HTML report interactivity / HTML 报告交互性的嵌入式 JavaScript
const HTML_SCRIPT: &str = include_str!("assets/report.js");

/// Generates a standalone HTML report for a finished run.
///
/// # Arguments / 参数
/// * `result` - The complete report tree of the run
///              运行的完整报告树
/// * `output_path` - Where to write the HTML file
///                   HTML 文件的写入位置
/// * `locale` - The locale used for the report labels
///              报告标签使用的语言环境
pub fn generate_html_report(result: &FeatureResult, output_path: &Path, locale: &str) -> Result<()> {
    let mut html = String::new();
    html.push_str(&format!(
        "<!DOCTYPE html><html><head><meta charset=\"utf-8\"><title>{}</title>",
        t!("html_report.title", locale = locale)
    ));
    html.push_str("<style>");
    html.push_str(HTML_STYLE);
    html.push_str("</style></head><body>");

    html.push_str(&format!(
        "<h1>{}</h1>",
        t!("html_report.main_header", locale = locale)
    ));
    html.push_str(&format!(
        "<p class=\"meta\">{}: <code>{}</code> · {} {}</p>",
        escape(&result.feature.name),
        escape(&result.feature.file),
        t!("html_report.generated_at", locale = locale),
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
    ));

    // Summary tiles
    let steps = &result.summary.steps;
    let scenarios = &result.summary.scenarios;
    html.push_str("<div class=\"summary\">");
    for (label, value, class) in [
        (
            t!("html_report.scenarios", locale = locale).to_string(),
            scenarios.total,
            "total",
        ),
        (
            t!("summary.passed", locale = locale).to_string(),
            steps.passed,
            "passed",
        ),
        (
            t!("summary.failed", locale = locale).to_string(),
            steps.failed,
            "failed",
        ),
        (
            t!("summary.skipped", locale = locale).to_string(),
            steps.skipped,
            "skipped",
        ),
        (
            t!("summary.undefined", locale = locale).to_string(),
            steps.undefined,
            "undefined",
        ),
    ] {
        html.push_str(&format!(
            "<div class=\"tile tile-{}\"><span class=\"count\">{}</span><span class=\"label\">{}</span></div>",
            class, value, escape(&label)
        ));
    }
    html.push_str("</div>");

    // One section per scenario
    for scenario in &result.scenarios {
        html.push_str(&format!(
            "<section class=\"scenario scenario-{}\"><h2>{}</h2><table><thead><tr><th></th><th>{}</th><th>{}</th></tr></thead><tbody>",
            scenario.status,
            escape(&scenario.name),
            t!("html_report.step", locale = locale),
            t!("html_report.status", locale = locale),
        ));
        for step in &scenario.steps {
            html.push_str(&render_step_row(step, locale));
        }
        html.push_str("</tbody></table></section>");
    }

    html.push_str("<script>");
    html.push_str(HTML_SCRIPT);
    html.push_str("</script></body></html>");

    fs::write(output_path, html)
        .with_context(|| format!("Failed to write HTML report: {}", output_path.display()))?;
    Ok(())
}

fn render_step_row(step: &StepResult, locale: &str) -> String {
    let status_label = match step.status {
        StepStatus::Passed => t!("html_report.status_passed", locale = locale),
        StepStatus::Failed => {
            if step.is_timeout() {
                t!("html_report.status_timeout", locale = locale)
            } else {
                t!("html_report.status_failed", locale = locale)
            }
        }
        StepStatus::Skipped => t!("html_report.status_skipped", locale = locale),
        StepStatus::Undefined => t!("html_report.status_undefined", locale = locale),
    };

    let mut row = format!(
        "<tr class=\"status-{}\"><td class=\"marker\"></td><td>{} {}</td><td>{}</td></tr>",
        step.status,
        escape(&step.keyword),
        escape(&step.text),
        status_label,
    );

    // Captured output is kept in a collapsed row the script can toggle.
    let mut details = String::new();
    if let Some(stdout) = &step.stdout {
        details.push_str(&format!("<pre class=\"stdout\">{}</pre>", escape(stdout)));
    }
    if let Some(stderr) = &step.stderr {
        details.push_str(&format!("<pre class=\"stderr\">{}</pre>", escape(stderr)));
    }
    if !details.is_empty() {
        row.push_str(&format!(
            "<tr class=\"details\"><td></td><td colspan=\"2\">{}</td></tr>",
            details
        ));
    }
    row
}

/// Minimal HTML escaping for text content.
fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
