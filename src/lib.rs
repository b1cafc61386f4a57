//! # Gherkin Runner Library / Gherkin Runner 库
//!
//! This library provides the core functionality for the Gherkin Runner tool,
//! an executor for Gherkin feature files whose steps are implemented as
//! shell scripts (`IMPLEMENTS <pattern>` blocks).
//!
//! 此库为 Gherkin Runner 工具提供核心功能，
//! 这是一个 Gherkin feature 文件执行器，其步骤由 shell 脚本实现
//! （`IMPLEMENTS <pattern>` 块）。
//!
//! ## Modules / 模块
//!
//! - `core` - Data model, step library, pattern matching and the execution engine
//! - `infra` - Infrastructure services like shell discovery, subprocess capture and file discovery
//! - `reporting` - Result reporting to console and HTML
//! - `cli` - Command-line interface and commands
//!
//! - `core` - 数据模型、步骤库、模式匹配和执行引擎
//! - `infra` - 基础设施服务，如 shell 发现、子进程捕获和文件发现
//! - `reporting` - 控制台和 HTML 结果报告
//! - `cli` - 命令行接口和命令

pub mod core;
pub mod infra;
pub mod reporting;
pub mod cli;

// Re-export commonly used items
pub use crate::core::execution;
pub use crate::core::library;
pub use crate::core::models;

/// Initializes the application's internationalization (i18n) based on the system locale.
///
/// This function detects the user's system locale and sets the appropriate
/// language for the application's user interface. It attempts to match the full
/// locale (e.g., "zh-CN"), then just the language code (e.g., "en"), and
/// finally falls back to the default language ("en").
pub fn init() {
    // Detect system locale and set it for i18n.
    // Fallback to "en" if detection fails.
    let locale = sys_locale::get_locale().unwrap_or_else(|| "en".to_string());
    let available_locales = rust_i18n::available_locales!();

    // Try to match the full locale first (e.g., "zh-CN")
    // Then try to match the language part only (e.g., "en" from "en-US")
    // Finally, fall back to "en"
    let lang = if available_locales.contains(&locale.as_str()) {
        &locale
    } else {
        locale
            .split('-')
            .next()
            .filter(|lang_code| available_locales.contains(lang_code))
            .unwrap_or("en")
    };

    rust_i18n::set_locale(lang);
}

// Initialize i18n
rust_i18n::i18n!("locales", fallback = "en");
