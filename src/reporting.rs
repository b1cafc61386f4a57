//! # Reporting Module / 报告模块
//!
//! This module handles the rendering of run results. It provides the live
//! colored console reporter with its run summary, and the generation of a
//! standalone styled HTML report.
//!
//! 此模块处理运行结果的渲染。它提供带运行摘要的实时彩色控制台报告器，
//! 以及独立样式化 HTML 报告的生成。

pub mod console;
pub mod html;

// Re-export common reporting functions
pub use console::{ConsoleReporter, print_load_warnings, print_summary};
pub use html::generate_html_report;
