//! # Infrastructure Module / 基础设施模块
//!
//! This module provides infrastructure services for Gherkin Runner,
//! including shell-interpreter discovery, subprocess execution with output
//! capture, file discovery, and i18n support.
//!
//! 此模块为 Gherkin Runner 提供基础设施服务，
//! 包括 shell 解释器发现、带输出捕获的子进程执行、文件发现和国际化支持。

pub mod command;
pub mod fs;
pub mod shell;

// Re-export i18n functions for easier access
pub use rust_i18n::t;
