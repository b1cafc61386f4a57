//! # Core Module / 核心模块
//!
//! This module contains the core functionality of Gherkin Runner,
//! including the data model, the step library, pattern matching and
//! the execution engine.
//!
//! 此模块包含 Gherkin Runner 的核心功能，
//! 包括数据模型、步骤库、模式匹配和执行引擎。

pub mod config;
pub mod document;
pub mod execution;
pub mod library;
pub mod matcher;
pub mod models;
pub mod pattern;

// Re-exports
pub use config::RunnerConfig;
pub use execution::FeatureRunner;
pub use library::StepLibrary;
pub use models::FeatureResult;
