//! # File Discovery Module / 文件发现模块
//!
//! Locates implementation files on disk and normalizes the text read from
//! them. Files written on Windows carry CRLF line endings that break shell
//! parsing, so every piece of text entering the engine goes through
//! [`normalize_line_endings`] first.
//!
//! 在磁盘上定位实现文件并规范化从中读取的文本。
//! 在 Windows 上编写的文件带有会破坏 shell 解析的 CRLF 行结尾，
//! 因此进入引擎的每段文本都先经过 [`normalize_line_endings`]。

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Normalizes line endings to Unix format (LF only), removing CRLF and any
/// stray CR characters.
pub fn normalize_line_endings(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}

/// Finds all `*.gherkin` implementation files in a directory.
///
/// A missing directory is not an error; it simply yields no files (the
/// caller decides whether an empty set is fatal). The result is sorted so
/// that file-iteration order, and therefore definition registration order,
/// is deterministic across platforms.
pub fn find_implementation_files(impl_dir: &Path) -> Result<Vec<PathBuf>> {
    if !impl_dir.is_dir() {
        return Ok(Vec::new());
    }

    let pattern = impl_dir.join("*.gherkin");
    let pattern = pattern
        .to_str()
        .with_context(|| format!("Implementation directory is not valid UTF-8: {}", impl_dir.display()))?;

    let mut files: Vec<PathBuf> = glob::glob(pattern)
        .with_context(|| format!("Invalid glob pattern: {}", pattern))?
        .filter_map(std::result::Result::ok)
        .collect();
    files.sort();
    Ok(files)
}
