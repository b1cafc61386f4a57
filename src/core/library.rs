//! # Implementation Loader Module / 实现加载器模块
//!
//! Step implementations live in plain-text files made of blocks:
//!
//! ```text
//! IMPLEMENTS Given I have 'NUM' widgets
//! echo "creating $MATCH_1 widgets"
//! ```
//!
//! A block opens at an `IMPLEMENTS` line and ends at the next `IMPLEMENTS`
//! line, a blank line, a comment line, or end of file. This module scans a
//! set of files into an ordered [`StepLibrary`], preserving file order and
//! in-file order exactly; matching is first-match-wins, so registration
//! order is significant. Problems found while loading (missing files,
//! duplicate patterns, uncompilable patterns) are returned as warnings, not
//! raised as errors: the run proceeds with whatever loaded cleanly.
//!
//! 步骤实现存放在由块组成的纯文本文件中。块从 `IMPLEMENTS` 行开始，
//! 到下一个 `IMPLEMENTS` 行、空行、注释行或文件结尾结束。
//! 此模块把一组文件扫描为有序的 [`StepLibrary`]，严格保留文件顺序和
//! 文件内顺序 —— 匹配采用先匹配者胜，因此注册顺序是有意义的。
//! 加载期间发现的问题（文件缺失、模式重复、模式无法编译）作为警告返回
//! 而不是作为错误抛出：运行将继续使用成功加载的部分。

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;
use std::fmt;
use std::path::Path;

use crate::core::pattern::CompiledPattern;
use crate::infra::fs::normalize_line_endings;

/// Opens a definition block and captures the pattern text.
static IMPLEMENTS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*IMPLEMENTS\s+(.+)$").expect("block-header regex is valid"));

/// One loaded step definition: a compiled pattern paired with the shell
/// script that implements it. Immutable once loaded.
/// 一个已加载的步骤定义：一个编译后的模式与实现它的 shell 脚本配对。
/// 加载后不可变。
#[derive(Debug, Clone)]
pub struct StepDefinition {
    /// Position in the overall registration order (file order, then
    /// in-file order). First-match-wins resolution depends on it.
    pub source_order: usize,
    /// The pattern text as written after `IMPLEMENTS`.
    pub raw_pattern: String,
    /// The file the definition came from, for diagnostics.
    pub source_file: String,
    /// The pattern compiled for matching.
    pub matcher: CompiledPattern,
    /// The cleaned script body.
    pub script: String,
}

/// A non-fatal problem discovered while loading implementations.
/// 加载实现时发现的非致命问题。
#[derive(Debug, Clone)]
pub enum LoadWarning {
    /// A listed implementation file could not be read; the run continues
    /// with the remaining files.
    UnreadableFile { file: String, detail: String },
    /// The same pattern text appears in more than one definition. Both stay
    /// registered; first-match-wins resolution makes the later one dead.
    DuplicatePattern { pattern: String, file: String },
    /// The pattern failed to compile; its definition is excluded.
    InvalidPattern { pattern: String, detail: String },
}

impl fmt::Display for LoadWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadWarning::UnreadableFile { file, detail } => {
                write!(f, "Could not read implementation file {}: {}", file, detail)
            }
            LoadWarning::DuplicatePattern { pattern, file } => {
                write!(f, "Duplicate implementation for step: {} ({})", pattern, file)
            }
            LoadWarning::InvalidPattern { pattern, detail } => {
                write!(f, "Invalid pattern '{}': {}", pattern, detail)
            }
        }
    }
}

/// The ordered set of step definitions available to a run, together with
/// the warnings produced while loading them.
/// 一次运行可用的有序步骤定义集合，以及加载期间产生的警告。
#[derive(Debug, Default)]
pub struct StepLibrary {
    definitions: Vec<StepDefinition>,
    warnings: Vec<LoadWarning>,
}

impl StepLibrary {
    /// Loads definitions from in-memory sources, preserving iteration order
    /// then in-file order. The source name is only used in warnings.
    pub fn from_sources<I, N, C>(sources: I) -> Self
    where
        I: IntoIterator<Item = (N, C)>,
        N: AsRef<str>,
        C: AsRef<str>,
    {
        let mut library = Self::default();
        for (name, content) in sources {
            library.scan_file(name.as_ref(), content.as_ref());
        }
        library.warn_duplicates();
        library
    }

    /// Loads definitions from files on disk. A file that cannot be read
    /// produces an [`LoadWarning::UnreadableFile`] and is skipped.
    pub fn load_files<P: AsRef<Path>>(paths: &[P]) -> Self {
        let mut library = Self::default();
        for path in paths {
            let path = path.as_ref();
            match std::fs::read_to_string(path) {
                Ok(content) => library.scan_file(&path.display().to_string(), &content),
                Err(e) => library.warnings.push(LoadWarning::UnreadableFile {
                    file: path.display().to_string(),
                    detail: e.to_string(),
                }),
            }
        }
        library.warn_duplicates();
        library
    }

    pub fn definitions(&self) -> &[StepDefinition] {
        &self.definitions
    }

    pub fn warnings(&self) -> &[LoadWarning] {
        &self.warnings
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Scans one file's content for `IMPLEMENTS` blocks.
    fn scan_file(&mut self, file: &str, content: &str) {
        let content = normalize_line_endings(content);
        let mut lines = content.split('\n').peekable();

        while let Some(line) = lines.next() {
            let Some(caps) = IMPLEMENTS_RE.captures(line) else {
                continue;
            };
            let pattern = caps[1].trim().to_string();

            // Collect the script body: everything up to the next block, a
            // blank line, a comment line, or end of file. A leading `#!` is
            // the interpreter directive, not a comment.
            let mut body: Vec<&str> = Vec::new();
            while let Some(next) = lines.peek() {
                if next.trim().is_empty() || IMPLEMENTS_RE.is_match(next) {
                    break;
                }
                let trimmed = next.trim_start();
                if trimmed.starts_with('#') && !(body.is_empty() && trimmed.starts_with("#!")) {
                    break;
                }
                body.push(lines.next().expect("peeked line exists"));
            }

            let script = clean_script(&body);
            if script.trim().is_empty() {
                // A block with no script implements nothing.
                continue;
            }

            match CompiledPattern::compile(&pattern) {
                Ok(matcher) => self.definitions.push(StepDefinition {
                    source_order: self.definitions.len(),
                    raw_pattern: pattern,
                    source_file: file.to_string(),
                    matcher,
                    script,
                }),
                Err(e) => self.warnings.push(LoadWarning::InvalidPattern {
                    pattern: e.pattern,
                    detail: e.detail,
                }),
            }
        }
    }

    /// Flags pattern text that is registered more than once. The duplicates
    /// stay in the library; the matcher's first-match-wins rule decides.
    fn warn_duplicates(&mut self) {
        let mut seen: HashSet<&str> = HashSet::new();
        let mut duplicates = Vec::new();
        for def in &self.definitions {
            if !seen.insert(def.raw_pattern.as_str()) {
                duplicates.push((def.raw_pattern.clone(), def.source_file.clone()));
            }
        }
        for (pattern, file) in duplicates {
            self.warnings
                .push(LoadWarning::DuplicatePattern { pattern, file });
        }
    }
}

/// Normalizes a script body for execution: a leading interpreter directive
/// is dropped (the runner invokes the interpreter itself), trailing
/// whitespace is trimmed per line, and the common leading indentation of the
/// block is stripped so indented blocks read naturally.
fn clean_script(lines: &[&str]) -> String {
    let mut lines: Vec<&str> = lines.to_vec();
    if let Some(first) = lines.first() {
        if first.trim_start().starts_with("#!") {
            lines.remove(0);
        }
    }

    let indent = lines
        .iter()
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.len() - line.trim_start().len())
        .min()
        .unwrap_or(0);

    lines
        .iter()
        .map(|line| {
            if line.len() >= indent {
                line[indent..].trim_end()
            } else {
                line.trim_end()
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
