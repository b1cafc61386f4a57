//! # Pattern Compiler Module / 模式编译器模块
//!
//! Step definition patterns are written as human-readable text in which
//! single-quoted tokens act as placeholders: `I have 'NUM' widgets`. This
//! module compiles such a pattern in two stages: a tokenizer that splits it
//! into literal runs and placeholder tokens, then compilation of that
//! intermediate form into an anchored, case-insensitive expression on the
//! host regex engine. Everything outside the quotes passes through verbatim,
//! so authors may embed further regex constructs of their own.
//!
//! 步骤定义模式以人类可读的文本书写，其中单引号标记充当占位符：
//! `I have 'NUM' widgets`。此模块分两个阶段编译这种模式 —— 先由分词器将其
//! 拆分为字面量片段和占位符标记，再把该中间表示编译为宿主 regex 引擎上
//! 锚定的、不区分大小写的表达式。引号之外的内容原样通过，
//! 因此作者可以嵌入自己的 regex 结构。

use regex::{Regex, RegexBuilder};
use std::fmt;

/// One token of a raw pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// A run of author-supplied text, passed through to the regex engine
    /// untouched.
    Literal(String),
    /// A single-quoted placeholder. The quoted content is kept only for
    /// diagnostics; matching replaces it with a lazy capture.
    Placeholder(String),
}

/// Splits a raw pattern into literal runs and quoted placeholder tokens.
/// An unterminated quote is not a placeholder; the remainder of the pattern
/// is treated as literal text.
pub fn tokenize(raw: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut literal = String::new();
    let mut rest = raw;

    while let Some(open) = rest.find('\'') {
        match rest[open + 1..].find('\'') {
            Some(len) => {
                literal.push_str(&rest[..open]);
                if !literal.is_empty() {
                    tokens.push(Token::Literal(std::mem::take(&mut literal)));
                }
                tokens.push(Token::Placeholder(rest[open + 1..open + 1 + len].to_string()));
                rest = &rest[open + 1 + len + 1..];
            }
            None => break,
        }
    }

    literal.push_str(rest);
    if !literal.is_empty() {
        tokens.push(Token::Literal(literal));
    }
    tokens
}

/// A step definition pattern compiled for matching. Matching is anchored to
/// the whole candidate string and case-insensitive; each placeholder matches
/// a quoted value lazily and captures its content without the quotes.
///
/// 编译后可用于匹配的步骤定义模式。匹配锚定整个候选字符串且不区分大小写；
/// 每个占位符惰性匹配一个带引号的值，并捕获不含引号的内容。
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    raw: String,
    regex: Regex,
    capture_count: usize,
}

impl CompiledPattern {
    /// Compiles a raw pattern. An invalid regex yields a [`PatternError`]
    /// scoped to this one definition.
    pub fn compile(raw: &str) -> Result<Self, PatternError> {
        let mut source = String::from("^(?:");
        for token in tokenize(raw) {
            match token {
                Token::Literal(text) => source.push_str(&text),
                // The quotes stay as literal anchors; the placeholder
                // content becomes the lazy group, so matching `'5'`
                // captures `5`.
                Token::Placeholder(_) => source.push_str("'(.*?)'"),
            }
        }
        source.push_str(")$");

        let regex = RegexBuilder::new(&source)
            .case_insensitive(true)
            .build()
            .map_err(|e| PatternError {
                pattern: raw.to_string(),
                detail: e.to_string(),
            })?;

        let capture_count = regex.captures_len() - 1;
        Ok(Self {
            raw: raw.to_string(),
            regex,
            capture_count,
        })
    }

    /// Attempts a full match against a candidate string, returning the
    /// ordered capture groups on success. Groups that did not participate in
    /// the match default to the empty string.
    pub fn match_text(&self, candidate: &str) -> Option<Vec<String>> {
        self.regex.captures(candidate).map(|caps| {
            (1..=self.capture_count)
                .map(|i| {
                    caps.get(i)
                        .map(|m| m.as_str().to_string())
                        .unwrap_or_default()
                })
                .collect()
        })
    }

    /// The pattern text as the author wrote it.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// The number of capture groups the compiled pattern can bind.
    pub fn capture_count(&self) -> usize {
        self.capture_count
    }
}

/// A pattern that could not be compiled. The definition carrying it is
/// excluded from the active set; the rest of the run proceeds.
/// 无法编译的模式。携带它的定义被排除在活动集合之外；运行的其余部分继续。
#[derive(Debug, Clone)]
pub struct PatternError {
    pub pattern: String,
    pub detail: String,
}

impl fmt::Display for PatternError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid pattern '{}': {}", self.pattern, self.detail)
    }
}

impl std::error::Error for PatternError {}
