//! # Step Matcher Module / 步骤匹配器模块
//!
//! Resolves a step of a scenario to the definition that implements it.
//! Definitions are tried in registration order; for each one the compiled
//! pattern is matched against the bare step text first and, failing that,
//! against `"<keyword> <text>"` so patterns may be written with or without
//! their keyword. The first definition matching either form wins, which
//! makes resolution deterministic for a fixed library and step text.
//!
//! 将场景中的一个步骤解析到实现它的定义。按注册顺序逐一尝试各定义；
//! 对每个定义，先用编译后的模式匹配裸步骤文本，若不匹配再匹配
//! `"<keyword> <text>"`，因此模式可以带或不带关键字书写。
//! 第一个匹配任一形式的定义获胜，这使得在固定的库和步骤文本下
//! 解析是确定性的。

use crate::core::library::{StepDefinition, StepLibrary};

/// A resolved step: the winning definition and its ordered captures.
/// Capture groups that did not participate in the match are bound to the
/// empty string.
#[derive(Debug)]
pub struct StepMatch<'a> {
    pub definition: &'a StepDefinition,
    pub captures: Vec<String>,
}

/// Finds the first definition whose pattern fully matches the step, trying
/// the bare text before the keyword-prefixed form. Returns `None` when no
/// definition matches either form, in which case the step is undefined.
pub fn find_match<'a>(
    library: &'a StepLibrary,
    keyword: &str,
    text: &str,
) -> Option<StepMatch<'a>> {
    let full = format!("{} {}", keyword.trim(), text);
    let full = full.trim();

    for definition in library.definitions() {
        if let Some(captures) = definition
            .matcher
            .match_text(text)
            .or_else(|| definition.matcher.match_text(full))
        {
            return Some(StepMatch {
                definition,
                captures,
            });
        }
    }
    None
}

/// Names the capture variables a match binds in a script's environment:
/// `MATCH_1..MATCH_n` in group order.
/// 给匹配在脚本环境中绑定的捕获变量命名：按组顺序为 `MATCH_1..MATCH_n`。
pub fn capture_vars(captures: &[String]) -> impl Iterator<Item = (String, &str)> {
    captures
        .iter()
        .enumerate()
        .map(|(i, value)| (format!("MATCH_{}", i + 1), value.as_str()))
}
