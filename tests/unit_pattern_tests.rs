//! # Pattern Compiler Unit Tests / 模式编译器单元测试
//!
//! Tests for the two-stage pattern compiler: tokenization of quoted
//! placeholders, compilation to the host regex engine, anchoring, case
//! handling, and error reporting for uncompilable patterns.
//!
//! 模式编译器两阶段的单元测试：引号占位符的分词、
//! 到宿主 regex 引擎的编译、锚定、大小写处理，
//! 以及无法编译模式的错误报告。

use gherkin_runner::core::pattern::{CompiledPattern, Token, tokenize};

#[cfg(test)]
mod tokenizer_tests {
    use super::*;

    #[test]
    fn test_plain_pattern_is_a_single_literal() {
        let tokens = tokenize("the machine explodes");
        assert_eq!(
            tokens,
            vec![Token::Literal("the machine explodes".to_string())]
        );
    }

    #[test]
    fn test_quoted_tokens_become_placeholders() {
        let tokens = tokenize("I move 'N' widgets to 'PLACE'");
        assert_eq!(
            tokens,
            vec![
                Token::Literal("I move ".to_string()),
                Token::Placeholder("N".to_string()),
                Token::Literal(" widgets to ".to_string()),
                Token::Placeholder("PLACE".to_string()),
            ]
        );
    }

    #[test]
    fn test_adjacent_placeholders() {
        let tokens = tokenize("'A''B'");
        assert_eq!(
            tokens,
            vec![
                Token::Placeholder("A".to_string()),
                Token::Placeholder("B".to_string()),
            ]
        );
    }

    #[test]
    fn test_unterminated_quote_stays_literal() {
        let tokens = tokenize("the widget's count");
        assert_eq!(tokens, vec![Token::Literal("the widget's count".to_string())]);
    }
}

#[cfg(test)]
mod compiler_tests {
    use super::*;

    #[test]
    fn test_placeholder_matches_quoted_value() {
        let pattern = CompiledPattern::compile("I have 'NUM' widgets").unwrap();
        assert_eq!(
            pattern.match_text("I have '5' widgets"),
            Some(vec!["5".to_string()])
        );
    }

    #[test]
    fn test_placeholder_capture_excludes_quotes() {
        let pattern = CompiledPattern::compile("I say 'WORD'").unwrap();
        let captures = pattern.match_text("I say 'hello world'").unwrap();
        assert_eq!(captures, vec!["hello world".to_string()]);
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        let pattern = CompiledPattern::compile("the machine explodes").unwrap();
        assert!(pattern.match_text("The Machine EXPLODES").is_some());
    }

    #[test]
    fn test_match_is_anchored_to_the_whole_text() {
        let pattern = CompiledPattern::compile("widgets").unwrap();
        assert!(pattern.match_text("widgets").is_some());
        assert!(pattern.match_text("I have widgets").is_none());
        assert!(pattern.match_text("widgets everywhere").is_none());
    }

    #[test]
    fn test_author_regex_passes_through() {
        let pattern = CompiledPattern::compile(r"I wait (\d+) seconds?").unwrap();
        assert_eq!(
            pattern.match_text("I wait 10 seconds"),
            Some(vec!["10".to_string()])
        );
        assert_eq!(
            pattern.match_text("I wait 1 second"),
            Some(vec!["1".to_string()])
        );
    }

    #[test]
    fn test_alternation_is_anchored_as_a_whole() {
        let pattern = CompiledPattern::compile("start|stop").unwrap();
        assert!(pattern.match_text("start").is_some());
        assert!(pattern.match_text("stop").is_some());
        assert!(pattern.match_text("startle the stopwatch").is_none());
    }

    #[test]
    fn test_unmatched_optional_group_defaults_to_empty() {
        let pattern = CompiledPattern::compile(r"reset( the counter)?").unwrap();
        assert_eq!(
            pattern.match_text("reset"),
            Some(vec![String::new()])
        );
        assert_eq!(
            pattern.match_text("reset the counter"),
            Some(vec![" the counter".to_string()])
        );
    }

    #[test]
    fn test_capture_count_includes_author_groups() {
        let pattern = CompiledPattern::compile(r"move 'N' widgets (left|right)").unwrap();
        assert_eq!(pattern.capture_count(), 2);
        assert_eq!(
            pattern.match_text("move '3' widgets left"),
            Some(vec!["3".to_string(), "left".to_string()])
        );
    }

    #[test]
    fn test_invalid_regex_is_reported_not_panicked() {
        let err = CompiledPattern::compile("broken (unclosed").unwrap_err();
        assert_eq!(err.pattern, "broken (unclosed");
        assert!(!err.detail.is_empty());
    }
}
