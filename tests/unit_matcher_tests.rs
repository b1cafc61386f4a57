//! # Step Matcher Unit Tests / 步骤匹配器单元测试
//!
//! Tests for first-match-wins resolution, the keyword-prefixed fallback
//! form, capture extraction, and matching determinism.
//!
//! 先匹配者胜的解析、带关键字前缀的回退形式、捕获提取
//! 以及匹配确定性的单元测试。

mod common;

use common::library;
use gherkin_runner::core::matcher::{capture_vars, find_match};

#[cfg(test)]
mod resolution_tests {
    use super::*;

    #[test]
    fn test_first_matching_definition_wins() {
        let library = library(
            "IMPLEMENTS Given I have 'NUM' widgets\n\
             echo first\n\
             \n\
             IMPLEMENTS Given I have 'NUM' widgets\n\
             echo second\n",
        );
        let matched = find_match(&library, "Given", "I have '5' widgets").unwrap();
        assert_eq!(matched.definition.source_order, 0);
        assert_eq!(matched.definition.script, "echo first");
    }

    #[test]
    fn test_registration_order_beats_specificity() {
        // A later, more specific pattern never shadows an earlier match.
        let library = library(
            "IMPLEMENTS I have '.*' widgets\n\
             echo loose\n\
             \n\
             IMPLEMENTS I have '5' widgets\n\
             echo exact\n",
        );
        let matched = find_match(&library, "Given", "I have '5' widgets").unwrap();
        assert_eq!(matched.definition.script, "echo loose");
    }

    #[test]
    fn test_keyword_prefixed_form_is_tried_second() {
        let library = library(
            "IMPLEMENTS Given the inventory is empty\n\
             true\n",
        );
        let matched = find_match(&library, "Given", "the inventory is empty").unwrap();
        assert_eq!(matched.definition.source_order, 0);
    }

    #[test]
    fn test_no_match_yields_none() {
        let library = library(
            "IMPLEMENTS Given the inventory is empty\n\
             true\n",
        );
        assert!(find_match(&library, "When", "pigs fly").is_none());
    }

    #[test]
    fn test_matching_is_deterministic() {
        let library = library(
            "IMPLEMENTS step 'A'\n\
             echo a\n\
             \n\
             IMPLEMENTS step '.*'\n\
             echo b\n",
        );
        let first = find_match(&library, "When", "step 'x'").unwrap();
        let expected = first.definition.source_order;
        for _ in 0..100 {
            let matched = find_match(&library, "When", "step 'x'").unwrap();
            assert_eq!(matched.definition.source_order, expected);
        }
    }
}

#[cfg(test)]
mod capture_tests {
    use super::*;

    #[test]
    fn test_captures_are_extracted_in_group_order() {
        let library = library(
            "IMPLEMENTS I move 'N' widgets to 'PLACE'\n\
             true\n",
        );
        let matched = find_match(&library, "When", "I move '3' widgets to 'the shelf'").unwrap();
        assert_eq!(matched.captures, vec!["3".to_string(), "the shelf".to_string()]);
    }

    #[test]
    fn test_capture_vars_are_named_match_n() {
        let captures = vec!["3".to_string(), "shelf".to_string()];
        let vars: Vec<(String, &str)> = capture_vars(&captures).collect();
        assert_eq!(
            vars,
            vec![
                ("MATCH_1".to_string(), "3"),
                ("MATCH_2".to_string(), "shelf"),
            ]
        );
    }
}
