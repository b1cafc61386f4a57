//! Shared helpers for the integration tests.
#![allow(dead_code)]

use gherkin_runner::core::document::{FeatureDoc, ScenarioDoc, StepDoc};
use gherkin_runner::core::library::StepLibrary;

/// Builds a step record as the feature-document parser would.
pub fn step(keyword: &str, text: &str) -> StepDoc {
    StepDoc {
        keyword: keyword.to_string(),
        text: text.to_string(),
    }
}

pub fn scenario(name: &str, steps: Vec<StepDoc>) -> ScenarioDoc {
    ScenarioDoc {
        name: name.to_string(),
        steps,
    }
}

pub fn feature(scenarios: Vec<ScenarioDoc>) -> FeatureDoc {
    FeatureDoc {
        name: "Test feature".to_string(),
        file: "test.feature".to_string(),
        scenarios,
    }
}

/// Loads a step library from a single in-memory implementation file.
pub fn library(content: &str) -> StepLibrary {
    StepLibrary::from_sources([("inline.gherkin", content)])
}
