//! # Execution Engine Module / 执行引擎模块
//!
//! This module provides the core functionality for executing a feature
//! document against a step library. It covers the complete lifecycle: per
//! step, resolving the text to a definition and running its script with
//! variable injection and a timeout; per scenario, the fail-fast state
//! machine that skips everything after the first failed or undefined step;
//! per feature, strictly sequential scenario execution folding counts into
//! the run summary.
//!
//! 此模块为在步骤库上执行 feature 文档提供核心功能。它覆盖完整的生命周期：
//! 对每个步骤，把文本解析到某个定义并在变量注入与超时约束下运行其脚本；
//! 对每个场景，在第一个失败或未定义步骤之后跳过其余步骤的快速失败状态机；
//! 对每个 feature，严格按顺序执行场景并把计数折叠进运行摘要。

use std::time::Duration;

use crate::core::document::{FeatureDoc, ScenarioDoc, StepDoc};
use crate::core::library::StepLibrary;
use crate::core::matcher::{self, StepMatch};
use crate::core::models::{
    ExecutionContext, FailureReason, FeatureInfo, FeatureResult, ScenarioResult, StepResult,
    Summary, PREVIOUS_STDOUT_VAR,
};
use crate::infra::command;
use crate::infra::shell::{EnvironmentError, Shell, ShellResolver};

/// Observer for run progress. The engine reports what happened; rendering
/// is entirely the observer's concern, so the engine works identically
/// under the colored console reporter, the silent JSON mode, or a test
/// probe.
///
/// 运行进度的观察者。引擎报告发生了什么；渲染完全是观察者的职责，
/// 因此引擎在彩色控制台报告器、静默 JSON 模式或测试探针下工作方式相同。
pub trait RunObserver {
    fn feature_started(&self, _feature: &FeatureDoc) {}
    fn scenario_started(&self, _name: &str) {}
    fn step_finished(&self, _result: &StepResult) {}
}

/// An observer that renders nothing. Used by JSON output mode, where the
/// report tree is the only thing allowed on stdout.
pub struct SilentObserver;

impl RunObserver for SilentObserver {}

/// Tuning for a run.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Upper bound for a single script invocation.
    pub timeout: Duration,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(60),
        }
    }
}

/// Scenario execution state. Once any step fails or comes back undefined
/// the scenario stops executing and only emits skipped results; the
/// terminal state is reached when the step list is exhausted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScenarioState {
    /// Steps are still being resolved and executed.
    Running,
    /// A step failed or was undefined; every remaining step is skipped
    /// without executing.
    TailSkipped,
}

/// Executes feature documents against one step library with one resolved
/// shell. Construction resolves the interpreter exactly once, so a host
/// without one fails before any step runs.
///
/// 在一个步骤库和一个已解析的 shell 上执行 feature 文档。
/// 构造时只解析一次解释器，因此没有解释器的主机会在执行任何步骤之前失败。
pub struct FeatureRunner<'a> {
    library: &'a StepLibrary,
    shell: Shell,
    options: RunOptions,
}

impl<'a> FeatureRunner<'a> {
    /// Creates a runner, resolving the shell interpreter up front.
    pub fn new(
        library: &'a StepLibrary,
        resolver: &dyn ShellResolver,
        options: RunOptions,
    ) -> Result<Self, EnvironmentError> {
        let shell = resolver.resolve()?;
        Ok(Self {
            library,
            shell,
            options,
        })
    }

    /// The interpreter this runner will execute scripts with.
    pub fn shell(&self) -> &Shell {
        &self.shell
    }

    /// Runs every scenario of a feature strictly in order and assembles the
    /// final report tree. Counts are folded into the summary as results
    /// arrive; the summary can be recomputed from the tree afterwards and
    /// the two always agree.
    pub async fn run_feature(
        &self,
        doc: &FeatureDoc,
        observer: &dyn RunObserver,
    ) -> FeatureResult {
        observer.feature_started(doc);

        let mut summary = Summary::default();
        let mut scenarios = Vec::with_capacity(doc.scenarios.len());

        for scenario in &doc.scenarios {
            observer.scenario_started(&scenario.name);
            let result = self.run_scenario(scenario, observer).await;
            summary.record_scenario(&result);
            scenarios.push(result);
        }

        FeatureResult {
            feature: FeatureInfo {
                name: doc.name.clone(),
                file: doc.file.clone(),
            },
            scenarios,
            summary,
        }
    }

    /// Runs the steps of one scenario through the fail-fast state machine.
    /// Every scenario starts in `Running` with a fresh empty context;
    /// nothing leaks in from previous scenarios.
    pub async fn run_scenario(
        &self,
        scenario: &ScenarioDoc,
        observer: &dyn RunObserver,
    ) -> ScenarioResult {
        let mut state = ScenarioState::Running;
        let mut context = ExecutionContext::empty();
        let mut steps = Vec::with_capacity(scenario.steps.len());

        for step in &scenario.steps {
            let result = match state {
                ScenarioState::TailSkipped => StepResult::skipped(&step.keyword, &step.text),
                ScenarioState::Running => {
                    let result = self.run_step(step, &context).await;
                    if result.halts_scenario() {
                        state = ScenarioState::TailSkipped;
                    } else if let Some(stdout) = &result.stdout {
                        // Policy: a passed step hands its trimmed stdout to
                        // the next step. Empty output leaves the previous
                        // value in place.
                        context = context.with(PREVIOUS_STDOUT_VAR, stdout.trim());
                    }
                    result
                }
            };

            observer.step_finished(&result);
            steps.push(result);
        }

        ScenarioResult::from_steps(&scenario.name, steps)
    }

    /// Resolves and executes a single step against the given context,
    /// producing its immutable result.
    async fn run_step(&self, step: &StepDoc, context: &ExecutionContext) -> StepResult {
        let Some(StepMatch {
            definition,
            captures,
        }) = matcher::find_match(self.library, &step.keyword, &step.text)
        else {
            return StepResult::undefined(&step.keyword, &step.text);
        };

        // Inherited context first, captures override on collision.
        let env = context.merged_with(matcher::capture_vars(&captures));

        let output =
            command::run_script(&self.shell, &definition.script, &env, self.options.timeout).await;

        if output.success() {
            StepResult::passed(
                &step.keyword,
                &step.text,
                output.stdout,
                output.stderr,
                0,
            )
        } else {
            let reason = if output.timed_out {
                FailureReason::Timeout
            } else if output.spawn_failed {
                FailureReason::Spawn
            } else {
                FailureReason::Script
            };
            StepResult::failed(
                &step.keyword,
                &step.text,
                output.stdout,
                output.stderr,
                output.exit_code.unwrap_or(1),
                reason,
            )
        }
    }
}

/// Convenience used by tests and benchmarks: true when a run's report tree
/// is internally consistent (incremental summary equals a recount).
pub fn summary_consistent(result: &FeatureResult) -> bool {
    Summary::recompute(&result.scenarios) == result.summary
}
