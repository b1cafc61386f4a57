//! # Data Models Module / 数据模型模块
//!
//! This module defines the core data structures used throughout the runner.
//! It includes the per-step, per-scenario and per-feature result tree, the
//! derived run summary, and the execution context carried between steps.
//!
//! 此模块定义了整个运行器中使用的核心数据结构。
//! 它包括每步骤、每场景和每 feature 的结果树、派生的运行摘要，
//! 以及在步骤之间传递的执行上下文。

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Environment variable carrying the trimmed stdout of the previous passed
/// step into the next step of the same scenario.
/// 将上一个通过步骤的（去除首尾空白的）stdout 传入同一场景下一步骤的环境变量。
pub const PREVIOUS_STDOUT_VAR: &str = "PREVIOUS_STEP_STDOUT";

/// Enumerates the possible reasons for a step failure.
/// This helps in distinguishing errors for reporting and diagnostics.
/// 枚举步骤失败的可能原因。
/// 这有助于在报告和诊断中区分错误。
#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
pub enum FailureReason {
    /// The script ran to completion with a non-zero exit code.
    /// 脚本运行完毕但退出码非零。
    Script,
    /// The script exceeded the configured timeout and was terminated.
    /// 脚本超出配置的超时时间并被终止。
    Timeout,
    /// The interpreter process could not be spawned at all.
    /// 解释器进程根本无法启动。
    Spawn,
}

/// The outcome of a single step.
/// 单个步骤的结果状态。
#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepStatus {
    /// The step's script exited with code zero.
    /// 步骤脚本以零退出码结束。
    Passed,
    /// The step's script failed or timed out.
    /// 步骤脚本失败或超时。
    Failed,
    /// The step was not executed because an earlier step in the scenario
    /// failed or was undefined.
    /// 由于场景中较早的步骤失败或未定义，该步骤未被执行。
    Skipped,
    /// No step definition matched the step text.
    /// 没有任何步骤定义与步骤文本匹配。
    Undefined,
}

/// The outcome of a whole scenario, derived from its steps.
/// 整个场景的结果状态，由其步骤派生。
#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScenarioStatus {
    Passed,
    Failed,
}

/// The recorded result of one step. Created once per step and immutable
/// after creation. Optional diagnostics are omitted from serialized reports
/// when absent.
///
/// 一个步骤的记录结果。每个步骤创建一次，创建后不可变。
/// 可选的诊断信息在缺失时不会出现在序列化的报告中。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepResult {
    /// The step keyword as written in the feature file (e.g. "Given").
    /// feature 文件中书写的步骤关键字（例如 "Given"）。
    pub keyword: String,
    /// The step text without its keyword.
    /// 不含关键字的步骤文本。
    pub text: String,
    /// The outcome of the step.
    /// 步骤的结果状态。
    pub status: StepStatus,
    /// Captured standard output, when non-empty.
    /// 捕获的标准输出（非空时）。
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stdout: Option<String>,
    /// Captured standard error, when non-empty.
    /// 捕获的标准错误（非空时）。
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stderr: Option<String>,
    /// The process exit code, when the script was executed.
    /// 进程退出码（当脚本被执行时）。
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exit_code: Option<i32>,
    /// A human-oriented diagnostic line: the stderr of a failed step, or the
    /// "no implementation found" message of an undefined step.
    /// 面向人的诊断行：失败步骤的 stderr，或未定义步骤的
    /// "no implementation found" 消息。
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    /// The failure reason, kept out of the serialized report but available
    /// for diagnostics (timeouts are failures, yet distinguishable).
    /// 失败原因，不进入序列化报告，但可用于诊断
    /// （超时属于失败，但可被区分）。
    #[serde(skip)]
    pub reason: Option<FailureReason>,
}

impl StepResult {
    /// Builds a passed result from captured process output.
    pub fn passed(
        keyword: &str,
        text: &str,
        stdout: String,
        stderr: String,
        exit_code: i32,
    ) -> Self {
        Self {
            keyword: keyword.to_string(),
            text: text.to_string(),
            status: StepStatus::Passed,
            stdout: non_empty(stdout),
            stderr: non_empty(stderr),
            exit_code: Some(exit_code),
            output: None,
            reason: None,
        }
    }

    /// Builds a failed result from captured process output. The stderr, when
    /// present, doubles as the diagnostic `output` line.
    pub fn failed(
        keyword: &str,
        text: &str,
        stdout: String,
        stderr: String,
        exit_code: i32,
        reason: FailureReason,
    ) -> Self {
        let output = if stderr.trim().is_empty() {
            None
        } else {
            Some(stderr.clone())
        };
        Self {
            keyword: keyword.to_string(),
            text: text.to_string(),
            status: StepStatus::Failed,
            stdout: non_empty(stdout),
            stderr: non_empty(stderr),
            exit_code: Some(exit_code),
            output,
            reason: Some(reason),
        }
    }

    /// Builds a skipped result. The step was never executed, so no process
    /// diagnostics exist.
    pub fn skipped(keyword: &str, text: &str) -> Self {
        Self {
            keyword: keyword.to_string(),
            text: text.to_string(),
            status: StepStatus::Skipped,
            stdout: None,
            stderr: None,
            exit_code: None,
            output: None,
            reason: None,
        }
    }

    /// Builds an undefined result for a step with no matching definition.
    pub fn undefined(keyword: &str, text: &str) -> Self {
        let full = format!("{} {}", keyword, text);
        Self {
            keyword: keyword.to_string(),
            text: text.to_string(),
            status: StepStatus::Undefined,
            stdout: None,
            stderr: None,
            exit_code: None,
            output: Some(format!("No implementation found for: {}", full.trim())),
            reason: None,
        }
    }

    /// Whether the step failed because its script exceeded the timeout.
    pub fn is_timeout(&self) -> bool {
        self.reason == Some(FailureReason::Timeout)
    }

    /// Whether this result prevents the remaining steps of its scenario from
    /// running.
    pub fn halts_scenario(&self) -> bool {
        matches!(self.status, StepStatus::Failed | StepStatus::Undefined)
    }
}

fn non_empty(s: String) -> Option<String> {
    if s.is_empty() { None } else { Some(s) }
}

/// The ordered results of one scenario. Status is a pure function of the
/// steps: passed iff every step passed.
/// 一个场景的有序结果。状态完全由步骤决定：当且仅当所有步骤通过时为通过。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioResult {
    pub name: String,
    pub status: ScenarioStatus,
    pub steps: Vec<StepResult>,
}

impl ScenarioResult {
    /// Assembles a scenario result, deriving the status from the steps.
    pub fn from_steps(name: &str, steps: Vec<StepResult>) -> Self {
        let status = if steps.iter().all(|s| s.status == StepStatus::Passed) {
            ScenarioStatus::Passed
        } else {
            ScenarioStatus::Failed
        };
        Self {
            name: name.to_string(),
            status,
            steps,
        }
    }
}

/// Identity of the feature document a report was produced from.
/// 产生报告的 feature 文档的标识。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureInfo {
    pub name: String,
    pub file: String,
}

/// The complete report tree of a run: feature identity, ordered scenario
/// results, and the accumulated summary.
/// 一次运行的完整报告树：feature 标识、有序的场景结果以及累计的摘要。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureResult {
    pub feature: FeatureInfo,
    pub scenarios: Vec<ScenarioResult>,
    pub summary: Summary,
}

/// Scenario-level counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioCounts {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
}

/// Step-level counts. `undefined` is kept separate from `failed`, even though
/// an undefined step fails its scenario.
/// 步骤级计数。`undefined` 与 `failed` 分开统计，
/// 即使未定义的步骤会使其场景失败。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepCounts {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub skipped: usize,
    pub undefined: usize,
}

/// Aggregated counts for a whole run. Accumulated incrementally while the
/// run progresses, and recomputable from the final result tree so the two
/// can be checked against each other.
///
/// 整个运行的聚合计数。在运行过程中增量累计，
/// 也可以从最终结果树重新计算，两者可以互相校验。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub scenarios: ScenarioCounts,
    pub steps: StepCounts,
}

impl Summary {
    /// Folds a single step result into the step counts.
    pub fn record_step(&mut self, step: &StepResult) {
        self.steps.total += 1;
        match step.status {
            StepStatus::Passed => self.steps.passed += 1,
            StepStatus::Failed => self.steps.failed += 1,
            StepStatus::Skipped => self.steps.skipped += 1,
            StepStatus::Undefined => self.steps.undefined += 1,
        }
    }

    /// Folds a completed scenario (and all of its steps) into the counts.
    pub fn record_scenario(&mut self, scenario: &ScenarioResult) {
        self.scenarios.total += 1;
        match scenario.status {
            ScenarioStatus::Passed => self.scenarios.passed += 1,
            ScenarioStatus::Failed => self.scenarios.failed += 1,
        }
        for step in &scenario.steps {
            self.record_step(step);
        }
    }

    /// Recomputes a summary from scratch out of a result tree.
    pub fn recompute(scenarios: &[ScenarioResult]) -> Self {
        let mut summary = Self::default();
        for scenario in scenarios {
            summary.record_scenario(scenario);
        }
        summary
    }

    /// Whether the run satisfies the success criterion: zero scenario
    /// failures and zero undefined steps.
    pub fn is_success(&self) -> bool {
        self.scenarios.failed == 0 && self.steps.undefined == 0
    }
}

/// Variables carried from one passed step to the next within a scenario.
///
/// The context is a value, not shared state: a step consumes the context it
/// was given and produces the context for its successor. Nothing is retained
/// across scenarios.
///
/// 在一个场景内从一个通过的步骤传递到下一个步骤的变量。
///
/// 上下文是一个值而非共享状态：每个步骤消费它得到的上下文，
/// 并产生其后继步骤的上下文。场景之间不保留任何内容。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecutionContext {
    vars: BTreeMap<String, String>,
}

impl ExecutionContext {
    /// An empty context, as handed to the first step of every scenario.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Produces a new context with one variable added or replaced.
    pub fn with(mut self, key: &str, value: &str) -> Self {
        self.vars.insert(key.to_string(), value.to_string());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// Builds the variable set for one step invocation: the inherited
    /// context overridden by the step's own captures on key collision.
    /// 构建一次步骤调用的变量集：继承的上下文在键冲突时被步骤自身的捕获覆盖。
    pub fn merged_with<I, K, V>(&self, overrides: I) -> BTreeMap<String, String>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut merged = self.vars.clone();
        for (key, value) in overrides {
            merged.insert(key.into(), value.into());
        }
        merged
    }
}

impl fmt::Display for StepStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            StepStatus::Passed => "passed",
            StepStatus::Failed => "failed",
            StepStatus::Skipped => "skipped",
            StepStatus::Undefined => "undefined",
        };
        write!(f, "{}", s)
    }
}

impl fmt::Display for ScenarioStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScenarioStatus::Passed => write!(f, "passed"),
            ScenarioStatus::Failed => write!(f, "failed"),
        }
    }
}
