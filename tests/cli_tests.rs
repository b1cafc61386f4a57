//! # CLI End-to-End Tests / CLI 端到端测试
//!
//! These tests run the `gherkin-runner` binary against the fixture feature
//! and implementation files, asserting console output, the JSON report, and
//! each of the distinct process exit codes.
//!
//! 这些测试针对 fixture 中的 feature 和实现文件运行 `gherkin-runner`
//! 二进制文件，断言控制台输出、JSON 报告以及每个不同的进程退出码。

use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;

fn runner() -> Command {
    let mut cmd = Command::cargo_bin("gherkin-runner").unwrap();
    cmd.arg("--lang").arg("en");
    cmd
}

/// A feature whose every step passes exits with code 0 and reports success.
///
/// 每个步骤都通过的 feature 以退出码 0 结束并报告成功。
#[test]
fn test_passing_feature_exits_zero() {
    let mut cmd = runner();
    cmd.arg("run")
        .arg("tests/fixtures/features/passing.feature")
        .arg("--impl-dir")
        .arg("tests/fixtures/implements");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Feature: Widget arithmetic"))
        .stdout(predicate::str::contains("✓"))
        .stdout(predicate::str::contains("All scenarios passed."));
}

/// A failing step fails the run (exit code 1), prints the failure marker
/// and skips the remaining steps.
///
/// 失败的步骤使运行失败（退出码 1），打印失败标记并跳过其余步骤。
#[test]
fn test_failing_feature_exits_one_and_skips_tail() {
    let mut cmd = runner();
    cmd.arg("run")
        .arg("tests/fixtures/features/failing.feature")
        .arg("--impl-dir")
        .arg("tests/fixtures/implements");

    cmd.assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains("✖"))
        .stdout(predicate::str::contains("- Then I should have '10' widgets"))
        .stderr(predicate::str::contains("machine failure"));
}

/// An undefined step fails the run and is reported with its own marker and
/// counter.
///
/// 未定义的步骤使运行失败，并用自己的标记和计数器报告。
#[test]
fn test_undefined_step_exits_one() {
    let mut cmd = runner();
    cmd.arg("run")
        .arg("tests/fixtures/features/undefined.feature")
        .arg("--impl-dir")
        .arg("tests/fixtures/implements");

    cmd.assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains("?"))
        .stdout(predicate::str::contains("1 undefined"));
}

/// With no implementation files at all the runner refuses to start, with a
/// distinct exit code.
///
/// 完全没有实现文件时，运行器拒绝启动，并使用独立的退出码。
#[test]
fn test_missing_implementations_exit_two() {
    let empty = tempfile::tempdir().unwrap();
    let mut cmd = runner();
    cmd.arg("run")
        .arg("tests/fixtures/features/passing.feature")
        .arg("--impl-dir")
        .arg(empty.path());

    cmd.assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("No implementation files found"));
}

/// A feature document that does not parse aborts before anything runs,
/// with its own exit code.
///
/// 无法解析的 feature 文档在任何步骤运行之前中止，并使用自己的退出码。
#[test]
fn test_malformed_document_exits_three() {
    let mut cmd = runner();
    cmd.arg("run")
        .arg("tests/fixtures/features/malformed.feature")
        .arg("--impl-dir")
        .arg("tests/fixtures/implements");

    cmd.assert()
        .failure()
        .code(3)
        .stderr(predicate::str::contains("Failed to parse feature document"));
}

/// `--json` emits exactly the report tree on stdout.
///
/// `--json` 在 stdout 上精确输出报告树。
#[test]
fn test_json_output_is_the_report_tree() {
    let mut cmd = runner();
    cmd.arg("run")
        .arg("tests/fixtures/features/failing.feature")
        .arg("--impl-dir")
        .arg("tests/fixtures/implements")
        .arg("--json");

    let output = cmd.output().unwrap();
    assert_eq!(output.status.code(), Some(1));

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["feature"]["name"], "Widget failures");
    assert_eq!(report["summary"]["scenarios"]["total"], 1);
    assert_eq!(report["summary"]["scenarios"]["failed"], 1);
    assert_eq!(report["summary"]["steps"]["passed"], 1);
    assert_eq!(report["summary"]["steps"]["failed"], 1);
    assert_eq!(report["summary"]["steps"]["skipped"], 1);
    assert_eq!(report["scenarios"][0]["steps"][1]["exit_code"], 3);
}

/// Explicit implementation files on the command line override directory
/// discovery.
///
/// 命令行上的显式实现文件会覆盖目录发现。
#[test]
fn test_explicit_impl_files_override_discovery() {
    let empty = tempfile::tempdir().unwrap();
    let mut cmd = runner();
    cmd.arg("run")
        .arg("tests/fixtures/features/passing.feature")
        .arg("tests/fixtures/implements/widgets.gherkin")
        .arg("--impl-dir")
        .arg(empty.path());

    cmd.assert().success();
}

/// `--timeout` bounds each step; an over-long script fails the run
/// instead of hanging it.
///
/// `--timeout` 限制每个步骤；运行时间过长的脚本使运行失败而不是挂起。
#[test]
fn test_timeout_flag_bounds_each_step() {
    let dir = tempfile::tempdir().unwrap();
    let impls = dir.path().join("sleepy.gherkin");
    std::fs::write(&impls, "IMPLEMENTS Given I have 'NUM' widgets\nsleep 5\n").unwrap();

    let mut cmd = runner();
    cmd.arg("run")
        .arg("tests/fixtures/features/passing.feature")
        .arg(&impls)
        .arg("--timeout")
        .arg("1");

    cmd.assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("timed out"));
}

/// `init --non-interactive` scaffolds the config and sample files.
///
/// `init --non-interactive` 生成配置和示例文件。
#[test]
fn test_init_scaffolds_a_project() {
    let dir = tempfile::tempdir().unwrap();
    let mut cmd = runner();
    cmd.current_dir(dir.path()).arg("init").arg("--non-interactive");

    cmd.assert().success();
    assert!(dir.path().join("GherkinRunner.toml").exists());
    assert!(dir.path().join("features/example.feature").exists());
    assert!(
        dir.path()
            .join("gherkin-implements/example.gherkin")
            .exists()
    );
}
