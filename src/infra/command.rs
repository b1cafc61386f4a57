//! # Script Execution Module / 脚本执行模块
//!
//! Spawns a script through the resolved shell interpreter, injecting step
//! variables through the process environment, capturing standard output and
//! standard error separately, and enforcing a timeout. Passing variables via
//! the environment is robust and avoids quoting issues.
//!
//! 通过解析得到的 shell 解释器派生脚本，经由进程环境注入步骤变量，
//! 分别捕获标准输出和标准错误，并强制执行超时。
//! 通过环境传递变量是健壮的，且避免了引号问题。

use std::collections::BTreeMap;
use std::process::Stdio;
use std::time::Duration;

use crate::infra::shell::Shell;

/// Exit code reported for a script that was terminated on timeout, matching
/// the convention of coreutils' `timeout`.
pub const TIMEOUT_EXIT_CODE: i32 = 124;

/// The raw outcome of one script invocation.
/// 一次脚本调用的原始结果。
#[derive(Debug, Clone, Default)]
pub struct ScriptOutput {
    /// The process exit code. Termination by signal yields `None`.
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
    /// The script exceeded its timeout and was terminated.
    pub timed_out: bool,
    /// The interpreter process could not be spawned at all.
    pub spawn_failed: bool,
}

impl ScriptOutput {
    /// Whether the invocation counts as a success: exited normally with
    /// code zero.
    pub fn success(&self) -> bool {
        self.exit_code == Some(0) && !self.timed_out
    }
}

/// Runs a script under the given shell with the given extra environment,
/// bounded by `timeout`.
///
/// The process inherits the runner's environment with the step variables
/// layered on top. On timeout the child is terminated (it is spawned with
/// `kill_on_drop`) and the output reports the distinguished timeout state.
/// A spawn failure is reported as an ordinary failed invocation with the OS
/// error on stderr, never as a panic or an abort of the whole run.
pub async fn run_script(
    shell: &Shell,
    script: &str,
    env: &BTreeMap<String, String>,
    timeout: Duration,
) -> ScriptOutput {
    if script.trim().is_empty() {
        return ScriptOutput {
            exit_code: Some(1),
            stderr: "Empty script content".to_string(),
            ..ScriptOutput::default()
        };
    }

    let mut cmd = tokio::process::Command::new(&shell.program);
    cmd.args(&shell.args)
        .arg("-c")
        .arg(script)
        .envs(env)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    let child = match cmd.spawn() {
        Ok(child) => child,
        Err(e) => {
            return ScriptOutput {
                exit_code: Some(1),
                stderr: format!("Error executing script: {}", e),
                spawn_failed: true,
                ..ScriptOutput::default()
            };
        }
    };

    match tokio::time::timeout(timeout, child.wait_with_output()).await {
        Ok(Ok(output)) => ScriptOutput {
            exit_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            timed_out: false,
            spawn_failed: false,
        },
        Ok(Err(e)) => ScriptOutput {
            exit_code: Some(1),
            stderr: format!("Error executing script: {}", e),
            ..ScriptOutput::default()
        },
        // Dropping the elapsed future drops the child handle, which kills
        // the process.
        Err(_) => ScriptOutput {
            exit_code: Some(TIMEOUT_EXIT_CODE),
            stderr: format!(
                "Script execution timed out after {} seconds",
                timeout.as_secs_f64()
            ),
            timed_out: true,
            ..ScriptOutput::default()
        },
    }
}
