//! # Shell Resolution Module / Shell 解析模块
//!
//! Execution needs a POSIX-compatible command interpreter, and finding one
//! is the only genuinely platform-specific part of the runner. The
//! [`ShellResolver`] capability isolates that concern: the execution engine
//! asks an injected resolver for a [`Shell`] once per run and stays
//! platform-agnostic itself (tests can inject a resolver that never touches
//! the host).
//!
//! 执行需要一个 POSIX 兼容的命令解释器，而找到它是运行器中唯一真正
//! 与平台相关的部分。[`ShellResolver`] 能力隔离了这一关注点：
//! 执行引擎每次运行只向注入的解析器请求一次 [`Shell`]，
//! 自身保持平台无关（测试可以注入一个完全不接触主机的解析器）。

use std::fmt;
use std::path::PathBuf;

/// A resolved command interpreter: the program to invoke and the arguments
/// that precede `-c <script>`.
#[derive(Debug, Clone)]
pub struct Shell {
    pub program: PathBuf,
    pub args: Vec<String>,
}

impl Shell {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Describes the shell for log output.
    pub fn display(&self) -> String {
        if self.args.is_empty() {
            self.program.display().to_string()
        } else {
            format!("{} {}", self.program.display(), self.args.join(" "))
        }
    }
}

/// Fatal error: no usable command interpreter exists on this host. The run
/// aborts before any step executes.
/// 致命错误：此主机上不存在可用的命令解释器。运行在执行任何步骤前中止。
#[derive(Debug, Clone)]
pub struct EnvironmentError {
    pub detail: String,
}

impl EnvironmentError {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }
}

impl fmt::Display for EnvironmentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "No usable shell interpreter: {}", self.detail)
    }
}

impl std::error::Error for EnvironmentError {}

/// Capability for locating a command interpreter. Injected into the
/// execution engine so the engine itself never probes the host.
pub trait ShellResolver {
    fn resolve(&self) -> Result<Shell, EnvironmentError>;
}

/// Resolves the interpreter on the real host: an explicit override when one
/// was configured, otherwise platform discovery.
///
/// On Unix-likes, `bash` from `PATH` is almost always the right choice, with
/// `sh` as the fallback. On Windows the resolver hunts for a native bash
/// (Git Bash), avoiding WSL whose environment differs from the host's.
///
/// 在真实主机上解析解释器：配置了显式覆盖时使用覆盖，否则进行平台发现。
///
/// 在类 Unix 系统上，`PATH` 中的 `bash` 几乎总是正确选择，`sh` 作为回退。
/// 在 Windows 上，解析器寻找原生 bash（Git Bash），并避开环境与主机不同的 WSL。
#[derive(Debug, Default)]
pub struct SystemShellResolver {
    shell_override: Option<String>,
}

impl SystemShellResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses a user-supplied interpreter command line (e.g. from the config
    /// file or `--shell`) instead of discovery.
    pub fn with_override(shell: Option<String>) -> Self {
        Self {
            shell_override: shell,
        }
    }

    fn resolve_override(&self, raw: &str) -> Result<Shell, EnvironmentError> {
        let expanded = shellexpand::full(raw)
            .map_err(|e| EnvironmentError::new(format!("cannot expand '{}': {}", raw, e)))?;
        let parts = shlex::split(&expanded)
            .ok_or_else(|| EnvironmentError::new(format!("cannot parse '{}'", raw)))?;
        let (program, args) = parts
            .split_first()
            .ok_or_else(|| EnvironmentError::new("shell override is empty"))?;
        Ok(Shell {
            program: PathBuf::from(program),
            args: args.to_vec(),
        })
    }
}

impl ShellResolver for SystemShellResolver {
    fn resolve(&self) -> Result<Shell, EnvironmentError> {
        if let Some(raw) = &self.shell_override {
            return self.resolve_override(raw);
        }
        discover_platform_shell()
    }
}

/// Searches `PATH` for an executable, honoring `PATHEXT`-less Windows
/// lookups by also probing the bare `.exe` form.
fn find_in_path(name: &str) -> Option<PathBuf> {
    let path_var = std::env::var_os("PATH")?;
    for dir in std::env::split_paths(&path_var) {
        let candidate = dir.join(name);
        if candidate.is_file() {
            return Some(candidate);
        }
        if cfg!(windows) {
            let candidate = dir.join(format!("{}.exe", name));
            if candidate.is_file() {
                return Some(candidate);
            }
        }
    }
    None
}

#[cfg(not(windows))]
fn discover_platform_shell() -> Result<Shell, EnvironmentError> {
    // 'bash' in the PATH is almost always the right choice here; fall back
    // to plain 'sh' for minimal hosts.
    find_in_path("bash")
        .or_else(|| find_in_path("sh"))
        .map(Shell::new)
        .ok_or_else(|| EnvironmentError::new("neither 'bash' nor 'sh' was found in PATH"))
}

#[cfg(windows)]
fn discover_platform_shell() -> Result<Shell, EnvironmentError> {
    use std::path::Path;

    // Find bash relative to git.exe in the PATH. This works reliably with
    // the standard installer, Scoop, Chocolatey, etc.
    if let Some(git) = find_in_path("git") {
        if let Some(dir) = git.parent() {
            let bash = dir.join("bash.exe");
            if bash.is_file() {
                return Ok(Shell::new(bash));
            }
        }
    }

    // Common hardcoded installation paths for Git Bash.
    let mut candidates: Vec<PathBuf> = Vec::new();
    for var in ["ProgramFiles", "ProgramFiles(x86)"] {
        if let Some(root) = std::env::var_os(var) {
            candidates.push(Path::new(&root).join("Git").join("bin").join("bash.exe"));
        }
    }
    if let Some(local) = std::env::var_os("LOCALAPPDATA") {
        candidates.push(
            Path::new(&local)
                .join("Programs")
                .join("Git")
                .join("bin")
                .join("bash.exe"),
        );
    }
    for candidate in candidates {
        if candidate.is_file() {
            return Ok(Shell::new(candidate));
        }
    }

    // Last resort: a bash in PATH is acceptable only if it is not WSL.
    // `uname -o` reports 'Msys' for Git Bash and 'GNU/Linux' for WSL.
    if let Some(bash) = find_in_path("bash") {
        if let Ok(output) = std::process::Command::new(&bash)
            .args(["-c", "uname -o"])
            .output()
        {
            let kind = String::from_utf8_lossy(&output.stdout).to_lowercase();
            if output.status.success() && !kind.contains("linux") {
                return Ok(Shell::new(bash));
            }
        }
    }

    Err(EnvironmentError::new(
        "no native bash found; install Git for Windows and put its 'bin' directory in PATH",
    ))
}
