//! # Run Command Module / 运行命令模块
//!
//! This module implements the `run` command of the Gherkin Runner CLI:
//! loading the configuration, discovering and loading step implementations,
//! parsing the feature document, driving the execution engine, and
//! rendering the result as console output, JSON, or an HTML report.
//!
//! 此模块实现了 Gherkin Runner CLI 的 `run` 命令：
//! 加载配置、发现并加载步骤实现、解析 feature 文档、
//! 驱动执行引擎，并把结果渲染为控制台输出、JSON 或 HTML 报告。

use anyhow::Result;
use colored::*;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;

use crate::{
    core::{
        config,
        document::FeatureDoc,
        execution::{FeatureRunner, RunOptions, SilentObserver},
        library::StepLibrary,
    },
    infra::{fs, shell::SystemShellResolver, t},
    reporting::{
        console::{ConsoleReporter, print_load_warnings, print_summary},
        html::generate_html_report,
    },
};

/// One or more scenarios failed, or a step was undefined.
const EXIT_RUN_FAILED: u8 = 1;
/// No implementation files were discovered (or none contained definitions).
const EXIT_NO_IMPLEMENTATIONS: u8 = 2;
/// The feature document itself failed to parse; nothing was executed.
const EXIT_DOCUMENT_PARSE: u8 = 3;

/// Arguments of the `run` command after CLI parsing.
#[derive(Debug)]
pub struct RunArgs {
    pub feature: PathBuf,
    /// Explicit implementation files; when non-empty they override
    /// directory discovery.
    pub impl_files: Vec<PathBuf>,
    pub config: PathBuf,
    pub config_explicit: bool,
    pub impl_dir: Option<String>,
    pub timeout_secs: Option<u64>,
    pub shell: Option<String>,
    pub json: bool,
    pub html: Option<PathBuf>,
    pub debug: bool,
    pub language: String,
    pub lang_overridden: bool,
}

/// Executes the run command with the provided arguments.
///
/// # Returns
/// The process exit code: success, run failure, missing implementations, or
/// an unparseable feature document.
pub async fn execute(args: RunArgs) -> Result<ExitCode> {
    let config = config::load_or_default(&args.config, args.config_explicit)?;

    // --lang beats the config file; the config beats system detection.
    let locale = if args.lang_overridden {
        args.language.clone()
    } else {
        config.language.clone()
    };
    rust_i18n::set_locale(&locale);

    if !args.json {
        println!("{}", t!("run.banner", locale = &locale).cyan().bold());
    }

    let impl_dir = args.impl_dir.as_ref().unwrap_or(&config.impl_dir);
    let timeout = Duration::from_secs(args.timeout_secs.unwrap_or(config.timeout_secs));
    let shell_override = args.shell.clone().or_else(|| config.shell.clone());

    // Explicit files on the command line override directory discovery.
    let impl_files = if args.impl_files.is_empty() {
        fs::find_implementation_files(Path::new(impl_dir))?
    } else {
        args.impl_files.clone()
    };

    if impl_files.is_empty() {
        eprintln!(
            "{}",
            t!("run.no_impl_files", locale = &locale, dir = impl_dir).red()
        );
        return Ok(ExitCode::from(EXIT_NO_IMPLEMENTATIONS));
    }

    if !args.json {
        println!(
            "{}",
            t!(
                "run.loading_implementations",
                locale = &locale,
                count = impl_files.len()
            )
        );
    }

    let library = StepLibrary::load_files(&impl_files);
    print_load_warnings(library.warnings(), &locale);

    if library.is_empty() {
        eprintln!("{}", t!("run.no_definitions", locale = &locale).red());
        return Ok(ExitCode::from(EXIT_NO_IMPLEMENTATIONS));
    }

    if !args.json {
        println!(
            "{}",
            t!(
                "run.implementations_found",
                locale = &locale,
                count = library.len()
            )
        );
        if args.debug {
            for definition in library.definitions() {
                println!("  - {}", definition.raw_pattern);
            }
        }
    }

    // A malformed document is fatal before anything executes.
    let doc = match FeatureDoc::load(&args.feature) {
        Ok(doc) => doc,
        Err(e) => {
            eprintln!("{}", e.to_string().red());
            return Ok(ExitCode::from(EXIT_DOCUMENT_PARSE));
        }
    };

    // Resolving the interpreter here means a host without one aborts the
    // run before the first step, not in the middle of it.
    let resolver = SystemShellResolver::with_override(shell_override);
    let runner = FeatureRunner::new(&library, &resolver, RunOptions { timeout })?;

    if args.debug && !args.json {
        println!(
            "{}",
            t!(
                "run.using_shell",
                locale = &locale,
                shell = runner.shell().display()
            )
            .cyan()
        );
    }

    let result = if args.json {
        runner.run_feature(&doc, &SilentObserver).await
    } else {
        let reporter = ConsoleReporter::new(args.debug);
        let result = runner.run_feature(&doc, &reporter).await;
        print_summary(&result.summary, &locale);
        result
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    }

    if let Some(report_path) = &args.html {
        if !args.json {
            println!(
                "{}",
                t!(
                    "run.generating_html",
                    locale = &locale,
                    path = report_path.display()
                )
            );
        }
        if let Err(e) = generate_html_report(&result, report_path, &locale) {
            eprintln!(
                "{} {}",
                t!("run.html_failed", locale = &locale).red(),
                e
            );
        }
    }

    if result.summary.is_success() {
        if !args.json {
            println!("\n{}", t!("run.all_passed", locale = &locale).green().bold());
        }
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::from(EXIT_RUN_FAILED))
    }
}
