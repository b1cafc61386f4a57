// src/cli.rs
use anyhow::Result;
use clap::{Arg, ArgAction, Command};
use std::{env, path::PathBuf, process::ExitCode};

use crate::infra::t;

pub mod commands;

/// Pre-parses the command line arguments to find the language setting.
/// This allows i18n to be initialized before the full CLI is built.
/// It looks for a `--lang <VALUE>` argument.
fn pre_parse_language() -> String {
    let args: Vec<String> = env::args().collect();
    if let Some(pos) = args.iter().position(|arg| arg == "--lang") {
        if let Some(lang) = args.get(pos + 1) {
            return lang.clone();
        }
    }
    // Fallback to system language detection
    sys_locale::get_locale().unwrap_or_else(|| "en".to_string())
}

fn build_cli(locale: &str) -> Command {
    Command::new("gherkin-runner")
        .author(env!("CARGO_PKG_AUTHORS"))
        .version(env!("CARGO_PKG_VERSION"))
        .about(t!("cli_about", locale = locale).to_string())
        .arg(
            Arg::new("lang")
                .long("lang")
                .help(t!("cli_lang", locale = locale).to_string())
                .value_name("LANGUAGE")
                .global(true)
                .action(ArgAction::Set),
        )
        .subcommand(
            Command::new("run")
                .about(t!("cmd_run_about", locale = locale).to_string())
                .arg(
                    Arg::new("feature")
                        .help(t!("arg_feature", locale = locale).to_string())
                        .value_name("FEATURE")
                        .required(true)
                        .value_parser(clap::value_parser!(PathBuf))
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("impl-files")
                        .help(t!("arg_impl_files", locale = locale).to_string())
                        .value_name("IMPL_FILES")
                        .num_args(0..)
                        .value_parser(clap::value_parser!(PathBuf))
                        .action(ArgAction::Append),
                )
                .arg(
                    Arg::new("config")
                        .short('c')
                        .long("config")
                        .help(t!("arg_config", locale = locale).to_string())
                        .value_name("CONFIG")
                        .default_value("GherkinRunner.toml")
                        .value_parser(clap::value_parser!(PathBuf))
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("impl-dir")
                        .long("impl-dir")
                        .help(t!("arg_impl_dir", locale = locale).to_string())
                        .value_name("IMPL_DIR")
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("timeout")
                        .long("timeout")
                        .help(t!("arg_timeout", locale = locale).to_string())
                        .value_name("SECONDS")
                        .value_parser(clap::value_parser!(u64))
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("shell")
                        .long("shell")
                        .help(t!("arg_shell", locale = locale).to_string())
                        .value_name("SHELL")
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .help(t!("arg_json", locale = locale).to_string())
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("html")
                        .long("html")
                        .help(t!("arg_html", locale = locale).to_string())
                        .value_name("HTML")
                        .value_parser(clap::value_parser!(PathBuf))
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("debug")
                        .long("debug")
                        .help(t!("arg_debug", locale = locale).to_string())
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("init")
                .about(t!("cmd_init_about", locale = locale).to_string())
                .arg(
                    Arg::new("non-interactive")
                        .long("non-interactive")
                        .help("Create the default config and samples without launching the interactive wizard.")
                        .action(ArgAction::SetTrue),
                ),
        )
}

pub async fn run() -> Result<ExitCode> {
    // Pre-parse language and initialize i18n first.
    let language = pre_parse_language();
    rust_i18n::set_locale(&language);
    let lang_overridden = env::args().any(|arg| arg == "--lang");

    let matches = build_cli(&language).get_matches();

    match matches.subcommand() {
        Some(("run", run_matches)) => {
            let config_explicit = run_matches
                .value_source("config")
                .is_some_and(|source| source == clap::parser::ValueSource::CommandLine);

            let args = commands::run::RunArgs {
                feature: run_matches
                    .get_one::<PathBuf>("feature")
                    .expect("required argument")
                    .clone(),
                impl_files: run_matches
                    .get_many::<PathBuf>("impl-files")
                    .map(|files| files.cloned().collect())
                    .unwrap_or_default(),
                config: run_matches
                    .get_one::<PathBuf>("config")
                    .expect("has default")
                    .clone(),
                config_explicit,
                impl_dir: run_matches.get_one::<String>("impl-dir").cloned(),
                timeout_secs: run_matches.get_one::<u64>("timeout").copied(),
                shell: run_matches.get_one::<String>("shell").cloned(),
                json: run_matches.get_flag("json"),
                html: run_matches.get_one::<PathBuf>("html").cloned(),
                debug: run_matches.get_flag("debug"),
                language,
                lang_overridden,
            };

            commands::run::execute(args).await
        }
        Some(("init", init_matches)) => {
            let non_interactive = init_matches.get_flag("non-interactive");

            // Show language detection message if it was auto-detected
            if !lang_overridden {
                println!(
                    "🌐 {}",
                    t!("system_language_detected", locale = &language, lang = &language)
                );
            }
            commands::init::run_init_wizard(&language, non_interactive)?;
            Ok(ExitCode::SUCCESS)
        }
        _ => {
            // This case handles when no subcommand is given.
            // Clap will have already printed help info.
            Ok(ExitCode::SUCCESS)
        }
    }
}
