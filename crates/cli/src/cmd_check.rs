// SPDX-License-Identifier: MIT

//! Check command implementation.

use std::path::PathBuf;
use std::time::Duration;

use anneal::cli::{CheckArgs, Cli, OutputFormat};
use anneal::color::resolve_color;
use anneal::config::{Config, ResolvedConfig};
use anneal::error::ExitCode;
use anneal::exec::ShellExecutor;
use anneal::output::FormatOptions;
use anneal::output::json;
use anneal::output::text::TextFormatter;
use anneal::verify::{BuildPlan, Verifier};

/// Run the check command.
pub fn run(cli: &Cli, args: &CheckArgs) -> anyhow::Result<ExitCode> {
    // Validate flag combinations
    if args.tail.is_some() && args.no_tail {
        eprintln!("--tail and --no-tail cannot be used together");
        return Ok(ExitCode::ConfigError);
    }

    let cwd = std::env::current_dir()?;

    // Starting point for config discovery: the CLI path if given, else cwd
    let start_dir = match &args.path {
        Some(path) if path.is_absolute() => path.clone(),
        Some(path) => cwd.join(path),
        None => cwd.clone(),
    };

    let resolved = ResolvedConfig::resolve(cli.config.as_deref(), &start_dir)?;
    let config = &resolved.config;

    // An explicit CLI path is the project directory; otherwise the config
    // decides, anchored at its own file.
    let project_dir = if args.path.is_some() {
        start_dir.clone()
    } else {
        resolved.project_dir(&start_dir)
    };

    if !project_dir.is_dir() {
        eprintln!(
            "anneal: project directory does not exist: {}",
            project_dir.display()
        );
        return Ok(ExitCode::ConfigError);
    }

    let plan = build_plan(args, config, project_dir);
    tracing::debug!(dir = %plan.project_dir.display(), command = %plan.build, "verification plan");

    let executor = ShellExecutor;
    let verdict = Verifier::new(&executor).run(&plan)?;

    match args.output {
        OutputFormat::Text => {
            let options = FormatOptions {
                tail: resolve_tail(args, config),
                verbose: args.verbose,
            };
            let report = args.report.unwrap_or(config.artifact.report);
            let color = resolve_color(args.color, args.no_color);
            TextFormatter::stdout(color, options, report).write_verdict(&verdict)?;
        }
        OutputFormat::Json => {
            println!("{}", json::render(&verdict)?);
        }
    }

    Ok(verdict.exit_code())
}

/// Merge config and CLI overrides into a build plan.
fn build_plan(args: &CheckArgs, config: &Config, project_dir: PathBuf) -> BuildPlan {
    let clean = match &args.clean {
        Some(cmd) => {
            let cmd = cmd.trim();
            if cmd.is_empty() {
                None
            } else {
                Some(cmd.to_string())
            }
        }
        None => config.build.clean_command().map(String::from),
    };

    BuildPlan {
        project_dir,
        clean,
        build: args
            .build
            .clone()
            .unwrap_or_else(|| config.build.command.clone()),
        clean_timeout: Some(
            args.clean_timeout
                .map(Duration::from_secs)
                .unwrap_or(config.build.clean_timeout),
        ),
        build_timeout: Some(
            args.timeout
                .map(Duration::from_secs)
                .unwrap_or(config.build.timeout),
        ),
        artifact: args.artifact.clone().or_else(|| config.artifact.path.clone()),
    }
}

/// Resolve the tail limit: --no-tail > --tail N > config (0 = unlimited).
fn resolve_tail(args: &CheckArgs, config: &Config) -> Option<usize> {
    if args.no_tail {
        return None;
    }
    match args.tail {
        Some(0) => None,
        Some(n) => Some(n),
        None => config.output.tail_limit(),
    }
}
