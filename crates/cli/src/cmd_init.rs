// SPDX-License-Identifier: MIT

//! Init command implementation.

use anneal::cli::InitArgs;
use anneal::error::ExitCode;
use anneal::init;

/// Run the init command.
pub fn run(args: &InitArgs) -> anyhow::Result<ExitCode> {
    let cwd = std::env::current_dir()?;
    let dir = match &args.path {
        Some(path) if path.is_absolute() => path.clone(),
        Some(path) => cwd.join(path),
        None => cwd,
    };

    if !dir.is_dir() {
        eprintln!("anneal: directory does not exist: {}", dir.display());
        return Ok(ExitCode::ConfigError);
    }

    let path = init::write_starter(&dir)?;
    println!("Wrote {}", path.display());
    Ok(ExitCode::Success)
}
