//! CLI entry point for the English tutor.

mod cli;
mod commands;
mod output;
mod render;

use std::path::{Path, PathBuf};

use clap::Parser;
use tutor_constant::app;
use tutor_observability::ObservabilityConfig;

use crate::cli::Cli;

/// Load env files. Variables already set win, then earlier files win.
/// Order: 1) .tutor/env (nearest project dir)  2) .env (nearest)  3) ~/.tutor/env
fn load_tutor_env() {
    if let Ok(cwd) = std::env::current_dir() {
        if let Some(project_env) = find_upwards(&cwd, &Path::new(app::DATA_DIR).join("env")) {
            let _ = dotenvy::from_path(&project_env);
        }
        if let Some(env_file) = find_upwards(&cwd, Path::new(".env")) {
            let _ = dotenvy::from_path(&env_file);
        }
    }
    if let Some(home) = dirs::home_dir() {
        let global_env = home.join(app::DATA_DIR).join("env");
        if global_env.exists() {
            let _ = dotenvy::from_path(&global_env);
        }
    }
}

fn find_upwards(start: &Path, relative: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .take(32)
        .map(|dir| dir.join(relative))
        .find(|candidate| candidate.exists())
}

fn init_observability(verbose: bool) {
    let mut config = ObservabilityConfig::from_env()
        .with_version(app::VERSION)
        .with_console(verbose);
    if config.log_file.is_none() {
        config = config.with_log_file(app::LOG_FILE);
    }
    if verbose && config.log_level.is_none() {
        config = config.with_log_level("debug");
    }

    if let Err(e) = tutor_observability::init(config) {
        output::warning(&format!("Logging disabled: {e}"));
    }
}

#[tokio::main]
async fn main() {
    load_tutor_env();
    let cli = Cli::parse();
    output::init(cli.output);
    init_observability(cli.verbose);

    let result = commands::handle(cli).await;
    tutor_observability::shutdown();

    if let Err(e) = result {
        output::error(&e.to_string());
        std::process::exit(1);
    }
}
