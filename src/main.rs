// ==========================================
// Cutting list analyzer - CLI entry point
// ==========================================
// Usage:
//   cutting-list-analyzer <path> [--config <file>]
//
// Prints the analysis as pretty JSON on stdout.
// Exit code 1 when the analysis is unsuccessful.
// ==========================================

use anyhow::{bail, Context};
use cutting_list_analyzer::config::ConfigManager;
use cutting_list_analyzer::engine::{ExcelAnalysis, ExcelAnalyzer};
use cutting_list_analyzer::logging;
use std::path::PathBuf;
use std::process::ExitCode;

struct CliArgs {
    path: PathBuf,
    config: Option<PathBuf>,
}

fn parse_args() -> anyhow::Result<CliArgs> {
    let mut args = std::env::args().skip(1);
    let mut path = None;
    let mut config = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" | "-c" => {
                let value = args.next().context("--config needs a file path")?;
                config = Some(PathBuf::from(value));
            }
            "--help" | "-h" => {
                bail!("usage: cutting-list-analyzer <path> [--config <file>]");
            }
            _ if path.is_none() => path = Some(PathBuf::from(arg)),
            other => bail!("unexpected argument: {}", other),
        }
    }

    let path = path.context("usage: cutting-list-analyzer <path> [--config <file>]")?;
    Ok(CliArgs { path, config })
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    logging::init();

    let args = parse_args()?;

    let config = match &args.config {
        Some(file) => ConfigManager::from_json_file(file)
            .with_context(|| format!("loading config {}", file.display()))?
            .with_env_overrides(),
        None => ConfigManager::load_default(),
    };

    tracing::info!(
        version = cutting_list_analyzer::VERSION,
        file = %args.path.display(),
        "starting analysis"
    );

    let mut analyzer = ExcelAnalyzer::with_config(&args.path, &config);
    let result = analyzer.analyze().await;

    println!("{}", serde_json::to_string_pretty(&result)?);

    Ok(if result.success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
