use anyhow::{Context, anyhow};
use clap::Parser;
use console::style;
use figex::cli::Cli;
use figex::logging;
use tracing::info;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let cwd = std::env::current_dir().context("failed to resolve the current directory")?;
    let settings = cli.settings(&cwd)?;
    logging::init(settings.verbosity).map_err(|e| anyhow!(e))?;

    let report = figex::run(&settings)
        .with_context(|| format!("failed to extract images from {}", settings.input.display()))?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    }

    info!(
        "done: {} placed ({} transformed, {} fell back), {} undetermined, {} failed",
        report.placed(),
        report.transformed(),
        report.fell_back(),
        report.undetermined(),
        report.failed()
    );
    info!("assets written to {}", style(report.output.display()).for_stderr().bold());
    Ok(())
}
