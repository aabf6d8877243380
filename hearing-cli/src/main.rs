use std::io;

use anyhow::Context;
use clap::Parser;
use tracing::debug;

use hearing_cli::cli::Cli;
use hearing_cli::config::{FileConfig, Settings};
use hearing_cli::{app, logging};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init_logging();

    let cli = Cli::parse();
    let file = FileConfig::load(&cli.config)?;
    let settings = Settings::resolve(file, &cli);

    if let Some(level) = &settings.log_level {
        logging::set_log_level(level)?;
    }
    logging::set_stderr_enabled(!cli.quiet)?;
    if let Some(path) = &settings.log_file {
        logging::enable_file_logging(path)?;
    }
    debug!(?settings, "Resolved settings");

    let mut stdout = io::stdout();
    app::run(&settings, cli.command, &mut stdout)
        .await
        .context("hearing-report failed")
}
