use anyhow::{Context, Result};
use clap::Parser;

use dailysign_lib::presentation::cli::Cli;

fn main() -> Result<()> {
    // .env is optional
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to build tokio runtime")?;

    let report = runtime.block_on(dailysign_lib::start(cli))?;
    for line in report.lines() {
        println!("{}", line);
    }

    Ok(())
}
