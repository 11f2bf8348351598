use anyhow::{Context, Result};
use clap::Parser;

use tsz_cli::args::CliArgs;
use tsz_cli::{driver, tracing_config};

fn main() -> Result<()> {
    // TSZ_LOG / RUST_LOG enable tracing; TSZ_LOG_FORMAT=tree|json|text picks the output.
    tracing_config::init_tracing();

    let args = CliArgs::parse();
    let cwd = std::env::current_dir().context("failed to resolve current directory")?;
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    driver::run(&args, &cwd, &mut out)
}
