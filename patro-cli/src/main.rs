mod commands;
mod render;
mod utils;
mod year_range;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use patro_core::{OutputModes, PatroConfig};
use tracing_subscriber::EnvFilter;

use crate::year_range::YearRange;

#[derive(Parser)]
#[command(name = "patro")]
#[command(about = "Scrape the Nepali (Bikram Sambat) calendar into JSON files")]
struct Cli {
    /// Year or year range (start end)
    #[arg(required = true, num_args = 1..=2)]
    years: Vec<u16>,

    /// Generate the single per-year JSON (e.g. --single json)
    #[arg(long, num_args = 0..=1, default_missing_value = "json", value_name = "FORMAT")]
    single: Option<String>,

    /// Generate the per-month directory format (e.g. --dir format)
    #[arg(long, num_args = 0..=1, default_missing_value = "format", value_name = "FORMAT")]
    dir: Option<String>,

    /// Write data here instead of the configured data_dir
    #[arg(long, value_name = "PATH")]
    data_dir: Option<PathBuf>,
}

impl Cli {
    /// No output flag means both outputs.
    fn output_modes(&self) -> OutputModes {
        OutputModes::from_flags(self.single.is_some(), self.dir.is_some())
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let range = YearRange::from_args(&cli.years).map_err(|e| anyhow::anyhow!(e))?;
    let modes = cli.output_modes();

    let mut config = PatroConfig::load()?;
    if let Some(dir) = cli.data_dir {
        config.data_dir = dir;
    }

    commands::scrape::run(&config, range, modes).await
}
