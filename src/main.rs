//! Demo window: drag points around and watch the fit follow.

use std::path::PathBuf;

use clap::Parser;

use regplot::{run_demo, ChartConfig, RunOptions};

#[derive(Parser, Debug)]
#[command(name = "regplot")]
#[command(about = "Interactive regression scatter plot demo", long_about = None)]
struct Args {
    /// Chart configuration (JSON); defaults are used when omitted
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write the effective configuration to this path and exit
    #[arg(long)]
    dump_config: Option<PathBuf>,

    /// Use the dark theme
    #[arg(long)]
    dark: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => ChartConfig::load_json(path)?,
        None => ChartConfig::default(),
    };

    if let Some(path) = &args.dump_config {
        config.save_json(path)?;
        log::info!("wrote configuration to {}", path.display());
        return Ok(());
    }

    run_demo(
        config,
        RunOptions {
            dark: args.dark,
            ..RunOptions::default()
        },
    )?;
    Ok(())
}
