#![forbid(unsafe_code)]

mod cmd;
mod config;

use std::env;
use std::time::Instant;

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use cmd::log::LogArgs;
use config::Config;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    name = "git-sl",
    about = "git-sl: sparse commit graph for your active branches",
    long_about = None
)]
struct Cli {
    #[command(flatten)]
    log: LogArgs,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("SMARTLOG_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if env::var("DEBUG").is_ok() {
            "smartlog=debug,info"
        } else {
            "smartlog=info,warn"
        })
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact().with_writer(std::io::stderr))
        .init();
}

fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let config = Config::load()?;
    let cwd = env::current_dir()?;

    let started = Instant::now();
    cmd::log::run_log(&cli.log, &config, &cwd)?;
    println!("finished in {:.3}s", started.elapsed().as_secs_f64());
    Ok(())
}
