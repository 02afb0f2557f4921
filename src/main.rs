//! Finboard main entry point

use anyhow::Context;
use clap::Parser;
use finboard_api::start_server;
use finboard_config::Config;
use finboard_gateway::HttpGateway;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::runtime::Runtime;

#[derive(Parser, Debug)]
#[command(name = "finboard")]
#[command(version)]
#[command(about = "Dashboard for browsing, categorizing and charting bank transactions", long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "config.yaml")]
    config: PathBuf,

    /// Print the default configuration and exit
    #[arg(long)]
    print_default_config: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if args.print_default_config {
        print!("{}", Config::generate_default());
        return Ok(());
    }

    let config = match Config::load_or_default(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e.to_details());
            return Err(e).with_context(|| format!("loading {}", args.config.display()));
        }
    };

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.logging.level.as_str()),
    )
    .init();

    log::info!(
        "Config loaded from {}, backend={}",
        args.config.display(),
        config.backend.base_url
    );

    let gateway = HttpGateway::new(&config.backend.base_url)?;

    let rt = Runtime::new()?;
    rt.block_on(start_server(config, Arc::new(gateway)))?;

    Ok(())
}
