//! Café register main entry point

use cafe_api::start_server;
use cafe_config::Config;
use cafe_core::Register;
use clap::Parser;
use log::{error, info, warn};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::runtime::Runtime;
use tokio::sync::RwLock;

#[derive(Parser, Debug)]
#[command(name = "cafe-register")]
#[command(version = "0.1.0")]
#[command(about = "A single-shift point-of-sale ledger for a small café", long_about = None)]
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

    let config = match Config::load(args.config.clone()) {
        Ok(config) => config,
        Err(e) => {
            env_logger::init();
            error!("{}", e.to_details());
            return Err(e.into());
        }
    };

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.logging.level.as_str()),
    )
    .init();

    info!(
        "Config loaded: store backend={}, table={}, currency={}",
        config.store.backend, config.store.table, config.currency.code
    );

    let rt = Runtime::new()?;
    rt.block_on(async {
        let store = cafe_store::from_config(&config.store)?;
        let register = Arc::new(RwLock::new(Register::new(&config, store)));

        {
            let mut guard = register.write().await;
            match guard.reload().await {
                Ok(count) => info!("Loaded {} transactions for {}", count, Register::today()),
                Err(e) => warn!("Starting with an empty list: {}", e),
            }
        }

        start_server(config, register).await?;
        Ok::<(), anyhow::Error>(())
    })
}
