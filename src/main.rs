mod chain;
mod cli;
mod config;
mod market;
mod session;
mod state;
mod store;
mod wallet;

use std::sync::Arc;

use clap::Parser;

use wallet::WalletAuth;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let args = cli::Cli::parse();

    let config = match config::AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "invalid configuration");
            std::process::exit(2);
        }
    };

    // Initialize the wallet provider (non-fatal: sign-in disabled if config missing).
    let wallet: Option<Arc<dyn WalletAuth>> = match config::WalletConfig::from_env() {
        Ok(wallet_config) => match wallet::cdp::CdpClient::new(wallet_config) {
            Ok(client) => Some(Arc::new(client)),
            Err(e) => {
                tracing::warn!(error = %e, "wallet provider unavailable, sign-in disabled");
                None
            }
        },
        Err(e) => {
            tracing::warn!(error = %e, "wallet provider not configured, sign-in disabled");
            None
        }
    };

    let state = state::AppState::new(&config, wallet);

    if let Err(e) = cli::run(&state, args.command).await {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
