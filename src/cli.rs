//! Command-line surface.
//!
//! Each subcommand maps onto one page of the marketplace: browse (home),
//! gen (studio), miners (mining dashboard), account (ledger), mint/train
//! (forge), plus the sign-in lifecycle and on-chain balance reads.

use std::io::Write as _;
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use ethereum_types::U256;

use crate::chain::reader::{Erc20Reader, Erc721Reader, MarketplaceReader};
use crate::chain::{contracts, units};
use crate::market::forge::UploadedFile;
use crate::market::studio::{CostEstimate, Workflow};
use crate::market::{catalog, ledger, mining};
use crate::state::AppState;
use crate::wallet::flow::SignInFlow;
use crate::wallet::tx;

/// How long `login` follows provider snapshots waiting for the wallet
/// address before giving up and reporting a pending session.
const WALLET_WAIT_SECS: u64 = 15;

#[derive(Parser)]
#[command(name = "guva", version, about = "Guva: AI LoRA marketplace client")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Browse LoRA NFT listings
    Browse {
        /// Filter by tag: all, character, style, or background
        #[arg(long, default_value = "all")]
        tag: String,
    },
    /// Run a mocked generation job
    Gen {
        #[arg(long, default_value = "Text2Image Cartoon")]
        workflow: String,
        #[arg(long, default_value = "Nishikigi Chisato [10 outfits] | Illustrious | Lycoris Recoil")]
        lora: String,
        #[arg(long)]
        prompt: String,
    },
    /// Show the mining fleet
    Miners {
        /// Filter by status: all, busy, or idle
        #[arg(long, default_value = "all")]
        status: String,
    },
    /// Show the account balance and transaction history
    Account,
    /// Mint an uploaded LoRA file as an NFT
    Mint {
        #[arg(long)]
        name: String,
        #[arg(long)]
        rent_price: String,
        /// LoRA file to upload (repeatable)
        #[arg(long = "file", required = true)]
        files: Vec<String>,
    },
    /// Start a mocked LoRA training run
    Train {
        #[arg(long)]
        name: String,
        /// Training image (repeatable)
        #[arg(long = "image", required = true)]
        images: Vec<String>,
    },
    /// Sign in with an email address
    Login { email: String },
    /// Sign out and clear the cached session
    Logout,
    /// Show the signed-in session
    Whoami,
    /// Read on-chain balances for the signed-in wallet
    Balance {
        /// Chain id to query (defaults to the configured network)
        #[arg(long)]
        chain: Option<u64>,
    },
    /// Read on-chain marketplace listings
    Listings,
    /// Read on-chain metadata for one LoRA NFT
    Nft {
        #[arg(long)]
        token_id: u64,
    },
    /// Buy an on-chain listing (prepared and mock-submitted, never broadcast)
    Buy {
        #[arg(long)]
        listing_id: u64,
    },
    /// List a LoRA NFT for sale (prepared and mock-submitted, never broadcast)
    Sell {
        #[arg(long)]
        token_id: u64,
        /// Asking price in ETH
        #[arg(long)]
        price: String,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("wallet provider not configured (set WALLET_PROJECT_ID)")]
    WalletUnavailable,
    #[error("not signed in")]
    NotSignedIn,
    #[error("{0}")]
    SignIn(String),
    #[error("{0}")]
    Invalid(String),
    #[error(transparent)]
    Chain(#[from] crate::chain::ChainError),
    #[error(transparent)]
    Studio(#[from] crate::market::studio::StudioError),
    #[error(transparent)]
    Forge(#[from] crate::market::forge::ForgeError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

// =============================================================================
// ARGUMENT PARSING
// =============================================================================

fn parse_tag(raw: &str) -> Result<Option<catalog::Tag>, CliError> {
    if raw.trim().eq_ignore_ascii_case("all") {
        return Ok(None);
    }
    raw.parse().map(Some).map_err(CliError::Invalid)
}

fn parse_status(raw: &str) -> Result<Option<mining::MinerStatus>, CliError> {
    if raw.trim().eq_ignore_ascii_case("all") {
        return Ok(None);
    }
    raw.parse().map(Some).map_err(CliError::Invalid)
}

fn staged_files(paths: &[String]) -> Vec<UploadedFile> {
    paths
        .iter()
        .map(|path| {
            let name = std::path::Path::new(path)
                .file_name()
                .map_or_else(|| path.clone(), |n| n.to_string_lossy().into_owned());
            let size = std::fs::metadata(path).map_or(0, |m| m.len());
            UploadedFile { name, size }
        })
        .collect()
}

// =============================================================================
// COMMANDS
// =============================================================================

pub async fn run(state: &AppState, command: Command) -> Result<(), CliError> {
    match command {
        Command::Browse { tag } => browse(&tag),
        Command::Gen { workflow, lora, prompt } => generate(state, &workflow, &lora, &prompt).await,
        Command::Miners { status } => miners(&status),
        Command::Account => {
            account();
            Ok(())
        }
        Command::Mint { name, rent_price, files } => mint(state, &name, &rent_price, &files).await,
        Command::Train { name, images } => train(state, &name, &images).await,
        Command::Login { email } => login(state, &email).await,
        Command::Logout => logout(state).await,
        Command::Whoami => whoami(state),
        Command::Balance { chain } => balance(state, chain).await,
        Command::Listings => listings(state).await,
        Command::Nft { token_id } => nft(state, token_id).await,
        Command::Buy { listing_id } => buy(state, listing_id).await,
        Command::Sell { token_id, price } => sell(state, token_id, &price).await,
    }
}

fn browse(tag: &str) -> Result<(), CliError> {
    let filter = parse_tag(tag)?;
    let listings = catalog::filter_by_tag(filter);
    for listing in &listings {
        println!("#{} {} by {} [{}] ⚡ {}", listing.id, listing.name, listing.creator, listing.tag.label(), listing.price);
    }
    if listings.is_empty() {
        println!("no listings match that tag");
    }
    Ok(())
}

async fn generate(state: &AppState, workflow: &str, lora: &str, prompt: &str) -> Result<(), CliError> {
    let workflow: Workflow = workflow.parse().map_err(CliError::Invalid)?;
    let session = state.sessions.current();

    let cost = CostEstimate::standard();
    println!("{} with {lora}", workflow.label());
    println!("estimated cost: ⚡ {} (miner {}, LoRA owner {})", cost.total(), cost.to_miner, cost.to_lora_owner);

    let generation = state.studio.generate(session.as_ref(), workflow, lora, prompt).await?;
    println!("generated {} → {}", generation.id, generation.asset);
    Ok(())
}

fn miners(status: &str) -> Result<(), CliError> {
    let filter = parse_status(status)?;
    let stats = mining::stats();
    println!(
        "{} miners | {} busy | {} idle | total earnings ⚡ {:.1}",
        stats.total, stats.busy, stats.idle, stats.total_earnings
    );
    for miner in mining::filter_by_status(filter) {
        println!(
            "{:<10} {:<2} {:<8} {:<12} {:>3}% ⚡ {:<5} up {}",
            miner.location,
            miner.country,
            miner.status.label(),
            miner.gpu,
            miner.usage,
            miner.earning,
            miner.uptime
        );
    }
    Ok(())
}

fn account() {
    let summary = ledger::summary();
    println!(
        "balance ⚡ {:.1} | earned ⚡ {:.1} | spent ⚡ {:.1}",
        summary.balance, summary.total_earned, summary.total_spent
    );
    for entry in ledger::history() {
        println!("{}  {:>6}  {}", entry.timestamp, ledger::format_amount(entry.amount), entry.description);
    }
}

async fn mint(state: &AppState, name: &str, rent_price: &str, files: &[String]) -> Result<(), CliError> {
    let session = state.sessions.current();
    let receipt = state
        .forge
        .mint(session.as_ref(), name, rent_price, &staged_files(files))
        .await?;
    println!(
        "LoRA \"{}\" minted with rent price ⚡ {} (tx {})",
        receipt.name, receipt.rent_price, receipt.tx.hash
    );
    Ok(())
}

async fn train(state: &AppState, name: &str, images: &[String]) -> Result<(), CliError> {
    let receipt = state.forge.train(name, &staged_files(images)).await?;
    println!(
        "LoRA \"{}\" training started over {} images; this may take several hours",
        receipt.name, receipt.images
    );
    Ok(())
}

async fn login(state: &AppState, email: &str) -> Result<(), CliError> {
    let wallet = state.wallet.as_ref().ok_or(CliError::WalletUnavailable)?;
    let mut flow = SignInFlow::new(Arc::clone(wallet), state.sessions.clone());

    flow.login_with_email(email).await;
    if let Some(error) = flow.last_error() {
        return Err(CliError::SignIn(error.to_owned()));
    }
    if let Some(message) = flow.message() {
        println!("{message}");
    }

    if flow.awaiting_otp() {
        let code = prompt_line("verification code: ")?;
        flow.set_otp_input(&code);
        flow.verify_otp().await;
        if let Some(error) = flow.last_error() {
            return Err(CliError::SignIn(error.to_owned()));
        }

        flow.wait_for_wallet(Duration::from_secs(WALLET_WAIT_SECS)).await;
        match state.sessions.current() {
            Some(session) => {
                let display = session
                    .address
                    .as_deref()
                    .and_then(units::short_address)
                    .unwrap_or_else(|| session.display_address().to_owned());
                println!("signed in as {} ({display})", session.email);
            }
            None => println!("signed in; waiting on the provider to confirm the session"),
        }
    }
    Ok(())
}

async fn logout(state: &AppState) -> Result<(), CliError> {
    if let Some(wallet) = &state.wallet {
        let mut flow = SignInFlow::new(Arc::clone(wallet), state.sessions.clone());
        flow.logout().await;
        if let Some(error) = flow.last_error() {
            // Local state is already cleared; the provider failure is advisory.
            eprintln!("warning: {error}");
        }
    } else {
        state.sessions.clear();
    }
    println!("signed out");
    Ok(())
}

fn whoami(state: &AppState) -> Result<(), CliError> {
    let session = state.sessions.current().ok_or(CliError::NotSignedIn)?;
    println!("{} ({})", session.email, session.display_address());
    Ok(())
}

async fn balance(state: &AppState, chain: Option<u64>) -> Result<(), CliError> {
    let session = state.sessions.current().ok_or(CliError::NotSignedIn)?;
    let Some(address) = session.address.as_deref() else {
        return Err(CliError::NotSignedIn);
    };
    let chain_id = chain.unwrap_or(state.chain_id);
    let owner = units::parse_address(address)?;

    let provider = state.chains.provider(chain_id)?;
    let reported = provider.eth_chain_id().await?;
    if reported != chain_id {
        tracing::warn!(expected = chain_id, reported, "endpoint reports a different chain id");
    }

    let native = provider.eth_get_balance(owner).await?;
    println!("native: {} ETH", units::format_eth(native));

    let token = Erc20Reader::bind(&state.chains, contracts::GUVA_TOKEN, chain_id)?;
    let (metadata, amount) = tokio::try_join!(token.metadata(), token.balance_of(owner))?;
    println!("{}: {} {}", metadata.name, units::format_units(amount, u32::from(metadata.decimals)), metadata.symbol);

    let collection = Erc721Reader::bind(&state.chains, contracts::NFT_COLLECTION, chain_id)?;
    println!("LoRA NFTs held: {}", collection.balance_of(owner).await?);
    Ok(())
}

async fn listings(state: &AppState) -> Result<(), CliError> {
    let marketplace = MarketplaceReader::bind(&state.chains, contracts::NFT_MARKETPLACE, state.chain_id)?;
    let ids = marketplace.listings().await?;
    if ids.is_empty() {
        println!("no on-chain listings");
        return Ok(());
    }
    for id in ids {
        let details = marketplace.listing(id).await?;
        println!(
            "listing {id}: {} ETH by {} ({})",
            units::format_eth(details.price),
            units::to_checksum(details.seller),
            if details.active { "active" } else { "inactive" }
        );
    }
    Ok(())
}

async fn nft(state: &AppState, token_id: u64) -> Result<(), CliError> {
    let collection = Erc721Reader::bind(&state.chains, contracts::NFT_COLLECTION, state.chain_id)?;
    let metadata = collection.metadata(U256::from(token_id)).await?;
    println!("token {token_id}: {} owned by {}", metadata.token_uri, units::to_checksum(metadata.owner));
    Ok(())
}

async fn buy(state: &AppState, listing_id: u64) -> Result<(), CliError> {
    let marketplace_address = units::parse_address(contracts::NFT_MARKETPLACE)?;
    let marketplace = MarketplaceReader::bind(&state.chains, contracts::NFT_MARKETPLACE, state.chain_id)?;

    let listing_id = U256::from(listing_id);
    let details = marketplace.listing(listing_id).await?;
    if !details.active {
        return Err(CliError::Invalid(format!("listing {listing_id} is not active")));
    }

    let request = tx::purchase_listing(marketplace_address, listing_id, details.price);
    println!("price {} ETH, estimated gas {}", units::format_eth(details.price), tx::estimate_gas(&request));
    let result = tx::submit(&request).await;
    println!("purchase submitted: {} ({:?})", result.hash, result.status);
    Ok(())
}

async fn sell(state: &AppState, token_id: u64, price: &str) -> Result<(), CliError> {
    // Chain reads are not needed to list, but the session must own a wallet.
    let session = state.sessions.current().ok_or(CliError::NotSignedIn)?;
    if !session.is_complete() {
        return Err(CliError::NotSignedIn);
    }

    let marketplace = units::parse_address(contracts::NFT_MARKETPLACE)?;
    let collection = units::parse_address(contracts::NFT_COLLECTION)?;
    let price = units::parse_eth(price)?;

    let request = tx::create_listing(marketplace, collection, U256::from(token_id), price);
    let result = tx::submit(&request).await;
    println!("listing submitted: {} ({:?})", result.hash, result.status);
    Ok(())
}

fn prompt_line(prompt: &str) -> Result<String, std::io::Error> {
    print!("{prompt}");
    std::io::stdout().flush()?;
    let mut line = String::new();
    std::io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_owned())
}

#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;
