//! LoRA forge: mint an uploaded LoRA as an NFT, or start a training run.
//!
//! Both jobs are simulated with a fixed latency. Minting still goes through
//! the real transaction-preparation path so the receipt carries the calldata
//! hash a live submission would have produced.

use std::time::Duration;

use tracing::info;
use uuid::Uuid;

use crate::chain::{contracts, units};
use crate::session::Session;
use crate::wallet::tx::{self, TransactionResult};

pub const MIN_TRAINING_IMAGES: usize = 5;
pub const MAX_TRAINING_IMAGES: usize = 15;

/// A file staged for upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    pub name: String,
    pub size: u64,
}

#[derive(Debug, thiserror::Error)]
pub enum ForgeError {
    #[error("please fill in all required fields and upload a LoRA file")]
    MissingMintFields,
    #[error("please provide a LoRA name and upload training images")]
    MissingTrainFields,
    #[error("minimum {MIN_TRAINING_IMAGES} images required for training")]
    TooFewTrainingImages,
    #[error("maximum {MAX_TRAINING_IMAGES} images allowed for training")]
    TooManyTrainingImages,
    #[error("sign in with a connected wallet to mint")]
    NotSignedIn,
    #[error("invalid wallet address: {0}")]
    InvalidAddress(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MintReceipt {
    pub id: Uuid,
    pub name: String,
    pub rent_price: String,
    pub tx: TransactionResult,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrainReceipt {
    pub id: Uuid,
    pub name: String,
    pub images: usize,
}

pub struct Forge {
    latency: Duration,
}

impl Forge {
    #[must_use]
    pub fn new(latency: Duration) -> Self {
        Self { latency }
    }

    /// Mint an uploaded LoRA as an NFT with the given rent price.
    ///
    /// # Errors
    ///
    /// Fails on missing fields, a missing or incomplete session, or a
    /// malformed wallet address.
    pub async fn mint(
        &self,
        session: Option<&Session>,
        name: &str,
        rent_price: &str,
        files: &[UploadedFile],
    ) -> Result<MintReceipt, ForgeError> {
        if name.trim().is_empty() || rent_price.trim().is_empty() || files.is_empty() {
            return Err(ForgeError::MissingMintFields);
        }
        let owner = session
            .filter(|s| s.connected)
            .and_then(|s| s.address.as_deref())
            .ok_or(ForgeError::NotSignedIn)?;
        let owner = units::parse_address(owner).map_err(|e| ForgeError::InvalidAddress(e.to_string()))?;
        let collection = units::parse_address(contracts::NFT_COLLECTION)
            .map_err(|e| ForgeError::InvalidAddress(e.to_string()))?;

        info!(name, rent_price, files = files.len(), "minting LoRA");
        tokio::time::sleep(self.latency).await;

        let token_uri = format!("ipfs://guva/{}", files[0].name);
        let result = tx::submit(&tx::mint_nft(collection, owner, &token_uri)).await;

        Ok(MintReceipt { id: Uuid::new_v4(), name: name.trim().to_owned(), rent_price: rent_price.trim().to_owned(), tx: result })
    }

    /// Start a mocked training run over the staged images.
    ///
    /// # Errors
    ///
    /// Fails on a missing name or an image count outside
    /// [`MIN_TRAINING_IMAGES`]..=[`MAX_TRAINING_IMAGES`].
    pub async fn train(&self, name: &str, images: &[UploadedFile]) -> Result<TrainReceipt, ForgeError> {
        if name.trim().is_empty() || images.is_empty() {
            return Err(ForgeError::MissingTrainFields);
        }
        if images.len() < MIN_TRAINING_IMAGES {
            return Err(ForgeError::TooFewTrainingImages);
        }
        if images.len() > MAX_TRAINING_IMAGES {
            return Err(ForgeError::TooManyTrainingImages);
        }

        info!(name, images = images.len(), "training started");
        tokio::time::sleep(self.latency).await;

        Ok(TrainReceipt { id: Uuid::new_v4(), name: name.trim().to_owned(), images: images.len() })
    }
}

#[cfg(test)]
#[path = "forge_test.rs"]
mod tests;
