//! Provider-neutral wallet auth types and errors.

use serde::{Deserialize, Serialize};
use tokio::sync::watch;

// =============================================================================
// ERROR
// =============================================================================

/// Errors produced by wallet provider operations.
#[derive(Debug, thiserror::Error)]
pub enum WalletError {
    /// The HTTP request to the provider failed.
    #[error("API request failed: {0}")]
    ApiRequest(String),

    /// The provider returned a non-success HTTP status.
    #[error("API response error: status {status}")]
    ApiResponse { status: u16, body: String },

    /// The provider response body could not be deserialized.
    #[error("API response parse failed: {0}")]
    ApiParse(String),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
}

// =============================================================================
// AUTH SNAPSHOT
// =============================================================================

/// The authenticated principal as the provider reports it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    pub email: String,
}

/// Point-in-time view of the provider's reactive auth state.
///
/// `evm_address` trails `user`: the provider confirms the principal first and
/// derives the embedded-wallet address asynchronously.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthSnapshot {
    pub user: Option<AuthUser>,
    pub evm_address: Option<String>,
    pub is_signed_in: bool,
}

impl AuthSnapshot {
    /// Snapshot for a signed-out provider.
    #[must_use]
    pub fn signed_out() -> Self {
        Self::default()
    }
}

// =============================================================================
// SIGN-IN START
// =============================================================================

/// Provider response to a sign-in request.
///
/// The flow id is an opaque token identifying this attempt; it must be echoed
/// back verbatim when verifying the emailed OTP.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignInStart {
    pub flow_id: String,
    /// Human-readable delivery notice. The provider sends no structured
    /// discriminator between OTP and magic-link delivery.
    pub message: Option<String>,
}

// =============================================================================
// WALLET AUTH TRAIT
// =============================================================================

/// Provider-neutral capability for embedded-wallet auth. Enables mocking in
/// tests.
#[async_trait::async_trait]
pub trait WalletAuth: Send + Sync {
    /// Ask the provider to start an email sign-in attempt.
    ///
    /// # Errors
    ///
    /// Returns a [`WalletError`] if the request fails or the response is
    /// malformed.
    async fn sign_in_with_email(&self, email: &str) -> Result<SignInStart, WalletError>;

    /// Complete a sign-in attempt with the emailed code.
    ///
    /// # Errors
    ///
    /// Returns a [`WalletError`] if the code is rejected or the request
    /// fails.
    async fn verify_email_otp(&self, flow_id: &str, otp: &str) -> Result<(), WalletError>;

    /// End the provider session.
    ///
    /// # Errors
    ///
    /// Returns a [`WalletError`] if the request fails; local state is cleared
    /// by the caller either way.
    async fn sign_out(&self) -> Result<(), WalletError>;

    /// Current auth snapshot.
    fn snapshot(&self) -> AuthSnapshot;

    /// Receiver observing every auth snapshot change.
    fn subscribe(&self) -> watch::Receiver<AuthSnapshot>;
}

#[cfg(test)]
#[path = "types_test.rs"]
mod tests;
