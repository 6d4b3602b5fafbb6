//! Email/OTP sign-in flow.
//!
//! ARCHITECTURE
//! ============
//! The flow sequences `Idle → Submitting → AwaitingOtp → Verifying →
//! Authenticated` against the [`WalletAuth`] capability. Verification does
//! not produce the session itself: the provider's reactive snapshot does,
//! and the flow folds every observed snapshot into the session store via
//! [`SignInFlow::apply_snapshot`].
//!
//! TRADE-OFFS
//! ==========
//! Failures are not typed past the provider boundary. Every error collapses
//! to a display string in a single last-error slot and the state reverts to
//! its pre-attempt step; retry is manual, never automatic.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use super::types::{AuthSnapshot, WalletAuth};
use crate::session::Session;
use crate::store::SessionStore;

pub const OTP_LEN: usize = 6;

/// Position of the flow in the sign-in sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowState {
    Idle,
    Submitting { email: String },
    /// The provider sent a magic link instead of a code; nothing further to
    /// do locally.
    MagicLinkSent { email: String },
    AwaitingOtp { email: String, flow_id: String },
    Verifying { email: String, flow_id: String },
    Authenticated,
}

pub struct SignInFlow {
    wallet: Arc<dyn WalletAuth>,
    sessions: SessionStore,
    state: FlowState,
    otp_input: String,
    message: Option<String>,
    last_error: Option<String>,
    login_success: bool,
}

// =============================================================================
// PURE HELPERS
// =============================================================================

/// Normalize raw OTP input: strip non-digits first, then truncate to
/// [`OTP_LEN`] characters.
#[must_use]
pub fn normalize_otp(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).take(OTP_LEN).collect()
}

/// Whether a provider delivery notice announces an emailed code rather than
/// a magic link.
///
/// The provider sends no structured discriminator, only prose, so this scans
/// for the code-related keywords its English responses use. Reworded or
/// localized notices would fall through to the magic-link branch.
#[must_use]
pub fn otp_requested(message: &str) -> bool {
    message.contains("code") || message.contains("OTP")
}

// =============================================================================
// FLOW
// =============================================================================

impl SignInFlow {
    #[must_use]
    pub fn new(wallet: Arc<dyn WalletAuth>, sessions: SessionStore) -> Self {
        Self {
            wallet,
            sessions,
            state: FlowState::Idle,
            otp_input: String::new(),
            message: None,
            last_error: None,
            login_success: false,
        }
    }

    #[must_use]
    pub fn state(&self) -> &FlowState {
        &self.state
    }

    #[must_use]
    pub fn otp_input(&self) -> &str {
        &self.otp_input
    }

    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    #[must_use]
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    #[must_use]
    pub fn login_success(&self) -> bool {
        self.login_success
    }

    #[must_use]
    pub fn awaiting_otp(&self) -> bool {
        matches!(self.state, FlowState::AwaitingOtp { .. })
    }

    /// Start an email sign-in attempt.
    pub async fn login_with_email(&mut self, email: &str) {
        self.last_error = None;
        self.message = None;
        self.otp_input.clear();
        self.login_success = false;
        self.state = FlowState::Submitting { email: email.to_owned() };
        info!(email, "sign-in requested");

        match self.wallet.sign_in_with_email(email).await {
            Ok(start) => match start.message {
                Some(message) if otp_requested(&message) => {
                    debug!(flow_id = %start.flow_id, "verification code sent");
                    self.state = FlowState::AwaitingOtp { email: email.to_owned(), flow_id: start.flow_id };
                    self.message = Some(format!("We sent a verification code to {email}. Enter it below."));
                }
                Some(_) => {
                    debug!(flow_id = %start.flow_id, "magic link sent");
                    self.state = FlowState::MagicLinkSent { email: email.to_owned() };
                    self.message =
                        Some(format!("Magic link sent to {email}! Follow it to complete sign-in."));
                }
                None => {
                    self.state = FlowState::Idle;
                    self.last_error = Some("Failed to send verification code. Please try again.".into());
                }
            },
            Err(e) => {
                warn!(error = %e, "sign-in request failed");
                self.state = FlowState::Idle;
                self.last_error = Some(format!("Failed to send verification code: {e}"));
            }
        }
    }

    /// Record raw OTP input, normalized.
    pub fn set_otp_input(&mut self, raw: &str) {
        self.otp_input = normalize_otp(raw);
    }

    /// Submit the entered code for the pending flow.
    pub async fn verify_otp(&mut self) {
        let FlowState::AwaitingOtp { email, flow_id } = self.state.clone() else {
            self.last_error = Some("Please enter the verification code".into());
            return;
        };
        if self.otp_input.is_empty() {
            self.last_error = Some("Please enter the verification code".into());
            return;
        }

        self.last_error = None;
        self.state = FlowState::Verifying { email: email.clone(), flow_id: flow_id.clone() };

        match self.wallet.verify_email_otp(&flow_id, &self.otp_input).await {
            Ok(()) => {
                info!(email, "verification code accepted");
                self.otp_input.clear();
                self.state = FlowState::Authenticated;
                self.login_success = true;
                self.message = Some("Code verified! Setting up your account...".into());
                // The provider's snapshot populates the principal and wallet
                // address from here; apply_snapshot folds them in.
            }
            Err(e) => {
                warn!(error = %e, "verification failed");
                self.state = FlowState::AwaitingOtp { email, flow_id };
                self.last_error = Some("Failed to verify code. Please try again.".into());
            }
        }
    }

    /// Fold the current provider snapshot into local state.
    pub fn sync(&mut self) {
        self.apply_snapshot(&self.wallet.snapshot());
    }

    /// Fold one provider snapshot into the session store.
    pub fn apply_snapshot(&mut self, snapshot: &AuthSnapshot) {
        match (&snapshot.user, &snapshot.evm_address) {
            (Some(user), Some(address)) => {
                self.sessions.set(Session {
                    email: user.email.clone(),
                    address: Some(address.clone()),
                    connected: true,
                });
                self.login_success = true;
                self.state = FlowState::Authenticated;
            }
            (Some(user), None) => {
                debug!(email = %user.email, "principal confirmed, wallet address pending");
                self.sessions
                    .set(Session { email: user.email.clone(), address: None, connected: true });
                self.login_success = true;
                self.state = FlowState::Authenticated;
            }
            (None, _) => {
                self.sessions.clear();
                self.login_success = false;
                if self.state == FlowState::Authenticated {
                    self.state = FlowState::Idle;
                }
            }
        }
    }

    /// Follow provider snapshots until a complete session materializes or the
    /// timeout elapses.
    pub async fn wait_for_wallet(&mut self, timeout: Duration) {
        let mut rx = self.wallet.subscribe();
        let deadline = tokio::time::sleep(timeout);
        tokio::pin!(deadline);

        loop {
            let snapshot = rx.borrow().clone();
            self.apply_snapshot(&snapshot);
            if self.sessions.current().is_some_and(|s| s.is_complete()) {
                return;
            }
            tokio::select! {
                () = &mut deadline => return,
                changed = rx.changed() => {
                    if changed.is_err() {
                        return;
                    }
                }
            }
        }
    }

    /// Sign out of the provider and clear local state.
    ///
    /// The session store and cache slot are cleared regardless of whether the
    /// provider call succeeds; a provider failure still surfaces as the last
    /// error.
    pub async fn logout(&mut self) {
        let result = self.wallet.sign_out().await;

        self.state = FlowState::Idle;
        self.otp_input.clear();
        self.message = None;
        self.login_success = false;
        self.sessions.clear();

        match result {
            Ok(()) => {
                info!("signed out");
                self.last_error = None;
            }
            Err(e) => {
                warn!(error = %e, "provider sign-out failed");
                self.last_error = Some(format!("Failed to sign out: {e}"));
            }
        }
    }
}

#[cfg(test)]
#[path = "flow_test.rs"]
mod tests;
