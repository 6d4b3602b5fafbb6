//! Coinbase CDP embedded-wallet client.
//!
//! Thin HTTP wrapper over the platform auth endpoints. Pure parsing is kept
//! out of the transport path for testability. The client owns the provider's
//! reactive auth snapshot in a watch channel: verification and sign-out
//! update it directly, and a short-lived background poll picks up the
//! asynchronously derived wallet address.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tracing::{debug, warn};

use super::types::{AuthSnapshot, AuthUser, SignInStart, WalletAuth, WalletError};
use crate::config::WalletConfig;

const PROJECT_ID_HEADER: &str = "X-Project-Id";
const SESSION_POLL_INTERVAL_MS: u64 = 1000;
const SESSION_POLL_ATTEMPTS: u32 = 10;

// =============================================================================
// CLIENT
// =============================================================================

pub struct CdpClient {
    http: reqwest::Client,
    base_url: String,
    project_id: String,
    auth: Arc<watch::Sender<AuthSnapshot>>,
}

impl CdpClient {
    pub fn new(config: WalletConfig) -> Result<Self, WalletError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeouts.request_secs))
            .connect_timeout(Duration::from_secs(config.timeouts.connect_secs))
            .build()
            .map_err(|e| WalletError::HttpClientBuild(e.to_string()))?;
        let (auth, _rx) = watch::channel(AuthSnapshot::signed_out());
        Ok(Self { http, base_url: config.base_url, project_id: config.project_id, auth: Arc::new(auth) })
    }

    async fn post(&self, path: &str, body: &serde_json::Value) -> Result<String, WalletError> {
        let response = self
            .http
            .post(format!("{}{path}", self.base_url))
            .header(PROJECT_ID_HEADER, &self.project_id)
            .json(body)
            .send()
            .await
            .map_err(|e| WalletError::ApiRequest(e.to_string()))?;
        read_success_body(response).await
    }
}

#[async_trait::async_trait]
impl WalletAuth for CdpClient {
    async fn sign_in_with_email(&self, email: &str) -> Result<SignInStart, WalletError> {
        let body = self
            .post("/v1/auth/email", &serde_json::json!({ "email": email }))
            .await?;
        parse_sign_in_response(&body)
    }

    async fn verify_email_otp(&self, flow_id: &str, otp: &str) -> Result<(), WalletError> {
        let body = self
            .post("/v1/auth/email/verify", &serde_json::json!({ "flowId": flow_id, "otp": otp }))
            .await?;
        let snapshot = parse_session_response(&body)?;
        let wallet_pending = snapshot.is_signed_in && snapshot.evm_address.is_none();
        self.auth.send_replace(snapshot);

        // The wallet address is derived asynchronously on the provider side;
        // poll the session until it materializes.
        if wallet_pending {
            tokio::spawn(poll_for_wallet(
                self.http.clone(),
                self.base_url.clone(),
                self.project_id.clone(),
                Arc::clone(&self.auth),
            ));
        }
        Ok(())
    }

    async fn sign_out(&self) -> Result<(), WalletError> {
        let result = self.post("/v1/auth/signout", &serde_json::json!({})).await;
        // The provider session may or may not survive a failed request, but
        // the snapshot this process acts on is cleared either way.
        self.auth.send_replace(AuthSnapshot::signed_out());
        result.map(|_| ())
    }

    fn snapshot(&self) -> AuthSnapshot {
        self.auth.borrow().clone()
    }

    fn subscribe(&self) -> watch::Receiver<AuthSnapshot> {
        self.auth.subscribe()
    }
}

async fn read_success_body(response: reqwest::Response) -> Result<String, WalletError> {
    let status = response.status().as_u16();
    let text = response
        .text()
        .await
        .map_err(|e| WalletError::ApiRequest(e.to_string()))?;
    if status != 200 {
        return Err(WalletError::ApiResponse { status, body: text });
    }
    Ok(text)
}

async fn fetch_session(
    http: &reqwest::Client,
    base_url: &str,
    project_id: &str,
) -> Result<AuthSnapshot, WalletError> {
    let response = http
        .get(format!("{base_url}/v1/auth/session"))
        .header(PROJECT_ID_HEADER, project_id)
        .send()
        .await
        .map_err(|e| WalletError::ApiRequest(e.to_string()))?;
    let body = read_success_body(response).await?;
    parse_session_response(&body)
}

async fn poll_for_wallet(
    http: reqwest::Client,
    base_url: String,
    project_id: String,
    auth: Arc<watch::Sender<AuthSnapshot>>,
) {
    for attempt in 0..SESSION_POLL_ATTEMPTS {
        tokio::time::sleep(Duration::from_millis(SESSION_POLL_INTERVAL_MS)).await;
        match fetch_session(&http, &base_url, &project_id).await {
            Ok(snapshot) => {
                let done = snapshot.evm_address.is_some() || !snapshot.is_signed_in;
                auth.send_replace(snapshot);
                if done {
                    debug!(attempt, "wallet address poll finished");
                    return;
                }
            }
            Err(e) => warn!(attempt, error = %e, "session poll failed"),
        }
    }
    warn!("wallet address did not materialize within the poll window");
}

// =============================================================================
// WIRE TYPES
// =============================================================================

#[derive(serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct SignInResponse {
    flow_id: Option<String>,
    message: Option<String>,
}

#[derive(serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct SessionResponse {
    user: Option<UserBlob>,
    evm_address: Option<String>,
    is_signed_in: Option<bool>,
}

#[derive(serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct UserBlob {
    authentication_methods: AuthMethods,
}

#[derive(serde::Deserialize)]
struct AuthMethods {
    email: Option<EmailMethod>,
}

#[derive(serde::Deserialize)]
struct EmailMethod {
    email: String,
}

// =============================================================================
// PARSING
// =============================================================================

fn parse_sign_in_response(json: &str) -> Result<SignInStart, WalletError> {
    let response: SignInResponse = serde_json::from_str(json).map_err(|e| WalletError::ApiParse(e.to_string()))?;
    let flow_id = response
        .flow_id
        .ok_or_else(|| WalletError::ApiParse("sign-in response missing flowId".into()))?;
    Ok(SignInStart { flow_id, message: response.message })
}

fn parse_session_response(json: &str) -> Result<AuthSnapshot, WalletError> {
    let response: SessionResponse = serde_json::from_str(json).map_err(|e| WalletError::ApiParse(e.to_string()))?;
    let user = response.user.map(|blob| AuthUser {
        email: blob
            .authentication_methods
            .email
            .map(|method| method.email)
            .unwrap_or_default(),
    });
    let is_signed_in = response.is_signed_in.unwrap_or(user.is_some());
    Ok(AuthSnapshot { user, evm_address: response.evm_address, is_signed_in })
}

#[cfg(test)]
#[path = "cdp_test.rs"]
mod tests;
