//! Embedded-wallet provider integration.
//!
//! DESIGN
//! ======
//! The provider's hook surface is consumed through one capability trait,
//! [`types::WalletAuth`]: request sign-in, verify an OTP, sign out, and
//! observe the provider's auth snapshot (principal, EVM address, signed-in
//! flag) via current-value reads plus a change subscription. The sign-in
//! flow in [`flow`] depends only on that trait, so the concrete provider in
//! [`cdp`] can be swapped for a mock in tests.

pub mod cdp;
pub mod flow;
pub mod tx;
pub mod types;

pub use types::WalletAuth;
