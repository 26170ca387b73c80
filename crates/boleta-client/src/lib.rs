//! # boleta-client: Backend Collaborators for the Boleta Client
//!
//! Network and storage layer around [`boleta_core`]: authentication, receipt
//! submission and history, DNI lookup, the persisted session, and the
//! configuration that points at all of them.
//!
//! ## Architecture Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Client Architecture                              │
//! │                                                                         │
//! │         ┌──────────────┐   ┌──────────────┐   ┌──────────────────┐     │
//! │         │   AuthApi    │   │  ReceiptApi  │   │   IdentityApi    │     │
//! │         │ /api/usuarios│   │ /api/boletas │   │  DNI provider    │     │
//! │         └──────┬───────┘   └──────┬───────┘   └──────────────────┘     │
//! │                │                  │             own reqwest client,    │
//! │                └────────┬─────────┘             own token              │
//! │                         ▼                                               │
//! │                  ┌─────────────┐        ┌──────────────────┐           │
//! │                  │  ApiClient  │◄───────│  SessionStore    │           │
//! │                  │  (reqwest)  │ token  │  session.json    │           │
//! │                  └─────────────┘        └──────────────────┘           │
//! │                                                                         │
//! │   checkout::submit(form, receipts) ── ReceiptForm → ReceiptApi          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//! - [`config`] - Client configuration (backend URL, DNI provider, paths)
//! - [`error`] - Client error types and user-facing messages
//! - [`http`] - Shared HTTP client with bearer injection
//! - [`session`] - Persisted token and user
//! - [`auth`] - Register, login, token verification
//! - [`receipts`] - Create, list and read receipts
//! - [`identity`] - DNI lookup
//! - [`checkout`] - Submit a receipt form
//!
//! ## Usage Example
//! ```rust,no_run
//! use boleta_client::{ApiClient, ClientConfig, ReceiptApi, SessionStore};
//!
//! # async fn example() -> boleta_client::ClientResult<()> {
//! let config = ClientConfig::load(None)?;
//! let session = SessionStore::load("/tmp/session.json").await?;
//! let receipts = ReceiptApi::new(ApiClient::new(&config, session)?);
//!
//! for receipt in receipts.list_newest_first().await? {
//!     println!("{} {}", receipt.id, receipt.total);
//! }
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod checkout;
pub mod config;
pub mod error;
pub mod http;
pub mod identity;
pub mod receipts;
pub mod session;

pub use auth::AuthApi;
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use http::ApiClient;
pub use identity::IdentityApi;
pub use receipts::ReceiptApi;
pub use session::{Session, SessionStore};
