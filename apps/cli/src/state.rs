//! Everything a command needs, built once at startup.

use anyhow::Context;
use boleta_client::{ApiClient, AuthApi, ClientConfig, IdentityApi, ReceiptApi, SessionStore};
use boleta_core::format::CurrencyFormat;
use std::path::PathBuf;
use tracing::{info, warn};

pub struct AppState {
    pub config: ClientConfig,
    pub session: SessionStore,
    pub auth: AuthApi,
    pub receipts: ReceiptApi,
    pub identity: IdentityApi,
    pub currency: CurrencyFormat,
}

impl AppState {
    /// Loads config, opens the session file and wires the API clients.
    pub async fn init(config_path: Option<PathBuf>) -> anyhow::Result<Self> {
        let config = ClientConfig::load(config_path).context("loading configuration")?;

        let session = match config.session_path() {
            Some(path) => {
                info!(?path, "Using session file");
                SessionStore::load(path).await.context("opening session")?
            }
            None => {
                warn!("No data directory available, session will not be saved");
                SessionStore::in_memory()
            }
        };

        let http = ApiClient::new(&config, session.clone())?;
        let currency = CurrencyFormat::for_code(&config.display.currency_code);

        Ok(AppState {
            auth: AuthApi::new(http.clone()),
            receipts: ReceiptApi::new(http),
            identity: IdentityApi::new(&config)?,
            config,
            session,
            currency,
        })
    }
}
