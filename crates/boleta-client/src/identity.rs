//! # DNI Lookup
//!
//! Resolves a Peruvian DNI to the holder's names through an external
//! provider (apiperu.dev by default).
//!
//! The provider has its own bearer token. The backend session token is
//! never sent there, and a 401 from the provider leaves the session alone.

use boleta_core::types::IdentityRecord;
use boleta_core::validation::validate_dni;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::http::extract_server_message;

#[derive(Debug, Serialize)]
struct LookupRequest<'a> {
    dni: &'a str,
}

#[derive(Debug, Deserialize)]
struct LookupResponse {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    data: Option<LookupData>,
}

#[derive(Debug, Deserialize)]
struct LookupData {
    #[serde(default)]
    numero: Option<String>,
    #[serde(default)]
    nombres: Option<String>,
    #[serde(default)]
    apellido_paterno: Option<String>,
    #[serde(default)]
    apellido_materno: Option<String>,
}

#[derive(Debug, Clone)]
pub struct IdentityApi {
    client: Client,
    url: String,
    token: String,
}

impl IdentityApi {
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let client = Client::builder().timeout(config.timeout()).build()?;
        Ok(IdentityApi {
            client,
            url: config.identity.url.clone(),
            token: config.identity.token.clone(),
        })
    }

    /// Looks a DNI up. `Ok(None)` means the provider has no record.
    ///
    /// The DNI is validated before any request is made.
    pub async fn lookup(&self, dni: &str) -> ClientResult<Option<IdentityRecord>> {
        let dni = dni.trim();
        validate_dni(dni)?;

        debug!(url = %self.url, "Looking up DNI");
        let mut request = self.client.post(&self.url).json(&LookupRequest { dni });
        if !self.token.is_empty() {
            request = request.bearer_auth(&self.token);
        }

        let response = request.send().await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            info!("DNI not found");
            return Ok(None);
        }

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), "DNI lookup failed");
            return Err(ClientError::from_status(
                status.as_u16(),
                extract_server_message(&text),
            ));
        }

        let bytes = response.bytes().await?;
        let body: LookupResponse = serde_json::from_slice(&bytes)?;

        let record = match body.data {
            Some(data) => Some(IdentityRecord {
                dni: data.numero.unwrap_or_else(|| dni.to_string()),
                names: data.nombres.unwrap_or_default(),
                paternal_surname: data.apellido_paterno.unwrap_or_default(),
                maternal_surname: data.apellido_materno.unwrap_or_default(),
            }),
            None => None,
        };

        info!(found = record.is_some(), success = body.success, "DNI lookup finished");
        Ok(record)
    }
}
