//! # HTTP Client
//!
//! Thin wrapper over `reqwest` shared by the backend APIs.
//!
//! ## Request Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  get / post / post_empty                                                │
//! │     │                                                                   │
//! │     ├── url = base_url + path                                           │
//! │     ├── Authorization: Bearer <session token>   (when one is stored)    │
//! │     ▼                                                                   │
//! │  send ──► handle_response                                               │
//! │              ├── 2xx            → JSON body                             │
//! │              ├── 401            → clear session, Unauthorized           │
//! │              └── other non-2xx  → ClientError::from_status(            │
//! │                                     mensaje | message | raw text)       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, warn, Instrument};
use uuid::Uuid;

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::session::SessionStore;

/// HTTP client for the receipt / auth backend.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    session: SessionStore,
}

impl ApiClient {
    /// Creates a client from configuration.
    pub fn new(config: &ClientConfig, session: SessionStore) -> ClientResult<Self> {
        let client = Client::builder().timeout(config.timeout()).build()?;

        Ok(Self {
            client,
            base_url: config.base_url().trim_end_matches('/').to_string(),
            session,
        })
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Attaches the session token, if any.
    async fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match self.session.token().await {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Make a GET request.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let request = self.authorize(self.client.get(self.url(path))).await;
        self.execute("GET", path, request).await
    }

    /// Make a POST request with JSON body.
    pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let request = self.authorize(self.client.post(self.url(path)).json(body)).await;
        self.execute("POST", path, request).await
    }

    /// Make a POST request without body.
    pub async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let request = self.authorize(self.client.post(self.url(path))).await;
        self.execute("POST", path, request).await
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        method: &'static str,
        path: &str,
        request: RequestBuilder,
    ) -> ClientResult<T> {
        let span = tracing::debug_span!("api", request_id = %Uuid::new_v4(), method, path);
        async move {
            debug!("Sending request");
            let response = request.send().await.map_err(|e| {
                error!(error = %e, "Request failed before a response arrived");
                ClientError::from(e)
            })?;
            self.handle_response(response).await
        }
        .instrument(span)
        .await
    }

    /// Handle the HTTP response.
    async fn handle_response<T: DeserializeOwned>(&self, response: Response) -> ClientResult<T> {
        let status = response.status();

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let message = extract_server_message(&text);

            if status == StatusCode::UNAUTHORIZED {
                warn!("Backend answered 401, clearing session");
                if let Err(e) = self.session.clear().await {
                    warn!(error = %e, "Failed to clear session after 401");
                }
            } else {
                debug!(status = status.as_u16(), message = ?message, "Backend rejected request");
            }

            return Err(ClientError::from_status(status.as_u16(), message));
        }

        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(Into::into)
    }
}

/// Error body shapes the backend uses.
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    mensaje: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// Picks the most specific explanation from an error body:
/// `mensaje`, then `message`, then the raw text.
pub(crate) fn extract_server_message(body: &str) -> Option<String> {
    let body = body.trim();
    if body.is_empty() {
        return None;
    }

    match serde_json::from_str::<ErrorBody>(body) {
        Ok(parsed) => parsed
            .mensaje
            .filter(|m| !m.trim().is_empty())
            .or(parsed.message.filter(|m| !m.trim().is_empty())),
        Err(_) => Some(body.to_string()),
    }
}
