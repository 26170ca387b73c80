//! # Authentication API
//!
//! Calls under `/api/usuarios` and keeps the [`SessionStore`] in step with
//! them.
//!
//! ## Token Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Token Lifecycle                                 │
//! │                                                                         │
//! │  register / login ─────────────► save(token, user)                      │
//! │                                                                         │
//! │  startup ──► token stored? ──no──► signed out                           │
//! │                 │                                                       │
//! │                yes                                                      │
//! │                 ▼                                                       │
//! │           verify_token ──ok──► update_user ──► signed in                │
//! │                 │                                                       │
//! │               error ──► clear() ──► signed out                          │
//! │                                                                         │
//! │  refresh_token ──► save(new token, user)                                │
//! │  logout ─────────► clear()                                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use boleta_core::auth::{
    AuthResponse, EmailAvailability, LoginCredentials, RegistrationRequest, UserData,
};
use boleta_core::validation::{validate_email, validate_registration};
use tracing::{info, warn};

use crate::error::{ClientError, ClientResult};
use crate::http::ApiClient;
use crate::session::SessionStore;

const BASE_PATH: &str = "/api/usuarios";

#[derive(Debug, Clone)]
pub struct AuthApi {
    http: ApiClient,
}

impl AuthApi {
    pub fn new(http: ApiClient) -> Self {
        AuthApi { http }
    }

    pub fn session(&self) -> &SessionStore {
        self.http.session()
    }

    /// `POST /registro`. Validates the form locally first and signs the new
    /// user in on success.
    pub async fn register(&self, request: &RegistrationRequest) -> ClientResult<AuthResponse> {
        validate_registration(request)?;

        let response: AuthResponse = self
            .http
            .post(&format!("{}/registro", BASE_PATH), request)
            .await?;
        let response = accepted(response)?;
        self.session().save(&response).await?;

        info!(user_id = ?response.user_id, "User registered");
        Ok(response)
    }

    /// `POST /login`.
    pub async fn login(&self, credentials: &LoginCredentials) -> ClientResult<AuthResponse> {
        let response: AuthResponse = self
            .http
            .post(&format!("{}/login", BASE_PATH), credentials)
            .await?;
        let response = accepted(response)?;
        self.session().save(&response).await?;

        info!(user_id = ?response.user_id, "Logged in");
        Ok(response)
    }

    /// `POST /verificar-token`. Refreshes the stored user on success.
    pub async fn verify_token(&self) -> ClientResult<UserData> {
        self.require_token().await?;

        let response: AuthResponse = self
            .http
            .post_empty(&format!("{}/verificar-token", BASE_PATH))
            .await?;
        let user = response
            .user_data()
            .ok_or_else(|| ClientError::InvalidResponse("token check returned no user".into()))?;
        self.session().update_user(user.clone()).await?;

        Ok(user)
    }

    /// `POST /refrescar-token`. Stores the new token.
    pub async fn refresh_token(&self) -> ClientResult<AuthResponse> {
        self.require_token().await?;

        let response: AuthResponse = self
            .http
            .post_empty(&format!("{}/refrescar-token", BASE_PATH))
            .await?;
        self.session().save(&response).await?;

        info!("Token refreshed");
        Ok(response)
    }

    /// `GET /verificar-email/{email}`.
    ///
    /// The backend answers taken addresses with an error status, so any
    /// status error reads as "not available". Transport failures are still
    /// errors.
    pub async fn is_email_available(&self, email: &str) -> ClientResult<bool> {
        let email = email.trim();
        validate_email(email)?;

        let path = format!(
            "{}/verificar-email/{}",
            BASE_PATH,
            email.replace('%', "%25")
        );
        match self.http.get::<EmailAvailability>(&path).await {
            Ok(answer) => Ok(answer.available),
            Err(e) if e.status().is_some() => {
                warn!(status = ?e.status(), "Email already registered");
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }

    /// Checks a stored token at startup. A token the backend refuses clears
    /// the session; if the backend cannot be reached the session is kept and
    /// the transport error returned. Returns whether the user is still
    /// signed in.
    pub async fn verify_on_startup(&self) -> ClientResult<bool> {
        if !self.session().is_authenticated().await {
            return Ok(false);
        }

        match self.verify_token().await {
            Ok(user) => {
                info!(user_id = user.user_id, "Stored session is valid");
                Ok(true)
            }
            Err(e) if backend_unreachable(&e) => {
                warn!(error = %e, "Could not verify stored token, keeping session");
                Err(e)
            }
            Err(e) => {
                warn!(error = %e, "Stored token is invalid, clearing session");
                self.session().clear().await?;
                Ok(false)
            }
        }
    }

    /// Forgets the local session. The backend keeps no logout state.
    pub async fn logout(&self) -> ClientResult<()> {
        self.session().clear().await
    }

    async fn require_token(&self) -> ClientResult<()> {
        if self.session().is_authenticated().await {
            Ok(())
        } else {
            Err(ClientError::NoSession)
        }
    }
}

/// No HTTP status means the request never got an answer (offline, timeout).
fn backend_unreachable(err: &ClientError) -> bool {
    matches!(err, ClientError::Http(e) if e.status().is_none())
}

/// A 2xx body can still carry `success: false`.
fn accepted(response: AuthResponse) -> ClientResult<AuthResponse> {
    if response.success || response.token.is_some() {
        Ok(response)
    } else {
        Err(ClientError::Rejected(response.message))
    }
}
