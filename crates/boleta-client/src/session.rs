//! # Session Store
//!
//! Holds the backend token and the signed-in user, mirrored to a small JSON
//! file so a session survives restarts.
//!
//! ## Session Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Session Lifecycle                                │
//! │                                                                         │
//! │  load() ──► file missing? ──► empty session                             │
//! │    │                                                                    │
//! │    ▼                                                                    │
//! │  login / register / refresh ──► save(AuthResponse) ──► file written     │
//! │    │                                                                    │
//! │  verify-token ──► update_user(UserData)                                 │
//! │    │                                                                    │
//! │  401 from backend, logout ──► clear() ──► file removed                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Cloning a `SessionStore` shares the same state; the API clients each hold
//! a clone.

use boleta_core::auth::{AuthResponse, UserData};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::error::{ClientError, ClientResult};

/// What gets written to the session file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub user: Option<UserData>,
}

#[derive(Debug, Clone)]
pub struct SessionStore {
    path: Option<PathBuf>,
    state: Arc<RwLock<Session>>,
}

impl SessionStore {
    /// A store that is never written to disk.
    pub fn in_memory() -> Self {
        SessionStore {
            path: None,
            state: Arc::new(RwLock::new(Session::default())),
        }
    }

    /// Opens the session file at `path`.
    ///
    /// A missing file is an empty session. A corrupt one is logged and
    /// treated as empty too, so a bad file never locks the user out.
    pub async fn load(path: impl Into<PathBuf>) -> ClientResult<Self> {
        let path = path.into();
        let session = match tokio::fs::read(&path).await {
            Ok(bytes) => match serde_json::from_slice::<Session>(&bytes) {
                Ok(session) => {
                    debug!(?path, authenticated = session.token.is_some(), "Session loaded");
                    session
                }
                Err(e) => {
                    warn!(?path, error = %e, "Ignoring unreadable session file");
                    Session::default()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(?path, "No session file, starting signed out");
                Session::default()
            }
            Err(e) => return Err(ClientError::SessionStorage(e.to_string())),
        };

        Ok(SessionStore {
            path: Some(path),
            state: Arc::new(RwLock::new(session)),
        })
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Stores token and user from a successful auth response.
    pub async fn save(&self, response: &AuthResponse) -> ClientResult<()> {
        let token = response
            .token
            .clone()
            .filter(|t| !t.is_empty())
            .ok_or_else(|| ClientError::InvalidResponse("auth response has no token".into()))?;

        let mut state = self.state.write().await;
        state.token = Some(token);
        state.user = response.user_data();
        self.persist(&state).await?;

        info!(user_id = ?response.user_id, "Session saved");
        Ok(())
    }

    /// Replaces the user, keeping the token.
    pub async fn update_user(&self, user: UserData) -> ClientResult<()> {
        let mut state = self.state.write().await;
        state.user = Some(user);
        self.persist(&state).await
    }

    /// Forgets token and user and removes the file.
    pub async fn clear(&self) -> ClientResult<()> {
        let mut state = self.state.write().await;
        *state = Session::default();

        if let Some(path) = &self.path {
            match tokio::fs::remove_file(path).await {
                Ok(()) => {}
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => return Err(ClientError::SessionStorage(e.to_string())),
            }
        }

        info!("Session cleared");
        Ok(())
    }

    pub async fn token(&self) -> Option<String> {
        self.state.read().await.token.clone()
    }

    pub async fn current_user(&self) -> Option<UserData> {
        self.state.read().await.user.clone()
    }

    pub async fn is_authenticated(&self) -> bool {
        self.state.read().await.token.is_some()
    }

    async fn persist(&self, session: &Session) -> ClientResult<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| ClientError::SessionStorage(e.to_string()))?;
        }

        let contents = serde_json::to_vec_pretty(session)?;
        tokio::fs::write(path, contents)
            .await
            .map_err(|e| ClientError::SessionStorage(e.to_string()))
    }
}
