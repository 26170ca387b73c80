//! # Authentication Wire Types
//!
//! Request and response bodies of the `/api/usuarios` endpoints.
//!
//! ```text
//! RegistrationRequest ──► POST /registro ─┐
//! LoginCredentials    ──► POST /login    ─┼──► AuthResponse ──► UserData (session)
//!                         POST /refrescar-token ─┘
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::types::null_as_default;

/// Body of `POST /api/usuarios/registro`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct RegistrationRequest {
    pub email: String,
    pub password: String,

    #[serde(rename = "nombres")]
    pub names: String,

    #[serde(rename = "apellidos")]
    pub surnames: String,

    #[serde(rename = "numeroDocumento")]
    pub document_number: String,
}

/// Body of `POST /api/usuarios/login`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LoginCredentials {
    pub email: String,
    pub password: String,
}

impl LoginCredentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        LoginCredentials {
            email: email.into(),
            password: password.into(),
        }
    }
}

/// Response of login, registration and token refresh.
///
/// Failed calls come back with `success: false`, a `mensaje` and most other
/// fields null.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AuthResponse {
    #[serde(default)]
    pub token: Option<String>,

    #[serde(rename = "idUsuario", default)]
    pub user_id: Option<i64>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub email: String,

    #[serde(rename = "nombreCompleto", default, deserialize_with = "null_as_default")]
    pub full_name: String,

    #[serde(rename = "documento", default, deserialize_with = "null_as_default")]
    pub document: String,

    #[serde(rename = "mensaje", default, deserialize_with = "null_as_default")]
    pub message: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub success: bool,
}

impl AuthResponse {
    /// The user part of the response, if the backend identified one.
    pub fn user_data(&self) -> Option<UserData> {
        self.user_id.map(|user_id| UserData {
            user_id,
            email: self.email.clone(),
            full_name: self.full_name.clone(),
            document: self.document.clone(),
        })
    }
}

/// The signed-in user, as kept in the session and returned by
/// `POST /verificar-token`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct UserData {
    #[serde(rename = "idUsuario")]
    pub user_id: i64,

    #[serde(default, deserialize_with = "null_as_default")]
    pub email: String,

    #[serde(rename = "nombreCompleto", default, deserialize_with = "null_as_default")]
    pub full_name: String,

    #[serde(rename = "documento", default, deserialize_with = "null_as_default")]
    pub document: String,
}

/// Response of `GET /api/usuarios/verificar-email/{email}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct EmailAvailability {
    #[serde(rename = "disponible")]
    pub available: bool,
}

// =============================================================================
// Unit Tests
// =============================================================================
