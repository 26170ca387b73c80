//! # Commands
//!
//! One module per area of the app.
//!
//! ```text
//! auth.rs      register, login, logout, whoami
//! config.rs    init-config
//! identity.rs  dni
//! receipt.rs   totals, create, list, show
//! ```

pub mod auth;
pub mod config;
pub mod identity;
pub mod receipt;
