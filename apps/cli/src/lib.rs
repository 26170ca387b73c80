//! # Boleta CLI
//!
//! Terminal front end for issuing and browsing boletas.
//!
//! ## Module Organization
//! ```text
//! boleta_cli/
//! ├── lib.rs          ◄─── You are here (logging & dispatch)
//! ├── cli.rs          ◄─── clap argument definitions
//! ├── cart_file.rs    ◄─── JSON cart files fed to `totals` / `create`
//! ├── state.rs        ◄─── AppState: config, session, API clients
//! └── commands/
//!     ├── auth.rs     ◄─── register, login, logout, whoami
//!     ├── config.rs   ◄─── init-config
//!     ├── identity.rs ◄─── dni
//!     └── receipt.rs  ◄─── totals, create, list, show
//! ```
//!
//! ## Startup Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. Parse arguments (clap)                                              │
//! │  2. Initialize tracing (stderr, RUST_LOG)                               │
//! │  3. Load config: defaults → TOML file → BOLETA_* env                    │
//! │  4. Open session file, build AuthApi / ReceiptApi / IdentityApi         │
//! │  5. Run the command; errors become a one-line message + exit code 1     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod cart_file;
pub mod cli;
pub mod commands;
pub mod state;

use boleta_client::ClientError;
use boleta_core::CoreError;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Command};
use state::AppState;

/// Initializes the tracing subscriber for structured logging.
///
/// Logs go to stderr so command output on stdout stays clean.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages from every crate
/// - `RUST_LOG=boleta=trace` - Show trace for boleta crates only
/// - Default: `info,boleta=debug`
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,boleta=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Builds the application state and runs one command.
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    // Has to work before a valid config exists
    if let Command::InitConfig { force } = cli.command {
        return commands::config::init(cli.config, force);
    }

    let state = AppState::init(cli.config.clone()).await?;
    debug!(command = ?cli.command, "Dispatching");

    match cli.command {
        Command::Register(args) => commands::auth::register(&state, args).await,
        Command::Login(args) => commands::auth::login(&state, args).await,
        Command::Logout => commands::auth::logout(&state).await,
        Command::Whoami => commands::auth::whoami(&state).await,
        Command::Dni { dni } => commands::identity::dni(&state, &dni).await,
        Command::Totals { cart, json } => commands::receipt::totals(&state, &cart, json).await,
        Command::Create { cart, lookup } => {
            commands::receipt::create(&state, &cart, lookup).await
        }
        Command::List { newest } => commands::receipt::list(&state, newest).await,
        Command::Show { id } => commands::receipt::show(&state, id).await,
        Command::InitConfig { force } => commands::config::init(cli.config, force),
    }
}

/// The line printed for a failed command.
///
/// Backend errors use the friendly per-status text, plus a hint when the
/// fix is to log in or to edit the config; everything else prints its
/// context chain.
pub fn user_message(err: &anyhow::Error) -> String {
    if let Some(client) = err.downcast_ref::<ClientError>() {
        let message = client.user_message();
        if client.requires_login() {
            return format!("{} (run `boleta login`)", message);
        }
        if client.is_config_error() {
            return format!("{} (check --config or the BOLETA_* variables)", message);
        }
        return message;
    }
    if let Some(core) = err.downcast_ref::<CoreError>() {
        return core.to_string();
    }
    format!("{:#}", err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn test_user_message_for_client_errors() {
        let err = anyhow::Error::new(ClientError::NoSession);
        assert_eq!(
            user_message(&err),
            format!("{} (run `boleta login`)", ClientError::NoSession.user_message())
        );

        let err = anyhow::Error::new(ClientError::InvalidUrl("ftp://x".into()))
            .context("loading configuration");
        assert!(user_message(&err).ends_with("(check --config or the BOLETA_* variables)"));

        let err = anyhow::Error::new(ClientError::Rejected("Stock insuficiente".into()));
        assert_eq!(user_message(&err), "Stock insuficiente");
    }

    #[test]
    fn test_user_message_for_core_errors() {
        let err = anyhow::Error::new(CoreError::EmptyCart);
        assert_eq!(user_message(&err), "Add at least one product");
    }

    #[test]
    fn test_user_message_keeps_context_chain() {
        let err = Err::<(), _>(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"))
            .context("reading cart.json")
            .unwrap_err();
        assert_eq!(user_message(&err), "reading cart.json: gone");
    }
}
