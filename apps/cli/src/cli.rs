//! Command-line arguments.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "boleta", version, about = "Issue and browse electronic sales receipts")]
pub struct Cli {
    /// Config file (defaults to the platform config directory).
    #[arg(long, global = true, env = "BOLETA_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create an account and sign in.
    Register(RegisterArgs),

    /// Sign in with email and password.
    Login(LoginArgs),

    /// Forget the stored session.
    Logout,

    /// Show the signed-in user (verifies the stored token).
    Whoami,

    /// Look up the holder of a DNI.
    Dni {
        /// Eight-digit DNI.
        dni: String,
    },

    /// Compute the totals of a cart file without submitting it.
    Totals {
        /// Cart file: `{ "customer": {...}, "items": [...] }`.
        cart: PathBuf,

        /// Print the breakdown as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Submit a cart file as a new boleta.
    Create {
        cart: PathBuf,

        /// Fill the customer's names from the DNI service when the cart
        /// file leaves them blank.
        #[arg(long)]
        lookup: bool,
    },

    /// List your boletas.
    List {
        /// Newest first.
        #[arg(long)]
        newest: bool,
    },

    /// Show one boleta with its lines.
    Show {
        id: i64,
    },

    /// Write the effective configuration (defaults plus BOLETA_* overrides)
    /// to the config file.
    InitConfig {
        /// Overwrite an existing file.
        #[arg(long)]
        force: bool,
    },
}

#[derive(Debug, Args)]
pub struct LoginArgs {
    #[arg(long)]
    pub email: String,

    #[arg(long, env = "BOLETA_PASSWORD", hide_env_values = true)]
    pub password: String,
}

#[derive(Debug, Args)]
pub struct RegisterArgs {
    #[arg(long)]
    pub email: String,

    #[arg(long, env = "BOLETA_PASSWORD", hide_env_values = true)]
    pub password: String,

    #[arg(long)]
    pub names: String,

    #[arg(long)]
    pub surnames: String,

    /// Identity document number (8 to 20 digits).
    #[arg(long)]
    pub document: String,
}
