//! Account commands.

use boleta_core::auth::{LoginCredentials, RegistrationRequest, UserData};
use tracing::debug;

use crate::cli::{LoginArgs, RegisterArgs};
use crate::state::AppState;

pub async fn register(state: &AppState, args: RegisterArgs) -> anyhow::Result<()> {
    debug!(email = %args.email, "register command");

    if !state.auth.is_email_available(&args.email).await? {
        anyhow::bail!("{} is already registered", args.email.trim());
    }

    let request = RegistrationRequest {
        email: args.email.trim().to_string(),
        password: args.password,
        names: args.names.trim().to_string(),
        surnames: args.surnames.trim().to_string(),
        document_number: args.document.trim().to_string(),
    };
    let response = state.auth.register(&request).await?;

    println!("Registered and signed in as {}", response.full_name);
    Ok(())
}

pub async fn login(state: &AppState, args: LoginArgs) -> anyhow::Result<()> {
    debug!(email = %args.email, "login command");

    let credentials = LoginCredentials::new(args.email.trim(), args.password);
    let response = state.auth.login(&credentials).await?;

    println!("Welcome, {}", response.full_name);
    Ok(())
}

pub async fn logout(state: &AppState) -> anyhow::Result<()> {
    state.auth.logout().await?;
    println!("Signed out");
    Ok(())
}

pub async fn whoami(state: &AppState) -> anyhow::Result<()> {
    if !state.auth.verify_on_startup().await? {
        println!("Not logged in");
        return Ok(());
    }

    match state.session.current_user().await {
        Some(user) => println!("{}", describe_user(&user)),
        None => println!("Logged in"),
    }
    Ok(())
}

fn describe_user(user: &UserData) -> String {
    format!(
        "{} <{}> (document {}, id {})",
        user.full_name, user.email, user.document, user.user_id
    )
}
