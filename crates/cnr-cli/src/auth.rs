//! # Session subcommands
//!
//! `cnr login`, `cnr register`, and `cnr logout`. A successful login
//! persists the session file; logout removes it and is not an error when
//! no session exists.

use anyhow::Result;
use clap::Args;

use crate::build_controller;

/// Arguments for `cnr login`.
#[derive(Args, Debug)]
pub struct LoginArgs {
    /// Account email address.
    #[arg(long)]
    pub email: String,

    /// Account password. Falls back to the `CNR_PASSWORD` environment
    /// variable so the password can stay out of shell history.
    #[arg(long, env = "CNR_PASSWORD", hide_env_values = true)]
    pub password: String,
}

/// Arguments for `cnr register`.
#[derive(Args, Debug)]
pub struct RegisterArgs {
    /// Display name for the new account.
    #[arg(long)]
    pub name: String,

    /// Email address for the new account.
    #[arg(long)]
    pub email: String,

    /// Password for the new account.
    #[arg(long, env = "CNR_PASSWORD", hide_env_values = true)]
    pub password: String,
}

/// Execute `cnr login`.
pub async fn run_login(args: &LoginArgs) -> Result<u8> {
    let mut controller = build_controller()?;
    controller.login(&args.email, &args.password).await?;

    // login() only succeeds with a session in place.
    if let Some(session) = controller.session() {
        let user = session.user();
        println!("OK: logged in as {} <{}> ({})", user.name, user.email, user.role);
    }
    Ok(0)
}

/// Execute `cnr register`. Registration does not log the new account in.
pub async fn run_register(args: &RegisterArgs) -> Result<u8> {
    let mut controller = build_controller()?;
    controller
        .register(&args.name, &args.email, &args.password)
        .await?;
    println!("OK: registered {} — run `cnr login` to start a session", args.email);
    Ok(0)
}

/// Execute `cnr logout`.
pub async fn run_logout() -> Result<u8> {
    let mut controller = build_controller()?;
    let had_session = controller.is_authenticated();
    controller.logout()?;
    if had_session {
        println!("OK: logged out");
    } else {
        println!("OK: no active session");
    }
    Ok(0)
}
