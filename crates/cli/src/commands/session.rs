//! Admin session commands.
//!
//! # Usage
//!
//! ```bash
//! # Sign in; the session token is kept in $GALLERY_STATE_DIR/session.json.
//! # Passwords not given as flags are read from stdin, one per line.
//! pg-admin session login -e owner@example.com
//! printf '%s\n' "$PASSWORD" | pg-admin session login -e owner@example.com
//!
//! # Who is signed in?
//! pg-admin session status
//!
//! # Forgotten password
//! pg-admin session request-reset -e owner@example.com
//! pg-admin session reset-password -t <token>
//! ```

use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

use super::{CliError, Context};
use crate::output::identity_line;

/// Reads passwords the admin did not pass as flags, one line each.
struct Prompt {
    lines: Lines<BufReader<Stdin>>,
}

impl Prompt {
    fn new() -> Self {
        Self {
            lines: BufReader::new(tokio::io::stdin()).lines(),
        }
    }

    /// `given`, or the next line of stdin after showing `label`.
    async fn secret(&mut self, label: &str, given: Option<String>) -> Result<String, CliError> {
        if let Some(value) = given {
            return Ok(value);
        }
        eprint!("{label}: ");
        let line = self.lines.next_line().await.map_err(CliError::Input)?;
        Ok(line.unwrap_or_default())
    }
}

/// Restore the stored session and report it.
pub async fn status(ctx: &Context) {
    let mut gate = ctx.gate();
    gate.verify().await;
    match gate.identity() {
        Some(identity) => println!("Signed in as {}", identity_line(identity)),
        None => println!("Not signed in."),
    }
}

/// Sign in and store the session token.
///
/// # Errors
///
/// Returns an error for malformed input or rejected credentials.
pub async fn login(ctx: &Context, email: &str, password: Option<String>) -> Result<(), CliError> {
    let password = Prompt::new().secret("Password", password).await?;
    let mut gate = ctx.gate();
    let identity = gate.login(email, &password).await?;
    println!("Signed in as {}", identity_line(&identity));
    Ok(())
}

/// Sign out and forget the stored token.
pub async fn logout(ctx: &Context) {
    let mut gate = ctx.gate();
    gate.logout().await;
    println!("Signed out.");
}

/// Create an admin account. The new admin signs in separately.
///
/// # Errors
///
/// Returns an error for invalid input or if the backend rejects the account.
pub async fn register(
    ctx: &Context,
    name: &str,
    email: &str,
    password: Option<String>,
    confirm: Option<String>,
) -> Result<(), CliError> {
    let mut prompt = Prompt::new();
    let password = prompt.secret("Password", password).await?;
    let confirm = prompt.secret("Confirm password", confirm).await?;
    let identity = ctx.gate().register(name, email, &password, &confirm).await?;
    println!("Account created for {}.", identity_line(&identity));
    println!("Run `pg-admin session login` to sign in.");
    Ok(())
}

/// Ask the backend to email a password reset link.
///
/// # Errors
///
/// Returns an error for a malformed email or a backend failure.
pub async fn request_reset(ctx: &Context, email: &str) -> Result<(), CliError> {
    let request = ctx.gate().request_password_reset(email).await?;
    println!("If an account exists for {email}, a reset email is on its way.");
    if let Some(token) = request.reset_token {
        // Backends without outbound email hand the token back directly.
        println!("Reset token: {token}");
    }
    Ok(())
}

/// Set a new password with a reset token.
///
/// # Errors
///
/// Returns an error for invalid input or a rejected token.
pub async fn reset_password(
    ctx: &Context,
    token: &str,
    new_password: Option<String>,
) -> Result<(), CliError> {
    let new_password = Prompt::new().secret("New password", new_password).await?;
    ctx.gate().reset_password(token, &new_password).await?;
    println!("Password updated. Sign in with your new password.");
    Ok(())
}
