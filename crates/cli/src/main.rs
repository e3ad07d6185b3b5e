//! Pencil Gallery CLI - admin session and artwork management.
//!
//! # Usage
//!
//! ```bash
//! # Sign in (the session token is kept in GALLERY_STATE_DIR)
//! pg-admin session login -e admin@example.com
//! pg-admin session status
//!
//! # Manage the catalog
//! pg-admin artworks list --category portraits --sort newest
//! pg-admin artworks create --title "Maasai Elder" --price 800 \
//!     --category portraits --image-file ./elder.png
//! pg-admin artworks toggle-featured <id>
//!
//! # Past commissions
//! pg-admin commissions list
//! ```
//!
//! # Commands
//!
//! - `session` - Sign in, sign out, register, reset passwords
//! - `artworks` - Browse and manage artworks
//! - `commissions` - Browse past commissions

#![cfg_attr(not(test), forbid(unsafe_code))]
#![allow(clippy::print_stdout, clippy::print_stderr)]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use pencil_gallery_core::{ArtworkId, ArtworkStatus, CategoryFilter, SortMode};
use tracing_subscriber::EnvFilter;

mod commands;
mod output;

use commands::Context;
use commands::artworks::ArtworkArgs;

#[derive(Parser)]
#[command(name = "pg-admin")]
#[command(version, about = "Pencil Gallery admin tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage the admin session
    Session {
        #[command(subcommand)]
        action: SessionAction,
    },
    /// Browse and manage artworks
    Artworks {
        #[command(subcommand)]
        action: ArtworkAction,
    },
    /// Browse past commissions
    Commissions {
        #[command(subcommand)]
        action: CommissionAction,
    },
}

#[derive(Subcommand)]
enum SessionAction {
    /// Show who is signed in
    Status,
    /// Sign in and store the session token
    Login {
        #[arg(short, long)]
        email: String,

        /// Read from stdin when omitted
        #[arg(short, long)]
        password: Option<String>,
    },
    /// Sign out and forget the stored token
    Logout,
    /// Create an admin account
    Register {
        #[arg(short, long)]
        name: String,

        #[arg(short, long)]
        email: String,

        /// Read from stdin when omitted
        #[arg(short, long)]
        password: Option<String>,

        /// Password again; read from stdin when omitted
        #[arg(short, long)]
        confirm: Option<String>,
    },
    /// Request a password reset link
    RequestReset {
        #[arg(short, long)]
        email: String,
    },
    /// Set a new password with a reset token
    ResetPassword {
        #[arg(short, long)]
        token: String,

        /// Read from stdin when omitted
        #[arg(short, long)]
        password: Option<String>,
    },
}

#[derive(Subcommand)]
enum ArtworkAction {
    /// List artworks
    List {
        /// All, landscapes, abstract, portraits or wildlife
        #[arg(short, long, default_value = "All")]
        category: CategoryFilter,

        /// display_order, price_asc, price_desc or newest
        #[arg(short, long, default_value = "display_order")]
        sort: SortMode,
    },
    /// List featured artworks
    Featured,
    /// Show catalog counters
    Stats,
    /// Create an artwork
    Create {
        #[command(flatten)]
        fields: ArtworkArgs,
    },
    /// Edit an artwork
    Update {
        id: ArtworkId,

        #[command(flatten)]
        fields: ArtworkArgs,
    },
    /// Delete an artwork
    Delete { id: ArtworkId },
    /// Flip the featured flag
    ToggleFeatured { id: ArtworkId },
    /// Toggle between sold and available
    ToggleSold { id: ArtworkId },
    /// Set the sale status
    Status { id: ArtworkId, status: ArtworkStatus },
    /// Upload an image and print its URL
    Upload { file: PathBuf },
}

#[derive(Subcommand)]
enum CommissionAction {
    /// List past commissions, newest first
    List,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let ctx = Context::from_env()?;
    match cli.command {
        Commands::Session { action } => match action {
            SessionAction::Status => commands::session::status(&ctx).await,
            SessionAction::Login { email, password } => {
                commands::session::login(&ctx, &email, password).await?;
            }
            SessionAction::Logout => commands::session::logout(&ctx).await,
            SessionAction::Register {
                name,
                email,
                password,
                confirm,
            } => commands::session::register(&ctx, &name, &email, password, confirm).await?,
            SessionAction::RequestReset { email } => {
                commands::session::request_reset(&ctx, &email).await?;
            }
            SessionAction::ResetPassword { token, password } => {
                commands::session::reset_password(&ctx, &token, password).await?;
            }
        },
        Commands::Artworks { action } => match action {
            ArtworkAction::List { category, sort } => {
                commands::artworks::list(&ctx, category, sort).await;
            }
            ArtworkAction::Featured => commands::artworks::featured(&ctx).await,
            ArtworkAction::Stats => commands::artworks::stats(&ctx).await?,
            ArtworkAction::Create { fields } => commands::artworks::create(&ctx, fields).await?,
            ArtworkAction::Update { id, fields } => {
                commands::artworks::update(&ctx, id, fields).await?;
            }
            ArtworkAction::Delete { id } => commands::artworks::delete(&ctx, id).await?,
            ArtworkAction::ToggleFeatured { id } => {
                commands::artworks::toggle_featured(&ctx, id).await?;
            }
            ArtworkAction::ToggleSold { id } => commands::artworks::toggle_sold(&ctx, id).await?,
            ArtworkAction::Status { id, status } => {
                commands::artworks::set_status(&ctx, id, status).await?;
            }
            ArtworkAction::Upload { file } => commands::artworks::upload(&ctx, &file).await?,
        },
        Commands::Commissions { action } => match action {
            CommissionAction::List => commands::commissions::list(&ctx).await,
        },
    }
    Ok(())
}
