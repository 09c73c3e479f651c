//! Rentdesk CLI - command-line access to the backend admin API.
//!
//! # Usage
//!
//! ```bash
//! # Pending bookings, second page
//! rd-cli bookings list --status pending --page 2
//!
//! # Accept a booking (refused locally if the move is illegal)
//! rd-cli bookings transition 42 accepted --note "Host confirmed by phone"
//!
//! # Approve a listing
//! rd-cli listings status 7 active
//!
//! # Change a setting by key
//! rd-cli settings set maintenance_mode true
//!
//! # Machine-readable output
//! rd-cli --json users show 3
//! ```
//!
//! # Environment Variables
//!
//! - `RENTDESK_API_URL` - Backend base URL
//! - `RENTDESK_API_TOKEN` - Backend admin bearer token
//! - `RENTDESK_API_TIMEOUT_SECS` - Per-request timeout (default 30)

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Args, Parser, Subcommand};

use rentdesk_admin::api::{ApiClient, LookupKind, PageParams};
use rentdesk_admin::config::ApiConfig;
use rentdesk_core::{
    BookingId, BookingStatus, DEFAULT_PER_PAGE, ListingId, ListingStatus, TransactionKind,
    TransactionStatus, UserId, UserRole, UserStatus,
};

mod commands;

use commands::CliError;

#[derive(Parser)]
#[command(name = "rd-cli")]
#[command(author, version, about = "Rentdesk admin CLI")]
struct Cli {
    /// Print JSON instead of tables
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Inspect and transition bookings
    Bookings {
        #[command(subcommand)]
        action: BookingsAction,
    },
    /// Inspect listings and change their status
    Listings {
        #[command(subcommand)]
        action: ListingsAction,
    },
    /// Inspect user accounts
    Users {
        #[command(subcommand)]
        action: UsersAction,
    },
    /// Read and change marketplace settings
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },
    /// Inspect money movements
    Transactions {
        #[command(subcommand)]
        action: TransactionsAction,
    },
    /// List features, categories or house types
    Lookups {
        #[command(subcommand)]
        action: LookupsAction,
    },
}

/// Paging flags shared by every `list` command.
#[derive(Args, Clone, Copy)]
struct Paging {
    /// Page number (1-based)
    #[arg(long, default_value_t = 1)]
    page: u32,

    /// Rows per page
    #[arg(long, default_value_t = DEFAULT_PER_PAGE)]
    per_page: u32,
}

impl Paging {
    const fn params(self) -> PageParams {
        PageParams::new(self.page, self.per_page)
    }
}

#[derive(Subcommand)]
enum BookingsAction {
    /// List bookings, newest first
    List {
        #[arg(long)]
        status: Option<BookingStatus>,
        /// Search reference, guest or listing
        #[arg(short, long)]
        q: Option<String>,
        #[command(flatten)]
        paging: Paging,
    },
    /// Show one booking and its legal next statuses
    Show { id: BookingId },
    /// Move a booking to a new status
    Transition {
        id: BookingId,
        status: BookingStatus,
        /// Note stored with the transition
        #[arg(short, long)]
        note: Option<String>,
    },
}

#[derive(Subcommand)]
enum ListingsAction {
    /// List listings
    List {
        #[arg(long)]
        status: Option<ListingStatus>,
        /// Search title or city
        #[arg(short, long)]
        q: Option<String>,
        #[command(flatten)]
        paging: Paging,
    },
    /// Show one listing
    Show { id: ListingId },
    /// Approve, deactivate, reactivate or reject a listing
    Status { id: ListingId, status: ListingStatus },
}

#[derive(Subcommand)]
enum UsersAction {
    /// List users
    List {
        #[arg(long)]
        role: Option<UserRole>,
        #[arg(long)]
        status: Option<UserStatus>,
        /// Search name or email
        #[arg(short, long)]
        q: Option<String>,
        #[command(flatten)]
        paging: Paging,
    },
    /// Show one user
    Show { id: UserId },
}

#[derive(Subcommand)]
enum SettingsAction {
    /// List every setting
    List,
    /// Set a value, converted to the setting's declared type
    Set {
        /// Setting key (or numeric id)
        key: String,
        value: String,
    },
}

#[derive(Subcommand)]
enum TransactionsAction {
    /// List transactions, newest first
    List {
        #[arg(long)]
        kind: Option<TransactionKind>,
        #[arg(long)]
        status: Option<TransactionStatus>,
        /// Search reference
        #[arg(short, long)]
        q: Option<String>,
        #[command(flatten)]
        paging: Paging,
    },
}

#[derive(Subcommand)]
enum LookupsAction {
    /// List one table (`features`, `categories` or `house-types`)
    List { kind: LookupKind },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let client = ApiClient::new(&ApiConfig::from_env()?)?;
    let json = cli.json;

    match cli.command {
        Commands::Bookings { action } => match action {
            BookingsAction::List { status, q, paging } => {
                commands::bookings::list(&client, paging.params(), status, q, json).await?;
            }
            BookingsAction::Show { id } => commands::bookings::show(&client, id, json).await?,
            BookingsAction::Transition { id, status, note } => {
                commands::bookings::transition(&client, id, status, note).await?;
            }
        },
        Commands::Listings { action } => match action {
            ListingsAction::List { status, q, paging } => {
                commands::listings::list(&client, paging.params(), status, q, json).await?;
            }
            ListingsAction::Show { id } => commands::listings::show(&client, id, json).await?,
            ListingsAction::Status { id, status } => {
                commands::listings::set_status(&client, id, status).await?;
            }
        },
        Commands::Users { action } => match action {
            UsersAction::List {
                role,
                status,
                q,
                paging,
            } => {
                commands::users::list(&client, paging.params(), role, status, q, json).await?;
            }
            UsersAction::Show { id } => commands::users::show(&client, id, json).await?,
        },
        Commands::Settings { action } => match action {
            SettingsAction::List => commands::settings::list(&client, json).await?,
            SettingsAction::Set { key, value } => {
                commands::settings::set(&client, &key, &value).await?;
            }
        },
        Commands::Transactions { action } => match action {
            TransactionsAction::List {
                kind,
                status,
                q,
                paging,
            } => {
                commands::transactions::list(&client, paging.params(), kind, status, q, json)
                    .await?;
            }
        },
        Commands::Lookups { action } => match action {
            LookupsAction::List { kind } => commands::lookups::list(&client, kind, json).await?,
        },
    }
    Ok(())
}
