//! Karia Mitra CLI
//!
//! Browse, search and contact construction professionals, shops and
//! equipment listed on the Karia Mitra marketplace.

use clap::{Parser, Subcommand, ValueEnum};
use karia_cli::output::Status;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

mod commands;
mod context;

use commands::{browse, contact, link, resources, search, storage, update, whoami};
use context::AppContext;

/// Find and contact construction professionals on Karia Mitra
#[derive(Parser)]
#[command(name = "karia-mitra")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Configuration file (defaults to .karia-mitra.toml and friends)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text
    Text,
    /// JSON on stdout
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// List the resources this deployment actually has
    Resources,

    /// List records of one category
    Browse {
        /// Resource name (see `resources`)
        resource: String,
    },

    /// Search every available resource
    Search {
        /// Search text; misspellings of common trades are tolerated
        query: String,

        /// Query strategy
        #[arg(long, value_enum)]
        strategy: Option<search::StrategyArg>,

        /// Result ordering
        #[arg(long, value_enum)]
        order: Option<search::OrderArg>,
    },

    /// Get a contact link for one record
    Contact {
        /// Resource name
        resource: String,

        /// Record id
        id: String,

        /// Force a channel instead of the default choice
        #[arg(long, value_enum)]
        via: Option<contact::ViaArg>,
    },

    /// Build a deep link without touching the store
    Link {
        #[command(subcommand)]
        target: LinkTarget,
    },

    /// Check for a newer app release
    UpdateCheck {
        /// Installed version code (defaults to app.version_code)
        #[arg(long)]
        installed: Option<u32>,
    },

    /// Object storage
    Storage {
        #[command(subcommand)]
        action: StorageAction,
    },

    /// Show the signed-in user
    Whoami {
        /// Access token of an existing session
        #[arg(long, env = "KARIA_ACCESS_TOKEN", hide_env_values = true)]
        token: Option<String>,

        /// Sign in with this email instead (password from KARIA_PASSWORD)
        #[arg(long, conflicts_with = "token")]
        email: Option<String>,

        /// Password for --email
        #[arg(long, env = "KARIA_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },
}

#[derive(Subcommand)]
enum LinkTarget {
    /// Dial intent (support number when none is given)
    Call {
        /// Number to dial
        number: Option<String>,
    },

    /// WhatsApp chat with a prefilled message (mediator when no number is given)
    Whatsapp {
        /// Message text
        message: String,

        /// Recipient number
        #[arg(long)]
        number: Option<String>,
    },

    /// Support contact links
    Support,
}

#[derive(Subcommand)]
enum StorageAction {
    /// List objects in a bucket
    List {
        /// Bucket name
        bucket: String,

        /// Folder prefix
        #[arg(default_value = "")]
        prefix: String,

        /// Maximum entries
        #[arg(short, long, default_value = "100")]
        limit: usize,
    },

    /// Public URL of an object
    Url {
        /// Bucket name
        bucket: String,

        /// Object path or absolute URL
        path: String,
    },
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "warn,karia=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(verbose)
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let format = cli.format;
    let result = run(cli).await;

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let core = e.downcast_ref::<karia_core::Error>();
            if format == OutputFormat::Json {
                let report = core.map_or_else(
                    || serde_json::json!({ "message": e.to_string() }),
                    |err| serde_json::json!(err.to_report()),
                );
                eprintln!("{report}");
            } else {
                Status::error(&format!("{e:#}"));
            }
            let code = core.map_or(karia_core::error::exit_codes::FAILURE, karia_core::Error::exit_code);
            ExitCode::from(u8::try_from(code).unwrap_or(1))
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let format = cli.format;

    // blank searches never touch configuration or the store
    if let Commands::Search { ref query, .. } = cli.command {
        if query.trim().is_empty() {
            return search::print_results(&[], format);
        }
    }

    let ctx = AppContext::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Resources => resources::run(&ctx, format).await,
        Commands::Browse { resource } => browse::run(&ctx, &resource, format).await,
        Commands::Search {
            query,
            strategy,
            order,
        } => search::run(&ctx, &query, strategy, order, format).await,
        Commands::Contact { resource, id, via } => {
            contact::run(&ctx, &resource, &id, via, format).await
        }
        Commands::Link { target } => match target {
            LinkTarget::Call { number } => link::call(&ctx, number.as_deref(), format),
            LinkTarget::Whatsapp { message, number } => {
                link::whatsapp(&ctx, &message, number.as_deref(), format)
            }
            LinkTarget::Support => link::support(&ctx, format),
        },
        Commands::UpdateCheck { installed } => update::run(&ctx, installed, format).await,
        Commands::Storage { action } => match action {
            StorageAction::List {
                bucket,
                prefix,
                limit,
            } => storage::list(&ctx, &bucket, &prefix, limit, format).await,
            StorageAction::Url { bucket, path } => storage::url(&ctx, &bucket, &path, format),
        },
        Commands::Whoami {
            token,
            email,
            password,
        } => whoami::run(&ctx, token, email, password, format).await,
    }
}
