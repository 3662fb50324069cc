//! Postseed CLI
//!
//! Command-line interface for seeding and inspecting the `social_media_posts`
//! collection.
//!
//! # Usage
//!
//! ```bash
//! postseed --help
//! postseed check
//! postseed seed --count 50
//! postseed metrics --post-type reel
//! ```
//!
//! Credentials come from `ASTRA_DB_APPLICATION_TOKEN` and
//! `ASTRA_DB_API_ENDPOINT`, optionally through a `.env` file in the working
//! directory.

#![deny(unsafe_code)]

mod commands;

use clap::{Parser, Subcommand};
use commands::metrics::Format;
use db::config::{API_ENDPOINT_ENV, DEFAULT_KEYSPACE, KEYSPACE_ENV, TOKEN_ENV};
use db::{DatabaseConfig, DatabaseConnection};
use shared::generator::MockDataGenerator;
use shared::models::PostType;
use tracing_subscriber::fmt::writer::BoxMakeWriter;

/// Postseed CLI - Seed and report on social media engagement data
#[derive(Parser)]
#[command(name = "postseed")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Data API application token
    #[arg(long, env = TOKEN_ENV, hide_env_values = true, default_value = "")]
    token: String,

    /// Data API endpoint URL
    #[arg(long, env = API_ENDPOINT_ENV, default_value = "")]
    api_endpoint: String,

    /// Keyspace holding the collection
    #[arg(long, env = KEYSPACE_ENV, default_value = DEFAULT_KEYSPACE)]
    keyspace: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Insert generated posts and print the resulting metrics
    Seed {
        /// Number of posts to generate
        #[arg(short, long, default_value_t = commands::seed::DEFAULT_POST_COUNT)]
        count: usize,

        /// Seed for reproducible content
        #[arg(long)]
        rng_seed: Option<u64>,
    },
    /// Check connectivity by inserting a test post and reading metrics back
    Check,
    /// Print engagement metrics
    Metrics {
        /// Only report this post type (carousel, reel or static)
        #[arg(short, long)]
        post_type: Option<PostType>,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

impl Cli {
    fn database_config(&self) -> DatabaseConfig {
        DatabaseConfig::new(&self.token, &self.api_endpoint).with_keyspace(&self.keyspace)
    }

    /// JSON output owns stdout, so logs move to stderr for it.
    fn logs_to_stderr(&self) -> bool {
        matches!(self.command, Some(Commands::Metrics { json: true, .. }))
    }

    fn log_writer(&self) -> BoxMakeWriter {
        if self.logs_to_stderr() {
            BoxMakeWriter::new(std::io::stderr)
        } else {
            BoxMakeWriter::new(std::io::stdout)
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine; real environment variables still apply.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(cli.log_writer())
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let Some(command) = cli.command.as_ref() else {
        println!("Postseed CLI v{}", env!("CARGO_PKG_VERSION"));
        println!("Use --help for usage information");
        return Ok(());
    };

    let conn = DatabaseConnection::connect(&cli.database_config())?;
    let mut out = std::io::stdout();

    match command {
        Commands::Seed { count, rng_seed } => {
            let mut generator =
                rng_seed.map_or_else(MockDataGenerator::new, MockDataGenerator::with_seed);
            commands::seed::run(&conn, &mut generator, *count, &mut out).await?;
        }
        Commands::Check => {
            commands::check::run(&conn, commands::check::INDEX_DELAY, &mut out).await?;
        }
        Commands::Metrics { post_type, json } => {
            let format = if *json { Format::Json } else { Format::Text };
            commands::metrics::run(&conn, *post_type, format, &mut out).await?;
        }
    }

    Ok(())
}
