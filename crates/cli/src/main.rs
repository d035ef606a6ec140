//! `stagebook` CLI entry-point.
//!
//! Available sub-commands:
//! - `serve`   — run migrations, then start the HTTP server.
//! - `migrate` — run pending database migrations.
//! - `seed`    — load venues, artists and shows from a JSON fixture.
//!
//! Log verbosity follows `RUST_LOG` (default `info`).

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "stagebook",
    about = "Venue, artist and show booking directory",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Args)]
struct DatabaseArgs {
    /// SQLite connection string; the file is created if missing.
    #[arg(long, env = "DATABASE_URL", default_value = "sqlite://stagebook.db")]
    database_url: String,

    /// Upper bound on pooled connections.
    #[arg(long, env = "DATABASE_MAX_CONNECTIONS", default_value_t = 5)]
    max_connections: u32,
}

#[derive(Subcommand)]
enum Command {
    /// Start the HTTP server.
    Serve {
        #[arg(long, env = "STAGEBOOK_BIND", default_value = "0.0.0.0:5000")]
        bind: String,
        #[command(flatten)]
        db: DatabaseArgs,
    },
    /// Run pending database migrations.
    Migrate {
        #[command(flatten)]
        db: DatabaseArgs,
    },
    /// Load a JSON fixture of venues, artists and shows.
    Seed {
        /// Path to the fixture file.
        path: std::path::PathBuf,
        #[command(flatten)]
        db: DatabaseArgs,
    },
}

async fn connect(args: &DatabaseArgs) -> anyhow::Result<db::DbPool> {
    let pool = db::pool::create_pool(&args.database_url, args.max_connections)
        .await
        .with_context(|| format!("failed to connect to {}", args.database_url))?;
    db::pool::run_migrations(&pool)
        .await
        .context("migration failed")?;
    Ok(pool)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Serve { bind, db } => {
            let pool = connect(&db).await?;
            info!("Starting HTTP server on {bind}");
            api::serve(&bind, pool).await.context("server error")?;
        }
        Command::Migrate { db } => {
            info!("Running migrations against {}", db.database_url);
            connect(&db).await?;
            info!("Migrations applied successfully");
        }
        Command::Seed { path, db } => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("cannot read file {}", path.display()))?;
            let fixture = directory::seed::SeedFile::from_json(&content)?;

            let pool = connect(&db).await?;
            let report = directory::seed::load(&pool, &fixture, chrono::Utc::now()).await?;
            println!(
                "Seeded {} venues, {} artists and {} shows.",
                report.venues, report.artists, report.shows
            );
        }
    }

    Ok(())
}
