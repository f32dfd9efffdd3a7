//! Backend Binary
//!
//! `backend serve` runs the API on BIND_ADDR (e.g. 0.0.0.0:8080).
//! `backend migrate up|down` applies or removes the schema on DB_URL.
use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Serve the HTTP API
    Serve(rsvp_server::Config),
    /// Create or drop database tables
    Migrate {
        #[arg(value_enum)]
        direction: Direction,
        #[arg(long, env = "DB_URL")]
        db_url: String,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Direction {
    Up,
    Down,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    rsvp_core::log()?;
    match Cli::parse().command {
        Command::Serve(config) => rsvp_server::run(config).await,
        Command::Migrate { direction, db_url } => {
            let client = rsvp_pg::db(&db_url).await?;
            match direction {
                Direction::Up => rsvp_server::migrate::up(&client).await?,
                Direction::Down => rsvp_server::migrate::down(&client).await?,
            }
            log::info!("migration complete");
            Ok(())
        }
    }
}
