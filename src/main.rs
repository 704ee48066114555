use api_client::FacilityClient;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

mod loader;

/// The main entry point for the Clean Investment Monitor service.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load anything in a .env file; real environment variables take precedence.
    dotenvy::dotenv().ok();

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // Parse command-line arguments
    let cli = Cli::parse();

    // Execute the appropriate command
    match cli.command {
        Commands::Serve => {
            let settings = configuration::load_settings()?;
            web_server::run_server(&settings).await?;
        }
        Commands::Load(args) => handle_load(args).await?,
    }

    Ok(())
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Publishes US clean-investment facility data over a small REST API.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API. Reads DATABASE_URL, HOST and PORT from the environment.
    Serve,
    /// Bulk-load facilities from an MEI facilities CSV export through the API.
    Load(LoadArgs),
}

#[derive(Parser)]
struct LoadArgs {
    /// Path to the facilities CSV export.
    #[arg(long)]
    csv: PathBuf,

    /// Base URL of a running facility API.
    #[arg(long, default_value = "http://localhost:8080")]
    server_url: String,

    /// Number of preamble lines above the CSV header row.
    #[arg(long, default_value_t = loader::DEFAULT_SKIP_ROWS)]
    skip_rows: usize,
}

// ==============================================================================
// Load Command Logic
// ==============================================================================

async fn handle_load(args: LoadArgs) -> anyhow::Result<()> {
    tracing::info!(
        "Loading facilities from {} into {}",
        args.csv.display(),
        args.server_url
    );

    let user_agent = concat!("cim-loader/", env!("CARGO_PKG_VERSION"));
    let client = FacilityClient::new(&args.server_url, user_agent)?;
    loader::run(&client, &args.csv, args.skip_rows).await?;

    Ok(())
}
