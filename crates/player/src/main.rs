//! NFTDB Player - demo CLI for the record API.

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use nftdb_player::demo::{
    Demo, DEFAULT_BATCH_IDS, DEFAULT_CREATE_COUNT, DEFAULT_FETCH_ID, DEFAULT_RESET_IDS,
};
use nftdb_player::{NftClient, NftSlots, DEFAULT_BASE_URL};

/// NFTDB demo client
#[derive(Parser, Debug)]
#[command(name = "nftdb-player")]
#[command(about = "Exercise the NFT record API")]
#[command(version)]
struct Cli {
    /// Base URL of the record routes
    #[arg(long, env = "NFT_API_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Number of local slots (ids 0..N) fetched records are saved into
    #[arg(long, default_value_t = 10)]
    slots: i32,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch a single record
    Get {
        #[arg(default_value_t = DEFAULT_FETCH_ID)]
        id: i32,
    },
    /// Fetch several records in one request
    Batch {
        #[arg(value_delimiter = ',')]
        ids: Vec<i32>,
    },
    /// Fetch every record
    All,
    /// Create dummy records with ids starting at 0
    Create {
        #[arg(default_value_t = DEFAULT_CREATE_COUNT)]
        count: usize,
    },
    /// Update records 3 and 8 with dummy stats
    Update,
    /// Reset the stats of the given records
    Reset {
        #[arg(value_delimiter = ',')]
        ids: Vec<i32>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "nftdb_player=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    tracing::info!(base_url = %cli.base_url, "Starting NFTDB Player");

    let mut demo = Demo::new(NftClient::new(&cli.base_url), NftSlots::with_ids(0..cli.slots));

    match cli.command {
        Command::Get { id } => {
            demo.get_single(id).await?;
        }
        Command::Batch { ids } => {
            let ids = if ids.is_empty() { DEFAULT_BATCH_IDS.to_vec() } else { ids };
            demo.get_multiple(&ids).await?;
        }
        Command::All => {
            demo.get_all().await?;
        }
        Command::Create { count } => demo.create(count).await?,
        Command::Update => demo.update().await?,
        Command::Reset { ids } => {
            let ids = if ids.is_empty() { DEFAULT_RESET_IDS.to_vec() } else { ids };
            demo.reset(&ids).await?;
        }
    }

    for slot in demo.slots().iter().filter(|slot| slot.chp != 0) {
        tracing::debug!(id = slot.id, chp = slot.chp, nft_type = %slot.nft_type, "Slot");
    }

    Ok(())
}
