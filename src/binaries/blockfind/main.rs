use clap::Parser;
use serde::Deserialize;
use serde::Serialize;

use blockfind_locator::accessor::ObjectStoreMetaSource;
use blockfind_locator::listing::{BlockListing, ObjectStoreListing};
use blockfind_locator::locate::locate;
use blockfind_storage::{StorageOperator, StorageScheme};
use blockfind_utils::time::{time_format, unix_milli_to_time};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Parser)]
#[clap(about, version, author)]
struct Config {
    /// Storage backend: fs, gcs or memory.
    #[clap(long, default_value = "fs")]
    pub scheme: StorageScheme,

    /// Base directory (fs) or bucket name (gcs) holding the blocks.
    #[clap(long)]
    pub root: String,

    /// Prefix under the root to search, e.g. a tenant id.
    #[clap(long, default_value = "")]
    pub prefix: String,

    /// Target timestamp in epoch milliseconds.
    #[clap(long)]
    pub target: i64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::builder()
                .with_default_directive("info".parse()?)
                .from_env_lossy(),
        )
        .init();

    let config = Config::parse();

    let op = StorageOperator::open(config.scheme, config.root.as_str())?;
    let listing = ObjectStoreListing::new(op.clone(), config.prefix.as_str());

    let blocks = listing.list_blocks().await?;
    println!("{} blocks under {}/{}", blocks.len(), config.root, config.prefix);

    let source = ObjectStoreMetaSource::new(op);
    let outcome = locate(&source, &blocks, config.target).await?;

    println!(
        "target {} ({})",
        config.target,
        time_format(unix_milli_to_time(config.target))
    );
    for probe in &outcome.probes {
        println!("probe {:>6} {}", probe.index, probe.range);
    }

    if outcome.hits.is_empty() {
        println!(
            "no block covers the target ({} fetches)",
            outcome.fetch_count()
        );
    } else {
        for hit in &outcome.hits {
            println!("{}", hit);
        }
        println!(
            "{} hit(s), {} fetches",
            outcome.hits.len(),
            outcome.fetch_count()
        );
    }

    Ok(())
}
