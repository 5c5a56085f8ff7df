//! Fetch one page of scored commits and print it as JSON.
//!
//! Run with: COMMIT_SEARCH_SERVER=http://localhost:8080 cargo run -p sentiment --example list-commits -- [bookmark] [limit]

use eyre::Report;
use sentiment::{Bookmark, CommitSearchClient, CommitSearchConfiguration, DEFAULT_LIMIT};

#[tokio::main]
async fn main() -> eyre::Result<()> {
    tracing_subscriber::fmt::init();

    let config = CommitSearchConfiguration::from_env()?;
    let client = CommitSearchClient::from_config(&config);

    let mut args = std::env::args().skip(1);
    let bookmark = args.next().map(Bookmark::from);
    let limit = match args.next() {
        Some(limit) => limit
            .parse::<u32>()
            .map_err(|error| Report::msg(format!("Invalid limit {limit:?}: {error}")))?,
        None => DEFAULT_LIMIT,
    };

    tracing::info!(server = %config.server, ?bookmark, limit, "Fetching commits");

    let page = client.get_commits(bookmark.as_ref(), limit).await?;

    println!("{}", serde_json::to_string_pretty(&page)?);

    if let Some(next) = &page.bookmark {
        tracing::info!("Next page: {next}");
    }

    Ok(())
}
