//! Lodestone application binary - composition root.
//!
//! Ties the crates together into a single executable:
//! 1. Parse CLI arguments and load configuration
//! 2. Load the article corpus (bundled, or a file via --corpus)
//! 3. Embed the corpus once through the ingestion pipeline
//! 4. Answer queries from stdin until the input closes
//!
//! Startup failures (corpus load, ingestion) terminate the process with
//! the error printed. Query failures are reported and the loop continues.

mod cli;

use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};

use lodestone_core::config::LodestoneConfig;
use lodestone_corpus::{BundledCorpus, CorpusSource, FileCorpus};
use lodestone_vector::{
    IngestionPipeline, OllamaEmbedding, QuerySession, RecordStore, SearchResult,
};

use cli::CliArgs;

/// Print one formatted block per search result.
fn print_results(results: &[SearchResult]) {
    for result in results {
        println!("--------------------------------------------------------------------------");
        println!("Similarity: {:.6} | Article: {}", result.score, result.text);
        println!("--------------------------------------------------------------------------");
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliArgs::parse();

    // Config is loaded before tracing so the config file can set the level,
    // but load-time diagnostics still reach stderr through the subscriber
    // set up right after.
    let config_file = args.resolve_config_path();
    let config = LodestoneConfig::load_or_default(&config_file);

    // Tracing.
    let log_level = args.resolve_log_level(&config.general.log_level);
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .init();

    tracing::info!("Starting Lodestone v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!(path = %config_file.display(), "Configuration resolved");

    // Corpus.
    let documents = match args.corpus {
        Some(ref path) => FileCorpus::new(path).load()?,
        None => BundledCorpus::new().load()?,
    };

    // Embedder.
    let endpoint = args.resolve_endpoint(&config.embedder.endpoint);
    let model = args.resolve_model(&config.embedder.model);
    let embedder = OllamaEmbedding::with_endpoint(
        &endpoint,
        &model,
        Duration::from_secs(config.embedder.timeout_secs),
    )?;
    tracing::info!(endpoint = %endpoint, model = %model, "Embedding service configured");

    // Ingest once. Any embedding failure here is fatal: no query is served
    // against a partial store.
    let pipeline = IngestionPipeline::new(embedder.clone(), config.ingest.concurrency);
    let records = pipeline.build(documents).await?;

    let mut store = RecordStore::new();
    store.ingest(records)?;
    let store = Arc::new(store);
    tracing::info!(
        records = store.len(),
        dimensions = store.dimensions().unwrap_or(0),
        "Store ready"
    );

    let top_k = args.resolve_top_k(config.search.top_k);
    let session = QuerySession::new(Arc::clone(&store), embedder, top_k);

    // Interactive loop: one query fully resolves before the next is read.
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        println!("Enter your search query: ");
        let Some(line) = lines.next_line().await? else {
            tracing::info!("Input closed, shutting down");
            break;
        };

        match session.run(&line).await {
            Ok(results) => print_results(&results),
            Err(e) => {
                tracing::warn!(error = %e, "Query failed");
                eprintln!("Query failed: {}", e);
            }
        }
    }

    Ok(())
}
