//! One-shot corpus ingestion: read `faqs.json`, embed every question
//! with the query-time embedding path, and upsert into Qdrant.
//!
//! Uses the same `PipelineConfig` as the server so the collection name
//! and embedding model cannot drift between ingestion and query.

use anyhow::Context;
use tracing::info;
use tracing_subscriber::EnvFilter;

use answerer::PipelineConfig;
use embedder::FeatureExtractionClient;
use faq_store::{FaqEntry, FaqStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let cfg = PipelineConfig::from_env();
    let path = std::env::var("FAQ_FILE").unwrap_or_else(|_| "faqs.json".into());

    let raw = std::fs::read_to_string(&path).with_context(|| format!("reading {path}"))?;
    let entries: Vec<FaqEntry> =
        serde_json::from_str(&raw).with_context(|| format!("parsing {path}"))?;
    info!("loaded {} FAQs from {path}", entries.len());

    let provider = FeatureExtractionClient::new(cfg.embedding_config())?;
    let store = FaqStore::new(cfg.store_config())?;

    let count = store.ingest(&entries, &provider, cfg.embedding_dim).await?;
    info!(
        "ingested {count} FAQ entries into collection '{}'",
        cfg.qdrant_collection
    );

    Ok(())
}
