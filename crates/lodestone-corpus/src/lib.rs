//! Corpus source: the bundled article data and its loader.
//!
//! The default corpus is compiled into the binary, so a fresh checkout
//! runs without any external files. Load failures are fatal to startup
//! and are reported as `CorpusLoad`; nothing here reaches the similarity
//! engine.

use std::path::PathBuf;

use tracing::info;

use lodestone_core::error::{LodestoneError, Result};
use lodestone_core::types::Article;

/// Bundled article data, embedded at compile time.
const BUNDLED_ARTICLES: &str = include_str!("../data/articles.json");

/// A source of ordered corpus entries.
///
/// An entry may be `null` in the underlying data (a document the upstream
/// feed dropped); it is preserved as `None` so the caller controls the
/// filtering policy.
pub trait CorpusSource {
    fn load(&self) -> Result<Vec<Option<Article>>>;
}

fn parse_articles(content: &str, origin: &str) -> Result<Vec<Option<Article>>> {
    if content.trim().is_empty() {
        return Err(LodestoneError::CorpusLoad(format!("{} is empty", origin)));
    }

    let articles: Vec<Option<Article>> = serde_json::from_str(content)
        .map_err(|e| LodestoneError::CorpusLoad(format!("{}: {}", origin, e)))?;

    if articles.is_empty() {
        return Err(LodestoneError::CorpusLoad(format!(
            "no articles found in {}",
            origin
        )));
    }

    Ok(articles)
}

/// Corpus backed by the article data compiled into the binary.
#[derive(Debug, Clone, Default)]
pub struct BundledCorpus;

impl BundledCorpus {
    pub fn new() -> Self {
        Self
    }
}

impl CorpusSource for BundledCorpus {
    fn load(&self) -> Result<Vec<Option<Article>>> {
        let articles = parse_articles(BUNDLED_ARTICLES, "bundled corpus")?;
        info!(count = articles.len(), "Bundled corpus loaded");
        Ok(articles)
    }
}

/// Corpus read from a JSON file on disk, same format as the bundled data.
#[derive(Debug, Clone)]
pub struct FileCorpus {
    path: PathBuf,
}

impl FileCorpus {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CorpusSource for FileCorpus {
    fn load(&self) -> Result<Vec<Option<Article>>> {
        let origin = self.path.display().to_string();
        let content = std::fs::read_to_string(&self.path)
            .map_err(|e| LodestoneError::CorpusLoad(format!("{}: {}", origin, e)))?;
        let articles = parse_articles(&content, &origin)?;
        info!(path = %origin, count = articles.len(), "File corpus loaded");
        Ok(articles)
    }
}
