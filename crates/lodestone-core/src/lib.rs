pub mod config;
pub mod error;
pub mod types;

pub use config::LodestoneConfig;
pub use error::{LodestoneError, Result};
pub use types::{Article, ArticleSource};
