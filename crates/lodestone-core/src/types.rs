use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The publication an article came from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleSource {
    pub id: Option<String>,
    pub name: Option<String>,
}

/// A single news article from the corpus.
///
/// Every field is optional: the corpus format allows any of them to be
/// absent, and absence is meaningful (the field was not supplied by the
/// upstream feed). Articles are immutable once loaded.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub source: Option<ArticleSource>,
    pub author: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub content: Option<String>,
    pub url: Option<String>,
    pub url_to_image: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
}

impl Article {
    /// The text an article is embedded under: title, then description, then
    /// content, concatenated with no separator. Absent fields contribute
    /// nothing.
    ///
    /// The missing delimiter means two articles whose fields differ only by
    /// where a word boundary falls can produce identical text. That is the
    /// established corpus behavior, kept as-is.
    pub fn embedding_text(&self) -> String {
        let mut text = String::new();
        if let Some(ref title) = self.title {
            text.push_str(title);
        }
        if let Some(ref description) = self.description {
            text.push_str(description);
        }
        if let Some(ref content) = self.content {
            text.push_str(content);
        }
        text
    }
}
