//! Posted tweet

/// A tweet created by the status update call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tweet {
    /// Numeric tweet ID
    pub id: u64,
    /// Public URL of the tweet
    pub url: String,
}

impl Tweet {
    /// Build a tweet, composing its URL as `<web_url>/<handle>/status/<id>`
    pub fn new(id: u64, web_url: &str, handle: &str) -> Self {
        Self {
            id,
            url: format!("{}/{}/status/{}", web_url.trim_end_matches('/'), handle, id),
        }
    }
}
