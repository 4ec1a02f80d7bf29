use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body of a provider search response.
///
/// Hits are kept as raw JSON: the provider versions its schema on its own and
/// the search route hands them back to clients untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub q: Option<String>,

    #[serde(default)]
    pub count: Option<u64>,

    #[serde(default)]
    pub hits: Vec<Value>,
}

impl SearchResponse {
    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }
}
