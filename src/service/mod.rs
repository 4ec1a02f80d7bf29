// Composite workflows over the recipe store and the search provider

use crate::db::{self, DbPool};
use crate::provider::{extract_recipes, SearchClient, SearchResponse};
use crate::Result;
use serde::Serialize;
use tracing::{info, warn};

/// Outcome of importing provider results into the local store
#[derive(Debug, Clone, Default, Serialize)]
pub struct ImportReport {
    pub query: String,
    /// Ids of the recipes created, in provider order
    pub created: Vec<i64>,
    /// Names of the recipes that could not be stored
    pub failed: Vec<String>,
}

#[derive(Clone)]
pub struct RecipeService {
    pool: DbPool,
    client: SearchClient,
}

impl RecipeService {
    pub fn new(pool: DbPool, client: SearchClient) -> Self {
        Self { pool, client }
    }

    /// Query the provider without persisting anything
    pub async fn search_online(&self, query: &str) -> Result<SearchResponse> {
        self.client.search(query).await
    }

    /// Search the provider and store every hit as a local recipe.
    ///
    /// A failed search aborts before anything is written. Each hit is then
    /// stored independently; a storage fault on one does not stop the rest.
    pub async fn import_online(&self, query: &str) -> Result<ImportReport> {
        let response = self.client.search(query).await.map_err(|e| {
            warn!("No recipes imported for {:?}: {}", query, e.log_safe());
            e
        })?;

        if response.is_empty() {
            info!("Provider returned no recipes for {:?}", query);
        }

        let mut report = ImportReport {
            query: query.to_string(),
            ..ImportReport::default()
        };

        for recipe in extract_recipes(&response) {
            match db::recipes::create_recipe(&self.pool, &recipe).await {
                Ok(id) => {
                    info!("Recipe {} added successfully (id {})", recipe.name, id);
                    report.created.push(id);
                }
                Err(e) => {
                    warn!("Failed to store recipe {}: {}", recipe.name, e.log_safe());
                    report.failed.push(recipe.name);
                }
            }
        }

        info!(
            "Imported {} recipes for {:?} ({} failed)",
            report.created.len(),
            query,
            report.failed.len()
        );

        Ok(report)
    }
}
