use crate::db::models::NewRecipe;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Body of POST /api/recipes and PUT /api/recipes/:id
#[derive(Debug, Clone, Deserialize)]
pub struct RecipeRequest {
    pub name: Option<String>,
    pub ingredients: Option<String>,
    pub instructions: Option<String>,
}

impl RecipeRequest {
    /// All three fields are required; empty strings are accepted
    pub fn into_new_recipe(self) -> Result<NewRecipe> {
        match (self.name, self.ingredients, self.instructions) {
            (Some(name), Some(ingredients), Some(instructions)) => Ok(NewRecipe {
                name,
                ingredients,
                instructions,
            }),
            _ => Err(Error::Validation("Invalid data received".to_string())),
        }
    }
}

/// Body of POST /api/recipes/search and POST /api/recipes/add_online
#[derive(Debug, Clone, Deserialize)]
pub struct QueryRequest {
    pub query: Option<String>,
}

impl QueryRequest {
    pub fn into_query(self) -> Result<String> {
        self.query
            .map(|q| q.trim().to_string())
            .filter(|q| !q.is_empty())
            .ok_or_else(|| Error::Validation("Missing search query".to_string()))
    }
}

/// Response of POST /api/recipes
#[derive(Debug, Clone, Serialize)]
pub struct CreatedResponse {
    pub message: String,
    pub recipe_id: i64,
}

/// Plain acknowledgement
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Response of POST /api/recipes/add_online
#[derive(Debug, Clone, Serialize)]
pub struct ImportResponse {
    pub message: String,
    pub created: Vec<i64>,
    pub failed: Vec<String>,
}

/// Response of GET /api/config
#[derive(Debug, Clone, Serialize)]
pub struct ConfigResponse {
    #[serde(rename = "API_URL")]
    pub api_url: String,
    #[serde(rename = "API_ID")]
    pub api_id: String,
    #[serde(rename = "API_KEY")]
    pub api_key: String,
}

/// Health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
}

/// Readiness check response
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    pub ready: bool,
    pub database: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recipe_request_requires_every_field() {
        let request: RecipeRequest =
            serde_json::from_str(r#"{"name": "Soup", "ingredients": "water"}"#).unwrap();
        assert!(matches!(
            request.into_new_recipe(),
            Err(Error::Validation(_))
        ));

        let request: RecipeRequest =
            serde_json::from_str(r#"{"name": "", "ingredients": "", "instructions": ""}"#)
                .unwrap();
        assert_eq!(request.into_new_recipe().unwrap(), NewRecipe::default());
    }

    #[test]
    fn test_query_request() {
        let request: QueryRequest = serde_json::from_str(r#"{"query": " pasta "}"#).unwrap();
        assert_eq!(request.into_query().unwrap(), "pasta");

        let request: QueryRequest = serde_json::from_str(r#"{"query": ""}"#).unwrap();
        assert!(request.into_query().is_err());

        let request: QueryRequest = serde_json::from_str(r#"{"query": "   "}"#).unwrap();
        assert!(matches!(request.into_query(), Err(Error::Validation(_))));

        let request: QueryRequest = serde_json::from_str("{}").unwrap();
        assert!(request.into_query().is_err());
    }

    #[test]
    fn test_config_response_keys() {
        let body = serde_json::to_value(ConfigResponse {
            api_url: "https://api.edamam.com/search".to_string(),
            api_id: "id".to_string(),
            api_key: "key".to_string(),
        })
        .unwrap();

        assert_eq!(body["API_URL"], "https://api.edamam.com/search");
        assert_eq!(body["API_ID"], "id");
        assert_eq!(body["API_KEY"], "key");
    }
}
