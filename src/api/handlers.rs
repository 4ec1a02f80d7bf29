use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use serde_json::Value;
use tracing::{debug, info};

use crate::{
    api::models::*,
    db::{self, models::Recipe},
    service::RecipeService,
    Error, Result,
};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub pool: db::DbPool,
    pub service: RecipeService,
    pub settings: crate::config::Settings,
}

/// Turn a body that failed to parse into a 400
fn require_body<T>(
    payload: std::result::Result<Json<T>, JsonRejection>,
    message: &str,
) -> Result<T> {
    payload.map(|Json(body)| body).map_err(|rejection| {
        debug!("Rejected request body: {}", rejection.body_text());
        Error::Validation(message.to_string())
    })
}

/// GET /api/recipes - List all recipes
pub async fn list_recipes(State(state): State<AppState>) -> Result<Json<Vec<Recipe>>> {
    debug!("List recipes request");

    let recipes = db::recipes::list_recipes(&state.pool).await?;
    Ok(Json(recipes))
}

/// POST /api/recipes - Create a recipe
pub async fn create_recipe(
    State(state): State<AppState>,
    payload: std::result::Result<Json<RecipeRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CreatedResponse>)> {
    let new_recipe = require_body(payload, "Invalid data received")?.into_new_recipe()?;
    debug!("Create recipe request: {:?}", new_recipe.name);

    let recipe_id = db::recipes::create_recipe(&state.pool, &new_recipe).await?;
    info!("New recipe created with ID: {}", recipe_id);

    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse {
            message: "Recipe created successfully".to_string(),
            recipe_id,
        }),
    ))
}

/// GET /api/recipes/:id - Get a recipe
pub async fn get_recipe(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Recipe>> {
    debug!("Get recipe request: {}", id);

    let recipe = db::recipes::get_recipe(&state.pool, id).await?;
    Ok(Json(recipe))
}

/// PUT /api/recipes/:id - Replace a recipe's fields
pub async fn update_recipe(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    payload: std::result::Result<Json<RecipeRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>> {
    let update = require_body(payload, "Invalid data received")?.into_new_recipe()?;
    debug!("Update recipe request: {}", id);

    db::recipes::update_recipe(&state.pool, id, &update)
        .await?
        .ok_or_else(|| Error::NotFound(format!("Recipe {id} not found")))?;
    info!("Recipe {} updated successfully", id);

    Ok(Json(MessageResponse::new("Recipe updated successfully")))
}

/// DELETE /api/recipes/:id - Delete a recipe
pub async fn delete_recipe(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<MessageResponse>> {
    debug!("Delete recipe request: {}", id);

    // Deleting an unknown id is not an error
    if db::recipes::delete_recipe(&state.pool, id).await? {
        info!("Recipe {} deleted successfully", id);
    } else {
        debug!("Recipe {} did not exist", id);
    }

    Ok(Json(MessageResponse::new("Recipe deleted successfully")))
}

/// POST /api/recipes/search - Search the provider and return its raw hits
pub async fn search_online(
    State(state): State<AppState>,
    payload: std::result::Result<Json<QueryRequest>, JsonRejection>,
) -> Result<Json<Vec<Value>>> {
    let query = require_body(payload, "Missing search query")?.into_query()?;
    debug!("Online search request: {:?}", query);

    let response = state.service.search_online(&query).await?;
    Ok(Json(response.hits))
}

/// POST /api/recipes/add_online - Import provider results as local recipes
pub async fn add_online(
    State(state): State<AppState>,
    payload: std::result::Result<Json<QueryRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ImportResponse>)> {
    let query = require_body(payload, "Missing search query")?.into_query()?;
    debug!("Add online request: {:?}", query);

    let report = state.service.import_online(&query).await?;

    Ok((
        StatusCode::CREATED,
        Json(ImportResponse {
            message: "Recipes added successfully from provider".to_string(),
            created: report.created,
            failed: report.failed,
        }),
    ))
}

/// GET /api/config - Provider settings for the browser client
pub async fn get_config(State(state): State<AppState>) -> Json<ConfigResponse> {
    let provider = &state.settings.provider;

    Json(ConfigResponse {
        api_url: provider.api_url.clone(),
        api_id: provider.app_id.clone(),
        api_key: provider.app_key.clone(),
    })
}

/// GET /health - Health check endpoint
pub async fn health_check() -> Result<Json<HealthResponse>> {
    Ok(Json(HealthResponse {
        status: "ok".to_string(),
    }))
}

/// GET /ready - Readiness check endpoint
pub async fn readiness_check(State(state): State<AppState>) -> Result<Json<ReadinessResponse>> {
    let db_healthy = db::ping(&state.pool).await;

    Ok(Json(ReadinessResponse {
        ready: db_healthy,
        database: if db_healthy { "ok" } else { "error" }.to_string(),
    }))
}
