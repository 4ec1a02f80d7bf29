use crate::db::models::NewRecipe;
use crate::provider::models::SearchResponse;
use serde_json::Value;

pub const MISSING_NAME: &str = "Name not available";
pub const MISSING_INSTRUCTIONS: &str = "Instructions not available";

/// Map every provider hit to the fields of a local recipe.
///
/// The provider rarely ships literal steps, so the recipe page URL stands in
/// for the instructions.
pub fn extract_recipes(response: &SearchResponse) -> Vec<NewRecipe> {
    response.hits.iter().map(extract_hit).collect()
}

fn extract_hit(hit: &Value) -> NewRecipe {
    let recipe = hit.get("recipe");

    let name = recipe
        .and_then(|r| r.get("label"))
        .and_then(Value::as_str)
        .unwrap_or(MISSING_NAME);

    let ingredients = recipe
        .and_then(|r| r.get("ingredients"))
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(|item| item.get("text").and_then(Value::as_str))
                .collect::<Vec<_>>()
                .join(", ")
        })
        .unwrap_or_default();

    let instructions = recipe
        .and_then(|r| r.get("url"))
        .and_then(Value::as_str)
        .unwrap_or(MISSING_INSTRUCTIONS);

    NewRecipe::new(name, ingredients, instructions)
}
