use crate::db::{models::*, DbPool};
use crate::error::{Error, Result};

/// Create a new recipe, returning its id
pub async fn create_recipe(pool: &DbPool, new_recipe: &NewRecipe) -> Result<i64> {
    let mut tx = pool.begin().await?;

    let id: i64 = sqlx::query_scalar(
        r#"
        INSERT INTO recipes (name, ingredients, instructions)
        VALUES (?, ?, ?)
        RETURNING id
        "#,
    )
    .bind(&new_recipe.name)
    .bind(&new_recipe.ingredients)
    .bind(&new_recipe.instructions)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;

    Ok(id)
}

/// List every recipe in ascending id order
pub async fn list_recipes(pool: &DbPool) -> Result<Vec<Recipe>> {
    let recipes = sqlx::query_as::<_, Recipe>(
        "SELECT id, name, ingredients, instructions FROM recipes ORDER BY id",
    )
    .fetch_all(pool)
    .await?;

    Ok(recipes)
}

/// Find recipe by ID
pub async fn find_recipe(pool: &DbPool, recipe_id: i64) -> Result<Option<Recipe>> {
    let recipe = sqlx::query_as::<_, Recipe>(
        "SELECT id, name, ingredients, instructions FROM recipes WHERE id = ?",
    )
    .bind(recipe_id)
    .fetch_optional(pool)
    .await?;

    Ok(recipe)
}

/// Get recipe by ID
pub async fn get_recipe(pool: &DbPool, recipe_id: i64) -> Result<Recipe> {
    find_recipe(pool, recipe_id)
        .await?
        .ok_or_else(|| Error::NotFound(format!("Recipe {recipe_id} not found")))
}

/// Replace the name, ingredients and instructions of a recipe.
///
/// Returns `None` without touching the table when no row has this id.
pub async fn update_recipe(
    pool: &DbPool,
    recipe_id: i64,
    update: &NewRecipe,
) -> Result<Option<Recipe>> {
    let mut tx = pool.begin().await?;

    let recipe = sqlx::query_as::<_, Recipe>(
        r#"
        UPDATE recipes
        SET name = ?, ingredients = ?, instructions = ?
        WHERE id = ?
        RETURNING id, name, ingredients, instructions
        "#,
    )
    .bind(&update.name)
    .bind(&update.ingredients)
    .bind(&update.instructions)
    .bind(recipe_id)
    .fetch_optional(&mut *tx)
    .await?;

    tx.commit().await?;

    Ok(recipe)
}

/// Delete recipe. Returns whether a row was removed.
pub async fn delete_recipe(pool: &DbPool, recipe_id: i64) -> Result<bool> {
    let mut tx = pool.begin().await?;

    let result = sqlx::query("DELETE FROM recipes WHERE id = ?")
        .bind(recipe_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    Ok(result.rows_affected() > 0)
}

/// Count all recipes
pub async fn count_recipes(pool: &DbPool) -> Result<i64> {
    let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM recipes")
        .fetch_one(pool)
        .await?;
    Ok(count.0)
}
