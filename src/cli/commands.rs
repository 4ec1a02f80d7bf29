use crate::db::{self, models::Recipe, DbPool};
use crate::provider::{extract_recipes, SearchClient};
use crate::service::{ImportReport, RecipeService};
use crate::Result;

/// Print every stored recipe
pub async fn list(pool: &DbPool) -> Result<()> {
    let recipes = db::recipes::list_recipes(pool).await?;

    if recipes.is_empty() {
        println!("No recipes stored yet.");
        return Ok(());
    }

    println!("{} recipes:\n", recipes.len());
    for recipe in &recipes {
        print_recipe(recipe);
    }

    Ok(())
}

/// Print what the provider returns for `query`
pub async fn search(client: &SearchClient, query: &str) -> Result<()> {
    let response = client.search(query).await?;
    let recipes = extract_recipes(&response);

    if recipes.is_empty() {
        println!("No recipes found for \"{query}\".");
        return Ok(());
    }

    println!("Found {} recipes for \"{}\":\n", recipes.len(), query);
    for (i, recipe) in recipes.iter().enumerate() {
        println!("{}. {}", i + 1, recipe.name);
        if !recipe.ingredients.is_empty() {
            println!("   Ingredients: {}", recipe.ingredients);
        }
        println!("   {}", recipe.instructions);
        println!();
    }

    Ok(())
}

/// Import provider results and print the outcome
pub async fn import(service: &RecipeService, query: &str) -> Result<ImportReport> {
    let report = service.import_online(query).await?;

    println!(
        "\x1b[32m\u{2713}\x1b[0m Imported {} recipes for \"{}\"",
        report.created.len(),
        query
    );
    for name in &report.failed {
        println!("\x1b[31m\u{2717}\x1b[0m Failed to store: {name}");
    }

    Ok(report)
}

fn print_recipe(recipe: &Recipe) {
    println!("[{}] {}", recipe.id, recipe.name);
    if !recipe.ingredients.is_empty() {
        println!("    Ingredients: {}", recipe.ingredients);
    }
    if !recipe.instructions.is_empty() {
        println!("    Instructions: {}", recipe.instructions);
    }
}
