use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A persisted recipe
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Recipe {
    pub id: i64,
    pub name: String,
    pub ingredients: String,
    pub instructions: String,
}

/// The mutable fields of a recipe, used both to create a row and to replace
/// the fields of an existing one
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewRecipe {
    pub name: String,
    pub ingredients: String,
    pub instructions: String,
}

impl NewRecipe {
    pub fn new(
        name: impl Into<String>,
        ingredients: impl Into<String>,
        instructions: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            ingredients: ingredients.into(),
            instructions: instructions.into(),
        }
    }
}

impl Recipe {
    /// The mutable fields of this recipe
    pub fn fields(&self) -> NewRecipe {
        NewRecipe {
            name: self.name.clone(),
            ingredients: self.ingredients.clone(),
            instructions: self.instructions.clone(),
        }
    }
}
