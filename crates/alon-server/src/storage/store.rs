//! The persistence seam used by the HTTP layer.

use alon_core::db::DatabaseError;
use alon_core::{NewRecipe, Recipe};
use async_trait::async_trait;

use super::db::RecipeDatabase;

/// Operations the API needs from recipe storage.
///
/// The router holds an `Arc<dyn RecipeStore>`, so tests can swap in doubles.
#[async_trait]
pub trait RecipeStore: Send + Sync {
    /// Persist a new recipe and return the stored row.
    async fn create(&self, input: &NewRecipe) -> Result<Recipe, DatabaseError>;

    /// All recipes, newest first.
    async fn list(&self) -> Result<Vec<Recipe>, DatabaseError>;

    /// Recipes matching `term` in fill, public ID or info, newest first.
    async fn search(&self, term: &str) -> Result<Vec<Recipe>, DatabaseError>;

    async fn get_by_public_id(&self, public_id: &str) -> Result<Option<Recipe>, DatabaseError>;

    /// Returns `false` when nothing matched.
    async fn delete_by_public_id(&self, public_id: &str) -> Result<bool, DatabaseError>;

    async fn count(&self) -> Result<i64, DatabaseError>;
}

#[async_trait]
impl RecipeStore for RecipeDatabase {
    async fn create(&self, input: &NewRecipe) -> Result<Recipe, DatabaseError> {
        self.create_recipe(input).await
    }

    async fn list(&self) -> Result<Vec<Recipe>, DatabaseError> {
        self.list_recipes().await
    }

    async fn search(&self, term: &str) -> Result<Vec<Recipe>, DatabaseError> {
        self.search_recipes(term).await
    }

    async fn get_by_public_id(&self, public_id: &str) -> Result<Option<Recipe>, DatabaseError> {
        self.get_recipe(public_id).await
    }

    async fn delete_by_public_id(&self, public_id: &str) -> Result<bool, DatabaseError> {
        self.delete_recipe(public_id).await
    }

    async fn count(&self) -> Result<i64, DatabaseError> {
        self.count_recipes().await
    }
}
