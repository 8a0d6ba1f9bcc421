//! Database queries for the `recipes` table.

use alon_core::{NewRecipe, Recipe, generate_public_id};
use chrono::Utc;
use tracing::{debug, warn};

use super::db::RecipeDatabase;
use alon_core::db::DatabaseError;

/// How many public IDs are tried before a create gives up with
/// [`DatabaseError::Conflict`].
pub const PUBLIC_ID_ATTEMPTS: u32 = 2;

impl RecipeDatabase {
    /// Insert a recipe under a freshly generated public ID.
    ///
    /// A public ID collision is retried once with a new ID.
    pub async fn create_recipe(&self, input: &NewRecipe) -> Result<Recipe, DatabaseError> {
        self.create_recipe_with(input, generate_public_id).await
    }

    /// Like [`Self::create_recipe`] but draws public IDs from `next_id`.
    pub(crate) async fn create_recipe_with(
        &self,
        input: &NewRecipe,
        mut next_id: impl FnMut() -> String + Send,
    ) -> Result<Recipe, DatabaseError> {
        let mut attempt = 1;
        loop {
            let public_id = next_id();
            match self.insert_recipe(&public_id, input).await {
                Err(DatabaseError::Conflict(reason)) if attempt < PUBLIC_ID_ATTEMPTS => {
                    warn!(%public_id, attempt, %reason, "Public ID collision, retrying");
                    attempt += 1;
                }
                other => return other,
            }
        }
    }

    async fn insert_recipe(
        &self,
        public_id: &str,
        input: &NewRecipe,
    ) -> Result<Recipe, DatabaseError> {
        let now = Utc::now();

        let result = sqlx::query(
            "INSERT INTO recipes (public_id, fill, info, ram, cpu, disk, price, discord_id, discord_name, created_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(public_id)
        .bind(&input.fill)
        .bind(&input.info)
        .bind(&input.ram)
        .bind(&input.cpu)
        .bind(&input.disk)
        .bind(&input.price)
        .bind(&input.discord_id)
        .bind(&input.discord_name)
        .bind(now)
        .execute(self.pool())
        .await?;

        let id = result.last_insert_rowid();
        debug!(id, %public_id, "Recipe inserted");

        sqlx::query_as::<_, Recipe>("SELECT * FROM recipes WHERE id = ?")
            .bind(id)
            .fetch_optional(self.pool())
            .await?
            .ok_or_else(|| DatabaseError::NotFound(format!("Recipe row {id}")))
    }

    /// All recipes, newest first.
    pub async fn list_recipes(&self) -> Result<Vec<Recipe>, DatabaseError> {
        let recipes = sqlx::query_as::<_, Recipe>(
            "SELECT * FROM recipes ORDER BY created_at DESC, id DESC",
        )
        .fetch_all(self.pool())
        .await?;

        Ok(recipes)
    }

    /// Recipes whose fill, public ID or info contains `term`, ignoring case.
    /// Newest first.
    ///
    /// Case is folded with Unicode lowercasing on both sides and the term is
    /// used as given, so surrounding spaces take part in the match. An empty
    /// term returns everything.
    pub async fn search_recipes(&self, term: &str) -> Result<Vec<Recipe>, DatabaseError> {
        let recipes = self.list_recipes().await?;
        if term.is_empty() {
            return Ok(recipes);
        }

        let needle = term.to_lowercase();
        Ok(recipes
            .into_iter()
            .filter(|r| {
                [&r.fill, &r.public_id, &r.info]
                    .iter()
                    .any(|field| field.to_lowercase().contains(&needle))
            })
            .collect())
    }

    /// Look a recipe up by its public ID.
    pub async fn get_recipe(&self, public_id: &str) -> Result<Option<Recipe>, DatabaseError> {
        let recipe = sqlx::query_as::<_, Recipe>("SELECT * FROM recipes WHERE public_id = ?")
            .bind(public_id)
            .fetch_optional(self.pool())
            .await?;

        Ok(recipe)
    }

    /// Hard-delete a recipe. Returns whether a row was removed.
    pub async fn delete_recipe(&self, public_id: &str) -> Result<bool, DatabaseError> {
        let result = sqlx::query("DELETE FROM recipes WHERE public_id = ?")
            .bind(public_id)
            .execute(self.pool())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Number of stored recipes.
    pub async fn count_recipes(&self) -> Result<i64, DatabaseError> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM recipes")
            .fetch_one(self.pool())
            .await?;

        Ok(count.0)
    }
}
