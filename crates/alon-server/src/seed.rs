//! Sample rows inserted when the store starts out empty.

use alon_core::NewRecipe;
use alon_core::db::DatabaseError;
use tracing::info;

use crate::storage::RecipeStore;

/// `(fill, info)` pairs for the sample recipes.
pub const SAMPLE_RECIPES: [(&str, &str); 2] = [
    ("Sample Hosting Plan", "Basic VPS - 2GB RAM, 1 vCPU, 40GB SSD"),
    (
        "Premium Dedicated",
        "Dedicated Server - 64GB RAM, 16 vCPU, 2TB NVMe",
    ),
];

/// Insert the sample recipes if the table is empty.
///
/// Returns how many rows were inserted. Runs again whenever the table has
/// been emptied.
pub async fn seed_if_empty(store: &dyn RecipeStore) -> Result<usize, DatabaseError> {
    if store.count().await? > 0 {
        return Ok(0);
    }

    info!("Seeding database");
    for (fill, info) in SAMPLE_RECIPES {
        store.create(&NewRecipe::new(fill, info)).await?;
    }
    info!(rows = SAMPLE_RECIPES.len(), "Seeding complete");

    Ok(SAMPLE_RECIPES.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::RecipeDatabase;

    #[tokio::test]
    async fn seeds_empty_table_once() {
        let db = RecipeDatabase::open_in_memory().await.unwrap();
        assert_eq!(seed_if_empty(&db).await.unwrap(), 2);
        assert_eq!(seed_if_empty(&db).await.unwrap(), 0);

        let recipes = db.list_recipes().await.unwrap();
        assert_eq!(recipes.len(), 2);
        assert_eq!(recipes[0].fill, "Premium Dedicated");
        assert_eq!(recipes[1].fill, "Sample Hosting Plan");
        assert!(recipes.iter().all(|r| r.ram.is_none()));
    }

    #[tokio::test]
    async fn skips_non_empty_table() {
        let db = RecipeDatabase::open_in_memory().await.unwrap();
        db.create_recipe(&NewRecipe::new("Existing", "row"))
            .await
            .unwrap();
        assert_eq!(seed_if_empty(&db).await.unwrap(), 0);
        assert_eq!(db.count_recipes().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn reseeds_after_table_is_emptied() {
        let db = RecipeDatabase::open_in_memory().await.unwrap();
        seed_if_empty(&db).await.unwrap();
        for recipe in db.list_recipes().await.unwrap() {
            db.delete_recipe(&recipe.public_id).await.unwrap();
        }
        assert_eq!(seed_if_empty(&db).await.unwrap(), 2);
    }
}
