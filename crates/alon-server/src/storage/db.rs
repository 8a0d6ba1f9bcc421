//! `SQLite` database handle for the receipt store.

alon_core::define_database!(RecipeDatabase, "Recipe database migrations complete");
