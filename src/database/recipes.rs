// ABOUTME: Recipe CRUD and keyword-search database operations
// ABOUTME: Stores ingredient and restriction lists as JSON arrays and enforces owner scoping

use super::Database;
use crate::browser::RecipeSource;
use crate::models::{NewRecipe, RecipeRecord, RecipeUpdate};
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::Row;
use uuid::Uuid;

impl Database {
    /// Create the recipes table
    ///
    /// # Errors
    ///
    /// Returns an error if table or index creation fails.
    pub(super) async fn migrate_recipes(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS recipes (
                id TEXT PRIMARY KEY,
                title TEXT NOT NULL,
                prep_time INTEGER NOT NULL DEFAULT 0,
                ingredients TEXT NOT NULL DEFAULT '[]',
                dietary_restrictions TEXT NOT NULL DEFAULT '[]',
                cost REAL NOT NULL DEFAULT 0,
                preparation_steps TEXT NOT NULL DEFAULT '',
                difficulty INTEGER NOT NULL CHECK (difficulty BETWEEN 1 AND 5),
                user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP,
                updated_at DATETIME DEFAULT CURRENT_TIMESTAMP
            )
            ",
        )
        .execute(self.pool())
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_recipes_user_id ON recipes(user_id)")
            .execute(self.pool())
            .await?;
        sqlx::query("CREATE INDEX IF NOT EXISTS idx_recipes_title ON recipes(title)")
            .execute(self.pool())
            .await?;

        Ok(())
    }

    /// Create a recipe owned by `user_id`, returning the persisted record
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub async fn create_recipe(&self, user_id: Uuid, recipe: &NewRecipe) -> Result<RecipeRecord> {
        let record = RecipeRecord {
            id: Uuid::new_v4(),
            title: recipe.title.clone(),
            prep_time: recipe.prep_time,
            ingredients: recipe.ingredients.clone(),
            dietary_restrictions: recipe.restrictions.clone(),
            cost: recipe.cost,
            preparation_steps: recipe.prep_steps.clone(),
            difficulty: recipe.difficulty,
            user_id,
            created_at: Utc::now(),
        };

        sqlx::query(
            r"
            INSERT INTO recipes
                (id, title, prep_time, ingredients, dietary_restrictions, cost,
                 preparation_steps, difficulty, user_id, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            ",
        )
        .bind(record.id.to_string())
        .bind(&record.title)
        .bind(i64::from(record.prep_time))
        .bind(serde_json::to_string(&record.ingredients)?)
        .bind(serde_json::to_string(&record.dietary_restrictions)?)
        .bind(record.cost)
        .bind(&record.preparation_steps)
        .bind(i64::from(record.difficulty))
        .bind(record.user_id.to_string())
        .bind(record.created_at)
        .bind(record.created_at)
        .execute(self.pool())
        .await?;

        Ok(record)
    }

    /// Get a recipe by id
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or the row fails to parse.
    pub async fn get_recipe(&self, id: Uuid) -> Result<Option<RecipeRecord>> {
        let row = sqlx::query("SELECT * FROM recipes WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(self.pool())
            .await?;

        row.map(|r| Self::row_to_record(&r)).transpose()
    }

    /// Apply a partial update to a recipe owned by `user_id`
    ///
    /// # Errors
    ///
    /// Returns an error if the recipe does not exist, is owned by another
    /// user, or the update fails.
    pub async fn update_recipe(
        &self,
        id: Uuid,
        user_id: Uuid,
        update: &RecipeUpdate,
    ) -> Result<RecipeRecord> {
        let existing = self
            .get_recipe(id)
            .await?
            .ok_or_else(|| anyhow!("Recipe not found: {id}"))?;
        if existing.user_id != user_id {
            return Err(anyhow!("Recipe {id} is not owned by user {user_id}"));
        }

        let merged = RecipeRecord {
            title: update.title.clone().unwrap_or(existing.title),
            prep_time: update.prep_time.unwrap_or(existing.prep_time),
            ingredients: update.ingredients.clone().unwrap_or(existing.ingredients),
            dietary_restrictions: update
                .restrictions
                .clone()
                .unwrap_or(existing.dietary_restrictions),
            cost: update.cost.unwrap_or(existing.cost),
            preparation_steps: update
                .prep_steps
                .clone()
                .unwrap_or(existing.preparation_steps),
            difficulty: update.difficulty.unwrap_or(existing.difficulty),
            ..existing
        };

        sqlx::query(
            r"
            UPDATE recipes SET
                title = ?, prep_time = ?, ingredients = ?, dietary_restrictions = ?,
                cost = ?, preparation_steps = ?, difficulty = ?, updated_at = ?
            WHERE id = ? AND user_id = ?
            ",
        )
        .bind(&merged.title)
        .bind(i64::from(merged.prep_time))
        .bind(serde_json::to_string(&merged.ingredients)?)
        .bind(serde_json::to_string(&merged.dietary_restrictions)?)
        .bind(merged.cost)
        .bind(&merged.preparation_steps)
        .bind(i64::from(merged.difficulty))
        .bind(Utc::now())
        .bind(id.to_string())
        .bind(user_id.to_string())
        .execute(self.pool())
        .await?;

        Ok(merged)
    }

    /// Delete a recipe owned by `user_id`
    ///
    /// # Errors
    ///
    /// Returns an error if the recipe does not exist, is owned by another
    /// user, or the delete fails.
    pub async fn delete_recipe(&self, id: Uuid, user_id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM recipes WHERE id = ? AND user_id = ?")
            .bind(id.to_string())
            .bind(user_id.to_string())
            .execute(self.pool())
            .await?;

        if result.rows_affected() == 0 {
            return Err(anyhow!("Recipe {id} not found for user {user_id}"));
        }
        Ok(())
    }

    /// List every recipe in the shared pool
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a row fails to parse.
    pub async fn list_all_recipes(&self) -> Result<Vec<RecipeRecord>> {
        let rows = sqlx::query("SELECT * FROM recipes ORDER BY created_at DESC")
            .fetch_all(self.pool())
            .await?;

        rows.iter().map(Self::row_to_record).collect()
    }

    /// List recipes owned by one user ("my recipes")
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a row fails to parse.
    pub async fn list_recipes_for_user(&self, user_id: Uuid) -> Result<Vec<RecipeRecord>> {
        let rows =
            sqlx::query("SELECT * FROM recipes WHERE user_id = ? ORDER BY created_at DESC")
                .bind(user_id.to_string())
                .fetch_all(self.pool())
                .await?;

        rows.iter().map(Self::row_to_record).collect()
    }

    /// Case-insensitive keyword search over titles and ingredient lists.
    ///
    /// Ordering is owned here: title matches rank before ingredient-only
    /// matches, newest first within each group.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a row fails to parse.
    pub async fn search_recipes_by_keyword(&self, keyword: &str) -> Result<Vec<RecipeRecord>> {
        let pattern = format!("%{}%", keyword.trim().to_lowercase());
        let rows = sqlx::query(
            r"
            SELECT * FROM recipes
            WHERE LOWER(title) LIKE ? OR LOWER(ingredients) LIKE ?
            ORDER BY (CASE WHEN LOWER(title) LIKE ? THEN 0 ELSE 1 END), created_at DESC
            ",
        )
        .bind(&pattern)
        .bind(&pattern)
        .bind(&pattern)
        .fetch_all(self.pool())
        .await?;

        rows.iter().map(Self::row_to_record).collect()
    }

    fn row_to_record(row: &sqlx::sqlite::SqliteRow) -> Result<RecipeRecord> {
        let id: String = row.try_get("id")?;
        let user_id: String = row.try_get("user_id")?;
        let ingredients: String = row.try_get("ingredients")?;
        let restrictions: String = row.try_get("dietary_restrictions")?;
        let prep_time: i64 = row.try_get("prep_time")?;
        let difficulty: i64 = row.try_get("difficulty")?;
        let created_at: DateTime<Utc> = row.try_get("created_at")?;

        Ok(RecipeRecord {
            id: Uuid::parse_str(&id)?,
            title: row.try_get("title")?,
            prep_time: u32::try_from(prep_time)?,
            ingredients: serde_json::from_str(&ingredients)?,
            dietary_restrictions: serde_json::from_str(&restrictions)?,
            cost: row.try_get("cost")?,
            preparation_steps: row.try_get("preparation_steps")?,
            difficulty: u8::try_from(difficulty)?,
            user_id: Uuid::parse_str(&user_id)?,
            created_at,
        })
    }
}

#[async_trait]
impl RecipeSource for Database {
    async fn search_recipes(&self, keyword: &str) -> Result<Vec<RecipeRecord>> {
        self.search_recipes_by_keyword(keyword).await
    }

    async fn list_recipes(&self) -> Result<Vec<RecipeRecord>> {
        self.list_all_recipes().await
    }
}
