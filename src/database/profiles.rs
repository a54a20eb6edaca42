// ABOUTME: Dietary profile persistence and custom filter-label vocabulary operations
// ABOUTME: Handles profile upsert and case-insensitive de-duplication of custom labels

use super::Database;
use crate::models::{DietaryProfile, BASELINE_PREFERENCES, BASELINE_RESTRICTIONS};
use anyhow::Result;
use chrono::Utc;
use sqlx::Row;
use uuid::Uuid;

/// Which vocabulary a custom label extends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelKind {
    /// Dietary restriction labels (Vegan, Halal, ...)
    Restriction,
    /// Dietary preference labels (Tomatoes, Onions, ...)
    Preference,
}

impl LabelKind {
    /// Convert to database string representation
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Restriction => "restriction",
            Self::Preference => "preference",
        }
    }

    const fn baseline(self) -> &'static [&'static str] {
        match self {
            Self::Restriction => BASELINE_RESTRICTIONS,
            Self::Preference => BASELINE_PREFERENCES,
        }
    }
}

impl Database {
    /// Create the profile and custom-label tables
    ///
    /// # Errors
    ///
    /// Returns an error if table creation fails.
    pub(super) async fn migrate_profiles(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS user_profiles (
                user_id TEXT PRIMARY KEY REFERENCES users(id) ON DELETE CASCADE,
                dietary_restrictions TEXT NOT NULL DEFAULT '[]',
                dietary_preferences TEXT NOT NULL DEFAULT '[]',
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP,
                updated_at DATETIME DEFAULT CURRENT_TIMESTAMP
            )
            ",
        )
        .execute(self.pool())
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS custom_labels (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                kind TEXT NOT NULL CHECK (kind IN ('restriction', 'preference')),
                label TEXT NOT NULL,
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP,
                UNIQUE (user_id, kind, label)
            )
            ",
        )
        .execute(self.pool())
        .await?;

        Ok(())
    }

    /// Get a user's dietary profile; absent rows read as the empty profile
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a row fails to parse.
    pub async fn get_dietary_profile(&self, user_id: Uuid) -> Result<DietaryProfile> {
        let row = sqlx::query(
            "SELECT dietary_restrictions, dietary_preferences FROM user_profiles WHERE user_id = ?",
        )
        .bind(user_id.to_string())
        .fetch_optional(self.pool())
        .await?;

        match row {
            Some(row) => {
                let restrictions: String = row.try_get("dietary_restrictions")?;
                let preferences: String = row.try_get("dietary_preferences")?;
                Ok(DietaryProfile {
                    restrictions: serde_json::from_str(&restrictions)?,
                    preferences: serde_json::from_str(&preferences)?,
                })
            }
            None => Ok(DietaryProfile::default()),
        }
    }

    /// Insert or update a user's dietary profile
    ///
    /// # Errors
    ///
    /// Returns an error if the upsert fails.
    pub async fn upsert_dietary_profile(
        &self,
        user_id: Uuid,
        profile: &DietaryProfile,
    ) -> Result<()> {
        sqlx::query(
            r"
            INSERT INTO user_profiles (user_id, dietary_restrictions, dietary_preferences, updated_at)
            VALUES (?, ?, ?, ?)
            ON CONFLICT (user_id) DO UPDATE SET
                dietary_restrictions = excluded.dietary_restrictions,
                dietary_preferences = excluded.dietary_preferences,
                updated_at = excluded.updated_at
            ",
        )
        .bind(user_id.to_string())
        .bind(serde_json::to_string(&profile.restrictions)?)
        .bind(serde_json::to_string(&profile.preferences)?)
        .bind(Utc::now())
        .execute(self.pool())
        .await?;

        Ok(())
    }

    /// The merged label vocabulary for a user: baseline plus their custom
    /// labels, in insertion order
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn label_vocabulary(&self, user_id: Uuid, kind: LabelKind) -> Result<Vec<String>> {
        let rows = sqlx::query(
            "SELECT label FROM custom_labels WHERE user_id = ? AND kind = ? ORDER BY created_at",
        )
        .bind(user_id.to_string())
        .bind(kind.as_str())
        .fetch_all(self.pool())
        .await?;

        let mut vocabulary: Vec<String> =
            kind.baseline().iter().map(|s| (*s).to_owned()).collect();
        for row in rows {
            let label: String = row.try_get("label")?;
            vocabulary.push(label);
        }
        Ok(vocabulary)
    }

    /// Persist a custom label for a user's vocabulary.
    ///
    /// The label is de-duplicated case-insensitively against the baseline and
    /// the user's existing custom labels before insert; a duplicate is not an
    /// error and returns `false`. Returns `true` when the label was added.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub async fn add_custom_label(
        &self,
        user_id: Uuid,
        kind: LabelKind,
        label: &str,
    ) -> Result<bool> {
        let trimmed = label.trim();
        if trimmed.is_empty() {
            return Ok(false);
        }

        let lowered = trimmed.to_lowercase();
        let existing = self.label_vocabulary(user_id, kind).await?;
        if existing.iter().any(|l| l.to_lowercase() == lowered) {
            return Ok(false);
        }

        sqlx::query(
            "INSERT INTO custom_labels (id, user_id, kind, label, created_at) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(Uuid::new_v4().to_string())
        .bind(user_id.to_string())
        .bind(kind.as_str())
        .bind(trimmed)
        .bind(Utc::now())
        .execute(self.pool())
        .await?;

        Ok(true)
    }
}
