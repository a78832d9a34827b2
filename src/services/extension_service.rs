use crate::api::error::AppError;
use crate::config::{FIXED_EXTENSION_NAMES, MAX_CUSTOM_EXTENSIONS};
use crate::entities::{custom_extensions, fixed_extensions, prelude::*};
use crate::utils::validation::{normalize_extension, validate_extension};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, ModelTrait,
    PaginatorTrait, QueryFilter, Set, SqlErr, TransactionTrait,
};
use tracing::info;

/// Orchestrates the two extension catalogs: the seeded fixed set whose rows
/// only ever toggle `blocked`, and the user-managed custom set, deduplicated
/// and bounded at [`MAX_CUSTOM_EXTENSIONS`] records.
pub struct ExtensionService {
    db: DatabaseConnection,
}

impl ExtensionService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Seeds the fixed extension set. Safe to run on every startup:
    /// existing rows, including a previously toggled `blocked` flag, are
    /// left untouched.
    pub async fn seed_fixed_extensions(&self) -> Result<(), AppError> {
        for name in FIXED_EXTENSION_NAMES {
            let exists = FixedExtensions::find()
                .filter(fixed_extensions::Column::Name.eq(name))
                .one(&self.db)
                .await?;

            if exists.is_none() {
                let model = fixed_extensions::ActiveModel {
                    name: Set(name.to_string()),
                    blocked: Set(false),
                    ..Default::default()
                };
                model.insert(&self.db).await?;
                info!("🌱 Seeded fixed extension: {}", name);
            }
        }

        Ok(())
    }

    pub async fn list_fixed(&self) -> Result<Vec<fixed_extensions::Model>, AppError> {
        Ok(FixedExtensions::find().all(&self.db).await?)
    }

    pub async fn update_fixed_blocked(
        &self,
        id: i32,
        blocked: bool,
    ) -> Result<fixed_extensions::Model, AppError> {
        let extension = FixedExtensions::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Fixed extension not found: id {}", id)))?;

        self.set_fixed_blocked(extension, blocked).await
    }

    pub async fn update_fixed_blocked_by_name(
        &self,
        name: &str,
        blocked: bool,
    ) -> Result<fixed_extensions::Model, AppError> {
        let normalized = normalize_extension(name);
        let extension = FixedExtensions::find()
            .filter(fixed_extensions::Column::Name.eq(&normalized))
            .one(&self.db)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("Fixed extension not found: {}", normalized))
            })?;

        self.set_fixed_blocked(extension, blocked).await
    }

    async fn set_fixed_blocked(
        &self,
        extension: fixed_extensions::Model,
        blocked: bool,
    ) -> Result<fixed_extensions::Model, AppError> {
        let name = extension.name.clone();
        let mut active = extension.into_active_model();
        active.blocked = Set(blocked);
        let updated = active.update(&self.db).await?;

        info!("Updated fixed extension: {} - blocked: {}", name, blocked);
        Ok(updated)
    }

    pub async fn list_custom(&self) -> Result<Vec<custom_extensions::Model>, AppError> {
        Ok(CustomExtensions::find().all(&self.db).await?)
    }

    pub async fn count_custom(&self) -> Result<u64, AppError> {
        Ok(CustomExtensions::find().count(&self.db).await?)
    }

    /// Registers a custom extension.
    ///
    /// The duplicate and count checks run in the same transaction as the
    /// insert, so two concurrent callers cannot jointly push the table past
    /// [`MAX_CUSTOM_EXTENSIONS`].
    pub async fn add_custom(&self, raw: &str) -> Result<custom_extensions::Model, AppError> {
        let extension = validate_extension(raw)?;

        let txn = self.db.begin().await.map_err(AppError::Database)?;

        let duplicate = CustomExtensions::find()
            .filter(custom_extensions::Column::Extension.eq(&extension))
            .one(&txn)
            .await?;
        if duplicate.is_some() {
            return Err(AppError::Duplicate(format!(
                "Extension already registered: {}",
                extension
            )));
        }

        let count = CustomExtensions::find().count(&txn).await?;
        if count >= MAX_CUSTOM_EXTENSIONS {
            return Err(AppError::LimitExceeded(format!(
                "At most {} custom extensions can be registered",
                MAX_CUSTOM_EXTENSIONS
            )));
        }

        let model = custom_extensions::ActiveModel {
            extension: Set(extension.clone()),
            created_at: Set(Utc::now()),
            ..Default::default()
        };

        // The unique index backs up the in-transaction check: an insert
        // racing past it surfaces as a constraint violation, not a 500.
        let created = match model.insert(&txn).await {
            Ok(created) => created,
            Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
                return Err(AppError::Duplicate(format!(
                    "Extension already registered: {}",
                    extension
                )));
            }
            Err(e) => return Err(AppError::Database(e)),
        };

        txn.commit().await.map_err(AppError::Database)?;

        info!(
            "Added custom extension: {} (current count: {})",
            extension,
            count + 1
        );
        Ok(created)
    }

    pub async fn delete_custom(&self, id: i32) -> Result<(), AppError> {
        let result = CustomExtensions::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound(format!(
                "Custom extension not found: id {}",
                id
            )));
        }

        info!("Deleted custom extension: id {}", id);
        Ok(())
    }

    pub async fn delete_custom_by_name(&self, raw: &str) -> Result<(), AppError> {
        let normalized = normalize_extension(raw);
        let extension = CustomExtensions::find()
            .filter(custom_extensions::Column::Extension.eq(&normalized))
            .one(&self.db)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("Custom extension not found: {}", normalized))
            })?;

        extension.delete(&self.db).await?;

        info!("Deleted custom extension: {}", normalized);
        Ok(())
    }
}
