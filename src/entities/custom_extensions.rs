use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "custom_extensions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    /// Stored in normalized form (lowercase, alphanumeric).
    #[sea_orm(unique)]
    pub extension: String,
    /// Set once at insert, never updated.
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
