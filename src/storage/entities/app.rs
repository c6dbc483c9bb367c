use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::core::record::AppRecord;

/// App catalog database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "apps")]
pub struct Model {
    /// Package name (primary key)
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// Display name
    pub app_name: String,

    /// Store description
    #[sea_orm(column_type = "Text")]
    pub description: String,

    /// Store category code (absent on partially imported rows)
    pub category: Option<String>,

    /// Localized category label
    pub category_ko: Option<String>,

    /// Install count parsed from a store CSV export
    pub installs_numeric: Option<i64>,

    /// Creation timestamp
    pub created_at: DateTimeUtc,

    /// Last update timestamp
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Convert the database row into the domain record
    pub fn into_record(self) -> AppRecord {
        AppRecord {
            package_name: self.id,
            app_name: self.app_name,
            description: self.description,
            category: self.category,
            category_ko: self.category_ko,
        }
    }
}
