//! Catalog storage layer
//!
//! SeaORM-backed persistence for app records. The catalog is the
//! long-lived owner of all records; the resolver only reads and
//! upserts through the [`CatalogStore`] seam.

pub mod entities;
pub mod migration;

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectOptions, Database, DatabaseConnection, EntityTrait,
    QueryFilter, Set,
};
use sea_orm_migration::MigratorTrait;
use tracing::{debug, info, warn};

use crate::config::DatabaseConfig;
use crate::core::record::AppRecord;
use crate::core::traits::CatalogStore;
use crate::utils::error::Result;
use entities::app;
use migration::Migrator;

/// One row of an offline catalog import (see `import-apps`).
#[derive(Debug, Clone)]
pub struct ImportRecord {
    /// Package name (row key)
    pub package_name: String,
    /// Display name
    pub app_name: String,
    /// Store description
    pub description: String,
    /// Store category code
    pub category: Option<String>,
    /// Localized category label
    pub category_ko: Option<String>,
    /// Normalized install count
    pub installs_numeric: i64,
}

/// SeaORM-backed app catalog
#[derive(Debug, Clone)]
pub struct Catalog {
    db: DatabaseConnection,
}

impl Catalog {
    /// Open a connection pool against the configured database
    pub async fn new(config: &DatabaseConfig) -> Result<Self> {
        let mut opt = ConnectOptions::new(config.url.clone());
        opt.max_connections(config.max_connections)
            .min_connections(1)
            .connect_timeout(Duration::from_secs(config.connection_timeout))
            .acquire_timeout(Duration::from_secs(30))
            .sqlx_logging(true)
            .sqlx_logging_level(log::LevelFilter::Debug);

        let db = Database::connect(opt).await?;

        info!("Catalog database connection established");
        Ok(Self { db })
    }

    /// Run database migrations
    pub async fn migrate(&self) -> Result<()> {
        info!("Running catalog migrations...");
        Migrator::up(&self.db, None).await.map_err(|e| {
            warn!("Migration failed: {}", e);
            e
        })?;
        info!("Catalog migrations completed");
        Ok(())
    }

    /// Bulk-upsert a batch of imported rows in one statement.
    ///
    /// Unlike [`CatalogStore::upsert`], the import path fully
    /// overwrites existing rows: the CSV export is the authoritative
    /// seed and replaces whatever the catalog held before.
    pub async fn import_batch(&self, rows: &[ImportRecord]) -> Result<()> {
        if rows.is_empty() {
            return Ok(());
        }

        let now = Utc::now();
        let models: Vec<app::ActiveModel> = rows
            .iter()
            .map(|row| app::ActiveModel {
                id: Set(row.package_name.clone()),
                app_name: Set(row.app_name.clone()),
                description: Set(row.description.clone()),
                category: Set(row.category.clone()),
                category_ko: Set(row.category_ko.clone()),
                installs_numeric: Set(Some(row.installs_numeric)),
                created_at: Set(now),
                updated_at: Set(now),
            })
            .collect();

        app::Entity::insert_many(models)
            .on_conflict(
                OnConflict::column(app::Column::Id)
                    .update_columns([
                        app::Column::AppName,
                        app::Column::Description,
                        app::Column::Category,
                        app::Column::CategoryKo,
                        app::Column::InstallsNumeric,
                        app::Column::UpdatedAt,
                    ])
                    .to_owned(),
            )
            .exec(&self.db)
            .await?;

        debug!("Imported batch of {} rows", rows.len());
        Ok(())
    }
}

#[async_trait]
impl CatalogStore for Catalog {
    async fn batch_get(&self, package_names: &[String]) -> Result<HashMap<String, AppRecord>> {
        if package_names.is_empty() {
            return Ok(HashMap::new());
        }

        let rows = app::Entity::find()
            .filter(app::Column::Id.is_in(package_names.iter().cloned()))
            .all(&self.db)
            .await?;

        debug!(
            "Fetched {} of {} requested records from the catalog",
            rows.len(),
            package_names.len()
        );

        Ok(rows
            .into_iter()
            .map(|model| (model.id.clone(), model.into_record()))
            .collect())
    }

    async fn upsert(&self, record: &AppRecord) -> Result<()> {
        let now = Utc::now();

        match app::Entity::find_by_id(record.package_name.clone())
            .one(&self.db)
            .await?
        {
            Some(existing) => {
                let mut active: app::ActiveModel = existing.into();
                active.app_name = Set(record.app_name.clone());
                active.description = Set(record.description.clone());
                // Optional fields merge: a None on the incoming record
                // keeps the stored value.
                if record.category.is_some() {
                    active.category = Set(record.category.clone());
                }
                if record.category_ko.is_some() {
                    active.category_ko = Set(record.category_ko.clone());
                }
                active.updated_at = Set(now);
                active.update(&self.db).await?;
            }
            None => {
                let active = app::ActiveModel {
                    id: Set(record.package_name.clone()),
                    app_name: Set(record.app_name.clone()),
                    description: Set(record.description.clone()),
                    category: Set(record.category.clone()),
                    category_ko: Set(record.category_ko.clone()),
                    installs_numeric: Set(None),
                    created_at: Set(now),
                    updated_at: Set(now),
                };
                active.insert(&self.db).await?;
            }
        }

        debug!("Record for {} upserted into catalog", record.package_name);
        Ok(())
    }
}
