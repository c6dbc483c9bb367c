//! Apps table migration

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Apps::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Apps::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Apps::AppName).string().not_null())
                    .col(ColumnDef::new(Apps::Description).text().not_null())
                    .col(ColumnDef::new(Apps::Category).string())
                    .col(ColumnDef::new(Apps::CategoryKo).string())
                    .col(ColumnDef::new(Apps::InstallsNumeric).big_integer())
                    .col(ColumnDef::new(Apps::CreatedAt).timestamp().not_null())
                    .col(ColumnDef::new(Apps::UpdatedAt).timestamp().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_apps_category")
                    .table(Apps::Table)
                    .col(Apps::Category)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Apps::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Apps {
    Table,
    Id,
    AppName,
    Description,
    Category,
    CategoryKo,
    InstallsNumeric,
    CreatedAt,
    UpdatedAt,
}
