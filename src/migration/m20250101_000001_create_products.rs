use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Products::Table)
                    .if_not_exists()
                    .col(pk_auto(Products::Id))
                    .col(string(Products::NameMm))
                    .col(string(Products::NameEn))
                    .col(double(Products::Price).default(0.0))
                    .col(string_null(Products::Image))
                    .col(text_null(Products::ShortDescMm))
                    .col(text_null(Products::DescMm))
                    .col(boolean(Products::IsActive).default(true))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Products::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Products {
    Table,
    Id,
    NameMm,
    NameEn,
    Price,
    Image,
    ShortDescMm,
    DescMm,
    IsActive,
}
