//! Database migrations for the marketplace service

use sea_orm_migration::prelude::*;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250101_000001_create_users_and_stores::Migration),
            Box::new(m20250101_000002_create_addresses::Migration),
            Box::new(m20250101_000003_create_catalog::Migration),
            Box::new(m20250101_000004_create_orders::Migration),
            Box::new(m20250101_000005_create_product_snapshots::Migration),
        ]
    }
}

fn id_column<T: IntoIden>(iden: T) -> ColumnDef {
    ColumnDef::new(iden)
        .integer()
        .not_null()
        .auto_increment()
        .primary_key()
        .to_owned()
}

fn timestamp_column<T: IntoIden>(iden: T) -> ColumnDef {
    ColumnDef::new(iden)
        .timestamp_with_time_zone()
        .not_null()
        .default(Expr::current_timestamp())
        .to_owned()
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
    Name,
    Email,
    PasswordHash,
    Phone,
    BirthDate,
    Gender,
    About,
    Occupation,
    ProvinceId,
    CityId,
    IsAdmin,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Stores {
    Table,
    Id,
    UserId,
    Name,
    Slug,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Products {
    Table,
    Id,
    StoreId,
    CategoryId,
    Name,
    Slug,
    ResellerPrice,
    ConsumerPrice,
    Stock,
    Description,
    CreatedAt,
    UpdatedAt,
    DeletedAt,
}

#[derive(DeriveIden)]
enum Orders {
    Table,
    Id,
    UserId,
    AddressId,
    TotalPrice,
    InvoiceCode,
    PaymentMethod,
    CreatedAt,
    UpdatedAt,
    DeletedAt,
}

mod m20250101_000001_create_users_and_stores {
    use super::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250101_000001_create_users_and_stores"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Users::Table)
                        .if_not_exists()
                        .col(id_column(Users::Id))
                        .col(ColumnDef::new(Users::Name).string().not_null())
                        .col(ColumnDef::new(Users::Email).string().not_null().unique_key())
                        .col(ColumnDef::new(Users::PasswordHash).string().not_null())
                        .col(ColumnDef::new(Users::Phone).string().not_null().unique_key())
                        .col(ColumnDef::new(Users::BirthDate).date().not_null())
                        .col(ColumnDef::new(Users::Gender).string().not_null())
                        .col(ColumnDef::new(Users::About).text())
                        .col(ColumnDef::new(Users::Occupation).string().not_null())
                        .col(ColumnDef::new(Users::ProvinceId).string().not_null())
                        .col(ColumnDef::new(Users::CityId).string().not_null())
                        .col(
                            ColumnDef::new(Users::IsAdmin)
                                .boolean()
                                .not_null()
                                .default(false),
                        )
                        .col(timestamp_column(Users::CreatedAt))
                        .col(timestamp_column(Users::UpdatedAt))
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(Stores::Table)
                        .if_not_exists()
                        .col(id_column(Stores::Id))
                        .col(ColumnDef::new(Stores::UserId).integer().not_null().unique_key())
                        .col(ColumnDef::new(Stores::Name).string().not_null())
                        .col(ColumnDef::new(Stores::Slug).string().not_null())
                        .col(timestamp_column(Stores::CreatedAt))
                        .col(timestamp_column(Stores::UpdatedAt))
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_stores_user")
                                .from(Stores::Table, Stores::UserId)
                                .to(Users::Table, Users::Id)
                                .on_delete(ForeignKeyAction::Restrict),
                        )
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Stores::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Users::Table).to_owned())
                .await
        }
    }
}

mod m20250101_000002_create_addresses {
    use super::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250101_000002_create_addresses"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Addresses::Table)
                        .if_not_exists()
                        .col(id_column(Addresses::Id))
                        .col(ColumnDef::new(Addresses::UserId).integer().not_null())
                        .col(ColumnDef::new(Addresses::Title).string().not_null())
                        .col(ColumnDef::new(Addresses::RecipientName).string().not_null())
                        .col(ColumnDef::new(Addresses::Phone).string().not_null())
                        .col(ColumnDef::new(Addresses::Detail).text().not_null())
                        .col(timestamp_column(Addresses::CreatedAt))
                        .col(timestamp_column(Addresses::UpdatedAt))
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_addresses_user")
                                .from(Addresses::Table, Addresses::UserId)
                                .to(Users::Table, Users::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_addresses_user")
                        .table(Addresses::Table)
                        .col(Addresses::UserId)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Addresses::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum Addresses {
        Table,
        Id,
        UserId,
        Title,
        RecipientName,
        Phone,
        Detail,
        CreatedAt,
        UpdatedAt,
    }
}

mod m20250101_000003_create_catalog {
    use super::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250101_000003_create_catalog"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Categories::Table)
                        .if_not_exists()
                        .col(id_column(Categories::Id))
                        .col(ColumnDef::new(Categories::Name).string().not_null())
                        .col(timestamp_column(Categories::CreatedAt))
                        .col(timestamp_column(Categories::UpdatedAt))
                        .col(ColumnDef::new(Categories::DeletedAt).timestamp_with_time_zone())
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(Products::Table)
                        .if_not_exists()
                        .col(id_column(Products::Id))
                        .col(ColumnDef::new(Products::StoreId).integer().not_null())
                        .col(ColumnDef::new(Products::CategoryId).integer().not_null())
                        .col(ColumnDef::new(Products::Name).string().not_null())
                        .col(ColumnDef::new(Products::Slug).string().not_null())
                        .col(ColumnDef::new(Products::ResellerPrice).string().not_null())
                        .col(ColumnDef::new(Products::ConsumerPrice).string().not_null())
                        .col(ColumnDef::new(Products::Stock).integer().not_null().default(0))
                        .col(ColumnDef::new(Products::Description).text().not_null())
                        .col(timestamp_column(Products::CreatedAt))
                        .col(timestamp_column(Products::UpdatedAt))
                        .col(ColumnDef::new(Products::DeletedAt).timestamp_with_time_zone())
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_products_store")
                                .from(Products::Table, Products::StoreId)
                                .to(Stores::Table, Stores::Id)
                                .on_delete(ForeignKeyAction::Restrict),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_products_category")
                                .from(Products::Table, Products::CategoryId)
                                .to(Categories::Table, Categories::Id)
                                .on_delete(ForeignKeyAction::Restrict),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_products_store")
                        .table(Products::Table)
                        .col(Products::StoreId)
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(ProductPhotos::Table)
                        .if_not_exists()
                        .col(id_column(ProductPhotos::Id))
                        .col(ColumnDef::new(ProductPhotos::ProductId).integer().not_null())
                        .col(ColumnDef::new(ProductPhotos::Url).string().not_null())
                        .col(timestamp_column(ProductPhotos::CreatedAt))
                        .col(timestamp_column(ProductPhotos::UpdatedAt))
                        .col(ColumnDef::new(ProductPhotos::DeletedAt).timestamp_with_time_zone())
                        // Photos go with their product
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_product_photos_product")
                                .from(ProductPhotos::Table, ProductPhotos::ProductId)
                                .to(Products::Table, Products::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(ProductPhotos::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Products::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Categories::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum Categories {
        Table,
        Id,
        Name,
        CreatedAt,
        UpdatedAt,
        DeletedAt,
    }

    #[derive(DeriveIden)]
    enum ProductPhotos {
        Table,
        Id,
        ProductId,
        Url,
        CreatedAt,
        UpdatedAt,
        DeletedAt,
    }
}

mod m20250101_000004_create_orders {
    use super::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250101_000004_create_orders"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Orders::Table)
                        .if_not_exists()
                        .col(id_column(Orders::Id))
                        .col(ColumnDef::new(Orders::UserId).integer().not_null())
                        .col(ColumnDef::new(Orders::AddressId).integer().not_null())
                        .col(ColumnDef::new(Orders::TotalPrice).big_integer().not_null())
                        .col(
                            ColumnDef::new(Orders::InvoiceCode)
                                .string()
                                .not_null()
                                .unique_key(),
                        )
                        .col(ColumnDef::new(Orders::PaymentMethod).string().not_null())
                        .col(timestamp_column(Orders::CreatedAt))
                        .col(timestamp_column(Orders::UpdatedAt))
                        .col(ColumnDef::new(Orders::DeletedAt).timestamp_with_time_zone())
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_orders_user")
                                .from(Orders::Table, Orders::UserId)
                                .to(Users::Table, Users::Id)
                                .on_delete(ForeignKeyAction::Restrict),
                        )
                        .to_owned(),
                )
                .await?;

            // product_id is not a foreign key: lines outlive deleted products
            manager
                .create_table(
                    Table::create()
                        .table(OrderLines::Table)
                        .if_not_exists()
                        .col(id_column(OrderLines::Id))
                        .col(ColumnDef::new(OrderLines::OrderId).integer().not_null())
                        .col(ColumnDef::new(OrderLines::ProductId).integer().not_null())
                        .col(ColumnDef::new(OrderLines::Quantity).integer().not_null())
                        .col(ColumnDef::new(OrderLines::TotalPrice).big_integer().not_null())
                        .col(timestamp_column(OrderLines::CreatedAt))
                        .col(timestamp_column(OrderLines::UpdatedAt))
                        .col(ColumnDef::new(OrderLines::DeletedAt).timestamp_with_time_zone())
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_order_lines_order")
                                .from(OrderLines::Table, OrderLines::OrderId)
                                .to(Orders::Table, Orders::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_orders_user_created")
                        .table(Orders::Table)
                        .col(Orders::UserId)
                        .col(Orders::CreatedAt)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(OrderLines::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Orders::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum OrderLines {
        Table,
        Id,
        OrderId,
        ProductId,
        Quantity,
        TotalPrice,
        CreatedAt,
        UpdatedAt,
        DeletedAt,
    }
}

mod m20250101_000005_create_product_snapshots {
    use super::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250101_000005_create_product_snapshots"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(ProductSnapshots::Table)
                        .if_not_exists()
                        .col(id_column(ProductSnapshots::Id))
                        .col(ColumnDef::new(ProductSnapshots::ProductId).integer().not_null())
                        .col(ColumnDef::new(ProductSnapshots::StoreId).integer().not_null())
                        .col(ColumnDef::new(ProductSnapshots::CategoryId).integer().not_null())
                        .col(ColumnDef::new(ProductSnapshots::Name).string().not_null())
                        .col(ColumnDef::new(ProductSnapshots::Slug).string().not_null())
                        .col(ColumnDef::new(ProductSnapshots::ResellerPrice).string().not_null())
                        .col(ColumnDef::new(ProductSnapshots::ConsumerPrice).string().not_null())
                        .col(ColumnDef::new(ProductSnapshots::Description).text().not_null())
                        .col(timestamp_column(ProductSnapshots::CreatedAt))
                        .col(ColumnDef::new(ProductSnapshots::DeletedAt).timestamp_with_time_zone())
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_product_snapshots_product")
                        .table(ProductSnapshots::Table)
                        .col(ProductSnapshots::ProductId)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(ProductSnapshots::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum ProductSnapshots {
        Table,
        Id,
        ProductId,
        StoreId,
        CategoryId,
        Name,
        Slug,
        ResellerPrice,
        ConsumerPrice,
        Description,
        CreatedAt,
        DeletedAt,
    }
}
