//! Storage layer - database entities and repositories

pub mod entity;
pub mod mapper;
pub mod migrations;
pub mod repositories;

use crate::domain::Repositories;
use repositories::*;
use sea_orm::DatabaseConnection;
use std::sync::Arc;

/// Wire every SeaORM repository to one connection pool
pub fn sea_orm_repositories(db: Arc<DatabaseConnection>) -> Repositories {
    Repositories {
        users: Arc::new(SeaOrmUserRepository::new(db.clone())),
        stores: Arc::new(SeaOrmStoreRepository::new(db.clone())),
        categories: Arc::new(SeaOrmCategoryRepository::new(db.clone())),
        products: Arc::new(SeaOrmProductRepository::new(db.clone())),
        photos: Arc::new(SeaOrmPhotoRepository::new(db.clone())),
        addresses: Arc::new(SeaOrmAddressRepository::new(db.clone())),
        orders: Arc::new(SeaOrmOrderRepository::new(db.clone())),
        snapshots: Arc::new(SeaOrmSnapshotRepository::new(db)),
    }
}
