//! Repository traits for data access
//!
//! These traits define the interface for data access operations.
//! Implementations are in infra/storage/repositories.rs

use crate::contract::{
    Address, AddressFields, Category, Credentials, NewOrder, NewProduct, NewStore, NewUser, Order,
    Product, ProductPhoto, ProductSnapshot, Store, User,
};
use anyhow::Result;
use async_trait::async_trait;
use rust_decimal::Decimal;
use std::sync::Arc;

/// Raised by repositories (wrapped in `anyhow::Error`) when a unique index
/// rejects a write
#[derive(Debug, thiserror::Error)]
#[error("unique constraint violated: {0}")]
pub struct UniqueViolation(pub String);

/// True when the error chain carries a [`UniqueViolation`]
pub fn is_unique_violation(error: &anyhow::Error) -> bool {
    error.downcast_ref::<UniqueViolation>().is_some()
}

/// Builds the store that is provisioned together with a user, once the
/// user's id is known
pub type StoreProvisioner = dyn Fn(&User) -> NewStore + Send + Sync;

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a user and its store in one transaction
    async fn create_with_store(
        &self,
        user: &NewUser,
        provision: &StoreProvisioner,
    ) -> Result<(User, Store)>;

    async fn find_by_id(&self, id: i32) -> Result<Option<User>>;

    async fn find_credentials_by_email(&self, email: &str) -> Result<Option<Credentials>>;

    /// True when a user with this email or any administrator exists
    async fn admin_exists(&self, email: &str) -> Result<bool>;

    /// Persist profile fields, replacing the hash when one is supplied
    async fn update(&self, user: &User, password_hash: Option<&str>) -> Result<User>;
}

#[async_trait]
pub trait StoreRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> Result<Option<Store>>;

    async fn find_by_user(&self, user_id: i32) -> Result<Option<Store>>;

    /// Page of stores with an optional case-insensitive name filter, plus the total count
    async fn list(&self, name: Option<&str>, limit: u64, offset: u64) -> Result<(Vec<Store>, u64)>;

    async fn create(&self, store: &NewStore) -> Result<Store>;

    async fn update(&self, store: &Store) -> Result<Store>;
}

#[async_trait]
pub trait CategoryRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Category>>;

    async fn find_by_id(&self, id: i32) -> Result<Option<Category>>;

    async fn create(&self, name: &str) -> Result<Category>;

    async fn update(&self, category: &Category) -> Result<Category>;

    async fn soft_delete(&self, id: i32) -> Result<()>;
}

/// Product list filters, already parsed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilter {
    pub name: Option<String>,
    pub category_id: Option<i32>,
    pub store_id: Option<i32>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
}

#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Page of products with their photos, plus the total count
    async fn list(
        &self,
        filter: &ProductFilter,
        limit: u64,
        offset: u64,
    ) -> Result<(Vec<Product>, u64)>;

    /// Product with its photos
    async fn find_by_id(&self, id: i32) -> Result<Option<Product>>;

    /// Resolve ownership through the store that holds the product
    async fn is_owned_by(&self, product_id: i32, user_id: i32) -> Result<bool>;

    async fn create(&self, product: &NewProduct) -> Result<Product>;

    async fn update(&self, product: &Product) -> Result<Product>;

    async fn delete(&self, id: i32) -> Result<()>;
}

#[async_trait]
pub trait PhotoRepository: Send + Sync {
    async fn add(&self, product_id: i32, url: &str) -> Result<ProductPhoto>;

    /// Insert every url in one transaction
    async fn add_many(&self, product_id: i32, urls: &[String]) -> Result<Vec<ProductPhoto>>;

    async fn find_by_id(&self, id: i32) -> Result<Option<ProductPhoto>>;

    async fn list_by_product(&self, product_id: i32) -> Result<Vec<ProductPhoto>>;

    /// Resolve ownership through photo -> product -> store -> user
    async fn is_owned_by(&self, photo_id: i32, user_id: i32) -> Result<bool>;

    async fn delete(&self, id: i32) -> Result<()>;
}

#[async_trait]
pub trait AddressRepository: Send + Sync {
    async fn list_by_user(&self, user_id: i32) -> Result<Vec<Address>>;

    async fn find(&self, id: i32, user_id: i32) -> Result<Option<Address>>;

    async fn create(&self, user_id: i32, fields: &AddressFields) -> Result<Address>;

    async fn update(&self, address: &Address) -> Result<Address>;

    /// Returns false when nothing matched `(id, user_id)`
    async fn delete(&self, id: i32, user_id: i32) -> Result<bool>;
}

/// Committed order plus the product rows as they were re-read inside the
/// transaction, aligned with `order.lines`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommittedOrder {
    pub order: Order,
    pub line_products: Vec<Product>,
}

/// Failure modes of the atomic order commit
#[derive(Debug, thiserror::Error)]
pub enum OrderCommitError {
    #[error("insufficient stock for product {product_id} ({name})")]
    InsufficientStock { product_id: i32, name: String },

    #[error("product {0} disappeared during commit")]
    ProductMissing(i32),

    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Orders of a user, newest first, with lines, products and photos
    async fn list_by_user(
        &self,
        user_id: i32,
        limit: u64,
        offset: u64,
    ) -> Result<(Vec<Order>, u64)>;

    async fn find(&self, id: i32, user_id: i32) -> Result<Option<Order>>;

    /// Insert the order and its lines and decrement stock, all or nothing
    async fn commit(
        &self,
        order: &NewOrder,
    ) -> std::result::Result<CommittedOrder, OrderCommitError>;
}

#[async_trait]
pub trait SnapshotRepository: Send + Sync {
    async fn record(&self, product: &Product) -> Result<ProductSnapshot>;

    async fn list_by_product(&self, product_id: i32) -> Result<Vec<ProductSnapshot>>;

    async fn list_by_store(&self, store_id: i32) -> Result<Vec<ProductSnapshot>>;
}

/// Every repository the services need, injected at construction time
#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub stores: Arc<dyn StoreRepository>,
    pub categories: Arc<dyn CategoryRepository>,
    pub products: Arc<dyn ProductRepository>,
    pub photos: Arc<dyn PhotoRepository>,
    pub addresses: Arc<dyn AddressRepository>,
    pub orders: Arc<dyn OrderRepository>,
    pub snapshots: Arc<dyn SnapshotRepository>,
}
