//! SeaORM repository implementations

use crate::contract::{
    Address, AddressFields, Category, Credentials, NewOrder, NewProduct, NewStore, NewUser, Order,
    OrderLine, Product, ProductPhoto, ProductSnapshot, Store, User,
};
use crate::domain::repository::{
    AddressRepository, CategoryRepository, CommittedOrder, OrderCommitError, OrderRepository,
    PhotoRepository, ProductFilter, ProductRepository, SnapshotRepository, StoreProvisioner,
    StoreRepository, UniqueViolation, UserRepository,
};
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::{Alias, Func, SimpleExpr};
use sea_orm::{
    prelude::Expr,
    ActiveModelTrait,
    ActiveValue::{NotSet, Set},
    ColumnTrait, Condition, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait, JoinType,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, RelationTrait, SqlErr, TransactionTrait,
};
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

use super::entity;

/// Surface unique-index rejections as [`UniqueViolation`]
fn classify(err: DbErr) -> anyhow::Error {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(detail)) => {
            anyhow::Error::new(UniqueViolation(detail))
        }
        _ => err.into(),
    }
}

fn invoice_code(order_id: i32) -> String {
    format!("INV-{:06}", order_id)
}

/// Attach live photos to each product
async fn load_photos<C: ConnectionTrait>(
    db: &C,
    mut products: Vec<Product>,
) -> Result<Vec<Product>> {
    if products.is_empty() {
        return Ok(products);
    }
    let ids: Vec<i32> = products.iter().map(|p| p.id).collect();
    let photos = entity::product_photo::Entity::find()
        .filter(entity::product_photo::Column::ProductId.is_in(ids))
        .filter(entity::product_photo::Column::DeletedAt.is_null())
        .order_by_asc(entity::product_photo::Column::Id)
        .all(db)
        .await?;

    let mut grouped: HashMap<i32, Vec<ProductPhoto>> = HashMap::new();
    for photo in photos {
        grouped.entry(photo.product_id).or_default().push(photo.into());
    }
    for product in &mut products {
        product.photos = grouped.remove(&product.id).unwrap_or_default();
    }
    Ok(products)
}

/// Attach lines, their products and the products' photos to each order
async fn load_order_details<C: ConnectionTrait>(
    db: &C,
    orders: Vec<entity::order::Model>,
) -> Result<Vec<Order>> {
    let mut orders: Vec<Order> = orders.into_iter().map(Order::from).collect();
    if orders.is_empty() {
        return Ok(orders);
    }

    let order_ids: Vec<i32> = orders.iter().map(|o| o.id).collect();
    let lines = entity::order_line::Entity::find()
        .filter(entity::order_line::Column::OrderId.is_in(order_ids))
        .filter(entity::order_line::Column::DeletedAt.is_null())
        .order_by_asc(entity::order_line::Column::Id)
        .all(db)
        .await?;

    let mut product_ids: Vec<i32> = lines.iter().map(|l| l.product_id).collect();
    product_ids.sort_unstable();
    product_ids.dedup();
    let products = entity::product::Entity::find()
        .filter(entity::product::Column::Id.is_in(product_ids))
        .all(db)
        .await?;
    let products = load_photos(db, products.into_iter().map(Product::from).collect()).await?;
    let products: HashMap<i32, Product> = products.into_iter().map(|p| (p.id, p)).collect();

    let mut grouped: HashMap<i32, Vec<OrderLine>> = HashMap::new();
    for line in lines {
        let mut line = OrderLine::from(line);
        line.product = products.get(&line.product_id).cloned();
        grouped.entry(line.order_id).or_default().push(line);
    }
    for order in &mut orders {
        order.lines = grouped.remove(&order.id).unwrap_or_default();
    }
    Ok(orders)
}

// ===== Users =====

pub struct SeaOrmUserRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmUserRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for SeaOrmUserRepository {
    async fn create_with_store(
        &self,
        user: &NewUser,
        provision: &StoreProvisioner,
    ) -> Result<(User, Store)> {
        let txn = self.db.begin().await?;
        let now = Utc::now();

        let created = entity::user::ActiveModel {
            id: NotSet,
            name: Set(user.name.clone()),
            email: Set(user.email.clone()),
            password_hash: Set(user.password_hash.clone()),
            phone: Set(user.phone.clone()),
            birth_date: Set(user.birth_date),
            gender: Set(user.gender.clone()),
            about: Set(user.about.clone()),
            occupation: Set(user.occupation.clone()),
            province_id: Set(user.province_id.clone()),
            city_id: Set(user.city_id.clone()),
            is_admin: Set(user.is_admin),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&txn)
        .await
        .map_err(classify)?;
        let created = User::from(created);

        let store = provision(&created);
        let store = entity::store::ActiveModel {
            id: NotSet,
            user_id: Set(created.id),
            name: Set(store.name),
            slug: Set(store.slug),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&txn)
        .await
        .map_err(classify)?;

        // Dropping the transaction on any early return rolls back both rows
        txn.commit().await?;
        Ok((created, store.into()))
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<User>> {
        let result = entity::user::Entity::find_by_id(id).one(&*self.db).await?;
        Ok(result.map(User::from))
    }

    async fn find_credentials_by_email(&self, email: &str) -> Result<Option<Credentials>> {
        let result = entity::user::Entity::find()
            .filter(entity::user::Column::Email.eq(email))
            .one(&*self.db)
            .await?;
        Ok(result.as_ref().map(Credentials::from))
    }

    async fn admin_exists(&self, email: &str) -> Result<bool> {
        let count = entity::user::Entity::find()
            .filter(
                Condition::any()
                    .add(entity::user::Column::Email.eq(email))
                    .add(entity::user::Column::IsAdmin.eq(true)),
            )
            .count(&*self.db)
            .await?;
        Ok(count > 0)
    }

    async fn update(&self, user: &User, password_hash: Option<&str>) -> Result<User> {
        let existing = entity::user::Entity::find_by_id(user.id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| anyhow!("user {} not found", user.id))?;

        let mut active: entity::user::ActiveModel = existing.into();
        active.name = Set(user.name.clone());
        active.email = Set(user.email.clone());
        active.phone = Set(user.phone.clone());
        active.birth_date = Set(user.birth_date);
        active.gender = Set(user.gender.clone());
        active.about = Set(user.about.clone());
        active.occupation = Set(user.occupation.clone());
        active.province_id = Set(user.province_id.clone());
        active.city_id = Set(user.city_id.clone());
        if let Some(hash) = password_hash {
            active.password_hash = Set(hash.to_string());
        }
        active.updated_at = Set(Utc::now());

        let updated = active.update(&*self.db).await.map_err(classify)?;
        Ok(updated.into())
    }
}

// ===== Stores =====

pub struct SeaOrmStoreRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmStoreRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl StoreRepository for SeaOrmStoreRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<Store>> {
        let result = entity::store::Entity::find_by_id(id).one(&*self.db).await?;
        Ok(result.map(Store::from))
    }

    async fn find_by_user(&self, user_id: i32) -> Result<Option<Store>> {
        let result = entity::store::Entity::find()
            .filter(entity::store::Column::UserId.eq(user_id))
            .one(&*self.db)
            .await?;
        Ok(result.map(Store::from))
    }

    async fn list(&self, name: Option<&str>, limit: u64, offset: u64) -> Result<(Vec<Store>, u64)> {
        let mut query = entity::store::Entity::find();
        if let Some(name) = name {
            query = query.filter(
                Expr::expr(Func::lower(Expr::col(entity::store::Column::Name)))
                    .like(format!("%{}%", name.to_lowercase())),
            );
        }

        let total = query.clone().count(&*self.db).await?;
        let results = query
            .order_by_asc(entity::store::Column::Id)
            .offset(offset)
            .limit(limit)
            .all(&*self.db)
            .await?;

        Ok((results.into_iter().map(Store::from).collect(), total))
    }

    async fn create(&self, store: &NewStore) -> Result<Store> {
        let now = Utc::now();
        let created = entity::store::ActiveModel {
            id: NotSet,
            user_id: Set(store.user_id),
            name: Set(store.name.clone()),
            slug: Set(store.slug.clone()),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&*self.db)
        .await
        .map_err(classify)?;
        Ok(created.into())
    }

    async fn update(&self, store: &Store) -> Result<Store> {
        let existing = entity::store::Entity::find_by_id(store.id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| anyhow!("store {} not found", store.id))?;

        let mut active: entity::store::ActiveModel = existing.into();
        active.name = Set(store.name.clone());
        active.slug = Set(store.slug.clone());
        active.updated_at = Set(Utc::now());
        let updated = active.update(&*self.db).await?;
        Ok(updated.into())
    }
}

// ===== Categories =====

pub struct SeaOrmCategoryRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmCategoryRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CategoryRepository for SeaOrmCategoryRepository {
    async fn list(&self) -> Result<Vec<Category>> {
        let results = entity::category::Entity::find()
            .filter(entity::category::Column::DeletedAt.is_null())
            .order_by_asc(entity::category::Column::Id)
            .all(&*self.db)
            .await?;
        Ok(results.into_iter().map(Category::from).collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Category>> {
        let result = entity::category::Entity::find_by_id(id)
            .filter(entity::category::Column::DeletedAt.is_null())
            .one(&*self.db)
            .await?;
        Ok(result.map(Category::from))
    }

    async fn create(&self, name: &str) -> Result<Category> {
        let now = Utc::now();
        let created = entity::category::ActiveModel {
            id: NotSet,
            name: Set(name.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            deleted_at: Set(None),
        }
        .insert(&*self.db)
        .await?;
        Ok(created.into())
    }

    async fn update(&self, category: &Category) -> Result<Category> {
        let existing = entity::category::Entity::find_by_id(category.id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| anyhow!("category {} not found", category.id))?;

        let mut active: entity::category::ActiveModel = existing.into();
        active.name = Set(category.name.clone());
        active.updated_at = Set(Utc::now());
        let updated = active.update(&*self.db).await?;
        Ok(updated.into())
    }

    async fn soft_delete(&self, id: i32) -> Result<()> {
        entity::category::Entity::update_many()
            .col_expr(entity::category::Column::DeletedAt, Expr::value(Utc::now()))
            .filter(entity::category::Column::Id.eq(id))
            .filter(entity::category::Column::DeletedAt.is_null())
            .exec(&*self.db)
            .await?;
        Ok(())
    }
}

// ===== Products =====

pub struct SeaOrmProductRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmProductRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

/// Text price cast to a number for range filters
fn consumer_price_numeric() -> SimpleExpr {
    Func::cast_as(
        Expr::col(entity::product::Column::ConsumerPrice),
        Alias::new("NUMERIC"),
    )
    .into()
}

#[async_trait]
impl ProductRepository for SeaOrmProductRepository {
    async fn list(
        &self,
        filter: &ProductFilter,
        limit: u64,
        offset: u64,
    ) -> Result<(Vec<Product>, u64)> {
        let mut query = entity::product::Entity::find()
            .filter(entity::product::Column::DeletedAt.is_null());

        if let Some(name) = &filter.name {
            query = query.filter(entity::product::Column::Name.contains(name.as_str()));
        }
        if let Some(category_id) = filter.category_id {
            query = query.filter(entity::product::Column::CategoryId.eq(category_id));
        }
        if let Some(store_id) = filter.store_id {
            query = query.filter(entity::product::Column::StoreId.eq(store_id));
        }
        if let Some(min) = filter.min_price {
            query = query.filter(Expr::expr(consumer_price_numeric()).gte(min));
        }
        if let Some(max) = filter.max_price {
            query = query.filter(Expr::expr(consumer_price_numeric()).lte(max));
        }

        let total = query.clone().count(&*self.db).await?;
        let results = query
            .order_by_asc(entity::product::Column::Id)
            .offset(offset)
            .limit(limit)
            .all(&*self.db)
            .await?;

        let products =
            load_photos(&*self.db, results.into_iter().map(Product::from).collect()).await?;
        Ok((products, total))
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Product>> {
        let result = entity::product::Entity::find_by_id(id)
            .filter(entity::product::Column::DeletedAt.is_null())
            .one(&*self.db)
            .await?;
        match result {
            Some(model) => Ok(load_photos(&*self.db, vec![model.into()]).await?.pop()),
            None => Ok(None),
        }
    }

    async fn is_owned_by(&self, product_id: i32, user_id: i32) -> Result<bool> {
        let count = entity::product::Entity::find()
            .inner_join(entity::store::Entity)
            .filter(entity::product::Column::Id.eq(product_id))
            .filter(entity::store::Column::UserId.eq(user_id))
            .count(&*self.db)
            .await?;
        Ok(count > 0)
    }

    async fn create(&self, product: &NewProduct) -> Result<Product> {
        let active: entity::product::ActiveModel = product.into();
        let created = active.insert(&*self.db).await?;
        Ok(created.into())
    }

    async fn update(&self, product: &Product) -> Result<Product> {
        let existing = entity::product::Entity::find_by_id(product.id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| anyhow!("product {} not found", product.id))?;

        let mut active: entity::product::ActiveModel = existing.into();
        active.category_id = Set(product.category_id);
        active.name = Set(product.name.clone());
        active.slug = Set(product.slug.clone());
        active.reseller_price = Set(product.reseller_price.clone());
        active.consumer_price = Set(product.consumer_price.clone());
        active.stock = Set(product.stock);
        active.description = Set(product.description.clone());
        active.updated_at = Set(Utc::now());
        let updated = active.update(&*self.db).await?;

        let mut reloaded = load_photos(&*self.db, vec![updated.into()]).await?;
        reloaded
            .pop()
            .ok_or_else(|| anyhow!("product {} vanished after update", product.id))
    }

    async fn delete(&self, id: i32) -> Result<()> {
        entity::product::Entity::delete_by_id(id)
            .exec(&*self.db)
            .await?;
        Ok(())
    }
}

// ===== Photos =====

pub struct SeaOrmPhotoRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmPhotoRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

fn new_photo(product_id: i32, url: &str) -> entity::product_photo::ActiveModel {
    let now = Utc::now();
    entity::product_photo::ActiveModel {
        id: NotSet,
        product_id: Set(product_id),
        url: Set(url.to_string()),
        created_at: Set(now),
        updated_at: Set(now),
        deleted_at: Set(None),
    }
}

#[async_trait]
impl PhotoRepository for SeaOrmPhotoRepository {
    async fn add(&self, product_id: i32, url: &str) -> Result<ProductPhoto> {
        let created = new_photo(product_id, url).insert(&*self.db).await?;
        Ok(created.into())
    }

    async fn add_many(&self, product_id: i32, urls: &[String]) -> Result<Vec<ProductPhoto>> {
        let txn = self.db.begin().await?;
        let mut photos = Vec::with_capacity(urls.len());
        for url in urls {
            let created = new_photo(product_id, url).insert(&txn).await?;
            photos.push(created.into());
        }
        txn.commit().await?;
        Ok(photos)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<ProductPhoto>> {
        let result = entity::product_photo::Entity::find_by_id(id)
            .filter(entity::product_photo::Column::DeletedAt.is_null())
            .one(&*self.db)
            .await?;
        Ok(result.map(ProductPhoto::from))
    }

    async fn list_by_product(&self, product_id: i32) -> Result<Vec<ProductPhoto>> {
        let results = entity::product_photo::Entity::find()
            .filter(entity::product_photo::Column::ProductId.eq(product_id))
            .filter(entity::product_photo::Column::DeletedAt.is_null())
            .order_by_asc(entity::product_photo::Column::Id)
            .all(&*self.db)
            .await?;
        Ok(results.into_iter().map(ProductPhoto::from).collect())
    }

    async fn is_owned_by(&self, photo_id: i32, user_id: i32) -> Result<bool> {
        let count = entity::product_photo::Entity::find()
            .inner_join(entity::product::Entity)
            .join(JoinType::InnerJoin, entity::product::Relation::Store.def())
            .filter(entity::product_photo::Column::Id.eq(photo_id))
            .filter(entity::store::Column::UserId.eq(user_id))
            .count(&*self.db)
            .await?;
        Ok(count > 0)
    }

    async fn delete(&self, id: i32) -> Result<()> {
        entity::product_photo::Entity::update_many()
            .col_expr(entity::product_photo::Column::DeletedAt, Expr::value(Utc::now()))
            .filter(entity::product_photo::Column::Id.eq(id))
            .exec(&*self.db)
            .await?;
        Ok(())
    }
}

// ===== Addresses =====

pub struct SeaOrmAddressRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmAddressRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AddressRepository for SeaOrmAddressRepository {
    async fn list_by_user(&self, user_id: i32) -> Result<Vec<Address>> {
        let results = entity::address::Entity::find()
            .filter(entity::address::Column::UserId.eq(user_id))
            .order_by_asc(entity::address::Column::Id)
            .all(&*self.db)
            .await?;
        Ok(results.into_iter().map(Address::from).collect())
    }

    async fn find(&self, id: i32, user_id: i32) -> Result<Option<Address>> {
        let result = entity::address::Entity::find()
            .filter(entity::address::Column::Id.eq(id))
            .filter(entity::address::Column::UserId.eq(user_id))
            .one(&*self.db)
            .await?;
        Ok(result.map(Address::from))
    }

    async fn create(&self, user_id: i32, fields: &AddressFields) -> Result<Address> {
        let now = Utc::now();
        let created = entity::address::ActiveModel {
            id: NotSet,
            user_id: Set(user_id),
            title: Set(fields.title.clone()),
            recipient_name: Set(fields.recipient_name.clone()),
            phone: Set(fields.phone.clone()),
            detail: Set(fields.detail.clone()),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&*self.db)
        .await?;
        Ok(created.into())
    }

    async fn update(&self, address: &Address) -> Result<Address> {
        let existing = entity::address::Entity::find()
            .filter(entity::address::Column::Id.eq(address.id))
            .filter(entity::address::Column::UserId.eq(address.user_id))
            .one(&*self.db)
            .await?
            .ok_or_else(|| anyhow!("address {} not found", address.id))?;

        let mut active: entity::address::ActiveModel = existing.into();
        active.title = Set(address.title.clone());
        active.recipient_name = Set(address.recipient_name.clone());
        active.phone = Set(address.phone.clone());
        active.detail = Set(address.detail.clone());
        active.updated_at = Set(Utc::now());
        let updated = active.update(&*self.db).await?;
        Ok(updated.into())
    }

    async fn delete(&self, id: i32, user_id: i32) -> Result<bool> {
        let result = entity::address::Entity::delete_many()
            .filter(entity::address::Column::Id.eq(id))
            .filter(entity::address::Column::UserId.eq(user_id))
            .exec(&*self.db)
            .await?;
        Ok(result.rows_affected > 0)
    }
}

// ===== Orders =====

pub struct SeaOrmOrderRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmOrderRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

fn storage(err: DbErr) -> OrderCommitError {
    OrderCommitError::Storage(err.into())
}

#[async_trait]
impl OrderRepository for SeaOrmOrderRepository {
    async fn list_by_user(
        &self,
        user_id: i32,
        limit: u64,
        offset: u64,
    ) -> Result<(Vec<Order>, u64)> {
        let query = entity::order::Entity::find()
            .filter(entity::order::Column::UserId.eq(user_id))
            .filter(entity::order::Column::DeletedAt.is_null());

        let total = query.clone().count(&*self.db).await?;
        let results = query
            .order_by_desc(entity::order::Column::CreatedAt)
            .order_by_desc(entity::order::Column::Id)
            .offset(offset)
            .limit(limit)
            .all(&*self.db)
            .await?;

        let orders = load_order_details(&*self.db, results).await?;
        Ok((orders, total))
    }

    async fn find(&self, id: i32, user_id: i32) -> Result<Option<Order>> {
        let result = entity::order::Entity::find()
            .filter(entity::order::Column::Id.eq(id))
            .filter(entity::order::Column::UserId.eq(user_id))
            .filter(entity::order::Column::DeletedAt.is_null())
            .one(&*self.db)
            .await?;
        match result {
            Some(model) => Ok(load_order_details(&*self.db, vec![model]).await?.pop()),
            None => Ok(None),
        }
    }

    async fn commit(
        &self,
        order: &NewOrder,
    ) -> std::result::Result<CommittedOrder, OrderCommitError> {
        let txn = self.db.begin().await.map_err(storage)?;
        let now = Utc::now();

        // The invoice number is the row id, so the placeholder only has to be unique
        let inserted = entity::order::ActiveModel {
            id: NotSet,
            user_id: Set(order.user_id),
            address_id: Set(order.address_id),
            total_price: Set(order.total_price),
            invoice_code: Set(format!("PENDING-{}", Uuid::new_v4().simple())),
            payment_method: Set(order.payment_method.clone()),
            created_at: Set(now),
            updated_at: Set(now),
            deleted_at: Set(None),
        }
        .insert(&txn)
        .await
        .map_err(storage)?;
        let order_id = inserted.id;
        let mut active: entity::order::ActiveModel = inserted.into();
        active.invoice_code = Set(invoice_code(order_id));
        let saved = active.update(&txn).await.map_err(storage)?;

        let mut lines = Vec::with_capacity(order.lines.len());
        for line in &order.lines {
            let created = entity::order_line::ActiveModel {
                id: NotSet,
                order_id: Set(order_id),
                product_id: Set(line.product_id),
                quantity: Set(line.quantity),
                total_price: Set(line.total_price),
                created_at: Set(now),
                updated_at: Set(now),
                deleted_at: Set(None),
            }
            .insert(&txn)
            .await
            .map_err(storage)?;
            lines.push(OrderLine::from(created));
        }

        let mut line_products = Vec::with_capacity(order.lines.len());
        for line in &order.lines {
            let current = entity::product::Entity::find_by_id(line.product_id)
                .lock_exclusive()
                .one(&txn)
                .await
                .map_err(storage)?
                .ok_or(OrderCommitError::ProductMissing(line.product_id))?;
            if current.stock < line.quantity {
                return Err(OrderCommitError::InsufficientStock {
                    product_id: current.id,
                    name: current.name,
                });
            }

            // Guarded decrement: never lets stock go below zero
            let result = entity::product::Entity::update_many()
                .col_expr(
                    entity::product::Column::Stock,
                    Expr::col(entity::product::Column::Stock).sub(line.quantity),
                )
                .col_expr(entity::product::Column::UpdatedAt, Expr::value(now))
                .filter(entity::product::Column::Id.eq(line.product_id))
                .filter(entity::product::Column::Stock.gte(line.quantity))
                .exec(&txn)
                .await
                .map_err(storage)?;
            if result.rows_affected == 0 {
                return Err(OrderCommitError::InsufficientStock {
                    product_id: current.id,
                    name: current.name,
                });
            }

            let mut product = Product::from(current);
            product.stock -= line.quantity;
            product.updated_at = now;
            line_products.push(product);
        }

        txn.commit().await.map_err(storage)?;

        let mut committed = Order::from(saved);
        committed.lines = lines;
        Ok(CommittedOrder {
            order: committed,
            line_products,
        })
    }
}

// ===== Product snapshots =====

pub struct SeaOrmSnapshotRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmSnapshotRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl SnapshotRepository for SeaOrmSnapshotRepository {
    async fn record(&self, product: &Product) -> Result<ProductSnapshot> {
        let active: entity::product_snapshot::ActiveModel = product.into();
        let created = active.insert(&*self.db).await?;
        Ok(created.into())
    }

    async fn list_by_product(&self, product_id: i32) -> Result<Vec<ProductSnapshot>> {
        let results = entity::product_snapshot::Entity::find()
            .filter(entity::product_snapshot::Column::ProductId.eq(product_id))
            .order_by_asc(entity::product_snapshot::Column::Id)
            .all(&*self.db)
            .await?;
        Ok(results.into_iter().map(ProductSnapshot::from).collect())
    }

    async fn list_by_store(&self, store_id: i32) -> Result<Vec<ProductSnapshot>> {
        let results = entity::product_snapshot::Entity::find()
            .filter(entity::product_snapshot::Column::StoreId.eq(store_id))
            .order_by_asc(entity::product_snapshot::Column::Id)
            .all(&*self.db)
            .await?;
        Ok(results.into_iter().map(ProductSnapshot::from).collect())
    }
}
