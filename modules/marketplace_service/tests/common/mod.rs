//! Common test utilities: in-memory repositories, fakes for the outer
//! dependencies and a fully wired service set
#![allow(dead_code)]

use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use marketplace_service::contract::*;
use marketplace_service::domain::repository::*;
use marketplace_service::domain::{
    FileStore, PasswordHasher, RegionDirectory, TokenService, UploadLimits,
};
use marketplace_service::MarketplaceServices;
use parking_lot::RwLock;
use rust_decimal::Decimal;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::str::FromStr;
use std::sync::Arc;

pub const TEST_SECRET: &[u8] = b"integration-test-secret";

pub fn print_test_header(test_name: &str, purpose: &[&str]) {
    println!("\n🧪 TEST: {}", test_name);
    if let Some(first) = purpose.first() {
        println!("📋 PURPOSE: {}", first);
    }
    for line in purpose.iter().skip(1) {
        println!("   {}", line);
    }
}

// ===== In-memory repositories =====

/// Rows of every table, keyed by id
#[derive(Default)]
pub struct State {
    next_id: i32,
    pub users: BTreeMap<i32, (User, String)>,
    pub stores: BTreeMap<i32, Store>,
    pub categories: BTreeMap<i32, Category>,
    pub deleted_categories: HashSet<i32>,
    pub products: BTreeMap<i32, Product>,
    pub photos: BTreeMap<i32, ProductPhoto>,
    pub deleted_photos: HashSet<i32>,
    pub addresses: BTreeMap<i32, Address>,
    pub orders: BTreeMap<i32, Order>,
    pub snapshots: Vec<ProductSnapshot>,
    /// Make every snapshot write fail
    pub fail_snapshots: bool,
    /// Make every photo insert fail
    pub fail_photos: bool,
}

impl State {
    fn next_id(&mut self) -> i32 {
        self.next_id += 1;
        self.next_id
    }

    fn photos_of(&self, product_id: i32) -> Vec<ProductPhoto> {
        self.photos
            .values()
            .filter(|p| p.product_id == product_id && !self.deleted_photos.contains(&p.id))
            .cloned()
            .collect()
    }

    fn product(&self, id: i32) -> Option<Product> {
        self.products.get(&id).map(|p| Product {
            photos: self.photos_of(id),
            ..p.clone()
        })
    }

    fn order_with_details(&self, order: &Order) -> Order {
        let mut order = order.clone();
        for line in &mut order.lines {
            line.product = self.product(line.product_id);
        }
        order
    }
}

/// Single in-memory database implementing every repository trait
#[derive(Clone, Default)]
pub struct MemoryDb {
    pub state: Arc<RwLock<State>>,
}

fn unique(what: &str) -> anyhow::Error {
    UniqueViolation(what.to_string()).into()
}

impl MemoryDb {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn repositories(&self) -> Repositories {
        let db = Arc::new(self.clone());
        Repositories {
            users: db.clone(),
            stores: db.clone(),
            categories: db.clone(),
            products: db.clone(),
            photos: db.clone(),
            addresses: db.clone(),
            orders: db.clone(),
            snapshots: db,
        }
    }

    pub fn stock_of(&self, product_id: i32) -> Option<i32> {
        self.state.read().products.get(&product_id).map(|p| p.stock)
    }

    pub fn order_count(&self) -> usize {
        self.state.read().orders.len()
    }

    pub fn snapshot_count(&self) -> usize {
        self.state.read().snapshots.len()
    }

    /// Overwrite a stored consumer price, bypassing validation
    pub fn set_consumer_price(&self, product_id: i32, price: &str) {
        if let Some(product) = self.state.write().products.get_mut(&product_id) {
            product.consumer_price = price.to_string();
        }
    }

    pub fn print_state(&self, context: &str) {
        let state = self.state.read();
        println!("\n========== MemoryDb State: {} ==========", context);
        println!("  users: {}, stores: {}", state.users.len(), state.stores.len());
        for product in state.products.values() {
            println!(
                "  product {} '{}' stock={} price={}",
                product.id, product.name, product.stock, product.consumer_price
            );
        }
        for order in state.orders.values() {
            println!(
                "  order {} {} total={} lines={}",
                order.id,
                order.invoice_code,
                order.total_price,
                order.lines.len()
            );
        }
        println!("  snapshots: {}", state.snapshots.len());
        println!("==========================================\n");
    }
}

#[async_trait]
impl UserRepository for MemoryDb {
    async fn create_with_store(
        &self,
        user: &NewUser,
        provision: &StoreProvisioner,
    ) -> Result<(User, Store)> {
        let mut state = self.state.write();
        if state
            .users
            .values()
            .any(|(u, _)| u.email == user.email || u.phone == user.phone)
        {
            return Err(unique("users"));
        }

        let now = Utc::now();
        let id = state.next_id();
        let created = User {
            id,
            name: user.name.clone(),
            email: user.email.clone(),
            phone: user.phone.clone(),
            birth_date: user.birth_date,
            gender: user.gender.clone(),
            about: user.about.clone(),
            occupation: user.occupation.clone(),
            province_id: user.province_id.clone(),
            city_id: user.city_id.clone(),
            is_admin: user.is_admin,
            created_at: now,
            updated_at: now,
        };
        let new_store = provision(&created);
        let store = Store {
            id: state.next_id(),
            user_id: new_store.user_id,
            name: new_store.name,
            slug: new_store.slug,
            created_at: now,
            updated_at: now,
        };
        state
            .users
            .insert(id, (created.clone(), user.password_hash.clone()));
        state.stores.insert(store.id, store.clone());
        Ok((created, store))
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<User>> {
        Ok(self.state.read().users.get(&id).map(|(u, _)| u.clone()))
    }

    async fn find_credentials_by_email(&self, email: &str) -> Result<Option<Credentials>> {
        Ok(self
            .state
            .read()
            .users
            .values()
            .find(|(u, _)| u.email == email)
            .map(|(u, hash)| Credentials {
                user_id: u.id,
                password_hash: hash.clone(),
                is_admin: u.is_admin,
            }))
    }

    async fn admin_exists(&self, email: &str) -> Result<bool> {
        Ok(self
            .state
            .read()
            .users
            .values()
            .any(|(u, _)| u.email == email || u.is_admin))
    }

    async fn update(&self, user: &User, password_hash: Option<&str>) -> Result<User> {
        let mut state = self.state.write();
        if state.users.values().any(|(u, _)| {
            u.id != user.id && (u.email == user.email || u.phone == user.phone)
        }) {
            return Err(unique("users"));
        }
        let (stored, hash) = state
            .users
            .get_mut(&user.id)
            .ok_or_else(|| anyhow::anyhow!("user {} vanished", user.id))?;
        *stored = User {
            updated_at: Utc::now(),
            ..user.clone()
        };
        if let Some(new_hash) = password_hash {
            *hash = new_hash.to_string();
        }
        Ok(stored.clone())
    }
}

#[async_trait]
impl StoreRepository for MemoryDb {
    async fn find_by_id(&self, id: i32) -> Result<Option<Store>> {
        Ok(self.state.read().stores.get(&id).cloned())
    }

    async fn find_by_user(&self, user_id: i32) -> Result<Option<Store>> {
        Ok(self
            .state
            .read()
            .stores
            .values()
            .find(|s| s.user_id == user_id)
            .cloned())
    }

    async fn list(&self, name: Option<&str>, limit: u64, offset: u64) -> Result<(Vec<Store>, u64)> {
        let state = self.state.read();
        let needle = name.map(str::to_lowercase);
        let matching: Vec<Store> = state
            .stores
            .values()
            .filter(|s| match &needle {
                Some(n) => s.name.to_lowercase().contains(n),
                None => true,
            })
            .cloned()
            .collect();
        let total = matching.len() as u64;
        let page = matching
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect();
        Ok((page, total))
    }

    async fn create(&self, store: &NewStore) -> Result<Store> {
        let mut state = self.state.write();
        if state.stores.values().any(|s| s.user_id == store.user_id) {
            return Err(unique("stores.user_id"));
        }
        let now = Utc::now();
        let created = Store {
            id: state.next_id(),
            user_id: store.user_id,
            name: store.name.clone(),
            slug: store.slug.clone(),
            created_at: now,
            updated_at: now,
        };
        state.stores.insert(created.id, created.clone());
        Ok(created)
    }

    async fn update(&self, store: &Store) -> Result<Store> {
        let updated = Store {
            updated_at: Utc::now(),
            ..store.clone()
        };
        self.state.write().stores.insert(store.id, updated.clone());
        Ok(updated)
    }
}

#[async_trait]
impl CategoryRepository for MemoryDb {
    async fn list(&self) -> Result<Vec<Category>> {
        let state = self.state.read();
        Ok(state
            .categories
            .values()
            .filter(|c| !state.deleted_categories.contains(&c.id))
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Category>> {
        let state = self.state.read();
        if state.deleted_categories.contains(&id) {
            return Ok(None);
        }
        Ok(state.categories.get(&id).cloned())
    }

    async fn create(&self, name: &str) -> Result<Category> {
        let mut state = self.state.write();
        let now = Utc::now();
        let category = Category {
            id: state.next_id(),
            name: name.to_string(),
            created_at: now,
            updated_at: now,
        };
        state.categories.insert(category.id, category.clone());
        Ok(category)
    }

    async fn update(&self, category: &Category) -> Result<Category> {
        let updated = Category {
            updated_at: Utc::now(),
            ..category.clone()
        };
        self.state
            .write()
            .categories
            .insert(category.id, updated.clone());
        Ok(updated)
    }

    async fn soft_delete(&self, id: i32) -> Result<()> {
        self.state.write().deleted_categories.insert(id);
        Ok(())
    }
}

fn consumer_price(product: &Product) -> Option<Decimal> {
    Decimal::from_str(product.consumer_price.trim()).ok()
}

#[async_trait]
impl ProductRepository for MemoryDb {
    async fn list(
        &self,
        filter: &ProductFilter,
        limit: u64,
        offset: u64,
    ) -> Result<(Vec<Product>, u64)> {
        let state = self.state.read();
        let matching: Vec<Product> = state
            .products
            .keys()
            .filter_map(|id| state.product(*id))
            .filter(|p| filter.name.as_ref().map_or(true, |n| p.name.contains(n.as_str())))
            .filter(|p| filter.category_id.map_or(true, |c| p.category_id == c))
            .filter(|p| filter.store_id.map_or(true, |s| p.store_id == s))
            .filter(|p| {
                filter
                    .min_price
                    .map_or(true, |min| consumer_price(p).is_some_and(|price| price >= min))
            })
            .filter(|p| {
                filter
                    .max_price
                    .map_or(true, |max| consumer_price(p).is_some_and(|price| price <= max))
            })
            .collect();
        let total = matching.len() as u64;
        let page = matching
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect();
        Ok((page, total))
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Product>> {
        Ok(self.state.read().product(id))
    }

    async fn is_owned_by(&self, product_id: i32, user_id: i32) -> Result<bool> {
        let state = self.state.read();
        Ok(state
            .products
            .get(&product_id)
            .and_then(|p| state.stores.get(&p.store_id))
            .is_some_and(|s| s.user_id == user_id))
    }

    async fn create(&self, product: &NewProduct) -> Result<Product> {
        let mut state = self.state.write();
        let now = Utc::now();
        let created = Product {
            id: state.next_id(),
            store_id: product.store_id,
            category_id: product.category_id,
            name: product.name.clone(),
            slug: product.slug.clone(),
            reseller_price: product.reseller_price.clone(),
            consumer_price: product.consumer_price.clone(),
            stock: product.stock,
            description: product.description.clone(),
            created_at: now,
            updated_at: now,
            photos: Vec::new(),
        };
        state.products.insert(created.id, created.clone());
        Ok(created)
    }

    async fn update(&self, product: &Product) -> Result<Product> {
        let mut state = self.state.write();
        let updated = Product {
            updated_at: Utc::now(),
            photos: Vec::new(),
            ..product.clone()
        };
        state.products.insert(product.id, updated);
        state
            .product(product.id)
            .ok_or_else(|| anyhow::anyhow!("product {} vanished", product.id))
    }

    async fn delete(&self, id: i32) -> Result<()> {
        let mut state = self.state.write();
        state.products.remove(&id);
        state.photos.retain(|_, photo| photo.product_id != id);
        Ok(())
    }
}

#[async_trait]
impl PhotoRepository for MemoryDb {
    async fn add(&self, product_id: i32, url: &str) -> Result<ProductPhoto> {
        let mut photos = self.add_many(product_id, &[url.to_string()]).await?;
        photos
            .pop()
            .ok_or_else(|| anyhow::anyhow!("no photo inserted"))
    }

    async fn add_many(&self, product_id: i32, urls: &[String]) -> Result<Vec<ProductPhoto>> {
        let mut state = self.state.write();
        if state.fail_photos {
            anyhow::bail!("photo table unavailable");
        }
        let now = Utc::now();
        let mut created = Vec::new();
        for url in urls {
            let photo = ProductPhoto {
                id: state.next_id(),
                product_id,
                url: url.clone(),
                created_at: now,
                updated_at: now,
            };
            state.photos.insert(photo.id, photo.clone());
            created.push(photo);
        }
        Ok(created)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<ProductPhoto>> {
        let state = self.state.read();
        if state.deleted_photos.contains(&id) {
            return Ok(None);
        }
        Ok(state.photos.get(&id).cloned())
    }

    async fn list_by_product(&self, product_id: i32) -> Result<Vec<ProductPhoto>> {
        Ok(self.state.read().photos_of(product_id))
    }

    async fn is_owned_by(&self, photo_id: i32, user_id: i32) -> Result<bool> {
        let state = self.state.read();
        Ok(state
            .photos
            .get(&photo_id)
            .and_then(|photo| state.products.get(&photo.product_id))
            .and_then(|p| state.stores.get(&p.store_id))
            .is_some_and(|s| s.user_id == user_id))
    }

    async fn delete(&self, id: i32) -> Result<()> {
        self.state.write().deleted_photos.insert(id);
        Ok(())
    }
}

#[async_trait]
impl AddressRepository for MemoryDb {
    async fn list_by_user(&self, user_id: i32) -> Result<Vec<Address>> {
        Ok(self
            .state
            .read()
            .addresses
            .values()
            .filter(|a| a.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn find(&self, id: i32, user_id: i32) -> Result<Option<Address>> {
        Ok(self
            .state
            .read()
            .addresses
            .get(&id)
            .filter(|a| a.user_id == user_id)
            .cloned())
    }

    async fn create(&self, user_id: i32, fields: &AddressFields) -> Result<Address> {
        let mut state = self.state.write();
        let now = Utc::now();
        let address = Address {
            id: state.next_id(),
            user_id,
            title: fields.title.clone(),
            recipient_name: fields.recipient_name.clone(),
            phone: fields.phone.clone(),
            detail: fields.detail.clone(),
            created_at: now,
            updated_at: now,
        };
        state.addresses.insert(address.id, address.clone());
        Ok(address)
    }

    async fn update(&self, address: &Address) -> Result<Address> {
        let updated = Address {
            updated_at: Utc::now(),
            ..address.clone()
        };
        self.state
            .write()
            .addresses
            .insert(address.id, updated.clone());
        Ok(updated)
    }

    async fn delete(&self, id: i32, user_id: i32) -> Result<bool> {
        let mut state = self.state.write();
        let owned = state
            .addresses
            .get(&id)
            .is_some_and(|a| a.user_id == user_id);
        if owned {
            state.addresses.remove(&id);
        }
        Ok(owned)
    }
}

#[async_trait]
impl OrderRepository for MemoryDb {
    async fn list_by_user(
        &self,
        user_id: i32,
        limit: u64,
        offset: u64,
    ) -> Result<(Vec<Order>, u64)> {
        let state = self.state.read();
        let mut matching: Vec<&Order> = state
            .orders
            .values()
            .filter(|o| o.user_id == user_id)
            .collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        let total = matching.len() as u64;
        let page = matching
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .map(|o| state.order_with_details(o))
            .collect();
        Ok((page, total))
    }

    async fn find(&self, id: i32, user_id: i32) -> Result<Option<Order>> {
        let state = self.state.read();
        Ok(state
            .orders
            .get(&id)
            .filter(|o| o.user_id == user_id)
            .map(|o| state.order_with_details(o)))
    }

    async fn commit(
        &self,
        order: &NewOrder,
    ) -> std::result::Result<CommittedOrder, OrderCommitError> {
        let mut state = self.state.write();

        // Check every line before touching anything
        let mut claimed: HashMap<i32, i32> = HashMap::new();
        for line in &order.lines {
            let product = state
                .products
                .get(&line.product_id)
                .ok_or(OrderCommitError::ProductMissing(line.product_id))?;
            let total = claimed.entry(line.product_id).or_insert(0);
            *total += line.quantity;
            if product.stock < *total {
                return Err(OrderCommitError::InsufficientStock {
                    product_id: product.id,
                    name: product.name.clone(),
                });
            }
        }
        for (product_id, quantity) in &claimed {
            if let Some(product) = state.products.get_mut(product_id) {
                product.stock -= quantity;
            }
        }

        let now = Utc::now();
        let id = state.next_id();
        let mut lines = Vec::with_capacity(order.lines.len());
        for line in &order.lines {
            lines.push(OrderLine {
                id: state.next_id(),
                order_id: id,
                product_id: line.product_id,
                quantity: line.quantity,
                total_price: line.total_price,
                created_at: now,
                updated_at: now,
                product: None,
            });
        }
        let created = Order {
            id,
            user_id: order.user_id,
            address_id: order.address_id,
            total_price: order.total_price,
            invoice_code: format!("INV-{:06}", id),
            payment_method: order.payment_method.clone(),
            created_at: now,
            updated_at: now,
            lines,
        };
        state.orders.insert(id, created.clone());

        let line_products = order
            .lines
            .iter()
            .filter_map(|line| state.product(line.product_id))
            .collect();
        Ok(CommittedOrder {
            order: created,
            line_products,
        })
    }
}

#[async_trait]
impl SnapshotRepository for MemoryDb {
    async fn record(&self, product: &Product) -> Result<ProductSnapshot> {
        let mut state = self.state.write();
        if state.fail_snapshots {
            anyhow::bail!("snapshot table unavailable");
        }
        let snapshot = ProductSnapshot {
            id: state.next_id(),
            product_id: product.id,
            store_id: product.store_id,
            category_id: product.category_id,
            name: product.name.clone(),
            slug: product.slug.clone(),
            reseller_price: product.reseller_price.clone(),
            consumer_price: product.consumer_price.clone(),
            description: product.description.clone(),
            created_at: Utc::now(),
        };
        state.snapshots.push(snapshot.clone());
        Ok(snapshot)
    }

    async fn list_by_product(&self, product_id: i32) -> Result<Vec<ProductSnapshot>> {
        Ok(self
            .state
            .read()
            .snapshots
            .iter()
            .filter(|s| s.product_id == product_id)
            .cloned()
            .collect())
    }

    async fn list_by_store(&self, store_id: i32) -> Result<Vec<ProductSnapshot>> {
        Ok(self
            .state
            .read()
            .snapshots
            .iter()
            .filter(|s| s.store_id == store_id)
            .cloned()
            .collect())
    }
}

// ===== Outer dependency fakes =====

/// Reversible "hash" so tests do not pay for Argon2
pub struct PlainHasher;

impl PasswordHasher for PlainHasher {
    fn hash(&self, password: &str) -> Result<String> {
        Ok(format!("plain${}", password))
    }

    fn verify(&self, password: &str, hash: &str) -> bool {
        hash.strip_prefix("plain$") == Some(password)
    }
}

/// File store that only remembers paths and sizes
#[derive(Default)]
pub struct MemoryFiles {
    pub files: RwLock<BTreeMap<String, usize>>,
}

impl MemoryFiles {
    pub fn paths(&self) -> Vec<String> {
        self.files.read().keys().cloned().collect()
    }
}

#[async_trait]
impl FileStore for MemoryFiles {
    async fn save(&self, relative_path: &str, bytes: &[u8]) -> Result<()> {
        self.files
            .write()
            .insert(relative_path.to_string(), bytes.len());
        Ok(())
    }

    async fn remove(&self, relative_path: &str) -> Result<()> {
        self.files.write().remove(relative_path);
        Ok(())
    }
}

/// Fixed province/city directory; provinces listed in `broken` fail
#[derive(Default)]
pub struct StaticRegions {
    pub provinces: Vec<Province>,
    pub cities: HashMap<String, Vec<City>>,
    pub broken: HashSet<String>,
    pub offline: bool,
}

impl StaticRegions {
    pub fn sample() -> Self {
        let province = |id: &str, name: &str| Province {
            id: id.to_string(),
            name: name.to_string(),
        };
        let city = |id: &str, province_id: &str, name: &str| City {
            id: id.to_string(),
            province_id: province_id.to_string(),
            name: name.to_string(),
        };
        let mut cities = HashMap::new();
        cities.insert(
            "11".to_string(),
            vec![
                city("1101", "11", "KABUPATEN SIMEULUE"),
                city("1102", "11", "KABUPATEN ACEH SINGKIL"),
            ],
        );
        cities.insert(
            "31".to_string(),
            vec![city("3171", "31", "KOTA JAKARTA SELATAN")],
        );
        Self {
            provinces: vec![province("11", "ACEH"), province("31", "DKI JAKARTA")],
            cities,
            broken: HashSet::new(),
            offline: false,
        }
    }
}

#[async_trait]
impl RegionDirectory for StaticRegions {
    async fn provinces(&self) -> Result<Vec<Province>> {
        if self.offline {
            anyhow::bail!("directory unreachable");
        }
        Ok(self.provinces.clone())
    }

    async fn cities(&self, province_id: &str) -> Result<Vec<City>> {
        if self.offline || self.broken.contains(province_id) {
            anyhow::bail!("regencies of {} unavailable", province_id);
        }
        Ok(self.cities.get(province_id).cloned().unwrap_or_default())
    }
}

// ===== Wiring =====

pub struct TestEnv {
    pub services: Arc<MarketplaceServices>,
    pub db: MemoryDb,
    pub files: Arc<MemoryFiles>,
}

pub const TEST_LIMITS: UploadLimits = UploadLimits {
    max_file_size: 1024,
    max_files: 3,
};

impl TestEnv {
    pub fn new() -> Self {
        Self::with_regions(StaticRegions::sample())
    }

    pub fn with_regions(regions: StaticRegions) -> Self {
        let db = MemoryDb::new();
        let files = Arc::new(MemoryFiles::default());
        let tokens = Arc::new(TokenService::new(TEST_SECRET, chrono::Duration::hours(72)));
        let services = Arc::new(MarketplaceServices::build(
            db.repositories(),
            tokens,
            Arc::new(PlainHasher),
            Arc::new(regions),
            files.clone(),
            TEST_LIMITS,
        ));
        Self {
            services,
            db,
            files,
        }
    }

    /// Register a user (and its default store) whose email and phone are
    /// derived from `handle`
    pub async fn register(&self, handle: &str) -> (User, Store, AuthContext) {
        let (user, store) = self
            .services
            .identity
            .register(registration(handle))
            .await
            .expect("Failed to register user");
        let actor = AuthContext::user(user.id);
        (user, store, actor)
    }

    pub async fn category(&self, name: &str) -> Category {
        self.services
            .catalog
            .create_category(Some(name))
            .await
            .expect("Failed to create category")
    }

    pub async fn product(
        &self,
        actor: &AuthContext,
        category: &Category,
        name: &str,
        price: &str,
        stock: i64,
    ) -> Product {
        self.services
            .catalog
            .create_product(actor, product_input(category.id, name, price, stock), None)
            .await
            .expect("Failed to create product")
    }

    pub async fn address(&self, actor: &AuthContext) -> Address {
        self.services
            .addresses
            .create(
                actor,
                AddressPatch {
                    title: Some("Rumah".to_string()),
                    recipient_name: Some("Budi".to_string()),
                    phone: Some("081234567890".to_string()),
                    detail: Some("Jl. Merdeka No. 1".to_string()),
                },
            )
            .await
            .expect("Failed to create address")
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

pub fn registration(handle: &str) -> Registration {
    Registration {
        name: Some(format!("User {}", handle)),
        email: Some(format!("{}@example.com", handle)),
        password: Some("secret123".to_string()),
        phone: Some(format!("0812-{}", handle)),
        birth_date: Some("1995-06-15".to_string()),
        gender: Some("L".to_string()),
        about: None,
        occupation: Some("Engineer".to_string()),
        province_id: Some("11".to_string()),
        city_id: Some("1101".to_string()),
    }
}

pub fn product_input(category_id: i32, name: &str, price: &str, stock: i64) -> ProductPatch {
    ProductPatch {
        name: Some(name.to_string()),
        reseller_price: Some(price.to_string()),
        consumer_price: Some(price.to_string()),
        stock: Some(stock),
        description: Some("Produk berkualitas untuk pengujian".to_string()),
        category_id: Some(i64::from(category_id)),
    }
}
