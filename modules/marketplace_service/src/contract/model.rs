//! Contract models for the marketplace service
//!
//! These models are transport-agnostic and shared by every layer.
//! NO serde derives - these are pure domain models.

use chrono::{DateTime, NaiveDate, Utc};

/// Authenticated caller, produced by the access gate from a verified token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthContext {
    /// Id of the user the token was issued to
    pub user_id: i32,
    /// Administrator flag carried in the token
    pub is_admin: bool,
}

impl AuthContext {
    pub fn user(user_id: i32) -> Self {
        Self {
            user_id,
            is_admin: false,
        }
    }

    pub fn admin(user_id: i32) -> Self {
        Self {
            user_id,
            is_admin: true,
        }
    }
}

// ===== Identity =====

/// Registered user. The credential hash never leaves the storage layer
/// except through [`Credentials`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub birth_date: NaiveDate,
    pub gender: String,
    pub about: Option<String>,
    pub occupation: String,
    pub province_id: String,
    pub city_id: String,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Data needed to insert a user row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub phone: String,
    pub birth_date: NaiveDate,
    pub gender: String,
    pub about: Option<String>,
    pub occupation: String,
    pub province_id: String,
    pub city_id: String,
    pub is_admin: bool,
}

/// Login lookup result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub user_id: i32,
    pub password_hash: String,
    pub is_admin: bool,
}

/// Raw registration input; every field is validated by the identity service
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Registration {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub phone: Option<String>,
    pub birth_date: Option<String>,
    pub gender: Option<String>,
    pub about: Option<String>,
    pub occupation: Option<String>,
    pub province_id: Option<String>,
    pub city_id: Option<String>,
}

/// Partial profile update: only present, non-blank fields are applied
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfilePatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub phone: Option<String>,
    pub birth_date: Option<String>,
    pub gender: Option<String>,
    pub about: Option<String>,
    pub occupation: Option<String>,
    pub province_id: Option<String>,
    pub city_id: Option<String>,
}

/// Signed session token handed out by login
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

// ===== Stores =====

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Store {
    pub id: i32,
    pub user_id: i32,
    pub name: String,
    pub slug: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewStore {
    pub user_id: i32,
    pub name: String,
    pub slug: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StorePatch {
    pub name: Option<String>,
    pub slug: Option<String>,
}

// ===== Addresses =====

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Address {
    pub id: i32,
    pub user_id: i32,
    pub title: String,
    pub recipient_name: String,
    pub phone: String,
    pub detail: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Address fields, used both for creation and as a partial update
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressPatch {
    pub title: Option<String>,
    pub recipient_name: Option<String>,
    pub phone: Option<String>,
    pub detail: Option<String>,
}

/// Fully validated address fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressFields {
    pub title: String,
    pub recipient_name: String,
    pub phone: String,
    pub detail: String,
}

// ===== Catalog =====

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub id: i32,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    pub id: i32,
    pub store_id: i32,
    pub category_id: i32,
    pub name: String,
    pub slug: String,
    /// Decimal price kept as text
    pub reseller_price: String,
    /// Decimal price kept as text
    pub consumer_price: String,
    pub stock: i32,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub photos: Vec<ProductPhoto>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProduct {
    pub store_id: i32,
    pub category_id: i32,
    pub name: String,
    pub slug: String,
    pub reseller_price: String,
    pub consumer_price: String,
    pub stock: i32,
    pub description: String,
}

/// Product form input. On create every field is required; on update only
/// the present ones are validated and applied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub reseller_price: Option<String>,
    pub consumer_price: Option<String>,
    pub stock: Option<i64>,
    pub description: Option<String>,
    pub category_id: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductPhoto {
    pub id: i32,
    pub product_id: i32,
    pub url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ===== Orders =====

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    pub id: i32,
    pub user_id: i32,
    pub address_id: i32,
    pub total_price: i64,
    pub invoice_code: String,
    pub payment_method: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub lines: Vec<OrderLine>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderLine {
    pub id: i32,
    pub order_id: i32,
    pub product_id: i32,
    pub quantity: i32,
    pub total_price: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Joined product; absent on the placement response and for deleted products
    pub product: Option<Product>,
}

/// Raw order request as received from the caller
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderRequest {
    pub payment_method: String,
    pub address_id: i64,
    pub items: Vec<LineItemRequest>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LineItemRequest {
    pub product_id: i64,
    pub quantity: i64,
}

/// Validated order ready to be committed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrder {
    pub user_id: i32,
    pub address_id: i32,
    pub payment_method: String,
    pub total_price: i64,
    pub lines: Vec<NewOrderLine>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewOrderLine {
    pub product_id: i32,
    pub quantity: i32,
    pub total_price: i64,
}

/// Historical copy of a product as it was when an order line was committed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductSnapshot {
    pub id: i32,
    pub product_id: i32,
    pub store_id: i32,
    pub category_id: i32,
    pub name: String,
    pub slug: String,
    pub reseller_price: String,
    pub consumer_price: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

// ===== Regions =====

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Province {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct City {
    pub id: String,
    pub province_id: String,
    pub name: String,
}

// ===== Uploads =====

/// Image received from a multipart form, not yet validated
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    pub file_name: String,
    pub bytes: bytes::Bytes,
}

/// Image persisted by the upload intake
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredImage {
    pub file_name: String,
    pub url: String,
    pub size: usize,
}
