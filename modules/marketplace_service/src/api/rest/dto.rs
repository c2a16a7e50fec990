//! REST DTOs with serde derives for HTTP API
//!
//! Request bodies keep the public wire names clients already send
//! (`nama`, `noTelp`, `judul_alamat`, ...). Every request field is optional
//! so that missing input is reported by domain validation, not by serde.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// ===== Envelope =====

/// Success envelope shared by every endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub message: String,
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<PaginationDto>,
}

impl<T> ApiResponse<T> {
    pub fn new(message: impl Into<String>, data: T) -> Self {
        Self {
            message: message.into(),
            data,
            pagination: None,
        }
    }

    pub fn paged(message: impl Into<String>, data: T, pagination: PaginationDto) -> Self {
        Self {
            message: message.into(),
            data,
            pagination: Some(pagination),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema)]
pub struct PaginationDto {
    pub current_page: u64,
    pub total_pages: u64,
    pub total_items: u64,
    pub limit: u64,
    pub has_next: bool,
    pub has_prev: bool,
}

/// Raw `limit`/`page` query values; invalid ones fall back to defaults
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageQuery {
    pub limit: Option<String>,
    pub page: Option<String>,
}

// ===== Auth & profile =====

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct RegisterRequest {
    pub nama: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    #[serde(rename = "noTelp")]
    pub no_telp: Option<String>,
    /// `YYYY-MM-DD`
    #[serde(rename = "tanggalLahir")]
    #[schema(example = "1995-08-17")]
    pub tanggal_lahir: Option<String>,
    #[serde(rename = "jenisKelamin")]
    pub jenis_kelamin: Option<String>,
    pub tentang: Option<String>,
    pub pekerjaan: Option<String>,
    #[serde(rename = "idProvinsi")]
    pub id_provinsi: Option<String>,
    #[serde(rename = "idKota")]
    pub id_kota: Option<String>,
}

/// Profile update, same wire names as registration
pub type UpdateProfileRequest = RegisterRequest;

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TokenDto {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserDto {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub birth_date: NaiveDate,
    pub gender: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub about: Option<String>,
    pub occupation: String,
    pub province_id: String,
    pub city_id: String,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RegistrationDto {
    pub user: UserDto,
    pub store: StoreDto,
}

// ===== Stores =====

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct StoreRequest {
    pub nama_toko: Option<String>,
    pub url_toko: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StoreListQuery {
    pub limit: Option<String>,
    pub page: Option<String>,
    pub nama_toko: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StoreDto {
    pub id: i32,
    pub user_id: i32,
    pub name: String,
    pub slug: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ===== Addresses =====

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct AddressRequest {
    pub judul_alamat: Option<String>,
    pub nama_penerima: Option<String>,
    pub no_telp: Option<String>,
    pub detail_alamat: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AddressDto {
    pub id: i32,
    pub user_id: i32,
    pub title: String,
    pub recipient_name: String,
    pub phone: String,
    pub detail: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ===== Catalog =====

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct CategoryRequest {
    pub nama_category: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CategoryDto {
    pub id: i32,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductListQuery {
    pub limit: Option<String>,
    pub page: Option<String>,
    pub nama_produk: Option<String>,
    pub category_id: Option<String>,
    pub toko_id: Option<String>,
    pub min_harga: Option<String>,
    pub max_harga: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PhotoDto {
    pub id: i32,
    pub product_id: i32,
    pub url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProductDto {
    pub id: i32,
    pub store_id: i32,
    pub category_id: i32,
    pub name: String,
    pub slug: String,
    #[schema(example = "45000")]
    pub reseller_price: String,
    #[schema(example = "50000")]
    pub consumer_price: String,
    pub stock: i32,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub photos: Vec<PhotoDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SnapshotDto {
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

// ===== Orders =====

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct OrderRequestDto {
    pub method_bayar: Option<String>,
    pub alamat_kirim: Option<i64>,
    #[serde(default)]
    pub detail_trx: Vec<OrderItemDto>,
}

#[derive(Debug, Clone, Copy, Default, Deserialize, ToSchema)]
pub struct OrderItemDto {
    pub product_id: Option<i64>,
    pub kuantitas: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OrderLineDto {
    pub id: i32,
    pub order_id: i32,
    pub product_id: i32,
    pub quantity: i32,
    pub total_price: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product: Option<ProductDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OrderDto {
    pub id: i32,
    pub user_id: i32,
    pub address_id: i32,
    pub total_price: i64,
    #[schema(example = "INV-000042")]
    pub invoice_code: String,
    pub payment_method: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub lines: Vec<OrderLineDto>,
}

// ===== Regions =====

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProvinceDto {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CityDto {
    pub id: String,
    pub province_id: String,
    pub name: String,
}

// ===== Uploads =====

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StoredImageDto {
    pub file_name: String,
    pub url: String,
    pub size: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UploadDto {
    pub file: StoredImageDto,
    pub photo: PhotoDto,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MultiUploadDto {
    pub uploaded: Vec<StoredImageDto>,
    pub photos: Vec<PhotoDto>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
}
