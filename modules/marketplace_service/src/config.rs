//! Configuration for the marketplace service module

use crate::domain::AdminSeed;
use chrono::NaiveDate;
use serde::Deserialize;
use std::path::PathBuf;

/// Marketplace service configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Symmetric secret used to sign session tokens
    #[serde(default)]
    pub jwt_secret: String,

    /// Token lifetime in hours
    #[serde(default = "default_token_ttl_hours")]
    pub token_ttl_hours: i64,

    /// Root directory for uploaded files, served under `/uploads`
    #[serde(default = "default_upload_dir")]
    pub upload_dir: PathBuf,

    /// Maximum size of a single uploaded image in bytes
    #[serde(default = "default_max_upload_size")]
    pub max_upload_size: usize,

    /// Maximum number of images in one multi-upload
    #[serde(default = "default_max_files_per_upload")]
    pub max_files_per_upload: usize,

    /// Base URL of the province/city directory
    #[serde(default = "default_region_api_url")]
    pub region_api_url: String,

    /// Timeout for region directory requests in seconds
    #[serde(default = "default_region_timeout_secs")]
    pub region_timeout_secs: u64,

    /// Argon2 cost parameters
    #[serde(default)]
    pub password_hashing: HashingConfig,

    /// First administrator account
    #[serde(default)]
    pub admin: AdminConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HashingConfig {
    #[serde(default = "default_memory_kib")]
    pub memory_kib: u32,
    #[serde(default = "default_iterations")]
    pub iterations: u32,
    #[serde(default = "default_parallelism")]
    pub parallelism: u32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AdminConfig {
    #[serde(default = "default_admin_email")]
    pub email: String,
    #[serde(default = "default_admin_password")]
    pub password: String,
    #[serde(default = "default_admin_name")]
    pub name: String,
    #[serde(default = "default_admin_phone")]
    pub phone: String,
    #[serde(default = "default_admin_province")]
    pub province_id: String,
    #[serde(default = "default_admin_city")]
    pub city_id: String,
    #[serde(default = "default_admin_store_name")]
    pub store_name: String,
    #[serde(default = "default_admin_store_slug")]
    pub store_slug: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            jwt_secret: String::new(),
            token_ttl_hours: default_token_ttl_hours(),
            upload_dir: default_upload_dir(),
            max_upload_size: default_max_upload_size(),
            max_files_per_upload: default_max_files_per_upload(),
            region_api_url: default_region_api_url(),
            region_timeout_secs: default_region_timeout_secs(),
            password_hashing: HashingConfig::default(),
            admin: AdminConfig::default(),
        }
    }
}

impl Default for HashingConfig {
    fn default() -> Self {
        Self {
            memory_kib: default_memory_kib(),
            iterations: default_iterations(),
            parallelism: default_parallelism(),
        }
    }
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            email: default_admin_email(),
            password: default_admin_password(),
            name: default_admin_name(),
            phone: default_admin_phone(),
            province_id: default_admin_province(),
            city_id: default_admin_city(),
            store_name: default_admin_store_name(),
            store_slug: default_admin_store_slug(),
        }
    }
}

impl Config {
    /// Reject configurations the service cannot start with
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.jwt_secret.trim().is_empty() {
            anyhow::bail!("jwt_secret must be set (JWT_SECRET)");
        }
        if self.token_ttl_hours <= 0 {
            anyhow::bail!("token_ttl_hours must be positive");
        }
        if self.max_files_per_upload == 0 {
            anyhow::bail!("max_files_per_upload must be at least 1");
        }
        Ok(())
    }
}

impl AdminConfig {
    pub fn to_seed(&self) -> AdminSeed {
        AdminSeed {
            email: self.email.clone(),
            password: self.password.clone(),
            name: self.name.clone(),
            phone: self.phone.clone(),
            birth_date: NaiveDate::from_ymd_opt(1990, 1, 1).unwrap_or_default(),
            gender: "L".to_string(),
            about: "System Administrator".to_string(),
            occupation: "Administrator".to_string(),
            province_id: self.province_id.clone(),
            city_id: self.city_id.clone(),
            store_name: self.store_name.clone(),
            store_slug: self.store_slug.clone(),
        }
    }
}

fn default_token_ttl_hours() -> i64 {
    72
}

fn default_upload_dir() -> PathBuf {
    PathBuf::from("uploads")
}

fn default_max_upload_size() -> usize {
    5 * 1024 * 1024 // 5MB
}

fn default_max_files_per_upload() -> usize {
    5
}

fn default_region_api_url() -> String {
    "https://www.emsifa.com/api-wilayah-indonesia/api".to_string()
}

fn default_region_timeout_secs() -> u64 {
    10
}

fn default_memory_kib() -> u32 {
    19 * 1024
}

fn default_iterations() -> u32 {
    2
}

fn default_parallelism() -> u32 {
    1
}

fn default_admin_email() -> String {
    "admin@marketplace.local".to_string()
}

fn default_admin_password() -> String {
    "admin123".to_string()
}

fn default_admin_name() -> String {
    "Super Admin".to_string()
}

fn default_admin_phone() -> String {
    "081999888777".to_string()
}

fn default_admin_province() -> String {
    "11".to_string()
}

fn default_admin_city() -> String {
    "1101".to_string()
}

fn default_admin_store_name() -> String {
    "Admin Store".to_string()
}

fn default_admin_store_slug() -> String {
    "admin-store".to_string()
}
