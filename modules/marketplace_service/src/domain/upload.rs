//! Image upload intake: validate, store, then link to a product

use super::catalog::CatalogService;
use super::validation;
use crate::contract::{AuthContext, ImageUpload, MarketplaceError, ProductPhoto, StoredImage};
use async_trait::async_trait;
use chrono::Utc;
use std::path::Path;
use std::sync::Arc;
use uuid::Uuid;

pub const ALLOWED_EXTENSIONS: [&str; 4] = [".jpg", ".jpeg", ".png", ".webp"];

/// Sub-directory (and URL segment) for product images
pub const PRODUCT_DIR: &str = "products";

/// Public URL prefix the upload root is served under
pub const PUBLIC_PREFIX: &str = "/uploads";

/// Storage backend for uploaded files, addressed by paths relative to its root
#[async_trait]
pub trait FileStore: Send + Sync {
    async fn save(&self, relative_path: &str, bytes: &[u8]) -> anyhow::Result<()>;

    async fn remove(&self, relative_path: &str) -> anyhow::Result<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadLimits {
    pub max_file_size: usize,
    pub max_files: usize,
}

/// Outcome of a multi-file upload; `errors` lists the rejected files
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultiUpload {
    pub uploaded: Vec<StoredImage>,
    pub photos: Vec<ProductPhoto>,
    pub errors: Vec<String>,
}

impl MultiUpload {
    pub fn is_partial(&self) -> bool {
        !self.errors.is_empty()
    }
}

pub struct UploadService {
    files: Arc<dyn FileStore>,
    catalog: Arc<CatalogService>,
    limits: UploadLimits,
}

fn extension_of(file_name: &str) -> Option<String> {
    Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| format!(".{}", ext.to_lowercase()))
}

fn describe(error: &MarketplaceError) -> String {
    match error {
        MarketplaceError::Validation { message } => message.clone(),
        other => other.to_string(),
    }
}

impl UploadService {
    pub fn new(
        files: Arc<dyn FileStore>,
        catalog: Arc<CatalogService>,
        limits: UploadLimits,
    ) -> Self {
        Self {
            files,
            catalog,
            limits,
        }
    }

    /// Check size and extension; returns the normalized extension
    pub fn validate(&self, upload: &ImageUpload) -> Result<String, MarketplaceError> {
        if upload.bytes.len() > self.limits.max_file_size {
            return Err(MarketplaceError::validation(format!(
                "file size exceeds the {} byte limit",
                self.limits.max_file_size
            )));
        }
        extension_of(&upload.file_name)
            .filter(|ext| ALLOWED_EXTENSIONS.contains(&ext.as_str()))
            .ok_or_else(|| {
                MarketplaceError::validation(format!(
                    "file type not allowed, use one of {}",
                    ALLOWED_EXTENSIONS.join(", ")
                ))
            })
    }

    /// Validate and persist one image under a name keyed by uploader,
    /// timestamp and a random suffix
    pub async fn store(
        &self,
        uploader_id: i32,
        upload: &ImageUpload,
        index: Option<usize>,
    ) -> Result<StoredImage, MarketplaceError> {
        let ext = self.validate(upload)?;
        let random: String = Uuid::new_v4().simple().to_string().chars().take(8).collect();
        let file_name = format!(
            "product_{}_{}_{}{}{}",
            uploader_id,
            Utc::now().format("%Y%m%d_%H%M%S"),
            random,
            index.map(|i| format!("_{}", i)).unwrap_or_default(),
            ext
        );

        self.files
            .save(&format!("{}/{}", PRODUCT_DIR, file_name), &upload.bytes)
            .await
            .map_err(MarketplaceError::internal)?;

        Ok(StoredImage {
            url: format!("{}/{}/{}", PUBLIC_PREFIX, PRODUCT_DIR, file_name),
            file_name,
            size: upload.bytes.len(),
        })
    }

    /// Store one image and attach it to the product
    pub async fn upload_and_assign(
        &self,
        actor: &AuthContext,
        product_id: i64,
        upload: ImageUpload,
    ) -> Result<(StoredImage, ProductPhoto), MarketplaceError> {
        let product_id = validation::positive_id(product_id, "product id")?;
        let stored = self.store(actor.user_id, &upload, None).await?;

        match self.catalog.add_photo(actor, product_id, &stored.url).await {
            Ok(photo) => Ok((stored, photo)),
            Err(e) => {
                self.discard(std::slice::from_ref(&stored)).await;
                Err(e)
            }
        }
    }

    /// Store up to `max_files` images and attach the ones that were accepted.
    /// Fails only when nothing could be stored or the attach itself fails.
    pub async fn upload_many_and_assign(
        &self,
        actor: &AuthContext,
        product_id: i64,
        uploads: Vec<ImageUpload>,
    ) -> Result<MultiUpload, MarketplaceError> {
        let product_id = validation::positive_id(product_id, "product id")?;
        if uploads.is_empty() {
            return Err(MarketplaceError::validation("no files uploaded"));
        }
        if uploads.len() > self.limits.max_files {
            return Err(MarketplaceError::validation(format!(
                "at most {} files per upload",
                self.limits.max_files
            )));
        }

        let mut uploaded = Vec::new();
        let mut errors = Vec::new();
        for (index, upload) in uploads.iter().enumerate() {
            match self.store(actor.user_id, upload, Some(index + 1)).await {
                Ok(stored) => uploaded.push(stored),
                Err(e) => errors.push(format!(
                    "file {} ({}): {}",
                    index + 1,
                    upload.file_name,
                    describe(&e)
                )),
            }
        }

        if uploaded.is_empty() {
            return Err(MarketplaceError::validation(format!(
                "no file could be uploaded: {}",
                errors.join("; ")
            )));
        }

        let urls: Vec<String> = uploaded.iter().map(|s| s.url.clone()).collect();
        match self.catalog.add_photos(actor, product_id, &urls).await {
            Ok(photos) => Ok(MultiUpload {
                uploaded,
                photos,
                errors,
            }),
            Err(e) => {
                self.discard(&uploaded).await;
                Err(e)
            }
        }
    }

    /// Best-effort removal of stored files that ended up unreferenced
    pub async fn discard(&self, stored: &[StoredImage]) {
        for image in stored {
            let path = format!("{}/{}", PRODUCT_DIR, image.file_name);
            if let Err(e) = self.files.remove(&path).await {
                tracing::warn!(file = %path, error = %e, "failed to remove orphaned upload");
            }
        }
    }
}
