//! Multipart form parsing for product and upload endpoints

use super::error::{map_multipart_error, Problem};
use crate::contract::{ImageUpload, MarketplaceError, ProductPatch};
use axum::extract::{multipart::Field, Multipart};

/// Product form: text fields plus an optional `photo` file
#[derive(Debug, Default)]
pub struct ProductForm {
    pub patch: ProductPatch,
    pub photo: Option<ImageUpload>,
}

/// Upload form: `product_id` plus the files found under one field name
#[derive(Debug, Default)]
pub struct UploadForm {
    pub product_id: Option<String>,
    pub files: Vec<ImageUpload>,
}

async fn text(field: Field<'_>) -> Result<Option<String>, Problem> {
    let value = field.text().await.map_err(map_multipart_error)?;
    let value = value.trim();
    Ok((!value.is_empty()).then(|| value.to_string()))
}

async fn file(field: Field<'_>) -> Result<Option<ImageUpload>, Problem> {
    let file_name = field.file_name().unwrap_or_default().to_string();
    let bytes = field.bytes().await.map_err(map_multipart_error)?;
    if file_name.is_empty() && bytes.is_empty() {
        return Ok(None);
    }
    Ok(Some(ImageUpload { file_name, bytes }))
}

fn whole_number(value: Option<String>, field: &str) -> Result<Option<i64>, Problem> {
    value
        .map(|v| {
            v.parse::<i64>().map_err(|_| {
                Problem::from(MarketplaceError::validation(format!(
                    "{} must be a whole number",
                    field
                )))
            })
        })
        .transpose()
}

pub async fn product_form(mut multipart: Multipart) -> Result<ProductForm, Problem> {
    let mut form = ProductForm::default();
    while let Some(field) = multipart.next_field().await.map_err(map_multipart_error)? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "nama_produk" => form.patch.name = text(field).await?,
            "harga_reseller" => form.patch.reseller_price = text(field).await?,
            "harga_konsumen" => form.patch.consumer_price = text(field).await?,
            "stok" => form.patch.stock = whole_number(text(field).await?, "stok")?,
            "deskripsi" => form.patch.description = text(field).await?,
            "id_category" => {
                form.patch.category_id = whole_number(text(field).await?, "id_category")?
            }
            "photo" => form.photo = file(field).await?,
            // id_toko is ignored: products always go to the caller's store
            _ => {}
        }
    }
    Ok(form)
}

pub async fn upload_form(
    mut multipart: Multipart,
    file_field: &str,
) -> Result<UploadForm, Problem> {
    let mut form = UploadForm::default();
    while let Some(field) = multipart.next_field().await.map_err(map_multipart_error)? {
        let name = field.name().unwrap_or_default().to_string();
        if name == "product_id" {
            form.product_id = text(field).await?;
        } else if name == file_field {
            if let Some(upload) = file(field).await? {
                form.files.push(upload);
            }
        }
    }
    Ok(form)
}

impl UploadForm {
    pub fn product_id(&self) -> Result<i64, Problem> {
        whole_number(self.product_id.clone(), "product_id")?
            .ok_or_else(|| Problem::from(MarketplaceError::validation("product_id is required")))
    }
}
