//! Province/city lookups passed through to an external directory

use crate::contract::{City, MarketplaceError, Province};
use async_trait::async_trait;
use std::sync::Arc;

/// External province/city directory. No local persistence, no caching.
#[async_trait]
pub trait RegionDirectory: Send + Sync {
    async fn provinces(&self) -> anyhow::Result<Vec<Province>>;

    async fn cities(&self, province_id: &str) -> anyhow::Result<Vec<City>>;
}

pub struct RegionService {
    directory: Arc<dyn RegionDirectory>,
}

fn upstream(error: anyhow::Error) -> MarketplaceError {
    tracing::warn!(error = %error, "region directory request failed");
    MarketplaceError::Upstream {
        message: error.to_string(),
    }
}

impl RegionService {
    pub fn new(directory: Arc<dyn RegionDirectory>) -> Self {
        Self { directory }
    }

    pub async fn list_provinces(&self) -> Result<Vec<Province>, MarketplaceError> {
        self.directory.provinces().await.map_err(upstream)
    }

    pub async fn list_cities(&self, province_id: &str) -> Result<Vec<City>, MarketplaceError> {
        self.directory.cities(province_id).await.map_err(upstream)
    }

    /// Every city of every province. Provinces whose cities cannot be
    /// fetched are skipped.
    pub async fn list_all_cities(&self) -> Result<Vec<City>, MarketplaceError> {
        let provinces = self.list_provinces().await?;
        let mut all = Vec::new();
        for province in provinces {
            match self.directory.cities(&province.id).await {
                Ok(cities) => all.extend(cities.into_iter().map(|city| City {
                    province_id: province.id.clone(),
                    ..city
                })),
                Err(e) => {
                    tracing::warn!(province_id = %province.id, error = %e, "skipping province");
                }
            }
        }
        Ok(all)
    }

    pub async fn get_province(&self, id: &str) -> Result<Province, MarketplaceError> {
        self.list_provinces()
            .await?
            .into_iter()
            .find(|province| province.id == id)
            .ok_or_else(|| MarketplaceError::not_found("province", id))
    }

    pub async fn get_city(&self, id: &str) -> Result<City, MarketplaceError> {
        self.list_all_cities()
            .await?
            .into_iter()
            .find(|city| city.id == id)
            .ok_or_else(|| MarketplaceError::not_found("city", id))
    }
}
