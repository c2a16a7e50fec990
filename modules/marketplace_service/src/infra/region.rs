//! HTTP client for the public Indonesian province/regency directory

use crate::contract::{City, Province};
use crate::domain::RegionDirectory;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize};
use std::time::Duration;

#[derive(Debug, Deserialize)]
struct ProvinceRecord {
    id: String,
    name: String,
}

#[derive(Debug, Deserialize)]
struct RegencyRecord {
    id: String,
    province_id: String,
    name: String,
}

pub struct HttpRegionDirectory {
    client: Client,
    base_url: String,
}

impl HttpRegionDirectory {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("building region directory client")?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    async fn fetch<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("GET {}", url))?;

        let status = response.status();
        if !status.is_success() {
            anyhow::bail!("GET {} returned {}", url, status);
        }
        response
            .json::<T>()
            .await
            .with_context(|| format!("decoding response of {}", url))
    }
}

#[async_trait]
impl RegionDirectory for HttpRegionDirectory {
    async fn provinces(&self) -> Result<Vec<Province>> {
        let records: Vec<ProvinceRecord> = self.fetch("/provinces.json").await?;
        Ok(records
            .into_iter()
            .map(|r| Province {
                id: r.id,
                name: r.name,
            })
            .collect())
    }

    async fn cities(&self, province_id: &str) -> Result<Vec<City>> {
        let records: Vec<RegencyRecord> = self
            .fetch(&format!("/regencies/{}.json", province_id))
            .await?;
        Ok(records
            .into_iter()
            .map(|r| City {
                id: r.id,
                province_id: r.province_id,
                name: r.name,
            })
            .collect())
    }
}
