//! Store management

use super::pagination::{Page, PageRequest};
use super::repository::{is_unique_violation, StoreRepository};
use super::validation::{self, present};
use crate::contract::{AuthContext, MarketplaceError, NewStore, Store, StorePatch};
use std::sync::Arc;

pub struct StoreService {
    stores: Arc<dyn StoreRepository>,
}

impl StoreService {
    pub fn new(stores: Arc<dyn StoreRepository>) -> Self {
        Self { stores }
    }

    pub async fn list(
        &self,
        name: Option<&str>,
        page: PageRequest,
    ) -> Result<Page<Store>, MarketplaceError> {
        let name = present(name);
        let (items, total) = self
            .stores
            .list(name.as_deref(), page.limit, page.offset())
            .await
            .map_err(MarketplaceError::internal)?;
        Ok(Page::new(items, page, total))
    }

    pub async fn get(&self, id: i32) -> Result<Store, MarketplaceError> {
        self.stores
            .find_by_id(id)
            .await
            .map_err(MarketplaceError::internal)?
            .ok_or_else(|| MarketplaceError::not_found("store", id))
    }

    pub async fn mine(&self, actor: &AuthContext) -> Result<Store, MarketplaceError> {
        self.stores
            .find_by_user(actor.user_id)
            .await
            .map_err(MarketplaceError::internal)?
            .ok_or_else(|| MarketplaceError::not_found("store of user", actor.user_id))
    }

    /// Open a store for the actor; a second store is a conflict
    pub async fn create(
        &self,
        actor: &AuthContext,
        patch: StorePatch,
    ) -> Result<Store, MarketplaceError> {
        let name = validation::store_name(patch.name.as_deref().unwrap_or_default())?;
        let slug = validation::store_slug(patch.slug.as_deref().unwrap_or_default())?;

        let existing = self
            .stores
            .find_by_user(actor.user_id)
            .await
            .map_err(MarketplaceError::internal)?;
        if existing.is_some() {
            return Err(MarketplaceError::conflict("user already has a store"));
        }

        let store = NewStore {
            user_id: actor.user_id,
            name,
            slug,
        };
        self.stores.create(&store).await.map_err(|e| {
            // Lost a race against a concurrent create
            if is_unique_violation(&e) {
                MarketplaceError::conflict("user already has a store")
            } else {
                MarketplaceError::internal(e)
            }
        })
    }

    pub async fn update(
        &self,
        actor: &AuthContext,
        id: i32,
        patch: StorePatch,
    ) -> Result<Store, MarketplaceError> {
        let mut store = self.get(id).await?;
        if store.user_id != actor.user_id {
            return Err(MarketplaceError::forbidden("store belongs to another user"));
        }

        if let Some(name) = patch.name.as_deref() {
            store.name = validation::store_name(name)?;
        }
        if let Some(slug) = patch.slug.as_deref() {
            store.slug = validation::store_slug(slug)?;
        }

        self.stores
            .update(&store)
            .await
            .map_err(MarketplaceError::internal)
    }
}
