//! Per-user shipping addresses

use super::repository::AddressRepository;
use super::validation::{present, required};
use crate::contract::{Address, AddressFields, AddressPatch, AuthContext, MarketplaceError};
use std::sync::Arc;

pub struct AddressService {
    addresses: Arc<dyn AddressRepository>,
}

fn validate(patch: &AddressPatch) -> Result<AddressFields, MarketplaceError> {
    Ok(AddressFields {
        title: required(patch.title.as_deref(), "address title")?,
        recipient_name: required(patch.recipient_name.as_deref(), "recipient name")?,
        phone: required(patch.phone.as_deref(), "phone")?,
        detail: required(patch.detail.as_deref(), "address detail")?,
    })
}

impl AddressService {
    pub fn new(addresses: Arc<dyn AddressRepository>) -> Self {
        Self { addresses }
    }

    pub async fn list(&self, actor: &AuthContext) -> Result<Vec<Address>, MarketplaceError> {
        self.addresses
            .list_by_user(actor.user_id)
            .await
            .map_err(MarketplaceError::internal)
    }

    /// Wrong id and wrong owner are both reported as not found
    pub async fn get(&self, actor: &AuthContext, id: i32) -> Result<Address, MarketplaceError> {
        self.addresses
            .find(id, actor.user_id)
            .await
            .map_err(MarketplaceError::internal)?
            .ok_or_else(|| MarketplaceError::not_found("address", id))
    }

    pub async fn create(
        &self,
        actor: &AuthContext,
        input: AddressPatch,
    ) -> Result<Address, MarketplaceError> {
        let fields = validate(&input)?;
        self.addresses
            .create(actor.user_id, &fields)
            .await
            .map_err(MarketplaceError::internal)
    }

    pub async fn update(
        &self,
        actor: &AuthContext,
        id: i32,
        patch: AddressPatch,
    ) -> Result<Address, MarketplaceError> {
        let mut address = self.get(actor, id).await?;

        if let Some(title) = present(patch.title.as_deref()) {
            address.title = title;
        }
        if let Some(name) = present(patch.recipient_name.as_deref()) {
            address.recipient_name = name;
        }
        if let Some(phone) = present(patch.phone.as_deref()) {
            address.phone = phone;
        }
        if let Some(detail) = present(patch.detail.as_deref()) {
            address.detail = detail;
        }

        // Re-validate the merged record
        validate(&AddressPatch {
            title: Some(address.title.clone()),
            recipient_name: Some(address.recipient_name.clone()),
            phone: Some(address.phone.clone()),
            detail: Some(address.detail.clone()),
        })?;

        self.addresses
            .update(&address)
            .await
            .map_err(MarketplaceError::internal)
    }

    pub async fn delete(&self, actor: &AuthContext, id: i32) -> Result<(), MarketplaceError> {
        let deleted = self
            .addresses
            .delete(id, actor.user_id)
            .await
            .map_err(MarketplaceError::internal)?;
        if deleted {
            Ok(())
        } else {
            Err(MarketplaceError::not_found("address", id))
        }
    }
}
