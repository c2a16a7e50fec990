//! Categories, products and product photos

use super::pagination::{Page, PageRequest};
use super::repository::{
    CategoryRepository, PhotoRepository, ProductFilter, ProductRepository, StoreRepository,
};
use super::validation::{self, required};
use crate::contract::{
    AuthContext, Category, MarketplaceError, NewProduct, Product, ProductPatch, ProductPhoto,
};
use std::sync::Arc;

pub struct CatalogService {
    categories: Arc<dyn CategoryRepository>,
    products: Arc<dyn ProductRepository>,
    photos: Arc<dyn PhotoRepository>,
    stores: Arc<dyn StoreRepository>,
}

impl CatalogService {
    pub fn new(
        categories: Arc<dyn CategoryRepository>,
        products: Arc<dyn ProductRepository>,
        photos: Arc<dyn PhotoRepository>,
        stores: Arc<dyn StoreRepository>,
    ) -> Self {
        Self {
            categories,
            products,
            photos,
            stores,
        }
    }

    // ===== Categories =====

    pub async fn list_categories(&self) -> Result<Vec<Category>, MarketplaceError> {
        self.categories
            .list()
            .await
            .map_err(MarketplaceError::internal)
    }

    pub async fn get_category(&self, id: i32) -> Result<Category, MarketplaceError> {
        self.categories
            .find_by_id(id)
            .await
            .map_err(MarketplaceError::internal)?
            .ok_or_else(|| MarketplaceError::not_found("category", id))
    }

    pub async fn create_category(&self, name: Option<&str>) -> Result<Category, MarketplaceError> {
        let name = required(name, "category name")?;
        self.categories
            .create(&name)
            .await
            .map_err(MarketplaceError::internal)
    }

    pub async fn update_category(
        &self,
        id: i32,
        name: Option<&str>,
    ) -> Result<Category, MarketplaceError> {
        let name = required(name, "category name")?;
        let mut category = self.get_category(id).await?;
        category.name = name;
        self.categories
            .update(&category)
            .await
            .map_err(MarketplaceError::internal)
    }

    /// Soft delete; products keep their category id
    pub async fn delete_category(&self, id: i32) -> Result<(), MarketplaceError> {
        self.get_category(id).await?;
        self.categories
            .soft_delete(id)
            .await
            .map_err(MarketplaceError::internal)
    }

    // ===== Products =====

    pub async fn list_products(
        &self,
        filter: &ProductFilter,
        page: PageRequest,
    ) -> Result<Page<Product>, MarketplaceError> {
        let (items, total) = self
            .products
            .list(filter, page.limit, page.offset())
            .await
            .map_err(MarketplaceError::internal)?;
        Ok(Page::new(items, page, total))
    }

    pub async fn get_product(&self, id: i32) -> Result<Product, MarketplaceError> {
        self.products
            .find_by_id(id)
            .await
            .map_err(MarketplaceError::internal)?
            .ok_or_else(|| MarketplaceError::not_found("product", id))
    }

    /// Create a product in the actor's own store. The optional photo is
    /// attached best effort.
    pub async fn create_product(
        &self,
        actor: &AuthContext,
        input: ProductPatch,
        photo_url: Option<String>,
    ) -> Result<Product, MarketplaceError> {
        let name = validation::product_name(input.name.as_deref().unwrap_or_default())?;
        let reseller_price = validation::price(
            input.reseller_price.as_deref().unwrap_or_default(),
            "reseller price",
        )?;
        let consumer_price = validation::price(
            input.consumer_price.as_deref().unwrap_or_default(),
            "consumer price",
        )?;
        let stock = validation::stock(
            input
                .stock
                .ok_or_else(|| MarketplaceError::validation("stock is required"))?,
        )?;
        let description =
            validation::description(input.description.as_deref().unwrap_or_default())?;
        let category_id =
            validation::positive_id(input.category_id.unwrap_or_default(), "category id")?;
        self.ensure_category(category_id).await?;

        let store = self
            .stores
            .find_by_user(actor.user_id)
            .await
            .map_err(MarketplaceError::internal)?
            .ok_or_else(|| {
                MarketplaceError::validation("user has no store, create one before adding products")
            })?;

        let product = NewProduct {
            store_id: store.id,
            category_id,
            slug: validation::slugify(&name),
            name,
            reseller_price,
            consumer_price,
            stock,
            description,
        };
        let mut product = self
            .products
            .create(&product)
            .await
            .map_err(MarketplaceError::internal)?;
        tracing::info!(product_id = product.id, store_id = store.id, "product created");

        if let Some(url) = photo_url {
            self.attach_best_effort(&mut product, &url).await;
        }
        Ok(product)
    }

    pub async fn update_product(
        &self,
        actor: &AuthContext,
        id: i32,
        patch: ProductPatch,
        photo_url: Option<String>,
    ) -> Result<Product, MarketplaceError> {
        let mut product = self.get_product(id).await?;
        self.ensure_product_owner(actor, id).await?;

        if let Some(name) = patch.name.as_deref() {
            product.name = validation::product_name(name)?;
            product.slug = validation::slugify(&product.name);
        }
        if let Some(price) = patch.reseller_price.as_deref() {
            product.reseller_price = validation::price(price, "reseller price")?;
        }
        if let Some(price) = patch.consumer_price.as_deref() {
            product.consumer_price = validation::price(price, "consumer price")?;
        }
        if let Some(stock) = patch.stock {
            product.stock = validation::stock(stock)?;
        }
        if let Some(description) = patch.description.as_deref() {
            product.description = validation::description(description)?;
        }
        if let Some(category_id) = patch.category_id {
            let category_id = validation::positive_id(category_id, "category id")?;
            self.ensure_category(category_id).await?;
            product.category_id = category_id;
        }

        let mut product = self
            .products
            .update(&product)
            .await
            .map_err(MarketplaceError::internal)?;

        if let Some(url) = photo_url {
            self.attach_best_effort(&mut product, &url).await;
        }
        Ok(product)
    }

    pub async fn delete_product(
        &self,
        actor: &AuthContext,
        id: i32,
    ) -> Result<(), MarketplaceError> {
        self.get_product(id).await?;
        self.ensure_product_owner(actor, id).await?;
        self.products
            .delete(id)
            .await
            .map_err(MarketplaceError::internal)?;
        tracing::info!(product_id = id, user_id = actor.user_id, "product deleted");
        Ok(())
    }

    // ===== Photos =====

    pub async fn add_photo(
        &self,
        actor: &AuthContext,
        product_id: i32,
        url: &str,
    ) -> Result<ProductPhoto, MarketplaceError> {
        self.get_product(product_id).await?;
        self.ensure_product_owner(actor, product_id).await?;
        self.photos
            .add(product_id, url)
            .await
            .map_err(MarketplaceError::internal)
    }

    /// All-or-nothing insert of several photos
    pub async fn add_photos(
        &self,
        actor: &AuthContext,
        product_id: i32,
        urls: &[String],
    ) -> Result<Vec<ProductPhoto>, MarketplaceError> {
        self.get_product(product_id).await?;
        self.ensure_product_owner(actor, product_id).await?;
        self.photos
            .add_many(product_id, urls)
            .await
            .map_err(MarketplaceError::internal)
    }

    pub async fn delete_photo(
        &self,
        actor: &AuthContext,
        photo_id: i32,
    ) -> Result<(), MarketplaceError> {
        self.photos
            .find_by_id(photo_id)
            .await
            .map_err(MarketplaceError::internal)?
            .ok_or_else(|| MarketplaceError::not_found("photo", photo_id))?;

        let owned = self
            .photos
            .is_owned_by(photo_id, actor.user_id)
            .await
            .map_err(MarketplaceError::internal)?;
        if !owned {
            return Err(MarketplaceError::forbidden("photo belongs to another store"));
        }

        self.photos
            .delete(photo_id)
            .await
            .map_err(MarketplaceError::internal)
    }

    pub async fn list_photos(
        &self,
        product_id: i32,
    ) -> Result<Vec<ProductPhoto>, MarketplaceError> {
        self.photos
            .list_by_product(product_id)
            .await
            .map_err(MarketplaceError::internal)
    }

    // ===== Helpers =====

    async fn ensure_category(&self, id: i32) -> Result<(), MarketplaceError> {
        let found = self
            .categories
            .find_by_id(id)
            .await
            .map_err(MarketplaceError::internal)?;
        match found {
            Some(_) => Ok(()),
            None => Err(MarketplaceError::validation(format!("category {} does not exist", id))),
        }
    }

    async fn ensure_product_owner(
        &self,
        actor: &AuthContext,
        product_id: i32,
    ) -> Result<(), MarketplaceError> {
        let owned = self
            .products
            .is_owned_by(product_id, actor.user_id)
            .await
            .map_err(MarketplaceError::internal)?;
        if owned {
            Ok(())
        } else {
            Err(MarketplaceError::forbidden("product belongs to another store"))
        }
    }

    async fn attach_best_effort(&self, product: &mut Product, url: &str) {
        match self.photos.add(product.id, url).await {
            Ok(photo) => product.photos.push(photo),
            Err(e) => {
                tracing::warn!(
                    product_id = product.id,
                    error = %e,
                    "failed to attach product photo"
                );
            }
        }
    }
}
