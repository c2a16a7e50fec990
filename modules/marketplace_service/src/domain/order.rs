//! Order placement and order history
//!
//! Placement validates the request, pre-checks every line against live
//! stock, then hands a fully priced order to the repository, which commits
//! it atomically and re-checks stock under lock. Post-commit hooks (product
//! snapshots) run afterwards and cannot fail the order.

use super::events::{CommitEvent, PostCommitHooks};
use super::pagination::{Page, PageRequest};
use super::repository::{
    AddressRepository, OrderCommitError, OrderRepository, ProductRepository, SnapshotRepository,
};
use super::validation;
use crate::contract::{
    AuthContext, MarketplaceError, NewOrder, NewOrderLine, Order, OrderRequest, Product,
    ProductSnapshot,
};
use std::collections::HashMap;
use std::sync::Arc;

pub struct OrderService {
    orders: Arc<dyn OrderRepository>,
    products: Arc<dyn ProductRepository>,
    addresses: Arc<dyn AddressRepository>,
    snapshots: Arc<dyn SnapshotRepository>,
    hooks: PostCommitHooks,
}

/// Consumer price as an integer amount
fn unit_price(product: &Product) -> Result<i64, MarketplaceError> {
    product
        .consumer_price
        .trim()
        .parse::<i64>()
        .map_err(|_| MarketplaceError::InvalidPriceFormat {
            product_id: product.id,
            price: product.consumer_price.clone(),
        })
}

impl OrderService {
    pub fn new(
        orders: Arc<dyn OrderRepository>,
        products: Arc<dyn ProductRepository>,
        addresses: Arc<dyn AddressRepository>,
        snapshots: Arc<dyn SnapshotRepository>,
        hooks: PostCommitHooks,
    ) -> Self {
        Self {
            orders,
            products,
            addresses,
            snapshots,
            hooks,
        }
    }

    pub async fn place_order(
        &self,
        actor: &AuthContext,
        request: OrderRequest,
    ) -> Result<Order, MarketplaceError> {
        let payment_method = request.payment_method.trim();
        if payment_method.is_empty() {
            return Err(MarketplaceError::validation("payment method is required"));
        }

        let address_id = i32::try_from(request.address_id)
            .ok()
            .filter(|id| *id > 0)
            .ok_or_else(|| MarketplaceError::validation("shipping address not found"))?;
        self.addresses
            .find(address_id, actor.user_id)
            .await
            .map_err(MarketplaceError::internal)?
            .ok_or_else(|| MarketplaceError::validation("shipping address not found"))?;

        if request.items.is_empty() {
            return Err(MarketplaceError::validation("order must contain at least one item"));
        }
        let mut items = Vec::with_capacity(request.items.len());
        for (index, item) in request.items.iter().enumerate() {
            let position = index + 1;
            let product_id =
                validation::positive_id(item.product_id, &format!("item {} product id", position))?;
            let quantity =
                validation::positive_id(item.quantity, &format!("item {} quantity", position))?;
            items.push((product_id, quantity));
        }

        // Sequential so that later lines see the quantity claimed by earlier ones
        let mut claimed: HashMap<i32, i64> = HashMap::new();
        let mut lines = Vec::with_capacity(items.len());
        let mut total_price: i64 = 0;
        for (product_id, quantity) in items {
            let product = self
                .products
                .find_by_id(product_id)
                .await
                .map_err(MarketplaceError::internal)?
                .ok_or_else(|| MarketplaceError::not_found("product", product_id))?;

            let already = claimed.entry(product_id).or_insert(0);
            if i64::from(product.stock) - *already < i64::from(quantity) {
                return Err(MarketplaceError::InsufficientStock {
                    product: product.name,
                });
            }
            *already += i64::from(quantity);

            let line_total = unit_price(&product)?
                .checked_mul(i64::from(quantity))
                .ok_or_else(|| MarketplaceError::validation("order total is too large"))?;
            total_price = total_price
                .checked_add(line_total)
                .ok_or_else(|| MarketplaceError::validation("order total is too large"))?;
            lines.push(NewOrderLine {
                product_id,
                quantity,
                total_price: line_total,
            });
        }

        let order = NewOrder {
            user_id: actor.user_id,
            address_id,
            payment_method: payment_method.to_string(),
            total_price,
            lines,
        };

        let committed = self.orders.commit(&order).await.map_err(|e| match e {
            OrderCommitError::InsufficientStock { name, .. } => {
                MarketplaceError::InsufficientStock { product: name }
            }
            OrderCommitError::ProductMissing(id) => MarketplaceError::not_found("product", id),
            OrderCommitError::Storage(e) => MarketplaceError::internal(e),
        })?;
        tracing::info!(
            order_id = committed.order.id,
            invoice = %committed.order.invoice_code,
            user_id = actor.user_id,
            total = committed.order.total_price,
            "order placed"
        );

        let event = CommitEvent::OrderPlaced {
            order: committed.order.clone(),
            products: committed.line_products,
        };
        self.hooks.run(&event).await;

        Ok(committed.order)
    }

    pub async fn list_orders(
        &self,
        actor: &AuthContext,
        page: PageRequest,
    ) -> Result<Page<Order>, MarketplaceError> {
        let (items, total) = self
            .orders
            .list_by_user(actor.user_id, page.limit, page.offset())
            .await
            .map_err(MarketplaceError::internal)?;
        Ok(Page::new(items, page, total))
    }

    pub async fn get_order(&self, actor: &AuthContext, id: i32) -> Result<Order, MarketplaceError> {
        self.orders
            .find(id, actor.user_id)
            .await
            .map_err(MarketplaceError::internal)?
            .ok_or_else(|| MarketplaceError::not_found("order", id))
    }

    /// Purchase-time copies of a product, oldest first
    pub async fn product_snapshots(
        &self,
        product_id: i32,
    ) -> Result<Vec<ProductSnapshot>, MarketplaceError> {
        self.snapshots
            .list_by_product(product_id)
            .await
            .map_err(MarketplaceError::internal)
    }

    pub async fn store_snapshots(
        &self,
        store_id: i32,
    ) -> Result<Vec<ProductSnapshot>, MarketplaceError> {
        self.snapshots
            .list_by_store(store_id)
            .await
            .map_err(MarketplaceError::internal)
    }
}
