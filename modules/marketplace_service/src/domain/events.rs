//! Post-commit hooks
//!
//! Side effects that run after a primary transaction has committed. A hook
//! failure is logged and reported back to the runner's caller, but it never
//! turns a committed operation into a failed one.

use super::repository::SnapshotRepository;
use crate::contract::{Order, Product};
use async_trait::async_trait;
use std::sync::Arc;

/// Committed facts that hooks react to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitEvent {
    /// An order and its lines were committed. `products` holds each line's
    /// product as re-read inside the transaction, aligned with `order.lines`.
    OrderPlaced { order: Order, products: Vec<Product> },
}

#[async_trait]
pub trait PostCommitHook: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    async fn on_commit(&self, event: &CommitEvent) -> anyhow::Result<()>;
}

/// Failure captured from a single hook
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HookFailure {
    pub hook: &'static str,
    pub error: String,
}

/// Ordered list of hooks run after a commit
#[derive(Clone, Default)]
pub struct PostCommitHooks {
    hooks: Vec<Arc<dyn PostCommitHook>>,
}

impl PostCommitHooks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, hook: Arc<dyn PostCommitHook>) -> Self {
        self.hooks.push(hook);
        self
    }

    /// Run every hook; failures are logged and returned, never propagated
    pub async fn run(&self, event: &CommitEvent) -> Vec<HookFailure> {
        let mut failures = Vec::new();
        for hook in &self.hooks {
            if let Err(e) = hook.on_commit(event).await {
                tracing::warn!(hook = hook.name(), error = %e, "post-commit hook failed");
                failures.push(HookFailure {
                    hook: hook.name(),
                    error: e.to_string(),
                });
            }
        }
        failures
    }
}

/// Writes one product snapshot per committed order line
pub struct SnapshotHook {
    snapshots: Arc<dyn SnapshotRepository>,
}

impl SnapshotHook {
    pub fn new(snapshots: Arc<dyn SnapshotRepository>) -> Self {
        Self { snapshots }
    }
}

#[async_trait]
impl PostCommitHook for SnapshotHook {
    fn name(&self) -> &'static str {
        "product_snapshot"
    }

    async fn on_commit(&self, event: &CommitEvent) -> anyhow::Result<()> {
        match event {
            CommitEvent::OrderPlaced { order, products } => {
                let mut failed = Vec::new();
                for product in products {
                    if let Err(e) = self.snapshots.record(product).await {
                        tracing::warn!(
                            order_id = order.id,
                            product_id = product.id,
                            error = %e,
                            "failed to record product snapshot"
                        );
                        failed.push(product.id);
                    }
                }
                if failed.is_empty() {
                    Ok(())
                } else {
                    anyhow::bail!(
                        "snapshots missing for products {:?} of order {}",
                        failed,
                        order.id
                    )
                }
            }
        }
    }
}
