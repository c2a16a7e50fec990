//! Contract error types for the marketplace service
//!
//! These errors are transport-agnostic; the REST layer maps them to
//! problem responses.

use thiserror::Error;

/// Marketplace domain errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MarketplaceError {
    /// Malformed or missing input
    #[error("Validation error: {message}")]
    Validation { message: String },

    /// Missing, invalid or expired token, or bad credentials
    #[error("Unauthorized: {reason}")]
    Unauthorized { reason: String },

    /// Authenticated but not the owner or not an administrator
    #[error("Forbidden: {reason}")]
    Forbidden { reason: String },

    /// Id does not resolve (or does not resolve for the caller)
    #[error("{resource} not found: {id}")]
    NotFound { resource: String, id: String },

    /// Duplicate unique resource
    #[error("Conflict: {reason}")]
    Conflict { reason: String },

    /// Requested quantity exceeds available stock
    #[error("Insufficient stock for product {product}")]
    InsufficientStock { product: String },

    /// Stored consumer price is not an integer
    #[error("Invalid price format for product {product_id}: '{price}'")]
    InvalidPriceFormat { product_id: i32, price: String },

    /// Region directory failure
    #[error("Upstream error: {message}")]
    Upstream { message: String },

    /// Storage or hashing failure
    #[error("Internal error")]
    Internal,
}

impl MarketplaceError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn unauthorized(reason: impl Into<String>) -> Self {
        Self::Unauthorized {
            reason: reason.into(),
        }
    }

    pub fn forbidden(reason: impl Into<String>) -> Self {
        Self::Forbidden {
            reason: reason.into(),
        }
    }

    pub fn not_found(resource: impl Into<String>, id: impl ToString) -> Self {
        Self::NotFound {
            resource: resource.into(),
            id: id.to_string(),
        }
    }

    pub fn conflict(reason: impl Into<String>) -> Self {
        Self::Conflict {
            reason: reason.into(),
        }
    }

    /// Log a storage failure and collapse it into [`MarketplaceError::Internal`]
    pub fn internal(error: anyhow::Error) -> Self {
        tracing::error!(error = ?error, "internal marketplace error");
        Self::Internal
    }
}
