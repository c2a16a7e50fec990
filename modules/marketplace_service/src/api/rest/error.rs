//! HTTP error mapping to RFC-9457 Problem Details

use crate::contract::MarketplaceError;
use axum::{
    extract::{multipart::MultipartError, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

/// RFC-9457 Problem Details for HTTP API errors
#[derive(Debug, Serialize, Deserialize)]
pub struct Problem {
    /// A URI reference that identifies the problem type
    #[serde(rename = "type")]
    pub type_uri: String,

    /// A short, human-readable summary of the problem type
    pub title: String,

    /// The HTTP status code
    pub status: u16,

    /// A human-readable explanation specific to this occurrence
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,

    /// Rejected items of a partially failed batch
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
}

impl Problem {
    /// Create a new Problem Details response
    pub fn new(status: StatusCode, title: impl Into<String>) -> Self {
        Self {
            type_uri: format!("https://httpstatuses.io/{}", status.as_u16()),
            title: title.into(),
            status: status.as_u16(),
            detail: None,
            errors: Vec::new(),
        }
    }

    /// Add detail message
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn bad_request(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "Bad Request").with_detail(detail)
    }
}

impl IntoResponse for Problem {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let mut response = (status, Json(self)).into_response();
        response.headers_mut().insert(
            axum::http::header::CONTENT_TYPE,
            axum::http::HeaderValue::from_static("application/problem+json"),
        );
        response
    }
}

impl From<MarketplaceError> for Problem {
    fn from(error: MarketplaceError) -> Self {
        map_domain_error(error)
    }
}

/// Map domain errors to HTTP Problem Details
pub fn map_domain_error(error: MarketplaceError) -> Problem {
    match error {
        MarketplaceError::Validation { message } => {
            Problem::new(StatusCode::BAD_REQUEST, "Validation Error").with_detail(message)
        }

        MarketplaceError::Unauthorized { reason } => {
            Problem::new(StatusCode::UNAUTHORIZED, "Unauthorized").with_detail(reason)
        }

        MarketplaceError::Forbidden { reason } => {
            Problem::new(StatusCode::FORBIDDEN, "Forbidden").with_detail(reason)
        }

        MarketplaceError::NotFound { resource, id } => Problem::new(
            StatusCode::NOT_FOUND,
            format!("{} Not Found", resource),
        )
        .with_detail(format!("{} with id '{}' was not found", resource, id)),

        MarketplaceError::Conflict { reason } => {
            Problem::new(StatusCode::CONFLICT, "Conflict").with_detail(reason)
        }

        MarketplaceError::InsufficientStock { product } => Problem::new(
            StatusCode::BAD_REQUEST,
            "Insufficient Stock",
        )
        .with_detail(format!("Insufficient stock for product '{}'", product)),

        MarketplaceError::InvalidPriceFormat { product_id, price } => Problem::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Invalid Price Format",
        )
        .with_detail(format!(
            "Stored price '{}' of product {} is not a whole number",
            price, product_id
        )),

        MarketplaceError::Upstream { message } => Problem::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Upstream Error",
        )
        .with_detail(message),

        MarketplaceError::Internal => Problem::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Internal Server Error",
        )
        .with_detail("An unexpected error occurred"),
    }
}

/// Malformed JSON bodies are reported as 400 with the parser's message
pub fn map_json_rejection(rejection: JsonRejection) -> Problem {
    Problem::new(StatusCode::BAD_REQUEST, "Invalid Request Body").with_detail(rejection.body_text())
}

pub fn map_multipart_error(error: MultipartError) -> Problem {
    Problem::new(StatusCode::BAD_REQUEST, "Invalid Multipart Body").with_detail(error.body_text())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_per_variant() {
        let cases = [
            (MarketplaceError::validation("x"), 400),
            (MarketplaceError::unauthorized("x"), 401),
            (MarketplaceError::forbidden("x"), 403),
            (MarketplaceError::not_found("product", 7), 404),
            (MarketplaceError::conflict("x"), 409),
            (
                MarketplaceError::InsufficientStock {
                    product: "Kopi".to_string(),
                },
                400,
            ),
            (
                MarketplaceError::InvalidPriceFormat {
                    product_id: 1,
                    price: "12.5".to_string(),
                },
                500,
            ),
            (
                MarketplaceError::Upstream {
                    message: "down".to_string(),
                },
                500,
            ),
            (MarketplaceError::Internal, 500),
        ];
        for (error, status) in cases {
            assert_eq!(map_domain_error(error).status, status);
        }
    }

    #[test]
    fn test_not_found_detail_names_resource_and_id() {
        let problem = map_domain_error(MarketplaceError::not_found("order", 12));
        assert_eq!(problem.title, "order Not Found");
        assert_eq!(problem.detail.as_deref(), Some("order with id '12' was not found"));
    }
}
