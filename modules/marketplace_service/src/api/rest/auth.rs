//! Access gate middleware
//!
//! `require_auth` verifies the bearer token and stores the resulting
//! [`AuthContext`] as a request extension; handlers take it with
//! `Extension<AuthContext>`. `require_admin` must be layered inside it.

use super::error::{map_domain_error, Problem};
use crate::contract::{AuthContext, MarketplaceError};
use crate::domain::TokenService;
use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

pub async fn require_auth(
    State(tokens): State<Arc<TokenService>>,
    mut request: Request,
    next: Next,
) -> Result<Response, Problem> {
    let header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok());
    let actor = tokens.verify_header(header).map_err(map_domain_error)?;

    request.extensions_mut().insert(actor);
    Ok(next.run(request).await)
}

pub async fn require_admin(request: Request, next: Next) -> Result<Response, Problem> {
    match request.extensions().get::<AuthContext>() {
        Some(actor) if actor.is_admin => Ok(next.run(request).await),
        Some(actor) => {
            tracing::debug!(user_id = actor.user_id, "admin route refused");
            Err(map_domain_error(MarketplaceError::forbidden("administrator access required")))
        }
        None => Err(map_domain_error(MarketplaceError::forbidden("administrator access required"))),
    }
}
