//! Route registration and OpenAPI document

use super::{auth, dto::*, handlers};
use crate::module::MarketplaceServices;
use axum::{
    extract::DefaultBodyLimit,
    middleware::{from_fn, from_fn_with_state},
    routing::{delete, get, post, put},
    Extension, Json, Router,
};
use std::path::Path;
use std::sync::Arc;
use tower_http::services::ServeDir;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(title = "Marketplace API", description = "Stores, catalog, addresses and orders"),
    components(schemas(
        PaginationDto,
        RegisterRequest,
        LoginRequest,
        TokenDto,
        UserDto,
        RegistrationDto,
        StoreRequest,
        StoreDto,
        AddressRequest,
        AddressDto,
        CategoryRequest,
        CategoryDto,
        PhotoDto,
        ProductDto,
        SnapshotDto,
        OrderRequestDto,
        OrderItemDto,
        OrderLineDto,
        OrderDto,
        ProvinceDto,
        CityDto,
        StoredImageDto,
        UploadDto,
        MultiUploadDto,
    ))
)]
pub struct ApiDoc;

async fn openapi_document() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Register all REST routes on `router`
///
/// Requests larger than `body_limit` bytes are rejected before multipart
/// parsing; files under `upload_dir` are served at `/uploads`.
pub fn register_routes(
    router: Router,
    services: Arc<MarketplaceServices>,
    upload_dir: &Path,
    body_limit: usize,
) -> Router {
    let tokens = services.tokens.clone();

    let public = Router::new()
        .route("/auth/register", post(handlers::register))
        .route("/auth/login", post(handlers::login))
        .route("/category", get(handlers::list_categories))
        .route("/category/{id}", get(handlers::get_category))
        .route("/product", get(handlers::list_products))
        .route("/product/{id}", get(handlers::get_product))
        .route("/product/{id}/snapshots", get(handlers::product_snapshots))
        .route("/product/photos/{product_id}", get(handlers::list_product_photos))
        .route("/toko", get(handlers::list_stores))
        .route("/toko/{id_toko}", get(handlers::get_store))
        .route("/toko/{id_toko}/snapshots", get(handlers::store_snapshots))
        .route("/provcity/listprovincies", get(handlers::list_provinces))
        .route("/provcity/listcities/{prov_id}", get(handlers::list_cities))
        .route("/provcity/listallcities", get(handlers::list_all_cities))
        .route("/provcity/detailprovince/{prov_id}", get(handlers::province_detail))
        .route("/provcity/detailcity/{city_id}", get(handlers::city_detail))
        .route("/api-docs/openapi.json", get(openapi_document));

    let authenticated = Router::new()
        .route("/api/profile", get(handlers::get_profile).put(handlers::update_profile))
        .route("/product", post(handlers::create_product))
        .route(
            "/product/{id}",
            put(handlers::update_product).delete(handlers::delete_product),
        )
        .route("/product/photo/{foto_id}", delete(handlers::delete_product_photo))
        .route("/toko", post(handlers::create_store))
        .route("/toko/my", get(handlers::my_store))
        .route("/toko/{id_toko}", put(handlers::update_store))
        .route(
            "/user/alamat",
            get(handlers::list_addresses).post(handlers::create_address),
        )
        .route(
            "/user/alamat/{id}",
            get(handlers::get_address)
                .put(handlers::update_address)
                .delete(handlers::delete_address),
        )
        .route("/trx", get(handlers::list_orders).post(handlers::place_order))
        .route("/trx/{id}", get(handlers::get_order))
        .route("/upload/product/assign", post(handlers::upload_and_assign))
        .route(
            "/upload/product/assign-multiple",
            post(handlers::upload_many_and_assign),
        )
        .route_layer(from_fn_with_state(tokens.clone(), auth::require_auth));

    // Layers run outside-in: the token check wraps the admin check
    let admin = Router::new()
        .route("/category", post(handlers::create_category))
        .route(
            "/category/{id}",
            put(handlers::update_category).delete(handlers::delete_category),
        )
        .route_layer(from_fn(auth::require_admin))
        .route_layer(from_fn_with_state(tokens, auth::require_auth));

    router
        .merge(public)
        .merge(authenticated)
        .merge(admin)
        .nest_service("/uploads", ServeDir::new(upload_dir))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(Extension(services))
}
