//! HTTP request handlers - thin layer that delegates to domain services

use super::{
    dto::*,
    error::{map_json_rejection, Problem},
    form,
};
use crate::contract::{AuthContext, MarketplaceError};
use crate::domain::{repository::ProductFilter, PageRequest};
use crate::module::MarketplaceServices;
use axum::{
    extract::{rejection::JsonRejection, Multipart, Path, Query},
    http::StatusCode,
    Extension, Json,
};
use std::sync::Arc;

type Services = Extension<Arc<MarketplaceServices>>;
type Reply<T> = Result<Json<ApiResponse<T>>, Problem>;
type Created<T> = Result<(StatusCode, Json<ApiResponse<T>>), Problem>;

fn body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, Problem> {
    payload.map(|Json(value)| value).map_err(map_json_rejection)
}

/// Path ids must be positive integers
fn parse_id(raw: &str, resource: &str) -> Result<i32, Problem> {
    raw.trim()
        .parse::<i32>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or_else(|| {
            Problem::from(MarketplaceError::validation(format!(
                "invalid {} id '{}'",
                resource, raw
            )))
        })
}

fn ok<T>(message: &str, data: T) -> Reply<T> {
    Ok(Json(ApiResponse::new(message, data)))
}

fn created<T>(message: &str, data: T) -> Created<T> {
    Ok((StatusCode::CREATED, Json(ApiResponse::new(message, data))))
}

fn list<T, U: From<T>>(items: Vec<T>) -> Vec<U> {
    items.into_iter().map(U::from).collect()
}

// ===== Auth & profile =====

pub async fn register(
    Extension(services): Services,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Created<RegistrationDto> {
    let req = body(payload)?;
    let (user, store) = services.identity.register(req.into()).await?;
    created(
        "registration successful",
        RegistrationDto {
            user: user.into(),
            store: store.into(),
        },
    )
}

pub async fn login(
    Extension(services): Services,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Reply<TokenDto> {
    let req = body(payload)?;
    let token = services
        .identity
        .login(
            req.email.as_deref().unwrap_or_default(),
            req.password.as_deref().unwrap_or_default(),
        )
        .await?;
    ok("login successful", token.into())
}

pub async fn get_profile(
    Extension(services): Services,
    Extension(actor): Extension<AuthContext>,
) -> Reply<UserDto> {
    let user = services.identity.profile(&actor).await?;
    ok("profile retrieved", user.into())
}

pub async fn update_profile(
    Extension(services): Services,
    Extension(actor): Extension<AuthContext>,
    payload: Result<Json<UpdateProfileRequest>, JsonRejection>,
) -> Reply<UserDto> {
    let req = body(payload)?;
    let user = services.identity.update_profile(&actor, req.into()).await?;
    ok("profile updated", user.into())
}

// ===== Categories =====

pub async fn list_categories(Extension(services): Services) -> Reply<Vec<CategoryDto>> {
    let categories = services.catalog.list_categories().await?;
    ok("categories retrieved", list(categories))
}

pub async fn get_category(
    Extension(services): Services,
    Path(id): Path<String>,
) -> Reply<CategoryDto> {
    let category = services.catalog.get_category(parse_id(&id, "category")?).await?;
    ok("category retrieved", category.into())
}

pub async fn create_category(
    Extension(services): Services,
    payload: Result<Json<CategoryRequest>, JsonRejection>,
) -> Created<CategoryDto> {
    let req = body(payload)?;
    let category = services
        .catalog
        .create_category(req.nama_category.as_deref())
        .await?;
    created("category created", category.into())
}

pub async fn update_category(
    Extension(services): Services,
    Path(id): Path<String>,
    payload: Result<Json<CategoryRequest>, JsonRejection>,
) -> Reply<CategoryDto> {
    let id = parse_id(&id, "category")?;
    let req = body(payload)?;
    let category = services
        .catalog
        .update_category(id, req.nama_category.as_deref())
        .await?;
    ok("category updated", category.into())
}

pub async fn delete_category(Extension(services): Services, Path(id): Path<String>) -> Reply<()> {
    services.catalog.delete_category(parse_id(&id, "category")?).await?;
    ok("category deleted", ())
}

// ===== Products =====

pub async fn list_products(
    Extension(services): Services,
    Query(query): Query<ProductListQuery>,
) -> Reply<Vec<ProductDto>> {
    let filter = ProductFilter::from(&query);
    let page = PageRequest::parse(query.limit.as_deref(), query.page.as_deref());
    let result = services.catalog.list_products(&filter, page).await?;
    Ok(Json(ApiResponse::paged(
        "products retrieved",
        list(result.items),
        result.info.into(),
    )))
}

pub async fn get_product(
    Extension(services): Services,
    Path(id): Path<String>,
) -> Reply<ProductDto> {
    let product = services.catalog.get_product(parse_id(&id, "product")?).await?;
    ok("product retrieved", product.into())
}

/// Store the optional form photo first; an invalid photo fails the request
async fn stage_photo(
    services: &MarketplaceServices,
    actor: &AuthContext,
    photo: Option<crate::contract::ImageUpload>,
) -> Result<Option<crate::contract::StoredImage>, Problem> {
    match photo {
        Some(upload) => Ok(Some(services.uploads.store(actor.user_id, &upload, None).await?)),
        None => Ok(None),
    }
}

pub async fn create_product(
    Extension(services): Services,
    Extension(actor): Extension<AuthContext>,
    multipart: Multipart,
) -> Created<ProductDto> {
    let form = form::product_form(multipart).await?;
    let stored = stage_photo(&services, &actor, form.photo).await?;

    let url = stored.as_ref().map(|s| s.url.clone());
    match services.catalog.create_product(&actor, form.patch, url).await {
        Ok(product) => created("product created", product.into()),
        Err(e) => {
            if let Some(image) = stored {
                services.uploads.discard(&[image]).await;
            }
            Err(e.into())
        }
    }
}

pub async fn update_product(
    Extension(services): Services,
    Extension(actor): Extension<AuthContext>,
    Path(id): Path<String>,
    multipart: Multipart,
) -> Reply<ProductDto> {
    let id = parse_id(&id, "product")?;
    let form = form::product_form(multipart).await?;
    let stored = stage_photo(&services, &actor, form.photo).await?;

    let url = stored.as_ref().map(|s| s.url.clone());
    match services.catalog.update_product(&actor, id, form.patch, url).await {
        Ok(product) => ok("product updated", product.into()),
        Err(e) => {
            if let Some(image) = stored {
                services.uploads.discard(&[image]).await;
            }
            Err(e.into())
        }
    }
}

pub async fn delete_product(
    Extension(services): Services,
    Extension(actor): Extension<AuthContext>,
    Path(id): Path<String>,
) -> Reply<()> {
    services
        .catalog
        .delete_product(&actor, parse_id(&id, "product")?)
        .await?;
    ok("product deleted", ())
}

pub async fn list_product_photos(
    Extension(services): Services,
    Path(product_id): Path<String>,
) -> Reply<Vec<PhotoDto>> {
    let photos = services
        .catalog
        .list_photos(parse_id(&product_id, "product")?)
        .await?;
    ok("photos retrieved", list(photos))
}

pub async fn delete_product_photo(
    Extension(services): Services,
    Extension(actor): Extension<AuthContext>,
    Path(photo_id): Path<String>,
) -> Reply<()> {
    services
        .catalog
        .delete_photo(&actor, parse_id(&photo_id, "photo")?)
        .await?;
    ok("photo deleted", ())
}

pub async fn product_snapshots(
    Extension(services): Services,
    Path(id): Path<String>,
) -> Reply<Vec<SnapshotDto>> {
    let snapshots = services
        .orders
        .product_snapshots(parse_id(&id, "product")?)
        .await?;
    ok("product snapshots retrieved", list(snapshots))
}

// ===== Stores =====

pub async fn list_stores(
    Extension(services): Services,
    Query(query): Query<StoreListQuery>,
) -> Reply<Vec<StoreDto>> {
    let page = PageRequest::parse(query.limit.as_deref(), query.page.as_deref());
    let result = services.stores.list(query.nama_toko.as_deref(), page).await?;
    Ok(Json(ApiResponse::paged(
        "stores retrieved",
        list(result.items),
        result.info.into(),
    )))
}

pub async fn get_store(Extension(services): Services, Path(id): Path<String>) -> Reply<StoreDto> {
    let store = services.stores.get(parse_id(&id, "store")?).await?;
    ok("store retrieved", store.into())
}

pub async fn my_store(
    Extension(services): Services,
    Extension(actor): Extension<AuthContext>,
) -> Reply<StoreDto> {
    let store = services.stores.mine(&actor).await?;
    ok("store retrieved", store.into())
}

pub async fn create_store(
    Extension(services): Services,
    Extension(actor): Extension<AuthContext>,
    payload: Result<Json<StoreRequest>, JsonRejection>,
) -> Created<StoreDto> {
    let req = body(payload)?;
    let store = services.stores.create(&actor, req.into()).await?;
    created("store created", store.into())
}

pub async fn update_store(
    Extension(services): Services,
    Extension(actor): Extension<AuthContext>,
    Path(id): Path<String>,
    payload: Result<Json<StoreRequest>, JsonRejection>,
) -> Reply<StoreDto> {
    let id = parse_id(&id, "store")?;
    let req = body(payload)?;
    let store = services.stores.update(&actor, id, req.into()).await?;
    ok("store updated", store.into())
}

pub async fn store_snapshots(
    Extension(services): Services,
    Path(id): Path<String>,
) -> Reply<Vec<SnapshotDto>> {
    let snapshots = services.orders.store_snapshots(parse_id(&id, "store")?).await?;
    ok("store snapshots retrieved", list(snapshots))
}

// ===== Addresses =====

pub async fn list_addresses(
    Extension(services): Services,
    Extension(actor): Extension<AuthContext>,
) -> Reply<Vec<AddressDto>> {
    let addresses = services.addresses.list(&actor).await?;
    ok("addresses retrieved", list(addresses))
}

pub async fn get_address(
    Extension(services): Services,
    Extension(actor): Extension<AuthContext>,
    Path(id): Path<String>,
) -> Reply<AddressDto> {
    let address = services.addresses.get(&actor, parse_id(&id, "address")?).await?;
    ok("address retrieved", address.into())
}

pub async fn create_address(
    Extension(services): Services,
    Extension(actor): Extension<AuthContext>,
    payload: Result<Json<AddressRequest>, JsonRejection>,
) -> Created<AddressDto> {
    let req = body(payload)?;
    let address = services.addresses.create(&actor, req.into()).await?;
    created("address created", address.into())
}

pub async fn update_address(
    Extension(services): Services,
    Extension(actor): Extension<AuthContext>,
    Path(id): Path<String>,
    payload: Result<Json<AddressRequest>, JsonRejection>,
) -> Reply<AddressDto> {
    let id = parse_id(&id, "address")?;
    let req = body(payload)?;
    let address = services.addresses.update(&actor, id, req.into()).await?;
    ok("address updated", address.into())
}

pub async fn delete_address(
    Extension(services): Services,
    Extension(actor): Extension<AuthContext>,
    Path(id): Path<String>,
) -> Reply<()> {
    services
        .addresses
        .delete(&actor, parse_id(&id, "address")?)
        .await?;
    ok("address deleted", ())
}

// ===== Orders =====

pub async fn list_orders(
    Extension(services): Services,
    Extension(actor): Extension<AuthContext>,
    Query(query): Query<PageQuery>,
) -> Reply<Vec<OrderDto>> {
    let page = PageRequest::parse(query.limit.as_deref(), query.page.as_deref());
    let result = services.orders.list_orders(&actor, page).await?;
    Ok(Json(ApiResponse::paged(
        "orders retrieved",
        list(result.items),
        result.info.into(),
    )))
}

pub async fn get_order(
    Extension(services): Services,
    Extension(actor): Extension<AuthContext>,
    Path(id): Path<String>,
) -> Reply<OrderDto> {
    let order = services.orders.get_order(&actor, parse_id(&id, "order")?).await?;
    ok("order retrieved", order.into())
}

pub async fn place_order(
    Extension(services): Services,
    Extension(actor): Extension<AuthContext>,
    payload: Result<Json<OrderRequestDto>, JsonRejection>,
) -> Created<OrderDto> {
    let req = body(payload)?;
    let order = services.orders.place_order(&actor, req.into()).await?;
    created("order placed", order.into())
}

// ===== Regions =====

pub async fn list_provinces(Extension(services): Services) -> Reply<Vec<ProvinceDto>> {
    let provinces = services.regions.list_provinces().await?;
    ok("provinces retrieved", list(provinces))
}

pub async fn list_cities(
    Extension(services): Services,
    Path(province_id): Path<String>,
) -> Reply<Vec<CityDto>> {
    let cities = services.regions.list_cities(&province_id).await?;
    ok("cities retrieved", list(cities))
}

pub async fn list_all_cities(Extension(services): Services) -> Reply<Vec<CityDto>> {
    let cities = services.regions.list_all_cities().await?;
    ok("cities retrieved", list(cities))
}

pub async fn province_detail(
    Extension(services): Services,
    Path(province_id): Path<String>,
) -> Reply<ProvinceDto> {
    let province = services.regions.get_province(&province_id).await?;
    ok("province retrieved", province.into())
}

pub async fn city_detail(
    Extension(services): Services,
    Path(city_id): Path<String>,
) -> Reply<CityDto> {
    let city = services.regions.get_city(&city_id).await?;
    ok("city retrieved", city.into())
}

// ===== Uploads =====

pub async fn upload_and_assign(
    Extension(services): Services,
    Extension(actor): Extension<AuthContext>,
    multipart: Multipart,
) -> Created<UploadDto> {
    let form = form::upload_form(multipart, "photo").await?;
    let product_id = form.product_id()?;
    let upload = form
        .files
        .into_iter()
        .next()
        .ok_or_else(|| Problem::from(MarketplaceError::validation("photo file is required")))?;

    let (stored, photo) = services
        .uploads
        .upload_and_assign(&actor, product_id, upload)
        .await?;
    created(
        "photo uploaded",
        UploadDto {
            file: stored.into(),
            photo: photo.into(),
        },
    )
}

/// 201 when every file was stored, 206 when only some were
pub async fn upload_many_and_assign(
    Extension(services): Services,
    Extension(actor): Extension<AuthContext>,
    multipart: Multipart,
) -> Created<MultiUploadDto> {
    let form = form::upload_form(multipart, "photos").await?;
    let product_id = form.product_id()?;

    let result = services
        .uploads
        .upload_many_and_assign(&actor, product_id, form.files)
        .await?;
    let (status, message) = if result.is_partial() {
        (StatusCode::PARTIAL_CONTENT, "some photos uploaded")
    } else {
        (StatusCode::CREATED, "photos uploaded")
    };
    Ok((status, Json(ApiResponse::new(message, result.into()))))
}
