//! Mapper implementations for converting between DTOs and contract models
//!
//! Responses are built from contract models; requests are turned into the
//! contract's optional-field inputs so the services own all validation.

use super::dto::*;
use crate::contract;
use crate::domain::{repository::ProductFilter, validation, PageInfo};

// ===== Envelope =====

impl From<PageInfo> for PaginationDto {
    fn from(info: PageInfo) -> Self {
        Self {
            current_page: info.current_page,
            total_pages: info.total_pages,
            total_items: info.total_items,
            limit: info.limit,
            has_next: info.has_next,
            has_prev: info.has_prev,
        }
    }
}

// ===== Identity =====

impl From<contract::User> for UserDto {
    fn from(user: contract::User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            phone: user.phone,
            birth_date: user.birth_date,
            gender: user.gender,
            about: user.about,
            occupation: user.occupation,
            province_id: user.province_id,
            city_id: user.city_id,
            is_admin: user.is_admin,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

impl From<RegisterRequest> for contract::Registration {
    fn from(req: RegisterRequest) -> Self {
        Self {
            name: req.nama,
            email: req.email,
            password: req.password,
            phone: req.no_telp,
            birth_date: req.tanggal_lahir,
            gender: req.jenis_kelamin,
            about: req.tentang,
            occupation: req.pekerjaan,
            province_id: req.id_provinsi,
            city_id: req.id_kota,
        }
    }
}

impl From<RegisterRequest> for contract::ProfilePatch {
    fn from(req: RegisterRequest) -> Self {
        Self {
            name: req.nama,
            email: req.email,
            password: req.password,
            phone: req.no_telp,
            birth_date: req.tanggal_lahir,
            gender: req.jenis_kelamin,
            about: req.tentang,
            occupation: req.pekerjaan,
            province_id: req.id_provinsi,
            city_id: req.id_kota,
        }
    }
}

impl From<contract::IssuedToken> for TokenDto {
    fn from(token: contract::IssuedToken) -> Self {
        Self {
            token: token.token,
            expires_at: token.expires_at,
        }
    }
}

// ===== Stores =====

impl From<contract::Store> for StoreDto {
    fn from(store: contract::Store) -> Self {
        Self {
            id: store.id,
            user_id: store.user_id,
            name: store.name,
            slug: store.slug,
            created_at: store.created_at,
            updated_at: store.updated_at,
        }
    }
}

impl From<StoreRequest> for contract::StorePatch {
    fn from(req: StoreRequest) -> Self {
        Self {
            name: req.nama_toko,
            slug: req.url_toko,
        }
    }
}

// ===== Addresses =====

impl From<contract::Address> for AddressDto {
    fn from(address: contract::Address) -> Self {
        Self {
            id: address.id,
            user_id: address.user_id,
            title: address.title,
            recipient_name: address.recipient_name,
            phone: address.phone,
            detail: address.detail,
            created_at: address.created_at,
            updated_at: address.updated_at,
        }
    }
}

impl From<AddressRequest> for contract::AddressPatch {
    fn from(req: AddressRequest) -> Self {
        Self {
            title: req.judul_alamat,
            recipient_name: req.nama_penerima,
            phone: req.no_telp,
            detail: req.detail_alamat,
        }
    }
}

// ===== Catalog =====

impl From<contract::Category> for CategoryDto {
    fn from(category: contract::Category) -> Self {
        Self {
            id: category.id,
            name: category.name,
            created_at: category.created_at,
            updated_at: category.updated_at,
        }
    }
}

impl From<contract::ProductPhoto> for PhotoDto {
    fn from(photo: contract::ProductPhoto) -> Self {
        Self {
            id: photo.id,
            product_id: photo.product_id,
            url: photo.url,
            created_at: photo.created_at,
            updated_at: photo.updated_at,
        }
    }
}

impl From<contract::Product> for ProductDto {
    fn from(product: contract::Product) -> Self {
        Self {
            id: product.id,
            store_id: product.store_id,
            category_id: product.category_id,
            name: product.name,
            slug: product.slug,
            reseller_price: product.reseller_price,
            consumer_price: product.consumer_price,
            stock: product.stock,
            description: product.description,
            created_at: product.created_at,
            updated_at: product.updated_at,
            photos: product.photos.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<contract::ProductSnapshot> for SnapshotDto {
    fn from(snapshot: contract::ProductSnapshot) -> Self {
        Self {
            id: snapshot.id,
            product_id: snapshot.product_id,
            store_id: snapshot.store_id,
            category_id: snapshot.category_id,
            name: snapshot.name,
            slug: snapshot.slug,
            reseller_price: snapshot.reseller_price,
            consumer_price: snapshot.consumer_price,
            description: snapshot.description,
            created_at: snapshot.created_at,
        }
    }
}

/// Unparseable numeric filters are dropped rather than rejected
impl From<&ProductListQuery> for ProductFilter {
    fn from(query: &ProductListQuery) -> Self {
        Self {
            name: validation::present(query.nama_produk.as_deref()),
            category_id: validation::id_filter(query.category_id.as_deref()),
            store_id: validation::id_filter(query.toko_id.as_deref()),
            min_price: validation::price_filter(query.min_harga.as_deref()),
            max_price: validation::price_filter(query.max_harga.as_deref()),
        }
    }
}

// ===== Orders =====

impl From<contract::OrderLine> for OrderLineDto {
    fn from(line: contract::OrderLine) -> Self {
        Self {
            id: line.id,
            order_id: line.order_id,
            product_id: line.product_id,
            quantity: line.quantity,
            total_price: line.total_price,
            created_at: line.created_at,
            updated_at: line.updated_at,
            product: line.product.map(Into::into),
        }
    }
}

impl From<contract::Order> for OrderDto {
    fn from(order: contract::Order) -> Self {
        Self {
            id: order.id,
            user_id: order.user_id,
            address_id: order.address_id,
            total_price: order.total_price,
            invoice_code: order.invoice_code,
            payment_method: order.payment_method,
            created_at: order.created_at,
            updated_at: order.updated_at,
            lines: order.lines.into_iter().map(Into::into).collect(),
        }
    }
}

/// Missing numbers become 0 so the order engine reports them as invalid
impl From<OrderRequestDto> for contract::OrderRequest {
    fn from(req: OrderRequestDto) -> Self {
        Self {
            payment_method: req.method_bayar.unwrap_or_default(),
            address_id: req.alamat_kirim.unwrap_or_default(),
            items: req
                .detail_trx
                .into_iter()
                .map(|item| contract::LineItemRequest {
                    product_id: item.product_id.unwrap_or_default(),
                    quantity: item.kuantitas.unwrap_or_default(),
                })
                .collect(),
        }
    }
}

// ===== Regions =====

impl From<contract::Province> for ProvinceDto {
    fn from(province: contract::Province) -> Self {
        Self {
            id: province.id,
            name: province.name,
        }
    }
}

impl From<contract::City> for CityDto {
    fn from(city: contract::City) -> Self {
        Self {
            id: city.id,
            province_id: city.province_id,
            name: city.name,
        }
    }
}

// ===== Uploads =====

impl From<contract::StoredImage> for StoredImageDto {
    fn from(image: contract::StoredImage) -> Self {
        Self {
            file_name: image.file_name,
            url: image.url,
            size: image.size,
        }
    }
}

impl From<crate::domain::MultiUpload> for MultiUploadDto {
    fn from(result: crate::domain::MultiUpload) -> Self {
        Self {
            uploaded: result.uploaded.into_iter().map(Into::into).collect(),
            photos: result.photos.into_iter().map(Into::into).collect(),
            errors: result.errors,
        }
    }
}
