//! Mappers between SeaORM entities and contract models

use super::entity;
use crate::contract::{
    Address, Category, Credentials, NewProduct, Order, OrderLine, Product, ProductPhoto,
    ProductSnapshot, Store, User,
};
use chrono::Utc;
use sea_orm::ActiveValue::{NotSet, Set};

impl From<entity::user::Model> for User {
    fn from(m: entity::user::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            email: m.email,
            phone: m.phone,
            birth_date: m.birth_date,
            gender: m.gender,
            about: m.about,
            occupation: m.occupation,
            province_id: m.province_id,
            city_id: m.city_id,
            is_admin: m.is_admin,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

impl From<&entity::user::Model> for Credentials {
    fn from(m: &entity::user::Model) -> Self {
        Self {
            user_id: m.id,
            password_hash: m.password_hash.clone(),
            is_admin: m.is_admin,
        }
    }
}

impl From<entity::store::Model> for Store {
    fn from(m: entity::store::Model) -> Self {
        Self {
            id: m.id,
            user_id: m.user_id,
            name: m.name,
            slug: m.slug,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

impl From<entity::address::Model> for Address {
    fn from(m: entity::address::Model) -> Self {
        Self {
            id: m.id,
            user_id: m.user_id,
            title: m.title,
            recipient_name: m.recipient_name,
            phone: m.phone,
            detail: m.detail,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

impl From<entity::category::Model> for Category {
    fn from(m: entity::category::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

impl From<entity::product_photo::Model> for ProductPhoto {
    fn from(m: entity::product_photo::Model) -> Self {
        Self {
            id: m.id,
            product_id: m.product_id,
            url: m.url,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

/// Product without photos; callers attach them when joined
impl From<entity::product::Model> for Product {
    fn from(m: entity::product::Model) -> Self {
        Self {
            id: m.id,
            store_id: m.store_id,
            category_id: m.category_id,
            name: m.name,
            slug: m.slug,
            reseller_price: m.reseller_price,
            consumer_price: m.consumer_price,
            stock: m.stock,
            description: m.description,
            created_at: m.created_at,
            updated_at: m.updated_at,
            photos: Vec::new(),
        }
    }
}

impl From<&NewProduct> for entity::product::ActiveModel {
    fn from(p: &NewProduct) -> Self {
        let now = Utc::now();
        Self {
            id: NotSet,
            store_id: Set(p.store_id),
            category_id: Set(p.category_id),
            name: Set(p.name.clone()),
            slug: Set(p.slug.clone()),
            reseller_price: Set(p.reseller_price.clone()),
            consumer_price: Set(p.consumer_price.clone()),
            stock: Set(p.stock),
            description: Set(p.description.clone()),
            created_at: Set(now),
            updated_at: Set(now),
            deleted_at: Set(None),
        }
    }
}

/// Order without lines; callers attach them
impl From<entity::order::Model> for Order {
    fn from(m: entity::order::Model) -> Self {
        Self {
            id: m.id,
            user_id: m.user_id,
            address_id: m.address_id,
            total_price: m.total_price,
            invoice_code: m.invoice_code,
            payment_method: m.payment_method,
            created_at: m.created_at,
            updated_at: m.updated_at,
            lines: Vec::new(),
        }
    }
}

impl From<entity::order_line::Model> for OrderLine {
    fn from(m: entity::order_line::Model) -> Self {
        Self {
            id: m.id,
            order_id: m.order_id,
            product_id: m.product_id,
            quantity: m.quantity,
            total_price: m.total_price,
            created_at: m.created_at,
            updated_at: m.updated_at,
            product: None,
        }
    }
}

impl From<entity::product_snapshot::Model> for ProductSnapshot {
    fn from(m: entity::product_snapshot::Model) -> Self {
        Self {
            id: m.id,
            product_id: m.product_id,
            store_id: m.store_id,
            category_id: m.category_id,
            name: m.name,
            slug: m.slug,
            reseller_price: m.reseller_price,
            consumer_price: m.consumer_price,
            description: m.description,
            created_at: m.created_at,
        }
    }
}

impl From<&Product> for entity::product_snapshot::ActiveModel {
    fn from(p: &Product) -> Self {
        Self {
            id: NotSet,
            product_id: Set(p.id),
            store_id: Set(p.store_id),
            category_id: Set(p.category_id),
            name: Set(p.name.clone()),
            slug: Set(p.slug.clone()),
            reseller_price: Set(p.reseller_price.clone()),
            consumer_price: Set(p.consumer_price.clone()),
            description: Set(p.description.clone()),
            created_at: Set(Utc::now()),
            deleted_at: Set(None),
        }
    }
}
