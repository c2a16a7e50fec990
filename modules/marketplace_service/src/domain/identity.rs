//! Registration, login, administrator seeding and self profile

use super::auth::{PasswordHasher, TokenService};
use super::repository::{is_unique_violation, UserRepository};
use super::validation::{self, present, required};
use crate::contract::{
    AuthContext, IssuedToken, MarketplaceError, NewStore, NewUser, ProfilePatch, Registration,
    Store, User,
};
use chrono::NaiveDate;
use std::sync::Arc;

/// Administrator account created at first startup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminSeed {
    pub email: String,
    pub password: String,
    pub name: String,
    pub phone: String,
    pub birth_date: NaiveDate,
    pub gender: String,
    pub about: String,
    pub occupation: String,
    pub province_id: String,
    pub city_id: String,
    pub store_name: String,
    pub store_slug: String,
}

pub struct IdentityService {
    users: Arc<dyn UserRepository>,
    hasher: Arc<dyn PasswordHasher>,
    tokens: Arc<TokenService>,
}

/// Store provisioned for every registered user
fn default_store(user: &User) -> NewStore {
    NewStore {
        user_id: user.id,
        name: format!("Toko {}", user.name),
        slug: format!("toko-{}", user.id),
    }
}

fn map_user_write_error(error: anyhow::Error) -> MarketplaceError {
    if is_unique_violation(&error) {
        MarketplaceError::conflict("email or phone number is already registered")
    } else {
        MarketplaceError::internal(error)
    }
}

impl IdentityService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        hasher: Arc<dyn PasswordHasher>,
        tokens: Arc<TokenService>,
    ) -> Self {
        Self {
            users,
            hasher,
            tokens,
        }
    }

    /// Create a user and its default store atomically
    pub async fn register(&self, input: Registration) -> Result<(User, Store), MarketplaceError> {
        let password = input
            .password
            .filter(|p| !p.trim().is_empty())
            .ok_or_else(|| MarketplaceError::validation("password is required"))?;
        let email = required(input.email.as_deref(), "email")?;
        let name = required(input.name.as_deref(), "name")?;
        let phone = required(input.phone.as_deref(), "phone")?;
        let birth_date = required(input.birth_date.as_deref(), "birth date")?;
        let gender = required(input.gender.as_deref(), "gender")?;
        let occupation = required(input.occupation.as_deref(), "occupation")?;
        let province_id = required(input.province_id.as_deref(), "province id")?;
        let city_id = required(input.city_id.as_deref(), "city id")?;
        let birth_date = validation::birth_date(&birth_date)?;

        let password_hash = self.hash_password(password).await?;
        let user = NewUser {
            name,
            email,
            password_hash,
            phone,
            birth_date,
            gender,
            about: present(input.about.as_deref()),
            occupation,
            province_id,
            city_id,
            is_admin: false,
        };

        let (user, store) = self
            .users
            .create_with_store(&user, &default_store)
            .await
            .map_err(map_user_write_error)?;
        tracing::info!(user_id = user.id, store_id = store.id, "user registered");
        Ok((user, store))
    }

    pub async fn login(
        &self,
        email: &str,
        password: &str,
    ) -> Result<IssuedToken, MarketplaceError> {
        let credentials = self
            .users
            .find_credentials_by_email(email.trim())
            .await
            .map_err(MarketplaceError::internal)?
            .ok_or_else(|| MarketplaceError::unauthorized("invalid email or password"))?;

        let hasher = self.hasher.clone();
        let password = password.to_string();
        let hash = credentials.password_hash.clone();
        let valid = tokio::task::spawn_blocking(move || hasher.verify(&password, &hash))
            .await
            .map_err(|e| MarketplaceError::internal(e.into()))?;
        if !valid {
            return Err(MarketplaceError::unauthorized("invalid email or password"));
        }

        self.tokens.issue(credentials.user_id, credentials.is_admin)
    }

    /// Create the administrator unless one already exists. Returns whether
    /// an account was created.
    pub async fn seed_admin(&self, seed: &AdminSeed) -> Result<bool, MarketplaceError> {
        let exists = self
            .users
            .admin_exists(&seed.email)
            .await
            .map_err(MarketplaceError::internal)?;
        if exists {
            tracing::info!("administrator already present, skipping seed");
            return Ok(false);
        }

        let password_hash = self.hash_password(seed.password.clone()).await?;
        let user = NewUser {
            name: seed.name.clone(),
            email: seed.email.clone(),
            password_hash,
            phone: seed.phone.clone(),
            birth_date: seed.birth_date,
            gender: seed.gender.clone(),
            about: Some(seed.about.clone()),
            occupation: seed.occupation.clone(),
            province_id: seed.province_id.clone(),
            city_id: seed.city_id.clone(),
            is_admin: true,
        };
        let store_name = seed.store_name.clone();
        let store_slug = seed.store_slug.clone();
        let provision = move |user: &User| NewStore {
            user_id: user.id,
            name: store_name.clone(),
            slug: store_slug.clone(),
        };

        let (user, _) = self
            .users
            .create_with_store(&user, &provision)
            .await
            .map_err(MarketplaceError::internal)?;
        tracing::info!(user_id = user.id, email = %user.email, "administrator seeded");
        Ok(true)
    }

    pub async fn profile(&self, actor: &AuthContext) -> Result<User, MarketplaceError> {
        self.users
            .find_by_id(actor.user_id)
            .await
            .map_err(MarketplaceError::internal)?
            .ok_or_else(|| MarketplaceError::not_found("user", actor.user_id))
    }

    pub async fn update_profile(
        &self,
        actor: &AuthContext,
        patch: ProfilePatch,
    ) -> Result<User, MarketplaceError> {
        let mut user = self.profile(actor).await?;

        if let Some(name) = present(patch.name.as_deref()) {
            user.name = name;
        }
        if let Some(email) = present(patch.email.as_deref()) {
            user.email = email;
        }
        if let Some(phone) = present(patch.phone.as_deref()) {
            user.phone = phone;
        }
        if let Some(date) = present(patch.birth_date.as_deref()) {
            user.birth_date = validation::birth_date(&date)?;
        }
        if let Some(gender) = present(patch.gender.as_deref()) {
            user.gender = gender;
        }
        if let Some(about) = present(patch.about.as_deref()) {
            user.about = Some(about);
        }
        if let Some(occupation) = present(patch.occupation.as_deref()) {
            user.occupation = occupation;
        }
        if let Some(province_id) = present(patch.province_id.as_deref()) {
            user.province_id = province_id;
        }
        if let Some(city_id) = present(patch.city_id.as_deref()) {
            user.city_id = city_id;
        }

        let password_hash = match patch.password.filter(|p| !p.trim().is_empty()) {
            Some(password) => Some(self.hash_password(password).await?),
            None => None,
        };

        self.users
            .update(&user, password_hash.as_deref())
            .await
            .map_err(map_user_write_error)
    }

    async fn hash_password(&self, password: String) -> Result<String, MarketplaceError> {
        let hasher = self.hasher.clone();
        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| MarketplaceError::internal(e.into()))?
            .map_err(MarketplaceError::internal)
    }
}
