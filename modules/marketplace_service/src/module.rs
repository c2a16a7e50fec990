//! Module declaration and lifecycle implementation
//!
//! Lifecycle: `init` builds every service from the configuration and a
//! database connection, `migrate` brings the schema up to date,
//! `seed_admin` provisions the first administrator and `register_rest`
//! mounts the HTTP routes.

use crate::config::Config;
use crate::domain::{
    AddressService, CatalogService, FileStore, IdentityService, OrderService, PasswordHasher,
    PostCommitHooks, RegionDirectory, RegionService, Repositories, SnapshotHook, StoreService,
    TokenService, UploadLimits, UploadService,
};
use crate::infra::{
    files::LocalFileStore, region::HttpRegionDirectory, security::Argon2Hasher,
    storage::sea_orm_repositories,
};
use anyhow::Result;
use parking_lot::RwLock;
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use std::time::Duration;

/// Every service the REST layer dispatches to
pub struct MarketplaceServices {
    pub identity: IdentityService,
    pub stores: StoreService,
    pub catalog: Arc<CatalogService>,
    pub addresses: AddressService,
    pub orders: OrderService,
    pub regions: RegionService,
    pub uploads: UploadService,
    pub tokens: Arc<TokenService>,
}

impl MarketplaceServices {
    pub fn build(
        repos: Repositories,
        tokens: Arc<TokenService>,
        hasher: Arc<dyn PasswordHasher>,
        regions: Arc<dyn RegionDirectory>,
        files: Arc<dyn FileStore>,
        limits: UploadLimits,
    ) -> Self {
        let catalog = Arc::new(CatalogService::new(
            repos.categories.clone(),
            repos.products.clone(),
            repos.photos.clone(),
            repos.stores.clone(),
        ));
        let hooks =
            PostCommitHooks::new().with(Arc::new(SnapshotHook::new(repos.snapshots.clone())));

        Self {
            identity: IdentityService::new(repos.users.clone(), hasher, tokens.clone()),
            stores: StoreService::new(repos.stores.clone()),
            addresses: AddressService::new(repos.addresses.clone()),
            orders: OrderService::new(
                repos.orders.clone(),
                repos.products.clone(),
                repos.addresses.clone(),
                repos.snapshots.clone(),
                hooks,
            ),
            regions: RegionService::new(regions),
            uploads: UploadService::new(files, catalog.clone(), limits),
            catalog,
            tokens,
        }
    }
}

/// Marketplace service module
pub struct MarketplaceModule {
    config: RwLock<Config>,
    services: RwLock<Option<Arc<MarketplaceServices>>>,
}

impl Default for MarketplaceModule {
    fn default() -> Self {
        Self {
            config: RwLock::new(Config::default()),
            services: RwLock::new(None),
        }
    }
}

impl MarketplaceModule {
    /// Validate the configuration and wire services to `db`
    pub fn init(&self, config: Config, db: Arc<DatabaseConnection>) -> Result<()> {
        config.validate()?;

        let tokens = Arc::new(TokenService::new(
            config.jwt_secret.as_bytes(),
            chrono::Duration::hours(config.token_ttl_hours),
        ));
        let hasher = Arc::new(Argon2Hasher::new(&config.password_hashing)?);
        let regions = Arc::new(HttpRegionDirectory::new(
            config.region_api_url.clone(),
            Duration::from_secs(config.region_timeout_secs),
        )?);
        let files = Arc::new(LocalFileStore::new(config.upload_dir.clone()));
        let limits = UploadLimits {
            max_file_size: config.max_upload_size,
            max_files: config.max_files_per_upload,
        };

        let services = Arc::new(MarketplaceServices::build(
            sea_orm_repositories(db),
            tokens,
            hasher,
            regions,
            files,
            limits,
        ));
        *self.services.write() = Some(services);
        *self.config.write() = config;

        tracing::info!("Marketplace service initialized");
        Ok(())
    }

    pub async fn migrate(&self, db: &DatabaseConnection) -> Result<()> {
        use crate::infra::storage::migrations::Migrator;
        use sea_orm_migration::MigratorTrait;

        Migrator::up(db, None).await?;
        tracing::info!("Marketplace migrations completed");
        Ok(())
    }

    /// Create the configured administrator unless one already exists
    pub async fn seed_admin(&self) -> Result<bool> {
        let seed = self.config.read().admin.to_seed();
        let created = self.services()?.identity.seed_admin(&seed).await?;
        Ok(created)
    }

    pub fn services(&self) -> Result<Arc<MarketplaceServices>> {
        self.services
            .read()
            .as_ref()
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("Service not initialized"))
    }

    pub fn register_rest(&self, router: axum::Router) -> Result<axum::Router> {
        let services = self.services()?;
        let config = self.config.read();

        // Room for a full multi-upload plus form overhead
        let body_limit = config
            .max_upload_size
            .saturating_mul(config.max_files_per_upload)
            .saturating_add(1024 * 1024);

        tracing::info!("Registering marketplace REST routes");
        Ok(crate::api::rest::routes::register_routes(
            router,
            services,
            &config.upload_dir,
            body_limit,
        ))
    }
}
