//! Domain layer - business logic and services

pub mod address;
pub mod auth;
pub mod catalog;
pub mod events;
pub mod identity;
pub mod order;
pub mod pagination;
pub mod region;
pub mod repository;
pub mod store;
pub mod upload;
pub mod validation;

pub use address::AddressService;
pub use auth::{Claims, PasswordHasher, TokenService};
pub use catalog::CatalogService;
pub use events::{CommitEvent, HookFailure, PostCommitHook, PostCommitHooks, SnapshotHook};
pub use identity::{AdminSeed, IdentityService};
pub use order::OrderService;
pub use pagination::{Page, PageInfo, PageRequest};
pub use region::{RegionDirectory, RegionService};
pub use repository::Repositories;
pub use store::StoreService;
pub use upload::{FileStore, MultiUpload, UploadLimits, UploadService};
