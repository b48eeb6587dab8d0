//! profilectl-store: typed access to `users` and `user_profiles`
//!
//! Every operation is one parameterized statement against a `PgPool`.
//! Errors from the driver pass through unmodified; "no row" is `None`.
//!
//! ```ignore
//! use profilectl_store::{create_pool, ProfileRepo, UserId};
//!
//! let pool = create_pool("postgres://localhost/profiles").await?;
//! let repo = ProfileRepo::new(&pool);
//! let full = repo.get_full_user_with_profile(&UserId::new("u_123")?).await?;
//! ```

pub mod config;
pub mod db;
pub mod error;
pub mod memory;
pub mod models;
pub mod store;

pub use config::ProfilectlConfig;
pub use db::{create_pool, create_pool_with_options, PoolSettings, ProfileRepo};
pub use error::{StoreError, StoreResult, ValidationError};
pub use memory::MemoryProfileStore;
pub use models::{
    AvailabilityStatus, DeleteAck, FullUserProfile, NewProfile, Patch, ProfileDetails,
    ProfilePatch, ProfileSearchHit, ProfileSummary, SearchQuery, User, UserId, UserProfile,
};
pub use store::{PgProfileStore, ProfileStore};
