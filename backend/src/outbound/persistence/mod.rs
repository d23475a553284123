//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Concrete implementation of the domain [`UserStore`] port backed by
//! PostgreSQL through `diesel-async` and `bb8` pooling.
//!
//! - **Thin adapters**: the store only translates between Diesel rows and
//!   domain records.
//! - **Internal models**: row structs (`models.rs`) and the schema
//!   (`schema.rs`) never leave this module.
//! - **Strongly typed errors**: Diesel and pool failures are mapped to
//!   [`UserStoreError`] variants, including named duplicate fields.
//!
//! [`UserStore`]: crate::domain::ports::UserStore
//! [`UserStoreError`]: crate::domain::ports::UserStoreError
//!
//! # Example
//!
//! ```ignore
//! use signup_backend::outbound::persistence::{DbPool, DieselUserStore, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/signup")).await?;
//! let store = DieselUserStore::new(pool);
//! ```

mod diesel_user_store;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_user_store::DieselUserStore;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
