//! # clientele-adapter-storage-sqlite-sqlx
//!
//! `SQLite` persistence adapter using [sqlx](https://docs.rs/sqlx).
//!
//! ## Responsibilities
//! - Implement the repository port traits defined in `clientele-app::ports::storage`
//! - Manage `SQLite` connection pool lifecycle
//! - Run database migrations (using sqlx embedded migrations)
//! - Map between domain types and database rows
//!
//! ## Dependency rule
//! Depends on `clientele-app` (for port traits) and `clientele-domain` (for domain types).
//! The `app` and `domain` crates must never reference this adapter.

mod customer_repo;
mod error;
mod pool;

pub use customer_repo::SqliteCustomerRepository;
pub use error::StorageError;
pub use pool::{Config, Database};
