//! PostgreSQL plumbing shared by the directory domains.
//!
//! # Features
//!
//! - `postgres` (default) - connection pool, migrations, health check and the
//!   soft-delete aware [`BaseRepository`]
//! - `config` (default) - `core_config::FromEnv` for [`postgres::PostgresConfig`]
//!
//! ```ignore
//! let config = PostgresConfig::from_env()?;
//! let db = postgres::connect_from_config_with_retry(config, None).await?;
//! postgres::run_migrations::<Migrator>(&db, "directory_api").await?;
//! ```

pub mod common;

#[cfg(feature = "postgres")]
pub mod postgres;

#[cfg(feature = "postgres")]
pub mod repository;

pub use common::{DatabaseError, DatabaseResult, RetryConfig, retry, retry_with_backoff};

#[cfg(feature = "postgres")]
pub use repository::{BaseRepository, SoftDeleteEntity, unique_violation};
