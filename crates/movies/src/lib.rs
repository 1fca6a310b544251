//! # movies
//!
//! A PostgreSQL movie catalogue with partial updates and soft delete.
//!
//! ## Features
//!
//! - **Partial updates**: a [`MoviePatch`] only touches the fields it sets;
//!   [`build_update`] renders the minimal `SET` clause and refuses empty patches
//! - **Tri-state input**: [`Patch`] separates "not mentioned", "set to null"
//!   and "set to a value" (including the empty string)
//! - **Soft delete**: rows get a `deleted_at` stamp and stay in the table;
//!   every read and write filters on `deleted_at IS NULL`
//! - **Injected time**: all timestamps come from a [`Clock`]
//! - **Client-agnostic**: the store runs on any [`GenericClient`] (connection,
//!   pooled connection, or transaction)
//!
//! ```ignore
//! use movies::{MoviePatch, MovieRepository, MovieService, MovieStore};
//!
//! let client = pool.get().await?;
//! let service = MovieService::new(MovieStore::new(&client));
//!
//! let movie = service
//!     .create(&MoviePatch::new().name("Arrival").genre("Sci-Fi").rating(4.5))
//!     .await?;
//! let movie = service
//!     .update(movie.id, &MoviePatch::new().plot("Linguist meets heptapods."))
//!     .await?;
//! service.delete(movie.id).await?;
//! ```

pub mod client;
pub mod clock;
pub mod config;
pub mod error;
pub mod model;
pub mod patch;
pub mod row;
pub mod schema;
pub mod service;
pub mod sql;
pub mod store;
pub mod update;
pub mod validate;
pub mod value;

#[cfg(test)]
mod test_client;

pub use client::GenericClient;
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{ConfigError, StoreConfig};
pub use error::{DbError, DbResult, StoreError, StoreResult};
pub use model::{Movie, MoviePatch};
pub use patch::Patch;
pub use row::{FromRow, RowExt};
pub use schema::ensure_schema;
pub use service::MovieService;
pub use store::{MovieRepository, MovieStore};
pub use update::{UpdateClause, build_update, build_update_at};
pub use validate::{ValidationCode, ValidationError, ValidationErrors, parse_id, validate_table};
pub use value::SqlValue;

#[cfg(feature = "pool")]
pub mod pool;

#[cfg(feature = "pool")]
pub use pool::create_pool;
