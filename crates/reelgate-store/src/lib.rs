//! # Reelgate Store
//!
//! Storage abstractions for Reelgate:
//!
//! - [`GrantStore`] - the process-wide table of live access grants, one per owner
//! - [`ContentStore`] - the read-mostly catalog of content records
//!
//! ## Implementations
//!
//! - [`MemoryGrantStore`] - the grant table. Grants live only for process lifetime.
//! - [`MemoryCatalog`] - in-memory catalog for tests and small deployments
//! - [`SqliteCatalog`] - persistent catalog backed by SQLite
//!
//! ## Usage
//!
//! ```rust,no_run
//! use reelgate_store::{ContentStore, GrantStore, MemoryGrantStore, SqliteCatalog};
//!
//! async fn example() {
//!     let grants = MemoryGrantStore::new();
//!     let catalog = SqliteCatalog::open("catalog.db").unwrap();
//!
//!     // let record = catalog.lookup(&content_ref).await.unwrap();
//!     // grants.put(grant).await.unwrap();
//! }
//! ```
//!
//! ## Design Notes
//!
//! - **Whole-table locking**: every grant operation runs under one lock, so a
//!   reader never sees a token from one write paired with the expiry of another.
//! - **Idempotent catalog inserts**: inserting an existing reference returns
//!   `AlreadyExists` rather than overwriting.

pub mod catalog;
pub mod error;
pub mod grants;
pub mod memory;
pub mod migration;
pub mod sqlite;

pub use catalog::{ContentStore, InsertResult};
pub use error::{Result, StoreError};
pub use grants::{GrantStore, MemoryGrantStore};
pub use memory::MemoryCatalog;
pub use sqlite::SqliteCatalog;
