//! Tally DB - Database abstractions
//!
//! SQLx-based database layer for the Tally services.
//!
//! Every read and write that touches user-owned rows carries the owner in
//! its SQL predicate. A row that exists but belongs to someone else is
//! reported exactly like a row that does not exist, so callers cannot
//! distinguish the two.
//!
//! # Example
//!
//! ```rust,ignore
//! use tally_db::{create_pool, Repositories, MIGRATOR};
//!
//! let pool = create_pool("postgres://localhost/tally").await?;
//! MIGRATOR.run(&pool).await?;
//! let repos = Repositories::new(pool);
//!
//! let user = repos.users.find_by_username("alice").await?;
//! ```

pub mod error;
pub mod models;
pub mod pg;
pub mod pool;
pub mod repo;

pub use error::{DbError, DbResult};
pub use models::*;
pub use pg::Repositories;
pub use pool::{DbPool, MIGRATOR, create_pool};
pub use repo::*;
