//! Tally Ledger Core - Bookkeeping business logic
//!
//! Ownership-scoped category and expense operations plus the spending
//! aggregation engine. Every operation takes the acting user explicitly;
//! there is no ambient identity and no way to reach another user's rows.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use tally_ledger_core::LedgerService;
//!
//! let ledger = LedgerService::new(
//!     Arc::new(repos.categories.clone()),
//!     Arc::new(repos.expenses.clone()),
//! );
//!
//! let category = ledger.create_category(acting, "Food").await?;
//! let summary = ledger.summarize(acting).await?;
//! ```

pub mod error;
pub mod service;

pub use error::*;
pub use service::*;
