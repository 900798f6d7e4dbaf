//! Tally Types - Shared domain types
//!
//! This crate contains domain types used across Tally services:
//! - User, category, and expense identifiers
//! - Spending report types

pub mod ids;
pub mod report;

pub use ids::*;
pub use report::*;
