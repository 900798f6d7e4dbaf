//! Spending report types

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Aggregate spending for one user
///
/// `by_category` holds one entry per category label the user has at least
/// one expense under; labels with no expenses never appear. `total` always
/// equals the sum of the per-label totals. A user with no expenses gets
/// `total == 0.0` and an empty map, never an absent report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpendingSummary {
    /// Sum over all of the user's expenses
    pub total: f64,
    /// Per-category sums, keyed by category label, sorted by label
    pub by_category: BTreeMap<String, f64>,
}

impl SpendingSummary {
    /// Empty report for a user with no expenses
    pub fn empty() -> Self {
        Self {
            total: 0.0,
            by_category: BTreeMap::new(),
        }
    }
}
