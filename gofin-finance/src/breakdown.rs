//! Per-category expense breakdown for one calendar month.

use std::collections::HashSet;

use chrono_tz::Tz;
use gofin_core::{
    CategoryCatalog, MonthYear, RawTransaction, Transaction, ValidationError, validate_all,
};
use serde::{Deserialize, Serialize};

/// Spend attributed to one catalog category in one month
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategoryBucket {
    pub key: String,
    pub name: String,
    pub color: String,
    /// Always > 0
    pub total: f64,
    /// Rounded share of the month's expenses, 0..=100
    pub percent: u8,
}

/// Result of [`CategoryAggregator::aggregate`]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategoryBreakdown {
    pub month: MonthYear,
    /// All expenses of the month, orphan categories included
    pub expenses_total: f64,
    /// Spend whose category key is not in the catalog
    pub orphan_total: f64,
    /// In catalog order; categories without spend are omitted
    pub buckets: Vec<CategoryBucket>,
}

/// Buckets a month's expenses by catalog category
pub struct CategoryAggregator;

impl CategoryAggregator {
    pub fn aggregate(
        txns: &[Transaction],
        month: MonthYear,
        catalog: &CategoryCatalog,
    ) -> CategoryBreakdown {
        let expenses: Vec<&Transaction> = txns
            .iter()
            .filter(|t| t.is_expense() && month.contains(t.date))
            .collect();

        let expenses_total: f64 = expenses.iter().map(|t| t.amount).sum();

        let mut seen = HashSet::new();
        let mut buckets = Vec::new();
        for category in catalog.iter() {
            if !seen.insert(category.key.as_str()) {
                tracing::warn!(key = %category.key, "duplicate category key in catalog, ignoring");
                continue;
            }

            let total: f64 = expenses
                .iter()
                .filter(|t| t.category == category.key)
                .map(|t| t.amount)
                .sum();

            if total > 0.0 {
                buckets.push(CategoryBucket {
                    key: category.key.clone(),
                    name: category.name.clone(),
                    color: category.color.clone(),
                    total,
                    percent: percent_of(total, expenses_total),
                });
            }
        }

        let orphan_total: f64 = expenses
            .iter()
            .filter(|t| !catalog.contains(&t.category))
            .map(|t| t.amount)
            .sum();

        if orphan_total > 0.0 {
            tracing::debug!(%month, orphan_total, "expenses with unknown categories");
        }

        CategoryBreakdown {
            month,
            expenses_total,
            orphan_total,
            buckets,
        }
    }

    /// Validate persisted records, then aggregate them.
    pub fn aggregate_raw(
        records: &[RawTransaction],
        month: MonthYear,
        catalog: &CategoryCatalog,
        tz: Tz,
    ) -> Result<CategoryBreakdown, ValidationError> {
        let txns = validate_all(records, tz)?;
        Ok(Self::aggregate(&txns, month, catalog))
    }
}

/// Rounded integer share; a zero total yields 0 rather than NaN.
fn percent_of(part: f64, total: f64) -> u8 {
    if total <= 0.0 {
        return 0;
    }
    (part / total * 100.0).round().clamp(0.0, 100.0) as u8
}
