//! Resume view model: the selected month's expenses by category.

use gofin_core::{CategoryCatalog, MonthYear, Transaction};
use serde::Serialize;

use crate::breakdown::{CategoryAggregator, CategoryBreakdown};
use crate::format::Locale;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CategoryRow {
    pub key: String,
    pub name: String,
    pub color: String,
    pub total: f64,
    pub total_formatted: String,
    pub percent: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Resume {
    pub month: MonthYear,
    /// e.g. `janeiro, 2023`
    pub title: String,
    pub expenses_total: String,
    pub rows: Vec<CategoryRow>,
    /// Formatted spend in categories missing from the catalog, if any
    pub uncategorized: Option<String>,
}

impl Resume {
    pub fn build(
        txns: &[Transaction],
        month: MonthYear,
        catalog: &CategoryCatalog,
        locale: Locale,
    ) -> Self {
        let breakdown = CategoryAggregator::aggregate(txns, month, catalog);
        Self::from_breakdown(&breakdown, locale)
    }

    pub fn from_breakdown(breakdown: &CategoryBreakdown, locale: Locale) -> Self {
        let rows = breakdown
            .buckets
            .iter()
            .map(|b| CategoryRow {
                key: b.key.clone(),
                name: b.name.clone(),
                color: b.color.clone(),
                total: b.total,
                total_formatted: locale.currency(b.total),
                percent: locale.percent(b.percent),
            })
            .collect();

        Self {
            month: breakdown.month,
            title: locale.month_title(breakdown.month),
            expenses_total: locale.currency(breakdown.expenses_total),
            rows,
            uncategorized: (breakdown.orphan_total > 0.0)
                .then(|| locale.currency(breakdown.orphan_total)),
        }
    }
}
