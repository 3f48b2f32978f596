//! Dashboard view model: highlight cards plus the formatted transaction listing.

use gofin_core::{Transaction, TransactionType};
use serde::Serialize;

use crate::format::Locale;
use crate::summary::{Summary, TransactionSummarizer};

/// One highlight card
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct HighlightCard {
    pub title: String,
    pub amount: String,
    pub last_transaction: String,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Highlights {
    pub deposits: HighlightCard,
    pub withdraws: HighlightCard,
    pub total: HighlightCard,
}

/// One formatted line of the transaction listing
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct TransactionRow {
    pub id: String,
    pub name: String,
    pub amount: String,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub category: String,
    pub date: String,
}

impl TransactionRow {
    pub fn new(txn: &Transaction, locale: Locale) -> Self {
        Self {
            id: txn.id.clone(),
            name: txn.name.clone(),
            amount: locale.currency(txn.amount),
            kind: txn.kind,
            category: txn.category.clone(),
            date: locale.short_date(txn.date),
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Dashboard {
    pub summary: Summary,
    pub highlights: Highlights,
    /// Stored order
    pub transactions: Vec<TransactionRow>,
}

impl Dashboard {
    pub fn build(txns: &[Transaction], locale: Locale) -> Self {
        let summary = TransactionSummarizer::summarize(txns);
        let (deposits_title, withdraws_title, total_title) = locale.card_titles();

        let highlights = Highlights {
            deposits: HighlightCard {
                title: deposits_title.to_string(),
                amount: locale.currency(summary.entries_total),
                last_transaction: locale
                    .last_transaction(TransactionType::Positive, summary.last_entry),
            },
            withdraws: HighlightCard {
                title: withdraws_title.to_string(),
                amount: locale.currency(summary.expenses_total),
                last_transaction: locale
                    .last_transaction(TransactionType::Negative, summary.last_expense),
            },
            total: HighlightCard {
                title: total_title.to_string(),
                amount: locale.currency(summary.net),
                last_transaction: locale.net_period(summary.net_period),
            },
        };

        let transactions = txns.iter().map(|t| TransactionRow::new(t, locale)).collect();

        Self {
            summary,
            highlights,
            transactions,
        }
    }
}
