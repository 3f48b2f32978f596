//! Totals and last-transaction dates over a whole collection.

use chrono::NaiveDate;
use chrono_tz::Tz;
use gofin_core::{MonthYear, RawTransaction, Transaction, TransactionType, ValidationError, validate_all};
use serde::{Deserialize, Serialize};

/// Most recent transaction of one polarity
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum LastTransaction {
    /// No transaction of that polarity exists
    None,
    On(NaiveDate),
}

impl LastTransaction {
    pub fn date(&self) -> Option<NaiveDate> {
        match self {
            LastTransaction::None => None,
            LastTransaction::On(date) => Some(*date),
        }
    }
}

/// Period covered by the net total
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum NetPeriod {
    /// There are no expenses
    NoTransactions,
    /// From the first of the month of the latest expense through that expense's day
    MonthToDate { through: NaiveDate },
}

impl NetPeriod {
    pub fn from_last_expense(last: LastTransaction) -> Self {
        match last {
            LastTransaction::None => NetPeriod::NoTransactions,
            LastTransaction::On(through) => NetPeriod::MonthToDate { through },
        }
    }

    pub fn start(&self) -> Option<NaiveDate> {
        match self {
            NetPeriod::NoTransactions => None,
            NetPeriod::MonthToDate { through } => Some(MonthYear::of(*through).first_day()),
        }
    }
}

/// Totals over the whole collection, unformatted
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Summary {
    pub entries_total: f64,
    pub expenses_total: f64,
    /// `entries_total - expenses_total`
    pub net: f64,
    pub last_entry: LastTransaction,
    pub last_expense: LastTransaction,
    pub net_period: NetPeriod,
}

impl Summary {
    pub fn last(&self, kind: TransactionType) -> LastTransaction {
        match kind {
            TransactionType::Positive => self.last_entry,
            TransactionType::Negative => self.last_expense,
        }
    }
}

/// Computes [`Summary`] values
pub struct TransactionSummarizer;

impl TransactionSummarizer {
    /// Summarize validated transactions. No date filtering is applied.
    pub fn summarize(txns: &[Transaction]) -> Summary {
        let mut entries_total = 0.0;
        let mut expenses_total = 0.0;

        for txn in txns {
            match txn.kind {
                TransactionType::Positive => entries_total += txn.amount,
                TransactionType::Negative => expenses_total += txn.amount,
            }
        }

        let last_entry = Self::last_transaction(txns, TransactionType::Positive);
        let last_expense = Self::last_transaction(txns, TransactionType::Negative);

        tracing::debug!(
            count = txns.len(),
            entries_total,
            expenses_total,
            "summarized transactions"
        );

        Summary {
            entries_total,
            expenses_total,
            net: entries_total - expenses_total,
            last_entry,
            last_expense,
            net_period: NetPeriod::from_last_expense(last_expense),
        }
    }

    /// Validate persisted records, then summarize them.
    ///
    /// Any malformed record fails the whole call.
    pub fn summarize_raw(records: &[RawTransaction], tz: Tz) -> Result<Summary, ValidationError> {
        let txns = validate_all(records, tz)?;
        Ok(Self::summarize(&txns))
    }

    /// Latest date among transactions of `kind`. Ties are irrelevant since only the date is kept.
    pub fn last_transaction(txns: &[Transaction], kind: TransactionType) -> LastTransaction {
        txns.iter()
            .filter(|t| t.kind == kind)
            .map(|t| t.date)
            .max()
            .map_or(LastTransaction::None, LastTransaction::On)
    }
}
