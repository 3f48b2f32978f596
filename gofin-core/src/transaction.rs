//! Transaction records as persisted, and their validated form.

use chrono::NaiveDate;
use chrono_tz::Tz;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::{ValidationError, ValidationIssue};
use crate::time::local_date;

/// Polarity of a transaction
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum TransactionType {
    /// Credit / deposit
    #[serde(rename = "positive")]
    Positive,
    /// Debit / expense
    #[serde(rename = "negative")]
    Negative,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Positive => "positive",
            TransactionType::Negative => "negative",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "positive" => Some(TransactionType::Positive),
            "negative" => Some(TransactionType::Negative),
            _ => None,
        }
    }
}

/// Largest amount a single record may carry.
pub const MAX_AMOUNT: f64 = 1e12;

/// `amount` as the app stores it: sometimes a JSON number, sometimes a string.
///
/// Anything else (`null`, booleans, objects, a missing key) is kept as
/// `Other` so it fails validation with the record's id instead of failing
/// the whole payload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum RawAmount {
    Number(f64),
    Text(String),
    Other(Value),
}

impl Default for RawAmount {
    fn default() -> Self {
        RawAmount::Other(Value::Null)
    }
}

impl RawAmount {
    fn parse(&self) -> Result<f64, ValidationIssue> {
        let value = match self {
            RawAmount::Number(n) => *n,
            RawAmount::Text(s) => s
                .trim()
                .parse::<f64>()
                .map_err(|_| ValidationIssue::NonNumericAmount(s.clone()))?,
            RawAmount::Other(v) => return Err(ValidationIssue::NonNumericAmount(v.to_string())),
        };

        if !value.is_finite() {
            return Err(ValidationIssue::NonFiniteAmount);
        }
        if value < 0.0 {
            return Err(ValidationIssue::NegativeAmount(value));
        }
        if value > MAX_AMOUNT {
            return Err(ValidationIssue::AmountTooLarge(value));
        }
        Ok(value)
    }
}

/// Accept any JSON value for a text field; non-strings keep their JSON text.
fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        other => other.to_string(),
    })
}

/// A transaction record exactly as persisted in the key-value store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RawTransaction {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub amount: RawAmount,
    #[serde(rename = "type", default, deserialize_with = "lenient_string")]
    pub kind: String,
    #[serde(default)]
    pub category: String,
    pub date: String,
}

impl RawTransaction {
    /// Validate this record, resolving its date to a calendar day in `tz`.
    pub fn validate(&self, tz: Tz) -> Result<Transaction, ValidationError> {
        let fail = |issue: ValidationIssue| ValidationError::new(&self.id, issue);

        let amount = self.amount.parse().map_err(fail)?;
        let kind = TransactionType::parse(&self.kind)
            .ok_or_else(|| fail(ValidationIssue::UnknownType(self.kind.clone())))?;
        let date = local_date(&self.date, tz)
            .ok_or_else(|| fail(ValidationIssue::InvalidDate(self.date.clone())))?;

        Ok(Transaction {
            id: self.id.clone(),
            name: self.name.clone(),
            amount,
            kind,
            category: self.category.clone(),
            date,
        })
    }
}

/// A validated transaction
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    /// Opaque unique identifier
    pub id: String,
    /// Free-text description
    pub name: String,
    /// Non-negative amount; polarity lives in `kind`
    pub amount: f64,
    pub kind: TransactionType,
    /// Key into the category catalog
    pub category: String,
    /// Calendar day of the transaction
    pub date: NaiveDate,
}

impl Transaction {
    pub fn is_expense(&self) -> bool {
        self.kind == TransactionType::Negative
    }

    pub fn is_income(&self) -> bool {
        self.kind == TransactionType::Positive
    }
}

/// Validate every record, failing on the first malformed one.
///
/// No partial result is returned: one bad record fails the whole batch.
pub fn validate_all(records: &[RawTransaction], tz: Tz) -> Result<Vec<Transaction>, ValidationError> {
    records
        .iter()
        .map(|r| r.validate(tz))
        .collect::<Result<Vec<_>, _>>()
        .inspect_err(|e| tracing::warn!(id = %e.id, "rejected transaction record: {}", e.issue))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::DEFAULT_TIMEZONE;

    fn raw(amount: RawAmount, kind: &str, date: &str) -> RawTransaction {
        RawTransaction {
            id: "tx-1".to_string(),
            name: "Lunch".to_string(),
            amount,
            kind: kind.to_string(),
            category: "food".to_string(),
            date: date.to_string(),
        }
    }

    #[test]
    fn test_deserialize_string_and_number_amounts() {
        let json = r#"[
            {"id":"1","name":"Salary","amount":"1000","type":"positive","category":"salary","date":"2023-01-05T12:00:00.000Z"},
            {"id":"2","name":"Lunch","amount":35.5,"type":"negative","category":"food","date":"2023-01-06"}
        ]"#;
        let records: Vec<RawTransaction> = serde_json::from_str(json).unwrap();
        let txns = validate_all(&records, DEFAULT_TIMEZONE).unwrap();

        assert_eq!(txns[0].amount, 1000.0);
        assert!(txns[0].is_income());
        assert_eq!(txns[0].date, NaiveDate::from_ymd_opt(2023, 1, 5).unwrap());
        assert_eq!(txns[1].amount, 35.5);
        assert!(txns[1].is_expense());
    }

    #[test]
    fn test_non_numeric_amount_is_rejected() {
        let err = raw(RawAmount::Text("abc".into()), "negative", "2023-01-05")
            .validate(DEFAULT_TIMEZONE)
            .unwrap_err();
        assert_eq!(err.id, "tx-1");
        assert_eq!(err.issue, ValidationIssue::NonNumericAmount("abc".into()));
    }

    #[test]
    fn test_empty_amount_is_not_zero() {
        let err = raw(RawAmount::Text("  ".into()), "positive", "2023-01-05")
            .validate(DEFAULT_TIMEZONE)
            .unwrap_err();
        assert!(matches!(err.issue, ValidationIssue::NonNumericAmount(_)));
    }

    #[test]
    fn test_negative_and_non_finite_amounts() {
        let neg = raw(RawAmount::Number(-5.0), "negative", "2023-01-05")
            .validate(DEFAULT_TIMEZONE)
            .unwrap_err();
        assert_eq!(neg.issue, ValidationIssue::NegativeAmount(-5.0));

        let inf = raw(RawAmount::Text("inf".into()), "negative", "2023-01-05")
            .validate(DEFAULT_TIMEZONE)
            .unwrap_err();
        assert_eq!(inf.issue, ValidationIssue::NonFiniteAmount);
    }

    #[test]
    fn test_unknown_type_and_bad_date() {
        let err = raw(RawAmount::Number(1.0), "sideways", "2023-01-05")
            .validate(DEFAULT_TIMEZONE)
            .unwrap_err();
        assert_eq!(err.issue, ValidationIssue::UnknownType("sideways".into()));

        let err = raw(RawAmount::Number(1.0), "positive", "yesterday")
            .validate(DEFAULT_TIMEZONE)
            .unwrap_err();
        assert_eq!(err.issue, ValidationIssue::InvalidDate("yesterday".into()));
    }

    #[test]
    fn test_odd_json_amounts_fail_with_id() {
        let json = r#"[
            {"id":"n1","amount":null,"type":"negative","date":"2023-01-05"},
            {"id":"b1","amount":true,"type":"negative","date":"2023-01-05"},
            {"id":"m1","type":"negative","date":"2023-01-05"}
        ]"#;
        let records: Vec<RawTransaction> = serde_json::from_str(json).unwrap();

        let issues: Vec<_> = records
            .iter()
            .map(|r| r.validate(DEFAULT_TIMEZONE).unwrap_err())
            .map(|e| (e.id, e.issue))
            .collect();
        assert_eq!(
            issues,
            [
                ("n1".to_string(), ValidationIssue::NonNumericAmount("null".into())),
                ("b1".to_string(), ValidationIssue::NonNumericAmount("true".into())),
                ("m1".to_string(), ValidationIssue::NonNumericAmount("null".into())),
            ]
        );
    }

    #[test]
    fn test_non_string_type_is_unknown() {
        let json = r#"[
            {"id":"t1","amount":1,"type":1,"date":"2023-01-05"},
            {"id":"t2","amount":1,"date":"2023-01-05"}
        ]"#;
        let records: Vec<RawTransaction> = serde_json::from_str(json).unwrap();

        let err = records[0].validate(DEFAULT_TIMEZONE).unwrap_err();
        assert_eq!(err.id, "t1");
        assert_eq!(err.issue, ValidationIssue::UnknownType("1".into()));

        let err = records[1].validate(DEFAULT_TIMEZONE).unwrap_err();
        assert_eq!(err.issue, ValidationIssue::UnknownType(String::new()));
    }

    #[test]
    fn test_huge_amount_is_rejected() {
        let err = raw(RawAmount::Number(1e300), "positive", "2023-01-05")
            .validate(DEFAULT_TIMEZONE)
            .unwrap_err();
        assert_eq!(err.issue, ValidationIssue::AmountTooLarge(1e300));
        assert!(raw(RawAmount::Number(MAX_AMOUNT), "positive", "2023-01-05")
            .validate(DEFAULT_TIMEZONE)
            .is_ok());
    }

    #[test]
    fn test_validate_all_fails_fast() {
        let mut bad = raw(RawAmount::Text("12,50".into()), "negative", "2023-01-05");
        bad.id = "tx-bad".to_string();
        let records = vec![
            raw(RawAmount::Number(10.0), "negative", "2023-01-05"),
            bad,
        ];
        let err = validate_all(&records, DEFAULT_TIMEZONE).unwrap_err();
        assert_eq!(err.id, "tx-bad");
        assert_eq!(err.to_string(), "invalid transaction tx-bad: amount \"12,50\" is not numeric");
    }
}
