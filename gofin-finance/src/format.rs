//! Locale formatting: currency, dates, month names and the summary labels.
//!
//! Aggregation never formats; everything user-visible goes through a
//! [`Locale`] so both screens share one configuration.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use gofin_core::{MonthYear, TransactionType};
use serde::{Deserialize, Serialize};

use crate::summary::{LastTransaction, NetPeriod};

/// Supported display locales
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum Locale {
    /// Brazilian Portuguese, BRL
    #[default]
    #[serde(rename = "pt-BR", alias = "pt_BR", alias = "pt")]
    PtBr,
    /// US English, USD
    #[serde(rename = "en-US", alias = "en_US", alias = "en")]
    EnUs,
}

const MONTHS_PT: [&str; 12] = [
    "janeiro", "fevereiro", "março", "abril", "maio", "junho",
    "julho", "agosto", "setembro", "outubro", "novembro", "dezembro",
];

const MONTHS_EN: [&str; 12] = [
    "January", "February", "March", "April", "May", "June",
    "July", "August", "September", "October", "November", "December",
];

struct NumberStyle {
    prefix: &'static str,
    thousands: char,
    decimal: char,
}

impl Locale {
    pub fn code(&self) -> &'static str {
        match self {
            Locale::PtBr => "pt-BR",
            Locale::EnUs => "en-US",
        }
    }

    fn number_style(&self) -> NumberStyle {
        match self {
            Locale::PtBr => NumberStyle {
                prefix: "R$ ",
                thousands: '.',
                decimal: ',',
            },
            Locale::EnUs => NumberStyle {
                prefix: "$",
                thousands: ',',
                decimal: '.',
            },
        }
    }

    /// Currency string with two decimals, e.g. `R$ 1.234,56` / `$1,234.56`.
    pub fn currency(&self, amount: f64) -> String {
        let style = self.number_style();
        let cents = (amount.abs() * 100.0).round() as u128;
        let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };

        let digits = (cents / 100).to_string();
        let mut whole = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, c) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                whole.push(style.thousands);
            }
            whole.push(c);
        }

        format!("{sign}{}{whole}{}{:02}", style.prefix, style.decimal, cents % 100)
    }

    /// Two-digit day/month/year in the locale's order.
    pub fn short_date(&self, date: NaiveDate) -> String {
        match self {
            Locale::PtBr => date.format("%d/%m/%y").to_string(),
            Locale::EnUs => date.format("%m/%d/%y").to_string(),
        }
    }

    /// Full month name, `month` in 1..=12.
    pub fn month_name(&self, month: u32) -> &'static str {
        let names = match self {
            Locale::PtBr => &MONTHS_PT,
            Locale::EnUs => &MONTHS_EN,
        };
        names[(month.clamp(1, 12) - 1) as usize]
    }

    /// `janeiro, 2023` / `January, 2023`
    pub fn month_title(&self, month: MonthYear) -> String {
        format!("{}, {}", self.month_name(month.month), month.year)
    }

    pub fn percent(&self, percent: u8) -> String {
        format!("{percent}%")
    }

    pub fn no_transactions(&self) -> &'static str {
        match self {
            Locale::PtBr => "Não há transações",
            Locale::EnUs => "No transactions",
        }
    }

    /// "Last deposit"/"last withdrawal" label for one polarity.
    pub fn last_transaction(&self, kind: TransactionType, last: LastTransaction) -> String {
        let LastTransaction::On(date) = last else {
            return self.no_transactions().to_string();
        };
        let day = date.day();
        let month = self.month_name(date.month());

        match (self, kind) {
            (Locale::PtBr, TransactionType::Positive) => format!("Última entrada dia {day} de {month}"),
            (Locale::PtBr, TransactionType::Negative) => format!("Última saída dia {day} de {month}"),
            (Locale::EnUs, TransactionType::Positive) => format!("Last deposit on {month} {day}"),
            (Locale::EnUs, TransactionType::Negative) => format!("Last withdrawal on {month} {day}"),
        }
    }

    /// Period label of the net total: first of the month through the last expense.
    pub fn net_period(&self, period: NetPeriod) -> String {
        let NetPeriod::MonthToDate { through } = period else {
            return self.no_transactions().to_string();
        };
        let day = through.day();
        let month = self.month_name(through.month());

        match self {
            Locale::PtBr => format!("01 a {day} de {month}"),
            Locale::EnUs => format!("{month} 1 to {day}"),
        }
    }

    /// Highlight card titles: (deposits, withdraws, total).
    pub fn card_titles(&self) -> (&'static str, &'static str, &'static str) {
        match self {
            Locale::PtBr => ("Entradas", "Saídas", "Total"),
            Locale::EnUs => ("Income", "Expenses", "Total"),
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "pt-BR" | "pt_BR" | "pt" => Ok(Locale::PtBr),
            "en-US" | "en_US" | "en" => Ok(Locale::EnUs),
            other => Err(format!("unsupported locale '{other}' (expected pt-BR or en-US)")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_currency_pt_br() {
        let l = Locale::PtBr;
        assert_eq!(l.currency(0.0), "R$ 0,00");
        assert_eq!(l.currency(12.3), "R$ 12,30");
        assert_eq!(l.currency(1234.567), "R$ 1.234,57");
        assert_eq!(l.currency(1_000_000.0), "R$ 1.000.000,00");
        assert_eq!(l.currency(-50.0), "-R$ 50,00");
    }

    #[test]
    fn test_currency_en_us() {
        let l = Locale::EnUs;
        assert_eq!(l.currency(999.999), "$1,000.00");
        assert_eq!(l.currency(-1234.5), "-$1,234.50");
        // rounds to zero, no negative zero
        assert_eq!(l.currency(-0.001), "$0.00");
        assert_eq!(l.currency(1e17), "$100,000,000,000,000,000.00");
    }

    #[test]
    fn test_dates() {
        let date = d(2023, 1, 5);
        assert_eq!(Locale::PtBr.short_date(date), "05/01/23");
        assert_eq!(Locale::EnUs.short_date(date), "01/05/23");
        assert_eq!(Locale::PtBr.month_title(MonthYear::of(date)), "janeiro, 2023");
        assert_eq!(Locale::EnUs.month_title(MonthYear::of(d(2023, 3, 1))), "March, 2023");
    }

    #[test]
    fn test_last_transaction_labels() {
        let on = LastTransaction::On(d(2023, 1, 5));
        assert_eq!(
            Locale::PtBr.last_transaction(TransactionType::Positive, on),
            "Última entrada dia 5 de janeiro"
        );
        assert_eq!(
            Locale::PtBr.last_transaction(TransactionType::Negative, on),
            "Última saída dia 5 de janeiro"
        );
        assert_eq!(
            Locale::EnUs.last_transaction(TransactionType::Negative, on),
            "Last withdrawal on January 5"
        );
        assert_eq!(
            Locale::PtBr.last_transaction(TransactionType::Negative, LastTransaction::None),
            "Não há transações"
        );
    }

    #[test]
    fn test_net_period_labels() {
        let period = NetPeriod::MonthToDate { through: d(2023, 2, 17) };
        assert_eq!(Locale::PtBr.net_period(period), "01 a 17 de fevereiro");
        assert_eq!(Locale::EnUs.net_period(period), "February 1 to 17");
        assert_eq!(Locale::EnUs.net_period(NetPeriod::NoTransactions), "No transactions");
    }

    #[test]
    fn test_parse_locale() {
        assert_eq!("en-US".parse::<Locale>().unwrap(), Locale::EnUs);
        assert_eq!("pt".parse::<Locale>().unwrap(), Locale::PtBr);
        assert!("fr-FR".parse::<Locale>().is_err());
    }

    #[derive(Deserialize)]
    struct Wrapper {
        locale: Locale,
    }

    #[test]
    fn test_deserialize_locale_aliases() {
        for (raw, want) in [
            ("pt-BR", Locale::PtBr),
            ("pt_BR", Locale::PtBr),
            ("pt", Locale::PtBr),
            ("en-US", Locale::EnUs),
            ("en_US", Locale::EnUs),
            ("en", Locale::EnUs),
        ] {
            let json = format!(r#"{{"locale":"{raw}"}}"#);
            let w: Wrapper = serde_json::from_str(&json).unwrap();
            assert_eq!(w.locale, want, "{raw}");
            assert_eq!(raw.parse::<Locale>().unwrap(), want);
        }
    }
}
