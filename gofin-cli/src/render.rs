//! Plain-text rendering of the dashboard and resume screens.

use std::fmt::Write;

use gofin_core::{CategoryCatalog, TransactionType};
use gofin_finance::{Dashboard, HighlightCard, Resume};

fn card(out: &mut String, card: &HighlightCard) {
    let _ = writeln!(out, "{:<10} {:>18}  {}", card.title, card.amount, card.last_transaction);
}

pub fn dashboard(dash: &Dashboard) -> String {
    let mut out = String::new();
    card(&mut out, &dash.highlights.deposits);
    card(&mut out, &dash.highlights.withdraws);
    card(&mut out, &dash.highlights.total);

    out.push('\n');
    for row in &dash.transactions {
        let sign = match row.kind {
            TransactionType::Positive => ' ',
            TransactionType::Negative => '-',
        };
        let _ = writeln!(
            out,
            "{}  {:<28} {}{:>16}  {}",
            row.date, row.name, sign, row.amount, row.category
        );
    }
    out
}

pub fn resume(resume: &Resume) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "< {} >", resume.title);

    for row in &resume.rows {
        let _ = writeln!(
            out,
            "{:>4}  {:<16} {:>16}  {}",
            row.percent, row.name, row.total_formatted, row.color
        );
    }
    let _ = writeln!(out, "      {:<16} {:>16}", "", resume.expenses_total);
    if let Some(uncategorized) = &resume.uncategorized {
        let _ = writeln!(out, "      (not in any category: {uncategorized})");
    }
    out
}

pub fn categories(catalog: &CategoryCatalog) -> String {
    let mut out = String::new();
    for c in catalog.iter() {
        let _ = writeln!(out, "{:<12} {:<16} {}", c.key, c.name, c.color);
    }
    out
}
