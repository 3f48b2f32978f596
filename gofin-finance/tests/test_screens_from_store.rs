use gofin_core::{CategoryCatalog, MonthYear, time::DEFAULT_TIMEZONE};
use gofin_finance::{CategoryAggregator, Dashboard, Locale, Resume, TransactionSummarizer};
use gofin_ingest::{LoadError, MemoryStore, TransactionRepository, transactions_key};

/// A collection as the mobile app writes it: string amounts, UTC timestamps.
const STORED: &str = r#"[
  {"id":"1","name":"Desenvolvimento de site","amount":"12000","type":"positive","category":"salary","date":"2023-01-05T15:00:00.000Z"},
  {"id":"2","name":"Hamburgueria Pizzy","amount":"59","type":"negative","category":"food","date":"2023-01-10T18:30:00.000Z"},
  {"id":"3","name":"Aluguel do apartamento","amount":"1200","type":"negative","category":"purchases","date":"2023-01-27T12:00:00.000Z"},
  {"id":"4","name":"Presente","amount":"141","type":"negative","category":"gifts","date":"2023-01-28T12:00:00.000Z"},
  {"id":"5","name":"Gasolina","amount":200,"type":"negative","category":"car","date":"2023-02-02T12:00:00.000Z"}
]"#;

fn repo() -> TransactionRepository<MemoryStore> {
    TransactionRepository::new(MemoryStore::new().with_item(transactions_key("u1"), STORED))
}

#[tokio::test]
async fn test_dashboard_from_stored_collection() {
    let txns = repo().load("u1", DEFAULT_TIMEZONE).await.unwrap();
    let dash = Dashboard::build(&txns, Locale::PtBr);

    assert_eq!(dash.summary.entries_total, 12000.0);
    assert_eq!(dash.summary.expenses_total, 1600.0);
    assert_eq!(dash.summary.net, 10400.0);

    let h = &dash.highlights;
    assert_eq!(h.deposits.amount, "R$ 12.000,00");
    assert_eq!(h.deposits.last_transaction, "Última entrada dia 5 de janeiro");
    assert_eq!(h.withdraws.amount, "R$ 1.600,00");
    assert_eq!(h.withdraws.last_transaction, "Última saída dia 2 de fevereiro");
    assert_eq!(h.total.amount, "R$ 10.400,00");
    assert_eq!(h.total.last_transaction, "01 a 2 de fevereiro");

    assert_eq!(dash.transactions.len(), 5);
    assert_eq!(dash.transactions[1].amount, "R$ 59,00");
    assert_eq!(dash.transactions[1].date, "10/01/23");
}

#[tokio::test]
async fn test_resume_from_stored_collection() {
    let txns = repo().load("u1", DEFAULT_TIMEZONE).await.unwrap();
    let jan = MonthYear::new(2023, 1).unwrap();
    let catalog = CategoryCatalog::default();

    let breakdown = CategoryAggregator::aggregate(&txns, jan, &catalog);
    assert_eq!(breakdown.expenses_total, 1400.0);
    assert_eq!(breakdown.orphan_total, 141.0);

    let resume = Resume::from_breakdown(&breakdown, Locale::PtBr);
    let names: Vec<_> = resume.rows.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, ["Compras", "Alimentação"]);
    assert_eq!(resume.rows[0].percent, "86%");
    assert_eq!(resume.rows[1].percent, "4%");
    assert_eq!(resume.uncategorized.as_deref(), Some("R$ 141,00"));

    let feb = Resume::build(&txns, jan.next().unwrap(), &catalog, Locale::PtBr);
    assert_eq!(feb.title, "fevereiro, 2023");
    assert_eq!(feb.rows.len(), 1);
    assert_eq!(feb.rows[0].name, "Carro");
    assert_eq!(feb.rows[0].percent, "100%");
}

#[tokio::test]
async fn test_absent_collection_is_empty_dashboard() {
    let txns = repo().load("nobody", DEFAULT_TIMEZONE).await.unwrap();
    let summary = TransactionSummarizer::summarize(&txns);
    assert_eq!(summary.net, 0.0);

    let dash = Dashboard::build(&txns, Locale::EnUs);
    assert_eq!(dash.highlights.total.last_transaction, "No transactions");
}

#[tokio::test]
async fn test_malformed_amount_aborts_load() {
    let stored = r#"[{"id":"x1","name":"?","amount":"doze","type":"negative","category":"food","date":"2023-01-05"}]"#;
    let repo = TransactionRepository::new(MemoryStore::new().with_item(transactions_key("u2"), stored));

    match repo.load("u2", DEFAULT_TIMEZONE).await {
        Err(LoadError::Validation(e)) => assert_eq!(e.id, "x1"),
        other => panic!("expected validation error, got {other:?}"),
    }

    let raw = repo.load_raw("u2").await.unwrap();
    assert!(TransactionSummarizer::summarize_raw(&raw, DEFAULT_TIMEZONE).is_err());
}
