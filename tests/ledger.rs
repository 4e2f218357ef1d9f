// End-to-end checks against an on-disk database

use budget_tracker::cli::Menu;
use budget_tracker::{
    create_default_categories, export_csv_file, generate_report, import_csv_file,
    parse_timestamp, Database, LedgerError, ReportWindow, TransactionType, DEFAULT_CATEGORIES,
};
use tempfile::TempDir;

fn open(dir: &TempDir) -> Database {
    Database::open(&dir.path().join("budget.db")).unwrap()
}

#[test]
fn test_data_survives_reopen() {
    let dir = TempDir::new().unwrap();

    let (food_id, tx_id) = {
        let db = open(&dir);
        let food = db.categories().create("Food").unwrap();
        let tx = db
            .transactions()
            .create(42.0, TransactionType::Expense, food.id, Some("Dinner"))
            .unwrap();
        (food.id, tx.id)
    };

    let db = open(&dir);
    let tx = db.transactions().find_by_id(tx_id).unwrap().unwrap();
    assert_eq!(tx.category_id, food_id);
    assert_eq!(tx.description.as_deref(), Some("Dinner"));
    assert_eq!(db.transactions().get_balance().unwrap(), -42.0);
}

#[test]
fn test_bootstrap_only_once_across_sessions() {
    let dir = TempDir::new().unwrap();

    assert_eq!(
        create_default_categories(&open(&dir)).unwrap().len(),
        DEFAULT_CATEGORIES.len()
    );
    assert!(create_default_categories(&open(&dir)).unwrap().is_empty());
    assert_eq!(
        open(&dir).categories().get_all().unwrap().len(),
        DEFAULT_CATEGORIES.len()
    );
}

#[test]
fn test_food_rent_example() {
    let dir = TempDir::new().unwrap();
    let db = open(&dir);

    let food = db.categories().create("Food").unwrap();
    let rent = db.categories().create("Rent").unwrap();
    assert!(matches!(
        db.categories().create("Food"),
        Err(LedgerError::Duplicate { .. })
    ));

    let now = parse_timestamp("2024-06-30 12:00:00").unwrap();
    let earlier = parse_timestamp("2024-06-28 09:30:00").unwrap();
    let store = db.transactions();
    store.create_dated(1000.0, TransactionType::Income, food.id, None, earlier).unwrap();
    store.create_dated(200.0, TransactionType::Expense, food.id, None, earlier).unwrap();
    store.create_dated(300.0, TransactionType::Expense, rent.id, None, earlier).unwrap();

    assert_eq!(store.get_balance().unwrap(), 500.0);
    assert_eq!(store.find_by_category(rent.id).unwrap().len(), 1);

    let outcome = generate_report(&db, ReportWindow::Monthly, now).unwrap();
    let report = outcome.report().unwrap();
    assert_eq!(report.category("Food").unwrap().expense, 200.0);
    assert_eq!(report.category("Rent").unwrap().expense, 300.0);
    assert_eq!(report.net, 500.0);

    // A week later nothing falls in the weekly window
    let later = parse_timestamp("2024-07-10 12:00:00").unwrap();
    assert!(generate_report(&db, ReportWindow::Weekly, later).unwrap().is_empty());
}

#[test]
fn test_csv_file_round_trip() {
    let dir = TempDir::new().unwrap();
    let source = open(&dir);
    let salary = source.categories().create("Salary").unwrap();
    source
        .transactions()
        .create(3200.0, TransactionType::Income, salary.id, Some("July"))
        .unwrap();

    let csv_path = dir.path().join("export.csv");
    assert_eq!(export_csv_file(&source, &csv_path).unwrap(), 1);

    let target = Database::open(&dir.path().join("copy.db")).unwrap();
    let summary = import_csv_file(&target, &csv_path).unwrap();
    assert_eq!(summary.imported, 1);
    assert_eq!(summary.categories_created, 1);
    assert_eq!(target.transactions().get_balance().unwrap(), 3200.0);
}

#[test]
fn test_menu_session_persists() {
    let dir = TempDir::new().unwrap();
    {
        let db = open(&dir);
        create_default_categories(&db).unwrap();
        let food = db.categories().find_by_name("Food").unwrap().unwrap();

        let script = format!("2\n18.75\n{}\nPizza\n0\n", food.id);
        let mut menu = Menu::new(&db, script.as_bytes(), Vec::new());
        menu.run().unwrap();
    }

    let db = open(&dir);
    let all = db.transactions().get_all().unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].kind, TransactionType::Expense);
    assert_eq!(all[0].amount, 18.75);
}
