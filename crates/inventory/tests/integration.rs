//! Integration tests for the inventory tool
//!
//! These tests drive the store through its public API and run the
//! `inventory` binary end to end against scratch directories.

use inventory_store::{CsvStore, ListFilter, NewItem, Record, Store, StoreError, StoreOptions};
use inventory_util::{IdPolicy, ItemId};
use std::collections::HashSet;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn sample_items() -> Vec<NewItem> {
    vec![
        NewItem::new("Opus One 2019", "Wine")
            .quantity(3)
            .location("Cellar A")
            .notes("Premium Napa"),
        NewItem::new("PGA Tour Merchandise", "Apparel")
            .quantity(12)
            .location("Shelf 1")
            .notes("Various"),
        NewItem::new("Titleist Pro V1", "Golf")
            .quantity(2)
            .location("Bag")
            .notes("Practice balls"),
        NewItem::new("Kirkland Signature Vodka", "Spirits")
            .quantity(1)
            .location("Bar")
            .notes("For guests"),
    ]
}

fn seeded_store(dir: &TempDir) -> CsvStore {
    let store = CsvStore::open(dir.path().join("inventory.csv")).unwrap();
    for item in sample_items() {
        store.add(item).unwrap();
    }
    store
}

fn names(records: &[Record]) -> Vec<&str> {
    records.iter().map(|r| r.name.as_str()).collect()
}

#[test]
fn test_empty_store_summary() {
    let dir = TempDir::new().unwrap();
    let store = CsvStore::open(dir.path().join("inventory.csv")).unwrap();

    let summary = store.summarize().unwrap();
    assert_eq!(summary.total_items, 0);
    assert_eq!(summary.categories, 0);
    assert!(summary.by_category.is_empty());
    assert!(summary.items.is_empty());
    assert!(store.list(&ListFilter::all()).unwrap().is_empty());
    assert!(store.search("").unwrap().is_empty());
}

#[test]
fn test_search_matches_name_or_notes_only() {
    let dir = TempDir::new().unwrap();
    let store = seeded_store(&dir);

    assert_eq!(names(&store.search("napa").unwrap()), vec!["Opus One 2019"]);
    assert_eq!(names(&store.search("PRO V1").unwrap()), vec!["Titleist Pro V1"]);
    assert_eq!(names(&store.search("guests").unwrap()), vec!["Kirkland Signature Vodka"]);
    // Category text is not searched
    assert!(store.search("spirits").unwrap().is_empty());
    assert_eq!(store.search("").unwrap().len(), 4);
}

#[test]
fn test_search_wine_in_notes() {
    let dir = TempDir::new().unwrap();
    let store = CsvStore::open(dir.path().join("inventory.csv")).unwrap();
    store
        .add(
            NewItem::new("Opus One 2019", "Wine")
                .quantity(3)
                .location("Cellar A")
                .notes("Premium Napa wine"),
        )
        .unwrap();
    store.add(NewItem::new("Titleist Pro V1", "Golf")).unwrap();

    let hits = store.search("wine").unwrap();
    assert_eq!(names(&hits), vec!["Opus One 2019"]);
}

#[test]
fn test_low_stock_listing() {
    let dir = TempDir::new().unwrap();
    let store = seeded_store(&dir);

    let low = store.list(&ListFilter::all().low_stock()).unwrap();
    assert_eq!(names(&low), vec!["Titleist Pro V1", "Kirkland Signature Vodka"]);
    assert!(low.iter().all(|r| r.quantity <= 2));
}

#[test]
fn test_filter_correctness() {
    let dir = TempDir::new().unwrap();
    let store = seeded_store(&dir);
    store.add(NewItem::new("Caymus 2020", "Wine").quantity(1)).unwrap();

    let all = store.list(&ListFilter::all()).unwrap();
    for category in ["Wine", "Apparel", "Golf", "Spirits", "wine", "Nope"] {
        let got = store.list(&ListFilter::all().category(category)).unwrap();
        let expected: Vec<_> = all.iter().filter(|r| r.category == category).cloned().collect();
        assert_eq!(got, expected, "category {category}");

        let both = store
            .list(&ListFilter::all().category(category).low_stock())
            .unwrap();
        let expected: Vec<_> = expected.into_iter().filter(|r| r.quantity <= 2).collect();
        assert_eq!(both, expected, "category {category} + low stock");
    }
}

#[test]
fn test_summary_preview_and_totals() {
    let dir = TempDir::new().unwrap();
    let store = seeded_store(&dir);
    store.add(NewItem::new("Caymus 2020", "Wine").quantity(6)).unwrap();
    store.add(NewItem::new("Driver", "Golf")).unwrap();

    let summary = store.summarize().unwrap();
    assert_eq!(
        names(&summary.items),
        vec![
            "Opus One 2019",
            "PGA Tour Merchandise",
            "Titleist Pro V1",
            "Kirkland Signature Vodka",
            "Caymus 2020",
        ]
    );
    assert_eq!(summary.total_items, 3 + 12 + 2 + 1 + 6 + 1);
    assert_eq!(summary.by_category.values().sum::<u64>(), summary.total_items);
    assert_eq!(summary.categories, summary.by_category.len());
    assert_eq!(summary.by_category["Wine"], 9);
    assert_eq!(summary.by_category["Golf"], 3);
}

#[test]
fn test_reads_are_idempotent() {
    let dir = TempDir::new().unwrap();
    let store = seeded_store(&dir);

    assert_eq!(
        store.list(&ListFilter::all()).unwrap(),
        store.list(&ListFilter::all()).unwrap()
    );
    assert_eq!(store.search("o").unwrap(), store.search("o").unwrap());
    assert_eq!(store.summarize().unwrap(), store.summarize().unwrap());
}

#[test]
fn test_reopen_sees_same_records() {
    let dir = TempDir::new().unwrap();
    let before = seeded_store(&dir).list(&ListFilter::all()).unwrap();

    let reopened = CsvStore::open(dir.path().join("inventory.csv")).unwrap();
    assert_eq!(reopened.list(&ListFilter::all()).unwrap(), before);

    let added = reopened.add(NewItem::new("Caymus 2020", "Wine")).unwrap();
    assert!(before.iter().all(|r| r.id != added.id));
}

#[test]
fn test_ids_unique_across_policies() {
    for policy in [IdPolicy::Sequential, IdPolicy::Random] {
        let dir = TempDir::new().unwrap();
        let options = StoreOptions {
            id_policy: policy,
            lock: true,
        };
        let store = CsvStore::open_with(dir.path().join("inventory.csv"), options).unwrap();

        for i in 0..100 {
            store.add(NewItem::new(format!("item {i}"), "Bulk")).unwrap();
        }

        let ids: HashSet<ItemId> = store
            .list(&ListFilter::all())
            .unwrap()
            .iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(ids.len(), 100, "policy {policy}");
    }
}

#[test]
fn test_validation_errors() {
    let dir = TempDir::new().unwrap();
    let store = seeded_store(&dir);

    assert!(matches!(
        store.add(NewItem::new("", "Wine")),
        Err(StoreError::Validation(_))
    ));
    assert!(matches!(
        store.add(NewItem::new("Negative", "Wine").quantity(-5)),
        Err(StoreError::Validation(_))
    ));
    assert_eq!(store.list(&ListFilter::all()).unwrap().len(), 4);
}

// CLI

fn cli(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_inventory"))
        .arg("--store")
        .arg(dir.join("inventory.csv"))
        .arg("--config")
        .arg(dir.join("absent-config.toml"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8(output.stdout.clone()).unwrap()
}

fn stderr(output: &Output) -> String {
    String::from_utf8(output.stderr.clone()).unwrap()
}

#[test]
fn test_cli_add_and_list() {
    let dir = TempDir::new().unwrap();

    let out = cli(
        dir.path(),
        &["add", "Opus One 2019", "Wine", "-q", "3", "--location", "Cellar A", "-n", "Premium Napa"],
    );
    assert!(out.status.success());
    assert_eq!(stdout(&out).trim(), "✓ Added Opus One 2019 (id 1000)");

    let out = cli(dir.path(), &["list", "--category", "Wine"]);
    assert!(out.status.success());
    assert!(stdout(&out).contains("[1000] Opus One 2019 - 3x (Cellar A) [Wine]"));
}

#[test]
fn test_cli_rejects_negative_quantity() {
    let dir = TempDir::new().unwrap();

    let out = cli(dir.path(), &["add", "Vodka", "Spirits", "-q", "-2"]);
    assert!(!out.status.success());

    let out = cli(dir.path(), &["--json", "list"]);
    let items: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(items.as_array().unwrap().len(), 0);
}

#[test]
fn test_cli_json_summary() {
    let dir = TempDir::new().unwrap();
    let out = cli(dir.path(), &["--json", "demo"]);
    assert!(out.status.success());

    let out = cli(dir.path(), &["--json", "summary"]);
    let summary: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(summary["total_items"], 18);
    assert_eq!(summary["categories"], 4);
    assert_eq!(summary["by_category"]["Apparel"], 12);
    assert_eq!(summary["items"].as_array().unwrap().len(), 4);
}

#[test]
fn test_cli_check_reports_corruption() {
    let dir = TempDir::new().unwrap();
    assert!(cli(dir.path(), &["add", "Driver", "Golf"]).status.success());

    let out = cli(dir.path(), &["check"]);
    assert!(out.status.success());
    assert!(stdout(&out).contains("healthy (1 records)"));

    let path = dir.path().join("inventory.csv");
    let mut content = std::fs::read_to_string(&path).unwrap();
    content.push_str("1001,Broken\n");
    std::fs::write(&path, content).unwrap();

    let out = cli(dir.path(), &["check"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(stdout(&out).contains("line 3"));

    let out = cli(dir.path(), &["list"]);
    assert!(!out.status.success());
}

#[test]
fn test_cli_rejects_unknown_log_level() {
    let dir = TempDir::new().unwrap();

    let out = cli(dir.path(), &["--log-level", "loud", "summary"]);
    assert!(!out.status.success());
    assert!(stderr(&out).contains("loud"));
    assert!(!dir.path().join("inventory.csv").exists());
}

#[test]
fn test_cli_logs_config_loading() {
    let dir = TempDir::new().unwrap();

    let out = cli(dir.path(), &["--log-level", "debug", "summary"]);
    assert!(out.status.success());
    assert!(stderr(&out).contains("No config file, using defaults"));
}

#[test]
fn test_cli_config_log_level_applies() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("config.toml");
    std::fs::write(&config, "config_version = 1\n\n[logging]\nlevel = \"debug\"\n").unwrap();

    let out = Command::new(env!("CARGO_BIN_EXE_inventory"))
        .arg("--store")
        .arg(dir.path().join("inventory.csv"))
        .arg("--config")
        .arg(&config)
        .arg("summary")
        .env_remove("RUST_LOG")
        .output()
        .unwrap();
    assert!(out.status.success());
    assert!(stderr(&out).contains("Log level set from config"));
}
