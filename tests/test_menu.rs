mod common;

use chrono::{DateTime, Local, TimeZone};
use common::{setup, symbols, StubProvider};
use stockdash::cli::menu::Menu;
use stockdash::cli::style::Theme;
use stockdash::StockDash;

fn fixed_clock() -> DateTime<Local> {
    Local.with_ymd_and_hms(2025, 11, 29, 14, 30, 0).unwrap()
}

async fn run_session(app: &StockDash, script: &str) -> String {
    let mut menu = Menu::new(app, Theme::plain(), fixed_clock, script.as_bytes(), Vec::new());
    menu.run().await.unwrap();
    String::from_utf8(menu.into_output()).unwrap()
}

#[tokio::test]
async fn test_add_view_and_exit() {
    let (app, _) = setup(StubProvider::new());
    let out = run_session(&app, "3\naapl, msft\n5\n6\n").await;

    assert!(out.contains("Stock Dashboard - Main Menu"));
    assert!(out.contains("Added to watchlist: AAPL, MSFT"));
    assert!(out.contains("1. AAPL\n2. MSFT"));
    assert!(out.contains("Thanks for using Stock Dashboard!"));
    assert_eq!(symbols(&app.watchlist().unwrap()), vec!["AAPL", "MSFT"]);
}

#[tokio::test]
async fn test_check_prints_table_and_failures() {
    let provider = StubProvider::new().with_quote("AAPL", 189.5, 187.25, "Apple Inc.");
    let (app, _) = setup(provider);
    let out = run_session(&app, "1\nAAPL,NOPE\n6\n").await;

    assert!(out.contains("Error fetching NOPE: Unknown symbol: NOPE"));
    assert!(out.contains("Updated: November 29, 2025 at 02:30 PM"));
    assert!(out.contains("Apple Inc."));
}

#[tokio::test]
async fn test_check_with_no_valid_data() {
    let (app, _) = setup(StubProvider::new());
    let out = run_session(&app, "1\nNOPE\n6\n").await;
    assert!(out.contains("No valid stocks data found."));
    assert!(!out.contains("Updated:"));
}

#[tokio::test]
async fn test_empty_watchlist_check_warns() {
    let (app, _) = setup(StubProvider::new());
    let out = run_session(&app, "2\n6\n").await;
    assert!(out.contains("Your watchlist is empty! Add some stocks first."));
}

#[tokio::test]
async fn test_remove_shows_list_first() {
    let (app, _) = setup(StubProvider::new());
    app.add(&["AAPL", "MSFT"]).unwrap();
    let out = run_session(&app, "4\nmsft,gme\n6\n").await;

    let list_at = out.find("1. AAPL").unwrap();
    let removed_at = out.find("Removed from watchlist: MSFT").unwrap();
    assert!(list_at < removed_at);
    assert!(out.contains("Not in watchlist: GME"));
    assert_eq!(symbols(&app.watchlist().unwrap()), vec!["AAPL"]);
}

#[tokio::test]
async fn test_invalid_choice_and_bad_tickers_keep_looping() {
    let (app, _) = setup(StubProvider::new());
    let out = run_session(&app, "9\n3\n$$$\n6\n").await;
    assert!(out.contains("Invalid choice. Please try again."));
    assert!(out.contains("Error: Invalid ticker symbol: $$$"));
    assert!(out.contains("Thanks for using Stock Dashboard!"));
}

#[tokio::test]
async fn test_end_of_input_exits_cleanly() {
    let (app, _) = setup(StubProvider::new());
    let out = run_session(&app, "5\n").await;
    assert!(out.contains("Your watchlist is empty!"));
    assert!(!out.contains("Thanks for using"));
}
