//! Deck of Cards API Integration Tests
//! Run with: cargo test --test deck_api_test -- --ignored
//!
//! These talk to the real card service and are ignored by default so the
//! suite stays green without network access.

use std::sync::Once;

const API_BASE: &str = "https://deckofcardsapi.com/api/deck";

static INIT: Once = Once::new();

fn ensure_init() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt::try_init();
    });
}

/// Test that shuffling a deck returns a usable deck id
#[tokio::test]
#[ignore] // Requires network access
async fn test_shuffle_returns_deck_id() {
    ensure_init();

    let client = reqwest::Client::new();

    let response = client
        .get(format!("{}/new/shuffle/?deck_count=1", API_BASE))
        .send()
        .await
        .expect("Should reach the card API");

    assert!(
        response.status().is_success(),
        "Shuffle should succeed: {}",
        response.status()
    );

    let body: serde_json::Value = response.json().await.expect("Should parse JSON");

    assert_eq!(body["success"], true, "API should report success: {}", body);
    let deck_id = body["deck_id"].as_str().expect("Should have deck_id");
    assert!(!deck_id.is_empty(), "deck_id should not be empty");
    assert_eq!(body["remaining"], 52, "Fresh single deck should hold 52 cards");
}

/// Test that drawing returns well-formed cards
#[tokio::test]
#[ignore] // Requires network access
async fn test_draw_returns_well_formed_cards() {
    ensure_init();

    let client = reqwest::Client::new();

    let shuffle: serde_json::Value = client
        .get(format!("{}/new/shuffle/?deck_count=1", API_BASE))
        .send()
        .await
        .expect("Should reach the card API")
        .json()
        .await
        .expect("Should parse JSON");
    let deck_id = shuffle["deck_id"].as_str().expect("Should have deck_id");

    let draw: serde_json::Value = client
        .get(format!("{}/{}/draw/?count=2", API_BASE, deck_id))
        .send()
        .await
        .expect("Should reach the card API")
        .json()
        .await
        .expect("Should parse JSON");

    assert_eq!(draw["success"], true, "Draw should succeed: {}", draw);
    let cards = draw["cards"].as_array().expect("Should have cards array");
    assert_eq!(cards.len(), 2, "Should draw exactly 2 cards");

    for card in cards {
        let code = card["code"].as_str().expect("Card should have code");
        assert_eq!(code.len(), 2, "Card code is two characters: {}", code);
        assert!(card["value"].is_string(), "Card should have value");
        assert!(card["suit"].is_string(), "Card should have suit");
    }

    assert_eq!(draw["remaining"], 50, "Two cards should be gone from the deck");
}

/// Test that a bogus deck id is reported as a failure, not a crash
#[tokio::test]
#[ignore] // Requires network access
async fn test_unknown_deck_id_reports_failure() {
    ensure_init();

    let client = reqwest::Client::new();

    let response = client
        .get(format!("{}/no-such-deck/draw/?count=1", API_BASE))
        .send()
        .await
        .expect("Should reach the card API");

    let body: serde_json::Value = response.json().await.expect("Should parse JSON");

    assert_eq!(
        body["success"], false,
        "Unknown deck should not succeed: {}",
        body
    );
}
