//! Offline tests for scout-db pool configuration and row conversions.
//! These tests do not require a live database connection.

use chrono::Utc;
use scout_core::{AppConfig, Environment, SignalType, Stage};
use scout_db::{GameRow, PoolConfig, SignalRow};
use sqlx::types::Json;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

#[test]
fn pool_config_from_app_config_uses_core_values() {
    let app_config = AppConfig {
        database_url: "postgres://example".to_string(),
        env: Environment::Test,
        bind_addr: SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), 3000),
        log_level: "info".to_string(),
        games_path: PathBuf::from("./config/games.yaml"),
        db_max_connections: 42,
        db_min_connections: 7,
        db_acquire_timeout_secs: 9,
        rescore_cron: "0 15 */6 * * *".to_string(),
        rescore_stale_hours: 6,
    };

    let pool_config = PoolConfig::from_app_config(&app_config);
    assert_eq!(pool_config.max_connections, 42);
    assert_eq!(pool_config.min_connections, 7);
    assert_eq!(pool_config.acquire_timeout_secs, 9);
}

#[test]
fn game_row_without_scores_converts() {
    let row = GameRow {
        app_id: 7,
        steam_name: "Row".to_string(),
        steam_url: "https://store.steampowered.com/app/7/".to_string(),
        developer_name: None,
        stage: Some("early_access".to_string()),
        release_date: None,
        publishers: Some(Json(vec!["  ".to_string()])),
        has_demo: false,
        price_eur: None,
        total_reviews: None,
        recent_reviews_30d: None,
        positive_ratio: None,
        intent_score: None,
        quality_score: None,
        intent_reasons: None,
        quality_reasons: None,
        scored_at: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    };

    let facts = row.to_facts();
    assert_eq!(facts.stage, Some(Stage::EarlyAccess));
    assert!(facts.publisher_names().is_empty());
    assert_eq!(facts.price_eur, None);
}

#[test]
fn signal_row_keeps_published_time() {
    let published = Utc::now();
    let row = SignalRow {
        id: 1,
        public_id: uuid::Uuid::new_v4(),
        app_id: 7,
        source: "discord".to_string(),
        signal_type: "announcement".to_string(),
        url: Some("https://discord.gg/probe".to_string()),
        text: "Next Fest demo".to_string(),
        confidence: 0.5,
        matched_keywords: Json(vec!["next fest".to_string()]),
        intent_strength: 2,
        published_at: Some(published),
        created_at: published + chrono::Duration::hours(3),
    };

    let signal = row.to_signal();
    assert_eq!(signal.signal_type, SignalType::Announcement);
    assert_eq!(signal.observed_at(), published);
}
