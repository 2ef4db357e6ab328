//! Shared test helpers for router tests.

use std::sync::Arc;

use serde_json::json;

use crate::config::{AssetConfig, Config, ServerConfig, StoreConfig};
use crate::storage::{Database, Record, ARTIST_DETAILS, ARTIST_INFO};
use crate::AppState;

pub fn record(value: serde_json::Value) -> Record {
    match value {
        serde_json::Value::Object(map) => map,
        other => panic!("test record must be a JSON object, got {other}"),
    }
}

/// Create a test AppState with an empty temporary store.
pub fn empty_state(temp_dir: &tempfile::TempDir) -> Arc<AppState> {
    let data_dir = temp_dir.path().join("data");
    let static_dir = temp_dir.path().join("static");

    let config = Config {
        server: ServerConfig {
            bind_address: "127.0.0.1:0".to_string(),
        },
        store: StoreConfig {
            data_dir: data_dir.to_string_lossy().to_string(),
            db_file: "test.redb".to_string(),
            seed_file: None,
        },
        assets: AssetConfig {
            static_dir: static_dir.to_string_lossy().to_string(),
            build_on_start: false,
            build_required: false,
            tailwind_bin: "tailwindcss".to_string(),
        },
        site_title: "Music Binder".to_string(),
    };

    let db = Database::open(&data_dir, &config.store.db_file).expect("Failed to open test database");

    Arc::new(AppState { config, db })
}

/// Create a test AppState seeded with two home-page artists and three detail records.
pub fn test_state(temp_dir: &tempfile::TempDir) -> Arc<AppState> {
    let state = empty_state(temp_dir);

    let info = state.db.with_table(ARTIST_INFO).expect("artist_info table");
    for (name, image) in [
        ("Nina Simone", "https://img.example/nina.jpg"),
        ("Can", "https://img.example/can.jpg"),
    ] {
        info.insert(&record(json!({ "name": name, "image": image })))
            .expect("insert artist_info");
    }

    let details = state.db.with_table(ARTIST_DETAILS).expect("artist_details table");
    let artists = [
        json!({
            "id": 101,
            "name": "Nina Simone",
            "uri": "https://example.com/artist/101",
            "profile": "[b]High Priestess[/b] of Soul",
            "urls": ["https://ninasimone.example", "https://en.wikipedia.org/wiki/Nina_Simone"],
            "images": [{ "resource_url": "https://img.example/nina-1.jpg" }]
        }),
        json!({
            "id": 102,
            "name": "Can",
            "uri": "https://example.com/artist/102",
            "profile": "Krautrock group from Cologne",
            "members": [
                { "name": "Holger Czukay", "active": true },
                { "name": "Malcolm Mooney", "active": false },
                { "name": "Irmin Schmidt", "active": true }
            ]
        }),
        json!({
            "id": 103,
            "name": "Cannonball Adderley",
            "uri": "https://example.com/artist/103",
            "profile": ""
        }),
    ];
    for artist in artists {
        details.insert(&record(artist)).expect("insert artist_details");
    }

    state
}
