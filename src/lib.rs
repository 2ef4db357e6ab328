//! music-binder - A server-rendered music catalog browser
//!
//! This crate provides:
//! - A document store shim over named redb tables of schemaless records
//! - Typed artist records with display accessors
//! - An axum router that answers each page either in full or as the single
//!   fragment an htmx interaction asks for

pub mod api;
pub mod assets;
pub mod catalog;
pub mod config;
pub mod storage;
#[cfg(test)]
pub mod testutil;
pub mod views;

use config::Config;
use storage::Database;

/// Shared application state
pub struct AppState {
    pub config: Config,
    pub db: Database,
}
