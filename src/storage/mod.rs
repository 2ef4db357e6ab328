pub mod db;
mod documents;
pub mod models;
mod tables;

pub use db::{Database, DatabaseError, ImportStats};
pub use documents::TableHandle;
pub use models::{Document, Record};
pub use tables::{ARTIST_DETAILS, ARTIST_INFO};
