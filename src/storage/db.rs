use redb::Database as RedbDatabase;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

use super::documents::TableHandle;
use super::models::Record;
use super::tables::{self, KNOWN_TABLES};

#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Commit error: {0}")]
    Commit(Box<redb::CommitError>),
    #[error("Database error: {0}")]
    Redb(Box<redb::Error>),
    #[error("Database error: {0}")]
    RedbDatabase(Box<redb::DatabaseError>),
    #[error("Deserialization error: {0}")]
    Deserialization(#[from] rmp_serde::decode::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] rmp_serde::encode::Error),
    #[error("Storage error: {0}")]
    Storage(Box<redb::StorageError>),
    #[error("Table error: {0}")]
    Table(Box<redb::TableError>),
    #[error("Transaction error: {0}")]
    Transaction(Box<redb::TransactionError>),
    #[error("Record shape error: {0}")]
    Shape(#[from] serde_json::Error),
    #[error("Seed error: {0}")]
    Seed(String),
    #[error("No document with id {id} in table '{table}'")]
    NotFound { table: String, id: u64 },
    #[error("Table '{0}' is empty")]
    EmptyTable(String),
}

impl From<redb::CommitError> for DatabaseError {
    fn from(e: redb::CommitError) -> Self {
        DatabaseError::Commit(Box::new(e))
    }
}

impl From<redb::DatabaseError> for DatabaseError {
    fn from(e: redb::DatabaseError) -> Self {
        DatabaseError::RedbDatabase(Box::new(e))
    }
}

impl From<redb::Error> for DatabaseError {
    fn from(e: redb::Error) -> Self {
        DatabaseError::Redb(Box::new(e))
    }
}

impl From<redb::StorageError> for DatabaseError {
    fn from(e: redb::StorageError) -> Self {
        DatabaseError::Storage(Box::new(e))
    }
}

impl From<redb::TableError> for DatabaseError {
    fn from(e: redb::TableError) -> Self {
        DatabaseError::Table(Box::new(e))
    }
}

impl From<redb::TransactionError> for DatabaseError {
    fn from(e: redb::TransactionError) -> Self {
        DatabaseError::Transaction(Box::new(e))
    }
}

impl DatabaseError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, DatabaseError::NotFound { .. })
    }
}

#[derive(Clone)]
pub struct Database {
    db: Arc<RedbDatabase>,
}

/// Counts from a bulk seed import
#[derive(Debug, Default)]
pub struct ImportStats {
    pub tables: u64,
    pub records: u64,
}

impl Database {
    /// Open or create the document store file `file_name` inside `data_dir`
    pub fn open<P: AsRef<Path>>(data_dir: P, file_name: &str) -> Result<Self, DatabaseError> {
        std::fs::create_dir_all(data_dir.as_ref())?;
        let db_path = data_dir.as_ref().join(file_name);
        let db = Arc::new(RedbDatabase::create(db_path)?);

        // Create the catalog tables so read transactions never hit a missing table
        let write_txn = db.begin_write()?;
        for name in KNOWN_TABLES {
            let _ = write_txn.open_table(tables::definition(name))?;
        }
        write_txn.commit()?;

        Ok(Self { db })
    }

    /// Select (creating if needed) the named table and return a handle scoped to it.
    ///
    /// Existing tables are checked with a read transaction only; a write
    /// transaction is committed just once, when the table is first created.
    pub fn with_table(&self, name: &str) -> Result<TableHandle, DatabaseError> {
        let read_txn = self.db.begin_read()?;
        match read_txn.open_table(tables::definition(name)) {
            Ok(_) => return Ok(TableHandle::new(Arc::clone(&self.db), name)),
            Err(redb::TableError::TableDoesNotExist(_)) => {}
            Err(e) => return Err(e.into()),
        }
        drop(read_txn);

        tracing::debug!(table = name, "Creating table");
        let write_txn = self.db.begin_write()?;
        {
            let _ = write_txn.open_table(tables::definition(name))?;
        }
        write_txn.commit()?;

        Ok(TableHandle::new(Arc::clone(&self.db), name))
    }

    // ========================================================================
    // Bulk load
    // ========================================================================

    /// Import a JSON dump shaped `{ table: { "doc id": record } }`.
    ///
    /// Records are written under their given ids, replacing whatever was
    /// stored there. Everything lands in a single write transaction.
    pub fn import_json<P: AsRef<Path>>(&self, path: P) -> Result<ImportStats, DatabaseError> {
        let raw = std::fs::read(path.as_ref())?;
        let dump: BTreeMap<String, BTreeMap<String, Record>> = serde_json::from_slice(&raw)?;

        let mut stats = ImportStats::default();
        let write_txn = self.db.begin_write()?;
        for (table_name, records) in &dump {
            let mut table = write_txn.open_table(tables::definition(table_name))?;
            for (key, record) in records {
                let id: u64 = key.parse().map_err(|_| {
                    DatabaseError::Seed(format!(
                        "document id '{key}' in table '{table_name}' is not an integer"
                    ))
                })?;
                if id == 0 {
                    return Err(DatabaseError::Seed(format!(
                        "document ids start at 1 (table '{table_name}')"
                    )));
                }
                let data = rmp_serde::to_vec_named(record)?;
                table.insert(id, data.as_slice())?;
                stats.records += 1;
            }
            stats.tables += 1;
        }
        write_txn.commit()?;

        Ok(stats)
    }
}
