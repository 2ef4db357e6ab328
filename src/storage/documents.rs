use std::sync::Arc;

use rand::Rng;
use redb::{Database as RedbDatabase, ReadableTable, ReadableTableMetadata};
use serde_json::Value;

use super::db::DatabaseError;
use super::models::{Document, Record};
use super::tables;

/// Uniform query interface over one named table of the document store.
///
/// Handles are cheap: they hold the shared database and a table name, and
/// open a fresh transaction for each call.
#[derive(Clone)]
pub struct TableHandle {
    db: Arc<RedbDatabase>,
    name: String,
}

fn decode(id: u64, bytes: &[u8]) -> Result<Document, DatabaseError> {
    let data: Record = rmp_serde::from_slice(bytes)?;
    Ok(Document { id, data })
}

impl TableHandle {
    pub(crate) fn new(db: Arc<RedbDatabase>, name: &str) -> Self {
        Self {
            db,
            name: name.to_string(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    // ========================================================================
    // Reads
    // ========================================================================

    /// Number of documents in the table
    pub fn len(&self) -> Result<u64, DatabaseError> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(tables::definition(&self.name))?;
        Ok(table.len()?)
    }

    pub fn is_empty(&self) -> Result<bool, DatabaseError> {
        Ok(self.len()? == 0)
    }

    /// Every document in the table, in ascending id order
    pub fn all_items(&self) -> Result<Vec<Document>, DatabaseError> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(tables::definition(&self.name))?;

        let mut documents = Vec::new();
        for result in table.iter()? {
            let (key, value) = result?;
            documents.push(decode(key.value(), value.value())?);
        }

        Ok(documents)
    }

    /// Documents whose `key` field equals `value` exactly. Empty when nothing matches.
    pub fn find(
        &self,
        key: &str,
        value: impl Into<Value>,
    ) -> Result<Vec<Document>, DatabaseError> {
        let value = value.into();
        Ok(self
            .all_items()?
            .into_iter()
            .filter(|doc| doc.get(key) == Some(&value))
            .collect())
    }

    /// Case-insensitive substring match on a string field.
    ///
    /// An empty query means "no search" and yields `None`, never a match-all.
    pub fn search(&self, key: &str, value: &str) -> Result<Option<Vec<Document>>, DatabaseError> {
        if value.is_empty() {
            return Ok(None);
        }

        let needle = value.to_lowercase();
        let matches = self
            .all_items()?
            .into_iter()
            .filter(|doc| match doc.get(key) {
                Some(Value::String(field)) => field.to_lowercase().contains(&needle),
                _ => false,
            })
            .collect();

        Ok(Some(matches))
    }

    /// Fetch a document by its store id
    pub fn get_by_id(&self, id: u64) -> Result<Document, DatabaseError> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(tables::definition(&self.name))?;

        match table.get(id)? {
            Some(data) => decode(id, data.value()),
            None => Err(DatabaseError::NotFound {
                table: self.name.clone(),
                id,
            }),
        }
    }

    pub fn contains(&self, id: u64) -> Result<bool, DatabaseError> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(tables::definition(&self.name))?;
        Ok(table.get(id)?.is_some())
    }

    /// Pick a uniformly random id in `[1, len]` and fetch it.
    pub fn get_random_item(&self) -> Result<Document, DatabaseError> {
        let count = self.len()?;
        if count == 0 {
            return Err(DatabaseError::EmptyTable(self.name.clone()));
        }

        let id = rand::thread_rng().gen_range(1..=count);
        self.get_by_id(id)
    }

    // ========================================================================
    // Writes
    // ========================================================================

    /// Store a new record under the next free id and return that id
    pub fn insert(&self, record: &Record) -> Result<u64, DatabaseError> {
        let write_txn = self.db.begin_write()?;
        let id = {
            let mut table = write_txn.open_table(tables::definition(&self.name))?;
            let last_id = table.last()?.map(|(key, _)| key.value()).unwrap_or(0);
            let id = last_id + 1;

            let data = rmp_serde::to_vec_named(record)?;
            table.insert(id, data.as_slice())?;
            id
        };
        write_txn.commit()?;
        Ok(id)
    }

    /// Replace every record whose `key` field equals `value`, or insert the
    /// record when none does. Returns the ids written.
    pub fn upsert(
        &self,
        key: &str,
        value: impl Into<Value>,
        record: &Record,
    ) -> Result<Vec<u64>, DatabaseError> {
        let existing: Vec<u64> = self.find(key, value)?.iter().map(|doc| doc.id).collect();
        if existing.is_empty() {
            return Ok(vec![self.insert(record)?]);
        }

        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(tables::definition(&self.name))?;
            let data = rmp_serde::to_vec_named(record)?;
            for id in &existing {
                table.insert(*id, data.as_slice())?;
            }
        }
        write_txn.commit()?;
        Ok(existing)
    }
}
