/// redb-backed key-value store
use crate::error::Result;
use mixtape_core::KeyValueStore;
use redb::{Database, ReadableTable, TableDefinition};
use std::path::Path;
use tracing::debug;

const KV_TABLE: TableDefinition<&str, &str> = TableDefinition::new("kv");

/// Single-file on-device store holding one `kv` table.
pub struct RedbStore {
    db: Database,
}

impl RedbStore {
    /// Open (or create) the database file, creating parent directories.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        debug!(path = %path.display(), "Opening local store");
        let db = Database::create(path).map_err(redb::Error::from)?;
        Ok(Self { db })
    }

    fn read(&self, key: &str) -> Result<Option<String>> {
        let txn = self.db.begin_read().map_err(redb::Error::from)?;
        let table = match txn.open_table(KV_TABLE) {
            Ok(table) => table,
            // Nothing has been written yet
            Err(redb::TableError::TableDoesNotExist(_)) => return Ok(None),
            Err(e) => return Err(redb::Error::from(e).into()),
        };
        let value = table
            .get(key)
            .map_err(redb::Error::from)?
            .map(|guard| guard.value().to_string());
        Ok(value)
    }

    fn write(&self, key: &str, value: Option<&str>) -> Result<()> {
        let txn = self.db.begin_write().map_err(redb::Error::from)?;
        {
            let mut table = txn.open_table(KV_TABLE).map_err(redb::Error::from)?;
            match value {
                Some(value) => {
                    table.insert(key, value).map_err(redb::Error::from)?;
                }
                None => {
                    table.remove(key).map_err(redb::Error::from)?;
                }
            }
        }
        txn.commit().map_err(redb::Error::from)?;
        Ok(())
    }
}

impl KeyValueStore for RedbStore {
    fn get(&self, key: &str) -> mixtape_core::Result<Option<String>> {
        Ok(self.read(key)?)
    }

    fn set(&self, key: &str, value: &str) -> mixtape_core::Result<()> {
        Ok(self.write(key, Some(value))?)
    }

    fn remove(&self, key: &str) -> mixtape_core::Result<()> {
        Ok(self.write(key, None)?)
    }
}
