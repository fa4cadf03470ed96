//! Persistent key/value snapshot store.
//!
//! Each collection (rooms, users, bookings) and the logged-in user are kept
//! as one JSON blob per key in a small `SQLite` database. The service layer
//! loads the blobs once at startup and overwrites a whole blob after every
//! mutation; there is no per-entity storage and no versioning of blob
//! contents.

pub mod migrations;
pub mod schema;

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, info, warn};

use crate::error::{Error, Result};

/// Key holding the rooms snapshot.
pub const ROOMS_KEY: &str = "hotel_rooms";
/// Key holding the users snapshot.
pub const USERS_KEY: &str = "hotel_users";
/// Key holding the bookings snapshot.
pub const BOOKINGS_KEY: &str = "hotel_bookings";
/// Key holding the logged-in user.
pub const CURRENT_USER_KEY: &str = "hotel_current_user";

/// Every key the application writes.
pub const ALL_KEYS: &[&str] = &[ROOMS_KEY, USERS_KEY, BOOKINGS_KEY, CURRENT_USER_KEY];

/// Snapshot store backed by `SQLite`.
#[derive(Debug)]
pub struct Storage {
    /// Path to the database file.
    path: PathBuf,
    /// Database connection.
    conn: Connection,
}

impl Storage {
    /// Open or create a storage database at the given path.
    ///
    /// Creates the parent directories and database file if they don't exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or schema initialization fails.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|source| Error::DirectoryCreate {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        debug!("Opening snapshot store at {}", path.display());
        let conn = Connection::open(&path).map_err(|source| Error::DatabaseOpen {
            path: path.clone(),
            source,
        })?;

        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA synchronous=NORMAL;")?;
        migrations::initialize_schema(&conn)?;

        info!("Snapshot store opened at {}", path.display());
        Ok(Self { path, conn })
    }

    /// Create an in-memory store, used by tests and `--ephemeral` runs.
    ///
    /// # Errors
    ///
    /// Returns an error if the in-memory database cannot be created.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(|source| Error::DatabaseOpen {
            path: PathBuf::from(":memory:"),
            source,
        })?;

        migrations::initialize_schema(&conn)?;

        Ok(Self {
            path: PathBuf::from(":memory:"),
            conn,
        })
    }

    /// Get the path to the database file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load and decode the snapshot under `key`.
    ///
    /// A blob that no longer decodes is logged and reported as absent, so a
    /// corrupt snapshot falls back to seed data instead of bricking startup.
    ///
    /// # Errors
    ///
    /// Returns an error if the database read fails.
    pub fn load<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let Some(raw) = self.load_raw(key)? else {
            debug!(key, "No snapshot stored");
            return Ok(None);
        };

        match serde_json::from_str(&raw) {
            Ok(value) => {
                debug!(key, bytes = raw.len(), "Loaded snapshot");
                Ok(Some(value))
            }
            Err(e) => {
                warn!(key, error = %e, "Discarding undecodable snapshot");
                Ok(None)
            }
        }
    }

    /// Read the raw JSON text under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the database read fails.
    pub fn load_raw(&self, key: &str) -> Result<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM snapshots WHERE key = ?1",
                [key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    /// Encode `value` and overwrite the snapshot under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding or the database write fails.
    pub fn save<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        let raw = serde_json::to_string(value)?;
        self.save_raw(key, &raw)
    }

    /// Overwrite the raw JSON text under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the database write fails.
    pub fn save_raw(&self, key: &str, raw: &str) -> Result<()> {
        self.conn.execute(
            r"
            INSERT INTO snapshots (key, value, updated_at) VALUES (?1, ?2, ?3)
            ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at
            ",
            params![key, raw, Utc::now().to_rfc3339()],
        )?;
        debug!(key, bytes = raw.len(), "Saved snapshot");
        Ok(())
    }

    /// Remove the snapshot under `key`.
    ///
    /// Returns `true` if a snapshot was removed, `false` if none existed.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn remove(&self, key: &str) -> Result<bool> {
        let affected = self
            .conn
            .execute("DELETE FROM snapshots WHERE key = ?1", [key])?;
        Ok(affected > 0)
    }

    /// Remove every application key.
    ///
    /// Returns the number of snapshots removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn clear_all(&self) -> Result<usize> {
        let mut removed = 0;
        for key in ALL_KEYS {
            if self.remove(key)? {
                removed += 1;
            }
        }
        if removed > 0 {
            info!("Cleared {} snapshots", removed);
        }
        Ok(removed)
    }

    /// List stored keys in alphabetical order.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn keys(&self) -> Result<Vec<String>> {
        let mut stmt = self.conn.prepare("SELECT key FROM snapshots ORDER BY key")?;
        let keys = stmt
            .query_map([], |row| row.get(0))?
            .collect::<std::result::Result<Vec<String>, _>>()?;
        Ok(keys)
    }

    /// Get store statistics.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn stats(&self) -> Result<StorageStats> {
        let (snapshot_count, payload_bytes): (i64, i64) = self.conn.query_row(
            "SELECT COUNT(*), COALESCE(SUM(LENGTH(value)), 0) FROM snapshots",
            [],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )?;

        let last_write: Option<String> = self
            .conn
            .query_row(
                "SELECT updated_at FROM snapshots ORDER BY updated_at DESC LIMIT 1",
                [],
                |row| row.get(0),
            )
            .optional()?;
        let last_write = last_write
            .and_then(|s| DateTime::parse_from_rfc3339(&s).ok())
            .map(|dt| dt.with_timezone(&Utc));

        let db_size_bytes = if self.path.to_string_lossy() == ":memory:" {
            0
        } else {
            std::fs::metadata(&self.path).map(|m| m.len()).unwrap_or(0)
        };

        Ok(StorageStats {
            snapshot_count,
            payload_bytes,
            last_write,
            db_size_bytes,
        })
    }
}

/// Statistics about the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StorageStats {
    /// Number of stored snapshots.
    pub snapshot_count: i64,
    /// Total size of the JSON payloads.
    pub payload_bytes: i64,
    /// Time of the most recent write.
    pub last_write: Option<DateTime<Utc>>,
    /// Size of the database file in bytes.
    pub db_size_bytes: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_storage() -> Storage {
        Storage::open_in_memory().expect("failed to create test storage")
    }

    #[test]
    fn test_open_in_memory() {
        let storage = create_test_storage();
        assert_eq!(storage.path().to_string_lossy(), ":memory:");
    }

    #[test]
    fn test_save_and_load() {
        let storage = create_test_storage();
        storage.save(ROOMS_KEY, &vec!["a", "b"]).unwrap();

        let loaded: Option<Vec<String>> = storage.load(ROOMS_KEY).unwrap();
        assert_eq!(loaded, Some(vec!["a".to_string(), "b".to_string()]));
    }

    #[test]
    fn test_load_missing_key() {
        let storage = create_test_storage();
        let loaded: Option<Vec<String>> = storage.load(USERS_KEY).unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn test_save_overwrites() {
        let storage = create_test_storage();
        storage.save(BOOKINGS_KEY, &1_u32).unwrap();
        storage.save(BOOKINGS_KEY, &2_u32).unwrap();

        assert_eq!(storage.load::<u32>(BOOKINGS_KEY).unwrap(), Some(2));
        assert_eq!(storage.keys().unwrap(), vec![BOOKINGS_KEY.to_string()]);
    }

    #[test]
    fn test_undecodable_snapshot_is_absent() {
        let storage = create_test_storage();
        storage.save_raw(ROOMS_KEY, "{not json").unwrap();

        let loaded: Option<Vec<String>> = storage.load(ROOMS_KEY).unwrap();
        assert!(loaded.is_none());
        // The raw text is left in place for inspection.
        assert_eq!(
            storage.load_raw(ROOMS_KEY).unwrap().as_deref(),
            Some("{not json")
        );
    }

    #[test]
    fn test_remove() {
        let storage = create_test_storage();
        storage.save(CURRENT_USER_KEY, "someone").unwrap();

        assert!(storage.remove(CURRENT_USER_KEY).unwrap());
        assert!(!storage.remove(CURRENT_USER_KEY).unwrap());
        assert!(storage.load::<String>(CURRENT_USER_KEY).unwrap().is_none());
    }

    #[test]
    fn test_clear_all() {
        let storage = create_test_storage();
        storage.save(ROOMS_KEY, &Vec::<u8>::new()).unwrap();
        storage.save(USERS_KEY, &Vec::<u8>::new()).unwrap();
        storage.save("unrelated", &0_u8).unwrap();

        assert_eq!(storage.clear_all().unwrap(), 2);
        assert_eq!(storage.keys().unwrap(), vec!["unrelated".to_string()]);
    }

    #[test]
    fn test_stats_empty() {
        let storage = create_test_storage();
        let stats = storage.stats().unwrap();

        assert_eq!(stats.snapshot_count, 0);
        assert_eq!(stats.payload_bytes, 0);
        assert!(stats.last_write.is_none());
        assert_eq!(stats.db_size_bytes, 0);
    }

    #[test]
    fn test_stats_with_data() {
        let storage = create_test_storage();
        storage.save_raw(ROOMS_KEY, "[]").unwrap();
        storage.save_raw(USERS_KEY, "[1]").unwrap();

        let stats = storage.stats().unwrap();
        assert_eq!(stats.snapshot_count, 2);
        assert_eq!(stats.payload_bytes, 5);
        assert!(stats.last_write.is_some());
    }

    #[test]
    fn test_open_file_based_persists() {
        let db_path = std::env::temp_dir().join(format!(
            "hotelbook_storage_test_{}.db",
            std::process::id()
        ));

        {
            let storage = Storage::open(&db_path).unwrap();
            storage.save(ROOMS_KEY, &vec![1, 2, 3]).unwrap();
            assert_eq!(storage.path(), db_path);
            assert!(storage.stats().unwrap().db_size_bytes > 0);
        }

        let reopened = Storage::open(&db_path).unwrap();
        assert_eq!(
            reopened.load::<Vec<i32>>(ROOMS_KEY).unwrap(),
            Some(vec![1, 2, 3])
        );

        drop(reopened);
        let _ = std::fs::remove_file(&db_path);
        let _ = std::fs::remove_file(db_path.with_extension("db-wal"));
        let _ = std::fs::remove_file(db_path.with_extension("db-shm"));
    }

    #[test]
    fn test_open_creates_parent_dirs() {
        let root = std::env::temp_dir().join(format!("hotelbook_test_{}", std::process::id()));
        let nested_path = root.join("nested/hotel.db");
        let _ = std::fs::remove_dir_all(&root);

        let storage = Storage::open(&nested_path).unwrap();
        assert!(nested_path.exists());

        drop(storage);
        let _ = std::fs::remove_dir_all(&root);
    }
}
