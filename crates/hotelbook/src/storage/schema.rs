//! `SQLite` schema definitions for hotelbook.
//!
//! The store is deliberately schemaless at the entity level: each collection
//! is kept as a single JSON snapshot under a well-known key.

/// SQL statement to create the snapshots table.
pub const CREATE_SNAPSHOTS_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS snapshots (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL,
    updated_at TEXT NOT NULL
)
";

/// SQL statement to create an index on `updated_at` for the stats query.
pub const CREATE_UPDATED_AT_INDEX: &str = r"
CREATE INDEX IF NOT EXISTS idx_snapshots_updated_at ON snapshots(updated_at DESC)
";

/// SQL statement to create the metadata table for storing key-value pairs.
pub const CREATE_METADATA_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS metadata (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL
)
";

/// All schema creation statements in order.
pub const SCHEMA_STATEMENTS: &[&str] = &[
    CREATE_SNAPSHOTS_TABLE,
    CREATE_UPDATED_AT_INDEX,
    CREATE_METADATA_TABLE,
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_statements_not_empty() {
        assert!(!SCHEMA_STATEMENTS.is_empty());
        for stmt in SCHEMA_STATEMENTS {
            assert!(!stmt.is_empty());
        }
    }

    #[test]
    fn test_create_snapshots_table_contains_required_columns() {
        assert!(CREATE_SNAPSHOTS_TABLE.contains("key TEXT PRIMARY KEY"));
        assert!(CREATE_SNAPSHOTS_TABLE.contains("value TEXT NOT NULL"));
        assert!(CREATE_SNAPSHOTS_TABLE.contains("updated_at TEXT NOT NULL"));
    }
}
