//! Launchpad database table shapes
//!
//! The live database is created by the Dock, never by this tool. This
//! module reproduces the subset of its schema that the store adapter
//! touches, so tests (and scratch databases) can run against a faithful
//! copy without a Dock present.

use rusqlite::{Connection, Result};

/// Create the Launchpad tables used by the store adapter
pub fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        -- Hierarchy records: root, pages, folders and apps
        CREATE TABLE IF NOT EXISTS items (
            rowid INTEGER PRIMARY KEY ASC,
            uuid VARCHAR,
            flags INTEGER,
            type INTEGER,
            parent_id INTEGER NOT NULL,
            ordering INTEGER
        );

        -- App metadata, joined to items by rowid
        CREATE TABLE IF NOT EXISTS apps (
            item_id INTEGER PRIMARY KEY,
            title VARCHAR,
            bundleid VARCHAR
        );

        -- Group metadata for root/page/folder records
        CREATE TABLE IF NOT EXISTS groups (
            item_id INTEGER PRIMARY KEY,
            category_id INTEGER,
            title VARCHAR
        );

        -- Key-value settings
        CREATE TABLE IF NOT EXISTS dbinfo (
            key VARCHAR,
            value VARCHAR
        );
        "#,
    )?;

    // Settings the store adapter reads and writes
    conn.execute(
        "INSERT INTO dbinfo (key, value)
         SELECT 'launchpad_root', '1'
         WHERE NOT EXISTS (SELECT 1 FROM dbinfo WHERE key = 'launchpad_root')",
        [],
    )?;
    conn.execute(
        "INSERT INTO dbinfo (key, value)
         SELECT 'ignore_items_update_triggers', '0'
         WHERE NOT EXISTS (SELECT 1 FROM dbinfo WHERE key = 'ignore_items_update_triggers')",
        [],
    )?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_schema_creates_tables() {
        let conn = Connection::open_in_memory().unwrap();
        init_schema(&conn).unwrap();

        let tables: Vec<String> = conn
            .prepare("SELECT name FROM sqlite_master WHERE type='table' ORDER BY name")
            .unwrap()
            .query_map([], |row| row.get(0))
            .unwrap()
            .filter_map(|r| r.ok())
            .collect();

        assert!(tables.contains(&"items".to_string()));
        assert!(tables.contains(&"apps".to_string()));
        assert!(tables.contains(&"groups".to_string()));
        assert!(tables.contains(&"dbinfo".to_string()));
    }

    #[test]
    fn test_init_schema_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        init_schema(&conn).unwrap();
        init_schema(&conn).unwrap();

        let count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM dbinfo WHERE key = 'launchpad_root'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(count, 1);
    }
}
