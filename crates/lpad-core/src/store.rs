//! Record store adapter for the Launchpad database
//!
//! Thin transactional interface over the Dock's SQLite database. Every
//! write method is individually transactional: a failed operation rolls
//! back only itself and surfaces the error to the caller, which decides
//! whether to continue. There is no cross-operation atomicity.

use std::collections::HashMap;
use std::path::Path;

use rusqlite::{params, Connection, OptionalExtension};
use tracing::warn;

use crate::error::{LayoutError, LayoutResult};
use crate::models::ItemKind;
use crate::schema::init_schema;

/// Bootstrap record UUIDs, exempt from declarative processing
pub const RESERVED_UUIDS: [&str; 6] = [
    "ROOTPAGE",
    "HOLDINGPAGE",
    "ROOTPAGE_DB",
    "HOLDINGPAGE_DB",
    "ROOTPAGE_VERS",
    "HOLDINGPAGE_VERS",
];

/// Metadata for one live app, keyed by title in the entry mapping
#[derive(Debug, Clone, PartialEq)]
pub struct AppEntry {
    pub item_id: i64,
    pub uuid: String,
    pub flags: Option<i64>,
}

/// One hierarchy record as read back from the database
#[derive(Debug, Clone, PartialEq)]
pub struct ItemRow {
    pub id: i64,
    pub parent_id: i64,
    pub kind: ItemKind,
    pub app_title: Option<String>,
    pub group_title: Option<String>,
}

/// A scaffold record to insert (page, folder root or bootstrap record)
#[derive(Debug)]
pub struct NewItem<'a> {
    pub id: i64,
    pub uuid: &'a str,
    pub flags: Option<i64>,
    pub kind: ItemKind,
    pub parent_id: i64,
    pub ordering: i64,
    pub group_title: Option<&'a str>,
}

/// Handle to the Launchpad database
pub struct LaunchpadStore {
    conn: Connection,
}

impl LaunchpadStore {
    /// Open an existing Launchpad database
    pub fn open(path: &Path) -> LayoutResult<Self> {
        let conn = Connection::open(path)?;
        Ok(Self { conn })
    }

    /// Open an in-memory database with the Launchpad schema (for testing)
    pub fn open_in_memory() -> LayoutResult<Self> {
        let conn = Connection::open_in_memory()?;
        init_schema(&conn)?;
        Ok(Self { conn })
    }

    /// Get a reference to the underlying connection
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Root item id of the main app hierarchy (dbinfo `launchpad_root`)
    pub fn root_id(&self) -> LayoutResult<i64> {
        let value: Option<String> = self
            .conn
            .query_row(
                "SELECT value FROM dbinfo WHERE key = 'launchpad_root'",
                [],
                |row| row.get(0),
            )
            .optional()?;

        let value = value.ok_or_else(|| LayoutError::MissingDbInfo {
            key: "launchpad_root".to_string(),
        })?;

        value.parse().map_err(|_| LayoutError::MissingDbInfo {
            key: "launchpad_root".to_string(),
        })
    }

    /// Suppress or restore the live-index update triggers
    ///
    /// Must be enabled before bulk structural writes and restored on every
    /// exit path, or the Dock is left ignoring its own updates.
    pub fn set_trigger_suppression(&mut self, suppress: bool) -> LayoutResult<()> {
        self.conn.execute(
            "UPDATE dbinfo SET value = ? WHERE key = 'ignore_items_update_triggers'",
            params![if suppress { 1 } else { 0 }],
        )?;
        Ok(())
    }

    /// Whether update triggers are currently suppressed
    pub fn triggers_suppressed(&self) -> LayoutResult<bool> {
        let value: Option<String> = self
            .conn
            .query_row(
                "SELECT value FROM dbinfo WHERE key = 'ignore_items_update_triggers'",
                [],
                |row| row.get(0),
            )
            .optional()?;

        Ok(matches!(value.as_deref(), Some("1")))
    }

    /// Map every live app title to its item metadata, plus the highest app id
    ///
    /// Titles are assumed unique; if two apps share a title the last row
    /// read wins, which matches the undefined-duplicate behavior of the
    /// live database.
    pub fn entry_mapping(&self) -> LayoutResult<(HashMap<String, AppEntry>, i64)> {
        let mut stmt = self.conn.prepare(
            "SELECT apps.item_id, apps.title, items.uuid, items.flags
             FROM apps
             JOIN items ON items.rowid = apps.item_id",
        )?;

        let mut mapping = HashMap::new();
        let mut max_id = 0;

        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, Option<i64>>(3)?,
            ))
        })?;

        for row in rows {
            let (item_id, title, uuid, flags) = row?;
            max_id = max_id.max(item_id);
            mapping.insert(
                title,
                AppEntry {
                    item_id,
                    uuid,
                    flags,
                },
            );
        }

        Ok((mapping, max_id))
    }

    /// Read every hierarchy record except the reserved bootstrap records,
    /// ordered by parent then sibling ordering
    ///
    /// Rows with an unrecognized type code are skipped with a warning.
    pub fn all_records(&self) -> LayoutResult<Vec<ItemRow>> {
        let mut stmt = self.conn.prepare(
            "SELECT items.rowid, items.parent_id, items.type,
                    apps.title AS app_title,
                    groups.title AS group_title
             FROM items
             LEFT JOIN apps ON apps.item_id = items.rowid
             LEFT JOIN groups ON groups.item_id = items.rowid
             WHERE items.uuid NOT IN (?, ?, ?, ?, ?, ?)
             ORDER BY items.parent_id, items.ordering",
        )?;

        let rows = stmt.query_map(params![
            RESERVED_UUIDS[0],
            RESERVED_UUIDS[1],
            RESERVED_UUIDS[2],
            RESERVED_UUIDS[3],
            RESERVED_UUIDS[4],
            RESERVED_UUIDS[5],
        ], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, i64>(1)?,
                row.get::<_, i64>(2)?,
                row.get::<_, Option<String>>(3)?,
                row.get::<_, Option<String>>(4)?,
            ))
        })?;

        let mut records = Vec::new();
        for row in rows {
            let (id, parent_id, code, app_title, group_title) = row?;
            let Some(kind) = ItemKind::from_code(code) else {
                warn!(id, code, "skipping record with unknown item type");
                continue;
            };
            records.push(ItemRow {
                id,
                parent_id,
                kind,
                app_title,
                group_title,
            });
        }

        Ok(records)
    }

    /// Delete every record of the given kinds (scaffolding wipe)
    ///
    /// Also sweeps `groups` rows left orphaned by the delete; the live
    /// database does this via triggers, but those are suppressed during a
    /// rebuild and a scratch database has none at all.
    pub fn delete_items_of_kinds(&mut self, kinds: &[ItemKind]) -> LayoutResult<()> {
        let placeholders = vec!["?"; kinds.len()].join(", ");
        let sql = format!("DELETE FROM items WHERE type IN ({})", placeholders);
        let codes: Vec<i64> = kinds.iter().map(|k| k.code()).collect();

        let tx = self.conn.transaction()?;
        tx.execute(&sql, rusqlite::params_from_iter(codes))?;
        tx.execute(
            "DELETE FROM groups WHERE item_id NOT IN (SELECT rowid FROM items)",
            [],
        )?;
        tx.commit()?;
        Ok(())
    }

    /// Insert a scaffold record and its group metadata row in one transaction
    pub fn insert_item(&mut self, item: &NewItem<'_>) -> LayoutResult<()> {
        let tx = self.conn.transaction()?;

        tx.execute(
            "INSERT INTO items (rowid, uuid, flags, type, parent_id, ordering)
             VALUES (?, ?, ?, ?, ?, ?)",
            params![
                item.id,
                item.uuid,
                item.flags,
                item.kind.code(),
                item.parent_id,
                item.ordering
            ],
        )?;

        tx.execute(
            "INSERT INTO groups (item_id, category_id, title) VALUES (?, NULL, ?)",
            params![item.id, item.group_title],
        )?;

        tx.commit()?;
        Ok(())
    }

    /// Reposition an existing record under a new parent and ordering
    pub fn update_item(
        &mut self,
        item_id: i64,
        uuid: &str,
        flags: Option<i64>,
        kind: ItemKind,
        parent_id: i64,
        ordering: i64,
    ) -> LayoutResult<()> {
        self.conn.execute(
            "UPDATE items
             SET uuid = ?, flags = ?, type = ?, parent_id = ?, ordering = ?
             WHERE rowid = ?",
            params![uuid, flags, kind.code(), parent_id, ordering, item_id],
        )?;
        Ok(())
    }

    /// Remove the given apps from the database entirely
    ///
    /// Each title is processed in its own transaction; a failure rolls back
    /// that title and processing continues. Returns the titles actually
    /// removed.
    pub fn hide_entries(&mut self, titles: &[String]) -> LayoutResult<Vec<String>> {
        let mut hidden = Vec::new();

        for title in titles {
            let exists: bool = self
                .conn
                .prepare("SELECT 1 FROM apps WHERE title = ?")?
                .exists(params![title])?;

            if !exists {
                warn!(%title, "app not found in Launchpad, cannot hide");
                continue;
            }

            let tx = match self.conn.transaction() {
                Ok(tx) => tx,
                Err(e) => {
                    warn!(%title, error = %e, "failed to start hide transaction");
                    continue;
                }
            };

            let result = tx
                .execute(
                    "DELETE FROM items
                     WHERE rowid IN (SELECT item_id FROM apps WHERE title = ?)",
                    params![title],
                )
                .and_then(|_| tx.execute("DELETE FROM apps WHERE title = ?", params![title]))
                .and_then(|_| tx.commit());

            match result {
                Ok(()) => hidden.push(title.clone()),
                Err(e) => {
                    // This title is rolled back; the rest still get processed
                    warn!(%title, error = %e, "failed to hide app");
                }
            }
        }

        Ok(hidden)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{memory_store, seed_apps};

    #[test]
    fn test_open_creates_handle_on_disk() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("db");

        {
            let store = LaunchpadStore::open(&path).unwrap();
            init_schema(store.connection()).unwrap();
        }

        let store = LaunchpadStore::open(&path).unwrap();
        assert_eq!(store.root_id().unwrap(), 1);
    }

    #[test]
    fn test_root_id_missing_key() {
        let store = memory_store();
        store
            .connection()
            .execute("DELETE FROM dbinfo WHERE key = 'launchpad_root'", [])
            .unwrap();

        assert!(matches!(
            store.root_id(),
            Err(LayoutError::MissingDbInfo { .. })
        ));
    }

    #[test]
    fn test_entry_mapping_and_max_id() {
        let store = memory_store();
        let ids = seed_apps(&store, &["Mail", "Notes", "Safari"]);

        let (mapping, max_id) = store.entry_mapping().unwrap();
        assert_eq!(mapping.len(), 3);
        assert_eq!(max_id, *ids.iter().max().unwrap());

        let mail = &mapping["Mail"];
        assert_eq!(mail.item_id, ids[0]);
        assert!(!mail.uuid.is_empty());
    }

    #[test]
    fn test_trigger_suppression_round_trip() {
        let mut store = memory_store();
        assert!(!store.triggers_suppressed().unwrap());

        store.set_trigger_suppression(true).unwrap();
        assert!(store.triggers_suppressed().unwrap());

        store.set_trigger_suppression(false).unwrap();
        assert!(!store.triggers_suppressed().unwrap());
    }

    #[test]
    fn test_insert_item_writes_group_row() {
        let mut store = memory_store();
        store
            .insert_item(&NewItem {
                id: 10,
                uuid: "UUID-10",
                flags: Some(0),
                kind: ItemKind::FolderRoot,
                parent_id: 1,
                ordering: 0,
                group_title: Some("Utils"),
            })
            .unwrap();

        let title: String = store
            .connection()
            .query_row("SELECT title FROM groups WHERE item_id = 10", [], |row| {
                row.get(0)
            })
            .unwrap();
        assert_eq!(title, "Utils");
    }

    #[test]
    fn test_insert_duplicate_id_fails_and_rolls_back() {
        let mut store = memory_store();
        let item = NewItem {
            id: 10,
            uuid: "UUID-10",
            flags: Some(2),
            kind: ItemKind::Page,
            parent_id: 1,
            ordering: 1,
            group_title: None,
        };

        store.insert_item(&item).unwrap();
        assert!(store.insert_item(&item).is_err());

        // Only one groups row survives the rollback
        let count: i64 = store
            .connection()
            .query_row("SELECT COUNT(*) FROM groups WHERE item_id = 10", [], |row| {
                row.get(0)
            })
            .unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_delete_items_of_kinds_keeps_apps() {
        let mut store = memory_store();
        seed_apps(&store, &["Mail"]);
        store
            .insert_item(&NewItem {
                id: 200,
                uuid: "UUID-200",
                flags: Some(2),
                kind: ItemKind::Page,
                parent_id: 1,
                ordering: 1,
                group_title: None,
            })
            .unwrap();

        store
            .delete_items_of_kinds(&[ItemKind::Root, ItemKind::FolderRoot, ItemKind::Page])
            .unwrap();

        let pages: i64 = store
            .connection()
            .query_row("SELECT COUNT(*) FROM items WHERE type = 3", [], |row| {
                row.get(0)
            })
            .unwrap();
        assert_eq!(pages, 0);

        let (mapping, _) = store.entry_mapping().unwrap();
        assert!(mapping.contains_key("Mail"));
    }

    #[test]
    fn test_delete_items_of_kinds_sweeps_orphaned_group_rows() {
        let mut store = memory_store();
        store
            .insert_item(&NewItem {
                id: 10,
                uuid: "UUID-10",
                flags: Some(0),
                kind: ItemKind::FolderRoot,
                parent_id: 1,
                ordering: 0,
                group_title: Some("Utils"),
            })
            .unwrap();

        store
            .delete_items_of_kinds(&[ItemKind::Root, ItemKind::FolderRoot, ItemKind::Page])
            .unwrap();

        let orphans: i64 = store
            .connection()
            .query_row("SELECT COUNT(*) FROM groups", [], |row| row.get(0))
            .unwrap();
        assert_eq!(orphans, 0);

        // The freed id must be reusable for the next rebuild's scaffolding
        store
            .insert_item(&NewItem {
                id: 10,
                uuid: "UUID-10B",
                flags: Some(2),
                kind: ItemKind::Page,
                parent_id: 1,
                ordering: 1,
                group_title: None,
            })
            .unwrap();
    }

    #[test]
    fn test_hide_entries_continues_past_failed_title() {
        let mut store = memory_store();
        seed_apps(&store, &["Mail", "Chess"]);
        store
            .connection()
            .execute_batch(
                "CREATE TRIGGER block_chess BEFORE DELETE ON apps
                 WHEN OLD.title = 'Chess'
                 BEGIN SELECT RAISE(ABORT, 'blocked'); END;",
            )
            .unwrap();

        let hidden = store
            .hide_entries(&["Chess".to_string(), "Mail".to_string()])
            .unwrap();
        assert_eq!(hidden, vec!["Mail"]);

        // The failed title's rows are all still present
        let (mapping, _) = store.entry_mapping().unwrap();
        assert!(mapping.contains_key("Chess"));
    }

    #[test]
    fn test_hide_entries_removes_rows() {
        let mut store = memory_store();
        seed_apps(&store, &["Mail", "Chess"]);

        let hidden = store
            .hide_entries(&["Chess".to_string(), "Ghost".to_string()])
            .unwrap();
        assert_eq!(hidden, vec!["Chess"]);

        let (mapping, _) = store.entry_mapping().unwrap();
        assert!(mapping.contains_key("Mail"));
        assert!(!mapping.contains_key("Chess"));
    }

    #[test]
    fn test_all_records_excludes_reserved_uuids() {
        let mut store = memory_store();
        seed_apps(&store, &["Mail"]);
        store
            .insert_item(&NewItem {
                id: 1,
                uuid: "ROOTPAGE",
                flags: None,
                kind: ItemKind::Root,
                parent_id: 0,
                ordering: 0,
                group_title: None,
            })
            .unwrap();

        let records = store.all_records().unwrap();
        assert!(records.iter().all(|r| r.id != 1));
        assert!(records
            .iter()
            .any(|r| r.app_title.as_deref() == Some("Mail")));
    }

    #[test]
    fn test_all_records_skips_unknown_kind() {
        let store = memory_store();
        store
            .connection()
            .execute(
                "INSERT INTO items (rowid, uuid, flags, type, parent_id, ordering)
                 VALUES (50, 'UUID-50', 0, 9, 1, 0)",
                [],
            )
            .unwrap();

        assert!(store.all_records().unwrap().is_empty());
    }
}
