//! Shared fixtures for in-memory Launchpad databases

use uuid::Uuid;

use crate::store::LaunchpadStore;

/// Open an in-memory store with the Launchpad schema
pub(crate) fn memory_store() -> LaunchpadStore {
    LaunchpadStore::open_in_memory().expect("in-memory store")
}

/// Insert app rows the way the Dock would after enumerating /Applications.
///
/// Apps land on the holding page (parent 2) with sequential ids above the
/// current maximum. Returns the assigned item ids, in input order.
pub(crate) fn seed_apps(store: &LaunchpadStore, titles: &[&str]) -> Vec<i64> {
    let conn = store.connection();
    let max_id: i64 = conn
        .query_row("SELECT COALESCE(MAX(rowid), 6) FROM items", [], |row| {
            row.get(0)
        })
        .expect("max item id");

    let mut ids = Vec::with_capacity(titles.len());
    for (offset, title) in titles.iter().enumerate() {
        let id = max_id + 1 + offset as i64;
        conn.execute(
            "INSERT INTO items (rowid, uuid, flags, type, parent_id, ordering)
             VALUES (?, ?, 0, 4, 2, ?)",
            rusqlite::params![
                id,
                Uuid::new_v4().to_string().to_uppercase(),
                offset as i64
            ],
        )
        .expect("seed items row");
        conn.execute(
            "INSERT INTO apps (item_id, title, bundleid) VALUES (?, ?, ?)",
            rusqlite::params![id, title, format!("com.example.{}", title.to_lowercase())],
        )
        .expect("seed apps row");
        ids.push(id);
    }

    ids
}
