//! Layout reconciliation and extraction
//!
//! The engine translates a declarative layout into hierarchy records and
//! back. Rebuilding never touches app rows themselves: only the
//! root/page/folder scaffolding is torn down and recreated, and existing
//! app records are repositioned under the new scaffolding. App rows carry
//! external references (icon caches key on their ids), scaffolding does
//! not.
//!
//! Declared and live app sets routinely diverge, so the engine degrades
//! instead of failing: declared titles with no live record are skipped and
//! reported, live apps absent from the declaration are appended to new
//! trailing pages, and individual record write failures roll back only
//! that record.

use std::collections::{BTreeSet, HashMap};
use std::thread;
use std::time::Duration;

use tracing::{error, info, warn};
use uuid::Uuid;

use crate::dock::DockControl;
use crate::error::LayoutResult;
use crate::hierarchy::HierarchyMap;
use crate::models::{declared_titles, ItemKind, LayoutConfig, LayoutItem, PageLayout};
use crate::store::{AppEntry, LaunchpadStore, NewItem};

/// Apps per auto-appended trailing page
pub const UNPLACED_PAGE_SIZE: usize = 30;

/// Root of the main app hierarchy
const MAIN_ROOT_ID: i64 = 1;

/// Bootstrap records recreated on every rebuild: (id, uuid, kind, parent).
/// Ids 1/2 anchor the app hierarchy, 5/6 the parallel versions hierarchy.
const BOOTSTRAP_RECORDS: [(i64, &str, ItemKind, i64); 4] = [
    (1, "ROOTPAGE", ItemKind::Root, 0),
    (2, "HOLDINGPAGE", ItemKind::Page, 1),
    (5, "ROOTPAGE_VERS", ItemKind::Root, 0),
    (6, "HOLDINGPAGE_VERS", ItemKind::Page, 5),
];

/// Knobs for a single rebuild run
#[derive(Debug, Clone)]
pub struct BuildOptions {
    /// Reset Launchpad to defaults before rebuilding
    pub reset: bool,
    /// Restart the Dock once the rebuild is written
    pub restart: bool,
    /// How long to wait for the Dock to re-enumerate apps after a reset
    pub settle: Duration,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            reset: true,
            restart: true,
            settle: Duration::from_secs(1),
        }
    }
}

/// Accumulated warnings from a rebuild run
///
/// None of these fail the run; the caller decides how to present them.
#[derive(Debug, Default)]
pub struct BuildReport {
    /// Apps removed because they were listed in `hidden_apps`
    pub hidden: Vec<String>,
    /// Live apps absent from the declared layout, appended to trailing pages
    pub unplaced: Vec<String>,
    /// Declared titles with no live record, skipped
    pub missing: Vec<String>,
    /// Records whose insert/update failed and was rolled back
    pub failed_writes: Vec<String>,
}

impl BuildReport {
    pub fn has_warnings(&self) -> bool {
        !self.unplaced.is_empty() || !self.missing.is_empty() || !self.failed_writes.is_empty()
    }
}

/// Reconciles declarative layouts against the Launchpad database
pub struct LayoutEngine<D: DockControl> {
    store: LaunchpadStore,
    dock: D,
}

impl<D: DockControl> LayoutEngine<D> {
    pub fn new(store: LaunchpadStore, dock: D) -> Self {
        Self { store, dock }
    }

    /// The underlying record store
    pub fn store(&self) -> &LaunchpadStore {
        &self.store
    }

    /// Rebuild the Launchpad hierarchy to match the declared layout
    ///
    /// The working layout is mutated in place: live apps missing from it
    /// are appended as trailing pages of at most [`UNPLACED_PAGE_SIZE`]
    /// apps, so every live app lands somewhere in the rebuilt tree.
    pub fn build_layout(
        &mut self,
        layout: &mut Vec<PageLayout>,
        hidden_apps: &[String],
        opts: &BuildOptions,
    ) -> LayoutResult<BuildReport> {
        let mut report = BuildReport::default();

        if opts.reset {
            self.dock.reset_layout()?;
            // The Dock needs a moment to recreate its default records
            thread::sleep(opts.settle);
        }

        let (snapshot, _) = self.store.entry_mapping()?;

        if !hidden_apps.is_empty() {
            // Only hide apps that are actually present
            let present: Vec<String> = hidden_apps
                .iter()
                .filter(|title| snapshot.contains_key(*title))
                .cloned()
                .collect();
            report.hidden = self.store.hide_entries(&present)?;
        }

        // Post-hide snapshot; new scaffold ids are minted above max_id
        let (mapping, max_id) = self.store.entry_mapping()?;

        report.unplaced = append_unplaced(layout, &mapping);
        if !report.unplaced.is_empty() {
            warn!(
                count = report.unplaced.len(),
                "live apps absent from the layout, appended to trailing pages"
            );
        }

        self.store
            .delete_items_of_kinds(&[ItemKind::Root, ItemKind::FolderRoot, ItemKind::Page])?;

        self.store.set_trigger_suppression(true)?;
        self.write_scaffolding(layout, &mapping, max_id, &mut report);
        self.store.set_trigger_suppression(false)?;

        if !report.missing.is_empty() {
            warn!(
                count = report.missing.len(),
                "declared apps not found in Launchpad, skipped"
            );
        }

        if opts.restart {
            // A failed restart leaves a correct database; not a build failure
            if let Err(e) = self.dock.restart() {
                error!(error = %e, "failed to restart the Dock");
            }
        }

        info!(
            pages = layout.len(),
            hidden = report.hidden.len(),
            "layout rebuilt"
        );
        Ok(report)
    }

    /// Recover the declarative layout from the live hierarchy
    ///
    /// `hidden_apps` is a passthrough: hidden apps leave no trace in the
    /// database, so the caller supplies the list to carry forward.
    pub fn extract_layout(&self, hidden_apps: Vec<String>) -> LayoutResult<LayoutConfig> {
        let root = self.store.root_id()?;
        let map = HierarchyMap::load(&self.store)?;

        Ok(LayoutConfig {
            app_layout: map.materialize(root),
            hidden_apps,
        })
    }

    fn write_scaffolding(
        &mut self,
        layout: &[PageLayout],
        mapping: &HashMap<String, AppEntry>,
        max_id: i64,
        report: &mut BuildReport,
    ) {
        for (id, uuid, kind, parent_id) in BOOTSTRAP_RECORDS {
            self.insert_scaffold(
                &NewItem {
                    id,
                    uuid,
                    flags: None,
                    kind,
                    parent_id,
                    ordering: 0,
                    group_title: None,
                },
                report,
            );
        }

        let mut next_id = max_id;

        // Top-level pages start at ordering 1; the holding page holds 0
        for (page_idx, page) in layout.iter().enumerate() {
            next_id += 1;
            let page_id = next_id;
            let page_uuid = mint_uuid();
            self.insert_scaffold(
                &NewItem {
                    id: page_id,
                    uuid: &page_uuid,
                    flags: Some(2),
                    kind: ItemKind::Page,
                    parent_id: MAIN_ROOT_ID,
                    ordering: page_idx as i64 + 1,
                    group_title: None,
                },
                report,
            );

            for (ordering, item) in page.iter().enumerate() {
                match item {
                    LayoutItem::Title(title) => {
                        self.place_app(title, mapping, page_id, ordering as i64, report);
                    }
                    LayoutItem::Folder {
                        folder_title,
                        folder_layout,
                    } => {
                        next_id = self.write_folder(
                            folder_title,
                            folder_layout,
                            mapping,
                            page_id,
                            ordering as i64,
                            next_id,
                            report,
                        );
                    }
                }
            }
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn write_folder(
        &mut self,
        title: &str,
        pages: &[Vec<String>],
        mapping: &HashMap<String, AppEntry>,
        parent_id: i64,
        ordering: i64,
        mut next_id: i64,
        report: &mut BuildReport,
    ) -> i64 {
        next_id += 1;
        let folder_id = next_id;
        let folder_uuid = mint_uuid();
        self.insert_scaffold(
            &NewItem {
                id: folder_id,
                uuid: &folder_uuid,
                flags: Some(0),
                kind: ItemKind::FolderRoot,
                parent_id,
                ordering,
                group_title: Some(title),
            },
            report,
        );

        for (page_idx, page) in pages.iter().enumerate() {
            next_id += 1;
            let page_id = next_id;
            let page_uuid = mint_uuid();
            self.insert_scaffold(
                &NewItem {
                    id: page_id,
                    uuid: &page_uuid,
                    flags: Some(2),
                    kind: ItemKind::Page,
                    parent_id: folder_id,
                    ordering: page_idx as i64,
                    group_title: None,
                },
                report,
            );

            for (app_idx, app_title) in page.iter().enumerate() {
                self.place_app(app_title, mapping, page_id, app_idx as i64, report);
            }
        }

        next_id
    }

    /// Reposition one app under its new parent, or record it as missing
    fn place_app(
        &mut self,
        title: &str,
        mapping: &HashMap<String, AppEntry>,
        parent_id: i64,
        ordering: i64,
        report: &mut BuildReport,
    ) {
        let Some(entry) = mapping.get(title) else {
            if !report.missing.iter().any(|t| t == title) {
                report.missing.push(title.to_string());
            }
            return;
        };

        if let Err(e) = self.store.update_item(
            entry.item_id,
            &entry.uuid,
            entry.flags,
            ItemKind::App,
            parent_id,
            ordering,
        ) {
            error!(%title, error = %e, "failed to reposition app, skipping");
            report.failed_writes.push(title.to_string());
        }
    }

    fn insert_scaffold(&mut self, item: &NewItem<'_>, report: &mut BuildReport) {
        if let Err(e) = self.store.insert_item(item) {
            error!(id = item.id, error = %e, "failed to insert scaffold record, skipping");
            report.failed_writes.push(format!("record {}", item.id));
        }
    }
}

/// Append live apps absent from the layout as trailing pages
///
/// Returns the appended titles, sorted. Batches of [`UNPLACED_PAGE_SIZE`]
/// keep the auto-generated pages within what Launchpad displays.
fn append_unplaced(
    layout: &mut Vec<PageLayout>,
    mapping: &HashMap<String, AppEntry>,
) -> Vec<String> {
    let declared = declared_titles(layout);
    let unplaced: BTreeSet<String> = mapping
        .keys()
        .filter(|title| !declared.contains(*title))
        .cloned()
        .collect();
    let unplaced: Vec<String> = unplaced.into_iter().collect();

    for batch in unplaced.chunks(UNPLACED_PAGE_SIZE) {
        layout.push(batch.iter().map(|t| LayoutItem::Title(t.clone())).collect());
    }

    unplaced
}

/// Mint a record UUID (uppercase, matching what `uuidgen` produces)
fn mint_uuid() -> String {
    Uuid::new_v4().to_string().to_uppercase()
}
