//! Hierarchy reconstruction from flat database records
//!
//! The Launchpad database stores its tree as flat rows linked by
//! `parent_id`. This module rebuilds the tree as an adjacency map and
//! walks it to recover the declarative page/folder/app structure.
//! The tree is at most four levels deep (root, page, folder root,
//! folder page), so the walk is plain iteration.

use std::collections::HashMap;

use crate::error::LayoutResult;
use crate::models::{ItemKind, LayoutItem, PageLayout};
use crate::store::{ItemRow, LaunchpadStore};

/// Adjacency map from parent id to its children, in sibling order
#[derive(Debug, Default)]
pub struct HierarchyMap {
    children: HashMap<i64, Vec<ItemRow>>,
}

impl HierarchyMap {
    /// Build the map from the live database records
    ///
    /// Rows arrive ordered by `(parent_id, ordering)`, so pushing them in
    /// sequence preserves sibling order within each parent.
    pub fn load(store: &LaunchpadStore) -> LayoutResult<Self> {
        let mut children: HashMap<i64, Vec<ItemRow>> = HashMap::new();
        for record in store.all_records()? {
            children.entry(record.parent_id).or_default().push(record);
        }
        Ok(Self { children })
    }

    /// Direct children of the given item, in sibling order
    pub fn children(&self, parent_id: i64) -> &[ItemRow] {
        self.children
            .get(&parent_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Recover the declarative layout rooted at the given item
    ///
    /// Children of the root are pages; children of a page are apps or
    /// folder roots; a folder root's children are folder pages holding
    /// apps. Anything else at those levels is not part of the layout
    /// and is ignored.
    pub fn materialize(&self, root: i64) -> Vec<PageLayout> {
        let mut layout = Vec::new();

        for page in self.children(root) {
            let mut items = Vec::new();

            for item in self.children(page.id) {
                match item.kind {
                    ItemKind::App => {
                        if let Some(title) = &item.app_title {
                            items.push(LayoutItem::Title(title.clone()));
                        }
                    }
                    ItemKind::FolderRoot => {
                        items.push(self.materialize_folder(item));
                    }
                    _ => {}
                }
            }

            layout.push(items);
        }

        layout
    }

    fn materialize_folder(&self, folder: &ItemRow) -> LayoutItem {
        let mut folder_layout = Vec::new();

        for folder_page in self.children(folder.id) {
            let titles: Vec<String> = self
                .children(folder_page.id)
                .iter()
                .filter(|child| child.kind == ItemKind::App)
                .filter_map(|child| child.app_title.clone())
                .collect();
            folder_layout.push(titles);
        }

        LayoutItem::Folder {
            folder_title: folder.group_title.clone().unwrap_or_default(),
            folder_layout,
        }
    }
}
