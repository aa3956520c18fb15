//! lpad core library
//!
//! This crate manages the macOS Launchpad grid by editing the Dock's
//! SQLite database directly. A layout is declared as pages of app titles
//! and folders; the engine reconciles the declaration against the live
//! database, and can extract the live hierarchy back into the same
//! declarative shape.
//!
//! # Quick Start
//!
//! ```text
//! let store = LaunchpadStore::open(&Config::locate()?.db_path)?;
//! let mut engine = LayoutEngine::new(store, SystemDock);
//!
//! let mut config = LayoutConfig::from_path(Path::new("layout.yaml"))?;
//! let report = engine.build_layout(
//!     &mut config.app_layout,
//!     &config.hidden_apps,
//!     &BuildOptions::default(),
//! )?;
//! ```
//!
//! # Modules
//!
//! - `models`: declarative layout structures and item kinds
//! - `validate`: structural validation of layout documents
//! - `store`: transactional adapter over the Launchpad database
//! - `hierarchy`: tree reconstruction from flat records
//! - `engine`: layout reconciliation and extraction
//! - `dock`: Dock process control
//! - `config`: database location
//! - `schema`: Launchpad table shapes for scratch databases

pub mod config;
pub mod dock;
pub mod engine;
pub mod error;
pub mod hierarchy;
pub mod models;
pub mod schema;
pub mod store;
pub mod validate;

#[cfg(test)]
pub(crate) mod testutil;

pub use config::Config;
pub use dock::{DockControl, SystemDock};
pub use engine::{BuildOptions, BuildReport, LayoutEngine, UNPLACED_PAGE_SIZE};
pub use error::{LayoutError, LayoutResult};
pub use hierarchy::HierarchyMap;
pub use models::{FileFormat, ItemKind, LayoutConfig, LayoutItem, PageLayout};
pub use store::{AppEntry, ItemRow, LaunchpadStore, NewItem, RESERVED_UUIDS};
