//! Data models for lpad
//!
//! Defines the declarative layout structures and the database item kinds.
//! The declarative format is language-agnostic: a layout is a list of pages,
//! and each page holds either app titles or folder objects.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{LayoutError, LayoutResult};
use crate::validate;

/// Item kinds stored in the `items.type` column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemKind {
    Root,
    FolderRoot,
    Page,
    App,
    DownloadingApp,
}

impl ItemKind {
    /// Numeric code used by the Launchpad database
    pub fn code(self) -> i64 {
        match self {
            ItemKind::Root => 1,
            ItemKind::FolderRoot => 2,
            ItemKind::Page => 3,
            ItemKind::App => 4,
            ItemKind::DownloadingApp => 5,
        }
    }

    /// Decode a `items.type` value, `None` for unknown codes
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            1 => Some(ItemKind::Root),
            2 => Some(ItemKind::FolderRoot),
            3 => Some(ItemKind::Page),
            4 => Some(ItemKind::App),
            5 => Some(ItemKind::DownloadingApp),
            _ => None,
        }
    }
}

/// A single element on a page: an app title or a folder
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LayoutItem {
    Title(String),
    Folder {
        folder_title: String,
        folder_layout: Vec<Vec<String>>,
    },
}

impl LayoutItem {
    /// Create a folder item
    pub fn folder(title: impl Into<String>, pages: Vec<Vec<String>>) -> Self {
        LayoutItem::Folder {
            folder_title: title.into(),
            folder_layout: pages,
        }
    }
}

impl From<&str> for LayoutItem {
    fn from(title: &str) -> Self {
        LayoutItem::Title(title.to_string())
    }
}

/// One page of the layout, in display order
pub type PageLayout = Vec<LayoutItem>;

/// The user-authored target layout
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Pages of apps and folders, in display order
    pub app_layout: Vec<PageLayout>,
    /// Apps removed from Launchpad entirely
    #[serde(default)]
    pub hidden_apps: Vec<String>,
}

impl LayoutConfig {
    /// Collect every app title referenced by the layout, folders included
    pub fn declared_titles(&self) -> HashSet<String> {
        declared_titles(&self.app_layout)
    }

    /// Load and validate a layout file (JSON or YAML by extension)
    pub fn from_path(path: &Path) -> LayoutResult<Self> {
        let format = FileFormat::from_path(path)?;
        let content = std::fs::read_to_string(path).map_err(|source| LayoutError::ReadConfig {
            path: path.to_path_buf(),
            source,
        })?;

        let document: serde_json::Value = match format {
            FileFormat::Json => {
                serde_json::from_str(&content).map_err(|e| LayoutError::ParseConfig {
                    path: path.to_path_buf(),
                    details: e.to_string(),
                })?
            }
            FileFormat::Yaml => {
                serde_yaml::from_str(&content).map_err(|e| LayoutError::ParseConfig {
                    path: path.to_path_buf(),
                    details: e.to_string(),
                })?
            }
        };

        validate::parse_layout(&document)
    }

    /// Write the layout to a file in the given format
    pub fn write_to(&self, path: &Path, format: FileFormat) -> LayoutResult<()> {
        let content = match format {
            FileFormat::Json => {
                serde_json::to_string_pretty(self).map_err(|e| LayoutError::SerializeConfig {
                    path: path.to_path_buf(),
                    details: e.to_string(),
                })?
            }
            FileFormat::Yaml => {
                serde_yaml::to_string(self).map_err(|e| LayoutError::SerializeConfig {
                    path: path.to_path_buf(),
                    details: e.to_string(),
                })?
            }
        };

        std::fs::write(path, content).map_err(|source| LayoutError::WriteConfig {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Collect every app title referenced by a working layout
pub(crate) fn declared_titles(layout: &[PageLayout]) -> HashSet<String> {
    let mut titles = HashSet::new();
    for page in layout {
        for item in page {
            match item {
                LayoutItem::Title(title) => {
                    titles.insert(title.clone());
                }
                LayoutItem::Folder { folder_layout, .. } => {
                    for folder_page in folder_layout {
                        titles.extend(folder_page.iter().cloned());
                    }
                }
            }
        }
    }
    titles
}

/// Serialized layout file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Json,
    Yaml,
}

impl FileFormat {
    /// Determine the format from a file extension
    pub fn from_path(path: &Path) -> LayoutResult<Self> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_ascii_lowercase();

        match extension.as_str() {
            "json" => Ok(FileFormat::Json),
            "yaml" | "yml" => Ok(FileFormat::Yaml),
            _ => Err(LayoutError::UnsupportedFormat {
                path: path.to_path_buf(),
                extension,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_kind_codes_round_trip() {
        for kind in [
            ItemKind::Root,
            ItemKind::FolderRoot,
            ItemKind::Page,
            ItemKind::App,
            ItemKind::DownloadingApp,
        ] {
            assert_eq!(ItemKind::from_code(kind.code()), Some(kind));
        }
        assert_eq!(ItemKind::from_code(99), None);
    }

    #[test]
    fn test_layout_item_json_shape() {
        let title = LayoutItem::from("Mail");
        assert_eq!(serde_json::to_value(&title).unwrap(), serde_json::json!("Mail"));

        let folder = LayoutItem::folder("Utils", vec![vec!["Notes".to_string()]]);
        assert_eq!(
            serde_json::to_value(&folder).unwrap(),
            serde_json::json!({"folder_title": "Utils", "folder_layout": [["Notes"]]})
        );
    }

    #[test]
    fn test_layout_config_yaml_round_trip() {
        let config = LayoutConfig {
            app_layout: vec![vec![
                LayoutItem::from("Mail"),
                LayoutItem::folder("Utils", vec![vec!["Notes".to_string()]]),
            ]],
            hidden_apps: vec!["Chess".to_string()],
        };

        let yaml = serde_yaml::to_string(&config).unwrap();
        let parsed: LayoutConfig = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_declared_titles_include_folder_contents() {
        let config = LayoutConfig {
            app_layout: vec![vec![
                LayoutItem::from("Mail"),
                LayoutItem::folder(
                    "Utils",
                    vec![vec!["Notes".to_string()], vec!["Chess".to_string()]],
                ),
            ]],
            hidden_apps: Vec::new(),
        };

        let titles = config.declared_titles();
        assert_eq!(titles.len(), 3);
        assert!(titles.contains("Mail"));
        assert!(titles.contains("Notes"));
        assert!(titles.contains("Chess"));
        // Folder titles are not app titles
        assert!(!titles.contains("Utils"));
    }

    #[test]
    fn test_file_format_from_path() {
        assert_eq!(
            FileFormat::from_path(&PathBuf::from("layout.json")).unwrap(),
            FileFormat::Json
        );
        assert_eq!(
            FileFormat::from_path(&PathBuf::from("layout.YAML")).unwrap(),
            FileFormat::Yaml
        );
        assert_eq!(
            FileFormat::from_path(&PathBuf::from("layout.yml")).unwrap(),
            FileFormat::Yaml
        );
        assert!(FileFormat::from_path(&PathBuf::from("layout.toml")).is_err());
        assert!(FileFormat::from_path(&PathBuf::from("layout")).is_err());
    }

    #[test]
    fn test_load_and_save_files() {
        let dir = tempfile::TempDir::new().unwrap();
        let config = LayoutConfig {
            app_layout: vec![vec![LayoutItem::from("Mail")]],
            hidden_apps: vec!["Chess".to_string()],
        };

        let yaml_path = dir.path().join("layout.yaml");
        config.write_to(&yaml_path, FileFormat::Yaml).unwrap();
        assert_eq!(LayoutConfig::from_path(&yaml_path).unwrap(), config);

        let json_path = dir.path().join("layout.json");
        config.write_to(&json_path, FileFormat::Json).unwrap();
        assert_eq!(LayoutConfig::from_path(&json_path).unwrap(), config);
    }

    #[test]
    fn test_load_missing_file_fails() {
        let err = LayoutConfig::from_path(&PathBuf::from("/nonexistent/layout.yaml"));
        assert!(matches!(err, Err(LayoutError::ReadConfig { .. })));
    }

    #[test]
    fn test_load_malformed_file_fails() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("layout.json");
        std::fs::write(&path, "{not json").unwrap();

        let err = LayoutConfig::from_path(&path);
        assert!(matches!(err, Err(LayoutError::ParseConfig { .. })));
    }
}
