//! Structural validation of declarative layout documents
//!
//! Validation runs on the raw parsed document before any typed conversion,
//! so errors can name the exact page/item position that is wrong. It never
//! mutates its input and performs no I/O.

use serde_json::Value;

use crate::error::{LayoutError, LayoutResult};
use crate::models::LayoutConfig;

/// Validate a parsed layout document and convert it to a `LayoutConfig`
///
/// The document must be an object with an `app_layout` key holding a list
/// of pages. Each page is a list whose elements are either app title
/// strings or folder objects with exactly the keys `folder_title` (string)
/// and `folder_layout` (list of lists of strings). An optional `hidden_apps`
/// key must hold a list of strings.
pub fn parse_layout(document: &Value) -> LayoutResult<LayoutConfig> {
    let root = document
        .as_object()
        .ok_or_else(|| LayoutError::invalid("document", "layout must be a mapping"))?;

    let app_layout = root
        .get("app_layout")
        .ok_or_else(|| LayoutError::invalid("document", "missing required key 'app_layout'"))?;

    let pages = app_layout
        .as_array()
        .ok_or_else(|| LayoutError::invalid("app_layout", "must be a list of pages"))?;

    for (page_idx, page) in pages.iter().enumerate() {
        validate_page(page, page_idx)?;
    }

    if let Some(hidden) = root.get("hidden_apps") {
        validate_hidden_apps(hidden)?;
    }

    for key in root.keys() {
        if key != "app_layout" && key != "hidden_apps" {
            return Err(LayoutError::invalid(
                "document",
                format!("unknown key '{}'", key),
            ));
        }
    }

    // Shape is verified, the typed conversion cannot fail
    serde_json::from_value(document.clone()).map_err(|e| {
        LayoutError::invalid("document", format!("conversion failed after validation: {}", e))
    })
}

fn validate_page(page: &Value, page_idx: usize) -> LayoutResult<()> {
    let items = page.as_array().ok_or_else(|| {
        LayoutError::invalid(
            format!("app_layout[{}]", page_idx),
            "page must be a list of items",
        )
    })?;

    for (item_idx, item) in items.iter().enumerate() {
        let location = format!("app_layout[{}][{}]", page_idx, item_idx);
        match item {
            Value::String(_) => {}
            Value::Object(folder) => validate_folder(folder, &location)?,
            _ => {
                return Err(LayoutError::invalid(
                    location,
                    "item must be an app title string or a folder mapping",
                ))
            }
        }
    }

    Ok(())
}

fn validate_folder(
    folder: &serde_json::Map<String, Value>,
    location: &str,
) -> LayoutResult<()> {
    for key in ["folder_title", "folder_layout"] {
        if !folder.contains_key(key) {
            return Err(LayoutError::invalid(
                location,
                format!("folder is missing required key '{}'", key),
            ));
        }
    }

    for key in folder.keys() {
        if key != "folder_title" && key != "folder_layout" {
            return Err(LayoutError::invalid(
                location,
                format!("folder has unknown key '{}'", key),
            ));
        }
    }

    if !folder["folder_title"].is_string() {
        return Err(LayoutError::invalid(
            location,
            "'folder_title' must be a string",
        ));
    }

    let folder_pages = folder["folder_layout"].as_array().ok_or_else(|| {
        LayoutError::invalid(location, "'folder_layout' must be a list of pages")
    })?;

    for (page_idx, folder_page) in folder_pages.iter().enumerate() {
        let page_location = format!("{}.folder_layout[{}]", location, page_idx);
        let titles = folder_page.as_array().ok_or_else(|| {
            LayoutError::invalid(&page_location, "folder page must be a list of app titles")
        })?;

        for (title_idx, title) in titles.iter().enumerate() {
            if !title.is_string() {
                return Err(LayoutError::invalid(
                    format!("{}[{}]", page_location, title_idx),
                    "folder entries must be app title strings",
                ));
            }
        }
    }

    Ok(())
}

fn validate_hidden_apps(hidden: &Value) -> LayoutResult<()> {
    let titles = hidden
        .as_array()
        .ok_or_else(|| LayoutError::invalid("hidden_apps", "must be a list of strings"))?;

    for (idx, title) in titles.iter().enumerate() {
        if !title.is_string() {
            return Err(LayoutError::invalid(
                format!("hidden_apps[{}]", idx),
                "must be a string",
            ));
        }
    }

    Ok(())
}
