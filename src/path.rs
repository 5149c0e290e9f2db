//! Directory path composition and decomposition.
//!
//! All functions here are pure. Paths are absolute, rooted at a shared
//! folder (`/share/sub/leaf`), and use `/` as the only separator.

use std::collections::HashSet;

use crate::error::{NasError, Result};
use crate::validate::PathInput;

/// Normalize a path (collapse `//`, remove trailing slashes, ensure leading `/`).
pub fn normalize_path(path: &str) -> String {
    let mut result = path.to_string();
    while result.contains("//") {
        result = result.replace("//", "/");
    }
    while result.ends_with('/') && result.len() > 1 {
        result.pop();
    }
    if !result.starts_with('/') {
        result = format!("/{}", result);
    }
    result
}

/// Join shared folders and target folders pairwise into absolute paths.
///
/// Both inputs must have the same shape: two scalars, or two arrays of equal
/// length. Every shared folder must start with `/`.
///
/// ```
/// use nasdir::path::merge_path;
/// use nasdir::PathInput;
///
/// let merged = merge_path(
///     &PathInput::from(vec!["/a", "/b"]),
///     &PathInput::from(vec!["x", "y"]),
/// ).unwrap();
/// assert_eq!(merged, vec!["/a/x", "/b/y"]);
/// ```
pub fn merge_path(shared_folder: &PathInput, target_folder: &PathInput) -> Result<Vec<String>> {
    if shared_folder.is_many() != target_folder.is_many() {
        return Err(NasError::validation(
            "shared_folder",
            format!(
                "shared_folder and target_folder should be of the same data type, \
                 shared_folder: {}, target_folder: {}.",
                shared_folder.shape(),
                target_folder.shape()
            ),
        ));
    }

    let shared = shared_folder.as_slice();
    let target = target_folder.as_slice();
    if shared.len() != target.len() {
        return Err(NasError::validation(
            "shared_folder",
            format!(
                "shared_folder and target_folder length should be equal, \
                 shared_folder: {}, target_folder: {}.",
                shared.len(),
                target.len()
            ),
        ));
    }

    shared
        .iter()
        .zip(target)
        .map(|(share, name)| {
            if !share.starts_with('/') {
                return Err(NasError::validation(
                    "shared_folder",
                    format!("should start with '/': {}.", share),
                ));
            }
            if has_empty_segment(&share[1..]) {
                return Err(NasError::validation(
                    "shared_folder",
                    format!("should not contain empty segments: {}.", share),
                ));
            }
            if has_empty_segment(name) {
                return Err(NasError::validation(
                    "target_folder",
                    format!("should not contain empty segments: {}.", name),
                ));
            }
            Ok(format!("{}/{}", share, name))
        })
        .collect()
}

fn has_empty_segment(relative: &str) -> bool {
    relative.split('/').any(str::is_empty)
}

/// Split an absolute path into its shared folder and the remainder.
///
/// ```
/// use nasdir::path::decompose_path;
///
/// assert_eq!(decompose_path("/a/x/y"), ("/a".to_string(), "x/y".to_string()));
/// assert_eq!(decompose_path("/a"), ("/a".to_string(), String::new()));
/// ```
pub fn decompose_path(path: &str) -> (String, String) {
    let trimmed = path.trim_matches('/');
    match trimmed.split_once('/') {
        Some((root, rest)) => (format!("/{}", root), rest.to_string()),
        None => (format!("/{}", trimmed), String::new()),
    }
}

/// Replace the last segment of `existing` with `new_name`.
///
/// `"/a/b"` with `"x"` gives `"/a/x"`; a root-level `"/a"` gives `"/x"`.
pub fn sibling_path(existing: &str, new_name: &str) -> String {
    let trimmed = existing.trim_end_matches('/');
    match trimmed.rfind('/') {
        Some(0) | None => format!("/{}", new_name),
        Some(idx) => format!("{}/{}", &trimmed[..idx], new_name),
    }
}

/// Keep the `(target, new_name)` pairs whose sibling candidate is confirmed free.
///
/// Input order is preserved. `targets` and `new_names` are parallel arrays;
/// extra entries in the longer one are ignored.
pub fn reconcile_rename_pairs(
    targets: &[String],
    new_names: &[String],
    confirmed_free: &[String],
) -> (Vec<String>, Vec<String>) {
    let free: HashSet<&str> = confirmed_free.iter().map(String::as_str).collect();

    targets
        .iter()
        .zip(new_names)
        .filter(|(target, name)| free.contains(sibling_path(target, name).as_str()))
        .map(|(target, name)| (target.clone(), name.clone()))
        .unzip()
}
