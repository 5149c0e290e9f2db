//! Pre-flight payload rules.
//!
//! Each rule is a small named function over one or two request fields. The
//! per-operation validators compose them; nothing here touches the network.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{NasError, Result};
use crate::fs::SharedFolder;

/// A request field holding either one path/name or an array of them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PathInput {
    One(String),
    Many(Vec<String>),
}

impl PathInput {
    pub fn is_many(&self) -> bool {
        matches!(self, PathInput::Many(_))
    }

    /// Name of the shape, for error messages.
    pub fn shape(&self) -> &'static str {
        match self {
            PathInput::One(_) => "string",
            PathInput::Many(_) => "array",
        }
    }

    /// View as a batch; a scalar is a batch of one.
    pub fn as_slice(&self) -> &[String] {
        match self {
            PathInput::One(value) => std::slice::from_ref(value),
            PathInput::Many(values) => values,
        }
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.as_slice().to_vec()
    }

    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    pub fn is_empty(&self) -> bool {
        self.as_slice().is_empty()
    }
}

impl fmt::Display for PathInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathInput::One(value) => write!(f, "{}", value),
            PathInput::Many(values) => write!(f, "{:?}", values),
        }
    }
}

impl From<&str> for PathInput {
    fn from(value: &str) -> Self {
        PathInput::One(value.to_string())
    }
}

impl From<String> for PathInput {
    fn from(value: String) -> Self {
        PathInput::One(value)
    }
}

impl From<Vec<String>> for PathInput {
    fn from(values: Vec<String>) -> Self {
        PathInput::Many(values)
    }
}

impl From<Vec<&str>> for PathInput {
    fn from(values: Vec<&str>) -> Self {
        PathInput::Many(values.into_iter().map(str::to_string).collect())
    }
}

/// Field must be non-empty, and so must each of its elements.
pub fn is_filled(field: &str, input: &PathInput) -> Result<()> {
    if input.is_empty() || input.as_slice().iter().any(|v| v.trim().is_empty()) {
        return Err(NasError::validation(field, "cannot be empty."));
    }
    Ok(())
}

/// Paired fields must both be scalars or both be arrays.
pub fn is_same_shape(a: (&str, &PathInput), b: (&str, &PathInput)) -> Result<()> {
    if a.1.is_many() != b.1.is_many() {
        return Err(NasError::validation(
            a.0,
            format!(
                "{} and {} must be of the same data type, {}: {}, {}: {}.",
                a.0,
                b.0,
                a.0,
                a.1.shape(),
                b.0,
                b.1.shape()
            ),
        ));
    }
    Ok(())
}

/// Paired array fields must have the same length.
pub fn is_length_equal(a: (&str, &PathInput), b: (&str, &PathInput)) -> Result<()> {
    if a.1.len() != b.1.len() {
        return Err(NasError::validation(
            a.0,
            format!(
                "{} and {} must have the same length, {}: {}, {}: {}.",
                a.0,
                b.0,
                a.0,
                a.1.len(),
                b.0,
                b.1.len()
            ),
        ));
    }
    Ok(())
}

/// Every element must be an absolute path.
pub fn is_started_with_slash(field: &str, input: &PathInput) -> Result<()> {
    if let Some(entry) = input.as_slice().iter().find(|v| !v.starts_with('/')) {
        return Err(NasError::validation(
            field,
            format!("should start with '/': {}.", entry),
        ));
    }
    Ok(())
}

/// Array elements must be pairwise distinct. Duplicates are listed by value.
pub fn is_unique(field: &str, input: &PathInput) -> Result<()> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    let mut duplicates: Vec<&str> = Vec::new();
    for value in input.as_slice() {
        let count = counts.entry(value.as_str()).or_insert(0);
        *count += 1;
        if *count == 2 {
            duplicates.push(value);
        }
    }
    if !duplicates.is_empty() {
        return Err(NasError::validation(
            field,
            format!("should be unique. Duplicated entries: {:?}.", duplicates),
        ));
    }
    Ok(())
}

/// A new name is a single path segment.
pub fn is_plain_name(field: &str, input: &PathInput) -> Result<()> {
    if let Some(entry) = input.as_slice().iter().find(|v| v.contains('/')) {
        return Err(NasError::validation(
            field,
            format!("should be a folder name, not a path: {}.", entry),
        ));
    }
    Ok(())
}

/// Every element is a relative path of plain segments: no leading or
/// trailing `/`, no empty segment, no `.` or `..`.
pub fn is_relative_path(field: &str, input: &PathInput) -> Result<()> {
    let bad = input.as_slice().iter().find(|v| {
        v.split('/')
            .any(|segment| segment.is_empty() || segment == "." || segment == "..")
    });
    if let Some(entry) = bad {
        return Err(NasError::validation(
            field,
            format!("should be a relative path of non-empty segments: {}.", entry),
        ));
    }
    Ok(())
}

fn is_paired(a: (&str, &PathInput), b: (&str, &PathInput)) -> Result<()> {
    is_filled(a.0, a.1)?;
    is_filled(b.0, b.1)?;
    is_same_shape(a, b)?;
    is_length_equal(a, b)
}

pub fn create_directory(shared_folder: &PathInput, target_folder: &PathInput) -> Result<()> {
    let shared = ("shared_folder", shared_folder);
    let target = ("target_folder", target_folder);
    is_paired(shared, target)?;
    is_started_with_slash(shared.0, shared_folder)?;
    is_relative_path(target.0, target_folder)?;
    is_unique(target.0, target_folder)
}

pub fn delete_directory(target_folder: &PathInput) -> Result<()> {
    is_filled("target_folder", target_folder)?;
    is_started_with_slash("target_folder", target_folder)?;
    is_unique("target_folder", target_folder)
}

pub fn move_directory(target_folder: &PathInput, dest_folder_path: &PathInput) -> Result<()> {
    let target = ("target_folder", target_folder);
    let dest = ("dest_folder_path", dest_folder_path);
    is_paired(target, dest)?;
    is_started_with_slash(target.0, target_folder)?;
    is_started_with_slash(dest.0, dest_folder_path)?;
    is_unique(target.0, target_folder)?;
    is_unique(dest.0, dest_folder_path)
}

pub fn rename_directory(target_folder: &PathInput, changed_name_into: &PathInput) -> Result<()> {
    let target = ("target_folder", target_folder);
    let rename = ("changed_name_into", changed_name_into);
    is_paired(target, rename)?;
    is_started_with_slash(target.0, target_folder)?;
    is_unique(target.0, target_folder)?;
    is_plain_name(rename.0, changed_name_into)
}

/// Every requested shared folder must be exported by the server.
pub fn shared_folders_known(known: &[SharedFolder], requested: &[String]) -> Result<()> {
    let mut missing: Vec<String> = requested
        .iter()
        .filter(|wanted| !known.iter().any(|share| &share.path == *wanted))
        .cloned()
        .collect();
    missing.dedup();
    if !missing.is_empty() {
        return Err(NasError::SharedFolderNotFound(missing));
    }
    Ok(())
}
