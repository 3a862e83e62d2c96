//! Snapshot of the directory and note listings.
//!
//! The client receives directories and notes from two separate endpoints.
//! A [`Listing`] holds one response of each so the tree can be built
//! offline, from a cached file, or in tests. Files may be JSON or YAML:
//!
//! ```json
//! {
//!   "directories": [{"id": "root", "name": "Folders", "parentId": null}],
//!   "notes": [{"id": "n1", "title": "Hello", "directoryId": "root"}]
//! }
//! ```

use crate::tree::{build_tree, BuildTreeOptions, DirectoryTreeNode};
use crate::{Directory, Note};
use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};
use std::fs;
use thiserror::Error;

/// Errors that can occur when loading a listing or building its tree.
#[derive(Error, Debug)]
pub enum ListingError {
    #[error("Failed to read listing file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse JSON listing: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Failed to parse YAML listing: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("Unsupported listing format: {0}")]
    UnsupportedFormat(Utf8PathBuf),

    #[error("No root directory in listing")]
    NoRoot,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    #[serde(default)]
    pub directories: Vec<Directory>,
    #[serde(default)]
    pub notes: Vec<Note>,
}

impl Listing {
    pub fn new(directories: Vec<Directory>, notes: Vec<Note>) -> Self {
        Listing { directories, notes }
    }

    pub fn from_json_str(json: &str) -> Result<Self, ListingError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self, ListingError> {
        if yaml.trim().is_empty() {
            return Ok(Listing::default());
        }
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Loads a listing from a `.json`, `.yaml` or `.yml` file.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use camino::Utf8Path;
    /// use synapse_tree::Listing;
    ///
    /// let listing = Listing::load(Utf8Path::new("cache/listing.json"))?;
    /// println!("{} directories", listing.directories.len());
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn load(path: &Utf8Path) -> Result<Self, ListingError> {
        let extension = path.extension().map(str::to_ascii_lowercase);
        match extension.as_deref() {
            Some("json") => Self::from_json_str(&fs::read_to_string(path)?),
            Some("yaml") | Some("yml") => Self::from_yaml_str(&fs::read_to_string(path)?),
            _ => Err(ListingError::UnsupportedFormat(path.to_path_buf())),
        }
    }

    /// The ROOT directory: the first directory without a parent.
    ///
    /// Returns `None` when the listing has no parentless directory yet,
    /// e.g. before the server has provisioned the user's folders.
    pub fn root(&self) -> Option<&Directory> {
        let mut parentless = self.directories.iter().filter(|d| d.is_root());
        let root = parentless.next()?;
        for extra in parentless {
            log::warn!(
                "Directory \"{}\" ({}) has no parent but {} is already the root",
                extra.name,
                extra.id,
                root.id
            );
        }
        Some(root)
    }

    /// Build the directory tree, or report [`ListingError::NoRoot`].
    pub fn tree(&self, options: &BuildTreeOptions<'_>) -> Result<DirectoryTreeNode<'_>, ListingError> {
        let root = self.root().ok_or(ListingError::NoRoot)?;
        Ok(build_tree(&self.directories, root, &self.notes, options))
    }

    pub fn find_directory(&self, id: &str) -> Option<&Directory> {
        self.directories.iter().find(|d| d.id.as_str() == id)
    }

    pub fn find_note(&self, id: &str) -> Option<&Note> {
        self.notes.iter().find(|n| n.id.as_str() == id)
    }

    pub fn unfiled_notes(&self) -> impl Iterator<Item = &Note> {
        self.notes.iter().filter(|note| note.is_unfiled())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;
    use std::collections::HashSet;
    use tempfile::TempDir;

    const JSON_LISTING: &str = indoc! {r#"
        {
          "directories": [
            {"id": "root", "name": "Folders", "parentId": null},
            {"id": "w", "name": "Work", "parentId": "root"},
            {"id": "p", "name": "Personal", "parentId": "root"}
          ],
          "notes": [
            {"id": "n1", "title": "Standup", "directoryId": "w"},
            {"id": "n2", "title": "Groceries", "directoryId": "p"},
            {"id": "n3", "title": "Scratch", "directoryId": null}
          ]
        }"#};

    fn temp_path(temp_dir: &TempDir, name: &str) -> Utf8PathBuf {
        Utf8PathBuf::from_path_buf(temp_dir.path().join(name)).unwrap()
    }

    #[test]
    fn test_listing_from_json() {
        let listing = Listing::from_json_str(JSON_LISTING).unwrap();

        assert_eq!(listing.directories.len(), 3);
        assert_eq!(listing.notes.len(), 3);
        assert_eq!(listing.root().unwrap().id, "root");
        assert_eq!(listing.unfiled_notes().count(), 1);
        assert_eq!(listing.find_note("n2").unwrap().title, "Groceries");
        assert_eq!(listing.find_directory("w").unwrap().name, "Work");
        assert!(listing.find_directory("zzz").is_none());
    }

    #[test]
    fn test_listing_from_yaml() {
        let listing = Listing::from_yaml_str(indoc! {r#"
            directories:
              - id: root
                name: Folders
                parentId: null
              - id: w
                name: Work
                parentId: root
            notes:
              - id: n1
                title: Standup
                directoryId: w
                tags:
                  - id: t1
                    name: daily
            "#})
        .unwrap();

        assert_eq!(listing.directories.len(), 2);
        assert!(listing.notes[0].has_tag("Daily"));
    }

    #[test]
    fn test_empty_yaml_listing() {
        let listing = Listing::from_yaml_str("").unwrap();
        assert!(listing.directories.is_empty());
        assert!(listing.root().is_none());
    }

    #[test]
    fn test_tree_from_listing() {
        let listing = Listing::from_json_str(JSON_LISTING).unwrap();
        let expanded = HashSet::new();

        let tree = listing.tree(&BuildTreeOptions::new(&expanded)).unwrap();

        assert_eq!(tree.note_count, 2);
        let names: Vec<&str> = tree.children.iter().map(|c| c.name()).collect();
        assert_eq!(names, vec!["Personal", "Work"]);
    }

    #[test]
    fn test_tree_without_root() {
        let listing = Listing::new(vec![Directory::new("w", "Work", Some("root"))], vec![]);
        let expanded = HashSet::new();

        let result = listing.tree(&BuildTreeOptions::new(&expanded));
        assert!(matches!(result, Err(ListingError::NoRoot)));
    }

    #[test]
    fn test_first_parentless_directory_is_root() {
        let listing = Listing::new(
            vec![
                Directory::new("w", "Work", Some("root")),
                Directory::new("root", "Folders", None),
                Directory::new("stray", "Stray", None),
            ],
            vec![],
        );

        assert_eq!(listing.root().unwrap().id, "root");
    }

    #[test]
    fn test_load_json_and_yaml_files() {
        let temp_dir = TempDir::new().unwrap();

        let json_path = temp_path(&temp_dir, "listing.json");
        fs::write(&json_path, JSON_LISTING).unwrap();
        let listing = Listing::load(&json_path).unwrap();
        assert_eq!(listing.notes.len(), 3);

        let yaml_path = temp_path(&temp_dir, "listing.YML");
        fs::write(&yaml_path, serde_yaml::to_string(&listing).unwrap()).unwrap();
        assert_eq!(Listing::load(&yaml_path).unwrap(), listing);
    }

    #[test]
    fn test_load_errors() {
        let temp_dir = TempDir::new().unwrap();

        let missing = Listing::load(&temp_path(&temp_dir, "missing.json"));
        assert!(matches!(missing, Err(ListingError::IoError(_))));

        let toml_path = temp_path(&temp_dir, "listing.toml");
        fs::write(&toml_path, "").unwrap();
        let unsupported = Listing::load(&toml_path);
        assert!(matches!(unsupported, Err(ListingError::UnsupportedFormat(_))));

        let broken_path = temp_path(&temp_dir, "broken.json");
        fs::write(&broken_path, "{not json").unwrap();
        let broken = Listing::load(&broken_path);
        assert!(matches!(broken, Err(ListingError::JsonError(_))));
        assert!(broken
            .unwrap_err()
            .to_string()
            .contains("Failed to parse JSON listing"));
    }
}
