//! UniFFI bindings for the native sidebar shells (iOS, Android, desktop).
//!
//! The tree borrows its inputs, which cannot cross the FFI boundary, so
//! [`FfiDirectoryTree`] stores an owned, pre-order row table instead.

use crate::config::{Config, ConfigError, SearchSettings, TreeSettings};
use crate::listing::{Listing, ListingError};
use crate::search::{search, SearchQuery};
use crate::state::TreeState;
use crate::tree::{ancestor_path, BuildTreeOptions, DirectoryTreeNode};
use crate::{Directory, DirectoryId, Note};
use camino::Utf8Path;
use std::collections::HashSet;
use std::sync::Arc;

/// FFI-safe error type that wraps all possible errors.
#[derive(Debug, uniffi::Error, thiserror::Error)]
pub enum SynapseError {
    #[error("No root directory: {message}")]
    NoRoot { message: String },

    #[error("IO error: {message}")]
    IoError { message: String },

    #[error("Parse error: {message}")]
    ParseError { message: String },

    #[error("Unsupported format: {message}")]
    UnsupportedFormat { message: String },
}

impl From<ListingError> for SynapseError {
    fn from(e: ListingError) -> Self {
        match e {
            ListingError::IoError(e) => SynapseError::IoError {
                message: e.to_string(),
            },
            ListingError::JsonError(e) => SynapseError::ParseError {
                message: e.to_string(),
            },
            ListingError::YamlError(e) => SynapseError::ParseError {
                message: e.to_string(),
            },
            ListingError::UnsupportedFormat(path) => SynapseError::UnsupportedFormat {
                message: path.to_string(),
            },
            ListingError::NoRoot => SynapseError::NoRoot {
                message: "the listing has no directory without a parent".to_string(),
            },
        }
    }
}

impl From<ConfigError> for SynapseError {
    fn from(e: ConfigError) -> Self {
        match e {
            ConfigError::IoError(e) => SynapseError::IoError {
                message: e.to_string(),
            },
            ConfigError::ParseError(e) => SynapseError::ParseError {
                message: e.to_string(),
            },
        }
    }
}

/// A directory as handed over by the host app.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiDirectory {
    pub id: String,
    pub name: String,
    pub parent_id: Option<String>,
}

impl From<FfiDirectory> for Directory {
    fn from(d: FfiDirectory) -> Self {
        Directory::new(d.id, d.name, d.parent_id.as_deref())
    }
}

/// A note as handed over by the host app.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiNote {
    pub id: String,
    pub title: String,
    pub content: String,
    pub directory_id: Option<String>,
    /// Tag names
    pub tags: Vec<String>,
}

impl From<FfiNote> for Note {
    fn from(n: FfiNote) -> Self {
        n.tags.into_iter().fold(
            Note::new(n.id, n.title, n.directory_id.as_deref()).with_content(n.content),
            Note::with_tag,
        )
    }
}

/// One directory of the built tree, flattened for rendering.
#[derive(Debug, Clone, PartialEq, uniffi::Record)]
pub struct FfiTreeRow {
    pub id: String,
    pub name: String,
    /// Parent in the tree; differs from the listing for reattached orphans
    pub parent_id: Option<String>,
    pub level: u32,
    pub note_count: u32,
    /// Notes filed directly in this directory
    pub note_ids: Vec<String>,
    pub child_ids: Vec<String>,
    pub is_expanded: bool,
}

/// A search hit.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiSearchHit {
    pub note_id: String,
    pub title: String,
    pub score: f64,
    pub highlights: Vec<String>,
}

/// One page of search hits.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiSearchResults {
    pub hits: Vec<FfiSearchHit>,
    /// Matches across all pages
    pub total_hits: u32,
}

/// FFI-safe snapshot of a built directory tree.
#[derive(uniffi::Object)]
pub struct FfiDirectoryTree {
    /// Pre-order, ROOT first
    rows: Vec<FfiTreeRow>,
    /// Indices into `rows` of what the sidebar shows
    visible: Vec<usize>,
    directories: Vec<Directory>,
}

#[uniffi::export]
impl FfiDirectoryTree {
    /// Returns the ROOT row.
    pub fn root(&self) -> FfiTreeRow {
        self.rows[0].clone()
    }

    /// Returns every directory in pre-order, ROOT first.
    pub fn all_rows(&self) -> Vec<FfiTreeRow> {
        self.rows.clone()
    }

    /// Returns the rows the sidebar displays: ROOT's descendants whose
    /// ancestors are all expanded.
    pub fn visible_rows(&self) -> Vec<FfiTreeRow> {
        self.visible.iter().map(|&i| self.rows[i].clone()).collect()
    }

    /// Finds a directory row by id.
    pub fn find(&self, directory_id: String) -> Option<FfiTreeRow> {
        self.rows.iter().find(|row| row.id == directory_id).cloned()
    }

    /// Returns the child rows of a directory, in display order.
    pub fn children(&self, directory_id: String) -> Vec<FfiTreeRow> {
        let Some(parent) = self.rows.iter().find(|row| row.id == directory_id) else {
            return Vec::new();
        };
        parent
            .child_ids
            .iter()
            .filter_map(|id| self.rows.iter().find(|row| &row.id == id).cloned())
            .collect()
    }

    /// Returns the ancestor ids of a directory, immediate parent first.
    pub fn ancestor_path(&self, directory_id: String) -> Vec<String> {
        ancestor_path(&self.directories, &directory_id)
            .into_iter()
            .map(|id| id.to_string())
            .collect()
    }

    /// Returns the number of notes filed anywhere in the tree.
    pub fn total_note_count(&self) -> u32 {
        self.rows[0].note_count
    }
}

impl FfiDirectoryTree {
    fn build(
        listing: Listing,
        expanded_ids: Vec<String>,
        settings: &TreeSettings,
    ) -> Result<Self, SynapseError> {
        let expanded: HashSet<DirectoryId> = expanded_ids.into_iter().map(DirectoryId::from).collect();
        let mut rows = Vec::new();
        let mut visible = Vec::new();

        {
            let tree = listing.tree(&BuildTreeOptions::with_settings(&expanded, settings))?;
            collect_rows(&tree, None, false, &mut rows, &mut visible);
        }

        Ok(FfiDirectoryTree {
            rows,
            visible,
            directories: listing.directories,
        })
    }
}

fn tree_to_row(node: &DirectoryTreeNode<'_>, parent_id: Option<&DirectoryId>) -> FfiTreeRow {
    FfiTreeRow {
        id: node.id().to_string(),
        name: node.name().to_string(),
        parent_id: parent_id.map(|id| id.to_string()),
        level: saturating_u32(node.level),
        note_count: saturating_u32(node.note_count),
        note_ids: node.notes.iter().map(|note| note.id.to_string()).collect(),
        child_ids: node.children.iter().map(|child| child.id().to_string()).collect(),
        is_expanded: node.is_expanded,
    }
}

fn saturating_u32(value: usize) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}

fn collect_rows(
    node: &DirectoryTreeNode<'_>,
    parent_id: Option<&DirectoryId>,
    is_visible: bool,
    rows: &mut Vec<FfiTreeRow>,
    visible: &mut Vec<usize>,
) {
    if is_visible {
        visible.push(rows.len());
    }
    rows.push(tree_to_row(node, parent_id));

    let children_visible = node.is_root() || (is_visible && node.is_expanded);
    for child in &node.children {
        collect_rows(child, Some(node.id()), children_visible, rows, visible);
    }
}

// ============================================================================
// Exported FFI Functions
// ============================================================================

/// Builds the directory tree from flat listings.
///
/// # Arguments
/// * `directories` - Every directory of the user, ROOT included
/// * `notes` - Every note of the user; unfiled notes are ignored
/// * `expanded_ids` - Directories the user has expanded
/// * `include_child_note_counts` - Fold descendants into note counts
/// * `sort_alphabetically` - Order siblings by name
///
/// # Returns
/// The tree, or `NoRoot` if no directory lacks a parent.
#[uniffi::export]
pub fn build_tree(
    directories: Vec<FfiDirectory>,
    notes: Vec<FfiNote>,
    expanded_ids: Vec<String>,
    include_child_note_counts: bool,
    sort_alphabetically: bool,
) -> Result<Arc<FfiDirectoryTree>, SynapseError> {
    let listing = Listing::new(
        directories.into_iter().map(Directory::from).collect(),
        notes.into_iter().map(Note::from).collect(),
    );
    let settings = TreeSettings {
        include_child_note_counts,
        sort_alphabetically,
    };
    let tree = FfiDirectoryTree::build(listing, expanded_ids, &settings)?;
    Ok(Arc::new(tree))
}

/// Builds the directory tree from a cached JSON or YAML listing file.
///
/// # Arguments
/// * `listing_path` - Path to a `.json`, `.yaml` or `.yml` listing
/// * `config_path` - Optional YAML settings file
/// * `expanded_ids` - Directories the user has expanded
#[uniffi::export]
pub fn build_tree_from_file(
    listing_path: String,
    config_path: Option<String>,
    expanded_ids: Vec<String>,
) -> Result<Arc<FfiDirectoryTree>, SynapseError> {
    let config = match config_path {
        Some(path) => Config::load(Utf8Path::new(&path))?,
        None => Config::default(),
    };
    let listing = Listing::load(Utf8Path::new(&listing_path))?;
    let tree = FfiDirectoryTree::build(listing, expanded_ids, &config.tree)?;
    Ok(Arc::new(tree))
}

/// Searches notes by title and content.
///
/// # Arguments
/// * `notes` - Notes to search
/// * `query` - Search text (space-separated terms)
/// * `directory_id` - Restrict to notes filed directly in this directory
/// * `tags` - Restrict to notes carrying all of these tags
/// * `limit` - Page size, defaults to 20
/// * `offset` - Number of hits to skip
///
/// # Returns
/// The requested page of matches sorted by relevance, with the total
/// number of matches for paging.
#[uniffi::export]
pub fn search_notes(
    notes: Vec<FfiNote>,
    query: String,
    directory_id: Option<String>,
    tags: Vec<String>,
    limit: Option<u32>,
    offset: u32,
) -> FfiSearchResults {
    let notes: Vec<Note> = notes.into_iter().map(Note::from).collect();
    let query = SearchQuery {
        query,
        directory_id: directory_id.map(DirectoryId::from),
        tags,
        limit: limit.map(|l| l as usize),
        offset: offset as usize,
    };

    let results = search(&notes, &query, &SearchSettings::default());
    FfiSearchResults {
        total_hits: saturating_u32(results.total_hits),
        hits: results
            .hits
            .into_iter()
            .map(|hit| FfiSearchHit {
                note_id: hit.note.id.to_string(),
                title: hit.note.title.clone(),
                score: hit.score,
                highlights: hit.highlights,
            })
            .collect(),
    }
}

/// Flips a directory in the expanded set and returns the new set, sorted.
#[uniffi::export]
pub fn toggle_expanded(expanded_ids: Vec<String>, directory_id: String) -> Vec<String> {
    let mut state = state_from(expanded_ids);
    state.toggle(&DirectoryId::from(directory_id));
    sorted_ids(&state)
}

/// Expands every ancestor of a directory and returns the new set, sorted.
#[uniffi::export]
pub fn reveal_directory(
    directories: Vec<FfiDirectory>,
    expanded_ids: Vec<String>,
    directory_id: String,
) -> Vec<String> {
    let directories: Vec<Directory> = directories.into_iter().map(Directory::from).collect();
    let mut state = state_from(expanded_ids);
    state.reveal(&directories, &DirectoryId::from(directory_id));
    sorted_ids(&state)
}

/// Returns the library version.
#[uniffi::export]
pub fn library_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn state_from(expanded_ids: Vec<String>) -> TreeState {
    let mut state = TreeState::new();
    for id in expanded_ids {
        state.expand(&DirectoryId::from(id));
    }
    state
}

fn sorted_ids(state: &TreeState) -> Vec<String> {
    let mut ids: Vec<String> = state.expanded_ids().iter().map(|id| id.to_string()).collect();
    ids.sort();
    ids
}
