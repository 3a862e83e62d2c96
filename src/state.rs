//! Expansion and selection state owned by the UI layer.
//!
//! The tree builder only reads this state. The sidebar keeps one
//! [`TreeState`], applies user actions to it, and rebuilds the tree with
//! [`TreeState::options`] afterwards.

use crate::config::TreeSettings;
use crate::tree::{ancestor_path, BuildTreeOptions};
use crate::{Directory, DirectoryId, Note, NoteId};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeState {
    #[serde(default)]
    expanded: HashSet<DirectoryId>,
    #[serde(default)]
    selected_directory: Option<DirectoryId>,
    #[serde(default)]
    selected_note: Option<NoteId>,
}

impl TreeState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn expanded_ids(&self) -> &HashSet<DirectoryId> {
        &self.expanded
    }

    pub fn is_expanded(&self, id: &DirectoryId) -> bool {
        self.expanded.contains(id)
    }

    /// Flip the expansion of a directory. Returns whether it is now expanded.
    pub fn toggle(&mut self, id: &DirectoryId) -> bool {
        if self.expanded.remove(id) {
            false
        } else {
            self.expanded.insert(id.clone());
            true
        }
    }

    pub fn expand(&mut self, id: &DirectoryId) {
        self.expanded.insert(id.clone());
    }

    pub fn collapse(&mut self, id: &DirectoryId) {
        self.expanded.remove(id);
    }

    pub fn expand_all(&mut self, directories: &[Directory]) {
        self.expanded
            .extend(directories.iter().map(|directory| directory.id.clone()));
    }

    pub fn collapse_all(&mut self) {
        self.expanded.clear();
    }

    /// Expand every ancestor of `id` so its row becomes visible.
    ///
    /// The directory itself keeps its current expansion.
    pub fn reveal(&mut self, directories: &[Directory], id: &DirectoryId) {
        self.expanded.extend(
            ancestor_path(directories, id.as_str())
                .into_iter()
                .cloned(),
        );
    }

    pub fn selected_directory(&self) -> Option<&DirectoryId> {
        self.selected_directory.as_ref()
    }

    pub fn selected_note(&self) -> Option<&NoteId> {
        self.selected_note.as_ref()
    }

    /// Select a directory. Any note selection is dropped.
    pub fn select_directory(&mut self, id: &DirectoryId) {
        self.selected_directory = Some(id.clone());
        self.selected_note = None;
    }

    /// Select a note, along with the directory it is filed in.
    ///
    /// The note's directory is revealed so the selection is on screen. An
    /// unfiled note leaves the directory selection untouched.
    pub fn select_note(&mut self, directories: &[Directory], note: &Note) {
        self.selected_note = Some(note.id.clone());
        if let Some(directory_id) = &note.directory_id {
            self.selected_directory = Some(directory_id.clone());
            self.reveal(directories, directory_id);
        }
    }

    pub fn clear_selection(&mut self) {
        self.selected_directory = None;
        self.selected_note = None;
    }

    /// Forget ids that no longer exist after the listings were refreshed.
    ///
    /// Returns true if anything was dropped.
    pub fn retain_existing(&mut self, directories: &[Directory], notes: &[Note]) -> bool {
        let directory_ids: HashSet<&DirectoryId> =
            directories.iter().map(|directory| &directory.id).collect();

        let before = self.expanded.len();
        self.expanded.retain(|id| directory_ids.contains(id));
        let mut changed = self.expanded.len() != before;

        if let Some(id) = &self.selected_directory {
            if !directory_ids.contains(id) {
                log::debug!("Dropping selection of deleted directory {}", id);
                self.selected_directory = None;
                changed = true;
            }
        }

        if let Some(id) = &self.selected_note {
            if !notes.iter().any(|note| &note.id == id) {
                log::debug!("Dropping selection of deleted note {}", id);
                self.selected_note = None;
                changed = true;
            }
        }

        changed
    }

    /// Build options that read this state's expanded set.
    pub fn options(&self, settings: &TreeSettings) -> BuildTreeOptions<'_> {
        BuildTreeOptions::with_settings(&self.expanded, settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build_tree;

    fn directories() -> Vec<Directory> {
        vec![
            Directory::new("r", "Folders", None),
            Directory::new("a", "Work", Some("r")),
            Directory::new("b", "Projects", Some("a")),
            Directory::new("c", "Archive", Some("b")),
        ]
    }

    fn id(s: &str) -> DirectoryId {
        DirectoryId::from(s)
    }

    #[test]
    fn test_toggle() {
        let mut state = TreeState::new();

        assert!(state.toggle(&id("a")));
        assert!(state.is_expanded(&id("a")));
        assert!(!state.toggle(&id("a")));
        assert!(!state.is_expanded(&id("a")));
    }

    #[test]
    fn test_expand_collapse() {
        let mut state = TreeState::new();
        state.expand(&id("a"));
        state.expand(&id("a"));
        assert_eq!(state.expanded_ids().len(), 1);

        state.collapse(&id("a"));
        state.collapse(&id("missing"));
        assert!(state.expanded_ids().is_empty());

        state.expand_all(&directories());
        assert_eq!(state.expanded_ids().len(), 4);
        state.collapse_all();
        assert!(state.expanded_ids().is_empty());
    }

    #[test]
    fn test_reveal_expands_ancestors() {
        let directories = directories();
        let mut state = TreeState::new();

        state.reveal(&directories, &id("c"));

        assert!(state.is_expanded(&id("r")));
        assert!(state.is_expanded(&id("a")));
        assert!(state.is_expanded(&id("b")));
        assert!(!state.is_expanded(&id("c")));
    }

    #[test]
    fn test_select_note_reveals_directory() {
        let directories = directories();
        let note = Note::new("n1", "Plan", Some("b"));
        let mut state = TreeState::new();

        state.select_note(&directories, &note);

        assert_eq!(state.selected_note(), Some(&NoteId::from("n1")));
        assert_eq!(state.selected_directory(), Some(&id("b")));
        assert!(state.is_expanded(&id("a")));

        state.select_directory(&id("c"));
        assert_eq!(state.selected_directory(), Some(&id("c")));
        assert!(state.selected_note().is_none());
    }

    #[test]
    fn test_select_unfiled_note() {
        let mut state = TreeState::new();
        state.select_directory(&id("a"));

        state.select_note(&directories(), &Note::new("n2", "Loose", None));

        assert_eq!(state.selected_directory(), Some(&id("a")));
        assert_eq!(state.selected_note(), Some(&NoteId::from("n2")));

        state.clear_selection();
        assert!(state.selected_directory().is_none());
        assert!(state.selected_note().is_none());
    }

    #[test]
    fn test_retain_existing() {
        let mut directories = directories();
        let notes = vec![Note::new("n1", "Plan", Some("c"))];
        let mut state = TreeState::new();
        state.expand_all(&directories);
        state.select_note(&directories, &notes[0]);

        assert!(!state.retain_existing(&directories, &notes));

        directories.retain(|directory| directory.id != "c");
        assert!(state.retain_existing(&directories, &[]));
        assert!(!state.is_expanded(&id("c")));
        assert!(state.is_expanded(&id("b")));
        assert!(state.selected_directory().is_none());
        assert!(state.selected_note().is_none());
    }

    #[test]
    fn test_options_drive_tree() {
        let directories = directories();
        let mut state = TreeState::new();
        state.toggle(&id("a"));

        let tree = build_tree(
            &directories,
            &directories[0],
            &[],
            &state.options(&TreeSettings::default()),
        );
        let rows: Vec<&str> = tree.visible_rows().iter().map(|node| node.name()).collect();
        assert_eq!(rows, vec!["Work", "Projects"]);

        state.toggle(&id("a"));
        let tree = build_tree(
            &directories,
            &directories[0],
            &[],
            &state.options(&TreeSettings::default()),
        );
        assert_eq!(tree.visible_rows().len(), 1);
    }

    #[test]
    fn test_state_round_trips_through_json() {
        let mut state = TreeState::new();
        state.expand(&id("a"));
        state.select_directory(&id("b"));

        let json = serde_json::to_string(&state).unwrap();
        let restored: TreeState = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, state);
    }
}
