use crate::config::TreeSettings;
use crate::{Directory, DirectoryId, Note};
use serde::Serialize;
use std::collections::HashSet;

/// Inputs that shape a tree build beyond the raw listings.
///
/// The expanded-id set is borrowed from the caller and only read.
#[derive(Debug, Clone, Copy)]
pub struct BuildTreeOptions<'s> {
    /// Directories the user has expanded. ROOT is expanded regardless.
    pub expanded_ids: &'s HashSet<DirectoryId>,
    /// When false, `note_count` is the direct note count only
    pub include_child_note_counts: bool,
    /// When false, children keep the order of the directory listing
    pub sort_alphabetically: bool,
}

impl<'s> BuildTreeOptions<'s> {
    pub fn new(expanded_ids: &'s HashSet<DirectoryId>) -> Self {
        Self::with_settings(expanded_ids, &TreeSettings::default())
    }

    pub fn with_settings(expanded_ids: &'s HashSet<DirectoryId>, settings: &TreeSettings) -> Self {
        BuildTreeOptions {
            expanded_ids,
            include_child_note_counts: settings.include_child_note_counts,
            sort_alphabetically: settings.sort_alphabetically,
        }
    }

    pub fn child_note_counts(mut self, enabled: bool) -> Self {
        self.include_child_note_counts = enabled;
        self
    }

    pub fn sorted(mut self, enabled: bool) -> Self {
        self.sort_alphabetically = enabled;
        self
    }
}

/// A directory in the built tree.
///
/// Nodes borrow the directory and note records they were built from. A
/// tree is rebuilt from scratch whenever the listings or the expanded set
/// change; it is never patched in place.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectoryTreeNode<'a> {
    /// The wrapped directory record
    pub directory: &'a Directory,
    /// Child directories, in display order
    pub children: Vec<DirectoryTreeNode<'a>>,
    /// Notes filed directly in this directory
    pub notes: Vec<&'a Note>,
    /// Notes in this directory, plus descendants' when child counts are on
    pub note_count: usize,
    pub is_expanded: bool,
    /// Depth below ROOT, which is level 0
    pub level: usize,
}

impl<'a> DirectoryTreeNode<'a> {
    pub fn id(&self) -> &'a DirectoryId {
        &self.directory.id
    }

    pub fn name(&self) -> &'a str {
        &self.directory.name
    }

    pub fn is_root(&self) -> bool {
        self.level == 0
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Pre-order iterator over this node and all of its descendants.
    pub fn iter(&self) -> Iter<'_, 'a> {
        Iter { stack: vec![self] }
    }

    /// Collects [`iter`](Self::iter) into a vector.
    pub fn flatten(&self) -> Vec<&DirectoryTreeNode<'a>> {
        self.iter().collect()
    }

    /// Finds the first node in pre-order whose directory has this id.
    pub fn find(&self, directory_id: &str) -> Option<&DirectoryTreeNode<'a>> {
        self.iter().find(|node| node.id().as_str() == directory_id)
    }

    /// Rows a sidebar renders under this node.
    ///
    /// The node itself is not included (ROOT is never shown). Descendants
    /// are listed in pre-order, skipping the subtrees of collapsed nodes.
    pub fn visible_rows(&self) -> Vec<&DirectoryTreeNode<'a>> {
        let mut rows = Vec::new();
        let mut stack: Vec<&DirectoryTreeNode<'a>> = self.children.iter().rev().collect();

        while let Some(node) = stack.pop() {
            rows.push(node);
            if node.is_expanded {
                stack.extend(node.children.iter().rev());
            }
        }

        rows
    }

    /// All notes filed anywhere in this subtree.
    pub fn notes_in_subtree(&self) -> impl Iterator<Item = &'a Note> + '_ {
        self.iter().flat_map(|node| node.notes.iter().copied())
    }
}

impl<'t, 'a> IntoIterator for &'t DirectoryTreeNode<'a> {
    type Item = &'t DirectoryTreeNode<'a>;
    type IntoIter = Iter<'t, 'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Depth-first, pre-order walk over a subtree.
#[derive(Debug, Clone)]
pub struct Iter<'t, 'a> {
    stack: Vec<&'t DirectoryTreeNode<'a>>,
}

impl<'t, 'a> Iterator for Iter<'t, 'a> {
    type Item = &'t DirectoryTreeNode<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        // Reversed so the first child is popped next
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}
