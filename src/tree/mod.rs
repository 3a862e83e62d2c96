use crate::{Directory, DirectoryId, Note};
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

mod model;
#[cfg(test)]
mod proptests;

pub use model::{BuildTreeOptions, DirectoryTreeNode, Iter};

/// Build the directory tree rooted at `root` from flat listings.
///
/// `directories` may include `root` itself. Every other directory ends up in
/// the tree exactly once: under its parent when the parent resolves, and
/// directly under ROOT when the parent is missing, unknown, or part of a
/// parent cycle. Unfiled notes are left out.
///
/// The build is a pure function of its inputs; nothing passed in is
/// modified.
///
/// # Examples
///
/// ```
/// use std::collections::HashSet;
/// use synapse_tree::{build_tree, BuildTreeOptions, Directory, Note};
///
/// let directories = vec![
///     Directory::new("root", "Folders", None),
///     Directory::new("work", "Work", Some("root")),
/// ];
/// let notes = vec![Note::new("n1", "Standup", Some("work"))];
/// let expanded = HashSet::new();
///
/// let tree = build_tree(&directories, &directories[0], &notes, &BuildTreeOptions::new(&expanded));
///
/// assert_eq!(tree.note_count, 1);
/// assert_eq!(tree.children[0].name(), "Work");
/// ```
pub fn build_tree<'a>(
    directories: &'a [Directory],
    root: &'a Directory,
    notes: &'a [Note],
    options: &BuildTreeOptions<'_>,
) -> DirectoryTreeNode<'a> {
    let mut notes_by_directory: HashMap<&'a DirectoryId, Vec<&'a Note>> = HashMap::new();
    for note in notes {
        if let Some(directory_id) = &note.directory_id {
            notes_by_directory.entry(directory_id).or_default().push(note);
        }
    }

    let members: Vec<&'a Directory> = directories
        .iter()
        .filter(|directory| directory.id != root.id)
        .collect();
    let parents = resolve_parents(&members, &root.id);

    let mut top_level = Vec::new();
    let mut child_lists: Vec<Vec<usize>> = vec![Vec::new(); members.len()];
    for (index, parent) in parents.iter().enumerate() {
        match parent {
            Some(parent) => child_lists[*parent].push(index),
            None => top_level.push(index),
        }
    }

    if options.sort_alphabetically {
        let by_name = |a: &usize, b: &usize| compare_names(&members[*a].name, &members[*b].name);
        top_level.sort_by(by_name);
        for children in &mut child_lists {
            children.sort_by(by_name);
        }
    }

    let mut assembler = Assembler {
        members: &members,
        child_lists: &child_lists,
        notes_by_directory,
        options,
    };

    let children: Vec<_> = top_level
        .iter()
        .map(|&index| assembler.node(index, 1))
        .collect();
    let root_notes = assembler.take_notes(&root.id);
    let note_count = assembler.count(&root_notes, &children);

    log::debug!(
        "Built directory tree under {}: {} directories, {} filed notes",
        root.id,
        members.len() + 1,
        note_count
    );

    DirectoryTreeNode {
        directory: root,
        children,
        notes: root_notes,
        note_count,
        is_expanded: true,
        level: 0,
    }
}

/// Order two directory names the way the sidebar lists them.
///
/// Names are compared by base letters: case and accents are ignored, so
/// "Alpha" equals "alpha", "résumé" equals "resume", and equal names keep
/// their listing order under a stable sort.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    base_letters(a).cmp(base_letters(b))
}

fn base_letters(name: &str) -> impl Iterator<Item = char> + '_ {
    name.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
}

/// Ids of every ancestor of a directory, immediate parent first.
///
/// ROOT (or any directory without a parent) yields an empty path, as does an
/// id that is not in `directories`. A parent id that does not resolve is
/// still reported as the last entry, and the walk stops there. Revisiting a
/// directory also stops the walk, so cyclic parent chains terminate.
pub fn ancestor_path<'a>(
    directories: &'a [Directory],
    directory_id: &str,
) -> Vec<&'a DirectoryId> {
    let by_id: HashMap<&str, &Directory> = directories
        .iter()
        .map(|directory| (directory.id.as_str(), directory))
        .collect();

    let mut path = Vec::new();
    let mut seen = HashSet::from([directory_id]);
    let mut current = directory_id;

    while let Some(&directory) = by_id.get(current) {
        let Some(parent_id) = &directory.parent_id else {
            break;
        };
        if !seen.insert(parent_id.as_str()) {
            break;
        }
        path.push(parent_id);
        current = parent_id.as_str();
    }

    path
}

/// Index of each member's parent within `members`, `None` meaning ROOT.
fn resolve_parents(members: &[&Directory], root_id: &DirectoryId) -> Vec<Option<usize>> {
    let index: HashMap<&DirectoryId, usize> = members
        .iter()
        .enumerate()
        .map(|(i, directory)| (&directory.id, i))
        .collect();

    let mut parents: Vec<Option<usize>> = members
        .iter()
        .map(|directory| match &directory.parent_id {
            None => None,
            Some(parent_id) if parent_id == root_id => None,
            Some(parent_id) => match index.get(parent_id) {
                Some(&parent) => Some(parent),
                None => {
                    log::warn!(
                        "Directory \"{}\" ({}) has unknown parent {}, attaching to root",
                        directory.name,
                        directory.id,
                        parent_id
                    );
                    None
                }
            },
        })
        .collect();

    break_cycles(members, &mut parents);
    parents
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Visit {
    Pending,
    Active,
    Done,
}

/// Walk every parent chain and detach the directory that closes a cycle.
///
/// Walks start from members in listing order; the first directory a walk
/// reaches twice is reattached to ROOT. Each member is visited once overall.
fn break_cycles(members: &[&Directory], parents: &mut [Option<usize>]) {
    let mut state = vec![Visit::Pending; members.len()];
    let mut path = Vec::new();

    for start in 0..members.len() {
        let mut current = start;
        loop {
            match state[current] {
                Visit::Done => break,
                Visit::Active => {
                    let directory = members[current];
                    log::warn!(
                        "Directory \"{}\" ({}) is part of a parent cycle, attaching to root",
                        directory.name,
                        directory.id
                    );
                    parents[current] = None;
                    break;
                }
                Visit::Pending => {
                    state[current] = Visit::Active;
                    path.push(current);
                    match parents[current] {
                        Some(parent) => current = parent,
                        None => break,
                    }
                }
            }
        }

        for visited in path.drain(..) {
            state[visited] = Visit::Done;
        }
    }
}

struct Assembler<'a, 'b> {
    members: &'b [&'a Directory],
    child_lists: &'b [Vec<usize>],
    notes_by_directory: HashMap<&'a DirectoryId, Vec<&'a Note>>,
    options: &'b BuildTreeOptions<'b>,
}

impl<'a, 'b> Assembler<'a, 'b> {
    fn node(&mut self, index: usize, level: usize) -> DirectoryTreeNode<'a> {
        let directory = self.members[index];
        let child_lists = self.child_lists;

        let children: Vec<_> = child_lists[index]
            .iter()
            .map(|&child| self.node(child, level + 1))
            .collect();
        let notes = self.take_notes(&directory.id);
        let note_count = self.count(&notes, &children);

        DirectoryTreeNode {
            directory,
            children,
            notes,
            note_count,
            is_expanded: self.options.expanded_ids.contains(&directory.id),
            level,
        }
    }

    fn take_notes(&mut self, directory_id: &DirectoryId) -> Vec<&'a Note> {
        self.notes_by_directory
            .remove(directory_id)
            .unwrap_or_default()
    }

    fn count(&self, notes: &[&Note], children: &[DirectoryTreeNode<'a>]) -> usize {
        if self.options.include_child_note_counts {
            notes.len() + children.iter().map(|child| child.note_count).sum::<usize>()
        } else {
            notes.len()
        }
    }
}
