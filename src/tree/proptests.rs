//! Property checks over randomly generated listings.

use super::*;
use proptest::prelude::*;

/// Where a generated directory points its parent.
#[derive(Debug, Clone)]
enum ParentRef {
    Root,
    Missing,
    Null,
    Sibling(usize),
}

fn parent_ref() -> impl Strategy<Value = ParentRef> {
    prop_oneof![
        4 => Just(ParentRef::Root),
        1 => Just(ParentRef::Missing),
        1 => Just(ParentRef::Null),
        8 => any::<usize>().prop_map(ParentRef::Sibling),
    ]
}

fn name() -> impl Strategy<Value = String> {
    "[a-dA-D]{0,3}"
}

prop_compose! {
    fn listing()(
        specs in prop::collection::vec((name(), parent_ref()), 0..24),
        note_targets in prop::collection::vec(prop::option::of(any::<usize>()), 0..40),
        expanded_mask in prop::collection::vec(any::<bool>(), 24),
    ) -> (Vec<Directory>, Vec<Note>, HashSet<DirectoryId>) {
        let count = specs.len();
        let mut directories = vec![Directory::new("root", "Folders", None)];

        for (i, (name, parent)) in specs.into_iter().enumerate() {
            let parent = match parent {
                ParentRef::Root => Some("root".to_string()),
                ParentRef::Missing => Some("ghost".to_string()),
                ParentRef::Null => None,
                // May point at itself or form longer cycles
                ParentRef::Sibling(n) => Some(format!("d{}", n % count)),
            };
            directories.push(Directory::new(format!("d{i}"), name, parent.as_deref()));
        }

        let notes = note_targets
            .into_iter()
            .enumerate()
            .map(|(i, target)| {
                let directory = target.map(|n| directories[n % directories.len()].id.to_string());
                Note::new(format!("n{i}"), format!("note {i}"), directory.as_deref())
            })
            .collect();

        let expanded = directories
            .iter()
            .zip(expanded_mask)
            .filter(|(_, expanded)| *expanded)
            .map(|(directory, _)| directory.id.clone())
            .collect();

        (directories, notes, expanded)
    }
}

fn check_node(node: &DirectoryTreeNode<'_>, include_child_counts: bool) -> Result<(), TestCaseError> {
    let child_total: usize = node.children.iter().map(|child| child.note_count).sum();
    prop_assert!(node.note_count >= node.notes.len());
    if include_child_counts {
        prop_assert_eq!(node.note_count, node.notes.len() + child_total);
    } else {
        prop_assert_eq!(node.note_count, node.notes.len());
    }

    for child in &node.children {
        prop_assert_eq!(child.level, node.level + 1);
        check_node(child, include_child_counts)?;
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_every_directory_appears_once((directories, notes, expanded) in listing()) {
        let tree = build_tree(&directories, &directories[0], &notes, &BuildTreeOptions::new(&expanded));

        let mut ids: Vec<&str> = tree.iter().map(|node| node.id().as_str()).collect();
        ids.sort_unstable();
        let mut expected: Vec<&str> = directories.iter().map(|d| d.id.as_str()).collect();
        expected.sort_unstable();
        prop_assert_eq!(ids, expected);
    }

    #[test]
    fn prop_counts_and_levels(
        (directories, notes, expanded) in listing(),
        include_child_counts in any::<bool>()
    ) {
        let options = BuildTreeOptions::new(&expanded).child_note_counts(include_child_counts);
        let tree = build_tree(&directories, &directories[0], &notes, &options);

        prop_assert_eq!(tree.level, 0);
        check_node(&tree, include_child_counts)?;

        let filed = notes.iter().filter(|note| !note.is_unfiled()).count();
        prop_assert_eq!(tree.notes_in_subtree().count(), filed);
        if include_child_counts {
            prop_assert_eq!(tree.note_count, filed);
        }
    }

    #[test]
    fn prop_siblings_sorted((directories, notes, expanded) in listing()) {
        let tree = build_tree(&directories, &directories[0], &notes, &BuildTreeOptions::new(&expanded));

        for node in &tree {
            for pair in node.children.windows(2) {
                prop_assert_ne!(compare_names(pair[0].name(), pair[1].name()), Ordering::Greater);
            }
        }
    }

    #[test]
    fn prop_expansion_mirrors_input((directories, notes, expanded) in listing()) {
        let tree = build_tree(&directories, &directories[0], &notes, &BuildTreeOptions::new(&expanded));

        prop_assert!(tree.is_expanded);
        for node in tree.iter().skip(1) {
            prop_assert_eq!(node.is_expanded, expanded.contains(node.id()));
        }
    }

    #[test]
    fn prop_rebuild_is_identical((directories, notes, expanded) in listing()) {
        let options = BuildTreeOptions::new(&expanded);
        let first = build_tree(&directories, &directories[0], &notes, &options);
        let second = build_tree(&directories, &directories[0], &notes, &options);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_find_agrees_with_flatten((directories, notes, expanded) in listing()) {
        let tree = build_tree(&directories, &directories[0], &notes, &BuildTreeOptions::new(&expanded));

        for directory in &directories {
            let found = tree.find(directory.id.as_str());
            prop_assert!(found.is_some());
            prop_assert!(std::ptr::eq(found.unwrap().directory, directory));
        }
    }
}
