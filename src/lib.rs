//! Directory tree construction for the Synapse note sidebar.
//!
//! Turns the flat directory and note listings into a nested tree with
//! recursive note counts, name ordering and expansion state, plus the
//! lookups the sidebar needs on top of it.

uniffi::setup_scaffolding!();

pub mod config;
pub mod ffi;
pub mod listing;
pub mod model;
pub mod search;
pub mod state;
pub mod tree;

pub use config::{Config, SearchSettings, TreeSettings};
pub use listing::{Listing, ListingError};
pub use model::*;
pub use search::{search, SearchHit, SearchQuery, SearchResults};
pub use state::TreeState;
pub use tree::{ancestor_path, build_tree, compare_names, BuildTreeOptions, DirectoryTreeNode};
