//! Domain records consumed by the tree builder.
//!
//! These mirror what the directory and note listing endpoints return. They
//! are plain data: the tree borrows them and never mutates them.

use serde::{Deserialize, Serialize};
use std::fmt;

mod directory;
mod metadata;
mod note;

pub use directory::Directory;
pub use metadata::Metadata;
pub use note::{Note, Tag};

/// Opaque identifier of a [`Directory`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DirectoryId(String);

/// Opaque identifier of a [`Note`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteId(String);

macro_rules! string_id {
    ($ty:ident) => {
        impl $ty {
            pub fn new(id: impl Into<String>) -> Self {
                $ty(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $ty {
            fn from(id: &str) -> Self {
                $ty(id.to_string())
            }
        }

        impl From<String> for $ty {
            fn from(id: String) -> Self {
                $ty(id)
            }
        }

        impl From<$ty> for String {
            fn from(id: $ty) -> Self {
                id.0
            }
        }

        impl PartialEq<str> for $ty {
            fn eq(&self, other: &str) -> bool {
                self.0 == other
            }
        }

        impl PartialEq<&str> for $ty {
            fn eq(&self, other: &&str) -> bool {
                self.0 == *other
            }
        }
    };
}

string_id!(DirectoryId);
string_id!(NoteId);
