use super::DirectoryId;
use serde::{Deserialize, Serialize};

/// A folder as returned by the directory listing endpoint.
///
/// A directory with no `parent_id` is the ROOT of the user's folder
/// hierarchy. Every other directory names its parent by id.
///
/// # Examples
///
/// ```
/// use synapse_tree::Directory;
///
/// let root = Directory::new("root", "Folders", None);
/// let work = Directory::new("work", "Work", Some("root"));
///
/// assert!(root.is_root());
/// assert_eq!(work.parent_id.as_ref().unwrap(), "root");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Directory {
    pub id: DirectoryId,
    /// Owner of the directory, when the listing includes it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    /// Display name
    pub name: String,
    /// Parent directory, `None` for ROOT
    #[serde(default)]
    pub parent_id: Option<DirectoryId>,
    /// Creation timestamp as sent by the server (RFC 3339)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl Directory {
    pub fn new(
        id: impl Into<DirectoryId>,
        name: impl Into<String>,
        parent_id: Option<&str>,
    ) -> Self {
        Directory {
            id: id.into(),
            user_id: None,
            name: name.into(),
            parent_id: parent_id.map(DirectoryId::from),
            created_at: None,
        }
    }

    /// Returns true if this directory has no parent.
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }
}
