use super::{DirectoryId, Metadata, NoteId};
use serde::{Deserialize, Serialize};

/// A tag as embedded in note listings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Display color, usually a hex string like `#3b82f6`
    #[serde(default)]
    pub color: Option<String>,
}

/// A note as returned by the note listing endpoint.
///
/// `directory_id` is `None` for unfiled notes, which never show up in the
/// directory tree.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: NoteId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    /// Directory the note is filed in
    #[serde(default)]
    pub directory_id: Option<DirectoryId>,
    pub title: String,
    #[serde(default)]
    pub content: String,
    /// AI-generated summary, if one has been produced
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub tags: Vec<Tag>,
    #[serde(default)]
    pub metadata: Metadata,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    /// Optimistic-locking version
    #[serde(default)]
    pub version: u64,
}

impl Note {
    pub fn new(
        id: impl Into<NoteId>,
        title: impl Into<String>,
        directory_id: Option<&str>,
    ) -> Self {
        Note {
            id: id.into(),
            directory_id: directory_id.map(DirectoryId::from),
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    pub fn with_tag(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        self.tags.push(Tag {
            id: name.clone(),
            name,
            ..Default::default()
        });
        self
    }

    /// Returns true if the note is not filed in any directory.
    pub fn is_unfiled(&self) -> bool {
        self.directory_id.is_none()
    }

    /// Returns true if the note carries a tag with this name, ignoring case.
    pub fn has_tag(&self, name: &str) -> bool {
        let name = name.to_lowercase();
        self.tags.iter().any(|tag| tag.name.to_lowercase() == name)
    }

    pub fn tag_names(&self) -> Vec<String> {
        self.tags.iter().map(|tag| tag.name.clone()).collect()
    }
}
