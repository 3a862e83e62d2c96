use crate::{DirectoryId, Note};
use serde::{Deserialize, Serialize};

/// Parameters of a note search.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchQuery {
    /// Free text; split on whitespace into terms
    pub query: String,
    /// Only notes filed directly in this directory
    #[serde(default)]
    pub directory_id: Option<DirectoryId>,
    /// Only notes carrying every one of these tag names
    #[serde(default)]
    pub tags: Vec<String>,
    /// Page size; falls back to the configured default
    #[serde(default)]
    pub limit: Option<usize>,
    #[serde(default)]
    pub offset: usize,
}

impl SearchQuery {
    pub fn new(query: impl Into<String>) -> Self {
        SearchQuery {
            query: query.into(),
            ..Default::default()
        }
    }

    pub fn in_directory(mut self, directory_id: impl Into<DirectoryId>) -> Self {
        self.directory_id = Some(directory_id.into());
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn offset(mut self, offset: usize) -> Self {
        self.offset = offset;
        self
    }
}

/// A matching note with its relevance score
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchHit<'a> {
    pub note: &'a Note,
    pub score: f64,
    /// Content lines that contain a query term
    pub highlights: Vec<String>,
}

impl<'a> SearchHit<'a> {
    pub(crate) fn new(note: &'a Note) -> Self {
        Self {
            note,
            score: 0.0,
            highlights: Vec::new(),
        }
    }

    pub(crate) fn add_score(&mut self, points: f64) {
        self.score += points;
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResults<'a> {
    /// The requested page of hits, best first
    pub hits: Vec<SearchHit<'a>>,
    /// Number of hits before paging
    pub total_hits: usize,
}
