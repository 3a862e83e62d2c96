use crate::config::SearchSettings;
use crate::Note;
use std::cmp::Ordering;

mod model;

pub use model::{SearchHit, SearchQuery, SearchResults};

const MAX_HIGHLIGHTS: usize = 3;

/// Search notes for the query's terms.
///
/// Notes are filtered by directory and tags first, then scored by title and
/// content matches. Notes scoring zero are dropped. An empty query matches
/// nothing.
pub fn search<'a>(
    notes: &'a [Note],
    query: &SearchQuery,
    settings: &SearchSettings,
) -> SearchResults<'a> {
    let query_lower = query.query.trim().to_lowercase();
    let terms: Vec<String> = query_lower.split_whitespace().map(String::from).collect();
    if terms.is_empty() {
        return SearchResults {
            hits: Vec::new(),
            total_hits: 0,
        };
    }

    let mut hits = Vec::new();
    for note in notes.iter().filter(|note| matches_filters(note, query)) {
        let mut hit = SearchHit::new(note);

        // Title is matched against the full query
        hit.add_score(score_title_match(&note.title, &query_lower));

        // Content is matched term by term
        hit.add_score(score_content_matches(&note.content, &terms));

        if hit.score > 0.0 {
            hit.highlights = highlights(&note.content, &terms);
            hits.push(hit);
        }
    }

    sort_hits(&mut hits);

    let total_hits = hits.len();
    let limit = query.limit.unwrap_or(settings.default_limit);
    let hits = hits.into_iter().skip(query.offset).take(limit).collect();

    SearchResults { hits, total_hits }
}

fn matches_filters(note: &Note, query: &SearchQuery) -> bool {
    if let Some(directory_id) = &query.directory_id {
        if note.directory_id.as_ref() != Some(directory_id) {
            return false;
        }
    }
    query.tags.iter().all(|tag| note.has_tag(tag))
}

/// Calculate score for title matches
fn score_title_match(title: &str, query: &str) -> f64 {
    let title = title.to_lowercase();
    if title == query {
        20.0 // Highest score for exact match
    } else if title.contains(query) {
        10.0
    } else {
        0.0
    }
}

/// Calculate score for content matches
fn score_content_matches(content: &str, terms: &[String]) -> f64 {
    let matches = count_matches(content, terms);
    if matches > 0 {
        // Base score for having any match, plus a capped bonus
        1.0 + (0.1 * matches as f64).min(5.0)
    } else {
        0.0
    }
}

/// Count how many times the terms appear in the content
fn count_matches(content: &str, terms: &[String]) -> usize {
    content
        .lines()
        .map(|line| {
            let line = line.to_lowercase();
            terms.iter().map(|term| line.matches(term.as_str()).count()).sum::<usize>()
        })
        .sum()
}

fn highlights(content: &str, terms: &[String]) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| {
            let line = line.to_lowercase();
            terms.iter().any(|term| line.contains(term.as_str()))
        })
        .take(MAX_HIGHLIGHTS)
        .map(String::from)
        .collect()
}

/// Sort hits by score in descending order, then by title
fn sort_hits(hits: &mut [SearchHit<'_>]) {
    hits.sort_by(|a, b| {
        let score_cmp = b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal);
        if score_cmp != Ordering::Equal {
            return score_cmp;
        }

        a.note.title.to_lowercase().cmp(&b.note.title.to_lowercase())
    });
}
