// Query preparation and client-side post-processing for search results.
// The HTTP call itself lives in `api`; everything here is pure so it can be
// tested without a server.

use crate::models::SearchResult;

/// Prefix the embedding model expects on queries (passages are indexed with
/// `passage: `).
pub const QUERY_PREFIX: &str = "query: ";

/// Prepend `QUERY_PREFIX` unless the query already carries it.
pub fn format_query(query: &str) -> String {
    if query.starts_with(QUERY_PREFIX) {
        query.to_string()
    } else {
        format!("{QUERY_PREFIX}{query}")
    }
}

/// Keep results scoring at least `min_score`, in their original order, and
/// cap the list at `top_k`. The webhook receives the same limits, but its
/// answer is not trusted to honour them.
pub fn filter_results(results: Vec<SearchResult>, min_score: f64, top_k: usize) -> Vec<SearchResult> {
    results
        .into_iter()
        .filter(|r| r.score >= min_score)
        .take(top_k)
        .collect()
}
