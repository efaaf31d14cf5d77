use crate::index::{Index, MovieId};
use crate::tokenizer::query_terms;
use std::collections::HashSet;

/// Titles matching every query term that exists in the index.
///
/// Terms missing from the index are ignored rather than emptying the result, so
/// `"nolan zzzz"` behaves like `"nolan"`. If no term matches at all the result is empty.
/// Titles come back in movie-id order.
pub fn search(query: &str, index: &Index) -> Vec<String> {
    let sets: Vec<&HashSet<MovieId>> = query_terms(query)
        .iter()
        .filter_map(|term| index.keyword_to_indices.get(term))
        .collect();

    let Some((first, rest)) = sets.split_first() else {
        return Vec::new();
    };

    let mut hits: Vec<MovieId> = first
        .iter()
        .copied()
        .filter(|id| rest.iter().all(|set| set.contains(id)))
        .collect();
    hits.sort_unstable();

    hits.into_iter()
        .filter_map(|id| index.title(id).map(str::to_string))
        .collect()
}
