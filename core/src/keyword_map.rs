use crate::MovieId;
use std::collections::{HashMap, HashSet};

/// Keyword -> set of movie indices whose record produced it.
#[derive(Debug, Default, Clone)]
pub struct KeywordMap {
    inner: HashMap<String, HashSet<MovieId>>,
}

impl KeywordMap {
    pub fn new() -> Self { Self::default() }

    /// Add `movie` to the set for `keyword`, creating the set on first use.
    pub fn insert(&mut self, keyword: &str, movie: MovieId) {
        self.inner.entry(keyword.to_string()).or_default().insert(movie);
    }

    pub fn get(&self, keyword: &str) -> Option<&HashSet<MovieId>> { self.inner.get(keyword) }

    pub fn contains(&self, keyword: &str) -> bool { self.inner.contains_key(keyword) }

    pub fn len(&self) -> usize { self.inner.len() }

    pub fn is_empty(&self) -> bool { self.inner.is_empty() }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &HashSet<MovieId>)> {
        self.inner.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Largest movie index stored under any keyword.
    pub fn max_movie_index(&self) -> Option<MovieId> {
        self.inner.values().flat_map(|set| set.iter().copied()).max()
    }
}
