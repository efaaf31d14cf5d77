use crate::config::CatalogConfig;
use crate::error::IndexError;
use crate::keyword_map::KeywordMap;
use crate::search;
use crate::tokenizer::{genre_keywords, people_keywords, title_keywords};
use crate::MovieRecord;
use serde::Serialize;

/// Position of a movie in `Index::titles`.
pub type MovieId = usize;

/// Non-fatal problems noticed while indexing a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BuildWarning {
    MissingGenres { movie_id: MovieId, title: String },
    MissingPeople { movie_id: MovieId, title: String },
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct BuildReport {
    pub movies: usize,
    pub keywords: usize,
    pub warnings: Vec<BuildWarning>,
}

/// Titles plus the keyword map pointing back into them.
#[derive(Debug, Default, Clone)]
pub struct Index {
    pub titles: Vec<String>,
    pub keyword_to_indices: KeywordMap,
}

impl Index {
    /// Index `records` in order; a record's position becomes its movie id.
    pub fn build(records: Vec<MovieRecord>) -> (Self, BuildReport) {
        let mut titles = Vec::with_capacity(records.len());
        let mut keywords = KeywordMap::new();
        let mut warnings = Vec::new();

        for (i, rec) in records.into_iter().enumerate() {
            if rec.genres.is_empty() {
                tracing::warn!(movie_id = i, title = %rec.title_pretty, "record has no genres");
                warnings.push(BuildWarning::MissingGenres { movie_id: i, title: rec.title_pretty.clone() });
            }
            if rec.people.is_empty() {
                tracing::warn!(movie_id = i, title = %rec.title_pretty, "record has no people");
                warnings.push(BuildWarning::MissingPeople { movie_id: i, title: rec.title_pretty.clone() });
            }

            for g in genre_keywords(&rec.genres) {
                keywords.insert(g, i);
            }
            for part in people_keywords(&rec.people) {
                keywords.insert(part, i);
            }
            for word in title_keywords(&rec.title_lower) {
                keywords.insert(&word, i);
            }
            titles.push(rec.title_pretty);
        }

        let report = BuildReport { movies: titles.len(), keywords: keywords.len(), warnings };
        tracing::info!(movies = report.movies, keywords = report.keywords, warnings = report.warnings.len(), "built movie index");
        (Self { titles, keyword_to_indices: keywords }, report)
    }

    pub fn len(&self) -> usize { self.titles.len() }

    pub fn is_empty(&self) -> bool { self.titles.is_empty() }

    pub fn title(&self, movie_id: MovieId) -> Option<&str> {
        self.titles.get(movie_id).map(String::as_str)
    }

    /// Every movie id in the keyword map is a valid position in `titles`.
    pub fn is_consistent(&self) -> bool {
        self.keyword_to_indices.max_movie_index().map_or(true, |max| max < self.titles.len())
    }

    pub fn search(&self, query: &str) -> Vec<String> {
        search::search(query, self)
    }
}

/// A catalog configuration together with the index built from it, if any.
#[derive(Debug, Default)]
pub struct MovieIndex {
    config: CatalogConfig,
    index: Option<Index>,
}

impl MovieIndex {
    pub fn new(config: CatalogConfig) -> Self { Self { config, index: None } }

    pub fn config(&self) -> &CatalogConfig { &self.config }

    /// Replace any previous index with one built from `records`.
    pub fn build(&mut self, records: Vec<MovieRecord>) -> BuildReport {
        let (index, report) = Index::build(records);
        self.index = Some(index);
        report
    }

    pub fn is_built(&self) -> bool { self.index.is_some() }

    pub fn index(&self) -> Result<&Index, IndexError> {
        self.index.as_ref().ok_or(IndexError::NotBuilt)
    }

    pub fn titles(&self) -> Result<&[String], IndexError> {
        Ok(&self.index()?.titles)
    }

    pub fn search(&self, query: &str) -> Result<Vec<String>, IndexError> {
        Ok(self.index()?.search(query))
    }
}
