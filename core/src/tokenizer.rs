use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref NON_WORD: Regex = Regex::new(r"[^\w\s]").expect("valid regex");
}

/// Genres are keywords as-is.
pub fn genre_keywords(genres: &[String]) -> impl Iterator<Item = &str> + '_ {
    genres.iter().map(String::as_str)
}

/// Every space-separated part of every name.
pub fn people_keywords(people: &[String]) -> impl Iterator<Item = &str> + '_ {
    people.iter().flat_map(|name| name.split(' '))
}

/// Title words with punctuation removed; words that end up empty are dropped.
pub fn title_keywords(title_lower: &str) -> impl Iterator<Item = String> + '_ {
    title_lower
        .split(' ')
        .map(|word| NON_WORD.replace_all(word, "").into_owned())
        .filter(|word| !word.is_empty())
}

/// Lowercase and split on single spaces. Empty terms are kept.
pub fn query_terms(query: &str) -> Vec<String> {
    query.to_lowercase().split(' ').map(str::to_string).collect()
}
