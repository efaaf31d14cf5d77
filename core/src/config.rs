use serde::{Deserialize, Serialize};

pub const DEFAULT_NUM_PAGES: u32 = 20;
pub const DEFAULT_BASE_URL: &str = "https://www.imdb.com/search/title?groups=top_1000&sort=user_rating&page={0}";

/// Where the catalog comes from: `base_url` with a `{0}` placeholder for the page number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogConfig {
    pub num_pages: u32,
    pub base_url: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self { num_pages: DEFAULT_NUM_PAGES, base_url: DEFAULT_BASE_URL.to_string() }
    }
}

impl CatalogConfig {
    pub fn new(num_pages: u32, base_url: impl Into<String>) -> Self {
        Self { num_pages, base_url: base_url.into() }
    }

    /// URL of a 1-based page.
    pub fn page_url(&self, page: u32) -> String {
        self.base_url.replace("{0}", &page.to_string())
    }

    /// Page URLs in page order, 1..=num_pages.
    pub fn page_urls(&self) -> Vec<String> {
        (1..=self.num_pages).map(|p| self.page_url(p)).collect()
    }
}
