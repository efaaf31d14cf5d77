pub mod extract;
pub mod fetch;

pub use extract::{extract_page, ExtractWarning, PageExtract};
pub use fetch::{build_client, build_from_catalog, fetch_catalog, fetch_page, merge_pages};
