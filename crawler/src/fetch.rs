use crate::extract::{extract_page, PageExtract};
use anyhow::{anyhow, Result};
use movie_core::{BuildReport, CatalogConfig, MovieIndex, MovieRecord};
use reqwest::{header, Client};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

const MAX_PAGE_BYTES: usize = 4 * 1024 * 1024;

pub fn build_client(user_agent: &str, timeout_secs: u64) -> Result<Client> {
    let client = Client::builder()
        .user_agent(user_agent)
        .redirect(reqwest::redirect::Policy::limited(5))
        .timeout(Duration::from_secs(timeout_secs))
        .build()?;
    Ok(client)
}

/// Fetch one listing page and extract its movies.
pub async fn fetch_page(client: &Client, url: &str) -> Result<PageExtract> {
    let resp = client.get(url).send().await?;
    if !resp.status().is_success() {
        return Err(anyhow!("{url}: status {}", resp.status()));
    }
    if let Some(ct) = resp.headers().get(header::CONTENT_TYPE) {
        if let Ok(v) = ct.to_str() {
            if !v.starts_with("text/html") { return Err(anyhow!("{url}: unexpected content type {v}")); }
        }
    }
    let bytes = resp.bytes().await?;
    if bytes.len() > MAX_PAGE_BYTES {
        return Err(anyhow!("{url}: page too large ({} bytes)", bytes.len()));
    }
    let body = String::from_utf8_lossy(&bytes);
    Ok(extract_page(&body))
}

/// Fetch every page of the catalog, at most `concurrency` at a time.
///
/// Records come back in page order regardless of completion order, since a movie's
/// position in the catalog is its index id. Pages that fail are logged and skipped.
pub async fn fetch_catalog(client: &Client, config: &CatalogConfig, concurrency: usize) -> Vec<MovieRecord> {
    let permits = Arc::new(Semaphore::new(concurrency.max(1)));
    let mut tasks = JoinSet::new();

    for (page_no, url) in config.page_urls().into_iter().enumerate() {
        let client = client.clone();
        let permits = permits.clone();
        tasks.spawn(async move {
            let _permit = permits.acquire_owned().await;
            let res = fetch_page(&client, &url).await;
            (page_no, url, res)
        });
    }

    let mut pages = Vec::with_capacity(config.num_pages as usize);
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((page_no, url, Ok(extract))) => {
                tracing::info!(page = page_no + 1, movies = extract.records.len(), warnings = extract.warnings.len(), %url, "page extracted");
                pages.push((page_no, extract.records));
            }
            Ok((page_no, url, Err(e))) => {
                tracing::warn!(page = page_no + 1, %url, error = %e, "page fetch failed");
            }
            Err(e) => tracing::warn!(error = %e, "page task panicked"),
        }
    }

    merge_pages(pages)
}

/// Crawl the catalog described by the index's own config and build the index from it.
pub async fn build_from_catalog(client: &Client, index: &mut MovieIndex, concurrency: usize) -> BuildReport {
    let records = fetch_catalog(client, index.config(), concurrency).await;
    index.build(records)
}

/// Concatenate per-page records in ascending page order.
pub fn merge_pages(mut pages: Vec<(usize, Vec<MovieRecord>)>) -> Vec<MovieRecord> {
    pages.sort_by_key(|(page_no, _)| *page_no);
    pages.into_iter().flat_map(|(_, records)| records).collect()
}
