use crawler::{build_client, build_from_catalog, fetch_catalog, fetch_page};
use movie_core::{CatalogConfig, Index, IndexError, MovieIndex};
use std::net::SocketAddr;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

fn listing(page: u32) -> String {
    format!(
        r#"<html><body>
<div class="lister-item mode-advanced">
  <h3><a href="/t/{page}a">Movie {page}A</a></h3>
  <p class="text-muted"><span class="genre">
Drama</span></p>
  <p class="">Director: <a href="/n/1">Jane Doe</a> | Stars: <a href="/n/2">John Roe {page}</a></p>
</div>
<div class="lister-item mode-advanced">
  <h3><a href="/t/{page}b">Movie {page}B</a></h3>
  <p class="text-muted"><span class="genre">
Comedy</span></p>
  <p class="">Director: <a href="/n/1">Jane Doe</a> | Stars: <a href="/n/3">Max Poe</a></p>
</div>
</body></html>"#
    )
}

/// Serves `/list?page=N`; page 2 fails with a 500, earlier pages answer more slowly.
async fn serve() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        loop {
            let (mut sock, _) = match listener.accept().await { Ok(s) => s, Err(_) => return };
            tokio::spawn(async move {
                let mut buf = vec![0u8; 4096];
                let n = sock.read(&mut buf).await.unwrap_or(0);
                let req = String::from_utf8_lossy(&buf[..n]).to_string();
                let page: u32 = req
                    .split("page=")
                    .nth(1)
                    .and_then(|s| s.split(|c: char| !c.is_ascii_digit()).next())
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(0);
                tokio::time::sleep(Duration::from_millis(20 * (4u64.saturating_sub(page as u64)))).await;
                let resp = if page == 2 {
                    "HTTP/1.1 500 Internal Server Error\r\nContent-Length: 0\r\nConnection: close\r\n\r\n".to_string()
                } else {
                    let body = listing(page);
                    format!(
                        "HTTP/1.1 200 OK\r\nContent-Type: text/html; charset=utf-8\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                        body.len(),
                        body
                    )
                };
                let _ = sock.write_all(resp.as_bytes()).await;
                let _ = sock.shutdown().await;
            });
        }
    });
    addr
}

#[tokio::test]
async fn fetch_page_extracts_records() {
    let addr = serve().await;
    let client = build_client("test-agent", 5).unwrap();
    let page = fetch_page(&client, &format!("http://{addr}/list?page=1")).await.unwrap();
    assert_eq!(page.records.len(), 2);
    assert_eq!(page.records[0].people, vec!["jane doe", "john roe 1"]);
    assert!(page.warnings.is_empty());
}

#[tokio::test]
async fn fetch_page_rejects_error_status() {
    let addr = serve().await;
    let client = build_client("test-agent", 5).unwrap();
    assert!(fetch_page(&client, &format!("http://{addr}/list?page=2")).await.is_err());
}

#[tokio::test]
async fn catalog_keeps_page_order_and_skips_failed_pages() {
    let addr = serve().await;
    let client = build_client("test-agent", 5).unwrap();
    let config = CatalogConfig::new(3, format!("http://{addr}/list?page={{0}}"));

    let records = fetch_catalog(&client, &config, 3).await;
    let titles: Vec<&str> = records.iter().map(|r| r.title_pretty.as_str()).collect();
    assert_eq!(titles, vec!["Movie 1A", "Movie 1B", "Movie 3A", "Movie 3B"]);

    let (index, _) = Index::build(records);
    assert_eq!(index.search("doe comedy"), vec!["Movie 1B", "Movie 3B"]);
}

#[tokio::test]
async fn index_builds_from_its_own_catalog_config() {
    let addr = serve().await;
    let client = build_client("test-agent", 5).unwrap();
    let mut index = MovieIndex::new(CatalogConfig::new(1, format!("http://{addr}/list?page={{0}}")));
    assert_eq!(index.search("doe"), Err(IndexError::NotBuilt));

    let report = build_from_catalog(&client, &mut index, 2).await;
    assert_eq!(report.movies, 2);
    assert!(report.warnings.is_empty());
    assert_eq!(index.titles().unwrap(), ["Movie 1A".to_string(), "Movie 1B".to_string()]);
    assert_eq!(index.search("max poe").unwrap(), vec!["Movie 1B"]);
}
