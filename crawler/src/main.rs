use anyhow::{anyhow, Context, Result};
use clap::Parser;
use crawler::{build_client, fetch_catalog};
use movie_core::config::{DEFAULT_BASE_URL, DEFAULT_NUM_PAGES};
use movie_core::CatalogConfig;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "crawler")]
#[command(about = "Scrape paginated movie listings into JSONL movie records")]
struct Cli {
    /// Number of listing pages to fetch
    #[arg(long, default_value_t = DEFAULT_NUM_PAGES)]
    pages: u32,
    /// Listing URL; `{0}` is replaced by the page number
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    base_url: String,
    /// Output JSONL file path
    #[arg(long, default_value = "./sample_data/movies.jsonl")]
    output: String,
    /// Pages fetched in parallel
    #[arg(long, default_value_t = 4)]
    concurrency: usize,
    /// Request timeout seconds
    #[arg(long, default_value_t = 12)]
    timeout_secs: u64,
    /// User-Agent string sent with every request
    #[arg(long, default_value = "movie-search-bot/0.1")]
    user_agent: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let args = Cli::parse();
    if !args.base_url.contains("{0}") {
        return Err(anyhow!("--base-url must contain a {{0}} page placeholder"));
    }
    prepare_output(Path::new(&args.output))?;

    let config = CatalogConfig::new(args.pages, args.base_url);
    let client = build_client(&args.user_agent, args.timeout_secs)?;
    tracing::info!(pages = config.num_pages, concurrency = args.concurrency, output = %args.output, "crawling catalog");

    let records = fetch_catalog(&client, &config, args.concurrency).await;

    let mut out = BufWriter::new(File::create(&args.output)?);
    for rec in &records {
        serde_json::to_writer(&mut out, rec)?;
        out.write_all(b"\n")?;
    }
    out.flush()?;

    tracing::info!(movies = records.len(), output = %args.output, "done");
    Ok(())
}

/// Create the output file's parent directory; a bare file name needs none.
fn prepare_output(output: &Path) -> Result<()> {
    if let Some(dir) = output.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir).with_context(|| format!("creating output directory {}", dir.display()))?;
    }
    Ok(())
}
