use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use movie_core::{read_records, BuildReport, CatalogConfig, MovieIndex, MovieRecord};
use tracing_subscriber::{fmt, EnvFilter};
use walkdir::WalkDir;

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

const DEMO_QUERIES: &[&str] = &["Nolan", "Nolan Bale", "Chris Pratt", "Lord of the", "spielberg", "spielberg hanks"];

#[derive(Parser)]
#[command(name = "indexer")]
#[command(about = "Build an in-memory movie keyword index and query it", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the index from JSONL records and run queries against it
    Search {
        /// Input path (JSONL file or directory of JSONL files)
        #[arg(long)]
        input: String,
        /// Query to run; may be repeated. Defaults to a demonstration set
        #[arg(long = "query")]
        queries: Vec<String>,
    },
    /// Build the index and print counts and build warnings
    Stats {
        /// Input path (JSONL file or directory of JSONL files)
        #[arg(long)]
        input: String,
    },
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Search { input, queries } => {
            let (index, _) = build_index(&input)?;
            let queries: Vec<String> = if queries.is_empty() {
                DEMO_QUERIES.iter().map(|q| q.to_string()).collect()
            } else {
                queries
            };
            for q in &queries {
                println!("Search terms for '{}': {:?}", q, index.search(q)?);
            }
            Ok(())
        }
        Commands::Stats { input } => {
            let (_, report) = build_index(&input)?;
            println!("{}", serde_json::to_string_pretty(&report)?);
            Ok(())
        }
    }
}

fn build_index(input: &str) -> Result<(MovieIndex, BuildReport)> {
    let records = load_records(Path::new(input))?;
    tracing::info!(records = records.len(), input, "loaded movie records");
    let mut index = MovieIndex::new(CatalogConfig::default());
    let report = index.build(records);
    Ok((index, report))
}

/// Records from a single file, or from every `.jsonl` under a directory in path order.
fn load_records(input: &Path) -> Result<Vec<MovieRecord>> {
    let mut files: Vec<PathBuf> = Vec::new();
    if input.is_dir() {
        for entry in WalkDir::new(input).sort_by_file_name().into_iter().filter_map(|e| e.ok()) {
            let p = entry.path();
            if p.is_file() && p.extension().and_then(|s| s.to_str()) == Some("jsonl") {
                files.push(p.to_path_buf());
            }
        }
    } else if input.is_file() {
        files.push(input.to_path_buf());
    } else {
        return Err(anyhow!("input not found: {}", input.display()));
    }

    let mut records = Vec::new();
    for file in files {
        let before = records.len();
        records.extend(read_records(BufReader::new(File::open(&file)?))?);
        tracing::debug!(file = %file.display(), records = records.len() - before, "read records");
    }
    Ok(records)
}
