pub mod config;
pub mod error;
pub mod index;
pub mod keyword_map;
pub mod record;
pub mod search;
pub mod shared;
pub mod tokenizer;

pub use config::CatalogConfig;
pub use error::IndexError;
pub use index::{BuildReport, BuildWarning, Index, MovieId, MovieIndex};
pub use keyword_map::KeywordMap;
pub use record::{read_records, MovieRecord};
pub use shared::SharedIndex;
