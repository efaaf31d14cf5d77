use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IndexError {
    /// A query arrived before any index was built.
    #[error("index not built")]
    NotBuilt,
}
