use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("unable to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// a `{` at byte `offset` that no `}` closes
    #[error("unmatched '{{' at byte {offset}")]
    UnmatchedBrace { offset: usize },

    #[error("no label {0:?} in the input")]
    UnknownLabel(String),

    #[error("json output: {0}")]
    Json(#[from] serde_json::Error),

    #[error("write failed: {0}")]
    Write(#[from] std::io::Error),
}
