use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Watch-list or format file could not be read or written.
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Request failed, timed out, or came back with a non-success status.
    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),

    /// The API answered with something that is not a streams document.
    #[error("malformed API response: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid channel name {0:?}")]
    InvalidChannel(String),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
