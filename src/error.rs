/// Errors raised inside the checking pipeline.
///
/// Decoding errors never leave the decoding boundary, they are turned into
/// "no graph" there. Layout errors are recovered by the force-directed fallback.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("cannot decode {format} input: {message}")]
    Decode {
        format: &'static str,
        message: String,
    },
    /// Shown as the bare message, it is the body of a 500 reply.
    #[error("{0}")]
    Oracle(String),
    #[error("layout failed: {0}")]
    Layout(String),
    #[error("Unknown algorithm '{0}'; expected 'Left-Right' or 'kuratowski_search'")]
    UnknownAlgorithm(String),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn decode(format: &'static str, message: impl Into<String>) -> Self {
        Error::Decode {
            format,
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
