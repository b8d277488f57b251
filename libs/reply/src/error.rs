use thiserror::Error;

/// Errors returned by [`Replier`](crate::Replier) and its response aides.
///
/// None of these are produced for application errors missing from the
/// manifest; those resolve to the internal server error entry instead.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ReplyError {
    /// The response request carried no writer to send the response through
    #[error("failed to send response, no writer provided")]
    MissingWriter,

    /// The token aide was called with both tokens empty
    #[error("failed to send token response, at least one token must be provided")]
    NoTokens,

    /// A header could not be applied to the writer
    #[error("invalid header '{name}': {reason}")]
    InvalidHeader {
        /// Header name as supplied by the caller
        name: String,
        /// Diagnostic message (for logging only)
        reason: String,
    },

    /// The envelope or the data payload could not be encoded as JSON
    #[error("failed to encode transfer object: {0}")]
    Encode(#[from] serde_json::Error),

    /// The writer rejected the response body
    #[error("failed to write response body: {0}")]
    Write(#[from] std::io::Error),

    /// Configuration or manifest file could not be loaded
    #[error("failed to load configuration: {0}")]
    Config(#[from] Box<figment::Error>),
}

impl From<figment::Error> for ReplyError {
    fn from(err: figment::Error) -> Self {
        Self::Config(Box::new(err))
    }
}
