/// Failure of a single request to a light's control endpoint.
///
/// This is the raw error; callers that report to a user go through
/// [`crate::classify::classify`] instead of printing it.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected status code {status}: {body}")]
    Status { status: u16, body: String },

    #[error("parsing response failed: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("device reported no lights")]
    EmptyResponse,

    #[error("after {attempts} attempts, last error: {source}")]
    RetriesExhausted {
        attempts: u32,
        #[source]
        source: Box<TransportError>,
    },
}

impl TransportError {
    /// The error that ended the last attempt, looking through retry wrappers.
    pub fn last_error(&self) -> &TransportError {
        match self {
            TransportError::RetriesExhausted { source, .. } => source.last_error(),
            other => other,
        }
    }
}
