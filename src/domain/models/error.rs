use thiserror::Error;

#[derive(Debug, Error)]
pub enum InterviewError {
    /// The client did not send the file or audio the endpoint needs.
    #[error("{0}")]
    InputMissing(&'static str),

    /// A collaborator failed: network, quota, timeout, or extraction.
    #[error("upstream failure: {0:#}")]
    UpstreamFailure(#[from] anyhow::Error),

    /// A collaborator answered, but not with something usable.
    #[error("malformed upstream response: {0}")]
    MalformedUpstreamResponse(String),
}

