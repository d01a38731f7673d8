use thiserror::Error;

/// Failures surfaced by the console helpers.  Node-side reasons are carried
/// verbatim in the `String` payloads.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConsoleError {
    // Transport
    #[error("client unavailable: {0}")]
    ClientUnavailable(String),

    // Input validation, raised before the client is touched
    #[error("invalid address `{0}`")]
    InvalidAddress(String),
    #[error("invalid amount `{0}`")]
    InvalidAmount(String),
    #[error("invalid transaction hash `{0}`")]
    InvalidHash(String),

    // Node replies
    #[error("lookup failed: {0}")]
    LookupFailed(String),
    #[error("submission rejected: {0}")]
    SubmissionRejected(String),

    #[error("report output: {0}")]
    Output(String),
}

pub type Result<T> = std::result::Result<T, ConsoleError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_carry_node_reason() {
        let e = ConsoleError::SubmissionRejected("insufficient funds for transfer".into());
        assert_eq!(e.to_string(), "submission rejected: insufficient funds for transfer");
        let e = ConsoleError::Output("Broken pipe".into());
        assert_eq!(e.to_string(), "report output: Broken pipe");
    }
}
