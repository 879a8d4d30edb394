use thiserror::Error;

/// Everything that can go wrong between submitting a question and getting an
/// answer back. All variants map to a single user-visible string via
/// [`TutorError::user_message`]; none of them are fatal to the session.
#[derive(Error, Debug)]
pub enum TutorError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Service error: {0}")]
    Service(String),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

impl TutorError {
    /// The string surfaced in the error banner. Service errors carry the
    /// backend's own message through verbatim; the other kinds collapse to a
    /// generic line since the distinction is not actionable for the user.
    pub fn user_message(&self) -> String {
        match self {
            TutorError::Service(msg) => msg.clone(),
            TutorError::Network(_) => "Could not reach the tutor service.".to_string(),
            TutorError::MalformedResponse(_) => "The server returned an unexpected response.".to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, TutorError>;
