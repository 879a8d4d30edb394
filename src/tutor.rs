/// ./src/tutor.rs

use crate::error::TutorError;
use serde::{Deserialize, Serialize};

const DEFAULT_BASE_URL: &str = "http://localhost:8000";

#[derive(Debug, Serialize)]
struct AskRequest<'a> {
    question: &'a str,
}

/// Client for the answer service: one JSON call per user turn.
///
/// Wire contract: `POST {base_url}/api/ask` with `{"question": ...}`,
/// answered by 2xx `{"answer": ...}` or non-2xx `{"error": ...}`.
#[derive(Debug, Clone)]
pub struct TutorClient {
    base_url: String,
    client: reqwest::Client,
}

impl TutorClient {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            client: reqwest::Client::new(),
        }
    }

    /// Sends one question and waits for the answer. No timeout and no retry:
    /// the caller's awaiting gate already blocks a second submission, and a
    /// slow request simply stays outstanding until it resolves.
    pub async fn ask(&self, question: &str) -> Result<String, TutorError> {
        let response = self.client
            .post(format!("{}/api/ask", self.base_url))
            .json(&AskRequest { question })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            #[derive(Deserialize)]
            struct ErrorBody {
                error: Option<String>,
            }

            let message = response
                .json::<ErrorBody>()
                .await
                .ok()
                .and_then(|body| body.error)
                .unwrap_or_else(|| "The server returned an error.".to_string());
            return Err(TutorError::Service(message));
        }

        #[derive(Deserialize)]
        struct AnswerBody {
            answer: Option<String>,
        }

        let body: AnswerBody = response
            .json()
            .await
            .map_err(|e| TutorError::MalformedResponse(e.to_string()))?;

        body.answer.ok_or_else(|| {
            TutorError::MalformedResponse("2xx response without an 'answer' field".to_string())
        })
    }
}

impl Default for TutorClient {
    fn default() -> Self {
        Self::new()
    }
}
