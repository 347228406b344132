use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::catalog;
use crate::config::{Config, PayloadShape};
use crate::error::AskError;

/// One submission, built fresh from the selector state and the trimmed
/// question text. Never constructed with an empty question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    pub class_level: Option<String>,
    pub subject: String,
    pub chapter: String,
    pub question: String,
}

impl Query {
    /// `chapter` of `None` (no catalog entries for the subject) falls back
    /// to the literal `"General"`. Whether `class_level` is carried depends
    /// on the configured payload shape.
    pub fn new(config: &Config, subject: &str, chapter: Option<&str>, question: &str) -> Self {
        let class_level = match config.payload {
            PayloadShape::ClassLevel => Some(config.class_level.clone()),
            PayloadShape::Simple => None,
        };
        let chapter = chapter
            .filter(|c| !c.trim().is_empty())
            .unwrap_or(catalog::DEFAULT_CHAPTER);
        Self {
            class_level,
            subject: subject.to_string(),
            chapter: chapter.to_string(),
            question: question.to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Answer {
    #[serde(rename = "answer")]
    pub text: String,
    #[serde(default)]
    pub meta: Option<AnswerMeta>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AnswerMeta {
    pub class_level: String,
    pub subject: String,
    pub chapter: String,
}

/// The one outbound call the app makes. Production uses [`TutorClient`];
/// tests substitute deterministic fakes.
#[async_trait]
pub trait AskTransport: Send + Sync {
    async fn send(&self, query: &Query) -> Result<Answer, AskError>;
}

#[derive(Debug, Serialize)]
struct AskRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    class_level: Option<&'a str>,
    subject: &'a str,
    chapter: &'a str,
    question: &'a str,
}

impl<'a> AskRequest<'a> {
    fn from_query(query: &'a Query) -> Self {
        Self {
            class_level: query.class_level.as_deref(),
            subject: &query.subject,
            chapter: &query.chapter,
            question: &query.question,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: Option<String>,
}

pub struct TutorClient {
    client: Client,
    base_url: String,
}

impl TutorClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Startup reachability probe against the backend's health endpoint.
    pub async fn health(&self) -> bool {
        match self
            .client
            .get(format!("{}/health", self.base_url))
            .send()
            .await
        {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                tracing::warn!("health probe failed: {}", e);
                false
            }
        }
    }
}

#[async_trait]
impl AskTransport for TutorClient {
    async fn send(&self, query: &Query) -> Result<Answer, AskError> {
        let request = AskRequest::from_query(query);

        let response = self
            .client
            .post(format!("{}/api/ask", self.base_url))
            .json(&request)
            .send()
            .await
            .map_err(|e| AskError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            // Best effort: the backend puts its message in a `detail` field.
            let detail = response
                .json::<ErrorBody>()
                .await
                .ok()
                .and_then(|body| body.detail);
            return Err(AskError::Server {
                status: status.as_u16(),
                detail,
            });
        }

        response
            .json::<Answer>()
            .await
            .map_err(|e| AskError::Transport(e.to_string()))
    }
}
