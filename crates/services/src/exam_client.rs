use std::env;

use async_trait::async_trait;
use exam_core::model::{AnswerSubmission, ExamId, SaveAnswerResponse};
use page::dom::{CSRF_FIELD, CSRF_HEADER, SUBMIT_FIELD};
use reqwest::Client;
use tracing::{debug, warn};
use url::Url;

use crate::error::ExamClientError;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

#[derive(Clone, Debug)]
pub struct ExamClientConfig {
    pub base_url: Url,
}

impl ExamClientConfig {
    /// # Errors
    ///
    /// Returns `ExamClientError::InvalidBaseUrl` when the url cannot be parsed.
    pub fn new(base_url: &str) -> Result<Self, ExamClientError> {
        Ok(Self {
            base_url: Url::parse(base_url.trim())?,
        })
    }

    /// Reads `EXAM_BASE_URL`, falling back to the local development server.
    ///
    /// # Errors
    ///
    /// Returns `ExamClientError::InvalidBaseUrl` when the variable is malformed.
    pub fn from_env() -> Result<Self, ExamClientError> {
        match env::var("EXAM_BASE_URL") {
            Ok(raw) if !raw.trim().is_empty() => Self::new(&raw),
            _ => {
                debug!("EXAM_BASE_URL not set, using {DEFAULT_BASE_URL}");
                Self::new(DEFAULT_BASE_URL)
            }
        }
    }

    /// `{base}/student/exam/{exam_id}/save-answer/`
    ///
    /// # Errors
    ///
    /// Returns `ExamClientError::InvalidBaseUrl` if the joined url is invalid.
    pub fn save_answer_url(&self, exam_id: ExamId) -> Result<Url, ExamClientError> {
        self.exam_url(exam_id, "save-answer/")
    }

    /// `{base}/student/exam/{exam_id}/submit/`
    ///
    /// # Errors
    ///
    /// Returns `ExamClientError::InvalidBaseUrl` if the joined url is invalid.
    pub fn submit_url(&self, exam_id: ExamId) -> Result<Url, ExamClientError> {
        self.exam_url(exam_id, "submit/")
    }

    fn exam_url(&self, exam_id: ExamId, action: &str) -> Result<Url, ExamClientError> {
        let mut base = self.base_url.clone();
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        Ok(base.join(&format!("student/exam/{exam_id}/{action}"))?)
    }
}

/// Server endpoints the exam page talks to.
#[async_trait]
pub trait ExamGateway: Send + Sync {
    /// Persists one answer. Application-level rejections come back as
    /// `Ok` with `success == false`.
    async fn save_answer(
        &self,
        exam_id: ExamId,
        submission: &AnswerSubmission,
        csrf_token: Option<&str>,
    ) -> Result<SaveAnswerResponse, ExamClientError>;

    /// Posts the final submission form.
    async fn submit_exam(
        &self,
        exam_id: ExamId,
        csrf_token: Option<&str>,
    ) -> Result<(), ExamClientError>;
}

#[derive(Clone)]
pub struct HttpExamClient {
    client: Client,
    config: ExamClientConfig,
}

impl HttpExamClient {
    #[must_use]
    pub fn new(config: ExamClientConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    /// # Errors
    ///
    /// Returns `ExamClientError::InvalidBaseUrl` when `EXAM_BASE_URL` is malformed.
    pub fn from_env() -> Result<Self, ExamClientError> {
        Ok(Self::new(ExamClientConfig::from_env()?))
    }

    #[must_use]
    pub fn config(&self) -> &ExamClientConfig {
        &self.config
    }
}

#[async_trait]
impl ExamGateway for HttpExamClient {
    async fn save_answer(
        &self,
        exam_id: ExamId,
        submission: &AnswerSubmission,
        csrf_token: Option<&str>,
    ) -> Result<SaveAnswerResponse, ExamClientError> {
        let url = self.config.save_answer_url(exam_id)?;
        let mut request = self.client.post(url).json(submission);
        match csrf_token {
            Some(token) => request = request.header(CSRF_HEADER, token),
            None => warn!(%exam_id, "no anti-forgery token on page; sending save without it"),
        }

        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(ExamClientError::HttpStatus(response.status()));
        }
        Ok(response.json().await?)
    }

    async fn submit_exam(
        &self,
        exam_id: ExamId,
        csrf_token: Option<&str>,
    ) -> Result<(), ExamClientError> {
        let url = self.config.submit_url(exam_id)?;
        let mut form = vec![(SUBMIT_FIELD, "1")];
        if let Some(token) = csrf_token {
            form.push((CSRF_FIELD, token));
        }

        let response = self.client.post(url).form(&form).send().await?;
        // The server answers a final submission with a redirect to the result page.
        if !(response.status().is_success() || response.status().is_redirection()) {
            return Err(ExamClientError::HttpStatus(response.status()));
        }
        Ok(())
    }
}
