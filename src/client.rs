use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use reqwest::header::{self, HeaderMap, HeaderValue};
use reqwest::{Client as ReqwestClient, Response};

use crate::client_logger::ClientLogger;
use crate::error::{Error, Result, TurnError};
use crate::observability::{
    CLIENT_REQUEST_DURATION, CLIENT_REQUESTS, CLIENT_SHAPE_ERRORS, CLIENT_STATUS_ERRORS,
    CLIENT_TIMEOUTS, CLIENT_TOTAL_TOKENS, CLIENT_TRANSPORT_ERRORS,
};
use crate::types::{CompletionRequest, CompletionResponse};

/// Default base URL of the SoonerAI deployment.
pub const DEFAULT_BASE_URL: &str = "https://ai.sooners.us";
/// Path of the chat completion endpoint below the base URL.
pub const COMPLETIONS_PATH: &str = "/api/chat/completions";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Anything that can turn a conversation window into a reply.
///
/// The chat session only talks to the endpoint through this trait.
#[async_trait::async_trait]
pub trait CompletionBackend: Send + Sync {
    /// Requests one completion and returns the reply text.
    ///
    /// Implementations make exactly one attempt.
    async fn complete(&self, request: &CompletionRequest) -> std::result::Result<String, TurnError>;
}

/// Client for OpenAI-compatible chat completion endpoints.
#[derive(Clone)]
pub struct SoonerAi {
    client: ReqwestClient,
    headers: HeaderMap,
    base_url: String,
    timeout: Duration,
    logger: Option<Arc<dyn ClientLogger>>,
}

impl SoonerAi {
    /// Create a new client with the default base URL and timeout.
    pub fn new(api_key: &str) -> Result<Self> {
        Self::with_options(api_key, DEFAULT_BASE_URL, DEFAULT_TIMEOUT)
    }

    /// Create a new client with custom settings.
    ///
    /// A trailing `/` on `base_url` is ignored.
    pub fn with_options(api_key: &str, base_url: &str, timeout: Duration) -> Result<Self> {
        if api_key.is_empty() {
            return Err(Error::configuration(
                "API key must not be empty",
                Some("SOONERAI_API_KEY".to_string()),
            ));
        }
        let base_url = base_url.trim_end_matches('/');
        if base_url.is_empty() {
            return Err(Error::configuration(
                "base URL must not be empty",
                Some("SOONERAI_BASE_URL".to_string()),
            ));
        }
        url::Url::parse(base_url)?;

        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );
        headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));
        let mut bearer = HeaderValue::from_str(&format!("Bearer {api_key}")).map_err(|_| {
            Error::configuration(
                "API key contains characters that cannot be sent in a header",
                Some("SOONERAI_API_KEY".to_string()),
            )
        })?;
        bearer.set_sensitive(true);
        headers.insert(header::AUTHORIZATION, bearer);

        let client = ReqwestClient::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| {
                Error::http_client(
                    format!("Failed to build HTTP client: {}", e),
                    Some(Box::new(e)),
                )
            })?;

        Ok(Self {
            client,
            headers,
            base_url: base_url.to_string(),
            timeout,
            logger: None,
        })
    }

    /// Attach a logger that sees every request and outcome.
    pub fn with_logger(mut self, logger: Arc<dyn ClientLogger>) -> Self {
        self.logger = Some(logger);
        self
    }

    /// The base URL, without a trailing `/`.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The full completion endpoint URL.
    pub fn endpoint(&self) -> String {
        format!("{}{}", self.base_url, COMPLETIONS_PATH)
    }

    /// The per-request timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Send a completion request and return the validated response.
    pub async fn send(
        &self,
        request: &CompletionRequest,
    ) -> std::result::Result<CompletionResponse, TurnError> {
        CLIENT_REQUESTS.click();
        if let Some(logger) = &self.logger {
            logger.log_request(request);
        }
        tracing::debug!(
            endpoint = %self.endpoint(),
            model = %request.model,
            messages = request.messages.len(),
            "sending completion request"
        );

        let started = Instant::now();
        let result = self.send_once(request).await;
        CLIENT_REQUEST_DURATION.add(started.elapsed().as_secs_f64());

        match &result {
            Ok(response) => {
                if let Some(total) = response.usage.as_ref().and_then(|usage| usage.total_tokens) {
                    CLIENT_TOTAL_TOKENS.count(total);
                }
                if let Some(logger) = &self.logger {
                    logger.log_response(response);
                }
                tracing::debug!(
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "completion received"
                );
            }
            Err(err) => {
                match err {
                    TurnError::Status { .. } => CLIENT_STATUS_ERRORS.click(),
                    TurnError::UnexpectedShape { .. } => CLIENT_SHAPE_ERRORS.click(),
                    TurnError::Timeout { .. } => CLIENT_TIMEOUTS.click(),
                    TurnError::Connection { .. } | TurnError::Http { .. } => {
                        CLIENT_TRANSPORT_ERRORS.click()
                    }
                }
                if let Some(logger) = &self.logger {
                    logger.log_error(err);
                }
                tracing::warn!(error = %err, "completion failed");
            }
        }
        result
    }

    async fn send_once(
        &self,
        request: &CompletionRequest,
    ) -> std::result::Result<CompletionResponse, TurnError> {
        let response = self
            .client
            .post(self.endpoint())
            .headers(self.headers.clone())
            .json(request)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        if !response.status().is_success() {
            return Err(self.process_error_response(response).await);
        }

        let body = response.text().await.map_err(|e| self.transport_error(e))?;
        CompletionResponse::from_body(&body)
    }

    /// Turn a non-success response into a status error carrying the raw body.
    async fn process_error_response(&self, response: Response) -> TurnError {
        let status_code = response.status().as_u16();
        match response.text().await {
            Ok(body) => TurnError::status(status_code, body),
            Err(e) => self.transport_error(e),
        }
    }

    fn transport_error(&self, e: reqwest::Error) -> TurnError {
        if e.is_timeout() {
            TurnError::timeout(
                format!("Request timed out: {}", e),
                Some(self.timeout.as_secs_f64()),
            )
        } else if e.is_connect() {
            TurnError::connection(format!("{}", e), Some(Box::new(e)))
        } else {
            TurnError::http(format!("{}", e), Some(Box::new(e)))
        }
    }
}

#[async_trait::async_trait]
impl CompletionBackend for SoonerAi {
    async fn complete(&self, request: &CompletionRequest) -> std::result::Result<String, TurnError> {
        let response = self.send(request).await?;
        Ok(response.reply().to_string())
    }
}

impl fmt::Debug for SoonerAi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SoonerAi")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("logger", &self.logger.is_some())
            .finish_non_exhaustive()
    }
}
