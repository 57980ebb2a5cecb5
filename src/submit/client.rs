use super::payload::Payload;
use super::pending::{self, PendingRequests};
use super::{RemoteResponse, SubmitError, SubmitOutcome};
use crate::evaluation::EvaluationData;
use crate::scoring::ScoreSummary;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::sync::oneshot;

/// Bound on one submission attempt, response or not.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Wire contract variant for the remote store endpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmitMethod {
    /// GET carrying a correlation token; the response body invokes it.
    #[default]
    Callback,
    /// Direct POST returning plain JSON `{status, message}`.
    Post,
}

/// Client for the sheet-backed remote store.
///
/// One call produces exactly one terminal outcome: success, a remote-reported
/// error, an immediate transport error, or a timeout. Nothing retries; the
/// caller re-triggers submission manually after a failure.
pub struct SheetClient {
    http: reqwest::Client,
    endpoint: String,
    timeout: Duration,
    pending: PendingRequests,
}

impl SheetClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self::with_timeout(endpoint, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(endpoint: impl Into<String>, timeout: Duration) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: endpoint.into(),
            timeout,
            pending: PendingRequests::new(),
        }
    }

    /// Submit one evaluation through the chosen wire contract.
    pub async fn submit_with(
        &self,
        method: SubmitMethod,
        data: &EvaluationData,
        score: &ScoreSummary,
    ) -> Result<(), SubmitError> {
        match method {
            SubmitMethod::Callback => self.submit(data, score).await,
            SubmitMethod::Post => self.submit_post(data, score).await,
        }
    }

    /// Submit via the script-callback contract.
    ///
    /// A single-use correlation token is registered in the pending table
    /// strictly before the request is dispatched, then sent along as the
    /// `callback` query parameter. The store answers with a script body that
    /// invokes the token, which is routed back to the registered handler.
    pub async fn submit(
        &self,
        data: &EvaluationData,
        score: &ScoreSummary,
    ) -> Result<(), SubmitError> {
        let payload = Payload::build(data, score, Utc::now());
        let token = pending::next_token();
        let rx = self.pending.register(&token);

        let request = self
            .http
            .get(&self.endpoint)
            .query(payload.fields())
            .query(&[("callback", token.as_str())]);

        let registry = self.pending.clone();
        let response_token = token.clone();
        tokio::spawn(async move {
            let outcome = match request.send().await {
                Ok(response) => match response.text().await {
                    Ok(body) => parse_callback_body(&response_token, &body),
                    Err(e) => Err(SubmitError::Network(format!(
                        "failed to read response body: {}",
                        e
                    ))),
                },
                Err(e) => Err(SubmitError::Network(format!(
                    "failed to reach the remote store: {}",
                    e
                ))),
            };
            // A late outcome finds the handler already released; that is fine.
            registry.complete(&response_token, outcome);
        });

        self.wait(rx, &token).await
    }

    /// Await the registered handler, bounding the wait. The handler is gone
    /// by the time this returns, whichever path terminated first.
    async fn wait(
        &self,
        rx: oneshot::Receiver<SubmitOutcome>,
        token: &str,
    ) -> Result<(), SubmitError> {
        match tokio::time::timeout(self.timeout, rx).await {
            Err(_elapsed) => {
                self.pending.release(token);
                Err(SubmitError::Timeout(self.timeout))
            }
            Ok(Err(_closed)) => {
                // Sender dropped without delivering; count it as transport loss.
                self.pending.release(token);
                Err(SubmitError::Network(
                    "submission task ended before delivering an outcome".to_string(),
                ))
            }
            Ok(Ok(outcome)) => match outcome {
                Ok(response) if response.is_success() => Ok(()),
                Ok(response) => Err(SubmitError::Remote(response.error_message())),
                Err(e) => Err(e),
            },
        }
    }

    /// Submit via the direct-POST contract: form-encoded payload, plain JSON
    /// status in the response body, no callback indirection.
    pub async fn submit_post(
        &self,
        data: &EvaluationData,
        score: &ScoreSummary,
    ) -> Result<(), SubmitError> {
        let payload = Payload::build(data, score, Utc::now());

        let send = async {
            let response = self
                .http
                .post(&self.endpoint)
                .form(payload.fields())
                .send()
                .await
                .map_err(|e| {
                    SubmitError::Network(format!("failed to reach the remote store: {}", e))
                })?;
            let parsed: RemoteResponse = response.json().await.map_err(|e| {
                SubmitError::Remote(format!("malformed status response: {}", e))
            })?;
            if parsed.is_success() {
                Ok(())
            } else {
                Err(SubmitError::Remote(parsed.error_message()))
            }
        };

        match tokio::time::timeout(self.timeout, send).await {
            Ok(result) => result,
            Err(_elapsed) => Err(SubmitError::Timeout(self.timeout)),
        }
    }
}

/// Parse a script-style callback invocation `token({...})` into the status
/// object it carries. The invocation must address exactly the token this
/// call registered; anything else is reported instead of silently waiting
/// out the timeout.
fn parse_callback_body(token: &str, body: &str) -> SubmitOutcome {
    let body = body.trim();
    let body = body.strip_suffix(';').unwrap_or(body);

    let inner = body
        .strip_prefix(token)
        .and_then(|rest| rest.trim_start().strip_prefix('('))
        .and_then(|rest| rest.trim_end().strip_suffix(')'))
        .ok_or_else(|| {
            SubmitError::Remote(format!("response did not invoke callback '{}'", token))
        })?;

    serde_json::from_str::<RemoteResponse>(inner)
        .map_err(|e| SubmitError::Remote(format!("malformed callback payload: {}", e)))
}
