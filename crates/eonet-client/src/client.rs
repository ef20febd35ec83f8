//! EONET HTTP client.

use std::sync::Arc;

use reqwest::Client;
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::Settings;
use crate::error::{AttemptFailure, EonetError};
use crate::query::EventQuery;
use crate::retry::{RetryPolicy, Sleeper, StatusClass, TokioSleeper};
use crate::RawPayload;

/// Client for the NASA EONET v3 API.
///
/// Cheap to clone: clones share the underlying connection pool.
#[derive(Clone)]
pub struct EonetClient {
    http: Client,
    settings: Settings,
    policy: RetryPolicy,
    sleeper: Arc<dyn Sleeper>,
}

impl EonetClient {
    /// Create a client from explicit settings.
    pub fn new(settings: Settings) -> Result<Self, EonetError> {
        let http = Client::builder()
            .timeout(settings.timeout())
            .user_agent(format!("eonet-client/{}", crate::version()))
            .build()
            .map_err(|e| EonetError::Config(e.to_string()))?;

        Ok(Self {
            http,
            policy: settings.retry_policy(),
            settings,
            sleeper: Arc::new(TokioSleeper),
        })
    }

    /// Replace how the client waits between attempts.
    pub fn with_sleeper(mut self, sleeper: Arc<dyn Sleeper>) -> Self {
        self.sleeper = sleeper;
        self
    }

    /// Fetch events, filtered by whichever parts of `query` are set.
    pub async fn get_events(&self, query: &EventQuery) -> Result<RawPayload, EonetError> {
        self.get_json("events", &query.to_params()).await
    }

    /// Fetch the category catalog.
    pub async fn get_categories(&self) -> Result<RawPayload, EonetError> {
        self.get_json("categories", &[]).await
    }

    /// Fetch the source catalog.
    pub async fn get_sources(&self) -> Result<RawPayload, EonetError> {
        self.get_json("sources", &[]).await
    }

    /// Get the settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Get the retry policy.
    pub fn retry_policy(&self) -> RetryPolicy {
        self.policy
    }

    /// GET a resource and return its JSON object body, retrying transient failures.
    async fn get_json(
        &self,
        path: &str,
        params: &[(&'static str, String)],
    ) -> Result<RawPayload, EonetError> {
        let url = self.settings.resource_url(path);
        let mut attempt = 0u32;

        loop {
            attempt += 1;
            debug!(url = %url, attempt, "EONET request");

            let failure = match self.attempt(&url, params).await {
                Ok(Attempt::Body(body)) => return parse_object(&url, &body),
                Ok(Attempt::Fatal(status)) => {
                    warn!(url = %url, status, "EONET rejected request");
                    return Err(EonetError::Status { url, status });
                }
                Err(failure) => failure,
            };

            if !self.policy.should_retry(attempt) {
                warn!(url = %url, attempts = attempt, "EONET retries exhausted: {}", failure);
                return Err(EonetError::Exhausted {
                    url,
                    attempts: attempt,
                    source: failure,
                });
            }

            let delay = self.policy.delay_for_attempt(attempt);
            warn!(
                url = %url,
                attempt,
                delay_ms = delay.as_millis() as u64,
                "EONET attempt failed, retrying: {}",
                failure
            );
            self.sleeper.sleep(delay).await;
        }
    }

    /// Perform one attempt. Retryable failures come back as `Err`.
    async fn attempt(
        &self,
        url: &str,
        params: &[(&'static str, String)],
    ) -> Result<Attempt, AttemptFailure> {
        let mut request = self.http.get(url);
        if !params.is_empty() {
            request = request.query(params);
        }

        let response = request.send().await?;
        let status = response.status().as_u16();

        match StatusClass::of(status) {
            StatusClass::Success => Ok(Attempt::Body(response.bytes().await?.to_vec())),
            StatusClass::Fatal => Ok(Attempt::Fatal(status)),
            StatusClass::Retryable => Err(AttemptFailure::Status(status)),
        }
    }
}

impl std::fmt::Debug for EonetClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EonetClient")
            .field("settings", &self.settings)
            .field("policy", &self.policy)
            .finish()
    }
}

/// Outcome of an attempt that ends the retry loop.
enum Attempt {
    Body(Vec<u8>),
    Fatal(u16),
}

fn parse_object(url: &str, body: &[u8]) -> Result<RawPayload, EonetError> {
    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(EonetError::InvalidBody {
            url: url.to_string(),
            reason: "expected a JSON object".to_string(),
        }),
        Err(e) => Err(EonetError::InvalidBody {
            url: url.to_string(),
            reason: e.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_object_accepts_objects_only() {
        let map = parse_object("u", br#"{"events": []}"#).unwrap();
        assert!(map.contains_key("events"));

        let err = parse_object("u", b"[1, 2]").unwrap_err();
        assert!(matches!(err, EonetError::InvalidBody { .. }));

        let err = parse_object("u", b"<html>").unwrap_err();
        assert!(matches!(err, EonetError::InvalidBody { .. }));
    }

    #[test]
    fn test_new_uses_settings_policy() {
        let client = EonetClient::new(Settings::new("http://localhost:1").with_retries(5, 0.1))
            .unwrap();
        assert_eq!(client.retry_policy().max_attempts, 5);
        assert_eq!(client.settings().base_url, "http://localhost:1");
    }

    #[test]
    fn test_debug_omits_secrets() {
        let mut settings = Settings::default();
        settings.api_key = Some("abc123".to_string());
        let client = EonetClient::new(settings).unwrap();
        assert!(!format!("{:?}", client).contains("abc123"));
    }
}
