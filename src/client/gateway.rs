//! The single HTTP call path to the SkillBridge API

use std::time::Duration;

use reqwest::{Client as HttpClient, Method, StatusCode};
use serde_json::Value;

use crate::error::{ApiError, Result};
use crate::events::{AppEvent, EventBus};
use crate::session::SessionStore;

/// What a 401 response does to the local session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OnUnauthorized {
    EndSession,
    Defer,
}

/// Sends JSON requests, parses JSON responses and normalizes failures.
///
/// A 401 ends the local session before the error is returned, unless the
/// caller used [`Gateway::call_recoverable`]. Nothing is cached or retried here.
#[derive(Clone)]
pub struct Gateway {
    http: HttpClient,
    base_url: String,
    session: SessionStore,
    events: EventBus,
}

impl Gateway {
    /// Create a gateway rooted at `base_url` (e.g. `http://localhost:8080/api`).
    pub fn new(
        base_url: &str,
        timeout: Option<Duration>,
        session: SessionStore,
        events: EventBus,
    ) -> Result<Self> {
        let mut builder = HttpClient::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            session,
            events,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Issue one request and return the parsed body.
    ///
    /// `token`, when given, is sent as a bearer credential as-is. An empty
    /// success body yields `{}`.
    pub async fn call(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<&Value>,
        token: Option<&str>,
    ) -> Result<Value> {
        self.execute(method, endpoint, body, token, OnUnauthorized::EndSession)
            .await
    }

    /// Like [`Gateway::call`], but a 401 leaves the session in place.
    ///
    /// The caller owns the outcome: it either recovers or ends the session
    /// itself.
    pub async fn call_recoverable(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<&Value>,
        token: Option<&str>,
    ) -> Result<Value> {
        self.execute(method, endpoint, body, token, OnUnauthorized::Defer)
            .await
    }

    async fn execute(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<&Value>,
        token: Option<&str>,
        on_unauthorized: OnUnauthorized,
    ) -> Result<Value> {
        let url = format!("{}{}", self.base_url, endpoint);
        log::debug!("{} {}", method, url);

        let mut request = self
            .http
            .request(method.clone(), &url)
            .header("Content-Type", "application/json");

        if let Some(token) = token {
            request = request.header("Authorization", format!("Bearer {}", token));
        }

        if let Some(body) = body {
            if method == Method::POST || method == Method::PUT || method == Method::PATCH {
                request = request.body(body.to_string());
            }
        }

        let response = request.send().await.map_err(|e| {
            log::warn!("{} {} failed: {}", method, url, e);
            ApiError::from(e)
        })?;

        let status = response.status();
        log::debug!("{} {} -> {}", method, url, status);

        let text = response.text().await.map_err(|e| {
            ApiError::InvalidResponse(format!("Failed to read response: {}", e))
        })?;

        let parsed = if text.trim().is_empty() {
            None
        } else {
            match serde_json::from_str::<Value>(&text) {
                Ok(value) => Some(value),
                Err(e) if status.is_success() => {
                    log::warn!("{} {} returned malformed JSON: {}", method, url, e);
                    return Err(ApiError::InvalidResponse(format!(
                        "Failed to parse response: {}",
                        e
                    ))
                    .into());
                }
                // Error pages are often HTML; the status still tells the story
                Err(_) => None,
            }
        };

        if status.is_success() {
            return Ok(parsed.unwrap_or_else(|| Value::Object(Default::default())));
        }

        let message = error_message(status, parsed.as_ref());
        log::warn!("{} {} rejected ({}): {}", method, url, status.as_u16(), message);

        if status == StatusCode::UNAUTHORIZED && on_unauthorized == OnUnauthorized::EndSession {
            self.end_session();
        }

        Err(ApiError::from_status(status.as_u16(), message).into())
    }

    fn end_session(&self) {
        if let Err(e) = self.session.logout() {
            log::warn!("Failed to clear session after 401: {}", e);
        }
        self.events.publish(AppEvent::SessionEnded);
    }
}

/// Server-supplied `error`, then `message`, then a generic status line.
fn error_message(status: StatusCode, body: Option<&Value>) -> String {
    body.and_then(|b| {
        ["error", "message"]
            .iter()
            .find_map(|key| b.get(*key).and_then(Value::as_str))
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    })
    .unwrap_or_else(|| format!("Request failed with status {}", status.as_u16()))
}
