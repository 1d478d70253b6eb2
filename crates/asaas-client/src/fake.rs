//! In-memory [`Engine`] for unit tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::engine::{Engine, Headers, RawResponse, TokenSlot};
use crate::error::ClientError;
use crate::token::Token;

/// A request captured by [`FakeEngine`].
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RecordedRequest {
    pub method: &'static str,
    pub url: String,
    pub headers: Vec<(&'static str, String)>,
    pub body: Option<Value>,
    pub query: Map<String, Value>,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_str())
    }
}

/// Replays queued responses and records every request.
#[derive(Debug, Default)]
pub(crate) struct FakeEngine {
    responses: Mutex<VecDeque<RawResponse>>,
    requests: Mutex<Vec<RecordedRequest>>,
    pub token: TokenSlot,
    pub token_installs: usize,
    drop_tokens: bool,
}

impl FakeEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, status: u16, body: &str) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push_back(RawResponse::new(status, body));
        self
    }

    /// Accept tokens but never keep them.
    pub fn dropping_tokens(mut self) -> Self {
        self.drop_tokens = true;
        self
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    fn record(
        &self,
        method: &'static str,
        url: &str,
        headers: &Headers,
        body: Option<Value>,
        query: Map<String, Value>,
    ) -> Result<RawResponse, ClientError> {
        self.requests.lock().unwrap().push(RecordedRequest {
            method,
            url: url.to_string(),
            headers: headers.to_vec(),
            body,
            query,
        });
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| ClientError::Configuration("no response queued".to_string()))
    }
}

#[async_trait]
impl Engine for FakeEngine {
    async fn post_no_auth(
        &self,
        body: &Value,
        url: &str,
        headers: &Headers,
    ) -> Result<RawResponse, ClientError> {
        self.record("POST", url, headers, Some(body.clone()), Map::new())
    }

    async fn get_no_auth(
        &self,
        query: &Map<String, Value>,
        url: &str,
        headers: &Headers,
    ) -> Result<RawResponse, ClientError> {
        self.record("GET", url, headers, None, query.clone())
    }

    async fn delete_no_auth(
        &self,
        url: &str,
        headers: &Headers,
    ) -> Result<RawResponse, ClientError> {
        self.record("DELETE", url, headers, None, Map::new())
    }

    fn set_token(&mut self, token: Token) -> Result<(), ClientError> {
        self.token_installs += 1;
        if self.drop_tokens {
            return Ok(());
        }
        self.token.set(token)
    }

    fn needs_authentication(&mut self) -> bool {
        self.token.needs_authentication()
    }
}
