use anyhow::{Context, Result};
use reqwest::{Client, Method as HttpMethod};
use serde_json::Value;
use std::time::Duration;

use crate::outbox::{Dispatch, Method, PendingMutation};

/// Talks to a running tracker server
pub struct TrackerClient {
    client: Client,
    base_url: String,
}

impl TrackerClient {
    pub fn new(base_url: &str, user_agent: &str, timeout_secs: u64) -> Result<Self> {
        let client = Self::build_client(user_agent, timeout_secs)?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Sends one mutation; any non-2xx status is an error
    pub async fn send(&self, method: Method, path: &str, body: &Value) -> Result<Value> {
        let url = self.build_url(path);
        let mut request = self.client.request(Self::http_method(method), &url);
        if !body.is_null() {
            request = request.json(body);
        }

        let response = request
            .send()
            .await
            .with_context(|| format!("Failed to send {:?} request to {}", method, url))?;

        if !response.status().is_success() {
            anyhow::bail!("Server returned status {} for {}", response.status(), url);
        }

        let text = response.text().await.context("Failed to read response body")?;
        if text.is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse response from {}", url))
    }

    fn build_client(user_agent: &str, timeout_secs: u64) -> Result<Client> {
        Client::builder()
            .user_agent(user_agent)
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .context("Failed to build HTTP client")
    }

    fn build_url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn http_method(method: Method) -> HttpMethod {
        match method {
            Method::Post => HttpMethod::POST,
            Method::Put => HttpMethod::PUT,
            Method::Delete => HttpMethod::DELETE,
        }
    }
}

impl Dispatch for TrackerClient {
    async fn dispatch(&self, mutation: &PendingMutation) -> Result<()> {
        self.send(mutation.method, &mutation.path, &mutation.body)
            .await
            .map(|_| ())
    }
}
