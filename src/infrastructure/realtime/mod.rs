//! HTTP client for the realtime fan-out service, with retry behavior
//! drawn from `RetryExecutor` (`src/retry.rs`).

use crate::application::common::realtime_client::{Command, RealtimeClient, RealtimeError};
use crate::retry::{RetryConfig, RetryExecutor};
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;

const PER_ATTEMPT_TIMEOUT: Duration = Duration::from_secs(30);

pub struct HttpRealtimeClient {
    http: Client,
    base_url: String,
    api_key: String,
    retry: RetryExecutor,
}

impl HttpRealtimeClient {
    pub fn new(base_url: String, api_key: String) -> anyhow::Result<Self> {
        let http = Client::builder().timeout(PER_ATTEMPT_TIMEOUT).build()?;
        Ok(Self {
            http,
            base_url,
            api_key,
            retry: RetryExecutor::new(RetryConfig::realtime()),
        })
    }

    async fn post<T: Serialize + Sync>(&self, path: &str, body: &T) -> Result<(), RealtimeError> {
        let url = format!("{}{path}", self.base_url.trim_end_matches('/'));
        self.retry
            .execute("realtime_fan_out", || async {
                self.http
                    .post(&url)
                    .header("X-API-Key", &self.api_key)
                    .json(body)
                    .send()
                    .await
                    .map_err(|e| RealtimeError::Transport(e.into()))?
                    .error_for_status()
                    .map_err(|e| RealtimeError::Transport(e.into()))?;
                Ok(())
            })
            .await
    }
}

#[derive(Serialize)]
struct PublishBody<'a> {
    channel: &'a str,
    data: &'a Value,
}

#[derive(Serialize)]
struct BatchBody {
    commands: Vec<Command>,
    parallel: bool,
}

#[async_trait::async_trait]
impl RealtimeClient for HttpRealtimeClient {
    async fn publish(&self, channel: &str, data: &Value) -> Result<(), RealtimeError> {
        self.post("/publish", &PublishBody { channel, data }).await
    }

    async fn batch(&self, commands: Vec<Command>, parallel: bool) -> Result<(), RealtimeError> {
        if commands.is_empty() {
            return Ok(());
        }
        self.post("/batch", &BatchBody { commands, parallel }).await
    }
}
