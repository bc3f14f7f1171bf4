//! HTTP client for the PokeAPI crawl.
//!
//! Every call makes exactly one attempt. Failures are logged and returned as
//! `None`; nothing is retried and nothing propagates past this module, so a
//! caller only has to decide what "no data" means for its unit of work.

use crate::config::HarvestConfig;
use crate::errors::{FetchError, FetchResult, HarvestResult};
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

pub struct ApiClient {
    client: Client,
}

impl ApiClient {
    pub fn new(config: &HarvestConfig) -> HarvestResult<Self> {
        let mut builder = Client::builder().user_agent(config.user_agent.clone());
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
        })
    }

    /// GET `url` and decode the JSON body as `T`.
    pub async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Option<T> {
        match self.try_get_json(url).await {
            Ok(value) => Some(value),
            Err(err) => {
                warn!(%url, error = %err, "fetch failed");
                None
            }
        }
    }

    /// GET `url` and return the raw body.
    pub async fn get_bytes(&self, url: &str) -> Option<Vec<u8>> {
        match self.try_get_bytes(url).await {
            Ok(bytes) => Some(bytes),
            Err(err) => {
                warn!(%url, error = %err, "download failed");
                None
            }
        }
    }

    async fn send(&self, url: &str) -> FetchResult<reqwest::Response> {
        debug!(%url, "GET");
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(FetchError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }
        Ok(response)
    }

    async fn try_get_json<T: DeserializeOwned>(&self, url: &str) -> FetchResult<T> {
        self.send(url).await?.json::<T>().await.map_err(|e| {
            if e.is_decode() {
                FetchError::Decode(e.to_string())
            } else {
                FetchError::Transport(e)
            }
        })
    }

    async fn try_get_bytes(&self, url: &str) -> FetchResult<Vec<u8>> {
        let body = self
            .send(url)
            .await?
            .bytes()
            .await
            .map_err(FetchError::Transport)?;
        Ok(body.to_vec())
    }
}
