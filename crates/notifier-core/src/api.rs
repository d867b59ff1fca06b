//! Blocking-per-cycle client for the live streams endpoint.
//!
//! One `GET {base_url}/streams?channel=a,b,c` per call. The body is read as
//! text and parsed separately so transport failures and malformed documents
//! surface as different errors.

use reqwest::Client;
use tracing::debug;

use crate::config::ApiConfig;
use crate::stream::{parse_streams, StreamRecord};
use crate::Result;

#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    streams_url: String,
}

impl ApiClient {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(config.request_timeout())
            .build()?;
        Ok(Self {
            client,
            streams_url: format!("{}/streams", config.base_url.trim_end_matches('/')),
        })
    }

    pub fn streams_url(&self) -> &str {
        &self.streams_url
    }

    /// Live streams among `channels`. Offline channels are simply absent.
    pub async fn fetch_streams(&self, channels: &[String]) -> Result<Vec<StreamRecord>> {
        let filter = channels.join(",");
        debug!("GET {} channel={}", self.streams_url, filter);

        let body = self
            .client
            .get(&self.streams_url)
            .query(&[("channel", filter.as_str())])
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        let records = parse_streams(&body)?;
        debug!("{} of {} channels live", records.len(), channels.len());
        Ok(records)
    }
}
