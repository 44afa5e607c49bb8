use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, instrument};

use crate::clients::errors::ClientError;
use crate::clients::types::FeedInfo;

#[async_trait]
pub trait FeedDirectory: Send + Sync {
    async fn find_feed_by_id(&self, feed_id: i64) -> Result<Option<FeedInfo>, ClientError>;
}

#[derive(Clone)]
pub struct HttpFeedClient {
    http: Client,
    url: String,
}

impl HttpFeedClient {
    pub fn new(url: String, timeout: Duration) -> Result<Self, ClientError> {
        let http = Client::builder()
            .timeout(timeout)
            .pool_idle_timeout(Duration::from_secs(30))
            .tcp_keepalive(Duration::from_secs(30))
            .build()?;

        Ok(Self { http, url })
    }
}

#[async_trait]
impl FeedDirectory for HttpFeedClient {
    #[instrument(skip(self), level = "debug")]
    async fn find_feed_by_id(&self, feed_id: i64) -> Result<Option<FeedInfo>, ClientError> {
        let resp = self.http.get(&self.url).send().await?.error_for_status()?;

        // The feed service only exposes a listing endpoint.
        let feeds: Vec<FeedInfo> = resp.json().await?;
        let found = feeds.into_iter().find(|f| f.id == feed_id);

        debug!(found = found.is_some(), "feed lookup completed");

        Ok(found)
    }
}
