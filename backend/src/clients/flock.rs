use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client;
use tracing::{debug, instrument};

use crate::clients::errors::ClientError;
use crate::clients::types::FlockInfo;

#[async_trait]
pub trait FlockDirectory: Send + Sync {
    async fn find_flock_by_id(&self, flock_id: i64) -> Result<Option<FlockInfo>, ClientError>;
}

#[derive(Clone)]
pub struct HttpFlockClient {
    http: Client,
    url: String,
}

impl HttpFlockClient {
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
impl FlockDirectory for HttpFlockClient {
    #[instrument(skip(self), level = "debug")]
    async fn find_flock_by_id(&self, flock_id: i64) -> Result<Option<FlockInfo>, ClientError> {
        let resp = self.http.get(&self.url).send().await?.error_for_status()?;

        let flocks: Vec<FlockInfo> = resp.json().await?;

        // A flock that has not arrived yet has no feeding periods; treat it
        // as absent rather than starting its schedule in the future.
        let today = Utc::now().date_naive();
        let found = flocks
            .into_iter()
            .find(|f| f.id == flock_id && f.arrival_date <= today);

        debug!(found = found.is_some(), "flock lookup completed");

        Ok(found)
    }
}
