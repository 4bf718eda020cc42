use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use url::Url;

use super::{DataSource, LoadError};

/// Fetches resources relative to a base URL.
pub struct HttpSource {
    client: Client,
    base: Url,
}

impl HttpSource {
    pub fn new(base: &str, timeout_secs: u64) -> anyhow::Result<Self> {
        // a base without a trailing slash would drop its last segment on join
        let base = if base.ends_with('/') {
            Url::parse(base)?
        } else {
            Url::parse(&format!("{}/", base))?
        };
        Ok(Self {
            client: Client::builder()
                .timeout(Duration::from_secs(timeout_secs))
                .build()
                .unwrap_or_else(|_| Client::new()),
            base,
        })
    }

    pub fn resolve(&self, name: &str) -> Result<Url, LoadError> {
        self.base.join(name).map_err(|e| LoadError::Fetch {
            resource: name.to_string(),
            reason: e.to_string(),
        })
    }
}

#[async_trait]
impl DataSource for HttpSource {
    async fn load_bytes(&self, name: &str) -> Result<Vec<u8>, LoadError> {
        let url = self.resolve(name)?;
        let fetch_err = |e: reqwest::Error| LoadError::Fetch {
            resource: url.to_string(),
            reason: e.to_string(),
        };
        let resp = self.client.get(url.clone()).send().await.map_err(fetch_err)?;
        let status = resp.status();
        if !status.is_success() {
            return Err(LoadError::Status {
                resource: url.to_string(),
                status: status.as_u16(),
            });
        }
        let body = resp.bytes().await.map_err(fetch_err)?;
        Ok(body.to_vec())
    }
}
