use async_trait::async_trait;
use configs::FetchConfig;
use reqwest::{Client, Url};
use tracing::debug;

use crate::fetch::{Fetch, FetchError, FetchResponse};

/// reqwest-backed fetch collaborator.
///
/// Absolute locations are requested as-is; relative ones (`settings.json`)
/// are joined onto `FetchConfig::base_url`.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    base_url: Option<Url>,
}

impl HttpFetcher {
    pub fn new(cfg: &FetchConfig) -> Result<Self, FetchError> {
        let client = Client::builder()
            .connect_timeout(cfg.connect_timeout())
            .timeout(cfg.request_timeout())
            .user_agent(cfg.user_agent.clone())
            .build()
            .map_err(|e| FetchError::Client(e.to_string()))?;
        let base_url = cfg
            .base_url
            .as_deref()
            .map(Url::parse)
            .transpose()
            .map_err(|e| FetchError::Client(format!("invalid base_url: {e}")))?;
        Ok(Self { client, base_url })
    }

    /// Turn a location into the URL that will be requested.
    pub fn resolve(&self, location: &str) -> Result<Url, FetchError> {
        if let Ok(url) = Url::parse(location) {
            return Ok(url);
        }
        match &self.base_url {
            Some(base) => base
                .join(location)
                .map_err(|e| FetchError::Transport(format!("cannot resolve {location} against {base}: {e}"))),
            None => Err(FetchError::Transport(format!("relative location {location} requires a base_url"))),
        }
    }
}

#[async_trait]
impl Fetch for HttpFetcher {
    async fn get(&self, location: &str) -> Result<FetchResponse, FetchError> {
        let url = self.resolve(location)?;
        debug!(%url, "GET configuration document");
        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;
        let status = resp.status().as_u16();
        let body = resp.bytes().await.map(|b| b.to_vec());
        settle(status, body)
    }
}

/// Combine a received status with the outcome of reading the body. A failed
/// status is reported even when its body could not be read.
fn settle<E: std::fmt::Display>(status: u16, body: Result<Vec<u8>, E>) -> Result<FetchResponse, FetchError> {
    match body {
        Ok(body) => Ok(FetchResponse { status, body }),
        Err(e) => {
            let response = FetchResponse::new(status, Vec::<u8>::new());
            if response.is_success() {
                return Err(FetchError::Transport(format!("reading body failed: {e}")));
            }
            debug!(status, error = %e, "discarding unreadable body of failed response");
            Ok(response)
        }
    }
}
