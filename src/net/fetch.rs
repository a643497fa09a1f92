use std::time::Duration;

use url::Url;

use crate::error::FetchError;

/// Source of raw text documents (manifest, article sources).
///
/// Called from worker threads, never from the UI thread.
pub trait Fetcher: Send + Sync {
    fn fetch(&self, url: &Url) -> Result<String, FetchError>;
}

/// Blocking HTTP fetcher.
pub struct HttpFetcher {
    client: reqwest::blocking::Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self, FetchError> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("folio-view/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(15))
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()
            .map_err(|e| FetchError::Client(e.to_string()))?;
        Ok(Self { client })
    }
}

impl Fetcher for HttpFetcher {
    fn fetch(&self, url: &Url) -> Result<String, FetchError> {
        let response = self
            .client
            .get(url.as_str())
            .header("Accept", "text/markdown,application/json,text/plain;q=0.9,*/*;q=0.8")
            .send()
            .map_err(|e| FetchError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                url: response.url().to_string(),
            });
        }

        response.text().map_err(|e| FetchError::Body(e.to_string()))
    }
}
