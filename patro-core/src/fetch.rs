//! Single-attempt month page download.
//!
//! Retrying lives in [`crate::retry`]; a fetcher makes exactly one request
//! per call.

use std::future::Future;
use std::time::Duration;

use reqwest::StatusCode;

use crate::config::PatroConfig;
use crate::constants::VIEW_ACTION;
use crate::error::{PatroError, PatroResult};

/// Source of raw month pages.
pub trait Fetcher {
    fn fetch(&self, year: u16, month: u8) -> impl Future<Output = PatroResult<String>> + Send;
}

/// Posts the calendar form to the upstream site.
///
/// Holds one `reqwest::Client` so the connection pool is reused for the
/// whole multi-year run.
#[derive(Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpFetcher {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> PatroResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("patro/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(HttpFetcher {
            client,
            endpoint: endpoint.into(),
        })
    }

    pub fn from_config(config: &PatroConfig) -> PatroResult<Self> {
        Self::new(config.endpoint.clone(), config.request_timeout())
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl Fetcher for HttpFetcher {
    async fn fetch(&self, year: u16, month: u8) -> PatroResult<String> {
        let form = [
            ("selYear", year.to_string()),
            ("selMonth", month.to_string()),
            (VIEW_ACTION.0, VIEW_ACTION.1.to_string()),
        ];

        tracing::debug!(endpoint = %self.endpoint, year, month, "posting calendar form");

        let resp = self.client.post(&self.endpoint).form(&form).send().await?;

        if resp.status() != StatusCode::OK {
            return Err(PatroError::Http(resp.status().as_u16()));
        }

        let body = resp.text().await?;
        tracing::debug!(year, month, bytes = body.len(), "received calendar page");

        Ok(body)
    }
}
