use std::future::Future;

use anyhow::Result;

use log::{debug, warn};

use crate::{
    config::Config,
    error::HolidayError,
    holiday::HolidayDataset,
};

/// Somewhere a fresh [`HolidayDataset`] can be had from
pub trait HolidaySource {
    /// # Errors
    /// Returns `DataSourceUnavailable` if the data cannot be retrieved or understood
    fn fetch(&self) -> impl Future<Output = Result<HolidayDataset, HolidayError>> + Send;
}

/// Fetches the bank holiday feed over HTTP on every call
#[derive(Clone, Debug)]
pub struct GovUkFetcher {
    client: reqwest::Client,
    url:    String,
}

impl GovUkFetcher {
    /// # Errors
    /// Returns an error if the HTTP client cannot be built
    pub fn new(config: &Config) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.fetch_timeout())
            .build()?;

        Ok(Self {
            client,
            url: config.endpoint_url.clone(),
        })
    }

    #[must_use] pub fn url(&self) -> &str {
        &self.url
    }

    async fn fetch_body(&self) -> Result<String, reqwest::Error> {
        self.client.get(&self.url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await
    }
}

impl HolidaySource for GovUkFetcher {
    async fn fetch(&self) -> Result<HolidayDataset, HolidayError> {
        debug!("event=fetch_start url={}", self.url);

        let body = self.fetch_body()
            .await
            .map_err(|err| {
                warn!("event=fetch_failed url={} timeout={} error={err}", self.url, err.is_timeout());
                HolidayError::data_source(err)
            })?;

        let dataset = HolidayDataset::from_json(&body)
            .map_err(|err| {
                warn!("event=fetch_failed url={} error={err}", self.url);
                err
            })?;

        debug!("event=fetch_done url={} regions={}", self.url, dataset.regions().count());

        Ok(dataset)
    }
}
