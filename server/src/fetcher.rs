//! Retrieval of the published RFC documents.
use std::future::Future;

use cipherdir::{
    constants::DEFAULT_RFC_HOST,
    rfc::{rfc_url, RfcNumber},
};

use crate::error::Error;

/// A published RFC page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedDocument {
    /// Where the document was retrieved from.
    pub url: String,
    pub body: String,
}

/// Somewhere RFC documents can be retrieved from.
pub trait DocumentSource: Send + Sync {
    /// Retrieves the HTML rendition of an RFC. A non-success
    /// response is an [`Error::UpstreamFetchError`].
    fn fetch(
        &self,
        number: RfcNumber,
    ) -> impl Future<Output = Result<FetchedDocument, Error>> + Send;
}

/// Fetches documents over HTTP from an RFC mirror, `https://tools.ietf.org` by default.
///
/// There is no timeout and no retry: a request runs to completion or fails.
#[derive(Debug, Clone)]
pub struct IetfSource {
    client: reqwest::Client,
    host: String,
}

impl Default for IetfSource {
    fn default() -> Self {
        Self::new(DEFAULT_RFC_HOST)
    }
}

impl IetfSource {
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            host: host.into(),
        }
    }

    pub fn host(&self) -> &str {
        &self.host
    }
}

impl DocumentSource for IetfSource {
    #[tracing::instrument(skip(self))]
    async fn fetch(&self, number: RfcNumber) -> Result<FetchedDocument, Error> {
        let url = rfc_url(&self.host, number);
        tracing::debug!("Fetching {url}");

        let response = self.client.get(&url).send().await?;
        let status = response.status();

        if !status.is_success() {
            tracing::warn!("{url} answered {status}");
            return Err(Error::UpstreamFetchError {
                url,
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;

        Ok(FetchedDocument { url, body })
    }
}

/// Serves pages from memory; unknown RFCs answer 404.
#[cfg(test)]
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    pages: std::collections::HashMap<RfcNumber, String>,
}

#[cfg(test)]
impl StaticSource {
    pub fn with_page(mut self, number: u32, body: &str) -> Self {
        let number = RfcNumber::new(number).expect("valid number");
        self.pages.insert(number, body.to_string());
        self
    }
}

#[cfg(test)]
impl DocumentSource for StaticSource {
    async fn fetch(&self, number: RfcNumber) -> Result<FetchedDocument, Error> {
        let url = rfc_url("https://rfc.test", number);

        match self.pages.get(&number) {
            Some(body) => Ok(FetchedDocument {
                url,
                body: body.clone(),
            }),
            None => Err(Error::UpstreamFetchError { url, status: 404 }),
        }
    }
}
