//! XSEDE usage API client.

use reqwest::Method;
use serde_json::Value;
use time::Date;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use tracing::info;
use usage::{DEFAULT_CHUNK_SIZE, UsageMessage, UsageResponse, UsageStatus};

use crate::config::AmieConfig;
use crate::http::Api;
use crate::ClientError;

const STATUS_DATE: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

pub struct UsageClient {
    api: Api,
}

impl UsageClient {
    /// Client for `site_name` against the production usage endpoint.
    ///
    /// # Errors
    ///
    /// [`ClientError::InvalidHeader`] when the site name or key is not a valid
    /// header value, [`ClientError::Http`] when the HTTP client cannot be built.
    pub fn new(site_name: &str, api_key: &str) -> Result<Self, ClientError> {
        Self::from_config(&AmieConfig::new(site_name, api_key))
    }

    /// # Errors
    ///
    /// Same as [`UsageClient::new`].
    pub fn from_config(config: &AmieConfig) -> Result<Self, ClientError> {
        let api = Api::new(&config.usage_url, &config.site_name, &config.api_key, config.timeouts)?;
        Ok(Self { api })
    }

    /// Base URL, always ending with `/`.
    #[must_use]
    pub fn usage_url(&self) -> &str {
        self.api.base_url()
    }

    /// Post a usage message in chunks of at most 1000 records, one response
    /// per chunk in order. Stops at the first failed chunk; earlier chunks
    /// stay posted.
    ///
    /// # Errors
    ///
    /// Transport/response errors of the failing chunk, or
    /// [`ClientError::Json`] when a response is not a usage response.
    pub async fn send(&self, message: &UsageMessage) -> Result<Vec<UsageResponse>, ClientError> {
        let mut responses = Vec::new();
        for chunk in message.chunked(DEFAULT_CHUNK_SIZE) {
            let body = chunk.as_dict()?;
            let text = self.api.call(Method::POST, &["usage", ""], &[], Some(&body)).await?;
            let response: UsageResponse = serde_json::from_str(&text)?;
            info!(
                usage_type = %chunk.usage_type(),
                records = chunk.len(),
                failed = response.validation_failed_records.len(),
                "usage chunk posted"
            );
            responses.push(response);
        }
        Ok(responses)
    }

    /// Load summary between two dates, either end open.
    ///
    /// # Errors
    ///
    /// Transport/response errors, or [`ClientError::Json`] when the body is
    /// not a status document.
    pub async fn status(&self, from: Option<Date>, to: Option<Date>) -> Result<UsageStatus, ClientError> {
        let mut query = Vec::new();
        if let Some(from) = from {
            query.push(("FromDate", from.format(STATUS_DATE)?));
        }
        if let Some(to) = to {
            query.push(("ToDate", to.format(STATUS_DATE)?));
        }
        let text = self.api.call(Method::GET, &["usage", "status"], &query, None).await?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Records the usage API rejected and still holds.
    ///
    /// # Errors
    ///
    /// Same as [`UsageClient::status`].
    pub async fn failed_records(&self) -> Result<UsageResponse, ClientError> {
        let text = self.api.call(Method::GET, &["usage", "failed"], &[], None).await?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Drop the given failed records from the usage API's failure list,
    /// usually after fixing and resending them.
    ///
    /// # Errors
    ///
    /// Transport/response errors.
    pub async fn clear_failed_records(&self, failed: &UsageResponse) -> Result<(), ClientError> {
        let body: Value = serde_json::to_value(failed)?;
        self.api.call(Method::DELETE, &["usage", "failed"], &[], Some(&body)).await?;
        info!(records = failed.validation_failed_records.len(), "failed usage records cleared");
        Ok(())
    }
}

#[cfg(test)]
#[path = "usage_client_test.rs"]
mod tests;
