//! Authenticated JSON transport shared by the packet and usage clients.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{Method, Url};
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::{Timeouts, with_trailing_slash};
use crate::ClientError;

/// `XA-API-KEY` and `XA-SITE`, lowercased as static header names must be.
pub const API_KEY_HEADER: &str = "xa-api-key";
pub const SITE_HEADER: &str = "xa-site";

pub(crate) struct Api {
    http: reqwest::Client,
    base_url: Url,
}

impl Api {
    pub(crate) fn new(base_url: &str, site_name: &str, api_key: &str, timeouts: Timeouts) -> Result<Self, ClientError> {
        let mut key = HeaderValue::from_str(api_key)?;
        key.set_sensitive(true);
        let mut headers = HeaderMap::new();
        headers.insert(API_KEY_HEADER, key);
        headers.insert(SITE_HEADER, HeaderValue::from_str(site_name)?);

        let base_url = Url::parse(&with_trailing_slash(base_url))
            .map_err(|e| ClientError::ConfigParse(format!("invalid base URL {base_url}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::ConfigParse(format!("invalid base URL {base_url}: not a base")));
        }

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(timeouts.request_secs))
            .connect_timeout(Duration::from_secs(timeouts.connect_secs))
            .build()?;
        Ok(Self { http, base_url })
    }

    pub(crate) fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    /// `{base_url}` plus `segments`, each percent-encoded as one path segment.
    /// An empty last segment leaves a trailing `/`.
    pub(crate) fn url(&self, segments: &[&str]) -> Result<Url, ClientError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| ClientError::ConfigParse(format!("invalid base URL {}: not a base", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Issue one request against [`Api::url`] and return the body of a 2xx
    /// response.
    pub(crate) async fn call(
        &self,
        method: Method,
        segments: &[&str],
        query: &[(&str, String)],
        body: Option<&Value>,
    ) -> Result<String, ClientError> {
        let url = self.url(segments)?;
        debug!(%method, %url, "amie request");

        let mut request = self.http.request(method.clone(), url.clone());
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status().as_u16();
        let text = response.text().await?;
        if !(200..300).contains(&status) {
            warn!(%method, %url, status, "amie request rejected");
            return Err(ClientError::ApiResponse { status, body: text });
        }
        Ok(text)
    }
}

/// Parse a JSON body, treating an empty body as `null`.
pub(crate) fn parse_json(text: &str) -> Result<Value, ClientError> {
    if text.trim().is_empty() {
        return Ok(Value::Null);
    }
    Ok(serde_json::from_str(text)?)
}
