//! `reqwest`-backed transport.

use super::{Transport, TransportRequest, TransportResponse};
use crate::framework::error::TransportError;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use reqwest::Client;
use std::collections::HashMap;
use tracing::{debug, warn};
use url::Url;

/// Sends requests to one backend origin over HTTP.
///
/// Request URLs produced by the dispatcher are absolute paths
/// (`/qfx-api/v1/...`); they are appended to `base_url`, so a base with a path
/// component (`http://host/app`) keeps it.
#[derive(Clone, Debug)]
pub struct HttpTransport {
    client: Client,
    base_url: Url,
}

impl HttpTransport {
    pub fn new(base_url: &str) -> Result<Self, TransportError> {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: &str) -> Result<Self, TransportError> {
        let base_url = Url::parse(base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(TransportError::InvalidUrl {
                message: format!("{base_url} cannot be used as a base URL"),
            });
        }
        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn resolve(&self, path: &str) -> Result<Url, TransportError> {
        let base = self.base_url.as_str().trim_end_matches('/');
        let path = path.trim_start_matches('/');
        Ok(Url::parse(&format!("{base}/{path}"))?)
    }

    fn header_map(headers: &HashMap<String, String>) -> Result<HeaderMap, TransportError> {
        let mut map = HeaderMap::with_capacity(headers.len());
        for (name, value) in headers {
            map.insert(
                HeaderName::from_bytes(name.as_bytes())?,
                HeaderValue::from_str(value)?,
            );
        }
        Ok(map)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse, TransportError> {
        let url = self.resolve(&request.url)?;
        let headers = Self::header_map(&request.headers)?;
        let has_content_type = headers.contains_key(CONTENT_TYPE);

        debug!(method = %request.method, %url, "Sending request");
        let mut builder = self.client.request(request.method.into(), url).headers(headers);

        if let Some(query) = request.options.get("query") {
            let query: HashMap<String, String> = serde_json::from_value(query.clone())?;
            builder = builder.query(&query);
        }

        if let Some(body) = request.body {
            if !has_content_type {
                builder = builder.header(CONTENT_TYPE, "application/json");
            }
            builder = builder.body(body);
        }

        let response = builder.send().await.map_err(|e| {
            warn!(error = %e, "Request failed");
            TransportError::from(e)
        })?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        debug!(status, bytes = body.len(), "Received response");

        Ok(TransportResponse { status, body })
    }
}
