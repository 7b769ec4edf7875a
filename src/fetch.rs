use crate::config::Config;
use crate::convert::ConvertError;

const USER_AGENT: &str = "page-docx/0.1";

/// Client for the hosted scraping proxy. Built once from [`Config`] and
/// shared read-only by every request.
#[derive(Clone)]
pub struct ScraperClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
}

impl ScraperClient {
    pub fn new(config: &Config) -> Result<Self, ConvertError> {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::ACCEPT,
            reqwest::header::HeaderValue::from_static(
                "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
            ),
        );

        let http = reqwest::ClientBuilder::new()
            .timeout(config.timeout)
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .build()
            .map_err(|e| ConvertError::Request(e.to_string()))?;

        Ok(Self {
            http,
            endpoint: config.api_url.clone(),
            api_key: config.api_key.clone(),
        })
    }

    /// One GET through the proxy. No retry: the first failure is returned.
    pub async fn fetch_html(&self, url: &str) -> Result<String, ConvertError> {
        let api_key = self.api_key.as_deref().ok_or(ConvertError::MissingApiKey)?;

        let response = self
            .http
            .get(&self.endpoint)
            .query(&[("api_key", api_key), ("url", url)])
            .send()
            .await
            .map_err(|e| {
                // Strip the query so the key never lands in messages or logs.
                let e = e.without_url();
                if e.is_timeout() {
                    ConvertError::Request(format!("TimeoutError: {}", e))
                } else if e.is_connect() {
                    ConvertError::Request(format!("ConnectError: {}", e))
                } else {
                    ConvertError::Request(format!("RequestError: {}", e))
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(%status, "scraping proxy returned an error");
            return Err(ConvertError::Upstream(status));
        }

        let body = response
            .text()
            .await
            .map_err(|e| ConvertError::Request(e.without_url().to_string()))?;
        tracing::debug!(bytes = body.len(), "fetched page");
        Ok(body)
    }
}
