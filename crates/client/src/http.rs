//! HTTP transport for the VivoPass REST API

use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::error::{ClientError, Result};

/// Shared REST client bound to one backend origin
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(ClientError::Connection)?;
        Ok(Self {
            client,
            base_url: config.api_url.trim_end_matches('/').to_string(),
        })
    }

    /// Client with default settings against `base_url`
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorize(builder: RequestBuilder, token: Option<&str>) -> RequestBuilder {
        match token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    pub async fn get_json<T: DeserializeOwned>(&self, path: &str, token: Option<&str>) -> Result<T> {
        let builder = Self::authorize(self.client.get(self.url(path)), token);
        let resp = self.send("GET", path, builder).await?;
        Self::decode(resp).await
    }

    pub async fn post_json<B, T>(&self, path: &str, token: Option<&str>, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let builder = Self::authorize(self.client.post(self.url(path)), token).json(body);
        let resp = self.send("POST", path, builder).await?;
        Self::decode(resp).await
    }

    pub async fn put_json<B, T>(&self, path: &str, token: Option<&str>, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let builder = Self::authorize(self.client.put(self.url(path)), token).json(body);
        let resp = self.send("PUT", path, builder).await?;
        Self::decode(resp).await
    }

    /// POST returning the raw body text
    pub async fn post_text<B>(&self, path: &str, token: Option<&str>, body: &B) -> Result<String>
    where
        B: Serialize + ?Sized,
    {
        let builder = Self::authorize(self.client.post(self.url(path)), token).json(body);
        let resp = self.send("POST", path, builder).await?;
        Ok(resp.text().await?)
    }

    async fn send(&self, method: &str, path: &str, builder: RequestBuilder) -> Result<Response> {
        debug!("{} {}", method, path);
        let resp = builder.send().await.map_err(|e| {
            warn!("{} {} failed: {}", method, path, e);
            ClientError::Connection(e)
        })?;

        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }

        let body = resp.text().await.unwrap_or_default();
        let err = ClientError::from_response(status.as_u16(), &body);
        debug!("{} {} returned {}: {}", method, path, status, err);
        Err(err)
    }

    /// Empty bodies decode as JSON `null`, so `()` and `Option<T>` work.
    async fn decode<T: DeserializeOwned>(resp: Response) -> Result<T> {
        let text = resp.text().await?;
        let text = if text.trim().is_empty() { "null" } else { text.as_str() };
        serde_json::from_str(text).map_err(|e| ClientError::Decode {
            message: e.to_string(),
        })
    }
}
