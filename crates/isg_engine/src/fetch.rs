use futures_util::StreamExt;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use reqwest::Url;
use tokio_util::sync::CancellationToken;

use crate::{decode_html, EngineError, EngineSettings, FailureKind, FetchError};

/// One decoded ISG page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedPage {
    pub url: String,
    pub html: String,
    pub encoding_label: String,
}

#[async_trait::async_trait]
pub trait Fetcher: Send + Sync {
    /// Fetches `path` relative to the appliance base URL. Returns
    /// `FailureKind::Cancelled` as soon as `cancel` fires.
    async fn fetch(&self, path: &str, cancel: &CancellationToken)
        -> Result<FetchedPage, FetchError>;
}

/// Single-attempt HTTP fetcher. No retries and no per-request timeout; the
/// scrape cycle deadline cancels it instead.
#[derive(Debug, Clone)]
pub struct ReqwestFetcher {
    client: reqwest::Client,
    base_url: Url,
    max_bytes: u64,
}

impl ReqwestFetcher {
    pub fn new(settings: &EngineSettings) -> Result<Self, EngineError> {
        let base_url = Url::parse(&settings.base_url).map_err(|err| EngineError::InvalidUrl {
            url: settings.base_url.clone(),
            message: err.to_string(),
        })?;

        let client = reqwest::Client::builder()
            .default_headers(header_map(&settings.headers)?)
            .build()
            .map_err(|err| EngineError::Client(err.to_string()))?;

        Ok(Self {
            client,
            base_url,
            max_bytes: settings.max_bytes,
        })
    }

    pub fn page_url(&self, path: &str) -> Result<Url, FetchError> {
        self.base_url
            .join(path)
            .map_err(|err| FetchError::new(FailureKind::InvalidUrl, err.to_string()))
    }

    async fn download(&self, url: Url) -> Result<FetchedPage, FetchError> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        if let Some(content_len) = response.content_length() {
            if content_len > self.max_bytes {
                return Err(self.too_large(Some(content_len)));
            }
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.to_string());

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > self.max_bytes {
                return Err(self.too_large(Some(next_len)));
            }
            bytes.extend_from_slice(&chunk);
        }

        let decoded = decode_html(&bytes, content_type.as_deref()).map_err(|err| {
            let encoding = match &err {
                crate::DecodeError::Malformed { encoding } => encoding.clone(),
            };
            FetchError::new(FailureKind::Decode { encoding }, err.to_string())
        })?;

        Ok(FetchedPage {
            url: url.to_string(),
            html: decoded.html,
            encoding_label: decoded.encoding_label,
        })
    }

    fn too_large(&self, actual: Option<u64>) -> FetchError {
        FetchError::new(
            FailureKind::TooLarge {
                max_bytes: self.max_bytes,
                actual,
            },
            "response too large",
        )
    }
}

#[async_trait::async_trait]
impl Fetcher for ReqwestFetcher {
    async fn fetch(
        &self,
        path: &str,
        cancel: &CancellationToken,
    ) -> Result<FetchedPage, FetchError> {
        let url = self.page_url(path)?;
        tokio::select! {
            _ = cancel.cancelled() => Err(FetchError::new(
                FailureKind::Cancelled,
                format!("request to {url} cancelled"),
            )),
            result = self.download(url.clone()) => result,
        }
    }
}

fn header_map(headers: &[(String, String)]) -> Result<HeaderMap, EngineError> {
    let mut map = HeaderMap::with_capacity(headers.len());
    for (name, value) in headers {
        let header_name =
            HeaderName::from_bytes(name.as_bytes()).map_err(|err| EngineError::InvalidHeader {
                name: name.clone(),
                message: err.to_string(),
            })?;
        let header_value = HeaderValue::from_str(value).map_err(|err| EngineError::InvalidHeader {
            name: name.clone(),
            message: err.to_string(),
        })?;
        map.insert(header_name, header_value);
    }
    Ok(map)
}

fn map_reqwest_error(err: reqwest::Error) -> FetchError {
    FetchError::new(FailureKind::Network, err.to_string())
}
