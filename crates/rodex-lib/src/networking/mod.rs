use reqwest::Client;
use reqwest::header::{COOKIE, HeaderValue, USER_AGENT};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, trace};

mod credentials;
pub use credentials::SessionCredentials;

const CSRF_HEADER: &str = "x-csrf-token";
const CLIENT_USER_AGENT: &str = concat!("rodex/", env!("CARGO_PKG_VERSION"));

/// Networking errors for upstream API communication
#[derive(Debug, Error)]
pub enum NetworkingError {
    #[error("HTTP request failed: {source}")]
    RequestFailed {
        #[from]
        source: reqwest::Error,
    },

    #[error("Upstream returned HTTP {status} for {url}")]
    HttpStatus { status: u16, url: String },

    #[error("Invalid timeout: {seconds}s (must be > 0)")]
    InvalidTimeout { seconds: u64 },

    #[error("Invalid credential header value for {header}")]
    InvalidCredential { header: &'static str },
}

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct NetworkingConfig {
    /// HTTP client timeout in seconds, applied to every request
    pub timeout_seconds: u64,
    /// Trace every request URL and response size (log level 4)
    pub trace_requests: bool,
}

impl Default for NetworkingConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: 30,
            trace_requests: false,
        }
    }
}

/// Owns the shared HTTP client used by every upstream call
pub struct NetworkingManager {
    client: Client,
    config: NetworkingConfig,
}

impl NetworkingManager {
    /// Build the shared client with the configured per-request timeout
    pub fn new(config: NetworkingConfig) -> Result<Self, NetworkingError> {
        trace!("Initializing networking manager");

        if config.timeout_seconds == 0 {
            return Err(NetworkingError::InvalidTimeout {
                seconds: config.timeout_seconds,
            });
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        trace!(
            "Networking manager initialized with {}s timeout",
            config.timeout_seconds
        );

        Ok(Self { client, config })
    }

    /// GET `url` with the session credentials attached, returning the raw body.
    ///
    /// Non-2xx statuses are errors; decoding is left to the caller so that
    /// malformed bodies can be handled per endpoint.
    pub async fn get_bytes(
        &self,
        url: &str,
        credentials: &SessionCredentials,
    ) -> Result<Vec<u8>, NetworkingError> {
        if self.config.trace_requests {
            trace!(url, authenticated = credentials.is_authenticated(), "GET");
        }

        let mut request = self
            .client
            .get(url)
            .header(USER_AGENT, CLIENT_USER_AGENT);

        if let Some(cookie) = credentials.cookie_header() {
            let value = HeaderValue::from_str(&cookie)
                .map_err(|_| NetworkingError::InvalidCredential { header: "cookie" })?;
            request = request.header(COOKIE, value);
        }

        if let Some(token) = credentials.csrf_token() {
            let value = HeaderValue::from_str(token).map_err(|_| {
                NetworkingError::InvalidCredential {
                    header: CSRF_HEADER,
                }
            })?;
            request = request.header(CSRF_HEADER, value);
        }

        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            debug!(url, status = status.as_u16(), "Upstream rejected request");
            return Err(NetworkingError::HttpStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let bytes = response.bytes().await?.to_vec();

        if self.config.trace_requests {
            trace!(url, bytes = bytes.len(), "Response received");
        }

        Ok(bytes)
    }

    /// Get HTTP client for manual requests
    pub fn client(&self) -> &Client {
        &self.client
    }

    /// Active networking configuration
    pub fn config(&self) -> &NetworkingConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    include!("mod.test.rs");
}
