//! Connection configuration
//!
//! The queue service is configured by a single connection string made of
//! `Key=Value` pairs separated by `;`, for example
//! `Endpoint=https://sqs.eu-west-1.amazonaws.com;Region=eu-west-1`.
//! `UseDevelopmentStorage=true` targets a local `LocalStack` instance.

use std::{str::FromStr, time::Duration};

use aws_config::{retry::RetryConfig, timeout::TimeoutConfig, BehaviorVersion};
use aws_sdk_sqs::config::{Credentials, Region};
use strum::EnumString;

use crate::error::{QueueError, QueueResult};

/// `LocalStack` endpoint used for development storage
pub const DEVELOPMENT_ENDPOINT_URL: &str = "http://localhost:4566";
/// Region used for development storage
pub const DEVELOPMENT_REGION: &str = "us-east-1";
/// Static credential accepted by `LocalStack`
const DEVELOPMENT_CREDENTIAL: &str = "test";
/// Provider name attached to credentials taken from the connection string
const CREDENTIALS_PROVIDER_NAME: &str = "queue-connection-string";

/// Process-wide queue configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueConfig {
    /// Transport connection string
    pub queue_connection_string: String,
}

impl QueueConfig {
    /// Creates a new queue configuration
    #[must_use]
    pub fn new(queue_connection_string: impl Into<String>) -> Self {
        Self {
            queue_connection_string: queue_connection_string.into(),
        }
    }

    /// Parses the connection string
    ///
    /// # Errors
    ///
    /// Returns `QueueError::ConnectionError` if the connection string is invalid
    pub fn connection_settings(&self) -> QueueResult<ConnectionSettings> {
        self.queue_connection_string.parse()
    }
}

/// Keys accepted in a connection string
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString)]
#[strum(ascii_case_insensitive)]
enum ConnectionKey {
    UseDevelopmentStorage,
    DevelopmentStorageProxyUri,
    Endpoint,
    Region,
    AccessKeyId,
    SecretAccessKey,
    SessionToken,
}

/// Static credentials taken from a connection string
#[derive(Clone, PartialEq, Eq)]
pub struct StaticCredentials {
    /// Access key ID
    pub access_key_id: String,
    /// Secret access key
    pub secret_access_key: String,
    /// Optional session token
    pub session_token: Option<String>,
}

impl std::fmt::Debug for StaticCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaticCredentials")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"** redacted **")
            .field("session_token", &self.session_token.as_ref().map(|_| "** redacted **"))
            .finish()
    }
}

/// Parsed connection string
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ConnectionSettings {
    /// Endpoint override, `None` for the regular AWS endpoints
    pub endpoint_url: Option<String>,
    /// Region, `None` to use the default provider chain
    pub region: Option<String>,
    /// Static credentials, `None` to use the default provider chain
    pub credentials: Option<StaticCredentials>,
}

impl ConnectionSettings {
    /// Settings targeting `LocalStack`
    #[must_use]
    pub fn development(endpoint_url: Option<String>) -> Self {
        Self {
            endpoint_url: Some(endpoint_url.unwrap_or_else(|| DEVELOPMENT_ENDPOINT_URL.to_string())),
            region: Some(DEVELOPMENT_REGION.to_string()),
            credentials: Some(StaticCredentials {
                access_key_id: DEVELOPMENT_CREDENTIAL.to_string(),
                secret_access_key: DEVELOPMENT_CREDENTIAL.to_string(),
                session_token: None,
            }),
        }
    }

    /// AWS configuration with retry and timeout settings
    pub async fn aws_config(&self) -> aws_config::SdkConfig {
        let retry_config = RetryConfig::standard()
            .with_max_attempts(3)
            .with_initial_backoff(Duration::from_millis(50));

        let timeout_config = TimeoutConfig::builder()
            .operation_timeout(Duration::from_secs(30))
            .build();

        let mut loader = aws_config::defaults(BehaviorVersion::latest())
            .retry_config(retry_config)
            .timeout_config(timeout_config);

        if let Some(endpoint_url) = &self.endpoint_url {
            loader = loader.endpoint_url(endpoint_url);
        }

        if let Some(region) = &self.region {
            loader = loader.region(Region::new(region.clone()));
        }

        if let Some(credentials) = &self.credentials {
            loader = loader.credentials_provider(Credentials::new(
                credentials.access_key_id.clone(),
                credentials.secret_access_key.clone(),
                credentials.session_token.clone(),
                None,
                CREDENTIALS_PROVIDER_NAME,
            ));
        }

        loader.load().await
    }
}

impl FromStr for ConnectionSettings {
    type Err = QueueError;

    fn from_str(connection_string: &str) -> Result<Self, Self::Err> {
        if connection_string.trim().is_empty() {
            return Err(connection_error("connection string is empty"));
        }

        let mut use_development_storage = false;
        let mut proxy_uri = None;
        let mut endpoint_url = None;
        let mut region = None;
        let mut access_key_id = None;
        let mut secret_access_key = None;
        let mut session_token = None;

        for segment in connection_string.split(';').map(str::trim) {
            if segment.is_empty() {
                continue;
            }

            let (key, value) = segment
                .split_once('=')
                .ok_or_else(|| connection_error(format!("expected Key=Value, got '{segment}'")))?;
            let (key, value) = (key.trim(), value.trim());

            let parsed_key = ConnectionKey::from_str(key)
                .map_err(|_| connection_error(format!("unknown setting '{key}'")))?;

            if value.is_empty() {
                return Err(connection_error(format!("setting '{key}' has no value")));
            }

            match parsed_key {
                ConnectionKey::UseDevelopmentStorage => {
                    use_development_storage = value.to_ascii_lowercase().parse().map_err(|_| {
                        connection_error(format!("'{value}' is not a valid boolean for '{key}'"))
                    })?;
                }
                ConnectionKey::DevelopmentStorageProxyUri => proxy_uri = Some(parse_url(key, value)?),
                ConnectionKey::Endpoint => endpoint_url = Some(parse_url(key, value)?),
                ConnectionKey::Region => region = Some(value.to_string()),
                ConnectionKey::AccessKeyId => access_key_id = Some(value.to_string()),
                ConnectionKey::SecretAccessKey => secret_access_key = Some(value.to_string()),
                ConnectionKey::SessionToken => session_token = Some(value.to_string()),
            }
        }

        if use_development_storage {
            let has_other_settings = endpoint_url.is_some()
                || region.is_some()
                || access_key_id.is_some()
                || secret_access_key.is_some()
                || session_token.is_some();
            if has_other_settings {
                return Err(connection_error(
                    "UseDevelopmentStorage can only be combined with DevelopmentStorageProxyUri",
                ));
            }
            return Ok(Self::development(proxy_uri));
        }

        if proxy_uri.is_some() {
            return Err(connection_error(
                "DevelopmentStorageProxyUri requires UseDevelopmentStorage=true",
            ));
        }

        let credentials = match (access_key_id, secret_access_key) {
            (Some(access_key_id), Some(secret_access_key)) => Some(StaticCredentials {
                access_key_id,
                secret_access_key,
                session_token,
            }),
            (None, None) if session_token.is_none() => None,
            (None, None) => {
                return Err(connection_error(
                    "SessionToken requires AccessKeyId and SecretAccessKey",
                ))
            }
            _ => {
                return Err(connection_error(
                    "AccessKeyId and SecretAccessKey must be set together",
                ))
            }
        };

        Ok(Self {
            endpoint_url,
            region,
            credentials,
        })
    }
}

fn parse_url(key: &str, value: &str) -> QueueResult<String> {
    let has_host = value
        .strip_prefix("http://")
        .or_else(|| value.strip_prefix("https://"))
        .is_some_and(|rest| !rest.is_empty());

    if has_host {
        Ok(value.trim_end_matches('/').to_string())
    } else {
        Err(connection_error(format!(
            "'{value}' is not a valid http(s) URL for '{key}'"
        )))
    }
}

fn connection_error(message: impl Into<String>) -> QueueError {
    QueueError::ConnectionError(message.into())
}
