//! Environment configuration for different deployment stages

use std::env;

use command_queue::SendEmailCommand;
use tracing::Level;

/// Connection string used in development (`LocalStack`)
const DEVELOPMENT_CONNECTION_STRING: &str = "UseDevelopmentStorage=true";

/// Application environment configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    /// Production environment
    Production,
    /// Staging environment
    Staging,
    /// Development environment (uses `LocalStack`)
    Development,
}

impl Environment {
    /// Creates an Environment from the `APP_ENV` environment variable
    ///
    /// # Panics
    ///
    /// Panics if `APP_ENV` contains an invalid value
    #[must_use]
    pub fn from_env() -> Self {
        let env = env::var("APP_ENV")
            .unwrap_or_else(|_| "development".to_string())
            .trim()
            .to_lowercase();

        match env.as_str() {
            "production" => Self::Production,
            "staging" => Self::Staging,
            "development" => Self::Development,
            _ => panic!("Invalid environment: {env}"),
        }
    }

    /// Returns the queue connection string
    ///
    /// Development falls back to `LocalStack` when `QUEUE_CONNECTION_STRING` is not set.
    ///
    /// # Panics
    ///
    /// Panics if the `QUEUE_CONNECTION_STRING` environment variable is not set in production/staging
    #[must_use]
    pub fn queue_connection_string(&self) -> String {
        match self {
            Self::Production | Self::Staging => env::var("QUEUE_CONNECTION_STRING")
                .expect("QUEUE_CONNECTION_STRING environment variable is not set"),
            Self::Development => env::var("QUEUE_CONNECTION_STRING")
                .unwrap_or_else(|_| DEVELOPMENT_CONNECTION_STRING.to_string()),
        }
    }

    /// Returns the email to dispatch, read from `EMAIL_TO`, `EMAIL_SUBJECT` and `EMAIL_BODY`
    ///
    /// Subject and body default to empty strings.
    ///
    /// # Panics
    ///
    /// Panics if the `EMAIL_TO` environment variable is not set
    #[must_use]
    pub fn send_email_command(&self) -> SendEmailCommand {
        SendEmailCommand::new(
            env::var("EMAIL_TO").expect("EMAIL_TO environment variable is not set"),
            env::var("EMAIL_SUBJECT").unwrap_or_default(),
            env::var("EMAIL_BODY").unwrap_or_default(),
        )
    }

    /// Whether logs are emitted as JSON
    #[must_use]
    pub const fn json_logs(&self) -> bool {
        matches!(self, Self::Production | Self::Staging)
    }

    #[must_use]
    pub fn tracing_level(&self) -> Level {
        env::var("TRACING_LEVEL")
            .ok()
            .and_then(|val| val.parse::<Level>().ok())
            .unwrap_or(match self {
                Self::Production | Self::Staging => Level::INFO,
                Self::Development => Level::DEBUG,
            })
    }
}
