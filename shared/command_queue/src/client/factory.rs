//! SQS queue client factory

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use aws_sdk_sqs::{types::QueueAttributeName, Client as SqsClient};
use tokio::sync::{OnceCell, RwLock};
use tracing::{debug, info};

use crate::{
    client::{sqs_queue::FIFO_SUFFIX, QueueClient, QueueClientFactory, SqsQueueClient},
    config::QueueConfig,
    error::{QueueError, QueueResult},
};

/// Maximum length of an SQS queue name, `.fifo` suffix included
const MAX_QUEUE_NAME_LEN: usize = 80;

/// Validates a queue name against SQS naming rules
///
/// Names are 1 to 80 characters of ASCII alphanumerics, `-` and `_`, with an
/// optional `.fifo` suffix.
///
/// # Errors
///
/// Returns `QueueError::InvalidQueueName` if the name is not valid
pub fn validate_queue_name(queue_name: &str) -> QueueResult<()> {
    let base = queue_name.strip_suffix(FIFO_SUFFIX).unwrap_or(queue_name);

    if base.is_empty() {
        return Err(QueueError::InvalidQueueName(
            "queue name must not be empty".to_string(),
        ));
    }

    if queue_name.len() > MAX_QUEUE_NAME_LEN {
        return Err(QueueError::InvalidQueueName(format!(
            "'{queue_name}' is longer than {MAX_QUEUE_NAME_LEN} characters"
        )));
    }

    if let Some(invalid) = base
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || *c == '-' || *c == '_'))
    {
        return Err(QueueError::InvalidQueueName(format!(
            "'{queue_name}' contains invalid character '{invalid}'"
        )));
    }

    Ok(())
}

/// Factory resolving SQS queues by name
///
/// The SQS client is built from the connection string on first use. Queues are created
/// if they do not exist and the resulting handles are cached by name. Concurrent callers
/// asking for the same queue share a single resolution.
pub struct SqsQueueClientFactory {
    config: Arc<QueueConfig>,
    sqs_client: OnceCell<Arc<SqsClient>>,
    clients: RwLock<HashMap<String, Arc<OnceCell<Arc<dyn QueueClient>>>>>,
}

impl SqsQueueClientFactory {
    /// Creates a new factory
    ///
    /// # Arguments
    ///
    /// * `config` - Process-wide queue configuration
    #[must_use]
    pub fn new(config: Arc<QueueConfig>) -> Self {
        Self {
            config,
            sqs_client: OnceCell::new(),
            clients: RwLock::new(HashMap::new()),
        }
    }

    /// Creates a factory around an already configured SQS client
    #[must_use]
    pub fn with_sqs_client(config: Arc<QueueConfig>, sqs_client: Arc<SqsClient>) -> Self {
        Self {
            config,
            sqs_client: OnceCell::new_with(Some(sqs_client)),
            clients: RwLock::new(HashMap::new()),
        }
    }

    /// Queue configuration used by this factory
    #[must_use]
    pub fn config(&self) -> &QueueConfig {
        &self.config
    }

    async fn sqs_client(&self) -> QueueResult<Arc<SqsClient>> {
        self.sqs_client
            .get_or_try_init(|| async {
                let settings = self.config.connection_settings()?;
                debug!(
                    endpoint_url = ?settings.endpoint_url,
                    region = ?settings.region,
                    "Building SQS client"
                );
                Ok::<_, QueueError>(Arc::new(SqsClient::new(&settings.aws_config().await)))
            })
            .await
            .cloned()
    }

    /// Returns the resolution slot for a queue, inserting an empty one if needed
    async fn client_cell(&self, queue_name: &str) -> Arc<OnceCell<Arc<dyn QueueClient>>> {
        if let Some(cell) = self.clients.read().await.get(queue_name) {
            return cell.clone();
        }

        self.clients
            .write()
            .await
            .entry(queue_name.to_string())
            .or_default()
            .clone()
    }

    async fn create_queue(sqs_client: &SqsClient, queue_name: &str) -> QueueResult<String> {
        let mut request = sqs_client.create_queue().queue_name(queue_name);
        if queue_name.ends_with(FIFO_SUFFIX) {
            request = request
                .attributes(QueueAttributeName::FifoQueue, "true")
                .attributes(QueueAttributeName::ContentBasedDeduplication, "true");
        }

        let result = request.send().await.map_err(QueueError::from_create_queue)?;

        result
            .queue_url()
            .map(std::string::ToString::to_string)
            .ok_or_else(|| {
                QueueError::ConnectionError(format!("SQS returned no URL for queue '{queue_name}'"))
            })
    }
}

#[async_trait]
impl QueueClientFactory for SqsQueueClientFactory {
    async fn get_client(&self, queue_name: &str) -> QueueResult<Arc<dyn QueueClient>> {
        validate_queue_name(queue_name)?;

        let cell = self.client_cell(queue_name).await;

        let client = cell
            .get_or_try_init(|| async {
                let sqs_client = self.sqs_client().await?;
                let queue_url = Self::create_queue(&sqs_client, queue_name).await?;
                info!(queue_name, queue_url = %queue_url, "Resolved queue");

                let client: Arc<dyn QueueClient> = Arc::new(SqsQueueClient::new(
                    sqs_client,
                    queue_name.to_string(),
                    queue_url,
                ));
                Ok::<_, QueueError>(client)
            })
            .await?;

        Ok(client.clone())
    }
}
