//! SQS queue client handle

use std::sync::Arc;

use async_trait::async_trait;
use aws_sdk_sqs::Client as SqsClient;
use tracing::warn;

use crate::{
    client::{QueueClient, QueueMessage},
    error::QueueResult,
};

/// Suffix SQS requires for FIFO queue names
pub(crate) const FIFO_SUFFIX: &str = ".fifo";

/// SQS-backed handle for one queue
pub struct SqsQueueClient {
    sqs_client: Arc<SqsClient>,
    queue_name: String,
    queue_url: String,
}

impl SqsQueueClient {
    /// Creates a new handle
    ///
    /// # Arguments
    ///
    /// * `sqs_client` - Pre-configured SQS client
    /// * `queue_name` - Name of the queue
    /// * `queue_url` - URL of the queue, as returned by SQS
    #[must_use]
    pub const fn new(sqs_client: Arc<SqsClient>, queue_name: String, queue_url: String) -> Self {
        Self {
            sqs_client,
            queue_name,
            queue_url,
        }
    }

    /// Whether the queue is a FIFO queue
    #[must_use]
    pub fn is_fifo(&self) -> bool {
        self.queue_name.ends_with(FIFO_SUFFIX)
    }
}

#[async_trait]
impl QueueClient for SqsQueueClient {
    fn queue_name(&self) -> &str {
        &self.queue_name
    }

    fn queue_url(&self) -> &str {
        &self.queue_url
    }

    async fn send_message(
        &self,
        body: String,
        message_group_id: Option<String>,
    ) -> QueueResult<String> {
        // Standard queues reject message group IDs
        let message_group_id = message_group_id.filter(|_| self.is_fifo());

        let result = self
            .sqs_client
            .send_message()
            .queue_url(&self.queue_url)
            .message_body(body)
            .set_message_group_id(message_group_id)
            .send()
            .await?;

        Ok(result
            .message_id()
            .map(std::string::ToString::to_string)
            .unwrap_or_default())
    }

    async fn receive_messages(&self, max_messages: i32) -> QueueResult<Vec<QueueMessage<String>>> {
        let result = self
            .sqs_client
            .receive_message()
            .queue_url(&self.queue_url)
            .max_number_of_messages(max_messages)
            .send()
            .await?;

        let messages = result
            .messages()
            .iter()
            .filter_map(|msg| match (msg.body(), msg.receipt_handle(), msg.message_id()) {
                (Some(body), Some(receipt_handle), Some(message_id)) => Some(QueueMessage {
                    body: body.to_string(),
                    receipt_handle: receipt_handle.to_string(),
                    message_id: message_id.to_string(),
                }),
                _ => {
                    warn!(
                        queue_name = %self.queue_name,
                        message_id = ?msg.message_id(),
                        "Dropping received message without body, receipt handle or ID"
                    );
                    None
                }
            })
            .collect();

        Ok(messages)
    }

    async fn delete_message(&self, receipt_handle: &str) -> QueueResult<()> {
        self.sqs_client
            .delete_message()
            .queue_url(&self.queue_url)
            .receipt_handle(receipt_handle)
            .send()
            .await?;

        Ok(())
    }
}
