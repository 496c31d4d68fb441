//! Queue client handles
//!
//! A [`QueueClient`] is bound to one named queue. Handles are obtained from a
//! [`QueueClientFactory`], which resolves the queue by name.

mod factory;
mod sqs_queue;

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::QueueResult;

pub use factory::{validate_queue_name, SqsQueueClientFactory};
pub use sqs_queue::SqsQueueClient;

/// Wrapper for queue messages with metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueMessage<T> {
    /// The message body
    pub body: T,
    /// Receipt handle for acknowledging the message
    pub receipt_handle: String,
    /// Message ID
    pub message_id: String,
}

/// Handle bound to a single queue
#[async_trait]
pub trait QueueClient: Send + Sync {
    /// Name of the queue this handle is bound to
    fn queue_name(&self) -> &str;

    /// URL of the queue this handle is bound to
    fn queue_url(&self) -> &str;

    /// Submits a single entry to the queue
    ///
    /// `message_group_id` is only used by FIFO queues.
    ///
    /// # Returns
    ///
    /// The message ID if successful or an empty string
    ///
    /// # Errors
    ///
    /// Returns `QueueError` if the send operation fails
    async fn send_message(
        &self,
        body: String,
        message_group_id: Option<String>,
    ) -> QueueResult<String>;

    /// Receives up to `max_messages` raw entries without removing them
    ///
    /// # Errors
    ///
    /// Returns `QueueError` if the receive operation fails
    async fn receive_messages(&self, max_messages: i32) -> QueueResult<Vec<QueueMessage<String>>>;

    /// Acknowledges receipt of a message by deleting it from the queue
    ///
    /// # Errors
    ///
    /// Returns `QueueError` if the acknowledgment fails
    async fn delete_message(&self, receipt_handle: &str) -> QueueResult<()>;
}

/// Produces queue client handles by queue name
#[async_trait]
pub trait QueueClientFactory: Send + Sync {
    /// Returns a handle for the named queue, creating the queue if it does not exist
    ///
    /// # Errors
    ///
    /// Returns `QueueError::InvalidQueueName` if the name violates naming rules and
    /// `QueueError::ConnectionError` if the queue service cannot be reached
    async fn get_client(&self, queue_name: &str) -> QueueResult<Arc<dyn QueueClient>>;
}
