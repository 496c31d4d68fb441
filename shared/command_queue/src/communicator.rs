//! Queue communicator
//!
//! The facade applications call to dispatch a command: it resolves the envelope's
//! route to a queue, serializes the envelope and submits it as a single entry.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, info, instrument};

use crate::{
    client::QueueClientFactory,
    error::{QueueError, QueueResult},
    message::{Envelope, MessageGroupId},
    serializer::MessageSerializer,
};

/// Sends envelopes to the queue named by their route
#[async_trait]
pub trait QueueCommunicator: Send + Sync {
    /// Sends a message to the queue named by its route
    ///
    /// # Returns
    ///
    /// The message ID assigned by the queue service
    ///
    /// # Errors
    ///
    /// Returns `QueueError::InvalidMessage` if the route is empty or does not belong to the
    /// command, otherwise any error from resolving the queue, serializing or submitting
    async fn send(&self, message: &Envelope) -> QueueResult<String>;
}

/// Communicator composing a client factory and a serializer
pub struct RoutedQueueCommunicator {
    client_factory: Arc<dyn QueueClientFactory>,
    serializer: Arc<dyn MessageSerializer>,
}

impl RoutedQueueCommunicator {
    /// Creates a new communicator
    ///
    /// # Arguments
    ///
    /// * `client_factory` - Resolves queue handles by route
    /// * `serializer` - Encodes envelopes into queue entries
    #[must_use]
    pub fn new(
        client_factory: Arc<dyn QueueClientFactory>,
        serializer: Arc<dyn MessageSerializer>,
    ) -> Self {
        Self {
            client_factory,
            serializer,
        }
    }
}

/// Checks the envelope carries the route fixed by its command
fn validate_route(message: &Envelope) -> QueueResult<()> {
    let route = message.route();
    if route.trim().is_empty() {
        return Err(QueueError::InvalidMessage(
            "message route must not be empty".to_string(),
        ));
    }

    let expected = message.command().route();
    if route != expected.as_ref() {
        return Err(QueueError::InvalidMessage(format!(
            "route '{route}' does not match command route '{expected}'"
        )));
    }

    Ok(())
}

#[async_trait]
impl QueueCommunicator for RoutedQueueCommunicator {
    #[instrument(skip(self, message), fields(route = %message.route()))]
    async fn send(&self, message: &Envelope) -> QueueResult<String> {
        validate_route(message)?;

        let client = self
            .client_factory
            .get_client(message.route())
            .await
            .inspect_err(|e| error!(error = ?e, "Failed to resolve queue client"))?;

        let body = self
            .serializer
            .serialize(message)
            .inspect_err(|e| error!(error = ?e, "Failed to serialize message"))?;

        let message_id = client
            .send_message(body, Some(message.message_group_id()))
            .await
            .inspect_err(|e| error!(error = ?e, "Failed to submit message"))?;

        info!(queue_name = client.queue_name(), message_id = %message_id, "Message sent");

        Ok(message_id)
    }
}
