//! Wiring of the queue services
//!
//! [`QueueServices`] is the composition root: the configuration, client factory and
//! serializer are created once and shared, a communicator is created per request.

use std::sync::Arc;

use crate::{
    client::{QueueClientFactory, SqsQueueClientFactory},
    communicator::{QueueCommunicator, RoutedQueueCommunicator},
    config::QueueConfig,
    serializer::{JsonMessageSerializer, MessageSerializer},
};

/// Configured set of queue services
#[derive(Clone)]
pub struct QueueServices {
    config: Arc<QueueConfig>,
    client_factory: Arc<dyn QueueClientFactory>,
    serializer: Arc<dyn MessageSerializer>,
}

impl QueueServices {
    /// Wires the SQS client factory and the JSON serializer for a connection string
    ///
    /// The connection string is parsed when the first queue is resolved.
    #[must_use]
    pub fn new(queue_connection_string: impl Into<String>) -> Self {
        let config = Arc::new(QueueConfig::new(queue_connection_string));
        let client_factory = Arc::new(SqsQueueClientFactory::new(config.clone()));

        Self::with_components(config, client_factory, Arc::new(JsonMessageSerializer))
    }

    /// Wires caller-provided components
    #[must_use]
    pub fn with_components(
        config: Arc<QueueConfig>,
        client_factory: Arc<dyn QueueClientFactory>,
        serializer: Arc<dyn MessageSerializer>,
    ) -> Self {
        Self {
            config,
            client_factory,
            serializer,
        }
    }

    /// Shared queue configuration
    #[must_use]
    pub fn config(&self) -> Arc<QueueConfig> {
        self.config.clone()
    }

    /// Shared queue client factory
    #[must_use]
    pub fn client_factory(&self) -> Arc<dyn QueueClientFactory> {
        self.client_factory.clone()
    }

    /// Shared message serializer
    #[must_use]
    pub fn serializer(&self) -> Arc<dyn MessageSerializer> {
        self.serializer.clone()
    }

    /// Creates a new communicator backed by the shared factory and serializer
    #[must_use]
    pub fn communicator(&self) -> Arc<dyn QueueCommunicator> {
        Arc::new(RoutedQueueCommunicator::new(
            self.client_factory.clone(),
            self.serializer.clone(),
        ))
    }
}
