//! LocalStack test setup utilities

use std::sync::Arc;

use command_queue::{QueueClient, QueueServices};
use uuid::Uuid;

/// Connection string pointing at LocalStack
pub const DEVELOPMENT_CONNECTION_STRING: &str = "UseDevelopmentStorage=true";

/// Test context with queue services wired against LocalStack
pub struct QueueTestContext {
    pub services: QueueServices,
    pub queue_name: String,
}

impl QueueTestContext {
    /// Creates a new test context with a unique queue name
    pub fn new(test_name: &str) -> Self {
        Self {
            services: QueueServices::new(DEVELOPMENT_CONNECTION_STRING),
            queue_name: format!("{}-{}", test_name, Uuid::new_v4()),
        }
    }

    /// Resolves the unique queue of this context
    pub async fn client(&self) -> Arc<dyn QueueClient> {
        self.services
            .client_factory()
            .get_client(&self.queue_name)
            .await
            .expect("Failed to resolve test queue")
    }
}

/// Removes every visible entry from a queue
pub async fn drain(client: &dyn QueueClient) {
    loop {
        let messages = client
            .receive_messages(10)
            .await
            .expect("Failed to receive messages");
        if messages.is_empty() {
            break;
        }
        for message in messages {
            client
                .delete_message(&message.receipt_handle)
                .await
                .expect("Failed to delete message");
        }
    }
}
