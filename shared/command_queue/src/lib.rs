//! Typed command queue for SQS
//!
//! This crate lets an application enqueue strongly-typed commands onto SQS queues.
//! Every command carries a fixed route which names the destination queue.

#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    dead_code
)]

/// Queue client handles and the factory producing them
pub mod client;
/// Queue communicator used by applications to send commands
pub mod communicator;
/// Connection configuration
pub mod config;
/// Error types for queue operations
pub mod error;
/// Envelope, routes and command payloads
pub mod message;
/// Wiring of the queue services
pub mod registry;
/// Message serialization
pub mod serializer;

pub use client::{
    QueueClient, QueueClientFactory, QueueMessage, SqsQueueClient, SqsQueueClientFactory,
};
pub use communicator::{QueueCommunicator, RoutedQueueCommunicator};
pub use config::{ConnectionSettings, QueueConfig};
pub use error::{QueueError, QueueResult};
pub use message::{Command, Envelope, MessageGroupId, Route, SendEmailCommand};
pub use registry::QueueServices;
pub use serializer::{JsonMessageSerializer, MessageSerializer};
