use aws_sdk_sqs::error::SdkError;
use aws_sdk_sqs::operation::create_queue::CreateQueueError;
use aws_sdk_sqs::operation::delete_message::DeleteMessageError;
use aws_sdk_sqs::operation::receive_message::ReceiveMessageError;
use aws_sdk_sqs::operation::send_message::SendMessageError;
use thiserror::Error;

/// Result type alias for queue operations
pub type QueueResult<T> = Result<T, QueueError>;

/// Error types for queue operations
#[derive(Error, Debug)]
pub enum QueueError {
    /// The message cannot be routed (missing or foreign route)
    #[error("Invalid message: {0}")]
    InvalidMessage(String),

    /// Text is not valid JSON or does not match the expected message shape
    #[error("Malformed payload: {0}")]
    MalformedPayload(#[from] serde_json::Error),

    /// The connection string is invalid or the queue service is unreachable
    #[error("Queue connection error: {0}")]
    ConnectionError(String),

    /// The queue name violates SQS naming rules
    #[error("Invalid queue name: {0}")]
    InvalidQueueName(String),

    /// Error creating or resolving a queue in SQS
    #[error("Failed to create queue in SQS")]
    CreateQueue(#[from] SdkError<CreateQueueError>),

    /// Error receiving messages from SQS
    #[error("Failed to receive messages from SQS")]
    ReceiveMessage(#[from] SdkError<ReceiveMessageError>),

    /// Error sending message to SQS
    #[error("Failed to send message to SQS")]
    SendMessage(#[from] SdkError<SendMessageError>),

    /// Error deleting message from SQS
    #[error("Failed to delete message from SQS")]
    DeleteMessage(#[from] SdkError<DeleteMessageError>),
}

impl QueueError {
    /// Checks if this error represents an upstream (5xx) error
    #[must_use]
    pub fn is_upstream_error(&self) -> bool {
        match self {
            Self::CreateQueue(sdk_err) => Self::check_sdk_error_status(sdk_err),
            Self::ReceiveMessage(sdk_err) => Self::check_sdk_error_status(sdk_err),
            Self::SendMessage(sdk_err) => Self::check_sdk_error_status(sdk_err),
            Self::DeleteMessage(sdk_err) => Self::check_sdk_error_status(sdk_err),
            _ => false,
        }
    }

    /// Maps a failed `CreateQueue` call, treating transport-level failures as connection errors
    pub(crate) fn from_create_queue(err: SdkError<CreateQueueError>) -> Self {
        match err {
            SdkError::ConstructionFailure(_)
            | SdkError::DispatchFailure(_)
            | SdkError::TimeoutError(_) => Self::ConnectionError(
                aws_sdk_sqs::error::DisplayErrorContext(&err).to_string(),
            ),
            err => Self::CreateQueue(err),
        }
    }

    fn check_sdk_error_status<E>(sdk_err: &SdkError<E>) -> bool {
        if let SdkError::ServiceError(err) = sdk_err {
            let raw = err.raw();
            let status = raw.status();
            return status.as_u16() >= 500;
        }
        false
    }
}
