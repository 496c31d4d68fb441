//! SQS stub served by wiremock, speaking the AWS JSON protocol

use std::sync::Arc;

use aws_sdk_sqs::Client as SqsClient;
use command_queue::{ConnectionSettings, QueueConfig, SqsQueueClientFactory};
use serde_json::Value;
use wiremock::{
    matchers::{header, method},
    Mock, MockBuilder, MockServer, ResponseTemplate,
};

/// Content type of AWS JSON 1.0 responses
const AWS_JSON: &str = "application/x-amz-json-1.0";

/// Stub SQS endpoint plus the connection string pointing at it
pub struct SqsStub {
    pub server: MockServer,
    pub connection_string: String,
}

impl SqsStub {
    pub async fn start() -> Self {
        let server = MockServer::start().await;
        let connection_string = format!(
            "Endpoint={};Region=us-east-1;AccessKeyId=test;SecretAccessKey=test",
            server.uri()
        );

        Self {
            server,
            connection_string,
        }
    }

    /// URL the stub hands out for `queue_name`
    pub fn queue_url(&self, queue_name: &str) -> String {
        format!("{}/000000000000/{queue_name}", self.server.uri())
    }

    /// Factory wrapping an SQS client configured for the stub
    pub async fn factory(&self) -> SqsQueueClientFactory {
        let settings: ConnectionSettings = self
            .connection_string
            .parse()
            .expect("Stub connection string should parse");
        let sqs_client = Arc::new(SqsClient::new(&settings.aws_config().await));

        SqsQueueClientFactory::with_sqs_client(
            Arc::new(QueueConfig::new(self.connection_string.clone())),
            sqs_client,
        )
    }

    /// JSON bodies of every request received for `operation`, e.g. `SendMessage`
    pub async fn requests(&self, operation: &str) -> Vec<Value> {
        let target = format!("AmazonSQS.{operation}");
        self.server
            .received_requests()
            .await
            .expect("Request recording should be enabled")
            .iter()
            .filter(|request| {
                request
                    .headers
                    .get("x-amz-target")
                    .and_then(|value| value.to_str().ok())
                    == Some(target.as_str())
            })
            .map(|request| request.body_json().expect("Request body should be JSON"))
            .collect()
    }
}

/// Matches a POST for the given SQS operation
pub fn sqs_operation(operation: &str) -> MockBuilder {
    let target = format!("AmazonSQS.{operation}");
    Mock::given(method("POST")).and(header("x-amz-target", target.as_str()))
}

/// Successful AWS JSON response
pub fn sqs_response(body: &Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(body.to_string(), AWS_JSON)
}

/// AWS JSON error response
pub fn sqs_error(status: u16, error_type: &str) -> ResponseTemplate {
    let body = serde_json::json!({
        "__type": format!("com.amazonaws.sqs#{error_type}"),
        "message": "stubbed failure",
    });
    ResponseTemplate::new(status).set_body_raw(body.to_string(), AWS_JSON)
}
