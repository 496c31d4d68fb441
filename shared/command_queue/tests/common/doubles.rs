//! Recording test doubles for the queue traits

use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc, Mutex,
    },
};

use async_trait::async_trait;
use command_queue::{
    Envelope, JsonMessageSerializer, MessageSerializer, QueueClient, QueueClientFactory,
    QueueError, QueueMessage, QueueResult,
};

/// Entry submitted through a [`RecordingQueueClient`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentEntry {
    pub body: String,
    pub message_group_id: Option<String>,
}

/// Queue client keeping submitted entries in memory
pub struct RecordingQueueClient {
    queue_name: String,
    sent: Mutex<Vec<SentEntry>>,
    fail_send: bool,
}

impl RecordingQueueClient {
    pub fn new(queue_name: &str, fail_send: bool) -> Self {
        Self {
            queue_name: queue_name.to_string(),
            sent: Mutex::new(Vec::new()),
            fail_send,
        }
    }

    pub fn sent(&self) -> Vec<SentEntry> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl QueueClient for RecordingQueueClient {
    fn queue_name(&self) -> &str {
        &self.queue_name
    }

    fn queue_url(&self) -> &str {
        "memory://queue"
    }

    async fn send_message(
        &self,
        body: String,
        message_group_id: Option<String>,
    ) -> QueueResult<String> {
        if self.fail_send {
            return Err(QueueError::ConnectionError("queue unavailable".to_string()));
        }

        let mut sent = self.sent.lock().unwrap();
        sent.push(SentEntry {
            body,
            message_group_id,
        });
        Ok(format!("{}-{}", self.queue_name, sent.len()))
    }

    async fn receive_messages(&self, max_messages: i32) -> QueueResult<Vec<QueueMessage<String>>> {
        let max_messages = usize::try_from(max_messages).unwrap_or_default();
        Ok(self
            .sent()
            .into_iter()
            .enumerate()
            .take(max_messages)
            .map(|(i, entry)| QueueMessage {
                body: entry.body,
                receipt_handle: format!("receipt-{i}"),
                message_id: format!("{}-{}", self.queue_name, i + 1),
            })
            .collect())
    }

    async fn delete_message(&self, _receipt_handle: &str) -> QueueResult<()> {
        Ok(())
    }
}

/// How a [`RecordingClientFactory`] behaves
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FactoryBehavior {
    Succeed,
    FailConnection,
    FailSend,
}

/// Factory handing out [`RecordingQueueClient`]s and counting calls
pub struct RecordingClientFactory {
    behavior: FactoryBehavior,
    calls: AtomicUsize,
    clients: Mutex<HashMap<String, Arc<RecordingQueueClient>>>,
}

impl RecordingClientFactory {
    pub fn new(behavior: FactoryBehavior) -> Self {
        Self {
            behavior,
            calls: AtomicUsize::new(0),
            clients: Mutex::new(HashMap::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Client previously handed out for `queue_name`
    pub fn client(&self, queue_name: &str) -> Option<Arc<RecordingQueueClient>> {
        self.clients.lock().unwrap().get(queue_name).cloned()
    }
}

#[async_trait]
impl QueueClientFactory for RecordingClientFactory {
    async fn get_client(&self, queue_name: &str) -> QueueResult<Arc<dyn QueueClient>> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if self.behavior == FactoryBehavior::FailConnection {
            return Err(QueueError::ConnectionError(
                "connection refused".to_string(),
            ));
        }

        let fail_send = self.behavior == FactoryBehavior::FailSend;
        let client = self
            .clients
            .lock()
            .unwrap()
            .entry(queue_name.to_string())
            .or_insert_with(|| Arc::new(RecordingQueueClient::new(queue_name, fail_send)))
            .clone();

        let client: Arc<dyn QueueClient> = client;
        Ok(client)
    }
}

/// JSON serializer counting its calls
pub struct CountingSerializer {
    inner: JsonMessageSerializer,
    serialize_calls: AtomicUsize,
    fail: bool,
}

impl CountingSerializer {
    pub fn new(fail: bool) -> Self {
        Self {
            inner: JsonMessageSerializer,
            serialize_calls: AtomicUsize::new(0),
            fail,
        }
    }

    pub fn serialize_calls(&self) -> usize {
        self.serialize_calls.load(Ordering::SeqCst)
    }
}

impl MessageSerializer for CountingSerializer {
    fn serialize(&self, envelope: &Envelope) -> QueueResult<String> {
        self.serialize_calls.fetch_add(1, Ordering::SeqCst);

        if self.fail {
            // Surface a real serde_json error
            return Err(serde_json::from_str::<serde_json::Value>("{")
                .unwrap_err()
                .into());
        }

        self.inner.serialize(envelope)
    }

    fn deserialize(&self, text: &str) -> QueueResult<Envelope> {
        self.inner.deserialize(text)
    }
}
