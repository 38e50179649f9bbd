//! In-memory recording sender for tests.

use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use lifelink_core::result::AppResult;
use lifelink_core::error::AppError;
use lifelink_core::traits::{MessageSender, SendOutcome};

/// A message captured by [`MemorySender`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedMessage {
    /// Recipient address.
    pub recipient: String,
    /// Message text.
    pub message: String,
}

/// How the next sends should behave.
#[derive(Debug, Clone)]
pub enum SendBehavior {
    /// Accept every message.
    Accept,
    /// Reject every message with the given reason.
    Reject(String),
    /// Fail at the transport level.
    TransportError,
    /// Sleep for the given duration, then accept. Combined with a paused
    /// tokio clock this exercises the dispatcher's timeout path.
    Delay(Duration),
}

/// Records every send and returns a programmable outcome.
#[derive(Debug)]
pub struct MemorySender {
    sent: Mutex<Vec<RecordedMessage>>,
    behavior: Mutex<SendBehavior>,
}

impl MemorySender {
    /// Create a sender that accepts everything.
    pub fn new() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            behavior: Mutex::new(SendBehavior::Accept),
        }
    }

    /// Change how subsequent sends behave.
    pub fn set_behavior(&self, behavior: SendBehavior) {
        *self.behavior.lock().unwrap() = behavior;
    }

    /// All messages recorded so far, in send order.
    pub fn sent(&self) -> Vec<RecordedMessage> {
        self.sent.lock().unwrap().clone()
    }

    /// Number of messages recorded so far.
    pub fn sent_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

impl Default for MemorySender {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MessageSender for MemorySender {
    fn provider(&self) -> &str {
        "memory"
    }

    async fn send(&self, recipient: &str, message: &str) -> AppResult<SendOutcome> {
        self.sent.lock().unwrap().push(RecordedMessage {
            recipient: recipient.to_string(),
            message: message.to_string(),
        });

        let behavior = self.behavior.lock().unwrap().clone();
        match behavior {
            SendBehavior::Accept => Ok(SendOutcome::accepted()),
            SendBehavior::Reject(reason) => Ok(SendOutcome::rejected(reason)),
            SendBehavior::TransportError => {
                Err(AppError::delivery("simulated transport failure"))
            }
            SendBehavior::Delay(duration) => {
                tokio::time::sleep(duration).await;
                Ok(SendOutcome::accepted())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_records_messages_in_order() {
        let sender = MemorySender::new();
        sender.send("+111", "first").await.unwrap();
        sender.send("+222", "second").await.unwrap();

        let sent = sender.sent();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0].recipient, "+111");
        assert_eq!(sent[1].message, "second");
    }

    #[tokio::test]
    async fn test_reject_behavior() {
        let sender = MemorySender::new();
        sender.set_behavior(SendBehavior::Reject("no credit".into()));
        let outcome = sender.send("+111", "hello").await.unwrap();
        assert!(!outcome.accepted);
    }
}
