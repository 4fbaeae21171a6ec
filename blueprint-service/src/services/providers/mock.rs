//! Mock invoker for testing.

use super::{validate_messages, InvocationError, ModelInvoker, ModelMessage};
use async_trait::async_trait;
use std::sync::Mutex;

/// A call observed by [`MockInvoker`].
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub model_id: String,
    pub messages: Vec<ModelMessage>,
}

/// Mock invoker that answers every call with the same reply.
pub struct MockInvoker {
    reply: Result<String, InvocationError>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl MockInvoker {
    pub fn replying(text: impl Into<String>) -> Self {
        Self {
            reply: Ok(text.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(error: InvocationError) -> Self {
        Self {
            reply: Err(error),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl ModelInvoker for MockInvoker {
    async fn invoke(
        &self,
        model_id: &str,
        messages: &[ModelMessage],
    ) -> Result<String, InvocationError> {
        validate_messages(messages)?;

        if let Ok(mut calls) = self.calls.lock() {
            calls.push(RecordedCall {
                model_id: model_id.to_string(),
                messages: messages.to_vec(),
            });
        }

        self.reply.clone()
    }
}
