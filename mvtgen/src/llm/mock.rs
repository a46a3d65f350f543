//! Mock gateway for tests and offline runs.
//!
//! Returns scripted replies (or a scripted remote failure) and records every request so
//! tests can assert on prompt composition.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use super::{CompletionRequest, GatewayError, ModelGateway};

enum Script {
    Replies(Vec<String>),
    Fail { status: u16, message: String },
}

/// Mock [`ModelGateway`].
///
/// With several scripted replies, call N gets reply N; once they run out the last one
/// repeats.
pub struct MockGateway {
    script: Script,
    calls: AtomicUsize,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl MockGateway {
    /// Always answers with `reply`.
    pub fn with_reply(reply: impl Into<String>) -> Self {
        let reply: String = reply.into();
        Self::with_replies([reply])
    }

    /// Answers call N with the N-th reply.
    pub fn with_replies(replies: impl IntoIterator<Item = String>) -> Self {
        Self::from_script(Script::Replies(replies.into_iter().collect()))
    }

    /// Always fails with [`GatewayError::Remote`].
    pub fn failing(status: u16, message: impl Into<String>) -> Self {
        Self::from_script(Script::Fail {
            status,
            message: message.into(),
        })
    }

    fn from_script(script: Script) -> Self {
        Self {
            script,
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Requests received so far, oldest first.
    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ModelGateway for MockGateway {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, GatewayError> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request.clone());
        }
        match &self.script {
            Script::Replies(replies) => Ok(replies
                .get(n)
                .or_else(|| replies.last())
                .cloned()
                .unwrap_or_default()),
            Script::Fail { status, message } => Err(GatewayError::Remote {
                status: *status,
                message: message.clone(),
            }),
        }
    }
}
