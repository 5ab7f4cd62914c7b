//! Scripted provider for tests and offline development.

use crate::client::{LlmClient, LlmRequest, LlmResponse, LlmUsage};
use docseek_core::{AppError, AppResult};
use std::collections::VecDeque;
use std::sync::Mutex;

/// One scripted reply.
#[derive(Debug, Clone)]
enum Reply {
    Text(String),
    Unavailable,
}

/// Provider that returns canned replies and records every prompt it sees.
///
/// Replies queued with [`MockClient::push_reply`] are returned in order; once
/// the queue is empty the fallback reply is used.
#[derive(Debug)]
pub struct MockClient {
    replies: Mutex<VecDeque<Reply>>,
    fallback: Reply,
    prompts: Mutex<Vec<LlmRequest>>,
}

impl MockClient {
    /// Mock that always answers `reply`.
    pub fn new(reply: impl Into<String>) -> Self {
        Self {
            replies: Mutex::new(VecDeque::new()),
            fallback: Reply::Text(reply.into()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Mock whose backend is never reachable.
    pub fn unavailable() -> Self {
        Self {
            replies: Mutex::new(VecDeque::new()),
            fallback: Reply::Unavailable,
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Queue a reply ahead of the fallback.
    pub fn push_reply(&self, reply: impl Into<String>) {
        lock(&self.replies).push_back(Reply::Text(reply.into()));
    }

    /// Requests received so far, oldest first.
    pub fn requests(&self) -> Vec<LlmRequest> {
        lock(&self.prompts).clone()
    }

    /// Prompt text of the most recent request.
    pub fn last_prompt(&self) -> Option<String> {
        lock(&self.prompts).last().map(|r| r.prompt.clone())
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[async_trait::async_trait]
impl LlmClient for MockClient {
    fn provider_name(&self) -> &str {
        "mock"
    }

    async fn complete(&self, request: &LlmRequest) -> AppResult<LlmResponse> {
        lock(&self.prompts).push(request.clone());

        let reply = lock(&self.replies)
            .pop_front()
            .unwrap_or_else(|| self.fallback.clone());

        match reply {
            Reply::Text(content) => Ok(LlmResponse {
                content,
                model: request.model.clone(),
                usage: LlmUsage::default(),
                done: true,
            }),
            Reply::Unavailable => Err(AppError::ModelUnavailable(
                "mock backend is offline".to_string(),
            )),
        }
    }
}
