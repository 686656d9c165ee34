//! Deterministic collaborators for unit and integration tests.
//!
//! [`MutableClock`] pins "now" so day arithmetic is reproducible, and
//! [`ScriptedCompletion`] replays canned completion responses in order while
//! recording the prompts it received.

use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use chrono::{DateTime, Local, TimeDelta, Utc};
use mockable::Clock;

use crate::domain::ports::{CompletionRequest, CompletionServiceError, TextCompletion};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// A clock whose current instant only moves when told to.
#[derive(Debug)]
pub struct MutableClock(Mutex<DateTime<Utc>>);

impl MutableClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self(Mutex::new(now))
    }

    pub fn set(&self, now: DateTime<Utc>) {
        *lock(&self.0) = now;
    }

    pub fn advance_days(&self, days: i64) {
        *lock(&self.0) += TimeDelta::days(days);
    }
}

impl Clock for MutableClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *lock(&self.0)
    }
}

/// Completion double that answers from a queue of scripted results.
///
/// Once the queue is empty every call fails with a transport error.
#[derive(Debug, Default)]
pub struct ScriptedCompletion {
    responses: Mutex<VecDeque<Result<String, CompletionServiceError>>>,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl ScriptedCompletion {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful completion text.
    pub fn push_text(&self, text: impl Into<String>) {
        lock(&self.responses).push_back(Ok(text.into()));
    }

    /// Queue a failure.
    pub fn push_error(&self, error: CompletionServiceError) {
        lock(&self.responses).push_back(Err(error));
    }

    /// Prompts received so far.
    pub fn requests(&self) -> Vec<CompletionRequest> {
        lock(&self.requests).clone()
    }
}

#[async_trait]
impl TextCompletion for ScriptedCompletion {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, CompletionServiceError> {
        lock(&self.requests).push(request.clone());
        lock(&self.responses)
            .pop_front()
            .unwrap_or_else(|| Err(CompletionServiceError::transport("no scripted response left")))
    }
}
