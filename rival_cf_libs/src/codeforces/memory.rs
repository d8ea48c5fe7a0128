use crate::codeforces::{
    core::{FetchError, SubmissionSource},
    model::{Submission, UserStatusResponse},
};
use async_trait::async_trait;
use std::{
    collections::HashMap,
    sync::atomic::{AtomicUsize, Ordering},
};

/// In-memory submission source for development/testing.
///
/// Handles are matched case-insensitively, like on Codeforces.
#[derive(Debug, Default)]
pub struct InMemorySource {
    histories: HashMap<String, std::result::Result<Vec<Submission>, FetchError>>,
    requests: AtomicUsize,
}

impl InMemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_submissions(mut self, handle: &str, submissions: Vec<Submission>) -> Self {
        self.histories
            .insert(handle.trim().to_lowercase(), Ok(submissions));
        self
    }

    pub fn with_failure(mut self, handle: &str, error: FetchError) -> Self {
        self.histories
            .insert(handle.trim().to_lowercase(), Err(error));
        self
    }

    /// Number of `user_status` calls answered so far.
    pub fn requests(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SubmissionSource for InMemorySource {
    async fn user_status(&self, handle: &str) -> std::result::Result<UserStatusResponse, FetchError> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        tokio::task::yield_now().await;

        match self.histories.get(&handle.trim().to_lowercase()) {
            Some(Ok(submissions)) => Ok(UserStatusResponse::ok(submissions.clone())),
            Some(Err(error)) => Err(error.clone()),
            None => Ok(UserStatusResponse::failed(format!(
                "handle: User with handle {} not found",
                handle
            ))),
        }
    }
}
