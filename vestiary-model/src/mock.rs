use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use vestiary_core::{DescribeRequest, DescribeResponse, DescriptionService, Result, VestiaryError};

/// Canned description service for tests.
///
/// Outcomes are popped in queue order; once the queue is drained every call
/// returns a fixed placeholder description. Calls and their requests are
/// recorded so tests can assert how the service was driven.
pub struct MockService {
    name: String,
    outcomes: Mutex<VecDeque<Result<DescribeResponse>>>,
    requests: Mutex<Vec<DescribeRequest>>,
    calls: AtomicUsize,
}

impl MockService {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            outcomes: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
        }
    }

    /// Queue a successful description.
    pub fn with_description(self, description: impl Into<String>) -> Self {
        self.outcomes
            .lock()
            .expect("outcome queue poisoned")
            .push_back(Ok(DescribeResponse::new(description)));
        self
    }

    /// Queue a service failure.
    pub fn with_error(self, message: impl Into<String>) -> Self {
        self.outcomes
            .lock()
            .expect("outcome queue poisoned")
            .push_back(Err(VestiaryError::Service(message.into())));
        self
    }

    /// Number of describe calls made so far.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Requests received so far, in call order.
    pub fn requests(&self) -> Vec<DescribeRequest> {
        self.requests.lock().expect("request log poisoned").clone()
    }
}

#[async_trait]
impl DescriptionService for MockService {
    fn name(&self) -> &str {
        &self.name
    }

    async fn describe(&self, request: DescribeRequest) -> Result<DescribeResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().expect("request log poisoned").push(request);
        self.outcomes
            .lock()
            .expect("outcome queue poisoned")
            .pop_front()
            .unwrap_or_else(|| Ok(DescribeResponse::new("mock description")))
    }
}
