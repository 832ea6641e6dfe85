//! Mock transport implementation for testing.
//!
//! This module provides a mock transport that operates entirely in-memory,
//! allowing tests to run without network dependencies.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;

use super::traits::{Request, Response, TransportClient};
use crate::Error;

/// Mock transport for testing.
///
/// Replies are served in FIFO order from a queue filled with
/// [`push_response`](Self::push_response). Every request is recorded so tests
/// can assert on methods, URLs, headers and bodies. When the queue is empty
/// the next request fails with a connection error.
///
/// ## Example
///
/// ```rust
/// use sensu_go::testing::MockTransport;
///
/// let mock = MockTransport::new();
/// mock.push_json(200, serde_json::json!({"metadata": {"name": "default"}}));
/// assert_eq!(mock.pending(), 1);
/// ```
pub struct MockTransport {
    /// Canned replies.
    responses: Mutex<VecDeque<Result<Response, Error>>>,
    /// Requests received so far.
    requests: Mutex<Vec<Request>>,
    /// Request counter.
    request_count: AtomicU64,
}

impl MockTransport {
    /// Creates a new mock transport with an empty reply queue.
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
            request_count: AtomicU64::new(0),
        }
    }

    /// Queues a reply.
    ///
    /// The reply's URL is replaced by the request URL when it is served, so
    /// the URL passed to [`Response::new`] does not matter.
    pub fn push_response(&self, response: Response) {
        self.responses.lock().push_back(Ok(response));
    }

    /// Queues a reply with a JSON body.
    pub fn push_json(&self, status: u16, body: serde_json::Value) {
        self.push_response(Response::new("", status, body.to_string()));
    }

    /// Queues a reply with a plain body.
    pub fn push_status(&self, status: u16, text: impl Into<String>) {
        self.push_response(Response::new("", status, text));
    }

    /// Queues a transport failure.
    pub fn push_error(&self, error: Error) {
        self.responses.lock().push_back(Err(error));
    }

    /// Returns the number of queued replies not yet served.
    pub fn pending(&self) -> usize {
        self.responses.lock().len()
    }

    /// Returns the number of requests made.
    pub fn request_count(&self) -> u64 {
        self.request_count.load(Ordering::Relaxed)
    }

    /// Returns a copy of every request received, oldest first.
    pub fn requests(&self) -> Vec<Request> {
        self.requests.lock().clone()
    }

    /// Returns the most recent request, if any.
    pub fn last_request(&self) -> Option<Request> {
        self.requests.lock().last().cloned()
    }
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for MockTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockTransport")
            .field("pending", &self.pending())
            .field("request_count", &self.request_count())
            .finish()
    }
}

#[async_trait::async_trait]
impl TransportClient for MockTransport {
    async fn send(&self, request: Request) -> Result<Response, Error> {
        self.request_count.fetch_add(1, Ordering::Relaxed);
        let url = request.url.to_string();
        self.requests.lock().push(request);

        let next = self.responses.lock().pop_front();
        match next {
            Some(Ok(response)) => {
                let served = Response::new(url, response.status(), response.text());
                Ok(response
                    .headers()
                    .iter()
                    .fold(served, |resp, (k, v)| resp.with_header(k.clone(), v.clone())))
            }
            Some(Err(error)) => Err(error),
            None => Err(Error::connection(format!("no mock response queued for {}", url))),
        }
    }
}
