use corefacility_core::transport::{Method, Request};
use std::sync::{Arc, Mutex};

/// Every request the mock transport received, oldest first.
#[derive(Debug, Clone, Default)]
pub struct RequestLog {
    requests: Arc<Mutex<Vec<Request>>>,
}

impl RequestLog {
    pub(crate) fn push(&self, request: Request) {
        self.requests.lock().unwrap().push(request);
    }

    /// Get the number of logged requests
    pub fn len(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.requests.lock().unwrap().is_empty()
    }

    /// Check if any request matches the given predicate
    pub fn any<F>(&self, predicate: F) -> bool
    where
        F: Fn(&Request) -> bool,
    {
        self.requests.lock().unwrap().iter().any(predicate)
    }

    /// Count requests sent with the given method
    pub fn count(&self, method: Method) -> usize {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|request| request.method == method)
            .count()
    }

    pub fn clear(&mut self) {
        self.requests.lock().unwrap().clear();
    }

    /// Remove and return the oldest request. Panics if nothing was sent.
    #[track_caller]
    pub fn pop(&mut self) -> Request {
        let mut requests = self.requests.lock().unwrap();
        assert!(!requests.is_empty(), "expected a request, but none was sent");
        requests.remove(0)
    }
}
