use async_trait::async_trait;
use thiserror::Error;

/// Raw answer of the fetch collaborator: status code plus undecoded body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl FetchResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self { status, body: body.into() }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[derive(Debug, Error)]
pub enum FetchError {
    /// No response was received (DNS, connect, timeout, unresolvable location).
    #[error("{0}")]
    Transport(String),
    /// The collaborator itself could not be constructed.
    #[error("client error: {0}")]
    Client(String),
}

/// "HTTP GET" capability the store consumes. TLS, redirects and timeouts are
/// the implementor's business.
#[async_trait]
pub trait Fetch: Send + Sync {
    async fn get(&self, location: &str) -> Result<FetchResponse, FetchError>;
}

/// Simple in-memory fetcher for tests and doc examples
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::time::Duration;

    #[derive(Debug, Clone)]
    enum Reply {
        Respond(FetchResponse),
        Fail(String),
    }

    #[derive(Default)]
    pub struct MockFetcher {
        replies: Mutex<HashMap<String, (Reply, Option<Duration>)>>, // key: location
        requests: Mutex<Vec<String>>,
    }

    impl MockFetcher {
        pub fn new() -> Self { Self::default() }

        /// Answer `location` with the given status and body.
        pub fn respond(&self, location: &str, status: u16, body: impl Into<Vec<u8>>) -> &Self {
            self.insert(location, Reply::Respond(FetchResponse::new(status, body)), None)
        }

        /// Like `respond`, but the answer arrives only after `delay`.
        pub fn respond_after(&self, location: &str, delay: Duration, status: u16, body: impl Into<Vec<u8>>) -> &Self {
            self.insert(location, Reply::Respond(FetchResponse::new(status, body)), Some(delay))
        }

        /// Fail `location` with a transport error.
        pub fn fail(&self, location: &str, reason: &str) -> &Self {
            self.insert(location, Reply::Fail(reason.to_string()), None)
        }

        /// Every location requested so far, in request order.
        pub fn requests(&self) -> Vec<String> {
            self.requests.lock().unwrap().clone()
        }

        fn insert(&self, location: &str, reply: Reply, delay: Option<Duration>) -> &Self {
            self.replies.lock().unwrap().insert(location.to_string(), (reply, delay));
            self
        }
    }

    #[async_trait]
    impl Fetch for MockFetcher {
        async fn get(&self, location: &str) -> Result<FetchResponse, FetchError> {
            self.requests.lock().unwrap().push(location.to_string());
            let entry = self.replies.lock().unwrap().get(location).cloned();
            let Some((reply, delay)) = entry else {
                return Ok(FetchResponse::new(404, Vec::<u8>::new()));
            };
            if let Some(delay) = delay {
                tokio::time::sleep(delay).await;
            }
            match reply {
                Reply::Respond(response) => Ok(response),
                Reply::Fail(reason) => Err(FetchError::Transport(reason)),
            }
        }
    }
}
