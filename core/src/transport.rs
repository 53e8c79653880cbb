//! Executes built requests against the network.
//!
//! # Design
//! The codec never performs I/O; a `Transport` turns an `HttpRequest` into an
//! `HttpResponse`. HTTP error statuses are data, not transport failures, so
//! the codec stays the only place that interprets status codes.

use ureq::typestate::WithBody;
use ureq::{Agent, RequestBuilder};

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

/// Performs one HTTP round-trip.
///
/// Implementations must be shareable across threads: the startup fetches
/// run concurrently against the same transport.
pub trait Transport: Send + Sync {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError>;
}

/// Blocking transport backed by a `ureq` agent.
#[derive(Debug, Clone)]
pub struct UreqTransport {
    agent: Agent,
}

impl UreqTransport {
    pub fn new() -> Self {
        // 4xx/5xx come back as responses so the codec can classify them.
        let agent = Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for UreqTransport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
        let path = request.path.as_str();
        let body = request.body.as_deref();
        let result = match request.method {
            HttpMethod::Get => with_headers(self.agent.get(path), &request.headers).call(),
            HttpMethod::Delete => with_headers(self.agent.delete(path), &request.headers).call(),
            HttpMethod::Post => send(with_headers(self.agent.post(path), &request.headers), body),
            HttpMethod::Patch => send(with_headers(self.agent.patch(path), &request.headers), body),
        };
        let mut response = result.map_err(|e| ApiError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

fn with_headers<B>(mut builder: RequestBuilder<B>, headers: &[(String, String)]) -> RequestBuilder<B> {
    for (name, value) in headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    builder
}

fn send(
    builder: RequestBuilder<WithBody>,
    body: Option<&str>,
) -> Result<ureq::http::Response<ureq::Body>, ureq::Error> {
    match body {
        Some(body) => builder.send(body.as_bytes()),
        None => builder.send_empty(),
    }
}

#[cfg(test)]
pub(crate) mod scripted {
    use std::sync::Mutex;

    use super::*;

    type Reply = Result<HttpResponse, String>;

    /// In-memory transport answering from a queue of canned replies.
    ///
    /// Replies are matched by method and path suffix, first queued first
    /// served, so concurrent callers get deterministic answers regardless of
    /// the order they arrive in.
    #[derive(Default)]
    pub(crate) struct ScriptedTransport {
        replies: Mutex<Vec<(HttpMethod, String, Reply)>>,
        panics: Mutex<Vec<(HttpMethod, String)>>,
        seen: Mutex<Vec<HttpRequest>>,
    }

    impl ScriptedTransport {
        pub(crate) fn new() -> Self {
            Self::default()
        }

        pub(crate) fn reply(self, method: HttpMethod, path: &str, status: u16, body: &str) -> Self {
            self.push(
                method,
                path,
                Ok(HttpResponse {
                    status,
                    headers: Vec::new(),
                    body: body.to_string(),
                }),
            );
            self
        }

        pub(crate) fn fail(self, method: HttpMethod, path: &str, reason: &str) -> Self {
            self.push(method, path, Err(reason.to_string()));
            self
        }

        /// Makes the calling thread panic instead of answering.
        pub(crate) fn panic_on(self, method: HttpMethod, path: &str) -> Self {
            self.panics.lock().unwrap().push((method, path.to_string()));
            self
        }

        pub(crate) fn push(&self, method: HttpMethod, path: &str, reply: Reply) {
            self.replies
                .lock()
                .unwrap()
                .push((method, path.to_string(), reply));
        }

        pub(crate) fn requests(&self) -> Vec<HttpRequest> {
            self.seen.lock().unwrap().clone()
        }

        pub(crate) fn last_request(&self) -> HttpRequest {
            self.requests().pop().expect("no request was issued")
        }
    }

    impl Transport for ScriptedTransport {
        fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
            // no lock may be held when panicking, or the other worker trips on poison
            let doomed = self
                .panics
                .lock()
                .unwrap()
                .iter()
                .any(|(method, path)| *method == request.method && request.path.ends_with(path.as_str()));
            if doomed {
                panic!("scripted panic for {} {}", request.method, request.path);
            }
            self.seen.lock().unwrap().push(request.clone());
            let mut replies = self.replies.lock().unwrap();
            let index = replies
                .iter()
                .position(|(method, path, _)| *method == request.method && request.path.ends_with(path.as_str()))
                .ok_or_else(|| {
                    ApiError::Transport(format!("no scripted reply for {} {}", request.method, request.path))
                })?;
            let (_, _, reply) = replies.remove(index);
            reply.map_err(ApiError::Transport)
        }
    }
}
