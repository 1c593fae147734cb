//! Scripted transport for tests.
//!
//! Routes are keyed by path (the URL with the base stripped). Each route can
//! carry a delay so tests control the order in which concurrent requests
//! settle.

use super::{ApiError, ApiRequest, ApiResponse, Transport};
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

pub const BASE_URL: &str = "http://backend.test";

#[derive(Debug, Clone)]
enum Reply {
    Status(u16, String),
    Error(ApiError),
}

#[derive(Debug, Default)]
pub struct ScriptedTransport {
    routes: HashMap<String, (Duration, Reply)>,
    log: Mutex<Vec<ApiRequest>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn route(self, path: &str, status: u16, body: impl Into<String>) -> Self {
        self.route_delayed(path, 0, status, body)
    }

    pub fn route_delayed(
        mut self,
        path: &str,
        delay_ms: u64,
        status: u16,
        body: impl Into<String>,
    ) -> Self {
        self.routes.insert(
            path.to_string(),
            (
                Duration::from_millis(delay_ms),
                Reply::Status(status, body.into()),
            ),
        );
        self
    }

    pub fn fail(mut self, path: &str, error: ApiError) -> Self {
        self.routes
            .insert(path.to_string(), (Duration::ZERO, Reply::Error(error)));
        self
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.log.lock().unwrap().clone()
    }

    pub fn count(&self, path: &str) -> usize {
        let url = format!("{}{}", BASE_URL, path);
        self.log
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.url == url)
            .count()
    }
}

#[async_trait::async_trait]
impl Transport for ScriptedTransport {
    fn base_url(&self) -> &str {
        BASE_URL
    }

    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        let path = request
            .url
            .strip_prefix(BASE_URL)
            .unwrap_or(&request.url)
            .to_string();
        self.log.lock().unwrap().push(request);

        let Some((delay, reply)) = self.routes.get(&path).cloned() else {
            return Ok(ApiResponse::new(500, format!("no route for {}", path)));
        };
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        match reply {
            Reply::Status(status, body) => Ok(ApiResponse::new(status, body)),
            Reply::Error(e) => Err(e),
        }
    }
}
