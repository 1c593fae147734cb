//! Authenticated request issuer
//!
//! Wraps every backend call with the session's bearer token. A 401 from any
//! endpoint expires the issuer: the user is alerted once, the stored session
//! is cleared, navigation goes to login, and every later call on this issuer
//! fails with [`ApiError::Unauthorized`] without touching the network.

use super::Navigator;
use crate::api::{ApiError, ApiRequest, ApiResponse, Transport, resolve_url};
use crate::consts::dashboard_consts::SESSION_EXPIRED_MESSAGE;
use crate::session::{Session, SessionStore};
use log::{debug, error};
use reqwest::Method;
use serde::Serialize;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

pub struct AuthenticatedIssuer {
    transport: Arc<dyn Transport>,
    session: Session,
    store: SessionStore,
    navigator: Arc<dyn Navigator>,
    expired: AtomicBool,
}

impl AuthenticatedIssuer {
    pub fn new(
        transport: Arc<dyn Transport>,
        session: Session,
        store: SessionStore,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            transport,
            session,
            store,
            navigator,
            expired: AtomicBool::new(false),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// True once any request on this issuer has come back 401.
    pub fn is_expired(&self) -> bool {
        self.expired.load(Ordering::Acquire)
    }

    /// Issues one request.
    ///
    /// Returns the raw response for every status except 401. A JSON
    /// content-type is added when a body is present and the caller did not
    /// name one.
    pub async fn issue(
        &self,
        method: Method,
        path: &str,
        body: Option<Vec<u8>>,
        headers: Vec<(String, String)>,
    ) -> Result<ApiResponse, ApiError> {
        if self.is_expired() {
            return Err(ApiError::Unauthorized);
        }

        let url = resolve_url(self.transport.base_url(), path);
        let mut request = ApiRequest::new(method, url);
        request.headers = headers;
        request = request.with_header(
            "Authorization",
            format!("Bearer {}", self.session.token),
        );
        if let Some(body) = body {
            if request.header("Content-Type").is_none() {
                request = request.with_header("Content-Type", "application/json");
            }
            request = request.with_body(body);
        }

        debug!("{} {}", request.method, request.url);
        let response = self.transport.send(request).await?;
        if response.status == 401 {
            self.expire();
            return Err(ApiError::Unauthorized);
        }
        Ok(response)
    }

    pub async fn get(&self, path: &str) -> Result<ApiResponse, ApiError> {
        self.issue(Method::GET, path, None, Vec::new()).await
    }

    /// Sends a JSON body and requires a 2xx answer.
    pub async fn send_json<B: Serialize>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<ApiResponse, ApiError> {
        let bytes = serde_json::to_vec(body).map_err(|e| ApiError::Decode(e.to_string()))?;
        self.issue(method, path, Some(bytes), Vec::new())
            .await?
            .error_for_status()
    }

    /// Sends a bodiless mutation (`POST .../approve`, `DELETE ...`) and requires a 2xx answer.
    pub async fn send_empty(&self, method: Method, path: &str) -> Result<ApiResponse, ApiError> {
        self.issue(method, path, None, Vec::new())
            .await?
            .error_for_status()
    }

    fn expire(&self) {
        if self
            .expired
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return;
        }
        self.navigator.alert(SESSION_EXPIRED_MESSAGE);
        if let Err(e) = self.store.clear() {
            error!("Could not clear the expired session: {}", e);
        }
        self.navigator.redirect_to_login();
    }
}
