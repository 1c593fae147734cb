//! Resource aggregator
//!
//! A primary fetch anchors every view and is fatal when it fails. Per-item
//! secondary fetches are issued together, awaited as one batch, and each
//! settles into its own [`FetchOutcome`] so that one failure cannot abort
//! its siblings. Views come back in primary order.

use super::outcome::{FetchOutcome, Lookup, classify};
use crate::api::ApiError;
use crate::network::{AuthenticatedIssuer, ErrorHandler};
use futures::future::join_all;
use log::{debug, log};
use serde::de::DeserializeOwned;
use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Merged views plus diagnostics about how the secondary fetches settled.
#[derive(Debug, Clone, PartialEq)]
pub struct Aggregated<V> {
    pub views: Vec<V>,
    /// Secondary fetches that failed and were replaced by defaults.
    pub failed: usize,
    /// Optional lookups that found nothing. Never counted as failures.
    pub skipped: usize,
}

pub struct Aggregator<'a> {
    issuer: &'a AuthenticatedIssuer,
    error_handler: ErrorHandler,
    failed: AtomicUsize,
    skipped: AtomicUsize,
}

impl<'a> Aggregator<'a> {
    pub fn new(issuer: &'a AuthenticatedIssuer) -> Self {
        Self {
            issuer,
            error_handler: ErrorHandler::new(),
            failed: AtomicUsize::new(0),
            skipped: AtomicUsize::new(0),
        }
    }

    /// Fetches a primary entity. Any failure is returned as the view's single error.
    pub async fn primary<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.issuer.get(path).await?.error_for_status()?.json()
    }

    /// Fetches a primary collection. `204` and `null` read as an empty collection.
    pub async fn primary_list<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>, ApiError> {
        self.issuer
            .get(path)
            .await?
            .error_for_status()?
            .json_list()
    }

    /// Fetches one secondary resource. Never fails; the outcome says what happened.
    pub async fn secondary<T: DeserializeOwned>(
        &self,
        path: &str,
        lookup: Lookup,
    ) -> FetchOutcome<T> {
        let outcome = classify(self.issuer.get(path).await, lookup);
        match &outcome {
            FetchOutcome::Success(_) => {}
            FetchOutcome::Skipped => {
                self.skipped.fetch_add(1, Ordering::Relaxed);
                debug!("No value at {}", path);
            }
            FetchOutcome::Failed(e) => {
                self.failed.fetch_add(1, Ordering::Relaxed);
                let level: log::Level = self.error_handler.classify_error(e).into();
                log!(level, "Secondary fetch {} failed, using defaults: {}", path, e);
            }
        }
        outcome
    }

    /// Runs `enrich` for every primary item concurrently and waits for all of them.
    ///
    /// `enrich` issues the item's secondary fetches and merges them into a
    /// view; it cannot fail. Output order equals input order regardless of
    /// completion order.
    pub async fn fan_out<P, V, F, Fut>(
        &self,
        items: Vec<P>,
        enrich: F,
    ) -> Result<Aggregated<V>, ApiError>
    where
        F: Fn(P) -> Fut,
        Fut: Future<Output = V>,
    {
        let views = join_all(items.into_iter().map(enrich)).await;
        self.finish(views)
    }

    /// Closes the batch. A session that expired mid-batch tears the view down.
    pub fn finish<V>(&self, views: Vec<V>) -> Result<Aggregated<V>, ApiError> {
        if self.issuer.is_expired() {
            return Err(ApiError::Unauthorized);
        }
        Ok(Aggregated {
            views,
            failed: self.failed.load(Ordering::Relaxed),
            skipped: self.skipped.load(Ordering::Relaxed),
        })
    }

    /// [`Self::finish`] for a view built from a single primary.
    pub fn finish_one<V>(&self, view: V) -> Result<V, ApiError> {
        if self.issuer.is_expired() {
            return Err(ApiError::Unauthorized);
        }
        Ok(view)
    }
}
