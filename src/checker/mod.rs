//! Concurrent link verification.
//!
//! Probes every URL of a sitemap with bounded concurrency and classifies
//! each as healthy, redirecting, or broken. A probe is HEAD-first with a
//! single GET fallback for servers that reject HEAD; redirects are never
//! followed so the redirect status itself is observed.
//!
//! No probe failure aborts the batch: every URL yields exactly one
//! `LinkCheckResult`, with failures folded into its `error` field.

pub mod result;


pub use result::LinkCheckResult;

use anyhow::{Context, Result};
use parking_lot::Mutex;
use reqwest::{Client, Method, header};
use std::sync::Arc;
use std::time::{Duration, Instant};
use thiserror::Error;
use tokio::sync::{Semaphore, watch};

pub const DEFAULT_CONCURRENCY: usize = 12;
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(12);

const USER_AGENT: &str = concat!("sitemapper/", env!("CARGO_PKG_VERSION"));

/// Statuses that mean "this server dislikes HEAD", worth one GET retry
const HEAD_FALLBACK_STATUSES: [u16; 3] = [405, 501, 403];

/// Probe tuning knobs.
///
/// The timeout applies per HTTP attempt (HEAD and the optional GET
/// individually), not per URL.
#[derive(Debug, Clone)]
pub struct CheckOptions {
    pub concurrency: usize,
    pub timeout: Duration,
}

impl Default for CheckOptions {
    fn default() -> Self {
        Self {
            concurrency: DEFAULT_CONCURRENCY,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// External cancellation signal for an in-flight batch.
///
/// Send `true` to cancel; pending and queued probes resolve with a
/// `Canceled` error, distinguishable from a per-attempt `Timeout`.
pub fn cancel_channel() -> (watch::Sender<bool>, watch::Receiver<bool>) {
    watch::channel(false)
}

/// Why a probe produced no response. Always recovered into the result's
/// `error` field, never raised out of the engine.
#[derive(Debug, Error)]
enum ProbeError {
    #[error("Timeout")]
    Timeout,

    #[error("Canceled")]
    Canceled,

    #[error("{0}")]
    Network(String),
}

/// Probe every URL with bounded concurrency.
///
/// Returns one result per input URL (duplicates produce duplicate
/// results) in completion order; callers sort for presentation.
pub async fn check(
    urls: Vec<String>,
    options: &CheckOptions,
    cancel: watch::Receiver<bool>,
) -> Result<Vec<LinkCheckResult>> {
    // Redirects disabled so the redirect status itself is observable.
    // Configured once before any task starts, shared read-only afterwards.
    let client = Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .timeout(options.timeout)
        .user_agent(USER_AGENT)
        .build()
        .context("failed to build HTTP client")?;

    let semaphore = Arc::new(Semaphore::new(options.concurrency.max(1)));
    let results = Arc::new(Mutex::new(Vec::with_capacity(urls.len())));

    let mut handles = Vec::with_capacity(urls.len());
    for url in urls {
        let client = client.clone();
        let semaphore = Arc::clone(&semaphore);
        let results = Arc::clone(&results);
        let mut cancel = cancel.clone();

        handles.push(tokio::spawn(async move {
            // The semaphore is never closed; a failed acquire still probes
            // rather than losing the URL's result
            let _permit = semaphore.acquire_owned().await.ok();
            let result = probe(&client, &url, &mut cancel).await;
            results.lock().push(result);
        }));
    }

    for handle in handles {
        let _ = handle.await;
    }

    Ok(Arc::try_unwrap(results).unwrap().into_inner())
}

/// Probe one URL: HEAD, then at most one GET fallback.
async fn probe(
    client: &Client,
    url: &str,
    cancel: &mut watch::Receiver<bool>,
) -> LinkCheckResult {
    let started = Instant::now();

    let head = match send(client, Method::HEAD, url, cancel).await {
        Ok(response) => response,
        Err(err) => {
            return LinkCheckResult::failed(url.to_string(), err.to_string(), elapsed_ms(started));
        }
    };

    let response = if HEAD_FALLBACK_STATUSES.contains(&head.status().as_u16()) {
        match send(client, Method::GET, url, cancel).await {
            Ok(response) => response,
            Err(err) => {
                return LinkCheckResult::failed(
                    url.to_string(),
                    err.to_string(),
                    elapsed_ms(started),
                );
            }
        }
    } else {
        head
    };

    build_result(url, &response, started)
}

/// Issue one request, racing it against the cancellation signal.
///
/// The response body is never read; classification needs only status and
/// headers.
async fn send(
    client: &Client,
    method: Method,
    url: &str,
    cancel: &mut watch::Receiver<bool>,
) -> std::result::Result<reqwest::Response, ProbeError> {
    tokio::select! {
        biased;
        () = cancelled(cancel) => Err(ProbeError::Canceled),
        response = client.request(method, url).send() => {
            response.map_err(|err| classify(&err))
        }
    }
}

/// Resolve when the external cancellation signal fires.
async fn cancelled(cancel: &mut watch::Receiver<bool>) {
    // A dropped sender means cancellation can no longer happen
    if cancel.wait_for(|canceled| *canceled).await.is_err() {
        std::future::pending::<()>().await;
    }
}

fn classify(err: &reqwest::Error) -> ProbeError {
    if err.is_timeout() {
        return ProbeError::Timeout;
    }
    ProbeError::Network(describe(err))
}

/// Human-readable failure description: the error plus its source chain.
fn describe(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

fn build_result(url: &str, response: &reqwest::Response, started: Instant) -> LinkCheckResult {
    let status = response.status().as_u16();
    let is_redirect = matches!(status, 301 | 302 | 307 | 308);
    let redirect_location = if is_redirect {
        response
            .headers()
            .get(header::LOCATION)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string)
    } else {
        None
    };

    LinkCheckResult {
        url: url.to_string(),
        status: Some(status),
        is_redirect,
        redirect_location,
        is_broken: status == 404,
        error: None,
        elapsed_ms: elapsed_ms(started),
    }
}

fn elapsed_ms(started: Instant) -> u64 {
    started.elapsed().as_millis() as u64
}
