//! HTTP retry helper for transient errors.
//!
//! Fetchers use [`send_text`] instead of calling
//! `reqwest::RequestBuilder::send()` directly, so every request gets
//! automatic retry with backoff for transient failures (timeouts,
//! connection resets, server errors, rate limiting) and a per-attempt
//! timeout that aborts the in-flight request.

use std::time::Duration;

use crate::SourceError;

/// Maximum number of retry attempts after the initial request.
const MAX_RETRIES: u32 = 2;

/// Backoff grows linearly: 800 ms after the first failure, 1600 ms after
/// the second.
const BACKOFF_STEP: Duration = Duration::from_millis(800);

/// Per-attempt timeout. Applies to each attempt individually; a timed-out
/// attempt counts as transient and is retried.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Sends an HTTP request and returns the response body as a `String`.
///
/// The `build_request` closure is called on each attempt to construct a
/// fresh [`reqwest::RequestBuilder`] (builders are consumed by `.send()`).
/// Retries are sequential, never concurrent. Transient errors and HTTP
/// 429/5xx are retried up to [`MAX_RETRIES`] times; other 4xx statuses
/// are permanent and fail immediately.
///
/// # Errors
///
/// Returns [`SourceError`] if the request fails after all retries, the
/// server returns a non-retryable status, or the body cannot be read.
#[allow(clippy::future_not_send)]
pub async fn send_text<F>(build_request: F) -> Result<String, SourceError>
where
    F: Fn() -> reqwest::RequestBuilder,
{
    let mut last_error: Option<SourceError> = None;

    for attempt in 0..=MAX_RETRIES {
        if attempt > 0 {
            let delay = BACKOFF_STEP * attempt;
            log::warn!("  retry {attempt}/{MAX_RETRIES} in {delay:?}...");
            tokio::time::sleep(delay).await;
        }

        let result = build_request().timeout(REQUEST_TIMEOUT).send().await;

        match result {
            Err(e) => {
                if is_transient(&e) && attempt < MAX_RETRIES {
                    log::warn!("  transient error: {e}");
                    last_error = Some(SourceError::Http(e));
                    continue;
                }
                return Err(SourceError::Http(e));
            }
            Ok(response) => {
                let status = response.status();

                // 429 and 5xx are worth retrying; other 4xx are permanent
                if status == reqwest::StatusCode::TOO_MANY_REQUESTS || status.is_server_error() {
                    if attempt < MAX_RETRIES {
                        log::warn!("  HTTP {status}");
                        last_error = Some(SourceError::Fetch {
                            message: format!("HTTP {status}"),
                        });
                        continue;
                    }
                    return Err(SourceError::Fetch {
                        message: format!("HTTP {status} after {MAX_RETRIES} retries"),
                    });
                }

                if status.is_client_error() {
                    return Err(SourceError::Fetch {
                        message: format!("HTTP {status}"),
                    });
                }

                return response.text().await.map_err(SourceError::Http);
            }
        }
    }

    Err(last_error.unwrap_or_else(|| SourceError::Fetch {
        message: "request failed after all retries".to_string(),
    }))
}

/// Returns `true` if the error is likely transient and worth retrying.
fn is_transient(e: &reqwest::Error) -> bool {
    e.is_timeout() || e.is_connect() || e.is_body() || e.is_decode() || e.is_request()
}
