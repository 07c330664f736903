//! Paginated fetch engine
//!
//! Drives a [`PageFetcher`] across pages until the server-declared total has
//! been gathered. Retry policy lives here, not in the request executor: the
//! correct recovery for a server-side timeout is to shrink the page size and
//! reissue the same page, and the page-size state is owned by this loop.

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, warn};

use crate::client::pagination::PageQuery;
use crate::error::{ApiError, Error, Result};

/// Fixed delay slept before each retry (not exponential).
pub const DEFAULT_BACKOFF: Duration = Duration::from_secs(5);

/// Attempts per page, including the first.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;

/// Retry policy for paginated fetches and write retries.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Delay before each retry
    pub backoff: Duration,
    /// Maximum attempts per page/request, including the first
    pub max_attempts: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            backoff: DEFAULT_BACKOFF,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

/// One page of results plus the server-declared total, when present.
#[derive(Debug, Clone)]
pub struct Page<T> {
    /// Records in server order
    pub items: Vec<T>,
    /// `meta.total-count` from the response, if the endpoint reports one
    pub total_count: Option<u64>,
}

/// Seam between the paginator and the request executor.
///
/// Implementations issue exactly one request per call and classify failures
/// via [`ApiError`]; they must not retry internally.
#[async_trait]
pub trait PageFetcher<T>: Send + Sync {
    async fn fetch_page(&self, query: &PageQuery) -> Result<Page<T>>;
}

/// Fetch every page of a collection, in page order.
///
/// Termination is driven by the aggregate length reaching the declared
/// `total-count`; `total-pages` is advisory only. Endpoints that declare no
/// total stop at the first short or empty page.
///
/// A fatal error discards anything already aggregated. The one exception is
/// a server that declares more items than it delivers: that returns what was
/// gathered, with a warning.
pub async fn fetch_all<T, F>(
    fetcher: &F,
    mut query: PageQuery,
    policy: &RetryPolicy,
) -> Result<Vec<T>>
where
    T: Send,
    F: PageFetcher<T> + ?Sized,
{
    let mut aggregate: Vec<T> = Vec::new();
    let mut declared: Option<u64> = None;
    query.page_number = 1;

    loop {
        let page = fetch_page_with_retry(fetcher, &mut query, policy).await?;

        // The probe page establishes the total; later pages may disagree
        // once records churn server-side, so the first answer wins.
        if declared.is_none() {
            declared = page.total_count;
        }
        let got = page.items.len();
        aggregate.extend(page.items);

        let Some(total) = declared else {
            if got == 0 || (got as u64) < u64::from(query.page_size) {
                return Ok(aggregate);
            }
            query.page_number += 1;
            continue;
        };

        // Nothing beyond the probe page can exist.
        if total <= 1 {
            return Ok(aggregate);
        }

        if aggregate.len() as u64 >= total {
            return Ok(aggregate);
        }

        if got == 0 {
            warn!(
                "server declared {total} items but stopped after {}; returning what was gathered",
                aggregate.len()
            );
            return Ok(aggregate);
        }

        query.page_number += 1;
    }
}

/// Fetch one page, retrying on retryable errors per the policy.
///
/// Timeouts halve the page size (round-half-up) before the retry; rate
/// limits retry at the same size. Both sleep the fixed back-off first.
async fn fetch_page_with_retry<T, F>(
    fetcher: &F,
    query: &mut PageQuery,
    policy: &RetryPolicy,
) -> Result<Page<T>>
where
    T: Send,
    F: PageFetcher<T> + ?Sized,
{
    let mut attempts = 0u32;

    loop {
        attempts += 1;
        let err = match fetcher.fetch_page(query).await {
            Ok(page) => {
                debug!(
                    "page {}: {} items at size {}",
                    query.page_number,
                    page.items.len(),
                    query.page_size
                );
                return Ok(page);
            }
            Err(Error::Api(err)) if err.is_retryable() => err,
            Err(other) => return Err(other),
        };

        match err {
            ApiError::Timeout(detail) => {
                if query.page_size <= 1 {
                    return Err(ApiError::PageSizeExhausted.into());
                }
                if attempts >= policy.max_attempts {
                    return Err(ApiError::RetryLimitReached.into());
                }
                let next = query.page_size.div_ceil(2);
                warn!(
                    "page {} timed out at size {} ({detail}); retrying at size {next}",
                    query.page_number, query.page_size
                );
                query.page_size = next;
            }
            ApiError::RateLimited(detail) => {
                if attempts >= policy.max_attempts {
                    return Err(ApiError::RetryLimitReached.into());
                }
                warn!(
                    "rate limited on page {} ({detail}); retrying in {:?}",
                    query.page_number, policy.backoff
                );
            }
            _ => unreachable!("is_retryable() only covers Timeout and RateLimited"),
        }

        tokio::time::sleep(policy.backoff).await;
    }
}
