//! Sequential pagination loop over the listing.

use std::time::Duration;

use catalog_core::RawProductRecord;

use crate::client::{log_fetch_failure, CatalogClient};
use crate::error::FetchFailureKind;
use crate::pagination::resolve_next_url;
use crate::parse::parse_listing_page;

/// Delay between consecutive page fetches.
pub const DEFAULT_PAGE_DELAY: Duration = Duration::from_secs(1);

#[derive(Debug, Clone)]
pub struct CrawlOptions {
    pub base_url: String,
    pub max_pages: usize,
    /// Sleep applied before every fetch except the first.
    pub page_delay: Duration,
}

impl CrawlOptions {
    #[must_use]
    pub fn new(base_url: impl Into<String>, max_pages: usize) -> Self {
        Self {
            base_url: base_url.into(),
            max_pages,
            page_delay: DEFAULT_PAGE_DELAY,
        }
    }

    #[must_use]
    pub fn with_page_delay(mut self, page_delay: Duration) -> Self {
        self.page_delay = page_delay;
        self
    }
}

/// Why a crawl ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StopReason {
    /// The last fetched page had no next-page link.
    NoNextLink,
    /// `max_pages` pages were processed.
    MaxPages,
    /// A fetch produced no content; earlier pages are still returned.
    FetchFailed {
        url: String,
        page: usize,
        kind: FetchFailureKind,
    },
    /// A next-page link could not be turned into a URL.
    UnresolvableNextLink { href: String },
}

impl StopReason {
    /// `true` for the natural ends of pagination.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        matches!(self, StopReason::NoNextLink | StopReason::MaxPages)
    }
}

/// Outcome of one crawl.
#[derive(Debug, Clone)]
pub struct CrawlReport {
    pub records: Vec<RawProductRecord>,
    pub pages_fetched: usize,
    pub stop_reason: StopReason,
    /// Stamp shared by every record of this run.
    pub timestamp: String,
}

/// Crawls the listing starting at `base_url` and returns only the records.
///
/// See [`crawl`] for the termination rules.
pub async fn scrape(
    client: &CatalogClient,
    base_url: &str,
    max_pages: usize,
) -> Vec<RawProductRecord> {
    crawl(client, &CrawlOptions::new(base_url, max_pages))
        .await
        .records
}

/// Walks the listing page by page, following in-page "next" links.
///
/// Stops when a page has no next link, after `max_pages` pages, or when a
/// fetch fails. A failed fetch is not an error: the records gathered from
/// earlier pages are returned and [`CrawlReport::stop_reason`] says what
/// happened. Every record is stamped with the same run timestamp.
pub async fn crawl(client: &CatalogClient, options: &CrawlOptions) -> CrawlReport {
    let timestamp = chrono::Local::now().to_rfc3339();
    let mut records: Vec<RawProductRecord> = Vec::new();
    let mut pages_fetched = 0usize;
    let mut current_url = options.base_url.clone();

    let stop_reason = loop {
        if pages_fetched >= options.max_pages {
            break StopReason::MaxPages;
        }

        if pages_fetched > 0 && !options.page_delay.is_zero() {
            tokio::time::sleep(options.page_delay).await;
        }

        let page = pages_fetched + 1;
        tracing::info!(page, url = %current_url, "scraping page");

        let html = match client.try_fetch_page(&current_url).await {
            Ok(html) => html,
            Err(err) => {
                log_fetch_failure(&current_url, &err);
                break StopReason::FetchFailed {
                    kind: err.fetch_kind().unwrap_or(FetchFailureKind::Other),
                    url: current_url,
                    page,
                };
            }
        };
        pages_fetched = page;

        let listing = tracing::info_span!("page", page, url = %current_url)
            .in_scope(|| parse_listing_page(&html, page));
        tracing::info!(page, cards = listing.records.len(), "parsed page");
        records.extend(listing.records.into_iter().map(|mut record| {
            record.timestamp = Some(timestamp.clone());
            record
        }));

        let Some(href) = listing.next_href else {
            break StopReason::NoNextLink;
        };
        match resolve_next_url(&options.base_url, &href) {
            Ok(next) => current_url = next,
            Err(reason) => {
                tracing::warn!(page, href = %href, reason = %reason, "cannot follow next-page link");
                break StopReason::UnresolvableNextLink { href };
            }
        }
    };

    tracing::info!(
        pages_fetched,
        records = records.len(),
        stop_reason = ?stop_reason,
        "crawl finished"
    );

    CrawlReport {
        records,
        pages_fetched,
        stop_reason,
        timestamp,
    }
}
