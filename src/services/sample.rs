//! Sample Records
//!
//! Offline record source used when no endpoint is configured. Pages are
//! generated deterministically and delivered after a short delay so loading
//! states are visible.

use std::time::Duration;

use chrono::{Duration as ChronoDuration, Utc};
use futures::FutureExt;
use futures::future::BoxFuture;

use super::RecordFetcher;
use crate::domain::{FetchRequest, FetchResult, Record, RecordId};
use crate::error::Result;

const PROVIDERS: [&str; 3] = ["knowledge_mixer", "salesforce", "slack"];

/// Generates `total` synthetic records
#[derive(Debug, Clone)]
pub struct SampleRecordFetcher {
    total: usize,
    latency: Duration,
}

impl SampleRecordFetcher {
    pub fn new(total: usize, latency: Duration) -> Self {
        Self { total, latency }
    }

    /// Build the rows of one page
    pub fn page(&self, request: FetchRequest) -> FetchResult {
        let now = Utc::now();
        let start = request.offset().min(self.total);
        let end = start.saturating_add(request.page_size).min(self.total);

        let rows = (start..end)
            .map(|index| {
                let id = (self.total - index) as i64;
                let requested = now - ChronoDuration::minutes(id * 7);
                let status = match id % 5 {
                    0 => "failed",
                    3 => "error",
                    4 => "running",
                    _ => "succeeded",
                };
                let finished = status != "running";
                let error_message = (status == "failed" || status == "error").then(|| {
                    format!(
                        "Upstream rejected batch #{id}: quota exceeded while syncing knowledge items"
                    )
                });

                Record {
                    id: Some(RecordId::Number(id)),
                    provider: Some(PROVIDERS[index % PROVIDERS.len()].to_string()),
                    status: Some(status.to_string()),
                    error_message,
                    requested_at: Some(requested.to_rfc3339()),
                    completed_at: finished
                        .then(|| (requested + ChronoDuration::seconds(42)).to_rfc3339()),
                    updated_at: Some((requested + ChronoDuration::seconds(45)).to_rfc3339()),
                }
            })
            .collect();

        FetchResult {
            rows,
            total: self.total,
        }
    }
}

impl Default for SampleRecordFetcher {
    fn default() -> Self {
        Self::new(137, Duration::from_millis(450))
    }
}

impl RecordFetcher for SampleRecordFetcher {
    fn fetch(&self, request: FetchRequest) -> BoxFuture<'static, Result<FetchResult>> {
        let this = self.clone();
        async move {
            tokio::time::sleep(this.latency).await;
            Ok(this.page(request))
        }
        .boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pages_cover_total() {
        let fetcher = SampleRecordFetcher::new(45, Duration::ZERO);
        assert_eq!(fetcher.page(FetchRequest::new(0, 20)).rows.len(), 20);
        assert_eq!(fetcher.page(FetchRequest::new(2, 20)).rows.len(), 5);
        assert!(fetcher.page(FetchRequest::new(9, 20)).rows.is_empty());
        assert_eq!(fetcher.page(FetchRequest::new(9, 20)).total, 45);
    }

    #[test]
    fn test_running_records_have_no_completion() {
        let fetcher = SampleRecordFetcher::new(10, Duration::ZERO);
        let page = fetcher.page(FetchRequest::new(0, 10));
        for row in page.rows {
            if row.status.as_deref() == Some("running") {
                assert!(row.completed_at.is_none());
            }
        }
    }
}
