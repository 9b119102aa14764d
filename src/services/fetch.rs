//! Record Fetching
//!
//! The grid consumes records through [`RecordFetcher`]. Transport details,
//! caching and retries belong to the implementation; the grid only relies on
//! the `(page, page_size) -> {rows, total}` shape.

use std::time::Duration;

use futures::FutureExt;
use futures::future::BoxFuture;
use serde::Deserialize;

use crate::domain::{FetchRequest, FetchResult, Record};
use crate::error::{Error, Result};

/// HTTP request timeout
const FETCH_TIMEOUT_SECS: u64 = 30;

/// Paginated access to records
pub trait RecordFetcher: Send + Sync + 'static {
    /// Fetch one page. The future must be runnable on the tokio runtime.
    fn fetch(&self, request: FetchRequest) -> BoxFuture<'static, Result<FetchResult>>;
}

/// Accepted response bodies
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PageBody {
    Page {
        #[serde(alias = "records", alias = "data")]
        rows: Vec<Record>,
        #[serde(default)]
        total: Option<usize>,
    },
    Rows(Vec<Record>),
}

/// Parse a page response. A missing `total` falls back to the row count.
pub fn parse_page(body: &str) -> Result<FetchResult> {
    let page: PageBody = serde_json::from_str(body)?;
    Ok(match page {
        PageBody::Page { rows, total } => {
            let total = total.unwrap_or(rows.len());
            FetchResult { rows, total }
        }
        PageBody::Rows(rows) => FetchResult {
            total: rows.len(),
            rows,
        },
    })
}

/// Fetches pages from a JSON endpoint: `GET {url}?page={page}&limit={page_size}`
#[derive(Clone)]
pub struct HttpRecordFetcher {
    client: reqwest::Client,
    url: String,
}

impl HttpRecordFetcher {
    pub fn new(url: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(FETCH_TIMEOUT_SECS))
            .build()?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl RecordFetcher for HttpRecordFetcher {
    fn fetch(&self, request: FetchRequest) -> BoxFuture<'static, Result<FetchResult>> {
        let client = self.client.clone();
        let url = self.url.clone();

        async move {
            let mut builder = client
                .get(&url)
                .query(&[("page", request.page), ("limit", request.page_size)]);
            if request.bypass_cache {
                builder = builder.header(reqwest::header::CACHE_CONTROL, "no-cache");
            }

            tracing::debug!(url = %url, page = request.page, limit = request.page_size, "Fetching records");
            let response = builder.send().await?;
            let status = response.status();
            if !status.is_success() {
                return Err(Error::Fetch {
                    message: format!("{url} answered {status}"),
                });
            }

            let body = response.text().await?;
            parse_page(&body)
        }
        .boxed()
    }
}
