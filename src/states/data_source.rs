//! Paginated Data Source
//!
//! Wraps the external fetch into `{data, is_loading, error, total}` keyed by
//! the current `(page, page_size)`. Every issued request carries a generation
//! number; only the resolution of the newest generation is applied, so a slow
//! response for an old page can never overwrite a newer one. In-flight work is
//! not aborted, its result is just dropped.

use std::sync::Arc;

use tracing::{debug, error};

use crate::domain::{FetchRequest, FetchResult, Record};
use crate::error::Error;

/// Handle for one issued request, passed back on resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    generation: u64,
    request: FetchRequest,
}

impl FetchTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn request(&self) -> FetchRequest {
        self.request
    }
}

/// Records of the current page plus request bookkeeping
#[derive(Debug, Clone)]
pub struct PaginatedDataSource {
    page: usize,
    page_size: usize,
    generation: u64,
    outstanding: bool,
    rows: Vec<Record>,
    total: usize,
    error: Option<Arc<str>>,
    has_loaded: bool,
}

impl PaginatedDataSource {
    pub fn new(page: usize, page_size: usize) -> Self {
        Self {
            page,
            page_size: page_size.max(1),
            generation: 0,
            outstanding: false,
            rows: Vec::new(),
            total: 0,
            error: None,
            has_loaded: false,
        }
    }

    // ==================== Getters ====================

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Rows of the last successful load, empty before the first one
    pub fn data(&self) -> &[Record] {
        &self.rows
    }

    pub fn total(&self) -> usize {
        self.total
    }

    /// True while the newest request is outstanding
    pub fn is_loading(&self) -> bool {
        self.outstanding
    }

    pub fn error(&self) -> Option<&Arc<str>> {
        self.error.as_ref()
    }

    /// Whether any request has ever succeeded
    pub fn has_loaded(&self) -> bool {
        self.has_loaded
    }

    /// The request matching the current cursor
    pub fn current_request(&self) -> FetchRequest {
        FetchRequest::new(self.page, self.page_size)
    }

    // ==================== Requests ====================

    /// Issue a request for the current cursor, superseding any outstanding one
    pub fn request(&mut self) -> FetchTicket {
        self.issue(self.current_request())
    }

    /// Move the cursor. Issues a request only when something changed.
    pub fn set_cursor(&mut self, page: usize, page_size: usize) -> Option<FetchTicket> {
        let page_size = page_size.max(1);
        if page == self.page && page_size == self.page_size {
            return None;
        }
        self.page = page;
        self.page_size = page_size;
        Some(self.request())
    }

    /// Re-issue the current request, skipping caches. Clears the error up front.
    pub fn reload(&mut self) -> FetchTicket {
        self.issue(self.current_request().bypassing_cache())
    }

    fn issue(&mut self, request: FetchRequest) -> FetchTicket {
        self.generation += 1;
        self.outstanding = true;
        self.error = None;
        debug!(
            generation = self.generation,
            page = request.page,
            page_size = request.page_size,
            bypass_cache = request.bypass_cache,
            "Issuing records request"
        );
        FetchTicket {
            generation: self.generation,
            request,
        }
    }

    /// Apply a resolution. Returns false when the ticket was superseded and
    /// the result got discarded.
    ///
    /// A failure keeps the previously loaded rows in place.
    pub fn resolve(&mut self, ticket: FetchTicket, result: Result<FetchResult, Error>) -> bool {
        if ticket.generation != self.generation {
            debug!(
                stale = ticket.generation,
                current = self.generation,
                "Discarding stale records response"
            );
            return false;
        }

        self.outstanding = false;
        match result {
            Ok(page) => {
                self.rows = page.rows;
                self.total = page.total;
                self.has_loaded = true;
            }
            Err(e) => {
                error!(
                    error = %e,
                    page = ticket.request.page,
                    page_size = ticket.request.page_size,
                    "Failed to fetch records"
                );
                self.error = Some(e.to_string().into());
            }
        }
        true
    }
}

impl Default for PaginatedDataSource {
    fn default() -> Self {
        Self::new(0, crate::constants::DEFAULT_PAGE_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RecordId;
    use crate::error::Result;
    use crate::services::RecordFetcher;
    use futures::FutureExt;
    use futures::channel::oneshot;
    use futures::future::BoxFuture;
    use std::sync::Mutex;

    fn page_of(ids: &[i64], total: usize) -> FetchResult {
        FetchResult {
            rows: ids
                .iter()
                .map(|id| Record {
                    id: Some(RecordId::Number(*id)),
                    ..Default::default()
                })
                .collect(),
            total,
        }
    }

    fn fetch_error() -> Error {
        Error::Fetch {
            message: "503 Service Unavailable".to_string(),
        }
    }

    /// Fetcher whose responses are released by the test, in any order
    #[derive(Default)]
    struct ControlledFetcher {
        pending: Mutex<Vec<(FetchRequest, oneshot::Sender<Result<FetchResult>>)>>,
    }

    impl ControlledFetcher {
        fn respond(&self, page: usize, result: Result<FetchResult>) {
            let mut pending = self.pending.lock().expect("lock");
            let index = pending
                .iter()
                .position(|(request, _)| request.page == page)
                .expect("request for page");
            let (_, tx) = pending.remove(index);
            tx.send(result).ok();
        }
    }

    impl RecordFetcher for ControlledFetcher {
        fn fetch(&self, request: FetchRequest) -> BoxFuture<'static, Result<FetchResult>> {
            let (tx, rx) = oneshot::channel();
            self.pending.lock().expect("lock").push((request, tx));
            async move {
                rx.await.unwrap_or_else(|_| {
                    Err(Error::Fetch {
                        message: "dropped".to_string(),
                    })
                })
            }
            .boxed()
        }
    }

    #[test]
    fn test_initial_state() {
        let source = PaginatedDataSource::new(0, 20);
        assert!(source.data().is_empty());
        assert!(!source.is_loading());
        assert!(source.error().is_none());
        assert_eq!(source.total(), 0);
    }

    #[test]
    fn test_success_then_failure_keeps_rows() {
        let mut source = PaginatedDataSource::new(0, 20);
        let first = source.request();
        assert!(source.is_loading());
        assert!(source.resolve(first, Ok(page_of(&[1, 2], 2))));
        assert!(!source.is_loading());

        let retry = source.reload();
        assert!(retry.request().bypass_cache);
        assert!(source.resolve(retry, Err(fetch_error())));

        assert_eq!(source.data().len(), 2);
        assert_eq!(source.total(), 2);
        assert!(source.error().is_some());
        assert!(!source.is_loading());
    }

    #[test]
    fn test_reload_clears_error_optimistically() {
        let mut source = PaginatedDataSource::new(0, 20);
        let ticket = source.request();
        source.resolve(ticket, Err(fetch_error()));
        assert!(source.error().is_some());
        assert!(!source.has_loaded());

        source.reload();
        assert!(source.error().is_none());
        assert!(source.is_loading());
    }

    #[test]
    fn test_unchanged_cursor_does_not_refetch() {
        let mut source = PaginatedDataSource::new(1, 20);
        assert!(source.set_cursor(1, 20).is_none());
        assert!(source.set_cursor(2, 20).is_some());
    }

    #[test]
    fn test_stale_response_is_discarded() {
        let mut source = PaginatedDataSource::new(2, 20);
        let page_two = source.request();
        let page_three = source.set_cursor(3, 20).expect("cursor changed");

        assert!(source.resolve(page_three, Ok(page_of(&[61, 62], 80))));
        assert!(!source.resolve(page_two, Ok(page_of(&[41, 42], 99))));

        assert_eq!(source.data()[0].id, Some(RecordId::Number(61)));
        assert_eq!(source.total(), 80);
    }

    #[test]
    fn test_stale_failure_does_not_touch_loading_or_error() {
        let mut source = PaginatedDataSource::new(0, 20);
        let old = source.request();
        let _new = source.set_cursor(1, 20).expect("cursor changed");

        assert!(!source.resolve(old, Err(fetch_error())));
        assert!(source.is_loading());
        assert!(source.error().is_none());
    }

    #[test]
    fn test_out_of_order_responses_through_fetcher() {
        let fetcher = ControlledFetcher::default();
        let mut source = PaginatedDataSource::new(2, 20);

        let ticket_two = source.request();
        let future_two = fetcher.fetch(ticket_two.request());
        let ticket_three = source.set_cursor(3, 20).expect("cursor changed");
        let future_three = fetcher.fetch(ticket_three.request());

        fetcher.respond(3, Ok(page_of(&[61], 70)));
        fetcher.respond(2, Ok(page_of(&[41], 70)));

        let result_three = smol::block_on(future_three);
        assert!(source.resolve(ticket_three, result_three));
        // The page 2 answer lands last but must lose
        let result_two = smol::block_on(future_two);
        assert!(!source.resolve(ticket_two, result_two));

        assert_eq!(source.page(), 3);
        assert_eq!(source.data()[0].id, Some(RecordId::Number(61)));
        assert!(!source.is_loading());
    }
}
