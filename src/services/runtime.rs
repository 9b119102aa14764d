//! Tokio Runtime Bridge
//!
//! GPUI drives its own executor, but reqwest needs a tokio reactor.
//! Fetch futures are shipped to a shared tokio runtime and awaited from GPUI tasks.
//!
//! ```text
//! GPUI cx.spawn(...)
//!       │
//!       ▼
//! run_in_tokio(fetcher.fetch(request))
//!       │
//!       ▼
//! tokio::Runtime::spawn()
//!       │
//!       ▼
//! FetchResult returned to GPUI
//! ```

use std::future::Future;
use std::sync::OnceLock;
use tokio::runtime::Runtime;

/// Global tokio runtime instance
static TOKIO_RUNTIME: OnceLock<Runtime> = OnceLock::new();

/// Get or initialize the global tokio runtime
fn get_runtime() -> &'static Runtime {
    TOKIO_RUNTIME.get_or_init(|| Runtime::new().expect("Failed to create tokio runtime"))
}

/// Execute a future in the tokio runtime and await its result from any executor
pub async fn run_in_tokio<F, T>(future: F) -> T
where
    F: Future<Output = T> + Send + 'static,
    T: Send + 'static,
{
    let handle = get_runtime().spawn(future);
    match handle.await {
        Ok(result) => result,
        Err(e) => std::panic::resume_unwind(e.into_panic()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::FetchRequest;
    use crate::services::{RecordFetcher, SampleRecordFetcher};
    use std::time::Duration;

    #[test]
    fn test_run_in_tokio_from_foreign_executor() {
        let fetcher = SampleRecordFetcher::new(30, Duration::from_millis(5));
        let page = smol::block_on(run_in_tokio(fetcher.fetch(FetchRequest::new(1, 20))))
            .expect("sample fetch");
        assert_eq!(page.rows.len(), 10);
        assert_eq!(page.total, 30);
    }
}
