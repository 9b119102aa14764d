//! Service Layer
//!
//! Access to the external record source and the async runtime it needs.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │                 dyn RecordFetcher                     │
//! │   ┌──────────────────┐     ┌──────────────────────┐  │
//! │   │ HttpRecordFetcher│     │ SampleRecordFetcher  │  │
//! │   │ (reqwest, JSON)  │     │ (offline demo data)  │  │
//! │   └──────────────────┘     └──────────────────────┘  │
//! └──────────────────────────────────────────────────────┘
//!                          │ run_in_tokio
//!                          ▼
//! ┌──────────────────────────────────────────────────────┐
//! │          PaginatedDataSource (staleness guard)        │
//! └──────────────────────────────────────────────────────┘
//! ```

mod fetch;
mod runtime;
mod sample;

pub use fetch::*;
pub use runtime::*;
pub use sample::*;
