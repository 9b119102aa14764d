//! View Components
//!
//! GPUI rendering of the records grid.
//!
//! ## Layout Structure
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        TitleBar                              │
//! ├─────────────────────────────────────────────────────────────┤
//! │                       RecordsView                            │
//! │   toolbar · error banner · header/rows · Pagination          │
//! │                                                              │
//! │            ColumnSettingsDialog (overlay, when open)         │
//! └─────────────────────────────────────────────────────────────┘
//! ```

mod column_settings;
mod pagination;
mod records_view;
mod title_bar;

pub use column_settings::*;
pub use pagination::*;
pub use records_view::*;
pub use title_bar::*;
