//! Layout - Column Widths and Resize Gestures
//!
//! ```text
//! header drag ──▶ ResizeInteractionController ──Commit(w)──▶ ColumnLayoutStore::apply_width
//!                         │                                         │
//!                   Preview(w) (draw only)                     save (best effort)
//! ```

mod resize;
mod store;

pub use resize::*;
pub use store::*;
