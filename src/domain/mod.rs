//! Domain - Pure Data Structures
//!
//! These types don't depend on GPUI and represent the records grid domain.

pub mod column;
pub mod fetch;
pub mod record;

pub use column::*;
pub use fetch::*;
pub use record::*;
