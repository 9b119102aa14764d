//! Helper Utilities
//!
//! Key bindings and platform directories.

mod action;
mod fs;

pub use action::*;
pub use fs::*;
