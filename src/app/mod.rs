//! Application Layer
//!
//! App initialization, window management, injected services and the window shell.

pub mod application;
pub mod entities;
pub mod workspace;
