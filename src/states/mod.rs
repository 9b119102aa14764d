//! State Management Layer
//!
//! Headless grid state. Views turn gestures into intents on these types and
//! render from their getters:
//!
//! ```text
//! Gesture → GridState intent → FetchTicket → spawn fetch → GridState::resolve → notify → UI Refresh
//! ```

mod config;
mod data_source;
mod grid;
mod settings;

pub use config::*;
pub use data_source::*;
pub use grid::*;
pub use settings::*;
