//! UI Constants
//!
//! Centralized constants for the records grid layout and data paging.

/// Default minimum column width when a definition does not specify one
pub const DEFAULT_MIN_COLUMN_WIDTH: u32 = 50;

/// Upper bound for any stored column width
pub const MAX_COLUMN_WIDTH: u32 = 500;

/// Step of the width sliders in the column settings dialog
pub const WIDTH_SLIDER_STEP: u32 = 10;

/// Track length of a width slider in pixels
pub const WIDTH_SLIDER_TRACK: f32 = 240.0;

/// Hit-target width of a column resize handle
pub const RESIZE_HANDLE_WIDTH: f32 = 6.0;

/// Number of placeholder rows rendered while a page is loading
pub const SKELETON_ROWS: usize = 5;

/// Row and header heights
pub const ROW_HEIGHT: f32 = 40.0;
pub const HEADER_HEIGHT: f32 = 44.0;

/// Paging
pub const DEFAULT_PAGE_SIZE: usize = 20;
pub const PAGE_SIZE_OPTIONS: [usize; 4] = [10, 20, 50, 100];

/// Persistence key of the column layout
pub const DEFAULT_LAYOUT_KEY: &str = "integration-records-column-widths";

/// Free text longer than this is cut with an ellipsis in the table body
pub const ERROR_MESSAGE_PREVIEW_CHARS: usize = 48;

/// Default window dimensions
pub const DEFAULT_WINDOW_WIDTH: f32 = 1320.0;
pub const DEFAULT_WINDOW_HEIGHT: f32 = 820.0;
