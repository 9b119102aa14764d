//! Records Grid State
//!
//! Headless core of the records grid. Three independent axes live here:
//!
//! ```text
//! layout      columns + resize controllers + settings editor   (never touched by paging)
//! data        PaginatedDataSource                              (never touched by resizing)
//! pagination  page / page_size cursor inside the data source
//! ```
//!
//! The view turns user gestures into the intents below and renders from the
//! getters. Intents that need a fetch hand back a [`FetchTicket`]; the caller
//! runs the fetch and reports back through [`GridState::resolve`].

use tracing::{debug, info, warn};

use crate::constants::{MAX_COLUMN_WIDTH, PAGE_SIZE_OPTIONS, SKELETON_ROWS};
use crate::domain::{ColumnDefinition, FetchResult, Record};
use crate::error::Error;
use crate::layout::{ColumnLayoutStore, ResizeInteractionController};
use crate::states::{ColumnSettingsEditor, FetchTicket, PaginatedDataSource, WidthControl};

/// What the table body shows
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GridBody<'a> {
    /// Placeholder rows sized like the real columns
    Skeleton { rows: usize },
    /// Loaded rows, possibly stale underneath an error banner
    Rows(&'a [Record]),
    /// Loaded, but the page is empty
    Empty,
    /// Nothing ever loaded and the last request failed
    Nothing,
}

/// Column layout, data and paging of one grid instance
pub struct GridState {
    defaults: Vec<ColumnDefinition>,
    columns: Vec<ColumnDefinition>,
    layout: ColumnLayoutStore,
    resizers: Vec<ResizeInteractionController>,
    active_resize: Option<usize>,
    editor: ColumnSettingsEditor,
    data: PaginatedDataSource,
    layout_revision: u64,
    attached: bool,
}

impl GridState {
    /// Create a detached grid. Nothing is read or fetched before [`Self::attach`].
    pub fn new(defaults: Vec<ColumnDefinition>, layout: ColumnLayoutStore, page_size: usize) -> Self {
        let resizers = build_resizers(&defaults);
        Self {
            columns: defaults.clone(),
            defaults,
            layout,
            resizers,
            active_resize: None,
            editor: ColumnSettingsEditor::new(),
            data: PaginatedDataSource::new(0, page_size),
            layout_revision: 0,
            attached: false,
        }
    }

    // ==================== Lifecycle ====================

    /// Restore the persisted layout and issue the first fetch. Runs once;
    /// later calls return `None` and change nothing.
    pub fn attach(&mut self) -> Option<FetchTicket> {
        if self.attached {
            return None;
        }
        self.attached = true;
        self.set_columns(self.layout.restore(&self.defaults));
        info!(key = %self.layout.key(), columns = self.columns.len(), "Records grid attached");
        Some(self.data.request())
    }

    /// End any gesture in progress. Runs once per attach.
    pub fn detach(&mut self) {
        if !self.attached {
            return;
        }
        self.cancel_resize();
        if self.editor.close() {
            self.layout.persist(&self.columns);
        }
        self.attached = false;
        info!("Records grid detached");
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    // ==================== Layout getters ====================

    /// Committed columns
    pub fn columns(&self) -> &[ColumnDefinition] {
        &self.columns
    }

    pub fn default_columns(&self) -> &[ColumnDefinition] {
        &self.defaults
    }

    /// Columns as they should be drawn, with the live drag preview applied
    pub fn display_columns(&self) -> Vec<ColumnDefinition> {
        let preview = self.active_resize.and_then(|index| {
            self.resizers
                .get(index)
                .and_then(|r| r.preview_width())
                .map(|width| (index, width))
        });

        self.columns
            .iter()
            .enumerate()
            .map(|(index, column)| match preview {
                Some((active, width)) if active == index => ColumnDefinition {
                    width,
                    ..column.clone()
                },
                _ => column.clone(),
            })
            .collect()
    }

    /// Bumped on every committed layout change
    pub fn layout_revision(&self) -> u64 {
        self.layout_revision
    }

    /// Id of the column whose boundary is being dragged
    pub fn resizing_column(&self) -> Option<&str> {
        self.active_resize
            .and_then(|index| self.columns.get(index))
            .map(|column| column.id.as_str())
    }

    fn set_columns(&mut self, columns: Vec<ColumnDefinition>) {
        self.columns = columns;
        self.layout_revision += 1;
    }

    // ==================== Resize intents ====================

    /// Pointer pressed on the right boundary of `column_id`. Refused while
    /// another boundary is being dragged.
    pub fn begin_resize(&mut self, column_id: &str, x: f32) -> bool {
        if self.active_resize.is_some() {
            warn!(column = column_id, "Ignoring resize while another drag is active");
            return false;
        }
        let Some(index) = self.columns.iter().position(|c| c.id == column_id) else {
            return false;
        };
        let width = self.columns[index].width;
        self.resizers[index].pointer_down(x, width);
        self.active_resize = Some(index);
        true
    }

    /// Pointer moved during a drag; returns the previewed width
    pub fn drag_resize(&mut self, x: f32) -> Option<u32> {
        let index = self.active_resize?;
        self.resizers.get_mut(index)?.pointer_move(x)
    }

    /// Pointer released: commit and persist the width
    pub fn end_resize(&mut self) -> Option<(String, u32)> {
        let index = self.active_resize.take()?;
        let width = self.resizers.get_mut(index)?.pointer_up()?;
        self.commit_resize(index, width)
    }

    /// Gesture cancelled by the host: commits the last previewed width
    pub fn cancel_resize(&mut self) -> Option<(String, u32)> {
        let index = self.active_resize.take()?;
        let width = self.resizers.get_mut(index)?.cancel()?;
        self.commit_resize(index, width)
    }

    fn commit_resize(&mut self, index: usize, width: u32) -> Option<(String, u32)> {
        let id = self.columns.get(index)?.id.clone();
        let columns = ColumnLayoutStore::apply_width(&self.columns, &id, width);
        let committed = columns[index].width;
        self.set_columns(columns);
        self.layout.persist(&self.columns);
        debug!(column = %id, width = committed, "Column resized");
        Some((id, committed))
    }

    // ==================== Settings intents ====================

    pub fn settings(&self) -> &ColumnSettingsEditor {
        &self.editor
    }

    pub fn settings_open(&self) -> bool {
        self.editor.is_open()
    }

    pub fn width_controls(&self) -> Vec<WidthControl> {
        self.editor.controls(&self.columns)
    }

    pub fn open_settings(&mut self) {
        self.editor.open();
    }

    /// Close the dialog and flush the layout to storage
    pub fn close_settings(&mut self) {
        if self.editor.close() {
            self.layout.persist(&self.columns);
        }
    }

    /// Width change from the settings dialog. Updates memory only; the
    /// dialog flushes on close.
    pub fn set_column_width(&mut self, column_id: &str, width: u32) -> Option<u32> {
        let index = self.columns.iter().position(|c| c.id == column_id)?;
        let columns = ColumnLayoutStore::apply_width(&self.columns, column_id, width);
        let applied = columns[index].width;
        if applied != self.columns[index].width {
            self.set_columns(columns);
            self.editor.mark_dirty();
        }
        Some(applied)
    }

    /// Move the slider of `column_id` by `steps` increments
    pub fn step_column_width(&mut self, column_id: &str, steps: i32) -> Option<u32> {
        let column = self.columns.iter().find(|c| c.id == column_id)?;
        let width = ColumnSettingsEditor::stepped(column, steps);
        self.set_column_width(column_id, width)
    }

    pub fn begin_slider_drag(&mut self, column_id: &str, x: f32) -> bool {
        let Some(column) = self.columns.iter().find(|c| c.id == column_id) else {
            return false;
        };
        let column = column.clone();
        self.editor.begin_slider_drag(&column, x);
        self.editor.is_slider_dragging()
    }

    pub fn slider_drag_to(&mut self, x: f32) -> Option<u32> {
        let (id, width) = self.editor.slider_drag_to(x)?;
        self.set_column_width(&id, width)
    }

    pub fn end_slider_drag(&mut self) {
        self.editor.end_slider_drag();
    }

    /// Restore the default widths and clear storage. Header and dialog resets
    /// both land here.
    pub fn reset_layout(&mut self) {
        if let Some(index) = self.active_resize.take() {
            if let Some(resizer) = self.resizers.get_mut(index) {
                resizer.cancel();
            }
        }
        self.editor.end_slider_drag();
        self.editor.mark_clean();
        let columns = self.layout.reset(&self.defaults);
        self.set_columns(columns);
        info!(key = %self.layout.key(), "Column layout reset to defaults");
    }

    // ==================== Data getters ====================

    pub fn data_source(&self) -> &PaginatedDataSource {
        &self.data
    }

    pub fn is_loading(&self) -> bool {
        self.data.is_loading()
    }

    /// Error banner text, if the newest request failed
    pub fn error_banner(&self) -> Option<&str> {
        self.data.error().map(|e| e.as_ref())
    }

    pub fn body(&self) -> GridBody<'_> {
        if self.data.is_loading() {
            GridBody::Skeleton {
                rows: SKELETON_ROWS,
            }
        } else if self.data.error().is_some() && !self.data.has_loaded() {
            GridBody::Nothing
        } else if self.data.data().is_empty() {
            GridBody::Empty
        } else {
            GridBody::Rows(self.data.data())
        }
    }

    // ==================== Pagination ====================

    pub fn page(&self) -> usize {
        self.data.page()
    }

    pub fn page_size(&self) -> usize {
        self.data.page_size()
    }

    pub fn total(&self) -> usize {
        self.data.total()
    }

    pub fn page_size_options(&self) -> &'static [usize] {
        &PAGE_SIZE_OPTIONS
    }

    /// Number of pages, at least 1
    pub fn page_count(&self) -> usize {
        self.total().div_ceil(self.page_size()).max(1)
    }

    pub fn can_prev(&self) -> bool {
        self.page() > 0
    }

    pub fn can_next(&self) -> bool {
        self.page().saturating_add(1) < self.page_count()
    }

    /// `"{from}-{to} / {total}"` for the current page
    pub fn range_label(&self) -> String {
        let total = self.total();
        let offset = self.page().saturating_mul(self.page_size());
        let from = if total == 0 {
            0
        } else {
            offset.saturating_add(1).min(total)
        };
        let to = offset.saturating_add(self.page_size()).min(total);
        format!("{from}-{to} / {total}")
    }

    pub fn set_page(&mut self, page: usize) -> Option<FetchTicket> {
        self.data.set_cursor(page, self.data.page_size())
    }

    /// Change the page size and return to the first page
    pub fn set_page_size(&mut self, page_size: usize) -> Option<FetchTicket> {
        self.data.set_cursor(0, page_size)
    }

    pub fn next_page(&mut self) -> Option<FetchTicket> {
        if !self.can_next() {
            return None;
        }
        self.set_page(self.page() + 1)
    }

    pub fn prev_page(&mut self) -> Option<FetchTicket> {
        if !self.can_prev() {
            return None;
        }
        self.set_page(self.page() - 1)
    }

    /// Re-fetch the current page without touching the layout
    pub fn reload(&mut self) -> FetchTicket {
        self.data.reload()
    }

    /// Report a fetch resolution; stale tickets are ignored
    pub fn resolve(&mut self, ticket: FetchTicket, result: Result<FetchResult, Error>) -> bool {
        self.data.resolve(ticket, result)
    }
}

fn build_resizers(columns: &[ColumnDefinition]) -> Vec<ResizeInteractionController> {
    columns
        .iter()
        .map(|c| ResizeInteractionController::new(c.id.clone(), c.min_width, MAX_COLUMN_WIDTH))
        .collect()
}
