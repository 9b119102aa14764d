//! Column Settings Editor
//!
//! Modal bulk editor over the same columns the header drags edit. It keeps no
//! copy of the widths: every change goes through the grid's width intent and
//! closing the dialog flushes the layout to storage, unless a reset cleared it.

use tracing::debug;

use crate::constants::{MAX_COLUMN_WIDTH, WIDTH_SLIDER_STEP, WIDTH_SLIDER_TRACK};
use crate::domain::ColumnDefinition;

/// Description of one width slider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidthControl {
    pub id: String,
    pub label: String,
    pub value: u32,
    pub min: u32,
    pub max: u32,
    pub step: u32,
}

impl WidthControl {
    /// Numeric echo next to the slider
    pub fn value_label(&self) -> String {
        format!("{}px", self.value)
    }

    /// Thumb position on the track, `0.0..=1.0`
    pub fn fraction(&self) -> f32 {
        if self.max <= self.min {
            return 1.0;
        }
        let value = self.value.clamp(self.min, self.max);
        (value - self.min) as f32 / (self.max - self.min) as f32
    }
}

/// Snap a width onto the slider grid `min, min + step, ..., MAX_COLUMN_WIDTH`
pub fn snap_width(value: u32, min: u32) -> u32 {
    let max = MAX_COLUMN_WIDTH;
    if min >= max {
        return max;
    }
    let value = value.clamp(min, max);
    let steps = ((value - min) as f32 / WIDTH_SLIDER_STEP as f32).round() as u32;
    (min + steps * WIDTH_SLIDER_STEP).min(max)
}

/// In-progress drag of a slider thumb
#[derive(Debug, Clone, PartialEq)]
struct SliderDrag {
    column_id: String,
    start_x: f32,
    start_value: u32,
    min: u32,
}

/// Open/closed state of the settings dialog plus slider gestures
#[derive(Debug, Clone, Default)]
pub struct ColumnSettingsEditor {
    open: bool,
    dirty: bool,
    cleared: bool,
    drag: Option<SliderDrag>,
}

impl ColumnSettingsEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Whether widths changed since the dialog opened
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn open(&mut self) {
        self.open = true;
        self.dirty = false;
        self.cleared = false;
        self.drag = None;
        debug!("Column settings opened");
    }

    /// Close the dialog. Returns true when the caller must flush the layout:
    /// always for an open dialog, except when storage was cleared by a reset
    /// and nothing was edited afterwards.
    pub fn close(&mut self) -> bool {
        let flush = self.open && !self.cleared;
        if self.open {
            debug!(dirty = self.dirty, cleared = self.cleared, "Column settings closed");
        }
        self.open = false;
        self.drag = None;
        self.dirty = false;
        self.cleared = false;
        flush
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
        self.cleared = false;
    }

    /// Forget pending edits after storage was cleared by a reset
    pub fn mark_clean(&mut self) {
        self.dirty = false;
        self.cleared = true;
    }

    /// One slider per column, in display order
    pub fn controls(&self, columns: &[ColumnDefinition]) -> Vec<WidthControl> {
        columns
            .iter()
            .map(|column| WidthControl {
                id: column.id.clone(),
                label: column.label.clone(),
                value: column.width,
                min: column.min_width.min(MAX_COLUMN_WIDTH),
                max: MAX_COLUMN_WIDTH,
                step: WIDTH_SLIDER_STEP,
            })
            .collect()
    }

    /// Width after moving a slider by `steps` increments
    pub fn stepped(column: &ColumnDefinition, steps: i32) -> u32 {
        let delta = steps.unsigned_abs() * WIDTH_SLIDER_STEP;
        let base = snap_width(column.width, column.min_width);
        let target = if steps >= 0 {
            base.saturating_add(delta)
        } else {
            base.saturating_sub(delta)
        };
        snap_width(target, column.min_width)
    }

    // ==================== Slider drag ====================

    pub fn begin_slider_drag(&mut self, column: &ColumnDefinition, x: f32) {
        if !self.open {
            return;
        }
        self.drag = Some(SliderDrag {
            column_id: column.id.clone(),
            start_x: x,
            start_value: column.width,
            min: column.min_width,
        });
    }

    pub fn is_slider_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// New `(column id, width)` for the pointer at `x`
    pub fn slider_drag_to(&self, x: f32) -> Option<(String, u32)> {
        let drag = self.drag.as_ref()?;
        let min = drag.min.min(MAX_COLUMN_WIDTH);
        let per_pixel = (MAX_COLUMN_WIDTH - min) as f32 / WIDTH_SLIDER_TRACK;
        let raw = drag.start_value as f32 + (x - drag.start_x) * per_pixel;
        let raw = if raw.is_finite() && raw > 0.0 {
            raw.round() as u32
        } else {
            0
        };
        Some((drag.column_id.clone(), snap_width(raw, drag.min)))
    }

    pub fn end_slider_drag(&mut self) {
        self.drag = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::default_columns;

    #[test]
    fn test_controls_bounds() {
        let editor = ColumnSettingsEditor::new();
        let controls = editor.controls(&default_columns());
        assert_eq!(controls.len(), 7);
        assert_eq!(controls[1].min, 100);
        assert_eq!(controls[1].max, MAX_COLUMN_WIDTH);
        assert_eq!(controls[1].step, WIDTH_SLIDER_STEP);
        assert_eq!(controls[0].value_label(), "80px");
    }

    #[test]
    fn test_snap_width() {
        assert_eq!(snap_width(84, 50), 80);
        assert_eq!(snap_width(86, 50), 90);
        assert_eq!(snap_width(10, 150), 150);
        assert_eq!(snap_width(999, 150), MAX_COLUMN_WIDTH);
        assert_eq!(snap_width(10, 700), MAX_COLUMN_WIDTH);
    }

    #[test]
    fn test_stepped_stays_in_bounds() {
        let columns = default_columns();
        assert_eq!(ColumnSettingsEditor::stepped(&columns[0], 1), 90);
        assert_eq!(ColumnSettingsEditor::stepped(&columns[0], -10), 50);
        assert_eq!(ColumnSettingsEditor::stepped(&columns[0], 100), MAX_COLUMN_WIDTH);
    }

    #[test]
    fn test_slider_drag_maps_pixels_to_width() {
        let column = &default_columns()[0];
        let mut editor = ColumnSettingsEditor::new();

        editor.begin_slider_drag(column, 0.0);
        assert!(!editor.is_slider_dragging(), "closed dialog ignores drags");

        editor.open();
        editor.begin_slider_drag(column, 0.0);
        // 450px of range over the track: the full track reaches the max
        assert_eq!(
            editor.slider_drag_to(WIDTH_SLIDER_TRACK),
            Some(("id".to_string(), MAX_COLUMN_WIDTH))
        );
        assert_eq!(editor.slider_drag_to(-500.0), Some(("id".to_string(), 50)));

        editor.end_slider_drag();
        assert_eq!(editor.slider_drag_to(10.0), None);
    }

    #[test]
    fn test_close_reports_flush_once() {
        let mut editor = ColumnSettingsEditor::new();
        assert!(!editor.close(), "already closed");
        editor.open();
        assert!(editor.close(), "plain close still flushes");
        editor.open();
        editor.mark_dirty();
        assert!(editor.is_dirty());
        assert!(editor.close());
        assert!(!editor.is_dirty());
        assert!(!editor.close());
    }

    #[test]
    fn test_close_after_reset_skips_flush_until_next_edit() {
        let mut editor = ColumnSettingsEditor::new();
        editor.open();
        editor.mark_dirty();
        editor.mark_clean();
        assert!(!editor.close());

        editor.open();
        editor.mark_clean();
        editor.mark_dirty();
        assert!(editor.close(), "edit after reset is flushed");

        editor.open();
        assert!(editor.close(), "reopening forgets the reset");
    }

    #[test]
    fn test_fraction() {
        let editor = ColumnSettingsEditor::new();
        let controls = editor.controls(&default_columns());
        assert_eq!(controls[1].fraction(), 50.0 / 400.0);
    }
}
