//! Column Resize Interaction
//!
//! One controller per header boundary. A drag is modelled as an explicit
//! state machine so no gesture state lives in closures:
//!
//! ```text
//!            PointerDown{x, width}
//!   Idle ─────────────────────────────▶ Dragging{start_x, start_width, proposed}
//!    ▲                                    │  PointerMove{x} ─▶ Preview(proposed)
//!    └──── PointerUp | Cancel ────────────┘  emits Commit(proposed)
//! ```
//!
//! Every other (state, event) pair leaves the state unchanged and emits nothing.

use tracing::trace;

/// Pointer input relevant to a resize handle
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ResizeEvent {
    /// Pointer pressed on the boundary; `width` is the column's current width
    PointerDown { x: f32, width: u32 },
    /// Pointer moved to window x-coordinate `x`
    PointerMove { x: f32 },
    /// Pointer released
    PointerUp,
    /// Host reported the gesture as cancelled
    Cancel,
}

/// What the host should do after an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeOutput {
    /// Show this width, do not persist
    Preview(u32),
    /// Gesture finished with this width
    Commit(u32),
}

/// State of a single boundary
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ResizeState {
    #[default]
    Idle,
    Dragging {
        start_x: f32,
        start_width: u32,
        proposed: u32,
    },
}

/// Transition table of the resize state machine
pub fn transition(
    state: ResizeState,
    event: ResizeEvent,
    min_width: u32,
    max_width: u32,
) -> (ResizeState, Option<ResizeOutput>) {
    match (state, event) {
        (ResizeState::Idle, ResizeEvent::PointerDown { x, width }) => (
            ResizeState::Dragging {
                start_x: x,
                start_width: width,
                proposed: width,
            },
            None,
        ),
        (
            ResizeState::Dragging {
                start_x,
                start_width,
                ..
            },
            ResizeEvent::PointerMove { x },
        ) => {
            let proposed = propose_width(start_width, x - start_x, min_width, max_width);
            (
                ResizeState::Dragging {
                    start_x,
                    start_width,
                    proposed,
                },
                Some(ResizeOutput::Preview(proposed)),
            )
        }
        (ResizeState::Dragging { proposed, .. }, ResizeEvent::PointerUp | ResizeEvent::Cancel) => {
            (ResizeState::Idle, Some(ResizeOutput::Commit(proposed)))
        }
        (state, _) => (state, None),
    }
}

/// `start_width + delta`, rounded and clamped to `[min_width, max_width]`.
/// `max_width` wins when the bounds cross, as in the layout store.
pub fn propose_width(start_width: u32, delta: f32, min_width: u32, max_width: u32) -> u32 {
    let raw = start_width as f32 + delta;
    let width = if !raw.is_finite() {
        start_width
    } else if raw <= 0.0 {
        0
    } else {
        raw.round() as u32
    };
    width.max(min_width).min(max_width)
}

/// Resize controller bound to one column boundary
#[derive(Debug, Clone)]
pub struct ResizeInteractionController {
    column_id: String,
    min_width: u32,
    max_width: u32,
    state: ResizeState,
}

impl ResizeInteractionController {
    pub fn new(column_id: impl Into<String>, min_width: u32, max_width: u32) -> Self {
        Self {
            column_id: column_id.into(),
            min_width,
            max_width,
            state: ResizeState::Idle,
        }
    }

    pub fn column_id(&self) -> &str {
        &self.column_id
    }

    pub fn state(&self) -> ResizeState {
        self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, ResizeState::Dragging { .. })
    }

    /// Width to draw while a drag is in progress
    pub fn preview_width(&self) -> Option<u32> {
        match self.state {
            ResizeState::Dragging { proposed, .. } => Some(proposed),
            ResizeState::Idle => None,
        }
    }

    /// Feed one event through the transition table
    pub fn handle(&mut self, event: ResizeEvent) -> Option<ResizeOutput> {
        let (next, output) = transition(self.state, event, self.min_width, self.max_width);
        if output.is_some() || next != self.state {
            trace!(column = %self.column_id, ?event, ?output, "Resize transition");
        }
        self.state = next;
        output
    }

    pub fn pointer_down(&mut self, x: f32, width: u32) {
        self.handle(ResizeEvent::PointerDown { x, width });
    }

    pub fn pointer_move(&mut self, x: f32) -> Option<u32> {
        match self.handle(ResizeEvent::PointerMove { x }) {
            Some(ResizeOutput::Preview(width)) => Some(width),
            _ => None,
        }
    }

    pub fn pointer_up(&mut self) -> Option<u32> {
        match self.handle(ResizeEvent::PointerUp) {
            Some(ResizeOutput::Commit(width)) => Some(width),
            _ => None,
        }
    }

    pub fn cancel(&mut self) -> Option<u32> {
        match self.handle(ResizeEvent::Cancel) {
            Some(ResizeOutput::Commit(width)) => Some(width),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controller(min: u32) -> ResizeInteractionController {
        ResizeInteractionController::new("col", min, 500)
    }

    #[test]
    fn test_drag_right_previews_then_commits() {
        let mut c = controller(50);
        c.pointer_down(100.0, 80);
        assert!(c.is_dragging());

        assert_eq!(c.pointer_move(150.0), Some(130));
        assert_eq!(c.pointer_move(300.0), Some(280));
        assert_eq!(c.preview_width(), Some(280));

        assert_eq!(c.pointer_up(), Some(280));
        assert_eq!(c.state(), ResizeState::Idle);
    }

    #[test]
    fn test_drag_left_clamps_to_min() {
        let mut c = controller(100);
        c.pointer_down(600.0, 150);
        assert_eq!(c.pointer_move(100.0), Some(100));
        assert_eq!(c.pointer_up(), Some(100));
    }

    #[test]
    fn test_drag_clamps_to_max() {
        let mut c = controller(50);
        c.pointer_down(0.0, 400);
        assert_eq!(c.pointer_move(1000.0), Some(500));
    }

    #[test]
    fn test_click_without_move_commits_unchanged_width() {
        let mut c = controller(50);
        c.pointer_down(10.0, 180);
        assert_eq!(c.pointer_up(), Some(180));
    }

    #[test]
    fn test_cancel_commits_last_preview() {
        let mut c = controller(50);
        c.pointer_down(10.0, 180);
        c.pointer_move(40.0);
        assert_eq!(c.cancel(), Some(210));
        assert!(!c.is_dragging());
    }

    #[test]
    fn test_events_outside_a_drag_are_ignored() {
        let mut c = controller(50);
        assert_eq!(c.pointer_move(40.0), None);
        assert_eq!(c.pointer_up(), None);
        assert_eq!(c.cancel(), None);
        assert_eq!(c.state(), ResizeState::Idle);
    }

    #[test]
    fn test_second_pointer_down_does_not_restart_drag() {
        let mut c = controller(50);
        c.pointer_down(0.0, 100);
        c.pointer_down(500.0, 300);
        assert_eq!(c.pointer_move(20.0), Some(120));
    }

    #[test]
    fn test_propose_width_handles_non_finite() {
        assert_eq!(propose_width(120, f32::NAN, 50, 500), 120);
        assert_eq!(propose_width(120, f32::NEG_INFINITY, 50, 500), 120);
        assert_eq!(propose_width(120, -1000.0, 50, 500), 50);
    }

    #[test]
    fn test_cap_wins_over_oversized_min_like_the_store() {
        use crate::layout::clamp_width;

        assert_eq!(propose_width(600, 0.0, 700, 500), 500);
        assert_eq!(propose_width(600, 0.0, 700, 500), clamp_width(600, 700));

        let mut resizer = ResizeInteractionController::new("wide", 700, 500);
        resizer.pointer_down(0.0, 600);
        assert_eq!(resizer.pointer_move(-300.0), Some(500));
        assert_eq!(resizer.pointer_up(), Some(500));
    }
}
