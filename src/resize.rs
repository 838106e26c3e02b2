//! Column drag-resize state machine.
//!
//! Tracks an in-progress width drag and the pending-persist confirmation:
//!
//! ```text
//! Idle -> Dragging -> (Idle | PendingConfirm) -> Idle
//! ```
//!
//! Two width layers exist. The *committed* map is the consumer-owned prop
//! value; the *working* map carries in-flight drag values so intermediate
//! frames are visually live without being durable. On mouse-up the working
//! width is compared to the committed width: unchanged drags are a no-op,
//! changed drags either commit locally (no persistence callback) or park in
//! `PendingConfirm` until the consumer saves or cancels.
//!
//! The controller is pure state; document-level listeners and the body
//! cursor override are owned by the DOM layer for exactly the lifetime of
//! the `Dragging` phase.

use std::collections::HashMap;

/// Minimum width any column can be dragged to, in pixels.
pub const MIN_COL_WIDTH: f64 = 80.0;

/// Current phase of the resize interaction.
#[derive(Debug, Clone, PartialEq)]
pub enum ResizePhase {
    /// No drag in progress.
    Idle,
    /// A handle is being dragged.
    Dragging {
        /// Key of the column being resized.
        column: String,
        /// Pointer x at drag start.
        start_x: f64,
        /// Rendered column width at drag start.
        start_width: f64,
    },
    /// Drag finished with a change; waiting on the save/cancel dialog.
    PendingConfirm,
}

/// Decision made when a drag finishes.
#[derive(Debug, Clone, PartialEq)]
pub enum DragOutcome {
    /// Width did not change; nothing to do.
    NoChange,
    /// No persistence callback registered; the working widths are now the
    /// effective local widths.
    CommitLocal(HashMap<String, f64>),
    /// Persistence callback present; a confirmation dialog must resolve the
    /// pending widths.
    Confirm,
}

/// State machine for column-width drags.
pub struct ResizeController {
    phase: ResizePhase,
    /// In-flight widths, shown live during a drag.
    working: HashMap<String, f64>,
    /// Last widths committed by the consumer.
    committed: HashMap<String, f64>,
}

impl ResizeController {
    /// Create a controller seeded with the committed widths.
    pub fn new(committed: HashMap<String, f64>) -> Self {
        Self {
            phase: ResizePhase::Idle,
            working: committed.clone(),
            committed,
        }
    }

    /// Current phase.
    pub fn phase(&self) -> &ResizePhase {
        &self.phase
    }

    /// True while a handle is being dragged.
    pub fn is_dragging(&self) -> bool {
        matches!(self.phase, ResizePhase::Dragging { .. })
    }

    /// Key of the column being dragged, if any.
    pub fn dragging_column(&self) -> Option<&str> {
        match &self.phase {
            ResizePhase::Dragging { column, .. } => Some(column),
            _ => None,
        }
    }

    /// Effective width for a column: working first, then committed.
    pub fn width_for(&self, key: &str) -> Option<f64> {
        self.working.get(key).or_else(|| self.committed.get(key)).copied()
    }

    /// The full working map.
    pub fn working_widths(&self) -> &HashMap<String, f64> {
        &self.working
    }

    /// Replace the committed map from props. The working map follows only
    /// while idle; a drag or pending confirmation keeps its in-flight values.
    pub fn sync_committed(&mut self, widths: HashMap<String, f64>) {
        self.committed = widths;
        if self.phase == ResizePhase::Idle {
            self.working = self.committed.clone();
        }
    }

    /// Enter `Dragging` from `Idle`. Ignored in any other phase.
    pub fn begin(&mut self, column: impl Into<String>, start_x: f64, start_width: f64) {
        if self.phase != ResizePhase::Idle {
            return;
        }
        self.phase = ResizePhase::Dragging {
            column: column.into(),
            start_x,
            start_width,
        };
    }

    /// Apply a pointer move. Returns the clamped working width written for
    /// the dragged column, or `None` when no drag is in progress.
    pub fn update(&mut self, current_x: f64) -> Option<f64> {
        let ResizePhase::Dragging {
            column,
            start_x,
            start_width,
        } = &self.phase
        else {
            return None;
        };
        let width = (start_width + (current_x - start_x)).max(MIN_COL_WIDTH);
        let key = column.clone();
        self.working.insert(key, width);
        Some(width)
    }

    /// Resolve a mouse-up. `has_persist_callback` decides whether a changed
    /// width commits locally or waits for confirmation.
    pub fn finish(&mut self, has_persist_callback: bool) -> DragOutcome {
        let ResizePhase::Dragging { column, .. } = &self.phase else {
            return DragOutcome::NoChange;
        };
        let changed = match (self.working.get(column), self.committed.get(column)) {
            (Some(w), Some(c)) => (w - c).abs() > f64::EPSILON,
            (None, None) => false,
            _ => true,
        };
        if !changed {
            self.phase = ResizePhase::Idle;
            return DragOutcome::NoChange;
        }
        if has_persist_callback {
            self.phase = ResizePhase::PendingConfirm;
            DragOutcome::Confirm
        } else {
            self.committed = self.working.clone();
            self.phase = ResizePhase::Idle;
            DragOutcome::CommitLocal(self.committed.clone())
        }
    }

    /// "Save" from the confirmation dialog: returns the full working map to
    /// hand to the persistence callback. The committed map is updated only
    /// when the consumer re-renders with new props.
    pub fn save(&mut self) -> Option<HashMap<String, f64>> {
        if self.phase != ResizePhase::PendingConfirm {
            return None;
        }
        self.phase = ResizePhase::Idle;
        Some(self.working.clone())
    }

    /// "Cancel" from the confirmation dialog: reverts the working map to the
    /// last committed map.
    pub fn cancel(&mut self) {
        if self.phase != ResizePhase::PendingConfirm {
            return;
        }
        self.working = self.committed.clone();
        self.phase = ResizePhase::Idle;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_update_outside_drag_is_noop() {
        let mut ctl = ResizeController::new(HashMap::new());
        assert_eq!(ctl.update(500.0), None);
        assert!(ctl.working_widths().is_empty());
    }

    #[test]
    fn test_begin_ignored_while_pending() {
        let mut ctl = ResizeController::new(HashMap::new());
        ctl.begin("a", 0.0, 120.0);
        ctl.update(40.0);
        assert_eq!(ctl.finish(true), DragOutcome::Confirm);
        ctl.begin("b", 0.0, 100.0);
        assert_eq!(ctl.phase(), &ResizePhase::PendingConfirm);
    }

    #[test]
    fn test_width_for_prefers_working() {
        let mut committed = HashMap::new();
        committed.insert("a".to_string(), 150.0);
        let mut ctl = ResizeController::new(committed);
        ctl.begin("a", 0.0, 150.0);
        ctl.update(30.0);
        assert_eq!(ctl.width_for("a"), Some(180.0));
    }
}
