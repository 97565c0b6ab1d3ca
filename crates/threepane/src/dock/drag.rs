//! Drag-to-detach gesture recognition.

use threepane_core::math::Vec2;

use super::types::PaneSide;

/// Pointer travel in pixels before a press becomes a drag.
pub const DRAG_START_THRESHOLD: f32 = 10.0;

/// Net displacement in pixels that triggers detach on release.
pub const DETACH_DISTANCE: f32 = 50.0;

/// Phase of the detach gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragPhase {
    #[default]
    Idle,
    /// Pointer down on a drag handle, below the motion threshold.
    Pressed,
    /// Motion threshold exceeded; drag feedback is showing.
    Dragging,
}

/// Outcome of releasing the pointer during a gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragRelease {
    /// The pane whose handle was dragged.
    pub side: PaneSide,
    /// Net displacement from the press position.
    pub displacement: f32,
    /// Whether the displacement crossed the detach threshold.
    pub should_detach: bool,
}

/// Tracks a single drag-to-detach gesture on a pane header.
///
/// Idle → (press) Pressed → (motion ≥ [`DRAG_START_THRESHOLD`]) Dragging →
/// (release) Idle, detaching when net displacement reached
/// [`DETACH_DISTANCE`].
#[derive(Debug, Default)]
pub struct DetachDragTracker {
    phase: DragPhase,
    side: Option<PaneSide>,
    start: Vec2,
    current: Vec2,
}

impl DetachDragTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin a gesture on a pane's drag handle.
    pub fn press(&mut self, side: PaneSide, pos: Vec2) {
        self.phase = DragPhase::Pressed;
        self.side = Some(side);
        self.start = pos;
        self.current = pos;
    }

    /// Track pointer motion; promotes Pressed to Dragging past the motion
    /// threshold. Returns the phase after the update.
    pub fn motion(&mut self, pos: Vec2) -> DragPhase {
        if self.phase == DragPhase::Idle {
            return DragPhase::Idle;
        }
        self.current = pos;
        if self.phase == DragPhase::Pressed
            && (pos - self.start).length() >= DRAG_START_THRESHOLD
        {
            self.phase = DragPhase::Dragging;
        }
        self.phase
    }

    /// End the gesture. Returns the release outcome when a gesture was in
    /// progress; the tracker returns to Idle either way.
    pub fn release(&mut self) -> Option<DragRelease> {
        let side = self.side.take()?;
        let was_dragging = self.phase == DragPhase::Dragging;
        let displacement = (self.current - self.start).length();
        self.phase = DragPhase::Idle;
        Some(DragRelease {
            side,
            displacement,
            should_detach: was_dragging && displacement >= DETACH_DISTANCE,
        })
    }

    /// Abort the gesture without any outcome.
    pub fn cancel(&mut self) {
        self.phase = DragPhase::Idle;
        self.side = None;
    }

    pub fn phase(&self) -> DragPhase {
        self.phase
    }

    /// The pane under gesture, if any.
    pub fn dragged_side(&self) -> Option<PaneSide> {
        self.side
    }

    /// Displacement from the press position.
    pub fn delta(&self) -> Vec2 {
        self.current - self.start
    }
}
