//! The drag state machine: `Idle → Dragging(source) → {hover | Idle}`.
//! Pointer events come in as plain values (lane, day, x offset), so the
//! machine is independent of any input abstraction and unit-testable
//! without pointer hardware. Nothing mutates the board until a drop lands
//! on a resolved target; cancelling or dropping outside a valid cell is a
//! no-op that resets to idle.

use chrono::NaiveDate;
use log::debug;

use crate::geometry::{GridGeometry, Horizon};
use crate::model::{Board, NoteId, TaskId, TechnicianId, WorkCategory, WorkItemId};
use crate::ops::convert::{place_note, place_unassigned, place_unbilled};
use crate::ops::task_ops::move_task;

/// What is being dragged
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragSource {
    /// An existing task being moved on the grid
    Task(TaskId),
    /// An item from the unassigned work queue
    UnassignedItem(WorkItemId),
    /// A staging note
    Note(NoteId),
    /// An unbilled order dragged straight from the payer list; it has no
    /// queue entry on this board
    UnbilledOrder {
        order_ref: String,
        description: String,
        category: WorkCategory,
    },
}

/// A resolved grid cell under the pointer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DropTarget {
    pub technician: TechnicianId,
    pub day: NaiveDate,
    pub hour: u8,
    pub minute: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging {
        source: DragSource,
        hover: Option<DropTarget>,
    },
}

#[derive(Debug, Default)]
pub struct DragController {
    state: DragState,
}

impl DragController {
    pub fn new() -> Self {
        DragController::default()
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    pub fn is_active(&self) -> bool {
        !matches!(self.state, DragState::Idle)
    }

    /// Start a drag. Refused (returns false) while another drag is in
    /// flight — there is never a second overlapping interaction.
    pub fn begin(&mut self, source: DragSource) -> bool {
        if self.is_active() {
            return false;
        }
        self.state = DragState::Dragging {
            source,
            hover: None,
        };
        true
    }

    /// Recompute the hover target from the pointer position in a lane.
    /// O(1) per event: one inverse-map call, no scanning. An unresolvable
    /// position (outside [H0, H1), off the horizon) clears the target.
    pub fn hover_cell(
        &mut self,
        horizon: &Horizon,
        geometry: &GridGeometry,
        technician: TechnicianId,
        day: NaiveDate,
        x: f32,
    ) {
        let DragState::Dragging { hover, .. } = &mut self.state else {
            return;
        };
        *hover = resolve_target(horizon, geometry, technician, day, x);
    }

    /// The pointer left every lane; any hover target is stale
    pub fn hover_cleared(&mut self) {
        if let DragState::Dragging { hover, .. } = &mut self.state {
            *hover = None;
        }
    }

    /// Abort without committing; returns to idle
    pub fn cancel(&mut self) {
        self.state = DragState::Idle;
    }

    /// Drop on the current hover target. With no resolved target this is a
    /// no-op. A rejected placement (stale technician, horizon edge) is
    /// swallowed: the interaction reverts to idle with no partial task.
    /// Returns the task that was created or moved, for persistence.
    pub fn drop(&mut self, board: &mut Board) -> Option<TaskId> {
        let state = std::mem::take(&mut self.state);
        let DragState::Dragging { source, hover } = state else {
            return None;
        };
        let target = hover?;

        let result = match source {
            DragSource::Task(id) => move_task(
                board,
                id,
                target.technician,
                target.day,
                target.hour,
                target.minute,
            )
            // A task deleted mid-drag is a stale no-op, not a move
            .map(|_| board.tasks.contains_key(&id).then_some(id)),
            DragSource::UnassignedItem(item) => place_unassigned(
                board,
                item,
                target.technician,
                target.day,
                target.hour,
                target.minute,
            ),
            DragSource::Note(note) => place_note(
                board,
                note,
                target.technician,
                target.day,
                target.hour,
                target.minute,
            ),
            DragSource::UnbilledOrder {
                order_ref,
                description,
                category,
            } => place_unbilled(
                board,
                order_ref,
                description,
                category,
                target.technician,
                target.day,
                target.hour,
                target.minute,
            )
            .map(Some),
        };

        match result {
            Ok(id) => id,
            Err(err) => {
                debug!("drop rejected: {}", err);
                None
            }
        }
    }
}

/// Map a pointer position in a technician lane to a grid cell, or None when
/// it falls outside the horizon.
pub fn resolve_target(
    horizon: &Horizon,
    geometry: &GridGeometry,
    technician: TechnicianId,
    day: NaiveDate,
    x: f32,
) -> Option<DropTarget> {
    if !horizon.contains_day(day) {
        return None;
    }
    let minutes = geometry.minutes_at(x);
    if minutes < horizon.open_min() as i64 || minutes >= horizon.close_min() as i64 {
        return None;
    }
    Some(DropTarget {
        technician,
        day,
        hour: (minutes / 60) as u8,
        minute: (minutes % 60) as u8,
    })
}
