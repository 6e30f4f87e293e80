//! The resize state machine, separate from drag:
//! `Idle → Resizing(id, edge, origin, start geometry) → Idle`.
//!
//! Each pointer move turns the pixel delta from the origin into a snapped
//! minute delta and re-derives the task geometry from the recorded start
//! geometry, so a gesture that runs into a clamp (the one-step duration
//! floor, the opening hour) and then backs off lands exactly where an
//! unclamped gesture would. Cancelling restores the start geometry instead
//! of committing.

use crate::geometry::GridGeometry;
use crate::model::{Anchor, Board, TaskId};
use crate::ops::task_ops::{ResizeEdge, resize_task};

/// The geometry a task had when the resize began, restored on cancel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StartGeometry {
    pub anchor: Anchor,
    pub duration_min: u32,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum ResizeState {
    #[default]
    Idle,
    Resizing {
        id: TaskId,
        edge: ResizeEdge,
        origin_x: f32,
        start: StartGeometry,
        /// Snapped minute delta the store currently reflects
        applied_min: i64,
    },
}

#[derive(Debug, Default)]
pub struct ResizeController {
    state: ResizeState,
}

impl ResizeController {
    pub fn new() -> Self {
        ResizeController::default()
    }

    pub fn state(&self) -> &ResizeState {
        &self.state
    }

    pub fn is_active(&self) -> bool {
        !matches!(self.state, ResizeState::Idle)
    }

    /// Grab an edge. Refused while another resize is in flight, or when the
    /// task does not exist (it may have been deleted under the pointer).
    pub fn begin(&mut self, board: &Board, id: TaskId, edge: ResizeEdge, x: f32) -> bool {
        if self.is_active() {
            return false;
        }
        let Some(task) = board.task(id) else {
            return false;
        };
        self.state = ResizeState::Resizing {
            id,
            edge,
            origin_x: x,
            start: StartGeometry {
                anchor: task.anchor,
                duration_min: task.duration_min,
            },
            applied_min: 0,
        };
        true
    }

    /// Recompute the task geometry for the delta the pointer is at now.
    /// Always derived from the start geometry, never from the store: a
    /// clamped move applies less than its delta, and stacking the next
    /// increment on top of that would hand the clamped-away minutes back
    /// when the pointer returns.
    pub fn pointer_move(&mut self, board: &mut Board, geometry: &GridGeometry, x: f32) {
        let ResizeState::Resizing {
            id,
            edge,
            origin_x,
            start,
            applied_min,
        } = &mut self.state
        else {
            return;
        };
        let total = geometry.minute_delta(x - *origin_x);
        if total == *applied_min {
            return;
        }
        board.set_task_geometry(*id, start.anchor, start.duration_min);
        if total != 0 {
            resize_task(board, *id, *edge, total);
        }
        *applied_min = total;
    }

    /// Commit: the store already holds the final geometry, so this only
    /// returns to idle. Returns the task id for the persistence trigger.
    pub fn finish(&mut self) -> Option<TaskId> {
        let state = std::mem::take(&mut self.state);
        match state {
            ResizeState::Resizing { id, .. } => Some(id),
            ResizeState::Idle => None,
        }
    }

    /// Abort: restore the start geometry and return to idle. Restoring is
    /// exempt from placement validation — the values came from the task
    /// itself. A task deleted mid-resize stays deleted.
    pub fn cancel(&mut self, board: &mut Board) {
        let state = std::mem::take(&mut self.state);
        if let ResizeState::Resizing { id, start, .. } = state {
            board.set_task_geometry(id, start.anchor, start.duration_min);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Horizon;
    use crate::model::{TaskKind, Technician};
    use crate::ops::task_ops::{NewTask, create_task};
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 2).unwrap()
    }

    fn geo() -> GridGeometry {
        GridGeometry::new(60.0, 10.0, 8, 15)
    }

    fn board_with_task() -> (Board, TaskId) {
        let mut b = Board::with_roster(
            Horizon::single_day(day(), 8, 17),
            vec![Technician::new(1, "Aart", 8, 17)],
        );
        let id = create_task(
            &mut b,
            NewTask {
                technician: Some(1),
                anchor: Anchor::new(day(), 9, 0),
                duration_min: 120,
                kind: TaskKind::Repair,
                description: "Clutch".into(),
                order_ref: None,
            },
        )
        .unwrap();
        (b, id)
    }

    #[test]
    fn test_trailing_resize_applies_incrementally() {
        let (mut b, id) = board_with_task();
        let mut resize = ResizeController::new();
        assert!(resize.begin(&b, id, ResizeEdge::Trailing, 200.0));

        // +30 min (30 px at 60 px/h), then another +15
        resize.pointer_move(&mut b, &geo(), 230.0);
        assert_eq!(b.task(id).unwrap().duration_min, 150);
        resize.pointer_move(&mut b, &geo(), 245.0);
        assert_eq!(b.task(id).unwrap().duration_min, 165);

        assert_eq!(resize.finish(), Some(id));
        assert_eq!(b.task(id).unwrap().duration_min, 165);
        assert_eq!(resize.state(), &ResizeState::Idle);
    }

    #[test]
    fn test_pointer_jitter_below_one_step_does_nothing() {
        let (mut b, id) = board_with_task();
        let mut resize = ResizeController::new();
        resize.begin(&b, id, ResizeEdge::Trailing, 200.0);
        resize.pointer_move(&mut b, &geo(), 205.0);
        resize.pointer_move(&mut b, &geo(), 198.0);
        assert_eq!(b.task(id).unwrap().duration_min, 120);
    }

    #[test]
    fn test_moving_back_and_forth_is_consistent() {
        let (mut b, id) = board_with_task();
        let mut resize = ResizeController::new();
        resize.begin(&b, id, ResizeEdge::Trailing, 200.0);
        resize.pointer_move(&mut b, &geo(), 260.0); // +60
        resize.pointer_move(&mut b, &geo(), 230.0); // back to +30
        resize.pointer_move(&mut b, &geo(), 200.0); // back to origin
        assert_eq!(b.task(id).unwrap().duration_min, 120);
    }

    #[test]
    fn test_trailing_overdrag_past_floor_then_return() {
        let (mut b, id) = board_with_task();
        let mut resize = ResizeController::new();
        resize.begin(&b, id, ResizeEdge::Trailing, 200.0);

        // -180 min against a 120-min task hits the one-step floor
        resize.pointer_move(&mut b, &geo(), 20.0);
        assert_eq!(b.task(id).unwrap().duration_min, 15);

        // Backing off to the origin must not hand back the clamped minutes
        resize.pointer_move(&mut b, &geo(), 200.0);
        assert_eq!(b.task(id).unwrap().duration_min, 120);
    }

    #[test]
    fn test_leading_overdrag_past_open_hour_then_return() {
        let (mut b, id) = board_with_task();
        let mut resize = ResizeController::new();
        resize.begin(&b, id, ResizeEdge::Leading, 100.0);

        // -120 min would put the start at 07:00; it stops at the opening hour
        resize.pointer_move(&mut b, &geo(), -20.0);
        let task = b.task(id).unwrap();
        assert_eq!((task.anchor.hour, task.anchor.minute), (8, 0));
        assert_eq!(task.duration_min, 180);

        resize.pointer_move(&mut b, &geo(), 100.0);
        let task = b.task(id).unwrap();
        assert_eq!((task.anchor.hour, task.anchor.minute), (9, 0));
        assert_eq!(task.duration_min, 120);
    }

    #[test]
    fn test_cancel_restores_start_geometry() {
        let (mut b, id) = board_with_task();
        let mut resize = ResizeController::new();
        resize.begin(&b, id, ResizeEdge::Leading, 100.0);
        resize.pointer_move(&mut b, &geo(), 160.0);
        assert_ne!(b.task(id).unwrap().duration_min, 120);

        resize.cancel(&mut b);
        let task = b.task(id).unwrap();
        assert_eq!(task.duration_min, 120);
        assert_eq!((task.anchor.hour, task.anchor.minute), (9, 0));
        assert_eq!(resize.state(), &ResizeState::Idle);
    }

    #[test]
    fn test_no_second_overlapping_resize() {
        let (b, id) = board_with_task();
        let mut resize = ResizeController::new();
        assert!(resize.begin(&b, id, ResizeEdge::Trailing, 0.0));
        assert!(!resize.begin(&b, id, ResizeEdge::Leading, 0.0));
    }

    #[test]
    fn test_begin_on_stale_task_refused() {
        let (b, _) = board_with_task();
        let mut resize = ResizeController::new();
        assert!(!resize.begin(&b, 42, ResizeEdge::Trailing, 0.0));
        assert!(!resize.is_active());
    }

    #[test]
    fn test_cancel_after_task_deleted_is_noop() {
        let (mut b, id) = board_with_task();
        let mut resize = ResizeController::new();
        resize.begin(&b, id, ResizeEdge::Trailing, 0.0);
        crate::ops::task_ops::delete_task(&mut b, id);
        resize.cancel(&mut b);
        assert!(b.task(id).is_none());
    }
}
