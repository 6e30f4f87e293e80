use chrono::{Local, NaiveDate};
use log::debug;

use crate::geometry::{snap_duration, snap_minutes};
use crate::model::{
    Anchor, Board, Lifecycle, ProgressNote, ScheduledTask, TaskId, TaskKind, TechnicianId,
    WorkCategory,
};

use super::BoardError;

/// Fields for a new task. All creation paths (drag placement, quick-create
/// at a cell, note conversion, splits) funnel through `create_task` so the
/// snapping and horizon validation cannot be bypassed.
#[derive(Debug, Clone)]
pub struct NewTask {
    pub technician: Option<TechnicianId>,
    pub anchor: Anchor,
    pub duration_min: u32,
    pub kind: TaskKind,
    pub description: String,
    pub order_ref: Option<String>,
}

/// A partial update to a task's non-placement fields. `None` leaves a field
/// untouched; `order_ref: Some(None)` clears the order binding.
#[derive(Debug, Clone, Default)]
pub struct TaskPatch {
    pub description: Option<String>,
    pub lifecycle: Option<Lifecycle>,
    pub kind: Option<TaskKind>,
    pub order_ref: Option<Option<String>>,
    pub duration_min: Option<u32>,
}

/// Which edge of a task a resize grabs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeEdge {
    Leading,
    Trailing,
}

// ---------------------------------------------------------------------------
// Create / update / delete
// ---------------------------------------------------------------------------

/// Create a task. The anchor minute and duration are snapped to the grid
/// step before validation; a start outside the horizon or an unknown
/// technician rejects the whole creation with no partial task left behind.
pub fn create_task(board: &mut Board, new: NewTask) -> Result<TaskId, BoardError> {
    let step = board.horizon.step_min;
    let anchor = snap_anchor(new.anchor, step);
    let duration_min = snap_duration(new.duration_min as i64, step);

    validate_technician(board, new.technician)?;
    if !board.horizon.contains(&anchor) {
        debug!("rejected placement at {:?}: outside horizon", anchor);
        return Err(BoardError::OutsideHorizon);
    }

    let id = board.alloc_task_id();
    board.tasks.insert(
        id,
        ScheduledTask {
            id,
            order_ref: new.order_ref,
            technician: new.technician,
            kind: new.kind,
            lifecycle: Lifecycle::NotStarted,
            anchor,
            duration_min,
            description: new.description,
            progress: Vec::new(),
        },
    );
    Ok(id)
}

/// Quick-create at a grid cell: a one-hour task of the given category,
/// not started, unbound to any order.
pub fn quick_create(
    board: &mut Board,
    technician: TechnicianId,
    day: NaiveDate,
    hour: u8,
    minute: u8,
    category: WorkCategory,
    description: impl Into<String>,
) -> Result<TaskId, BoardError> {
    create_task(
        board,
        NewTask {
            technician: Some(technician),
            anchor: Anchor::new(day, hour, minute),
            duration_min: 60,
            kind: TaskKind::from_category(category),
            description: description.into(),
            order_ref: None,
        },
    )
}

/// Apply a patch to a task. A stale id is a no-op (the task may have been
/// deleted while an external call was in flight).
pub fn update_task(board: &mut Board, id: TaskId, patch: TaskPatch) -> Result<(), BoardError> {
    let step = board.horizon.step_min;
    let Some(task) = board.tasks.get(&id) else {
        return Ok(());
    };

    // A task without a technician may not progress past not-started.
    if let Some(lifecycle) = patch.lifecycle
        && task.technician.is_none()
        && lifecycle != Lifecycle::NotStarted
    {
        return Err(BoardError::UnassignedLifecycle);
    }

    let task = board.tasks.get_mut(&id).expect("checked above");
    if let Some(description) = patch.description {
        task.description = description;
    }
    if let Some(lifecycle) = patch.lifecycle {
        task.lifecycle = lifecycle;
    }
    if let Some(kind) = patch.kind {
        task.kind = kind;
    }
    if let Some(order_ref) = patch.order_ref {
        task.order_ref = order_ref;
    }
    if let Some(duration) = patch.duration_min {
        task.duration_min = snap_duration(duration as i64, step);
    }
    Ok(())
}

/// Delete a task. Returns whether anything was removed; a stale id is a
/// no-op.
pub fn delete_task(board: &mut Board, id: TaskId) -> bool {
    board.tasks.shift_remove(&id).is_some()
}

/// Append a progress annotation, stamped now. Annotations are append-only;
/// there is no removal operation.
pub fn add_progress_note(board: &mut Board, id: TaskId, text: impl Into<String>) {
    if let Some(task) = board.tasks.get_mut(&id) {
        task.progress.push(ProgressNote {
            at: Local::now(),
            text: text.into(),
        });
    }
}

// ---------------------------------------------------------------------------
// Move / resize
// ---------------------------------------------------------------------------

/// Move a task to a technician lane and time slot. Technician and anchor
/// change in one update — the grid must never see a task at a stale
/// technician with a fresh time or vice versa. A stale id is a no-op.
pub fn move_task(
    board: &mut Board,
    id: TaskId,
    technician: TechnicianId,
    day: NaiveDate,
    hour: u8,
    minute: u8,
) -> Result<(), BoardError> {
    if !board.tasks.contains_key(&id) {
        return Ok(());
    }

    let step = board.horizon.step_min;
    let anchor = snap_anchor(Anchor::new(day, hour, minute), step);
    validate_technician(board, Some(technician))?;
    if !board.horizon.contains(&anchor) {
        debug!("rejected move of task {} to {:?}: outside horizon", id, anchor);
        return Err(BoardError::OutsideHorizon);
    }

    let task = board.tasks.get_mut(&id).expect("checked above");
    task.technician = Some(technician);
    task.anchor = anchor;
    Ok(())
}

/// Resize a task by a minute delta on one edge.
///
/// Trailing edge: only the duration changes, clamped to one grid step.
/// Leading edge: start and duration change together so the trailing-edge
/// absolute time is preserved; the start never precedes the opening hour.
/// A stale id is a no-op.
pub fn resize_task(board: &mut Board, id: TaskId, edge: ResizeEdge, delta_min: i64) {
    let step = board.horizon.step_min;
    let open_min = board.horizon.open_min();
    let Some(task) = board.tasks.get_mut(&id) else {
        return;
    };

    match edge {
        ResizeEdge::Trailing => {
            task.duration_min = snap_duration(task.duration_min as i64 + delta_min, step);
        }
        ResizeEdge::Leading => {
            let end = task.end_min() as i64;
            let new_duration = snap_duration(task.duration_min as i64 - delta_min, step);
            let mut new_start = end - new_duration as i64;
            if new_start < open_min as i64 {
                // Clamp at the opening hour; the trailing edge stays put, so
                // the duration absorbs the difference.
                new_start = open_min as i64;
            }
            task.duration_min = (end - new_start) as u32;
            task.anchor = Anchor::from_day_minutes(task.anchor.day, new_start as u32);
        }
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn snap_anchor(anchor: Anchor, step: u32) -> Anchor {
    Anchor::from_day_minutes(anchor.day, snap_minutes(anchor.start_min(), step))
}

fn validate_technician(
    board: &Board,
    technician: Option<TechnicianId>,
) -> Result<(), BoardError> {
    match technician {
        Some(id) if board.technician(id).is_none() => {
            debug!("rejected placement: unknown technician {}", id);
            Err(BoardError::UnknownTechnician(id))
        }
        _ => Ok(()),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Horizon;
    use crate::model::Technician;
    use pretty_assertions::assert_eq;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 2).unwrap()
    }

    fn board() -> Board {
        Board::with_roster(
            Horizon::week(day(), 8, 17),
            vec![
                Technician::new(1, "Aart", 8, 17),
                Technician::new(2, "Bente", 8, 17),
            ],
        )
    }

    fn service_at(technician: TechnicianId, hour: u8, minute: u8, duration_min: u32) -> NewTask {
        NewTask {
            technician: Some(technician),
            anchor: Anchor::new(day(), hour, minute),
            duration_min,
            kind: TaskKind::Service,
            description: "Annual service".into(),
            order_ref: Some("WO-100".into()),
        }
    }

    #[test]
    fn test_create_snaps_minute_and_duration() {
        let mut b = board();
        let id = create_task(
            &mut b,
            NewTask {
                duration_min: 50,
                ..service_at(1, 9, 52, 0)
            },
        )
        .unwrap();
        let task = b.task(id).unwrap();
        assert_eq!((task.anchor.hour, task.anchor.minute), (9, 45));
        assert_eq!(task.duration_min, 45);
        assert_eq!(task.lifecycle, Lifecycle::NotStarted);
    }

    #[test]
    fn test_create_rejects_unknown_technician() {
        let mut b = board();
        let result = create_task(&mut b, service_at(99, 9, 0, 60));
        assert_eq!(result, Err(BoardError::UnknownTechnician(99)));
        assert!(b.tasks.is_empty());
    }

    #[test]
    fn test_create_rejects_outside_horizon() {
        let mut b = board();
        assert_eq!(
            create_task(&mut b, service_at(1, 17, 0, 60)),
            Err(BoardError::OutsideHorizon)
        );
        assert_eq!(
            create_task(&mut b, service_at(1, 7, 30, 60)),
            Err(BoardError::OutsideHorizon)
        );
        assert!(b.tasks.is_empty());
    }

    #[test]
    fn test_update_stale_id_is_noop() {
        let mut b = board();
        let patch = TaskPatch {
            description: Some("anything".into()),
            ..TaskPatch::default()
        };
        assert_eq!(update_task(&mut b, 42, patch), Ok(()));
    }

    #[test]
    fn test_update_rejects_lifecycle_on_unassigned_task() {
        let mut b = board();
        let id = create_task(
            &mut b,
            NewTask {
                technician: None,
                ..service_at(1, 9, 0, 60)
            },
        )
        .unwrap();
        let patch = TaskPatch {
            lifecycle: Some(Lifecycle::InProgress),
            ..TaskPatch::default()
        };
        assert_eq!(
            update_task(&mut b, id, patch),
            Err(BoardError::UnassignedLifecycle)
        );
        assert_eq!(b.task(id).unwrap().lifecycle, Lifecycle::NotStarted);
    }

    #[test]
    fn test_delete_then_mutate_is_noop() {
        let mut b = board();
        let id = create_task(&mut b, service_at(1, 9, 0, 60)).unwrap();
        assert!(delete_task(&mut b, id));
        assert!(!delete_task(&mut b, id));
        resize_task(&mut b, id, ResizeEdge::Trailing, 30);
        assert_eq!(move_task(&mut b, id, 2, day(), 10, 0), Ok(()));
        assert!(b.task(id).is_none());
    }

    #[test]
    fn test_move_updates_technician_and_anchor_atomically() {
        let mut b = board();
        let id = create_task(&mut b, service_at(1, 8, 0, 60)).unwrap();
        move_task(&mut b, id, 2, day(), 10, 15).unwrap();
        let task = b.task(id).unwrap();
        assert_eq!(task.technician, Some(2));
        assert_eq!((task.anchor.hour, task.anchor.minute), (10, 15));
    }

    #[test]
    fn test_move_rejected_leaves_task_untouched() {
        let mut b = board();
        let id = create_task(&mut b, service_at(1, 8, 0, 60)).unwrap();
        assert_eq!(
            move_task(&mut b, id, 2, day(), 23, 0),
            Err(BoardError::OutsideHorizon)
        );
        let task = b.task(id).unwrap();
        // Neither field moved — no partial update
        assert_eq!(task.technician, Some(1));
        assert_eq!((task.anchor.hour, task.anchor.minute), (8, 0));
    }

    #[test]
    fn test_trailing_resize_clamps_to_one_step() {
        let mut b = board();
        let id = create_task(&mut b, service_at(1, 9, 0, 180)).unwrap();
        resize_task(&mut b, id, ResizeEdge::Trailing, -200);
        assert_eq!(b.task(id).unwrap().duration_min, 15);
    }

    #[test]
    fn test_leading_resize_preserves_trailing_edge() {
        let mut b = board();
        let id = create_task(&mut b, service_at(1, 9, 0, 120)).unwrap();
        // Drag the leading edge 30 minutes to the right: start 9:30, end 11:00
        resize_task(&mut b, id, ResizeEdge::Leading, 30);
        let task = b.task(id).unwrap();
        assert_eq!((task.anchor.hour, task.anchor.minute), (9, 30));
        assert_eq!(task.end_min(), 11 * 60);
        assert_eq!(task.duration_min, 90);
    }

    #[test]
    fn test_leading_resize_never_precedes_opening_hour() {
        let mut b = board();
        let id = create_task(&mut b, service_at(1, 8, 30, 60)).unwrap();
        // Growing past the opening hour clamps the start at 8:00
        resize_task(&mut b, id, ResizeEdge::Leading, -120);
        let task = b.task(id).unwrap();
        assert_eq!((task.anchor.hour, task.anchor.minute), (8, 0));
        assert_eq!(task.end_min(), 9 * 60 + 30);
    }

    #[test]
    fn test_leading_resize_shrink_clamps_to_one_step() {
        let mut b = board();
        let id = create_task(&mut b, service_at(1, 9, 0, 60)).unwrap();
        resize_task(&mut b, id, ResizeEdge::Leading, 300);
        let task = b.task(id).unwrap();
        assert_eq!(task.duration_min, 15);
        assert_eq!(task.end_min(), 10 * 60);
    }

    #[test]
    fn test_quick_create_defaults() {
        let mut b = board();
        let id = quick_create(
            &mut b,
            1,
            day(),
            14,
            30,
            WorkCategory::Freeform,
            "Clean the pit",
        )
        .unwrap();
        let task = b.task(id).unwrap();
        assert_eq!(task.duration_min, 60);
        assert_eq!(task.kind, TaskKind::Freeform { color: None });
        assert_eq!(task.order_ref, None);
    }

    #[test]
    fn test_progress_notes_append_only() {
        let mut b = board();
        let id = create_task(&mut b, service_at(1, 9, 0, 60)).unwrap();
        add_progress_note(&mut b, id, "waiting on parts");
        add_progress_note(&mut b, id, "parts arrived");
        let notes: Vec<&str> = b
            .task(id)
            .unwrap()
            .progress
            .iter()
            .map(|n| n.text.as_str())
            .collect();
        assert_eq!(notes, vec!["waiting on parts", "parts arrived"]);
    }
}
