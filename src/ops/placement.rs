use chrono::NaiveDate;

use crate::model::{Board, TaskId, TechnicianId, WorkItemId};

use super::BoardError;
use super::convert::place_unassigned;

/// Default start time for work assigned to a technician without an explicit
/// slot (e.g. a context-menu action): the shift start if the technician has
/// nothing on that day, otherwise the latest end time among their tasks.
///
/// This is an append rule only — it does not search gaps between earlier
/// tasks and it does not rebalance across technicians. The result can sit at
/// or past the closing hour on a full day; `create_task` then rejects it
/// like any other out-of-horizon placement.
pub fn default_start(board: &Board, technician: TechnicianId, day: NaiveDate) -> (u8, u8) {
    let shift_start_min = board
        .technician(technician)
        .map(|t| t.shift_start as u32 * 60)
        .unwrap_or_else(|| board.horizon.open_min());

    let latest_end = board
        .tasks_for(technician, day)
        .map(|t| t.end_min())
        .max();

    let start = match latest_end {
        Some(end) => end.max(shift_start_min),
        None => shift_start_min,
    };
    ((start / 60) as u8, (start % 60) as u8)
}

/// Assign an unassigned work item to a technician using the default-start
/// heuristic. Returns `Ok(None)` when the item vanished in the meantime.
pub fn assign_item(
    board: &mut Board,
    item: WorkItemId,
    technician: TechnicianId,
    day: NaiveDate,
) -> Result<Option<TaskId>, BoardError> {
    let (hour, minute) = default_start(board, technician, day);
    place_unassigned(board, item, technician, day, hour, minute)
}
