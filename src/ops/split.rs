//! Splitting one task into several: across technicians (one job, multiple
//! hands, concurrent) or across days. Both forms are privileged; how the
//! privilege is granted is the surrounding session's concern.

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::model::{Anchor, Board, TaskId, TechnicianId};

use super::BoardError;

/// Privilege level of the calling session. Only the split operations check
/// it; everything else on the board is available to any session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Privilege {
    Standard,
    Supervisor,
}

/// Split a task between its technician and a second one. The original keeps
/// the floored half of the duration; the new task gets the remainder on the
/// target technician, with the same start time, description and category —
/// both halves run concurrently, they are not sequential.
///
/// Returns `Ok(None)` when the task vanished in the meantime.
pub fn split_across_technicians(
    board: &mut Board,
    privilege: Privilege,
    id: TaskId,
    target: TechnicianId,
) -> Result<Option<TaskId>, BoardError> {
    if privilege != Privilege::Supervisor {
        return Err(BoardError::PermissionDenied);
    }
    let step = board.horizon.step_min;
    let Some(task) = board.tasks.get(&id) else {
        return Ok(None);
    };

    if board.technician(target).is_none() {
        return Err(BoardError::UnknownTechnician(target));
    }
    if task.technician == Some(target) {
        return Err(BoardError::SplitOntoSameTechnician);
    }
    if task.duration_min < 2 * step {
        return Err(BoardError::TooShortToSplit);
    }

    let half = ((task.duration_min / 2) / step * step).max(step);
    let remainder = task.duration_min - half;

    let mut second = task.clone();
    second.id = board.alloc_task_id();
    second.technician = Some(target);
    second.duration_min = remainder;
    second.progress = Vec::new();
    let second_id = second.id;

    if let Some(original) = board.tasks.get_mut(&id) {
        original.duration_min = half;
    }
    board.tasks.insert(second_id, second);
    Ok(Some(second_id))
}

/// Split a task over `days` consecutive day buckets (same technician, same
/// start time each day). Every part is floored to the grid step with a one-
/// step minimum; the first part absorbs the remainder so the parts always
/// sum exactly to the original duration. Continuation tasks get a part-index
/// suffix on the description.
///
/// All target days are validated against the horizon before anything
/// changes. Returns `Ok(vec![])` when the task vanished in the meantime.
pub fn split_across_days(
    board: &mut Board,
    privilege: Privilege,
    id: TaskId,
    days: u32,
) -> Result<Vec<TaskId>, BoardError> {
    if privilege != Privilege::Supervisor {
        return Err(BoardError::PermissionDenied);
    }
    if days < 2 {
        return Err(BoardError::InvalidSplitCount);
    }
    let step = board.horizon.step_min;
    let Some(task) = board.tasks.get(&id) else {
        return Ok(Vec::new());
    };

    if task.duration_min < days * step {
        return Err(BoardError::TooShortToSplit);
    }

    let per_day = ((task.duration_min / days) / step * step).max(step);
    let first = task.duration_min - per_day * (days - 1);

    // Validate every continuation day before mutating anything
    for i in 1..days {
        let day = task.anchor.day + Duration::days(i as i64);
        if !board.horizon.contains_day(day) {
            return Err(BoardError::OutsideHorizon);
        }
    }

    let template = task.clone();
    let mut created = Vec::with_capacity(days as usize - 1);
    for i in 1..days {
        let mut part = template.clone();
        part.id = board.alloc_task_id();
        part.anchor = Anchor::new(
            template.anchor.day + Duration::days(i as i64),
            template.anchor.hour,
            template.anchor.minute,
        );
        part.duration_min = per_day;
        part.description = format!("{} ({}/{})", template.description, i + 1, days);
        part.progress = Vec::new();
        created.push(part.id);
        let part_id = part.id;
        board.tasks.insert(part_id, part);
    }
    if let Some(original) = board.tasks.get_mut(&id) {
        original.duration_min = first;
    }
    Ok(created)
}
