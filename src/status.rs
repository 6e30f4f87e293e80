//! The single status → label/color mapping shared by every board surface.
//! Renderers must call these functions instead of keeping their own tables,
//! so the day grid, the weekly board and the all-technician board can never
//! drift apart.

use serde::{Deserialize, Serialize};

use crate::model::{Lifecycle, ScheduledTask, TechnicianId};

/// Derived presentation status of a task, distinct from its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BoardStatus {
    Unassigned,
    InProgress,
    Finished,
    Waiting,
}

impl BoardStatus {
    pub fn label(self) -> &'static str {
        match self {
            BoardStatus::Unassigned => "Unassigned",
            BoardStatus::InProgress => "In progress",
            BoardStatus::Finished => "Finished",
            BoardStatus::Waiting => "Waiting",
        }
    }

    /// Fixed display color, `#RRGGBB`
    pub fn color(self) -> &'static str {
        match self {
            BoardStatus::Unassigned => "#9E9E9E",
            BoardStatus::InProgress => "#2196F3",
            BoardStatus::Finished => "#4CAF50",
            BoardStatus::Waiting => "#FFC107",
        }
    }
}

/// Derive the board status, in priority order: unassigned beats everything,
/// then in-progress, then finished, then waiting.
pub fn derive_status(technician: Option<TechnicianId>, lifecycle: Lifecycle) -> BoardStatus {
    if technician.is_none() {
        return BoardStatus::Unassigned;
    }
    match lifecycle {
        Lifecycle::InProgress => BoardStatus::InProgress,
        Lifecycle::Finished => BoardStatus::Finished,
        Lifecycle::NotStarted | Lifecycle::OnHold => BoardStatus::Waiting,
    }
}

/// Status of a task as rendered on any surface
pub fn task_status(task: &ScheduledTask) -> BoardStatus {
    derive_status(task.technician, task.lifecycle)
}

/// Display color for a task block: the freeform color override when present,
/// otherwise the status color.
pub fn task_color(task: &ScheduledTask) -> &str {
    task.kind
        .color_override()
        .unwrap_or_else(|| task_status(task).color())
}
