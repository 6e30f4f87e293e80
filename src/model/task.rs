use chrono::{DateTime, Local, NaiveDate};
use serde::{Deserialize, Serialize};

use super::technician::TechnicianId;

/// Identifier for a scheduled task on the board
pub type TaskId = u64;

/// Work category as it appears on the intake forms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkCategory {
    Service,
    Repair,
    Inspection,
    Freeform,
}

/// The kind of a scheduled task. Freeform tasks (ad-hoc board entries not
/// backed by an order) may carry a color override; order-backed tasks never
/// do, so the override cannot exist anywhere else by construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "category", rename_all = "lowercase")]
pub enum TaskKind {
    Service,
    Repair,
    Inspection,
    Freeform {
        /// Optional display color, `#RRGGBB`
        color: Option<String>,
    },
}

impl TaskKind {
    pub fn from_category(category: WorkCategory) -> TaskKind {
        match category {
            WorkCategory::Service => TaskKind::Service,
            WorkCategory::Repair => TaskKind::Repair,
            WorkCategory::Inspection => TaskKind::Inspection,
            WorkCategory::Freeform => TaskKind::Freeform { color: None },
        }
    }

    pub fn category(&self) -> WorkCategory {
        match self {
            TaskKind::Service => WorkCategory::Service,
            TaskKind::Repair => WorkCategory::Repair,
            TaskKind::Inspection => WorkCategory::Inspection,
            TaskKind::Freeform { .. } => WorkCategory::Freeform,
        }
    }

    /// The freeform color override, if any
    pub fn color_override(&self) -> Option<&str> {
        match self {
            TaskKind::Freeform { color } => color.as_deref(),
            _ => None,
        }
    }
}

/// Work-progress state of a task, distinct from the derived board status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Lifecycle {
    NotStarted,
    InProgress,
    OnHold,
    Finished,
}

/// Where a task sits on the grid: a day bucket plus a start time.
/// The minute is always snapped to the grid step by the operations layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Anchor {
    pub day: NaiveDate,
    pub hour: u8,
    pub minute: u8,
}

impl Anchor {
    pub fn new(day: NaiveDate, hour: u8, minute: u8) -> Self {
        Anchor { day, hour, minute }
    }

    /// Start time as minutes from midnight
    pub fn start_min(&self) -> u32 {
        self.hour as u32 * 60 + self.minute as u32
    }

    /// Build an anchor from a day and minutes from midnight
    pub fn from_day_minutes(day: NaiveDate, minutes: u32) -> Self {
        Anchor {
            day,
            hour: (minutes / 60) as u8,
            minute: (minutes % 60) as u8,
        }
    }
}

/// An append-only progress annotation on a task
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressNote {
    pub at: DateTime<Local>,
    pub text: String,
}

/// A task placed on (or staged for) the scheduling board
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledTask {
    pub id: TaskId,
    /// Order / job-card reference; None until the task is bound to an order
    pub order_ref: Option<String>,
    /// None = unassigned (not bound to a technician yet)
    pub technician: Option<TechnicianId>,
    pub kind: TaskKind,
    pub lifecycle: Lifecycle,
    pub anchor: Anchor,
    /// Duration in minutes; always ≥ one grid step and step-snapped
    pub duration_min: u32,
    pub description: String,
    /// Append-only; entries are never removed or rewritten
    pub progress: Vec<ProgressNote>,
}

impl ScheduledTask {
    /// End time as minutes from midnight
    pub fn end_min(&self) -> u32 {
        self.anchor.start_min() + self.duration_min
    }
}
