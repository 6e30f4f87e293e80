use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::task::WorkCategory;

/// Identifier for an item in the unassigned work queue
pub type WorkItemId = u64;

/// Identifier for a staging note
pub type NoteId = u64;

/// Order-derived work that has not been bound to a technician or time yet.
/// Conversion into a scheduled task is one-directional and removes the item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnassignedWorkItem {
    pub id: WorkItemId,
    pub order_ref: String,
    pub job_card: String,
    pub description: String,
    pub category: WorkCategory,
    /// Estimated duration in minutes, from the order intake form
    pub estimate_min: u32,
}

/// A transient free-text entry on a day bucket, preceding formal scheduling.
/// It converts into an unassigned work item (via the external order
/// boundary) or directly into a freeform task; either path consumes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StagingNote {
    pub id: NoteId,
    pub text: String,
    pub day: NaiveDate,
}
