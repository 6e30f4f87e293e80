//! One-directional conversions: unassigned work items and staging notes
//! become scheduled tasks (or, for notes, a formal order via the external
//! boundary). The source entry is consumed only after the destination is
//! known to be valid, so a rejected placement never loses work.

use chrono::NaiveDate;

use crate::model::{
    Anchor, Board, NoteId, TaskId, TaskKind, TechnicianId, WorkCategory, WorkItemId,
};

use super::BoardError;
use super::task_ops::{NewTask, create_task};

/// Default duration for work without an estimate (notes, unbilled items)
pub const DEFAULT_PLACEMENT_MIN: u32 = 60;

/// The external note-conversion boundary: turns free text into a formal
/// order. The engine never inserts the resulting unassigned work item
/// itself — the caller does, if desired.
pub trait ConvertNote {
    /// Returns the order reference of the newly created order
    fn convert(
        &mut self,
        text: &str,
        category: WorkCategory,
        estimate_min: u32,
    ) -> Result<String, ConvertError>;
}

#[derive(Debug, Clone, thiserror::Error)]
#[error("order conversion failed: {0}")]
pub struct ConvertError(pub String);

/// Place an unassigned work item at a grid cell, consuming it. Duration
/// comes from the item's estimate. Returns `Ok(None)` when the item
/// vanished in the meantime.
pub fn place_unassigned(
    board: &mut Board,
    item: WorkItemId,
    technician: TechnicianId,
    day: NaiveDate,
    hour: u8,
    minute: u8,
) -> Result<Option<TaskId>, BoardError> {
    let Some(item_ref) = board.unassigned_item(item) else {
        return Ok(None);
    };
    let new = NewTask {
        technician: Some(technician),
        anchor: Anchor::new(day, hour, minute),
        duration_min: item_ref.estimate_min,
        kind: TaskKind::from_category(item_ref.category),
        description: item_ref.description.clone(),
        order_ref: Some(item_ref.order_ref.clone()),
    };
    // Create first; only a successful placement consumes the item
    let id = create_task(board, new)?;
    board.take_unassigned(item);
    Ok(Some(id))
}

/// Place a staging note directly on the grid as a freeform task (one hour,
/// not started), consuming the note. Returns `Ok(None)` when the note
/// vanished in the meantime.
pub fn place_note(
    board: &mut Board,
    note: NoteId,
    technician: TechnicianId,
    day: NaiveDate,
    hour: u8,
    minute: u8,
) -> Result<Option<TaskId>, BoardError> {
    let Some(note_ref) = board.note(note) else {
        return Ok(None);
    };
    let new = NewTask {
        technician: Some(technician),
        anchor: Anchor::new(day, hour, minute),
        duration_min: DEFAULT_PLACEMENT_MIN,
        kind: TaskKind::Freeform { color: None },
        description: note_ref.text.clone(),
        order_ref: None,
    };
    let id = create_task(board, new)?;
    board.take_note(note);
    Ok(Some(id))
}

/// Place an order that lives outside the queues (an unbilled order dragged
/// straight from the payer list). One-hour default duration.
pub fn place_unbilled(
    board: &mut Board,
    order_ref: impl Into<String>,
    description: impl Into<String>,
    category: WorkCategory,
    technician: TechnicianId,
    day: NaiveDate,
    hour: u8,
    minute: u8,
) -> Result<TaskId, BoardError> {
    create_task(
        board,
        NewTask {
            technician: Some(technician),
            anchor: Anchor::new(day, hour, minute),
            duration_min: DEFAULT_PLACEMENT_MIN,
            kind: TaskKind::from_category(category),
            description: description.into(),
            order_ref: Some(order_ref.into()),
        },
    )
}

/// Turn a staging note into a formal order through the external boundary,
/// consuming the note on success. The resulting unassigned work item is the
/// caller's to insert. Returns `Ok(None)` when the note vanished.
pub fn note_to_order<C: ConvertNote>(
    board: &mut Board,
    note: NoteId,
    converter: &mut C,
    category: WorkCategory,
    estimate_min: u32,
) -> Result<Option<String>, ConvertError> {
    let Some(note_ref) = board.note(note) else {
        return Ok(None);
    };
    let order_ref = converter.convert(&note_ref.text, category, estimate_min)?;
    board.take_note(note);
    Ok(Some(order_ref))
}
