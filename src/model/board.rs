use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::geometry::Horizon;

use super::queue::{NoteId, StagingNote, UnassignedWorkItem, WorkItemId};
use super::task::{Anchor, ScheduledTask, TaskId, WorkCategory};
use super::technician::{Technician, TechnicianId};

/// The one state container behind all three board surfaces (day grid,
/// weekly board, all-technician board). Owned by the scheduling session and
/// passed by reference to each surface; there are no module-level globals
/// and only a single mutator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Board {
    /// Read-only roster, refreshed wholesale from the external collaborator
    pub technicians: Vec<Technician>,
    /// Scheduled tasks, id-keyed, in stable insertion order
    pub tasks: IndexMap<TaskId, ScheduledTask>,
    /// Orders waiting to be bound to a technician and time
    pub unassigned: Vec<UnassignedWorkItem>,
    /// Transient free-text notes per day bucket
    pub notes: Vec<StagingNote>,
    pub horizon: Horizon,
    next_task_id: TaskId,
    next_item_id: WorkItemId,
    next_note_id: NoteId,
}

impl Board {
    pub fn new(horizon: Horizon) -> Self {
        Board {
            technicians: Vec::new(),
            tasks: IndexMap::new(),
            unassigned: Vec::new(),
            notes: Vec::new(),
            horizon,
            next_task_id: 1,
            next_item_id: 1,
            next_note_id: 1,
        }
    }

    pub fn with_roster(horizon: Horizon, technicians: Vec<Technician>) -> Self {
        let mut board = Board::new(horizon);
        board.technicians = technicians;
        board
    }

    /// Replace the roster after a refresh from the external collaborator.
    /// Tasks keep their technician ids even if an id vanished; later moves
    /// against a vanished id fail validation.
    pub fn set_roster(&mut self, technicians: Vec<Technician>) {
        self.technicians = technicians;
    }

    pub fn technician(&self, id: TechnicianId) -> Option<&Technician> {
        self.technicians.iter().find(|t| t.id == id)
    }

    pub fn task(&self, id: TaskId) -> Option<&ScheduledTask> {
        self.tasks.get(&id)
    }

    /// Tasks for one technician lane on one day bucket
    pub fn tasks_for(
        &self,
        technician: TechnicianId,
        day: NaiveDate,
    ) -> impl Iterator<Item = &ScheduledTask> {
        self.tasks
            .values()
            .filter(move |t| t.technician == Some(technician) && t.anchor.day == day)
    }

    /// Tasks not bound to any technician (shown in the side rail)
    pub fn floating_tasks(&self) -> impl Iterator<Item = &ScheduledTask> {
        self.tasks.values().filter(|t| t.technician.is_none())
    }

    /// Full-store snapshot for the persistence boundary
    pub fn snapshot(&self) -> Vec<ScheduledTask> {
        self.tasks.values().cloned().collect()
    }

    pub(crate) fn alloc_task_id(&mut self) -> TaskId {
        let id = self.next_task_id;
        self.next_task_id += 1;
        id
    }

    /// Directly set a task's placement, bypassing validation. Only for
    /// restoring a geometry that was previously read from the same task
    /// (resize cancel).
    pub(crate) fn set_task_geometry(&mut self, id: TaskId, anchor: Anchor, duration_min: u32) {
        if let Some(task) = self.tasks.get_mut(&id) {
            task.anchor = anchor;
            task.duration_min = duration_min;
        }
    }

    // --- unassigned work queue ---

    pub fn add_unassigned(
        &mut self,
        order_ref: impl Into<String>,
        job_card: impl Into<String>,
        description: impl Into<String>,
        category: WorkCategory,
        estimate_min: u32,
    ) -> WorkItemId {
        let id = self.next_item_id;
        self.next_item_id += 1;
        self.unassigned.push(UnassignedWorkItem {
            id,
            order_ref: order_ref.into(),
            job_card: job_card.into(),
            description: description.into(),
            category,
            estimate_min,
        });
        id
    }

    pub fn unassigned_item(&self, id: WorkItemId) -> Option<&UnassignedWorkItem> {
        self.unassigned.iter().find(|i| i.id == id)
    }

    /// Remove and return an unassigned item (conversion is one-directional)
    pub(crate) fn take_unassigned(&mut self, id: WorkItemId) -> Option<UnassignedWorkItem> {
        let idx = self.unassigned.iter().position(|i| i.id == id)?;
        Some(self.unassigned.remove(idx))
    }

    // --- staging notes ---

    pub fn add_note(&mut self, text: impl Into<String>, day: NaiveDate) -> NoteId {
        let id = self.next_note_id;
        self.next_note_id += 1;
        self.notes.push(StagingNote {
            id,
            text: text.into(),
            day,
        });
        id
    }

    pub fn note(&self, id: NoteId) -> Option<&StagingNote> {
        self.notes.iter().find(|n| n.id == id)
    }

    /// Remove and return a staging note (conversion consumes it)
    pub(crate) fn take_note(&mut self, id: NoteId) -> Option<StagingNote> {
        let idx = self.notes.iter().position(|n| n.id == id)?;
        Some(self.notes.remove(idx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::WorkCategory;
    use pretty_assertions::assert_eq;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 2).unwrap()
    }

    fn board() -> Board {
        Board::with_roster(
            Horizon::week(day(), 8, 17),
            vec![Technician::new(1, "Aart", 8, 17)],
        )
    }

    #[test]
    fn test_take_unassigned_removes_item() {
        let mut b = board();
        let id = b.add_unassigned("WO-100", "JC-7", "Brake check", WorkCategory::Service, 90);
        assert!(b.unassigned_item(id).is_some());
        let item = b.take_unassigned(id).unwrap();
        assert_eq!(item.estimate_min, 90);
        assert!(b.unassigned_item(id).is_none());
        assert!(b.take_unassigned(id).is_none());
    }

    #[test]
    fn test_take_note_removes_note() {
        let mut b = board();
        let id = b.add_note("call customer re: lift", day());
        assert!(b.take_note(id).is_some());
        assert!(b.note(id).is_none());
    }

    #[test]
    fn test_roster_lookup() {
        let b = board();
        assert_eq!(b.technician(1).map(|t| t.name.as_str()), Some("Aart"));
        assert!(b.technician(99).is_none());
    }
}
