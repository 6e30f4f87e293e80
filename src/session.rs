//! The scheduling session: one value that owns the board, both interaction
//! state machines, the privilege flag and the persistence boundary. Every
//! rendering surface borrows the session; there is exactly one mutator.
//!
//! Persistence is fire-and-forget per mutation: a failed commit never rolls
//! back in-memory state. The failure is kept as a retryable notice for the
//! UI and logged, never silently swallowed.

use chrono::NaiveDate;
use log::warn;

use crate::geometry::GridGeometry;
use crate::interact::{DragController, DragSource, ResizeController};
use crate::model::{Board, ScheduledTask, TaskId, Technician, TechnicianId, WorkItemId};
use crate::ops::split::{Privilege, split_across_days, split_across_technicians};
use crate::ops::task_ops::{ResizeEdge, TaskPatch};
use crate::ops::{BoardError, placement, task_ops};

/// The persistence boundary: accepts a full task-store snapshot. How it is
/// reconciled with durable storage is the collaborator's concern.
pub trait CommitTasks {
    fn commit(&mut self, snapshot: &[ScheduledTask]) -> Result<(), CommitError>;
}

#[derive(Debug, Clone, thiserror::Error)]
#[error("task commit failed: {0}")]
pub struct CommitError(pub String);

pub struct BoardSession<P: CommitTasks> {
    pub board: Board,
    pub drag: DragController,
    pub resize: ResizeController,
    privilege: Privilege,
    persister: P,
    pending_commit_error: Option<CommitError>,
}

impl<P: CommitTasks> BoardSession<P> {
    pub fn new(board: Board, persister: P) -> Self {
        BoardSession {
            board,
            drag: DragController::new(),
            resize: ResizeController::new(),
            privilege: Privilege::Standard,
            persister,
            pending_commit_error: None,
        }
    }

    pub fn with_privilege(mut self, privilege: Privilege) -> Self {
        self.privilege = privilege;
        self
    }

    pub fn privilege(&self) -> Privilege {
        self.privilege
    }

    /// Swap in a freshly fetched roster. Tasks are untouched; the store may
    /// have changed shape while the fetch was in flight and that is fine.
    pub fn refresh_roster(&mut self, technicians: Vec<Technician>) {
        self.board.set_roster(technicians);
    }

    // --- persistence ---

    /// Push the current snapshot over the persistence boundary. On failure
    /// the in-memory state stays authoritative and the error is retained
    /// for the UI to surface and retry.
    pub fn commit(&mut self) {
        let snapshot = self.board.snapshot();
        match self.persister.commit(&snapshot) {
            Ok(()) => self.pending_commit_error = None,
            Err(err) => {
                warn!("{}", err);
                self.pending_commit_error = Some(err);
            }
        }
    }

    pub fn pending_commit_error(&self) -> Option<&CommitError> {
        self.pending_commit_error.as_ref()
    }

    pub fn retry_commit(&mut self) {
        if self.pending_commit_error.is_some() {
            self.commit();
        }
    }

    // --- direct mutations (each one commits) ---

    pub fn update_task(&mut self, id: TaskId, patch: TaskPatch) -> Result<(), BoardError> {
        task_ops::update_task(&mut self.board, id, patch)?;
        self.commit();
        Ok(())
    }

    pub fn delete_task(&mut self, id: TaskId) {
        if task_ops::delete_task(&mut self.board, id) {
            self.commit();
        }
    }

    pub fn add_progress_note(&mut self, id: TaskId, text: impl Into<String>) {
        task_ops::add_progress_note(&mut self.board, id, text);
        self.commit();
    }

    /// Menu action: assign an unassigned item using the append heuristic
    pub fn assign_item(
        &mut self,
        item: WorkItemId,
        technician: TechnicianId,
        day: NaiveDate,
    ) -> Result<Option<TaskId>, BoardError> {
        let placed = placement::assign_item(&mut self.board, item, technician, day)?;
        if placed.is_some() {
            self.commit();
        }
        Ok(placed)
    }

    // --- splits (privileged) ---

    pub fn split_across_technicians(
        &mut self,
        id: TaskId,
        target: TechnicianId,
    ) -> Result<Option<TaskId>, BoardError> {
        let created = split_across_technicians(&mut self.board, self.privilege, id, target)?;
        if created.is_some() {
            self.commit();
        }
        Ok(created)
    }

    pub fn split_across_days(&mut self, id: TaskId, days: u32) -> Result<Vec<TaskId>, BoardError> {
        let created = split_across_days(&mut self.board, self.privilege, id, days)?;
        if !created.is_empty() {
            self.commit();
        }
        Ok(created)
    }

    // --- guarded interaction entry points ---

    /// Begin a drag, refused while any interaction (drag or resize) is in
    /// flight.
    pub fn begin_drag(&mut self, source: DragSource) -> bool {
        if self.resize.is_active() {
            return false;
        }
        self.drag.begin(source)
    }

    /// Drop the active drag; a landed drop commits.
    pub fn drop_drag(&mut self) -> Option<TaskId> {
        let landed = self.drag.drop(&mut self.board);
        if landed.is_some() {
            self.commit();
        }
        landed
    }

    pub fn cancel_drag(&mut self) {
        self.drag.cancel();
    }

    /// Begin a resize, refused while any interaction is in flight
    pub fn begin_resize(&mut self, id: TaskId, edge: ResizeEdge, x: f32) -> bool {
        if self.drag.is_active() {
            return false;
        }
        self.resize.begin(&self.board, id, edge, x)
    }

    pub fn resize_move(&mut self, geometry: &GridGeometry, x: f32) {
        self.resize.pointer_move(&mut self.board, geometry, x);
    }

    /// Commit the active resize
    pub fn finish_resize(&mut self) -> Option<TaskId> {
        let finished = self.resize.finish();
        if finished.is_some() {
            self.commit();
        }
        finished
    }

    /// Abort the active resize, restoring the pre-resize geometry
    pub fn cancel_resize(&mut self) {
        self.resize.cancel(&mut self.board);
    }
}
