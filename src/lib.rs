//! Task-placement engine for a workshop scheduling board.
//!
//! One shared core behind three rendering surfaces (day grid, weekly board,
//! all-technician board): grid geometry and snapping, the scheduled-task
//! store, the unassigned work queue and staging notes, drag/resize state
//! machines, the placement heuristic, the privileged split engine, the
//! status/color derivation and the clocked-activity overlay.
//!
//! The crate is UI-agnostic and does no I/O. External collaborators supply
//! the technician roster and the clocking feed, and receive full task
//! snapshots over the [`session::CommitTasks`] boundary.

pub mod geometry;
pub mod interact;
pub mod model;
pub mod ops;
pub mod overlay;
pub mod session;
pub mod status;

pub use geometry::{GridGeometry, Horizon};
pub use model::{
    Anchor, Board, ClockedInterval, Lifecycle, ScheduledTask, StagingNote, TaskId, TaskKind,
    Technician, TechnicianId, UnassignedWorkItem, WorkCategory,
};
pub use ops::BoardError;
pub use ops::split::Privilege;
pub use session::BoardSession;
pub use status::{BoardStatus, derive_status, task_color, task_status};
