pub mod convert;
pub mod placement;
pub mod split;
pub mod task_ops;

use crate::model::TechnicianId;

/// Error type for board mutations.
///
/// Stale-id mutations are deliberately *not* errors: the store may have
/// changed shape while an external call was in flight, so every mutation
/// against a deleted id is a quiet no-op instead.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("unknown technician: {0}")]
    UnknownTechnician(TechnicianId),
    #[error("placement outside the scheduling horizon")]
    OutsideHorizon,
    #[error("a task without a technician must stay not-started")]
    UnassignedLifecycle,
    #[error("splitting requires supervisor privilege")]
    PermissionDenied,
    #[error("task too short to split")]
    TooShortToSplit,
    #[error("a day split needs at least two days")]
    InvalidSplitCount,
    #[error("cannot split a task onto its own technician")]
    SplitOntoSameTechnician,
}
