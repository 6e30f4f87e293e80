use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use super::technician::TechnicianId;

/// One clocked work interval from the external clocking feed.
///
/// Read-only input: the overlay projects these over the planned grid but
/// never writes them back, and correlation with a planned task happens by
/// order-reference value only — there is no foreign key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClockedInterval {
    pub technician: TechnicianId,
    pub order_ref: String,
    pub start: DateTime<Local>,
    /// None while the technician is still clocked in
    pub end: Option<DateTime<Local>>,
    /// Set by the feed when it already matched this interval to the plan
    pub matched: bool,
}

impl ClockedInterval {
    pub fn is_open(&self) -> bool {
        self.end.is_none()
    }
}
