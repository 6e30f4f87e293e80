use serde::{Deserialize, Serialize};

/// Identifier for a technician in the external roster
pub type TechnicianId = u64;

/// A roster entry. The roster is owned by an external collaborator; this
/// engine only references technicians by id and never creates or edits them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Technician {
    pub id: TechnicianId,
    pub name: String,
    /// First hour of the shift (e.g. 8 for 08:00)
    pub shift_start: u8,
    /// Hour the shift ends (exclusive, e.g. 17 for 17:00)
    pub shift_end: u8,
}

impl Technician {
    pub fn new(id: TechnicianId, name: impl Into<String>, shift_start: u8, shift_end: u8) -> Self {
        Technician {
            id,
            name: name.into(),
            shift_start,
            shift_end,
        }
    }
}
