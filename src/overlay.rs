//! Read-only clocked-activity overlay: projects the external clocking feed
//! onto the planned grid. A pure function of its inputs — it never mutates a
//! task, and order-reference matching only selects a visual treatment, never
//! reparents or resizes planned work.

use chrono::{DateTime, Local, NaiveDate, Timelike};

use crate::geometry::GridGeometry;
use crate::model::{Board, ClockedInterval, TechnicianId};

/// Visual treatment of a clocked block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Treatment {
    OnSchedule,
    OffSchedule,
}

/// One rendered block of actual (clocked) time in a technician lane
#[derive(Debug, Clone, PartialEq)]
pub struct OverlaySegment {
    pub technician: TechnicianId,
    pub order_ref: String,
    pub offset: f32,
    pub width: f32,
    /// Still clocked in — the block grows with the wall clock
    pub open: bool,
    pub treatment: Treatment,
}

/// Project the clocking feed for one day bucket onto grid pixels. Open
/// intervals end at `now`, which the caller supplies so the projection stays
/// pure and testable; once `now` has moved to another day they end at the
/// closing hour instead.
pub fn project(
    intervals: &[ClockedInterval],
    board: &Board,
    day: NaiveDate,
    now: DateTime<Local>,
    geometry: &GridGeometry,
) -> Vec<OverlaySegment> {
    intervals
        .iter()
        .filter(|iv| iv.start.date_naive() == day)
        .map(|iv| {
            let start_min = minutes_of(iv.start);
            // An interval left open past its own day ends at the closing
            // hour; minutes-of-day from a later `now` would be meaningless
            let end_min = match iv.end {
                Some(end) => minutes_of(end),
                None if now.date_naive() == day => minutes_of(now),
                None => board.horizon.close_min() as f32,
            }
            .max(start_min);
            OverlaySegment {
                technician: iv.technician,
                order_ref: iv.order_ref.clone(),
                offset: geometry.offset_min(start_min),
                width: geometry.width(end_min - start_min),
                open: iv.is_open(),
                treatment: treatment_of(iv, board),
            }
        })
        .collect()
}

/// An interval counts as on-schedule when the feed already matched it to the
/// plan, or when a planned task for the same technician carries the same
/// order reference. Best-effort by value only; there is no foreign key.
fn treatment_of(interval: &ClockedInterval, board: &Board) -> Treatment {
    if interval.matched {
        return Treatment::OnSchedule;
    }
    let planned = board.tasks.values().any(|t| {
        t.technician == Some(interval.technician)
            && t.order_ref.as_deref() == Some(interval.order_ref.as_str())
    });
    if planned {
        Treatment::OnSchedule
    } else {
        Treatment::OffSchedule
    }
}

fn minutes_of(at: DateTime<Local>) -> f32 {
    at.hour() as f32 * 60.0 + at.minute() as f32 + at.second() as f32 / 60.0
}
