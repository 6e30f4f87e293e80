//! Time-grid geometry: the pure hour/minute ⇄ pixel-offset mapping shared by
//! every board surface and every mutation path, so visual and logical
//! placement never diverge.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::model::Anchor;

/// Default time quantization for placement and resize, in minutes
pub const DEFAULT_STEP_MIN: u32 = 15;

/// Snap minutes-from-midnight to the nearest multiple of the grid step
pub fn snap_minutes(minutes: u32, step: u32) -> u32 {
    ((minutes + step / 2) / step) * step
}

/// Snap a (possibly negative after a delta) duration to the grid, clamped to
/// at least one step
pub fn snap_duration(minutes: i64, step: u32) -> u32 {
    if minutes <= step as i64 {
        return step;
    }
    let snapped = ((minutes + step as i64 / 2) / step as i64) * step as i64;
    (snapped as u32).max(step)
}

/// The bounded range the board accepts placements within: a run of day
/// buckets and the daily opening hours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Horizon {
    pub first_day: NaiveDate,
    pub day_count: u32,
    /// First schedulable hour (H0)
    pub open_hour: u8,
    /// First hour past the schedulable range (H1, exclusive)
    pub close_hour: u8,
    /// Grid step in minutes
    pub step_min: u32,
}

impl Horizon {
    /// A single-day horizon (the day grid)
    pub fn single_day(day: NaiveDate, open_hour: u8, close_hour: u8) -> Self {
        Horizon {
            first_day: day,
            day_count: 1,
            open_hour,
            close_hour,
            step_min: DEFAULT_STEP_MIN,
        }
    }

    /// A multi-day horizon (the weekly board)
    pub fn week(first_day: NaiveDate, open_hour: u8, close_hour: u8) -> Self {
        Horizon {
            first_day,
            day_count: 7,
            open_hour,
            close_hour,
            step_min: DEFAULT_STEP_MIN,
        }
    }

    pub fn open_min(&self) -> u32 {
        self.open_hour as u32 * 60
    }

    pub fn close_min(&self) -> u32 {
        self.close_hour as u32 * 60
    }

    pub fn contains_day(&self, day: NaiveDate) -> bool {
        let offset = day.signed_duration_since(self.first_day).num_days();
        offset >= 0 && (offset as u32) < self.day_count
    }

    /// Whether an anchor (a start position) lies within [H0, H1) on a
    /// horizon day. Tasks may run past the closing hour; their start may not.
    pub fn contains(&self, anchor: &Anchor) -> bool {
        self.contains_day(anchor.day)
            && anchor.start_min() >= self.open_min()
            && anchor.start_min() < self.close_min()
    }
}

/// Pixel mapping for one grid surface. Each surface constructs its own
/// geometry (unit widths differ between the day grid and the weekly board)
/// but all of them share these formulas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridGeometry {
    /// Pixels per hour
    pub unit_width: f32,
    /// Narrowest a task or overlay block may render
    pub min_visible_width: f32,
    /// First rendered hour (H0)
    pub open_hour: u8,
    /// Grid step in minutes
    pub step_min: u32,
}

impl GridGeometry {
    pub fn new(unit_width: f32, min_visible_width: f32, open_hour: u8, step_min: u32) -> Self {
        GridGeometry {
            unit_width,
            min_visible_width,
            open_hour,
            step_min,
        }
    }

    /// Horizontal offset of a time within the grid
    pub fn offset(&self, hour: u8, minute: u8) -> f32 {
        (hour as f32 - self.open_hour as f32) * self.unit_width
            + minute as f32 / 60.0 * self.unit_width
    }

    /// Offset of a raw minutes-from-midnight value (used by the overlay,
    /// which is not snapped to the grid step)
    pub fn offset_min(&self, minutes: f32) -> f32 {
        (minutes - self.open_hour as f32 * 60.0) / 60.0 * self.unit_width
    }

    /// Rendered width of a duration, clamped to the minimum visible width
    pub fn width(&self, duration_min: f32) -> f32 {
        (duration_min / 60.0 * self.unit_width).max(self.min_visible_width)
    }

    /// Inverse of `offset`: map a pixel offset back to minutes from
    /// midnight, snapped to the grid step. The result can fall outside the
    /// horizon; callers reject those.
    pub fn minutes_at(&self, offset: f32) -> i64 {
        let raw = self.open_hour as f32 * 60.0 + offset / self.unit_width * 60.0;
        let steps = (raw / self.step_min as f32).round() as i64;
        steps * self.step_min as i64
    }

    /// Pixel delta → minute delta, snapped to the grid step (for resize)
    pub fn minute_delta(&self, pixel_delta: f32) -> i64 {
        let raw = pixel_delta / self.unit_width * 60.0;
        let steps = (raw / self.step_min as f32).round() as i64;
        steps * self.step_min as i64
    }
}
