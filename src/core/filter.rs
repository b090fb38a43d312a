// mctwatch - core/filter.rs
//
// The staleness pipeline over loaded device rows.
// Core layer: pure logic, no I/O or UI dependencies.
//
// A row survives iff, in order:
//   1. its device id is not in the briefcase exclusion set,
//   2. its status contains the active needle (case-insensitive),
//   3. its last-signal timestamp parsed,
//   4. the timestamp is strictly older than the cutoff.
// Survivors are returned ascending by last signal (oldest first).

use crate::core::model::{DeviceRow, StaleDevice};
use chrono::{Duration, NaiveDateTime};
use std::collections::HashSet;

/// Pipeline parameters.
#[derive(Debug, Clone)]
pub struct StalenessCriteria {
    /// Device ids excluded from the report (briefcase devices).
    pub excluded: HashSet<String>,

    /// Case-insensitive substring the status must contain.
    pub active_needle: String,

    /// Devices silent for longer than this many days are stale.
    pub stale_days: i64,
}

impl StalenessCriteria {
    pub fn new(excluded: HashSet<String>, active_needle: &str, stale_days: i64) -> Self {
        Self {
            excluded,
            active_needle: active_needle.to_lowercase(),
            stale_days,
        }
    }

    /// The cutoff instant: last signals strictly before this are stale.
    pub fn cutoff(&self, now: NaiveDateTime) -> NaiveDateTime {
        now - Duration::days(self.stale_days)
    }
}

/// Run the staleness pipeline. `now` is injected so the cutoff is testable
/// and so one load uses one consistent clock reading.
pub fn stale_devices(
    rows: &[DeviceRow],
    criteria: &StalenessCriteria,
    now: NaiveDateTime,
) -> Vec<StaleDevice> {
    let cutoff = criteria.cutoff(now);

    let mut result: Vec<StaleDevice> = rows
        .iter()
        .filter(|row| !criteria.excluded.contains(&row.mct))
        .filter(|row| row.status.to_lowercase().contains(&criteria.active_needle))
        .filter_map(|row| {
            let last_signal = row.last_signal?;
            (last_signal < cutoff).then(|| StaleDevice {
                mct: row.mct.clone(),
                last_signal,
            })
        })
        .collect();

    result.sort_by_key(|d| d.last_signal);

    tracing::debug!(
        input = rows.len(),
        stale = result.len(),
        cutoff = %cutoff,
        "Staleness pipeline completed"
    );

    result
}
