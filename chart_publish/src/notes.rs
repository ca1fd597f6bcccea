//! Freshness annotation stamped into the chart's notes.

use chrono::{DateTime, Datelike, Timelike, Utc};
use chrono_tz::Europe::Madrid;

/// Spanish short month names, `es-ES` style ("sept", not "sep").
const MONTHS_ES: [&str; 12] = [
    "ene", "feb", "mar", "abr", "may", "jun", "jul", "ago", "sept", "oct", "nov", "dic",
];

/// Formats the freshness note for a chart update at `now`.
///
/// Madrid local time, Spanish wording, day + short month + 24-hour time
/// with a dot between hours and minutes: `Actualizado: 16 sept, 14.05.`
pub fn freshness_note(now: DateTime<Utc>) -> String {
    let local = now.with_timezone(&Madrid);
    let month = MONTHS_ES[local.month0() as usize];
    format!(
        "Actualizado: {} {}, {:02}.{:02}.",
        local.day(),
        month,
        local.hour(),
        local.minute()
    )
}
