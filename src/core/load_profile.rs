use chrono::{DateTime, Local, Timelike};

use crate::quantity::energy::KilowattHours;

const BASE_LOAD: KilowattHours = KilowattHours(0.8);
const EVENING_PEAK: KilowattHours = KilowattHours(0.7);
const NIGHT_DIP: KilowattHours = KilowattHours(0.2);

/// Estimated household consumption during the hour starting at `time`.
///
/// Used when no measured load is available for the hour.
#[must_use]
pub fn synthetic_load(time: DateTime<Local>) -> KilowattHours {
    let mut load = BASE_LOAD;
    match time.hour() {
        17..=22 => load += EVENING_PEAK,
        0..=5 => load -= NIGHT_DIP,
        _ => {}
    }
    load
}
