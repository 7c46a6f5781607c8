use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::core::{action::PlanAction, hour::truncate_to_hour};

/// Planned actions keyed by hour start.
///
/// Only non-idle hours are stored: an absent entry means [`PlanAction::None`].
#[must_use]
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Assignments(BTreeMap<DateTime<Local>, PlanAction>);

impl Assignments {
    pub fn get(&self, time: DateTime<Local>) -> PlanAction {
        self.0.get(&truncate_to_hour(time)).copied().unwrap_or_default()
    }

    pub fn set(&mut self, time: DateTime<Local>, action: PlanAction) {
        let hour = truncate_to_hour(time);
        if action == PlanAction::None {
            self.0.remove(&hour);
        } else {
            self.0.insert(hour, action);
        }
    }

    /// Advance the hour to its next action and return the new one.
    pub fn cycle(&mut self, time: DateTime<Local>) -> PlanAction {
        let action = self.get(time).next();
        self.set(time, action);
        action
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// Drop the assignments for hours which are not in `hours`.
    pub fn retain_within(&mut self, hours: &BTreeSet<DateTime<Local>>) {
        self.0.retain(|hour, _| hours.contains(hour));
    }

    #[must_use]
    pub fn count(&self, action: PlanAction) -> usize {
        self.0.values().filter(|assigned| **assigned == action).count()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeDelta, TimeZone};

    use super::*;

    #[test]
    fn cycle_three_times_is_idle() {
        let time = Local.with_ymd_and_hms(2025, 2, 1, 9, 41, 0).unwrap();
        let mut assignments = Assignments::default();
        assert_eq!(assignments.cycle(time), PlanAction::Charge);
        assert_eq!(assignments.cycle(time), PlanAction::Discharge);
        assert_eq!(assignments.cycle(time), PlanAction::None);
        assert!(assignments.is_empty());
    }

    #[test]
    fn cycle_truncates_to_hour() {
        let hour = Local.with_ymd_and_hms(2025, 2, 1, 9, 0, 0).unwrap();
        let mut assignments = Assignments::default();
        assignments.cycle(hour + TimeDelta::minutes(10));
        assignments.cycle(hour + TimeDelta::minutes(50));
        assert_eq!(assignments.get(hour), PlanAction::Discharge);
        assert_eq!(assignments.len(), 1);
    }

    #[test]
    fn retain_within() {
        let hour = Local.with_ymd_and_hms(2025, 2, 1, 9, 0, 0).unwrap();
        let mut assignments = Assignments::default();
        assignments.set(hour, PlanAction::Charge);
        assignments.set(hour + TimeDelta::hours(1), PlanAction::Discharge);
        assignments.retain_within(&BTreeSet::from([hour + TimeDelta::hours(1)]));
        assert_eq!(assignments.get(hour), PlanAction::None);
        assert_eq!(assignments.count(PlanAction::Discharge), 1);
    }

    #[test]
    fn json_roundtrip() -> crate::prelude::Result {
        let hour = Local.with_ymd_and_hms(2025, 2, 1, 9, 0, 0).unwrap();
        let mut assignments = Assignments::default();
        assignments.set(hour, PlanAction::Charge);
        let json = serde_json::to_value(&assignments)?;
        assert_eq!(serde_json::from_value::<Assignments>(json)?, assignments);
        Ok(())
    }
}
