use std::collections::BTreeSet;

use chrono::{DateTime, Local};
use serde::Serialize;

use crate::{
    core::{
        action::PlanAction,
        assignments::Assignments,
        battery::{BatteryConfig, ConfigurationError},
        grid::GridLimits,
        record::HourRecord,
        selector::Selector,
        simulator::{SimulatedHour, Simulator},
        summary::Summary,
    },
    prelude::*,
};

/// What happens to the current assignments when new records arrive.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Retention {
    /// Keep the assignments for hours which are still present.
    Preserve,

    /// Start over with an idle plan.
    Discard,
}

/// Simulated plan together with its totals.
#[must_use]
#[derive(Clone, Debug, Serialize)]
pub struct Plan {
    pub hours: Vec<SimulatedHour>,
    pub summary: Summary,
}

/// Current records and the actions assigned to them.
#[must_use]
#[derive(Clone, Debug, Default)]
pub struct Planner {
    records: Vec<HourRecord>,
    assignments: Assignments,
}

impl Planner {
    pub const fn new(records: Vec<HourRecord>, assignments: Assignments) -> Self {
        Self { records, assignments }
    }

    #[must_use]
    pub fn records(&self) -> &[HourRecord] {
        &self.records
    }

    pub const fn assignments(&self) -> &Assignments {
        &self.assignments
    }

    #[instrument(skip_all, fields(n_records = records.len(), ?retention))]
    pub fn refresh(&mut self, records: Vec<HourRecord>, retention: Retention) {
        match retention {
            Retention::Preserve => {
                let hours: BTreeSet<_> = records.iter().map(|record| record.start).collect();
                self.assignments.retain_within(&hours);
            }
            Retention::Discard => self.assignments.clear(),
        }
        self.records = records;
        debug!(n_assignments = self.assignments.len(), "refreshed");
    }

    /// Toggle the hour manually and return its new action.
    pub fn cycle_action(&mut self, time: DateTime<Local>) -> PlanAction {
        let action = self.assignments.cycle(time);
        info!(%time, %action, "cycled");
        action
    }

    /// Replace all the assignments with the heuristic selection.
    pub fn auto_select(&mut self, selector: &Selector) {
        self.assignments = selector.select(&self.records);
    }

    pub fn simulate(
        &self,
        battery: BatteryConfig,
        grid: GridLimits,
    ) -> Result<Plan, ConfigurationError> {
        let hours = Simulator::try_new(battery, grid)?.simulate(&self.records, &self.assignments);
        let summary = hours.iter().collect();
        Ok(Plan { hours, summary })
    }
}
