use std::cmp::Reverse;

use bon::Builder;
use itertools::Itertools;

use crate::{
    core::{action::PlanAction, assignments::Assignments, record::HourRecord},
    prelude::*,
    quantity::rate::KilowattHourRate,
};

/// How strongly the local energy balance shifts the price score, per kilowatt-hour.
pub const DEFAULT_WEIGHT: f64 = 0.25;

/// Heuristic hour picker.
///
/// Charging favours cheap hours in which local generation does not cover the load,
/// discharging favours expensive hours with surplus generation.
#[must_use]
#[derive(Copy, Clone, Builder)]
pub struct Selector {
    #[builder(default = 0)]
    n_charge: usize,

    #[builder(default = 0)]
    n_discharge: usize,

    #[builder(default = DEFAULT_WEIGHT)]
    weight: f64,
}

impl Selector {
    /// The lower, the better to buy.
    pub fn buy_score(&self, record: &HourRecord) -> KilowattHourRate {
        KilowattHourRate(record.price.0 - self.weight * record.deficit().0)
    }

    /// The higher, the better to sell.
    pub fn sell_score(&self, record: &HourRecord) -> KilowattHourRate {
        KilowattHourRate(record.price.0 + self.weight * record.surplus().0)
    }

    /// Build fresh assignments for the records.
    ///
    /// Ties resolve in favour of the earlier hour. When an hour qualifies for both,
    /// discharging wins.
    #[instrument(skip_all, fields(n_records = records.len(), n_charge = self.n_charge, n_discharge = self.n_discharge))]
    pub fn select(&self, records: &[HourRecord]) -> Assignments {
        let mut assignments = Assignments::default();
        records
            .iter()
            .sorted_by_key(|record| self.buy_score(record))
            .take(self.n_charge)
            .for_each(|record| assignments.set(record.start, PlanAction::Charge));
        records
            .iter()
            .sorted_by_key(|record| Reverse(self.sell_score(record)))
            .take(self.n_discharge)
            .for_each(|record| assignments.set(record.start, PlanAction::Discharge));
        debug!(
            n_charging = assignments.count(PlanAction::Charge),
            n_discharging = assignments.count(PlanAction::Discharge),
            "selected",
        );
        assignments
    }
}
