use chrono::{DateTime, Local};
use serde::Serialize;

use crate::{
    core::{
        action::PlanAction,
        assignments::Assignments,
        battery::{BatteryConfig, ConfigurationError},
        grid::GridLimits,
        record::HourRecord,
    },
    prelude::*,
    quantity::{energy::KilowattHours, rate::KilowattHourRate, time::Hours},
};

/// Outcome of a single planned hour.
#[must_use]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SimulatedHour {
    pub start: DateTime<Local>,
    pub price: KilowattHourRate,

    pub solar: KilowattHours,
    pub wind: KilowattHours,
    pub load: KilowattHours,

    /// Battery-side energy: positive when charging, negative when discharging.
    pub energy_delta: KilowattHours,

    /// Residual energy at the end of the hour.
    pub state_of_charge_after: KilowattHours,

    /// Drawn from the grid to cover the load and the charging.
    pub import: KilowattHours,

    /// Fed into the grid from the surplus and the discharging.
    pub export: KilowattHours,

    /// Action actually performed, which may differ from the assigned one
    /// when the battery is already full or empty.
    pub action: PlanAction,
}

impl SimulatedHour {
    #[must_use]
    pub fn state_of_charge_fraction(&self, battery: &BatteryConfig) -> f64 {
        self.state_of_charge_after / battery.capacity
    }
}

/// Walks the plan forward tracking the battery residual energy.
#[must_use]
#[derive(Copy, Clone, Debug)]
pub struct Simulator {
    battery: BatteryConfig,
    grid: GridLimits,
}

impl Simulator {
    pub fn try_new(battery: BatteryConfig, grid: GridLimits) -> Result<Self, ConfigurationError> {
        battery.validate()?;
        grid.validate()?;
        Ok(Self { battery, grid })
    }

    #[instrument(skip_all, fields(n_records = records.len(), n_assignments = assignments.len()))]
    pub fn simulate(&self, records: &[HourRecord], assignments: &Assignments) -> Vec<SimulatedHour> {
        let min_residual_energy = self.battery.min_residual_energy();
        let max_residual_energy = self.battery.max_residual_energy();
        let efficiency = self.battery.one_way_efficiency();

        let mut residual_energy = self.battery.initial_residual_energy();
        let mut hours = Vec::with_capacity(records.len());

        for record in records {
            let energy_delta = match assignments.get(record.start) {
                PlanAction::Charge => {
                    let headroom = (max_residual_energy - residual_energy).max(KilowattHours::ZERO);
                    let realized = headroom.min(self.battery.max_charge_power * Hours::ONE);
                    residual_energy += realized * efficiency;
                    realized
                }
                PlanAction::Discharge => {
                    let available = (residual_energy - min_residual_energy).max(KilowattHours::ZERO);
                    let realized = available.min(self.battery.max_discharge_power * Hours::ONE);
                    residual_energy -= realized / efficiency;
                    -realized
                }
                PlanAction::None => KilowattHours::ZERO,
            };

            let clamped = residual_energy.clamp(min_residual_energy, max_residual_energy);
            if clamped != residual_energy {
                debug!(start = %record.start, ?residual_energy, ?clamped, "clamped the residual energy");
                residual_energy = clamped;
            }

            let exchange = self.grid.exchange(record.generation() - record.load - energy_delta);

            hours.push(SimulatedHour {
                start: record.start,
                price: record.price,
                solar: record.solar,
                wind: record.wind,
                load: record.load,
                energy_delta,
                state_of_charge_after: residual_energy,
                import: exchange.import,
                export: exchange.export,
                action: if energy_delta > KilowattHours::ZERO {
                    PlanAction::Charge
                } else if energy_delta < KilowattHours::ZERO {
                    PlanAction::Discharge
                } else {
                    PlanAction::None
                },
            });
        }

        hours
    }
}
