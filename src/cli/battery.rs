//! Battery-related CLI arguments.

use clap::Parser;

use crate::{
    core::battery::BatteryConfig,
    quantity::{energy::KilowattHours, power::Kilowatts},
};

#[must_use]
#[derive(Copy, Clone, Parser)]
pub struct BatteryArgs {
    /// Usable battery capacity in kilowatt-hours.
    #[clap(long = "battery-capacity", default_value = "45", env = "BATTERY_CAPACITY")]
    pub capacity: KilowattHours,

    /// State of charge at the start of the plan, as a fraction of the capacity.
    #[clap(long = "initial-state-of-charge", default_value = "0.55", env = "INITIAL_STATE_OF_CHARGE")]
    pub initial_state_of_charge: f64,

    /// Minimum allowed state of charge.
    #[clap(long = "min-state-of-charge", default_value = "0.15", env = "MIN_STATE_OF_CHARGE")]
    pub min_state_of_charge: f64,

    /// Maximum allowed state of charge.
    #[clap(long = "max-state-of-charge", default_value = "0.95", env = "MAX_STATE_OF_CHARGE")]
    pub max_state_of_charge: f64,

    /// Charging power in kilowatts.
    #[clap(long = "charging-power", default_value = "10", env = "CHARGING_POWER")]
    pub charging_power: Kilowatts,

    /// Discharging power in kilowatts.
    #[clap(long = "discharging-power", default_value = "10", env = "DISCHARGING_POWER")]
    pub discharging_power: Kilowatts,

    /// Round-trip efficiency, split evenly between charging and discharging.
    #[clap(long = "round-trip-efficiency", default_value = "0.9", env = "ROUND_TRIP_EFFICIENCY")]
    pub round_trip_efficiency: f64,
}

impl From<BatteryArgs> for BatteryConfig {
    fn from(args: BatteryArgs) -> Self {
        Self::builder()
            .capacity(args.capacity)
            .initial_state_of_charge(args.initial_state_of_charge)
            .min_state_of_charge(args.min_state_of_charge)
            .max_state_of_charge(args.max_state_of_charge)
            .max_charge_power(args.charging_power)
            .max_discharge_power(args.discharging_power)
            .round_trip_efficiency(args.round_trip_efficiency)
            .build()
    }
}
