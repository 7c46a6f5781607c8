use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::quantity::{energy::KilowattHours, power::Kilowatts};

#[derive(Debug, Error, PartialEq)]
pub enum ConfigurationError {
    #[error("capacity must be positive, got {0}")]
    NonPositiveCapacity(KilowattHours),

    #[error("`{name}` must be a fraction within [0, 1], got {value}")]
    FractionOutOfRange { name: &'static str, value: f64 },

    #[error("maximum state of charge {max} is below the minimum {min}")]
    InvertedBounds { min: f64, max: f64 },

    #[error("initial state of charge {initial} is outside [{min}, {max}]")]
    InitialOutOfBounds { initial: f64, min: f64, max: f64 },

    #[error("`{name}` must be a finite non-negative power, got {value}")]
    InvalidPower { name: &'static str, value: Kilowatts },

    #[error("round-trip efficiency must be within (0, 1], got {0}")]
    EfficiencyOutOfRange(f64),
}

/// Battery parameters.
///
/// States of charge are fractions of the capacity.
#[must_use]
#[derive(Copy, Clone, Debug, Serialize, Deserialize, bon::Builder)]
pub struct BatteryConfig {
    pub capacity: KilowattHours,
    pub initial_state_of_charge: f64,
    pub min_state_of_charge: f64,
    pub max_state_of_charge: f64,
    pub max_charge_power: Kilowatts,
    pub max_discharge_power: Kilowatts,
    pub round_trip_efficiency: f64,
}

impl BatteryConfig {
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if !self.capacity.is_finite() || self.capacity <= KilowattHours::ZERO {
            return Err(ConfigurationError::NonPositiveCapacity(self.capacity));
        }
        for (name, value) in [
            ("initial_state_of_charge", self.initial_state_of_charge),
            ("min_state_of_charge", self.min_state_of_charge),
            ("max_state_of_charge", self.max_state_of_charge),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigurationError::FractionOutOfRange { name, value });
            }
        }
        if self.max_state_of_charge < self.min_state_of_charge {
            return Err(ConfigurationError::InvertedBounds {
                min: self.min_state_of_charge,
                max: self.max_state_of_charge,
            });
        }
        if !(self.min_state_of_charge..=self.max_state_of_charge)
            .contains(&self.initial_state_of_charge)
        {
            return Err(ConfigurationError::InitialOutOfBounds {
                initial: self.initial_state_of_charge,
                min: self.min_state_of_charge,
                max: self.max_state_of_charge,
            });
        }
        for (name, value) in [
            ("max_charge_power", self.max_charge_power),
            ("max_discharge_power", self.max_discharge_power),
        ] {
            if !value.is_finite() || value < Kilowatts::ZERO {
                return Err(ConfigurationError::InvalidPower { name, value });
            }
        }
        if !(self.round_trip_efficiency > 0.0 && self.round_trip_efficiency <= 1.0) {
            return Err(ConfigurationError::EfficiencyOutOfRange(self.round_trip_efficiency));
        }
        Ok(())
    }

    pub fn min_residual_energy(&self) -> KilowattHours {
        self.capacity * self.min_state_of_charge
    }

    pub fn max_residual_energy(&self) -> KilowattHours {
        self.capacity * self.max_state_of_charge
    }

    pub fn initial_residual_energy(&self) -> KilowattHours {
        self.capacity * self.initial_state_of_charge
    }

    /// Efficiency of a single leg, charging or discharging.
    #[must_use]
    pub fn one_way_efficiency(&self) -> f64 {
        self.round_trip_efficiency.sqrt()
    }
}

impl Default for BatteryConfig {
    fn default() -> Self {
        Self {
            capacity: KilowattHours(45.0),
            initial_state_of_charge: 0.55,
            min_state_of_charge: 0.15,
            max_state_of_charge: 0.95,
            max_charge_power: Kilowatts(10.0),
            max_discharge_power: Kilowatts(10.0),
            round_trip_efficiency: 0.9,
        }
    }
}
