use serde::{Deserialize, Serialize};

use crate::{
    core::battery::ConfigurationError,
    quantity::{energy::KilowattHours, power::Kilowatts, time::Hours},
};

/// Connection limits, usually set by the main fuse.
#[must_use]
#[derive(Copy, Clone, Debug, Serialize, Deserialize, bon::Builder)]
pub struct GridLimits {
    #[builder(default = Kilowatts(11.0))]
    pub import_cap: Kilowatts,

    #[builder(default = Kilowatts(11.0))]
    pub export_cap: Kilowatts,
}

impl Default for GridLimits {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl GridLimits {
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        for (name, value) in [("import_cap", self.import_cap), ("export_cap", self.export_cap)] {
            if !value.is_finite() || value < Kilowatts::ZERO {
                return Err(ConfigurationError::InvalidPower { name, value });
            }
        }
        Ok(())
    }

    /// Split the hourly local balance into the capped grid import and export.
    ///
    /// Positive balance means a local surplus.
    pub fn exchange(&self, balance: KilowattHours) -> GridExchange {
        if balance > KilowattHours::ZERO {
            GridExchange {
                import: KilowattHours::ZERO,
                export: balance.min(self.export_cap * Hours::ONE),
            }
        } else {
            GridExchange {
                import: (-balance).min(self.import_cap * Hours::ONE),
                export: KilowattHours::ZERO,
            }
        }
    }
}

#[must_use]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct GridExchange {
    pub import: KilowattHours,
    pub export: KilowattHours,
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn surplus_is_exported_up_to_the_cap() {
        let limits = GridLimits::builder().export_cap(Kilowatts(5.0)).build();
        let exchange = limits.exchange(KilowattHours(7.0));
        assert_abs_diff_eq!(exchange.export.0, 5.0);
        assert_eq!(exchange.import, KilowattHours::ZERO);
    }

    #[test]
    fn deficit_is_imported() {
        let exchange = GridLimits::default().exchange(KilowattHours(-3.0));
        assert_abs_diff_eq!(exchange.import.0, 3.0);
        assert_eq!(exchange.export, KilowattHours::ZERO);
    }

    #[test]
    fn balanced_hour() {
        assert_eq!(GridLimits::default().exchange(KilowattHours::ZERO), GridExchange::default());
    }

    #[test]
    fn rejects_negative_cap() {
        let limits = GridLimits::builder().import_cap(Kilowatts(-1.0)).build();
        assert!(matches!(
            limits.validate(),
            Err(ConfigurationError::InvalidPower { name: "import_cap", .. }),
        ));
    }
}
