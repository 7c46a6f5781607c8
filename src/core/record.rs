use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::quantity::{energy::KilowattHours, rate::KilowattHourRate};

/// Everything known about a single planning hour.
#[must_use]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize, bon::Builder)]
pub struct HourRecord {
    /// Hour-aligned start of the hour.
    pub start: DateTime<Local>,

    pub price: KilowattHourRate,

    /// Solar energy produced during the hour.
    #[builder(default)]
    pub solar: KilowattHours,

    /// Wind energy produced during the hour.
    #[builder(default)]
    pub wind: KilowattHours,

    /// Household consumption during the hour.
    #[builder(default)]
    pub load: KilowattHours,
}

impl HourRecord {
    pub fn generation(&self) -> KilowattHours {
        self.solar + self.wind
    }

    /// Consumption which local generation cannot cover.
    pub fn deficit(&self) -> KilowattHours {
        (self.load - self.generation()).max(KilowattHours::ZERO)
    }

    /// Generation in excess of consumption.
    pub fn surplus(&self) -> KilowattHours {
        (self.generation() - self.load).max(KilowattHours::ZERO)
    }
}
