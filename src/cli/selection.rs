use clap::Parser;

use crate::core::selector::Selector;

#[must_use]
#[derive(Copy, Clone, Parser)]
pub struct SelectionArgs {
    /// Pick the charging and discharging hours automatically, replacing the manual choice.
    #[clap(long, env = "AUTO")]
    pub auto: bool,

    /// Number of hours to charge in.
    #[clap(long = "charge-hours", default_value = "3", env = "CHARGE_HOURS")]
    pub n_charge: usize,

    /// Number of hours to discharge in.
    #[clap(long = "discharge-hours", default_value = "3", env = "DISCHARGE_HOURS")]
    pub n_discharge: usize,

    /// Price bias per kilowatt-hour of local energy deficit or surplus.
    #[clap(long, default_value = "0.25", env = "WEIGHT")]
    pub weight: f64,
}

impl SelectionArgs {
    pub fn selector(&self) -> Option<Selector> {
        self.auto.then(|| {
            Selector::builder()
                .n_charge(self.n_charge)
                .n_discharge(self.n_discharge)
                .weight(self.weight)
                .build()
        })
    }
}
