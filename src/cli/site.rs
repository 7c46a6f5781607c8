use clap::Parser;

use crate::{
    api::elpriset::Zone,
    core::{
        generation::{Generation, SolarArray, WindTurbine},
        grid::GridLimits,
        sun::Location,
    },
    quantity::{power::Kilowatts, speed::MetresPerSecond},
};

#[must_use]
#[derive(Copy, Clone, Parser)]
pub struct SiteArgs {
    /// Bidding zone for the spot prices.
    #[clap(long, value_enum, default_value = "se3", env = "ZONE")]
    pub zone: Zone,

    #[clap(
        long,
        default_value_t = Location::STOCKHOLM.latitude,
        env = "LATITUDE",
        allow_negative_numbers = true
    )]
    pub latitude: f64,

    #[clap(
        long,
        default_value_t = Location::STOCKHOLM.longitude,
        env = "LONGITUDE",
        allow_negative_numbers = true
    )]
    pub longitude: f64,

    #[clap(flatten)]
    pub solar: SolarArgs,

    #[clap(flatten)]
    pub wind: WindArgs,

    #[clap(flatten)]
    pub grid: GridArgs,
}

impl SiteArgs {
    pub const fn location(&self) -> Location {
        Location { latitude: self.latitude, longitude: self.longitude }
    }

    pub fn grid(&self) -> GridLimits {
        GridLimits::builder()
            .import_cap(self.grid.import_cap)
            .export_cap(self.grid.export_cap)
            .build()
    }

    pub fn generation(&self) -> Generation {
        Generation::builder()
            .solar(
                SolarArray::builder()
                    .peak_power(self.solar.peak_power)
                    .derating(self.solar.derating)
                    .build(),
            )
            .wind(
                WindTurbine::builder()
                    .rated_power(self.wind.rated_power)
                    .cut_in_speed(self.wind.cut_in_speed)
                    .rated_speed(self.wind.rated_speed)
                    .cut_out_speed(self.wind.cut_out_speed)
                    .count(self.wind.count)
                    .build(),
            )
            .build()
    }
}

#[must_use]
#[derive(Copy, Clone, Parser)]
pub struct SolarArgs {
    /// Solar array peak power in kilowatts.
    #[clap(long = "pv-peak-power", default_value = "10", env = "PV_PEAK_POWER")]
    pub peak_power: Kilowatts,

    /// Solar array derating factor.
    #[clap(long = "pv-derating", default_value = "0.2", env = "PV_DERATING")]
    pub derating: f64,
}

#[must_use]
#[derive(Copy, Clone, Parser)]
pub struct WindArgs {
    /// Rated power of a single turbine in kilowatts, zero to disable.
    #[clap(long = "turbine-rated-power", default_value = "3", env = "TURBINE_RATED_POWER")]
    pub rated_power: Kilowatts,

    #[clap(long = "turbine-cut-in-speed", default_value = "3", env = "TURBINE_CUT_IN_SPEED")]
    pub cut_in_speed: MetresPerSecond,

    #[clap(long = "turbine-rated-speed", default_value = "12", env = "TURBINE_RATED_SPEED")]
    pub rated_speed: MetresPerSecond,

    #[clap(long = "turbine-cut-out-speed", default_value = "25", env = "TURBINE_CUT_OUT_SPEED")]
    pub cut_out_speed: MetresPerSecond,

    #[clap(long = "turbine-count", default_value = "1", env = "TURBINE_COUNT")]
    pub count: u32,
}

#[must_use]
#[derive(Copy, Clone, Parser)]
pub struct GridArgs {
    /// Maximum power drawn from the grid in kilowatts.
    #[clap(long = "import-cap", default_value = "11", env = "IMPORT_CAP")]
    pub import_cap: Kilowatts,

    /// Maximum power fed into the grid in kilowatts.
    #[clap(long = "export-cap", default_value = "11", env = "EXPORT_CAP")]
    pub export_cap: Kilowatts,
}
