use serde::{Deserialize, Serialize};

use crate::{
    core::series::{Point, Series},
    quantity::{
        energy::KilowattHours,
        irradiance::WattsPerSquareMetre,
        power::Kilowatts,
        speed::MetresPerSecond,
        time::Hours,
    },
};

/// Forecasted conditions at the site.
#[must_use]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Weather {
    pub radiation: WattsPerSquareMetre,
    pub wind_speed: MetresPerSecond,
}

#[must_use]
#[derive(Copy, Clone, Debug, bon::Builder)]
pub struct SolarArray {
    /// Output at the standard irradiance.
    #[builder(default = Kilowatts(10.0))]
    pub peak_power: Kilowatts,

    /// Overall system derating: orientation, temperature, and inverter losses.
    #[builder(default = 0.2)]
    pub derating: f64,
}

impl SolarArray {
    pub fn power(&self, radiation: WattsPerSquareMetre) -> Kilowatts {
        (self.peak_power * (radiation / WattsPerSquareMetre::STANDARD) * self.derating)
            .max(Kilowatts::ZERO)
    }
}

/// Simplified turbine with a cubic ramp between the cut-in and rated speeds.
#[must_use]
#[derive(Copy, Clone, Debug, bon::Builder)]
pub struct WindTurbine {
    #[builder(default = Kilowatts(3.0))]
    pub rated_power: Kilowatts,

    #[builder(default = MetresPerSecond(3.0))]
    pub cut_in_speed: MetresPerSecond,

    #[builder(default = MetresPerSecond(12.0))]
    pub rated_speed: MetresPerSecond,

    #[builder(default = MetresPerSecond(25.0))]
    pub cut_out_speed: MetresPerSecond,

    #[builder(default = 1)]
    pub count: u32,
}

impl WindTurbine {
    /// Output of all the turbines together.
    pub fn power(&self, wind_speed: MetresPerSecond) -> Kilowatts {
        let single = if !wind_speed.is_finite()
            || wind_speed < self.cut_in_speed
            || wind_speed >= self.cut_out_speed
        {
            Kilowatts::ZERO
        } else if wind_speed >= self.rated_speed {
            self.rated_power
        } else {
            let ramp = (wind_speed.0.powi(3) - self.cut_in_speed.0.powi(3))
                / (self.rated_speed.0.powi(3) - self.cut_in_speed.0.powi(3));
            self.rated_power * ramp
        };
        single * f64::from(self.count)
    }
}

/// Converts a weather forecast into hourly energy series.
#[must_use]
#[derive(Copy, Clone, Debug, bon::Builder)]
pub struct Generation {
    pub solar: SolarArray,
    pub wind: WindTurbine,
}

impl Generation {
    /// Energy produced over one hour at the forecasted conditions.
    pub fn energy(&self, weather: &Weather) -> (KilowattHours, KilowattHours) {
        (
            self.solar.power(weather.radiation) * Hours::ONE,
            self.wind.power(weather.wind_speed) * Hours::ONE,
        )
    }

    /// Split the forecast into the solar and wind series.
    pub fn convert(&self, forecast: &[Point<Weather>]) -> (Series<KilowattHours>, Series<KilowattHours>) {
        forecast
            .iter()
            .map(|(time, weather)| {
                let (solar, wind) = self.energy(weather);
                ((*time, solar), (*time, wind))
            })
            .unzip()
    }
}
