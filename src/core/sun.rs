//! Rough solar geometry, good enough to estimate hourly irradiance when a forecast lacks it.

use std::f64::consts::TAU;

use chrono::{DateTime, Datelike, TimeZone, Timelike, Utc};
use serde::{Deserialize, Serialize};

use crate::quantity::irradiance::WattsPerSquareMetre;

/// Share of the clear-sky irradiance that still reaches the ground under a full overcast.
const OVERCAST_TRANSMITTANCE: f64 = 0.2;

#[must_use]
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Location {
    /// Degrees north.
    pub latitude: f64,

    /// Degrees east.
    pub longitude: f64,
}

impl Location {
    pub const STOCKHOLM: Self = Self { latitude: 59.3293, longitude: 18.0686 };

    /// Solar elevation above the horizon in radians, negative at night.
    #[must_use]
    pub fn solar_elevation<Tz: TimeZone>(&self, time: &DateTime<Tz>) -> f64 {
        let time = time.with_timezone(&Utc);
        let declination =
            -23.44_f64.to_radians() * (TAU * (f64::from(time.ordinal()) + 10.0) / 365.0).cos();
        let solar_time =
            f64::from(time.hour()) + f64::from(time.minute()) / 60.0 + self.longitude / 15.0;
        let hour_angle = (15.0 * (solar_time - 12.0)).to_radians();
        let latitude = self.latitude.to_radians();
        let sine = latitude.sin().mul_add(
            declination.sin(),
            latitude.cos() * declination.cos() * hour_angle.cos(),
        );
        sine.clamp(-1.0, 1.0).asin()
    }

    pub fn clear_sky_irradiance<Tz: TimeZone>(&self, time: &DateTime<Tz>) -> WattsPerSquareMetre {
        WattsPerSquareMetre::STANDARD * self.solar_elevation(time).sin().max(0.0)
    }

    /// Estimate the global irradiance from the cloud cover fraction.
    pub fn estimate_irradiance<Tz: TimeZone>(
        &self,
        time: &DateTime<Tz>,
        cloud_cover: f64,
    ) -> WattsPerSquareMetre {
        let clear_sky = self.clear_sky_irradiance(time);
        let cloud_cover = cloud_cover.clamp(0.0, 1.0);
        clear_sky * (1.0 - OVERCAST_TRANSMITTANCE).mul_add(1.0 - cloud_cover, OVERCAST_TRANSMITTANCE)
    }
}
