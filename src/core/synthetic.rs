//! Offline stand-ins for the live sources.

use chrono::{DateTime, Local, TimeDelta};

use crate::{
    core::{
        generation::Weather,
        hour::truncate_to_hour,
        series::Series,
        sun::Location,
    },
    quantity::{rate::KilowattHourRate, speed::MetresPerSecond},
};

const N_PRICE_HOURS: i32 = 24;
const N_FORECAST_HOURS: i32 = 48;
const MIN_PRICE: f64 = 0.05;
const CLOUD_COVER: f64 = 0.3;

/// Smooth daily price curve starting at the current hour.
#[must_use]
pub fn synthetic_prices(since: DateTime<Local>) -> Series<Option<KilowattHourRate>> {
    let start = truncate_to_hour(since);
    (0..N_PRICE_HOURS)
        .map(|i| {
            let price = 0.25f64.mul_add(((f64::from(i) + 2.0) / 3.0).sin(), 0.4).max(MIN_PRICE);
            (start + TimeDelta::hours(i.into()), Some(KilowattHourRate(price)))
        })
        .collect()
}

/// Clear-sky forecast under a constant partial cloud cover and calm wind.
#[must_use]
pub fn synthetic_forecast(since: DateTime<Local>, location: &Location) -> Series<Weather> {
    let start = truncate_to_hour(since);
    (0..N_FORECAST_HOURS)
        .map(|i| {
            let time = start + TimeDelta::hours(i.into());
            let weather = Weather {
                radiation: location.estimate_irradiance(&time, CLOUD_COVER),
                wind_speed: MetresPerSecond::ZERO,
            };
            (time, weather)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::quantity::irradiance::WattsPerSquareMetre;

    #[test]
    fn prices_are_hourly_and_bounded() {
        let since = Local.with_ymd_and_hms(2025, 9, 1, 13, 25, 0).unwrap();
        let prices = synthetic_prices(since);
        assert_eq!(prices.len(), 24);
        assert_eq!(prices[0].0, truncate_to_hour(since));
        assert!(prices.iter().is_sorted_by_key(|(time, _)| *time));
        for (_, price) in prices {
            let price = price.unwrap();
            assert!(price >= KilowattHourRate(MIN_PRICE));
            assert!(price <= KilowattHourRate(0.65));
        }
    }

    #[test]
    fn forecast_has_sunlight_in_summer() {
        let since = Local.with_ymd_and_hms(2025, 6, 20, 0, 0, 0).unwrap();
        let forecast = synthetic_forecast(since, &Location::STOCKHOLM);
        assert_eq!(forecast.len(), 48);
        assert!(forecast.iter().any(|(_, weather)| weather.radiation > WattsPerSquareMetre(300.0)));
        assert!(forecast.iter().all(|(_, weather)| weather.wind_speed == MetresPerSecond::ZERO));
    }
}
