//! [SMHI](https://opendata.smhi.se/apidocs/metfcst/) point forecast.

use async_trait::async_trait;
use chrono::{DateTime, Local, Utc};
use reqwest::Client;
use serde::Deserialize;

use crate::{
    api::{ForecastSource, client, is_within_horizon},
    core::{
        generation::Weather,
        hour::truncate_to_hour,
        series::Series,
        sun::Location,
    },
    prelude::*,
    quantity::{irradiance::WattsPerSquareMetre, speed::MetresPerSecond},
};

/// Cloud cover assumed when the forecast does not have it.
const DEFAULT_CLOUD_COVER: f64 = 0.5;

/// Total cloud cover is reported in eighths of the sky.
const OCTAS: f64 = 8.0;

pub struct Api {
    client: Client,
    location: Location,
}

impl Api {
    pub fn try_new(location: Location) -> Result<Self> {
        Ok(Self { client: client::try_new()?, location })
    }

    fn url(&self) -> String {
        format!(
            "https://opendata-download-metfcst.smhi.se/api/category/pmp3g/version/2/geotype/point/lon/{:.4}/lat/{:.4}/data.json",
            self.location.longitude, self.location.latitude,
        )
    }
}

#[async_trait]
impl ForecastSource for Api {
    #[instrument(skip_all, fields(latitude = self.location.latitude, longitude = self.location.longitude))]
    async fn get_forecast(&self, since: DateTime<Local>) -> Result<Series<Weather>> {
        info!("fetching…");
        let forecast: Forecast = self
            .client
            .get(self.url())
            .send()
            .await
            .context("failed to request the forecast")?
            .error_for_status()
            .context("the forecast request failed")?
            .json()
            .await
            .context("failed to deserialize the forecast")?;
        info!(len = forecast.time_series.len(), "fetched");
        Ok(forecast.into_series(&self.location, since))
    }
}

#[derive(Deserialize)]
struct Forecast {
    #[serde(rename = "timeSeries")]
    time_series: Vec<TimeSeriesEntry>,
}

impl Forecast {
    fn into_series(self, location: &Location, since: DateTime<Local>) -> Series<Weather> {
        let mut series: Series<Weather> = self
            .time_series
            .into_iter()
            .map(|entry| {
                let time = entry.valid_time.with_timezone(&Local);
                (time, entry.to_weather(location))
            })
            .filter(|(time, _)| is_within_horizon(truncate_to_hour(*time), since))
            .collect();
        series.sort_by_key(|(time, _)| *time);
        series
    }
}

#[derive(Deserialize)]
struct TimeSeriesEntry {
    #[serde(rename = "validTime")]
    valid_time: DateTime<Utc>,

    parameters: Vec<Parameter>,
}

impl TimeSeriesEntry {
    fn parameter(&self, name: &str) -> Option<f64> {
        self.parameters
            .iter()
            .find(|parameter| parameter.name == name)
            .and_then(|parameter| parameter.values.first().copied())
    }

    /// Take the radiation when forecasted, otherwise estimate it from the cloud cover.
    fn to_weather(&self, location: &Location) -> Weather {
        let radiation = self.parameter("globalRadiation").map_or_else(
            || {
                let cloud_cover =
                    self.parameter("tcc_mean").map_or(DEFAULT_CLOUD_COVER, |octas| octas / OCTAS);
                location.estimate_irradiance(&self.valid_time, cloud_cover)
            },
            WattsPerSquareMetre,
        );
        let wind_speed = self.parameter("ws").map_or(MetresPerSecond::ZERO, MetresPerSecond);
        Weather { radiation: radiation.max(WattsPerSquareMetre::ZERO), wind_speed }
    }
}

#[derive(Deserialize)]
struct Parameter {
    name: String,
    values: Vec<f64>,
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use chrono::TimeZone;

    use super::*;

    // language=json
    const BODY: &str = r#"{
        "approvedTime": "2025-06-21T09:05:27Z",
        "referenceTime": "2025-06-21T09:00:00Z",
        "geometry": {"type": "Point", "coordinates": [[18.068581, 59.329483]]},
        "timeSeries": [
            {
                "validTime": "2025-06-21T11:00:00Z",
                "parameters": [
                    {"name": "ws", "levelType": "hl", "level": 10, "unit": "m/s", "values": [6.4]},
                    {"name": "tcc_mean", "levelType": "hl", "level": 0, "unit": "octas", "values": [8]}
                ]
            },
            {
                "validTime": "2025-06-21T10:00:00Z",
                "parameters": [
                    {"name": "globalRadiation", "levelType": "hl", "level": 0, "unit": "W/m2", "values": [640.0]},
                    {"name": "ws", "levelType": "hl", "level": 10, "unit": "m/s", "values": [5.1]}
                ]
            },
            {
                "validTime": "2025-06-25T10:00:00Z",
                "parameters": []
            }
        ]
    }"#;

    #[test]
    fn parse_forecast() -> Result {
        let since = Utc.with_ymd_and_hms(2025, 6, 21, 10, 0, 0).unwrap().with_timezone(&Local);
        let series = serde_json::from_str::<Forecast>(BODY)?.into_series(&Location::STOCKHOLM, since);

        assert_eq!(series.len(), 2, "points beyond the horizon are dropped");
        assert_eq!(series[0].0, since);

        let (_, weather) = series[0];
        assert_abs_diff_eq!(weather.radiation.0, 640.0);
        assert_abs_diff_eq!(weather.wind_speed.0, 5.1);

        // Full overcast, so the estimate is a fifth of the clear sky:
        let (time, weather) = series[1];
        let clear_sky = Location::STOCKHOLM.clear_sky_irradiance(&time);
        assert!(clear_sky > WattsPerSquareMetre(700.0));
        assert_abs_diff_eq!(weather.radiation.0, clear_sky.0 * 0.2, epsilon = 1e-9);
        assert_abs_diff_eq!(weather.wind_speed.0, 6.4);
        Ok(())
    }

    #[tokio::test]
    #[ignore = "makes the API request"]
    async fn get_forecast_ok() -> Result {
        let series = Api::try_new(Location::STOCKHOLM)?.get_forecast(Local::now()).await?;
        assert!(!series.is_empty());
        assert!(series.len() <= 48);
        Ok(())
    }
}
