mod in_flight;

use std::{sync::Arc, time::Duration};

use bon::Builder;
use chrono::{DateTime, Local};
use serde::Serialize;

pub use self::in_flight::InFlight;
use crate::{
    api::{ForecastSource, LoadSource, PriceSource},
    cache::Store,
    core::{
        generation::Generation,
        hour::truncate_to_hour,
        merger::Merger,
        record::HourRecord,
        series::Series,
        sun::Location,
        synthetic::{synthetic_forecast, synthetic_prices},
    },
    fetch::{Fetched, Freshness, fetch_with_fallback},
    prelude::*,
    quantity::energy::KilowattHours,
};

const PRICES_KEY: &str = "prices";
const FORECAST_KEY: &str = "forecast";
const LOAD_KEY: &str = "load";

/// Where the data of a refresh came from.
#[must_use]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Sources {
    pub prices: Freshness,
    pub forecast: Freshness,

    /// `None` when no load source is configured.
    pub load: Option<Freshness>,
}

impl Sources {
    /// Human-readable notices for the degraded sources.
    pub fn notices(&self) -> impl Iterator<Item = String> {
        [("prices", Some(self.prices)), ("forecast", Some(self.forecast)), ("load", self.load)]
            .into_iter()
            .filter_map(|(name, freshness)| {
                freshness.and_then(Freshness::notice).map(|notice| format!("{name}: {notice}"))
            })
    }
}

#[must_use]
pub struct Refresh {
    pub records: Vec<HourRecord>,
    pub sources: Sources,
}

/// Fetches all the sources concurrently and merges them into hour records.
#[derive(Builder)]
pub struct Pipeline {
    prices: Box<dyn PriceSource>,
    forecast: Box<dyn ForecastSource>,
    load: Option<Box<dyn LoadSource>>,
    store: Arc<dyn Store>,
    generation: Generation,
    location: Location,

    /// Per-source fetch timeout.
    #[builder(default = Duration::from_secs(10))]
    timeout: Duration,
}

impl Pipeline {
    #[instrument(skip_all, fields(now = %now))]
    pub async fn refresh(&self, now: DateTime<Local>) -> Refresh {
        let (prices, forecast, load) = tokio::join!(
            fetch_with_fallback(
                self.prices.get_upcoming_prices(now),
                &*self.store,
                PRICES_KEY,
                self.timeout,
                || synthetic_prices(now),
            ),
            fetch_with_fallback(
                self.forecast.get_forecast(now),
                &*self.store,
                FORECAST_KEY,
                self.timeout,
                || synthetic_forecast(now, &self.location),
            ),
            self.fetch_load(now),
        );

        let (solar, wind) = self.generation.convert(&forecast.value);
        let mut records = Merger::builder()
            .prices(&prices.value)
            .solar(&solar)
            .wind(&wind)
            .maybe_load(load.as_ref().map(|load| load.value.as_slice()))
            .build()
            .merge();

        // Cached series may be stale:
        let current_hour = truncate_to_hour(now);
        records.retain(|record| record.start >= current_hour);

        let sources = Sources {
            prices: prices.freshness,
            forecast: forecast.freshness,
            load: load.map(|load| load.freshness),
        };
        if records.is_empty() {
            warn!("no upcoming prices, the plan is empty");
        } else {
            info!(n_records = records.len(), prices = %sources.prices, forecast = %sources.forecast, "refreshed");
        }
        Refresh { records, sources }
    }

    async fn fetch_load(&self, now: DateTime<Local>) -> Option<Fetched<Series<KilowattHours>>> {
        let source = self.load.as_ref()?;
        Some(
            fetch_with_fallback(
                source.get_load(now),
                &*self.store,
                LOAD_KEY,
                self.timeout,
                Vec::new,
            )
            .await,
        )
    }
}
