use bon::Builder;

use crate::{
    core::{
        load_profile::synthetic_load,
        record::HourRecord,
        series::{AggregateHourly, Point},
    },
    prelude::*,
    quantity::{energy::KilowattHours, rate::KilowattHourRate},
};

/// Aligns the price, generation, and load series on hour-truncated timestamps.
///
/// The price series is canonical: an hour without a price is dropped, while missing
/// generation counts as zero and missing load falls back to the synthetic profile.
#[must_use]
#[derive(Builder)]
pub struct Merger<'a> {
    prices: &'a [Point<Option<KilowattHourRate>>],

    #[builder(default)]
    solar: &'a [Point<KilowattHours>],

    #[builder(default)]
    wind: &'a [Point<KilowattHours>],

    load: Option<&'a [Point<KilowattHours>]>,
}

impl Merger<'_> {
    #[instrument(skip_all, fields(n_prices = self.prices.len()))]
    pub fn merge(&self) -> Vec<HourRecord> {
        let prices = self
            .prices
            .iter()
            .filter_map(|(time, price)| price.map(|price| (*time, price)))
            .mean_hourly();
        let solar = self.solar.iter().copied().sum_hourly();
        let wind = self.wind.iter().copied().sum_hourly();
        let load = self.load.map(|load| load.iter().copied().sum_hourly()).unwrap_or_default();

        let records: Vec<_> = prices
            .into_iter()
            .map(|(start, price)| HourRecord {
                start,
                price,
                solar: solar.get(&start).copied().unwrap_or_default().max(KilowattHours::ZERO),
                wind: wind.get(&start).copied().unwrap_or_default().max(KilowattHours::ZERO),
                load: load
                    .get(&start)
                    .copied()
                    .unwrap_or_else(|| synthetic_load(start))
                    .max(KilowattHours::ZERO),
            })
            .collect();
        debug!(n_records = records.len(), has_load = self.load.is_some(), "merged");
        records
    }
}
