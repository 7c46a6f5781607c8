//! [Elpriset just nu](https://www.elprisetjustnu.se/elpris-api) spot prices.

use std::fmt::{Display, Formatter};

use async_trait::async_trait;
use chrono::{DateTime, Datelike, FixedOffset, Local, NaiveDate};
use reqwest::{Client, StatusCode};
use serde::Deserialize;

use crate::{
    api::{PriceSource, client},
    core::series::{Point, Series},
    prelude::*,
    quantity::rate::KilowattHourRate,
};

/// Swedish bidding zone.
#[derive(Copy, Clone, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum Zone {
    /// Luleå.
    Se1,

    /// Sundsvall.
    Se2,

    /// Stockholm.
    Se3,

    /// Malmö.
    Se4,
}

impl Display for Zone {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Se1 => write!(f, "SE1"),
            Self::Se2 => write!(f, "SE2"),
            Self::Se3 => write!(f, "SE3"),
            Self::Se4 => write!(f, "SE4"),
        }
    }
}

pub struct Api {
    client: Client,
    zone: Zone,
}

impl Api {
    pub fn try_new(zone: Zone) -> Result<Self> {
        Ok(Self { client: client::try_new()?, zone })
    }

    fn url(&self, on: NaiveDate) -> String {
        format!(
            "https://www.elprisetjustnu.se/api/v1/prices/{:04}/{:02}-{:02}_{}.json",
            on.year(),
            on.month(),
            on.day(),
            self.zone,
        )
    }
}

#[async_trait]
impl PriceSource for Api {
    #[instrument(skip_all, fields(on = %on, zone = %self.zone))]
    async fn get_prices(&self, on: NaiveDate) -> Result<Series<Option<KilowattHourRate>>> {
        info!("fetching…");
        let response = self
            .client
            .get(self.url(on))
            .send()
            .await
            .context("failed to request the prices")?;
        if response.status() == StatusCode::NOT_FOUND {
            info!("not published yet");
            return Ok(Vec::new());
        }
        let prices: Vec<SpotPrice> = response
            .error_for_status()
            .context("the price request failed")?
            .json()
            .await
            .context("failed to deserialize the prices")?;
        info!(len = prices.len(), "fetched");
        Ok(prices.into_iter().map(Point::from).collect())
    }
}

#[derive(Deserialize)]
struct SpotPrice {
    #[serde(rename = "SEK_per_kWh")]
    sek_per_kwh: Option<KilowattHourRate>,

    time_start: DateTime<FixedOffset>,
}

impl From<SpotPrice> for Point<Option<KilowattHourRate>> {
    fn from(price: SpotPrice) -> Self {
        (price.time_start.with_timezone(&Local), price.sek_per_kwh)
    }
}
