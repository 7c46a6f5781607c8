pub mod client;
pub mod elpriset;
pub mod load_file;
pub mod plan_sink;
pub mod smhi;

use async_trait::async_trait;
use chrono::{DateTime, Days, Local, NaiveDate, TimeDelta};

use crate::{
    core::{generation::Weather, hour::truncate_to_hour, series::Series},
    prelude::*,
    quantity::{energy::KilowattHours, rate::KilowattHourRate},
};

/// Planning horizon: today and tomorrow at most.
pub const HORIZON: TimeDelta = TimeDelta::hours(48);

/// Whether the point falls within the horizon starting at the hour of `since`.
#[must_use]
pub fn is_within_horizon(time: DateTime<Local>, since: DateTime<Local>) -> bool {
    let start = truncate_to_hour(since);
    (start..start + HORIZON).contains(&time)
}

#[async_trait]
pub trait PriceSource: Send + Sync {
    /// Get the prices from the current hour until the end of tomorrow.
    ///
    /// Only today's prices are required, tomorrow's may be missing or fail.
    #[instrument(skip_all, fields(since = %since))]
    async fn get_upcoming_prices(
        &self,
        since: DateTime<Local>,
    ) -> Result<Series<Option<KilowattHourRate>>> {
        let today = since.date_naive();
        let mut prices = self.get_prices(today).await?;
        if let Some(tomorrow) = today.checked_add_days(Days::new(1)) {
            match self.get_prices(tomorrow).await {
                Ok(tomorrow_prices) => prices.extend(tomorrow_prices),
                Err(error) => warn!(%tomorrow, "failed to fetch the prices, keeping today's: {error:#}"),
            }
        }
        prices.retain(|(time, _)| is_within_horizon(truncate_to_hour(*time), since));
        prices.sort_by_key(|(time, _)| *time);
        Ok(prices)
    }

    /// Get all the prices on the specified day, empty when not published yet.
    async fn get_prices(&self, on: NaiveDate) -> Result<Series<Option<KilowattHourRate>>>;
}

#[async_trait]
pub trait ForecastSource: Send + Sync {
    async fn get_forecast(&self, since: DateTime<Local>) -> Result<Series<Weather>>;
}

#[async_trait]
pub trait LoadSource: Send + Sync {
    async fn get_load(&self, since: DateTime<Local>) -> Result<Series<KilowattHours>>;
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use chrono::TimeZone;

    use super::*;

    fn since() -> DateTime<Local> {
        Local.with_ymd_and_hms(2025, 1, 10, 14, 20, 0).unwrap()
    }

    /// Hourly prices starting at `from`, newest first.
    fn descending_prices(from: DateTime<Local>, n_hours: i32) -> Series<Option<KilowattHourRate>> {
        (0..n_hours)
            .rev()
            .map(|i| (from + TimeDelta::hours(i.into()), Some(KilowattHourRate(f64::from(i)))))
            .collect()
    }

    /// Responses per day: `None` fails the request, a missing day is not published yet.
    struct DailyPrices(BTreeMap<NaiveDate, Option<Series<Option<KilowattHourRate>>>>);

    #[async_trait]
    impl PriceSource for DailyPrices {
        async fn get_prices(&self, on: NaiveDate) -> Result<Series<Option<KilowattHourRate>>> {
            match self.0.get(&on) {
                None => Ok(Vec::new()),
                Some(None) => bail!("HTTP 503 for {on}"),
                Some(Some(prices)) => Ok(prices.clone()),
            }
        }
    }

    fn today() -> NaiveDate {
        since().date_naive()
    }

    fn tomorrow() -> NaiveDate {
        today().succ_opt().unwrap()
    }

    fn midnight(on: NaiveDate) -> DateTime<Local> {
        Local.from_local_datetime(&on.and_hms_opt(0, 0, 0).unwrap()).unwrap()
    }

    #[test]
    fn horizon() {
        let since = since();
        let hour = truncate_to_hour(since);
        assert!(!is_within_horizon(hour - TimeDelta::minutes(1), since));
        assert!(is_within_horizon(hour, since));
        assert!(is_within_horizon(hour + TimeDelta::hours(47), since));
        assert!(!is_within_horizon(hour + TimeDelta::hours(48), since));
    }

    #[tokio::test]
    async fn upcoming_prices_are_sorted_and_limited() -> Result {
        // Today's response runs four days ahead:
        let source = DailyPrices(BTreeMap::from([
            (today(), Some(descending_prices(midnight(today()), 96))),
        ]));
        let prices = source.get_upcoming_prices(since()).await?;
        assert_eq!(prices.len(), 48);
        assert_eq!(prices[0].0, truncate_to_hour(since()));
        assert!(prices.is_sorted_by_key(|(time, _)| *time));
        assert_eq!(prices.last().unwrap().0, truncate_to_hour(since()) + TimeDelta::hours(47));
        Ok(())
    }

    #[tokio::test]
    async fn tomorrow_not_published() -> Result {
        let source =
            DailyPrices(BTreeMap::from([(today(), Some(descending_prices(midnight(today()), 24)))]));
        let prices = source.get_upcoming_prices(since()).await?;
        assert_eq!(prices.len(), 10);
        assert_eq!(prices[0].0, truncate_to_hour(since()));
        Ok(())
    }

    #[tokio::test]
    async fn both_days() -> Result {
        let source = DailyPrices(BTreeMap::from([
            (today(), Some(descending_prices(midnight(today()), 24))),
            (tomorrow(), Some(descending_prices(midnight(tomorrow()), 24))),
        ]));
        let prices = source.get_upcoming_prices(since()).await?;
        assert_eq!(prices.len(), 34);
        assert!(prices.is_sorted_by_key(|(time, _)| *time));
        Ok(())
    }

    #[tokio::test]
    async fn failing_tomorrow_keeps_today() -> Result {
        let source = DailyPrices(BTreeMap::from([
            (today(), Some(descending_prices(midnight(today()), 24))),
            (tomorrow(), None),
        ]));
        let prices = source.get_upcoming_prices(since()).await?;
        assert_eq!(prices.len(), 10);
        Ok(())
    }

    #[tokio::test]
    async fn failing_today_fails() {
        let source = DailyPrices(BTreeMap::from([
            (today(), None),
            (tomorrow(), Some(descending_prices(midnight(tomorrow()), 24))),
        ]));
        assert!(source.get_upcoming_prices(since()).await.is_err());
    }
}
