use std::{
    collections::BTreeMap,
    iter::Sum,
    ops::{Add, Div},
};

use chrono::{DateTime, Local};
use itertools::Itertools;

use crate::core::{hour::truncate_to_hour, series::Point};

impl<T> AggregateHourly for T where T: ?Sized {}

/// Collapse a series onto hour-truncated timestamps.
pub trait AggregateHourly {
    /// Sum the values within each hour, suitable for energies.
    #[must_use]
    fn sum_hourly<V>(self) -> BTreeMap<DateTime<Local>, V>
    where
        Self: Sized + IntoIterator<Item = Point<V>>,
        V: Copy + Add<Output = V>,
    {
        let mut sums = BTreeMap::new();
        for (time, value) in self {
            sums.entry(truncate_to_hour(time))
                .and_modify(|sum: &mut V| *sum = *sum + value)
                .or_insert(value);
        }
        sums
    }

    /// Average the values within each hour, suitable for prices.
    #[must_use]
    fn mean_hourly<V>(self) -> BTreeMap<DateTime<Local>, V>
    where
        Self: Sized + IntoIterator<Item = Point<V>>,
        V: Copy + Sum + Div<f64, Output = V>,
    {
        self.into_iter()
            .into_group_map_by(|(time, _)| truncate_to_hour(*time))
            .into_iter()
            .map(|(hour, points)| {
                #[expect(clippy::cast_precision_loss)]
                let n_points = points.len() as f64;
                (hour, points.into_iter().map(|(_, value)| value).sum::<V>() / n_points)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use chrono::{Local, TimeDelta, TimeZone};

    use super::*;
    use crate::quantity::{energy::KilowattHours, rate::KilowattHourRate};

    #[test]
    fn mean_of_quarter_hours() {
        let start = Local.with_ymd_and_hms(2025, 3, 10, 12, 0, 0).unwrap();
        let series = vec![
            (start, KilowattHourRate(1.0)),
            (start + TimeDelta::minutes(15), KilowattHourRate(2.0)),
            (start + TimeDelta::minutes(30), KilowattHourRate(3.0)),
            (start + TimeDelta::minutes(45), KilowattHourRate(4.0)),
            (start + TimeDelta::hours(1), KilowattHourRate(5.0)),
        ];
        let hourly = series.mean_hourly();
        assert_eq!(hourly.len(), 2);
        assert_abs_diff_eq!(hourly[&start].0, 2.5);
        assert_abs_diff_eq!(hourly[&(start + TimeDelta::hours(1))].0, 5.0);
    }

    #[test]
    fn sum_of_energies() {
        let start = Local.with_ymd_and_hms(2025, 3, 10, 12, 0, 0).unwrap();
        let series = vec![
            (start + TimeDelta::minutes(10), KilowattHours(0.25)),
            (start + TimeDelta::minutes(40), KilowattHours(0.5)),
        ];
        let hourly = series.sum_hourly();
        assert_eq!(hourly.len(), 1);
        assert_abs_diff_eq!(hourly[&start].0, 0.75);
    }

    #[test]
    fn empty() {
        assert!(Vec::<Point<KilowattHours>>::new().mean_hourly().is_empty());
    }
}
