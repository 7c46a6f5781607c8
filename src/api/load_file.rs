use std::path::PathBuf;

use async_trait::async_trait;
use chrono::{DateTime, Local};

use crate::{
    api::{LoadSource, is_within_horizon},
    core::{hour::truncate_to_hour, series::Series},
    prelude::*,
    quantity::energy::KilowattHours,
};

/// Measured or predicted household load, stored as a JSON array of `[timestamp, kWh]` pairs.
pub struct LoadFile {
    path: PathBuf,
}

impl LoadFile {
    pub const fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

#[async_trait]
impl LoadSource for LoadFile {
    #[instrument(skip_all, fields(path = %self.path.display()))]
    async fn get_load(&self, since: DateTime<Local>) -> Result<Series<KilowattHours>> {
        let contents = tokio::fs::read(&self.path)
            .await
            .with_context(|| format!("failed to read `{}`", self.path.display()))?;
        let mut series: Series<KilowattHours> =
            serde_json::from_slice(&contents).context("failed to parse the load series")?;
        series.retain(|(time, _)| is_within_horizon(truncate_to_hour(*time), since));
        debug!(len = series.len(), "loaded");
        Ok(series)
    }
}
