//! Live → cached → synthetic fallback chain shared by all the sources.

use std::{
    fmt::{Display, Formatter},
    time::Duration,
};

use serde::{Serialize, de::DeserializeOwned};
use thiserror::Error;

use crate::{
    cache::{Store, StoreExt},
    prelude::*,
};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Freshness {
    /// Just fetched from the source.
    Live,

    /// Last successful fetch.
    Cached,

    /// Estimated without any source data.
    Synthetic,
}

impl Freshness {
    /// Notice to show next to the data, if it is degraded.
    #[must_use]
    pub const fn notice(self) -> Option<&'static str> {
        match self {
            Self::Live => None,
            Self::Cached => Some("showing cached data"),
            Self::Synthetic => Some("showing estimated data"),
        }
    }
}

impl Display for Freshness {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Live => write!(f, "live"),
            Self::Cached => write!(f, "cached"),
            Self::Synthetic => write!(f, "estimated"),
        }
    }
}

#[must_use]
#[derive(Clone, Debug)]
pub struct Fetched<T> {
    pub value: T,
    pub freshness: Freshness,
}

#[derive(Debug, Error)]
pub enum FetchFailure {
    #[error("timed out after {0:?}")]
    Timeout(Duration),

    #[error("{0:#}")]
    Source(Error),

    #[error("the source returned no data")]
    Empty,
}

/// Fetch the series from the primary source, falling back to the stored copy and then to the
/// synthetic estimate.
///
/// Failures never propagate. A successful fetch replaces the stored copy.
#[instrument(skip_all, fields(key = key))]
pub async fn fetch_with_fallback<T>(
    primary: impl Future<Output = Result<Vec<T>>>,
    store: &dyn Store,
    key: &str,
    timeout: Duration,
    synthetic: impl FnOnce() -> Vec<T>,
) -> Fetched<Vec<T>>
where
    T: Serialize + DeserializeOwned,
{
    match try_fetch(primary, timeout).await {
        Ok(value) => {
            info!(len = value.len(), "fetched");
            store.set_as(key, &value);
            Fetched { value, freshness: Freshness::Live }
        }
        Err(failure) => {
            warn!("failed to fetch: {failure}");
            if let Some(value) = store.get_as::<Vec<T>>(key)
                && !value.is_empty()
            {
                warn!(len = value.len(), "using the cached data");
                Fetched { value, freshness: Freshness::Cached }
            } else {
                warn!("nothing cached, using the estimates");
                Fetched { value: synthetic(), freshness: Freshness::Synthetic }
            }
        }
    }
}

async fn try_fetch<T>(
    primary: impl Future<Output = Result<Vec<T>>>,
    timeout: Duration,
) -> Result<Vec<T>, FetchFailure> {
    let value = tokio::time::timeout(timeout, primary)
        .await
        .map_err(|_| FetchFailure::Timeout(timeout))?
        .map_err(FetchFailure::Source)?;
    if value.is_empty() { Err(FetchFailure::Empty) } else { Ok(value) }
}
