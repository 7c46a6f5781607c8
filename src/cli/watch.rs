use std::{sync::Arc, time::Duration};

use clap::Parser;
use tokio::{
    select,
    signal,
    time::{MissedTickBehavior, interval},
};

use crate::{
    cli::session::{Edits, Session, SessionArgs},
    pipeline::InFlight,
    prelude::*,
};

#[derive(Parser)]
pub struct WatchArgs {
    #[clap(flatten)]
    session: SessionArgs,

    /// How often to refresh the plan.
    #[clap(long = "refresh-interval", default_value = "15min", env = "REFRESH_INTERVAL")]
    refresh_interval: humantime::Duration,
}

impl WatchArgs {
    pub async fn run(self) -> Result {
        let session = Arc::new(self.session.try_into_session()?);
        let refresh_interval: Duration = self.refresh_interval.into();
        let in_flight = InFlight::default();

        let mut interval = interval(refresh_interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        info!(?refresh_interval, "watching…");

        loop {
            select! {
                _ = interval.tick() => {
                    let Some(guard) = in_flight.try_start() else {
                        warn!("the previous refresh is still running, skipping");
                        continue;
                    };
                    let session = Arc::clone(&session);
                    tokio::spawn(async move {
                        let _guard = guard;
                        if let Err(error) = session.run(&Edits::default()).await {
                            error!("failed to refresh the plan: {error:#}");
                        }
                    });
                }
                result = signal::ctrl_c() => {
                    result.context("failed to listen for Ctrl+C")?;
                    info!("interrupted");
                    break;
                }
            }
        }

        Ok(())
    }
}
