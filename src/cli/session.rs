use std::{path::PathBuf, sync::Arc};

use chrono::{DateTime, Local};
use clap::Parser;
use reqwest::Url;

use crate::{
    api::{
        LoadSource,
        elpriset,
        load_file::LoadFile,
        plan_sink::{PlanSink, PlanUpload},
        smhi,
    },
    cache::{FileStore, Store, StoreExt},
    cli::{battery::BatteryArgs, selection::SelectionArgs, site::SiteArgs},
    core::{
        assignments::Assignments,
        battery::BatteryConfig,
        grid::GridLimits,
        hour::truncate_to_hour,
        planner::{Planner, Retention},
        selector::Selector,
    },
    pipeline::Pipeline,
    prelude::*,
    tables::build_plan_table,
};

const ASSIGNMENTS_KEY: &str = "assignments";

#[must_use]
#[derive(Parser)]
pub struct SessionArgs {
    #[clap(flatten)]
    pub site: SiteArgs,

    #[clap(flatten)]
    pub battery: BatteryArgs,

    #[clap(flatten)]
    pub selection: SelectionArgs,

    /// JSON file with the last fetched data and the manual assignments.
    #[clap(long = "store-path", default_value = "battery-plan.json", env = "STORE_PATH")]
    pub store_path: PathBuf,

    /// Optional JSON file with the household load as `[timestamp, kWh]` pairs.
    #[clap(long = "load-path", env = "LOAD_PATH")]
    pub load_path: Option<PathBuf>,

    /// Timeout of every source fetch.
    #[clap(long = "fetch-timeout", default_value = "10s", env = "FETCH_TIMEOUT")]
    pub fetch_timeout: humantime::Duration,

    /// Post every computed plan to this URL.
    #[clap(long = "plan-url", env = "PLAN_URL")]
    pub plan_url: Option<Url>,
}

impl SessionArgs {
    pub fn try_into_session(self) -> Result<Session> {
        let battery = BatteryConfig::from(self.battery);
        battery.validate().context("invalid battery configuration")?;
        let grid = self.site.grid();
        grid.validate().context("invalid grid limits")?;

        let store: Arc<dyn Store> = Arc::new(FileStore::open(&self.store_path));
        let load = self.load_path.map(|path| Box::new(LoadFile::new(path)) as Box<dyn LoadSource>);
        let pipeline = Pipeline::builder()
            .prices(Box::new(elpriset::Api::try_new(self.site.zone)?))
            .forecast(Box::new(smhi::Api::try_new(self.site.location())?))
            .maybe_load(load)
            .store(Arc::clone(&store))
            .generation(self.site.generation())
            .location(self.site.location())
            .timeout(self.fetch_timeout.into())
            .build();

        Ok(Session {
            pipeline,
            store,
            battery,
            grid,
            zone: self.site.zone,
            selector: self.selection.selector(),
            plan_sink: PlanSink::try_new(self.plan_url)?,
        })
    }
}

/// Manual changes to apply on top of the stored assignments.
#[derive(Default)]
pub struct Edits {
    /// Start over with an idle plan.
    pub clear: bool,

    /// Hours to advance to their next action.
    pub cycle: Vec<DateTime<Local>>,
}

pub struct Session {
    pipeline: Pipeline,
    store: Arc<dyn Store>,
    battery: BatteryConfig,
    grid: GridLimits,
    zone: elpriset::Zone,
    selector: Option<Selector>,
    plan_sink: PlanSink,
}

impl Session {
    /// Refresh the data, apply the edits, and print and upload the resulting plan.
    #[instrument(skip_all)]
    pub async fn run(&self, edits: &Edits) -> Result {
        let refresh = self.pipeline.refresh(Local::now()).await;

        let assignments = self.store.get_as::<Assignments>(ASSIGNMENTS_KEY).unwrap_or_default();
        let mut planner = Planner::new(Vec::new(), assignments);
        let retention = if edits.clear { Retention::Discard } else { Retention::Preserve };
        planner.refresh(refresh.records, retention);

        for time in &edits.cycle {
            let hour = truncate_to_hour(*time);
            if planner.records().iter().any(|record| record.start == hour) {
                planner.cycle_action(hour);
            } else {
                warn!(%hour, "no data for the hour, skipping");
            }
        }
        if let Some(selector) = &self.selector {
            if !edits.cycle.is_empty() {
                warn!("the automatic selection replaces the cycled hours");
            }
            planner.auto_select(selector);
        }
        self.store.set_as(ASSIGNMENTS_KEY, planner.assignments());

        let plan = planner.simulate(self.battery, self.grid)?;
        for notice in refresh.sources.notices() {
            warn!("{notice}");
        }
        println!("{}", build_plan_table(planner.records(), &plan.hours, &self.battery));
        println!("{}", plan.summary);

        self.plan_sink
            .send(&PlanUpload::new(self.zone, &self.battery, &refresh.sources, &plan))
            .await;
        Ok(())
    }
}
