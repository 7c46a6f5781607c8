use chrono::{DateTime, Local};
use reqwest::{Client, Url};
use serde::Serialize;

use crate::{
    api::{client, elpriset::Zone},
    core::{
        action::PlanAction,
        battery::BatteryConfig,
        planner::Plan,
        summary::Summary,
    },
    pipeline::Sources,
    prelude::*,
    quantity::{energy::KilowattHours, rate::KilowattHourRate},
};

/// Optional receiver of every computed plan.
pub struct PlanSink {
    client: Client,
    url: Option<Url>,
}

impl PlanSink {
    pub fn try_new(url: Option<Url>) -> Result<Self> {
        Ok(Self { client: client::try_new()?, url })
    }

    /// Post the plan, logging any failure.
    pub async fn send(&self, upload: &PlanUpload<'_>) {
        if let Some(url) = &self.url
            && let Err(error) = self.send_fallible(url.clone(), upload).await
        {
            warn!("failed to upload the plan: {error:#}");
        }
    }

    #[instrument(skip_all, fields(url = %url))]
    async fn send_fallible(&self, url: Url, upload: &PlanUpload<'_>) -> Result {
        info!(n_hours = upload.hours.len(), "uploading the plan…");
        self.client
            .post(url)
            .json(upload)
            .send()
            .await
            .context("failed to send the plan")?
            .error_for_status()
            .context("the plan upload failed")?;
        Ok(())
    }
}

#[must_use]
#[derive(Serialize)]
pub struct PlanUpload<'a> {
    #[serde(serialize_with = "serialize_zone")]
    pub zone: Zone,

    pub battery: &'a BatteryConfig,
    pub sources: &'a Sources,

    /// Only the hours in which the battery is not idle.
    pub hours: Vec<UploadedHour>,

    pub summary: &'a Summary,
}

impl<'a> PlanUpload<'a> {
    pub fn new(zone: Zone, battery: &'a BatteryConfig, sources: &'a Sources, plan: &'a Plan) -> Self {
        let hours = plan
            .hours
            .iter()
            .filter(|hour| hour.action != PlanAction::None)
            .map(|hour| UploadedHour {
                start: hour.start,
                action: hour.action,
                energy: hour.energy_delta.abs(),
                price: hour.price,
                state_of_charge_after_percent: 100.0 * hour.state_of_charge_fraction(battery),
                import: hour.import,
                export: hour.export,
            })
            .collect();
        Self { zone, battery, sources, hours, summary: &plan.summary }
    }
}

#[derive(Serialize)]
pub struct UploadedHour {
    pub start: DateTime<Local>,
    pub action: PlanAction,
    pub energy: KilowattHours,
    pub price: KilowattHourRate,
    pub state_of_charge_after_percent: f64,
    pub import: KilowattHours,
    pub export: KilowattHours,
}

fn serialize_zone<S: serde::Serializer>(zone: &Zone, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(zone)
}
