use comfy_table::{Attribute, Cell, CellAlignment, Color, Table, modifiers, presets};
use itertools::Itertools;

use crate::{
    core::{battery::BatteryConfig, record::HourRecord, simulator::SimulatedHour},
    quantity::{energy::KilowattHours, rate::KilowattHourRate},
};

/// Build the per-hour plan table.
///
/// The records and the simulated hours must come from the same plan.
pub fn build_plan_table(
    records: &[HourRecord],
    hours: &[SimulatedHour],
    battery: &BatteryConfig,
) -> Table {
    let mean_price = if records.is_empty() {
        KilowattHourRate::ZERO
    } else {
        #[expect(clippy::cast_precision_loss)]
        let n_records = records.len() as f64;
        records.iter().map(|record| record.price).sum::<KilowattHourRate>() / n_records
    };

    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_FULL_CONDENSED)
        .apply_modifier(modifiers::UTF8_ROUND_CORNERS)
        .enforce_styling();
    table.set_header(vec![
        "Date", "Start", "Price", "Solar", "Wind", "Load", "Action", "Energy", "Import", "Export",
        "After", "SoC",
    ]);
    for (record, hour) in records.iter().zip_eq(hours) {
        table.add_row(vec![
            Cell::new(record.start.format("%b %d")).add_attribute(Attribute::Dim),
            Cell::new(record.start.format("%H:%M")),
            Cell::new(record.price).set_alignment(CellAlignment::Right).fg(
                if record.price >= mean_price { Color::Red } else { Color::Green },
            ),
            Cell::new(record.solar).set_alignment(CellAlignment::Right).fg(
                if record.solar > KilowattHours::ZERO { Color::DarkYellow } else { Color::Reset },
            ),
            Cell::new(record.wind).set_alignment(CellAlignment::Right).fg(
                if record.wind > KilowattHours::ZERO { Color::Cyan } else { Color::Reset },
            ),
            Cell::new(record.load).set_alignment(CellAlignment::Right),
            Cell::new(hour.action).fg(hour.action.color()),
            Cell::new(hour.energy_delta).set_alignment(CellAlignment::Right),
            Cell::new(hour.import).set_alignment(CellAlignment::Right),
            Cell::new(hour.export).set_alignment(CellAlignment::Right),
            Cell::new(hour.state_of_charge_after).set_alignment(CellAlignment::Right),
            Cell::new(format!("{:.0}%", 100.0 * hour.state_of_charge_fraction(battery)))
                .set_alignment(CellAlignment::Right)
                .add_attribute(Attribute::Dim),
        ]);
    }
    table
}

#[cfg(test)]
mod tests {
    use chrono::Local;

    use super::*;
    use crate::core::{assignments::Assignments, grid::GridLimits, simulator::Simulator};

    #[test]
    fn renders_every_hour() -> crate::prelude::Result {
        let battery = BatteryConfig::default();
        let records = vec![
            HourRecord::builder().start(Local::now()).price(KilowattHourRate(0.5)).build(),
            HourRecord::builder().start(Local::now()).price(KilowattHourRate(1.5)).build(),
        ];
        let hours = Simulator::try_new(battery, GridLimits::default())?
            .simulate(&records, &Assignments::default());
        let table = build_plan_table(&records, &hours, &battery);
        assert_eq!(table.row_count(), 2);
        assert!(table.to_string().contains("55%"));
        Ok(())
    }
}
