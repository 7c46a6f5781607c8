use std::fmt::{Display, Formatter};

use comfy_table::{Cell, CellAlignment, Color, Table, modifiers, presets};
use serde::Serialize;

use crate::{
    core::simulator::SimulatedHour,
    quantity::{cost::Cost, energy::KilowattHours, power::Kilowatts, time::Hours},
};

/// Totals over a simulated plan.
#[must_use]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub energy_charged: KilowattHours,
    pub energy_discharged: KilowattHours,

    /// Paid for the charged energy.
    pub cost: Cost,

    /// Received for the discharged energy.
    pub revenue: Cost,

    /// Revenue minus cost.
    pub net_profit: Cost,

    pub peak_charge_power: Kilowatts,
    pub peak_discharge_power: Kilowatts,

    pub solar: KilowattHours,
    pub wind: KilowattHours,
    pub load: KilowattHours,
    pub import: KilowattHours,
    pub export: KilowattHours,

    /// Residual energy at the end of the plan, `None` for an empty plan.
    pub final_state_of_charge: Option<KilowattHours>,
}

impl<'a> FromIterator<&'a SimulatedHour> for Summary {
    fn from_iter<T: IntoIterator<Item = &'a SimulatedHour>>(hours: T) -> Self {
        let mut summary = Self::default();
        for hour in hours {
            if hour.energy_delta > KilowattHours::ZERO {
                let charged = hour.energy_delta;
                summary.energy_charged += charged;
                summary.cost += charged * hour.price;
                summary.peak_charge_power = summary.peak_charge_power.max(charged / Hours::ONE);
            } else if hour.energy_delta < KilowattHours::ZERO {
                let discharged = -hour.energy_delta;
                summary.energy_discharged += discharged;
                summary.revenue += discharged * hour.price;
                summary.peak_discharge_power =
                    summary.peak_discharge_power.max(discharged / Hours::ONE);
            }
            summary.solar += hour.solar;
            summary.wind += hour.wind;
            summary.load += hour.load;
            summary.import += hour.import;
            summary.export += hour.export;
            summary.final_state_of_charge = Some(hour.state_of_charge_after);
        }
        summary.net_profit = summary.revenue - summary.cost;
        summary
    }
}

impl Display for Summary {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut table = Table::new();
        table
            .load_preset(presets::UTF8_FULL_CONDENSED)
            .apply_modifier(modifiers::UTF8_ROUND_CORNERS)
            .enforce_styling();
        table.set_header(vec!["", "Energy", "Peak power", "Money"]);
        table.add_row(vec![
            Cell::new("Charge"),
            Cell::new(self.energy_charged).set_alignment(CellAlignment::Right),
            Cell::new(self.peak_charge_power).set_alignment(CellAlignment::Right),
            Cell::new(-self.cost).set_alignment(CellAlignment::Right).fg(Color::Red),
        ]);
        table.add_row(vec![
            Cell::new("Discharge"),
            Cell::new(self.energy_discharged).set_alignment(CellAlignment::Right),
            Cell::new(self.peak_discharge_power).set_alignment(CellAlignment::Right),
            Cell::new(self.revenue).set_alignment(CellAlignment::Right).fg(Color::Green),
        ]);
        for (name, energy, color) in [
            ("Solar", self.solar, Color::DarkYellow),
            ("Wind", self.wind, Color::Cyan),
            ("Load", self.load, Color::Reset),
            ("Import", self.import, Color::Reset),
            ("Export", self.export, Color::Reset),
        ] {
            table.add_row(vec![
                Cell::new(name),
                Cell::new(energy).set_alignment(CellAlignment::Right).fg(color),
                Cell::new(""),
                Cell::new(""),
            ]);
        }
        if let Some(final_state_of_charge) = self.final_state_of_charge {
            table.add_row(vec![
                Cell::new("Final residual"),
                Cell::new(final_state_of_charge).set_alignment(CellAlignment::Right),
                Cell::new(""),
                Cell::new(""),
            ]);
        }
        table.add_row(vec![
            Cell::new("Net profit"),
            Cell::new(""),
            Cell::new(""),
            Cell::new(self.net_profit).set_alignment(CellAlignment::Right).fg(
                if self.net_profit >= Cost::ONE_ORE {
                    Color::Green
                } else if self.net_profit <= -Cost::ONE_ORE {
                    Color::Red
                } else {
                    Color::Reset
                },
            ),
        ]);
        write!(f, "{table}")
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use chrono::{Local, TimeDelta};

    use super::*;
    use crate::{core::action::PlanAction, quantity::rate::KilowattHourRate};

    fn hour(offset: i64, energy_delta: f64, price: f64) -> SimulatedHour {
        SimulatedHour {
            start: Local::now() + TimeDelta::hours(offset),
            price: KilowattHourRate(price),
            solar: KilowattHours(1.0),
            wind: KilowattHours(0.5),
            load: KilowattHours(2.0),
            energy_delta: KilowattHours(energy_delta),
            state_of_charge_after: KilowattHours(5.0 + energy_delta),
            import: KilowattHours((0.5 + energy_delta).max(0.0)),
            export: KilowattHours((-0.5 - energy_delta).max(0.0)),
            action: PlanAction::None,
        }
    }

    #[test]
    fn profit() {
        let hours = [hour(0, 2.0, 1.0), hour(1, 0.0, 5.0), hour(2, -3.0, 2.0)];
        let summary: Summary = hours.iter().collect();
        assert_abs_diff_eq!(summary.energy_charged.0, 2.0);
        assert_abs_diff_eq!(summary.energy_discharged.0, 3.0);
        assert_abs_diff_eq!(summary.cost.0, 2.0);
        assert_abs_diff_eq!(summary.revenue.0, 6.0);
        assert_abs_diff_eq!(summary.net_profit.0, 4.0);
    }

    #[test]
    fn peaks() {
        let hours = [hour(0, 1.0, 1.0), hour(1, 2.5, 1.0), hour(2, -0.5, 1.0), hour(3, -1.5, 1.0)];
        let summary: Summary = hours.iter().collect();
        assert_abs_diff_eq!(summary.peak_charge_power.0, 2.5);
        assert_abs_diff_eq!(summary.peak_discharge_power.0, 1.5);
    }

    #[test]
    fn horizon_totals() {
        let hours = [hour(0, 2.0, 1.0), hour(1, 0.0, 5.0), hour(2, -3.0, 2.0)];
        let summary: Summary = hours.iter().collect();
        assert_abs_diff_eq!(summary.solar.0, 3.0);
        assert_abs_diff_eq!(summary.wind.0, 1.5);
        assert_abs_diff_eq!(summary.load.0, 6.0);
        assert_abs_diff_eq!(summary.import.0, 3.0);
        assert_abs_diff_eq!(summary.export.0, 2.5);
        assert_eq!(summary.final_state_of_charge, Some(KilowattHours(2.0)));
    }

    #[test]
    fn net_profit_is_serialized() -> crate::prelude::Result {
        let hours = [hour(0, 2.0, 1.0), hour(1, -3.0, 2.0)];
        let summary: Summary = hours.iter().collect();
        let json = serde_json::to_value(summary)?;
        assert_eq!(json["net_profit"], 4.0);
        Ok(())
    }

    #[test]
    fn empty() {
        let summary: Summary = Vec::<SimulatedHour>::new().iter().collect();
        assert_eq!(summary, Summary::default());
        assert_eq!(summary.final_state_of_charge, None);
        assert_eq!(summary.net_profit, Cost::ZERO);
    }

    #[test]
    fn renders() {
        let summary: Summary = [hour(0, 2.0, 1.0)].iter().collect();
        let rendered = summary.to_string();
        assert!(rendered.contains("Net profit"));
        assert!(rendered.contains("2.000 kWh"));
    }
}
