use std::fmt::{Display, Formatter};

use comfy_table::Color;
use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanAction {
    /// Leave the battery alone.
    #[default]
    None,

    /// Charge from the grid at full power.
    Charge,

    /// Discharge to the grid at full power.
    Discharge,
}

impl PlanAction {
    /// Next action in the manual toggle cycle: none → charge → discharge → none.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::None => Self::Charge,
            Self::Charge => Self::Discharge,
            Self::Discharge => Self::None,
        }
    }

    pub const fn color(self) -> Color {
        match self {
            Self::Charge => Color::Green,
            Self::Discharge => Color::Blue,
            Self::None => Color::Reset,
        }
    }
}

impl Display for PlanAction {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::None => write!(f, "Idle"),
            Self::Charge => write!(f, "Charge"),
            Self::Discharge => write!(f, "Discharge"),
        }
    }
}
