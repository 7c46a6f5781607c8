use chrono::{DateTime, Local};
use clap::Parser;

use crate::{
    cli::session::{Edits, SessionArgs},
    prelude::*,
};

#[derive(Parser)]
pub struct PlanArgs {
    #[clap(flatten)]
    session: SessionArgs,

    /// Advance the hour to its next action: idle → charge → discharge → idle.
    ///
    /// Accepts RFC 3339 timestamps, for example `2025-06-01T14:00:00+02:00`.
    #[clap(long = "cycle", value_name = "TIMESTAMP", conflicts_with = "auto")]
    cycle: Vec<DateTime<Local>>,

    /// Forget the stored manual assignments before applying the changes.
    #[clap(long)]
    clear: bool,
}

impl PlanArgs {
    pub async fn run(self) -> Result {
        let edits = Edits { clear: self.clear, cycle: self.cycle };
        self.session.try_into_session()?.run(&edits).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycle_conflicts_with_auto() {
        let result =
            PlanArgs::try_parse_from(["plan", "--auto", "--cycle", "2025-06-01T14:00:00+02:00"]);
        assert!(result.is_err());
    }

    #[test]
    fn cycle_hours() -> Result {
        let args = PlanArgs::try_parse_from([
            "plan",
            "--cycle",
            "2025-06-01T14:00:00+02:00",
            "--cycle",
            "2025-06-01T15:00:00+02:00",
        ])?;
        assert_eq!(args.cycle.len(), 2);
        assert!(!args.clear);
        Ok(())
    }
}
