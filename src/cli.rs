mod battery;
mod plan;
mod selection;
mod session;
mod site;
mod watch;

use clap::{Parser, Subcommand};

pub use self::{plan::PlanArgs, watch::WatchArgs};

#[derive(Parser)]
#[command(author, version, about, propagate_version = true)]
#[must_use]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Fetch the data, apply the requested changes to the plan, and print it.
    #[clap(name = "plan")]
    Plan(Box<PlanArgs>),

    /// Keep refreshing the plan periodically.
    #[clap(name = "watch")]
    Watch(Box<WatchArgs>),
}
