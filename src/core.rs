pub mod action;
pub mod assignments;
pub mod battery;
pub mod generation;
pub mod grid;
pub mod hour;
pub mod load_profile;
pub mod merger;
pub mod planner;
pub mod record;
pub mod selector;
pub mod series;
pub mod simulator;
pub mod summary;
pub mod sun;
pub mod synthetic;
