#[macro_use]
pub mod macros;

pub mod cost;
pub mod energy;
pub mod irradiance;
pub mod power;
pub mod rate;
pub mod speed;
pub mod time;
