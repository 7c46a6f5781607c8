use crate::quantity::{cost::Cost, energy::KilowattHours};

quantity!(KilowattHourRate, via: f64, suffix: "kr/kWh", precision: 3);

implement_mul!(KilowattHours, KilowattHourRate, Cost);
