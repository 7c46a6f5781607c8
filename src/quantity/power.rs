use crate::quantity::{energy::KilowattHours, time::Hours};

quantity!(Kilowatts, via: f64, suffix: "kW", precision: 3);

implement_mul!(Kilowatts, Hours, KilowattHours);
implement_div!(KilowattHours, Hours, Kilowatts);
