mod aggregate;

use chrono::{DateTime, Local};

pub use self::aggregate::AggregateHourly;

pub type Point<V> = (DateTime<Local>, V);

pub type Series<V> = Vec<Point<V>>;
