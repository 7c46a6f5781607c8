quantity!(Hours, via: f64, suffix: "h", precision: 1);

impl Hours {
    /// Planning step.
    pub const ONE: Self = Self(1.0);
}

