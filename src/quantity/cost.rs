quantity!(
    /// Amount of money in Swedish kronor.
    Cost, via: f64, suffix: "kr", precision: 2
);

impl Cost {
    pub const ONE_ORE: Self = Self(0.01);
}
