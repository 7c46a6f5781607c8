quantity!(
    /// Global horizontal irradiance.
    WattsPerSquareMetre, via: f64, suffix: "W/m²", precision: 0
);

impl WattsPerSquareMetre {
    /// Standard test conditions irradiance, at which panels deliver their peak power.
    pub const STANDARD: Self = Self(1000.0);
}
