/// Avogadro constant as used by the calculators (particles per mole).
pub const AVOGADRO_NUMBER: f64 = 6.02e23;

/// Volume fraction of oxygen in air.
pub const OXYGEN_FRACTION_IN_AIR: f64 = 0.21;

pub const NITROGEN_SYMBOL: &str = "N";
pub const WATER_FORMULA: &str = "H₂O";
pub const BUTANE_FORMULA: &str = "C₄H₁₀";
pub const PROPENE_FORMULA: &str = "C₃H₆";
pub const AMMONIUM_CARBONATE_FORMULA: &str = "(NH₄)₂CO₃";
pub const UREA_FORMULA: &str = "(NH₂)₂CO";
