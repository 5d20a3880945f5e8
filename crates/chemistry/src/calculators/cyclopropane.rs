use crate::{ChemistryError, Combustion, Result, OXYGEN_FRACTION_IN_AIR, PROPENE_FORMULA};

/// Liters of air needed to burn `volume` liters of a cyclopropane/propene
/// mix. Both are C₃H₆, so the propene combustion ratio applies to the whole
/// volume.
pub fn air_volume_combustion_with_propene(volume: f64) -> Result<f64> {
    if !volume.is_finite() || volume < 0.0 {
        return Err(ChemistryError::InvalidQuantity(format!("volume {volume} is not a non-negative number")));
    }

    let combustion = Combustion::new(PROPENE_FORMULA)?;
    tracing::debug!("[air_volume_combustion_with_propene] {:?}", combustion);

    let oxygen_per_fuel = combustion.oxygen as f64 / combustion.fuel_coefficient as f64;
    Ok(volume * oxygen_per_fuel / OXYGEN_FRACTION_IN_AIR)
}
