use serde::Serialize;

use crate::{
    Amounts, ChemistryError, Quantity, Result, AMMONIUM_CARBONATE_FORMULA, AVOGADRO_NUMBER, NITROGEN_SYMBOL,
    UREA_FORMULA,
};

/// Amounts of a nitrogen compound together with the number of nitrogen
/// atoms it carries.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompoundAtoms {
    #[serde(flatten)]
    pub amounts: Amounts,
    pub total_fraction_atoms: f64,
}

/// Mass of `molecules` nitrogen atoms.
pub fn calculate_mass(molecules: f64) -> Result<Amounts> {
    super::amounts_of(NITROGEN_SYMBOL, Quantity::Molecules(molecules))
}

/// Amounts in `total_grams` of a compound of which only `nitrogen_fraction`
/// is the compound itself, the rest being impurity. Every formula unit is
/// counted as carrying two nitrogen atoms.
pub fn calculate_compound_atoms(formula: &str, total_grams: f64, nitrogen_fraction: f64) -> Result<CompoundAtoms> {
    if !(0.0..=1.0).contains(&nitrogen_fraction) {
        return Err(ChemistryError::InvalidQuantity(format!(
            "nitrogen fraction {nitrogen_fraction} must be between 0 and 1"
        )));
    }

    let amounts = super::amounts_of(formula, Quantity::Grams(total_grams * nitrogen_fraction))?;
    let total_fraction_atoms = 2.0 * amounts.moles * AVOGADRO_NUMBER;
    tracing::debug!("[calculate_compound_atoms] {} -> {} nitrogen atoms", formula, total_fraction_atoms);

    Ok(CompoundAtoms { amounts, total_fraction_atoms })
}

pub fn calculate_ammonium_compound_atoms(total_grams: f64, nitrogen_fraction: f64) -> Result<CompoundAtoms> {
    calculate_compound_atoms(AMMONIUM_CARBONATE_FORMULA, total_grams, nitrogen_fraction)
}

pub fn calculate_urea_compound_atoms(total_grams: f64, nitrogen_fraction: f64) -> Result<CompoundAtoms> {
    calculate_compound_atoms(UREA_FORMULA, total_grams, nitrogen_fraction)
}
