use crate::{ChemistryError, Formula, Result, Smiles};

/// A substance named either by its molecular formula or by SMILES.
#[derive(Debug, Clone, PartialEq)]
pub enum Substance {
    Formula(String),
    Smiles(String),
}

impl Substance {
    /// Picks the formula when both are given. Blank strings count as absent.
    pub fn from_parts(formula: Option<&str>, smiles: Option<&str>) -> Option<Self> {
        let present = |value: Option<&str>| value.map(str::trim).filter(|v| !v.is_empty()).map(str::to_string);
        present(formula).map(Substance::Formula).or_else(|| present(smiles).map(Substance::Smiles))
    }
}

pub fn molar_mass(substance: &Substance) -> Result<f64> {
    match substance {
        Substance::Formula(formula) => Ok(Formula::parse(formula)?.molar_mass()),
        Substance::Smiles(smiles) => Ok(Smiles::parse(smiles)?.molecular_weight()),
    }
}

pub fn calculate_molar_mass(formula: Option<&str>, smiles: Option<&str>) -> Result<f64> {
    let substance = Substance::from_parts(formula, smiles)
        .ok_or_else(|| ChemistryError::MissingInput("either formula or smiles is required".to_string()))?;
    let result = molar_mass(&substance)?;
    tracing::debug!("[calculate_molar_mass] {:?} -> {}", substance, result);
    Ok(result)
}

/// Moles in `mass` grams, using the molar mass of `substance` when one is
/// given and `molecular_weight` otherwise.
pub fn calculate_mole(substance: Option<&Substance>, mass: Option<f64>, molecular_weight: Option<f64>) -> Result<f64> {
    let mass = mass.ok_or_else(|| ChemistryError::MissingInput("mass is required".to_string()))?;
    if !mass.is_finite() || mass < 0.0 {
        return Err(ChemistryError::InvalidQuantity(format!("mass {mass} is not a non-negative number")));
    }

    let divisor = match substance {
        Some(substance) => molar_mass(substance)?,
        None => molecular_weight.ok_or_else(|| {
            ChemistryError::MissingInput("formula, smiles or molecularWeight is required".to_string())
        })?,
    };
    if !divisor.is_finite() || divisor <= 0.0 {
        return Err(ChemistryError::InvalidQuantity(format!("molecular weight {divisor} must be positive")));
    }

    let moles = mass / divisor;
    tracing::debug!("[calculate_mole] {} g / {} g/mol -> {} mol", mass, divisor, moles);
    Ok(moles)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(expected: f64, actual: f64) {
        assert!((expected - actual).abs() < 1e-6, "expected {expected}, got {actual}");
    }

    #[test]
    fn test_molar_mass_from_formula_or_smiles() {
        assert_close(18.015, calculate_molar_mass(Some("H2O"), None).unwrap());
        assert_close(46.069, calculate_molar_mass(None, Some("CCO")).unwrap());
        // formula wins over smiles
        assert_close(18.015, calculate_molar_mass(Some("H2O"), Some("CCO")).unwrap());
        assert_close(46.069, calculate_molar_mass(Some("  "), Some("CCO")).unwrap());
    }

    #[test]
    fn test_molar_mass_requires_input() {
        assert!(matches!(calculate_molar_mass(None, None), Err(ChemistryError::MissingInput(_))));
        assert!(matches!(calculate_molar_mass(None, Some("C1CC")), Err(ChemistryError::InvalidSmiles { .. })));
    }

    #[test]
    fn test_mole_from_substance() {
        let water = Substance::Formula("H2O".to_string());
        assert_close(2.0, calculate_mole(Some(&water), Some(36.03), None).unwrap());

        // molecular weight is ignored when a substance is given
        let ethanol = Substance::Smiles("CCO".to_string());
        assert_close(1.0, calculate_mole(Some(&ethanol), Some(46.069), Some(1.0)).unwrap());
    }

    #[test]
    fn test_mole_from_molecular_weight() {
        assert_close(0.5, calculate_mole(None, Some(10.0), Some(20.0)).unwrap());
    }

    #[test]
    fn test_mole_invalid_input() {
        assert!(matches!(calculate_mole(None, None, Some(1.0)), Err(ChemistryError::MissingInput(_))));
        assert!(matches!(calculate_mole(None, Some(1.0), None), Err(ChemistryError::MissingInput(_))));
        assert!(matches!(calculate_mole(None, Some(1.0), Some(0.0)), Err(ChemistryError::InvalidQuantity(_))));
        assert!(matches!(calculate_mole(None, Some(-1.0), Some(2.0)), Err(ChemistryError::InvalidQuantity(_))));
    }
}
