use crate::{ChemistryError, Formula, Result};

/// Complete combustion `fuel + O₂ → CO₂ + H₂O` of a CₓHᵧO_z fuel with the
/// smallest integer coefficients.
#[derive(Debug, Clone, PartialEq)]
pub struct Combustion {
    pub fuel: Formula,
    pub fuel_coefficient: u64,
    pub oxygen: u64,
    pub carbon_dioxide: u64,
    pub water: u64,
}

impl Combustion {
    pub fn new(fuel: &str) -> Result<Self> {
        let formula = Formula::parse(fuel)?;
        if !formula.contains_only(&["C", "H", "O"]) {
            return Err(ChemistryError::UnsupportedFuel(fuel.to_string()));
        }

        let carbon = formula.count_of("C");
        let hydrogen = formula.count_of("H");
        let oxygen = formula.count_of("O");
        if carbon == 0 || hydrogen == 0 {
            return Err(ChemistryError::UnsupportedFuel(fuel.to_string()));
        }

        // 4 CxHyOz + (4x + y - 2z) O2 -> 4x CO2 + 2y H2O
        let oxygen_needed = (4 * carbon + hydrogen)
            .checked_sub(2 * oxygen)
            .filter(|needed| *needed > 0)
            .ok_or_else(|| ChemistryError::UnsupportedFuel(fuel.to_string()))?;

        let coefficients = [4, oxygen_needed, 4 * carbon, 2 * hydrogen];
        let divisor = coefficients.iter().copied().fold(0, gcd);

        Ok(Self {
            fuel: formula,
            fuel_coefficient: coefficients[0] / divisor,
            oxygen: coefficients[1] / divisor,
            carbon_dioxide: coefficients[2] / divisor,
            water: coefficients[3] / divisor,
        })
    }

    /// Coefficient of `species` in the balanced equation, matched by
    /// composition so `H2O` and `OH2` are the same species.
    pub fn coefficient(&self, species: &str) -> Result<Option<u64>> {
        let species = Formula::parse(species)?;
        if self.fuel.same_composition(&species) {
            return Ok(Some(self.fuel_coefficient));
        }
        for (product, coefficient) in [("O2", self.oxygen), ("CO2", self.carbon_dioxide), ("H2O", self.water)] {
            if Formula::parse(product)?.same_composition(&species) {
                return Ok(Some(coefficient));
            }
        }
        Ok(None)
    }
}

fn gcd(a: u64, b: u64) -> u64 {
    if b == 0 {
        a
    } else {
        gcd(b, a % b)
    }
}
