use serde::Serialize;

use crate::{ChemistryError, Formula, Result, AVOGADRO_NUMBER};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Quantity {
    Grams(f64),
    Moles(f64),
    Molecules(f64),
}

impl Quantity {
    fn value(self) -> f64 {
        match self {
            Quantity::Grams(v) | Quantity::Moles(v) | Quantity::Molecules(v) => v,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Amounts {
    pub grams: f64,
    pub moles: f64,
    pub molecules: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Compound {
    formula_text: String,
    formula: Formula,
}

impl Compound {
    pub fn new(formula: &str) -> Result<Self> {
        Ok(Self { formula_text: formula.to_string(), formula: Formula::parse(formula)? })
    }

    pub fn from_formula(formula: Formula) -> Self {
        Self { formula_text: formula.to_string(), formula }
    }

    pub fn formula(&self) -> &Formula {
        &self.formula
    }

    /// The formula as it was written by the caller.
    pub fn formula_text(&self) -> &str {
        &self.formula_text
    }

    pub fn molar_mass(&self) -> f64 {
        self.formula.molar_mass()
    }

    /// Converts one known amount into grams, moles and molecules.
    pub fn amounts(&self, quantity: Quantity) -> Result<Amounts> {
        let value = quantity.value();
        if !value.is_finite() || value < 0.0 {
            return Err(ChemistryError::InvalidQuantity(format!("{value} is not a non-negative number")));
        }

        let molar_mass = self.molar_mass();
        if molar_mass <= 0.0 {
            return Err(ChemistryError::InvalidQuantity(format!("{} has no mass", self.formula_text)));
        }

        let moles = match quantity {
            Quantity::Grams(grams) => grams / molar_mass,
            Quantity::Moles(moles) => moles,
            Quantity::Molecules(molecules) => molecules / AVOGADRO_NUMBER,
        };

        Ok(Amounts {
            grams: match quantity {
                Quantity::Grams(grams) => grams,
                _ => moles * molar_mass,
            },
            moles,
            molecules: match quantity {
                Quantity::Molecules(molecules) => molecules,
                _ => moles * AVOGADRO_NUMBER,
            },
        })
    }
}
