mod calculator;
mod combustion;
mod compound;
mod consts;
mod element;
mod error;
mod formula;
mod sdf;
mod smiles;

pub mod calculators;

pub use calculator::{calculate_molar_mass, calculate_mole, molar_mass, Substance};
pub use combustion::Combustion;
pub use compound::{Amounts, Compound, Quantity};
pub use consts::*;
pub use element::{Element, ELEMENTS};
pub use error::ChemistryError;
pub use formula::Formula;
pub use sdf::{parse_sdf, SdfAtom, SdfBond, SdfRecord};
pub use smiles::{BondOrder, Molecule, Smiles, SmilesAtom, SmilesBond};

pub type Result<T> = std::result::Result<T, ChemistryError>;
