use crate::{Amounts, Quantity, Result, BUTANE_FORMULA};

/// Amounts of butane in `moles`.
pub fn calculate_atoms_in_butane(moles: f64) -> Result<Amounts> {
    super::amounts_of(BUTANE_FORMULA, Quantity::Moles(moles))
}
