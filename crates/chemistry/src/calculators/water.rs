use crate::{Amounts, Quantity, Result, WATER_FORMULA};

/// Amounts of water in `milliliters`, taking 1 ml as 1 g.
pub fn calculate_molecules(milliliters: f64) -> Result<Amounts> {
    super::amounts_of(WATER_FORMULA, Quantity::Grams(milliliters))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculators::assert_relative;

    #[test]
    fn test_calculate_molecules() {
        let amounts = calculate_molecules(200.0).unwrap();
        assert_eq!(amounts.grams, 200.0);
        assert_relative(11.1019, amounts.moles);
        assert_relative(6.683e24, amounts.molecules);
    }

    #[test]
    fn test_rejects_negative_volume() {
        assert!(calculate_molecules(-5.0).is_err());
    }
}
