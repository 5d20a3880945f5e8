//! Fixed-substance calculators: water, nitrogen compounds, butane and the
//! combustion of a cyclopropane/propene mix.

pub mod cyclopropane;
pub mod hydrogen;
pub mod nitrogen;
pub mod water;

use crate::{Amounts, Compound, Quantity, Result};

fn amounts_of(formula: &str, quantity: Quantity) -> Result<Amounts> {
    let amounts = Compound::new(formula)?.amounts(quantity)?;
    tracing::debug!("[amounts_of] {} {:?} -> {:?}", formula, quantity, amounts);
    Ok(amounts)
}

#[cfg(test)]
pub(crate) fn assert_relative(expected: f64, actual: f64) {
    assert!(((expected - actual) / expected).abs() < 1e-3, "expected {expected}, got {actual}");
}
