use std::fmt;
use std::str::FromStr;

use crate::{ChemistryError, Element, Result};

/// A molecular formula: element counts in order of first appearance.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Formula {
    atoms: Vec<(&'static Element, u64)>,
}

impl Formula {
    /// Parses formulas such as `H2O`, `C₄H₁₀`, `(NH₄)₂CO₃`, `K4[Fe(CN)6]` or
    /// `CuSO4·5H2O`.
    pub fn parse(input: &str) -> Result<Self> {
        FormulaParser::new(input).parse()
    }

    pub fn add(&mut self, element: &'static Element, count: u64) -> Result<()> {
        if count == 0 {
            return Ok(());
        }
        match self.atoms.iter_mut().find(|(e, _)| e.atomic_number == element.atomic_number) {
            Some((_, existing)) => {
                *existing = existing.checked_add(count).ok_or_else(|| overflow(element.symbol))?;
            }
            None => self.atoms.push((element, count)),
        }
        Ok(())
    }

    pub fn merge(&mut self, other: &Formula, multiplier: u64) -> Result<()> {
        for (element, count) in &other.atoms {
            let scaled = count.checked_mul(multiplier).ok_or_else(|| overflow(element.symbol))?;
            self.add(element, scaled)?;
        }
        Ok(())
    }

    pub fn atom_counts(&self) -> impl Iterator<Item = (&'static Element, u64)> + '_ {
        self.atoms.iter().copied()
    }

    pub fn count_of(&self, symbol: &str) -> u64 {
        self.atoms
            .iter()
            .find(|(element, _)| element.symbol == symbol)
            .map(|(_, count)| *count)
            .unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    /// Molar mass in g/mol.
    pub fn molar_mass(&self) -> f64 {
        self.atoms
            .iter()
            .map(|(element, count)| element.atomic_weight * *count as f64)
            .sum()
    }

    /// True when every element of the formula is one of `symbols`.
    pub fn contains_only(&self, symbols: &[&str]) -> bool {
        self.atoms.iter().all(|(element, _)| symbols.contains(&element.symbol))
    }

    /// Same elements with the same counts, regardless of order.
    pub fn same_composition(&self, other: &Formula) -> bool {
        self.atoms.len() == other.atoms.len()
            && self.atoms.iter().all(|(element, count)| other.count_of(element.symbol) == *count)
    }

    fn hill_order(&self) -> Vec<(&'static Element, u64)> {
        let mut atoms = self.atoms.clone();
        let has_carbon = self.count_of("C") > 0;
        atoms.sort_by(|(a, _), (b, _)| {
            let rank = |e: &Element| match (has_carbon, e.symbol) {
                (true, "C") => 0,
                (true, "H") => 1,
                _ => 2,
            };
            rank(a).cmp(&rank(b)).then_with(|| a.symbol.cmp(b.symbol))
        });
        atoms
    }
}

impl fmt::Display for Formula {
    /// Hill notation with ASCII digits.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (element, count) in self.hill_order() {
            write!(f, "{}", element.symbol)?;
            if count > 1 {
                write!(f, "{count}")?;
            }
        }
        Ok(())
    }
}

impl FromStr for Formula {
    type Err = ChemistryError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

fn overflow(symbol: &str) -> ChemistryError {
    ChemistryError::InvalidQuantity(format!("atom count of {symbol} overflows"))
}

fn is_hydrate_separator(c: char) -> bool {
    matches!(c, '·' | '•' | '*' | '.')
}

fn digit_value(c: char) -> Option<u64> {
    match c {
        '0'..='9' => Some(u64::from(c as u32 - '0' as u32)),
        '\u{2080}'..='\u{2089}' => Some(u64::from(c as u32 - 0x2080)),
        _ => None,
    }
}

struct FormulaParser<'a> {
    input: &'a str,
    chars: Vec<char>,
    pos: usize,
}

impl<'a> FormulaParser<'a> {
    fn new(input: &'a str) -> Self {
        Self { input, chars: input.trim().chars().collect(), pos: 0 }
    }

    fn error(&self, reason: impl Into<String>) -> ChemistryError {
        ChemistryError::InvalidFormula { formula: self.input.to_string(), reason: reason.into() }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn parse(mut self) -> Result<Formula> {
        if self.chars.is_empty() {
            return Err(self.error("empty formula"));
        }

        let mut formula = Formula::default();
        loop {
            let coefficient = self.read_coefficient()?;
            let segment = self.parse_sequence(None)?;
            if segment.is_empty() {
                return Err(self.error(format!("expected an element at position {}", self.pos)));
            }
            formula.merge(&segment, coefficient)?;

            match self.peek() {
                None => break,
                Some(c) if is_hydrate_separator(c) => self.pos += 1,
                Some(c) => return Err(self.error(format!("unexpected character '{c}'"))),
            }
        }
        Ok(formula)
    }

    fn parse_sequence(&mut self, closing: Option<char>) -> Result<Formula> {
        let mut formula = Formula::default();
        while let Some(c) = self.peek() {
            match c {
                'A'..='Z' => {
                    let element = self.read_element()?;
                    let count = self.read_count()?;
                    formula.add(element, count)?;
                }
                '(' | '[' => {
                    self.pos += 1;
                    let close = if c == '(' { ')' } else { ']' };
                    let group = self.parse_sequence(Some(close))?;
                    if group.is_empty() {
                        return Err(self.error("empty group"));
                    }
                    let count = self.read_count()?;
                    formula.merge(&group, count)?;
                }
                ')' | ']' => {
                    if closing == Some(c) {
                        self.pos += 1;
                        return Ok(formula);
                    }
                    return Err(self.error(format!("unbalanced '{c}'")));
                }
                c if is_hydrate_separator(c) && closing.is_none() => break,
                c => return Err(self.error(format!("unexpected character '{c}'"))),
            }
        }

        match closing {
            Some(close) => Err(self.error(format!("missing closing '{close}'"))),
            None => Ok(formula),
        }
    }

    fn read_element(&mut self) -> Result<&'static Element> {
        let first = self.chars[self.pos];
        self.pos += 1;

        let mut symbol = first.to_string();
        if let Some(next) = self.peek().filter(char::is_ascii_lowercase) {
            symbol.push(next);
            self.pos += 1;
        }

        Element::from_symbol(&symbol).ok_or_else(|| self.error(format!("unknown element '{symbol}'")))
    }

    fn read_digits(&mut self, allow_subscript: bool) -> Result<Option<u64>> {
        let mut value: Option<u64> = None;
        while let Some(digit) = self.peek().and_then(|c| {
            if !allow_subscript && !c.is_ascii_digit() {
                return None;
            }
            digit_value(c)
        }) {
            let current = value.unwrap_or(0);
            value = Some(
                current
                    .checked_mul(10)
                    .and_then(|v| v.checked_add(digit))
                    .ok_or_else(|| self.error("number is too large"))?,
            );
            self.pos += 1;
        }
        Ok(value)
    }

    fn read_count(&mut self) -> Result<u64> {
        match self.read_digits(true)? {
            Some(0) => Err(self.error("atom count must be positive")),
            Some(count) => Ok(count),
            None => Ok(1),
        }
    }

    fn read_coefficient(&mut self) -> Result<u64> {
        match self.read_digits(false)? {
            Some(0) => Err(self.error("coefficient must be positive")),
            Some(coefficient) => Ok(coefficient),
            None => Ok(1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(expected: f64, actual: f64) {
        assert!((expected - actual).abs() < 1e-9, "expected {expected}, got {actual}");
    }

    #[test]
    fn test_parse_simple_formula() {
        let water = Formula::parse("H2O").unwrap();
        assert_eq!(water.count_of("H"), 2);
        assert_eq!(water.count_of("O"), 1);
        assert_close(18.015, water.molar_mass());
    }

    #[test]
    fn test_parse_unicode_subscripts() {
        let butane = Formula::parse("C₄H₁₀").unwrap();
        assert_eq!(butane.count_of("C"), 4);
        assert_eq!(butane.count_of("H"), 10);
        assert_close(58.124, butane.molar_mass());
    }

    #[test]
    fn test_parse_nested_groups() {
        let ammonium_carbonate = Formula::parse("(NH₄)₂CO₃").unwrap();
        assert_eq!(ammonium_carbonate.count_of("N"), 2);
        assert_eq!(ammonium_carbonate.count_of("H"), 8);
        assert_eq!(ammonium_carbonate.count_of("C"), 1);
        assert_eq!(ammonium_carbonate.count_of("O"), 3);
        assert_close(96.086, ammonium_carbonate.molar_mass());

        let ferrocyanide = Formula::parse("K4[Fe(CN)6]").unwrap();
        assert_eq!(ferrocyanide.count_of("K"), 4);
        assert_eq!(ferrocyanide.count_of("Fe"), 1);
        assert_eq!(ferrocyanide.count_of("C"), 6);
        assert_eq!(ferrocyanide.count_of("N"), 6);
    }

    #[test]
    fn test_parse_hydrate() {
        let hydrate = Formula::parse("CuSO4·5H2O").unwrap();
        assert_eq!(hydrate.count_of("Cu"), 1);
        assert_eq!(hydrate.count_of("H"), 10);
        assert_eq!(hydrate.count_of("O"), 9);
        assert_eq!(Formula::parse("CuSO4*5H2O").unwrap(), hydrate);
    }

    #[test]
    fn test_repeated_elements_are_merged() {
        let acetic_acid = Formula::parse("CH3COOH").unwrap();
        assert_eq!(acetic_acid.count_of("C"), 2);
        assert_eq!(acetic_acid.count_of("H"), 4);
        assert_eq!(acetic_acid.count_of("O"), 2);
        assert_eq!(acetic_acid.to_string(), "C2H4O2");
    }

    #[test]
    fn test_hill_order_display() {
        assert_eq!(Formula::parse("OH2").unwrap().to_string(), "H2O");
        assert_eq!(Formula::parse("NaCl").unwrap().to_string(), "ClNa");
        assert_eq!(Formula::parse("(NH₂)₂CO").unwrap().to_string(), "CH4N2O");
    }

    #[test]
    fn test_same_composition_ignores_order() {
        let a = Formula::parse("H2O").unwrap();
        let b = Formula::parse("OH2").unwrap();
        assert!(a.same_composition(&b));
        assert!(!a.same_composition(&Formula::parse("H2O2").unwrap()));
    }

    #[test]
    fn test_invalid_formulas() {
        for input in ["", "   ", "Xx2", "H2O)", "(H2O", "h2o", "H0", "()", "H2 O", "·H2O"] {
            let err = Formula::parse(input).err();
            assert!(
                matches!(err, Some(ChemistryError::InvalidFormula { .. })),
                "{input:?} should be rejected, got {err:?}"
            );
        }
    }
}
