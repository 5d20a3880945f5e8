use std::collections::HashMap;

use serde::Serialize;

use crate::{ChemistryError, Element, Formula, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum BondOrder {
    Single,
    Double,
    Triple,
    Quadruple,
    Aromatic,
}

impl BondOrder {
    /// Contribution to the valence of either end. Aromatic bonds count as
    /// single bonds; the extra aromatic valence is added per atom.
    fn valence(self) -> u32 {
        match self {
            BondOrder::Single | BondOrder::Aromatic => 1,
            BondOrder::Double => 2,
            BondOrder::Triple => 3,
            BondOrder::Quadruple => 4,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SmilesAtom {
    pub element: &'static Element,
    pub aromatic: bool,
    /// Hydrogen count written inside a bracket atom. `None` for organic-subset
    /// atoms, whose hydrogens are implicit.
    pub bracket_hydrogens: Option<u32>,
    pub charge: i32,
    pub isotope: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SmilesBond {
    pub from: usize,
    pub to: usize,
    pub order: BondOrder,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Molecule {
    pub atoms: Vec<SmilesAtom>,
    pub bonds: Vec<SmilesBond>,
}

impl Molecule {
    pub fn hydrogen_count(&self, index: usize) -> u32 {
        let atom = &self.atoms[index];
        if let Some(hydrogens) = atom.bracket_hydrogens {
            return hydrogens;
        }

        let mut bond_valence: u32 = self
            .bonds
            .iter()
            .filter(|bond| bond.from == index || bond.to == index)
            .map(|bond| bond.order.valence())
            .sum();
        if atom.aromatic {
            bond_valence += 1;
        }

        let valences = default_valences(atom.element.symbol);
        let candidates = if atom.aromatic { &valences[..1.min(valences.len())] } else { valences };
        candidates
            .iter()
            .find(|valence| **valence >= bond_valence)
            .map(|valence| valence - bond_valence)
            .unwrap_or(0)
    }

    pub fn formula(&self) -> Result<Formula> {
        let mut formula = Formula::default();
        for (index, atom) in self.atoms.iter().enumerate() {
            formula.add(atom.element, 1)?;
            formula.add(Element::hydrogen(), u64::from(self.hydrogen_count(index)))?;
        }
        Ok(formula)
    }

    /// Average molecular weight in g/mol. Atoms with an explicit isotope
    /// contribute their mass number.
    pub fn molecular_weight(&self) -> f64 {
        let hydrogen = Element::hydrogen().atomic_weight;
        self.atoms
            .iter()
            .enumerate()
            .map(|(index, atom)| {
                let heavy = atom.isotope.map(f64::from).unwrap_or(atom.element.atomic_weight);
                heavy + hydrogen * f64::from(self.hydrogen_count(index))
            })
            .sum()
    }
}

fn default_valences(symbol: &str) -> &'static [u32] {
    match symbol {
        "B" => &[3],
        "C" => &[4],
        "N" => &[3, 5],
        "O" => &[2],
        "P" => &[3, 5],
        "S" => &[2, 4, 6],
        "F" | "Cl" | "Br" | "I" => &[1],
        _ => &[],
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum BondSymbol {
    Single,
    Double,
    Triple,
    Quadruple,
    Aromatic,
}

impl From<BondSymbol> for BondOrder {
    fn from(symbol: BondSymbol) -> Self {
        match symbol {
            BondSymbol::Single => BondOrder::Single,
            BondSymbol::Double => BondOrder::Double,
            BondSymbol::Triple => BondOrder::Triple,
            BondSymbol::Quadruple => BondOrder::Quadruple,
            BondSymbol::Aromatic => BondOrder::Aromatic,
        }
    }
}

/// SMILES reader covering the organic subset, bracket atoms, branches,
/// ring closures and disconnected components. Stereo marks are accepted and
/// ignored.
pub struct Smiles<'a> {
    input: &'a str,
    chars: Vec<char>,
    pos: usize,
    molecule: Molecule,
    previous: Option<usize>,
    branches: Vec<Option<usize>>,
    pending_bond: Option<BondSymbol>,
    open_rings: HashMap<u32, (usize, Option<BondSymbol>)>,
}

impl<'a> Smiles<'a> {
    pub fn parse(input: &'a str) -> Result<Molecule> {
        let mut parser = Self {
            input,
            chars: input.trim().chars().collect(),
            pos: 0,
            molecule: Molecule::default(),
            previous: None,
            branches: Vec::new(),
            pending_bond: None,
            open_rings: HashMap::new(),
        };
        parser.run()?;
        Ok(parser.molecule)
    }

    fn error(&self, reason: impl Into<String>) -> ChemistryError {
        ChemistryError::InvalidSmiles {
            smiles: self.input.to_string(),
            position: self.pos,
            reason: reason.into(),
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn run(&mut self) -> Result<()> {
        if self.chars.is_empty() {
            return Err(self.error("empty SMILES"));
        }

        while let Some(c) = self.peek() {
            match c {
                '(' => {
                    if self.previous.is_none() {
                        return Err(self.error("branch without a preceding atom"));
                    }
                    self.branches.push(self.previous);
                    self.pos += 1;
                }
                ')' => {
                    if self.pending_bond.is_some() {
                        return Err(self.error("bond without a following atom"));
                    }
                    self.previous = self.branches.pop().ok_or_else(|| self.error("unbalanced ')'"))?;
                    self.pos += 1;
                }
                '-' | '=' | '#' | '$' | ':' | '/' | '\\' => {
                    if self.pending_bond.is_some() || self.previous.is_none() {
                        return Err(self.error(format!("unexpected bond '{c}'")));
                    }
                    self.pending_bond = Some(match c {
                        '=' => BondSymbol::Double,
                        '#' => BondSymbol::Triple,
                        '$' => BondSymbol::Quadruple,
                        ':' => BondSymbol::Aromatic,
                        _ => BondSymbol::Single,
                    });
                    self.pos += 1;
                }
                '.' => {
                    if self.pending_bond.is_some() {
                        return Err(self.error("bond before '.'"));
                    }
                    self.previous = None;
                    self.pos += 1;
                }
                '0'..='9' | '%' => {
                    let ring = self.read_ring_number()?;
                    self.close_or_open_ring(ring)?;
                }
                '[' => {
                    let atom = self.read_bracket_atom()?;
                    self.push_atom(atom)?;
                }
                _ => {
                    let atom = self.read_organic_atom()?;
                    self.push_atom(atom)?;
                }
            }
        }

        if self.pending_bond.is_some() {
            return Err(self.error("bond without a following atom"));
        }
        if !self.branches.is_empty() {
            return Err(self.error("unclosed branch"));
        }
        if let Some(ring) = self.open_rings.keys().min() {
            return Err(self.error(format!("unclosed ring {ring}")));
        }
        Ok(())
    }

    fn bond_order(&self, a: usize, b: usize, symbol: Option<BondSymbol>) -> BondOrder {
        match symbol {
            Some(symbol) => symbol.into(),
            None if self.molecule.atoms[a].aromatic && self.molecule.atoms[b].aromatic => BondOrder::Aromatic,
            None => BondOrder::Single,
        }
    }

    fn push_atom(&mut self, atom: SmilesAtom) -> Result<()> {
        self.molecule.atoms.push(atom);
        let index = self.molecule.atoms.len() - 1;
        if let Some(previous) = self.previous {
            let pending = self.pending_bond.take();
            let order = self.bond_order(previous, index, pending);
            self.molecule.bonds.push(SmilesBond { from: previous, to: index, order });
        }
        self.previous = Some(index);
        Ok(())
    }

    fn read_ring_number(&mut self) -> Result<u32> {
        let c = self.chars[self.pos];
        self.pos += 1;
        if c != '%' {
            return c.to_digit(10).ok_or_else(|| self.error("expected a ring digit"));
        }

        let digits: String = self.chars.iter().skip(self.pos).take(2).collect();
        if digits.len() != 2 || !digits.chars().all(|d| d.is_ascii_digit()) {
            return Err(self.error("'%' must be followed by two digits"));
        }
        self.pos += 2;
        digits.parse().map_err(|_| self.error("invalid ring number"))
    }

    fn close_or_open_ring(&mut self, ring: u32) -> Result<()> {
        let current = self.previous.ok_or_else(|| self.error("ring closure without an atom"))?;
        let symbol = self.pending_bond.take();

        match self.open_rings.remove(&ring) {
            Some((opened_at, opening_symbol)) => {
                if opened_at == current {
                    return Err(self.error(format!("ring {ring} closes on its own atom")));
                }
                let symbol = match (opening_symbol, symbol) {
                    (Some(a), Some(b)) if a != b => {
                        return Err(self.error(format!("conflicting bonds on ring {ring}")));
                    }
                    (a, b) => a.or(b),
                };
                let order = self.bond_order(opened_at, current, symbol);
                self.molecule.bonds.push(SmilesBond { from: opened_at, to: current, order });
            }
            None => {
                self.open_rings.insert(ring, (current, symbol));
            }
        }
        Ok(())
    }

    fn read_organic_atom(&mut self) -> Result<SmilesAtom> {
        let c = self.chars[self.pos];
        let next = self.chars.get(self.pos + 1).copied();

        let (symbol, aromatic, width) = match (c, next) {
            ('B', Some('r')) => ("Br", false, 2),
            ('C', Some('l')) => ("Cl", false, 2),
            ('B', _) => ("B", false, 1),
            ('C', _) => ("C", false, 1),
            ('N', _) => ("N", false, 1),
            ('O', _) => ("O", false, 1),
            ('P', _) => ("P", false, 1),
            ('S', _) => ("S", false, 1),
            ('F', _) => ("F", false, 1),
            ('I', _) => ("I", false, 1),
            ('b', _) => ("B", true, 1),
            ('c', _) => ("C", true, 1),
            ('n', _) => ("N", true, 1),
            ('o', _) => ("O", true, 1),
            ('p', _) => ("P", true, 1),
            ('s', _) => ("S", true, 1),
            ('*', _) => return Err(self.error("wildcard atoms have no mass")),
            _ => return Err(self.error(format!("unexpected character '{c}'"))),
        };

        let element = Element::from_symbol(symbol).ok_or_else(|| self.error(format!("unknown element '{symbol}'")))?;
        self.pos += width;
        Ok(SmilesAtom { element, aromatic, bracket_hydrogens: None, charge: 0, isotope: None })
    }

    fn read_number(&mut self) -> Option<u32> {
        let start = self.pos;
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.pos += 1;
        }
        if start == self.pos {
            return None;
        }
        self.chars[start..self.pos].iter().collect::<String>().parse().ok()
    }

    fn read_bracket_atom(&mut self) -> Result<SmilesAtom> {
        self.pos += 1;
        let isotope = self.read_number();

        let (element, aromatic) = self.read_bracket_symbol()?;

        if self.peek() == Some('@') {
            self.skip_chirality()?;
        }

        let mut hydrogens = 0;
        if self.peek() == Some('H') {
            self.pos += 1;
            hydrogens = self.read_number().unwrap_or(1);
        }

        let mut charge: i32 = 0;
        if let Some(sign @ ('+' | '-')) = self.peek() {
            let unit = if sign == '+' { 1 } else { -1 };
            self.pos += 1;
            let magnitude = match self.read_number() {
                Some(n) => n as i32,
                None => {
                    let mut repeated = 1;
                    while self.peek() == Some(sign) {
                        repeated += 1;
                        self.pos += 1;
                    }
                    repeated
                }
            };
            charge = unit * magnitude;
        }

        if self.peek() == Some(':') {
            self.pos += 1;
            self.read_number().ok_or_else(|| self.error("atom class needs a number"))?;
        }

        if self.peek() != Some(']') {
            return Err(self.error("unterminated bracket atom"));
        }
        self.pos += 1;

        Ok(SmilesAtom { element, aromatic, bracket_hydrogens: Some(hydrogens), charge, isotope })
    }

    /// Chirality carries no mass: `@`, `@@`, or `@` followed by one of the
    /// classes TH, AL, SP, TB, OH and a number.
    fn skip_chirality(&mut self) -> Result<()> {
        self.pos += 1;
        if self.peek() == Some('@') {
            self.pos += 1;
            return Ok(());
        }

        let class: String = self.chars.iter().skip(self.pos).take(2).collect();
        if !matches!(class.as_str(), "TH" | "AL" | "SP" | "TB" | "OH") {
            return Ok(());
        }
        self.pos += 2;
        self.read_number().ok_or_else(|| self.error(format!("chirality class @{class} needs a number")))?;
        Ok(())
    }

    fn read_bracket_symbol(&mut self) -> Result<(&'static Element, bool)> {
        let first = self.peek().ok_or_else(|| self.error("unterminated bracket atom"))?;
        let second = self.chars.get(self.pos + 1).copied();

        if first.is_ascii_lowercase() {
            let (symbol, width) = match (first, second) {
                ('s', Some('e')) => ("Se", 2),
                ('a', Some('s')) => ("As", 2),
                ('b', _) => ("B", 1),
                ('c', _) => ("C", 1),
                ('n', _) => ("N", 1),
                ('o', _) => ("O", 1),
                ('p', _) => ("P", 1),
                ('s', _) => ("S", 1),
                _ => return Err(self.error(format!("unknown aromatic atom '{first}'"))),
            };
            let element = Element::from_symbol(symbol).ok_or_else(|| self.error("unknown element"))?;
            self.pos += width;
            return Ok((element, true));
        }

        if !first.is_ascii_uppercase() {
            return Err(self.error(format!("expected an element symbol, found '{first}'")));
        }

        if let Some(second) = second.filter(char::is_ascii_lowercase) {
            let two_letter: String = [first, second].iter().collect();
            if let Some(element) = Element::from_symbol(&two_letter) {
                self.pos += 2;
                return Ok((element, false));
            }
        }

        self.pos += 1;
        let symbol = first.to_string();
        let element = Element::from_symbol(&symbol).ok_or_else(|| self.error(format!("unknown element '{symbol}'")))?;
        Ok((element, false))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn weight(smiles: &str) -> f64 {
        Smiles::parse(smiles).unwrap().molecular_weight()
    }

    fn formula(smiles: &str) -> String {
        Smiles::parse(smiles).unwrap().formula().unwrap().to_string()
    }

    fn assert_close(expected: f64, actual: f64) {
        assert!((expected - actual).abs() < 1e-6, "expected {expected}, got {actual}");
    }

    #[test]
    fn test_implicit_hydrogens() {
        assert_eq!(formula("O"), "H2O");
        assert_eq!(formula("CCO"), "C2H6O");
        assert_eq!(formula("C=C"), "C2H4");
        assert_eq!(formula("C#N"), "CHN");
        assert_eq!(formula("CC(=O)O"), "C2H4O2");
    }

    #[test]
    fn test_aromatic_rings() {
        assert_eq!(formula("c1ccccc1"), "C6H6");
        assert_eq!(formula("c1ccncc1"), "C5H5N");
        assert_eq!(formula("c1ccsc1"), "C4H4S");
        assert_eq!(formula("c1cc[nH]c1"), "C4H5N");
        assert_eq!(formula("Cc1ccccc1"), "C7H8");
    }

    #[test]
    fn test_molecular_weight() {
        assert_close(18.015, weight("O"));
        assert_close(46.069, weight("CCO"));
        assert_close(78.114, weight("c1ccccc1"));
        // aspirin, C9H8O4
        assert_close(180.159, weight("CC(=O)OC1=CC=CC=C1C(=O)O"));
    }

    #[test]
    fn test_bracket_atoms() {
        let sodium_chloride = Smiles::parse("[Na+].[Cl-]").unwrap();
        assert_eq!(sodium_chloride.atoms.len(), 2);
        assert!(sodium_chloride.bonds.is_empty());
        assert_eq!(sodium_chloride.atoms[0].charge, 1);
        assert_eq!(sodium_chloride.atoms[1].charge, -1);
        assert_eq!(sodium_chloride.formula().unwrap().to_string(), "ClNa");

        let ammonium = Smiles::parse("[NH4+]").unwrap();
        assert_eq!(ammonium.formula().unwrap().to_string(), "H4N");

        let chiral = Smiles::parse("N[C@@H](C)C(=O)O").unwrap();
        assert_eq!(chiral.formula().unwrap().to_string(), "C3H7NO2");

        let tetrahedral = Smiles::parse("N[C@TH2H](C)C(=O)O").unwrap();
        assert_eq!(tetrahedral, chiral);

        let heavy_water = Smiles::parse("[2H]O[2H]").unwrap();
        assert_close(2.0 + 15.999 + 2.0, heavy_water.molecular_weight());
    }

    #[test]
    fn test_ring_closure_bonds() {
        let cyclohexane = Smiles::parse("C1CCCCC1").unwrap();
        assert_eq!(cyclohexane.bonds.len(), 6);
        assert_eq!(cyclohexane.formula().unwrap().to_string(), "C6H12");

        let percent = Smiles::parse("C%10CCCCC%10").unwrap();
        assert_eq!(percent, cyclohexane);
    }

    #[test]
    fn test_invalid_smiles() {
        for input in ["", "C1CC", "C(C", "CC)", "C=", "[Na", "Xy", "C**", "=C", "(C)", "[CN]", "[C@XY]", "[C@SP]"] {
            let err = Smiles::parse(input).err();
            assert!(
                matches!(err, Some(ChemistryError::InvalidSmiles { .. })),
                "{input:?} should be rejected, got {err:?}"
            );
        }
    }
}
