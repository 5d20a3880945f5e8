use std::collections::BTreeMap;
use std::ops::Range;

use serde::Serialize;

use crate::{ChemistryError, Element, Formula, Result};

const RECORD_SEPARATOR: &str = "$$$$";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SdfAtom {
    pub index: usize,
    pub symbol: &'static str,
    pub atomic_number: u8,
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub mass: f64,
    pub formal_charge: i32,
    /// Number of bonds touching the atom.
    pub bond_count: usize,
    /// Sum of bond orders, aromatic bonds counting 1.5.
    pub explicit_valence: f64,
    pub aromatic: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SdfBond {
    /// Zero-based atom indices.
    pub from: usize,
    pub to: usize,
    pub order: u8,
    pub stereo: u8,
    pub aromatic: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SdfRecord {
    pub title: String,
    pub program: String,
    pub comment: String,
    pub atoms: Vec<SdfAtom>,
    pub bonds: Vec<SdfBond>,
    pub properties: BTreeMap<String, String>,
}

impl SdfRecord {
    /// Formula of the atoms listed in the atom block. Hydrogens that are not
    /// written out are not counted.
    pub fn formula(&self) -> Result<Formula> {
        let mut formula = Formula::default();
        for atom in &self.atoms {
            let element = Element::from_atomic_number(atom.atomic_number)
                .ok_or_else(|| ChemistryError::UnknownElement(atom.symbol.to_string()))?;
            formula.add(element, 1)?;
        }
        Ok(formula)
    }

    pub fn molecular_weight(&self) -> f64 {
        self.atoms.iter().map(|atom| atom.mass).sum()
    }
}

/// Parses a V2000 SD file: one or more molfiles, each optionally followed by
/// `> <NAME>` data items, separated by `$$$$`.
pub fn parse_sdf(input: &str) -> Result<Vec<SdfRecord>> {
    let lines: Vec<&str> = input.lines().collect();
    let mut records = Vec::new();
    let mut cursor = 0;

    while lines[cursor..].iter().any(|line| !line.trim().is_empty()) {
        let (record, next) = RecordParser { lines: &lines, pos: cursor }.parse()?;
        tracing::debug!("[parse_sdf] Parsed record '{}' with {} atoms", record.title, record.atoms.len());
        records.push(record);
        cursor = next;
    }

    if records.is_empty() {
        return Err(ChemistryError::InvalidSdf { line: 1, reason: "no records".to_string() });
    }
    Ok(records)
}

fn charge_from_code(code: i32) -> i32 {
    match code {
        1 => 3,
        2 => 2,
        3 => 1,
        5 => -1,
        6 => -2,
        7 => -3,
        _ => 0,
    }
}

struct RecordParser<'a> {
    lines: &'a [&'a str],
    pos: usize,
}

impl<'a> RecordParser<'a> {
    fn error(&self, reason: impl Into<String>) -> ChemistryError {
        ChemistryError::InvalidSdf { line: self.pos + 1, reason: reason.into() }
    }

    fn next_line(&mut self) -> Result<&'a str> {
        let line = self.lines.get(self.pos).copied().ok_or_else(|| self.error("unexpected end of input"))?;
        self.pos += 1;
        Ok(line)
    }

    fn column<T: std::str::FromStr>(&self, line: &str, range: Range<usize>, name: &str) -> Result<T> {
        let end = range.end.min(line.len());
        line.get(range.start..end)
            .map(str::trim)
            .and_then(|text| text.parse().ok())
            .ok_or_else(|| ChemistryError::InvalidSdf { line: self.pos, reason: format!("invalid {name}") })
    }

    /// Like `column`, but a missing or blank field reads as zero.
    fn optional_column<T: std::str::FromStr + Default>(&self, line: &str, range: Range<usize>, name: &str) -> Result<T> {
        match line.get(range.start..range.end.min(line.len())).map(str::trim) {
            None | Some("") => Ok(T::default()),
            Some(_) => self.column(line, range, name),
        }
    }

    fn parse(mut self) -> Result<(SdfRecord, usize)> {
        let title = self.next_line()?.trim().to_string();
        let program = self.next_line()?.trim().to_string();
        let comment = self.next_line()?.trim().to_string();

        let counts = self.next_line()?;
        if counts.contains("V3000") {
            return Err(ChemistryError::InvalidSdf { line: self.pos, reason: "V3000 molfiles are not supported".into() });
        }
        let atom_count: usize = self.column(counts, 0..3, "atom count")?;
        let bond_count: usize = self.column(counts, 3..6, "bond count")?;

        let mut atoms = Vec::with_capacity(atom_count);
        for index in 0..atom_count {
            atoms.push(self.parse_atom(index)?);
        }

        let mut bonds = Vec::with_capacity(bond_count);
        for _ in 0..bond_count {
            let bond = self.parse_bond(atom_count)?;
            for end in [bond.from, bond.to] {
                let atom = &mut atoms[end];
                atom.bond_count += 1;
                atom.explicit_valence += if bond.aromatic { 1.5 } else { f64::from(bond.order) };
                atom.aromatic |= bond.aromatic;
            }
            bonds.push(bond);
        }

        self.parse_property_block(&mut atoms)?;
        let properties = self.parse_data_items()?;

        let record = SdfRecord { title, program, comment, atoms, bonds, properties };
        Ok((record, self.pos))
    }

    fn parse_atom(&mut self, index: usize) -> Result<SdfAtom> {
        let line = self.next_line()?;
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < 4 {
            return Err(self.error("atom line needs coordinates and a symbol"));
        }

        let coordinate = |field: &str| field.parse::<f64>().map_err(|_| self.error(format!("invalid coordinate '{field}'")));
        let (x, y, z) = (coordinate(fields[0])?, coordinate(fields[1])?, coordinate(fields[2])?);

        let element = Element::from_symbol(fields[3]).ok_or_else(|| self.error(format!("unknown element '{}'", fields[3])))?;
        let mass_difference: i32 = fields.get(4).and_then(|f| f.parse().ok()).unwrap_or(0);
        let charge_code: i32 = fields.get(5).and_then(|f| f.parse().ok()).unwrap_or(0);

        let mass = if mass_difference == 0 {
            element.atomic_weight
        } else {
            element.atomic_weight.round() + f64::from(mass_difference)
        };

        Ok(SdfAtom {
            index,
            symbol: element.symbol,
            atomic_number: element.atomic_number,
            x,
            y,
            z,
            mass,
            formal_charge: charge_from_code(charge_code),
            bond_count: 0,
            explicit_valence: 0.0,
            aromatic: false,
        })
    }

    fn parse_bond(&mut self, atom_count: usize) -> Result<SdfBond> {
        let line = self.next_line()?;
        let from: usize = self.column(line, 0..3, "bond start")?;
        let to: usize = self.column(line, 3..6, "bond end")?;
        let order: u8 = self.column(line, 6..9, "bond order")?;
        let stereo: u8 = self.optional_column(line, 9..12, "bond stereo")?;

        for end in [from, to] {
            if end == 0 || end > atom_count {
                return Err(ChemistryError::InvalidSdf {
                    line: self.pos,
                    reason: format!("bond references atom {end} of {atom_count}"),
                });
            }
        }
        if !(1..=4).contains(&order) {
            return Err(ChemistryError::InvalidSdf { line: self.pos, reason: format!("unsupported bond order {order}") });
        }

        Ok(SdfBond { from: from - 1, to: to - 1, order, stereo, aromatic: order == 4 })
    }

    fn parse_property_block(&mut self, atoms: &mut [SdfAtom]) -> Result<()> {
        let mut charges_reset = false;
        loop {
            let line = self.next_line()?;
            if line.starts_with("M  END") {
                return Ok(());
            }
            if line.trim() == RECORD_SEPARATOR {
                return Err(ChemistryError::InvalidSdf { line: self.pos, reason: "missing 'M  END'".into() });
            }
            if !line.starts_with("M  CHG") {
                continue;
            }

            // M  CHG lines supersede the charges of the atom block.
            if !charges_reset {
                atoms.iter_mut().for_each(|atom| atom.formal_charge = 0);
                charges_reset = true;
            }
            let values: Vec<i64> = line[6..]
                .split_whitespace()
                .map(|field| field.parse())
                .collect::<std::result::Result<_, _>>()
                .map_err(|_| ChemistryError::InvalidSdf { line: self.pos, reason: "invalid 'M  CHG' entry".into() })?;
            let (count, pairs) = values
                .split_first()
                .ok_or_else(|| ChemistryError::InvalidSdf { line: self.pos, reason: "empty 'M  CHG' entry".into() })?;
            let expected = usize::try_from(*count).ok().and_then(|count| count.checked_mul(2));
            if expected != Some(pairs.len()) {
                return Err(ChemistryError::InvalidSdf { line: self.pos, reason: "'M  CHG' count mismatch".into() });
            }
            for pair in pairs.chunks(2) {
                let atom = usize::try_from(pair[0])
                    .ok()
                    .and_then(|number| number.checked_sub(1))
                    .and_then(|index| atoms.get_mut(index))
                    .ok_or_else(|| ChemistryError::InvalidSdf {
                        line: self.pos,
                        reason: format!("'M  CHG' references atom {}", pair[0]),
                    })?;
                atom.formal_charge = i32::try_from(pair[1]).map_err(|_| ChemistryError::InvalidSdf {
                    line: self.pos,
                    reason: format!("'M  CHG' charge {} is out of range", pair[1]),
                })?;
            }
        }
    }

    fn parse_data_items(&mut self) -> Result<BTreeMap<String, String>> {
        let mut properties = BTreeMap::new();
        while let Some(line) = self.lines.get(self.pos).copied() {
            self.pos += 1;
            if line.trim() == RECORD_SEPARATOR {
                break;
            }
            if !line.starts_with('>') {
                continue;
            }

            let name = line
                .find('<')
                .and_then(|open| line[open + 1..].find('>').map(|close| &line[open + 1..open + 1 + close]))
                .ok_or_else(|| ChemistryError::InvalidSdf { line: self.pos, reason: "data header without a <NAME>".into() })?;

            let mut value = Vec::new();
            while let Some(value_line) = self.lines.get(self.pos).copied() {
                if value_line.trim().is_empty() || value_line.trim() == RECORD_SEPARATOR {
                    break;
                }
                value.push(value_line);
                self.pos += 1;
            }
            properties.insert(name.to_string(), value.join("\n"));
        }
        Ok(properties)
    }
}
