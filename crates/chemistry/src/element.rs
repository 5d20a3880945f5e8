use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Element {
    pub atomic_number: u8,
    pub symbol: &'static str,
    /// Standard atomic weight in g/mol. Elements without stable isotopes carry
    /// the mass number of their longest-lived isotope.
    pub atomic_weight: f64,
}

const fn el(atomic_number: u8, symbol: &'static str, atomic_weight: f64) -> Element {
    Element { atomic_number, symbol, atomic_weight }
}

pub static ELEMENTS: [Element; 118] = [
    el(1, "H", 1.008),
    el(2, "He", 4.0026),
    el(3, "Li", 6.94),
    el(4, "Be", 9.0122),
    el(5, "B", 10.81),
    el(6, "C", 12.011),
    el(7, "N", 14.007),
    el(8, "O", 15.999),
    el(9, "F", 18.998),
    el(10, "Ne", 20.180),
    el(11, "Na", 22.990),
    el(12, "Mg", 24.305),
    el(13, "Al", 26.982),
    el(14, "Si", 28.085),
    el(15, "P", 30.974),
    el(16, "S", 32.06),
    el(17, "Cl", 35.45),
    el(18, "Ar", 39.95),
    el(19, "K", 39.098),
    el(20, "Ca", 40.078),
    el(21, "Sc", 44.956),
    el(22, "Ti", 47.867),
    el(23, "V", 50.942),
    el(24, "Cr", 51.996),
    el(25, "Mn", 54.938),
    el(26, "Fe", 55.845),
    el(27, "Co", 58.933),
    el(28, "Ni", 58.693),
    el(29, "Cu", 63.546),
    el(30, "Zn", 65.38),
    el(31, "Ga", 69.723),
    el(32, "Ge", 72.630),
    el(33, "As", 74.922),
    el(34, "Se", 78.971),
    el(35, "Br", 79.904),
    el(36, "Kr", 83.798),
    el(37, "Rb", 85.468),
    el(38, "Sr", 87.62),
    el(39, "Y", 88.906),
    el(40, "Zr", 91.224),
    el(41, "Nb", 92.906),
    el(42, "Mo", 95.95),
    el(43, "Tc", 98.0),
    el(44, "Ru", 101.07),
    el(45, "Rh", 102.91),
    el(46, "Pd", 106.42),
    el(47, "Ag", 107.87),
    el(48, "Cd", 112.41),
    el(49, "In", 114.82),
    el(50, "Sn", 118.71),
    el(51, "Sb", 121.76),
    el(52, "Te", 127.60),
    el(53, "I", 126.90),
    el(54, "Xe", 131.29),
    el(55, "Cs", 132.91),
    el(56, "Ba", 137.33),
    el(57, "La", 138.91),
    el(58, "Ce", 140.12),
    el(59, "Pr", 140.91),
    el(60, "Nd", 144.24),
    el(61, "Pm", 145.0),
    el(62, "Sm", 150.36),
    el(63, "Eu", 151.96),
    el(64, "Gd", 157.25),
    el(65, "Tb", 158.93),
    el(66, "Dy", 162.50),
    el(67, "Ho", 164.93),
    el(68, "Er", 167.26),
    el(69, "Tm", 168.93),
    el(70, "Yb", 173.05),
    el(71, "Lu", 174.97),
    el(72, "Hf", 178.49),
    el(73, "Ta", 180.95),
    el(74, "W", 183.84),
    el(75, "Re", 186.21),
    el(76, "Os", 190.23),
    el(77, "Ir", 192.22),
    el(78, "Pt", 195.08),
    el(79, "Au", 196.97),
    el(80, "Hg", 200.59),
    el(81, "Tl", 204.38),
    el(82, "Pb", 207.2),
    el(83, "Bi", 208.98),
    el(84, "Po", 209.0),
    el(85, "At", 210.0),
    el(86, "Rn", 222.0),
    el(87, "Fr", 223.0),
    el(88, "Ra", 226.0),
    el(89, "Ac", 227.0),
    el(90, "Th", 232.04),
    el(91, "Pa", 231.04),
    el(92, "U", 238.03),
    el(93, "Np", 237.0),
    el(94, "Pu", 244.0),
    el(95, "Am", 243.0),
    el(96, "Cm", 247.0),
    el(97, "Bk", 247.0),
    el(98, "Cf", 251.0),
    el(99, "Es", 252.0),
    el(100, "Fm", 257.0),
    el(101, "Md", 258.0),
    el(102, "No", 259.0),
    el(103, "Lr", 266.0),
    el(104, "Rf", 267.0),
    el(105, "Db", 268.0),
    el(106, "Sg", 269.0),
    el(107, "Bh", 270.0),
    el(108, "Hs", 269.0),
    el(109, "Mt", 278.0),
    el(110, "Ds", 281.0),
    el(111, "Rg", 282.0),
    el(112, "Cn", 285.0),
    el(113, "Nh", 286.0),
    el(114, "Fl", 290.0),
    el(115, "Mc", 290.0),
    el(116, "Lv", 293.0),
    el(117, "Ts", 294.0),
    el(118, "Og", 294.0),
];

impl Element {
    pub fn from_symbol(symbol: &str) -> Option<&'static Element> {
        ELEMENTS.iter().find(|element| element.symbol == symbol)
    }

    pub fn from_atomic_number(atomic_number: u8) -> Option<&'static Element> {
        ELEMENTS.get(usize::from(atomic_number).checked_sub(1)?)
    }

    pub fn hydrogen() -> &'static Element {
        &ELEMENTS[0]
    }
}
