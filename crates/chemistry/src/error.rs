use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ChemistryError {
    #[error("invalid formula '{formula}': {reason}")]
    InvalidFormula { formula: String, reason: String },

    #[error("invalid SMILES '{smiles}' at position {position}: {reason}")]
    InvalidSmiles { smiles: String, position: usize, reason: String },

    #[error("invalid SDF at line {line}: {reason}")]
    InvalidSdf { line: usize, reason: String },

    #[error("unknown element '{0}'")]
    UnknownElement(String),

    #[error("invalid quantity: {0}")]
    InvalidQuantity(String),

    #[error("unsupported combustion fuel '{0}': only C, H and O are allowed")]
    UnsupportedFuel(String),

    #[error("missing input: {0}")]
    MissingInput(String),
}
