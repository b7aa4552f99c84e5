//! Input validation errors.
//!
//! Everything here is raised before a search starts. Running out of states
//! or exhausting the frontier is not an error; see [`crate::result`].

use thiserror::Error;

/// Malformed puzzle input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The grid text contains no non-blank rows.
    #[error("the puzzle grid is empty")]
    EmptyGrid,

    /// The grid has more rows or columns than coordinates can address.
    #[error("the puzzle grid is {rows}x{cols}, larger than the supported {max}x{max}")]
    GridTooLarge { rows: usize, cols: usize, max: usize },

    /// A dial field contains something other than decimal digits.
    #[error("{field} must contain only digits, found {found:?}")]
    NonDigit { field: &'static str, found: char },

    /// The moduli string is empty.
    #[error("at least one dial modulus is required")]
    NoDials,

    /// A dial with modulus zero can never be turned.
    #[error("dial {dial} has modulus 0")]
    ZeroModulus { dial: usize },

    /// The operations string does not split evenly into per-dial chunks.
    #[error("operations length {operations} is not a multiple of dial count {dials}")]
    OperationsLength { operations: usize, dials: usize },

    /// The initial state does not have one digit per dial.
    #[error("initial state has {initial} digits but there are {dials} dials")]
    InitialLength { initial: usize, dials: usize },

    /// An initial dial position is not reachable on its dial.
    #[error("dial {dial} starts at {value}, which is not below its modulus {modulus}")]
    InitialOutOfRange { dial: usize, value: u8, modulus: u8 },
}
