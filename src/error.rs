use std::fmt;

/// Errors from the text-level color parser.
///
/// Only the shape of the input is checked. Non-hex characters are not an
/// error; they decode to unspecified channel values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColorError {
    /// Nothing left after the optional `#`
    EmptyInput,
    /// Digit count is neither 6 (`RRGGBB`) nor 8 (`RRGGBBAA`)
    InvalidLength { actual: usize },
}

impl ColorError {
    /// Create an InvalidLength error
    pub fn invalid_length(actual: usize) -> Self {
        ColorError::InvalidLength { actual }
    }
}

impl fmt::Display for ColorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColorError::EmptyInput => write!(f, "cannot decode empty color"),
            ColorError::InvalidLength { actual } => write!(
                f,
                "invalid color length {}: expected 6 (RRGGBB) or 8 (RRGGBBAA) hex digits",
                actual
            ),
        }
    }
}

impl std::error::Error for ColorError {}
