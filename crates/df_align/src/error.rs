
use std::fmt;

use df_thermo::SequenceError;

#[derive(Debug)]
pub enum AlignError {
    InvalidBase(char),
    EmptyInput,
    Internal(String),
}

impl fmt::Display for AlignError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlignError::InvalidBase(c) => {
                write!(f, "Input contains an unsupported nucleotide: '{}'", c)
            }
            AlignError::EmptyInput => {
                write!(f, "Nearest neighbor evaluation needs at least 2 bases per strand")
            }
            AlignError::Internal(msg) => {
                write!(f, "Internal alignment error: {}", msg)
            }
        }
    }
}

impl std::error::Error for AlignError {}

impl From<SequenceError> for AlignError {
    fn from(e: SequenceError) -> Self {
        match e {
            SequenceError::InvalidBase(c) => AlignError::InvalidBase(c),
            SequenceError::Plain(msg) => AlignError::Internal(msg),
        }
    }
}
