
use std::fmt;
use std::borrow::Borrow;
use std::ops::Deref;

use log::warn;
use colored::*;


#[derive(Debug)]
pub enum SequenceError {
    Plain(String),
    InvalidBase(char),
}

impl fmt::Display for SequenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SequenceError::Plain(s) => {
                write!(f, "ERROR: {}", s)
            }
            SequenceError::InvalidBase(c) => {
                write!(f, "Unsupported nucleotide: '{}'", c)
            }
        }
    }
}

impl std::error::Error for SequenceError {}


/// The four DNA bases. Input is case-insensitive, everything else
/// is a [SequenceError].
#[derive(Clone, Hash, Copy, Debug, Eq, PartialEq)]
pub enum Base { A, C, G, T }
pub const BCOUNT: usize = 4; // 4 Base variants for internal tables.

impl TryFrom<char> for Base {
    type Error = SequenceError;
    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c.to_ascii_uppercase() {
            'A' => Ok(Base::A),
            'C' => Ok(Base::C),
            'G' => Ok(Base::G),
            'T' => Ok(Base::T),
            _ => Err(SequenceError::InvalidBase(c)),
        }
    }
}

impl From<Base> for char {
    fn from(b: Base) -> Self {
        match b {
            Base::A => 'A',
            Base::C => 'C',
            Base::G => 'G',
            Base::T => 'T',
        }
    }
}

impl fmt::Display for Base {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", char::from(*self))
    }
}

impl Base {
    pub fn complement(self) -> Base {
        match self {
            Base::A => Base::T,
            Base::T => Base::A,
            Base::C => Base::G,
            Base::G => Base::C,
        }
    }

    /// Watson-Crick pairing: A-T and C-G only.
    pub fn pairs_with(self, other: Base) -> bool {
        self.complement() == other
    }

    pub fn is_gc(self) -> bool {
        matches!(self, Base::G | Base::C)
    }
}


/// A base symbol extended with '.', the "no base" marker used by the
/// terminal and dangling end tables.
#[derive(Clone, Hash, Copy, Debug, Eq, PartialEq)]
pub enum TermBase { Dot, A, C, G, T }
pub const TCOUNT: usize = 5; // 5 TermBase variants for terminal tables.

impl From<Base> for TermBase {
    fn from(b: Base) -> Self {
        match b {
            Base::A => TermBase::A,
            Base::C => TermBase::C,
            Base::G => TermBase::G,
            Base::T => TermBase::T,
        }
    }
}

impl TryFrom<char> for TermBase {
    type Error = SequenceError;
    fn try_from(c: char) -> Result<Self, Self::Error> {
        if c == '.' {
            Ok(TermBase::Dot)
        } else {
            Ok(TermBase::from(Base::try_from(c)?))
        }
    }
}

impl fmt::Display for TermBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = match self {
            TermBase::Dot => '.',
            TermBase::A => 'A',
            TermBase::C => 'C',
            TermBase::G => 'G',
            TermBase::T => 'T',
        };
        write!(f, "{}", c)
    }
}


#[derive(Clone, Hash, Debug, Eq, PartialEq)]
pub struct NucleotideVec(pub Vec<Base>);

impl Deref for NucleotideVec {
    type Target = [Base];
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Borrow<[Base]> for NucleotideVec {
    fn borrow(&self) -> &[Base] {
        &self.0
    }
}

impl TryFrom<&str> for NucleotideVec {
    type Error = SequenceError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        let mut vec = Vec::with_capacity(s.len());
        for c in s.chars() {
            vec.push(Base::try_from(c)?);
        }
        Ok(NucleotideVec(vec))
    }
}

impl fmt::Display for NucleotideVec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for base in &self.0 {
            write!(f, "{}", base)?;
        }
        Ok(())
    }
}

impl NucleotideVec {
    /// Parse a sequence, replacing unknown characters with 'A' after a
    /// logged warning. Strict callers use `try_from` instead.
    pub fn from_lossy(s: &str) -> Self {
        let vec = s.chars().map(|c| {
            Base::try_from(c).unwrap_or_else(|e| {
                warn!("{} {} -> converted to 'A'", "WARNING:".red(), e);
                Base::A
            })
        }).collect();
        NucleotideVec(vec)
    }

    /// The same strand written in the opposite direction.
    pub fn reversed(&self) -> Self {
        NucleotideVec(self.0.iter().rev().copied().collect())
    }

    /// The antisense strand, written 5'->3'.
    pub fn reverse_complement(&self) -> Self {
        NucleotideVec(self.0.iter().rev().map(|b| b.complement()).collect())
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use Base::*;

    #[test]
    fn test_base_from_char() {
        assert_eq!(Base::try_from('a').unwrap(), A);
        assert_eq!(Base::try_from('T').unwrap(), T);
        assert!(Base::try_from('U').is_err());
        assert!(Base::try_from('.').is_err());
    }

    #[test]
    fn test_complement_pairs() {
        assert_eq!(A.complement(), T);
        assert_eq!(G.complement(), C);
        assert!(A.pairs_with(T));
        assert!(C.pairs_with(G));
        assert!(!A.pairs_with(A));
        assert!(!G.pairs_with(T));
    }

    #[test]
    fn test_term_base_from_char() {
        assert_eq!(TermBase::try_from('.').unwrap(), TermBase::Dot);
        assert_eq!(TermBase::try_from('g').unwrap(), TermBase::G);
        assert!(TermBase::try_from('&').is_err());
    }

    #[test]
    fn test_sequence_roundtrip() {
        let seq = NucleotideVec::try_from("ACGTacgt").unwrap();
        assert_eq!(seq.len(), 8);
        assert_eq!(seq.to_string(), "ACGTACGT");
    }

    #[test]
    fn test_reverse_complement() {
        let seq = NucleotideVec::try_from("AATT").unwrap();
        assert_eq!(seq.reverse_complement().to_string(), "AATT");
        let seq = NucleotideVec::try_from("CAATTG").unwrap();
        assert_eq!(seq.reverse_complement().to_string(), "CAATTG");
        let seq = NucleotideVec::try_from("ACCGT").unwrap();
        assert_eq!(seq.reverse_complement().to_string(), "ACGGT");
        assert_eq!(seq.reversed().to_string(), "TGCCA");
    }

    #[test]
    fn test_lossy_parse() {
        let seq = NucleotideVec::from_lossy("ANGT");
        assert_eq!(seq.to_string(), "AAGT");
    }
}
