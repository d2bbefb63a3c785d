
use std::fmt;

use crate::{Base, TermBase, SequenceError, BCOUNT, TCOUNT};

/// A nearest neighbor window of the duplex:
///
/// ```text
/// 5'- top5 top3 -3'
/// 3'- bottom3 bottom5 -5'
/// ```
///
/// The stacked pairs are (top5, bottom3) and (top3, bottom5). A window
/// prints in the literature key format, e.g. `AG/TC` for
/// 5'-AG-3' over 3'-TC-5'.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct Neighbour {
    pub top5: Base,
    pub top3: Base,
    pub bottom3: Base,
    pub bottom5: Base,
}

impl Neighbour {
    pub fn new(top5: Base, top3: Base, bottom3: Base, bottom5: Base) -> Self {
        Neighbour { top5, top3, bottom3, bottom5 }
    }

    /// Position in the dense internal table, base-4 over
    /// (top5, top3, bottom3, bottom5).
    pub fn index(&self) -> usize {
        ((self.top5 as usize * BCOUNT + self.top3 as usize) * BCOUNT
            + self.bottom3 as usize) * BCOUNT
            + self.bottom5 as usize
    }

    /// The same physical window read from the other strand
    /// (rotated by 180 degrees).
    pub fn rotated(&self) -> Neighbour {
        Neighbour {
            top5: self.bottom5,
            top3: self.bottom3,
            bottom3: self.top3,
            bottom5: self.top5,
        }
    }

    /// True if either stacked pair is A-T.
    pub fn has_at_pair(&self) -> bool {
        let at = |a: Base, b: Base| {
            matches!((a, b), (Base::A, Base::T) | (Base::T, Base::A))
        };
        at(self.top5, self.bottom3) || at(self.top3, self.bottom5)
    }
}

impl TryFrom<&str> for Neighbour {
    type Error = SequenceError;

    /// Parse a table key such as "AG/TC".
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        let chars: Vec<char> = s.chars().collect();
        if chars.len() != 5 || chars[2] != '/' {
            return Err(SequenceError::Plain(format!("bad neighbour key '{}'", s)));
        }
        Ok(Neighbour {
            top5: Base::try_from(chars[0])?,
            top3: Base::try_from(chars[1])?,
            bottom3: Base::try_from(chars[3])?,
            bottom5: Base::try_from(chars[4])?,
        })
    }
}

impl fmt::Display for Neighbour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}/{}{}", self.top5, self.top3, self.bottom3, self.bottom5)
    }
}


/// A nearest neighbor window at a duplex end, where either side may be
/// the "no base" symbol '.'. Used for the terminal mismatch and
/// dangling end tables.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct TerminalNeighbour {
    pub top5: TermBase,
    pub top3: TermBase,
    pub bottom3: TermBase,
    pub bottom5: TermBase,
}

impl TerminalNeighbour {
    pub fn new(top5: TermBase, top3: TermBase, bottom3: TermBase, bottom5: TermBase) -> Self {
        TerminalNeighbour { top5, top3, bottom3, bottom5 }
    }

    /// Position in the dense terminal tables, base-5 with '.' as digit 0.
    pub fn index(&self) -> usize {
        ((self.top5 as usize * TCOUNT + self.top3 as usize) * TCOUNT
            + self.bottom3 as usize) * TCOUNT
            + self.bottom5 as usize
    }

    pub fn rotated(&self) -> TerminalNeighbour {
        TerminalNeighbour {
            top5: self.bottom5,
            top3: self.bottom3,
            bottom3: self.top3,
            bottom5: self.top5,
        }
    }
}

impl From<Neighbour> for TerminalNeighbour {
    fn from(nn: Neighbour) -> Self {
        TerminalNeighbour {
            top5: nn.top5.into(),
            top3: nn.top3.into(),
            bottom3: nn.bottom3.into(),
            bottom5: nn.bottom5.into(),
        }
    }
}

impl TryFrom<&str> for TerminalNeighbour {
    type Error = SequenceError;

    /// Parse a table key such as "AA/.T" or ".A/GT".
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        let chars: Vec<char> = s.chars().collect();
        if chars.len() != 5 || chars[2] != '/' {
            return Err(SequenceError::Plain(format!("bad terminal key '{}'", s)));
        }
        Ok(TerminalNeighbour {
            top5: TermBase::try_from(chars[0])?,
            top3: TermBase::try_from(chars[1])?,
            bottom3: TermBase::try_from(chars[3])?,
            bottom5: TermBase::try_from(chars[4])?,
        })
    }
}

impl fmt::Display for TerminalNeighbour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}/{}{}", self.top5, self.top3, self.bottom3, self.bottom5)
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::Base::*;

    #[test]
    fn test_neighbour_key_roundtrip() {
        let nn = Neighbour::try_from("AG/TC").unwrap();
        assert_eq!(nn, Neighbour::new(A, G, T, C));
        assert_eq!(nn.to_string(), "AG/TC");
    }

    #[test]
    fn test_neighbour_index() {
        // AG/TT -> 0*64 + 2*16 + 3*4 + 3 = 47
        let nn = Neighbour::try_from("AG/TT").unwrap();
        assert_eq!(nn.index(), 47);
        assert_eq!(Neighbour::new(A, A, A, A).index(), 0);
        assert_eq!(Neighbour::new(T, T, T, T).index(), 255);
    }

    #[test]
    fn test_neighbour_rotation() {
        let nn = Neighbour::try_from("AA/TT").unwrap();
        assert_eq!(nn.rotated().to_string(), "TT/AA");
        // AT/TA is its own rotation.
        let nn = Neighbour::try_from("AT/TA").unwrap();
        assert_eq!(nn.rotated(), nn);
    }

    #[test]
    fn test_at_pair_detection() {
        assert!(Neighbour::try_from("AG/TC").unwrap().has_at_pair());
        assert!(!Neighbour::try_from("GG/CC").unwrap().has_at_pair());
        assert!(Neighbour::try_from("CT/GA").unwrap().has_at_pair());
    }

    #[test]
    fn test_terminal_key_roundtrip() {
        let nn = TerminalNeighbour::try_from("AA/.T").unwrap();
        assert_eq!(nn.bottom3, crate::TermBase::Dot);
        assert_eq!(nn.to_string(), "AA/.T");
        // rotation moves the dot across the diagonal
        assert_eq!(nn.rotated().to_string(), "T./AA");
    }

    #[test]
    fn test_terminal_index() {
        // AA/TA -> 1*125 + 1*25 + 4*5 + 1 = 171
        let nn = TerminalNeighbour::try_from("AA/TA").unwrap();
        assert_eq!(nn.index(), 171);
        let dot = TerminalNeighbour::try_from("../..").unwrap();
        assert_eq!(dot.index(), 0);
    }
}
