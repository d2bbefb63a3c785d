
use std::fmt;

use df_thermo::Base;
use serde::Serialize;

use crate::decision::{Coord, Decision};
use crate::matrix::DuplexMatrix;

/// The aligned duplex as three text rows: reference on top (5'->3'),
/// the bond row ('|' match, 'x' mismatch, ' ' across bulges), and the
/// query at the bottom (3'->5'). Bulged-out positions show '-' on the
/// strand that has no base there.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct RenderedDuplex {
    pub top: String,
    pub bonds: String,
    pub bottom: String,
}

impl RenderedDuplex {
    pub fn is_empty(&self) -> bool {
        self.top.is_empty()
    }

    pub fn len(&self) -> usize {
        self.top.len()
    }
}

impl fmt::Display for RenderedDuplex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "5'- {} -3'", self.top)?;
        writeln!(f, "    {}", self.bonds)?;
        write!(f, "3'- {} -5'", self.bottom)
    }
}

/// Follow the decision chain backwards from `coord` until a Stop
/// sentinel, rendering one column per decision, then flip the columns
/// into 5'->3' order on the top strand.
///
/// The sequences must be the matrix-layout strands the matrix was
/// built from (query 3'->5').
pub fn print_duplex(
    matrix: &DuplexMatrix,
    coord: Coord,
    ref_seq: &[Base],
    query: &[Base],
) -> RenderedDuplex {
    let mut columns: Vec<(char, char, char)> = Vec::new();
    if coord.decision == Decision::Stop {
        return RenderedDuplex::default();
    }
    let mut coord = coord;
    loop {
        let record = *matrix.record(coord);
        debug_assert_eq!(record.current, coord.decision);
        let (step, column) = match coord.decision {
            Decision::Match => {
                ((1, 1), (char::from(ref_seq[coord.col]), '|', char::from(query[coord.row])))
            }
            Decision::Mismatch => {
                ((1, 1), (char::from(ref_seq[coord.col]), 'x', char::from(query[coord.row])))
            }
            Decision::TopBulge => {
                ((0, 1), (char::from(ref_seq[coord.col]), ' ', '-'))
            }
            Decision::BottomBulge => {
                ((1, 0), ('-', ' ', char::from(query[coord.row])))
            }
            Decision::Stop => break,
        };
        columns.push(column);
        if record.previous == Decision::Stop {
            break;
        }
        coord = Coord::new(coord.row - step.0, coord.col - step.1, record.previous);
    }
    columns.reverse();
    let mut rendered = RenderedDuplex::default();
    for (top, bond, bottom) in columns {
        rendered.top.push(top);
        rendered.bonds.push(bond);
        rendered.bottom.push(bottom);
    }
    rendered
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_render() {
        let matrix = DuplexMatrix::new(2, 2);
        let coord = Coord::new(0, 0, Decision::Stop);
        let rendered = print_duplex(&matrix, coord, &[], &[]);
        assert!(rendered.is_empty());
    }

    #[test]
    fn test_display_labels() {
        let rendered = RenderedDuplex {
            top: "ACGT".into(),
            bonds: "||||".into(),
            bottom: "TGCA".into(),
        };
        let text = rendered.to_string();
        assert!(text.starts_with("5'- ACGT -3'"));
        assert!(text.ends_with("3'- TGCA -5'"));
    }
}
