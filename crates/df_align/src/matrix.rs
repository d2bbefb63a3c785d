
use std::fmt::Write as _;
use std::ops::{Index, IndexMut};

use crate::decision::{Coord, Decision, DecisionRecord};

/// One matrix cell: the three concurrent decision slots. The stop slot
/// is materialized on the terminal boundary only.
#[derive(Clone, Copy, Debug)]
pub struct Cell {
    pub bind: DecisionRecord,
    pub top_bulge: DecisionRecord,
    pub bottom_bulge: DecisionRecord,
    pub stop: Option<DecisionRecord>,
}

impl Cell {
    pub const NULL: Cell = Cell {
        bind: DecisionRecord::NULL,
        top_bulge: DecisionRecord::NULL,
        bottom_bulge: DecisionRecord::NULL,
        stop: None,
    };

    /// The record holding the given decision: Match and Mismatch live
    /// in the bind slot, bulges in their own slots.
    pub fn record(&self, decision: Decision) -> &DecisionRecord {
        match decision {
            Decision::Match | Decision::Mismatch => &self.bind,
            Decision::TopBulge => &self.top_bulge,
            Decision::BottomBulge => &self.bottom_bulge,
            Decision::Stop => self.stop.as_ref().unwrap_or(&DecisionRecord::NULL),
        }
    }

    pub fn slots(&self) -> [&DecisionRecord; 3] {
        [&self.bind, &self.top_bulge, &self.bottom_bulge]
    }
}

/// The dynamic programming matrix of one alignment: a contiguous
/// row-major buffer of cells, |query| rows by |ref| columns. Row r,
/// column c scores the pairing of `query[r]` (3'->5' layout) against
/// `ref[c]` (5'->3').
#[derive(Clone, Debug)]
pub struct DuplexMatrix {
    nrow: usize,
    ncol: usize,
    cells: Vec<Cell>,
}

impl DuplexMatrix {
    pub fn new(nrow: usize, ncol: usize) -> Self {
        DuplexMatrix {
            nrow,
            ncol,
            cells: vec![Cell::NULL; nrow * ncol],
        }
    }

    pub fn nrow(&self) -> usize {
        self.nrow
    }

    pub fn ncol(&self) -> usize {
        self.ncol
    }

    /// True for cells scored with the terminal recurrences: the last
    /// row and the last column.
    pub fn is_terminal(&self, row: usize, col: usize) -> bool {
        row == self.nrow - 1 || col == self.ncol - 1
    }

    pub fn record(&self, coord: Coord) -> &DecisionRecord {
        self[(coord.row, coord.col)].record(coord.decision)
    }

    /// Debug rendering of one slot across the whole matrix, one line
    /// per row.
    pub fn slot_table(&self, decision: Decision) -> String {
        let mut out = String::new();
        for row in 0..self.nrow {
            for col in 0..self.ncol {
                let record = self[(row, col)].record(decision);
                let _ = write!(out, "{:>10.1}{}{} ", record.del_g, record.previous, record.current);
            }
            out.push('\n');
        }
        out
    }
}

impl Index<(usize, usize)> for DuplexMatrix {
    type Output = Cell;

    fn index(&self, (row, col): (usize, usize)) -> &Cell {
        debug_assert!(row < self.nrow && col < self.ncol);
        &self.cells[row * self.ncol + col]
    }
}

impl IndexMut<(usize, usize)> for DuplexMatrix {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut Cell {
        debug_assert!(row < self.nrow && col < self.ncol);
        &mut self.cells[row * self.ncol + col]
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_matrix_layout() {
        let m = DuplexMatrix::new(3, 5);
        assert_eq!(m.nrow(), 3);
        assert_eq!(m.ncol(), 5);
        assert!(m[(2, 4)].bind.is_null());
        assert!(m.is_terminal(2, 0));
        assert!(m.is_terminal(0, 4));
        assert!(!m.is_terminal(1, 2));
    }

    #[test]
    fn test_record_slot_mapping() {
        let mut cell = Cell::NULL;
        cell.bind.current = Decision::Match;
        cell.top_bulge.current = Decision::TopBulge;
        assert_eq!(cell.record(Decision::Match).current, Decision::Match);
        assert_eq!(cell.record(Decision::Mismatch).current, Decision::Match);
        assert_eq!(cell.record(Decision::TopBulge).current, Decision::TopBulge);
        assert!(cell.record(Decision::Stop).is_null());
    }

    #[test]
    fn test_slot_table_shape() {
        let m = DuplexMatrix::new(2, 2);
        let table = m.slot_table(Decision::Match);
        assert_eq!(table.lines().count(), 2);
    }
}
