
use df_thermo::{TermBase, TerminalNeighbour};
use log::debug;

use crate::decision::{Coord, Decision, DecisionRecord};
use crate::matrix::{Cell, DuplexMatrix};
use crate::scoring::DuplexAligner;

impl DuplexAligner<'_> {
    /// Allocate and seed the matrix: cell (0, 0) carries the bare
    /// initiation, the rest of row 0 and column 0 pick up a dangling
    /// end where the first pair matches. Bulge slots of seed cells stay
    /// null.
    pub fn initialise_duplex_matrix(&self) -> DuplexMatrix {
        let nrow = self.query.len();
        let ncol = self.ref_seq.len();
        let mut matrix = DuplexMatrix::new(nrow, ncol);
        matrix[(0, 0)] = self.first_cell();
        for col in 1..ncol {
            matrix[(0, col)] = self.seed_row_cell(col);
        }
        for row in 1..nrow {
            matrix[(row, 0)] = self.seed_col_cell(row);
        }
        matrix
    }

    fn seed_bind(&self, paired: bool, del_g: f64) -> DecisionRecord {
        if paired {
            DecisionRecord {
                del_g,
                previous: Decision::Stop,
                current: Decision::Match,
                top_loop_len: 0,
                bottom_loop_len: 0,
            }
        } else {
            // no initiation without a matched first pair
            DecisionRecord {
                del_g: 0.0,
                previous: Decision::Stop,
                current: Decision::Mismatch,
                top_loop_len: 1,
                bottom_loop_len: 1,
            }
        }
    }

    fn first_cell(&self) -> Cell {
        let paired = self.query[0].pairs_with(self.ref_seq[0]);
        let del_g = self.model.init_delg(self.ref_seq[0]);
        Cell {
            bind: self.seed_bind(paired, del_g),
            ..Cell::NULL
        }
    }

    /// A row-0 seed: the alignment starts at `ref[col]`, with
    /// `ref[col-1]` as a 5' dangling base on the top strand.
    fn seed_row_cell(&self, col: usize) -> Cell {
        let paired = self.query[0].pairs_with(self.ref_seq[col]);
        let window = TerminalNeighbour::new(
            self.ref_seq[col - 1].into(),
            self.ref_seq[col].into(),
            TermBase::Dot,
            self.query[0].into(),
        );
        let del_g = self.model.delg_dangling(window) + self.model.init_delg(self.ref_seq[col]);
        Cell {
            bind: self.seed_bind(paired, del_g),
            ..Cell::NULL
        }
    }

    /// A column-0 seed: the alignment starts at `query[row]`, with
    /// `query[row-1]` as a dangling base on the bottom strand.
    fn seed_col_cell(&self, row: usize) -> Cell {
        let paired = self.query[row].pairs_with(self.ref_seq[0]);
        let window = TerminalNeighbour::new(
            TermBase::Dot,
            self.ref_seq[0].into(),
            self.query[row - 1].into(),
            self.query[row].into(),
        );
        let del_g = self.model.delg_dangling(window) + self.model.init_delg(self.ref_seq[0]);
        Cell {
            bind: self.seed_bind(paired, del_g),
            ..Cell::NULL
        }
    }

    fn compute_entry(&self, matrix: &DuplexMatrix, row: usize, col: usize) -> Cell {
        Cell {
            bind: self.score_bind(matrix, row, col),
            top_bulge: self.score_top_bulge(matrix, row, col),
            bottom_bulge: self.score_bottom_bulge(matrix, row, col),
            stop: None,
        }
    }

    fn compute_last_entry(&self, matrix: &DuplexMatrix, row: usize, col: usize) -> Cell {
        Cell {
            bind: self.score_bind_terminal(matrix, row, col),
            top_bulge: self.score_top_bulge(matrix, row, col),
            bottom_bulge: self.score_bottom_bulge(matrix, row, col),
            stop: Some(self.score_stop(matrix, row, col)),
        }
    }

    /// Seed and fill the whole matrix. The row-major sweep satisfies
    /// every cell's dependencies (diagonal, left, up); cells on the
    /// last row or column take the terminal recurrences.
    pub fn complete_duplex_matrix(&self) -> DuplexMatrix {
        let mut matrix = self.initialise_duplex_matrix();
        for row in 1..matrix.nrow() {
            for col in 1..matrix.ncol() {
                let cell = if matrix.is_terminal(row, col) {
                    self.compute_last_entry(&matrix, row, col)
                } else {
                    self.compute_entry(&matrix, row, col)
                };
                matrix[(row, col)] = cell;
            }
        }
        matrix
    }

    /// The coordinate of the lowest free energy decision on the
    /// terminal boundary: the last column top to bottom, then the last
    /// row left to right. Among ties the bottom-rightmost wins; when
    /// nothing scores below zero the seed Stop coordinate stands.
    pub fn find_best_decision_coord(&self, matrix: &DuplexMatrix) -> Coord {
        let nrow = matrix.nrow();
        let ncol = matrix.ncol();
        let mut best = Coord::new(0, 0, Decision::Stop);
        let mut lowest = 0.0;
        let mut consider = |record: &DecisionRecord, row: usize, col: usize| {
            if record.del_g < 0.0 && record.del_g <= lowest {
                lowest = record.del_g;
                best = Coord::new(row, col, record.current);
            }
        };
        for row in 0..nrow - 1 {
            for record in matrix[(row, ncol - 1)].slots() {
                consider(record, row, ncol - 1);
            }
        }
        for col in 0..ncol {
            for record in matrix[(nrow - 1, col)].slots() {
                consider(record, nrow - 1, col);
            }
        }
        debug!("best decision {} at ({}, {}), delG = {:.1} cal/mol",
            best.decision, best.row, best.col, lowest);
        best
    }
}
