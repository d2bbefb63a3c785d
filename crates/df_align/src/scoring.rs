
use df_thermo::{Base, Neighbour, SantaLucia, TermBase, TerminalNeighbour};

use crate::decision::{Decision, DecisionRecord};
use crate::matrix::DuplexMatrix;

/// The scoring kernel of one alignment: the two strands in matrix
/// layout (reference 5'->3', query 3'->5') plus the energy model.
///
/// Each scoring routine reads exactly one predecessor cell, evaluates
/// every legal continuation of its slot and returns the lowest free
/// energy record. A record's `del_g` always includes the penalty of its
/// currently open loop or bulge, so reshaping a loop first subtracts
/// the predecessor's accumulated penalty (see [open_penalty]) and then
/// adds the penalty of the new shape.
///
/// [open_penalty]: DuplexAligner::open_penalty
pub struct DuplexAligner<'a> {
    pub(crate) ref_seq: &'a [Base],
    pub(crate) query: &'a [Base],
    pub(crate) model: &'a SantaLucia,
}

impl<'a> DuplexAligner<'a> {
    pub fn new(ref_seq: &'a [Base], query: &'a [Base], model: &'a SantaLucia) -> Self {
        DuplexAligner { ref_seq, query, model }
    }

    /// The stacking window of the diagonal step into (row, col):
    ///
    /// ```text
    /// 5'- ref[col-1]   ref[col]   -3'
    /// 3'- query[row-1] query[row] -5'
    /// ```
    fn window(&self, row: usize, col: usize) -> Neighbour {
        Neighbour::new(
            self.ref_seq[col - 1],
            self.ref_seq[col],
            self.query[row - 1],
            self.query[row],
        )
    }

    /// The intervening stack bridging a size-1 top bulge at (row, col):
    /// the bulged reference base sits between two stacked pairs.
    fn flank_top(&self, row: usize, col: usize) -> Neighbour {
        Neighbour::new(
            self.ref_seq[col - 1],
            self.ref_seq[col + 1],
            self.query[row],
            self.query[row + 1],
        )
    }

    /// The intervening stack bridging a size-1 bottom bulge at (row, col).
    fn flank_bottom(&self, row: usize, col: usize) -> Neighbour {
        Neighbour::new(
            self.ref_seq[col],
            self.ref_seq[col + 1],
            self.query[row - 1],
            self.query[row + 1],
        )
    }

    /// The loop or bulge penalty already accumulated in `record`, which
    /// lives at (row, col). Subtracting this before adding the penalty
    /// of the reshaped loop keeps every `del_g` exact.
    ///
    /// A seed mismatch contributed no stacking term, so it has nothing
    /// to back out.
    fn open_penalty(&self, record: &DecisionRecord, row: usize, col: usize) -> f64 {
        let (t, b) = (record.top_loop_len, record.bottom_loop_len);
        match record.current {
            Decision::Match | Decision::Stop => 0.0,
            Decision::Mismatch => {
                if (t, b) == (1, 1) {
                    if row >= 1 && col >= 1 {
                        self.model.delg_internal(self.window(row, col))
                    } else {
                        0.0
                    }
                } else {
                    self.model.internal_loop_score(t, b)
                }
            }
            Decision::TopBulge => {
                if b >= 1 {
                    self.model.internal_loop_score(t, b)
                } else if t == 1 {
                    self.model.size_1_bulge(self.flank_top(row, col))
                } else {
                    self.model.bulge_score(t)
                }
            }
            Decision::BottomBulge => {
                if t >= 1 {
                    self.model.internal_loop_score(t, b)
                } else if b == 1 {
                    self.model.size_1_bulge(self.flank_bottom(row, col))
                } else {
                    self.model.bulge_score(b)
                }
            }
        }
    }

    /// All legal continuations of the bind slot at (row, col). The
    /// predecessor is the diagonal cell; a bind can continue from its
    /// bind, top bulge or bottom bulge slot.
    fn bind_candidates(&self, matrix: &DuplexMatrix, row: usize, col: usize) -> Vec<DecisionRecord> {
        let (pr, pc) = (row - 1, col - 1);
        let prev = &matrix[(pr, pc)];
        let current = if self.query[row].pairs_with(self.ref_seq[col]) {
            Decision::Match
        } else {
            Decision::Mismatch
        };
        let mut candidates = Vec::with_capacity(3);

        // From the previous binding. A previous match simply zips on
        // the stacking window. A previous mismatch either zips (it was
        // scored as an internal mismatch stack), closes a loop, or
        // grows into a loop.
        let pb = &prev.bind;
        debug_assert!(!pb.is_null());
        let record = match (pb.current, current) {
            (Decision::Match, _) => {
                let len = if current == Decision::Match { 0 } else { 1 };
                DecisionRecord {
                    del_g: pb.del_g + self.model.delg_internal(self.window(row, col)),
                    previous: Decision::Match,
                    current,
                    top_loop_len: len,
                    bottom_loop_len: len,
                }
            }
            (Decision::Mismatch, Decision::Match) => {
                let del_g = if (pb.top_loop_len, pb.bottom_loop_len) == (1, 1) {
                    // an isolated mismatch zips like a stack
                    pb.del_g + self.model.delg_internal(self.window(row, col))
                } else {
                    // the loop penalty already assumed this closing match
                    pb.del_g
                };
                DecisionRecord {
                    del_g,
                    previous: Decision::Mismatch,
                    current,
                    top_loop_len: 0,
                    bottom_loop_len: 0,
                }
            }
            (Decision::Mismatch, _) => {
                // another unpaired column on both strands: reshape into
                // (or grow) an internal loop
                let (t, b) = (pb.top_loop_len + 1, pb.bottom_loop_len + 1);
                DecisionRecord {
                    del_g: pb.del_g - self.open_penalty(pb, pr, pc)
                        + self.model.internal_loop_score(t, b),
                    previous: Decision::Mismatch,
                    current,
                    top_loop_len: t,
                    bottom_loop_len: b,
                }
            }
            _ => unreachable!("bind slot holds Match or Mismatch"),
        };
        candidates.push(record);

        // From a previous bulge: a closing match was already assumed by
        // the bulge penalty, so it carries over unchanged; a mismatch
        // instead reshapes the bulge into an internal loop.
        for (slot, tag) in [
            (&prev.top_bulge, Decision::TopBulge),
            (&prev.bottom_bulge, Decision::BottomBulge),
        ] {
            if slot.is_null() {
                continue;
            }
            let record = if current == Decision::Match {
                DecisionRecord {
                    del_g: slot.del_g,
                    previous: tag,
                    current,
                    top_loop_len: 0,
                    bottom_loop_len: 0,
                }
            } else {
                let (t, b) = (slot.top_loop_len + 1, slot.bottom_loop_len + 1);
                DecisionRecord {
                    del_g: slot.del_g - self.open_penalty(slot, pr, pc)
                        + self.model.internal_loop_score(t, b),
                    previous: tag,
                    current,
                    top_loop_len: t,
                    bottom_loop_len: b,
                }
            };
            candidates.push(record);
        }
        candidates
    }

    /// All legal continuations of the top bulge slot at (row, col):
    /// from the left cell's bind slot (opening a bulge or growing a
    /// loop sideways) or its top bulge slot (extending the bulge).
    fn top_bulge_candidates(
        &self,
        matrix: &DuplexMatrix,
        row: usize,
        col: usize,
    ) -> Vec<DecisionRecord> {
        let (pr, pc) = (row, col - 1);
        let prev = &matrix[(pr, pc)];
        let mut candidates = Vec::with_capacity(2);

        let pb = &prev.bind;
        debug_assert!(!pb.is_null());
        match pb.current {
            Decision::Match => {
                // a size-1 bulge needs the closing pair beyond it
                if col + 1 < self.ref_seq.len() && row + 1 < self.query.len() {
                    candidates.push(DecisionRecord {
                        del_g: pb.del_g + self.model.size_1_bulge(self.flank_top(row, col)),
                        previous: Decision::Match,
                        current: Decision::TopBulge,
                        top_loop_len: 1,
                        bottom_loop_len: 0,
                    });
                }
            }
            Decision::Mismatch => {
                // one more unpaired reference base: the mismatch run
                // becomes (or grows) an internal loop on the top side
                let (t, b) = (pb.top_loop_len + 1, pb.bottom_loop_len);
                candidates.push(DecisionRecord {
                    del_g: pb.del_g - self.open_penalty(pb, pr, pc)
                        + self.model.internal_loop_score(t, b),
                    previous: Decision::Mismatch,
                    current: Decision::TopBulge,
                    top_loop_len: t,
                    bottom_loop_len: b,
                });
            }
            _ => unreachable!("bind slot holds Match or Mismatch"),
        }

        let ptb = &prev.top_bulge;
        if !ptb.is_null() {
            // growing past size 1 backs out the intervening stack and
            // switches to generic bulge scoring; open_penalty reads the
            // flank the size-1 record was created with, whose bounds
            // were checked at creation
            let t = ptb.top_loop_len + 1;
            let b = ptb.bottom_loop_len;
            let penalty = if b >= 1 {
                self.model.internal_loop_score(t, b)
            } else {
                self.model.bulge_score(t)
            };
            candidates.push(DecisionRecord {
                del_g: ptb.del_g - self.open_penalty(ptb, pr, pc) + penalty,
                previous: Decision::TopBulge,
                current: Decision::TopBulge,
                top_loop_len: t,
                bottom_loop_len: b,
            });
        }
        candidates
    }

    /// All legal continuations of the bottom bulge slot at (row, col),
    /// the mirror image of [top_bulge_candidates] reading the cell
    /// above.
    ///
    /// [top_bulge_candidates]: DuplexAligner::top_bulge_candidates
    fn bottom_bulge_candidates(
        &self,
        matrix: &DuplexMatrix,
        row: usize,
        col: usize,
    ) -> Vec<DecisionRecord> {
        let (pr, pc) = (row - 1, col);
        let prev = &matrix[(pr, pc)];
        let mut candidates = Vec::with_capacity(2);

        let pb = &prev.bind;
        debug_assert!(!pb.is_null());
        match pb.current {
            Decision::Match => {
                if col + 1 < self.ref_seq.len() && row + 1 < self.query.len() {
                    candidates.push(DecisionRecord {
                        del_g: pb.del_g + self.model.size_1_bulge(self.flank_bottom(row, col)),
                        previous: Decision::Match,
                        current: Decision::BottomBulge,
                        top_loop_len: 0,
                        bottom_loop_len: 1,
                    });
                }
            }
            Decision::Mismatch => {
                let (t, b) = (pb.top_loop_len, pb.bottom_loop_len + 1);
                candidates.push(DecisionRecord {
                    del_g: pb.del_g - self.open_penalty(pb, pr, pc)
                        + self.model.internal_loop_score(t, b),
                    previous: Decision::Mismatch,
                    current: Decision::BottomBulge,
                    top_loop_len: t,
                    bottom_loop_len: b,
                });
            }
            _ => unreachable!("bind slot holds Match or Mismatch"),
        }

        let pbb = &prev.bottom_bulge;
        if !pbb.is_null() {
            let t = pbb.top_loop_len;
            let b = pbb.bottom_loop_len + 1;
            let penalty = if t >= 1 {
                self.model.internal_loop_score(t, b)
            } else {
                self.model.bulge_score(b)
            };
            candidates.push(DecisionRecord {
                del_g: pbb.del_g - self.open_penalty(pbb, pr, pc) + penalty,
                previous: Decision::BottomBulge,
                current: Decision::BottomBulge,
                top_loop_len: t,
                bottom_loop_len: b,
            });
        }
        candidates
    }

    pub(crate) fn score_bind(&self, matrix: &DuplexMatrix, row: usize, col: usize) -> DecisionRecord {
        DecisionRecord::best(self.bind_candidates(matrix, row, col))
    }

    pub(crate) fn score_top_bulge(
        &self,
        matrix: &DuplexMatrix,
        row: usize,
        col: usize,
    ) -> DecisionRecord {
        let candidates = self.top_bulge_candidates(matrix, row, col);
        if candidates.is_empty() {
            DecisionRecord::NULL
        } else {
            DecisionRecord::best(candidates)
        }
    }

    pub(crate) fn score_bottom_bulge(
        &self,
        matrix: &DuplexMatrix,
        row: usize,
        col: usize,
    ) -> DecisionRecord {
        let candidates = self.bottom_bulge_candidates(matrix, row, col);
        if candidates.is_empty() {
            DecisionRecord::NULL
        } else {
            DecisionRecord::best(candidates)
        }
    }

    /// The dangling end contribution of a duplex ending at (row, col)
    /// with a closing match: whichever strand is not exhausted
    /// overhangs by one base. Blunt ends contribute nothing.
    fn terminal_dangle(&self, row: usize, col: usize) -> f64 {
        let last_row = row == self.query.len() - 1;
        let last_col = col == self.ref_seq.len() - 1;
        if last_col && !last_row {
            self.model.delg_dangling(TerminalNeighbour::new(
                self.ref_seq[col].into(),
                TermBase::Dot,
                self.query[row].into(),
                self.query[row + 1].into(),
            ))
        } else if last_row && !last_col {
            self.model.delg_dangling(TerminalNeighbour::new(
                self.ref_seq[col].into(),
                self.ref_seq[col + 1].into(),
                self.query[row].into(),
                TermBase::Dot,
            ))
        } else {
            0.0
        }
    }

    /// Termination contribution for one bind candidate on the terminal
    /// boundary. A closing match gains the initiation of its own pair
    /// plus a dangling end; an isolated closing mismatch is rescored
    /// from the terminal mismatch table and takes the initiation of the
    /// preceding matched pair. A loop cannot close a duplex, so loop
    /// shaped candidates pass through untouched.
    fn terminal_bind_extras(&self, mut record: DecisionRecord, row: usize, col: usize) -> DecisionRecord {
        match record.current {
            Decision::Match => {
                record.del_g += self.model.init_delg(self.ref_seq[col])
                    + self.terminal_dangle(row, col);
            }
            Decision::Mismatch
                if (record.top_loop_len, record.bottom_loop_len) == (1, 1) =>
            {
                let window = self.window(row, col);
                record.del_g += -self.model.delg_internal(window)
                    + self.model.delg_terminal(window.into())
                    + self.model.init_delg(self.ref_seq[col - 1]);
            }
            _ => {}
        }
        record
    }

    /// The bind slot of a cell in the last row or last column: every
    /// interior continuation, closed off with the terminal extras.
    pub(crate) fn score_bind_terminal(
        &self,
        matrix: &DuplexMatrix,
        row: usize,
        col: usize,
    ) -> DecisionRecord {
        let candidates: Vec<DecisionRecord> = self
            .bind_candidates(matrix, row, col)
            .into_iter()
            .map(|record| self.terminal_bind_extras(record, row, col))
            .collect();
        DecisionRecord::best(candidates)
    }

    /// Explicit termination at (row, col): the best slot of the
    /// diagonal predecessor carried through unchanged. Materialized on
    /// the terminal boundary only.
    pub(crate) fn score_stop(&self, matrix: &DuplexMatrix, row: usize, col: usize) -> DecisionRecord {
        let prev = &matrix[(row - 1, col - 1)];
        let mut candidates = vec![DecisionRecord {
            del_g: prev.bind.del_g,
            previous: prev.bind.current,
            current: Decision::Stop,
            top_loop_len: 0,
            bottom_loop_len: 0,
        }];
        for (slot, tag) in [
            (&prev.top_bulge, Decision::TopBulge),
            (&prev.bottom_bulge, Decision::BottomBulge),
        ] {
            if !slot.is_null() {
                candidates.push(DecisionRecord {
                    del_g: slot.del_g,
                    previous: tag,
                    current: Decision::Stop,
                    top_loop_len: 0,
                    bottom_loop_len: 0,
                });
            }
        }
        DecisionRecord::best(candidates)
    }
}
