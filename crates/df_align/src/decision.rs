
use std::fmt;

use serde::Serialize;

/// The decision taken at one matrix cell. `Stop` is the sentinel state
/// of seed records and of explicit termination; nothing continues from
/// a stop.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize)]
pub enum Decision {
    Match,
    Mismatch,
    TopBulge,
    BottomBulge,
    Stop,
}

impl From<Decision> for char {
    fn from(d: Decision) -> Self {
        match d {
            Decision::Match => 'M',
            Decision::Mismatch => 'X',
            Decision::TopBulge => 'T',
            Decision::BottomBulge => 'B',
            Decision::Stop => 'S',
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", char::from(*self))
    }
}

/// The best scored way of being in one decision state at one cell.
///
/// `previous` names the slot of the predecessor cell this record
/// continues from; it always equals that record's `current`. The loop
/// lengths count unpaired bases of the currently open loop or bulge:
/// both zero for a match, both one for an isolated mismatch, and for a
/// bulge record the bulged strand counts while the other stays zero
/// until an internal loop transition.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DecisionRecord {
    pub del_g: f64,
    pub previous: Decision,
    pub current: Decision,
    pub top_loop_len: usize,
    pub bottom_loop_len: usize,
}

impl DecisionRecord {
    /// The inert seed record: nothing has happened here.
    pub const NULL: DecisionRecord = DecisionRecord {
        del_g: 0.0,
        previous: Decision::Stop,
        current: Decision::Stop,
        top_loop_len: 0,
        bottom_loop_len: 0,
    };

    pub fn is_null(&self) -> bool {
        self.current == Decision::Stop && self.previous == Decision::Stop
    }

    /// Lowest free energy record of a non-empty candidate list. Ties
    /// keep the earliest candidate.
    pub fn best(records: impl IntoIterator<Item = DecisionRecord>) -> DecisionRecord {
        let mut iter = records.into_iter();
        let mut best = iter.next().expect("at least one candidate record");
        for record in iter {
            if record.del_g < best.del_g {
                best = record;
            }
        }
        best
    }
}

impl fmt::Display for DecisionRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:>9.1} {}{} ({},{})",
            self.del_g, self.previous, self.current,
            self.top_loop_len, self.bottom_loop_len
        )
    }
}

/// The coordinate of one decision in the matrix.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub struct Coord {
    pub row: usize,
    pub col: usize,
    pub decision: Decision,
}

impl Coord {
    pub fn new(row: usize, col: usize, decision: Decision) -> Self {
        Coord { row, col, decision }
    }
}
