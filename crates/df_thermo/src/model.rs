
use crate::condition::{ReactionCondition, T37};
use crate::tables::{
    INTERNAL_NN, TERMINAL_NN, DANGLING_NN, INITIATION, TERMINAL_AT,
    INTERNAL_LOOP_DG37, BULGE_LOOP_DG37, ThermParam,
};
use crate::{Base, Neighbour, TerminalNeighbour};

/// Gas constant in cal/(mol K).
pub const GAS_CONSTANT: f64 = 1.987;

/// Jacobson-Stockmayer coefficient for logarithmic loop extrapolation.
const LOOP_EXTENSION: f64 = 2.44;

/// The unified SantaLucia nearest neighbor model.
///
/// All free energies are returned in cal/mol, evaluated at the reaction
/// temperature as dG = dH * 1000 - T * dS. Loop penalties are treated
/// as purely entropic, so they scale linearly with the absolute
/// temperature relative to the tabulated 37 C values.
#[derive(Clone, Copy, Debug)]
pub struct SantaLucia {
    condition: ReactionCondition,
}

impl SantaLucia {
    pub fn new(condition: ReactionCondition) -> Self {
        SantaLucia { condition }
    }

    pub fn condition(&self) -> ReactionCondition {
        self.condition
    }

    fn del_g(&self, param: ThermParam) -> f64 {
        param.delta_h * 1000.0
            - self.condition.absolute_temperature() * param.delta_s
    }

    /// Stacking free energy of an internal window: canonical matches
    /// and internal mismatches come from the same table. Windows with
    /// no published parameters (double mismatches) contribute nothing.
    pub fn delg_internal(&self, nn: Neighbour) -> f64 {
        self.del_g(INTERNAL_NN[nn.index()].unwrap_or(ThermParam::ZERO))
    }

    /// Free energy of a terminal mismatch window at a duplex end.
    pub fn delg_terminal(&self, nn: TerminalNeighbour) -> f64 {
        self.del_g(TERMINAL_NN[nn.index()].unwrap_or(ThermParam::ZERO))
    }

    /// Free energy of a dangling end window ('.' on the missing side).
    pub fn delg_dangling(&self, nn: TerminalNeighbour) -> f64 {
        self.del_g(DANGLING_NN[nn.index()].unwrap_or(ThermParam::ZERO))
    }

    /// Duplex initiation penalty for one end, keyed by the terminal
    /// pair: G/C ends use init_GC, A/T ends use init_AT.
    pub fn init_delg(&self, base: Base) -> f64 {
        let param = if base.is_gc() {
            INITIATION.init_gc
        } else {
            INITIATION.init_at
        };
        self.del_g(param)
    }

    /// Penalty for an A-T pair closing a helix end.
    pub fn terminal_at_delg(&self) -> f64 {
        self.del_g(TERMINAL_AT)
    }

    /// Look up a loop table value for total size `n`, extrapolating
    /// logarithmically from the largest tabulated size at or below `n`.
    /// Returns kcal/mol at 37 C.
    fn loop_dg37(table: &[(usize, f64)], n: usize) -> f64 {
        debug_assert!(n >= table[0].0, "loop size {} below table range", n);
        match table.binary_search_by_key(&n, |&(size, _)| size) {
            Ok(i) => table[i].1,
            Err(i) => {
                let (base_n, base_g) = table[i - 1];
                base_g
                    + LOOP_EXTENSION * (GAS_CONSTANT / 1000.0) * T37
                        * (n as f64 / base_n as f64).ln()
            }
        }
    }

    /// Rescale an entropic 37 C penalty (kcal/mol) to the reaction
    /// temperature, in cal/mol.
    fn scale_loop(&self, dg37_kcal: f64) -> f64 {
        dg37_kcal * 1000.0 * self.condition.absolute_temperature() / T37
    }

    /// Free energy of an internal loop with `top_len` unpaired bases on
    /// the top strand and `bottom_len` on the bottom strand. The size
    /// penalty depends on the total loop size; asymmetric loops pay an
    /// extra 0.3 kcal/mol per unit of asymmetry, capped at 3.0.
    pub fn internal_loop_score(&self, top_len: usize, bottom_len: usize) -> f64 {
        debug_assert!(top_len >= 1 && bottom_len >= 1);
        let n = top_len + bottom_len;
        let asymmetry = (0.3 * top_len.abs_diff(bottom_len) as f64).min(3.0);
        self.scale_loop(Self::loop_dg37(INTERNAL_LOOP_DG37, n) + asymmetry)
    }

    /// Free energy of a bulge loop of the given length. The size-1
    /// entry is the bare bulge penalty; the flanking stack and A-T
    /// closing terms are added by [size_1_bulge].
    ///
    /// [size_1_bulge]: SantaLucia::size_1_bulge
    pub fn bulge_score(&self, len: usize) -> f64 {
        debug_assert!(len >= 1);
        self.scale_loop(Self::loop_dg37(BULGE_LOOP_DG37, len))
    }

    /// Full free energy of a single-base bulge: the intervening stack
    /// of the flanking pairs, the size-1 bulge penalty, and the A-T
    /// closing penalty when either flanking pair is A-T.
    pub fn size_1_bulge(&self, flanking: Neighbour) -> f64 {
        let at = if flanking.has_at_pair() {
            self.terminal_at_delg()
        } else {
            0.0
        };
        self.delg_internal(flanking) + self.bulge_score(1) + at
    }
}
