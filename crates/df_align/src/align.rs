
use df_thermo::{NucleotideVec, ReactionCondition, SantaLucia};
use log::warn;
use serde::Serialize;

use crate::decision::{Coord, Decision};
use crate::error::AlignError;
use crate::matrix::DuplexMatrix;
use crate::scoring::DuplexAligner;
use crate::traceback::{print_duplex, RenderedDuplex};

/// The outcome of one pairwise duplex prediction: the minimum free
/// energy in cal/mol, the terminal coordinate it was found at, and the
/// traced alignment.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AlignmentResult {
    pub del_g: f64,
    pub coord: Coord,
    pub rendered: RenderedDuplex,
}

impl AlignmentResult {
    fn empty() -> Self {
        AlignmentResult {
            del_g: 0.0,
            coord: Coord::new(0, 0, Decision::Stop),
            rendered: RenderedDuplex::default(),
        }
    }
}

fn normalise(
    ref_str: &str,
    query_str: &str,
) -> Result<(NucleotideVec, NucleotideVec), AlignError> {
    let ref_seq = NucleotideVec::try_from(ref_str)?;
    // both strands arrive 5'->3'; the matrix lays the query out 3'->5'
    let query = NucleotideVec::try_from(query_str)?.reversed();
    Ok((ref_seq, query))
}

/// Predict the most favourable hybridization between two strands, both
/// written 5'->3'. The nearest neighbor model needs at least two bases
/// on each strand; shorter input yields the empty result (delG = 0).
pub fn align_duplex(
    ref_str: &str,
    query_str: &str,
    condition: ReactionCondition,
) -> Result<AlignmentResult, AlignError> {
    let (ref_seq, query) = normalise(ref_str, query_str)?;
    if ref_seq.len() < 2 || query.len() < 2 {
        warn!("sequences below the nearest neighbor minimum of 2 bases");
        return Ok(AlignmentResult::empty());
    }
    let model = SantaLucia::new(condition);
    let aligner = DuplexAligner::new(&ref_seq, &query, &model);
    let matrix = aligner.complete_duplex_matrix();
    let coord = aligner.find_best_decision_coord(&matrix);
    let rendered = print_duplex(&matrix, coord, &ref_seq, &query);
    let del_g = if rendered.is_empty() {
        0.0
    } else {
        matrix.record(coord).del_g
    };
    Ok(AlignmentResult { del_g, coord, rendered })
}

/// The filled DP matrix of one alignment, for inspection and
/// visualisation. Row r, column c scores `query[r]` (3'->5' layout)
/// against `ref[c]`. Unlike [align_duplex], which reports the empty
/// result for sub-minimal input, there is no matrix worth inspecting
/// below 2 bases per strand, so that case is an [AlignError::EmptyInput].
pub fn duplex_matrix(
    ref_str: &str,
    query_str: &str,
    condition: ReactionCondition,
) -> Result<DuplexMatrix, AlignError> {
    let (ref_seq, query) = normalise(ref_str, query_str)?;
    if ref_seq.len() < 2 || query.len() < 2 {
        return Err(AlignError::EmptyInput);
    }
    let model = SantaLucia::new(condition);
    let aligner = DuplexAligner::new(&ref_seq, &query, &model);
    Ok(aligner.complete_duplex_matrix())
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::decision::Decision;

    fn at37(ref_str: &str, query_str: &str) -> AlignmentResult {
        align_duplex(ref_str, query_str, ReactionCondition::default()).unwrap()
    }

    #[test]
    fn test_perfect_self_complement() {
        // AATT is its own reverse complement; the full duplex scores
        // 2 * init_AT + AA/TT + AT/TA + TT/AA.
        let result = at37("AATT", "AATT");
        assert!((result.del_g + 845.51).abs() < 0.1, "delG = {}", result.del_g);
        assert_eq!(result.rendered.top, "AATT");
        assert_eq!(result.rendered.bonds, "||||");
        assert_eq!(result.rendered.bottom, "TTAA");
        assert_eq!(result.coord, Coord::new(3, 3, Decision::Match));
    }

    #[test]
    fn test_single_internal_mismatch() {
        // the central G.G pair cannot bind; both flanking stacks come
        // from the internal mismatch table (AG/TG and its rotation)
        let result = at37("AAGTT", "AAGTT");
        assert!((result.del_g + 279.72).abs() < 0.1, "delG = {}", result.del_g);
        assert_eq!(result.rendered.top, "AAGTT");
        assert_eq!(result.rendered.bonds, "||x||");
        assert_eq!(result.rendered.bottom, "TTGAA");
        let matrix = duplex_matrix("AAGTT", "AAGTT", ReactionCondition::default()).unwrap();
        let record = matrix.record(Coord::new(2, 2, Decision::Mismatch));
        assert_eq!(record.current, Decision::Mismatch);
        assert_eq!((record.top_loop_len, record.bottom_loop_len), (1, 1));
    }

    #[test]
    fn test_single_top_bulge() {
        // the unpaired reference A bulges out between two GC helices
        let result = at37("GCGCAGCGC", "GCGCGCGC");
        assert!((result.del_g + 9484.28).abs() < 0.5, "delG = {}", result.del_g);
        assert_eq!(result.rendered.top, "GCGCAGCGC");
        assert_eq!(result.rendered.bonds, "|||| ||||");
        assert_eq!(result.rendered.bottom, "CGCG-CGCG");
    }

    #[test]
    fn test_single_bottom_bulge() {
        let result = at37("GCGCGCGC", "GCGCAGCGC");
        assert!((result.del_g + 9484.28).abs() < 0.5, "delG = {}", result.del_g);
        assert_eq!(result.rendered.top, "GCGC-GCGC");
        assert_eq!(result.rendered.bonds, "|||| ||||");
        assert_eq!(result.rendered.bottom, "CGCGACGCG");
    }

    #[test]
    fn test_asymmetric_internal_loop() {
        // two unpaired reference bases against one unpaired query base
        // force a 2x1 internal loop (size penalty plus asymmetry)
        let result = at37("GCGCAAGCGC", "GCGCAGCGC");
        assert!((result.del_g + 7820.36).abs() < 0.5, "delG = {}", result.del_g);
        assert_eq!(result.rendered.top, "GCGCAAGCGC");
        assert_eq!(result.rendered.bonds.matches('|').count(), 8);
        assert_eq!(result.rendered.bonds.matches('x').count(), 1);
        assert_eq!(result.rendered.bonds.matches(' ').count(), 1);
        assert_eq!(result.rendered.bottom.matches('-').count(), 1);
    }

    #[test]
    fn test_dangling_ends() {
        // the duplex spans AATT; C and G overhang on the reference and
        // contribute dangling end terms at both ends
        let result = at37("CAATTG", "AATT");
        assert!((result.del_g + 1752.47).abs() < 0.1, "delG = {}", result.del_g);
        assert_eq!(result.coord, Coord::new(3, 4, Decision::Match));
        assert_eq!(result.rendered.top, "AATT");
        assert_eq!(result.rendered.bonds, "||||");
        assert_eq!(result.rendered.bottom, "TTAA");
    }

    #[test]
    fn test_no_complementarity() {
        let result = at37("AAAA", "AAAA");
        assert_eq!(result.del_g, 0.0);
        assert_eq!(result.coord, Coord::new(0, 0, Decision::Stop));
        assert!(result.rendered.is_empty());
    }

    #[test]
    fn test_length_two_duplex() {
        // boundary case: a 2-mer duplex is two initiations plus one stack
        let result = at37("GC", "GC");
        // 2 * init_GC + GC/CG = 2 * 968.42 - 2232.34
        assert!((result.del_g + 295.5).abs() < 0.1, "delG = {}", result.del_g);
        assert_eq!(result.rendered.bonds, "||");
    }

    #[test]
    fn test_duplex_flip_symmetry() {
        // the same complex viewed upside down: swapping the strands
        // rotates every window by 180 degrees and swaps the dangling
        // ends, but the free energy is unchanged
        let cases = [
            ("GCGCAGCGC", "GCGCGCGC"),
            ("CAATTG", "AATT"),
            ("GCGCAAGCGC", "GCGCAGCGC"),
        ];
        for (a, b) in cases {
            let fwd = at37(a, b);
            let flipped = at37(b, a);
            assert!(
                (fwd.del_g - flipped.del_g).abs() < 0.1,
                "{}/{}: {} vs {}", a, b, fwd.del_g, flipped.del_g
            );
        }
    }

    #[test]
    fn test_colder_is_more_stable() {
        let warm = at37("GCGCGCGC", "GCGCGCGC");
        let cold = align_duplex(
            "GCGCGCGC",
            "GCGCGCGC",
            ReactionCondition::new(25.0, 1.0),
        )
        .unwrap();
        assert!(cold.del_g < warm.del_g);
    }

    #[test]
    fn test_idempotent() {
        let first = at37("GCGCAGCGC", "GCGCGCGC");
        let second = at37("GCGCAGCGC", "GCGCGCGC");
        assert_eq!(first, second);
    }

    #[test]
    fn test_invalid_base() {
        let err = align_duplex("AXTT", "AATT", ReactionCondition::default()).unwrap_err();
        assert!(matches!(err, AlignError::InvalidBase('X')));
        let err = align_duplex("AATT", "AAUU", ReactionCondition::default()).unwrap_err();
        assert!(matches!(err, AlignError::InvalidBase('U')));
    }

    #[test]
    fn test_short_input() {
        let result = at37("A", "AATT");
        assert_eq!(result.del_g, 0.0);
        assert!(result.rendered.is_empty());
        let result = at37("", "");
        assert_eq!(result.del_g, 0.0);
        // the debug matrix has nothing to show below 2 bases
        let err = duplex_matrix("A", "AATT", ReactionCondition::default()).unwrap_err();
        assert!(matches!(err, AlignError::EmptyInput));
    }

    #[test]
    fn test_global_best_is_never_positive() {
        for (a, b) in [("AAAA", "CCCC"), ("ACAC", "ACAC"), ("AGAGAG", "TTTT")] {
            let result = at37(a, b);
            assert!(result.del_g <= 0.0, "{}/{} gave {}", a, b, result.del_g);
        }
    }

    #[test]
    fn test_predecessor_chain_consistency() {
        // every non-seed record continues from a predecessor slot whose
        // stored decision matches its `previous` tag
        let matrix = duplex_matrix("GCGCAAGCGC", "GCGCAGCGC", ReactionCondition::default())
            .unwrap();
        for row in 1..matrix.nrow() {
            for col in 1..matrix.ncol() {
                let cell = &matrix[(row, col)];
                for (record, step) in [
                    (&cell.bind, (1usize, 1usize)),
                    (&cell.top_bulge, (0, 1)),
                    (&cell.bottom_bulge, (1, 0)),
                ] {
                    if record.is_null() || record.previous == Decision::Stop {
                        continue;
                    }
                    let prev = matrix[(row - step.0, col - step.1)].record(record.previous);
                    assert_eq!(prev.current, record.previous,
                        "broken chain at ({}, {})", row, col);
                }
            }
        }
    }

    #[test]
    fn test_rendered_alignment_reparses() {
        // the glyphs alone carry the decision sequence: re-parsing the
        // rendering reproduces the traced chain
        let result = at37("GCGCAGCGC", "GCGCGCGC");
        let reparsed: Vec<Decision> = result
            .rendered
            .bonds
            .chars()
            .zip(result.rendered.top.chars())
            .map(|(bond, top)| match (bond, top) {
                ('|', _) => Decision::Match,
                ('x', _) => Decision::Mismatch,
                (' ', '-') => Decision::BottomBulge,
                (' ', _) => Decision::TopBulge,
                (b, t) => panic!("unexpected glyph pair ({}, {})", b, t),
            })
            .collect();

        let matrix = duplex_matrix("GCGCAGCGC", "GCGCGCGC", ReactionCondition::default())
            .unwrap();
        let mut chain = Vec::new();
        let mut coord = result.coord;
        loop {
            let record = *matrix.record(coord);
            chain.push(record.current);
            if record.previous == Decision::Stop {
                break;
            }
            let step = match coord.decision {
                Decision::Match | Decision::Mismatch => (1, 1),
                Decision::TopBulge => (0, 1),
                Decision::BottomBulge => (1, 0),
                Decision::Stop => break,
            };
            coord = Coord::new(coord.row - step.0, coord.col - step.1, record.previous);
        }
        chain.reverse();
        assert_eq!(reparsed, chain);
    }

    #[test]
    fn test_bulge_slot_bookkeeping() {
        // a top bulge record counts its run in top_loop_len; the bottom
        // length only appears through internal loop transitions
        let matrix = duplex_matrix("GCGCAGCGC", "GCGCGCGC", ReactionCondition::default())
            .unwrap();
        for row in 1..matrix.nrow() {
            for col in 1..matrix.ncol() {
                let tb = &matrix[(row, col)].top_bulge;
                if !tb.is_null() {
                    assert!(tb.top_loop_len >= 1);
                }
                let bb = &matrix[(row, col)].bottom_bulge;
                if !bb.is_null() {
                    assert!(bb.bottom_loop_len >= 1);
                }
            }
        }
    }
}
