//! Input helpers and the all-pairs interaction driver shared by the
//! duplexfold binaries.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use anyhow::{anyhow, Result};
use rayon::prelude::*;

use df_align::align_duplex;
use df_thermo::{NucleotideVec, ReactionCondition};

/// Read a primer pool: one sequence per line, '#' comments and blank
/// lines skipped. Sequences are validated strictly.
pub fn read_pool<R: BufRead>(reader: R) -> Result<Vec<String>> {
    let mut pool = Vec::new();
    for (lineno, line) in reader.lines().enumerate() {
        let line = line?;
        let token = line.trim();
        if token.is_empty() || token.starts_with('#') {
            continue;
        }
        NucleotideVec::try_from(token)
            .map_err(|e| anyhow!("line {}: {}", lineno + 1, e))?;
        pool.push(token.to_ascii_uppercase());
    }
    if pool.is_empty() {
        return Err(anyhow!("primer pool is empty"));
    }
    Ok(pool)
}

pub fn read_pool_file<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
    let reader = BufReader::new(File::open(path)?);
    read_pool(reader)
}

/// The 3'-terminal k bases of a sequence, or the whole sequence when it
/// is shorter. Pool interaction screens usually only care about the
/// extensible end of a primer.
pub fn three_prime_kmer(seq: &str, k: usize) -> &str {
    &seq[seq.len().saturating_sub(k)..]
}

/// All-pairs interaction free energies of a primer pool, in cal/mol.
/// Entry (i, j) is the best hybridization of primer j (optionally
/// truncated to its 3' k-mer) against primer i. The diagonal is forced
/// to zero unless `include_self` is set.
pub fn interaction_matrix(
    pool: &[String],
    condition: ReactionCondition,
    kmer: Option<usize>,
    include_self: bool,
) -> Result<Vec<Vec<f64>>> {
    pool.par_iter()
        .enumerate()
        .map(|(i, reference)| {
            pool.iter()
                .enumerate()
                .map(|(j, query)| {
                    if i == j && !include_self {
                        return Ok(0.0);
                    }
                    let query = match kmer {
                        Some(k) => three_prime_kmer(query, k),
                        None => query.as_str(),
                    };
                    Ok(align_duplex(reference, query, condition)?.del_g)
                })
                .collect()
        })
        .collect()
}

/// Per-row summary of an interaction matrix: the strongest (most
/// negative) entry and the mean.
pub fn row_summary(row: &[f64]) -> (f64, f64) {
    let strongest = row.iter().copied().fold(0.0, f64::min);
    let mean = row.iter().sum::<f64>() / row.len() as f64;
    (strongest, mean)
}


#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_read_pool_skips_comments() {
        let input = "# primer pool\nAATTCC\n\nggctta\n";
        let pool = read_pool(Cursor::new(input)).unwrap();
        assert_eq!(pool, vec!["AATTCC".to_string(), "GGCTTA".to_string()]);
    }

    #[test]
    fn test_read_pool_rejects_bad_bases() {
        let input = "AATT\nAXTT\n";
        let err = read_pool(Cursor::new(input)).unwrap_err();
        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn test_read_pool_rejects_empty() {
        assert!(read_pool(Cursor::new("# nothing\n")).is_err());
    }

    #[test]
    fn test_three_prime_kmer() {
        assert_eq!(three_prime_kmer("AACCGGTT", 4), "GGTT");
        assert_eq!(three_prime_kmer("ACG", 10), "ACG");
    }

    #[test]
    fn test_interaction_matrix_shape() {
        let pool = vec!["GCGCGCGC".to_string(), "AAAAAAAA".to_string()];
        let matrix =
            interaction_matrix(&pool, ReactionCondition::default(), None, false).unwrap();
        assert_eq!(matrix.len(), 2);
        assert_eq!(matrix[0].len(), 2);
        // diagonal suppressed
        assert_eq!(matrix[0][0], 0.0);
        assert_eq!(matrix[1][1], 0.0);
        // GC-only against A-only cannot pair at all
        assert_eq!(matrix[0][1], 0.0);
    }

    #[test]
    fn test_self_complement_dominates_row() {
        let pool = vec![
            "GCGCGCGC".to_string(),
            "GCGCGCGC".to_string(),
            "AATAAT".to_string(),
        ];
        let matrix =
            interaction_matrix(&pool, ReactionCondition::default(), None, false).unwrap();
        // the self-complementary primer binds its twin strongly
        assert!(matrix[0][1] < -5000.0);
        let (strongest, mean) = row_summary(&matrix[0]);
        assert_eq!(strongest, matrix[0][1].min(matrix[0][2]).min(0.0));
        assert!(mean <= 0.0);
    }
}
