//! Hit filtering and ordering for the HSSP report.
//!
//! Rows are reduced against the query in parallel, dropped when their
//! identity falls under the length-dependent homology threshold
//! (Sander & Schneider, Proteins 9:56-68, 1991), then sorted by identity
//! with alignment length and identifier as tiebreakers. Serial numbers are
//! assigned after the sort.

use std::cmp::Ordering;

use rayon::prelude::*;

use crate::error::{Error, Result};
use crate::hssp::sequence::HsspRow;
use crate::matrices::SubstitutionMatrix;

/// One retained alignment row, ready for the report.
#[derive(Debug, Clone)]
pub struct Hit {
    /// Index of the row in the alignment.
    pub row: usize,
    pub chain: char,
    /// Report serial, assigned after the final sort (1-based).
    pub nr: u32,
    /// Residue offset for chain concatenation.
    pub offset: u32,
    pub ifir: u32,
    pub ilas: u32,
    /// Fraction of identical residues over the alignment length.
    pub ide: f32,
    /// Fraction of similar residues over the alignment length.
    pub wsim: f32,
}

/// Homology threshold curve: `t(L) = (290.15 * L ** -0.562) / 100`, with the
/// alignment length clamped into 10..=80.
pub fn homology_threshold(length: u32) -> f32 {
    let l = length.clamp(10, 80) as f32;
    290.15 * l.powf(-0.562) / 100.0
}

fn drops(row: &HsspRow, threshold: f32) -> bool {
    row.score() < homology_threshold(row.alignment_length()) + threshold
}

/// Reduce every non-query row against the query and drop the ones below the
/// homology threshold. The query stays at index 0.
pub fn reduce_alignment(msa: &mut Vec<HsspRow>, threshold: f32) -> Result<()> {
    if msa.len() < 2 {
        return Err(Error::InsufficientData(
            "alignment holds fewer than two sequences".to_string(),
        ));
    }

    let sim = SubstitutionMatrix::load("GONNET250")?;
    let (q, rest) = msa.split_first_mut().expect("non-empty alignment");
    let q: &HsspRow = q;
    rest.par_iter_mut().try_for_each(|s| s.update(q, sim))?;

    let mut first = true;
    msa.retain(|r| {
        if first {
            first = false;
            true
        } else {
            !drops(r, threshold)
        }
    });

    if msa.len() < 2 {
        return Err(Error::InsufficientData(
            "no hits survive the homology threshold".to_string(),
        ));
    }
    Ok(())
}

fn compare(msa: &[HsspRow], a: &Hit, b: &Hit) -> Ordering {
    // identity DESC
    match b.ide.partial_cmp(&a.ide).unwrap_or(Ordering::Equal) {
        Ordering::Equal => {}
        ord => return ord,
    }
    // alignment length DESC
    let (ra, rb) = (&msa[a.row], &msa[b.row]);
    match rb.alignment_length().cmp(&ra.alignment_length()) {
        Ordering::Equal => {}
        ord => return ord,
    }
    // identifier DESC
    rb.id2().cmp(ra.id2())
}

/// Build hits for every non-query row, sort, keep at most `max_hits` (0 keeps
/// all) and assign serial numbers. Rows of discarded hits are pruned so the
/// conservation kernel skips them.
pub fn build_hits(
    msa: &mut [HsspRow],
    chain: char,
    offset: u32,
    max_hits: u32,
) -> Result<Vec<Hit>> {
    let mut hits: Vec<Hit> = (1..msa.len())
        .map(|i| {
            let r = &msa[i];
            let len = r.alignment_length().max(1) as f32;
            Hit {
                row: i,
                chain,
                nr: 0,
                offset,
                ifir: r.ifir() + offset,
                ilas: r.ilas() + offset,
                ide: r.identical() as f32 / len,
                wsim: r.similar() as f32 / len,
            }
        })
        .collect();

    if hits.is_empty() {
        return Err(Error::InsufficientData(
            "no hits found or remaining".to_string(),
        ));
    }

    hits.sort_by(|a, b| compare(msa, a, b));

    let max = max_hits as usize;
    if max > 0 && hits.len() > max {
        for h in &hits[max..] {
            msa[h.row].prune();
        }
        hits.truncate(max);
    }

    for (nr, h) in hits.iter_mut().enumerate() {
        h.nr = nr as u32 + 1;
    }
    Ok(hits)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn threshold_curve_matches_published_endpoints() {
        // t(10) ~ 0.795, t(80) ~ 0.247; shorter/longer lengths clamp
        assert!((homology_threshold(10) - 0.795).abs() < 0.005);
        assert!((homology_threshold(80) - 0.247).abs() < 0.005);
        assert_eq!(homology_threshold(5), homology_threshold(10));
        assert_eq!(homology_threshold(200), homology_threshold(80));
        assert!(homology_threshold(10) > homology_threshold(40));
    }

    fn row(id: &str, text: &str) -> HsspRow {
        let mut r = HsspRow::new(id, "");
        r.append(text);
        r
    }

    #[test]
    fn reduction_drops_rows_below_threshold() {
        let mut msa = vec![
            row("q", "ACDEFGHIKL"),
            row("good", "ACDEFGHIKL"),
            row("bad", "LKIHGFEDCA"),
        ];
        reduce_alignment(&mut msa, 0.05).unwrap();
        assert_eq!(msa.len(), 2);
        assert_eq!(msa[1].id(), "good");
    }

    #[test]
    fn all_rows_dropped_is_insufficient_data() {
        let mut msa = vec![row("q", "ACDEFGHIKL"), row("bad", "LKIHGFEDCA")];
        assert!(matches!(
            reduce_alignment(&mut msa, 0.05),
            Err(Error::InsufficientData(_))
        ));
    }

    #[test]
    fn hits_sort_by_identity_then_length() {
        let mut msa = vec![
            row("q", "ACDEFGHIKLMN"),
            row("half", "ACDEFG------"),
            row("full", "ACDEFGHIKLMN"),
        ];
        reduce_alignment(&mut msa, 0.0).unwrap();
        let hits = build_hits(&mut msa, 'A', 0, 0).unwrap();
        assert_eq!(hits[0].nr, 1);
        assert_eq!(msa[hits[0].row].id(), "full");
        assert!(hits[0].ide >= hits[1].ide);
    }

    #[test]
    fn truncation_prunes_discarded_rows() {
        let mut msa = vec![
            row("q", "ACDEFGHIKL"),
            row("a", "ACDEFGHIKL"),
            row("b", "ACDEFGHIKL"),
            row("c", "ACDEFGHIKL"),
        ];
        reduce_alignment(&mut msa, 0.0).unwrap();
        let hits = build_hits(&mut msa, 'A', 0, 2).unwrap();
        assert_eq!(hits.len(), 2);
        assert_eq!(msa.iter().filter(|r| r.pruned()).count(), 1);
    }
}
