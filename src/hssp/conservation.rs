//! Per-column conservation weights.
//!
//! Every ordered pair of surviving rows contributes, over the overlap of
//! their aligned windows, `pair_distance * similarity` to `sumvar` and
//! `pair_distance * 1.5` to `sumdist`; the column weight is their ratio.
//! Pairs are partitioned over workers by the first row index; each worker
//! accumulates into private vectors which are merged once at the end.

use rayon::prelude::*;

use crate::alphabet::{is_gap_char, residue_index};
use crate::error::Result;
use crate::hssp::sequence::HsspRow;
use crate::matrices::SubstitutionMatrix;

const MISSING: f32 = f32::MIN;

fn accumulate_pairs(
    msa: &[HsspRow],
    i: usize,
    sim: &SubstitutionMatrix,
    simval: &mut [f32],
    sumvar: &mut [f32],
    sumdist: &mut [f32],
) {
    let si = &msa[i];
    for j in i + 1..msa.len() {
        if msa[j].pruned() {
            continue;
        }
        let sj = &msa[j];

        let b = si.alignment_begin().max(sj.alignment_begin());
        let e = si.alignment_end().min(sj.alignment_end());
        if b >= e {
            continue;
        }

        let mut len = 0u32;
        let mut agr = 0u32;
        for v in &mut simval[b..e] {
            *v = MISSING;
        }
        for k in b..e {
            let ci = si.byte(k);
            let cj = sj.byte(k);
            if !is_gap_char(ci) && !is_gap_char(cj) {
                len += 1;
                if ci == cj {
                    agr += 1;
                }
                if let (Some(ri), Some(rj)) = (residue_index(ci), residue_index(cj)) {
                    simval[k] = sim.score(ri as u8, rj as u8) as f32;
                }
            }
        }

        if len > 0 {
            let distance = 1.0 - agr as f32 / len as f32;
            for k in b..e {
                if simval[k] != MISSING {
                    sumvar[k] += distance * simval[k];
                    sumdist[k] += distance * 1.5;
                }
            }
        }
    }
}

/// Conservation weight for every alignment column: `sumvar / sumdist`, or
/// 1.0 where no pair contributed.
pub fn conservation_weights(msa: &[HsspRow]) -> Result<Vec<f32>> {
    let sim = SubstitutionMatrix::load("GONNET250")?;
    let n = msa.first().map(|r| r.len()).unwrap_or(0);

    let firsts: Vec<usize> = (0..msa.len().saturating_sub(1))
        .filter(|&i| !msa[i].pruned())
        .collect();

    let (sumvar, sumdist) = firsts
        .par_iter()
        .fold(
            || (vec![0f32; n], vec![0f32; n], vec![0f32; n]),
            |(mut sv, mut sd, mut simval), &i| {
                accumulate_pairs(msa, i, sim, &mut simval, &mut sv, &mut sd);
                (sv, sd, simval)
            },
        )
        .map(|(sv, sd, _)| (sv, sd))
        .reduce(
            || (vec![0f32; n], vec![0f32; n]),
            |(mut av, mut ad), (bv, bd)| {
                for k in 0..n {
                    av[k] += bv[k];
                    ad[k] += bd[k];
                }
                (av, ad)
            },
        );

    Ok((0..n)
        .map(|k| {
            if sumdist[k] > 0.0 {
                sumvar[k] / sumdist[k]
            } else {
                1.0
            }
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hssp::hits::reduce_alignment;

    fn msa(rows: &[(&str, &str)]) -> Vec<HsspRow> {
        rows.iter()
            .map(|(id, text)| {
                let mut r = HsspRow::new(*id, "");
                r.append(text);
                r
            })
            .collect()
    }

    #[test]
    fn identical_rows_weigh_one() {
        let mut m = msa(&[("q", "ACDEFGHIKL"), ("a", "ACDEFGHIKL")]);
        reduce_alignment(&mut m, 0.0).unwrap();
        // pair distance is 0, so nothing accumulates and every column
        // falls back to weight 1
        let w = conservation_weights(&m).unwrap();
        assert_eq!(w.len(), 10);
        assert!(w.iter().all(|&v| v == 1.0));
    }

    #[test]
    fn divergent_columns_accumulate() {
        let mut m = msa(&[
            ("q", "ACDEFGHIKLMNPQ"),
            ("a", "ACDEFGHIKLMNPQ"),
            ("b", "ACDEFGHIKLMNPA"),
        ]);
        reduce_alignment(&mut m, 0.0).unwrap();
        let w = conservation_weights(&m).unwrap();
        // some pair disagrees somewhere, so at least one column deviates from
        // the fallback
        assert!(w.iter().any(|&v| v != 1.0));
    }

    #[test]
    fn pruned_rows_are_skipped() {
        let mut m = msa(&[
            ("q", "ACDEFGHIKLMNPQ"),
            ("a", "ACDEFGHIKLMNPA"),
            ("b", "ACDEFGHIKLMNPW"),
        ]);
        reduce_alignment(&mut m, 0.0).unwrap();
        let all = conservation_weights(&m).unwrap();
        m[2].prune();
        let skipped = conservation_weights(&m).unwrap();
        assert_ne!(all, skipped);
    }
}
