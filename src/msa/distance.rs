//! Pairwise evolutionary distance estimation.
//!
//! Distance between two entries is `1 - identity_fraction` over a global
//! Gotoh alignment (three matrices: match, horizontal run, vertical run)
//! under GONNET250 with affine gap costs. The identity count rides along the
//! chosen score path in a fourth matrix, so no traceback is materialized.
//!
//! When both entries carry fixed positions, the fill is decomposed into
//! rectangles bounded by matching non-zero position columns; in between,
//! whichever side has the strictly smaller non-zero position advances,
//! skipping zeros.

use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;

use crate::error::Result;
use crate::matrices::SubstitutionMatrix;
use crate::matrix::{Matrix, SymmetricMatrix};
use crate::msa::entry::Entry;

const DISTANCE_MATRIX: &str = "GONNET250";
const DISTANCE_GAP_OPEN: f32 = 10.0;
const DISTANCE_GAP_EXTEND: f32 = 0.2;

#[inline]
fn pair_score(mat: &SubstitutionMatrix, ra: u8, rb: u8) -> f32 {
    if ra >= 20 || rb >= 20 {
        0.0
    } else {
        mat.score(ra, rb) as f32
    }
}

/// Slide the window boundary to the next anchor pair, or to the far corner
/// when no anchor remains. Zero positions are skipped; on a mismatch the side
/// with the smaller non-zero position advances.
pub(crate) fn advance_window(
    pa: &[u16],
    pb: &[u16],
    end_x: &mut usize,
    end_y: &mut usize,
    dim_x: usize,
    dim_y: usize,
) {
    while *end_x < dim_x || *end_y < dim_y {
        if *end_x < dim_x && pa[*end_x] == 0 {
            *end_x += 1;
            continue;
        }
        if *end_y < dim_y && pb[*end_y] == 0 {
            *end_y += 1;
            continue;
        }
        if *end_x < dim_x && *end_y < dim_y && pa[*end_x] == pb[*end_y] && pa[*end_x] != 0 {
            break;
        }
        if *end_x < dim_x {
            while *end_x < dim_x && (*end_y == dim_y || pa[*end_x] < pb[*end_y]) {
                *end_x += 1;
            }
        }
        if *end_y < dim_y {
            while *end_y < dim_y && (*end_x == dim_x || pb[*end_y] < pa[*end_x]) {
                *end_y += 1;
            }
        }
        if *end_x < dim_x && *end_y < dim_y && pa[*end_x] != pb[*end_y] {
            continue;
        }
        break;
    }
}

fn pairwise(a: &Entry, b: &Entry, mat: &SubstitutionMatrix) -> f32 {
    let sa = &a.seq;
    let sb = &b.seq;
    let dim_x = sa.len();
    let dim_y = sb.len();
    if dim_x == 0 || dim_y == 0 {
        return 1.0;
    }

    let pa = &a.positions;
    let pb = &b.positions;
    let anchored = !pa.is_empty() && !pb.is_empty();

    let mut bm = Matrix::<f32>::new(dim_x, dim_y);
    let mut ixm = Matrix::<f32>::new(dim_x, dim_y);
    let mut iym = Matrix::<f32>::new(dim_x, dim_y);
    let mut idm = Matrix::<u32>::new(dim_x, dim_y);

    let (mut x, mut y) = (0usize, 0usize);
    let (mut end_x, mut end_y) = if anchored { (0, 0) } else { (dim_x, dim_y) };
    let mut high_id: u32 = 0;

    while x < dim_x && y < dim_y {
        if anchored && x == end_x && y == end_y && pa[x] == pb[y] && pa[x] != 0 {
            // forced diagonal step through the anchor
            if sa[x] == sb[y] {
                high_id += 1;
            }
            x += 1;
            end_x += 1;
            y += 1;
            end_y += 1;
            continue;
        }

        if anchored {
            advance_window(pa, pb, &mut end_x, &mut end_y, dim_x, dim_y);
        }

        let start_x = x;
        let start_y = y;
        let mut high = f32::MIN;
        let mut high_id_sub: u32 = 0;

        for xx in start_x..end_x {
            for yy in start_y..end_y {
                let ix1 = if xx > start_x { ixm.get(xx - 1, yy) } else { 0.0 };
                let iy1 = if yy > start_y { iym.get(xx, yy - 1) } else { 0.0 };

                let mut m = pair_score(mat, sa[xx], sb[yy]);
                if xx > start_x && yy > start_y {
                    m += bm.get(xx - 1, yy - 1);
                }

                let mut id: u32 = u32::from(sa[xx] == sb[yy]);
                let s;
                if m >= ix1 && m >= iy1 {
                    if xx > start_x && yy > start_y {
                        id += idm.get(xx - 1, yy - 1);
                    }
                    s = m;
                } else if ix1 >= iy1 {
                    if xx > start_x {
                        id += idm.get(xx - 1, yy);
                    }
                    s = ix1;
                } else {
                    if yy > start_y {
                        id += idm.get(xx, yy - 1);
                    }
                    s = iy1;
                }

                bm.set(xx, yy, s);
                idm.set(xx, yy, id);

                if (xx + 1 == end_x || yy + 1 == end_y) && high < s {
                    high = s;
                    high_id_sub = id;
                }

                ixm.set(xx, yy, (m - DISTANCE_GAP_OPEN).max(ix1 - DISTANCE_GAP_EXTEND));
                iym.set(xx, yy, (m - DISTANCE_GAP_OPEN).max(iy1 - DISTANCE_GAP_EXTEND));
            }
        }

        high_id += high_id_sub;
        x = end_x;
        y = end_y;
    }

    let result = 1.0 - high_id as f32 / dim_x.max(dim_y) as f32;
    debug_assert!((0.0..=1.0).contains(&result));
    result
}

/// Estimated evolutionary distance between two entries, in `[0, 1]`.
pub fn distance(a: &Entry, b: &Entry) -> Result<f32> {
    let mat = SubstitutionMatrix::load(DISTANCE_MATRIX)?;
    Ok(pairwise(a, b, mat))
}

/// Fill the symmetric distance matrix over all entry pairs. Each cell is
/// computed by exactly one worker and written once.
pub fn distance_matrix(entries: &[Entry]) -> Result<SymmetricMatrix> {
    let mat = SubstitutionMatrix::load(DISTANCE_MATRIX)?;
    let n = entries.len();
    let mut d = SymmetricMatrix::new(n);

    let mut pairs = Vec::with_capacity(n * n.saturating_sub(1) / 2);
    for a in 0..n.saturating_sub(1) {
        for b in a + 1..n {
            pairs.push((a, b));
        }
    }

    let bar = ProgressBar::new(pairs.len() as u64);
    bar.set_style(
        ProgressStyle::default_bar()
            .template("{msg} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len}")
            .unwrap(),
    );
    bar.set_message("distance matrix");

    let cells: Vec<(usize, usize, f32)> = pairs
        .par_iter()
        .map(|&(a, b)| {
            let v = pairwise(&entries[a], &entries[b], mat);
            bar.inc(1);
            (a, b, v)
        })
        .collect();
    bar.finish_and_clear();

    for (a, b, v) in cells {
        d.set(b, a, v);
    }
    Ok(d)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(text: &str) -> Entry {
        Entry::from_text(0, "e", text).unwrap()
    }

    #[test]
    fn identical_sequences_have_zero_distance() {
        let a = entry("ACDEFG");
        assert_eq!(distance(&a, &a).unwrap(), 0.0);
    }

    #[test]
    fn one_mismatch_in_four() {
        let a = entry("ACDE");
        let b = entry("ACGE");
        let d = distance(&a, &b).unwrap();
        assert!((d - 0.25).abs() < 1e-6, "d = {d}");
        assert_eq!(distance(&a, &b).unwrap(), distance(&b, &a).unwrap());
    }

    #[test]
    fn range_is_clamped_for_unrelated_sequences() {
        let a = entry("WWWWWW");
        let b = entry("PPP");
        let d = distance(&a, &b).unwrap();
        assert!((0.0..=1.0).contains(&d));
    }

    #[test]
    fn anchored_pairs_count_identity_through_anchors() {
        let mut a = entry("ACDE");
        let mut b = entry("ACDE");
        a.positions = vec![1, 2, 3, 4];
        b.positions = vec![1, 2, 3, 4];
        assert_eq!(distance(&a, &b).unwrap(), 0.0);
    }
}
