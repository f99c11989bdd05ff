//! Profile-vs-profile alignment with position-specific gap penalties.
//!
//! Two equal-length column blocks are merged into one by inserting gaps
//! simultaneously into every member of a side. Column pairs are scored as
//! the weighted mean of pairwise non-negative substitution scores; gap
//! penalties start from the rescaled base open/extend costs and are then
//! adjusted per column following the ClustalW heuristics (existing gaps,
//! gap proximity, hydrophilic stretches, residue- or structure-specific
//! terms; Thompson et al., NAR 1994).

use crate::alphabet::GAP;
use crate::error::{Error, Result};
use crate::matrices::{SubstitutionMatrix, SubstitutionMatrixFamily};
use crate::matrix::Matrix;
use crate::msa::distance::advance_window;
use crate::msa::entry::Entry;

/// Per-residue gap-open modifiers (Pascarella & Argos, as used by ClustalW
/// with 0.2 subtracted), in crate alphabet order.
const RESIDUE_SPECIFIC_PENALTY: [f32; 20] = [
    1.05, // V
    1.01, // L
    1.12, // I
    1.09, // M
    1.00, // F
    1.03, // W
    0.80, // Y
    0.41, // G
    0.93, // A
    0.54, // P
    0.56, // S
    0.69, // T
    0.93, // C
    0.80, // H
    0.52, // R
    0.76, // K
    0.87, // Q
    1.11, // E
    0.43, // N
    0.76, // D
];

/// Residue codes for D, E, G, K, N, Q, P, R, S.
#[inline]
fn is_hydrophilic(r: u8) -> bool {
    matches!(r, 7 | 9 | 10 | 14..=19)
}

/// Weighted mean substitution score between column `x` of block `a` and
/// column `y` of block `b`. Gap cells contribute nothing.
fn col_score(a: &[Entry], b: &[Entry], x: usize, y: usize, mat: &SubstitutionMatrix) -> f32 {
    let mut result = 0.0;
    for ea in a {
        for eb in b {
            let ra = ea.seq[x];
            let rb = eb.seq[y];
            if ra != GAP && rb != GAP {
                result += ea.weight * eb.weight * mat.positive_score(ra, rb) as f32;
            }
        }
    }
    result / (a.len() * b.len()) as f32
}

/// Adjust per-column gap penalties for one side.
///
/// Columns already holding a gap get cheaper opens and halved extends;
/// columns close to a gap (or to the block boundary) get more expensive
/// opens on a distance ramp; hydrophilic stretches of five or more columns
/// divide the open cost by three; everything else scales by the mean
/// residue- or structure-specific modifier of the column.
pub fn adjust_gap_penalties(gop: &mut [f32], gep: &mut [f32], side: &[Entry]) {
    let cols = gop.len();
    debug_assert_eq!(cols, side[0].len());

    let mut gaps = vec![0u32; cols];
    let mut penalty = vec![0f32; cols];
    let mut all_hydro = vec![true; cols];

    for e in side {
        for ix in 0..cols {
            let r = e.seq[ix];
            if r == GAP {
                gaps[ix] += 1;
            }
            if !is_hydrophilic(r) {
                all_hydro[ix] = false;
            }
            if ix < e.ss.len() {
                penalty[ix] += match e.ss[ix] {
                    b'H' | b'G' | b'I' => 3.0,
                    b'B' => 2.0,
                    b'E' => 1.5,
                    _ => 1.0,
                };
            } else if r < 20 {
                penalty[ix] += RESIDUE_SPECIFIC_PENALTY[r as usize];
            } else {
                penalty[ix] += 1.0;
            }
        }
    }

    // stretches of >= 5 consecutive columns hydrophilic in every row
    let mut hydrophilic = vec![false; cols];
    let mut si = 0usize;
    for i in 0..=cols {
        if i == cols || !all_hydro[i] {
            if i >= si + 5 {
                for h in &mut hydrophilic[si..i] {
                    *h = true;
                }
            }
            si = i + 1;
        }
    }

    let rows = side.len() as f32;
    for ix in 0..cols {
        if gaps[ix] > 0 {
            gop[ix] *= 0.3 * ((side.len() as u32 - gaps[ix]) as f32 / rows);
            gep[ix] /= 2.0;
        } else {
            let mut near_gap = false;
            for dist in 0..8usize {
                if ix + dist >= cols
                    || gaps[ix + dist] > 0
                    || ix < dist
                    || gaps[ix - dist] > 0
                {
                    gop[ix] *= (2.0 + (8 - dist) as f32 * 2.0) / 8.0;
                    near_gap = true;
                    break;
                }
            }
            if !near_gap {
                if hydrophilic[ix] {
                    gop[ix] /= 3.0;
                } else {
                    gop[ix] *= penalty[ix] / rows;
                }
            }
        }
    }
}

/// Align block `b` against block `a`, returning the merged block holding all
/// rows of both at equal length. The substitution matrix is picked from the
/// family by the joined node's branch-length sum.
pub fn align_profiles(
    mut a: Vec<Entry>,
    mut b: Vec<Entry>,
    d_left: f32,
    d_right: f32,
    fam: &SubstitutionMatrixFamily,
    gap_open: f32,
    gap_extend: f32,
    magic: f32,
) -> Result<Vec<Entry>> {
    if a.is_empty() || b.is_empty() {
        return Err(Error::InternalConsistency(
            "profile alignment over an empty block".to_string(),
        ));
    }
    let dim_x = a[0].len();
    let dim_y = b[0].len();
    if dim_x == 0 || dim_y == 0 {
        return Err(Error::InternalConsistency(
            "profile alignment over an empty sequence".to_string(),
        ));
    }
    debug_assert!(a.iter().all(|e| e.len() == dim_x));
    debug_assert!(b.iter().all(|e| e.len() == dim_y));

    let smat = fam.select((d_left + d_right).abs());

    let (min_len, max_len) = if dim_x < dim_y {
        (dim_x as f32, dim_y as f32)
    } else {
        (dim_y as f32, dim_x as f32)
    };
    let logmin = 1.0 / min_len.log10();
    let logdiff = 1.0 + 0.5 * (min_len / max_len).log10();

    // base gap open rescaled by the matrix characteristics
    let gop = (gap_open / (logdiff * logmin))
        * smat.mismatch_average().abs()
        * smat.scale_factor()
        * magic;

    let avg_weight_a = a.iter().map(|e| e.weight).sum::<f32>() / a.len() as f32;
    let avg_weight_b = b.iter().map(|e| e.weight).sum::<f32>() / b.len() as f32;

    // base gap extend is adjusted for the length difference between sides
    let mut gop_a = vec![gop * avg_weight_a; dim_x];
    let mut gep_a =
        vec![gap_extend * (1.0 + (dim_x as f32 / dim_y as f32).log10()) * avg_weight_a; dim_x];
    adjust_gap_penalties(&mut gop_a, &mut gep_a, &a);

    let mut gop_b = vec![gop * avg_weight_b; dim_y];
    let mut gep_b =
        vec![gap_extend * (1.0 + (dim_y as f32 / dim_x as f32).log10()) * avg_weight_b; dim_y];
    adjust_gap_penalties(&mut gop_b, &mut gep_b, &b);

    let pa = a[0].positions.clone();
    let pb = b[0].positions.clone();
    let anchored = !pa.is_empty() && !pb.is_empty();

    let mut bm = Matrix::<f32>::new(dim_x, dim_y);
    let mut ixm = Matrix::<f32>::new(dim_x, dim_y);
    let mut iym = Matrix::<f32>::new(dim_x, dim_y);
    let mut tb = Matrix::<i8>::new(dim_x, dim_y);

    let (mut x, mut y) = (0usize, 0usize);
    let (mut end_x, mut end_y) = if anchored { (0, 0) } else { (dim_x, dim_y) };
    let (mut high_x, mut high_y) = (0usize, 0usize);

    while x < dim_x && y < dim_y {
        if anchored && x == end_x && y == end_y && pa[x] == pb[y] && pa[x] != 0 {
            // traceback is forced through the anchor
            tb.set(x, y, 0);
            high_x = x;
            high_y = y;
            x += 1;
            end_x += 1;
            y += 1;
            end_y += 1;
            continue;
        }

        if anchored {
            advance_window(&pa, &pb, &mut end_x, &mut end_y, dim_x, dim_y);
        }

        let start_x = x;
        let start_y = y;
        let mut high = 0f32;

        // steer the traceback into this rectangle from the anchor boundary
        if y > 0 {
            for ix in x..end_x {
                tb.set(ix, y - 1, 1);
            }
        }
        if x > 0 {
            for iy in y..end_y {
                tb.set(x - 1, iy, -1);
            }
        }

        for xx in start_x..end_x {
            for yy in start_y..end_y {
                let ix1 = if xx > start_x { ixm.get(xx - 1, yy) } else { 0.0 };
                let iy1 = if yy > start_y { iym.get(xx, yy - 1) } else { 0.0 };

                let mut m = col_score(&a, &b, xx, yy, smat);
                if xx > start_x && yy > start_y {
                    m += bm.get(xx - 1, yy - 1);
                }

                let s;
                if m >= ix1 && m >= iy1 {
                    tb.set(xx, yy, 0);
                    s = m;
                } else if ix1 >= iy1 {
                    tb.set(xx, yy, 1);
                    s = ix1;
                } else {
                    tb.set(xx, yy, -1);
                    s = iy1;
                }
                bm.set(xx, yy, s);

                if (xx + 1 == end_x || yy + 1 == end_y) && high <= s {
                    high = s;
                    high_x = xx;
                    high_y = yy;
                }

                let open_a = if xx + 1 < dim_x { gop_a[xx] } else { 0.0 };
                let open_b = if yy + 1 < dim_y { gop_b[yy] } else { 0.0 };
                ixm.set(xx, yy, (m - open_a).max(ix1 - gep_a[xx]));
                iym.set(xx, yy, (m - open_b).max(iy1 - gep_b[yy]));
            }
        }

        if end_y > 0 {
            for xx in high_x + 1..end_x {
                tb.set(xx, end_y - 1, 1);
            }
        }
        if end_x > 0 {
            for yy in high_y + 1..end_y {
                tb.set(end_x - 1, yy, -1);
            }
        }

        x = end_x;
        y = end_y;
    }

    if end_y > 0 {
        for xx in high_x + 1..dim_x {
            tb.set(xx, end_y - 1, 1);
        }
    }
    if end_x > 0 {
        for yy in high_y + 1..dim_y {
            tb.set(end_x - 1, yy, -1);
        }
    }

    // trace back, inserting gaps into whole sides
    let mut tx = dim_x as isize - 1;
    let mut ty = dim_y as isize - 1;
    while tx >= 0 && ty >= 0 {
        match tb.get(tx as usize, ty as usize) {
            -1 => {
                for e in a.iter_mut() {
                    e.insert_gap(tx as usize + 1);
                }
                ty -= 1;
            }
            1 => {
                for e in b.iter_mut() {
                    e.insert_gap(ty as usize + 1);
                }
                tx -= 1;
            }
            0 => {
                tx -= 1;
                ty -= 1;
            }
            other => {
                return Err(Error::InternalConsistency(format!(
                    "traceback cell out of range ({other})"
                )))
            }
        }
    }

    // pad whatever prefix is left on one side with gaps on the other
    while tx >= 0 {
        for e in b.iter_mut() {
            e.insert_gap((ty + 1) as usize);
        }
        tx -= 1;
    }
    while ty >= 0 {
        for e in a.iter_mut() {
            e.insert_gap((tx + 1) as usize);
        }
        ty -= 1;
    }

    // the merged block carries the element-wise max of both position vectors
    if !a[0].positions.is_empty() && !b[0].positions.is_empty() {
        debug_assert_eq!(a[0].positions.len(), b[0].positions.len());
        let b0 = b[0].positions.clone();
        for (pv, bv) in a[0].positions.iter_mut().zip(b0) {
            *pv = (*pv).max(bv);
        }
    }

    let merged_len = a[0].len();
    a.extend(b);
    debug_assert!(a.iter().all(|e| e.len() == merged_len));
    Ok(a)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::msa::entry::Entry;

    fn entry(nr: u32, text: &str) -> Entry {
        Entry::from_text(nr, format!("s{nr}"), text).unwrap()
    }

    fn fam() -> SubstitutionMatrixFamily {
        SubstitutionMatrixFamily::load("BLOSUM").unwrap()
    }

    #[test]
    fn identical_sequences_align_without_gaps() {
        let a = vec![entry(0, "ACDEFG")];
        let b = vec![entry(1, "ACDEFG")];
        let c = align_profiles(a, b, 0.0, 0.0, &fam(), 10.0, 0.2, 0.1).unwrap();
        assert_eq!(c.len(), 2);
        for e in &c {
            assert_eq!(e.decoded(), "ACDEFG");
        }
    }

    #[test]
    fn shorter_sequence_is_padded() {
        let a = vec![entry(0, "ACDEFG")];
        let b = vec![entry(1, "ACDE")];
        let c = align_profiles(a, b, 0.1, 0.1, &fam(), 10.0, 0.2, 0.1).unwrap();
        let len = c[0].len();
        assert!(c.iter().all(|e| e.len() == len));
        assert_eq!(c[0].seq.iter().filter(|&&r| r == GAP).count(), len - 6);
        assert_eq!(c[1].seq.iter().filter(|&&r| r == GAP).count(), len - 4);
    }

    #[test]
    fn anchors_force_columns_together() {
        let mut a = entry(0, "ACDE");
        let mut b = entry(1, "AMDE");
        a.positions = vec![1, 2, 0, 3];
        b.positions = vec![1, 0, 2, 3];
        let c = align_profiles(vec![a], vec![b], 0.1, 0.1, &fam(), 10.0, 0.2, 0.1).unwrap();
        let len = c[0].len();
        assert!(c.iter().all(|e| e.len() == len));
        // anchored tags 1, 2 and 3 occupy the same columns in both rows
        let col_of = |e: &Entry, tag: u16| e.positions.iter().position(|&p| p == tag);
        let pa = &c[0];
        for tag in [1u16, 2, 3] {
            assert!(col_of(pa, tag).is_some(), "tag {tag} lost in merge");
        }
        // merged positions are the element-wise max, so every tag survives
        assert_eq!(pa.positions.iter().filter(|&&p| p != 0).count(), 3);
    }

    #[test]
    fn gap_adjustment_is_a_pure_function_of_its_inputs() {
        let side = vec![entry(0, "AC-DEFGHIK"), entry(1, "ACWDEFGHIK")];
        let gop0 = vec![1.5f32; 10];
        let gep0 = vec![0.2f32; 10];

        let mut gop1 = gop0.clone();
        let mut gep1 = gep0.clone();
        adjust_gap_penalties(&mut gop1, &mut gep1, &side);

        let mut gop2 = gop0.clone();
        let mut gep2 = gep0.clone();
        adjust_gap_penalties(&mut gop2, &mut gep2, &side);

        assert_eq!(gop1, gop2);
        assert_eq!(gep1, gep2);
        // the gapped column got cheaper to open and extend
        assert!(gop1[2] < gop0[2]);
        assert!(gep1[2] < gep0[2]);
    }

    #[test]
    fn hydrophilic_stretch_lowers_open_cost() {
        // every column hydrophilic in every row, no gaps anywhere, and long
        // enough that the middle is outside the boundary ramp
        let side = vec![entry(0, "DEGKNQPRSDEGKNQPRSDEG")];
        let n = side[0].len();
        let mut gop = vec![3.0f32; n];
        let mut gep = vec![0.2f32; n];
        adjust_gap_penalties(&mut gop, &mut gep, &side);
        assert!((gop[10] - 1.0).abs() < 1e-6, "gop[10] = {}", gop[10]);
    }
}
