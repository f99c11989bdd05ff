//! Progressive alignment driver.
//!
//! Post-order traversal of the guide tree: each interior node aligns the
//! merged blocks of its two children. Subtrees run as a fork/join pair when
//! at least one child is itself an interior node; a failure anywhere aborts
//! the whole traversal.

use indicatif::{ProgressBar, ProgressStyle};

use crate::error::{Error, Result};
use crate::matrices::SubstitutionMatrixFamily;
use crate::msa::align::align_profiles;
use crate::msa::distance::{distance, distance_matrix};
use crate::msa::entry::Entry;
use crate::msa::tree::{join_neighbours, TreeNode};
use crate::options::Options;

/// Align all entries progressively and return the rows of the finished MSA
/// in input order.
pub fn align_msa(mut entries: Vec<Entry>, opts: &Options) -> Result<Vec<Entry>> {
    if entries.len() < 2 {
        return Err(Error::InsufficientData(
            "fewer than two sequences to align".to_string(),
        ));
    }

    if opts.ignore_positions {
        for e in &mut entries {
            e.dump_positions();
        }
    }

    let fam = SubstitutionMatrixFamily::load(&opts.matrix_name)?;

    let root = if entries.len() == 2 {
        // two sequences need no guide tree
        let b = entries.pop().expect("two entries");
        let a = entries.pop().expect("two entries");
        let dist = distance(&a, &b)?;
        TreeNode::join(
            TreeNode::Leaf(a),
            TreeNode::Leaf(b),
            dist / 2.0,
            dist / 2.0,
        )
    } else {
        let mut d = distance_matrix(&entries)?;
        let mut tree: Vec<TreeNode> = entries.into_iter().map(TreeNode::Leaf).collect();
        join_neighbours(&mut d, &mut tree);
        tree.pop().expect("a single root remains")
    };

    let bar = ProgressBar::new(root.cumulative_cost().max(1));
    bar.set_style(
        ProgressStyle::default_bar()
            .template("{msg} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len}")
            .unwrap(),
    );
    bar.set_message("aligning");

    let mut rows = create_alignment(root, &fam, opts, &bar)?;
    bar.finish_and_clear();

    rows.sort_by_key(|e| e.nr);
    Ok(rows)
}

fn create_alignment(
    node: TreeNode,
    fam: &SubstitutionMatrixFamily,
    opts: &Options,
    bar: &ProgressBar,
) -> Result<Vec<Entry>> {
    match node {
        TreeNode::Leaf(e) => Ok(vec![e]),
        TreeNode::Internal(n) => {
            let node = *n;
            let cost = node.leaf_count as u64 * node.length as u64;
            let both_leaves = matches!(node.left, TreeNode::Leaf(_))
                && matches!(node.right, TreeNode::Leaf(_));
            let left = node.left;
            let right = node.right;

            let (a, b) = if opts.multi_threaded && !both_leaves {
                let (ra, rb) = rayon::join(
                    || create_alignment(left, fam, opts, bar),
                    || create_alignment(right, fam, opts, bar),
                );
                (ra?, rb?)
            } else {
                (
                    create_alignment(left, fam, opts, bar)?,
                    create_alignment(right, fam, opts, bar)?,
                )
            };

            let merged = align_profiles(
                a,
                b,
                node.d_left,
                node.d_right,
                fam,
                opts.gap_open,
                opts.gap_extend,
                opts.magic,
            )?;
            bar.inc(cost);
            Ok(merged)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries(texts: &[&str]) -> Vec<Entry> {
        texts
            .iter()
            .enumerate()
            .map(|(i, t)| Entry::from_text(i as u32, format!("s{i}"), t).unwrap())
            .collect()
    }

    #[test]
    fn one_sequence_is_insufficient() {
        let e = entries(&["ACDE"]);
        assert!(align_msa(e, &Options::default()).is_err());
    }

    #[test]
    fn rows_come_back_in_input_order_at_equal_length() {
        let e = entries(&["AAAA", "ATAA", "AACA"]);
        let msa = align_msa(e, &Options::default()).unwrap();
        assert_eq!(msa.len(), 3);
        let len = msa[0].len();
        assert!(msa.iter().all(|r| r.len() == len));
        assert_eq!(
            msa.iter().map(|r| r.nr).collect::<Vec<_>>(),
            vec![0, 1, 2]
        );
    }
}
