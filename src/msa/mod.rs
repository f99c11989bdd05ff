//! Progressive multiple sequence alignment.
//!
//! Pipeline: pairwise distances over all entry pairs, neighbor-joining guide
//! tree, then bottom-up profile-vs-profile alignment along the tree.

pub mod align;
pub mod distance;
pub mod entry;
pub mod progressive;
pub mod tree;

pub use align::align_profiles;
pub use distance::{distance, distance_matrix};
pub use entry::Entry;
pub use progressive::align_msa;
pub use tree::{join_neighbours, TreeNode};
