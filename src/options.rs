//! Options consumed by the alignment and HSSP cores.

/// Tunables threaded through the pipelines. Carried explicitly rather than
/// kept in globals; only the residue lookup table is process-wide.
#[derive(Debug, Clone)]
pub struct Options {
    /// Offset added to the homology threshold curve when filtering hits.
    pub threshold: f32,
    /// Keep at most this many hits after sorting; 0 keeps all.
    pub max_hits: u32,
    /// Chains shorter than this are skipped by the rim.
    pub min_seq_length: u32,
    /// Drop fixed-position anchors before aligning.
    pub ignore_positions: bool,
    /// Use one worker instead of hardware concurrency.
    pub multi_threaded: bool,
    /// Substitution matrix family for progressive alignment.
    pub matrix_name: String,
    /// Base gap open penalty before position-specific rescaling.
    pub gap_open: f32,
    /// Base gap extend penalty before position-specific rescaling.
    pub gap_extend: f32,
    /// Empirical gap-open scaling constant.
    pub magic: f32,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            threshold: 0.05,
            max_hits: 1500,
            min_seq_length: 25,
            ignore_positions: false,
            multi_threaded: true,
            matrix_name: "BLOSUM".to_string(),
            gap_open: 10.0,
            gap_extend: 0.2,
            magic: 0.1,
        }
    }
}
