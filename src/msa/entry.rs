//! Sequence entries: the rows a progressive alignment is built from.

use crate::alphabet::{self, GAP};
use crate::error::{Error, Result};

/// One input sequence with its alignment state.
///
/// `positions` carries optional fixed-position anchors (0 = unconstrained);
/// when present it stays the same length as `seq` through every gap
/// insertion. `weight` starts at 1 and grows during guide-tree construction.
#[derive(Debug, Clone)]
pub struct Entry {
    /// Input order; stable tiebreaker and final sort key.
    pub nr: u32,
    pub id: String,
    pub description: Option<String>,
    /// Residue codes, [`GAP`] included once aligned.
    pub seq: Vec<u8>,
    /// Fixed alignment positions; empty when absent.
    pub positions: Vec<u16>,
    /// Per-residue secondary structure letters; may be shorter than `seq`.
    pub ss: Vec<u8>,
    pub weight: f32,
}

impl Entry {
    pub fn new(nr: u32, id: impl Into<String>, seq: Vec<u8>) -> Self {
        Entry {
            nr,
            id: id.into(),
            description: None,
            seq,
            positions: Vec::new(),
            ss: Vec::new(),
            weight: 1.0,
        }
    }

    /// Decode residue text into a new entry.
    pub fn from_text(nr: u32, id: impl Into<String>, text: &str) -> Result<Self> {
        Ok(Entry::new(nr, id, alphabet::encode(text)?))
    }

    pub fn len(&self) -> usize {
        self.seq.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seq.is_empty()
    }

    /// Splice a gap at `pos`, appending when `pos` is past the end. A
    /// positions vector, when present, gets a 0 spliced at the same index.
    pub fn insert_gap(&mut self, pos: usize) {
        if pos >= self.seq.len() {
            self.seq.push(GAP);
            if !self.positions.is_empty() {
                self.positions.push(0);
            }
        } else {
            self.seq.insert(pos, GAP);
            if !self.positions.is_empty() {
                self.positions.insert(pos, 0);
            }
        }
        debug_assert!(self.positions.is_empty() || self.positions.len() == self.seq.len());
    }

    pub fn append_gap(&mut self) {
        self.seq.push(GAP);
        if !self.positions.is_empty() {
            self.positions.push(0);
        }
    }

    /// In-place gap compaction. Forbidden while a positions vector co-exists:
    /// compaction would desynchronize it, so the caller must dump positions
    /// first.
    pub fn remove_gaps(&mut self) -> Result<()> {
        if !self.positions.is_empty() {
            return Err(Error::InternalConsistency(format!(
                "remove_gaps on entry '{}' which still carries positions",
                self.id
            )));
        }
        self.seq.retain(|&c| c != GAP);
        Ok(())
    }

    /// Drop the fixed-position anchors.
    pub fn dump_positions(&mut self) {
        self.positions.clear();
    }

    pub fn decoded(&self) -> String {
        alphabet::decode(&self.seq)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(text: &str) -> Entry {
        Entry::from_text(0, "e", text).unwrap()
    }

    #[test]
    fn insert_gap_splices_positions() {
        let mut e = entry("ACDE");
        e.positions = vec![1, 2, 3, 4];
        e.insert_gap(2);
        assert_eq!(e.decoded(), "AC-DE");
        assert_eq!(e.positions, vec![1, 2, 0, 3, 4]);
        e.insert_gap(99);
        assert_eq!(e.decoded(), "AC-DE-");
        assert_eq!(e.positions.len(), e.seq.len());
    }

    #[test]
    fn remove_gaps_requires_dumped_positions() {
        let mut e = entry("A-C-E");
        e.positions = vec![1, 0, 2, 0, 3];
        assert!(e.remove_gaps().is_err());
        e.dump_positions();
        e.remove_gaps().unwrap();
        assert_eq!(e.decoded(), "ACE");
    }
}
