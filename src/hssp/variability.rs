//! Per-residue variability: amino-acid distribution, entropy, insertion and
//! deletion counts for every column of the query.

use crate::alphabet::{is_gap_char, residue_index, ALPHABET_SIZE};
use crate::hssp::hits::Hit;
use crate::hssp::sequence::HsspRow;

/// One residue of the query with its column statistics. `letter == 0` marks
/// a chain-break placeholder row.
#[derive(Debug, Clone)]
pub struct ResidueInfo {
    pub letter: u8,
    pub chain: char,
    /// Sequential residue number in the report (1-based).
    pub seq_nr: u32,
    pub pdb_nr: u32,
    /// Column of this residue in the alignment.
    pub pos: usize,
    /// 34-character DSSP residue descriptor.
    pub dssp: String,
    /// Per-residue occurrence counts, percent-scaled after calculation.
    pub dist: [u32; ALPHABET_SIZE],
    pub nocc: u32,
    pub ndel: u32,
    pub nins: u32,
    pub entropy: f32,
    pub consweight: f32,
}

impl ResidueInfo {
    /// Placeholder row between chains.
    pub fn chain_break(seq_nr: u32) -> Self {
        ResidueInfo {
            letter: 0,
            chain: ' ',
            seq_nr,
            pdb_nr: 0,
            pos: 0,
            dssp: String::new(),
            dist: [0; ALPHABET_SIZE],
            nocc: 1,
            ndel: 0,
            nins: 0,
            entropy: 0.0,
            consweight: 1.0,
        }
    }

    pub fn new(
        letter: u8,
        pos: usize,
        chain: char,
        seq_nr: u32,
        pdb_nr: u32,
        dssp: String,
    ) -> Self {
        ResidueInfo {
            letter,
            chain,
            seq_nr,
            pdb_nr,
            pos,
            dssp,
            dist: [0; ALPHABET_SIZE],
            nocc: 1,
            ndel: 0,
            nins: 0,
            entropy: 0.0,
            consweight: 1.0,
        }
    }

    /// Distribution, entropy and indel counts over all hits on this chain.
    /// `dist` ends up percent-scaled, rounded to nearest.
    pub fn calculate_variability(&mut self, hits: &[Hit], msa: &[HsspRow], q: &HsspRow) {
        if hits.is_empty() {
            return;
        }

        self.dist = [0; ALPHABET_SIZE];
        self.entropy = 0.0;

        let Some(ix) = residue_index(self.letter) else {
            return;
        };
        self.dist[ix] = 1;

        for hit in hits {
            if hit.chain != self.chain {
                continue;
            }
            let t = &msa[hit.row];
            if let Some(ix) = residue_index(t.byte(self.pos)) {
                self.nocc += 1;
                self.dist[ix] += 1;
            }
        }

        let mut entropy = 0f64;
        for d in self.dist.iter_mut() {
            let freq = *d as f64 / self.nocc as f64;
            *d = (100.0 * freq + 0.5) as u32;
            if freq > 0.0 {
                entropy -= freq * freq.ln();
            }
        }
        self.entropy = entropy as f32;

        // a gap in the next query column marks a latent insertion point
        let next_is_gap = self.pos + 1 < q.len() && is_gap_char(q.byte(self.pos + 1));

        for hit in hits {
            if hit.chain != self.chain {
                continue;
            }
            let t = &msa[hit.row];

            if self.pos > t.alignment_begin()
                && self.pos < t.alignment_end()
                && is_gap_char(t.byte(self.pos))
            {
                self.ndel += 1;
            }

            if next_is_gap && t.byte(self.pos).is_ascii_lowercase() && t.byte(self.pos) <= b'y' {
                self.nins += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hssp::hits::{build_hits, reduce_alignment};

    fn msa(rows: &[(&str, &str)]) -> Vec<HsspRow> {
        rows.iter()
            .map(|(id, text)| {
                let mut r = HsspRow::new(*id, "");
                r.append(text);
                r
            })
            .collect()
    }

    fn residues_of(q: &HsspRow) -> Vec<ResidueInfo> {
        let mut out = Vec::new();
        for (i, &c) in q.as_bytes().iter().enumerate() {
            if !is_gap_char(c) {
                out.push(ResidueInfo::new(
                    c,
                    i,
                    'A',
                    out.len() as u32 + 1,
                    out.len() as u32 + 1,
                    String::new(),
                ));
            }
        }
        out
    }

    #[test]
    fn distribution_sums_to_one_hundred() {
        let mut m = msa(&[
            ("q", "ACDEFGHIKL"),
            ("a", "ACDEFGHIKL"),
            ("b", "ACDEFGHIKV"),
            ("c", "MCDEFGHIKL"),
        ]);
        reduce_alignment(&mut m, 0.0).unwrap();
        let hits = build_hits(&mut m, 'A', 0, 0).unwrap();
        let q = m[0].clone();
        for mut ri in residues_of(&q) {
            ri.calculate_variability(&hits, &m, &q);
            assert_eq!(ri.nocc, 4);
            let total: u32 = ri.dist.iter().sum();
            assert!((99..=101).contains(&total), "total = {total}");
            assert!(ri.entropy >= 0.0 && ri.entropy <= (20f32).ln());
        }
    }

    #[test]
    fn deletions_and_insertions_are_counted() {
        // hit "del" has an internal deletion; hit "ins" has an insertion
        // against the query
        let mut m = msa(&[
            ("q", "ACDEFGHI---KLMNPQRST"),
            ("del", "ACDEFGHI---KLM-PQRST"),
            ("ins", "ACDEFGHIWWWKLMNPQRST"),
        ]);
        reduce_alignment(&mut m, 0.0).unwrap();
        let hits = build_hits(&mut m, 'A', 0, 0).unwrap();
        let q = m[0].clone();
        let residues = residues_of(&q);

        // query column 7 ('I') precedes the query-gap run
        let mut ri = residues.iter().find(|r| r.pos == 7).unwrap().clone();
        ri.calculate_variability(&hits, &m, &q);
        assert_eq!(ri.nins, 1);

        // the deleted column in "del" lies strictly inside its window
        let del_col = 14;
        let mut rd = residues.iter().find(|r| r.pos == del_col).unwrap().clone();
        rd.calculate_variability(&hits, &m, &q);
        assert_eq!(rd.ndel, 1);
    }
}
