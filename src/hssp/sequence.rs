//! Aligned rows of an HSSP input alignment.
//!
//! Rows work on alignment text (ASCII bytes) rather than residue codes: the
//! reducer lowercases insertion flanks in place, blanks everything outside
//! the aligned window and normalizes internal gaps to `.`, exactly what the
//! report writer later emits. Each row owns its byte buffer with an
//! (offset, length) window over it, so trimming to the query window is
//! pointer arithmetic rather than a copy.

use crate::alphabet::{is_gap_char, residue_index};
use crate::error::{Error, Result};
use crate::matrices::SubstitutionMatrix;

/// A run of residues present in the hit but absent from the query, with the
/// lowercased flanking characters.
#[derive(Debug, Clone, Default)]
pub struct Insertion {
    /// Query position of the residue following the run (1-based).
    pub ipos: u32,
    /// Hit position of the first inserted residue (1-based).
    pub jpos: u32,
    /// Lowercased flank, inserted residues, lowercased flank.
    pub seq: String,
}

/// One row of the alignment, with the statistics the reducer derives from it.
#[derive(Debug, Clone)]
pub struct HsspRow {
    id: String,
    id2: String,
    acc: String,
    pdb: String,
    desc: String,

    data: Vec<u8>,
    offset: usize,
    size: usize,

    jfir: u32,
    jlas: u32,
    ifir: u32,
    ilas: u32,
    begin: usize,
    end: usize,
    length: u32,
    identical: u32,
    similar: u32,
    gaps: u32,
    gapn: u32,
    seqlen: u32,
    score: f32,
    insertions: Vec<Insertion>,
    pruned: bool,
}

/// Split accession and residue range out of a sequence identifier:
/// `sp|P12345|NAME` carries an accession, `NAME/12-88` carries the range
/// an iterative search reported for the hit.
fn parse_id(id: &str) -> (String, String, u32, u32) {
    let mut id2 = id.to_string();
    let mut acc = String::new();
    let mut jfir = 0u32;
    let mut jlas = 0u32;

    if let Some(rest) = id2
        .strip_prefix("tr|")
        .or_else(|| id2.strip_prefix("sp|"))
    {
        if let Some((a, name)) = rest.split_once('|') {
            acc = a.to_string();
            id2 = name.to_string();
        }
    }

    let range = id2.rsplit_once('/').and_then(|(name, range)| {
        let (s, e) = range.split_once('-')?;
        match (s.parse::<u32>(), e.parse::<u32>()) {
            (Ok(s), Ok(e)) => Some((name.to_string(), s, e)),
            _ => None,
        }
    });
    if let Some((name, s, e)) = range {
        jfir = s;
        jlas = e;
        id2 = name;
    }

    (id2, acc, jfir, jlas)
}

impl HsspRow {
    pub fn new(id: impl Into<String>, desc: impl Into<String>) -> Self {
        let id = id.into();
        let (id2, acc, jfir, jlas) = parse_id(&id);
        HsspRow {
            id,
            id2,
            acc,
            pdb: String::new(),
            desc: desc.into(),
            data: Vec::new(),
            offset: 0,
            size: 0,
            jfir,
            jlas,
            ifir: 0,
            ilas: 0,
            begin: 0,
            end: 0,
            length: 0,
            identical: 0,
            similar: 0,
            gaps: 0,
            gapn: 0,
            seqlen: 0,
            score: 0.0,
            insertions: Vec::new(),
            pruned: false,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn id2(&self) -> &str {
        &self.id2
    }

    pub fn acc(&self) -> &str {
        &self.acc
    }

    pub fn pdb(&self) -> &str {
        &self.pdb
    }

    pub fn desc(&self) -> &str {
        &self.desc
    }

    pub fn jfir(&self) -> u32 {
        self.jfir
    }

    pub fn jlas(&self) -> u32 {
        self.jlas
    }

    pub fn ifir(&self) -> u32 {
        self.ifir
    }

    pub fn ilas(&self) -> u32 {
        self.ilas
    }

    pub fn gaps(&self) -> u32 {
        self.gaps
    }

    pub fn gapn(&self) -> u32 {
        self.gapn
    }

    pub fn identical(&self) -> u32 {
        self.identical
    }

    pub fn similar(&self) -> u32 {
        self.similar
    }

    pub fn alignment_begin(&self) -> usize {
        self.begin
    }

    pub fn alignment_end(&self) -> usize {
        self.end
    }

    pub fn alignment_length(&self) -> u32 {
        self.length
    }

    pub fn seqlen(&self) -> u32 {
        self.seqlen
    }

    pub fn score(&self) -> f32 {
        self.score
    }

    pub fn insertions(&self) -> &[Insertion] {
        &self.insertions
    }

    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data[self.offset..self.offset + self.size]
    }

    #[inline]
    pub fn byte(&self, i: usize) -> u8 {
        self.data[self.offset + i]
    }

    #[inline]
    fn set_byte(&mut self, i: usize, v: u8) {
        self.data[self.offset + i] = v;
    }

    /// Filtered-out rows keep their storage but are skipped by the
    /// conservation kernel.
    pub fn prune(&mut self) {
        self.pruned = true;
    }

    pub fn pruned(&self) -> bool {
        self.pruned
    }

    /// Append alignment text to the row.
    pub fn append(&mut self, text: &str) {
        self.data.truncate(self.offset + self.size);
        self.data.extend_from_slice(text.as_bytes());
        self.size = self.data.len() - self.offset;
        self.end = self.size;
    }

    /// Trim the row to `n` columns starting at `pos` without copying.
    pub fn cut(&mut self, pos: usize, n: usize) {
        assert!(pos + n <= self.size);
        self.offset += pos;
        self.size = n;
        self.begin = self.begin.saturating_sub(pos);
        self.end = self.end.saturating_sub(pos).min(self.size);
    }

    /// Walk this row against the query: identity, similarity, gap runs,
    /// insertion extraction and the aligned window. Mutates the row text
    /// (lowercased insertion flanks, spaces outside the window, `.` for
    /// internal gaps).
    pub fn update(&mut self, q: &HsspRow, sim: &SubstitutionMatrix) -> Result<()> {
        if self.size != q.size {
            return Err(Error::InternalConsistency(format!(
                "row '{}' length {} differs from query length {}",
                self.id, self.size, q.size
            )));
        }

        self.seqlen = self
            .as_bytes()
            .iter()
            .filter(|&&c| !is_gap_char(c))
            .count() as u32;

        let mut ipos: u32 = 1;
        let mut jpos: u32 = if self.jfir == 0 { 1 } else { self.jfir };

        let mut sgapf = false;
        let mut qgapf = false;
        let mut gapn = 0u32;
        let mut gaps = 0u32;
        let mut ins = Insertion::default();

        self.ifir = 0;
        self.ilas = 0;
        self.identical = 0;
        self.similar = 0;
        self.gapn = 0;
        self.gaps = 0;
        self.length = 0;
        self.insertions.clear();

        let mut begin = usize::MAX;
        let mut end = 0usize;
        let mut length = 0u32;

        for i in 0..self.size {
            let qc = q.byte(i);
            let qgap = is_gap_char(qc);
            let sgap = is_gap_char(self.byte(i));

            if qgap && sgap {
                continue;
            }

            // only count length once the alignment has started
            if length > 0 {
                length += 1;
            }

            if sgap {
                if !(sgapf || qgapf) {
                    gaps += 1;
                }
                sgapf = true;
                gapn += 1;
                ipos += 1;
                continue;
            } else if qgap {
                if !qgapf {
                    // lowercase the preceding aligned flank in place
                    ins.ipos = ipos;
                    ins.jpos = jpos;
                    ins.seq.clear();
                    if i > 0 {
                        let mut g = i - 1;
                        while g > 0 && is_gap_char(self.byte(g)) {
                            g -= 1;
                        }
                        let flank = self.byte(g).to_ascii_lowercase();
                        self.set_byte(g, flank);
                        ins.seq.push(flank as char);
                    }
                }
                ins.seq.push(self.byte(i).to_ascii_lowercase() as char);

                if !(sgapf || qgapf) {
                    gaps += 1;
                }
                qgapf = true;
                gapn += 1;
                jpos += 1;
            } else {
                if qgapf {
                    // close the insertion with the following flank
                    let flank = self.byte(i).to_ascii_lowercase();
                    self.set_byte(i, flank);
                    ins.seq.push(flank as char);
                    self.insertions.push(std::mem::take(&mut ins));
                }

                sgapf = false;
                qgapf = false;

                self.ilas = ipos;
                if self.ifir == 0 {
                    self.ifir = ipos;
                    length = 1;
                } else {
                    // a complete aligned column: publish gap counters and length
                    self.gapn += gapn;
                    self.gaps += gaps;
                    self.length = length;
                }

                gaps = 0;
                gapn = 0;

                ipos += 1;
                jpos += 1;
            }

            let sc = self.byte(i);
            if qc == sc {
                self.identical += 1;
            }

            let rq = residue_class(qc, "query")?;
            let rs = residue_class(sc, "aligned")?;
            if let (Some(rq), Some(rs)) = (rq, rs) {
                if sim.score(rq as u8, rs as u8) >= 0 {
                    self.similar += 1;
                }
            }

            if begin == usize::MAX {
                begin = i;
            }
            end = i + 1;
        }

        if begin == usize::MAX {
            begin = 0;
            end = 0;
        } else {
            debug_assert!(begin <= self.size && end <= self.size);
            for i in 0..self.size {
                if i < begin || i >= end {
                    self.set_byte(i, b' ');
                } else if is_gap_char(self.byte(i)) {
                    self.set_byte(i, b'.');
                }
            }
        }

        self.begin = begin;
        self.end = end;
        self.score = if self.length > 0 {
            self.identical as f32 / self.length as f32
        } else {
            0.0
        };

        Ok(())
    }
}

/// Residue index for alignment text: `None` for a gap, fatal for any other
/// non-residue letter.
fn residue_class(c: u8, what: &str) -> Result<Option<usize>> {
    match residue_index(c) {
        Some(ix) => Ok(Some(ix)),
        None if is_gap_char(c) => Ok(None),
        None => Err(Error::InputValidation(format!(
            "invalid letter in {what} sequence ({})",
            c as char
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(id: &str, text: &str) -> HsspRow {
        let mut r = HsspRow::new(id, "");
        r.append(text);
        r
    }

    fn sim() -> &'static SubstitutionMatrix {
        SubstitutionMatrix::load("GONNET250").unwrap()
    }

    #[test]
    fn id_parsing_extracts_accession_and_range() {
        let r = HsspRow::new("sp|P12345|THIO_HUMAN/17-105", "a thioredoxin");
        assert_eq!(r.acc(), "P12345");
        assert_eq!(r.id2(), "THIO_HUMAN");
        assert_eq!(r.jfir(), 17);
        assert_eq!(r.jlas(), 105);
    }

    #[test]
    fn identical_rows_score_one() {
        let q = row("q", "ACDEFG");
        let mut s = row("s", "ACDEFG");
        s.update(&q, sim()).unwrap();
        assert_eq!(s.identical(), 6);
        assert_eq!(s.alignment_length(), 6);
        assert_eq!(s.score(), 1.0);
        assert_eq!(s.ifir(), 1);
        assert_eq!(s.ilas(), 6);
        assert_eq!(s.gaps(), 0);
        assert_eq!(s.gapn(), 0);
    }

    #[test]
    fn insertion_run_is_extracted_with_lowercased_flanks() {
        let q = row("q", "ACD---EFG");
        let mut s = row("s", "ACDKLMEFG");
        s.update(&q, sim()).unwrap();
        let ins = s.insertions();
        assert_eq!(ins.len(), 1);
        assert_eq!(ins[0].seq, "dklme");
        assert_eq!(ins[0].ipos, 4);
        assert_eq!(ins[0].jpos, 4);
        // flanks lowercased in place
        assert_eq!(s.byte(2), b'd');
        assert_eq!(s.byte(6), b'e');
    }

    #[test]
    fn window_is_blanked_and_gaps_normalized() {
        let q = row("q", "ACDEFGHI");
        let mut s = row("s", "--DE-GH-");
        s.update(&q, sim()).unwrap();
        assert_eq!(s.alignment_begin(), 2);
        assert_eq!(s.alignment_end(), 7);
        assert_eq!(s.as_bytes(), b"  DE.GH ");
        // one gap run of one column inside the window
        assert_eq!(s.gaps(), 1);
        assert_eq!(s.gapn(), 1);
    }

    #[test]
    fn invalid_letter_is_fatal_and_names_it() {
        let q = row("q", "ACDE");
        let mut s = row("s", "ACXE");
        let err = s.update(&q, sim()).unwrap_err();
        assert!(err.to_string().contains('X'));
    }

    #[test]
    fn cut_trims_to_a_window_without_copying() {
        let mut r = row("r", "ACDEFGHIKL");
        r.cut(2, 5);
        assert_eq!(r.len(), 5);
        assert_eq!(r.as_bytes(), b"DEFGH");
    }
}
