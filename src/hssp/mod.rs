//! HSSP profile builder.
//!
//! Given an alignment whose first row is the query, reduce every row to hit
//! statistics, weight column conservation, profile per-residue variability
//! and emit the fixed-format homology report.

pub mod conservation;
pub mod hits;
pub mod report;
pub mod sequence;
pub mod variability;

use std::io::Write;

use anyhow::Result;

use crate::alphabet::is_gap_char;
use crate::error::Error;
use crate::hssp::conservation::conservation_weights;
use crate::hssp::hits::{build_hits, reduce_alignment};
use crate::hssp::report::{write_report, ReportInfo};
use crate::hssp::sequence::HsspRow;
use crate::hssp::variability::ResidueInfo;
use crate::options::Options;

/// Report header metadata supplied by the caller.
#[derive(Debug, Clone)]
pub struct ReportMeta {
    pub pdbid: String,
    /// Pre-formatted description lines, each ending in a newline.
    pub description: String,
    pub seqbase_name: String,
    pub seqbase_version: String,
}

/// Synthesized 34-character DSSP residue descriptor for runs without real
/// DSSP input (blank structure, zero bridge partners and accessibility).
pub fn dssp_stub(pdb_nr: u32, chain: char, letter: u8) -> String {
    let s = format!(
        "{:5}{:>2} {} {:12}{:4}{:4}{:4}",
        pdb_nr, chain, letter as char, "", 0, 0, 0
    );
    debug_assert_eq!(s.len(), 34);
    s
}

/// Cut trailing X residues of the query (and the columns under them) off
/// every row. SEQRES tails of undetermined residues carry no signal.
pub fn trim_trailing_x(msa: &mut [HsspRow]) {
    let (len, keep) = {
        let Some(q) = msa.first() else { return };
        let bytes = q.as_bytes();
        let mut keep = bytes.len();
        for i in (0..bytes.len()).rev() {
            let c = bytes[i];
            if is_gap_char(c) {
                continue;
            }
            if c == b'X' || c == b'x' {
                keep = i;
            } else {
                break;
            }
        }
        (bytes.len(), keep)
    };
    if keep < len {
        for r in msa.iter_mut() {
            r.cut(0, keep);
        }
    }
}

/// Run the full single-chain pipeline over an alignment and write the
/// report: reduce rows, filter, order hits, weight conservation, profile
/// residues, emit.
pub fn create_hssp<W: Write>(
    mut msa: Vec<HsspRow>,
    meta: &ReportMeta,
    opts: &Options,
    out: &mut W,
) -> Result<()> {
    const CHAIN: char = 'A';

    let width = msa.first().map(|r| r.len()).unwrap_or(0);
    if let Some(bad) = msa.iter().find(|r| r.len() != width) {
        return Err(Error::InputValidation(format!(
            "row '{}' length {} does not match the query length {}",
            bad.id(),
            bad.len(),
            width
        ))
        .into());
    }

    trim_trailing_x(&mut msa);
    reduce_alignment(&mut msa, opts.threshold)?;

    // residue rows for every non-gap column of the query
    let mut res: Vec<ResidueInfo> = Vec::new();
    for (col, &c) in msa[0].as_bytes().iter().enumerate() {
        if is_gap_char(c) {
            continue;
        }
        let nr = res.len() as u32 + 1;
        res.push(ResidueInfo::new(
            c,
            col,
            CHAIN,
            nr,
            nr,
            dssp_stub(nr, CHAIN, c),
        ));
    }

    let hits = build_hits(&mut msa, CHAIN, 0, opts.max_hits)?;

    let weights = conservation_weights(&msa)?;
    for ri in res.iter_mut().filter(|r| r.letter != 0) {
        ri.consweight = weights[ri.pos];
    }

    let query = msa[0].clone();
    for ri in res.iter_mut() {
        ri.calculate_variability(&hits, &msa, &query);
    }

    let info = ReportInfo {
        pdbid: meta.pdbid.clone(),
        description: meta.description.clone(),
        seqbase_name: meta.seqbase_name.clone(),
        seqbase_version: meta.seqbase_version.clone(),
        threshold: opts.threshold,
        seqlength: res.len() as u32,
        nchain: 1,
        kchain: 1,
        used_chains: CHAIN.to_string(),
    };
    write_report(&info, &hits, &res, &msa, out)?;
    Ok(())
}
