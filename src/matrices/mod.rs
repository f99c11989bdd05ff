//! Substitution matrices and distance-indexed matrix families.
//!
//! A [`SubstitutionMatrix`] is a 20x20 integer score table over the crate
//! alphabet, carrying the mean off-diagonal score (`mismatch_average`), a
//! per-table scale factor, and a companion table shifted so that every entry
//! is non-negative (the profile alignment kernel requires scores >= 0).
//!
//! A [`SubstitutionMatrixFamily`] bundles four matrices selected by
//! evolutionary distance through three ordered cutoffs, the way progressive
//! aligners pick a deeper matrix for more divergent profiles.

mod tables;

use std::sync::OnceLock;

use rustc_hash::FxHashMap;

use crate::alphabet::{ALPHABET_SIZE, RESIDUES};
use crate::error::{Error, Result};

/// A 20x20 substitution score table in crate alphabet order.
pub struct SubstitutionMatrix {
    name: &'static str,
    table: [[i8; ALPHABET_SIZE]; ALPHABET_SIZE],
    /// `table` with the minimum entry subtracted from every cell.
    positive: [[i8; ALPHABET_SIZE]; ALPHABET_SIZE],
    mismatch_average: f32,
    scale_factor: f32,
}

impl SubstitutionMatrix {
    /// Look up a matrix by its registry name (`"BLOSUM62"`, `"GONNET250"`, ...).
    pub fn load(name: &str) -> Result<&'static SubstitutionMatrix> {
        registry()
            .get(name)
            .copied()
            .ok_or_else(|| Error::ResourceNotFound(format!("substitution matrix '{name}'")))
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Signed score for two residue codes.
    #[inline]
    pub fn score(&self, a: u8, b: u8) -> i32 {
        self.table[a as usize][b as usize] as i32
    }

    /// Non-negative-shifted score for two residue codes.
    #[inline]
    pub fn positive_score(&self, a: u8, b: u8) -> i32 {
        self.positive[a as usize][b as usize] as i32
    }

    /// Mean of the off-diagonal entries of the signed table.
    pub fn mismatch_average(&self) -> f32 {
        self.mismatch_average
    }

    pub fn scale_factor(&self) -> f32 {
        self.scale_factor
    }
}

fn registry() -> &'static FxHashMap<&'static str, &'static SubstitutionMatrix> {
    static REGISTRY: OnceLock<FxHashMap<&'static str, &'static SubstitutionMatrix>> =
        OnceLock::new();
    REGISTRY.get_or_init(|| {
        let mut map = FxHashMap::default();
        for raw in tables::REGISTRY {
            let mat: &'static SubstitutionMatrix = Box::leak(Box::new(expand(raw)));
            map.insert(mat.name, mat);
        }
        map
    })
}

/// Mirror a published lower-triangular table into a full matrix in crate
/// alphabet order and derive the shifted companion.
fn expand(raw: &tables::RawMatrix) -> SubstitutionMatrix {
    debug_assert_eq!(raw.lower.len(), ALPHABET_SIZE * (ALPHABET_SIZE + 1) / 2);

    // storage row index -> crate residue code
    let mut remap = [0usize; ALPHABET_SIZE];
    for (s, &letter) in tables::STORAGE_ORDER.iter().enumerate() {
        let code = RESIDUES
            .iter()
            .position(|&r| r == letter)
            .expect("storage order letter missing from alphabet");
        remap[s] = code;
    }

    let mut table = [[0i8; ALPHABET_SIZE]; ALPHABET_SIZE];
    let mut k = 0;
    for r in 0..ALPHABET_SIZE {
        for c in 0..=r {
            let v = raw.lower[k];
            k += 1;
            table[remap[r]][remap[c]] = v;
            table[remap[c]][remap[r]] = v;
        }
    }

    let mut min = i8::MAX;
    let mut sum = 0i32;
    let mut n = 0i32;
    for r in 0..ALPHABET_SIZE {
        for c in 0..ALPHABET_SIZE {
            min = min.min(table[r][c]);
            if r != c {
                sum += table[r][c] as i32;
                n += 1;
            }
        }
    }

    let mut positive = table;
    for row in positive.iter_mut() {
        for v in row.iter_mut() {
            *v -= min;
        }
    }

    SubstitutionMatrix {
        name: raw.name,
        table,
        positive,
        mismatch_average: sum as f32 / n as f32,
        scale_factor: raw.scale_factor,
    }
}

/// Four matrices indexed by evolutionary distance via three ordered cutoffs.
/// Index 0 serves the largest distances; walking past a cutoff moves to a
/// matrix built for closer sequences.
pub struct SubstitutionMatrixFamily {
    cutoff: [f32; 3],
    mats: [&'static SubstitutionMatrix; 4],
}

impl SubstitutionMatrixFamily {
    /// Load a family by name: `"BLOSUM"`, `"PAM"` or `"GONNET"`.
    pub fn load(name: &str) -> Result<Self> {
        match name {
            "BLOSUM" => Ok(SubstitutionMatrixFamily {
                cutoff: [0.8, 0.6, 0.3],
                mats: [
                    SubstitutionMatrix::load("BLOSUM30")?,
                    SubstitutionMatrix::load("BLOSUM45")?,
                    SubstitutionMatrix::load("BLOSUM62")?,
                    SubstitutionMatrix::load("BLOSUM80")?,
                ],
            }),
            "PAM" => Ok(SubstitutionMatrixFamily {
                cutoff: [0.8, 0.6, 0.4],
                mats: [
                    SubstitutionMatrix::load("PAM350")?,
                    SubstitutionMatrix::load("PAM120")?,
                    SubstitutionMatrix::load("PAM60")?,
                    SubstitutionMatrix::load("PAM20")?,
                ],
            }),
            "GONNET" => {
                let g = SubstitutionMatrix::load("GONNET250")?;
                Ok(SubstitutionMatrixFamily {
                    cutoff: [0.8, 0.6, 0.3],
                    mats: [g, g, g, g],
                })
            }
            _ => Err(Error::ResourceNotFound(format!(
                "substitution matrix family '{name}'"
            ))),
        }
    }

    /// Select the member matrix for an evolutionary distance.
    pub fn select(&self, distance: f32) -> &'static SubstitutionMatrix {
        let mut ix = 0;
        while ix < 3 && distance < self.cutoff[ix] {
            ix += 1;
        }
        self.mats[ix]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alphabet;

    #[test]
    fn registry_resolves_known_names() {
        for name in [
            "BLOSUM30", "BLOSUM45", "BLOSUM62", "BLOSUM80", "PAM20", "PAM60", "PAM120", "PAM350",
            "GONNET250",
        ] {
            assert_eq!(SubstitutionMatrix::load(name).unwrap().name(), name);
        }
    }

    #[test]
    fn unknown_name_is_fatal() {
        assert!(SubstitutionMatrix::load("BLOSUM999").is_err());
        assert!(SubstitutionMatrixFamily::load("VTML").is_err());
    }

    #[test]
    fn blosum62_known_scores() {
        let m = SubstitutionMatrix::load("BLOSUM62").unwrap();
        let ix = |c| alphabet::residue_index(c).unwrap() as u8;
        assert_eq!(m.score(ix(b'W'), ix(b'W')), 11);
        assert_eq!(m.score(ix(b'A'), ix(b'A')), 4);
        assert_eq!(m.score(ix(b'D'), ix(b'G')), -1);
        assert_eq!(m.score(ix(b'G'), ix(b'D')), -1);
    }

    #[test]
    fn positive_variant_is_non_negative() {
        for name in ["BLOSUM62", "PAM120", "GONNET250"] {
            let m = SubstitutionMatrix::load(name).unwrap();
            let mut min = i32::MAX;
            for a in 0..20u8 {
                for b in 0..20u8 {
                    min = min.min(m.positive_score(a, b));
                    assert!(m.positive_score(a, b) >= 0);
                }
            }
            // shifting by the minimum leaves at least one zero cell
            assert_eq!(min, 0);
        }
    }

    #[test]
    fn mismatch_average_is_negative() {
        for name in ["BLOSUM62", "BLOSUM30", "PAM350", "GONNET250"] {
            let m = SubstitutionMatrix::load(name).unwrap();
            assert!(m.mismatch_average() < 0.0, "{name}");
        }
    }

    #[test]
    fn family_selector_walks_cutoffs() {
        let fam = SubstitutionMatrixFamily::load("BLOSUM").unwrap();
        assert_eq!(fam.select(0.9).name(), "BLOSUM30");
        assert_eq!(fam.select(0.7).name(), "BLOSUM45");
        assert_eq!(fam.select(0.5).name(), "BLOSUM62");
        assert_eq!(fam.select(0.1).name(), "BLOSUM80");
    }
}
