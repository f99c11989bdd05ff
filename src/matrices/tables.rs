//! Compiled-in substitution matrix tables.
//!
//! Tables are stored the way they are published: lower-triangular, in the
//! conventional A R N D C Q E G H I L K M F P S T W Y V order. Loading
//! mirrors each triangle into a full 20x20 table and reorders it into the
//! crate alphabet (`crate::alphabet::RESIDUES`).

/// Residue order the published tables use.
pub(super) const STORAGE_ORDER: [u8; 20] = *b"ARNDCQEGHILKMFPSTWYV";

pub(super) struct RawMatrix {
    pub name: &'static str,
    pub scale_factor: f32,
    /// Lower triangle including the diagonal, row-major, 210 entries.
    pub lower: &'static [i8],
}

pub(super) const REGISTRY: &[RawMatrix] = &[
    RawMatrix {
        name: "BLOSUM62",
        scale_factor: 0.5,
        lower: &[
            /* A */ 4,
            /* R */ -1, 5,
            /* N */ -2, 0, 6,
            /* D */ -2, -2, 1, 6,
            /* C */ 0, -3, -3, -3, 9,
            /* Q */ -1, 1, 0, 0, -3, 5,
            /* E */ -1, 0, 0, 2, -4, 2, 5,
            /* G */ 0, -2, 0, -1, -3, -2, -2, 6,
            /* H */ -2, 0, 1, -1, -3, 0, 0, -2, 8,
            /* I */ -1, -3, -3, -3, -1, -3, -3, -4, -3, 4,
            /* L */ -1, -2, -3, -4, -1, -2, -3, -4, -3, 2, 4,
            /* K */ -1, 2, 0, -1, -3, 1, 1, -2, -1, -3, -2, 5,
            /* M */ -1, -1, -2, -3, -1, 0, -2, -3, -2, 1, 2, -1, 5,
            /* F */ -2, -3, -3, -3, -2, -3, -3, -3, -1, 0, 0, -3, 0, 6,
            /* P */ -1, -2, -2, -1, -3, -1, -1, -2, -2, -3, -3, -1, -2, -4, 7,
            /* S */ 1, -1, 1, 0, -1, 0, 0, 0, -1, -2, -2, 0, -1, -2, -1, 4,
            /* T */ 0, -1, 0, -1, -1, -1, -1, -2, -2, -1, -1, -1, -1, -2, -1, 1, 5,
            /* W */ -3, -3, -4, -4, -2, -2, -3, -2, -2, -3, -2, -3, -1, 1, -4, -3, -2, 11,
            /* Y */ -2, -2, -2, -3, -2, -1, -2, -3, 2, -1, -1, -2, -1, 3, -3, -2, -2, 2, 7,
            /* V */ 0, -3, -3, -3, -1, -2, -2, -3, -3, 3, 1, -2, 1, -1, -2, -2, 0, -3, -1, 4,
        ],
    },
    RawMatrix {
        name: "BLOSUM80",
        scale_factor: 0.5,
        lower: &[
            /* A */ 5,
            /* R */ -2, 6,
            /* N */ -2, -1, 6,
            /* D */ -2, -2, 1, 6,
            /* C */ -1, -4, -3, -4, 9,
            /* Q */ -1, 1, 0, -1, -4, 6,
            /* E */ -1, -1, -1, 1, -5, 2, 6,
            /* G */ 0, -3, -1, -2, -4, -2, -3, 6,
            /* H */ -2, 0, 0, -2, -4, 1, 0, -3, 8,
            /* I */ -2, -3, -4, -4, -2, -3, -4, -5, -4, 5,
            /* L */ -2, -3, -4, -5, -2, -3, -4, -4, -3, 1, 4,
            /* K */ -1, 2, 0, -1, -4, 1, 1, -2, -1, -3, -3, 5,
            /* M */ -1, -2, -3, -4, -2, 0, -2, -4, -2, 1, 2, -2, 6,
            /* F */ -3, -4, -4, -4, -3, -4, -4, -4, -2, -1, 0, -4, 0, 6,
            /* P */ -1, -2, -3, -2, -4, -2, -2, -3, -3, -4, -3, -1, -3, -4, 8,
            /* S */ 1, -1, 0, -1, -2, 0, 0, -1, -1, -3, -3, -1, -2, -3, -1, 5,
            /* T */ 0, -1, 0, -1, -1, -1, -1, -2, -2, -1, -2, -1, -1, -2, -2, 1, 5,
            /* W */ -3, -4, -4, -6, -3, -3, -4, -4, -3, -3, -2, -4, -2, 0, -5, -4, -4, 11,
            /* Y */ -2, -3, -3, -4, -3, -2, -3, -4, 2, -2, -2, -3, -2, 3, -4, -2, -2, 2, 7,
            /* V */ 0, -3, -4, -4, -1, -3, -3, -4, -4, 3, 1, -3, 1, -1, -3, -2, 0, -3, -2, 4,
        ],
    },
    RawMatrix {
        name: "BLOSUM45",
        scale_factor: 0.5,
        lower: &[
            /* A */ 5,
            /* R */ -2, 7,
            /* N */ -1, 0, 6,
            /* D */ -2, -1, 2, 7,
            /* C */ -1, -3, -2, -3, 12,
            /* Q */ -1, 1, 0, 0, -3, 6,
            /* E */ -1, 0, 0, 2, -3, 2, 6,
            /* G */ 0, -2, 0, -1, -3, -2, -2, 7,
            /* H */ -2, 0, 1, 0, -3, 1, 0, -2, 10,
            /* I */ -1, -3, -2, -4, -3, -2, -3, -4, -3, 5,
            /* L */ -1, -2, -3, -3, -2, -2, -2, -3, -2, 2, 5,
            /* K */ -1, 3, 0, 0, -3, 1, 1, -2, -1, -3, -3, 5,
            /* M */ -1, -1, -2, -3, -2, 0, -2, -2, 0, 2, 2, -1, 6,
            /* F */ -2, -2, -2, -4, -2, -4, -3, -3, -2, 0, 1, -3, 0, 8,
            /* P */ -1, -2, -2, -1, -4, -1, 0, -2, -2, -2, -3, -1, -2, -3, 9,
            /* S */ 1, -1, 1, 0, -1, 0, 0, 0, -1, -2, -3, -1, -2, -2, -1, 4,
            /* T */ 0, -1, 0, -1, -1, -1, -1, -2, -2, -1, -1, -1, -1, -1, -1, 2, 5,
            /* W */ -2, -2, -4, -4, -5, -2, -3, -2, -3, -2, -2, -2, -2, 1, -3, -4, -3, 15,
            /* Y */ -2, -1, -2, -2, -3, -1, -2, -3, 2, 0, 0, -1, 0, 3, -3, -2, -1, 3, 8,
            /* V */ 0, -2, -3, -3, -1, -3, -3, -3, -3, 3, 1, -2, 1, 0, -3, -1, 0, -3, -1, 5,
        ],
    },
    RawMatrix {
        name: "BLOSUM30",
        scale_factor: 0.5,
        lower: &[
            /* A */ 4,
            /* R */ -1, 8,
            /* N */ 0, -2, 8,
            /* D */ 0, -1, 1, 9,
            /* C */ -3, -2, -1, -3, 17,
            /* Q */ 1, 3, -1, -1, -2, 8,
            /* E */ 0, -1, -1, 1, 1, 2, 6,
            /* G */ 0, -2, 0, -1, -4, -2, -2, 8,
            /* H */ -2, -1, -1, -2, -5, 0, 0, -3, 14,
            /* I */ 0, -3, 0, -4, -2, -2, -3, -1, -2, 6,
            /* L */ -1, -2, -2, -1, 0, -2, -1, -2, -1, 2, 4,
            /* K */ 0, 1, 0, 0, -3, 0, 2, -1, -2, -2, -2, 4,
            /* M */ 1, 0, 0, -3, -2, -1, -1, -2, 2, 1, 2, 2, 6,
            /* F */ -2, -1, -1, -5, -3, -3, -4, -3, -3, 0, 2, -1, -2, 10,
            /* P */ -1, -1, -3, -1, -3, 0, 1, -1, 1, -3, -3, 1, -4, -4, 11,
            /* S */ 1, -1, 0, 0, -2, -1, 0, 0, -1, -1, -2, 0, -2, -1, -1, 4,
            /* T */ 1, -3, 1, -1, -2, 0, -2, -2, -2, 0, 0, -1, 0, -2, 0, 2, 5,
            /* W */ -5, 0, -7, -4, -2, -1, -1, 1, -5, -3, -2, -2, -3, 1, -3, -3, -5, 20,
            /* Y */ -4, 0, -4, -1, -6, -1, -2, -3, 0, -1, 3, -1, -1, 3, -2, -2, -1, 5, 9,
            /* V */ 1, -1, -2, -2, -2, -3, -3, -3, -3, 4, 1, -2, 0, 1, -4, -1, 1, -3, 1, 5,
        ],
    },
    RawMatrix {
        name: "PAM350",
        scale_factor: 1.0,
        lower: &[
            /* A */ 2,
            /* R */ -2, 6,
            /* N */ 0, 0, 2,
            /* D */ 0, -1, 2, 4,
            /* C */ -2, -4, -4, -5, 12,
            /* Q */ 0, 1, 1, 2, -5, 4,
            /* E */ 0, -1, 1, 3, -5, 2, 4,
            /* G */ 1, -3, 0, 1, -3, -1, 0, 5,
            /* H */ -1, 2, 2, 1, -3, 3, 1, -2, 6,
            /* I */ -1, -2, -2, -2, -2, -2, -2, -3, -2, 5,
            /* L */ -2, -3, -3, -4, -6, -2, -3, -4, -2, 2, 6,
            /* K */ -1, 3, 1, 0, -5, 1, 0, -2, 0, -2, -3, 5,
            /* M */ -1, 0, -2, -3, -5, -1, -2, -3, -2, 2, 4, 0, 6,
            /* F */ -3, -4, -3, -6, -4, -5, -5, -5, -2, 1, 2, -5, 0, 9,
            /* P */ 1, 0, 0, -1, -3, 0, -1, 0, 0, -2, -3, -1, -2, -5, 6,
            /* S */ 1, 0, 1, 0, 0, -1, 0, 1, -1, -1, -3, 0, -2, -3, 1, 2,
            /* T */ 1, -1, 0, 0, -2, -1, 0, 0, -1, 0, -2, 0, -1, -3, 0, 1, 3,
            /* W */ -6, 2, -4, -7, -8, -5, -7, -7, -3, -5, -2, -3, -4, 0, -6, -2, -5, 17,
            /* Y */ -3, -4, -2, -4, 0, -4, -4, -5, 0, -1, -1, -4, -2, 7, -5, -3, -3, 0, 10,
            /* V */ 0, -2, -2, -2, -2, -2, -2, -1, -2, 4, 2, -2, 2, -1, -1, -1, 0, -6, -2, 4,
        ],
    },
    RawMatrix {
        name: "PAM120",
        scale_factor: 1.0,
        lower: &[
            /* A */ 3,
            /* R */ -3, 6,
            /* N */ -1, -1, 4,
            /* D */ 0, -3, 2, 5,
            /* C */ -3, -4, -5, -7, 9,
            /* Q */ -1, 1, 0, 1, -7, 6,
            /* E */ 0, -3, 1, 3, -7, 2, 5,
            /* G */ 1, -4, 0, 0, -4, -3, -1, 5,
            /* H */ -3, 1, 2, 0, -4, 3, -1, -4, 7,
            /* I */ -1, -2, -2, -3, -3, -3, -3, -4, -4, 6,
            /* L */ -3, -4, -4, -5, -7, -2, -4, -5, -3, 1, 5,
            /* K */ -2, 2, 1, -1, -7, 0, -1, -3, -2, -3, -4, 5,
            /* M */ -2, -1, -3, -4, -6, -1, -3, -4, -4, 1, 3, 0, 8,
            /* F */ -4, -5, -4, -7, -6, -6, -7, -5, -3, 0, 0, -7, -1, 8,
            /* P */ 1, -1, -2, -3, -4, 0, -2, -2, -1, -3, -3, -2, -3, -5, 6,
            /* S */ 1, -1, 1, 0, 0, -2, -1, 1, -2, -2, -4, -1, -2, -3, 1, 3,
            /* T */ 1, -2, 0, -1, -3, -2, -2, -1, -3, 0, -3, -1, -1, -4, -1, 2, 4,
            /* W */ -7, 1, -5, -8, -8, -6, -8, -8, -3, -6, -3, -5, -6, -1, -7, -2, -6, 12,
            /* Y */ -4, -5, -2, -5, -1, -5, -5, -6, -1, -2, -2, -5, -4, 4, -6, -3, -3, -2, 8,
            /* V */ 0, -3, -3, -3, -3, -3, -3, -2, -3, 3, 1, -4, 1, -3, -2, -2, 0, -8, -3, 5,
        ],
    },
    RawMatrix {
        name: "PAM60",
        scale_factor: 1.0,
        lower: &[
            /* A */ 5,
            /* R */ -3, 8,
            /* N */ -2, -1, 6,
            /* D */ -1, -4, 3, 7,
            /* C */ -3, -4, -5, -7, 9,
            /* Q */ -2, 1, -1, 1, -7, 7,
            /* E */ 0, -3, 0, 3, -7, 2, 7,
            /* G */ 0, -4, -1, 0, -5, -3, -1, 6,
            /* H */ -3, 1, 1, -1, -5, 2, -1, -4, 8,
            /* I */ -2, -3, -3, -4, -3, -4, -3, -5, -4, 7,
            /* L */ -3, -5, -4, -6, -8, -3, -5, -6, -3, 1, 6,
            /* K */ -3, 3, 1, -1, -7, 0, -1, -3, -2, -3, -4, 6,
            /* M */ -2, -2, -4, -5, -7, -2, -4, -5, -5, 1, 2, 1, 10,
            /* F */ -5, -6, -5, -8, -7, -7, -8, -6, -3, 0, -1, -7, -1, 9,
            /* P */ 0, -1, -2, -3, -4, -1, -2, -2, -1, -4, -4, -3, -4, -6, 8,
            /* S */ 1, -1, 1, -1, 0, -2, -1, 0, -2, -3, -4, -1, -3, -4, 0, 5,
            /* T */ 1, -3, 0, -1, -3, -3, -2, -2, -4, 0, -3, -1, -1, -4, -1, 1, 6,
            /* W */ -8, 1, -5, -9, -9, -7, -9, -9, -4, -7, -3, -6, -7, -2, -8, -3, -7, 13,
            /* Y */ -4, -6, -3, -6, -2, -6, -5, -7, -1, -3, -3, -6, -5, 3, -7, -4, -4, -3, 10,
            /* V */ 0, -4, -4, -4, -3, -4, -3, -3, -4, 3, 0, -4, 1, -4, -3, -3, 0, -9, -4, 6,
        ],
    },
    RawMatrix {
        name: "PAM20",
        scale_factor: 1.0,
        lower: &[
            /* A */ 6,
            /* R */ -6, 8,
            /* N */ -3, -5, 8,
            /* D */ -2, -8, 2, 8,
            /* C */ -6, -7, -9, -12, 10,
            /* Q */ -3, 1, -3, -2, -12, 9,
            /* E */ -2, -8, -1, 3, -12, 2, 8,
            /* G */ -1, -8, -2, -3, -8, -6, -3, 7,
            /* H */ -6, 1, 0, -3, -7, 1, -4, -8, 10,
            /* I */ -4, -5, -4, -6, -5, -7, -5, -9, -8, 9,
            /* L */ -5, -8, -6, -11, -13, -4, -8, -9, -5, -1, 7,
            /* K */ -6, 2, 0, -4, -12, -2, -4, -6, -5, -5, -7, 7,
            /* M */ -4, -3, -7, -9, -12, -3, -6, -7, -9, -1, 1, -1, 12,
            /* F */ -7, -8, -8, -13, -11, -11, -12, -8, -5, -2, -2, -12, -3, 9,
            /* P */ 0, -3, -5, -7, -7, -2, -5, -5, -3, -7, -6, -6, -7, -9, 8,
            /* S */ 0, -2, 0, -3, -2, -4, -4, -1, -5, -6, -7, -3, -5, -6, -1, 7,
            /* T */ 0, -5, -1, -4, -7, -5, -5, -5, -6, -2, -6, -2, -3, -8, -3, 1, 7,
            /* W */ -12, -1, -7, -13, -14, -11, -15, -13, -6, -12, -5, -10, -11, -4, -12, -4, -11, 13,
            /* Y */ -7, -9, -4, -10, -3, -10, -8, -12, -3, -5, -6, -8, -9, 2, -12, -6, -6, -5, 10,
            /* V */ -2, -7, -7, -7, -5, -6, -6, -5, -6, 2, -2, -8, -1, -7, -5, -5, -2, -14, -6, 8,
        ],
    },
    RawMatrix {
        name: "GONNET250",
        scale_factor: 1.0,
        lower: &[
            /* A */ 2,
            /* R */ -1, 5,
            /* N */ 0, 0, 4,
            /* D */ 0, 0, 2, 5,
            /* C */ 1, -2, -2, -3, 12,
            /* Q */ 0, 2, 1, 1, -2, 3,
            /* E */ 0, 0, 1, 3, -3, 2, 4,
            /* G */ 1, -1, 0, 0, -2, -1, -1, 7,
            /* H */ -1, 1, 1, 0, -1, 1, 0, -1, 6,
            /* I */ -1, -2, -3, -4, -1, -2, -3, -4, -2, 4,
            /* L */ -1, -2, -3, -4, -2, -2, -3, -4, -2, 3, 4,
            /* K */ 0, 3, 1, 0, -3, 2, 1, -1, 1, -2, -2, 3,
            /* M */ -1, -2, -2, -3, -1, -1, -2, -4, -1, 3, 3, -1, 4,
            /* F */ -2, -3, -3, -5, -1, -3, -4, -5, 0, 1, 2, -3, 2, 7,
            /* P */ 0, -1, -1, -1, -3, 0, -1, -2, -1, -3, -2, -1, -2, -4, 8,
            /* S */ 1, 0, 1, 1, 0, 0, 0, 0, 0, -2, -2, 0, -1, -3, 0, 2,
            /* T */ 1, 0, 1, 0, -1, 0, 0, -1, 0, -1, -1, 0, -1, -2, 0, 2, 2,
            /* W */ -4, -2, -4, -5, -1, -3, -4, -4, -1, -2, -1, -4, -1, 4, -5, -3, -4, 14,
            /* Y */ -2, -2, -1, -3, -1, -2, -3, -4, 2, -1, 0, -2, 0, 5, -3, -2, -2, 4, 8,
            /* V */ 0, -2, -2, -3, 0, -2, -2, -3, -2, 3, 2, -2, 2, 0, -2, -1, 0, -3, -1, 3,
        ],
    },
];
