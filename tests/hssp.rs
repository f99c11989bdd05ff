//! End-to-end HSSP report scenarios.

use hsspal::hssp::sequence::HsspRow;
use hsspal::hssp::{create_hssp, ReportMeta};
use hsspal::msa::{align_msa, Entry};
use hsspal::options::Options;

fn rows(texts: &[(&str, &str)]) -> Vec<HsspRow> {
    texts
        .iter()
        .map(|(id, text)| {
            let mut r = HsspRow::new(*id, "");
            r.append(text);
            r
        })
        .collect()
}

fn meta() -> ReportMeta {
    ReportMeta {
        pdbid: "TEST".to_string(),
        description: String::new(),
        seqbase_name: "UniProtKB".to_string(),
        seqbase_version: "latest".to_string(),
    }
}

fn serial_options(threshold: f32) -> Options {
    Options {
        threshold,
        multi_threaded: false,
        ..Options::default()
    }
}

fn report(msa: Vec<HsspRow>, threshold: f32) -> String {
    let mut out = Vec::new();
    create_hssp(msa, &meta(), &serial_options(threshold), &mut out).unwrap();
    String::from_utf8(out).unwrap()
}

fn proteins_rows(report: &str) -> Vec<&str> {
    let mut in_block = false;
    let mut out = Vec::new();
    for line in report.lines() {
        if line.starts_with("## PROTEINS") {
            in_block = true;
            continue;
        }
        if in_block {
            if line.starts_with("## ") {
                break;
            }
            if !line.starts_with("  NR.") {
                out.push(line);
            }
        }
    }
    out
}

#[test]
fn identical_pair_reports_full_identity() {
    let text = report(rows(&[("query", "ACDEFG"), ("twin", "ACDEFG")]), 0.05);

    assert!(text.starts_with(
        "HSSP       HOMOLOGY DERIVED SECONDARY STRUCTURE OF PROTEINS , VERSION 2.0 2011\n"
    ));
    assert!(text.contains("PDBID      TEST"));
    assert!(text.contains("SEQBASE    UniProtKB version latest"));
    assert!(text.contains("THRESHOLD  according to: t(L)=(290.15 * L ** -0.562) + 5"));
    assert!(text.trim_end().ends_with("//"));

    let prot = proteins_rows(&text);
    assert_eq!(prot.len(), 1);
    let row = prot[0];
    // "%5d : %-12s%-4s    %4.2f  %4.2f..." puts the serial in the first five
    // columns and both ratios at 1.00
    assert_eq!(&row[0..7], "    1 :");
    assert_eq!(&row[8..20], "twin        ");
    assert!(row.contains("1.00  1.00"));
}

#[test]
fn end_to_end_from_progressive_alignment() {
    let entries: Vec<Entry> = ["MKTAYIAKQRQISFVKSHFSRQLEERLGLIEVQ", "MKTAYIAKQRQISFVKSHFSRQLEERLGLIEVQ"]
        .iter()
        .enumerate()
        .map(|(i, t)| Entry::from_text(i as u32, format!("seq{i}"), t).unwrap())
        .collect();
    let msa = align_msa(entries, &serial_options(0.05)).unwrap();

    let hssp_rows: Vec<HsspRow> = msa
        .iter()
        .map(|e| {
            let mut r = HsspRow::new(e.id.clone(), "");
            r.append(&e.decoded());
            r
        })
        .collect();

    let text = report(hssp_rows, 0.05);
    assert_eq!(proteins_rows(&text).len(), 1);
    assert!(text.contains("1.00  1.00"));
}

#[test]
fn insertion_record_has_lowercase_flanks_and_length_three() {
    let text = report(
        rows(&[("query", "ACD---EFGHIKLMN"), ("hit", "ACDWLMEFGHIKLMN")]),
        -1.0,
    );

    assert!(text.contains("## INSERTION LIST"));
    let line = text
        .lines()
        .find(|l| l.contains("dwlme"))
        .expect("insertion sequence emitted");
    let fields: Vec<&str> = line.split_whitespace().collect();
    // AliNo IPOS JPOS Len Sequence
    assert_eq!(fields, ["1", "4", "4", "3", "dwlme"]);
}

#[test]
fn threshold_filters_and_orders_hits() {
    let query = "ACDEFGHIK";
    let mut input = vec![("query".to_string(), query.to_string())];
    // 23 perfect rows, 2 rows with a single mismatch, 25 rows far below the
    // threshold
    for i in 0..23 {
        input.push((format!("full{i:02}"), query.to_string()));
    }
    input.push(("partial1".to_string(), "ACDEFGHIW".to_string()));
    input.push(("partial2".to_string(), "WCDEFGHIK".to_string()));
    for i in 0..25 {
        input.push((format!("junk{i:02}"), "WWWWWWWWW".to_string()));
    }

    let msa: Vec<HsspRow> = input
        .iter()
        .map(|(id, text)| {
            let mut r = HsspRow::new(id.as_str(), "");
            r.append(text);
            r
        })
        .collect();

    let text = report(msa, 0.05);
    let prot = proteins_rows(&text);
    assert_eq!(prot.len(), 25);

    // identity descending: the two partial hits come last
    assert!(prot[22].contains("1.00"));
    assert!(prot[23].contains("0.89"));
    assert!(prot[24].contains("0.89"));
    assert!(!text.contains("junk"));
}

#[test]
fn profile_block_distributions_sum_to_one_hundred() {
    let text = report(
        rows(&[
            ("query", "AAAAAAAAAA"),
            ("a", "ATAAAAAAAA"),
            ("b", "AACAAAAAAA"),
        ]),
        -1.0,
    );

    let mut in_profile = false;
    let mut checked = 0;
    for line in text.lines() {
        if line.starts_with("## SEQUENCE PROFILE AND ENTROPY") {
            in_profile = true;
            continue;
        }
        if in_profile {
            if line.starts_with(" SeqNo") {
                continue;
            }
            if line.starts_with("## ") {
                break;
            }
            // 20 four-column buckets start after "SeqNo PDBNo C" (12 chars)
            let buckets: u32 = (0..20)
                .map(|i| {
                    line[12 + i * 4..12 + (i + 1) * 4]
                        .trim()
                        .parse::<u32>()
                        .unwrap()
                })
                .sum();
            assert!((99..=101).contains(&buckets), "line: {line}");
            checked += 1;
        }
    }
    assert_eq!(checked, 10);
}

#[test]
fn alignment_blocks_carry_the_hit_letters() {
    let text = report(
        rows(&[("query", "ACDEFGHIKLMN"), ("hit", "ACDEFGHIKLMN")]),
        0.0,
    );
    assert!(text.contains("## ALIGNMENTS 0001 - 0001"));
    // every residue line in the alignment block ends with the hit's letter:
    // " SeqNo" + 34-char dssp + NOCC + VAR + the 1-wide hit slice
    let mut seen = 0;
    for line in text.lines() {
        if line.len() != 52 || line[0..6].trim().parse::<u32>().is_err() {
            continue;
        }
        let c = line.chars().last().unwrap();
        if "ACDEFGHIKLMN".contains(c) {
            seen += 1;
        }
    }
    assert_eq!(seen, 12);
}

#[test]
fn too_few_sequences_is_fatal() {
    let msa = rows(&[("query", "ACDEFG")]);
    let mut out = Vec::new();
    let err = create_hssp(msa, &meta(), &serial_options(0.05), &mut out).unwrap_err();
    assert!(err.to_string().contains("insufficient data"));
}

#[test]
fn no_surviving_hits_is_fatal() {
    let msa = rows(&[("query", "ACDEFGHIK"), ("junk", "WWWWWWWWW")]);
    let mut out = Vec::new();
    let err = create_hssp(msa, &meta(), &serial_options(0.05), &mut out).unwrap_err();
    assert!(err.to_string().contains("insufficient data"));
}
