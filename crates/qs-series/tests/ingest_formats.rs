//! Integration test: exported energy histories in the formats seen in practice,
//! through ingestion, alignment and ratio columns.

use qs_core::{Tolerances, nearly_equal};
use qs_series::{Column, Frame, align, compute_ret, compute_ri, ingest, ingest_with_report};

const KE_WITH_HEADER: &str = "\u{feff}X,ALLKE\n\
0.0,0.0\n\
0.5,4.0\n\
1.0,2.0\n\
1.5,0.5\n\
2.0,0.2\n";

const IE_SEMICOLON: &str = "Time;ALLIE\n\
0.0;0.0\n\
1.0;40.0\n\
2.0;100.0\n\
\n\
not;a number\n";

const WK_HEADERLESS: &str = "0.0,0.0\n0.4,0.5\n1.0,5.0\n2.0,50.0\n";

#[test]
fn mixed_formats_flow_into_ratio_columns() {
    let ke = ingest(KE_WITH_HEADER.as_bytes(), "ALLKE");
    let (ie, ie_report) = ingest_with_report(IE_SEMICOLON.as_bytes(), "ALLIE");
    let wk = ingest(WK_HEADERLESS.as_bytes(), "ALLWK");

    assert_eq!(ke.len(), 5);
    assert_eq!(ie.len(), 3);
    assert_eq!(ie_report.dropped_rows(), 1);
    assert_eq!(wk.len(), 4);

    let energy = compute_ri(align(&ke, &ie));
    assert_eq!(energy.times(), &[0.0, 0.5, 1.0, 1.5, 2.0]);

    let ri = energy.column(Column::InertialRatio).expect("RI computed");
    // IE is zero at t=0, so RI is undefined there.
    assert_eq!(ri.get(0), None);
    // t=0.5: IE interpolated to 20, KE=4 -> 20%.
    let tol = Tolerances::default();
    assert!(nearly_equal(ri.get(1).unwrap(), 20.0, tol));
    // t=2.0: 0.2 / 100 -> 0.2%.
    assert!(nearly_equal(ri.get(4).unwrap(), 0.2, tol));

    let work = compute_ret(&wk);
    let ret: Vec<f64> = work
        .column(Column::WorkRatio)
        .unwrap()
        .iter()
        .map(|v| v.unwrap())
        .collect();
    assert!(nearly_equal(ret[1], 1.0, tol));
    assert!(nearly_equal(ret[2], 10.0, tol));
    assert!(nearly_equal(ret[3], 100.0, tol));
}

#[test]
fn energy_histories_without_overlap_align_to_nothing() {
    let ke = ingest(b"0,1\n1,1\n", "ALLKE");
    let ie = ingest(b"5,1\n6,1\n", "ALLIE");
    assert!(!ke.is_empty());
    assert!(!ie.is_empty());
    assert!(align(&ke, &ie).is_empty());
}
