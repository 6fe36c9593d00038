use collegeviz_core::inspect::{filter_schools, render_table, InspectFilter, TuitionKind};
use std::fs;

use collegeviz_core::tables::read_table;
use collegeviz_core::EnrollmentBin;
use polars::prelude::*;

fn binned_schools() -> DataFrame {
    df![
        "name" => &["Auburn University", "Ohio State University", "Kenyon College", "Oberlin College"],
        "state" => &["Alabama", "Ohio", "Ohio", "Ohio"],
        "type" => &["Public", "Public", "Private", "Private"],
        "in_state_total" => &[25_860i64, 23_336, 71_500, 73_000],
        "out_of_state_total" => &[45_108i64, 44_313, 71_500, 73_000],
        "early_career_pay" => &[54_400i64, 55_700, 50_300, 51_000],
        "enrollment" => &[33_015i64, 68_262, 1_730, 2_958],
        "enrollment_bin" => &["Large", "Large", "Small", "Small"],
    ]
    .unwrap()
}

fn names(df: &DataFrame) -> Vec<&str> {
    df.column("name")
        .unwrap()
        .str()
        .unwrap()
        .into_iter()
        .map(|value| value.unwrap())
        .collect()
}

#[test]
fn state_filter_ranks_by_salary_minus_tuition() {
    let df = binned_schools();
    let filter = InspectFilter {
        state: Some("Ohio".to_string()),
        ..Default::default()
    };

    let ranked = filter_schools(&df, &filter).expect("filter");
    assert_eq!(
        names(&ranked),
        vec!["Ohio State University", "Kenyon College", "Oberlin College"]
    );

    let net = ranked.column("net_value").unwrap().f64().unwrap();
    assert_eq!(net.get(0), Some(32_364.0));
    assert_eq!(net.get(1), Some(-21_200.0));
    assert_eq!(net.get(2), Some(-22_000.0));
}

#[test]
fn bin_and_tuition_filters_combine() {
    let df = binned_schools();
    let filter = InspectFilter {
        state: None,
        bin: Some(EnrollmentBin::Large),
        tuition: TuitionKind::OutOfState,
    };

    let ranked = filter_schools(&df, &filter).expect("filter");
    assert_eq!(names(&ranked), vec!["Ohio State University", "Auburn University"]);
    let net = ranked.column("net_value").unwrap().f64().unwrap();
    assert_eq!(net.get(1), Some(9_292.0));
}

#[test]
fn bin_filter_requires_binned_input() {
    let df = binned_schools().drop("enrollment_bin").unwrap();
    let filter = InspectFilter {
        bin: Some(EnrollmentBin::Small),
        ..Default::default()
    };
    assert!(filter_schools(&df, &filter).is_err());
}

#[test]
fn rendered_table_respects_limit() {
    let df = binned_schools();
    let ranked = filter_schools(&df, &InspectFilter::default()).expect("filter");
    let table = render_table(&ranked, TuitionKind::InState, 2).expect("render");

    assert_eq!(table.row_iter().count(), 2);
    let rendered = table.to_string();
    assert!(rendered.contains("Ohio State University"));
    assert!(rendered.contains("32364"));
    assert!(!rendered.contains("Kenyon College"));
}

#[test]
fn tuition_kind_parses_cli_spellings() {
    assert_eq!("in-state".parse::<TuitionKind>().unwrap(), TuitionKind::InState);
    assert_eq!(
        "out_of_state_total".parse::<TuitionKind>().unwrap(),
        TuitionKind::OutOfState
    );
    assert!("abroad".parse::<TuitionKind>().is_err());
}

#[test]
fn table_cells_from_csv_input_are_unquoted() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("final_data_bins.csv");
    fs::write(
        &path,
        "name,state,type,in_state_total,out_of_state_total,early_career_pay,enrollment,enrollment_bin\n\
         Ohio State University,Ohio,Public,23336,44313,55700,68262,Large\n\
         Kenyon College,Ohio,Private,71500,71500,50300,1730,Small\n",
    )
    .expect("write input");

    let df = read_table(&path).expect("read");
    let filter = InspectFilter {
        state: Some("Ohio".to_string()),
        bin: Some(EnrollmentBin::Large),
        tuition: TuitionKind::InState,
    };
    let ranked = filter_schools(&df, &filter).expect("filter");
    let table = render_table(&ranked, filter.tuition, 10).expect("render");

    let cells: Vec<String> = table
        .row_iter()
        .next()
        .expect("one row")
        .cell_iter()
        .map(|cell| cell.content())
        .collect();
    assert_eq!(
        cells,
        vec![
            "Ohio State University",
            "Ohio",
            "Public",
            "Large",
            "23336",
            "55700",
            "32364",
        ]
    );
    assert!(!table.to_string().contains('"'));
}
