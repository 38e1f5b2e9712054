//! End-to-end batch flow: CSV in, report and enriched CSV out.

mod common;

use loadscope::analysis::pipeline;
use loadscope::config::AnalysisConfig;
use loadscope::error::PipelineError;
use loadscope::io::export::write_csv;
use loadscope::io::ingest::read_records;
use loadscope::report::Report;

fn sample_csv(rows: usize) -> String {
    let mut csv = String::from("Datetime,Consumption_kWh\n");
    for i in 0..rows {
        let day = 1 + i / 24;
        let hour = i % 24;
        csv.push_str(&format!(
            "2024-01-{day:02} {hour:02}:00:00,{:.1}\n",
            1.0 + (i % 9) as f64
        ));
    }
    csv
}

#[test]
fn csv_to_enriched_csv_preserves_rows() {
    let cfg = AnalysisConfig::default();
    let records = read_records(sample_csv(72).as_bytes(), &cfg.input).expect("ingest succeeds");
    assert_eq!(records.len(), 72);

    let analysis = pipeline::run(&records, &cfg).expect("pipeline runs");
    assert_eq!(analysis.records.len(), 72);

    let mut buf = Vec::new();
    write_csv(&analysis.records, &mut buf).expect("export succeeds");
    let output = String::from_utf8(buf).expect("valid UTF-8");
    // 1 header + 72 data rows
    assert_eq!(output.lines().count(), 73);
}

#[test]
fn report_over_ingested_data_renders() {
    let cfg = AnalysisConfig::default();
    let records = read_records(sample_csv(48).as_bytes(), &cfg.input).expect("ingest succeeds");
    let analysis = pipeline::run(&records, &cfg).expect("pipeline runs");
    let text = format!("{}", Report::new(&analysis));
    assert!(text.contains("Dataset Preview (48 records):"));
    assert!(text.contains("--- Summary Statistics ---"));
    assert!(!text.contains("NaN"));
}

#[test]
fn header_only_input_flows_through() {
    let cfg = AnalysisConfig::default();
    let records =
        read_records("Datetime,Consumption_kWh\n".as_bytes(), &cfg.input).expect("empty ok");
    let analysis = pipeline::run(&records, &cfg).expect("empty pipeline run");
    assert!(analysis.records.is_empty());
    assert_eq!(analysis.summary.mean_load, None);
}

#[test]
fn malformed_input_fails_fast() {
    let cfg = AnalysisConfig::default();
    let bad_column = "Timestamp,Consumption_kWh\n2024-01-01 00:00:00,1.0\n";
    assert!(matches!(
        read_records(bad_column.as_bytes(), &cfg.input),
        Err(PipelineError::MalformedInput { row: 0, .. })
    ));

    let bad_cell = "Datetime,Consumption_kWh\n2024-01-01 00:00:00,one\n";
    assert!(matches!(
        read_records(bad_cell.as_bytes(), &cfg.input),
        Err(PipelineError::MalformedInput { row: 1, .. })
    ));
}

#[test]
fn config_overrides_change_derivations() {
    let records = common::hourly_records(&[10.0, 12.0, 11.0, 50.0, 13.0]);

    let mut wide = AnalysisConfig::default();
    wide.rolling.window = 5;
    let analysis = pipeline::run(&records, &wide).expect("pipeline runs");
    assert_eq!(
        analysis
            .records
            .iter()
            .filter(|r| r.rolling_avg.is_some())
            .count(),
        1
    );

    let mut narrow = AnalysisConfig::default();
    narrow.rolling.window = 2;
    let analysis = pipeline::run(&records, &narrow).expect("pipeline runs");
    assert_eq!(
        analysis
            .records
            .iter()
            .filter(|r| r.rolling_avg.is_some())
            .count(),
        4
    );
}
