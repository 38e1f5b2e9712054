//! Batch entry point — CLI wiring, ingestion, and report output.

use std::process;

use log::{info, warn};

use loadscope::analysis::pipeline;
use loadscope::cli;
use loadscope::config::AnalysisConfig;
use loadscope::io::export::export_csv;
use loadscope::io::ingest::load_csv_file;
use loadscope::report::Report;

fn main() {
    env_logger::init();

    let opts = cli::parse_args().unwrap_or_else(|e| {
        eprintln!("error: {e}");
        cli::print_usage();
        process::exit(2);
    });

    // Load config, then apply CLI overrides on top
    let mut config = match opts.config {
        Some(ref path) => match AnalysisConfig::from_toml_file(path) {
            Ok(cfg) => cfg,
            Err(e) => {
                eprintln!("{e}");
                process::exit(1);
            }
        },
        None => AnalysisConfig::default(),
    };
    if let Some(window) = opts.window {
        config.rolling.window = window;
    }
    if let Some(threshold) = opts.threshold {
        config.anomaly.threshold = threshold;
    }

    let errors = config.validate();
    if !errors.is_empty() {
        for e in &errors {
            eprintln!("{e}");
        }
        process::exit(1);
    }

    let input_path = opts.input.as_deref().unwrap_or_else(|| {
        // parse_args enforces --input
        eprintln!("error: --input is required");
        process::exit(2);
    });

    let records = match load_csv_file(input_path, &config.input) {
        Ok(records) => records,
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    };
    info!(
        "loaded {} records from {}",
        records.len(),
        input_path.display()
    );

    #[cfg(feature = "tui")]
    if opts.tui {
        if let Err(e) = loadscope::tui::run(records, &config) {
            eprintln!("error: {e}");
            process::exit(1);
        }
        return;
    }

    let analysis = match pipeline::run(&records, &config) {
        Ok(analysis) => analysis,
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    };

    let report = Report::new(&analysis);
    let spikes = report.anomalies().count();
    if spikes > 0 {
        warn!("{spikes} high-consumption spikes flagged");
    }
    println!("{report}");

    if let Some(ref path) = opts.enriched_out {
        if let Err(e) = export_csv(&analysis.records, path) {
            eprintln!("error: failed to write enriched CSV: {e}");
            process::exit(1);
        }
        eprintln!("Enriched table written to {}", path.display());
    }

    #[cfg(feature = "plot")]
    if let Some(ref dir) = opts.charts_out {
        if let Err(e) = loadscope::plot::render_all(&analysis, dir) {
            eprintln!("error: failed to render charts: {e}");
            process::exit(1);
        }
        eprintln!("Charts written to {}", dir.display());
    }
}
