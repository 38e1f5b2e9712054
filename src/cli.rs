//! Hand-rolled command-line argument parsing.

use std::env;
use std::path::PathBuf;

/// Parsed CLI options.
#[derive(Debug)]
pub struct CliOptions {
    /// Input consumption CSV.
    pub input: Option<PathBuf>,
    /// Analysis configuration TOML.
    pub config: Option<PathBuf>,
    /// Rolling-window override.
    pub window: Option<usize>,
    /// Anomaly-threshold override.
    pub threshold: Option<f64>,
    /// Destination for the enriched-table CSV export.
    pub enriched_out: Option<PathBuf>,
    /// Destination directory for rendered charts.
    #[cfg(feature = "plot")]
    pub charts_out: Option<PathBuf>,
    /// Launch the interactive terminal UI instead of the batch report.
    #[cfg(feature = "tui")]
    pub tui: bool,
}

pub fn parse_args() -> Result<CliOptions, String> {
    let args: Vec<String> = env::args().skip(1).collect();
    parse_args_from(args)
}

fn parse_args_from(args: Vec<String>) -> Result<CliOptions, String> {
    let mut i = 0usize;
    let mut opts = CliOptions {
        input: None,
        config: None,
        window: None,
        threshold: None,
        enriched_out: None,
        #[cfg(feature = "plot")]
        charts_out: None,
        #[cfg(feature = "tui")]
        tui: false,
    };

    while i < args.len() {
        match args[i].as_str() {
            "--input" => {
                i += 1;
                let path = args
                    .get(i)
                    .ok_or_else(|| "missing value for --input (expected a CSV path)".to_string())?;
                if opts.input.replace(PathBuf::from(path)).is_some() {
                    return Err("--input provided more than once".to_string());
                }
            }
            "--config" => {
                i += 1;
                let path = args.get(i).ok_or_else(|| {
                    "missing value for --config (expected a TOML file path)".to_string()
                })?;
                if opts.config.replace(PathBuf::from(path)).is_some() {
                    return Err("--config provided more than once".to_string());
                }
            }
            "--window" => {
                i += 1;
                let value = args.get(i).ok_or_else(|| {
                    "missing value for --window (expected a positive integer)".to_string()
                })?;
                let window: usize = value
                    .parse()
                    .map_err(|_| format!("--window value \"{value}\" is not a valid integer"))?;
                if opts.window.replace(window).is_some() {
                    return Err("--window provided more than once".to_string());
                }
            }
            "--threshold" => {
                i += 1;
                let value = args.get(i).ok_or_else(|| {
                    "missing value for --threshold (expected a number)".to_string()
                })?;
                let threshold: f64 = value
                    .parse()
                    .map_err(|_| format!("--threshold value \"{value}\" is not a valid number"))?;
                if opts.threshold.replace(threshold).is_some() {
                    return Err("--threshold provided more than once".to_string());
                }
            }
            "--enriched-out" => {
                i += 1;
                let path = args.get(i).ok_or_else(|| {
                    "missing value for --enriched-out (expected a file path)".to_string()
                })?;
                if opts.enriched_out.replace(PathBuf::from(path)).is_some() {
                    return Err("--enriched-out provided more than once".to_string());
                }
            }
            #[cfg(feature = "plot")]
            "--charts-out" => {
                i += 1;
                let path = args.get(i).ok_or_else(|| {
                    "missing value for --charts-out (expected a directory path)".to_string()
                })?;
                if opts.charts_out.replace(PathBuf::from(path)).is_some() {
                    return Err("--charts-out provided more than once".to_string());
                }
            }
            #[cfg(feature = "tui")]
            "--tui" => {
                opts.tui = true;
            }
            "--help" | "-h" => {
                print_usage();
                std::process::exit(0);
            }
            other => return Err(format!("unknown argument: {other}")),
        }
        i += 1;
    }

    if opts.input.is_none() {
        return Err("--input is required (path to the consumption CSV)".to_string());
    }

    Ok(opts)
}

pub fn print_usage() {
    eprintln!("loadscope — electricity-consumption log analyzer");
    eprintln!();
    eprintln!("Usage: loadscope --input <csv> [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --input <path>          Consumption CSV (required)");
    eprintln!("  --config <path>         Analysis configuration TOML");
    eprintln!("  --window <n>            Override rolling window size (>= 1)");
    eprintln!("  --threshold <k>         Override anomaly threshold multiplier (> 0)");
    eprintln!("  --enriched-out <path>   Export the enriched table to CSV");
    #[cfg(feature = "plot")]
    eprintln!("  --charts-out <dir>      Render SVG charts into a directory");
    #[cfg(feature = "tui")]
    eprintln!("  --tui                   Launch the interactive terminal UI");
    eprintln!("  --help                  Show this help message");
}

#[cfg(test)]
mod tests {
    use super::parse_args_from;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn requires_input() {
        let err = parse_args_from(args(&[])).expect_err("input is mandatory");
        assert!(err.contains("--input"));
    }

    #[test]
    fn parses_input_path() {
        let opts = parse_args_from(args(&["--input", "energy.csv"])).expect("parse succeeds");
        assert_eq!(
            opts.input.as_deref().and_then(|p| p.to_str()),
            Some("energy.csv")
        );
        assert!(opts.config.is_none());
    }

    #[test]
    fn parses_overrides() {
        let opts = parse_args_from(args(&[
            "--input",
            "energy.csv",
            "--window",
            "8",
            "--threshold",
            "1.5",
        ]))
        .expect("parse succeeds");
        assert_eq!(opts.window, Some(8));
        assert_eq!(opts.threshold, Some(1.5));
    }

    #[test]
    fn rejects_duplicate_flags() {
        let err = parse_args_from(args(&["--input", "a.csv", "--input", "b.csv"]))
            .expect_err("duplicates are errors");
        assert!(err.contains("more than once"));
    }

    #[test]
    fn rejects_unknown_flags() {
        let err =
            parse_args_from(args(&["--input", "a.csv", "--bogus"])).expect_err("unknown flag");
        assert!(err.contains("--bogus"));
    }

    #[test]
    fn rejects_non_numeric_window() {
        let err = parse_args_from(args(&["--input", "a.csv", "--window", "wide"]))
            .expect_err("bad window");
        assert!(err.contains("wide"));
    }

    #[test]
    fn rejects_missing_value() {
        let err = parse_args_from(args(&["--input"])).expect_err("dangling flag");
        assert!(err.contains("missing value"));
    }
}
