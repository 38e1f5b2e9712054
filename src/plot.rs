//! SVG chart rendering for batch runs.
//!
//! Feature-gated behind `plot`. Renders the three figures of the batch
//! report: the consumption time series, the rolling trend (actual plus
//! rolling average), and the weekday/weekend comparison bars.

use std::error::Error;
use std::path::Path;

use plotters::prelude::*;

use crate::analysis::pipeline::Analysis;

const CHART_SIZE: (u32, u32) = (800, 480);

/// Renders all three charts into `dir`, creating it if needed.
///
/// # Errors
///
/// Returns an error if the directory cannot be created or a chart fails to
/// render.
pub fn render_all(analysis: &Analysis, dir: &Path) -> Result<(), Box<dyn Error>> {
    std::fs::create_dir_all(dir)?;
    time_series(analysis, &dir.join("time_series.svg"))?;
    rolling_trend(analysis, &dir.join("rolling_trend.svg"))?;
    day_type_comparison(analysis, &dir.join("day_type_comparison.svg"))?;
    Ok(())
}

/// Y-axis range over the consumption series with 10% headroom.
fn y_range(analysis: &Analysis) -> std::ops::Range<f64> {
    let max = analysis
        .records
        .iter()
        .map(|r| r.consumption_kwh)
        .fold(0.0, f64::max);
    0.0..(max * 1.1).max(1.0)
}

/// X-axis range in record indices.
fn x_range(analysis: &Analysis) -> std::ops::Range<f64> {
    0.0..(analysis.records.len().max(1)) as f64
}

/// Consumption over time (by record index).
pub fn time_series(analysis: &Analysis, path: &Path) -> Result<(), Box<dyn Error>> {
    let root = SVGBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Electricity Consumption Over Time", ("sans-serif", 20))
        .margin(10)
        .x_label_area_size(30)
        .y_label_area_size(50)
        .build_cartesian_2d(x_range(analysis), y_range(analysis))?;
    chart
        .configure_mesh()
        .x_desc("record")
        .y_desc("Consumption (kWh)")
        .draw()?;

    chart.draw_series(LineSeries::new(
        analysis
            .records
            .iter()
            .enumerate()
            .map(|(i, r)| (i as f64, r.consumption_kwh)),
        &BLUE,
    ))?;

    root.present()?;
    Ok(())
}

/// Actual consumption plus the rolling average trend.
pub fn rolling_trend(analysis: &Analysis, path: &Path) -> Result<(), Box<dyn Error>> {
    let root = SVGBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Rolling Average Load Trend", ("sans-serif", 20))
        .margin(10)
        .x_label_area_size(30)
        .y_label_area_size(50)
        .build_cartesian_2d(x_range(analysis), y_range(analysis))?;
    chart
        .configure_mesh()
        .x_desc("record")
        .y_desc("Consumption (kWh)")
        .draw()?;

    chart
        .draw_series(LineSeries::new(
            analysis
                .records
                .iter()
                .enumerate()
                .map(|(i, r)| (i as f64, r.consumption_kwh)),
            &BLUE,
        ))?
        .label("Actual")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLUE));

    chart
        .draw_series(LineSeries::new(
            analysis
                .records
                .iter()
                .enumerate()
                .filter_map(|(i, r)| r.rolling_avg.map(|avg| (i as f64, avg))),
            &RED,
        ))?
        .label("Rolling Average")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], RED));

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}

/// Weekday vs weekend average consumption bars.
pub fn day_type_comparison(analysis: &Analysis, path: &Path) -> Result<(), Box<dyn Error>> {
    let root = SVGBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let summary = &analysis.summary;
    let bars = [
        ("Weekday", summary.weekday_avg),
        ("Weekend", summary.weekend_avg),
    ];
    let y_max = bars
        .iter()
        .filter_map(|(_, v)| *v)
        .fold(1.0, f64::max)
        * 1.1;

    let mut chart = ChartBuilder::on(&root)
        .caption("Weekday vs Weekend Energy Usage", ("sans-serif", 20))
        .margin(10)
        .x_label_area_size(30)
        .y_label_area_size(50)
        .build_cartesian_2d((0usize..2usize).into_segmented(), 0.0..y_max)?;
    chart
        .configure_mesh()
        .x_label_formatter(&|seg| match seg {
            SegmentValue::CenterOf(i) => bars.get(*i).map_or(String::new(), |(n, _)| n.to_string()),
            _ => String::new(),
        })
        .y_desc("Average Consumption (kWh)")
        .draw()?;

    chart.draw_series(
        Histogram::vertical(&chart)
            .style(BLUE.filled())
            .margin(40)
            .data(bars.iter().enumerate().filter_map(|(i, (_, v))| v.map(|v| (i, v)))),
    )?;

    root.present()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::pipeline::run;
    use crate::analysis::types::ConsumptionRecord;
    use crate::config::AnalysisConfig;
    use chrono::NaiveDate;

    fn analysis(values: &[f64]) -> Analysis {
        let records: Vec<ConsumptionRecord> = values
            .iter()
            .enumerate()
            .map(|(i, &v)| {
                let ts = NaiveDate::from_ymd_opt(2024, 1, 1 + (i / 24) as u32)
                    .expect("valid date")
                    .and_hms_opt(i as u32 % 24, 0, 0)
                    .expect("valid time");
                ConsumptionRecord::new(ts, v)
            })
            .collect();
        run(&records, &AnalysisConfig::default()).expect("pipeline runs")
    }

    #[test]
    fn renders_all_charts() {
        let dir = std::env::temp_dir().join("loadscope_plot_test");
        let values: Vec<f64> = (0..48).map(|i| 1.0 + (i % 7) as f64).collect();
        render_all(&analysis(&values), &dir).expect("charts render");
        for name in ["time_series.svg", "rolling_trend.svg", "day_type_comparison.svg"] {
            let path = dir.join(name);
            assert!(path.exists(), "{name} should exist");
            let content = std::fs::read_to_string(&path).expect("readable");
            assert!(content.contains("<svg"));
        }
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn renders_empty_dataset_without_panicking() {
        let dir = std::env::temp_dir().join("loadscope_plot_empty_test");
        render_all(&analysis(&[]), &dir).expect("empty charts render");
        let _ = std::fs::remove_dir_all(&dir);
    }
}
