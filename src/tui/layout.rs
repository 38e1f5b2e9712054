//! TUI layout and widget rendering.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::symbols;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Axis, Block, Borders, Chart, Dataset, Paragraph};

use crate::analysis::summary::fmt_stat;

use super::runtime::App;
use super::style;

/// Renders the full TUI frame.
pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // header
            Constraint::Min(10),   // chart
            Constraint::Length(6), // summary panel
            Constraint::Length(1), // footer
        ])
        .split(frame.area());

    render_header(frame, app, chunks[0]);
    render_chart(frame, app, chunks[1]);
    render_summary(frame, app, chunks[2]);
    render_footer(frame, chunks[3]);
}

/// Header bar: record count and the two live parameters.
fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let header = Line::from(vec![
        Span::styled(
            " LOADSCOPE ",
            Style::default()
                .fg(style::HEADER_FG)
                .bg(style::HEADER_BG)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!(
            " {} records │ window={} │ k={:.1} │ spikes={} ",
            app.records.len(),
            app.window,
            app.threshold(),
            app.anomaly_count(),
        )),
    ]);
    frame.render_widget(Paragraph::new(header), area);
}

/// Consumption vs rolling-average chart.
fn render_chart(frame: &mut Frame, app: &App, area: Rect) {
    let actual_data: Vec<(f64, f64)> = app
        .records
        .iter()
        .enumerate()
        .map(|(i, r)| (i as f64, r.consumption_kwh))
        .collect();

    let rolling_data: Vec<(f64, f64)> = app
        .records
        .iter()
        .enumerate()
        .filter_map(|(i, r)| r.rolling_avg.map(|avg| (i as f64, avg)))
        .collect();

    let y_bounds = style::auto_bounds_y(&actual_data, &rolling_data);

    let x_lo = 0.0;
    let x_hi = (app.records.len().max(1)) as f64;

    let datasets = vec![
        Dataset::default()
            .name("Actual")
            .marker(symbols::Marker::Braille)
            .style(Style::default().fg(style::ACTUAL_COLOR))
            .data(&actual_data),
        Dataset::default()
            .name(format!("Rolling({})", app.window))
            .marker(symbols::Marker::Dot)
            .style(Style::default().fg(style::ROLLING_COLOR))
            .data(&rolling_data),
    ];

    let y_label_lo = format!("{:.1}", y_bounds[0]);
    let y_label_hi = format!("{:.1}", y_bounds[1]);

    let chart = Chart::new(datasets)
        .block(
            Block::default()
                .title(" Consumption vs Rolling Average ")
                .borders(Borders::ALL),
        )
        .x_axis(
            Axis::default()
                .title("record")
                .bounds([x_lo, x_hi])
                .labels(vec!["0".to_string(), format!("{}", x_hi as usize)]),
        )
        .y_axis(
            Axis::default()
                .title("kWh")
                .bounds(y_bounds)
                .labels(vec![y_label_lo, y_label_hi]),
        );

    frame.render_widget(chart, area);
}

/// Summary panel: segment and category averages, series statistics, spikes.
fn render_summary(frame: &mut Frame, app: &App, area: Rect) {
    let s = &app.summary;
    let lines = vec![
        Line::from(format!(
            "  peak={}  off-peak={}  weekday={}  weekend={}",
            fmt_stat(s.peak_avg),
            fmt_stat(s.off_peak_avg),
            fmt_stat(s.weekday_avg),
            fmt_stat(s.weekend_avg),
        )),
        Line::from(format!(
            "  mean={}  std={}  max={}",
            fmt_stat(s.mean_load),
            fmt_stat(s.std_load),
            fmt_stat(s.max_load),
        )),
        Line::from(vec![
            Span::raw(format!("  spikes above mean + {:.1}·std: ", app.threshold())),
            Span::styled(
                format!("{}", app.anomaly_count()),
                Style::default()
                    .fg(style::SPIKE_COLOR)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
    ];

    let block = Block::default().title(" Summary ").borders(Borders::ALL);
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Footer with keybinding hints.
fn render_footer(frame: &mut Frame, area: Rect) {
    let footer = Paragraph::new(Line::from(Span::styled(
        " q:Quit  +/-:Window  [/]:Threshold  r:Reset",
        Style::default().fg(style::FOOTER_FG),
    )));
    frame.render_widget(footer, area);
}
