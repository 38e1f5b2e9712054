//! Color constants and auto-scaling helpers for the TUI.

use ratatui::style::Color;

/// Actual consumption line color.
pub const ACTUAL_COLOR: Color = Color::Cyan;
/// Rolling-average line color.
pub const ROLLING_COLOR: Color = Color::Yellow;
/// Flagged-spike highlight color.
pub const SPIKE_COLOR: Color = Color::Magenta;
/// Header bar foreground.
pub const HEADER_FG: Color = Color::White;
/// Header bar background.
pub const HEADER_BG: Color = Color::DarkGray;
/// Footer help text color.
pub const FOOTER_FG: Color = Color::DarkGray;

/// Computes Y-axis bounds from chart data points with 10% padding.
pub fn auto_bounds_y(actual: &[(f64, f64)], rolling: &[(f64, f64)]) -> [f64; 2] {
    let all = actual.iter().chain(rolling.iter()).map(|&(_, y)| y);
    let min = all.clone().fold(f64::INFINITY, f64::min);
    let max = all.fold(f64::NEG_INFINITY, f64::max);
    if !min.is_finite() || !max.is_finite() {
        return [-1.0, 1.0];
    }
    let range = (max - min).max(0.1);
    let pad = range * 0.1;
    [min - pad, max + pad]
}
