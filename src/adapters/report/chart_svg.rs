//! SVG equity-curve rendering.

use crate::domain::equity::EquityPoint;

const WIDTH: f64 = 640.0;
const HEIGHT: f64 = 240.0;
const PADDING: f64 = 40.0;

/// Standalone SVG document plotting capital at the end of each allocated day.
/// The starting capital is the first point so a single day still draws a line.
pub fn equity_svg(starting_capital: f64, equity_curve: &[EquityPoint]) -> String {
    let values: Vec<f64> = std::iter::once(starting_capital)
        .chain(equity_curve.iter().map(|p| p.equity))
        .collect();

    let min_equity = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max_equity = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    let plot_width = WIDTH - 2.0 * PADDING;
    let plot_height = HEIGHT - 2.0 * PADDING;

    let range = max_equity - min_equity;
    let scale_y = if range > 0.0 { plot_height / range } else { 1.0 };
    let scale_x = if values.len() > 1 {
        plot_width / (values.len() - 1) as f64
    } else {
        0.0
    };

    let points: Vec<String> = values
        .iter()
        .enumerate()
        .map(|(i, equity)| {
            let x = PADDING + i as f64 * scale_x;
            let y = HEIGHT - PADDING - (equity - min_equity) * scale_y;
            format!("{:.1},{:.1}", x, y)
        })
        .collect();

    let first_label = equity_curve
        .first()
        .map(|p| p.date.to_string())
        .unwrap_or_default();
    let last_label = equity_curve
        .last()
        .map(|p| p.date.to_string())
        .unwrap_or_default();

    format!(
        r##"<svg xmlns="http://www.w3.org/2000/svg" width="{w:.0}" height="{h:.0}" viewBox="0 0 {w:.0} {h:.0}">
  <rect width="100%" height="100%" fill="white"/>
  <line x1="{p:.0}" y1="{p:.0}" x2="{p:.0}" y2="{base:.0}" stroke="black"/>
  <line x1="{p:.0}" y1="{base:.0}" x2="{right:.0}" y2="{base:.0}" stroke="black"/>
  <text x="{p:.0}" y="{label_y:.0}" font-size="10">{first}</text>
  <text x="{right:.0}" y="{label_y:.0}" font-size="10" text-anchor="end">{last}</text>
  <text x="4" y="{p:.0}" font-size="10">{max:.2}</text>
  <text x="4" y="{base:.0}" font-size="10">{min:.2}</text>
  <polyline fill="none" stroke="#1f77b4" stroke-width="1.5" points="{points}"/>
  <title>Equity Curve</title>
</svg>
"##,
        w = WIDTH,
        h = HEIGHT,
        p = PADDING,
        base = HEIGHT - PADDING,
        right = WIDTH - PADDING,
        label_y = HEIGHT - PADDING / 2.0,
        first = first_label,
        last = last_label,
        max = max_equity,
        min = min_equity,
        points = points.join(" "),
    )
}
