//! PNG chart rendering.
//!
//! Charts carry lines and panel frames only. No font backend is compiled in,
//! so nothing here draws text.

use std::error::Error;
use std::fs;
use std::ops::Range;
use std::path::{Path, PathBuf};

use plotters::prelude::*;
use tracing::debug;

use crate::domain::error::QuantError;
use crate::domain::indicator::AnalyzedSeries;

const INDICATOR_CHART_SIZE: (u32, u32) = (1400, 1000);
const LINE_CHART_SIZE: (u32, u32) = (600, 400);

const ORANGE: RGBColor = RGBColor(255, 165, 0);
const PURPLE: RGBColor = RGBColor(128, 0, 128);

const RSI_OVERBOUGHT: f64 = 70.0;
const RSI_OVERSOLD: f64 = 30.0;

pub fn chart_path(plots_dir: &Path, symbol: &str) -> PathBuf {
    plots_dir.join(format!("{}_technical_indicators.png", symbol))
}

/// Three stacked panels: price with SMA/EMA, RSI with 70/30 guides, MACD with
/// its signal line. Replaces any existing chart for the symbol.
pub fn render_indicator_chart(
    analyzed: &AnalyzedSeries,
    plots_dir: &Path,
) -> Result<PathBuf, QuantError> {
    fs::create_dir_all(plots_dir)?;
    let path = chart_path(plots_dir, analyzed.symbol());
    draw_indicator_panels(analyzed, &path).map_err(|e| chart_error(&path, e))?;
    debug!(path = %path.display(), "rendered indicator chart");
    Ok(path)
}

/// Single line through `points`, used for the report's placeholder figure.
pub fn render_line_chart(points: &[(f64, f64)], path: &Path) -> Result<(), QuantError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    draw_line_chart(points, path).map_err(|e| chart_error(path, e))?;
    debug!(path = %path.display(), points = points.len(), "rendered line chart");
    Ok(())
}

fn chart_error(path: &Path, err: Box<dyn Error>) -> QuantError {
    QuantError::Chart {
        path: path.to_path_buf(),
        reason: err.to_string(),
    }
}

fn draw_indicator_panels(analyzed: &AnalyzedSeries, path: &Path) -> Result<(), Box<dyn Error>> {
    let root = BitMapBackend::new(path, INDICATOR_CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;
    let panels = root.split_evenly((3, 1));

    let closes: Vec<Option<f64>> = analyzed.series.records.iter().map(|r| Some(r.close)).collect();
    let ind = &analyzed.indicators;
    let x_range = 0.0..last_index(closes.len());

    let price_lines = [
        (closes.as_slice(), BLUE),
        (ind.sma.as_slice(), ORANGE),
        (ind.ema.as_slice(), GREEN),
    ];
    draw_panel(&panels[0], x_range.clone(), value_range(&price_lines), &price_lines, &[])?;

    let rsi_lines = [(ind.rsi.as_slice(), PURPLE)];
    let guides = [(RSI_OVERBOUGHT, RED.mix(0.5)), (RSI_OVERSOLD, GREEN.mix(0.5))];
    draw_panel(&panels[1], x_range.clone(), 0.0..100.0, &rsi_lines, &guides)?;

    let macd_lines = [(ind.macd.as_slice(), BLUE), (ind.macd_signal.as_slice(), RED)];
    draw_panel(&panels[2], x_range, value_range(&macd_lines), &macd_lines, &[])?;

    root.present()?;
    Ok(())
}

fn draw_panel(
    area: &DrawingArea<BitMapBackend<'_>, plotters::coord::Shift>,
    x_range: Range<f64>,
    y_range: Range<f64>,
    lines: &[(&[Option<f64>], RGBColor)],
    guides: &[(f64, RGBAColor)],
) -> Result<(), Box<dyn Error>> {
    let mut chart = ChartBuilder::on(area)
        .margin(20)
        .build_cartesian_2d(x_range.clone(), y_range.clone())?;

    chart.draw_series(std::iter::once(Rectangle::new(
        [(x_range.start, y_range.start), (x_range.end, y_range.end)],
        BLACK.stroke_width(1),
    )))?;

    for &(level, color) in guides {
        chart.draw_series(LineSeries::new(
            [(x_range.start, level), (x_range.end, level)],
            color.stroke_width(1),
        ))?;
    }

    for &(values, color) in lines {
        chart.draw_series(LineSeries::new(
            values
                .iter()
                .enumerate()
                .filter_map(|(i, v)| v.map(|v| (i as f64, v))),
            color.stroke_width(2),
        ))?;
    }
    Ok(())
}

fn draw_line_chart(points: &[(f64, f64)], path: &Path) -> Result<(), Box<dyn Error>> {
    let root = BitMapBackend::new(path, LINE_CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let xs: Vec<Option<f64>> = points.iter().map(|p| Some(p.0)).collect();
    let ys: Vec<Option<f64>> = points.iter().map(|p| Some(p.1)).collect();
    let x_range = value_range(&[(xs.as_slice(), BLUE)]);
    let y_range = value_range(&[(ys.as_slice(), BLUE)]);

    let mut chart = ChartBuilder::on(&root)
        .margin(20)
        .build_cartesian_2d(x_range.clone(), y_range.clone())?;
    chart.draw_series(std::iter::once(Rectangle::new(
        [(x_range.start, y_range.start), (x_range.end, y_range.end)],
        BLACK.stroke_width(1),
    )))?;
    chart.draw_series(LineSeries::new(points.iter().copied(), BLUE.stroke_width(2)))?;

    root.present()?;
    Ok(())
}

fn last_index(len: usize) -> f64 {
    len.saturating_sub(1).max(1) as f64
}

/// Bounds of every present value with 5% padding. Falls back to a unit range
/// when there is nothing to plot or every value is equal.
fn value_range(lines: &[(&[Option<f64>], RGBColor)]) -> Range<f64> {
    let (lo, hi) = lines
        .iter()
        .flat_map(|(values, _)| values.iter().flatten())
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });

    if lo > hi {
        return 0.0..1.0;
    }
    if lo == hi {
        return (lo - 1.0)..(hi + 1.0);
    }
    let pad = (hi - lo) * 0.05;
    (lo - pad)..(hi + pad)
}
