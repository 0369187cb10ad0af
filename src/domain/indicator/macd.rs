//! MACD (Moving Average Convergence Divergence).
//!
//! MACD Line = EMA(fast) - EMA(slow)
//! Signal Line = EMA(signal) of MACD Line
//!
//! Both averages start on row slow-1; the fast one is seeded with the SMA of
//! the `fast` closes ending there, not of the first `fast` closes.
//!
//! Default parameters: fast=12, slow=26, signal=9
//! Warmup: slow - 1 + signal - 1 rows, shared by both lines.

use super::ema::ema_seeded_at;

pub const DEFAULT_FAST: usize = 12;
pub const DEFAULT_SLOW: usize = 26;
pub const DEFAULT_SIGNAL: usize = 9;

/// Returns `(macd_line, signal_line)`.
pub fn calculate_macd(
    values: &[f64],
    fast: usize,
    slow: usize,
    signal_period: usize,
) -> (Vec<Option<f64>>, Vec<Option<f64>>) {
    let empty = || vec![None; values.len()];
    if fast == 0 || slow == 0 || signal_period == 0 || fast > slow {
        return (empty(), empty());
    }

    let macd_start = slow - 1;
    let ema_fast = ema_seeded_at(values, fast, macd_start);
    let ema_slow = ema_seeded_at(values, slow, macd_start);

    let raw_line: Vec<f64> = ema_fast
        .iter()
        .zip(&ema_slow)
        .skip(macd_start)
        .filter_map(|(f, s)| Some((*f)? - (*s)?))
        .collect();

    let raw_signal = ema_seeded_at(&raw_line, signal_period, signal_period - 1);

    let warmup = macd_start + signal_period - 1;
    let mut line = empty();
    let mut signal = empty();
    for (offset, (m, s)) in raw_line.iter().zip(&raw_signal).enumerate() {
        let i = macd_start + offset;
        if i >= warmup {
            line[i] = Some(*m);
            signal[i] = *s;
        }
    }

    (line, signal)
}

pub fn calculate_macd_default(values: &[f64]) -> (Vec<Option<f64>>, Vec<Option<f64>>) {
    calculate_macd(values, DEFAULT_FAST, DEFAULT_SLOW, DEFAULT_SIGNAL)
}
