//! Exponential Moving Average.
//!
//! k = 2/(n+1), seed with the SMA of the n values ending at the seed row, then
//! EMA[i] = C[i]*k + EMA[i-1]*(1-k).
//! Warmup: first (n-1) rows are empty.

pub fn calculate_ema(values: &[f64], period: usize) -> Vec<Option<f64>> {
    if period == 0 {
        return vec![None; values.len()];
    }
    ema_seeded_at(values, period, period - 1)
}

/// EMA whose first value sits at `seed_idx`, seeded with the SMA of
/// `values[seed_idx+1-period..=seed_idx]`. Rows before `seed_idx` are empty.
///
/// MACD uses this to start its fast average on the same row as the slow one.
pub(crate) fn ema_seeded_at(values: &[f64], period: usize, seed_idx: usize) -> Vec<Option<f64>> {
    let mut out = vec![None; values.len()];
    if period == 0 || seed_idx + 1 < period || seed_idx >= values.len() {
        return out;
    }

    let k = 2.0 / (period as f64 + 1.0);
    let seed_start = seed_idx + 1 - period;
    let mut ema = values[seed_start..=seed_idx].iter().sum::<f64>() / period as f64;
    out[seed_idx] = Some(ema);

    for i in (seed_idx + 1)..values.len() {
        ema = values[i] * k + ema * (1.0 - k);
        out[i] = Some(ema);
    }

    out
}
