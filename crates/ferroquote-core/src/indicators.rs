//! Moving averages and momentum indicators computed over a [`PriceSeries`].
//!
//! Every output column is aligned with the series: index `i` belongs to bar
//! `i`, and bars inside an indicator's warm-up window carry `None`. Warm-up
//! lengths and seeding follow TA-Lib (EMA seeded with the SMA of its first
//! window, RSI with Wilder smoothing).

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::Serialize;

use crate::{PriceSeries, ValidationError};

/// Named column produced by an indicator.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndicatorColumn {
    pub name: String,
    pub values: Vec<Option<f64>>,
}

impl IndicatorColumn {
    fn new(name: impl Into<String>, values: Vec<Option<f64>>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    /// Most recent computed value, if any.
    pub fn latest(&self) -> Option<f64> {
        self.values.iter().rev().find_map(|value| *value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MovingAverageKind {
    Sma,
    Ema,
    Wma,
}

impl MovingAverageKind {
    const fn title(self) -> &'static str {
        match self {
            Self::Sma => "Sma",
            Self::Ema => "Ema",
            Self::Wma => "Wma",
        }
    }
}

/// Moving average over closing prices, e.g. `EMA:13`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MovingAverage {
    pub kind: MovingAverageKind,
    pub window: usize,
}

impl MovingAverage {
    pub const fn new(kind: MovingAverageKind, window: usize) -> Self {
        Self { kind, window }
    }

    /// `Sma05`, `Ema13`, `Wma200`.
    pub fn column_name(&self) -> String {
        format!("{}{:0>2}", self.kind.title(), self.window)
    }

    pub fn compute(&self, series: &PriceSeries) -> IndicatorColumn {
        let closes = series.closes();
        let values = match self.kind {
            MovingAverageKind::Sma => sma(&closes, self.window),
            MovingAverageKind::Ema => ema(&closes, self.window),
            MovingAverageKind::Wma => wma(&closes, self.window),
        };
        IndicatorColumn::new(self.column_name(), values)
    }
}

impl Display for MovingAverage {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let kind = match self.kind {
            MovingAverageKind::Sma => "SMA",
            MovingAverageKind::Ema => "EMA",
            MovingAverageKind::Wma => "WMA",
        };
        write!(f, "{kind}:{}", self.window)
    }
}

impl FromStr for MovingAverage {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let (name, windows) = split_spec(value)?;
        let kind = match name.as_str() {
            "SMA" => MovingAverageKind::Sma,
            "EMA" => MovingAverageKind::Ema,
            "WMA" => MovingAverageKind::Wma,
            _ => {
                return Err(ValidationError::UnsupportedIndicator {
                    value: value.trim().to_owned(),
                })
            }
        };
        let [window] = parse_windows::<1>(&name, windows)?;
        Ok(Self::new(kind, window))
    }
}

/// Momentum indicator, e.g. `RSI:14`, `MACD:12,26,9`, `UO:7,14,28`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TechIndicator {
    Rsi {
        period: usize,
    },
    Macd {
        fast: usize,
        slow: usize,
        signal: usize,
    },
    UltimateOscillator {
        first: usize,
        second: usize,
        third: usize,
    },
}

impl TechIndicator {
    pub fn compute(&self, series: &PriceSeries) -> Vec<IndicatorColumn> {
        match *self {
            Self::Rsi { period } => {
                vec![IndicatorColumn::new("Rsi", rsi(&series.closes(), period))]
            }
            Self::Macd { fast, slow, signal } => {
                let output = macd(&series.closes(), fast, slow, signal);
                vec![
                    IndicatorColumn::new("Macd", output.macd),
                    IndicatorColumn::new("MacdSignal", output.signal),
                    IndicatorColumn::new("MacdHistogram", output.histogram),
                ]
            }
            Self::UltimateOscillator {
                first,
                second,
                third,
            } => vec![IndicatorColumn::new(
                "Uo",
                ultimate_oscillator(
                    &series.highs(),
                    &series.lows(),
                    &series.closes(),
                    [first, second, third],
                ),
            )],
        }
    }
}

impl FromStr for TechIndicator {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let (name, windows) = split_spec(value)?;
        match name.as_str() {
            "RSI" => {
                let [period] = parse_windows::<1>(&name, windows)?;
                Ok(Self::Rsi { period })
            }
            "MACD" => {
                let [fast, slow, signal] = parse_windows::<3>(&name, windows)?;
                Ok(Self::Macd { fast, slow, signal })
            }
            "UO" => {
                let [first, second, third] = parse_windows::<3>(&name, windows)?;
                Ok(Self::UltimateOscillator {
                    first,
                    second,
                    third,
                })
            }
            _ => Err(ValidationError::UnsupportedIndicator {
                value: value.trim().to_owned(),
            }),
        }
    }
}

/// Parse indicator specs, skipping (and logging) the ones that are not
/// supported or malformed.
pub fn parse_specs<T>(specs: &[String]) -> Vec<T>
where
    T: FromStr<Err = ValidationError>,
{
    specs
        .iter()
        .filter_map(|spec| match spec.parse::<T>() {
            Ok(parsed) => Some(parsed),
            Err(error) => {
                tracing::warn!(spec = %spec, %error, "indicator calculation not supported");
                None
            }
        })
        .collect()
}

/// Columns for every moving average, in request order.
pub fn moving_average_columns(
    series: &PriceSeries,
    averages: &[MovingAverage],
) -> Vec<IndicatorColumn> {
    averages.iter().map(|average| average.compute(series)).collect()
}

/// Columns for every technical indicator, in request order.
pub fn tech_indicator_columns(
    series: &PriceSeries,
    indicators: &[TechIndicator],
) -> Vec<IndicatorColumn> {
    indicators
        .iter()
        .flat_map(|indicator| indicator.compute(series))
        .collect()
}

fn split_spec(value: &str) -> Result<(String, &str), ValidationError> {
    let trimmed = value.trim();
    let (name, windows) = trimmed.split_once(':').unwrap_or((trimmed, ""));
    if name.is_empty() {
        return Err(ValidationError::UnsupportedIndicator {
            value: trimmed.to_owned(),
        });
    }
    Ok((name.trim().to_ascii_uppercase(), windows.trim()))
}

fn parse_windows<const N: usize>(name: &str, raw: &str) -> Result<[usize; N], ValidationError> {
    let invalid = || ValidationError::InvalidIndicatorWindow {
        name: name.to_owned(),
        expected: N,
        value: raw.to_owned(),
    };

    let parsed = raw
        .split(',')
        .map(|part| part.trim().parse::<usize>().ok().filter(|window| *window > 0))
        .collect::<Option<Vec<_>>>()
        .ok_or_else(invalid)?;

    parsed.try_into().map_err(|_| invalid())
}

/// Rolling arithmetic mean.
pub fn sma(values: &[f64], window: usize) -> Vec<Option<f64>> {
    let mut output = vec![None; values.len()];
    if window == 0 || values.len() < window {
        return output;
    }

    for end in window - 1..values.len() {
        let slice = &values[end + 1 - window..=end];
        output[end] = Some(slice.iter().sum::<f64>() / window as f64);
    }
    output
}

/// Exponential moving average seeded with the SMA of the first window.
pub fn ema(values: &[f64], period: usize) -> Vec<Option<f64>> {
    let mut output = vec![None; values.len()];
    if period == 0 || values.len() < period {
        return output;
    }

    for (offset, value) in ema_tail(values, period).into_iter().enumerate() {
        output[period - 1 + offset] = Some(value);
    }
    output
}

/// Linearly weighted moving average, newest value weighted `window`.
pub fn wma(values: &[f64], window: usize) -> Vec<Option<f64>> {
    let mut output = vec![None; values.len()];
    if window == 0 || values.len() < window {
        return output;
    }

    let divisor = (window * (window + 1)) as f64 / 2.0;
    for end in window - 1..values.len() {
        let weighted: f64 = values[end + 1 - window..=end]
            .iter()
            .enumerate()
            .map(|(i, value)| (i + 1) as f64 * value)
            .sum();
        output[end] = Some(weighted / divisor);
    }
    output
}

/// Relative strength index with Wilder smoothing. First value at `period`.
pub fn rsi(values: &[f64], period: usize) -> Vec<Option<f64>> {
    let mut output = vec![None; values.len()];
    if period == 0 || values.len() <= period {
        return output;
    }

    let mut avg_gain = 0.0;
    let mut avg_loss = 0.0;
    for i in 1..=period {
        let change = values[i] - values[i - 1];
        if change > 0.0 {
            avg_gain += change;
        } else {
            avg_loss -= change;
        }
    }
    avg_gain /= period as f64;
    avg_loss /= period as f64;
    output[period] = Some(rsi_value(avg_gain, avg_loss));

    let smoothing = (period - 1) as f64;
    for i in period + 1..values.len() {
        let change = values[i] - values[i - 1];
        let (gain, loss) = if change > 0.0 { (change, 0.0) } else { (0.0, -change) };
        avg_gain = (avg_gain * smoothing + gain) / period as f64;
        avg_loss = (avg_loss * smoothing + loss) / period as f64;
        output[i] = Some(rsi_value(avg_gain, avg_loss));
    }
    output
}

fn rsi_value(avg_gain: f64, avg_loss: f64) -> f64 {
    let total = avg_gain + avg_loss;
    if total == 0.0 {
        0.0
    } else {
        100.0 * avg_gain / total
    }
}

/// MACD line, signal line and histogram.
#[derive(Debug, Clone, PartialEq)]
pub struct MacdOutput {
    pub macd: Vec<Option<f64>>,
    pub signal: Vec<Option<f64>>,
    pub histogram: Vec<Option<f64>>,
}

/// MACD with all three outputs starting at `slow - 1 + signal - 1`.
///
/// Periods are swapped when `fast > slow`. Both EMAs are aligned so their
/// first value lands on index `slow - 1`.
pub fn macd(values: &[f64], fast: usize, slow: usize, signal: usize) -> MacdOutput {
    let len = values.len();
    let mut output = MacdOutput {
        macd: vec![None; len],
        signal: vec![None; len],
        histogram: vec![None; len],
    };

    let (fast, slow) = if fast > slow { (slow, fast) } else { (fast, slow) };
    if fast == 0 || signal == 0 {
        return output;
    }

    let lookback = slow - 1 + signal - 1;
    if len <= lookback {
        return output;
    }

    let fast_ema = ema_tail(&values[slow - fast..], fast);
    let slow_ema = ema_tail(values, slow);
    let line: Vec<f64> = fast_ema
        .iter()
        .zip(&slow_ema)
        .map(|(fast, slow)| fast - slow)
        .collect();
    let signal_line = ema_tail(&line, signal);

    for (offset, signal_value) in signal_line.into_iter().enumerate() {
        let index = lookback + offset;
        let macd_value = line[signal - 1 + offset];
        output.macd[index] = Some(macd_value);
        output.signal[index] = Some(signal_value);
        output.histogram[index] = Some(macd_value - signal_value);
    }
    output
}

/// Ultimate oscillator over three periods, weighted 4/2/1 from shortest to
/// longest. First value at the longest period.
pub fn ultimate_oscillator(
    highs: &[f64],
    lows: &[f64],
    closes: &[f64],
    periods: [usize; 3],
) -> Vec<Option<f64>> {
    let len = closes.len().min(highs.len()).min(lows.len());
    let mut output = vec![None; closes.len()];

    let mut periods = periods;
    periods.sort_unstable();
    let longest = periods[2];
    if periods[0] == 0 || len <= longest {
        return output;
    }

    let mut buying_pressure = vec![0.0; len];
    let mut true_range = vec![0.0; len];
    for i in 1..len {
        let prev_close = closes[i - 1];
        let true_low = lows[i].min(prev_close);
        let true_high = highs[i].max(prev_close);
        buying_pressure[i] = closes[i] - true_low;
        true_range[i] = true_high - true_low;
    }

    let average = |end: usize, period: usize| {
        let range = end + 1 - period..=end;
        let tr: f64 = true_range[range.clone()].iter().sum();
        if tr == 0.0 {
            0.0
        } else {
            buying_pressure[range].iter().sum::<f64>() / tr
        }
    };

    for i in longest..len {
        let value = 4.0 * average(i, periods[0])
            + 2.0 * average(i, periods[1])
            + average(i, periods[2]);
        output[i] = Some(100.0 * value / 7.0);
    }
    output
}

// EMA values from index `period - 1` onwards; caller guarantees enough data.
fn ema_tail(values: &[f64], period: usize) -> Vec<f64> {
    let k = 2.0 / (period as f64 + 1.0);
    let seed = values[..period].iter().sum::<f64>() / period as f64;

    let mut output = Vec::with_capacity(values.len() + 1 - period);
    output.push(seed);
    let mut previous = seed;
    for value in &values[period..] {
        previous += k * (value - previous);
        output.push(previous);
    }
    output
}
