//! CSV export and console rendering of price series.
//!
//! Both take their formatting from an explicit config value. Nothing here
//! reads global state.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use thiserror::Error;

use crate::indicators::IndicatorColumn;
use crate::{PriceBar, PriceSeries};

const BASE_COLUMNS: [&str; 5] = ["Open", "High", "Low", "Close", "Volume"];

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to write export file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to encode csv: {0}")]
    Csv(#[from] csv::Error),
}

/// CSV layout. The default matches continental spreadsheet conventions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvExportConfig {
    pub delimiter: u8,
    pub decimal_separator: char,
    pub float_precision: usize,
    pub index_label: String,
}

impl Default for CsvExportConfig {
    fn default() -> Self {
        Self {
            delimiter: b';',
            decimal_separator: ',',
            float_precision: 3,
            index_label: String::from("DateTime"),
        }
    }
}

impl CsvExportConfig {
    fn format_float(&self, value: f64) -> String {
        format_float(value, self.float_precision, self.decimal_separator)
    }
}

/// Console table layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayConfig {
    pub float_precision: usize,
    /// Rows shown at each end of a long series.
    pub rows: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            float_precision: 2,
            rows: 10,
        }
    }
}

/// Write `series` plus extra indicator columns as CSV to `path`.
pub fn export_csv(
    path: &Path,
    series: &PriceSeries,
    columns: &[IndicatorColumn],
    config: &CsvExportConfig,
) -> Result<(), ExportError> {
    let file = File::create(path)?;
    write_csv(file, series, columns, config)
}

pub fn write_csv<W: Write>(
    writer: W,
    series: &PriceSeries,
    columns: &[IndicatorColumn],
    config: &CsvExportConfig,
) -> Result<(), ExportError> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(config.delimiter)
        .from_writer(writer);

    writer.write_record(header(&config.index_label, columns))?;

    for (index, bar) in series.bars().iter().enumerate() {
        let mut record = vec![bar.ts.format_short()];
        record.extend(
            [bar.open, bar.high, bar.low, bar.close]
                .into_iter()
                .map(|value| config.format_float(value)),
        );
        record.push(format_volume(bar));
        record.extend(columns.iter().map(|column| {
            column
                .values
                .get(index)
                .copied()
                .flatten()
                .map_or_else(String::new, |value| config.format_float(value))
        }));
        writer.write_record(&record)?;
    }

    writer.flush()?;
    Ok(())
}

/// Head and tail of `series` as an aligned text table.
pub fn render_table(
    series: &PriceSeries,
    columns: &[IndicatorColumn],
    config: &DisplayConfig,
) -> String {
    let header = header("DateTime", columns);
    let bars = series.bars();

    let indices: Vec<Option<usize>> = if bars.len() > config.rows * 2 {
        (0..config.rows)
            .map(Some)
            .chain(std::iter::once(None))
            .chain((bars.len() - config.rows..bars.len()).map(Some))
            .collect()
    } else {
        (0..bars.len()).map(Some).collect()
    };

    let rows: Vec<Vec<String>> = indices
        .into_iter()
        .map(|index| match index {
            Some(index) => table_row(&bars[index], index, columns, config),
            None => vec![String::from("..."); header.len()],
        })
        .collect();

    let widths: Vec<usize> = (0..header.len())
        .map(|col| {
            rows.iter()
                .map(|row| row[col].len())
                .chain(std::iter::once(header[col].len()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut output = String::new();
    push_line(&mut output, &header, &widths);
    for row in &rows {
        push_line(&mut output, row, &widths);
    }
    output
}

fn table_row(
    bar: &PriceBar,
    index: usize,
    columns: &[IndicatorColumn],
    config: &DisplayConfig,
) -> Vec<String> {
    let float = |value: f64| {
        if value.is_nan() {
            String::from("NaN")
        } else {
            format_float(value, config.float_precision, '.')
        }
    };

    let mut row = vec![bar.ts.format_short()];
    row.extend([bar.open, bar.high, bar.low, bar.close].into_iter().map(float));
    row.push(bar.volume.map_or_else(|| String::from("NaN"), |v| v.to_string()));
    row.extend(columns.iter().map(|column| {
        column
            .values
            .get(index)
            .copied()
            .flatten()
            .map_or_else(|| String::from("NaN"), float)
    }));
    row
}

fn push_line(output: &mut String, cells: &[String], widths: &[usize]) {
    let line = cells
        .iter()
        .zip(widths)
        .enumerate()
        .map(|(col, (cell, width))| {
            if col == 0 {
                format!("{cell:<width$}")
            } else {
                format!("{cell:>width$}")
            }
        })
        .collect::<Vec<_>>()
        .join("  ");
    output.push_str(line.trim_end());
    output.push('\n');
}

fn header(index_label: &str, columns: &[IndicatorColumn]) -> Vec<String> {
    std::iter::once(index_label)
        .chain(BASE_COLUMNS)
        .chain(columns.iter().map(|column| column.name.as_str()))
        .map(str::to_owned)
        .collect()
}

fn format_volume(bar: &PriceBar) -> String {
    bar.volume.map_or_else(String::new, |volume| volume.to_string())
}

/// Fixed-precision float; NaN and infinities become an empty string.
pub fn format_float(value: f64, precision: usize, decimal_separator: char) -> String {
    if !value.is_finite() {
        return String::new();
    }
    let formatted = format!("{value:.precision$}");
    if decimal_separator == '.' {
        formatted
    } else {
        formatted.replace('.', &decimal_separator.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::UtcDateTime;
    use time::macros::date;

    fn sample_series() -> PriceSeries {
        PriceSeries::from_bars(vec![
            PriceBar::new(
                UtcDateTime::from_date(date!(2024 - 01 - 02)),
                10.0,
                11.25,
                9.5,
                10.123_45,
                Some(1_200),
            ),
            PriceBar::new(
                UtcDateTime::from_date(date!(2024 - 01 - 03)),
                f64::NAN,
                12.0,
                10.0,
                11.0,
                None,
            ),
        ])
    }

    #[test]
    fn formats_floats_with_separator_and_precision() {
        assert_eq!(format_float(1.23456, 3, ','), "1,235");
        assert_eq!(format_float(2.0, 2, '.'), "2.00");
        assert_eq!(format_float(f64::NAN, 3, ','), "");
    }

    #[test]
    fn writes_semicolon_csv_with_comma_decimals() {
        let mut buffer = Vec::new();
        write_csv(&mut buffer, &sample_series(), &[], &CsvExportConfig::default())
            .expect("csv should be written");

        let text = String::from_utf8(buffer).expect("utf8");
        assert_eq!(
            text,
            "DateTime;Open;High;Low;Close;Volume\n\
             2024-01-02;10,000;11,250;9,500;10,123;1200\n\
             2024-01-03;;12,000;10,000;11,000;\n"
        );
    }

    #[test]
    fn appends_indicator_columns() {
        let column = IndicatorColumn {
            name: String::from("Sma02"),
            values: vec![None, Some(10.5616)],
        };
        let mut buffer = Vec::new();
        write_csv(&mut buffer, &sample_series(), &[column], &CsvExportConfig::default())
            .expect("csv should be written");

        let text = String::from_utf8(buffer).expect("utf8");
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "DateTime;Open;High;Low;Close;Volume;Sma02");
        assert!(lines[1].ends_with(";1200;"));
        assert!(lines[2].ends_with(";;10,562"));
    }

    #[test]
    fn table_shows_head_and_tail_of_long_series() {
        let bars = (1..=30u8)
            .map(|day| {
                let ts = UtcDateTime::from_date(
                    time::Date::from_calendar_date(2024, time::Month::January, day)
                        .expect("valid date"),
                );
                PriceBar::new(ts, 1.0, 1.0, 1.0, f64::from(day), Some(5))
            })
            .collect();
        let series = PriceSeries::from_bars(bars);
        let config = DisplayConfig { float_precision: 2, rows: 3 };

        let table = render_table(&series, &[], &config);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 1 + 3 + 1 + 3);
        assert!(lines[0].starts_with("DateTime"));
        assert!(lines[1].starts_with("2024-01-01"));
        assert!(lines[4].starts_with("..."));
        assert!(lines[7].starts_with("2024-01-30"));
        assert!(lines[7].contains("30.00"));
    }

    #[test]
    fn short_table_shows_every_row() {
        let table = render_table(&sample_series(), &[], &DisplayConfig::default());
        assert_eq!(table.lines().count(), 3);
        assert!(table.contains("10.12"));
        assert!(table.contains("NaN"));
    }
}
