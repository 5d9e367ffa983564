use crate::spreadsheet::reference::index_to_reference;
use chrono::Duration;
use chrono::NaiveDate;
use std::fmt::Display;

/// Types of cell data in spreadsheet files.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub enum CellType {
    #[default]
    Empty,
    /// Boolean values (true/false)
    Boolean,
    /// Numeric values
    Number,
    /// Date/time values stored as numbers from 1900 epoch
    NumberDateTime1900,
    /// Date values stored as numbers from 1900 epoch
    NumberDate1900,
    /// Time values stored as numbers from 1900 epoch
    NumberTime1900,
    /// Date/time values stored as numbers from 1904 epoch
    NumberDateTime1904,
    /// Date values stored as numbers from 1904 epoch
    NumberDate1904,
    /// Time values stored as numbers from 1904 epoch
    NumberTime1904,
    /// ISO 8601 date/time strings
    IsoDateTime,
    /// Inline string values
    InlineString,
    /// Shared string table entries (already resolved to their text)
    SharedString,
    /// Error values such as `#DIV/0!`
    Error,
}

impl CellType {
    /// Parses built-in Excel number format IDs to determine cell type.
    pub(crate) fn parse_builtin_number_format_id(id: &str, is_1904: bool) -> Option<Self> {
        match id {
            "22" => Some(if is_1904 { Self::NumberDateTime1904 } else { Self::NumberDateTime1900 }),
            "14" | "15" | "16" | "17" => Some(if is_1904 { Self::NumberDate1904 } else { Self::NumberDate1900 }),
            "18" | "19" | "20" | "21" | "45" | "46" | "47" => Some(if is_1904 { Self::NumberTime1904 } else { Self::NumberTime1900 }),
            _ => None,
        }
    }

    /// Parses custom number format strings to determine cell type.
    /// Analyzes format codes for date/time patterns.
    pub(crate) fn parse_custom_number_format(format: &str, is_1904: bool) -> Self {
        let mut is_escaped = false;
        let mut is_literal = false;
        let mut is_date = false;
        let mut is_time = false;
        let mut is_color = false;
        for character in format.chars() {
            match character {
                _ if is_escaped => is_escaped = false,
                '_' | '\\' => is_escaped = true,

                '"' if is_literal => is_literal = false,
                '"' if !is_color => is_literal = true,

                ']' if is_color => is_color = false,
                '[' if !is_literal => is_color = true,
                _ if is_literal || is_color => (),

                'Y' | 'y' | 'D' | 'd' => is_date = true,
                'H' | 'h' | 'S' | 's' => is_time = true,
                _ => (),
            }
        }

        match (is_date, is_time, is_1904) {
            (true, true, true) => Self::NumberDateTime1904,
            (true, true, false) => Self::NumberDateTime1900,
            (true, false, true) => Self::NumberDate1904,
            (true, false, false) => Self::NumberDate1900,
            (false, true, true) => Self::NumberTime1904,
            (false, true, false) => Self::NumberTime1900,
            (false, false, _) => Self::Number,
        }
    }

    /// Returns true for date-styled numbers without a time part.
    pub(crate) fn is_date(&self) -> bool {
        matches!(self, Self::NumberDate1900 | Self::NumberDate1904)
    }
}

/// Represents a single cell in a spreadsheet with position, type, and value.
#[derive(Clone, Debug, PartialEq)]
pub struct Cell {
    /// Row index (0-based)
    pub row: usize,
    /// Column index (0-based)
    pub col: usize,
    /// Cell data type
    pub kind: CellType,
    /// Raw cell value as stored in the worksheet, shared strings already resolved
    pub value: String,
}

impl Cell {
    /// Creates a blank cell used to fill gaps inside a row.
    pub(crate) fn empty(row: usize, col: usize) -> Self {
        Cell {
            row,
            col,
            kind: CellType::Empty,
            value: String::new(),
        }
    }

    /// Returns the Excel-style cell reference (e.g., "A1", "B2").
    pub fn reference(&self) -> String {
        index_to_reference(self.row, self.col)
    }

    /// Returns true if the cell carries no value.
    pub fn is_empty(&self) -> bool {
        self.kind == CellType::Empty || self.value.is_empty()
    }

    /// Returns the rendered text of the cell, as handed to column converters.
    pub fn text(&self) -> String {
        self.to_string()
    }

    /// Returns true if the value is a whole number that fits an `i64`, e.g. `42` or `42.000`.
    pub(crate) fn is_integral(&self) -> bool {
        if self.value.trim().parse::<i64>().is_ok() {
            return true;
        }
        self.value
            .trim()
            .parse::<f64>()
            .map(|real| real.is_finite() && real.fract() == 0.0 && real.abs() < i64::MAX as f64)
            .unwrap_or(false)
    }

    /// Returns true if the cell is date-styled or ISO and renders as a date without time, e.g. `2021-01-31`.
    pub(crate) fn renders_as_date(&self) -> bool {
        (self.kind.is_date() || self.kind == CellType::IsoDateTime)
            && NaiveDate::parse_from_str(&self.text(), "%Y-%m-%d").is_ok()
    }
}

impl Display for Cell {
    /// Renders booleans as `true`/`false`, date-styled numbers as ISO dates and times,
    /// and everything else as stored. Values that do not parse fall back to the raw text.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let value = match self.kind {
            CellType::Boolean => Some(if self.value == "1" { "true" } else { "false" }.to_owned()),
            CellType::NumberDateTime1900 => to_datetime_string(&self.value, false),
            CellType::NumberDateTime1904 => to_datetime_string(&self.value, true),
            CellType::NumberDate1900 => to_date_string(&self.value, false),
            CellType::NumberDate1904 => to_date_string(&self.value, true),
            CellType::NumberTime1900 | CellType::NumberTime1904 => to_time_string(&self.value),
            CellType::IsoDateTime => Some(self.value.replace('T', " ")),
            _ => Some(self.value.to_owned()),
        }
        .unwrap_or_else(|| self.value.to_owned());
        write!(f, "{}", value)
    }
}

/// Converts Excel numeric date to ISO date string.
/// Handles Lotus 1-2-3 leap year bug for 1900 epoch.
fn to_date_string(value: &str, is_1904: bool) -> Option<String> {
    let serial = value.parse::<f64>().ok().filter(|serial| serial.is_finite())?;
    let days = serial.trunc() as i64;
    let offset = if is_1904 {
        1462
    } else if days < 60 {
        1
    } else {
        0
    };
    let duration = Duration::try_days(days.checked_add(offset)?)?;
    let date = NaiveDate::from_ymd_opt(1899, 12, 30)?.checked_add_signed(duration)?;
    Some(date.format("%Y-%m-%d").to_string())
}

/// Converts Excel numeric time (fraction of a day) to ISO time string.
fn to_time_string(value: &str) -> Option<String> {
    let factor = value.parse::<f64>().ok()?.fract();
    let mut hours = (factor * 86_400_000f64).round() as i64;
    let milliseconds = hours % 1_000;
    hours /= 1_000;
    let seconds = hours % 60;
    hours /= 60;
    let minutes = hours % 60;
    hours /= 60;
    let timestamp = if milliseconds > 0 {
        format!("{hours:02}:{minutes:02}:{seconds:02}.{milliseconds:03}")
    } else {
        format!("{hours:02}:{minutes:02}:{seconds:02}")
    };
    Some(timestamp)
}

/// Converts Excel numeric datetime to ISO datetime string.
fn to_datetime_string(value: &str, is_1904: bool) -> Option<String> {
    let date = to_date_string(value, is_1904)?;
    let time = to_time_string(value)?;
    Some(format!("{date} {time}"))
}
