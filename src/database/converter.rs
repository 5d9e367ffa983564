use crate::database::value::Value;
use chrono::NaiveDate;
use chrono::NaiveDateTime;
use std::fmt::Debug;
use std::num::ParseFloatError;
use std::sync::Arc;
use thiserror::Error;

/// Errors raised by column converters.
#[derive(Error, Debug)]
pub enum ConversionError {
    #[error("'{value}' does not match date layout '{layout}': {source}")]
    Date {
        value: String,
        layout: String,
        source: chrono::ParseError,
    },

    #[error("'{value}' is not a number: {source}")]
    Float {
        value: String,
        source: ParseFloatError,
    },

    #[error("'{value}' is not an integral number")]
    Number { value: String },

    /// Failure reported by a caller-supplied converter
    #[error(transparent)]
    Custom(#[from] anyhow::Error),
}

type ConvertFn = dyn Fn(&str) -> Result<Value, ConversionError> + Send + Sync;

/// Parses the text of one cell into a typed [`Value`].
///
/// Converters are cheap to clone; clones share the same underlying function,
/// which [`Converter::same_as`] can detect.
#[derive(Clone)]
pub struct Converter {
    name: String,
    function: Arc<ConvertFn>,
}

impl Converter {
    /// Wraps a caller-supplied conversion function.
    ///
    /// The function may return anything convertible into a [`Value`], and fail with a
    /// [`ConversionError`] or any `anyhow::Error` (reported as [`ConversionError::Custom`]).
    ///
    /// ```
    /// use sheetdb::database::converter::Converter;
    /// use sheetdb::database::value::Value;
    ///
    /// let minutes = Converter::new("minutes", |text: &str| -> anyhow::Result<i64> {
    ///     let (hours, minutes) = text.split_once(':').ok_or_else(|| anyhow::anyhow!("missing ':'"))?;
    ///     Ok(hours.parse::<i64>()? * 60 + minutes.parse::<i64>()?)
    /// });
    /// assert_eq!(minutes.convert("1:30").unwrap(), Value::Integer(90));
    /// assert!(minutes.convert("90").is_err());
    /// ```
    pub fn new<F, V, E>(name: impl Into<String>, function: F) -> Self
    where
        F: Fn(&str) -> Result<V, E> + Send + Sync + 'static,
        V: Into<Value>,
        E: Into<ConversionError>,
    {
        Converter {
            name: name.into(),
            function: Arc::new(move |text: &str| -> Result<Value, ConversionError> {
                function(text).map(Into::into).map_err(Into::into)
            }),
        }
    }

    /// Keeps the cell text as is.
    pub fn identity() -> Self {
        Self::new("identity", |text: &str| Ok::<_, ConversionError>(Value::Text(text.to_owned())))
    }

    /// Parses a date (or a date and time) using a chrono `strftime` layout, e.g. `%m/%d/%y`.
    pub fn date(layout: &str) -> Self {
        let owned = layout.to_owned();
        Self::new(format!("date({layout})"), move |text: &str| parse_date(text, &owned))
    }

    /// Parses a floating point number.
    pub fn float() -> Self {
        Self::new("float", |text: &str| {
            text.trim()
                .parse::<f64>()
                .map(Value::Real)
                .map_err(|source| ConversionError::Float {
                    value: text.to_owned(),
                    source,
                })
        })
    }

    /// Parses an integral number; `42` and `42.000` are both accepted.
    pub fn number() -> Self {
        Self::new("number", |text: &str| parse_integral(text).map(Value::Integer))
    }

    /// Returns the descriptive name of the converter.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Converts the text of one cell.
    pub fn convert(&self, text: &str) -> Result<Value, ConversionError> {
        (self.function)(text)
    }

    /// Returns true if both converters share the same underlying function.
    pub fn same_as(&self, other: &Converter) -> bool {
        Arc::ptr_eq(&self.function, &other.function)
    }
}

impl Debug for Converter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Converter").field(&self.name).finish()
    }
}

fn parse_date(text: &str, layout: &str) -> Result<Value, ConversionError> {
    let value = text.trim();
    if let Ok(datetime) = NaiveDateTime::parse_from_str(value, layout) {
        return Ok(Value::DateTime(datetime));
    }
    NaiveDate::parse_from_str(value, layout)
        .map(Value::Date)
        .map_err(|source| ConversionError::Date {
            value: text.to_owned(),
            layout: layout.to_owned(),
            source,
        })
}

fn parse_integral(text: &str) -> Result<i64, ConversionError> {
    let value = text.trim();
    if let Ok(integer) = value.parse::<i64>() {
        return Ok(integer);
    }
    match value.parse::<f64>() {
        Ok(real) if real.is_finite() && real.fract() == 0.0 && real.abs() < i64::MAX as f64 => Ok(real as i64),
        _ => Err(ConversionError::Number {
            value: text.to_owned(),
        }),
    }
}
