use chrono::NaiveDate;
use chrono::NaiveDateTime;
use duckdb::types::ToSql;
use duckdb::types::ToSqlOutput;
use duckdb::types::Value as DuckValue;
use std::fmt::Display;

/// A typed value produced by a column converter, ready to be bound to a statement.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Null,
    Text(String),
    Integer(i64),
    Real(f64),
    /// Bound as ISO text (`%Y-%m-%d`)
    Date(NaiveDate),
    /// Bound as ISO text (`%Y-%m-%d %H:%M:%S`)
    DateTime(NaiveDateTime),
}

impl ToSql for Value {
    fn to_sql(&self) -> duckdb::Result<ToSqlOutput<'_>> {
        let value = match self {
            Value::Null => DuckValue::Null,
            Value::Text(text) => DuckValue::Text(text.to_owned()),
            Value::Integer(integer) => DuckValue::BigInt(*integer),
            Value::Real(real) => DuckValue::Double(*real),
            Value::Date(_) | Value::DateTime(_) => DuckValue::Text(self.to_string()),
        };
        Ok(ToSqlOutput::Owned(value))
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Null => write!(f, "NULL"),
            Value::Text(text) => write!(f, "{text}"),
            Value::Integer(integer) => write!(f, "{integer}"),
            Value::Real(real) => write!(f, "{real}"),
            Value::Date(date) => write!(f, "{}", date.format("%Y-%m-%d")),
            Value::DateTime(datetime) => write!(f, "{}", datetime.format("%Y-%m-%d %H:%M:%S")),
        }
    }
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Value::Text(text.to_owned())
    }
}

impl From<String> for Value {
    fn from(text: String) -> Self {
        Value::Text(text)
    }
}

impl From<i64> for Value {
    fn from(integer: i64) -> Self {
        Value::Integer(integer)
    }
}

impl From<f64> for Value {
    fn from(real: f64) -> Self {
        Value::Real(real)
    }
}

impl From<NaiveDate> for Value {
    fn from(date: NaiveDate) -> Self {
        Value::Date(date)
    }
}

impl From<NaiveDateTime> for Value {
    fn from(datetime: NaiveDateTime) -> Self {
        Value::DateTime(datetime)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dates_are_bound_as_iso_text() {
        let date = NaiveDate::from_ymd_opt(2021, 3, 7).unwrap();
        assert_eq!(Value::from(date).to_string(), "2021-03-07");
        let datetime = date.and_hms_opt(8, 30, 0).unwrap();
        assert_eq!(Value::from(datetime).to_string(), "2021-03-07 08:30:00");
        match Value::from(date).to_sql().unwrap() {
            ToSqlOutput::Owned(DuckValue::Text(text)) => assert_eq!(text, "2021-03-07"),
            other => panic!("unexpected output {other:?}"),
        }
    }

    #[test]
    fn options_map_to_null() {
        assert_eq!(Value::from(None::<i64>), Value::Null);
        assert_eq!(Value::from(Some(2.5)), Value::Real(2.5));
    }
}
