//! Built-in value converters.

use crate::core::converter::Converter;
use crate::core::error::{Result, SextantError};
use chrono::NaiveDate;
use serde_json::Value;

fn mismatch(converter: &str, value: &Value) -> SextantError {
    SextantError::Conversion(format!("Converter [{converter}] cannot convert [{value}]"))
}

/// Text passes through; other JSON values use their JSON rendering
#[derive(Debug, Default)]
pub struct StringConverter;

impl Converter for StringConverter {
    fn name(&self) -> &str {
        "string"
    }

    fn to_text(&self, value: &Value) -> Result<String> {
        Ok(match value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
    }

    fn from_text(&self, text: &str) -> Result<Value> {
        Ok(Value::String(text.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberKind {
    Int,
    Long,
    Float,
    Double,
}

impl NumberKind {
    fn name(self) -> &'static str {
        match self {
            NumberKind::Int => "int",
            NumberKind::Long => "long",
            NumberKind::Float => "float",
            NumberKind::Double => "double",
        }
    }
}

#[derive(Debug)]
pub struct NumberConverter {
    kind: NumberKind,
}

impl NumberConverter {
    pub fn new(kind: NumberKind) -> Self {
        Self { kind }
    }

    fn integer(&self, value: &Value) -> Result<i64> {
        let number = match value {
            Value::Number(n) => n.as_i64(),
            Value::String(s) => s.parse::<i64>().ok(),
            _ => None,
        }
        .ok_or_else(|| mismatch(self.name(), value))?;
        if self.kind == NumberKind::Int && i32::try_from(number).is_err() {
            return Err(SextantError::Conversion(format!(
                "Value [{number}] does not fit converter [int]"
            )));
        }
        Ok(number)
    }

    fn float(&self, value: &Value) -> Result<f64> {
        match value {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.parse::<f64>().ok(),
            _ => None,
        }
        .ok_or_else(|| mismatch(self.name(), value))
    }
}

impl Converter for NumberConverter {
    fn name(&self) -> &str {
        self.kind.name()
    }

    fn to_text(&self, value: &Value) -> Result<String> {
        match self.kind {
            NumberKind::Int | NumberKind::Long => Ok(self.integer(value)?.to_string()),
            NumberKind::Float => Ok((self.float(value)? as f32).to_string()),
            NumberKind::Double => Ok(self.float(value)?.to_string()),
        }
    }

    fn from_text(&self, text: &str) -> Result<Value> {
        let parsed = match self.kind {
            NumberKind::Int => text.parse::<i32>().ok().map(Value::from),
            NumberKind::Long => text.parse::<i64>().ok().map(Value::from),
            NumberKind::Float => text.parse::<f32>().ok().map(|f| Value::from(f as f64)),
            NumberKind::Double => text.parse::<f64>().ok().map(Value::from),
        };
        parsed.ok_or_else(|| {
            SextantError::Conversion(format!(
                "Failed to read [{text}] with converter [{}]",
                self.name()
            ))
        })
    }
}

#[derive(Debug, Default)]
pub struct BooleanConverter;

impl Converter for BooleanConverter {
    fn name(&self) -> &str {
        "boolean"
    }

    fn to_text(&self, value: &Value) -> Result<String> {
        match value {
            Value::Bool(b) => Ok(b.to_string()),
            Value::String(s) => Ok(s.eq_ignore_ascii_case("true").to_string()),
            other => Err(mismatch(self.name(), other)),
        }
    }

    fn from_text(&self, text: &str) -> Result<Value> {
        Ok(Value::Bool(text.eq_ignore_ascii_case("true")))
    }
}

/// Canonical in-memory date form is `%Y-%m-%d`; `format` is the index form
#[derive(Debug)]
pub struct DateConverter {
    format: String,
}

pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d";

impl DateConverter {
    pub fn new(format: impl Into<String>) -> Self {
        Self {
            format: format.into(),
        }
    }

    pub fn format(&self) -> &str {
        &self.format
    }
}

impl Default for DateConverter {
    fn default() -> Self {
        Self::new(DEFAULT_DATE_FORMAT)
    }
}

impl Converter for DateConverter {
    fn name(&self) -> &str {
        "date"
    }

    fn to_text(&self, value: &Value) -> Result<String> {
        let text = value.as_str().ok_or_else(|| mismatch(self.name(), value))?;
        let date = NaiveDate::parse_from_str(text, DEFAULT_DATE_FORMAT)
            .map_err(|e| SextantError::Conversion(format!("Invalid date [{text}]: {e}")))?;
        Ok(date.format(&self.format).to_string())
    }

    fn from_text(&self, text: &str) -> Result<Value> {
        let date = NaiveDate::parse_from_str(text, &self.format).map_err(|e| {
            SextantError::Conversion(format!(
                "Failed to parse [{text}] with date format [{}]: {e}",
                self.format
            ))
        })?;
        Ok(Value::String(date.format(DEFAULT_DATE_FORMAT).to_string()))
    }
}

/// Holder for expression-evaluated metadata
///
/// The value handed in is already the evaluated expression result.
/// It can be written to the index but never read back.
#[derive(Debug)]
pub struct DynamicConverter {
    lang: String,
}

impl DynamicConverter {
    pub fn new(lang: impl Into<String>) -> Self {
        Self { lang: lang.into() }
    }

    pub fn lang(&self) -> &str {
        &self.lang
    }
}

impl Converter for DynamicConverter {
    fn name(&self) -> &str {
        "dynamic"
    }

    fn to_text(&self, value: &Value) -> Result<String> {
        StringConverter.to_text(value)
    }

    fn from_text(&self, _text: &str) -> Result<Value> {
        Err(SextantError::Conversion(format!(
            "Dynamic [{}] values cannot be read back from the index",
            self.lang
        )))
    }

    fn round_trips(&self) -> bool {
        false
    }
}
