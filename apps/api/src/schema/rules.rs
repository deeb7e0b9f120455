use std::sync::OnceLock;

use chrono::{DateTime, NaiveDate};
use regex::Regex;
use serde_json::Value;

/// A single constraint a field value must satisfy.
#[derive(Debug, Clone, PartialEq)]
pub enum Rule {
    Required,
    MinLength(usize),
    MaxLength(usize),
    Email,
    Url,
    Number,
    /// Lower bound for numeric values; non-numeric values are left to `Number`.
    Min(f64),
    Date,
}

/// A rule plus the message shown when it fails.
#[derive(Debug, Clone, PartialEq)]
pub struct Constraint {
    pub rule: Rule,
    pub message: Option<String>,
}

impl Constraint {
    /// Checks `value`; `field` is only used to build the default message.
    ///
    /// Empty values only ever fail `Required`. Shape rules skip them so an
    /// optional field left blank stays valid.
    pub fn check(&self, field: &str, value: &Value) -> Result<(), String> {
        if is_empty(value) {
            return match self.rule {
                Rule::Required => Err(self.message_or(|| format!("{field} is a required field"))),
                _ => Ok(()),
            };
        }

        match &self.rule {
            Rule::Required => Ok(()),
            Rule::MinLength(min) => {
                if text_of(value).chars().count() < *min {
                    Err(self.message_or(|| format!("{field} must be at least {min} characters")))
                } else {
                    Ok(())
                }
            }
            Rule::MaxLength(max) => {
                if text_of(value).chars().count() > *max {
                    Err(self.message_or(|| format!("{field} must be at most {max} characters")))
                } else {
                    Ok(())
                }
            }
            Rule::Email => {
                if email_regex().is_match(text_of(value).trim()) {
                    Ok(())
                } else {
                    Err(self.message_or(|| format!("{field} must be a valid email")))
                }
            }
            Rule::Url => {
                if url_regex().is_match(text_of(value).trim()) {
                    Ok(())
                } else {
                    Err(self.message_or(|| format!("{field} must be a valid URL")))
                }
            }
            Rule::Number => match number_of(value) {
                Some(_) => Ok(()),
                None => Err(self.message_or(|| format!("{field} must be a number"))),
            },
            Rule::Min(min) => match number_of(value) {
                Some(n) if n < *min => Err(self.message_or(|| {
                    format!("{field} must be greater than or equal to {min}")
                })),
                _ => Ok(()),
            },
            Rule::Date => {
                if parse_date(text_of(value)).is_some() {
                    Ok(())
                } else {
                    Err(self.message_or(|| format!("{field} must be a valid date")))
                }
            }
        }
    }

    fn message_or(&self, default: impl FnOnce() -> String) -> String {
        self.message.clone().unwrap_or_else(default)
    }
}

pub fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        _ => false,
    }
}

/// Parses the date shapes a browser date input or a JSON client produces:
/// `YYYY-MM-DD`, an RFC 3339 timestamp, or a bare four-digit year.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }
    if raw.len() == 4 && raw.chars().all(|c| c.is_ascii_digit()) {
        return raw
            .parse::<i32>()
            .ok()
            .and_then(|year| NaiveDate::from_ymd_opt(year, 1, 1));
    }
    None
}

/// Numeric view of a raw value. Blank or non-finite input is not a number.
pub fn parse_number(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}

fn number_of(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_number(s),
        _ => None,
    }
}

fn text_of(value: &Value) -> &str {
    value.as_str().unwrap_or_default()
}

fn email_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
    })
}

fn url_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)^(https?|ftp)://[^\s/$.?#][^\s]*$").expect("url pattern is valid")
    })
}
