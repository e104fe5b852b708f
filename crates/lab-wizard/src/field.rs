//! Per-field validation errors and the small rules steps build them from.

use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;

/// Date format the draft keeps dates in.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Validation errors of one step, keyed by field name.
///
/// Field names are the draft's wire names (`methodId`, `startDate`, ...);
/// list entries use `attributes[0].numericValue`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an error. The first error reported for a field is kept.
    pub fn insert(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_insert_with(|| message.into());
    }

    #[must_use]
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    #[must_use]
    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Field names in order.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    // -----------------------------------------------------------------------
    // Rules
    // -----------------------------------------------------------------------

    /// Non-blank text.
    pub fn required(&mut self, field: &str, value: &str) {
        if value.trim().is_empty() {
            self.insert(field, "required");
        }
    }

    /// Required `YYYY-MM-DD` date. Returns the parsed date when valid.
    pub fn date(&mut self, field: &str, value: &str) -> Option<NaiveDate> {
        if value.trim().is_empty() {
            self.insert(field, "required");
            return None;
        }
        match parse_date(value) {
            Some(date) => Some(date),
            None => {
                self.insert(field, "expected a date as YYYY-MM-DD");
                None
            }
        }
    }

    /// `end` must not fall before `start`. Skipped unless both parsed.
    pub fn date_order(&mut self, field: &str, start: Option<NaiveDate>, end: Option<NaiveDate>) {
        if let (Some(start), Some(end)) = (start, end) {
            if end < start {
                self.insert(field, "must not be before the start date");
            }
        }
    }

    /// `end` must fall strictly after `start`. Skipped unless both parsed.
    pub fn date_after(&mut self, field: &str, start: Option<NaiveDate>, end: Option<NaiveDate>) {
        if let (Some(start), Some(end)) = (start, end) {
            if end <= start {
                self.insert(field, "must be after the start date");
            }
        }
    }

    /// Required whole number greater than zero.
    pub fn positive_int(&mut self, field: &str, value: &str) -> Option<u32> {
        if value.trim().is_empty() {
            self.insert(field, "required");
            return None;
        }
        match value.trim().parse::<u32>() {
            Ok(n) if n > 0 => Some(n),
            _ => {
                self.insert(field, "must be a whole number greater than zero");
                None
            }
        }
    }

    /// Required decimal number.
    pub fn number(&mut self, field: &str, value: &str) -> Option<f64> {
        if value.trim().is_empty() {
            self.insert(field, "required");
            return None;
        }
        match parse_number(value) {
            Some(n) => Some(n),
            None => {
                self.insert(field, "must be a number");
                None
            }
        }
    }

    /// At least one entry.
    pub fn non_empty<T>(&mut self, field: &str, values: &[T]) {
        if values.is_empty() {
            self.insert(field, "select at least one");
        }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (field, message)) in self.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{field}: {message}")?;
        }
        Ok(())
    }
}

/// Parse a draft date.
#[must_use]
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).ok()
}

/// Parse a draft number. Accepts a comma as decimal separator.
#[must_use]
pub fn parse_number(value: &str) -> Option<f64> {
    value
        .trim()
        .replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
}
