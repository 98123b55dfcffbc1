use super::enums::{DatePrecision, MatchType};
use chrono::NaiveDate;
use serde::Serialize;

/// Value sent with empty/not-empty checks. The remote side ignores it but
/// requires the member to be present.
pub const EMPTY_VALUE_SENTINEL: &str = "0001-01-01T00:00:00";

/// Compares a field against a single string value
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StringFilter {
    match_type: MatchType,
    canonical_name: String,
    value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    include: Option<bool>,
}

impl StringFilter {
    pub fn new(
        canonical_name: impl Into<String>,
        match_type: MatchType,
        value: impl Into<String>,
    ) -> Self {
        Self {
            match_type,
            canonical_name: canonical_name.into(),
            value: value.into(),
            include: None,
        }
    }

    /// Copy of this filter with the `include` flag set
    pub fn with_include(&self, include: bool) -> Self {
        Self {
            include: Some(include),
            ..self.clone()
        }
    }

    pub fn canonical_name(&self) -> &str {
        &self.canonical_name
    }

    pub fn match_type(&self) -> MatchType {
        self.match_type
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn include(&self) -> Option<bool> {
        self.include
    }
}

/// Compares a field against a date rendered at a given precision
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DateFilter {
    match_type: MatchType,
    canonical_name: String,
    value: String,
    precision: DatePrecision,
}

impl DateFilter {
    /// Build from an already formatted value. The value is sent as given.
    pub fn new(
        canonical_name: impl Into<String>,
        match_type: MatchType,
        value: impl Into<String>,
        precision: DatePrecision,
    ) -> Self {
        Self {
            match_type,
            canonical_name: canonical_name.into(),
            value: value.into(),
            precision,
        }
    }

    /// Build from a calendar date, formatted with [`DatePrecision::format_date`]
    pub fn from_date(
        canonical_name: impl Into<String>,
        match_type: MatchType,
        date: NaiveDate,
        precision: DatePrecision,
    ) -> Self {
        Self::new(
            canonical_name,
            match_type,
            precision.format_date(date),
            precision,
        )
    }

    pub fn canonical_name(&self) -> &str {
        &self.canonical_name
    }

    pub fn match_type(&self) -> MatchType {
        self.match_type
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn precision(&self) -> DatePrecision {
        self.precision
    }
}

/// Matches records where the field has no value
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmptyValueFilter {
    match_type: MatchType,
    canonical_name: String,
    value: &'static str,
}

impl EmptyValueFilter {
    pub fn new(canonical_name: impl Into<String>) -> Self {
        Self {
            match_type: MatchType::IsEmpty,
            canonical_name: canonical_name.into(),
            value: EMPTY_VALUE_SENTINEL,
        }
    }

    pub fn canonical_name(&self) -> &str {
        &self.canonical_name
    }

    pub fn match_type(&self) -> MatchType {
        self.match_type
    }

    pub fn value(&self) -> &str {
        self.value
    }
}

/// Matches records where the field has any value
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotEmptyValueFilter {
    match_type: MatchType,
    canonical_name: String,
    value: &'static str,
}

impl NotEmptyValueFilter {
    pub fn new(canonical_name: impl Into<String>) -> Self {
        Self {
            match_type: MatchType::IsNotEmpty,
            canonical_name: canonical_name.into(),
            value: EMPTY_VALUE_SENTINEL,
        }
    }

    pub fn canonical_name(&self) -> &str {
        &self.canonical_name
    }

    pub fn match_type(&self) -> MatchType {
        self.match_type
    }

    pub fn value(&self) -> &str {
        self.value
    }
}

/// Matches (or, with `include = false`, excludes) any of several values
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MultiValueFilter {
    match_type: MatchType,
    canonical_name: String,
    value: Vec<String>,
    include: bool,
}

impl MultiValueFilter {
    pub fn new<I, V>(canonical_name: impl Into<String>, values: I, include: bool) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        Self {
            match_type: MatchType::MultiValue,
            canonical_name: canonical_name.into(),
            value: values.into_iter().map(Into::into).collect(),
            include,
        }
    }

    pub fn canonical_name(&self) -> &str {
        &self.canonical_name
    }

    pub fn match_type(&self) -> MatchType {
        self.match_type
    }

    pub fn values(&self) -> &[String] {
        &self.value
    }

    pub fn include(&self) -> bool {
        self.include
    }
}
