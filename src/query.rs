//! TOML query definitions.
//!
//! A query file describes one pipeline request. Filter terms are tagged by
//! `kind` and groups fold their terms left to right through [`Combine`], so a
//! group behaves exactly like chaining `and`/`or` calls in code.
//!
//! ```toml
//! include_archived = true
//! fields = ["Fields.LoanNumber"]
//!
//! [[sort]]
//! canonical_name = "Fields.CreatedDate"
//! order = "ascending"
//!
//! [filter]
//! kind = "group"
//! operator = "and"
//!
//! [[filter.terms]]
//! kind = "string"
//! canonical_name = "Fields.Status"
//! match_type = "equals"
//! value = "Active"
//! ```

use crate::filter::{
    Combine, DateFilter, DatePrecision, EmptyValueFilter, Filter, LogicalOperator, MatchType,
    MultiValueFilter, NotEmptyValueFilter, SortOrder, StringFilter,
};
use crate::request::{LoanPipelineRequest, SortCriterion};
use chrono::NaiveDate;
use serde::de::{self, Deserializer};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use thiserror::Error;
use toml::value::Datetime;

#[derive(Debug, Error)]
pub enum QueryError {
    #[error("Failed to read query file '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse query file '{path}': {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
    #[error("Invalid query definition: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct QueryDefinition {
    pub filter: Option<TermDefinition>,
    pub fields: Vec<String>,
    pub sort: Vec<SortDefinition>,
    pub pagination: Option<PaginationDefinition>,
    pub include_archived: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SortDefinition {
    pub canonical_name: String,
    #[serde(default = "default_sort_order")]
    pub order: SortOrder,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PaginationDefinition {
    #[serde(default)]
    pub start: u32,
    pub limit: u32,
}

/// One node of a filter tree as written in a query file
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case", deny_unknown_fields)]
pub enum TermDefinition {
    String {
        canonical_name: String,
        match_type: MatchType,
        value: String,
        #[serde(default)]
        include: Option<bool>,
    },
    /// Either `value` (sent verbatim) or `date` (formatted at `precision`)
    /// must be given, not both. `date` takes a TOML local date
    /// (`date = 2026-01-14`) or the same text quoted.
    Date {
        canonical_name: String,
        match_type: MatchType,
        #[serde(default)]
        value: Option<String>,
        #[serde(default, deserialize_with = "deserialize_query_date")]
        date: Option<NaiveDate>,
        #[serde(default)]
        precision: DatePrecision,
    },
    Empty {
        canonical_name: String,
    },
    NotEmpty {
        canonical_name: String,
    },
    MultiValue {
        canonical_name: String,
        #[serde(default)]
        values: Vec<String>,
        #[serde(default = "default_include")]
        include: bool,
    },
    Group {
        operator: LogicalOperator,
        #[serde(default)]
        terms: Vec<TermDefinition>,
    },
}

fn default_sort_order() -> SortOrder {
    SortOrder::Ascending
}

fn default_include() -> bool {
    true
}

fn deserialize_query_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum DateInput {
        Toml(Datetime),
        Text(String),
    }

    let Some(input) = Option::<DateInput>::deserialize(deserializer)? else {
        return Ok(None);
    };

    let date = match input {
        DateInput::Toml(datetime) => {
            let (Some(date), None, None) = (datetime.date, datetime.time, datetime.offset) else {
                return Err(de::Error::custom(format!(
                    "expected a local date like 2026-01-14, got '{datetime}'"
                )));
            };
            NaiveDate::from_ymd_opt(
                i32::from(date.year),
                u32::from(date.month),
                u32::from(date.day),
            )
            .ok_or_else(|| {
                <D::Error as de::Error>::custom(format!("invalid calendar date '{datetime}'"))
            })?
        }
        DateInput::Text(text) => NaiveDate::parse_from_str(&text, "%Y-%m-%d").map_err(|e| {
            <D::Error as de::Error>::custom(format!(
                "invalid date '{text}', expected YYYY-MM-DD: {e}"
            ))
        })?,
    };

    Ok(Some(date))
}

impl TermDefinition {
    pub fn build(&self) -> Result<Filter, QueryError> {
        let filter: Filter = match self {
            TermDefinition::String {
                canonical_name,
                match_type,
                value,
                include,
            } => {
                let filter = StringFilter::new(canonical_name.as_str(), *match_type, value.as_str());
                match include {
                    Some(include) => filter.with_include(*include).into(),
                    None => filter.into(),
                }
            }
            TermDefinition::Date {
                canonical_name,
                match_type,
                value,
                date,
                precision,
            } => match (value, date) {
                (Some(value), None) => {
                    DateFilter::new(canonical_name.as_str(), *match_type, value.as_str(), *precision)
                        .into()
                }
                (None, Some(date)) => {
                    DateFilter::from_date(canonical_name.as_str(), *match_type, *date, *precision)
                        .into()
                }
                _ => {
                    return Err(QueryError::Invalid(format!(
                        "date term '{canonical_name}' needs exactly one of 'value' or 'date'"
                    )));
                }
            },
            TermDefinition::Empty { canonical_name } => {
                EmptyValueFilter::new(canonical_name.as_str()).into()
            }
            TermDefinition::NotEmpty { canonical_name } => {
                NotEmptyValueFilter::new(canonical_name.as_str()).into()
            }
            TermDefinition::MultiValue {
                canonical_name,
                values,
                include,
            } => MultiValueFilter::new(canonical_name.as_str(), values.iter().cloned(), *include)
                .into(),
            TermDefinition::Group { operator, terms } => build_group(*operator, terms)?,
        };

        Ok(filter)
    }
}

fn build_group(operator: LogicalOperator, terms: &[TermDefinition]) -> Result<Filter, QueryError> {
    let mut built = terms.iter().map(TermDefinition::build);

    let first = built
        .next()
        .ok_or_else(|| QueryError::Invalid(format!("'{operator}' group has no terms")))??;

    built.try_fold(first, |acc, term| {
        Ok(Filter::Composite(acc.combine(operator, term?)))
    })
}

impl QueryDefinition {
    pub fn from_toml_str(raw: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(raw)
    }

    /// Build the pipeline request this definition describes
    pub fn to_request(&self) -> Result<LoanPipelineRequest, QueryError> {
        let mut request = LoanPipelineRequest::new()
            .with_fields(self.fields.iter().cloned())
            .with_sort(
                self.sort
                    .iter()
                    .map(|s| SortCriterion::new(s.canonical_name.as_str(), s.order)),
            )
            .include_archived(self.include_archived);

        if let Some(term) = &self.filter {
            request = request.with_filter(term.build()?);
        }
        if let Some(pagination) = self.pagination {
            request = request.with_pagination(pagination.start, pagination.limit);
        }

        Ok(request)
    }
}

pub fn load_query_from_path(path: &Path) -> Result<QueryDefinition, QueryError> {
    let path_display = path.display().to_string();
    let raw = fs::read_to_string(path).map_err(|source| QueryError::Read {
        path: path_display.clone(),
        source,
    })?;

    let definition =
        QueryDefinition::from_toml_str(&raw).map_err(|source| QueryError::Parse {
            path: path_display.clone(),
            source,
        })?;

    tracing::debug!(
        path = %path_display,
        has_filter = definition.filter.is_some(),
        fields = definition.fields.len(),
        sort = definition.sort.len(),
        "Query definition loaded"
    );
    Ok(definition)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_term_filter() {
        let definition = QueryDefinition::from_toml_str(
            r#"
            [filter]
            kind = "empty"
            canonical_name = "Fields.ClosingDate"
            "#,
        )
        .unwrap();

        let request = definition.to_request().unwrap();
        assert_eq!(
            request.filter(),
            Some(&Filter::from(EmptyValueFilter::new("Fields.ClosingDate")))
        );
    }

    #[test]
    fn test_group_folds_through_combination() {
        let definition = QueryDefinition::from_toml_str(
            r#"
            [filter]
            kind = "group"
            operator = "or"

            [[filter.terms]]
            kind = "not_empty"
            canonical_name = "A"

            [[filter.terms]]
            kind = "not_empty"
            canonical_name = "B"

            [[filter.terms]]
            kind = "not_empty"
            canonical_name = "C"
            "#,
        )
        .unwrap();

        let filter = definition.filter.as_ref().unwrap().build().unwrap();
        let expected = NotEmptyValueFilter::new("A")
            .or(NotEmptyValueFilter::new("B"))
            .or(NotEmptyValueFilter::new("C"));
        assert_eq!(filter, Filter::Composite(expected));
    }

    #[test]
    fn test_single_term_group_collapses_to_term() {
        let term = TermDefinition::Group {
            operator: LogicalOperator::And,
            terms: vec![TermDefinition::Empty {
                canonical_name: "A".to_string(),
            }],
        };
        assert_eq!(
            term.build().unwrap(),
            Filter::from(EmptyValueFilter::new("A"))
        );
    }

    #[test]
    fn test_empty_group_is_invalid() {
        let term = TermDefinition::Group {
            operator: LogicalOperator::Or,
            terms: Vec::new(),
        };
        assert!(matches!(term.build(), Err(QueryError::Invalid(_))));
    }

    #[test]
    fn test_date_term_needs_exactly_one_source() {
        let term = TermDefinition::Date {
            canonical_name: "D".to_string(),
            match_type: MatchType::Equals,
            value: Some("2024-01-01".to_string()),
            date: NaiveDate::from_ymd_opt(2024, 1, 1),
            precision: DatePrecision::Day,
        };
        assert!(matches!(term.build(), Err(QueryError::Invalid(_))));
    }

    #[test]
    fn test_date_accepts_toml_date_and_quoted_text() {
        for raw in ["date = 2026-01-14", r#"date = "2026-01-14""#] {
            let definition = QueryDefinition::from_toml_str(&format!(
                "[filter]\nkind = \"date\"\ncanonical_name = \"D\"\nmatch_type = \"equals\"\n{raw}\n"
            ))
            .unwrap();
            let filter = definition.filter.as_ref().unwrap().build().unwrap();
            assert_eq!(
                filter,
                Filter::from(DateFilter::new(
                    "D",
                    MatchType::Equals,
                    "2026-01-14",
                    DatePrecision::Day
                ))
            );
        }
    }

    #[test]
    fn test_date_with_time_of_day_is_rejected() {
        let result = QueryDefinition::from_toml_str(
            r#"
            [filter]
            kind = "date"
            canonical_name = "D"
            match_type = "equals"
            date = 2026-01-14T08:30:00
            "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_token_is_a_parse_error() {
        let result = QueryDefinition::from_toml_str(
            r#"
            [filter]
            kind = "string"
            canonical_name = "A"
            match_type = "roughly"
            value = "1"
            "#,
        );
        let err = result.unwrap_err().to_string();
        assert!(err.contains("roughly"), "unexpected error: {err}");
    }

    #[test]
    fn test_defaults() {
        let definition = QueryDefinition::from_toml_str(
            r#"
            [[sort]]
            canonical_name = "Fields.CreatedDate"

            [pagination]
            limit = 20
            "#,
        )
        .unwrap();
        let request = definition.to_request().unwrap();

        assert_eq!(request.sort()[0].order(), SortOrder::Ascending);
        assert_eq!(request.start(), Some(0));
        assert_eq!(request.limit(), Some(20));
        assert!(!request.includes_archived());
        assert!(request.filter().is_none());
    }
}
