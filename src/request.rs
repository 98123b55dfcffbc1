use crate::filter::{Filter, FilterError, SortOrder};
use serde::Serialize;
use std::sync::Arc;

/// Sort key sent with a pipeline request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SortCriterion {
    canonical_name: String,
    order: SortOrder,
}

impl SortCriterion {
    pub fn new(canonical_name: impl Into<String>, order: SortOrder) -> Self {
        Self {
            canonical_name: canonical_name.into(),
            order,
        }
    }

    pub fn ascending(canonical_name: impl Into<String>) -> Self {
        Self::new(canonical_name, SortOrder::Ascending)
    }

    pub fn descending(canonical_name: impl Into<String>) -> Self {
        Self::new(canonical_name, SortOrder::Descending)
    }

    pub fn canonical_name(&self) -> &str {
        &self.canonical_name
    }

    pub fn order(&self) -> SortOrder {
        self.order
    }
}

/// A loan pipeline query: an optional filter tree plus field selection,
/// sorting, pagination and the archive flag.
///
/// Every `with_*` method returns a new request and leaves the receiver as it
/// was. The filter tree is shared between copies rather than cloned.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoanPipelineRequest {
    filter: Option<Arc<Filter>>,
    fields: Vec<String>,
    sort: Vec<SortCriterion>,
    start: Option<u32>,
    limit: Option<u32>,
    include_archived: bool,
}

impl LoanPipelineRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn for_filter(filter: impl Into<Filter>) -> Self {
        Self::new().with_filter(filter)
    }

    pub fn with_filter(&self, filter: impl Into<Filter>) -> Self {
        Self {
            filter: Some(Arc::new(filter.into())),
            ..self.clone()
        }
    }

    /// Append field names. Passing no names keeps the current list.
    pub fn with_fields<I, V>(&self, names: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        let mut fields = self.fields.clone();
        fields.extend(names.into_iter().map(Into::into));
        Self {
            fields,
            ..self.clone()
        }
    }

    /// Append sort criteria. Passing none keeps the current list.
    pub fn with_sort(&self, criteria: impl IntoIterator<Item = SortCriterion>) -> Self {
        let mut sort = self.sort.clone();
        sort.extend(criteria);
        Self {
            sort,
            ..self.clone()
        }
    }

    pub fn with_pagination(&self, start: u32, limit: u32) -> Self {
        Self {
            start: Some(start),
            limit: Some(limit),
            ..self.clone()
        }
    }

    pub fn include_archived(&self, include: bool) -> Self {
        Self {
            include_archived: include,
            ..self.clone()
        }
    }

    pub fn filter(&self) -> Option<&Filter> {
        self.filter.as_deref()
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    pub fn sort(&self) -> &[SortCriterion] {
        &self.sort
    }

    pub fn start(&self) -> Option<u32> {
        self.start
    }

    pub fn limit(&self) -> Option<u32> {
        self.limit
    }

    pub fn includes_archived(&self) -> bool {
        self.include_archived
    }

    /// Render the request body, compact or indented
    pub fn to_json(&self, indented: bool) -> Result<String, FilterError> {
        crate::wire::to_json(self, indented)
    }

    pub fn to_value(&self) -> Result<serde_json::Value, FilterError> {
        Ok(serde_json::to_value(self)?)
    }
}
