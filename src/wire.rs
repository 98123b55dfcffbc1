//! JSON rendering for filter trees and pipeline requests.
//!
//! Leaves render through their derived field tables. Composites and the
//! request envelope are walked here so the member order on the wire stays
//! fixed: `operator, terms` for composites and
//! `filter, fields, sort, start, limit, includeArchivedLoans` for requests.

use crate::filter::{CompositeFilter, Filter, FilterError};
use crate::request::LoanPipelineRequest;
use serde::ser::{Serialize, SerializeStruct, Serializer};

impl Serialize for Filter {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Filter::String(filter) => filter.serialize(serializer),
            Filter::Date(filter) => filter.serialize(serializer),
            Filter::Empty(filter) => filter.serialize(serializer),
            Filter::NotEmpty(filter) => filter.serialize(serializer),
            Filter::MultiValue(filter) => filter.serialize(serializer),
            Filter::Composite(filter) => filter.serialize(serializer),
        }
    }
}

impl Serialize for CompositeFilter {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("CompositeFilter", 2)?;
        state.serialize_field("operator", &self.operator())?;
        state.serialize_field("terms", self.terms())?;
        state.end()
    }
}

impl Serialize for LoanPipelineRequest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let len = 1
            + usize::from(self.filter().is_some())
            + usize::from(!self.fields().is_empty())
            + usize::from(!self.sort().is_empty())
            + usize::from(self.start().is_some())
            + usize::from(self.limit().is_some());
        let mut state = serializer.serialize_struct("LoanPipelineRequest", len)?;

        match self.filter() {
            Some(filter) => state.serialize_field("filter", filter)?,
            None => state.skip_field("filter")?,
        }
        if self.fields().is_empty() {
            state.skip_field("fields")?;
        } else {
            state.serialize_field("fields", self.fields())?;
        }
        if self.sort().is_empty() {
            state.skip_field("sort")?;
        } else {
            state.serialize_field("sort", self.sort())?;
        }
        match self.start() {
            Some(start) => state.serialize_field("start", &start)?,
            None => state.skip_field("start")?,
        }
        match self.limit() {
            Some(limit) => state.serialize_field("limit", &limit)?,
            None => state.skip_field("limit")?,
        }
        state.serialize_field("includeArchivedLoans", &self.includes_archived())?;
        state.end()
    }
}

/// Render any wire value as compact or indented JSON
pub fn to_json<T: Serialize + ?Sized>(value: &T, indented: bool) -> Result<String, FilterError> {
    let json = if indented {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(json)
}

impl Filter {
    pub fn to_json(&self, indented: bool) -> Result<String, FilterError> {
        to_json(self, indented)
    }

    pub fn to_value(&self) -> Result<serde_json::Value, FilterError> {
        Ok(serde_json::to_value(self)?)
    }
}

impl CompositeFilter {
    pub fn to_json(&self, indented: bool) -> Result<String, FilterError> {
        to_json(self, indented)
    }
}
