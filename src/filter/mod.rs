//! Filter expression model
//!
//! A filter is a tree of leaf comparisons joined by `and`/`or` composites.
//! Leaves are built directly and combined through [`Combine`]; the result is
//! always a new [`CompositeFilter`], never a mutation of either side.
//!
//! # Example
//!
//! ```
//! use loan_pipeline_filter::filter::{Combine, MatchType, MultiValueFilter, StringFilter};
//!
//! let active = StringFilter::new("Fields.Status", MatchType::Equals, "Active");
//! let states = MultiValueFilter::new("Fields.States", ["CA", "TX"], true);
//! let filter = active.and(states);
//!
//! assert_eq!(filter.len(), 2);
//! ```
//!
//! # Wire tokens
//!
//! Enum members encode as their whole name in lowercase:
//!
//! ```text
//! MatchType::GreaterThanOrEquals   -> "greaterthanorequals"
//! LogicalOperator::Or              -> "or"
//! DatePrecision::Month             -> "month"
//! ```

pub mod composite;
pub mod enums;
pub mod error;
pub mod leaf;
pub mod node;

pub use composite::{Combine, CompositeFilter};
pub use enums::{DatePrecision, LogicalOperator, MatchType, SortOrder, WireEnum, decode, encode};
pub use error::FilterError;
pub use leaf::{
    DateFilter, EMPTY_VALUE_SENTINEL, EmptyValueFilter, MultiValueFilter, NotEmptyValueFilter,
    StringFilter,
};
pub use node::Filter;
