use super::composite::{Combine, CompositeFilter};
use super::enums::{LogicalOperator, MatchType};
use super::error::FilterError;
use super::leaf::{DateFilter, EmptyValueFilter, MultiValueFilter, NotEmptyValueFilter, StringFilter};

/// Any node of a filter tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter {
    String(StringFilter),
    Date(DateFilter),
    Empty(EmptyValueFilter),
    NotEmpty(NotEmptyValueFilter),
    MultiValue(MultiValueFilter),
    Composite(CompositeFilter),
}

impl Filter {
    pub fn is_leaf(&self) -> bool {
        !matches!(self, Filter::Composite(_))
    }

    pub fn as_composite(&self) -> Option<&CompositeFilter> {
        match self {
            Filter::Composite(composite) => Some(composite),
            _ => None,
        }
    }

    /// Canonical name of a leaf, `None` for composites
    pub fn canonical_name(&self) -> Option<&str> {
        match self {
            Filter::String(f) => Some(f.canonical_name()),
            Filter::Date(f) => Some(f.canonical_name()),
            Filter::Empty(f) => Some(f.canonical_name()),
            Filter::NotEmpty(f) => Some(f.canonical_name()),
            Filter::MultiValue(f) => Some(f.canonical_name()),
            Filter::Composite(_) => None,
        }
    }

    /// Match type of a leaf, `None` for composites
    pub fn match_type(&self) -> Option<MatchType> {
        match self {
            Filter::String(f) => Some(f.match_type()),
            Filter::Date(f) => Some(f.match_type()),
            Filter::Empty(f) => Some(f.match_type()),
            Filter::NotEmpty(f) => Some(f.match_type()),
            Filter::MultiValue(f) => Some(f.match_type()),
            Filter::Composite(_) => None,
        }
    }

    /// Combine with an operand that may be absent.
    ///
    /// A composite treats an absent operand as a no-op and returns itself. A
    /// leaf cannot form a combination on its own, so an absent operand is
    /// rejected with [`FilterError::InvalidCombination`].
    pub fn try_combine(
        &self,
        operator: LogicalOperator,
        other: Option<Filter>,
    ) -> Result<CompositeFilter, FilterError> {
        match (self, other) {
            (_, Some(other)) => Ok(self.combine(operator, other)),
            (Filter::Composite(composite), None) => Ok(composite.clone()),
            (_, None) => Err(FilterError::InvalidCombination { operator }),
        }
    }

    pub fn try_and(&self, other: Option<Filter>) -> Result<CompositeFilter, FilterError> {
        self.try_combine(LogicalOperator::And, other)
    }

    pub fn try_or(&self, other: Option<Filter>) -> Result<CompositeFilter, FilterError> {
        self.try_combine(LogicalOperator::Or, other)
    }
}

impl Combine for Filter {
    fn combine(&self, operator: LogicalOperator, other: Filter) -> CompositeFilter {
        match self {
            Filter::Composite(composite) => composite.combine(operator, other),
            leaf => CompositeFilter::new(operator, vec![leaf.clone(), other]),
        }
    }
}

macro_rules! leaf_variant {
    ($($leaf:ident => $variant:ident),+ $(,)?) => {
        $(
            impl From<$leaf> for Filter {
                fn from(filter: $leaf) -> Self {
                    Filter::$variant(filter)
                }
            }

            impl Combine for $leaf {
                fn combine(&self, operator: LogicalOperator, other: Filter) -> CompositeFilter {
                    CompositeFilter::new(operator, vec![Filter::$variant(self.clone()), other])
                }
            }
        )+
    };
}

leaf_variant! {
    StringFilter => String,
    DateFilter => Date,
    EmptyValueFilter => Empty,
    NotEmptyValueFilter => NotEmpty,
    MultiValueFilter => MultiValue,
}

impl From<CompositeFilter> for Filter {
    fn from(filter: CompositeFilter) -> Self {
        Filter::Composite(filter)
    }
}
