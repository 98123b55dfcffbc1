use super::enums::LogicalOperator;
use super::node::Filter;

/// Combination of filter nodes.
///
/// Every node can be joined with another under `and`/`or`. A leaf always
/// produces a fresh two-term composite. A composite appends to its own terms
/// when the operator matches (flattening) and otherwise wraps itself as the
/// first term of a new composite (nesting), so `a.and(b).and(c)` yields
/// `and[a, b, c]` while `a.and(b).or(c)` yields `or[and[a, b], c]`.
pub trait Combine {
    fn combine(&self, operator: LogicalOperator, other: Filter) -> CompositeFilter;

    fn and(&self, other: impl Into<Filter>) -> CompositeFilter
    where
        Self: Sized,
    {
        self.combine(LogicalOperator::And, other.into())
    }

    fn or(&self, other: impl Into<Filter>) -> CompositeFilter
    where
        Self: Sized,
    {
        self.combine(LogicalOperator::Or, other.into())
    }
}

/// Sibling terms joined by one logical operator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompositeFilter {
    operator: LogicalOperator,
    terms: Vec<Filter>,
}

impl CompositeFilter {
    /// Terms keep their insertion order on the wire.
    pub fn new(operator: LogicalOperator, terms: Vec<Filter>) -> Self {
        Self { operator, terms }
    }

    pub fn operator(&self) -> LogicalOperator {
        self.operator
    }

    pub fn terms(&self) -> &[Filter] {
        &self.terms
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Like [`Combine::combine`], but an absent operand returns `self` unchanged
    pub fn combine_maybe(&self, operator: LogicalOperator, other: Option<Filter>) -> Self {
        match other {
            Some(other) => self.combine(operator, other),
            None => self.clone(),
        }
    }

    pub fn and_maybe(&self, other: Option<Filter>) -> Self {
        self.combine_maybe(LogicalOperator::And, other)
    }

    pub fn or_maybe(&self, other: Option<Filter>) -> Self {
        self.combine_maybe(LogicalOperator::Or, other)
    }
}

impl Combine for CompositeFilter {
    fn combine(&self, operator: LogicalOperator, other: Filter) -> CompositeFilter {
        if self.operator == operator {
            let mut terms = self.terms.clone();
            terms.push(other);
            CompositeFilter::new(operator, terms)
        } else {
            CompositeFilter::new(operator, vec![Filter::Composite(self.clone()), other])
        }
    }
}
