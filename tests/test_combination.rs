use chrono::NaiveDate;
use loan_pipeline_filter::filter::{
    Combine, DateFilter, DatePrecision, EmptyValueFilter, Filter, FilterError, LogicalOperator,
    MatchType, MultiValueFilter, NotEmptyValueFilter, StringFilter,
};

fn created_on(day: u32) -> DateFilter {
    DateFilter::from_date(
        "Fields.CreatedDate",
        MatchType::Equals,
        NaiveDate::from_ymd_opt(2026, 1, day).expect("valid date"),
        DatePrecision::Day,
    )
}

#[test]
fn test_or_chain_preserves_insertion_order() {
    let f4 = created_on(14);
    let f5 = created_on(28);
    let f6 = created_on(30);

    let combined = f4.or(f6.clone()).or(f5.clone());

    assert_eq!(combined.operator(), LogicalOperator::Or);
    assert_eq!(
        combined.terms(),
        &[Filter::from(f4), Filter::from(f6), Filter::from(f5)],
        "terms should stay in the order they were added"
    );
}

#[test]
fn test_and_chain_keeps_or_group_as_single_term() {
    let filter1 = StringFilter::new("Fields.Status", MatchType::Equals, "Active");
    let filter2 = created_on(1);
    let date_or = created_on(14).or(created_on(30)).or(created_on(28));

    let combined = filter1
        .and(filter2.clone())
        .and(date_or.clone())
        .and(EmptyValueFilter::new("Fields.CreatedDate2"))
        .and(NotEmptyValueFilter::new("Fields.CreatedDate2"));

    assert_eq!(combined.operator(), LogicalOperator::And);
    assert_eq!(combined.len(), 5);
    assert_eq!(combined.terms()[1], Filter::from(filter2));
    assert_eq!(
        combined.terms()[2],
        Filter::Composite(date_or),
        "an 'or' composite must be nested whole, not merged into the 'and' list"
    );
}

#[test]
fn test_mixed_operators_nest_instead_of_merging() {
    let a = StringFilter::new("A", MatchType::Equals, "1");
    let b = StringFilter::new("B", MatchType::Equals, "2");
    let c = StringFilter::new("C", MatchType::Equals, "3");

    let combined = a.and(b).or(c.clone());

    assert_eq!(combined.operator(), LogicalOperator::Or);
    assert_eq!(combined.len(), 2);
    let inner = combined.terms()[0]
        .as_composite()
        .expect("first term should be the 'and' group");
    assert_eq!(inner.operator(), LogicalOperator::And);
    assert_eq!(inner.len(), 2);
    assert_eq!(combined.terms()[1], Filter::from(c));
}

#[test]
fn test_composite_on_left_of_leaf_flattens_or_nests() {
    let group = MultiValueFilter::new("Fields.States", ["CA", "TX"], true)
        .and(StringFilter::new("A", MatchType::Equals, "1"));
    let extra = Filter::from(StringFilter::new("B", MatchType::Equals, "2"));

    let same = group.combine(LogicalOperator::And, extra.clone());
    let mut expected_terms = group.terms().to_vec();
    expected_terms.push(extra.clone());
    assert_eq!(same.terms(), expected_terms.as_slice());

    let other = group.combine(LogicalOperator::Or, extra.clone());
    assert_eq!(
        other.terms(),
        &[Filter::Composite(group.clone()), extra]
    );
}

#[test]
fn test_absent_operand_contract() {
    let group = StringFilter::new("A", MatchType::Equals, "1")
        .or(StringFilter::new("B", MatchType::Equals, "2"));

    assert_eq!(group.and_maybe(None), group);
    assert_eq!(group.or_maybe(None), group);
    assert_eq!(
        Filter::from(group.clone())
            .try_and(None)
            .expect("composites accept an absent operand"),
        group
    );

    let leaf = Filter::from(StringFilter::new("A", MatchType::Equals, "1"));
    assert!(matches!(
        leaf.try_or(None),
        Err(FilterError::InvalidCombination {
            operator: LogicalOperator::Or
        })
    ));
}

#[test]
fn test_filters_are_shareable_across_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Filter>();
    assert_send_sync::<loan_pipeline_filter::LoanPipelineRequest>();
}
