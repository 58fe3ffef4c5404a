// Property-based tests for transaction aggregation
//
// - Groups partition exactly the eligible records
// - Group totals add up to the overall totals
// - Aggregation is free of rounding during accumulation

use chrono::{Duration, TimeZone, Utc};
use commission_analytics::aggregation::{Dimension, TransactionAggregator};
use commission_analytics::transactions::TransactionRecord;
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn record_strategy() -> impl Strategy<Value = TransactionRecord> {
    (
        0usize..4,
        0usize..3,
        0usize..3,
        0u64..1_000_000u64,
        0u32..=100u32,
        any::<bool>(),
        0i64..365,
    )
        .prop_map(|(actor, org, channel, cents, rate_pct, eligible, day)| {
            let actors = ["A", "B", "C", "D"];
            let orgs = ["Acme", "Globex", "Initech"];
            let channels = ["card", "wallet", "bank"];
            let start = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
            TransactionRecord::new(
                actors[actor],
                orgs[org],
                channels[channel],
                Decimal::from(cents) / Decimal::from(100),
                Decimal::from(rate_pct) / Decimal::from(100),
                start + Duration::days(day),
            )
            .with_eligibility(eligible)
        })
}

proptest! {
    #[test]
    fn test_group_counts_partition_eligible_records(
        records in prop::collection::vec(record_strategy(), 0..200)
    ) {
        let aggregator = TransactionAggregator::new();
        let eligible = records.iter().filter(|r| r.is_revenue_eligible).count() as u64;

        for dimension in [Dimension::Actor, Dimension::Organization, Dimension::PaymentChannel] {
            let groups = aggregator.by_dimension(&records, dimension).unwrap();
            let counted: u64 = groups.values().map(|g| g.transaction_count).sum();
            prop_assert_eq!(counted, eligible, "dimension {}", dimension);
        }
    }

    #[test]
    fn test_group_sums_match_overall_totals(
        records in prop::collection::vec(record_strategy(), 0..200)
    ) {
        let aggregator = TransactionAggregator::new();
        let overall = aggregator.totals(&records).unwrap();
        let groups = aggregator
            .by_dimensions(&records, &[Dimension::Actor, Dimension::Organization])
            .unwrap();

        let commission: Decimal = groups.values().map(|g| g.commission_total).sum();
        let revenue: Decimal = groups.values().map(|g| g.revenue_total).sum();

        prop_assert_eq!(commission, overall.commission_total);
        prop_assert_eq!(revenue, overall.revenue_total);
    }

    #[test]
    fn test_aggregation_is_deterministic(
        records in prop::collection::vec(record_strategy(), 0..100)
    ) {
        let aggregator = TransactionAggregator::new();
        prop_assert_eq!(
            aggregator.by_dimension(&records, Dimension::Actor).unwrap(),
            aggregator.by_dimension(&records, Dimension::Actor).unwrap()
        );
    }

    #[test]
    fn test_breakdown_is_sorted_descending(
        records in prop::collection::vec(record_strategy(), 0..200)
    ) {
        let rows = TransactionAggregator::new()
            .breakdown(&records, Dimension::Organization, None)
            .unwrap();
        for pair in rows.windows(2) {
            prop_assert!(pair[0].totals.commission_total >= pair[1].totals.commission_total);
        }
    }
}

#[test]
fn test_aggregate_by_actor_example() {
    let at = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
    let records = vec![
        TransactionRecord::new("A", "Acme", "card", dec!(1000), dec!(0.05), at),
        TransactionRecord::new("A", "Acme", "card", dec!(1500), dec!(0.05), at),
        TransactionRecord::new("B", "Acme", "card", dec!(2000), dec!(0.06), at),
    ];

    let groups = TransactionAggregator::new()
        .aggregate(&records, |r| r.actor_id.clone())
        .unwrap();

    assert_eq!(groups["A"].commission_total, dec!(125));
    assert_eq!(groups["A"].revenue_total, dec!(2500));
    assert_eq!(groups["A"].transaction_count, 2);
    assert_eq!(groups["B"].commission_total, dec!(120));
    assert_eq!(groups["B"].revenue_total, dec!(2000));
    assert_eq!(groups["B"].transaction_count, 1);
}

#[test]
fn test_custom_key_function_groups_by_status_and_month() {
    use chrono::Datelike;

    let records = vec![
        TransactionRecord::new("A", "Acme", "card", dec!(10), dec!(0.1), Utc.with_ymd_and_hms(2025, 1, 5, 0, 0, 0).unwrap()),
        TransactionRecord::new("A", "Acme", "card", dec!(20), dec!(0.1), Utc.with_ymd_and_hms(2025, 1, 25, 0, 0, 0).unwrap()),
        TransactionRecord::new("A", "Acme", "card", dec!(30), dec!(0.1), Utc.with_ymd_and_hms(2025, 2, 5, 0, 0, 0).unwrap()),
    ];

    let groups = TransactionAggregator::new()
        .aggregate(&records, |r| (r.actor_id.clone(), r.occurred_at.month()))
        .unwrap();

    assert_eq!(groups.len(), 2);
    assert_eq!(groups[&("A".to_string(), 1)].revenue_total, dec!(30));
    assert_eq!(groups[&("A".to_string(), 2)].revenue_total, dec!(30));
}
