//! End-to-end flow from raw upstream payloads to analytics output
//!
//! Raw JSON → Validator → summaries, tiered commission, time series and
//! drill-down, all over the same accepted snapshot.

#[path = "../helpers/mod.rs"]
mod helpers;

use commission_analytics::commissions::{CommissionRuleEngine, CommissionSummaryBuilder};
use commission_analytics::config::{AnalyticsConfig, CommissionTierConfig};
use commission_analytics::drilldown::DrillDownNavigator;
use commission_analytics::timeseries::{Granularity, TimeSeriesBucketer};
use commission_analytics::transactions::Validator;
use commission_analytics::{AppError, DateRange};
use helpers::TransactionFactory;
use rust_decimal_macros::dec;
use serde_json::Value;

fn upstream_batch() -> Vec<Value> {
    let mut invalid = TransactionFactory::payload("A", "Acme", dec!(100), dec!(0.05), "2025-04-02T08:00:00Z");
    invalid["appliedCommissionPercentage"] = serde_json::json!("1.5");

    vec![
        TransactionFactory::payload("A", "Acme", dec!(1000), dec!(0.05), "2025-04-01T09:30:00Z"),
        TransactionFactory::payload("A", "Globex", dec!(2000), dec!(0.05), "2025-04-15T14:00:00Z"),
        TransactionFactory::payload("B", "Acme", dec!(4000), dec!(0.06), "2025-04-15T23:59:59+00:00"),
        TransactionFactory::payload("C", "Globex", dec!(500), dec!(0.05), "2025-02-10T10:00:00Z"),
        invalid,
    ]
}

#[test]
fn test_ingest_then_summarize() {
    let outcome = Validator::new().ingest(upstream_batch()).unwrap();

    assert_eq!(outcome.accepted.len(), 4);
    assert_eq!(outcome.rejected.len(), 1);
    assert_eq!(outcome.rejected[0].index, 4);

    let april = DateRange::month(2025, 4).unwrap();
    let builder = CommissionSummaryBuilder::default();

    let comparison = builder.compare_actors(&outcome.accepted, Some(&april)).unwrap();
    assert_eq!(comparison.rankings[0].summary.actor_id, "B");
    assert_eq!(comparison.rankings[0].summary.total_commission, dec!(240));
    assert_eq!(comparison.rankings[1].summary.total_commission, dec!(150));

    let inactive = builder.find_inactive(&outcome.accepted, Some(&april));
    assert_eq!(inactive.len(), 1);
    assert_eq!(inactive[0].actor_id, "C");
}

#[test]
fn test_ingest_json_document() {
    let document = serde_json::to_string(&upstream_batch()).unwrap();

    let outcome = Validator::new().ingest_json(&document).unwrap();

    assert_eq!(outcome.accepted.len(), 4);
    assert!(outcome.rejected[0]
        .report
        .errors
        .iter()
        .any(|e| e.contains("appliedCommissionPercentage")));
}

#[test]
fn test_tiers_from_configuration_recompute_commission() {
    let tiers = CommissionTierConfig::from_json(
        r#"[
            {"minAmount": "0", "maxAmount": "1000", "rate": "0.05"},
            {"minAmount": "1000", "maxAmount": "5000", "rate": "0.06"},
            {"minAmount": "5000", "maxAmount": null, "rate": "0.07"}
        ]"#,
    )
    .unwrap();
    let engine: CommissionRuleEngine = tiers.engine().unwrap().unwrap();
    let outcome = Validator::new().ingest(upstream_batch()).unwrap();

    let recomputed: Vec<_> = outcome
        .accepted
        .iter()
        .map(|r| engine.commission_for(r.gross_amount))
        .collect();

    assert_eq!(recomputed, vec![dec!(60), dec!(120), dec!(240), dec!(25)]);
}

#[test]
fn test_series_and_drilldown_over_ingested_snapshot() {
    let outcome = Validator::new().ingest(upstream_batch()).unwrap();
    let config = AnalyticsConfig::default();

    let monthly = TimeSeriesBucketer::new(&config)
        .bucket(&outcome.accepted, Granularity::Month)
        .unwrap();
    let months: Vec<String> = monthly.iter().map(|p| p.period.to_string()).collect();
    assert_eq!(months, vec!["2025-02", "2025-04"]);
    assert_eq!(monthly[1].revenue, dec!(7000));
    assert_eq!(monthly[1].growth_rate, dec!(1300));

    let mut nav = DrillDownNavigator::new(outcome.accepted, &config);
    nav.select_organization("Acme").unwrap();
    nav.select_date(chrono::NaiveDate::from_ymd_opt(2025, 4, 15).unwrap())
        .unwrap();

    let details = nav.detail_records();
    assert_eq!(details.len(), 1);
    assert_eq!(details[0].actor_id, "B");
}

#[test]
fn test_sums_beyond_decimal_range_are_reported() {
    let half = rust_decimal::Decimal::MAX / dec!(2) + dec!(1);
    let batch = vec![
        TransactionFactory::payload("A", "Acme", half, dec!(0), "2025-04-01T09:30:00Z"),
        TransactionFactory::payload("A", "Acme", half, dec!(0), "2025-04-02T09:30:00Z"),
    ];

    let outcome = Validator::new().ingest(batch).unwrap();
    assert_eq!(outcome.accepted.len(), 2);

    let builder = CommissionSummaryBuilder::default();
    assert!(matches!(
        builder.compare_actors(&outcome.accepted, None),
        Err(AppError::InputShape(_))
    ));
    assert!(matches!(
        builder.summarize_actor(&outcome.accepted, "A", None),
        Err(AppError::InputShape(_))
    ));
    assert!(TimeSeriesBucketer::default()
        .bucket(&outcome.accepted, Granularity::Month)
        .is_err());
}
