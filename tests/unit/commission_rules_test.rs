// Property-based tests for tiered commission rules
//
// - Every amount inside a validated table resolves to exactly one tier
// - Boundary amounts resolve to the next tier, except at the top of the table
// - Evaluation does not depend on the order the tiers are given in

use commission_analytics::commissions::{CommissionRule, CommissionRuleEngine};
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Build a contiguous table from tier widths and rates (basis points)
fn contiguous_table(widths: &[u32], rates_bp: &[u32], unbounded_top: bool) -> Vec<CommissionRule> {
    let mut rules = Vec::new();
    let mut min = Decimal::ZERO;
    for (i, (width, rate_bp)) in widths.iter().zip(rates_bp).enumerate() {
        let max = min + Decimal::from(*width);
        let rate = Decimal::from(*rate_bp) / Decimal::from(10_000);
        if unbounded_top && i == widths.len() - 1 {
            rules.push(CommissionRule::unbounded(min, rate));
        } else {
            rules.push(CommissionRule::new(min, max, rate));
        }
        min = max;
    }
    rules
}

fn table_strategy() -> impl Strategy<Value = (Vec<u32>, Vec<u32>)> {
    (1usize..6).prop_flat_map(|n| {
        (
            prop::collection::vec(1u32..10_000, n),
            prop::collection::vec(0u32..=10_000, n),
        )
    })
}

proptest! {
    #[test]
    fn test_generated_tables_are_valid(
        (widths, rates) in table_strategy(),
        unbounded_top in any::<bool>()
    ) {
        let rules = contiguous_table(&widths, &rates, unbounded_top);
        let report = CommissionRuleEngine::validate_rule_set(&rules);
        prop_assert!(report.is_valid, "unexpected errors: {:?}", report.errors);
    }

    #[test]
    fn test_every_amount_in_range_matches_exactly_one_tier(
        (widths, rates) in table_strategy(),
        cents in 0u64..100_000_000u64
    ) {
        let rules = contiguous_table(&widths, &rates, false);
        let top = rules.last().and_then(|r| r.max_amount).unwrap();
        let amount = (Decimal::from(cents) / Decimal::from(100)).min(top);

        let last = rules.len() - 1;
        let matches: Vec<&CommissionRule> = rules
            .iter()
            .enumerate()
            .filter(|(i, r)| r.contains(amount, *i == last))
            .map(|(_, r)| r)
            .collect();

        prop_assert_eq!(matches.len(), 1, "amount {} matched {} tiers", amount, matches.len());
        prop_assert_eq!(CommissionRuleEngine::apply_rules(amount, &rules), matches[0].rate);
    }

    #[test]
    fn test_apply_rules_is_deterministic(
        (widths, rates) in table_strategy(),
        amount in 0u32..60_000u32
    ) {
        let rules = contiguous_table(&widths, &rates, true);
        let amount = Decimal::from(amount);
        prop_assert_eq!(
            CommissionRuleEngine::apply_rules(amount, &rules),
            CommissionRuleEngine::apply_rules(amount, &rules)
        );
    }

    #[test]
    fn test_tier_order_does_not_matter(
        (widths, rates) in table_strategy(),
        amount in 0u32..60_000u32
    ) {
        let rules = contiguous_table(&widths, &rates, true);
        let mut reversed = rules.clone();
        reversed.reverse();
        let amount = Decimal::from(amount);

        prop_assert_eq!(
            CommissionRuleEngine::apply_rules(amount, &rules),
            CommissionRuleEngine::apply_rules(amount, &reversed)
        );
    }

    #[test]
    fn test_boundaries_resolve_to_next_tier_except_top(
        (widths, rates) in table_strategy()
    ) {
        let rules = contiguous_table(&widths, &rates, false);
        let last = rules.len() - 1;

        for (i, rule) in rules.iter().enumerate() {
            let boundary = rule.max_amount.unwrap();
            let expected = if i == last { rule.rate } else { rules[i + 1].rate };
            prop_assert_eq!(CommissionRuleEngine::apply_rules(boundary, &rules), expected);
        }
    }

    #[test]
    fn test_commission_never_exceeds_amount(
        (widths, rates) in table_strategy(),
        amount in 0u32..60_000u32
    ) {
        let rules = contiguous_table(&widths, &rates, true);
        let amount = Decimal::from(amount);
        let commission = CommissionRuleEngine::calculate_commission(amount, &rules);

        prop_assert!(commission >= Decimal::ZERO);
        prop_assert!(commission <= amount);
    }
}

#[test]
fn test_standard_three_tier_table() {
    let rules = vec![
        CommissionRule::new(dec!(0), dec!(1000), dec!(0.05)),
        CommissionRule::new(dec!(1000), dec!(5000), dec!(0.06)),
        CommissionRule::unbounded(dec!(5000), dec!(0.07)),
    ];

    assert_eq!(CommissionRuleEngine::apply_rules(dec!(500), &rules), dec!(0.05));
    assert_eq!(CommissionRuleEngine::apply_rules(dec!(1000), &rules), dec!(0.06));
    assert_eq!(CommissionRuleEngine::apply_rules(dec!(7500), &rules), dec!(0.07));
}

#[test]
fn test_violations_are_reported_together() {
    let rules = vec![
        CommissionRule::new(dec!(0), dec!(1000), dec!(0.05)),
        CommissionRule::new(dec!(1200), dec!(5000), dec!(1.2)),
        CommissionRule::new(dec!(4000), dec!(9000), dec!(0.07)),
    ];

    let report = CommissionRuleEngine::validate_rule_set(&rules);

    assert!(!report.is_valid);
    assert_eq!(report.errors.len(), 3, "errors: {:?}", report.errors);
    assert!(report.errors.iter().any(|e| e.contains("Gap between 1000 and 1200")));
    assert!(report.errors.iter().any(|e| e.contains("Overlap")));
    assert!(report.errors.iter().any(|e| e.contains("rate 1.2")));
}
