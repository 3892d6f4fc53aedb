use super::common::*;
use crate::workflows::intake::domain::IncomeReport;
use crate::workflows::intake::eligibility::{Chapter, EligibilityError, Tier, DISCLAIMERS};
use crate::workflows::intake::ValidationError;
use chrono::NaiveDate;

#[test]
fn all_eight_flag_combinations_map_to_the_documented_tiers() {
    use crate::workflows::intake::eligibility::recommend::recommend;

    // (income, budget, assets_clear) -> (tier, chapter)
    let expectations = [
        ((true, true, true), (Tier::High, Chapter::Seven)),
        ((true, true, false), (Tier::Medium, Chapter::Seven)),
        ((true, false, true), (Tier::Medium, Chapter::Seven)),
        ((false, true, true), (Tier::Medium, Chapter::Thirteen)),
        ((true, false, false), (Tier::Low, Chapter::Thirteen)),
        ((false, true, false), (Tier::Low, Chapter::Thirteen)),
        ((false, false, true), (Tier::Low, Chapter::Thirteen)),
        ((false, false, false), (Tier::Low, Chapter::Thirteen)),
    ];

    for ((income, budget, assets), (tier, chapter)) in expectations {
        let recommendation = recommend(income, budget, assets);
        assert_eq!(
            recommendation.tier, tier,
            "tier for ({income}, {budget}, {assets})"
        );
        assert_eq!(
            recommendation.chapter, chapter,
            "chapter for ({income}, {budget}, {assets})"
        );
    }
}

#[test]
fn reasons_always_contain_three_entries_in_fixed_order() {
    // All-pass case still reports every classifier.
    let mut input = evaluation_input();
    input.monthly_expenses = 3_900.0;
    let result = engine().evaluate(&input, as_of()).expect("evaluates");

    assert_eq!(result.reasons.len(), 3);
    assert!(result.reasons[0].contains("median"), "income reason first");
    assert!(
        result.reasons[1].to_lowercase().contains("disposable income"),
        "budget reason second"
    );
    assert!(result.reasons[2].to_lowercase().contains("asset"), "asset reason third");
}

#[test]
fn summary_interpolates_the_tier_label() {
    let result = engine()
        .evaluate(&evaluation_input(), as_of())
        .expect("evaluates");
    assert!(result.summary.contains("Chapter 7"));
    assert!(result.summary.contains(result.tier.label()));
}

#[test]
fn disclaimers_come_verbatim_from_static_legal_text() {
    let result = engine()
        .evaluate(&evaluation_input(), as_of())
        .expect("evaluates");
    assert_eq!(result.disclaimers.len(), DISCLAIMERS.len());
    for (rendered, fixed) in result.disclaimers.iter().zip(DISCLAIMERS) {
        assert_eq!(rendered, fixed);
    }
}

#[test]
fn evaluation_is_deterministic_for_identical_input_and_date() {
    let input = evaluation_input();
    let first = engine().evaluate(&input, as_of()).expect("evaluates");
    let second = engine().evaluate(&input, as_of()).expect("evaluates");

    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).expect("serializes"),
        serde_json::to_string(&second).expect("serializes"),
    );
}

#[test]
fn stale_thresholds_still_produce_a_complete_result() {
    let past_window = NaiveDate::from_ymd_opt(2026, 3, 1).expect("valid date");
    let result = engine()
        .evaluate(&evaluation_input(), past_window)
        .expect("stale tables evaluate");

    assert!(result.metrics.thresholds_stale);
    assert_eq!(result.reasons.len(), 3);
    assert_eq!(result.tier, Tier::Medium);
}

#[test]
fn invalid_household_size_is_rejected_before_classification() {
    let mut input = evaluation_input();
    input.household_size = 0;

    match engine().evaluate(&input, as_of()) {
        Err(EligibilityError::Validation(ValidationError::HouseholdSizeZero)) => {}
        other => panic!("expected validation failure, got {other:?}"),
    }
}

#[test]
fn negative_expenses_are_rejected_not_clamped() {
    let mut input = evaluation_input();
    input.monthly_expenses = -10.0;

    match engine().evaluate(&input, as_of()) {
        Err(EligibilityError::Validation(ValidationError::NegativeAmount { field, .. })) => {
            assert_eq!(field, "monthly expenses");
        }
        other => panic!("expected validation failure, got {other:?}"),
    }
}

#[test]
fn non_finite_income_is_rejected() {
    let mut input = evaluation_input();
    input.income = IncomeReport::Monthly(f64::NAN);

    match engine().evaluate(&input, as_of()) {
        Err(EligibilityError::Validation(ValidationError::NonFiniteAmount { field })) => {
            assert_eq!(field, "monthly income");
        }
        other => panic!("expected validation failure, got {other:?}"),
    }
}
