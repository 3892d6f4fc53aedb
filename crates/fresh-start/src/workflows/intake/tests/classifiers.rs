use super::common::*;
use crate::workflows::intake::domain::{EvaluationInput, HomeEquity, IncomeReport};
use crate::workflows::intake::eligibility::{evaluate_with_table, Chapter, Tier};

fn evaluate(input: &EvaluationInput) -> crate::workflows::intake::EvaluationResult {
    evaluate_with_table(input, &table(), false)
}

#[test]
fn single_filer_with_thin_margin_lands_medium_chapter_seven() {
    // Example scenario: $200 disposable income against a $200 threshold.
    let input = evaluation_input();
    let result = evaluate(&input);

    assert!(result.flags.income_pass);
    assert!(!result.flags.budget_pass, "200 < 200 must not pass");
    assert!(!result.flags.asset_risk);
    assert_eq!(result.tier, Tier::Medium);
    assert_eq!(result.recommended_chapter, Chapter::Seven);

    assert_eq!(result.metrics.annualized_income, 48_000.0);
    assert_eq!(result.metrics.median_income_cap, 85_644.0);
    assert_eq!(result.metrics.disposable_income, 200.0);
    assert_eq!(result.metrics.budget_threshold, 200.0);
    assert_eq!(result.metrics.valuable_asset_floor, 500.0);
}

#[test]
fn high_income_family_with_exposed_assets_lands_low_chapter_thirteen() {
    let input = EvaluationInput {
        household_size: 4,
        income: IncomeReport::Monthly(12_000.0),
        monthly_expenses: 6_000.0,
        home_equity: HomeEquity::Equity(150_000.0),
        vehicle_equity: 2_000.0,
        has_valuable_assets: false,
    };
    let result = evaluate(&input);

    assert!(!result.flags.income_pass, "annual $144k exceeds the size-4 cap");
    assert!(!result.flags.budget_pass);
    assert!(result.flags.asset_risk, "home equity exceeds the joint homestead cap");
    assert_eq!(result.tier, Tier::Low);
    assert_eq!(result.recommended_chapter, Chapter::Thirteen);
}

#[test]
fn distressed_couple_passes_all_three_tests() {
    let input = EvaluationInput {
        household_size: 2,
        income: IncomeReport::Monthly(3_000.0),
        monthly_expenses: 2_900.0,
        home_equity: HomeEquity::NoHome,
        vehicle_equity: 500.0,
        has_valuable_assets: false,
    };
    let result = evaluate(&input);

    assert!(result.flags.income_pass);
    assert!(result.flags.budget_pass);
    assert!(!result.flags.asset_risk);
    assert_eq!(result.tier, Tier::High);
    assert_eq!(result.recommended_chapter, Chapter::Seven);
}

#[test]
fn income_exactly_at_the_median_cap_fails_the_means_test() {
    // 85,644 / 12 is exactly 7,137; the comparison is strict.
    let mut input = evaluation_input();
    input.income = IncomeReport::Monthly(7_137.0);
    let result = evaluate(&input);

    assert_eq!(result.metrics.annualized_income, 85_644.0);
    assert!(!result.flags.income_pass);

    input.income = IncomeReport::Monthly(7_136.0);
    let just_under = evaluate(&input);
    assert!(just_under.flags.income_pass);
}

#[test]
fn above_median_answer_decides_the_means_test_directly() {
    let mut input = evaluation_input();
    input.income = IncomeReport::AboveMedian(true);
    let above = evaluate(&input);
    assert!(!above.flags.income_pass);
    // Conservative high-earner proxy: 1.5x expenses.
    assert_eq!(above.metrics.monthly_income_estimate, 3_800.0 * 1.5);

    input.income = IncomeReport::AboveMedian(false);
    let below = evaluate(&input);
    assert!(below.flags.income_pass);
    assert_eq!(below.metrics.monthly_income_estimate, 3_800.0 * 1.1);
}

#[test]
fn zero_income_and_zero_expenses_fails_the_budget_test_without_panicking() {
    let input = EvaluationInput {
        household_size: 1,
        income: IncomeReport::Monthly(0.0),
        monthly_expenses: 0.0,
        home_equity: HomeEquity::NoHome,
        vehicle_equity: 0.0,
        has_valuable_assets: false,
    };
    let result = evaluate(&input);

    assert!(!result.flags.budget_pass, "0 < 0 must not pass");
    assert_eq!(result.metrics.disposable_income, 0.0);
    assert_eq!(result.metrics.budget_threshold, 0.0);
    assert!(result.metrics.monthly_income_estimate.is_finite());
}

#[test]
fn expenses_exceeding_income_always_pass_the_budget_test() {
    let mut input = evaluation_input();
    input.income = IncomeReport::Monthly(2_000.0);
    input.monthly_expenses = 2_500.0;
    let result = evaluate(&input);

    assert!(result.flags.budget_pass);
    assert_eq!(result.metrics.disposable_income, -500.0);
}

#[test]
fn home_equity_exactly_at_the_exemption_cap_is_protected() {
    let mut input = evaluation_input();
    input.home_equity = HomeEquity::Equity(52_350.0);
    assert!(!evaluate(&input).flags.asset_risk);

    input.home_equity = HomeEquity::Equity(52_350.01);
    assert!(evaluate(&input).flags.asset_risk);
}

#[test]
fn joint_exemption_caps_apply_from_household_size_two() {
    let mut input = evaluation_input();
    input.home_equity = HomeEquity::Equity(80_000.0);

    // Over the single cap at size 1, under the joint cap at size 2.
    input.household_size = 1;
    assert!(evaluate(&input).flags.asset_risk);

    input.household_size = 2;
    let joint = evaluate(&input);
    assert!(!joint.flags.asset_risk);
    assert_eq!(joint.metrics.homestead_exemption, 104_700.0);
}

#[test]
fn vehicle_equity_above_the_cap_flags_asset_risk() {
    let mut input = evaluation_input();
    input.vehicle_equity = 3_000.0;
    assert!(!evaluate(&input).flags.asset_risk);

    input.vehicle_equity = 3_000.01;
    assert!(evaluate(&input).flags.asset_risk);
}

#[test]
fn valuable_assets_flag_alone_creates_asset_risk() {
    let mut input = evaluation_input();
    input.has_valuable_assets = true;
    let result = evaluate(&input);

    assert!(result.flags.asset_risk);
    assert_eq!(result.tier, Tier::Medium);
    assert_eq!(result.recommended_chapter, Chapter::Seven);
}

#[test]
fn no_home_is_always_protected_regardless_of_caps() {
    let mut input = evaluation_input();
    input.home_equity = HomeEquity::NoHome;
    input.household_size = 1;
    assert!(!evaluate(&input).flags.asset_risk);
}
