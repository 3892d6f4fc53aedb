use serde::{Deserialize, Serialize};

use super::thresholds::ThresholdTable;
use crate::workflows::intake::domain::{EvaluationInput, IncomeReport};

/// Multiplier applied to expenses when estimating income from an
/// above-median answer (conservative high-earner assumption).
const ABOVE_MEDIAN_INCOME_FACTOR: f64 = 1.5;
/// Multiplier for the below-median answer (income barely covers expenses).
const BELOW_MEDIAN_INCOME_FACTOR: f64 = 1.1;

/// Verdict of a single classifier plus its display reason. Created fresh per
/// evaluation and never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifierOutcome {
    pub pass: bool,
    pub reason: String,
}

/// The three boolean outcomes, using the questionnaire's native polarity:
/// `asset_risk` is the negation of the asset classifier's pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationFlags {
    pub income_pass: bool,
    pub budget_pass: bool,
    pub asset_risk: bool,
}

/// Numeric intermediates retained for auditability. Reason strings carry no
/// dollar figures; anything redacted there can be recomposed from here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationMetrics {
    pub monthly_income_estimate: f64,
    pub annualized_income: f64,
    pub median_income_cap: f64,
    /// Income minus expenses; negative when expenses exceed income.
    pub disposable_income: f64,
    pub budget_threshold: f64,
    pub homestead_exemption: f64,
    pub vehicle_exemption: f64,
    /// Dollar floor behind the "valuable assets" questionnaire flag.
    pub valuable_asset_floor: f64,
    pub thresholds_stale: bool,
}

/// Normalize either income representation to a monthly dollar estimate.
/// The threshold-question form only supports a rough proxy derived from
/// expenses, which is all the budget test needs.
pub(crate) fn normalized_monthly_income(income: &IncomeReport, monthly_expenses: f64) -> f64 {
    match income {
        IncomeReport::Monthly(amount) => *amount,
        IncomeReport::AboveMedian(true) => monthly_expenses * ABOVE_MEDIAN_INCOME_FACTOR,
        IncomeReport::AboveMedian(false) => monthly_expenses * BELOW_MEDIAN_INCOME_FACTOR,
    }
}

/// Means test. With a dollar estimate the comparison is strict: annual
/// income exactly at the median cap fails. With the threshold-question form
/// the answer itself decides, since the prospect already compared against
/// the published median.
pub(crate) fn classify_income(
    income: &IncomeReport,
    annualized_income: f64,
    median_income_cap: f64,
    jurisdiction: &str,
) -> ClassifierOutcome {
    let pass = match income {
        IncomeReport::Monthly(_) => annualized_income < median_income_cap,
        IncomeReport::AboveMedian(above) => !above,
    };

    let reason = if pass {
        format!("Income below the {jurisdiction} median for your household size")
    } else {
        format!("Income exceeds the {jurisdiction} median for your household size")
    };

    ClassifierOutcome { pass, reason }
}

/// Disposable-income test: excess below the configured fraction of income
/// passes. Negative excess (expenses exceed income) always passes; the
/// zero-income, zero-expense case fails because `0 < 0` does not hold.
pub(crate) fn classify_budget(
    monthly_income_estimate: f64,
    monthly_expenses: f64,
    disposable_income_ratio: f64,
) -> (ClassifierOutcome, f64, f64) {
    let excess = monthly_income_estimate - monthly_expenses;
    let threshold = monthly_income_estimate * disposable_income_ratio;
    let pass = excess < threshold;

    let reason = if pass {
        "Limited disposable income after necessary expenses".to_string()
    } else {
        "Disposable income above the repayment threshold".to_string()
    };

    (ClassifierOutcome { pass, reason }, excess, threshold)
}

/// Exemption check. Equity exactly at a cap is protected; the classifier
/// passes only when every asset category is protected.
pub(crate) fn classify_assets(
    input: &EvaluationInput,
    table: &ThresholdTable,
) -> (ClassifierOutcome, f64, f64) {
    let homestead_exemption = table.homestead_exemption(input.household_size);
    let vehicle_exemption = table.vehicle_exemption(input.household_size);

    let home_protected = input.home_equity.is_protected(homestead_exemption);
    let vehicle_protected = input.vehicle_equity <= vehicle_exemption;
    let asset_risk = !home_protected || !vehicle_protected || input.has_valuable_assets;

    let reason = if asset_risk {
        "Potential non-exempt asset risk".to_string()
    } else {
        "All key assets appear protected by exemptions".to_string()
    };

    (
        ClassifierOutcome {
            pass: !asset_risk,
            reason,
        },
        homestead_exemption,
        vehicle_exemption,
    )
}
