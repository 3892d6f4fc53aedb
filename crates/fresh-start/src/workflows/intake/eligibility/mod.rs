//! Preliminary Chapter 7/13 eligibility engine.
//!
//! A pure, synchronous computation: validated input plus an immutable
//! threshold table snapshot in, an immutable result out. The only external
//! lookup is which table is current, supplied by a [`ThresholdProvider`].

pub(crate) mod classifiers;
mod explain;
pub(crate) mod recommend;
pub mod thresholds;

pub use classifiers::{EvaluationFlags, EvaluationMetrics};
pub use explain::DISCLAIMERS;
pub use recommend::{Chapter, Tier};
pub use thresholds::{
    StaticThresholdProvider, ThresholdError, ThresholdProvider, ThresholdResolution,
    ThresholdTable,
};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::domain::EvaluationInput;
use super::validation::{validate_evaluation_input, ValidationError};
use thresholds::utah_table_2025;

/// Engine output, created fresh per evaluation and stored verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResult {
    pub tier: Tier,
    pub recommended_chapter: Chapter,
    pub summary: String,
    /// Exactly three entries, fixed order: income, budget, asset.
    pub reasons: Vec<String>,
    pub flags: EvaluationFlags,
    pub metrics: EvaluationMetrics,
    pub disclaimers: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EligibilityError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Thresholds(#[from] ThresholdError),
}

/// Stateless evaluator over an injected threshold source.
pub struct EligibilityEngine<P> {
    provider: P,
}

impl EligibilityEngine<StaticThresholdProvider> {
    /// Engine over the published Utah tables.
    pub fn utah() -> Self {
        Self::new(StaticThresholdProvider::utah_2025())
    }
}

impl<P: ThresholdProvider> EligibilityEngine<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    /// Run the full three-part test. Validation and threshold resolution
    /// happen before any classifier; there are no partial results. A
    /// low-confidence outcome is a successful evaluation, not an error.
    pub fn evaluate(
        &self,
        input: &EvaluationInput,
        as_of: NaiveDate,
    ) -> Result<EvaluationResult, EligibilityError> {
        validate_evaluation_input(input)?;
        let resolution = self.provider.resolve(as_of)?;
        Ok(evaluate_with_table(
            input,
            &resolution.table,
            resolution.is_stale,
        ))
    }
}

/// Classify against an already-resolved table. Deterministic: identical
/// input and table produce an identical result. Callers are responsible for
/// validating `input` first.
pub fn evaluate_with_table(
    input: &EvaluationInput,
    table: &ThresholdTable,
    thresholds_stale: bool,
) -> EvaluationResult {
    debug!(
        household_size = input.household_size,
        jurisdiction = %table.jurisdiction,
        "running eligibility classifiers"
    );

    let monthly_income_estimate =
        classifiers::normalized_monthly_income(&input.income, input.monthly_expenses);
    let annualized_income = monthly_income_estimate * 12.0;
    let median_income_cap = table.median_income_cap(input.household_size);

    let income = classifiers::classify_income(
        &input.income,
        annualized_income,
        median_income_cap,
        &table.jurisdiction,
    );
    let (budget, disposable_income, budget_threshold) = classifiers::classify_budget(
        monthly_income_estimate,
        input.monthly_expenses,
        table.disposable_income_ratio,
    );
    let (asset, homestead_exemption, vehicle_exemption) =
        classifiers::classify_assets(input, table);

    let recommendation = recommend::recommend(income.pass, budget.pass, asset.pass);

    let result = EvaluationResult {
        tier: recommendation.tier,
        recommended_chapter: recommendation.chapter,
        summary: explain::summary(recommendation.tier),
        reasons: explain::reasons(&income, &budget, &asset),
        flags: EvaluationFlags {
            income_pass: income.pass,
            budget_pass: budget.pass,
            asset_risk: !asset.pass,
        },
        metrics: EvaluationMetrics {
            monthly_income_estimate,
            annualized_income,
            median_income_cap,
            disposable_income,
            budget_threshold,
            homestead_exemption,
            vehicle_exemption,
            valuable_asset_floor: table.valuable_asset_floor,
            thresholds_stale,
        },
        disclaimers: explain::disclaimers(),
    };

    info!(
        tier = result.tier.label(),
        chapter = result.recommended_chapter.label(),
        stale = thresholds_stale,
        "eligibility evaluation completed"
    );

    result
}

/// The 2025 Utah table, exported for demos and historical comparisons.
pub fn utah_thresholds_2025() -> ThresholdTable {
    utah_table_2025()
}
