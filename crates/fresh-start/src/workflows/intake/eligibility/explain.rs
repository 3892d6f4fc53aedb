use super::classifiers::ClassifierOutcome;
use super::recommend::Tier;

/// Static legal text appended to every result. Kept as data so legal review
/// never touches the evaluation logic; never derived from user input.
pub const DISCLAIMERS: [&str; 4] = [
    "This is a preliminary, informational assessment only and does not constitute legal advice.",
    "Final determination of bankruptcy eligibility requires consultation with a licensed attorney.",
    "Individual circumstances, assets, and debts must be reviewed in detail.",
    "Bankruptcy laws and means test criteria are subject to change.",
];

/// One reason per classifier, always income, budget, asset in that order,
/// present even when every test passes.
pub(crate) fn reasons(
    income: &ClassifierOutcome,
    budget: &ClassifierOutcome,
    asset: &ClassifierOutcome,
) -> Vec<String> {
    vec![
        income.reason.clone(),
        budget.reason.clone(),
        asset.reason.clone(),
    ]
}

pub(crate) fn summary(tier: Tier) -> String {
    format!(
        "Based on the information provided, your preliminary eligibility for Chapter 7 is {}.",
        tier.label()
    )
}

pub(crate) fn disclaimers() -> Vec<String> {
    DISCLAIMERS.iter().map(|text| text.to_string()).collect()
}
