use super::domain::{
    EvaluationInput, HardshipSignals, HomeEquity, IncomeReport, LeadId, LeadProfile,
    LeadSubmission,
};

/// Largest household size the questionnaire accepts. Larger households are
/// extrapolated by the threshold tables, but the form caps the answer.
pub const MAX_HOUSEHOLD_SIZE: u8 = 20;

const SUPPORTED_STATE: &str = "UT";

/// Estimated share of total unsecured debt paid monthly, used when only a
/// debt range is known.
const DEBT_SERVICE_RATE: f64 = 0.03;

/// Assumed share of income spent on non-debt living expenses when the
/// prospect skipped the detailed financial step.
const BASELINE_EXPENSE_SHARE: f64 = 0.5;

/// Malformed or out-of-range input; the caller's fault, surfaced as 4xx.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("household size must be at least 1")]
    HouseholdSizeZero,
    #[error("household size {0} exceeds the supported maximum of {MAX_HOUSEHOLD_SIZE}")]
    HouseholdSizeTooLarge(u8),
    #[error("{field} must be non-negative, got {value}")]
    NegativeAmount { field: &'static str, value: f64 },
    #[error("{field} must be a finite number")]
    NonFiniteAmount { field: &'static str },
    #[error("assessments are only offered in Utah, got state '{0}'")]
    UnsupportedState(String),
    #[error("consent to the {0} policy is required")]
    MissingConsent(&'static str),
    #[error("a valid contact email is required")]
    InvalidEmail,
}

/// Fail-fast checks on the facts the engine consumes. Nothing is clamped;
/// any out-of-range value rejects the whole evaluation.
pub fn validate_evaluation_input(input: &EvaluationInput) -> Result<(), ValidationError> {
    if input.household_size == 0 {
        return Err(ValidationError::HouseholdSizeZero);
    }
    if input.household_size > MAX_HOUSEHOLD_SIZE {
        return Err(ValidationError::HouseholdSizeTooLarge(input.household_size));
    }

    if let IncomeReport::Monthly(amount) = input.income {
        check_amount("monthly income", amount)?;
    }
    check_amount("monthly expenses", input.monthly_expenses)?;
    if let HomeEquity::Equity(amount) = input.home_equity {
        check_amount("home equity", amount)?;
    }
    check_amount("vehicle equity", input.vehicle_equity)?;

    Ok(())
}

fn check_amount(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NonFiniteAmount { field });
    }
    if value < 0.0 {
        return Err(ValidationError::NegativeAmount { field, value });
    }
    Ok(())
}

/// Converts raw questionnaire submissions into sanitized lead profiles.
#[derive(Debug, Clone, Default)]
pub struct IntakeValidator;

impl IntakeValidator {
    pub fn profile_from_submission(
        &self,
        submission: LeadSubmission,
    ) -> Result<LeadProfile, ValidationError> {
        let state = normalize_state(&submission.state)?;

        if !submission.consents.privacy {
            return Err(ValidationError::MissingConsent("privacy"));
        }
        if !submission.consents.terms {
            return Err(ValidationError::MissingConsent("terms"));
        }
        if !submission.consents.data_sharing {
            return Err(ValidationError::MissingConsent("data sharing"));
        }

        if !looks_like_email(&submission.email) {
            return Err(ValidationError::InvalidEmail);
        }

        let evaluation_input = match submission.financials {
            Some(details) => EvaluationInput {
                household_size: submission.household_size,
                income: details.income,
                monthly_expenses: details.monthly_expenses,
                home_equity: details.home_equity,
                vehicle_equity: details.vehicle_equity,
                has_valuable_assets: details.has_valuable_assets,
            },
            None => derive_input_from_ranges(&submission),
        };

        validate_evaluation_input(&evaluation_input)?;

        Ok(LeadProfile {
            lead_id: LeadId("pending".to_string()),
            state,
            county: submission.county,
            marital_status: submission.marital_status,
            employment_status: submission.employment_status,
            monthly_income_range: submission.monthly_income_range,
            unsecured_debt_range: submission.unsecured_debt_range,
            hardship: HardshipSignals {
                missed_payments: submission.missed_payments,
                wage_garnishment: submission.wage_garnishment,
                property_concerns: submission.property_concerns,
            },
            email: submission.email,
            notes: submission.notes,
            evaluation_input,
        })
    }
}

/// When the prospect skips the detailed financial step, estimate figures
/// from the coarse ranges: income from the band midpoint, expenses from a
/// baseline living share plus estimated debt service. Asset questions have
/// no range analog, so only the property-concerns flag carries over.
fn derive_input_from_ranges(submission: &LeadSubmission) -> EvaluationInput {
    let monthly_income = submission.monthly_income_range.midpoint();
    let debt_service = submission.unsecured_debt_range.midpoint() * DEBT_SERVICE_RATE;
    let monthly_expenses = monthly_income * BASELINE_EXPENSE_SHARE + debt_service;

    EvaluationInput {
        household_size: submission.household_size,
        income: IncomeReport::Monthly(monthly_income),
        monthly_expenses,
        home_equity: HomeEquity::NoHome,
        vehicle_equity: 0.0,
        has_valuable_assets: submission.property_concerns,
    }
}

fn normalize_state(raw: &str) -> Result<String, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.eq_ignore_ascii_case(SUPPORTED_STATE) || trimmed.eq_ignore_ascii_case("utah") {
        Ok(SUPPORTED_STATE.to_string())
    } else {
        Err(ValidationError::UnsupportedState(trimmed.to_string()))
    }
}

fn looks_like_email(value: &str) -> bool {
    match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && domain.contains('.') && !domain.starts_with('.')
        }
        None => false,
    }
}
