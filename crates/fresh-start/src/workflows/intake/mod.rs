//! Lead intake, preliminary eligibility assessment, and notification routing
//! for the bankruptcy questionnaire.

pub mod domain;
pub mod eligibility;
pub mod repository;
pub mod router;
pub mod service;
pub(crate) mod validation;

#[cfg(test)]
mod tests;

pub use domain::{
    ConsentBundle, EligibilityDisclosure, EmploymentStatus, EvaluationInput, FinancialDetails,
    HardshipSignals, HomeEquity, IncomeReport, LeadId, LeadProfile, LeadStatus, LeadSubmission,
    MaritalStatus, MonthlyIncomeRange, UnsecuredDebtRange,
};
pub use eligibility::{
    evaluate_with_table, utah_thresholds_2025, Chapter, EligibilityEngine, EligibilityError,
    EvaluationFlags, EvaluationMetrics, EvaluationResult, StaticThresholdProvider, ThresholdError,
    ThresholdProvider, ThresholdResolution, ThresholdTable, Tier, DISCLAIMERS,
};
pub use repository::{
    LeadRecord, LeadRepository, LeadStatusView, NotificationError, NotificationPublisher,
    RepositoryError, StaffNotification,
};
pub use router::intake_router;
pub use service::{LeadIntakeService, LeadServiceError};
pub use validation::{validate_evaluation_input, ValidationError, MAX_HOUSEHOLD_SIZE};
