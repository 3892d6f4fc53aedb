use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::NaiveDate;

use super::domain::{
    EligibilityDisclosure, EvaluationInput, LeadId, LeadStatus, LeadSubmission,
};
use super::eligibility::{
    EligibilityEngine, EligibilityError, EvaluationResult, ThresholdProvider,
};
use super::repository::{
    LeadRecord, LeadRepository, NotificationError, NotificationPublisher, RepositoryError,
    StaffNotification,
};
use super::validation::{IntakeValidator, ValidationError};

/// Service composing the intake validator, repository, notification hooks,
/// and the eligibility engine.
pub struct LeadIntakeService<R, N, P> {
    validator: IntakeValidator,
    repository: Arc<R>,
    notifier: Arc<N>,
    engine: EligibilityEngine<P>,
    disclosure: EligibilityDisclosure,
}

static LEAD_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_lead_id() -> LeadId {
    let id = LEAD_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    LeadId(format!("lead-{id:06}"))
}

impl<R, N, P> LeadIntakeService<R, N, P>
where
    R: LeadRepository + 'static,
    N: NotificationPublisher + 'static,
    P: ThresholdProvider + 'static,
{
    pub fn new(
        repository: Arc<R>,
        notifier: Arc<N>,
        provider: P,
        disclosure: EligibilityDisclosure,
    ) -> Self {
        Self {
            validator: IntakeValidator,
            repository,
            notifier,
            engine: EligibilityEngine::new(provider),
            disclosure,
        }
    }

    pub fn disclosure(&self) -> EligibilityDisclosure {
        self.disclosure
    }

    /// Store a new lead and alert staff, returning the repository-backed
    /// record. Validation rejects the submission before anything persists.
    pub fn submit(&self, submission: LeadSubmission) -> Result<LeadRecord, LeadServiceError> {
        let mut profile = self.validator.profile_from_submission(submission)?;
        profile.lead_id = next_lead_id();

        let record = LeadRecord {
            profile,
            status: LeadStatus::Received,
            eligibility: None,
        };

        let stored = self.repository.insert(record)?;

        let mut details = BTreeMap::new();
        details.insert("email".to_string(), stored.profile.email.clone());
        details.insert("state".to_string(), stored.profile.state.clone());
        self.notifier.publish(StaffNotification {
            template: "new_lead".to_string(),
            lead_id: stored.profile.lead_id.clone(),
            details,
        })?;

        Ok(stored)
    }

    /// Assess a stored lead as of the given date and persist the result.
    pub fn evaluate(
        &self,
        lead_id: &LeadId,
        as_of: NaiveDate,
    ) -> Result<EvaluationResult, LeadServiceError> {
        let mut record = self
            .repository
            .fetch(lead_id)?
            .ok_or(RepositoryError::NotFound)?;

        let result = self
            .engine
            .evaluate(&record.profile.evaluation_input, as_of)?;

        record.status = LeadStatus::Assessed;
        record.eligibility = Some(result.clone());
        self.repository.update(record)?;

        let mut details = BTreeMap::new();
        details.insert("tier".to_string(), result.tier.label().to_string());
        details.insert(
            "chapter".to_string(),
            result.recommended_chapter.label().to_string(),
        );
        self.notifier.publish(StaffNotification {
            template: "eligibility_summary".to_string(),
            lead_id: lead_id.clone(),
            details,
        })?;

        Ok(result)
    }

    /// One-shot assessment with no stored lead; used by the stateless
    /// evaluation endpoint and the CLI.
    pub fn assess(
        &self,
        input: &EvaluationInput,
        as_of: NaiveDate,
    ) -> Result<EvaluationResult, LeadServiceError> {
        Ok(self.engine.evaluate(input, as_of)?)
    }

    /// Fetch a lead and current status for API responses.
    pub fn get(&self, lead_id: &LeadId) -> Result<LeadRecord, LeadServiceError> {
        let record = self
            .repository
            .fetch(lead_id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(record)
    }
}

/// Error raised by the lead intake service.
#[derive(Debug, thiserror::Error)]
pub enum LeadServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Eligibility(#[from] EligibilityError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Notification(#[from] NotificationError),
}
