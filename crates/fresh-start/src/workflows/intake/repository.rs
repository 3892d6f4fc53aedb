use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::domain::{EligibilityDisclosure, LeadId, LeadProfile, LeadStatus};
use super::eligibility::{Chapter, EvaluationResult, Tier};

/// Repository record containing the lead, its status, and any assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeadRecord {
    pub profile: LeadProfile,
    pub status: LeadStatus,
    pub eligibility: Option<EvaluationResult>,
}

impl LeadRecord {
    pub fn outcome_summary(&self) -> String {
        match &self.eligibility {
            Some(result) => result.summary.clone(),
            None => "pending assessment".to_string(),
        }
    }

    /// Sanitized view for API responses. Tier and chapter are withheld
    /// unless the deployment discloses assessments to prospects.
    pub fn status_view(&self, disclosure: EligibilityDisclosure) -> LeadStatusView {
        let disclosed = match disclosure {
            EligibilityDisclosure::Full => self.eligibility.as_ref(),
            EligibilityDisclosure::Withheld => None,
        };

        LeadStatusView {
            lead_id: self.profile.lead_id.clone(),
            status: self.status.label(),
            summary: match disclosure {
                EligibilityDisclosure::Full => self.outcome_summary(),
                EligibilityDisclosure::Withheld => match self.status {
                    LeadStatus::Received => "pending assessment".to_string(),
                    LeadStatus::Assessed => {
                        "assessment complete; our team will follow up by email".to_string()
                    }
                },
            },
            tier: disclosed.map(|result| result.tier),
            recommended_chapter: disclosed.map(|result| result.recommended_chapter),
        }
    }
}

/// Storage abstraction so the service module can be exercised in isolation.
pub trait LeadRepository: Send + Sync {
    fn insert(&self, record: LeadRecord) -> Result<LeadRecord, RepositoryError>;
    fn update(&self, record: LeadRecord) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &LeadId) -> Result<Option<LeadRecord>, RepositoryError>;
    fn awaiting_assessment(&self, limit: usize) -> Result<Vec<LeadRecord>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Trait describing outbound notification hooks (staff and prospect email
/// adapters). Template rendering and delivery live outside this crate.
pub trait NotificationPublisher: Send + Sync {
    fn publish(&self, notification: StaffNotification) -> Result<(), NotificationError>;
}

/// Notification payload so routes/tests can assert integration boundaries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffNotification {
    pub template: String,
    pub lead_id: LeadId,
    pub details: BTreeMap<String, String>,
}

/// Notification dispatch error.
#[derive(Debug, thiserror::Error)]
pub enum NotificationError {
    #[error("notification transport unavailable: {0}")]
    Transport(String),
}

/// Sanitized representation of a lead's exposed status.
#[derive(Debug, Clone, Serialize)]
pub struct LeadStatusView {
    pub lead_id: LeadId,
    pub status: &'static str,
    pub summary: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tier: Option<Tier>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommended_chapter: Option<Chapter>,
}
