use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::NaiveDate;
use serde_json::Value;

use crate::workflows::intake::domain::{
    ConsentBundle, EligibilityDisclosure, EmploymentStatus, EvaluationInput, FinancialDetails,
    HomeEquity, IncomeReport, LeadId, LeadSubmission, MaritalStatus, MonthlyIncomeRange,
    UnsecuredDebtRange,
};
use crate::workflows::intake::eligibility::thresholds::utah_table_2025;
use crate::workflows::intake::eligibility::{
    EligibilityEngine, StaticThresholdProvider, ThresholdTable,
};
use crate::workflows::intake::repository::{
    LeadRecord, LeadRepository, NotificationError, NotificationPublisher, RepositoryError,
    StaffNotification,
};
use crate::workflows::intake::{intake_router, LeadIntakeService};

pub(super) fn as_of() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 1).expect("valid date")
}

pub(super) fn table() -> ThresholdTable {
    utah_table_2025()
}

pub(super) fn provider() -> StaticThresholdProvider {
    StaticThresholdProvider::utah_2025()
}

pub(super) fn engine() -> EligibilityEngine<StaticThresholdProvider> {
    EligibilityEngine::new(provider())
}

/// Scenario baseline: single filer, $4,000/mo income, $3,800/mo expenses,
/// no home, modest vehicle equity, no valuable assets.
pub(super) fn evaluation_input() -> EvaluationInput {
    EvaluationInput {
        household_size: 1,
        income: IncomeReport::Monthly(4_000.0),
        monthly_expenses: 3_800.0,
        home_equity: HomeEquity::NoHome,
        vehicle_equity: 1_000.0,
        has_valuable_assets: false,
    }
}

pub(super) fn submission() -> LeadSubmission {
    LeadSubmission {
        state: "UT".to_string(),
        county: Some("Salt Lake".to_string()),
        household_size: 1,
        marital_status: MaritalStatus::Single,
        monthly_income_range: MonthlyIncomeRange::ThreeToFive,
        unsecured_debt_range: UnsecuredDebtRange::TenToTwentyFive,
        employment_status: EmploymentStatus::Employed,
        missed_payments: true,
        wage_garnishment: false,
        property_concerns: false,
        notes: Some("Collections calls started last month".to_string()),
        email: "prospect@example.com".to_string(),
        consents: ConsentBundle {
            privacy: true,
            terms: true,
            data_sharing: true,
        },
        financials: Some(FinancialDetails {
            income: IncomeReport::Monthly(4_000.0),
            monthly_expenses: 3_800.0,
            home_equity: HomeEquity::NoHome,
            vehicle_equity: 1_000.0,
            has_valuable_assets: false,
        }),
    }
}

pub(super) fn range_only_submission() -> LeadSubmission {
    let mut submission = submission();
    submission.financials = None;
    submission
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    pub(super) records: Arc<Mutex<HashMap<LeadId, LeadRecord>>>,
}

impl LeadRepository for MemoryRepository {
    fn insert(&self, record: LeadRecord) -> Result<LeadRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&record.profile.lead_id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.profile.lead_id.clone(), record.clone());
        Ok(record)
    }

    fn update(&self, record: LeadRecord) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        guard.insert(record.profile.lead_id.clone(), record);
        Ok(())
    }

    fn fetch(&self, id: &LeadId) -> Result<Option<LeadRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn awaiting_assessment(&self, limit: usize) -> Result<Vec<LeadRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard
            .values()
            .filter(|record| record.eligibility.is_none())
            .take(limit)
            .cloned()
            .collect())
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryNotifications {
    events: Arc<Mutex<Vec<StaffNotification>>>,
}

impl MemoryNotifications {
    pub(super) fn events(&self) -> Vec<StaffNotification> {
        self.events.lock().expect("notification mutex poisoned").clone()
    }
}

impl NotificationPublisher for MemoryNotifications {
    fn publish(&self, notification: StaffNotification) -> Result<(), NotificationError> {
        self.events
            .lock()
            .expect("notification mutex poisoned")
            .push(notification);
        Ok(())
    }
}

pub(super) struct UnavailableRepository;

impl LeadRepository for UnavailableRepository {
    fn insert(&self, _record: LeadRecord) -> Result<LeadRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn update(&self, _record: LeadRecord) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: &LeadId) -> Result<Option<LeadRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn awaiting_assessment(&self, _limit: usize) -> Result<Vec<LeadRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) type TestService =
    LeadIntakeService<MemoryRepository, MemoryNotifications, StaticThresholdProvider>;

pub(super) fn build_service() -> (TestService, Arc<MemoryRepository>, Arc<MemoryNotifications>) {
    build_service_with_disclosure(EligibilityDisclosure::Full)
}

pub(super) fn build_service_with_disclosure(
    disclosure: EligibilityDisclosure,
) -> (TestService, Arc<MemoryRepository>, Arc<MemoryNotifications>) {
    let repository = Arc::new(MemoryRepository::default());
    let notifier = Arc::new(MemoryNotifications::default());
    let service =
        LeadIntakeService::new(repository.clone(), notifier.clone(), provider(), disclosure);
    (service, repository, notifier)
}

pub(super) fn intake_router_with_service(service: TestService) -> axum::Router {
    intake_router(Arc::new(service))
}

pub(super) async fn read_json_body(response: axum::response::Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
