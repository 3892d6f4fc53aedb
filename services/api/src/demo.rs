use crate::infra::{InMemoryLeadRepository, InMemoryNotificationPublisher};
use chrono::{Local, NaiveDate};
use clap::Args;
use fresh_start::error::AppError;
use fresh_start::workflows::intake::{
    ConsentBundle, EligibilityDisclosure, EligibilityEngine, EmploymentStatus, EvaluationInput,
    FinancialDetails, HomeEquity, IncomeReport, LeadIntakeService, LeadRepository, LeadServiceError,
    LeadSubmission, MaritalStatus, MonthlyIncomeRange, StaticThresholdProvider, UnsecuredDebtRange,
};
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct EvaluateArgs {
    /// Number of people in the household
    #[arg(long, default_value_t = 1)]
    pub(crate) household_size: u8,
    /// Monthly gross income in dollars
    #[arg(long, required_unless_present = "above_median", conflicts_with = "above_median")]
    pub(crate) monthly_income: Option<f64>,
    /// Answer "is household income above the state median?" instead of a dollar figure
    #[arg(long, value_parser = clap::value_parser!(bool))]
    pub(crate) above_median: Option<bool>,
    /// Monthly necessary expenses in dollars
    #[arg(long)]
    pub(crate) monthly_expenses: f64,
    /// Home equity in dollars; omit when no home is owned
    #[arg(long)]
    pub(crate) home_equity: Option<f64>,
    /// Vehicle equity in dollars
    #[arg(long, default_value_t = 0.0)]
    pub(crate) vehicle_equity: f64,
    /// Household owns valuables worth more than the exemption floor
    #[arg(long)]
    pub(crate) valuable_assets: bool,
    /// Evaluation date (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) as_of: Option<NaiveDate>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Evaluation date (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) as_of: Option<NaiveDate>,
    /// Use the coarse-band questionnaire path instead of detailed financials
    #[arg(long)]
    pub(crate) range_only: bool,
    /// Submit the lead without running an assessment
    #[arg(long)]
    pub(crate) skip_assessment: bool,
}

pub(crate) fn run_evaluate(args: EvaluateArgs) -> Result<(), AppError> {
    let EvaluateArgs {
        household_size,
        monthly_income,
        above_median,
        monthly_expenses,
        home_equity,
        vehicle_equity,
        valuable_assets,
        as_of,
    } = args;

    let income = match (monthly_income, above_median) {
        (Some(amount), _) => IncomeReport::Monthly(amount),
        (None, answer) => IncomeReport::AboveMedian(answer.unwrap_or(false)),
    };
    let input = EvaluationInput {
        household_size,
        income,
        monthly_expenses,
        home_equity: home_equity.map_or(HomeEquity::NoHome, HomeEquity::Equity),
        vehicle_equity,
        has_valuable_assets: valuable_assets,
    };
    let as_of = as_of.unwrap_or_else(|| Local::now().date_naive());

    let engine = EligibilityEngine::utah();
    let result = engine
        .evaluate(&input, as_of)
        .map_err(LeadServiceError::from)?;

    match serde_json::to_string_pretty(&result) {
        Ok(json) => println!("{json}"),
        Err(err) => println!("Assessment payload unavailable: {err}"),
    }
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        as_of,
        range_only,
        skip_assessment,
    } = args;

    let as_of = as_of.unwrap_or_else(|| Local::now().date_naive());

    println!("Lead intake demo (sensitive fields redacted)");
    let repository = Arc::new(InMemoryLeadRepository::default());
    let notifier = Arc::new(InMemoryNotificationPublisher::default());
    let service = Arc::new(LeadIntakeService::new(
        repository.clone(),
        notifier.clone(),
        StaticThresholdProvider::utah_2025(),
        EligibilityDisclosure::Full,
    ));

    let record = match service.submit(demo_submission(range_only)) {
        Ok(record) => record,
        Err(err) => {
            println!("  Submission rejected: {err}");
            return Ok(());
        }
    };
    let public_view = record.status_view(service.disclosure());
    println!(
        "- Received lead {} -> status {}",
        public_view.lead_id.0, public_view.status
    );
    println!("  Summary: {}", public_view.summary);

    if skip_assessment {
        return Ok(());
    }

    let result = match service.evaluate(&record.profile.lead_id, as_of) {
        Ok(result) => result,
        Err(err) => {
            println!("  Assessment unavailable: {err}");
            return Ok(());
        }
    };
    println!(
        "  Assessment: Chapter {} recommended, {} confidence (evaluated {})",
        result.recommended_chapter.label(),
        result.tier.label(),
        as_of
    );
    for reason in &result.reasons {
        println!("    - {reason}");
    }

    let stored_view = match repository.fetch(&record.profile.lead_id) {
        Ok(Some(record)) => record.status_view(service.disclosure()),
        Ok(None) => {
            println!("  Repository lookup returned no record");
            return Ok(());
        }
        Err(err) => {
            println!("  Repository unavailable: {err}");
            return Ok(());
        }
    };
    match serde_json::to_string_pretty(&stored_view) {
        Ok(json) => println!("  Public status payload:\n{json}"),
        Err(err) => println!("  Public status payload unavailable: {err}"),
    }

    let events = notifier.events();
    if events.is_empty() {
        println!("  Staff notifications: none dispatched");
    } else {
        println!("  Staff notifications:");
        for event in events {
            println!("    - template={} -> {}", event.template, event.lead_id.0);
        }
    }

    Ok(())
}

fn demo_submission(range_only: bool) -> LeadSubmission {
    let financials = (!range_only).then_some(FinancialDetails {
        income: IncomeReport::Monthly(4_100.0),
        monthly_expenses: 3_850.0,
        home_equity: HomeEquity::Equity(38_000.0),
        vehicle_equity: 2_400.0,
        has_valuable_assets: false,
    });

    LeadSubmission {
        state: "UT".to_string(),
        county: Some("Utah".to_string()),
        household_size: 2,
        marital_status: MaritalStatus::Married,
        monthly_income_range: MonthlyIncomeRange::ThreeToFive,
        unsecured_debt_range: UnsecuredDebtRange::TwentyFiveToFifty,
        employment_status: EmploymentStatus::Employed,
        missed_payments: true,
        wage_garnishment: false,
        property_concerns: false,
        notes: Some("Medical bills went to collections this spring".to_string()),
        email: "demo-prospect@example.com".to_string(),
        consents: ConsentBundle {
            privacy: true,
            terms: true,
            data_sharing: true,
        },
        financials,
    }
}
