use serde::{Deserialize, Serialize};

/// Identifier wrapper for stored leads.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LeadId(pub String);

/// Self-reported marital status collected by the questionnaire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MaritalStatus {
    Single,
    Married,
    Separated,
}

/// Employment situation at the time of intake.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EmploymentStatus {
    Employed,
    #[serde(rename = "Self-employed")]
    SelfEmployed,
    Unemployed,
    Retired,
}

/// Coarse monthly income bands presented to the prospect. Each band maps to a
/// midpoint estimate used when no detailed financials are supplied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MonthlyIncomeRange {
    #[serde(rename = "<$3k")]
    UnderThree,
    #[serde(rename = "$3-5k")]
    ThreeToFive,
    #[serde(rename = "$5-8k")]
    FiveToEight,
    #[serde(rename = "$8k+")]
    OverEight,
}

impl MonthlyIncomeRange {
    pub fn midpoint(self) -> f64 {
        match self {
            MonthlyIncomeRange::UnderThree => 2_000.0,
            MonthlyIncomeRange::ThreeToFive => 4_000.0,
            MonthlyIncomeRange::FiveToEight => 6_500.0,
            MonthlyIncomeRange::OverEight => 10_000.0,
        }
    }
}

/// Coarse unsecured-debt bands, likewise mapped to midpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnsecuredDebtRange {
    #[serde(rename = "<$10k")]
    UnderTen,
    #[serde(rename = "$10-25k")]
    TenToTwentyFive,
    #[serde(rename = "$25-50k")]
    TwentyFiveToFifty,
    #[serde(rename = "$50k+")]
    OverFifty,
}

impl UnsecuredDebtRange {
    pub fn midpoint(self) -> f64 {
        match self {
            UnsecuredDebtRange::UnderTen => 5_000.0,
            UnsecuredDebtRange::TenToTwentyFive => 17_500.0,
            UnsecuredDebtRange::TwentyFiveToFifty => 37_500.0,
            UnsecuredDebtRange::OverFifty => 75_000.0,
        }
    }
}

/// Consent checkboxes that must all be granted before a lead is stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsentBundle {
    pub privacy: bool,
    pub terms: bool,
    pub data_sharing: bool,
}

/// Hardship signals collected during intake; informational, never scored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HardshipSignals {
    pub missed_payments: bool,
    pub wage_garnishment: bool,
    pub property_concerns: bool,
}

/// Income as reported by the prospect or derived from bank data.
///
/// Two questionnaire generations exist: one asks for a monthly dollar
/// estimate, the other only asks whether household income sits above the
/// state median. Both are accepted and normalized inside the engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IncomeReport {
    /// Monthly dollar estimate (range midpoint or bank-derived average).
    Monthly(f64),
    /// Answer to "is your household income above the state median?".
    AboveMedian(bool),
}

/// Home equity, or a sentinel meaning no home is owned.
///
/// Serialized as a bare number or the string `"NA"` to match the intake form.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HomeEquity {
    NoHome,
    Equity(f64),
}

impl HomeEquity {
    pub fn is_protected(self, homestead_exemption: f64) -> bool {
        match self {
            HomeEquity::NoHome => true,
            HomeEquity::Equity(value) => value <= homestead_exemption,
        }
    }
}

impl Serialize for HomeEquity {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            HomeEquity::NoHome => serializer.serialize_str("NA"),
            HomeEquity::Equity(value) => serializer.serialize_f64(*value),
        }
    }
}

impl<'de> Deserialize<'de> for HomeEquity {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Amount(f64),
            Sentinel(String),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Amount(value) => Ok(HomeEquity::Equity(value)),
            Repr::Sentinel(text) if text.eq_ignore_ascii_case("na") => Ok(HomeEquity::NoHome),
            Repr::Sentinel(other) => Err(serde::de::Error::custom(format!(
                "home equity must be a number or \"NA\", got '{other}'"
            ))),
        }
    }
}

/// Detailed financial figures from the final questionnaire step (or from the
/// bank-data connection). Optional; coarse ranges stand in when absent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FinancialDetails {
    pub income: IncomeReport,
    pub monthly_expenses: f64,
    pub home_equity: HomeEquity,
    pub vehicle_equity: f64,
    pub has_valuable_assets: bool,
}

/// Validated facts the eligibility engine consumes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EvaluationInput {
    pub household_size: u8,
    pub income: IncomeReport,
    pub monthly_expenses: f64,
    pub home_equity: HomeEquity,
    pub vehicle_equity: f64,
    pub has_valuable_assets: bool,
}

/// Raw questionnaire payload as posted by the intake pages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeadSubmission {
    pub state: String,
    #[serde(default)]
    pub county: Option<String>,
    pub household_size: u8,
    pub marital_status: MaritalStatus,
    pub monthly_income_range: MonthlyIncomeRange,
    pub unsecured_debt_range: UnsecuredDebtRange,
    pub employment_status: EmploymentStatus,
    pub missed_payments: bool,
    pub wage_garnishment: bool,
    pub property_concerns: bool,
    #[serde(default)]
    pub notes: Option<String>,
    pub email: String,
    pub consents: ConsentBundle,
    #[serde(default)]
    pub financials: Option<FinancialDetails>,
}

/// The sanitized, validated lead stored by the repository.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeadProfile {
    pub lead_id: LeadId,
    pub state: String,
    pub county: Option<String>,
    pub marital_status: MaritalStatus,
    pub employment_status: EmploymentStatus,
    pub monthly_income_range: MonthlyIncomeRange,
    pub unsecured_debt_range: UnsecuredDebtRange,
    pub hardship: HardshipSignals,
    pub email: String,
    pub notes: Option<String>,
    pub evaluation_input: EvaluationInput,
}

/// High level status tracked throughout the lead workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LeadStatus {
    Received,
    Assessed,
}

impl LeadStatus {
    pub const fn label(self) -> &'static str {
        match self {
            LeadStatus::Received => "received",
            LeadStatus::Assessed => "assessed",
        }
    }
}

/// Whether assessment details are returned to the prospect or withheld for
/// staff follow-up only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EligibilityDisclosure {
    Full,
    Withheld,
}
