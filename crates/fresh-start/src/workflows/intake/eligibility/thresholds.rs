use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Versioned, jurisdiction-scoped constants backing the means test, budget
/// test, and exemption checks. Immutable once published; refreshes publish a
/// new table rather than mutating one in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThresholdTable {
    /// Display name used in prospect-facing reason strings (e.g. "Utah").
    pub jurisdiction: String,
    pub effective_from: NaiveDate,
    pub effective_to: NaiveDate,
    /// Annual median income indexed by household size, starting at 1.
    /// Always non-empty.
    pub median_income_by_size: Vec<f64>,
    /// Added per person beyond the largest tabulated household size.
    pub additional_person_income: f64,
    /// Disposable income above this fraction of income fails the budget test.
    pub disposable_income_ratio: f64,
    pub homestead_exemption_single: f64,
    pub homestead_exemption_joint: f64,
    pub vehicle_exemption_single: f64,
    pub vehicle_exemption_joint: f64,
    /// Dollar floor behind the "valuable assets" questionnaire flag.
    pub valuable_asset_floor: f64,
}

impl ThresholdTable {
    /// Annual median income cap for a household size. Sizes beyond the table
    /// extrapolate linearly; the arithmetic is exact, no rounding. A table
    /// with no tabulated medians yields a zero cap (every income fails the
    /// strict comparison) instead of panicking.
    pub fn median_income_cap(&self, household_size: u8) -> f64 {
        let max_tabulated = self.median_income_by_size.len() as u8;
        if max_tabulated == 0 {
            return 0.0;
        }
        let clamped = household_size.clamp(1, max_tabulated);
        let base = self.median_income_by_size[clamped as usize - 1];
        let additional_people = household_size.saturating_sub(max_tabulated);
        base + f64::from(additional_people) * self.additional_person_income
    }

    /// Joint exemptions apply to any household larger than one filer.
    pub fn homestead_exemption(&self, household_size: u8) -> f64 {
        if household_size > 1 {
            self.homestead_exemption_joint
        } else {
            self.homestead_exemption_single
        }
    }

    pub fn vehicle_exemption(&self, household_size: u8) -> f64 {
        if household_size > 1 {
            self.vehicle_exemption_joint
        } else {
            self.vehicle_exemption_single
        }
    }

    pub fn is_stale(&self, as_of: NaiveDate, grace_days: i64) -> bool {
        as_of > self.effective_to + Duration::days(grace_days)
    }
}

/// No table is published at all; a deployment problem, surfaced as 5xx.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ThresholdError {
    #[error("no threshold tables are published for {jurisdiction}")]
    NoTables { jurisdiction: String },
}

/// A resolved table plus a staleness flag callers must surface in logs.
#[derive(Debug, Clone, PartialEq)]
pub struct ThresholdResolution {
    pub table: ThresholdTable,
    pub is_stale: bool,
}

/// Read-only source of threshold tables, resolved by date outside the engine
/// so evaluations stay testable against historical or future versions.
pub trait ThresholdProvider: Send + Sync {
    fn resolve(&self, as_of: NaiveDate) -> Result<ThresholdResolution, ThresholdError>;
}

/// Provider over a fixed set of published tables.
#[derive(Debug, Clone)]
pub struct StaticThresholdProvider {
    jurisdiction: String,
    tables: Vec<ThresholdTable>,
    grace_days: i64,
}

impl StaticThresholdProvider {
    pub fn new(jurisdiction: impl Into<String>, mut tables: Vec<ThresholdTable>) -> Self {
        tables.sort_by_key(|table| table.effective_from);
        Self {
            jurisdiction: jurisdiction.into(),
            tables,
            grace_days: 0,
        }
    }

    /// Utah means-test medians and exemptions as published for 2025.
    pub fn utah_2025() -> Self {
        Self::new("UT", vec![utah_table_2025()])
    }
}

impl ThresholdProvider for StaticThresholdProvider {
    /// Never fails hard while any table exists: resolution picks the newest
    /// table effective on or before `as_of`, falling back to the earliest
    /// published one, and flags staleness instead of erroring.
    fn resolve(&self, as_of: NaiveDate) -> Result<ThresholdResolution, ThresholdError> {
        let table = self
            .tables
            .iter()
            .rev()
            .find(|table| table.effective_from <= as_of)
            .or_else(|| self.tables.first())
            .ok_or_else(|| ThresholdError::NoTables {
                jurisdiction: self.jurisdiction.clone(),
            })?;

        let is_stale = table.is_stale(as_of, self.grace_days);
        if is_stale {
            warn!(
                jurisdiction = %self.jurisdiction,
                effective_to = %table.effective_to,
                %as_of,
                "threshold table is past its effective window; proceeding with last known values"
            );
        }

        Ok(ThresholdResolution {
            table: table.clone(),
            is_stale,
        })
    }
}

pub fn utah_table_2025() -> ThresholdTable {
    ThresholdTable {
        jurisdiction: "Utah".to_string(),
        effective_from: NaiveDate::from_ymd_opt(2025, 1, 1).expect("valid date"),
        effective_to: NaiveDate::from_ymd_opt(2025, 12, 31).expect("valid date"),
        median_income_by_size: vec![
            85_644.0, 93_302.0, 109_860.0, 128_363.0, 139_463.0, 150_563.0, 161_663.0, 172_763.0,
        ],
        additional_person_income: 11_100.0,
        disposable_income_ratio: 0.05,
        homestead_exemption_single: 52_350.0,
        homestead_exemption_joint: 104_700.0,
        vehicle_exemption_single: 3_000.0,
        vehicle_exemption_joint: 6_000.0,
        valuable_asset_floor: 500.0,
    }
}
