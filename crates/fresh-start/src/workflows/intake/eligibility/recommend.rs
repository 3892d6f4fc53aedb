use serde::{Deserialize, Serialize};

/// Three-level confidence classification for Chapter 7 eligibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Tier {
    Low,
    Medium,
    High,
}

impl Tier {
    pub const fn label(self) -> &'static str {
        match self {
            Tier::Low => "Low",
            Tier::Medium => "Medium",
            Tier::High => "High",
        }
    }
}

/// Recommended bankruptcy chapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Chapter {
    #[serde(rename = "7")]
    Seven,
    #[serde(rename = "13")]
    Thirteen,
}

impl Chapter {
    pub const fn label(self) -> &'static str {
        match self {
            Chapter::Seven => "7",
            Chapter::Thirteen => "13",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Recommendation {
    pub(crate) tier: Tier,
    pub(crate) chapter: Chapter,
}

/// Combine the three classifier verdicts into a tier and chapter.
///
/// Deterministic and total over all eight combinations, spelled out so every
/// case is visible and testable. Three passes recommend Chapter 7 with high
/// confidence; with exactly one failure the income test is the tie-break
/// (an income fail pushes toward Chapter 13's repayment plan); two or more
/// failures land in the lowest tier with Chapter 13.
pub(crate) fn recommend(
    income_pass: bool,
    budget_pass: bool,
    assets_clear: bool,
) -> Recommendation {
    let (tier, chapter) = match (income_pass, budget_pass, assets_clear) {
        (true, true, true) => (Tier::High, Chapter::Seven),
        (true, true, false) => (Tier::Medium, Chapter::Seven),
        (true, false, true) => (Tier::Medium, Chapter::Seven),
        (false, true, true) => (Tier::Medium, Chapter::Thirteen),
        (true, false, false) => (Tier::Low, Chapter::Thirteen),
        (false, true, false) => (Tier::Low, Chapter::Thirteen),
        (false, false, true) => (Tier::Low, Chapter::Thirteen),
        (false, false, false) => (Tier::Low, Chapter::Thirteen),
    };

    Recommendation { tier, chapter }
}
