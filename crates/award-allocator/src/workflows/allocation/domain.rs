use serde::{Deserialize, Serialize};
use std::fmt;

/// Need category used both for priority blending and reserve-pass eligibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NeedTier {
    High,
    Medium,
    Low,
}

impl NeedTier {
    /// Declared order for reserve passes and report sections.
    pub const fn ordered() -> [Self; 3] {
        [Self::High, Self::Medium, Self::Low]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }

    /// Base value blended into the priority score.
    pub const fn base_weight(self) -> f64 {
        match self {
            Self::High => 1.0,
            Self::Medium => 0.5,
            Self::Low => 0.0,
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "high" => Some(Self::High),
            "medium" => Some(Self::Medium),
            "low" => Some(Self::Low),
            _ => None,
        }
    }
}

impl fmt::Display for NeedTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stable identifier supplied by the intake source.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApplicantId(pub String);

impl fmt::Display for ApplicantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One applicant competing for a share of the budget.
///
/// Raw fields come from intake. `score_norm`, `priority`, eligibility, and `awarded` are derived
/// by the pipeline stages in order and are read-only once allocation finishes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Applicant {
    pub id: ApplicantId,
    pub name: Option<String>,
    /// Need level exactly as supplied (lower-cased), kept for reporting invalid values.
    pub need_level: String,
    pub need_tier: Option<NeedTier>,
    pub score_raw: f64,
    pub score_norm: f64,
    pub requested: f64,
    pub priority: f64,
    pub awarded: f64,
    pub eligible: bool,
    pub eligibility_reason: Option<String>,
}

impl Applicant {
    pub fn new(
        id: impl Into<String>,
        name: Option<String>,
        need_level: impl Into<String>,
        score_raw: f64,
        requested: f64,
    ) -> Self {
        let need_level = need_level.into().trim().to_ascii_lowercase();
        let need_tier = NeedTier::parse(&need_level);
        Self {
            id: ApplicantId(id.into()),
            name: name.filter(|value| !value.trim().is_empty()),
            need_level,
            need_tier,
            score_raw,
            score_norm: 0.0,
            requested,
            priority: 0.0,
            awarded: 0.0,
            eligible: true,
            eligibility_reason: None,
        }
    }

    /// Record a failed check, appending to any earlier reasons.
    pub fn mark_ineligible(&mut self, reason: &str) {
        self.eligible = false;
        self.eligibility_reason = Some(match self.eligibility_reason.take() {
            Some(existing) => format!("{existing}; {reason}"),
            None => reason.to_string(),
        });
    }

    pub fn is_funded(&self) -> bool {
        self.awarded > 0.0
    }

    pub fn is_fully_funded(&self) -> bool {
        self.is_funded() && self.awarded >= self.requested
    }

    /// Owned copy with the funding outcome cleared; scores, priority, and eligibility are kept.
    pub fn unfunded_copy(&self) -> Self {
        Self {
            awarded: 0.0,
            ..self.clone()
        }
    }
}
