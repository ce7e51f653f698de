use crate::workflows::allocation::domain::NeedTier;
use std::env;

/// Distinguishes runtime behavior for different stages of a deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Process-level settings sourced from the environment (and `.env` when present).
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
        if log_level.trim().is_empty() {
            return Err(ConfigError::EmptyLogLevel);
        }

        Ok(Self {
            environment,
            telemetry: TelemetryConfig { log_level },
        })
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Per-award floor, ceiling, rounding, and percent-of-request cap.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AwardLimits {
    pub min_award: f64,
    pub max_award: f64,
    /// Rounding increment; zero disables rounding.
    pub round_to: f64,
    /// Fraction of the request that may be awarded, in `(0, 1]`.
    pub max_percent: f64,
}

impl Default for AwardLimits {
    fn default() -> Self {
        Self {
            min_award: 500.0,
            max_award: 5000.0,
            round_to: 0.0,
            max_percent: 1.0,
        }
    }
}

/// Relative weights for score and need in the priority blend.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriorityWeights {
    pub score: f64,
    pub need: f64,
}

impl Default for PriorityWeights {
    fn default() -> Self {
        Self {
            score: 0.7,
            need: 0.3,
        }
    }
}

/// Fraction of the total budget ring-fenced for each need tier.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ReserveShares {
    pub high: f64,
    pub medium: f64,
    pub low: f64,
}

impl ReserveShares {
    pub fn share(&self, tier: NeedTier) -> f64 {
        match tier {
            NeedTier::High => self.high,
            NeedTier::Medium => self.medium,
            NeedTier::Low => self.low,
        }
    }

    pub fn total(&self) -> f64 {
        self.high + self.medium + self.low
    }
}

/// Scalar inputs for one allocation run.
#[derive(Debug, Clone, PartialEq)]
pub struct AllocationConfig {
    pub budget: f64,
    pub limits: AwardLimits,
    pub weights: PriorityWeights,
    pub reserves: ReserveShares,
    /// Minimum raw score to stay eligible; zero disables the check.
    pub min_score: f64,
    pub scenario_budgets: Vec<f64>,
}

impl AllocationConfig {
    /// Defaults for everything except the budget.
    pub fn with_budget(budget: f64) -> Self {
        Self {
            budget,
            limits: AwardLimits::default(),
            weights: PriorityWeights::default(),
            reserves: ReserveShares::default(),
            min_score: 0.0,
            scenario_budgets: Vec::new(),
        }
    }

    /// Reject the first invalid value. Nothing is allocated until this passes.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.budget.is_finite() || self.budget <= 0.0 {
            return Err(invalid("budget must be greater than 0"));
        }

        let limits = &self.limits;
        if !limits.min_award.is_finite()
            || !limits.max_award.is_finite()
            || limits.min_award < 0.0
            || limits.max_award <= 0.0
            || limits.max_award < limits.min_award
        {
            return Err(invalid("invalid min/max award values"));
        }

        let weights = &self.weights;
        if !weights.score.is_finite()
            || !weights.need.is_finite()
            || weights.score < 0.0
            || weights.need < 0.0
        {
            return Err(invalid("weights must be non-negative"));
        }

        for tier in NeedTier::ordered() {
            let share = self.reserves.share(tier);
            if !(0.0..=1.0).contains(&share) {
                return Err(ConfigError::Invalid(format!(
                    "reserve-{} must be between 0 and 1",
                    tier.as_str()
                )));
            }
        }
        if self.reserves.total() > 1.0 + SHARE_TOLERANCE {
            return Err(invalid("reserve shares must sum to 1 or less"));
        }

        if !limits.round_to.is_finite() || limits.round_to < 0.0 {
            return Err(invalid("round must be >= 0"));
        }
        if !(limits.max_percent > 0.0 && limits.max_percent <= 1.0) {
            return Err(invalid("max-percent must be between 0 (exclusive) and 1"));
        }
        if !self.min_score.is_finite() || self.min_score < 0.0 {
            return Err(invalid("min-score must be >= 0"));
        }
        if weights.score + weights.need == 0.0 {
            return Err(invalid("score-weight and need-weight cannot both be zero"));
        }
        if self
            .scenario_budgets
            .iter()
            .any(|budget| !budget.is_finite() || *budget <= 0.0)
        {
            return Err(invalid("scenario budgets must be > 0"));
        }

        Ok(())
    }
}

// Absorbs binary representation noise such as 0.7 + 0.2 + 0.1.
const SHARE_TOLERANCE: f64 = 1e-9;

fn invalid(message: &str) -> ConfigError {
    ConfigError::Invalid(message.to_string())
}

/// Parse a comma-separated list of scenario budgets. Blank entries are skipped.
pub fn parse_budget_list(raw: &str) -> Result<Vec<f64>, ConfigError> {
    let mut budgets = Vec::new();
    for part in raw.split(',') {
        let value = part.trim();
        if value.is_empty() {
            continue;
        }
        let parsed: f64 = value
            .parse()
            .map_err(|_| ConfigError::InvalidScenarioBudget(value.to_string()))?;
        if !parsed.is_finite() || parsed <= 0.0 {
            return Err(invalid("scenario budgets must be > 0"));
        }
        budgets.push(parsed);
    }
    Ok(budgets)
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0}")]
    Invalid(String),
    #[error("invalid scenario budget: {0}")]
    InvalidScenarioBudget(String),
    #[error("APP_LOG_LEVEL must not be empty")]
    EmptyLogLevel,
}
