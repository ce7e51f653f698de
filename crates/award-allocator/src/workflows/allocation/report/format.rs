use crate::workflows::allocation::NeedTier;

pub fn currency(value: f64) -> String {
    format!("${value:.2}")
}

/// Ratio rendered as a one-decimal percentage.
pub fn percent(ratio: f64) -> String {
    format!("{:.1}%", ratio * 100.0)
}

pub fn signed_percent(ratio: f64) -> String {
    format!("{:+.1}%", ratio * 100.0)
}

/// Display form of a stored need level; unknown levels are shown as entered.
pub fn need_title(need_level: &str) -> String {
    match NeedTier::parse(need_level) {
        Some(tier) => tier.label().to_string(),
        None => need_level.to_string(),
    }
}
