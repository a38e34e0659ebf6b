//! Risk banding shared by the checker and the history list.

use inline_colorization::*;

/// Scores at or above this count as risky; below it as safe.
pub const RISKY_THRESHOLD: f64 = 0.4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiskBand {
    VeryLow,
    Low,
    Medium,
    High,
    VeryHigh,
}

impl RiskBand {
    pub fn from_score(score: f64) -> Self {
        if score >= 0.8 {
            RiskBand::VeryHigh
        } else if score >= 0.6 {
            RiskBand::High
        } else if score >= RISKY_THRESHOLD {
            RiskBand::Medium
        } else if score >= 0.2 {
            RiskBand::Low
        } else {
            RiskBand::VeryLow
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RiskBand::VeryHigh => "Very high",
            RiskBand::High => "High",
            RiskBand::Medium => "Medium",
            RiskBand::Low => "Low",
            RiskBand::VeryLow => "Very low",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            RiskBand::VeryHigh => color_red,
            RiskBand::High => color_bright_red,
            RiskBand::Medium => color_yellow,
            RiskBand::Low => color_bright_green,
            RiskBand::VeryLow => color_green,
        }
    }

    pub fn recommendations(&self) -> &'static [&'static str] {
        match self {
            RiskBand::VeryHigh => &[
                "Do not click links or download attachments",
                "Do not reply to this email",
                "Delete this email right away",
                "Report this email to your administrator",
            ],
            RiskBand::High => &[
                "Be careful with links in this email",
                "Verify the sender",
                "Scan attachments before opening them",
                "Ask an expert if you are unsure",
            ],
            RiskBand::Medium => &[
                "Verify the sender",
                "Be careful about sharing personal information",
                "Scan attachments before opening them",
            ],
            RiskBand::Low | RiskBand::VeryLow => &[
                "This email is probably safe",
                "Still be careful with personal information",
                "Check links before clicking them",
            ],
        }
    }
}

pub fn is_risky(score: f64) -> bool {
    score >= RISKY_THRESHOLD
}

/// `0.834` -> `"83.4%"`.
pub fn percent(score: f64) -> String {
    format!("{:.1}%", score * 100.0)
}

/// A twenty-cell text gauge, coloured by band.
pub fn meter(score: f64) -> String {
    let score = score.clamp(0.0, 1.0);
    let filled = (score * 20.0).round() as usize;
    let band = RiskBand::from_score(score);
    format!(
        "[{}{}{}{}]",
        band.color(),
        "#".repeat(filled),
        color_reset,
        "-".repeat(20 - filled)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_boundaries() {
        assert_eq!(RiskBand::from_score(0.0), RiskBand::VeryLow);
        assert_eq!(RiskBand::from_score(0.19), RiskBand::VeryLow);
        assert_eq!(RiskBand::from_score(0.2), RiskBand::Low);
        assert_eq!(RiskBand::from_score(0.4), RiskBand::Medium);
        assert_eq!(RiskBand::from_score(0.6), RiskBand::High);
        assert_eq!(RiskBand::from_score(0.8), RiskBand::VeryHigh);
        assert_eq!(RiskBand::from_score(1.0), RiskBand::VeryHigh);
    }

    #[test]
    fn test_risky_threshold() {
        assert!(!is_risky(0.39));
        assert!(is_risky(0.4));
    }

    #[test]
    fn test_percent_and_meter() {
        assert_eq!(percent(0.834), "83.4%");
        assert_eq!(percent(0.0), "0.0%");
        let gauge = meter(0.5);
        assert_eq!(gauge.matches('#').count(), 10);
        assert_eq!(gauge.matches('-').count(), 10);
    }
}
