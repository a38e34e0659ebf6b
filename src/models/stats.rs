use serde::Deserialize;

/// Aggregate counts from `GET /dashboard/stats/`.
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct DashboardStats {
    pub total_emails: u64,
    pub phishing_detected: u64,
    pub safe_emails: u64,
    /// Percentage, e.g. `95.2`.
    pub accuracy: f64,
}
