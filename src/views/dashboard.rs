use std::fmt::Write as _;

use inline_colorization::*;

use super::{enter, still_current, ViewError};
use crate::models::DashboardStats;
use crate::navigation::Route;
use crate::state::AppState;

pub async fn load(state: &AppState) -> Result<DashboardStats, ViewError> {
    let ticket = enter(&state.navigator, Route::Dashboard).await?;
    let stats = state
        .client
        .dashboard_stats()
        .await
        .map_err(|e| ViewError::from_api(e, &["error"], "Failed to load statistics"))?;
    still_current(&state.navigator, &ticket)?;
    Ok(stats)
}

pub fn render(stats: &DashboardStats) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{style_bold}Overview{style_reset}");
    let _ = writeln!(out, "  Emails analyzed:    {}", stats.total_emails);
    let _ = writeln!(
        out,
        "  Phishing detected:  {color_red}{}{color_reset}",
        stats.phishing_detected
    );
    let _ = writeln!(
        out,
        "  Safe emails:        {color_green}{}{color_reset}",
        stats.safe_emails
    );
    let _ = writeln!(out, "  Detection accuracy: {:.1}%", stats.accuracy);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_cards() {
        let text = render(&DashboardStats {
            total_emails: 12,
            phishing_detected: 5,
            safe_emails: 7,
            accuracy: 95.24,
        });
        assert!(text.contains("Emails analyzed:    12"));
        assert!(text.contains("95.2%"));
    }
}
