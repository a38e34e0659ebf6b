use std::fmt::Write as _;
use std::str::FromStr;

use chrono::{DateTime, NaiveDateTime};

use super::risk::{is_risky, percent, RiskBand};
use super::{enter, still_current, ViewError};
use crate::models::HistoryEntry;
use crate::navigation::Route;
use crate::state::AppState;
use crate::utils::value::sanitize;

const PREVIEW_CHARS: usize = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HistoryFilter {
    #[default]
    All,
    Safe,
    Risky,
}

impl HistoryFilter {
    pub fn matches(&self, entry: &HistoryEntry) -> bool {
        match self {
            HistoryFilter::All => true,
            HistoryFilter::Safe => !is_risky(entry.risk_score),
            HistoryFilter::Risky => is_risky(entry.risk_score),
        }
    }
}

impl FromStr for HistoryFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(HistoryFilter::All),
            "safe" => Ok(HistoryFilter::Safe),
            "risky" => Ok(HistoryFilter::Risky),
            other => Err(format!("unknown filter '{}' (expected all, safe or risky)", other)),
        }
    }
}

/// Loaded history plus the client-side search and filter.
#[derive(Debug, Clone, Default)]
pub struct HistoryView {
    pub entries: Vec<HistoryEntry>,
    pub search: String,
    pub filter: HistoryFilter,
}

impl HistoryView {
    pub fn new(entries: Vec<HistoryEntry>) -> Self {
        HistoryView {
            entries,
            ..Default::default()
        }
    }

    /// Entries whose content contains the search term (case-insensitive)
    /// and that pass the filter. Entries without content match only an
    /// empty search.
    pub fn visible(&self) -> Vec<&HistoryEntry> {
        let needle = self.search.trim().to_lowercase();
        self.entries
            .iter()
            .filter(|entry| {
                let content = entry.content.as_deref().unwrap_or("");
                content.to_lowercase().contains(&needle)
            })
            .filter(|entry| self.filter.matches(entry))
            .collect()
    }

    pub fn render(&self) -> String {
        let visible = self.visible();
        let mut out = String::new();
        let _ = writeln!(
            out,
            "Showing {} of {} analyses",
            visible.len(),
            self.entries.len()
        );
        if visible.is_empty() {
            let _ = writeln!(out, "No analyses match.");
            return out;
        }
        for entry in visible {
            let band = RiskBand::from_score(entry.risk_score);
            let _ = writeln!(
                out,
                "\n{} | {}{}{} {} | {}",
                entry
                    .id
                    .map(|id| format!("#{}", id))
                    .unwrap_or_else(|| "#?".to_string()),
                band.color(),
                band.label(),
                inline_colorization::color_reset,
                percent(entry.risk_score),
                format_date(entry.analyzed_at.as_deref()),
            );
            let _ = writeln!(out, "  {}", preview(entry.content.as_deref().unwrap_or("")));
        }
        out
    }
}

/// First [`PREVIEW_CHARS`] characters, with an ellipsis when cut.
pub fn preview(content: &str) -> String {
    let content = sanitize(content.to_string());
    if content.chars().count() <= PREVIEW_CHARS {
        return content;
    }
    let cut: String = content.chars().take(PREVIEW_CHARS).collect();
    format!("{}...", cut)
}

/// Best-effort timestamp formatting; the backend is not consistent about
/// offsets.
pub fn format_date(raw: Option<&str>) -> String {
    let Some(raw) = raw.filter(|r| !r.trim().is_empty()) else {
        return "unknown date".to_string();
    };
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return parsed.format("%Y-%m-%d %H:%M").to_string();
    }
    if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return parsed.format("%Y-%m-%d %H:%M").to_string();
    }
    "unknown date".to_string()
}

/// Fetch the history for the history view.
pub async fn load(state: &AppState) -> Result<HistoryView, ViewError> {
    let ticket = enter(&state.navigator, Route::EmailHistory).await?;
    let entries = state
        .client
        .email_history()
        .await
        .map_err(|e| ViewError::from_api(e, &["error"], "Failed to load history"))?;
    still_current(&state.navigator, &ticket)?;
    Ok(HistoryView::new(entries))
}
