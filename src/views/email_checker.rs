use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use inline_colorization::*;

use super::risk::{meter, percent, RiskBand};
use super::{enter, still_current, ValidationError, ViewError};
use crate::models::{AnalysisRequest, AnalysisResult};
use crate::navigation::Route;
use crate::state::AppState;
use crate::utils::value::{sanitize, value_to_string};

/// What the user filled in. A chosen file wins over pasted text.
#[derive(Debug, Clone, Default)]
pub struct AnalysisInput {
    pub text: Option<String>,
    pub file: Option<PathBuf>,
}

impl AnalysisInput {
    /// Presence and file-type checks. Does no I/O.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(path) = &self.file {
            return check_eml(path);
        }
        match &self.text {
            Some(text) if !text.trim().is_empty() => Ok(()),
            _ => Err(ValidationError::EmptyAnalysisInput),
        }
    }

    /// Validate, then read the file if one was chosen.
    pub async fn into_request(self) -> Result<AnalysisRequest, ViewError> {
        self.validate()?;
        if let Some(path) = self.file {
            let bytes = tokio::fs::read(&path).await.map_err(|source| ViewError::Io {
                path: path.display().to_string(),
                source,
            })?;
            let filename = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| "email.eml".to_string());
            return Ok(AnalysisRequest::File { bytes, filename });
        }
        Ok(AnalysisRequest::Text {
            content: self.text.unwrap_or_default(),
        })
    }
}

fn check_eml(path: &Path) -> Result<(), ValidationError> {
    let is_eml = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("eml"))
        .unwrap_or(false);
    if is_eml {
        Ok(())
    } else {
        Err(ValidationError::NotEmlFile(path.display().to_string()))
    }
}

/// A finished analysis, ready to show.
#[derive(Debug, Clone)]
pub struct AnalysisReport {
    pub result: AnalysisResult,
    pub band: RiskBand,
}

/// Submit `input` for analysis. Invalid input never reaches the network.
pub async fn analyze(state: &AppState, input: AnalysisInput) -> Result<AnalysisReport, ViewError> {
    let ticket = enter(&state.navigator, Route::EmailChecker).await?;
    let request = input.into_request().await?;

    let result = state
        .client
        .analyze_email(request)
        .await
        .map_err(|e| ViewError::from_api(e, &["error"], "Analysis failed for an unknown reason"))?;
    still_current(&state.navigator, &ticket)?;

    let band = RiskBand::from_score(result.score());
    Ok(AnalysisReport { result, band })
}

impl AnalysisReport {
    pub fn render(&self) -> String {
        let mut out = String::new();
        let score = self.result.score();
        let _ = writeln!(out, "{style_bold}Analysis result{style_reset}");
        let _ = writeln!(out, "  {}", meter(score));
        let _ = writeln!(
            out,
            "  Risk level: {}{}{}",
            self.band.color(),
            self.band.label(),
            color_reset
        );
        let shown = match self.result.risk_score {
            Some(s) => percent(s),
            None => "N/A".to_string(),
        };
        let _ = writeln!(out, "  Score:      {}", shown);

        let _ = writeln!(out, "\n{style_bold}Recommendations{style_reset}");
        let marker = if score >= 0.6 { "!" } else { "✓" };
        for rec in self.band.recommendations() {
            let _ = writeln!(out, "  {} {}", marker, rec);
        }
        for rec in &self.result.recommendations {
            let _ = writeln!(out, "  • {}", sanitize(rec.clone()));
        }

        let details = &self.result.details;
        if !details.is_empty() {
            let _ = writeln!(out, "\n{style_bold}Details{style_reset}");
            if let Some(keywords) = &details.suspicious_keywords {
                let _ = writeln!(
                    out,
                    "  Suspicious keywords: {}",
                    sanitize(keywords.join(", "))
                );
            }
            if let Some(reputation) = &details.domain_reputation {
                let _ = writeln!(out, "  Domain reputation:   {}", sanitize(reputation.clone()));
            }
            for (key, value) in &details.extra {
                let _ = writeln!(out, "  {}: {}", sanitize(key.clone()), value_to_string(value));
            }
        }
        out
    }
}
