use serde::Deserialize;
use serde_json::{Map, Value};

/// What gets submitted to `POST /email/analyze/`: pasted text or a raw `.eml` file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisRequest {
    Text { content: String },
    File { bytes: Vec<u8>, filename: String },
}

impl AnalysisRequest {
    /// The value of the multipart `type` field the backend dispatches on.
    pub fn kind(&self) -> &'static str {
        match self {
            AnalysisRequest::Text { .. } => "text",
            AnalysisRequest::File { .. } => "file",
        }
    }
}

/// The backend's verdict for one submission.
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
pub struct AnalysisResult {
    #[serde(default)]
    pub id: Option<i64>,
    /// Probability-like score in `[0, 1]`. Absent when the backend omits it.
    #[serde(default)]
    pub risk_score: Option<f64>,
    #[serde(default)]
    pub recommendations: Vec<String>,
    #[serde(default)]
    pub details: AnalysisDetails,
}

impl AnalysisResult {
    /// Score used for banding; a missing score counts as zero.
    pub fn score(&self) -> f64 {
        self.risk_score.unwrap_or(0.0).clamp(0.0, 1.0)
    }
}

/// Optional diagnostic fields. Known ones are typed, the rest are kept verbatim.
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
pub struct AnalysisDetails {
    #[serde(default)]
    pub suspicious_keywords: Option<Vec<String>>,
    #[serde(default)]
    pub domain_reputation: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl AnalysisDetails {
    pub fn is_empty(&self) -> bool {
        self.suspicious_keywords.is_none() && self.domain_reputation.is_none() && self.extra.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_with_details() {
        let result: AnalysisResult = serde_json::from_str(
            r#"{
                "id": 7,
                "risk_score": 0.83,
                "recommendations": ["Do not click links"],
                "details": {
                    "suspicious_keywords": ["urgent", "verify"],
                    "domain_reputation": "poor",
                    "url_count": 3
                }
            }"#,
        )
        .unwrap();
        assert_eq!(result.id, Some(7));
        assert_eq!(result.score(), 0.83);
        assert_eq!(
            result.details.suspicious_keywords.as_deref(),
            Some(&["urgent".to_string(), "verify".to_string()][..])
        );
        assert_eq!(result.details.domain_reputation.as_deref(), Some("poor"));
        assert_eq!(result.details.extra.get("url_count"), Some(&Value::from(3)));
    }

    #[test]
    fn test_missing_score_and_details() {
        let result: AnalysisResult = serde_json::from_str("{}").unwrap();
        assert_eq!(result.risk_score, None);
        assert_eq!(result.score(), 0.0);
        assert!(result.details.is_empty());
    }
}
