use serde::Deserialize;

/// One past analysis as listed by `GET /email/history/`.
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
pub struct HistoryEntry {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub risk_score: f64,
    /// Kept as the raw string; rendering parses it best-effort.
    #[serde(default)]
    pub analyzed_at: Option<String>,
}

/// The history endpoint answers with either a bare list or `{"history": [...]}`.
#[derive(Deserialize, Debug, Clone)]
#[serde(untagged)]
pub enum HistoryResponse {
    List(Vec<HistoryEntry>),
    Wrapped { history: Vec<HistoryEntry> },
}

impl HistoryResponse {
    pub fn into_entries(self) -> Vec<HistoryEntry> {
        match self {
            HistoryResponse::List(entries) => entries,
            HistoryResponse::Wrapped { history } => history,
        }
    }
}
