use serde::Serialize;

/// Ratings payload for `POST /evaluation/submit/`. Each score is 1 to 5.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Evaluation {
    pub accuracy: u8,
    pub usability: u8,
    pub speed: u8,
    pub reliability: u8,
    pub overall: u8,
    pub comments: String,
}
