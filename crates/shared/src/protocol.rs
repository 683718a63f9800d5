use serde::{Deserialize, Serialize};

/// Body posted to the scoring endpoint. Built fresh for every submission and
/// dropped once the call completes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeRequest {
    pub text: String,
}

/// Reply from the scoring endpoint. The score is nominally in `[0, 1]`;
/// consumers pass it through without revalidating.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AnalyzeResponse {
    pub anxiety_score: f64,
}
