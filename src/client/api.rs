//! Typed wrappers for each backend endpoint.

use reqwest::multipart::{Form, Part};
use reqwest::Response;
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::endpoint::Endpoint;
use super::error::ApiError;
use super::pipeline::{ApiClient, RequestBody};
use crate::models::{
    AnalysisRequest, AnalysisResult, DashboardStats, Evaluation, GoogleLoginRequest,
    HistoryEntry, HistoryResponse, LoginRequest, MessageResponse, ProfileUpdate,
    RegisterRequest, TokenPair,
};

fn json_body<T: Serialize>(payload: &T) -> Result<RequestBody, ApiError> {
    serde_json::to_value(payload)
        .map(RequestBody::Json)
        .map_err(|e| ApiError::Decode(format!("could not encode request: {}", e)))
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let text = response.text().await.map_err(ApiError::Transport)?;
    // Some acknowledgements come back with an empty body.
    let text = if text.trim().is_empty() { "{}" } else { text.as_str() };
    serde_json::from_str(text).map_err(|e| ApiError::Decode(e.to_string()))
}

fn analysis_form(request: AnalysisRequest) -> Form {
    let kind = request.kind();
    let form = Form::new().text("type", kind);
    match request {
        AnalysisRequest::Text { content } => form.text("content", content),
        AnalysisRequest::File { bytes, filename } => form.part(
            "file",
            Part::bytes(bytes).file_name(filename),
        ),
    }
}

impl ApiClient {
    /// `POST /token/`: exchange email and password for a token pair.
    pub async fn obtain_token(&self, request: &LoginRequest) -> Result<TokenPair, ApiError> {
        let response = self.send(Endpoint::ObtainToken, json_body(request)?).await?;
        decode(response).await
    }

    /// `POST /auth/google/`: exchange a Google OAuth access token for a token pair.
    pub async fn google_login(&self, oauth_access_token: &str) -> Result<TokenPair, ApiError> {
        let request = GoogleLoginRequest {
            access_token: oauth_access_token.to_string(),
        };
        let response = self.send(Endpoint::GoogleLogin, json_body(&request)?).await?;
        decode(response).await
    }

    pub async fn register(&self, request: &RegisterRequest) -> Result<MessageResponse, ApiError> {
        let response = self.send(Endpoint::Register, json_body(request)?).await?;
        decode(response).await
    }

    /// `POST /email/analyze/` as multipart form data.
    pub async fn analyze_email(&self, request: AnalysisRequest) -> Result<AnalysisResult, ApiError> {
        let body = RequestBody::Multipart(analysis_form(request));
        let response = self.send(Endpoint::AnalyzeEmail, body).await?;
        decode(response).await
    }

    pub async fn email_history(&self) -> Result<Vec<HistoryEntry>, ApiError> {
        let response = self.send(Endpoint::EmailHistory, RequestBody::Empty).await?;
        let history: HistoryResponse = decode(response).await?;
        Ok(history.into_entries())
    }

    pub async fn dashboard_stats(&self) -> Result<DashboardStats, ApiError> {
        let response = self.send(Endpoint::DashboardStats, RequestBody::Empty).await?;
        decode(response).await
    }

    pub async fn submit_evaluation(
        &self,
        evaluation: &Evaluation,
    ) -> Result<MessageResponse, ApiError> {
        let response = self
            .send(Endpoint::SubmitEvaluation, json_body(evaluation)?)
            .await?;
        decode(response).await
    }

    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<MessageResponse, ApiError> {
        let response = self.send(Endpoint::UpdateProfile, json_body(update)?).await?;
        decode(response).await
    }
}
