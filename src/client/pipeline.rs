use std::time::Duration;

use http::StatusCode;
use reqwest::multipart::Form;
use reqwest::{RequestBuilder, Response};
use serde_json::Value;
use tracing::{debug, error, info_span, warn, Instrument};
use uuid::Uuid;

use super::endpoint::Endpoint;
use super::error::ApiError;
use crate::config::ApiConfig;
use crate::session::{InvalidationReason, SessionHandle};

/// What to send along with a request.
pub enum RequestBody {
    Empty,
    Json(Value),
    Multipart(Form),
}

impl RequestBody {
    fn apply(self, builder: RequestBuilder) -> RequestBuilder {
        match self {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.json(&value),
            RequestBody::Multipart(form) => builder.multipart(form),
        }
    }
}

/// The single path through which backend calls travel.
///
/// Outbound, it reads the token store and attaches `Authorization: Bearer
/// <token>` when a token is present. Inbound, a 401 from any endpoint
/// invalidates the session (which makes the navigator redirect to login)
/// and comes back as [`ApiError::Unauthorized`]. Everything else passes
/// through. There are no retries.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    session: SessionHandle,
}

impl ApiClient {
    pub fn new(config: &ApiConfig, session: SessionHandle) -> Result<Self, ApiError> {
        let mut builder = reqwest::Client::builder();
        if let Some(ms) = config.timeout_in_ms {
            builder = builder.timeout(Duration::from_millis(ms));
        }
        let http = builder.build().map_err(ApiError::Transport)?;
        Ok(ApiClient {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            session,
        })
    }

    pub fn session(&self) -> &SessionHandle {
        &self.session
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, endpoint: Endpoint) -> String {
        format!("{}{}", self.base_url, endpoint.path())
    }

    /// Send one request through both hooks.
    pub async fn send(&self, endpoint: Endpoint, body: RequestBody) -> Result<Response, ApiError> {
        let request_id = Uuid::new_v4();
        let span = info_span!(
            "api_request",
            request_id = %request_id,
            endpoint = endpoint.name(),
            method = %endpoint.method(),
        );

        async move {
            let builder = self
                .http
                .request(endpoint.method(), self.url(endpoint));
            let builder = self.attach_credentials(endpoint, builder).await?;

            debug!("Sending request to {}", endpoint.path());
            let response = body.apply(builder).send().await.map_err(|e| {
                warn!(
                    event_name = "client.request.transport_error",
                    event_domain = "client",
                    error = %e,
                    "request failed without a response"
                );
                ApiError::Transport(e)
            })?;

            self.inspect_response(endpoint, response).await
        }
        .instrument(span)
        .await
    }

    /// Outbound hook.
    async fn attach_credentials(
        &self,
        endpoint: Endpoint,
        builder: RequestBuilder,
    ) -> Result<RequestBuilder, ApiError> {
        let token = self.session.access_token().await.map_err(ApiError::Store)?;
        match token {
            Some(token) => Ok(builder.bearer_auth(token)),
            None if endpoint.requires_auth() => {
                warn!(
                    event_name = "client.request.refused",
                    event_domain = "client",
                    "no access token stored; refusing protected request"
                );
                Err(ApiError::MissingCredentials {
                    endpoint: endpoint.name(),
                })
            }
            None => Ok(builder),
        }
    }

    /// Inbound hook.
    async fn inspect_response(
        &self,
        endpoint: Endpoint,
        response: Response,
    ) -> Result<Response, ApiError> {
        let status = response.status();
        debug!("Received {} from {}", status, endpoint.path());

        if status.is_success() {
            return Ok(response);
        }

        let body = read_body(response).await;

        if status == StatusCode::UNAUTHORIZED {
            error!(
                event_name = "client.session.unauthorized",
                event_domain = "client",
                "backend rejected credentials; clearing session"
            );
            if let Err(e) = self.session.invalidate(InvalidationReason::Unauthorized).await {
                error!("Failed to clear token store: {}", e);
            }
            return Err(ApiError::Unauthorized { body });
        }

        Err(ApiError::Backend { status, body })
    }
}

/// Error bodies are JSON when the backend produced them and text otherwise.
async fn read_body(response: Response) -> Value {
    let text = match response.text().await {
        Ok(text) => text,
        Err(e) => {
            debug!("Could not read error body: {}", e);
            return Value::Null;
        }
    };
    serde_json::from_str(&text).unwrap_or(Value::String(text))
}
