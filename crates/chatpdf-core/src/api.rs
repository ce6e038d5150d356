//! Blocking HTTP client shared by the hosted embedding and generation models

use crate::error::{ChatPdfError, Result, Service};
use chatpdf_config::Credentials;
use reqwest::blocking::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

const API_KEY_HEADER: &str = "x-goog-api-key";

pub(crate) struct ApiClient {
    client: Client,
    base_url: String,
    credentials: Credentials,
    service: Service,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
    #[serde(default)]
    status: String,
    #[serde(default)]
    details: Vec<ErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    #[serde(default)]
    reason: Option<String>,
}

impl ApiClient {
    pub(crate) fn new(
        base_url: &str,
        credentials: Credentials,
        timeout_secs: u64,
        service: Service,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(ChatPdfError::unexpected)?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            credentials,
            service,
        })
    }

    /// POST a JSON body to `{base_url}/{path}` and decode the JSON reply
    pub(crate) fn post<T: DeserializeOwned>(&self, path: &str, body: &serde_json::Value) -> Result<T> {
        let url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        debug!("POST {}", url);

        let resp = self
            .client
            .post(&url)
            .header(API_KEY_HEADER, self.credentials.api_key())
            .json(body)
            .send()
            .map_err(|e| ChatPdfError::ServiceUnavailable {
                service: self.service,
                message: e.to_string(),
            })?;

        let status = resp.status();
        if !status.is_success() {
            let txt = resp.text().unwrap_or_default();
            return Err(classify_failure(self.service, status.as_u16(), &txt));
        }

        resp.json::<T>().map_err(|e| {
            ChatPdfError::Unexpected(format!("malformed {} response: {}", self.service, e))
        })
    }
}

/// Resource path for a model name given with or without the `models/` prefix
pub fn model_path(model: &str) -> String {
    if model.starts_with("models/") || model.starts_with("tunedModels/") {
        model.to_string()
    } else {
        format!("models/{}", model)
    }
}

/// Map a non-success HTTP status and body to an error kind
pub(crate) fn classify_failure(service: Service, status: u16, body: &str) -> ChatPdfError {
    let parsed = serde_json::from_str::<ErrorEnvelope>(body).ok();

    let key_rejected = match &parsed {
        Some(env) => env
            .error
            .details
            .iter()
            .filter_map(|d| d.reason.as_deref())
            .any(|r| r.starts_with("API_KEY")),
        None => false,
    };

    let message = match parsed {
        Some(env) if !env.error.message.is_empty() => {
            if env.error.status.is_empty() {
                format!("HTTP {}: {}", status, env.error.message)
            } else {
                format!("HTTP {} {}: {}", status, env.error.status, env.error.message)
            }
        }
        _ if body.trim().is_empty() => format!("HTTP {}", status),
        _ => format!("HTTP {}: {}", status, body.trim()),
    };

    if status == 401 || status == 403 || (status == 400 && key_rejected) {
        ChatPdfError::InvalidCredential { service, message }
    } else {
        ChatPdfError::ServiceUnavailable { service, message }
    }
}
