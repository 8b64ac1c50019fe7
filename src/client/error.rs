use serde::de::DeserializeOwned;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("HTTP {status}")]
    Status { status: u16, body: String },

    #[error("invalid response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("unexpected response shape")]
    UnexpectedShape,
}

impl ClientError {
    /// A non-empty string field from a JSON error body, e.g. `error` or `message`.
    pub fn server_field(&self, field: &str) -> Option<String> {
        let ClientError::Status { body, .. } = self else {
            return None;
        };
        let value: serde_json::Value = serde_json::from_str(body).ok()?;
        value
            .get(field)?
            .as_str()
            .filter(|s| !s.is_empty())
            .map(str::to_owned)
    }
}

/// Read the body and decode it; non-2xx becomes `ClientError::Status`.
pub(crate) async fn read_json<T: DeserializeOwned>(
    resp: reqwest::Response,
) -> Result<T, ClientError> {
    let status = resp.status();
    let body = resp.text().await?;
    if !status.is_success() {
        return Err(ClientError::Status {
            status: status.as_u16(),
            body,
        });
    }
    Ok(serde_json::from_str(&body)?)
}
