//! HTTP clients for the auth service and the prediction service.

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use crate::auth::dto::{LoginRequest, LoginResponse, SignupRequest, SignupResponse};
use crate::client::error::{read_json, ClientError};
use crate::client::models::{parse_quote_list, PredictionResponse, StockQuote, Suggestion};

#[async_trait]
pub trait AuthApi: Send + Sync {
    async fn signup(&self, req: &SignupRequest) -> Result<SignupResponse, ClientError>;
    async fn login(&self, req: &LoginRequest) -> Result<LoginResponse, ClientError>;
}

#[async_trait]
pub trait PredictionApi: Send + Sync {
    async fn search(&self, query: &str) -> Result<Vec<Suggestion>, ClientError>;
    async fn trending(&self) -> Result<Vec<StockQuote>, ClientError>;
    async fn top_losers(&self) -> Result<Vec<StockQuote>, ClientError>;
    async fn predict(&self, ticker: &str, days: u32) -> Result<PredictionResponse, ClientError>;
}

#[derive(Debug, Clone)]
pub struct HttpAuthApi {
    client: Client,
    signup_url: String,
    login_url: String,
}

impl HttpAuthApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    /// Create with a custom reqwest [`Client`] (for timeouts, proxies, etc.).
    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base = base_url.into();
        let base = base.trim_end_matches('/');
        Self {
            client,
            signup_url: format!("{base}/signup"),
            login_url: format!("{base}/login"),
        }
    }
}

#[async_trait]
impl AuthApi for HttpAuthApi {
    async fn signup(&self, req: &SignupRequest) -> Result<SignupResponse, ClientError> {
        let resp = self.client.post(&self.signup_url).json(req).send().await?;
        read_json(resp).await
    }

    async fn login(&self, req: &LoginRequest) -> Result<LoginResponse, ClientError> {
        let resp = self.client.post(&self.login_url).json(req).send().await?;
        read_json(resp).await
    }
}

#[derive(Debug, Clone)]
pub struct HttpPredictionApi {
    client: Client,
    base: String,
}

impl HttpPredictionApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base = base_url.into().trim_end_matches('/').to_string();
        Self { client, base }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    async fn quotes(&self, path: &str) -> Result<Vec<StockQuote>, ClientError> {
        let resp = self.client.get(self.url(path)).send().await?;
        let value: serde_json::Value = read_json(resp).await?;
        parse_quote_list(value).ok_or(ClientError::UnexpectedShape)
    }
}

#[async_trait]
impl PredictionApi for HttpPredictionApi {
    async fn search(&self, query: &str) -> Result<Vec<Suggestion>, ClientError> {
        debug!(query, "ticker search");
        let resp = self
            .client
            .get(self.url("/api/search"))
            .query(&[("ticker", query)])
            .send()
            .await?;
        read_json(resp).await
    }

    async fn trending(&self) -> Result<Vec<StockQuote>, ClientError> {
        self.quotes("/api/trending").await
    }

    async fn top_losers(&self) -> Result<Vec<StockQuote>, ClientError> {
        self.quotes("/api/top_losers").await
    }

    async fn predict(&self, ticker: &str, days: u32) -> Result<PredictionResponse, ClientError> {
        debug!(ticker, days, "predict");
        let resp = self
            .client
            .get(self.url("/api/predict"))
            .query(&[("ticker", ticker.to_string()), ("days", days.to_string())])
            .send()
            .await?;
        read_json(resp).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urls_ignore_trailing_slash() {
        let auth = HttpAuthApi::new("http://localhost:3001/");
        assert_eq!(auth.signup_url, "http://localhost:3001/signup");
        assert_eq!(auth.login_url, "http://localhost:3001/login");

        let predict = HttpPredictionApi::new("http://localhost:5000//");
        assert_eq!(predict.url("/api/trending"), "http://localhost:5000/api/trending");
    }
}
