//! HTTP-backed session API client.
//!
//! Talks to the Frappe-style `/api/method/...` endpoints. Responses come
//! wrapped in a `{"message": ...}` envelope.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

use insights_core::error::{InsightsError, Result};
use insights_core::session::{SessionApi, SessionUser};

const USER_INFO_METHOD: &str = "insights.api.get_user_info";
const LOGIN_METHOD: &str = "login";
const LOGOUT_METHOD: &str = "logout";
const TRACK_SITE_METHOD: &str = "insights.api.telemetry.track_active_site";
const LAST_VIEWED_METHOD: &str = "insights.api.home.create_last_viewed_log";
const DEFAULT_VERSION_METHOD: &str = "insights.api.user.update_default_version";

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    message: T,
}

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    usr: &'a str,
    pwd: &'a str,
}

/// Session API client over HTTP.
#[derive(Clone)]
pub struct HttpSessionApi {
    client: Client,
    base_url: String,
}

impl HttpSessionApi {
    /// Creates a client against the given site URL (no trailing slash).
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
        }
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/api/method/{}", self.base_url, method)
    }

    async fn call<T: serde::de::DeserializeOwned>(
        &self,
        method: &str,
        body: &serde_json::Value,
    ) -> Result<T> {
        let response = self
            .client
            .post(self.method_url(method))
            .json(body)
            .send()
            .await
            .map_err(|err| InsightsError::remote(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(InsightsError::remote(format!(
                "{method} failed with {status}: {text}"
            )));
        }
        let envelope: Envelope<T> = response
            .json()
            .await
            .map_err(|err| InsightsError::remote(err.to_string()))?;
        Ok(envelope.message)
    }
}

#[async_trait]
impl SessionApi for HttpSessionApi {
    async fn fetch_user_info(&self) -> Result<SessionUser> {
        self.call(USER_INFO_METHOD, &serde_json::json!({})).await
    }

    async fn login(&self, email: &str, password: &str) -> Result<Option<SessionUser>> {
        let response = self
            .client
            .post(self.method_url(LOGIN_METHOD))
            .json(&LoginRequest {
                usr: email,
                pwd: password,
            })
            .send()
            .await
            .map_err(|err| InsightsError::remote(err.to_string()))?;

        match response.status() {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => return Ok(None),
            status if !status.is_success() => {
                return Err(InsightsError::remote(format!(
                    "login failed with {status}"
                )));
            }
            _ => {}
        }

        // Credentials accepted; the login response carries no profile
        let user = self.fetch_user_info().await?;
        Ok(Some(user))
    }

    async fn logout(&self) -> Result<()> {
        let _: serde_json::Value = self.call(LOGOUT_METHOD, &serde_json::json!({})).await?;
        Ok(())
    }

    async fn track_active_site(&self) -> Result<()> {
        let _: serde_json::Value = self.call(TRACK_SITE_METHOD, &serde_json::json!({})).await?;
        Ok(())
    }

    async fn create_last_viewed_log(&self, record_type: &str, name: &str) -> Result<()> {
        let body = serde_json::json!({
            "record_type": record_type,
            "record_name": name,
        });
        let _: serde_json::Value = self.call(LAST_VIEWED_METHOD, &body).await?;
        Ok(())
    }

    async fn update_default_version(&self, version: &str) -> Result<()> {
        let body = serde_json::json!({ "version": version });
        let _: serde_json::Value = self.call(DEFAULT_VERSION_METHOD, &body).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_url() {
        let api = HttpSessionApi::new("https://insights.example.com");
        assert_eq!(
            api.method_url("login"),
            "https://insights.example.com/api/method/login"
        );
    }

    #[test]
    fn test_envelope_unwraps_message() {
        let raw = r#"{"message": {"email": "jane@example.com"}}"#;
        let envelope: Envelope<SessionUser> = serde_json::from_str(raw).unwrap();
        assert_eq!(envelope.message.email, "jane@example.com");
    }
}
