//! HTTP plumbing for the automation service.

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::trace;
use uuid::Uuid;

use sitewright_protocols::DriverError;

/// Thin authenticated JSON client over the service's REST API.
pub struct ApiClient {
    base_url: String,
    api_key: String,
    client: reqwest::Client,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            client: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<reqwest::Response, DriverError> {
        let request_id = Uuid::new_v4();
        let response = request
            .header("x-api-key", &self.api_key)
            .header("x-request-id", request_id.to_string())
            .send()
            .await
            .map_err(|e| DriverError::ConnectionFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            // Error payloads look like {"error": {"message": "..."}}
            let message = serde_json::from_str::<serde_json::Value>(&body)
                .ok()
                .and_then(|v| v["error"]["message"].as_str().map(String::from))
                .unwrap_or(body);
            return Err(DriverError::Api {
                status: status.as_u16(),
                message,
            });
        }

        trace!(%request_id, status = status.as_u16(), "service request ok");
        Ok(response)
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, DriverError> {
        let response = self.send(self.client.get(self.endpoint(path))).await?;
        response
            .json()
            .await
            .map_err(|e| DriverError::ConnectionFailed(e.to_string()))
    }

    pub async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, DriverError> {
        let response = self
            .send(self.client.post(self.endpoint(path)).json(body))
            .await?;
        response
            .json()
            .await
            .map_err(|e| DriverError::ConnectionFailed(e.to_string()))
    }

    /// POST where the response body is irrelevant.
    pub async fn post_unit<B: Serialize>(&self, path: &str, body: &B) -> Result<(), DriverError> {
        self.send(self.client.post(self.endpoint(path)).json(body))
            .await?;
        Ok(())
    }

    pub async fn delete(&self, path: &str) -> Result<(), DriverError> {
        self.send(self.client.delete(self.endpoint(path))).await?;
        Ok(())
    }
}
