#[cfg(test)]
#[path = "xetra_test.rs"]
mod tests;

use std::time::Duration;

use anyhow::bail;
use anyhow::Result;
use async_trait::async_trait;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::Backend;
use crate::domain::models::ChatRequest;
use crate::domain::models::ChatResponse;

/// Client for the Xetra chat API.
pub struct Xetra {
    url: String,
    timeout: String,
}

impl Default for Xetra {
    fn default() -> Xetra {
        return Xetra::new(
            &Config::get(ConfigKey::ApiURL),
            &Config::get(ConfigKey::HealthCheckTimeout),
        );
    }
}

impl Xetra {
    pub fn new(url: &str, timeout: &str) -> Xetra {
        return Xetra {
            url: url.trim_end_matches('/').to_string(),
            timeout: timeout.to_string(),
        };
    }

    pub fn chat_url(&self) -> String {
        return format!("{url}/chat", url = self.url);
    }
}

#[async_trait]
impl Backend for Xetra {
    #[allow(clippy::implicit_return)]
    async fn health_check(&self) -> Result<()> {
        let res = match reqwest::Client::new()
            .get(&self.url)
            .timeout(Duration::from_millis(self.timeout.parse::<u64>()?))
            .send()
            .await
        {
            Ok(res) => res,
            Err(err) => {
                tracing::error!(error = ?err, "Xetra API is not running");
                bail!("Xetra API is not running at {}", self.url);
            }
        };

        if !res.status().is_success() {
            tracing::error!(
                status = res.status().as_u16(),
                "Xetra API health check failed"
            );
            bail!("Xetra API health check failed with status {}", res.status().as_u16());
        }

        return Ok(());
    }

    #[allow(clippy::implicit_return)]
    async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse> {
        tracing::debug!(
            url = self.chat_url(),
            persona = request.persona.as_str(),
            temperature = request.temperature,
            "Sending chat request"
        );

        let res = reqwest::Client::new()
            .post(self.chat_url())
            .json(request)
            .send()
            .await?;

        if !res.status().is_success() {
            tracing::error!(
                status = res.status().as_u16(),
                "Failed to make chat request to Xetra API"
            );
            bail!("API request failed with status {}", res.status().as_u16());
        }

        let body = res.json::<ChatResponse>().await?;
        tracing::debug!(body = ?body, "Chat response");

        return Ok(body);
    }
}
