use async_trait::async_trait;
use farewatch_core::provider::{FlightOffersResponse, ProviderErrorResponse};
use farewatch_core::{CoreError, CoreResult, FlightSearchClient, OfferSearchRequest};
use farewatch_shared::Masked;
use reqwest::StatusCode;
use serde::Deserialize;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tracing::{debug, info};

/// Tokens are refreshed this long before the provider says they expire
const TOKEN_EXPIRY_MARGIN: Duration = Duration::from_secs(30);

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: u64,
}

struct AccessToken {
    value: String,
    expires_at: Instant,
}

/// Flight-offer search over the provider's REST API (OAuth2 client credentials)
pub struct AmadeusClient {
    http: reqwest::Client,
    base_url: String,
    client_id: Masked<String>,
    client_secret: Masked<String>,
    token: Mutex<Option<AccessToken>>,
}

impl AmadeusClient {
    pub fn new(
        http: reqwest::Client,
        base_url: impl Into<String>,
        client_id: Masked<String>,
        client_secret: Masked<String>,
    ) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client_id,
            client_secret,
            token: Mutex::new(None),
        }
    }

    async fn access_token(&self) -> CoreResult<String> {
        let mut cached = self.token.lock().await;
        if let Some(token) = cached.as_ref() {
            if token.expires_at > Instant::now() {
                return Ok(token.value.clone());
            }
        }

        debug!("Requesting flight search access token");
        let response = self
            .http
            .post(format!("{}/v1/security/oauth2/token", self.base_url))
            .form(&[
                ("grant_type", "client_credentials"),
                ("client_id", self.client_id.expose().as_str()),
                ("client_secret", self.client_secret.expose().as_str()),
            ])
            .send()
            .await
            .map_err(|e| CoreError::SearchFailure(format!("token request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CoreError::SearchFailure(format!(
                "token request rejected: {}",
                describe_failure(status, &body)
            )));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| CoreError::SearchFailure(format!("unreadable token response: {}", e)))?;

        let lifetime = Duration::from_secs(token.expires_in).saturating_sub(TOKEN_EXPIRY_MARGIN);
        *cached = Some(AccessToken {
            value: token.access_token.clone(),
            expires_at: Instant::now() + lifetime,
        });
        info!("Flight search access token refreshed, valid for {}s", lifetime.as_secs());

        Ok(token.access_token)
    }

    async fn forget_token(&self) {
        *self.token.lock().await = None;
    }
}

/// Query string for the flight-offers endpoint
pub fn search_params(request: &OfferSearchRequest) -> Vec<(&'static str, String)> {
    vec![
        ("originLocationCode", request.origin.clone()),
        ("destinationLocationCode", request.destination.clone()),
        ("departureDate", request.date.format("%Y-%m-%d").to_string()),
        ("adults", request.adults.to_string()),
        ("max", request.max_results.to_string()),
    ]
}

/// Readable description of a failed provider call, preferring the provider's
/// own error list over the raw body
pub fn describe_failure(status: StatusCode, body: &str) -> String {
    match serde_json::from_str::<ProviderErrorResponse>(body) {
        Ok(parsed) if !parsed.errors.is_empty() => parsed.to_string(),
        _ if body.trim().is_empty() => format!("HTTP {}", status),
        _ => format!("HTTP {}: {}", status, body.trim()),
    }
}

#[async_trait]
impl FlightSearchClient for AmadeusClient {
    async fn search_offers(
        &self,
        request: &OfferSearchRequest,
    ) -> CoreResult<Vec<serde_json::Value>> {
        let token = self.access_token().await?;

        let response = self
            .http
            .get(format!("{}/v2/shopping/flight-offers", self.base_url))
            .bearer_auth(token)
            .query(&search_params(request))
            .send()
            .await
            .map_err(|e| CoreError::SearchFailure(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            if status == StatusCode::UNAUTHORIZED {
                self.forget_token().await;
            }
            let body = response.text().await.unwrap_or_default();
            return Err(CoreError::SearchFailure(describe_failure(status, &body)));
        }

        let body: FlightOffersResponse = response
            .json()
            .await
            .map_err(|e| CoreError::SearchFailure(format!("unreadable offer response: {}", e)))?;

        Ok(body.data)
    }
}
