//! HTTP client for the marketplace REST API.
//!
//! Thin request plumbing: base-URL joining, bearer auth, JSON bodies, and
//! conversion of non-2xx responses into `ClientError::Api` carrying the
//! server's message. All response-shape tolerance lives in `normalize`.

use reqwest::RequestBuilder;
use serde_json::Value;
use validator::Validate;

use crate::api::models::*;
use crate::api::normalize;
use crate::auth::models::{LoginRequest, LoginTokens};
use crate::chat::models::{Conversation, Message};
use crate::config::Config;
use crate::errors::{ClientError, ClientResult};

pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(config: &Config) -> ClientResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.request_timeout_seconds))
            .build()
            .map_err(|e| ClientError::config(format!("HTTP client build failed: {e}")))?;

        Ok(ApiClient {
            http,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Send a request and return the parsed JSON body, mapping transport
    /// failures to `Network` and non-2xx statuses to `Api`.
    async fn execute(&self, request: RequestBuilder) -> ClientResult<Value> {
        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;
        let body: Value = serde_json::from_str(&text).unwrap_or(Value::Null);

        if !status.is_success() {
            return Err(ClientError::api(
                status.as_u16(),
                normalize::error_message(status, &body),
            ));
        }
        Ok(body)
    }

    fn parse<T: serde::de::DeserializeOwned>(body: Value) -> ClientResult<T> {
        serde_json::from_value(normalize::unwrap_data(body))
            .map_err(|e| ClientError::unexpected_response(e.to_string()))
    }

    /// `POST /auth/login`
    pub async fn login(&self, request: &LoginRequest) -> ClientResult<LoginTokens> {
        validate(request)?;
        let body = self
            .execute(self.http.post(self.url("/auth/login")).json(request))
            .await?;
        normalize::login_tokens(&body)
    }

    /// `GET /users/me`
    pub async fn fetch_profile(&self, access_token: &str) -> ClientResult<UserProfile> {
        let body = self
            .execute(self.http.get(self.url("/users/me")).bearer_auth(access_token))
            .await?;
        Self::parse(body)
    }

    /// `GET /cats` — public catalog listing.
    pub async fn list_cats(&self, page: u32, per_page: u32) -> ClientResult<Vec<CatListing>> {
        let body = self
            .execute(
                self.http
                    .get(self.url("/cats"))
                    .query(&[("page", page), ("perPage", per_page)]),
            )
            .await?;
        Self::parse(body)
    }

    /// `GET /cats/{id}`
    pub async fn get_cat(&self, cat_id: &str) -> ClientResult<CatListing> {
        let body = self
            .execute(self.http.get(self.url(&format!("/cats/{cat_id}"))))
            .await?;
        Self::parse(body)
    }

    /// `POST /applications`
    pub async fn submit_application(
        &self,
        access_token: &str,
        request: &ApplicationRequest,
    ) -> ClientResult<AdoptionApplication> {
        validate(request)?;
        let body = self
            .execute(
                self.http
                    .post(self.url("/applications"))
                    .bearer_auth(access_token)
                    .json(request),
            )
            .await?;
        Self::parse(body)
    }

    /// `GET /conversations`
    pub async fn list_conversations(&self, access_token: &str) -> ClientResult<Vec<Conversation>> {
        let body = self
            .execute(
                self.http
                    .get(self.url("/conversations"))
                    .bearer_auth(access_token),
            )
            .await?;
        Self::parse(body)
    }

    /// `GET /conversations/{id}/messages`
    pub async fn list_messages(
        &self,
        access_token: &str,
        conversation_id: &str,
    ) -> ClientResult<Vec<Message>> {
        let body = self
            .execute(
                self.http
                    .get(self.url(&format!("/conversations/{conversation_id}/messages")))
                    .bearer_auth(access_token),
            )
            .await?;
        Self::parse(body)
    }

    /// `POST /conversations/{id}/messages`
    pub async fn send_message(
        &self,
        access_token: &str,
        conversation_id: &str,
        content: &str,
    ) -> ClientResult<Message> {
        let body = self
            .execute(
                self.http
                    .post(self.url(&format!("/conversations/{conversation_id}/messages")))
                    .bearer_auth(access_token)
                    .json(&serde_json::json!({ "content": content })),
            )
            .await?;
        Self::parse(body)
    }

    /// `POST /donations`
    pub async fn create_donation(
        &self,
        access_token: &str,
        request: &DonationRequest,
    ) -> ClientResult<DonationSession> {
        validate(request)?;
        let body = self
            .execute(
                self.http
                    .post(self.url("/donations"))
                    .bearer_auth(access_token)
                    .json(request),
            )
            .await?;
        Self::parse(body)
    }
}

/// Flatten validator output into one user-visible message.
fn validate<T: Validate>(payload: &T) -> ClientResult<()> {
    if let Err(validation_errors) = payload.validate() {
        let error_messages: Vec<String> = validation_errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |error| {
                    format!(
                        "{}: {}",
                        field,
                        error.message.as_ref().unwrap_or(&"Invalid value".into())
                    )
                })
            })
            .collect();
        return Err(ClientError::validation(error_messages.join(", ")));
    }
    Ok(())
}
