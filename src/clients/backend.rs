use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::{RequestBuilder, Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use uuid::Uuid;

use crate::error::ApiError;
use crate::models::adopter::{Adopter, AdopterDraft};
use crate::models::adoption::{Adoption, AdoptionDraft};
use crate::models::animal::Animal;
use crate::models::appointment::{Appointment, AppointmentDraft};
use crate::models::stats::{StatsPeriod, StatsReport};
use crate::models::user::{Credentials, LoginResponse, NewUser, UserProfile};

/// Create/update calls carry this header so a human re-click after a timeout
/// cannot duplicate the record; the backend deduplicates by key. The guard's
/// re-entrancy lock is the client-side half of the same contract.
const IDEMPOTENCY_KEY: &str = "Idempotency-Key";

pub struct BackendClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl BackendClient {
    pub fn new(base_url: &str, token: Option<String>) -> BackendClient {
        BackendClient {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.header(AUTHORIZATION, format!("Bearer {token}")),
            None => request,
        }
    }

    fn idempotent(request: RequestBuilder) -> RequestBuilder {
        request.header(IDEMPOTENCY_KEY, Uuid::new_v4().to_string())
    }

    // Read the body once as text, then parse, so decode failures can show
    // the raw payload.
    async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        let status = response.status();
        let body = response.text().await?;
        Self::check_status(status, &body)?;
        serde_json::from_str(&body).map_err(|source| ApiError::Decode { source, body })
    }

    async fn read_empty(response: Response) -> Result<(), ApiError> {
        let status = response.status();
        let body = response.text().await?;
        Self::check_status(status, &body)
    }

    fn check_status(status: StatusCode, body: &str) -> Result<(), ApiError> {
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(ApiError::Unauthorized(status.as_u16()));
        }
        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                body: body.to_string(),
            });
        }
        Ok(())
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self.authorized(self.http.get(self.url(path))).send().await?;
        Self::read_json(response).await
    }

    async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let request = Self::idempotent(self.authorized(self.http.post(self.url(path))))
            .header(CONTENT_TYPE, "application/json")
            .json(body);
        Self::read_json(request.send().await?).await
    }

    async fn put_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let request = Self::idempotent(self.authorized(self.http.put(self.url(path))))
            .header(CONTENT_TYPE, "application/json")
            .json(body);
        Self::read_json(request.send().await?).await
    }

    pub async fn list_animals(&self) -> Result<Vec<Animal>, ApiError> {
        self.get_json("/animales").await
    }

    pub async fn animals_available_for_adoption(&self) -> Result<Vec<Animal>, ApiError> {
        self.get_json("/animales/disponibles-para-adopcion").await
    }

    pub async fn list_appointments(&self) -> Result<Vec<Appointment>, ApiError> {
        self.get_json("/citas").await
    }

    pub async fn create_appointment(&self, draft: &AppointmentDraft) -> Result<Appointment, ApiError> {
        self.post_json("/citas", draft).await
    }

    pub async fn update_appointment(
        &self,
        id: i64,
        draft: &AppointmentDraft,
    ) -> Result<Appointment, ApiError> {
        self.put_json(&format!("/citas/{id}"), draft).await
    }

    pub async fn delete_appointment(&self, id: i64) -> Result<(), ApiError> {
        let response = self
            .authorized(self.http.delete(self.url(&format!("/citas/{id}"))))
            .send()
            .await?;
        Self::read_empty(response).await
    }

    pub async fn list_adopters(&self) -> Result<Vec<Adopter>, ApiError> {
        self.get_json("/adoptantes").await
    }

    pub async fn create_adopter(&self, draft: &AdopterDraft) -> Result<Adopter, ApiError> {
        self.post_json("/adoptantes", draft).await
    }

    pub async fn list_adoptions(&self) -> Result<Vec<Adoption>, ApiError> {
        self.get_json("/adopciones").await
    }

    pub async fn create_adoption(&self, draft: &AdoptionDraft) -> Result<Adoption, ApiError> {
        self.post_json("/adopciones", draft).await
    }

    /// The only unprotected call; no bearer token yet.
    pub async fn login(&self, credentials: &Credentials) -> Result<LoginResponse, ApiError> {
        let request = self
            .http
            .post(self.url("/auth/login"))
            .header(CONTENT_TYPE, "application/json")
            .json(credentials);
        Self::read_json(request.send().await?).await
    }

    pub async fn register_user(&self, user: &NewUser) -> Result<UserProfile, ApiError> {
        self.post_json("/auth/register", user).await
    }

    pub async fn fetch_stats(&self, period: StatsPeriod) -> Result<StatsReport, ApiError> {
        let request = self
            .authorized(self.http.get(self.url("/graficos")))
            .query(&[("periodo", period.as_query())]);
        Self::read_json(request.send().await?).await
    }
}
