use async_trait::async_trait;

use crate::clients::backend::BackendClient;
use crate::error::ApiError;
use crate::models::adopter::{Adopter, AdopterDraft};
use crate::models::adoption::{Adoption, AdoptionDraft};
use crate::models::animal::Animal;
use crate::models::appointment::{Appointment, AppointmentDraft};
use crate::models::stats::{StatsPeriod, StatsReport};
use crate::models::user::{Credentials, LoginResponse, NewUser, UserProfile};

/// Everything the surfaces need from the backend, as a seam so tests can
/// substitute a fake instead of a live server.
#[async_trait]
pub trait ShelterApi: Send + Sync {
    async fn list_animals(&self) -> Result<Vec<Animal>, ApiError>;
    async fn animals_available_for_adoption(&self) -> Result<Vec<Animal>, ApiError>;

    async fn list_appointments(&self) -> Result<Vec<Appointment>, ApiError>;
    async fn create_appointment(&self, draft: &AppointmentDraft) -> Result<Appointment, ApiError>;
    async fn update_appointment(
        &self,
        id: i64,
        draft: &AppointmentDraft,
    ) -> Result<Appointment, ApiError>;
    async fn delete_appointment(&self, id: i64) -> Result<(), ApiError>;

    async fn list_adopters(&self) -> Result<Vec<Adopter>, ApiError>;
    async fn create_adopter(&self, draft: &AdopterDraft) -> Result<Adopter, ApiError>;

    async fn list_adoptions(&self) -> Result<Vec<Adoption>, ApiError>;
    async fn create_adoption(&self, draft: &AdoptionDraft) -> Result<Adoption, ApiError>;

    async fn login(&self, credentials: &Credentials) -> Result<LoginResponse, ApiError>;
    async fn register_user(&self, user: &NewUser) -> Result<UserProfile, ApiError>;

    async fn fetch_stats(&self, period: StatsPeriod) -> Result<StatsReport, ApiError>;
}

#[async_trait]
impl ShelterApi for BackendClient {
    async fn list_animals(&self) -> Result<Vec<Animal>, ApiError> {
        BackendClient::list_animals(self).await
    }

    async fn animals_available_for_adoption(&self) -> Result<Vec<Animal>, ApiError> {
        BackendClient::animals_available_for_adoption(self).await
    }

    async fn list_appointments(&self) -> Result<Vec<Appointment>, ApiError> {
        BackendClient::list_appointments(self).await
    }

    async fn create_appointment(&self, draft: &AppointmentDraft) -> Result<Appointment, ApiError> {
        BackendClient::create_appointment(self, draft).await
    }

    async fn update_appointment(
        &self,
        id: i64,
        draft: &AppointmentDraft,
    ) -> Result<Appointment, ApiError> {
        BackendClient::update_appointment(self, id, draft).await
    }

    async fn delete_appointment(&self, id: i64) -> Result<(), ApiError> {
        BackendClient::delete_appointment(self, id).await
    }

    async fn list_adopters(&self) -> Result<Vec<Adopter>, ApiError> {
        BackendClient::list_adopters(self).await
    }

    async fn create_adopter(&self, draft: &AdopterDraft) -> Result<Adopter, ApiError> {
        BackendClient::create_adopter(self, draft).await
    }

    async fn list_adoptions(&self) -> Result<Vec<Adoption>, ApiError> {
        BackendClient::list_adoptions(self).await
    }

    async fn create_adoption(&self, draft: &AdoptionDraft) -> Result<Adoption, ApiError> {
        BackendClient::create_adoption(self, draft).await
    }

    async fn login(&self, credentials: &Credentials) -> Result<LoginResponse, ApiError> {
        BackendClient::login(self, credentials).await
    }

    async fn register_user(&self, user: &NewUser) -> Result<UserProfile, ApiError> {
        BackendClient::register_user(self, user).await
    }

    async fn fetch_stats(&self, period: StatsPeriod) -> Result<StatsReport, ApiError> {
        BackendClient::fetch_stats(self, period).await
    }
}
