use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;

use crate::error::{ApiError, ValidationError};
use crate::models::adopter::Adopter;
use crate::models::adoption::{Adoption, AdoptionDraft};
use crate::models::animal::Animal;
use crate::service::api::ShelterApi;
use crate::service::guard::FlightGuard;
use crate::service::notify::{Notification, NotificationSink};
use crate::surfaces::{SubmitOutcome, reject, settle};

/// Form input for registering an adoption.
#[derive(Debug, Clone, Default)]
pub struct AdoptionForm {
    pub animal_id: Option<i64>,
    pub adopter_id: Option<i64>,
    pub date: Option<NaiveDate>,
    pub notes: String,
}

/// The adoptions view: the catalogue of animals still available for
/// adoption, the adopter list, the registered adoptions and one guard for
/// the registration flow.
pub struct AdoptionsSurface<A: ShelterApi> {
    api: A,
    guard: FlightGuard,
    sink: Arc<dyn NotificationSink>,
    available_animals: Vec<Animal>,
    adopters: Vec<Adopter>,
    adoptions: Vec<Adoption>,
}

impl<A: ShelterApi> AdoptionsSurface<A> {
    pub fn new(api: A, sink: Arc<dyn NotificationSink>, min_loader: Duration) -> AdoptionsSurface<A> {
        AdoptionsSurface {
            api,
            guard: FlightGuard::new(min_loader, sink.clone()),
            sink,
            available_animals: Vec::new(),
            adopters: Vec::new(),
            adoptions: Vec::new(),
        }
    }

    pub fn available_animals(&self) -> &[Animal] {
        &self.available_animals
    }

    pub fn adopters(&self) -> &[Adopter] {
        &self.adopters
    }

    pub fn adoptions(&self) -> &[Adoption] {
        &self.adoptions
    }

    pub fn is_loading(&self) -> bool {
        self.guard.is_loading()
    }

    /// Load the pickers for the registration form.
    pub async fn refresh_catalogue(&mut self) -> Result<(), ApiError> {
        match self.api.animals_available_for_adoption().await {
            Ok(list) => self.available_animals = list,
            Err(err) => {
                self.sink.show(&Notification::error(
                    "Error",
                    "No se pudieron cargar los animales.",
                ));
                return Err(err);
            }
        }
        match self.api.list_adopters().await {
            Ok(list) => self.adopters = list,
            Err(err) => {
                self.sink.show(&Notification::error(
                    "Error",
                    "No se pudieron cargar los adoptantes.",
                ));
                return Err(err);
            }
        }
        Ok(())
    }

    pub async fn refresh_list(&mut self) -> Result<(), ApiError> {
        match self.api.list_adoptions().await {
            Ok(list) => {
                self.adoptions = list;
                Ok(())
            }
            Err(err) => {
                self.sink.show(&Notification::error(
                    "Error",
                    "No se pudieron cargar las adopciones.",
                ));
                Err(err)
            }
        }
    }

    /// Register an adoption. On success the adopted animal leaves the
    /// available pool, so the catalogue is re-fetched along with the list.
    pub async fn register(&mut self, form: AdoptionForm) -> Result<SubmitOutcome, ApiError> {
        let (Some(animal_id), Some(adopter_id), Some(date)) =
            (form.animal_id, form.adopter_id, form.date)
        else {
            return Ok(reject(
                self.sink.as_ref(),
                ValidationError::MissingAdoptionFields,
            ));
        };
        let draft = AdoptionDraft {
            animal_id,
            adopter_id,
            date,
            notes: form.notes.trim().to_string(),
        };
        let api = &self.api;
        let guard = &self.guard;
        let available = &mut self.available_animals;
        let adoptions = &mut self.adoptions;
        let result = guard
            .run(|| async move {
                match api.create_adoption(&draft).await {
                    Err(err) => {
                        guard.notify_error(
                            "Error al registrar la adopción",
                            "Revisa los datos o el servidor.",
                        );
                        Err(err)
                    }
                    Ok(_) => {
                        match api.animals_available_for_adoption().await {
                            Ok(list) => *available = list,
                            Err(err) => {
                                guard.notify_error(
                                    "Error",
                                    "No se pudieron cargar los animales.",
                                );
                                return Err(err);
                            }
                        }
                        match api.list_adoptions().await {
                            Ok(list) => *adoptions = list,
                            Err(err) => {
                                guard.notify_error(
                                    "Error",
                                    "No se pudieron cargar las adopciones.",
                                );
                                return Err(err);
                            }
                        }
                        guard.notify_success("Adopción registrada correctamente", "");
                        Ok(())
                    }
                }
            })
            .await;
        settle(result)
    }
}
