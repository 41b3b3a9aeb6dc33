use std::sync::Arc;

use crate::error::ApiError;
use crate::models::animal::Animal;
use crate::service::animal_search::{AnimalFilter, filter_animals};
use crate::service::api::ShelterApi;
use crate::service::notify::{Notification, NotificationSink};

/// Read-only animal listing with free-text search and facet filters. No
/// guard here: the view only fetches.
pub struct AnimalsSurface<A: ShelterApi> {
    api: A,
    sink: Arc<dyn NotificationSink>,
    animals: Vec<Animal>,
    filter: AnimalFilter,
}

impl<A: ShelterApi> AnimalsSurface<A> {
    pub fn new(api: A, sink: Arc<dyn NotificationSink>) -> AnimalsSurface<A> {
        AnimalsSurface {
            api,
            sink,
            animals: Vec::new(),
            filter: AnimalFilter::default(),
        }
    }

    pub async fn refresh(&mut self) -> Result<(), ApiError> {
        match self.api.list_animals().await {
            Ok(list) => {
                self.animals = list;
                Ok(())
            }
            Err(err @ ApiError::Unauthorized(_)) => {
                self.sink.show(&Notification::error(
                    "No autorizado",
                    "Inicia sesión de nuevo.",
                ));
                Err(err)
            }
            Err(err) => {
                self.sink.show(&Notification::error(
                    "Error",
                    "No se pudieron cargar los animales.",
                ));
                Err(err)
            }
        }
    }

    pub fn set_filter(&mut self, filter: AnimalFilter) {
        self.filter = filter;
    }

    pub fn animals(&self) -> &[Animal] {
        &self.animals
    }

    /// The listing after applying the free-text search and facets.
    pub fn visible(&self) -> Vec<Animal> {
        filter_animals(&self.animals, &self.filter)
    }
}
