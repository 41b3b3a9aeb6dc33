use std::sync::Arc;
use std::time::Duration;

use chrono::{NaiveDate, NaiveDateTime};

use crate::error::{ApiError, ValidationError};
use crate::models::adopter::{Adopter, AdopterDraft};
use crate::models::appointment::{Appointment, AppointmentDraft};
use crate::service::api::ShelterApi;
use crate::service::guard::FlightGuard;
use crate::service::notify::{Notification, NotificationSink};
use crate::service::schedule::{self, APPOINTMENT_PAGE_SIZE, DateFilter, Page};
use crate::service::validate;
use crate::surfaces::{SubmitOutcome, reject, settle};

/// Form input for creating or editing an appointment. Optional fields model
/// unfilled controls; validation turns them into user-facing errors.
#[derive(Debug, Clone, Default)]
pub struct AppointmentForm {
    pub adopter_id: Option<i64>,
    pub description: String,
    pub starts_at: Option<NaiveDateTime>,
    pub ends_at: Option<NaiveDateTime>,
}

/// Form input for registering an adopter from the appointment flow.
#[derive(Debug, Clone, Default)]
pub struct AdopterForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
}

/// The appointments view: owns the in-memory appointment and adopter lists,
/// the date-parts filter, the current page and one action guard. After every
/// successful mutation the appointment list is re-fetched wholesale from the
/// backend rather than patched.
pub struct AppointmentsSurface<A: ShelterApi> {
    api: A,
    guard: FlightGuard,
    sink: Arc<dyn NotificationSink>,
    appointments: Vec<Appointment>,
    adopters: Vec<Adopter>,
    filter: DateFilter,
    page: usize,
    selected_adopter: Option<i64>,
}

impl<A: ShelterApi> AppointmentsSurface<A> {
    pub fn new(
        api: A,
        sink: Arc<dyn NotificationSink>,
        min_loader: Duration,
        today: NaiveDate,
    ) -> AppointmentsSurface<A> {
        AppointmentsSurface {
            api,
            guard: FlightGuard::new(min_loader, sink.clone()),
            sink,
            appointments: Vec::new(),
            adopters: Vec::new(),
            filter: DateFilter::on(today),
            page: 1,
            selected_adopter: None,
        }
    }

    pub fn appointments(&self) -> &[Appointment] {
        &self.appointments
    }

    pub fn adopters(&self) -> &[Adopter] {
        &self.adopters
    }

    pub fn selected_adopter(&self) -> Option<i64> {
        self.selected_adopter
    }

    pub fn is_loading(&self) -> bool {
        self.guard.is_loading()
    }

    pub fn filter(&self) -> DateFilter {
        self.filter
    }

    /// Case-insensitive adopter name search for the picker.
    pub fn adopters_matching(&self, text: &str) -> Vec<&Adopter> {
        let needle = text.to_lowercase();
        self.adopters
            .iter()
            .filter(|adopter| adopter.name.to_lowercase().contains(&needle))
            .collect()
    }

    /// Year options for the filter: the distinct years in the data, newest
    /// first.
    pub fn year_options(&self) -> Vec<i32> {
        schedule::distinct_years(&self.appointments)
    }

    /// Initial load of both lists.
    pub async fn refresh(&mut self) -> Result<(), ApiError> {
        match self.api.list_appointments().await {
            Ok(list) => {
                self.appointments = list;
                self.page = 1;
            }
            Err(err) => {
                self.sink
                    .show(&Notification::error("Error", "No se pudieron cargar las citas."));
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

    /// A complete filter must name a date that exists; partial filters pass
    /// through. Changing the filter resets the page.
    pub fn set_filter(&mut self, filter: DateFilter) -> Result<(), ValidationError> {
        if !filter.names_real_date() {
            reject(self.sink.as_ref(), ValidationError::InvalidFilterDate);
            return Err(ValidationError::InvalidFilterDate);
        }
        self.filter = filter;
        self.page = 1;
        Ok(())
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = page;
    }

    /// The listing as displayed: date filter, future-first ordering, then
    /// the fixed-size page window (clamped).
    pub fn visible_page(&self, now: NaiveDateTime) -> Page<Appointment> {
        let filtered = schedule::filter_by_date_parts(&self.appointments, &self.filter);
        let ordered = schedule::order_for_display(&filtered, now);
        schedule::paginate(&ordered, APPOINTMENT_PAGE_SIZE, self.page)
    }

    pub async fn create(&mut self, form: AppointmentForm) -> Result<SubmitOutcome, ApiError> {
        let draft = match self.build_draft(&form, None) {
            Ok(draft) => draft,
            Err(error) => return Ok(reject(self.sink.as_ref(), error)),
        };
        let api = &self.api;
        let guard = &self.guard;
        let appointments = &mut self.appointments;
        let page = &mut self.page;
        let result = guard
            .run(|| async move {
                match api.create_appointment(&draft).await {
                    Err(err) => {
                        guard.notify_error(
                            "Error al crear la cita",
                            "Revisa los datos o el servidor.",
                        );
                        Err(err)
                    }
                    Ok(_) => match api.list_appointments().await {
                        Err(err) => {
                            guard.notify_error("Error", "No se pudieron cargar las citas.");
                            Err(err)
                        }
                        Ok(list) => {
                            *appointments = list;
                            *page = 1;
                            guard.notify_success("Cita creada correctamente", "");
                            Ok(())
                        }
                    },
                }
            })
            .await;
        settle(result)
    }

    pub async fn update(&mut self, id: i64, form: AppointmentForm) -> Result<SubmitOutcome, ApiError> {
        let draft = match self.build_draft(&form, Some(id)) {
            Ok(draft) => draft,
            Err(error) => return Ok(reject(self.sink.as_ref(), error)),
        };
        let api = &self.api;
        let guard = &self.guard;
        let appointments = &mut self.appointments;
        let page = &mut self.page;
        let result = guard
            .run(|| async move {
                match api.update_appointment(id, &draft).await {
                    Err(err) => {
                        guard.notify_error("Error al actualizar la cita", "");
                        Err(err)
                    }
                    Ok(_) => match api.list_appointments().await {
                        Err(err) => {
                            guard.notify_error("Error", "No se pudieron cargar las citas.");
                            Err(err)
                        }
                        Ok(list) => {
                            *appointments = list;
                            *page = 1;
                            guard.notify_success("Cita actualizada correctamente", "");
                            Ok(())
                        }
                    },
                }
            })
            .await;
        settle(result)
    }

    /// Drag-reschedule: keeps the title, description and adopter of the
    /// existing appointment and only moves the interval. While the loader is
    /// up (including the cooldown window) the drop is dropped so the widget
    /// can revert it.
    pub async fn reschedule(
        &mut self,
        id: i64,
        starts_at: NaiveDateTime,
        ends_at: NaiveDateTime,
    ) -> Result<SubmitOutcome, ApiError> {
        if self.guard.is_loading() {
            return Ok(SubmitOutcome::Dropped);
        }
        let Some(current) = self.appointments.iter().find(|a| a.id == id).cloned() else {
            return Ok(SubmitOutcome::Dropped);
        };
        if let Err(error) = validate::end_after_start(starts_at, ends_at) {
            return Ok(reject(self.sink.as_ref(), error));
        }
        if schedule::overlaps(starts_at, ends_at, &self.appointments, Some(id)) {
            return Ok(reject(self.sink.as_ref(), ValidationError::ScheduleConflict));
        }
        let draft = AppointmentDraft {
            title: current.title,
            description: current.description,
            starts_at,
            ends_at,
            adopter_id: current.adopter_id,
        };
        let api = &self.api;
        let guard = &self.guard;
        let appointments = &mut self.appointments;
        let page = &mut self.page;
        let result = guard
            .run(|| async move {
                match api.update_appointment(id, &draft).await {
                    Err(err) => {
                        guard.notify_error("Error al actualizar la cita", "");
                        Err(err)
                    }
                    Ok(_) => match api.list_appointments().await {
                        Err(err) => {
                            guard.notify_error("Error", "No se pudieron cargar las citas.");
                            Err(err)
                        }
                        Ok(list) => {
                            *appointments = list;
                            *page = 1;
                            guard.notify_success("Cita actualizada", "Se guardaron los cambios.");
                            Ok(())
                        }
                    },
                }
            })
            .await;
        settle(result)
    }

    /// Confirmation is the caller's concern; this runs the delete itself.
    pub async fn delete(&mut self, id: i64) -> Result<SubmitOutcome, ApiError> {
        let api = &self.api;
        let guard = &self.guard;
        let appointments = &mut self.appointments;
        let page = &mut self.page;
        let result = guard
            .run(|| async move {
                match api.delete_appointment(id).await {
                    Err(err) => {
                        guard.notify_error("Error al eliminar cita", "");
                        Err(err)
                    }
                    Ok(()) => match api.list_appointments().await {
                        Err(err) => {
                            guard.notify_error("Error", "No se pudieron cargar las citas.");
                            Err(err)
                        }
                        Ok(list) => {
                            *appointments = list;
                            *page = 1;
                            guard.notify_success("Cita eliminada", "");
                            Ok(())
                        }
                    },
                }
            })
            .await;
        settle(result)
    }

    /// Register an adopter from the picker's sub-form; on success the new
    /// adopter becomes the selected one.
    pub async fn create_adopter(&mut self, form: AdopterForm) -> Result<SubmitOutcome, ApiError> {
        if let Err(error) =
            validate::require_all(&[&form.name, &form.email, &form.phone, &form.address])
        {
            return Ok(reject(self.sink.as_ref(), error));
        }
        if !validate::email_is_valid(&form.email) {
            return Ok(reject(self.sink.as_ref(), ValidationError::InvalidEmail));
        }
        if !validate::phone_is_valid(&form.phone) {
            return Ok(reject(self.sink.as_ref(), ValidationError::InvalidPhone));
        }
        let draft = AdopterDraft {
            name: form.name.trim().to_string(),
            email: form.email.trim().to_string(),
            phone: form.phone.trim().to_string(),
            address: form.address.trim().to_string(),
        };
        let api = &self.api;
        let guard = &self.guard;
        let adopters = &mut self.adopters;
        let selected = &mut self.selected_adopter;
        let result = guard
            .run(|| async move {
                match api.create_adopter(&draft).await {
                    Err(err) => {
                        guard.notify_error(
                            "Error al crear adoptante",
                            "Revisa los datos o el servidor.",
                        );
                        Err(err)
                    }
                    Ok(_) => match api.list_adopters().await {
                        Err(err) => {
                            guard.notify_error("Error", "No se pudieron cargar los adoptantes.");
                            Err(err)
                        }
                        Ok(list) => {
                            *adopters = list;
                            *selected = adopters
                                .iter()
                                .find(|adopter| adopter.email == draft.email)
                                .map(|adopter| adopter.id);
                            guard.notify_success("Adoptante creado correctamente", "");
                            Ok(())
                        }
                    },
                }
            })
            .await;
        settle(result)
    }

    /// Build and validate the backend body for a create/update. The title is
    /// the selected adopter's name; the conflict check is advisory (the
    /// backend stays the source of truth for concurrent bookings).
    fn build_draft(
        &self,
        form: &AppointmentForm,
        exclude_id: Option<i64>,
    ) -> Result<AppointmentDraft, ValidationError> {
        let Some(adopter_id) = form.adopter_id else {
            return Err(ValidationError::NoAdopterSelected);
        };
        let Some(adopter) = self.adopters.iter().find(|a| a.id == adopter_id) else {
            return Err(ValidationError::NoAdopterSelected);
        };
        let (Some(starts_at), Some(ends_at)) = (form.starts_at, form.ends_at) else {
            return Err(ValidationError::MissingFields);
        };
        if form.description.trim().is_empty() {
            return Err(ValidationError::MissingFields);
        }
        validate::end_after_start(starts_at, ends_at)?;
        if schedule::overlaps(starts_at, ends_at, &self.appointments, exclude_id) {
            return Err(ValidationError::ScheduleConflict);
        }
        Ok(AppointmentDraft {
            title: adopter.name.clone(),
            description: form.description.trim().to_string(),
            starts_at,
            ends_at,
            adopter_id,
        })
    }
}
