use std::sync::Arc;
use std::time::Duration;

use crate::error::{ApiError, ValidationError};
use crate::models::user::{NewUser, Role};
use crate::service::api::ShelterApi;
use crate::service::guard::FlightGuard;
use crate::service::notify::NotificationSink;
use crate::service::validate;
use crate::surfaces::{SubmitOutcome, reject, settle};

/// Form input for registering a staff account.
#[derive(Debug, Clone)]
pub struct NewUserForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub role: Role,
}

/// The create-user view (admin only): validation plus one guarded register
/// call.
pub struct CreateUserSurface<A: ShelterApi> {
    api: A,
    guard: FlightGuard,
    sink: Arc<dyn NotificationSink>,
}

impl<A: ShelterApi> CreateUserSurface<A> {
    pub fn new(api: A, sink: Arc<dyn NotificationSink>, min_loader: Duration) -> CreateUserSurface<A> {
        CreateUserSurface {
            api,
            guard: FlightGuard::new(min_loader, sink.clone()),
            sink,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.guard.is_loading()
    }

    pub async fn register(&mut self, form: NewUserForm) -> Result<SubmitOutcome, ApiError> {
        if let Err(error) = validate::require_all(&[
            &form.name,
            &form.email,
            &form.password,
            &form.confirm_password,
        ]) {
            return Ok(reject(self.sink.as_ref(), error));
        }
        if !validate::email_is_valid(&form.email) {
            return Ok(reject(self.sink.as_ref(), ValidationError::InvalidEmail));
        }
        if !validate::password_is_valid(&form.password) {
            return Ok(reject(self.sink.as_ref(), ValidationError::WeakPassword));
        }
        if form.password != form.confirm_password {
            return Ok(reject(self.sink.as_ref(), ValidationError::PasswordMismatch));
        }
        let user = NewUser {
            name: form.name.trim().to_string(),
            email: form.email.trim().to_string(),
            password: form.password,
            role: form.role,
        };
        let api = &self.api;
        let guard = &self.guard;
        let result = guard
            .run(|| async move {
                match api.register_user(&user).await {
                    Err(err) => {
                        guard.notify_error("Error", &err.user_message());
                        Err(err)
                    }
                    Ok(created) => {
                        guard.notify_success(
                            "Usuario creado",
                            &format!("{} fue registrado correctamente.", created.name),
                        );
                        Ok(())
                    }
                }
            })
            .await;
        settle(result)
    }
}
