use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("not authorized (HTTP {0}); log in again")]
    Unauthorized(u16),
    #[error("backend returned HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("failed to decode backend response: {source}; raw body: {body}")]
    Decode {
        #[source]
        source: serde_json::Error,
        body: String,
    },
}

impl ApiError {
    /// Message shown to the user when the backend rejects a call. The backend
    /// sends `{"message": "..."}` on errors; fall back to the status line.
    pub fn user_message(&self) -> String {
        if let ApiError::Status { body, .. } = self {
            if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
                if let Some(message) = value.get("message").and_then(|m| m.as_str()) {
                    return message.to_string();
                }
            }
        }
        self.to_string()
    }
}

/// Form-level problems detected before any network call. Each variant maps to
/// the alert title/detail pair the console shows immediately, without
/// engaging the loader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Campos incompletos: Todos los campos son obligatorios.")]
    MissingFields,
    #[error("Correo no válido: Introduce un email válido.")]
    InvalidEmail,
    #[error("Teléfono no válido: Debe contener exactamente 9 dígitos numéricos.")]
    InvalidPhone,
    #[error("Contraseña inválida: Debe tener al menos 8 caracteres, incluyendo letras y números.")]
    WeakPassword,
    #[error("Contraseñas no coinciden: La contraseña debe coincidir en ambos campos.")]
    PasswordMismatch,
    #[error("Fechas no válidas: La fecha de fin debe ser posterior a la de inicio.")]
    EndNotAfterStart,
    #[error("Conflicto de cita: Ya existe una cita en ese horario.")]
    ScheduleConflict,
    #[error("Fecha inválida: La fecha seleccionada no existe.")]
    InvalidFilterDate,
    #[error("Selecciona un adoptante.")]
    NoAdopterSelected,
    #[error("Campos obligatorios: Selecciona animal, adoptante y fecha.")]
    MissingAdoptionFields,
}

impl ValidationError {
    pub fn title(&self) -> &'static str {
        match self {
            ValidationError::MissingFields => "Campos incompletos",
            ValidationError::InvalidEmail => "Correo no válido",
            ValidationError::InvalidPhone => "Teléfono no válido",
            ValidationError::WeakPassword => "Contraseña inválida",
            ValidationError::PasswordMismatch => "Contraseñas no coinciden",
            ValidationError::EndNotAfterStart => "Fechas no válidas",
            ValidationError::ScheduleConflict => "Conflicto de cita",
            ValidationError::InvalidFilterDate => "Fecha inválida",
            ValidationError::NoAdopterSelected => "Selecciona un adoptante",
            ValidationError::MissingAdoptionFields => "Campos obligatorios",
        }
    }

    pub fn detail(&self) -> &'static str {
        match self {
            ValidationError::MissingFields => "Todos los campos son obligatorios.",
            ValidationError::InvalidEmail => "Introduce un email válido.",
            ValidationError::InvalidPhone => "Debe contener exactamente 9 dígitos numéricos.",
            ValidationError::WeakPassword => {
                "Debe tener al menos 8 caracteres, incluyendo letras y números."
            }
            ValidationError::PasswordMismatch => {
                "La contraseña debe coincidir en ambos campos."
            }
            ValidationError::EndNotAfterStart => {
                "La fecha de fin debe ser posterior a la de inicio."
            }
            ValidationError::ScheduleConflict => "Ya existe una cita en ese horario.",
            ValidationError::InvalidFilterDate => {
                "La fecha seleccionada no existe. Verifica el día, mes y año."
            }
            ValidationError::NoAdopterSelected => "",
            ValidationError::MissingAdoptionFields => "Selecciona animal, adoptante y fecha.",
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config line {line}: {content}")]
    InvalidLine { line: usize, content: String },
    #[error("missing required config key {0}")]
    MissingKey(&'static str),
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("cannot access session file: {0}")]
    Io(#[from] std::io::Error),
    #[error("session file is corrupt: {0}")]
    Decode(#[from] serde_json::Error),
}
