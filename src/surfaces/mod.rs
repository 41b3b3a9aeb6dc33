pub mod adoptions;
pub mod animals;
pub mod appointments;
pub mod stats;
pub mod users;

use crate::error::ValidationError;

/// What became of a user-triggered submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The action ran and the backend accepted it.
    Saved,
    /// Synchronous validation failed; the loader was never engaged and the
    /// error alert was shown immediately.
    Rejected(ValidationError),
    /// Another action was still in flight on this surface; the trigger was
    /// dropped, not queued.
    Dropped,
}

pub(crate) fn settle<E>(result: Result<Option<()>, E>) -> Result<SubmitOutcome, E> {
    result.map(|ran| match ran {
        Some(()) => SubmitOutcome::Saved,
        None => SubmitOutcome::Dropped,
    })
}

/// Show a validation error right away, without engaging the loader.
pub(crate) fn reject(sink: &dyn crate::service::notify::NotificationSink, error: ValidationError) -> SubmitOutcome {
    sink.show(&crate::service::notify::Notification::error(
        error.title(),
        error.detail(),
    ));
    SubmitOutcome::Rejected(error)
}
