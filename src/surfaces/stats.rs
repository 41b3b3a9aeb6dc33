use std::sync::Arc;

use crate::error::ApiError;
use crate::models::stats::{ComparisonRow, StatsPeriod, StatsReport, merge_comparison};
use crate::service::api::ShelterApi;
use crate::service::notify::{Notification, NotificationSink};

/// The statistics view: one report per period, re-fetched when the period
/// changes. Chart rendering is someone else's job; this only holds and
/// merges the series.
pub struct StatsSurface<A: ShelterApi> {
    api: A,
    sink: Arc<dyn NotificationSink>,
    period: StatsPeriod,
    report: Option<StatsReport>,
}

impl<A: ShelterApi> StatsSurface<A> {
    pub fn new(api: A, sink: Arc<dyn NotificationSink>) -> StatsSurface<A> {
        StatsSurface {
            api,
            sink,
            period: StatsPeriod::default(),
            report: None,
        }
    }

    pub fn period(&self) -> StatsPeriod {
        self.period
    }

    pub fn report(&self) -> Option<&StatsReport> {
        self.report.as_ref()
    }

    pub async fn load(&mut self, period: StatsPeriod) -> Result<(), ApiError> {
        self.period = period;
        match self.api.fetch_stats(period).await {
            Ok(report) => {
                self.report = Some(report);
                Ok(())
            }
            Err(err) => {
                self.sink.show(&Notification::error(
                    "Error",
                    "No se pudo cargar del servidor.",
                ));
                Err(err)
            }
        }
    }

    /// Adoptions and appointments merged into one series keyed by date.
    pub fn comparison(&self) -> Vec<ComparisonRow> {
        match &self.report {
            Some(report) => merge_comparison(&report.adoptions, &report.appointments),
            None => Vec::new(),
        }
    }
}
