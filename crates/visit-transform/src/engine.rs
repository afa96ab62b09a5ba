//! Transform application.

use visit_model::Visit;

use crate::error::TransformError;
use crate::kind::Transform;

/// Applies `transform` to `visits`, returning a new vector.
///
/// Sorts are stable, so visits with equal keys keep their input order.
pub fn apply(visits: &[Visit], transform: &Transform) -> Vec<Visit> {
    match *transform {
        Transform::SortByDuration => {
            let mut sorted = visits.to_vec();
            sorted.sort_by(|a, b| b.period().cmp(&a.period()));
            sorted
        }
        Transform::SortByPatientName => {
            let mut sorted = visits.to_vec();
            sorted.sort_by(|a, b| a.patient_name().cmp(b.patient_name()));
            sorted
        }
        Transform::SortByReportReason => {
            let mut sorted = visits.to_vec();
            sorted.sort_by(|a, b| a.report_reason().cmp(b.report_reason()));
            sorted
        }
        Transform::FilterByDuration { min_period } => visits
            .iter()
            .filter(|visit| visit.period() >= min_period)
            .cloned()
            .collect(),
    }
}

/// Outcome of [`process`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransformStatus {
    Applied(Transform),
    /// The option code was not usable; the visits were returned unchanged.
    Rejected(TransformError),
}

/// Visits produced by [`process`] and how they were produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Processed {
    pub visits: Vec<Visit>,
    pub status: TransformStatus,
}

/// Selects a transform by option code and applies it.
///
/// An unknown code, or code `4` without criteria, leaves the visits
/// unchanged and reports the problem in [`Processed::status`].
pub fn process(visits: &[Visit], code: &str, criteria: Option<i64>) -> Processed {
    let _span = tracing::info_span!("transform", code = code.trim()).entered();
    match Transform::from_code(code, criteria) {
        Ok(transform) => {
            let result = apply(visits, &transform);
            tracing::info!(
                transform = %transform.kind(),
                input = visits.len(),
                output = result.len(),
                "applied transform"
            );
            Processed {
                visits: result,
                status: TransformStatus::Applied(transform),
            }
        }
        Err(error) => {
            tracing::warn!(%error, "transform not applied");
            Processed {
                visits: visits.to_vec(),
                status: TransformStatus::Rejected(error),
            }
        }
    }
}
