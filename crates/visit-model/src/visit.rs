//! The visit record.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::column::VisitColumn;
use crate::error::{Result, VisitError};

/// A visit row exactly as stored in the file.
///
/// Field names are renamed to the file's header labels so the same type
/// serves both the CSV reader and the CSV writer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisitRow {
    #[serde(rename = "№ обращения")]
    pub visit_id: String,
    #[serde(rename = "ФИО пациента")]
    pub patient_name: String,
    #[serde(rename = "ФИО врача")]
    pub doctor_name: String,
    #[serde(rename = "Причина обращения")]
    pub report_reason: String,
    #[serde(rename = "Длительность")]
    pub period: String,
}

/// A single medical-office visit.
///
/// Visits are immutable once built; sorting and filtering produce new
/// sequences of cloned visits.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Visit {
    visit_id: String,
    patient_name: String,
    doctor_name: String,
    report_reason: String,
    period: i64,
}

impl Visit {
    pub fn new(
        visit_id: impl Into<String>,
        patient_name: impl Into<String>,
        doctor_name: impl Into<String>,
        report_reason: impl Into<String>,
        period: i64,
    ) -> Self {
        Self {
            visit_id: visit_id.into(),
            patient_name: patient_name.into(),
            doctor_name: doctor_name.into(),
            report_reason: report_reason.into(),
            period,
        }
    }

    pub fn visit_id(&self) -> &str {
        &self.visit_id
    }

    pub fn patient_name(&self) -> &str {
        &self.patient_name
    }

    pub fn doctor_name(&self) -> &str {
        &self.doctor_name
    }

    pub fn report_reason(&self) -> &str {
        &self.report_reason
    }

    /// Visit duration.
    pub fn period(&self) -> i64 {
        self.period
    }

    /// Textual form of the visit, as written to disk.
    pub fn to_row(&self) -> VisitRow {
        VisitRow {
            visit_id: self.visit_id.clone(),
            patient_name: self.patient_name.clone(),
            doctor_name: self.doctor_name.clone(),
            report_reason: self.report_reason.clone(),
            period: self.period.to_string(),
        }
    }

    /// Column/value pairs in file order.
    pub fn fields(&self) -> [(VisitColumn, String); 5] {
        [
            (VisitColumn::VisitId, self.visit_id.clone()),
            (VisitColumn::PatientName, self.patient_name.clone()),
            (VisitColumn::DoctorName, self.doctor_name.clone()),
            (VisitColumn::ReportReason, self.report_reason.clone()),
            (VisitColumn::Period, self.period.to_string()),
        ]
    }
}

/// Parses a duration cell. Surrounding whitespace is ignored.
fn parse_period(value: &str) -> Result<i64> {
    value
        .trim()
        .parse::<i64>()
        .map_err(|_| VisitError::InvalidPeriod {
            value: value.to_string(),
        })
}

impl TryFrom<VisitRow> for Visit {
    type Error = VisitError;

    fn try_from(row: VisitRow) -> Result<Self> {
        let period = parse_period(&row.period)?;
        Ok(Self {
            visit_id: row.visit_id,
            patient_name: row.patient_name,
            doctor_name: row.doctor_name,
            report_reason: row.report_reason,
            period,
        })
    }
}

impl fmt::Display for Visit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, (column, value)) in self.fields().iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{column}: {value}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(period: &str) -> VisitRow {
        VisitRow {
            visit_id: "17".to_string(),
            patient_name: "Иванов И.И.".to_string(),
            doctor_name: "Петров П.П.".to_string(),
            report_reason: "Осмотр".to_string(),
            period: period.to_string(),
        }
    }

    #[test]
    fn parses_period_with_whitespace_and_sign() {
        assert_eq!(Visit::try_from(row(" 30 ")).unwrap().period(), 30);
        assert_eq!(Visit::try_from(row("+5")).unwrap().period(), 5);
        assert_eq!(Visit::try_from(row("-2")).unwrap().period(), -2);
    }

    #[test]
    fn rejects_non_integer_period() {
        for bad in ["", "ten", "1.5", "1e3"] {
            let err = Visit::try_from(row(bad)).unwrap_err();
            assert_eq!(
                err,
                VisitError::InvalidPeriod {
                    value: bad.to_string()
                }
            );
        }
    }

    #[test]
    fn display_lists_columns_in_order() {
        let visit = Visit::new("1", "B", "D", "R", 5);
        assert_eq!(
            visit.to_string(),
            "№ обращения: 1, ФИО пациента: B, ФИО врача: D, Причина обращения: R, Длительность: 5"
        );
    }
}
