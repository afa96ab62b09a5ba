//! Tests for visit-model types.

use visit_model::{Visit, VisitColumn, VisitError, VisitRow};

#[test]
fn row_round_trip_keeps_values() {
    let visit = Visit::new("42", "Сидорова А.В.", "Кузнецов Е.Н.", "Консультация", 15);
    let row = visit.to_row();
    assert_eq!(row.period, "15");
    let back = Visit::try_from(row).expect("row converts back");
    assert_eq!(back, visit);
}

#[test]
fn fields_pair_every_column_once() {
    let visit = Visit::new("1", "A", "B", "C", 7);
    let fields = visit.fields();
    let columns: Vec<VisitColumn> = fields.iter().map(|(column, _)| *column).collect();
    assert_eq!(columns, VisitColumn::ALL.to_vec());
    assert_eq!(fields[4].1, "7");
}

#[test]
fn invalid_period_reports_raw_value() {
    let row = VisitRow {
        visit_id: "1".to_string(),
        patient_name: "A".to_string(),
        doctor_name: "B".to_string(),
        report_reason: "C".to_string(),
        period: "долго".to_string(),
    };
    let err = Visit::try_from(row).unwrap_err();
    assert_eq!(
        err,
        VisitError::InvalidPeriod {
            value: "долго".to_string()
        }
    );
    assert_eq!(err.to_string(), "duration 'долго' is not an integer");
}
