//! The fixed column set of a visit table.

use std::fmt;

/// One of the five columns of a visit table, in file order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum VisitColumn {
    VisitId,
    PatientName,
    DoctorName,
    ReportReason,
    Period,
}

impl VisitColumn {
    /// All columns in the order they are written.
    pub const ALL: [VisitColumn; 5] = [
        VisitColumn::VisitId,
        VisitColumn::PatientName,
        VisitColumn::DoctorName,
        VisitColumn::ReportReason,
        VisitColumn::Period,
    ];

    /// Header label used in the file.
    pub const fn header(self) -> &'static str {
        match self {
            VisitColumn::VisitId => "№ обращения",
            VisitColumn::PatientName => "ФИО пациента",
            VisitColumn::DoctorName => "ФИО врача",
            VisitColumn::ReportReason => "Причина обращения",
            VisitColumn::Period => "Длительность",
        }
    }

    /// Returns the column whose header matches `label` exactly.
    pub fn from_header(label: &str) -> Option<VisitColumn> {
        Self::ALL.into_iter().find(|column| column.header() == label)
    }
}

impl fmt::Display for VisitColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.header())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_lookup_is_exact() {
        assert_eq!(
            VisitColumn::from_header("Длительность"),
            Some(VisitColumn::Period)
        );
        assert_eq!(VisitColumn::from_header("длительность"), None);
        assert_eq!(VisitColumn::from_header(" Длительность"), None);
    }

    #[test]
    fn headers_follow_file_order() {
        let headers = VisitColumn::ALL.map(VisitColumn::header);
        assert_eq!(headers[0], "№ обращения");
        assert_eq!(headers[4], "Длительность");
    }
}
