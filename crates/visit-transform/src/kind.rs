//! Transform selection.

use std::fmt;
use std::str::FromStr;

use crate::error::{Result, TransformError};

/// The four selectable transforms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransformKind {
    SortByDuration,
    SortByPatientName,
    SortByReportReason,
    FilterByDuration,
}

impl TransformKind {
    /// All transforms in menu order.
    pub const ALL: [TransformKind; 4] = [
        TransformKind::SortByDuration,
        TransformKind::SortByPatientName,
        TransformKind::SortByReportReason,
        TransformKind::FilterByDuration,
    ];

    /// Option code typed by the user.
    pub const fn code(self) -> &'static str {
        match self {
            TransformKind::SortByDuration => "1",
            TransformKind::SortByPatientName => "2",
            TransformKind::SortByReportReason => "3",
            TransformKind::FilterByDuration => "4",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            TransformKind::SortByDuration => "Sort by duration",
            TransformKind::SortByPatientName => "Sort by patient name",
            TransformKind::SortByReportReason => "Sort by report reason",
            TransformKind::FilterByDuration => "Filter by duration",
        }
    }

    /// Whether the transform needs a criteria value.
    pub const fn needs_criteria(self) -> bool {
        matches!(self, TransformKind::FilterByDuration)
    }
}

/// Parses an option code.
///
/// Surrounding whitespace is ignored, so `" 2\n"` selects option 2. The
/// code itself must match exactly: `"02"` and `"2."` are invalid choices.
impl FromStr for TransformKind {
    type Err = TransformError;

    fn from_str(code: &str) -> Result<Self> {
        let trimmed = code.trim();
        Self::ALL
            .into_iter()
            .find(|kind| kind.code() == trimmed)
            .ok_or_else(|| TransformError::InvalidChoice {
                code: code.to_string(),
            })
    }
}

impl fmt::Display for TransformKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A fully specified transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transform {
    SortByDuration,
    SortByPatientName,
    SortByReportReason,
    FilterByDuration { min_period: i64 },
}

impl Transform {
    /// Builds a transform from an option code and optional criteria.
    ///
    /// `criteria` is ignored by the sorts.
    pub fn from_code(code: &str, criteria: Option<i64>) -> Result<Self> {
        Ok(match code.parse::<TransformKind>()? {
            TransformKind::SortByDuration => Transform::SortByDuration,
            TransformKind::SortByPatientName => Transform::SortByPatientName,
            TransformKind::SortByReportReason => Transform::SortByReportReason,
            TransformKind::FilterByDuration => Transform::FilterByDuration {
                min_period: criteria.ok_or(TransformError::MissingCriteria)?,
            },
        })
    }

    pub fn kind(&self) -> TransformKind {
        match self {
            Transform::SortByDuration => TransformKind::SortByDuration,
            Transform::SortByPatientName => TransformKind::SortByPatientName,
            Transform::SortByReportReason => TransformKind::SortByReportReason,
            Transform::FilterByDuration { .. } => TransformKind::FilterByDuration,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_option_codes() {
        assert_eq!("1".parse(), Ok(TransformKind::SortByDuration));
        assert_eq!(" 4\n".parse(), Ok(TransformKind::FilterByDuration));
        assert_eq!(
            "5".parse::<TransformKind>(),
            Err(TransformError::InvalidChoice {
                code: "5".to_string()
            })
        );
        assert!("".parse::<TransformKind>().is_err());
        assert!("01".parse::<TransformKind>().is_err());
    }

    #[test]
    fn padding_around_code_is_ignored() {
        for code in ["2 ", "\t2", " 2\r\n"] {
            assert_eq!(code.parse(), Ok(TransformKind::SortByPatientName));
        }
        assert_eq!(
            " 2.".parse::<TransformKind>(),
            Err(TransformError::InvalidChoice {
                code: " 2.".to_string()
            })
        );
    }

    #[test]
    fn filter_requires_criteria() {
        assert_eq!(
            Transform::from_code("4", None),
            Err(TransformError::MissingCriteria)
        );
        assert_eq!(
            Transform::from_code("4", Some(7)),
            Ok(Transform::FilterByDuration { min_period: 7 })
        );
        assert_eq!(
            Transform::from_code("2", Some(7)),
            Ok(Transform::SortByPatientName)
        );
    }

    #[test]
    fn menu_codes_are_sequential() {
        let codes: Vec<&str> = TransformKind::ALL
            .into_iter()
            .map(TransformKind::code)
            .collect();
        assert_eq!(codes, vec!["1", "2", "3", "4"]);
    }
}
