//! Store row types and column helpers

use chrono::NaiveDate;
use serde::Serialize;

/// Display-only project row returned by the list queries
///
/// Deliberately not a full `Project`: the incomplete/overdue listings only
/// ever show these five columns, so the relations are never resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectSummary {
    pub number: i64,
    pub name: String,
    pub building_type: String,
    pub address: String,
    pub deadline: NaiveDate,
}

/// Parse an ISO-8601 date column, reporting a conversion failure at `idx`
pub(super) fn date_column(idx: usize, text: String) -> rusqlite::Result<NaiveDate> {
    NaiveDate::parse_from_str(&text, "%Y-%m-%d").map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(
            idx,
            rusqlite::types::Type::Text,
            Box::new(e),
        )
    })
}

/// Parse a nullable ISO-8601 date column
pub(super) fn opt_date_column(
    idx: usize,
    text: Option<String>,
) -> rusqlite::Result<Option<NaiveDate>> {
    text.map(|t| date_column(idx, t)).transpose()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_column_parses_iso_dates() {
        assert_eq!(
            date_column(0, "2024-01-01".to_string()).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
        );
        assert!(date_column(0, "01/01/2024".to_string()).is_err());
    }

    #[test]
    fn test_opt_date_column_passes_null_through() {
        assert_eq!(opt_date_column(0, None).unwrap(), None);
        assert!(opt_date_column(0, Some("bad".to_string())).is_err());
    }
}
