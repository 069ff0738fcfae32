//! Shared business logic — framework-agnostic pure functions.
//!
//! Route handlers stay thin adapters: they extract transport inputs, call
//! these functions, and map the result onto HTTP.

use chrono::NaiveDate;

use crate::{DateRange, RevenueQuery, RevenueQueryParams, Scope, ServiceError};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Validate an optional pair of range bounds.
///
/// Bounding is applied only when **both** `start` and `end` are present;
/// a single bound is treated identically to no bound at all (all time).
/// An inverted range (`start > end`) is rejected rather than silently
/// returning an empty series.
pub fn parse_range(
    start: Option<&str>,
    end: Option<&str>,
) -> Result<Option<DateRange>, ServiceError> {
    let (Some(start), Some(end)) = (start, end) else {
        return Ok(None);
    };

    let start_day = parse_date(start)?;
    let end_day = parse_date(end)?;

    if start_day > end_day {
        return Err(ServiceError::BadRequest(format!(
            "invalid range: start {start} is after end {end}"
        )));
    }

    Ok(Some(DateRange {
        start: start_day.format(DATE_FORMAT).to_string(),
        end: end_day.format(DATE_FORMAT).to_string(),
    }))
}

fn parse_date(value: &str) -> Result<NaiveDate, ServiceError> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT)
        .map_err(|_| ServiceError::BadRequest(format!("invalid date: {value} (expected YYYY-MM-DD)")))
}

/// Validate raw query parameters into a [`RevenueQuery`] for the given scope.
pub fn build_revenue_query(
    scope: Scope,
    params: &RevenueQueryParams,
) -> Result<RevenueQuery, ServiceError> {
    let range = parse_range(params.start.as_deref(), params.end.as_deref())?;
    Ok(RevenueQuery {
        scope,
        granularity: params.granularity,
        range,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Granularity;

    #[test]
    fn test_parse_range_unbounded() {
        assert_eq!(parse_range(None, None).unwrap(), None);
    }

    #[test]
    fn test_parse_range_single_bound_is_unbounded() {
        assert_eq!(parse_range(Some("2024-01-01"), None).unwrap(), None);
        assert_eq!(parse_range(None, Some("2024-12-31")).unwrap(), None);
    }

    #[test]
    fn test_parse_range_both_bounds() {
        let range = parse_range(Some("2024-02-01"), Some("2024-02-28"))
            .unwrap()
            .unwrap();
        assert_eq!(range.start, "2024-02-01");
        assert_eq!(range.end, "2024-02-28");
    }

    #[test]
    fn test_parse_range_same_day_is_valid() {
        assert!(parse_range(Some("2024-02-01"), Some("2024-02-01")).is_ok());
    }

    #[test]
    fn test_parse_range_inverted_rejected() {
        let err = parse_range(Some("2024-03-01"), Some("2024-02-01")).unwrap_err();
        assert_eq!(err.status_code(), 400);
    }

    #[test]
    fn test_parse_range_malformed_rejected() {
        assert!(parse_range(Some("not-a-date"), Some("2024-02-01")).is_err());
        assert!(parse_range(Some("2024-02-01"), Some("02/28/2024")).is_err());
        assert!(parse_range(Some("2024-13-01"), Some("2024-13-02")).is_err());
    }

    #[test]
    fn test_parse_range_trims_whitespace() {
        let range = parse_range(Some(" 2024-01-05 "), Some("2024-01-06"))
            .unwrap()
            .unwrap();
        assert_eq!(range.start, "2024-01-05");
    }

    #[test]
    fn test_build_revenue_query_defaults() {
        let q = build_revenue_query(Scope::User(1), &RevenueQueryParams::default()).unwrap();
        assert_eq!(q.granularity, Granularity::None);
        assert!(q.range.is_none());
    }

    #[test]
    fn test_scope_and_granularity_display_as_wire_names() {
        use crate::ScopeKind;

        assert_eq!(ScopeKind::User.to_string(), "user");
        assert_eq!(ScopeKind::Group.to_string(), "group");
        assert_eq!(Granularity::None.to_string(), "none");
        assert_eq!(Granularity::Daily.to_string(), "daily");
        assert_eq!(Granularity::Monthly.to_string(), "monthly");
    }

    #[test]
    fn test_service_error_status_codes() {
        assert_eq!(ServiceError::BadRequest("x".into()).status_code(), 400);
        assert_eq!(ServiceError::Internal("x".into()).status_code(), 500);
        assert_eq!(ServiceError::Internal("boom".into()).message(), "boom");
    }

    #[test]
    fn test_granularity_deserializes_lowercase() {
        let params: RevenueQueryParams =
            serde_json::from_str(r#"{"granularity": "monthly"}"#).unwrap();
        assert_eq!(params.granularity, Granularity::Monthly);
        assert!(serde_json::from_str::<RevenueQueryParams>(r#"{"granularity": "weekly"}"#).is_err());
    }
}
