//! Revenue aggregation query builders.
//!
//! The whole aggregation pipeline is one SELECT with the arithmetic pushed
//! down to SQLite: the scope becomes a row predicate (direct `user_id`
//! filter, or a `user_groups` join for group scope), the optional range
//! narrows it, the granularity picks the GROUP BY key expression, and
//! AVG/COUNT reduce each bucket. Builders are pure: same input, same SQL.

use sea_query::{
    Alias, Asterisk, Expr, Func, JoinType, Order, Query, SimpleExpr, SqliteQueryBuilder,
};

use super::tables::{Sales, UserGroups};
use super::Built;
use crate::{Granularity, RevenueQuery, Scope};

/// Bucket key expression for a query.
///
/// With no time bucketing the key is the scope column itself, so the whole
/// matched set collapses into a single row keyed by the scope id. Day and
/// month keys are text-truncations of the stored timestamp; whatever zone
/// the stored value implies is used as-is.
fn bucket_key(query: &RevenueQuery) -> SimpleExpr {
    match query.granularity {
        Granularity::Daily => Expr::cust("strftime('%Y-%m-%d', s.date)"),
        Granularity::Monthly => Expr::cust("strftime('%Y-%m-01', s.date)"),
        Granularity::None => match query.scope {
            Scope::User(_) => Expr::cust("CAST(s.user_id AS TEXT)"),
            Scope::Group(_) => Expr::cust("CAST(m.group_id AS TEXT)"),
        },
    }
}

/// Build the aggregation SELECT for a validated [`RevenueQuery`].
///
/// Returns one row per bucket: `bucket, average_revenue, sale_count`,
/// ordered ascending by bucket key. A scope that matches no rows yields
/// zero rows rather than an error, including unknown ids and empty groups.
pub fn series(query: &RevenueQuery) -> Built {
    let s = Alias::new("s");
    let m = Alias::new("m");

    let mut q = Query::select().to_owned();
    q.expr_as(bucket_key(query), Alias::new("bucket"))
        .expr_as(
            Func::avg(Expr::col((s.clone(), Sales::Amount))),
            Alias::new("average_revenue"),
        )
        .expr_as(Func::count(Expr::col(Asterisk)), Alias::new("sale_count"))
        .from_as(Sales::Table, s.clone());

    match query.scope {
        Scope::User(id) => {
            q.and_where(Expr::col((s.clone(), Sales::UserId)).eq(id));
        }
        Scope::Group(id) => {
            q.join_as(
                JoinType::InnerJoin,
                UserGroups::Table,
                m.clone(),
                Expr::col((m.clone(), UserGroups::UserId)).equals((s.clone(), Sales::UserId)),
            )
            .and_where(Expr::col((m.clone(), UserGroups::GroupId)).eq(id));
        }
    }

    // Inclusive on both calendar days; comparison is on the truncated day
    // so end-of-day times on the last day still match.
    if let Some(ref range) = query.range {
        q.and_where(Expr::cust_with_values(
            "date(s.date) BETWEEN ? AND ?",
            [range.start.as_str(), range.end.as_str()],
        ));
    }

    q.group_by_col(Alias::new("bucket"))
        .order_by(Alias::new("bucket"), Order::Asc)
        .build(SqliteQueryBuilder)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DateRange;

    fn query(scope: Scope, granularity: Granularity, range: Option<DateRange>) -> RevenueQuery {
        RevenueQuery {
            scope,
            granularity,
            range,
        }
    }

    fn range(start: &str, end: &str) -> Option<DateRange> {
        Some(DateRange {
            start: start.into(),
            end: end.into(),
        })
    }

    #[test]
    fn test_user_scope_filters_on_user_id() {
        let (sql, values) = series(&query(Scope::User(7), Granularity::None, None));
        assert!(sql.contains(r#""s"."user_id" ="#), "sql: {sql}");
        assert!(!sql.contains("JOIN"), "sql: {sql}");
        assert_eq!(values.iter().count(), 1);
    }

    #[test]
    fn test_group_scope_joins_membership() {
        let (sql, _) = series(&query(Scope::Group(3), Granularity::Monthly, None));
        assert!(sql.contains(r#"INNER JOIN "user_groups""#), "sql: {sql}");
        assert!(sql.contains(r#""m"."group_id" ="#), "sql: {sql}");
        assert!(sql.contains(r#""m"."user_id" = "s"."user_id""#), "sql: {sql}");
    }

    #[test]
    fn test_none_granularity_keys_by_scope_column() {
        let (sql, _) = series(&query(Scope::User(1), Granularity::None, None));
        assert!(sql.contains("CAST(s.user_id AS TEXT)"), "sql: {sql}");

        let (sql, _) = series(&query(Scope::Group(1), Granularity::None, None));
        assert!(sql.contains("CAST(m.group_id AS TEXT)"), "sql: {sql}");
    }

    #[test]
    fn test_daily_and_monthly_truncate_the_timestamp() {
        let (sql, _) = series(&query(Scope::User(1), Granularity::Daily, None));
        assert!(sql.contains("strftime('%Y-%m-%d', s.date)"), "sql: {sql}");

        let (sql, _) = series(&query(Scope::User(1), Granularity::Monthly, None));
        assert!(sql.contains("strftime('%Y-%m-01', s.date)"), "sql: {sql}");
    }

    #[test]
    fn test_aggregates_are_pushed_down() {
        let (sql, _) = series(&query(Scope::User(1), Granularity::Daily, None));
        assert!(sql.contains(r#"AVG("s"."amount")"#), "sql: {sql}");
        assert!(sql.contains("COUNT(*)"), "sql: {sql}");
        assert!(sql.contains(r#"GROUP BY "bucket""#), "sql: {sql}");
        assert!(sql.contains(r#"ORDER BY "bucket" ASC"#), "sql: {sql}");
    }

    #[test]
    fn test_range_adds_inclusive_between() {
        let (sql, values) = series(&query(
            Scope::User(1),
            Granularity::Daily,
            range("2024-02-01", "2024-02-28"),
        ));
        assert!(sql.contains("date(s.date) BETWEEN ? AND ?"), "sql: {sql}");
        // scope id + two range bounds
        assert_eq!(values.iter().count(), 3);
    }

    #[test]
    fn test_unbounded_has_no_between() {
        let (sql, _) = series(&query(Scope::Group(1), Granularity::Daily, None));
        assert!(!sql.contains("BETWEEN"), "sql: {sql}");
    }

    #[test]
    fn test_builder_is_deterministic() {
        let q = query(
            Scope::Group(9),
            Granularity::Monthly,
            range("2024-01-01", "2024-06-30"),
        );
        assert_eq!(series(&q), series(&q));
    }
}
