use axum::{
    extract::{Path, Query, State},
    Json,
};
use rusqlite::Connection;

use saleslens_api::{
    db, service, RevenueBucket, RevenueQuery, RevenueQueryParams, RevenueSeriesResponse, Scope,
};

use crate::error::ApiErr;
use crate::storage::{bucket_from_row, sq_query_map, Db};

/// Execute a validated revenue query against the store.
///
/// One logical read per request; the store does the grouping and averaging.
pub fn fetch_series(conn: &Connection, query: &RevenueQuery) -> rusqlite::Result<Vec<RevenueBucket>> {
    sq_query_map(conn, &db::revenue::series(query), bucket_from_row)
}

fn run(db: &Db, scope: Scope, params: &RevenueQueryParams) -> Result<RevenueSeriesResponse, ApiErr> {
    let query = service::build_revenue_query(scope, params).map_err(ApiErr::from)?;
    tracing::debug!(
        "revenue query: {} {} granularity={}",
        scope.kind(),
        scope.id(),
        query.granularity
    );
    let conn = db.conn();
    let buckets = fetch_series(&conn, &query).map_err(ApiErr::from_db("revenue query"))?;
    Ok(RevenueSeriesResponse {
        scope: scope.kind(),
        scope_id: scope.id(),
        granularity: query.granularity,
        buckets,
    })
}

/// GET /api/users/:id/revenue — average revenue for one user, optionally
/// bucketed by day or month and bounded by an inclusive date range.
///
/// An unknown user id yields an empty series, not a 404.
pub async fn user_revenue(
    State(db): State<Db>,
    Path(id): Path<i64>,
    Query(params): Query<RevenueQueryParams>,
) -> Result<Json<RevenueSeriesResponse>, ApiErr> {
    Ok(Json(run(&db, Scope::User(id), &params)?))
}

/// GET /api/groups/:id/revenue — average revenue across a group's members.
///
/// Membership is many-to-many: a member of several groups contributes
/// fully to each group's aggregate. Empty or unknown groups yield an
/// empty series.
pub async fn group_revenue(
    State(db): State<Db>,
    Path(id): Path<i64>,
    Query(params): Query<RevenueQueryParams>,
) -> Result<Json<RevenueSeriesResponse>, ApiErr> {
    Ok(Json(run(&db, Scope::Group(id), &params)?))
}
