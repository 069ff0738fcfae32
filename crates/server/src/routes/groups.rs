use axum::{
    extract::{Path, State},
    Json,
};

use saleslens_api::{db, GroupDetailResponse, GroupMember, ListGroupsResponse};

use crate::error::ApiErr;
use crate::storage::{group_from_row, sq_query_map, sq_query_row, Db};

/// GET /api/groups — list all groups.
pub async fn list_groups(State(db): State<Db>) -> Result<Json<ListGroupsResponse>, ApiErr> {
    let conn = db.conn();
    let groups = sq_query_map(&conn, &db::groups::list_all(), group_from_row)
        .map_err(ApiErr::from_db("list groups"))?;
    Ok(Json(ListGroupsResponse { groups }))
}

/// GET /api/groups/:id — group detail with member count and members.
pub async fn get_group(
    State(db): State<Db>,
    Path(id): Path<i64>,
) -> Result<Json<GroupDetailResponse>, ApiErr> {
    let conn = db.conn();

    let group = sq_query_row(&conn, &db::groups::get_by_id(id), group_from_row)
        .map_err(|_| ApiErr::not_found("group not found"))?;

    let member_count = sq_query_row(&conn, &db::groups::member_count(id), |row| row.get(0))
        .map_err(ApiErr::from_db("count members"))?;

    let members = sq_query_map(&conn, &db::groups::member_list(id), |row| {
        Ok(GroupMember {
            user_id: row.get(0)?,
            name: row.get(1)?,
        })
    })
    .map_err(ApiErr::from_db("list members"))?;

    Ok(Json(GroupDetailResponse {
        group,
        member_count,
        members,
    }))
}
