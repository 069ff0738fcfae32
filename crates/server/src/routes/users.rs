use axum::{
    extract::{Path, State},
    Json,
};

use saleslens_api::{db, ListUsersResponse, UserResponse};

use crate::error::ApiErr;
use crate::storage::{sq_query_map, sq_query_row, user_from_row, Db};

/// GET /api/users — list all users.
pub async fn list_users(State(db): State<Db>) -> Result<Json<ListUsersResponse>, ApiErr> {
    let conn = db.conn();
    let users = sq_query_map(&conn, &db::users::list_all(), user_from_row)
        .map_err(ApiErr::from_db("list users"))?;
    Ok(Json(ListUsersResponse { users }))
}

/// GET /api/users/:id — get a single user.
pub async fn get_user(
    State(db): State<Db>,
    Path(id): Path<i64>,
) -> Result<Json<UserResponse>, ApiErr> {
    let conn = db.conn();
    let user = sq_query_row(&conn, &db::users::get_by_id(id), user_from_row)
        .map_err(|_| ApiErr::not_found("user not found"))?;
    Ok(Json(user))
}
