use axum::{extract::State, Json};

use saleslens_api::{db, ListSalesResponse};

use crate::error::ApiErr;
use crate::storage::{sale_from_row, sq_query_map, Db};

/// GET /api/sales — raw passthrough listing of the sales fact table.
pub async fn list_sales(State(db): State<Db>) -> Result<Json<ListSalesResponse>, ApiErr> {
    let conn = db.conn();
    let sales = sq_query_map(&conn, &db::sales::list_all(), sale_from_row)
        .map_err(ApiErr::from_db("list sales"))?;
    Ok(Json(ListSalesResponse { sales }))
}
