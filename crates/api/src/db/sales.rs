//! Sales fact query builders (raw passthrough listing).

use sea_query::{Order, Query, SqliteQueryBuilder};

use super::tables::Sales;
use super::Built;

/// SELECT all sales, oldest first.
pub fn list_all() -> Built {
    Query::select()
        .column(Sales::Id)
        .column(Sales::UserId)
        .column(Sales::Amount)
        .column(Sales::Date)
        .from(Sales::Table)
        .order_by(Sales::Date, Order::Asc)
        .order_by(Sales::Id, Order::Asc)
        .build(SqliteQueryBuilder)
}
