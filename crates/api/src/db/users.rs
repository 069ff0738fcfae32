//! User query builders.

use sea_query::{Expr, Order, Query, SqliteQueryBuilder};

use super::tables::Users;
use super::Built;

fn user_columns(q: &mut sea_query::SelectStatement) -> &mut sea_query::SelectStatement {
    q.column(Users::Id)
        .column(Users::Name)
        .column(Users::Role)
        .column(Users::CreatedAt)
}

/// SELECT all users.
pub fn list_all() -> Built {
    let mut q = Query::select().to_owned();
    user_columns(&mut q);
    q.from(Users::Table)
        .order_by(Users::Id, Order::Asc)
        .build(SqliteQueryBuilder)
}

/// SELECT a single user by id.
pub fn get_by_id(id: i64) -> Built {
    let mut q = Query::select().to_owned();
    user_columns(&mut q);
    q.from(Users::Table)
        .and_where(Expr::col(Users::Id).eq(id))
        .build(SqliteQueryBuilder)
}
