//! Group + membership query builders.

use sea_query::{Alias, Asterisk, Expr, Func, Order, Query, SqliteQueryBuilder};

use super::tables::{Groups, UserGroups, Users};
use super::Built;

fn group_columns(q: &mut sea_query::SelectStatement) -> &mut sea_query::SelectStatement {
    q.column(Groups::Id)
        .column(Groups::Name)
        .column(Groups::CreatedAt)
}

/// SELECT all groups.
pub fn list_all() -> Built {
    let mut q = Query::select().to_owned();
    group_columns(&mut q);
    q.from(Groups::Table)
        .order_by(Groups::Id, Order::Asc)
        .build(SqliteQueryBuilder)
}

/// SELECT a single group by id.
pub fn get_by_id(id: i64) -> Built {
    let mut q = Query::select().to_owned();
    group_columns(&mut q);
    q.from(Groups::Table)
        .and_where(Expr::col(Groups::Id).eq(id))
        .build(SqliteQueryBuilder)
}

/// Count members of a group.
pub fn member_count(id: i64) -> Built {
    Query::select()
        .expr_as(Func::count(Expr::col(Asterisk)), Alias::new("count"))
        .from(UserGroups::Table)
        .and_where(Expr::col(UserGroups::GroupId).eq(id))
        .build(SqliteQueryBuilder)
}

/// List members of a group (joins with users table).
pub fn member_list(id: i64) -> Built {
    Query::select()
        .column((UserGroups::Table, UserGroups::UserId))
        .column((Users::Table, Users::Name))
        .from(UserGroups::Table)
        .inner_join(
            Users::Table,
            Expr::col((Users::Table, Users::Id)).equals((UserGroups::Table, UserGroups::UserId)),
        )
        .and_where(Expr::col((UserGroups::Table, UserGroups::GroupId)).eq(id))
        .order_by((UserGroups::Table, UserGroups::UserId), Order::Asc)
        .build(SqliteQueryBuilder)
}
