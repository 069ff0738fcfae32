//! Compile-time–checked column identifiers for all tables.

use sea_query::Iden;

#[derive(Iden)]
pub enum Users {
    Table,
    Id,
    Name,
    Role,
    CreatedAt,
}

#[derive(Iden)]
pub enum Groups {
    Table,
    Id,
    Name,
    CreatedAt,
}

/// Many-to-many membership relation; a user may belong to any number of
/// groups, and group aggregates count such a user's sales in each group.
#[derive(Iden)]
pub enum UserGroups {
    Table,
    UserId,
    GroupId,
}

#[derive(Iden)]
pub enum Sales {
    Table,
    Id,
    UserId,
    Amount,
    Date,
}
