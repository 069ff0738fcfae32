//! Shared API types, validation, and SQL builders for SalesLens.
//!
//! This crate is the **single source of truth** for all API request/response
//! types and for the revenue query-construction rules. The server binary
//! only binds the built queries against its SQLite connection and maps rows
//! into the response types defined here.

use serde::{Deserialize, Serialize};

pub mod db;
pub mod service;

// ─── Shared Enums ────────────────────────────────────────────────────────────

/// The entity a revenue aggregation runs over: one user or one group.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ScopeKind {
    User,
    Group,
}

impl ScopeKind {
    pub fn as_str(&self) -> &str {
        match self {
            Self::User => "user",
            Self::Group => "group",
        }
    }
}

impl std::fmt::Display for ScopeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Aggregation scope: a concrete user or group id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    User(i64),
    Group(i64),
}

impl Scope {
    pub fn kind(&self) -> ScopeKind {
        match self {
            Self::User(_) => ScopeKind::User,
            Self::Group(_) => ScopeKind::Group,
        }
    }

    pub fn id(&self) -> i64 {
        match self {
            Self::User(id) | Self::Group(id) => *id,
        }
    }
}

/// Time-bucketing mode for revenue aggregation.
///
/// `None` produces a single all-time bucket keyed by the scope id;
/// `Daily` and `Monthly` produce one bucket per calendar day / month that
/// has at least one matching sale (sparse series, never zero-filled).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    #[default]
    None,
    Daily,
    Monthly,
}

impl Granularity {
    pub fn as_str(&self) -> &str {
        match self {
            Self::None => "none",
            Self::Daily => "daily",
            Self::Monthly => "monthly",
        }
    }
}

impl std::fmt::Display for Granularity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ─── Revenue ─────────────────────────────────────────────────────────────────

/// Query-string parameters accepted by the revenue endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RevenueQueryParams {
    #[serde(default)]
    pub granularity: Granularity,
    /// Inclusive range start, `YYYY-MM-DD`. Only applied together with `end`.
    pub start: Option<String>,
    /// Inclusive range end, `YYYY-MM-DD`. Only applied together with `start`.
    pub end: Option<String>,
}

/// An inclusive calendar-date interval, already validated (`start <= end`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateRange {
    /// `YYYY-MM-DD`
    pub start: String,
    /// `YYYY-MM-DD`
    pub end: String,
}

/// A fully validated revenue aggregation request.
#[derive(Debug, Clone)]
pub struct RevenueQuery {
    pub scope: Scope,
    pub granularity: Granularity,
    /// `None` means unbounded (all time).
    pub range: Option<DateRange>,
}

/// One aggregated time-period result.
///
/// `bucket` is the scope id for [`Granularity::None`], a `YYYY-MM-DD` day
/// for `Daily`, and the first day of the month for `Monthly`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RevenueBucket {
    pub bucket: String,
    pub average_revenue: f64,
    pub sale_count: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RevenueSeriesResponse {
    pub scope: ScopeKind,
    pub scope_id: i64,
    pub granularity: Granularity,
    /// Ordered ascending by bucket key; empty when no sales matched.
    pub buckets: Vec<RevenueBucket>,
}

// ─── Users ───────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: i64,
    pub name: String,
    pub role: Option<String>,
    pub created_at: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ListUsersResponse {
    pub users: Vec<UserResponse>,
}

// ─── Groups ──────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize, Deserialize)]
pub struct GroupResponse {
    pub id: i64,
    pub name: String,
    pub created_at: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ListGroupsResponse {
    pub groups: Vec<GroupResponse>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GroupMember {
    pub user_id: i64,
    pub name: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GroupDetailResponse {
    pub group: GroupResponse,
    pub member_count: i64,
    pub members: Vec<GroupMember>,
}

// ─── Sales ───────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize, Deserialize)]
pub struct SaleResponse {
    pub id: i64,
    pub user_id: i64,
    pub amount: f64,
    pub date: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ListSalesResponse {
    pub sales: Vec<SaleResponse>,
}

// ─── Health ──────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

// ─── ServiceError ────────────────────────────────────────────────────────────

/// Transport-free service error. The server maps variants onto HTTP
/// statuses; handlers never build status codes by hand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    /// Malformed input: invalid scope identifier or invalid date range.
    BadRequest(String),
    /// The sales store read failed; details belong in the server log.
    Internal(String),
}

impl ServiceError {
    /// HTTP status code as a `u16`.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::BadRequest(_) => 400,
            Self::Internal(_) => 500,
        }
    }

    /// The error message.
    pub fn message(&self) -> &str {
        match self {
            Self::BadRequest(m) | Self::Internal(m) => m,
        }
    }
}

impl std::fmt::Display for ServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ServiceError {}
