use axum::{
    http::{header, StatusCode},
    response::IntoResponse,
};

const DOCS_MD: &str = include_str!("../../../../docs.md");

const LLMS_TXT: &str = "\
# SalesLens

> Read-only analytics over a sales ledger: per-user and per-group average
> revenue, bucketed by day or month, optionally bounded by a date range.

## Docs

- [Documentation](/docs): Full API reference (markdown)

## API

Base URL: `/api`

- `GET /api/health` — Liveness check
- `GET /api/users` — List users
- `GET /api/users/:id` — Get one user
- `GET /api/users/:id/revenue` — Average revenue for a user
- `GET /api/groups` — List groups
- `GET /api/groups/:id` — Group detail with members
- `GET /api/groups/:id/revenue` — Average revenue for a group
- `GET /api/sales` — Raw sales listing

Run locally: `cargo run -p saleslens-server`
";

/// GET /docs — embedded API reference.
pub async fn handle() -> impl IntoResponse {
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/markdown; charset=utf-8"),
            (header::CACHE_CONTROL, "public, max-age=3600"),
        ],
        DOCS_MD,
    )
}

/// GET /llms.txt — short index for AI agents.
pub async fn llms_txt() -> impl IntoResponse {
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/markdown; charset=utf-8"),
            (header::CACHE_CONTROL, "public, max-age=3600"),
        ],
        LLMS_TXT,
    )
}
