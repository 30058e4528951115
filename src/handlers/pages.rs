use axum::{extract::State, response::Html};
use chrono::Utc;
use tracing::{instrument, trace};

use crate::schemas::{ApiError, AppState};

const TITLE: &str = "Octo Billing System";

/// Landing page with the current time and collection sizes.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<Html<String>, ApiError> {
    let summary = state.store.summary()?;
    trace!(?summary, "Rendering index page");

    let current_time = Utc::now().format("%Y-%m-%d %H:%M:%S");
    Ok(Html(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <title>{TITLE}</title>
</head>
<body>
    <h1>{TITLE}</h1>
    <p>Current time: <span id="current-time">{current_time}</span></p>
    <ul>
        <li>Users: <span id="user-count">{users}</span></li>
        <li>Bills: <span id="bill-count">{bills}</span></li>
    </ul>
</body>
</html>
"#,
        users = summary.users,
        bills = summary.bills,
    )))
}

/// Fallback for paths that match neither an API route nor a static file.
pub async fn route_not_found() -> ApiError {
    ApiError::RouteNotFound
}
